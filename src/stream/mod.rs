//! Per-(venue, pair) top-of-book streaming.
//!
//! One task per stream. Inbound frames are decoded by the venue adapter and
//! written into the pair group's slot for that venue; frames the decoder does not
//! recognize are dropped without stopping the stream. The stream itself never
//! reconnects; [StreamSupervisor] owns that policy.

use crate::common::{AssetPair, EngineError, VenueAdapter};
use crate::group::SharedPairGroup;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Frames longer than this are treated as decode errors and dropped. Top-of-book
/// payloads are a few hundred bytes; anything bigger is not a tick.
pub const MAX_FRAME_BYTES: usize = 8 * 1024;

/// Cloneable stop signal for a stream or supervisor task. Observed between
/// suspension points: at most one in-flight receive (or one backoff sleep) after
/// `stop` before the task winds down.
#[derive(Clone)]
pub struct StreamStopper {
    running: Arc<AtomicBool>,
    stop: Arc<Notify>,
}

impl StreamStopper {
    fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
            stop: Arc::new(Notify::new()),
        }
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.stop.notify_waiters();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Handle to one running quote stream task.
pub struct QuoteStreamHandle {
    stopper: StreamStopper,
    task: JoinHandle<()>,
}

impl QuoteStreamHandle {
    pub fn stopper(&self) -> StreamStopper {
        self.stopper.clone()
    }

    /// Requests a graceful close; returns without waiting for it.
    pub fn stop(&self) {
        self.stopper.stop();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the stream task to wind down.
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// Connects to the venue's top-of-book feed for the pair, sends the subscribe
/// frame if the venue expects one, and spawns the read loop. Errors out instead
/// of spawning when the initial connect fails, so the caller's reconnect policy
/// sees it.
pub async fn start(
    adapter: Arc<dyn VenueAdapter>,
    pair: AssetPair,
    group: Arc<SharedPairGroup>,
) -> Result<QuoteStreamHandle, EngineError> {
    let url = adapter.quote_stream_url(&pair);
    let (ws_stream, _) = connect_async(&url)
        .await
        .map_err(|e| EngineError::WsError(e.to_string()))?;
    let (mut write, mut read) = ws_stream.split();

    if let Some(payload) = adapter.stream_subscribe_payload(&pair) {
        write
            .send(Message::Text(payload))
            .await
            .map_err(|e| EngineError::WsError(e.to_string()))?;
    }

    let stopper = StreamStopper::new();
    let task_stopper = stopper.clone();
    let venue = adapter.venue();
    info!(venue = %venue, symbol = %pair.venue_symbol, "quote stream connected");

    let task = tokio::spawn(async move {
        loop {
            if !task_stopper.running.load(Ordering::SeqCst) {
                let _ = write.send(Message::Close(None)).await;
                break;
            }

            tokio::select! {
                _ = task_stopper.stop.notified() => {
                    let _ = write.send(Message::Close(None)).await;
                    info!(venue = %venue, "quote stream stopped");
                    break;
                }
                frame = read.next() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        if text.len() > MAX_FRAME_BYTES {
                            debug!(venue = %venue, bytes = text.len(), "oversized frame dropped");
                            continue;
                        }
                        if let Some(quote) = adapter.decode_quote_message(&text) {
                            group.update(venue, quote);
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = write.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) => {
                        // Close handshake, then no further writes to the slot.
                        let _ = write.send(Message::Close(None)).await;
                        info!(venue = %venue, "quote stream closed by venue");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(venue = %venue, error = %e, "quote stream read error");
                        break;
                    }
                    None => {
                        info!(venue = %venue, "quote stream ended");
                        break;
                    }
                }
            }
        }
        task_stopper.running.store(false, Ordering::SeqCst);
    });

    Ok(QuoteStreamHandle { stopper, task })
}

/// Reconnect policy for a supervised stream: fixed delay, capped consecutive
/// failed connection attempts. A successful connect resets the counter.
#[derive(Debug, Clone, Copy)]
pub struct ReconnectPolicy {
    pub delay: Duration,
    pub max_retries: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(5),
            max_retries: 10,
        }
    }
}

/// Handle to a supervisor task that keeps one (venue, pair) stream alive.
pub struct SupervisorHandle {
    stopper: StreamStopper,
    task: JoinHandle<()>,
}

impl SupervisorHandle {
    pub fn stop(&self) {
        self.stopper.stop();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn join(self) {
        let _ = self.task.await;
    }
}

/// Owns the reconnect loop for one (venue, pair) stream: start the stream, wait
/// for it to drop, reconnect after [ReconnectPolicy::delay]. Gives up after
/// `max_retries` consecutive failed connection attempts.
pub struct StreamSupervisor;

impl StreamSupervisor {
    pub fn start(
        adapter: Arc<dyn VenueAdapter>,
        pair: AssetPair,
        group: Arc<SharedPairGroup>,
        policy: ReconnectPolicy,
    ) -> SupervisorHandle {
        let stopper = StreamStopper::new();
        let task_stopper = stopper.clone();
        let venue = adapter.venue();

        let task = tokio::spawn(async move {
            let mut attempts: u32 = 0;

            while task_stopper.running.load(Ordering::SeqCst) {
                let handle = match start(adapter.clone(), pair.clone(), group.clone()).await {
                    Ok(handle) => handle,
                    Err(e) => {
                        attempts = attempts.saturating_add(1);
                        if attempts > policy.max_retries {
                            warn!(venue = %venue, attempts, "giving up on quote stream");
                            break;
                        }
                        warn!(venue = %venue, error = %e, attempt = attempts, "stream connect failed");
                        tokio::select! {
                            _ = task_stopper.stop.notified() => break,
                            _ = tokio::time::sleep(policy.delay) => {}
                        }
                        continue;
                    }
                };
                attempts = 0;

                let stream_stopper = handle.stopper();
                let mut stream_task = handle.task;
                tokio::select! {
                    _ = task_stopper.stop.notified() => {
                        stream_stopper.stop();
                        let _ = stream_task.await;
                        break;
                    }
                    _ = &mut stream_task => {
                        debug!(venue = %venue, "quote stream dropped, reconnecting");
                    }
                }

                tokio::select! {
                    _ = task_stopper.stop.notified() => break,
                    _ = tokio::time::sleep(policy.delay) => {}
                }
            }
            task_stopper.running.store(false, Ordering::SeqCst);
        });

        SupervisorHandle { stopper, task }
    }
}
