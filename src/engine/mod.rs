//! Adaptive-interval arbitrage decision loop, one per shared pair group.
//!
//! Cycle: sleep the current interval, evaluate the group snapshot, and on an
//! accepted opportunity fire the buy and sell legs concurrently. The polling
//! interval tightens after an executed cycle and relaxes otherwise, trading
//! responsiveness against venue rate limits.

use crate::common::{EngineConfig, ExecutionStatus, OrderSide, VenueAdapter, VenueId};
use crate::group::SharedPairGroup;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;
use tracing::{debug, info, warn};

mod opportunity;
pub use opportunity::{ArbitrageOpportunity, find_opportunity};

/// Result of one decision cycle.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// Fewer than two venues have a live quote; nothing to compare.
    InsufficientVenues,
    /// No fee-adjusted spread above the configured threshold.
    NoOpportunity,
    /// Another execution was already in flight for this group.
    Busy,
    /// Both legs were dispatched and resolved.
    Executed(ExecutionReport),
}

/// Outcome of one executed cycle. Leg failures are never retried or unwound
/// automatically; a one-sided fill is surfaced for operator intervention.
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub opportunity: ArbitrageOpportunity,
    /// Base quantity sent on both legs.
    pub quantity: f64,
    pub buy_status: ExecutionStatus,
    pub sell_status: ExecutionStatus,
}

impl ExecutionReport {
    pub fn fully_filled(&self) -> bool {
        self.buy_status.is_successful() && self.sell_status.is_successful()
    }

    /// Exactly one leg filled. The position is open on one venue and the
    /// counterpart never happened.
    pub fn one_sided(&self) -> bool {
        self.buy_status.is_successful() != self.sell_status.is_successful()
    }
}

/// The decision loop for one [SharedPairGroup].
pub struct DecisionLoop {
    group: Arc<SharedPairGroup>,
    adapters: HashMap<VenueId, Arc<dyn VenueAdapter>>,
    config: EngineConfig,
    running: AtomicBool,
    stop: Notify,
    executing: AtomicBool,
}

impl DecisionLoop {
    pub fn new(
        group: Arc<SharedPairGroup>,
        adapters: Vec<Arc<dyn VenueAdapter>>,
        config: EngineConfig,
    ) -> Self {
        let adapters = adapters
            .into_iter()
            .map(|adapter| (adapter.venue(), adapter))
            .collect();
        Self {
            group,
            adapters,
            config,
            running: AtomicBool::new(false),
            stop: Notify::new(),
            executing: AtomicBool::new(false),
        }
    }

    pub fn group(&self) -> &SharedPairGroup {
        &self.group
    }

    /// Long-running loop. Sleeps the current interval, runs one cycle, then
    /// selects the next interval: promising after an executed cycle, idle
    /// otherwise. Returns only after [stop](Self::stop).
    pub async fn run(&self) {
        self.running.store(true, Ordering::SeqCst);
        info!(pair = %self.group.identity(), "decision loop started");

        let mut interval = self.config.idle_interval;
        while self.running.load(Ordering::SeqCst) {
            tokio::select! {
                _ = self.stop.notified() => break,
                _ = tokio::time::sleep(interval) => {}
            }
            if !self.running.load(Ordering::SeqCst) {
                break;
            }

            interval = match self.run_cycle().await {
                CycleOutcome::Executed(report) => {
                    info!(
                        pair = %self.group.identity(),
                        buy_venue = %report.opportunity.buy_venue,
                        sell_venue = %report.opportunity.sell_venue,
                        net_spread = report.opportunity.net_spread,
                        quantity = report.quantity,
                        buy_status = ?report.buy_status,
                        sell_status = ?report.sell_status,
                        "cycle executed"
                    );
                    self.config.promising_interval
                }
                outcome => {
                    debug!(pair = %self.group.identity(), outcome = ?outcome, "cycle passed");
                    self.config.idle_interval
                }
            };
        }

        info!(pair = %self.group.identity(), "decision loop stopped");
    }

    /// Observed within one sleep tick.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.stop.notify_waiters();
    }

    /// One evaluate-and-maybe-execute pass. Public so the execution guard and
    /// the evaluation rules are exercisable without the timing loop.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let snapshot = self.group.snapshot();
        let live = snapshot
            .iter()
            .filter(|entry| entry.quote.has_liquidity())
            .count();
        if live < 2 {
            return CycleOutcome::InsufficientVenues;
        }

        let Some(opportunity) = find_opportunity(&snapshot, self.config.min_profit_ratio) else {
            return CycleOutcome::NoOpportunity;
        };

        // At most one execution in flight per group. The loser backs off to the
        // next tick instead of queueing.
        if self
            .executing
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return CycleOutcome::Busy;
        }
        let report = self.execute(opportunity).await;
        self.executing.store(false, Ordering::Release);

        if report.one_sided() {
            warn!(
                pair = %self.group.identity(),
                buy_status = ?report.buy_status,
                sell_status = ?report.sell_status,
                "one-sided fill, operator intervention required"
            );
        }
        CycleOutcome::Executed(report)
    }

    async fn execute(&self, opportunity: ArbitrageOpportunity) -> ExecutionReport {
        let quantity = opportunity
            .executable_quantity
            .min(self.config.max_order_quantity);

        // Both legs dispatched before either result is awaited.
        let (buy_status, sell_status) = tokio::join!(
            self.submit(OrderSide::Buy, opportunity.buy_venue, quantity),
            self.submit(OrderSide::Sell, opportunity.sell_venue, quantity),
        );

        ExecutionReport {
            opportunity,
            quantity,
            buy_status,
            sell_status,
        }
    }

    async fn submit(&self, side: OrderSide, venue: VenueId, quantity: f64) -> ExecutionStatus {
        let Some(adapter) = self.adapters.get(&venue) else {
            warn!(venue = %venue, "no adapter registered for venue");
            return ExecutionStatus::UnknownError;
        };
        let Some(pair) = self.group.pair_for(venue) else {
            warn!(venue = %venue, "venue is not a member of this group");
            return ExecutionStatus::UnknownError;
        };

        match adapter.submit_market_order(side, pair, quantity).await {
            Ok(status) => status,
            Err(e) => {
                warn!(venue = %venue, error = %e, "order submission failed");
                ExecutionStatus::UnknownError
            }
        }
    }
}
