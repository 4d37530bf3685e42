//! Shared test fixtures: an in-process mock venue and group builders.

use async_trait::async_trait;
use cross_venue_arb_rs::{
    AssetPair, EngineError, ExecutionStatus, OrderSide, PairIdentity, Quote, SharedPairGroup,
    VenueAdapter, VenueFees, VenueId, VenueTransport,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Semaphore;

#[allow(dead_code)]
pub fn btc_usd() -> PairIdentity {
    PairIdentity {
        base: "BTC".to_string(),
        quote: "USD".to_string(),
    }
}

#[allow(dead_code)]
pub fn pair(venue_symbol: &str) -> AssetPair {
    AssetPair {
        base: "BTC".to_string(),
        quote: "USD".to_string(),
        venue_symbol: venue_symbol.to_string(),
        base_precision: 6,
        quote_precision: 2,
    }
}

#[allow(dead_code)]
pub fn quote(bid: f64, ask: f64) -> Quote {
    quote_with_qty(bid, 1.0, ask, 1.0)
}

#[allow(dead_code)]
pub fn quote_with_qty(bid: f64, bid_qty: f64, ask: f64, ask_qty: f64) -> Quote {
    Quote {
        bid_price: bid,
        bid_qty,
        ask_price: ask,
        ask_qty,
        last_updated: 1,
    }
}

/// Group with one slot per venue, default fees 0.1%/0.1%.
#[allow(dead_code)]
pub fn group_of(venues: &[VenueId]) -> SharedPairGroup {
    let members = venues
        .iter()
        .map(|&v| (v, pair(&format!("BTCUSD-{}", v)), VenueFees::new(0.001, 0.001)))
        .collect();
    SharedPairGroup::new(btc_usd(), members)
}

/// Polls a condition every 20ms for up to 2s.
#[allow(dead_code)]
pub async fn wait_for(what: &str, condition: impl Fn() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("timed out waiting for: {}", what);
}

/// In-process venue: decodes a flat JSON quote shape, records order submissions,
/// and answers them with configured statuses once the gate lets them through.
pub struct MockVenue {
    venue: VenueId,
    fees: VenueFees,
    client: reqwest::Client,
    stream_url: String,
    subscribe: Option<String>,
    buy_status: ExecutionStatus,
    sell_status: ExecutionStatus,
    /// Order submissions park here after being recorded; tests with a closed
    /// gate can observe in-flight executions.
    pub gate: Arc<Semaphore>,
    pub submissions: Mutex<Vec<(OrderSide, f64)>>,
}

#[allow(dead_code)]
impl MockVenue {
    pub fn new(venue: VenueId) -> Self {
        Self {
            venue,
            fees: VenueFees::new(0.001, 0.001),
            client: reqwest::Client::new(),
            stream_url: String::new(),
            subscribe: None,
            buy_status: ExecutionStatus::BuySuccessful,
            sell_status: ExecutionStatus::SellSuccessful,
            gate: Arc::new(Semaphore::new(1024)),
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_fees(mut self, maker: f64, taker: f64) -> Self {
        self.fees = VenueFees::new(maker, taker);
        self
    }

    pub fn with_stream_url(mut self, url: &str) -> Self {
        self.stream_url = url.to_string();
        self
    }

    pub fn with_subscribe(mut self, payload: &str) -> Self {
        self.subscribe = Some(payload.to_string());
        self
    }

    pub fn with_statuses(mut self, buy: ExecutionStatus, sell: ExecutionStatus) -> Self {
        self.buy_status = buy;
        self.sell_status = sell;
        self
    }

    /// Starts with a closed gate: submissions are recorded, then park until the
    /// test adds permits.
    pub fn gated(mut self) -> Self {
        self.gate = Arc::new(Semaphore::new(0));
        self
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

#[async_trait]
impl VenueTransport for MockVenue {
    fn api_base(&self) -> &str {
        "http://127.0.0.1:0"
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn venue_name(&self) -> &str {
        self.venue.name()
    }

    async fn health_check(&self) -> Result<(), EngineError> {
        Ok(())
    }
}

#[async_trait]
impl VenueAdapter for MockVenue {
    fn venue(&self) -> VenueId {
        self.venue
    }

    fn fees(&self) -> VenueFees {
        self.fees
    }

    async fn discover_pairs(&self) -> Result<Vec<AssetPair>, EngineError> {
        Ok(vec![pair(&format!("BTCUSD-{}", self.venue))])
    }

    async fn fetch_quote(&self, _pair: &AssetPair) -> Result<Quote, EngineError> {
        Ok(Quote::default())
    }

    fn quote_stream_url(&self, _pair: &AssetPair) -> String {
        self.stream_url.clone()
    }

    fn stream_subscribe_payload(&self, _pair: &AssetPair) -> Option<String> {
        self.subscribe.clone()
    }

    fn decode_quote_message(&self, payload: &str) -> Option<Quote> {
        let value: serde_json::Value = serde_json::from_str(payload).ok()?;
        Some(Quote {
            bid_price: value.get("bid")?.as_f64()?,
            bid_qty: value.get("bid_qty")?.as_f64()?,
            ask_price: value.get("ask")?.as_f64()?,
            ask_qty: value.get("ask_qty")?.as_f64()?,
            last_updated: 1,
        })
    }

    async fn submit_market_order(
        &self,
        side: OrderSide,
        _pair: &AssetPair,
        quantity: f64,
    ) -> Result<ExecutionStatus, EngineError> {
        self.submissions.lock().unwrap().push((side, quantity));
        let _permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| EngineError::ApiError("gate closed".to_string()))?;

        Ok(match side {
            OrderSide::Buy => self.buy_status,
            OrderSide::Sell => self.sell_status,
        })
    }
}
