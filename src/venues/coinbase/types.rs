use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CoinbaseProduct {
    pub id: String,
    pub base_currency: String,
    pub quote_currency: String,
    pub base_increment: String,
    pub quote_increment: String,
    pub status: String,
}

/// Level-1 order book: bids/asks hold one entry of [price, size, num_orders].
#[derive(Debug, Deserialize)]
pub struct CoinbaseOrderBookResponse {
    pub bids: Vec<serde_json::Value>,
    pub asks: Vec<serde_json::Value>,
}

/// WebSocket ticker channel payload. Non-ticker frames (subscriptions ack,
/// heartbeat) fail to match this shape and are dropped by the decoder.
#[derive(Debug, Deserialize)]
pub struct CoinbaseTickerWs {
    #[serde(rename = "type")]
    pub kind: String,
    pub best_bid: String,
    pub best_bid_size: String,
    pub best_ask: String,
    pub best_ask_size: String,
}
