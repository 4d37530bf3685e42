use serde::Deserialize;
use std::collections::HashMap;

/// Kraken wraps every REST response in {error: [...], result: {...}}.
#[derive(Debug, Deserialize)]
pub struct KrakenResponse<T> {
    pub error: Vec<String>,
    pub result: Option<T>,
}

pub type KrakenAssetPairsResult = HashMap<String, KrakenPairInfo>;

#[derive(Debug, Deserialize)]
pub struct KrakenPairInfo {
    pub altname: String,
    pub base: String,
    pub quote: String,
    pub pair_decimals: u32,
    pub lot_decimals: u32,
    pub status: Option<String>,
}

pub type KrakenTickerResult = HashMap<String, KrakenTicker>;

#[derive(Debug, Deserialize)]
pub struct KrakenTicker {
    pub a: Vec<String>, // ask: [price, whole lot volume, lot volume]
    pub b: Vec<String>, // bid: [price, whole lot volume, lot volume]
}

/// WS v2 ticker channel frame. Status/heartbeat/ack frames fail to match
/// this shape and are dropped by the decoder.
#[derive(Debug, Deserialize)]
pub struct KrakenTickerWs {
    pub channel: String,
    pub data: Vec<KrakenTickerData>,
}

#[derive(Debug, Deserialize)]
pub struct KrakenTickerData {
    pub bid: f64,
    pub bid_qty: f64,
    pub ask: f64,
    pub ask_qty: f64,
}
