mod types;
use crate::common::{
    AssetPair, EngineError, ExecutionStatus, OrderSide, Quote, VenueAdapter, VenueFees, VenueId,
    VenueTransport, get_timestamp_millis, parse_f64,
};
use crate::create_venue;
use async_trait::async_trait;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use types::{BinanceBookTickerResponse, BinanceBookTickerWs, BinanceExchangeInfoResponse};

const BINANCE_API_BASE: &str = "https://api.binance.com/api/v3";
const BINANCE_WS_BASE: &str = "wss://stream.binance.com:9443";

/// Order-error catalog revision this adapter maps against
/// (Binance spot API "error codes" document).
pub const ORDER_ERROR_CATALOG: &str = "binance-spot-2024-03";

type HmacSha256 = Hmac<Sha256>;

create_venue!(Binance);

#[async_trait]
impl VenueTransport for Binance {
    fn api_base(&self) -> &str {
        BINANCE_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn venue_name(&self) -> &str {
        "Binance"
    }

    async fn health_check(&self) -> Result<(), EngineError> {
        // Binance ping endpoint - test connectivity to the REST API
        let endpoint = "ping";
        self.get::<serde_json::Value>(endpoint)
            .await
            .map_err(|_| EngineError::HealthCheckFailed)?;

        Ok(())
    }
}

#[async_trait]
impl VenueAdapter for Binance {
    fn venue(&self) -> VenueId {
        VenueId::Binance
    }

    fn fees(&self) -> VenueFees {
        VenueFees::new(0.001, 0.001) // 0.10% / 0.10%
    }

    async fn discover_pairs(&self) -> Result<Vec<AssetPair>, EngineError> {
        let info: BinanceExchangeInfoResponse = self.get("exchangeInfo").await?;

        Ok(info
            .symbols
            .into_iter()
            .filter(|s| s.status == "TRADING")
            .map(|s| AssetPair {
                base: s.base_asset.to_uppercase(),
                quote: s.quote_asset.to_uppercase(),
                venue_symbol: s.symbol,
                base_precision: s.base_asset_precision,
                quote_precision: s.quote_precision,
            })
            .collect())
    }

    async fn fetch_quote(&self, pair: &AssetPair) -> Result<Quote, EngineError> {
        let endpoint = format!("ticker/bookTicker?symbol={}", pair.venue_symbol);
        let ticker: BinanceBookTickerResponse = self.get(&endpoint).await?;

        Ok(Quote {
            bid_price: parse_f64(&ticker.bid_price, "bid price")?,
            bid_qty: parse_f64(&ticker.bid_qty, "bid quantity")?,
            ask_price: parse_f64(&ticker.ask_price, "ask price")?,
            ask_qty: parse_f64(&ticker.ask_qty, "ask quantity")?,
            last_updated: get_timestamp_millis(),
        })
    }

    fn quote_stream_url(&self, pair: &AssetPair) -> String {
        // Single-stream endpoint; the subscription is encoded in the URL.
        format!(
            "{}/ws/{}@bookTicker",
            BINANCE_WS_BASE,
            pair.venue_symbol.to_lowercase()
        )
    }

    fn decode_quote_message(&self, payload: &str) -> Option<Quote> {
        let ticker: BinanceBookTickerWs = serde_json::from_str(payload).ok()?;

        let (bid, ask, bid_qty, ask_qty) = match (
            parse_f64(&ticker.b, "bid"),
            parse_f64(&ticker.a, "ask"),
            parse_f64(&ticker.B, "bidQty"),
            parse_f64(&ticker.A, "askQty"),
        ) {
            (Ok(b), Ok(a), Ok(bq), Ok(aq)) => (b, a, bq, aq),
            _ => return None,
        };

        Some(Quote {
            bid_price: bid,
            bid_qty,
            ask_price: ask,
            ask_qty,
            last_updated: get_timestamp_millis(),
        })
    }

    async fn submit_market_order(
        &self,
        side: OrderSide,
        pair: &AssetPair,
        quantity: f64,
    ) -> Result<ExecutionStatus, EngineError> {
        let credentials = self.credentials()?;

        let side_str = match side {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        };
        let query = format!(
            "symbol={}&side={}&type=MARKET&quantity={:.prec$}&timestamp={}",
            pair.venue_symbol,
            side_str,
            quantity,
            get_timestamp_millis(),
            prec = pair.base_precision as usize,
        );
        let signature = sign_query(&query, &credentials.api_secret)?;
        let url = format!("{}/order?{}&signature={}", self.api_base(), query, signature);

        let response = self
            .client()
            .post(&url)
            .header("X-MBX-APIKEY", &credentials.api_key)
            .send()
            .await?;
        let body = response.text().await?;

        Ok(order_status_from_response(side, &body))
    }
}

/// HMAC-SHA256 over the query string, hex-encoded, appended as `signature=`.
fn sign_query(query: &str, secret: &str) -> Result<String, EngineError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| EngineError::ApiError("Binance API error: invalid secret key".to_string()))?;
    mac.update(query.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Maps a Binance order response body to an [ExecutionStatus].
///
/// Error bodies carry `{"code": <negative int>, "msg": "..."}`; a body without a
/// `code` field is an accepted order. Codes per [ORDER_ERROR_CATALOG]:
/// -1021 timestamp outside recvWindow, -2010 new order rejected (balance),
/// -1121 invalid symbol, -1013 filter failure.
pub fn order_status_from_response(side: OrderSide, body: &str) -> ExecutionStatus {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return ExecutionStatus::UnknownError,
    };

    let Some(code) = value.get("code").and_then(|c| c.as_i64()) else {
        return side.successful();
    };

    match code {
        -1021 => ExecutionStatus::OutOfSync,
        -2010 => ExecutionStatus::InsufficientFunds,
        -1121 => ExecutionStatus::AssetDoesNotExist,
        -1013 => side.unsuccessful(),
        _ => ExecutionStatus::UnknownError,
    }
}
