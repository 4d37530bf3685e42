mod types;

use crate::common::{
    AssetPair, EngineError, ExecutionStatus, OrderSide, Quote, VenueAdapter, VenueFees, VenueId,
    VenueTransport, decimal_places, get_timestamp_millis, parse_f64,
};
use crate::create_venue;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use types::{CoinbaseOrderBookResponse, CoinbaseProduct, CoinbaseTickerWs};

const COINBASE_API_BASE: &str = "https://api.exchange.coinbase.com";
const COINBASE_WS_BASE: &str = "wss://ws-feed.exchange.coinbase.com";

/// Order-error catalog revision this adapter maps against
/// (Coinbase Exchange API error message list).
pub const ORDER_ERROR_CATALOG: &str = "coinbase-exchange-2024-03";

type HmacSha256 = Hmac<Sha256>;

create_venue!(Coinbase);

#[async_trait]
impl VenueTransport for Coinbase {
    fn api_base(&self) -> &str {
        COINBASE_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn venue_name(&self) -> &str {
        "Coinbase"
    }

    // Override get method to add User-Agent header (Coinbase rejects bare clients)
    async fn get<T: for<'de> serde::Deserialize<'de>>(
        &self,
        endpoint: &str,
    ) -> Result<T, EngineError>
    where
        Self: Sized,
    {
        let url = format!("{}/{}", self.api_base(), endpoint);
        let response = self
            .client()
            .get(&url)
            .header("User-Agent", "cross-venue-arb-rs")
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EngineError::ApiError(format!(
                "{} API error: {} - {}",
                self.venue_name(),
                status,
                error_text
            )));
        }

        Ok(response.json().await?)
    }

    async fn health_check(&self) -> Result<(), EngineError> {
        // Coinbase time endpoint - test connectivity to the REST API
        let endpoint = "time";
        let response: serde_json::Value = self.get(endpoint).await?;

        // Coinbase returns {"iso": "...", "epoch": ...}
        if response["iso"].is_string() {
            Ok(())
        } else {
            Err(EngineError::HealthCheckFailed)
        }
    }
}

#[async_trait]
impl VenueAdapter for Coinbase {
    fn venue(&self) -> VenueId {
        VenueId::Coinbase
    }

    fn fees(&self) -> VenueFees {
        VenueFees::new(0.004, 0.006) // 0.40% / 0.60% base tier
    }

    async fn discover_pairs(&self) -> Result<Vec<AssetPair>, EngineError> {
        let products: Vec<CoinbaseProduct> = self.get("products").await?;

        Ok(products
            .into_iter()
            .filter(|p| p.status == "online")
            .map(|p| AssetPair {
                base: p.base_currency.to_uppercase(),
                quote: p.quote_currency.to_uppercase(),
                base_precision: decimal_places(&p.base_increment),
                quote_precision: decimal_places(&p.quote_increment),
                venue_symbol: p.id,
            })
            .collect())
    }

    async fn fetch_quote(&self, pair: &AssetPair) -> Result<Quote, EngineError> {
        // Level-1 book carries best bid/ask only
        let endpoint = format!("products/{}/book?level=1", pair.venue_symbol);
        let book: CoinbaseOrderBookResponse = self.get(&endpoint).await?;

        let bid_entry = book.bids.first().ok_or_else(|| {
            EngineError::ApiError(format!(
                "Coinbase API error: no bid found for symbol: {}",
                pair.venue_symbol
            ))
        })?;
        let ask_entry = book.asks.first().ok_or_else(|| {
            EngineError::ApiError(format!(
                "Coinbase API error: no ask found for symbol: {}",
                pair.venue_symbol
            ))
        })?;

        Ok(Quote {
            bid_price: book_entry_f64(bid_entry, 0, "bid price")?,
            bid_qty: book_entry_f64(bid_entry, 1, "bid quantity")?,
            ask_price: book_entry_f64(ask_entry, 0, "ask price")?,
            ask_qty: book_entry_f64(ask_entry, 1, "ask quantity")?,
            last_updated: get_timestamp_millis(),
        })
    }

    fn quote_stream_url(&self, _pair: &AssetPair) -> String {
        COINBASE_WS_BASE.to_string()
    }

    fn stream_subscribe_payload(&self, pair: &AssetPair) -> Option<String> {
        Some(
            serde_json::json!({
                "type": "subscribe",
                "product_ids": [pair.venue_symbol],
                "channels": ["ticker"],
            })
            .to_string(),
        )
    }

    fn decode_quote_message(&self, payload: &str) -> Option<Quote> {
        let ticker: CoinbaseTickerWs = serde_json::from_str(payload).ok()?;
        if ticker.kind != "ticker" {
            return None;
        }

        let (bid, ask, bid_qty, ask_qty) = match (
            parse_f64(&ticker.best_bid, "bid"),
            parse_f64(&ticker.best_ask, "ask"),
            parse_f64(&ticker.best_bid_size, "bidQty"),
            parse_f64(&ticker.best_ask_size, "askQty"),
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
        let passphrase = credentials
            .passphrase
            .as_deref()
            .ok_or(EngineError::MissingCredentials("Coinbase passphrase"))?;

        let side_str = match side {
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        };
        let body = serde_json::json!({
            "type": "market",
            "side": side_str,
            "product_id": pair.venue_symbol,
            "size": format!("{:.prec$}", quantity, prec = pair.base_precision as usize),
        })
        .to_string();

        let path = "/orders";
        let timestamp = chrono::Utc::now().timestamp();
        let signature = sign_request(&credentials.api_secret, "POST", path, &body, timestamp)?;

        let url = format!("{}{}", self.api_base(), path);
        let response = self
            .client()
            .post(&url)
            .header("User-Agent", "cross-venue-arb-rs")
            .header("Content-Type", "application/json")
            .header("CB-ACCESS-KEY", &credentials.api_key)
            .header("CB-ACCESS-SIGN", signature)
            .header("CB-ACCESS-TIMESTAMP", timestamp.to_string())
            .header("CB-ACCESS-PASSPHRASE", passphrase)
            .body(body)
            .send()
            .await?;
        let response_body = response.text().await?;

        Ok(order_status_from_response(side, &response_body))
    }
}

fn book_entry_f64(
    entry: &serde_json::Value,
    index: usize,
    field_name: &str,
) -> Result<f64, EngineError> {
    let raw = entry[index].as_str().ok_or_else(|| {
        EngineError::ApiError(format!("Coinbase API error: invalid {} format", field_name))
    })?;
    parse_f64(raw, field_name)
}

/// CB-ACCESS-SIGN: base64 HMAC-SHA256 of `timestamp + method + path + body`,
/// keyed with the base64-decoded API secret.
fn sign_request(
    secret: &str,
    method: &str,
    path: &str,
    body: &str,
    timestamp: i64,
) -> Result<String, EngineError> {
    let secret_bytes = BASE64
        .decode(secret)
        .map_err(|_| EngineError::ApiError("Coinbase API error: invalid secret key".to_string()))?;

    let message = format!("{}{}{}{}", timestamp, method, path, body);
    let mut mac = HmacSha256::new_from_slice(&secret_bytes)
        .map_err(|_| EngineError::ApiError("Coinbase API error: invalid secret key".to_string()))?;
    mac.update(message.as_bytes());

    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Maps a Coinbase order response body to an [ExecutionStatus].
///
/// Rejections carry `{"message": "..."}`; an accepted order has no `message`
/// field. Messages per [ORDER_ERROR_CATALOG].
pub fn order_status_from_response(side: OrderSide, body: &str) -> ExecutionStatus {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return ExecutionStatus::UnknownError,
    };

    let Some(message) = value.get("message").and_then(|m| m.as_str()) else {
        return side.successful();
    };

    if message.contains("Insufficient funds") {
        ExecutionStatus::InsufficientFunds
    } else if message.contains("request timestamp expired") {
        ExecutionStatus::OutOfSync
    } else if message.contains("Product not found") || message.contains("NotFound") {
        ExecutionStatus::AssetDoesNotExist
    } else {
        ExecutionStatus::UnknownError
    }
}
