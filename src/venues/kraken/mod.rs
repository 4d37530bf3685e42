mod types;

use crate::common::{
    AssetPair, EngineError, ExecutionStatus, OrderSide, Quote, VenueAdapter, VenueFees, VenueId,
    VenueTransport, get_timestamp_millis, normalize_asset_code, parse_f64,
};
use crate::create_venue;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use types::{KrakenAssetPairsResult, KrakenResponse, KrakenTickerResult, KrakenTickerWs};

const KRAKEN_API_BASE: &str = "https://api.kraken.com";
const KRAKEN_WS_BASE: &str = "wss://ws.kraken.com/v2";

/// Order-error catalog revision this adapter maps against
/// (Kraken REST API error string list).
pub const ORDER_ERROR_CATALOG: &str = "kraken-rest-2024-03";

type HmacSha512 = Hmac<Sha512>;

create_venue!(Kraken);

#[async_trait]
impl VenueTransport for Kraken {
    fn api_base(&self) -> &str {
        KRAKEN_API_BASE
    }

    fn client(&self) -> &reqwest::Client {
        &self.client
    }

    fn venue_name(&self) -> &str {
        "Kraken"
    }

    async fn health_check(&self) -> Result<(), EngineError> {
        // Kraken system status endpoint - test connectivity to the REST API
        let endpoint = "0/public/SystemStatus";
        let response: serde_json::Value = self
            .get(endpoint)
            .await
            .map_err(|_| EngineError::HealthCheckFailed)?;

        if response["result"]["status"].as_str() == Some("online") {
            Ok(())
        } else {
            Err(EngineError::HealthCheckFailed)
        }
    }
}

#[async_trait]
impl VenueAdapter for Kraken {
    fn venue(&self) -> VenueId {
        VenueId::Kraken
    }

    fn fees(&self) -> VenueFees {
        VenueFees::new(0.0016, 0.0026) // 0.16% / 0.26% base tier
    }

    async fn discover_pairs(&self) -> Result<Vec<AssetPair>, EngineError> {
        let response: KrakenResponse<KrakenAssetPairsResult> =
            self.get("0/public/AssetPairs").await?;

        if let Some(first_error) = response.error.first() {
            return Err(EngineError::ApiError(format!(
                "Kraken API error: {}",
                first_error
            )));
        }

        let pairs = response.result.unwrap_or_default();

        Ok(pairs
            .into_values()
            .filter(|info| info.status.as_deref().unwrap_or("online") == "online")
            .map(|info| AssetPair {
                // Kraken codes like XXBT/ZUSD normalize so the pair groups with
                // the same listing on other venues.
                base: normalize_asset_code(&info.base),
                quote: normalize_asset_code(&info.quote),
                venue_symbol: info.altname,
                base_precision: info.lot_decimals,
                quote_precision: info.pair_decimals,
            })
            .collect())
    }

    async fn fetch_quote(&self, pair: &AssetPair) -> Result<Quote, EngineError> {
        let endpoint = format!("0/public/Ticker?pair={}", pair.venue_symbol);
        let response: KrakenResponse<KrakenTickerResult> = self.get(&endpoint).await?;

        if let Some(first_error) = response.error.first() {
            return Err(EngineError::ApiError(format!(
                "Kraken API error: {}",
                first_error
            )));
        }

        // Result is keyed by Kraken's canonical pair name; one pair requested,
        // one entry back.
        let ticker = response
            .result
            .as_ref()
            .and_then(|r| r.values().next())
            .ok_or_else(|| {
                EngineError::ApiError(format!(
                    "Kraken API error: no ticker found for symbol: {}",
                    pair.venue_symbol
                ))
            })?;

        let bid_price = ticker.b.first().map(String::as_str).unwrap_or("");
        let bid_qty = ticker.b.get(2).map(String::as_str).unwrap_or("");
        let ask_price = ticker.a.first().map(String::as_str).unwrap_or("");
        let ask_qty = ticker.a.get(2).map(String::as_str).unwrap_or("");

        Ok(Quote {
            bid_price: parse_f64(bid_price, "bid price")?,
            bid_qty: parse_f64(bid_qty, "bid quantity")?,
            ask_price: parse_f64(ask_price, "ask price")?,
            ask_qty: parse_f64(ask_qty, "ask quantity")?,
            last_updated: get_timestamp_millis(),
        })
    }

    fn quote_stream_url(&self, _pair: &AssetPair) -> String {
        KRAKEN_WS_BASE.to_string()
    }

    fn stream_subscribe_payload(&self, pair: &AssetPair) -> Option<String> {
        // WS v2 symbols are normalized BASE/QUOTE, not the REST altname.
        Some(
            serde_json::json!({
                "method": "subscribe",
                "params": {
                    "channel": "ticker",
                    "symbol": [format!("{}/{}", pair.base, pair.quote)],
                },
            })
            .to_string(),
        )
    }

    fn decode_quote_message(&self, payload: &str) -> Option<Quote> {
        let frame: KrakenTickerWs = serde_json::from_str(payload).ok()?;
        if frame.channel != "ticker" {
            return None;
        }
        let data = frame.data.first()?;

        Some(Quote {
            bid_price: data.bid,
            bid_qty: data.bid_qty,
            ask_price: data.ask,
            ask_qty: data.ask_qty,
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
            OrderSide::Buy => "buy",
            OrderSide::Sell => "sell",
        };
        let nonce = get_timestamp_millis();
        let post_data = format!(
            "nonce={}&ordertype=market&type={}&volume={:.prec$}&pair={}",
            nonce,
            side_str,
            quantity,
            pair.venue_symbol,
            prec = pair.base_precision as usize,
        );

        let path = "/0/private/AddOrder";
        let signature = sign_request(&credentials.api_secret, path, nonce, &post_data)?;

        let url = format!("{}{}", self.api_base(), path);
        let response = self
            .client()
            .post(&url)
            .header("API-Key", &credentials.api_key)
            .header("API-Sign", signature)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(post_data)
            .send()
            .await?;
        let body = response.text().await?;

        Ok(order_status_from_response(side, &body))
    }
}

/// API-Sign: base64 HMAC-SHA512 of `path + SHA256(nonce + postdata)`, keyed with
/// the base64-decoded API secret.
fn sign_request(
    secret: &str,
    path: &str,
    nonce: u64,
    post_data: &str,
) -> Result<String, EngineError> {
    let secret_bytes = BASE64
        .decode(secret)
        .map_err(|_| EngineError::ApiError("Kraken API error: invalid secret key".to_string()))?;

    let mut inner = Sha256::new();
    inner.update(format!("{}{}", nonce, post_data).as_bytes());
    let digest = inner.finalize();

    let mut mac = HmacSha512::new_from_slice(&secret_bytes)
        .map_err(|_| EngineError::ApiError("Kraken API error: invalid secret key".to_string()))?;
    mac.update(path.as_bytes());
    mac.update(&digest);

    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Maps a Kraken order response body to an [ExecutionStatus].
///
/// Kraken reports failures in the `error` array; an empty array is an accepted
/// order. Strings per [ORDER_ERROR_CATALOG]: `EAPI:Invalid nonce` means the
/// signed nonce was rejected (clock/nonce drift), `EOrder:*` are trading
/// rejections.
pub fn order_status_from_response(side: OrderSide, body: &str) -> ExecutionStatus {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return ExecutionStatus::UnknownError,
    };

    let Some(errors) = value.get("error").and_then(|e| e.as_array()) else {
        return ExecutionStatus::UnknownError;
    };

    let Some(first) = errors.first().and_then(|e| e.as_str()) else {
        return side.successful();
    };

    match first {
        "EAPI:Invalid nonce" => ExecutionStatus::OutOfSync,
        "EOrder:Insufficient funds" => ExecutionStatus::InsufficientFunds,
        "EQuery:Unknown asset pair" => ExecutionStatus::AssetDoesNotExist,
        other if other.starts_with("EOrder:") => side.unsuccessful(),
        _ => ExecutionStatus::UnknownError,
    }
}
