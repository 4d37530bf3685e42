use crate::common::{AssetPair, EngineError, ExecutionStatus, OrderSide, Quote, VenueFees};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// Common venue enum definition

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VenueId {
    Binance,
    Coinbase,
    Kraken,
}

impl VenueId {
    pub fn name(&self) -> &'static str {
        match self {
            VenueId::Binance => "Binance",
            VenueId::Coinbase => "Coinbase",
            VenueId::Kraken => "Kraken",
        }
    }
}

impl std::fmt::Display for VenueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// Common venue transport trait definition
#[async_trait]
pub trait VenueTransport: Send + Sync {
    // Venue specific methods
    fn api_base(&self) -> &str;
    fn client(&self) -> &reqwest::Client;
    fn venue_name(&self) -> &str;

    // Default implementations
    async fn get<T: for<'de> serde::Deserialize<'de>>(
        &self,
        endpoint: &str,
    ) -> Result<T, EngineError>
    where
        Self: Sized,
    {
        let url = format!("{}/{}", self.api_base(), endpoint);
        let response = self.client().get(&url).send().await?;

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

    // Trait methods
    async fn health_check(&self) -> Result<(), EngineError>;
}

/// One venue's full contract: pair discovery, top-of-book streaming and signed
/// market-order submission. Everything the quote streams, the shared pair group
/// and the decision loop need from a venue goes through this seam.
#[async_trait]
pub trait VenueAdapter: VenueTransport {
    fn venue(&self) -> VenueId;

    /// Static per-session fee rates, default spot tier.
    fn fees(&self) -> VenueFees;

    /// One-shot listing of tradable pairs, used at group-formation time.
    async fn discover_pairs(&self) -> Result<Vec<AssetPair>, EngineError>;

    /// One-shot REST top-of-book fetch; handy for seeding or spot-checking a slot.
    async fn fetch_quote(&self, pair: &AssetPair) -> Result<Quote, EngineError>;

    /// WebSocket URL for the pair's top-of-book feed.
    fn quote_stream_url(&self, pair: &AssetPair) -> String;

    /// Subscribe frame to send after connecting, for venues that expect one.
    fn stream_subscribe_payload(&self, pair: &AssetPair) -> Option<String> {
        let _ = pair;
        None
    }

    /// Pure decode of one inbound frame. None for heartbeats, acks and frames the
    /// venue's ticker schema does not match; the stream drops those silently.
    fn decode_quote_message(&self, payload: &str) -> Option<Quote>;

    /// Submits an immediate market order, signed with the adapter's credentials.
    /// The venue response is mapped through the venue's order-error catalog.
    async fn submit_market_order(
        &self,
        side: OrderSide,
        pair: &AssetPair,
        quantity: f64,
    ) -> Result<ExecutionStatus, EngineError>;
}

// VENUE MACRO EXPORTS
#[macro_export]
macro_rules! create_venue {
    (
        $struct_name:ident
    ) => {
        pub struct $struct_name {
            client: reqwest::Client,
            credentials: Option<$crate::common::VenueCredentials>,
        }

        impl $struct_name {
            pub fn new() -> Self {
                Self {
                    client: $crate::common::create_http_client(),
                    credentials: None,
                }
            }

            pub fn with_credentials(credentials: $crate::common::VenueCredentials) -> Self {
                Self {
                    client: $crate::common::create_http_client(),
                    credentials: Some(credentials),
                }
            }

            fn credentials(
                &self,
            ) -> Result<&$crate::common::VenueCredentials, $crate::common::EngineError> {
                self.credentials
                    .as_ref()
                    .ok_or($crate::common::EngineError::MissingCredentials(stringify!(
                        $struct_name
                    )))
            }
        }

        impl Default for $struct_name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}
