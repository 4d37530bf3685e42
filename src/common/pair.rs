use serde::{Deserialize, Serialize};

/// Immutable identity of a tradable pair on one venue.
///
/// Created once per (venue, symbol) by the adapter's discovery call; `venue_symbol`
/// is the symbol in the venue's own format (e.g. `BTCUSDT`, `BTC-USD`, `XXBTZUSD`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetPair {
    pub base: String,
    pub quote: String,
    pub venue_symbol: String,
    pub base_precision: u32,
    pub quote_precision: u32,
}

impl AssetPair {
    pub fn identity(&self) -> PairIdentity {
        PairIdentity {
            base: self.base.clone(),
            quote: self.quote.clone(),
        }
    }
}

/// Venue-independent pair identity, used to group the same logical pair across venues.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PairIdentity {
    pub base: String,
    pub quote: String,
}

impl std::fmt::Display for PairIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Latest top-of-book quote for one venue. Overwritten in place on every tick.
///
/// A default (all-zero) quote means the venue has not ticked yet and is excluded
/// from best-bid / best-ask selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Quote {
    pub bid_price: f64,
    pub bid_qty: f64,
    pub ask_price: f64,
    pub ask_qty: f64,
    /// Milliseconds since the Unix epoch, set when the tick was decoded.
    pub last_updated: u64,
}

impl Quote {
    /// Both sides of the book are present.
    pub fn has_liquidity(&self) -> bool {
        self.bid_price > 0.0 && self.ask_price > 0.0
    }
}
