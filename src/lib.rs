//! `cross-venue-arb-rs`
//!
//! Stream top-of-book quotes for the same pair across CEX venues, detect
//! fee-adjusted price divergence, and fire paired buy/sell market orders.
//!
//! ## Quickstart (discover groups and stream)
//!
//! ```no_run
//! use std::sync::Arc;
//! use cross_venue_arb_rs::{
//!     Binance, Coinbase, Kraken, ReconnectPolicy, StreamSupervisor, VenueAdapter,
//!     discover_shared_groups,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let adapters: Vec<Arc<dyn VenueAdapter>> = vec![
//!     Arc::new(Binance::new()),
//!     Arc::new(Coinbase::new()),
//!     Arc::new(Kraken::new()),
//! ];
//!
//! let groups = discover_shared_groups(&adapters).await;
//! let group = Arc::new(groups.into_iter().next().expect("no shared pairs"));
//!
//! for adapter in &adapters {
//!     if let Some(pair) = group.pair_for(adapter.venue()) {
//!         StreamSupervisor::start(
//!             adapter.clone(),
//!             pair.clone(),
//!             group.clone(),
//!             ReconnectPolicy::default(),
//!         );
//!     }
//! }
//! # }
//! ```
//!
//! ## Quickstart (decision loop)
//!
//! ```no_run
//! use std::sync::Arc;
//! use cross_venue_arb_rs::{DecisionLoop, EngineConfig};
//! # use cross_venue_arb_rs::{Binance, VenueAdapter, discover_shared_groups};
//!
//! # #[tokio::main]
//! # async fn main() {
//! # let adapters: Vec<Arc<dyn VenueAdapter>> = vec![Arc::new(Binance::new())];
//! # let group = Arc::new(discover_shared_groups(&adapters).await.into_iter().next().unwrap());
//! let decision_loop = Arc::new(DecisionLoop::new(
//!     group,
//!     adapters,
//!     EngineConfig::from_env(),
//! ));
//!
//! let runner = decision_loop.clone();
//! tokio::spawn(async move { runner.run().await });
//! // ... later
//! decision_loop.stop();
//! # }
//! ```

pub mod common;
pub mod engine;
pub mod group;
pub mod stream;
pub mod venues;

// Re-export common types
pub use venues::{Binance, Coinbase, Kraken};

pub use common::{
    AmountSide, AssetPair, EngineConfig, EngineError, ExecutionStatus, OrderSide, PairIdentity,
    Quote, VenueAdapter, VenueCredentials, VenueFees, VenueId, VenueTransport, effective_price,
    load_dotenv,
};
pub use engine::{ArbitrageOpportunity, CycleOutcome, DecisionLoop, ExecutionReport,
    find_opportunity};
pub use group::{SharedPairGroup, SnapshotEntry, discover_shared_groups};
pub use stream::{
    MAX_FRAME_BYTES, QuoteStreamHandle, ReconnectPolicy, StreamStopper, StreamSupervisor,
    SupervisorHandle,
};
