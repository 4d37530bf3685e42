pub mod client;
pub mod config;
pub mod errors;
pub mod fees;
pub mod pair;
pub mod status;
pub mod utils;
pub mod venue;

// Re-export
pub use client::create_http_client;
pub use config::{EngineConfig, VenueCredentials, load_dotenv};
pub use errors::EngineError;
pub use fees::{AmountSide, VenueFees, effective_price};
pub use pair::{AssetPair, PairIdentity, Quote};
pub use status::{ExecutionStatus, OrderSide};
pub use utils::{decimal_places, get_timestamp_millis, normalize_asset_code, parse_f64};
pub use venue::{VenueAdapter, VenueId, VenueTransport};
