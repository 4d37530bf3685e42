pub mod binance;
pub mod coinbase;
pub mod kraken;

pub use binance::Binance;
pub use coinbase::Coinbase;
pub use kraken::Kraken;
