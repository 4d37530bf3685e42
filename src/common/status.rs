use serde::{Deserialize, Serialize};

/// Market order side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Status for an order of this side that the venue accepted.
    pub fn successful(&self) -> ExecutionStatus {
        match self {
            OrderSide::Buy => ExecutionStatus::BuySuccessful,
            OrderSide::Sell => ExecutionStatus::SellSuccessful,
        }
    }

    /// Status for an order of this side that the venue rejected on trading grounds.
    pub fn unsuccessful(&self) -> ExecutionStatus {
        match self {
            OrderSide::Buy => ExecutionStatus::BuyUnsuccessful,
            OrderSide::Sell => ExecutionStatus::SellUnsuccessful,
        }
    }
}

/// Closed set of order-submission outcomes, produced by the venue adapters and
/// consumed by the decision loop. Never retried automatically.
///
/// `OutOfSync` is kept apart from trading failures: the venue rejected the signed
/// request's timestamp/nonce, and the remedy is a clock resync, not a trading change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExecutionStatus {
    None,
    OutOfSync,
    InsufficientFunds,
    BuySuccessful,
    BuyUnsuccessful,
    SellSuccessful,
    SellUnsuccessful,
    UnknownError,
    AssetDoesNotExist,
}

impl ExecutionStatus {
    pub fn is_successful(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::BuySuccessful | ExecutionStatus::SellSuccessful
        )
    }
}
