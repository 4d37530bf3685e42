//! Venue fee rates and effective price helpers.
//!
//! Spread math uses these effective prices so commission is already deducted.

use serde::{Deserialize, Serialize};

/// Maker/taker fee rates as decimal fractions (0.001 = 0.1%).
/// Spot trading, default tier. VIP / volume discounts not applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VenueFees {
    pub maker: f64,
    pub taker: f64,
}

impl VenueFees {
    pub fn new(maker: f64, taker: f64) -> Self {
        Self { maker, taker }
    }
}

/// Side for commission: Buy = pay more (amount × (1 + fee)), Sell = receive less (amount × (1 − fee)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountSide {
    Buy,
    Sell,
}

/// Effective amount after taker commission. Ask → `AmountSide::Buy`, bid → `AmountSide::Sell`.
/// Market orders always take liquidity, so the taker rate applies.
pub fn effective_price(amount: f64, fees: &VenueFees, side: AmountSide) -> f64 {
    match side {
        AmountSide::Buy => amount * (1.0 + fees.taker),
        AmountSide::Sell => amount * (1.0 - fees.taker),
    }
}
