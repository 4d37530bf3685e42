use crate::common::{AmountSide, VenueId, effective_price};
use crate::group::SnapshotEntry;
use serde::{Deserialize, Serialize};

/// A fee-adjusted cross-venue opportunity, computed fresh each decision cycle
/// from the current snapshot and never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    /// Venue with the lowest ask.
    pub buy_venue: VenueId,
    /// Venue with the highest bid.
    pub sell_venue: VenueId,
    /// Raw ask on the buy venue.
    pub buy_ask: f64,
    /// Raw bid on the sell venue.
    pub sell_bid: f64,
    /// buy_ask × (1 + buy venue taker fee)
    pub effective_buy_cost: f64,
    /// sell_bid × (1 − sell venue taker fee)
    pub effective_sell_proceeds: f64,
    /// effective_sell_proceeds − effective_buy_cost
    pub net_spread: f64,
    /// net_spread / effective_buy_cost
    pub profit_ratio: f64,
    /// min(buy-side ask qty, sell-side bid qty)
    pub executable_quantity: f64,
}

/// Evaluates one snapshot. Venues without a tick yet are excluded; requires two
/// live venues and a distinct buy/sell pair. Ties on price keep the
/// first-registered venue (strict comparisons over the snapshot in slot order).
///
/// Accepts iff the net spread is positive and the profit ratio reaches
/// `min_profit_ratio` (equality accepts).
pub fn find_opportunity(
    snapshot: &[SnapshotEntry],
    min_profit_ratio: f64,
) -> Option<ArbitrageOpportunity> {
    let live: Vec<&SnapshotEntry> = snapshot
        .iter()
        .filter(|entry| entry.quote.has_liquidity())
        .collect();
    if live.len() < 2 {
        return None;
    }

    let mut buy = live[0];
    let mut sell = live[0];
    for entry in &live[1..] {
        if entry.quote.ask_price < buy.quote.ask_price {
            buy = entry;
        }
        if entry.quote.bid_price > sell.quote.bid_price {
            sell = entry;
        }
    }
    if buy.venue == sell.venue {
        return None;
    }

    let effective_buy_cost = effective_price(buy.quote.ask_price, &buy.fees, AmountSide::Buy);
    let effective_sell_proceeds =
        effective_price(sell.quote.bid_price, &sell.fees, AmountSide::Sell);
    let net_spread = effective_sell_proceeds - effective_buy_cost;

    if net_spread <= 0.0 {
        return None;
    }
    let profit_ratio = net_spread / effective_buy_cost;
    if profit_ratio < min_profit_ratio {
        return None;
    }

    Some(ArbitrageOpportunity {
        buy_venue: buy.venue,
        sell_venue: sell.venue,
        buy_ask: buy.quote.ask_price,
        sell_bid: sell.quote.bid_price,
        effective_buy_cost,
        effective_sell_proceeds,
        net_spread,
        profit_ratio,
        executable_quantity: buy.quote.ask_qty.min(sell.quote.bid_qty),
    })
}
