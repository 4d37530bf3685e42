//! Shared top-of-book state for one logical pair across venues.
//!
//! Each venue gets its own lock-guarded slot, so streams writing different venues
//! never block each other. A snapshot is per-slot atomic only: slot values may be
//! from slightly different instants, which is fine for eventually-consistent quotes.

use crate::common::{AssetPair, PairIdentity, Quote, VenueAdapter, VenueFees, VenueId};
use futures::future::join_all;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

struct VenueSlot {
    venue: VenueId,
    pair: AssetPair,
    fees: VenueFees,
    quote: RwLock<Quote>,
}

/// One entry of [SharedPairGroup::snapshot].
#[derive(Debug, Clone, Copy)]
pub struct SnapshotEntry {
    pub venue: VenueId,
    pub quote: Quote,
    pub fees: VenueFees,
}

/// Latest quote per venue for one logical pair.
///
/// Membership is fixed at construction; slot order is venue registration order and
/// doubles as the deterministic tie-break for best-bid/best-ask selection.
pub struct SharedPairGroup {
    identity: PairIdentity,
    slots: Vec<VenueSlot>,
}

impl SharedPairGroup {
    /// Builds a group from (venue, pair, fees) members. A venue appearing more
    /// than once keeps its first registration only.
    pub fn new(identity: PairIdentity, members: Vec<(VenueId, AssetPair, VenueFees)>) -> Self {
        let mut slots: Vec<VenueSlot> = Vec::with_capacity(members.len());
        for (venue, pair, fees) in members {
            if slots.iter().any(|s| s.venue == venue) {
                continue;
            }
            slots.push(VenueSlot {
                venue,
                pair,
                fees,
                quote: RwLock::new(Quote::default()),
            });
        }
        Self { identity, slots }
    }

    pub fn identity(&self) -> &PairIdentity {
        &self.identity
    }

    pub fn venues(&self) -> Vec<VenueId> {
        self.slots.iter().map(|s| s.venue).collect()
    }

    pub fn venue_count(&self) -> usize {
        self.slots.len()
    }

    /// The venue's own pair descriptor, needed for order submission and streaming.
    pub fn pair_for(&self, venue: VenueId) -> Option<&AssetPair> {
        self.slots.iter().find(|s| s.venue == venue).map(|s| &s.pair)
    }

    pub fn fees_for(&self, venue: VenueId) -> Option<VenueFees> {
        self.slots.iter().find(|s| s.venue == venue).map(|s| s.fees)
    }

    /// Overwrites the venue's slot with the latest tick. Returns false (and writes
    /// nothing) for a venue that is not a member of this group.
    pub fn update(&self, venue: VenueId, quote: Quote) -> bool {
        match self.slots.iter().find(|s| s.venue == venue) {
            Some(slot) => {
                *slot.quote.write() = quote;
                true
            }
            None => false,
        }
    }

    /// Venue with the highest bid among slots that have ticked. Ties keep the
    /// first-registered venue (strict comparison while scanning in slot order).
    pub fn best_bid(&self) -> Option<(VenueId, Quote)> {
        let mut best: Option<(VenueId, Quote)> = None;
        for slot in &self.slots {
            let quote = *slot.quote.read();
            if !quote.has_liquidity() {
                continue;
            }
            if best.is_none_or(|(_, b)| quote.bid_price > b.bid_price) {
                best = Some((slot.venue, quote));
            }
        }
        best
    }

    /// Venue with the lowest ask among slots that have ticked. Ties keep the
    /// first-registered venue.
    pub fn best_ask(&self) -> Option<(VenueId, Quote)> {
        let mut best: Option<(VenueId, Quote)> = None;
        for slot in &self.slots {
            let quote = *slot.quote.read();
            if !quote.has_liquidity() {
                continue;
            }
            if best.is_none_or(|(_, b)| quote.ask_price < b.ask_price) {
                best = Some((slot.venue, quote));
            }
        }
        best
    }

    /// Copies every slot in registration order. Each slot read is atomic;
    /// cross-slot consistency is not guaranteed.
    pub fn snapshot(&self) -> Vec<SnapshotEntry> {
        self.slots
            .iter()
            .map(|slot| SnapshotEntry {
                venue: slot.venue,
                quote: *slot.quote.read(),
                fees: slot.fees,
            })
            .collect()
    }
}

/// Discovers which venues list the same logical pair and builds one group per
/// identity listed on at least two venues. Discovery runs per venue in parallel;
/// a venue that fails discovery is skipped with a warning, like a venue that does
/// not list the pair.
pub async fn discover_shared_groups(adapters: &[Arc<dyn VenueAdapter>]) -> Vec<SharedPairGroup> {
    let futures: Vec<_> = adapters.iter().map(|a| a.discover_pairs()).collect();
    let results = join_all(futures).await;

    let mut buckets: HashMap<PairIdentity, Vec<(VenueId, AssetPair, VenueFees)>> = HashMap::new();
    for (adapter, result) in adapters.iter().zip(results) {
        match result {
            Ok(pairs) => {
                for pair in pairs {
                    buckets
                        .entry(pair.identity())
                        .or_default()
                        .push((adapter.venue(), pair, adapter.fees()));
                }
            }
            Err(e) => {
                warn!(venue = %adapter.venue(), error = %e, "pair discovery failed, skipping venue");
            }
        }
    }

    let mut groups: Vec<SharedPairGroup> = buckets
        .into_iter()
        .map(|(identity, members)| SharedPairGroup::new(identity, members))
        .filter(|group| group.venue_count() >= 2)
        .collect();

    // HashMap iteration order is arbitrary; give callers a stable listing.
    groups.sort_by(|a, b| {
        (&a.identity.base, &a.identity.quote).cmp(&(&b.identity.base, &b.identity.quote))
    });

    groups
}
