//! In-memory marker store keyed by seller id.

use std::collections::HashMap;

use pimap_core::Seller;

/// Counts from one merge pass, for logging and status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeOutcome {
    /// Sellers that did not exist in the store before this pass.
    pub added: usize,
    /// Sellers whose record was overwritten by a fresher copy.
    pub updated: usize,
}

/// Sellers currently known to the map, deduplicated by `seller_id` with
/// last-write-wins semantics. Iteration order is unspecified — markers are
/// unordered on a map.
#[derive(Debug, Default)]
pub struct MarkerStore {
    sellers: HashMap<String, Seller>,
}

impl MarkerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a fetch result into the store. Existing markers are never
    /// removed by a merge — incremental viewport fetches only add and
    /// refresh, so markers don't flicker during pans.
    pub fn merge(&mut self, incoming: Vec<Seller>) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();
        for seller in incoming {
            if self
                .sellers
                .insert(seller.seller_id.clone(), seller)
                .is_some()
            {
                outcome.updated += 1;
            } else {
                outcome.added += 1;
            }
        }
        outcome
    }

    /// Replace the whole store with a search result set.
    pub fn replace(&mut self, sellers: Vec<Seller>) {
        self.sellers.clear();
        self.merge(sellers);
    }

    #[must_use]
    pub fn get(&self, seller_id: &str) -> Option<&Seller> {
        self.sellers.get(seller_id)
    }

    pub fn sellers(&self) -> impl Iterator<Item = &Seller> {
        self.sellers.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sellers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sellers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pimap_core::{FulfillmentMethod, SellerType};
    use pimap_geo::Coordinate;

    fn seller(id: &str, name: &str, rating: f64) -> Seller {
        Seller {
            seller_id: id.to_owned(),
            name: name.to_owned(),
            image: None,
            seller_type: SellerType::Active,
            coordinates: Coordinate::sanitized(6.5, 3.4),
            trust_meter_rating: rating,
            average_rating: None,
            fulfillment_method: FulfillmentMethod::CollectionByBuyer,
            fulfillment_description: None,
            description: None,
        }
    }

    #[test]
    fn dedup_is_last_write_wins() {
        let mut store = MarkerStore::new();
        let outcome = store.merge(vec![seller("S1", "First", 0.4), seller("S1", "Second", 0.9)]);
        assert_eq!(store.len(), 1);
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.updated, 1);
        let kept = store.get("S1").unwrap();
        assert_eq!(kept.name, "Second");
        assert!((kept.trust_meter_rating - 0.9).abs() < 1e-9);
    }

    #[test]
    fn merge_keeps_existing_markers() {
        let mut store = MarkerStore::new();
        store.merge(vec![seller("S1", "Stall", 0.8)]);
        let outcome = store.merge(vec![seller("S2", "Bakery", 0.6)]);
        assert_eq!(store.len(), 2);
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.updated, 0);
        assert!(store.get("S1").is_some());
    }

    #[test]
    fn merge_updates_refetched_seller_in_place() {
        let mut store = MarkerStore::new();
        store.merge(vec![seller("S1", "Stall", 0.5)]);
        store.merge(vec![seller("S1", "Stall", 0.7), seller("S2", "Bakery", 0.6)]);
        assert_eq!(store.len(), 2);
        assert!((store.get("S1").unwrap().trust_meter_rating - 0.7).abs() < 1e-9);
    }

    #[test]
    fn replace_discards_previous_set() {
        let mut store = MarkerStore::new();
        store.merge(vec![seller("S1", "Stall", 0.8), seller("S2", "Bakery", 0.6)]);
        store.replace(vec![seller("S3", "Search Hit", 1.0)]);
        assert_eq!(store.len(), 1);
        assert!(store.get("S1").is_none());
        assert!(store.get("S3").is_some());
    }
}
