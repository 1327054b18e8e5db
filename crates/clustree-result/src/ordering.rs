//! Orderings of item ids backed by a precomputed key per item.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use clustree_common::ItemId;
use rustc_hash::FxHashMap;

/// Caller supplied key comparison.
pub type KeyComparator<K> = Arc<dyn Fn(&K, &K) -> Ordering + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    /// `+1` ascending, `-1` descending.
    pub fn factor(self) -> i8 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }

    /// Scale a comparison result by the direction factor.
    #[inline]
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Produces a total order over any requested subset of item ids.
pub trait OrderingResult {
    fn order(&self, ids: &[ItemId]) -> Vec<ItemId>;
}

enum KeyOrder<K> {
    Natural(fn(&K, &K) -> Ordering),
    Custom(KeyComparator<K>),
}

impl<K> Clone for KeyOrder<K> {
    fn clone(&self) -> Self {
        match self {
            KeyOrder::Natural(cmp) => KeyOrder::Natural(*cmp),
            KeyOrder::Custom(cmp) => KeyOrder::Custom(Arc::clone(cmp)),
        }
    }
}

/// Ordering over a snapshot of `item → key`.
///
/// Sorting is a single stable pass: equal keys keep the relative order in
/// which the ids were requested, in either direction. Every requested id
/// must have a key; a missing key is a caller bug and panics.
#[derive(Clone)]
pub struct OrderingFromMap<K> {
    keys: FxHashMap<ItemId, K>,
    order: KeyOrder<K>,
    direction: SortDirection,
}

impl<K: Ord> OrderingFromMap<K> {
    /// Natural key order, ascending.
    pub fn new(keys: FxHashMap<ItemId, K>) -> Self {
        Self::with_direction(keys, SortDirection::Ascending)
    }

    pub fn with_direction(keys: FxHashMap<ItemId, K>, direction: SortDirection) -> Self {
        Self {
            keys,
            order: KeyOrder::Natural(K::cmp),
            direction,
        }
    }
}

impl OrderingFromMap<f64> {
    /// Scores compared with [`f64::total_cmp`].
    pub fn by_score(scores: FxHashMap<ItemId, f64>, direction: SortDirection) -> Self {
        Self::with_comparator(scores, f64::total_cmp, direction)
    }
}

impl<K> OrderingFromMap<K> {
    pub fn with_comparator<F>(
        keys: FxHashMap<ItemId, K>,
        comparator: F,
        direction: SortDirection,
    ) -> Self
    where
        F: Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    {
        Self {
            keys,
            order: KeyOrder::Custom(Arc::new(comparator)),
            direction,
        }
    }

    pub fn key(&self, id: ItemId) -> Option<&K> {
        self.keys.get(&id)
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn has_custom_comparator(&self) -> bool {
        matches!(self.order, KeyOrder::Custom(_))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sort `ids` by their keys.
    ///
    /// # Panics
    ///
    /// If any id has no key, even when the request has a single id.
    pub fn order_of<I>(&self, ids: I) -> Vec<ItemId>
    where
        I: IntoIterator<Item = ItemId>,
    {
        let mut keyed: Vec<(ItemId, &K)> =
            ids.into_iter().map(|id| (id, self.key_of(id))).collect();

        #[cfg(feature = "tracing")]
        tracing::trace!(items = keyed.len(), direction = ?self.direction, "ordering request");

        keyed.sort_by(|(_, a), (_, b)| self.compare(a, b));
        keyed.into_iter().map(|(id, _)| id).collect()
    }

    fn compare(&self, a: &K, b: &K) -> Ordering {
        let ordering = match &self.order {
            KeyOrder::Natural(cmp) => cmp(a, b),
            KeyOrder::Custom(cmp) => cmp(a, b),
        };
        self.direction.apply(ordering)
    }

    fn key_of(&self, id: ItemId) -> &K {
        match self.keys.get(&id) {
            Some(key) => key,
            None => panic!("no ordering key for item {id}"),
        }
    }
}

impl<K> OrderingResult for OrderingFromMap<K> {
    fn order(&self, ids: &[ItemId]) -> Vec<ItemId> {
        self.order_of(ids.iter().copied())
    }
}

impl<K> fmt::Debug for OrderingFromMap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderingFromMap")
            .field("keys", &self.keys.len())
            .field("custom_comparator", &self.has_custom_comparator())
            .field("direction", &self.direction)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(pairs: &[(u32, &'static str)]) -> FxHashMap<ItemId, &'static str> {
        pairs.iter().map(|&(id, k)| (ItemId(id), k)).collect()
    }

    fn ids(raw: &[u32]) -> Vec<ItemId> {
        raw.iter().copied().map(ItemId).collect()
    }

    #[test]
    fn natural_order_both_directions() {
        let map = keys(&[(1, "b"), (2, "a"), (3, "c")]);
        let asc = OrderingFromMap::new(map.clone());
        assert_eq!(asc.order(&ids(&[1, 2, 3])), ids(&[2, 1, 3]));

        let desc = OrderingFromMap::with_direction(map, SortDirection::Descending);
        assert_eq!(desc.order(&ids(&[1, 2, 3])), ids(&[3, 1, 2]));
    }

    #[test]
    fn reversed_comparator_matches_descending() {
        let map = keys(&[(1, "b"), (2, "a"), (3, "c")]);
        let custom = OrderingFromMap::with_comparator(
            map.clone(),
            |a: &&str, b: &&str| b.cmp(a),
            SortDirection::Ascending,
        );
        let desc = OrderingFromMap::with_direction(map, SortDirection::Descending);
        assert_eq!(custom.order(&ids(&[1, 2, 3])), desc.order(&ids(&[1, 2, 3])));
        assert!(custom.has_custom_comparator());
    }

    #[test]
    fn ties_keep_input_order() {
        let map = keys(&[(1, "x"), (2, "a"), (3, "x"), (4, "x")]);
        let asc = OrderingFromMap::new(map.clone());
        assert_eq!(asc.order(&ids(&[4, 3, 2, 1])), ids(&[2, 4, 3, 1]));
        let desc = OrderingFromMap::with_direction(map, SortDirection::Descending);
        assert_eq!(desc.order(&ids(&[3, 1, 4, 2])), ids(&[3, 1, 4, 2]));
    }

    #[test]
    #[should_panic(expected = "no ordering key for item 5")]
    fn missing_key_panics_for_single_id() {
        let asc = OrderingFromMap::new(keys(&[(1, "b")]));
        asc.order(&ids(&[5]));
    }

    #[test]
    fn subset_and_empty_requests() {
        let asc = OrderingFromMap::new(keys(&[(1, "b"), (2, "a"), (3, "c")]));
        assert_eq!(asc.order(&ids(&[3, 1])), ids(&[1, 3]));
        assert!(asc.order(&[]).is_empty());
    }

    #[test]
    #[should_panic(expected = "no ordering key for item 9")]
    fn missing_key_panics() {
        let asc = OrderingFromMap::new(keys(&[(1, "b")]));
        asc.order(&ids(&[1, 9]));
    }

    #[test]
    fn scores_sort_with_total_order() {
        let scores: FxHashMap<ItemId, f64> =
            [(ItemId(1), 0.3), (ItemId(2), 2.5), (ItemId(3), -1.0)].into_iter().collect();
        let top = OrderingFromMap::by_score(scores, SortDirection::Descending);
        assert_eq!(top.order_of(ids(&[1, 2, 3])), ids(&[2, 1, 3]));
    }

    #[test]
    fn direction_factor() {
        assert_eq!(SortDirection::Ascending.factor(), 1);
        assert_eq!(SortDirection::from_descending(true).factor(), -1);
        assert_eq!(
            SortDirection::Descending.apply(Ordering::Less),
            Ordering::Greater
        );
    }
}
