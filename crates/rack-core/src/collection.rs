#![forbid(unsafe_code)]

//! Rank-sorted item storage.
//!
//! [`OrderedCollection`] is a sorted vector: lookups are a binary search on
//! [`Rank`], inserts shift the tail by one slot. With a few hundred ribbons
//! per branch the shift is cheaper than any tree.
//!
//! # Invariants
//!
//! 1. Items are strictly ascending by rank (no two items share a rank).
//! 2. No two items share a name.
//! 3. Removing an item keeps the relative order of the rest.

use rustc_hash::FxHashSet;

use crate::error::{RackError, Result};
use crate::item::{Item, Rank};

/// A set of items kept in ascending rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedCollection {
    items: Vec<Item>,
}

impl OrderedCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from items in any order.
    ///
    /// # Errors
    ///
    /// [`RackError::DuplicateRank`] if two items share a rank and
    /// [`RackError::DuplicateName`] if two items share a name.
    pub fn from_unsorted(items: impl IntoIterator<Item = Item>) -> Result<Self> {
        let mut items: Vec<Item> = items.into_iter().collect();
        items.sort_by_key(|item| item.rank);

        for pair in items.windows(2) {
            if pair[0].rank == pair[1].rank {
                return Err(RackError::DuplicateRank {
                    rank: pair[0].rank,
                    first: pair[0].name.clone(),
                    second: pair[1].name.clone(),
                });
            }
        }

        let mut seen = FxHashSet::default();
        for item in &items {
            if !seen.insert(item.name.as_str()) {
                return Err(RackError::DuplicateName {
                    name: item.name.clone(),
                });
            }
        }

        Ok(Self { items })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.items.iter().map(|item| item.name.as_str())
    }

    /// Sorted index of the item holding `rank`, or the index it would be
    /// inserted at.
    pub fn search(&self, rank: Rank) -> std::result::Result<usize, usize> {
        self.items.binary_search_by_key(&rank, |item| item.rank)
    }

    /// Index of the item with this rank and name, if present.
    #[must_use]
    pub fn index_of(&self, rank: Rank, name: &str) -> Option<usize> {
        self.search(rank)
            .ok()
            .filter(|&index| self.items[index].name == name)
    }

    /// Linear lookup by name, for callers that do not know the rank.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|item| item.name == name)
    }

    /// Insert at the binary-search position and return the new index.
    ///
    /// The caller guarantees the rank is not present yet.
    pub(crate) fn insert(&mut self, item: Item) -> usize {
        let found = self.search(item.rank);
        debug_assert!(found.is_err(), "rank {} already present", item.rank);
        let (Ok(index) | Err(index)) = found;
        self.items.insert(index, item);
        index
    }

    pub(crate) fn remove(&mut self, index: usize) -> Item {
        self.items.remove(index)
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether the invariants hold. Cheap enough for tests and debug asserts.
    #[must_use]
    pub fn is_strictly_sorted(&self) -> bool {
        self.items.windows(2).all(|pair| pair[0].rank < pair[1].rank)
    }
}

impl<'a> IntoIterator for &'a OrderedCollection {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(pairs: &[(u32, &str)]) -> Vec<Item> {
        pairs.iter().map(|&(rank, name)| Item::new(rank, name)).collect()
    }

    #[test]
    fn from_unsorted_sorts_by_rank() {
        let collection =
            OrderedCollection::from_unsorted(items(&[(3, "D"), (0, "A"), (2, "C")])).unwrap();
        assert_eq!(collection.names().collect::<Vec<_>>(), ["A", "C", "D"]);
        assert!(collection.is_strictly_sorted());
    }

    #[test]
    fn duplicate_rank_is_rejected() {
        let err = OrderedCollection::from_unsorted(items(&[(1, "A"), (1, "B")])).unwrap_err();
        assert_eq!(
            err,
            RackError::DuplicateRank {
                rank: Rank::new(1),
                first: "A".into(),
                second: "B".into(),
            }
        );
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let err = OrderedCollection::from_unsorted(items(&[(1, "A"), (2, "A")])).unwrap_err();
        assert_eq!(err, RackError::DuplicateName { name: "A".into() });
    }

    #[test]
    fn insert_lands_on_binary_search_slot() {
        let mut collection =
            OrderedCollection::from_unsorted(items(&[(0, "A"), (4, "E")])).unwrap();
        assert_eq!(collection.insert(Item::new(2, "C")), 1);
        assert_eq!(collection.insert(Item::new(9, "Z")), 3);
        assert_eq!(collection.insert(Item::new(1, "B")), 1);
        assert_eq!(
            collection.names().collect::<Vec<_>>(),
            ["A", "B", "C", "E", "Z"]
        );
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut collection =
            OrderedCollection::from_unsorted(items(&[(0, "A"), (1, "B"), (2, "C")])).unwrap();
        let removed = collection.remove(1);
        assert_eq!(removed.name, "B");
        assert_eq!(collection.names().collect::<Vec<_>>(), ["A", "C"]);
    }

    #[test]
    fn index_of_checks_name() {
        let collection =
            OrderedCollection::from_unsorted(items(&[(0, "A"), (1, "B")])).unwrap();
        assert_eq!(collection.index_of(Rank::new(1), "B"), Some(1));
        assert_eq!(collection.index_of(Rank::new(1), "A"), None);
        assert_eq!(collection.find("A"), Some(0));
        assert_eq!(collection.find("Q"), None);
    }
}
