//! Sorting. Every sort here is stable: equal elements keep their relative
//! order, in both directions.

use std::cmp::Ordering;

use itertools::Itertools;
use log::warn;
use rand::{Rng, seq::SliceRandom};

use super::{Element, TypedList};

fn directed(ordering: Ordering, ascending: bool) -> Ordering {
    if ascending {
        ordering
    } else {
        ordering.reverse()
    }
}

impl<T: Element> TypedList<T> {
    pub fn get_sorted(&self, ascending: bool) -> Self {
        self.derive(
            self.iter()
                .cloned()
                .sorted_by(|a, b| directed(a.compare(b), ascending))
                .collect(),
        )
    }

    /// Sorts by the value of a named property of each element.
    pub fn get_sorted_by_property(&self, property: &str, ascending: bool) -> Self {
        let keys: Vec<_> = self.iter().map(|element| element.property(property)).collect();
        self.get_sorted_on_indexes(
            &(0..self.len())
                .sorted_by(|&a, &b| directed(keys[a].compare(&keys[b]), ascending))
                .map(Some)
                .collect::<Vec<_>>(),
        )
    }

    /// Co-sorts by an external list of keys: element `i` moves with key `i`.
    /// When the lengths differ only the first `min(len, keys.len())`
    /// elements take part.
    pub fn get_sorted_by_list<K: Element>(&self, keys: &[K], ascending: bool) -> Self {
        if keys.len() != self.len() {
            warn!(
                "Sorting a list of length {} by {} keys, truncating",
                self.len(),
                keys.len()
            );
        }
        let permutation = sort_permutation(&keys[..keys.len().min(self.len())], ascending);
        self.derive(
            permutation
                .into_iter()
                .map(|index| self[index].clone())
                .collect(),
        )
    }

    pub fn get_sorted_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut items = self.to_vec();
        items.shuffle(rng);
        self.derive(items)
    }

    /// Reorders in place: position `i` receives the element at
    /// `indexes[i]`. `None` entries and indexes past the end are skipped, so
    /// the list may shrink.
    pub fn sort_on_indexes(&mut self, indexes: &[Option<usize>]) {
        let reordered = self.get_sorted_on_indexes(indexes);
        *self = reordered;
    }

    pub fn get_sorted_on_indexes(&self, indexes: &[Option<usize>]) -> Self {
        self.derive(
            indexes
                .iter()
                .flatten()
                .filter_map(|&index| self.get(index).cloned())
                .collect(),
        )
    }

    /// The permutation that sorts the list: `result[k]` is the index of the
    /// element that lands at position `k`. Ties keep their original order.
    pub fn sort_indexed(&self, ascending: bool) -> Vec<usize> {
        sort_permutation(self, ascending)
    }

    pub fn get_reversed(&self) -> Self {
        self.derive(self.iter().rev().cloned().collect())
    }
}

/// Stable sorting permutation of `keys`.
pub(crate) fn sort_permutation<K: Element>(keys: &[K], ascending: bool) -> Vec<usize> {
    (0..keys.len())
        .sorted_by(|&a, &b| directed(keys[a].compare(&keys[b]), ascending))
        .collect()
}
