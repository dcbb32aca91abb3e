//! Sub-listing, filtering, lookup and random selection.

use log::warn;
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use super::{Element, TypedList};
use crate::{core::TypeTag, value::Value};

/// Comparison applied by [`TypedList::get_filtered_by_property_value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Comparison {
    #[default]
    Equal,
    Different,
    Greater,
    Lower,
}

impl Comparison {
    pub fn matches(&self, left: &Value, right: &Value) -> bool {
        match self {
            Comparison::Equal => left == right,
            Comparison::Different => left != right,
            Comparison::Greater => left.compare(right).is_gt(),
            Comparison::Lower => left.compare(right).is_lt(),
        }
    }
}

impl<T: Element> TypedList<T> {
    /// Elements from `start` to `end`, both inclusive.
    ///
    /// The range is clamped into the list: an `end` past the last element
    /// stops at the last element and a `start` past the end gives an empty
    /// list.
    pub fn get_sub_list(&self, start: usize, end: usize) -> Self {
        if self.is_empty() || start > end {
            return self.derive(Vec::new());
        }
        let end = end.min(self.len() - 1);
        let start = start.min(self.len());
        self.derive(self.get(start..=end).map(<[T]>::to_vec).unwrap_or_default())
    }

    /// Elements at the given positions, in the given order. Positions past
    /// the end are skipped.
    pub fn get_sub_list_by_indexes(&self, indexes: &[usize]) -> Self {
        self.derive(
            indexes
                .iter()
                .filter_map(|&index| self.get(index).cloned())
                .collect(),
        )
    }

    /// Elements whose kind is `tag`.
    pub fn get_sub_list_by_type(&self, tag: TypeTag) -> Self {
        self.derive(
            self.iter()
                .filter(|element| element.kind() == tag)
                .cloned()
                .collect(),
        )
    }

    /// Elements whose `property` compares to `value` as requested.
    pub fn get_filtered_by_property_value(
        &self,
        property: &str,
        value: &Value,
        comparison: Comparison,
    ) -> Self {
        self.derive(
            self.iter()
                .filter(|element| comparison.matches(&element.property(property), value))
                .cloned()
                .collect(),
        )
    }

    /// Keeps the elements whose co-indexed mask entry is true. A short mask
    /// truncates the result.
    pub fn get_filtered_by_boolean_list(&self, mask: &[bool]) -> Self {
        if mask.len() != self.len() {
            warn!(
                "Boolean mask has length {} for a list of length {}, truncating",
                mask.len(),
                self.len()
            );
        }
        self.derive(
            self.iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(element, _)| element.clone())
                .collect(),
        )
    }

    pub fn get_filtered_by_function<F>(&self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool,
    {
        self.derive(self.iter().filter(|element| predicate(element)).cloned().collect())
    }

    pub fn get_first_element_by_property_value(&self, property: &str, value: &Value) -> Option<&T> {
        self.iter()
            .find(|element| element.property(property) == *value)
    }

    pub fn get_first_element_by_function<F>(&self, predicate: F) -> Option<&T>
    where
        F: Fn(&T) -> bool,
    {
        self.iter().find(|element| predicate(element))
    }

    pub fn index_of_element(&self, element: &T) -> Option<usize> {
        self.iter().position(|candidate| candidate == element)
    }

    /// First index of each of `elements`, in order.
    pub fn index_of_elements(&self, elements: &[T]) -> Vec<Option<usize>> {
        elements
            .iter()
            .map(|element| self.index_of_element(element))
            .collect()
    }

    /// Every index holding `element`.
    pub fn indexes_of_element(&self, element: &T) -> Vec<usize> {
        self.iter()
            .enumerate()
            .filter(|(_, candidate)| *candidate == element)
            .map(|(index, _)| index)
            .collect()
    }

    /// Looks each name up among the elements' display names. Unmatched names
    /// leave a hole.
    pub fn get_elements_by_names(&self, names: &[&str]) -> Vec<Option<T>> {
        names
            .iter()
            .map(|name| {
                self.iter()
                    .find(|element| element.element_name().as_deref() == Some(*name))
                    .cloned()
            })
            .collect()
    }

    pub fn get_random_element<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&T> {
        self.choose(rng)
    }

    /// `count` random elements. Without repetitions the result is capped at
    /// the list length.
    pub fn get_random_elements<R: Rng + ?Sized>(
        &self,
        count: usize,
        with_repetitions: bool,
        rng: &mut R,
    ) -> Self {
        if self.is_empty() {
            return self.derive(Vec::new());
        }
        let items = if with_repetitions {
            (0..count)
                .filter_map(|_| self.choose(rng).cloned())
                .collect()
        } else {
            self.choose_multiple(rng, count).cloned().collect()
        };
        self.derive(items)
    }
}
