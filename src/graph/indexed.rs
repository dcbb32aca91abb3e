//! # Id-Indexed Lists
//!
//! [`IndexedList`] keeps an ordered sequence and an id → element map in
//! step. Every mutator updates both or neither, and there is no raw `push`:
//! the only ways in are [`IndexedList::add`], [`IndexedList::splice`] and
//! the constructors, which all reject duplicate ids.
//!
//! Transforms that only drop or reorder elements (filters, sub-lists,
//! sorting) cannot create duplicates, so they rebuild the index without
//! re-checking.
//!
//! The mutators also run the element's [`Identified::attach`] and
//! [`Identified::detach`] hooks; derived lists share the same elements and
//! run neither.

use std::{collections::HashMap, fmt, ops::Deref, rc::Rc};

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser::SerializeStruct};

use super::Identified;
use crate::{
    containers::{Container, TypedContainer},
    core::TypeTag,
    errors::{ListError, Result},
    list::{NumberList, StringList, report::report_header, sort::sort_permutation},
    value::Value,
};

/// Ordered elements with an id index.
pub struct IndexedList<T> {
    pub name: String,
    items: Vec<Rc<T>>,
    index: HashMap<String, Rc<T>>,
}

impl<T: Identified> IndexedList<T> {
    pub fn new() -> Self {
        IndexedList {
            name: String::new(),
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// # Errors
    ///
    /// [`ListError::DuplicateId`] for the first repeated id.
    pub fn from_items(items: Vec<Rc<T>>) -> Result<Self> {
        let mut list = Self::new();
        for item in items {
            list.add(item)?;
        }
        Ok(list)
    }

    /// Builds a list from dynamic values, which must all be of this list's
    /// element kind.
    pub fn from_values(values: &[Value]) -> Result<Self> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                T::from_value(value).ok_or(ListError::ElementKind {
                    index,
                    list: T::LIST_TAG,
                    found: value.type_tag(),
                })
            })
            .collect::<Result<Vec<_>>>()
            .and_then(Self::from_items)
    }

    /// Rebuilds the index over items already known to have unique ids.
    fn derive(&self, items: Vec<Rc<T>>) -> Self {
        let index = items
            .iter()
            .map(|item| (item.id().to_string(), Rc::clone(item)))
            .collect();
        IndexedList {
            name: self.name.clone(),
            items,
            index,
        }
    }

    /// Appends an element.
    ///
    /// # Errors
    ///
    /// [`ListError::DuplicateId`] if an element with the same id is present;
    /// the list is left untouched.
    pub fn add(&mut self, item: impl Into<Rc<T>>) -> Result<()> {
        let item = item.into();
        if self.index.contains_key(item.id()) {
            return Err(ListError::DuplicateId(item.id().to_string()));
        }
        self.index.insert(item.id().to_string(), Rc::clone(&item));
        T::attach(&item);
        self.items.push(item);
        Ok(())
    }

    /// Removes the element with `id`.
    pub fn remove(&mut self, id: &str) -> Option<Rc<T>> {
        let item = self.index.remove(id)?;
        self.items.retain(|candidate| !Rc::ptr_eq(candidate, &item));
        T::detach(&item);
        Some(item)
    }

    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] when `index` is past the end.
    pub fn remove_at(&mut self, index: usize) -> Result<Rc<T>> {
        if index >= self.items.len() {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let item = self.items.remove(index);
        self.index.remove(item.id());
        T::detach(&item);
        Ok(item)
    }

    /// Constant-time lookup.
    pub fn get_by_id(&self, id: &str) -> Option<&Rc<T>> {
        self.index.get(id)
    }

    /// Linear scan; the first element with that name.
    pub fn get_by_name(&self, name: &str) -> Option<&Rc<T>> {
        self.items.iter().find(|item| item.name() == name)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn clear(&mut self) {
        self.items.iter().for_each(T::detach);
        self.items.clear();
        self.index.clear();
    }

    pub fn items(&self) -> &[Rc<T>] {
        &self.items
    }

    pub fn type_tag(&self) -> TypeTag {
        T::LIST_TAG
    }

    pub fn to_values(&self) -> Vec<Value> {
        self.items.iter().map(T::to_value).collect()
    }

    pub fn value_at(&self, index: usize) -> Value {
        self.items.get(index).map(T::to_value).unwrap_or_default()
    }

    pub fn into_container(self) -> TypedContainer {
        T::wrap_list(self)
    }

    /// Union by id: elements of `other` whose id is already present are
    /// skipped.
    pub fn concat(&self, other: &IndexedList<T>) -> Self {
        let mut union = self.clone();
        for item in &other.items {
            if union.add(Rc::clone(item)).is_err() {
                debug!("Skipping duplicate id {} in union", item.id());
            }
        }
        union
    }

    /// Removes `delete_count` elements from `start` (both clamped), inserts
    /// `insert` in their place and returns the removed elements.
    ///
    /// # Errors
    ///
    /// [`ListError::DuplicateId`] if an inserted id collides with a kept
    /// element or with another inserted element; nothing changes then.
    pub fn splice(&mut self, start: usize, delete_count: usize, insert: Vec<Rc<T>>) -> Result<Self> {
        let start = start.min(self.items.len());
        let end = start.saturating_add(delete_count).min(self.items.len());

        let removed_ids: Vec<&str> = self.items[start..end].iter().map(|item| item.id()).collect();
        if let Some(duplicate) = insert.iter().map(|item| item.id()).duplicates().next() {
            return Err(ListError::DuplicateId(duplicate.to_string()));
        }
        if let Some(clash) = insert
            .iter()
            .find(|item| self.contains_id(item.id()) && !removed_ids.contains(&item.id()))
        {
            return Err(ListError::DuplicateId(clash.id().to_string()));
        }

        let inserted = insert.len();
        let removed: Vec<Rc<T>> = self.items.splice(start..end, insert).collect();
        for item in &removed {
            self.index.remove(item.id());
            T::detach(item);
        }
        self.items[start..start + inserted].iter().for_each(T::attach);
        for item in &self.items[start..] {
            self.index.insert(item.id().to_string(), Rc::clone(item));
        }
        Ok(self.derive(removed))
    }

    /// Elements from `start` to `end`, both inclusive, clamped.
    pub fn get_sub_list(&self, start: usize, end: usize) -> Self {
        if self.items.is_empty() || start > end {
            return self.derive(Vec::new());
        }
        let end = end.min(self.items.len() - 1);
        let start = start.min(self.items.len());
        self.derive(self.items.get(start..=end).map(<[_]>::to_vec).unwrap_or_default())
    }

    /// Elements at `indexes`. Repeated positions are kept once.
    pub fn get_sub_list_by_indexes(&self, indexes: &[usize]) -> Self {
        self.derive(
            indexes
                .iter()
                .unique()
                .filter_map(|&index| self.items.get(index).cloned())
                .collect(),
        )
    }

    pub fn get_filtered_by_boolean_list(&self, mask: &[bool]) -> Self {
        self.derive(
            self.items
                .iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(item, _)| Rc::clone(item))
                .collect(),
        )
    }

    pub fn get_filtered_by_function<F>(&self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool,
    {
        self.derive(
            self.items
                .iter()
                .filter(|item| predicate(item))
                .cloned()
                .collect(),
        )
    }

    /// Sorted by id.
    pub fn get_sorted(&self, ascending: bool) -> Self {
        self.get_sorted_on_indexes(
            &self
                .sort_indexed(ascending)
                .into_iter()
                .map(Some)
                .collect::<Vec<_>>(),
        )
    }

    /// Reordered by `indexes`; `None`, out-of-range and repeated positions
    /// are skipped.
    pub fn get_sorted_on_indexes(&self, indexes: &[Option<usize>]) -> Self {
        let positions: Vec<usize> = indexes.iter().flatten().copied().collect();
        self.get_sub_list_by_indexes(&positions)
    }

    /// Permutation sorting the elements by id.
    pub fn sort_indexed(&self, ascending: bool) -> Vec<usize> {
        let ids: Vec<String> = self.items.iter().map(|item| item.id().to_string()).collect();
        sort_permutation(&ids, ascending)
    }

    pub fn get_reversed(&self) -> Self {
        self.derive(self.items.iter().rev().cloned().collect())
    }

    /// Ids are unique, so this is a copy.
    pub fn get_without_repetitions(&self) -> Self {
        self.clone()
    }

    pub fn get_ids(&self) -> StringList {
        self.items
            .iter()
            .map(|item| item.id().to_string())
            .collect()
    }

    pub fn get_names(&self) -> StringList {
        self.items
            .iter()
            .map(|item| item.name().to_string())
            .collect()
    }

    pub fn get_weights(&self) -> NumberList {
        self.items.iter().map(|item| item.weight()).collect()
    }

    pub fn get_report(&self, indent: usize) -> String {
        let mut lines = report_header(indent, T::LIST_TAG.as_str(), &self.name, self.items.len());
        if !self.items.is_empty() {
            let weights = self.get_weights();
            lines.push(format!(
                "{}total weight: {}",
                "  ".repeat(indent),
                weights.get_sum()
            ));
        }
        lines.join("\n")
    }

    /// Describes every disagreement between the sequence and the index.
    pub fn index_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.index.len() != self.items.len() {
            errors.push(format!(
                "index holds {} ids for {} elements",
                self.index.len(),
                self.items.len()
            ));
        }
        for item in &self.items {
            match self.index.get(item.id()) {
                Some(indexed) if Rc::ptr_eq(indexed, item) => {}
                Some(_) => errors.push(format!("id {} indexes a different element", item.id())),
                None => errors.push(format!("id {} is missing from the index", item.id())),
            }
        }
        errors
    }
}

impl<T: Identified> Default for IndexedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for IndexedList<T> {
    fn clone(&self) -> Self {
        IndexedList {
            name: self.name.clone(),
            items: self.items.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T: PartialEq> PartialEq for IndexedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.items == other.items
    }
}

impl<T: fmt::Debug> fmt::Debug for IndexedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedList")
            .field("name", &self.name)
            .field("items", &self.items)
            .finish()
    }
}

impl<T> Deref for IndexedList<T> {
    type Target = [Rc<T>];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a, T> IntoIterator for &'a IndexedList<T> {
    type Item = &'a Rc<T>;
    type IntoIter = std::slice::Iter<'a, Rc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Identified> Container for IndexedList<T> {
    type Element = Rc<T>;

    fn type_tag(&self) -> TypeTag {
        T::LIST_TAG
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn values(&self) -> &[Rc<T>] {
        &self.items
    }
}

impl<T: Serialize> Serialize for IndexedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("IndexedList", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("items", &self.items)?;
        state.end()
    }
}

#[derive(Deserialize)]
struct IndexedListRepr<T> {
    #[serde(default)]
    name: String,
    items: Vec<Rc<T>>,
}

impl<'de, T> Deserialize<'de> for IndexedList<T>
where
    T: Identified + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let repr = IndexedListRepr::<T>::deserialize(deserializer)?;
        IndexedList::from_items(repr.items)
            .map(|list| list.named(repr.name))
            .map_err(serde::de::Error::custom)
    }
}
