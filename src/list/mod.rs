//! # Typed Lists
//!
//! [`TypedList<T>`] is the ordered, dense sequence every container kind is
//! built on. What varies between kinds (which tag a list reports, how a
//! foreign [`Value`] is coerced in, how elements order, hash, and summarise
//! themselves) lives in the [`Element`] trait, implemented once per element
//! kind. Kind-specific operations (`get_sum` on numbers, `to_lower_case` on
//! strings, `get_times` on dates) are inherent methods on the concrete
//! instantiations in the submodules.
//!
//! ```rust
//! use listkit::{NumberList, TypeTag, Value};
//!
//! let numbers = NumberList::from_values(&[Value::from("3"), Value::from(1.0)], true).unwrap();
//! assert_eq!(numbers.type_tag(), TypeTag::NumberList);
//! assert_eq!(numbers.get_sorted(true).into_vec(), vec![1.0, 3.0]);
//! ```
//!
//! Operations whose name starts with `get_` are pure and return a new list
//! that keeps the receiver's name. Mutators (`push`, `splice`,
//! `remove_element_at_index`, ...) change the receiver in place.

pub mod access;
pub mod date;
pub mod geometry;
pub mod number;
pub mod report;
pub mod set;
pub mod sort;
pub mod string;

use std::{
    cmp::Ordering,
    fmt::Debug,
    ops::{Deref, DerefMut},
};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    containers::{Container, ContainerMut, TypedContainer},
    core::TypeTag,
    errors::{ListError, Result},
    value::{Interval, Point, Value, coerce},
};

pub use access::Comparison;
pub use number::Operand;
pub use set::ElementsRepetition;
pub use string::TextOperand;

/// Base list of heterogeneous values.
pub type List = TypedList<Value>;
pub type NumberList = TypedList<f64>;
pub type StringList = TypedList<String>;
pub type DateList = TypedList<NaiveDateTime>;
pub type Polygon = TypedList<Point>;
pub type IntervalList = TypedList<Interval>;
/// List of columns, each column any container kind.
pub type Table = TypedList<TypedContainer>;
/// List of numeric columns.
pub type NumberTable = TypedList<NumberList>;
pub type PolygonList = TypedList<Polygon>;

/// Hash key used by the fast deduplication path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DedupKey {
    Number(u64),
    Text(String),
    Date(NaiveDateTime),
}

/// Per-kind behaviour of list elements.
///
/// Every container kind that stores its elements in a [`TypedList`] has an
/// element type implementing this trait. The defaulted hooks give the
/// generic behaviour; kinds override them where the generic version is
/// inefficient or wrong for them.
pub trait Element: Clone + Debug + PartialEq + Sized {
    /// Tag of a list holding elements of this kind.
    const LIST_TAG: TypeTag;

    /// Tag of this particular element.
    fn kind(&self) -> TypeTag;

    fn to_value(&self) -> Value;

    /// Reads an element from a value. With `force`, primitive values of
    /// another kind are coerced instead of rejected.
    fn from_value(value: &Value, force: bool) -> Option<Self>;

    /// Total order used by sorting, min and max.
    fn compare(&self, other: &Self) -> Ordering;

    /// Wraps a list of this kind into the dynamic container.
    fn wrap_list(list: TypedList<Self>) -> TypedContainer;

    /// Hashable identity, when the kind has one. Returning `None` for any
    /// element sends deduplication down the quadratic path.
    fn dedup_key(&self) -> Option<DedupKey> {
        None
    }

    fn property(&self, name: &str) -> Value {
        self.to_value().property(name)
    }

    fn element_name(&self) -> Option<String> {
        self.to_value().name()
    }

    /// Sets the element's display name. Returns false for kinds without one.
    fn assign_name(&mut self, _name: &str) -> bool {
        false
    }

    fn min_of(items: &[Self]) -> Option<Self> {
        items.iter().min_by(|a, b| a.compare(b)).cloned()
    }

    fn max_of(items: &[Self]) -> Option<Self> {
        items.iter().max_by(|a, b| a.compare(b)).cloned()
    }

    /// Kind-specific lines appended to a report.
    fn report_lines(_items: &[Self], _indent: usize) -> Vec<String> {
        Vec::new()
    }
}

impl Element for Value {
    const LIST_TAG: TypeTag = TypeTag::List;

    fn kind(&self) -> TypeTag {
        self.type_tag()
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value, _force: bool) -> Option<Self> {
        Some(value.clone())
    }

    fn compare(&self, other: &Self) -> Ordering {
        Value::compare(self, other)
    }

    fn wrap_list(list: TypedList<Self>) -> TypedContainer {
        TypedContainer::List(list)
    }

    fn assign_name(&mut self, name: &str) -> bool {
        match self {
            Value::Object(properties) => {
                properties.insert("name".to_string(), Value::from(name));
                true
            }
            Value::Container(container) => {
                container.set_name(name);
                true
            }
            _ => false,
        }
    }
}

/// An ordered sequence of one element kind, with a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedList<T> {
    #[serde(default)]
    pub name: String,
    items: Vec<T>,
}

impl<T> Default for TypedList<T> {
    fn default() -> Self {
        TypedList {
            name: String::new(),
            items: Vec::new(),
        }
    }
}

impl<T: Element> TypedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing sequence.
    pub fn from_vec(items: Vec<T>) -> Self {
        TypedList {
            name: String::new(),
            items,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn push(&mut self, element: T) {
        self.items.push(element);
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub fn type_tag(&self) -> TypeTag {
        T::LIST_TAG
    }

    /// Builds a list from dynamic values.
    ///
    /// # Errors
    ///
    /// [`ListError::ElementKind`] for the first value that cannot be stored
    /// in this kind of list.
    pub fn from_values(values: &[Value], force: bool) -> Result<Self> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| {
                T::from_value(value, force).ok_or(ListError::ElementKind {
                    index,
                    list: T::LIST_TAG,
                    found: value.type_tag(),
                })
            })
            .collect::<Result<Vec<T>>>()
            .map(Self::from_vec)
    }

    pub fn to_values(&self) -> Vec<Value> {
        self.items.iter().map(Element::to_value).collect()
    }

    /// The element at `index` as a value, `Null` past the end.
    pub fn value_at(&self, index: usize) -> Value {
        self.items
            .get(index)
            .map(Element::to_value)
            .unwrap_or_default()
    }

    pub fn into_container(self) -> TypedContainer {
        T::wrap_list(self)
    }

    /// A new list with the given elements and this list's name.
    pub(crate) fn derive(&self, items: Vec<T>) -> Self {
        TypedList {
            name: self.name.clone(),
            items,
        }
    }

    /// Pairwise equality by position.
    pub fn same_elements(&self, other: &TypedList<T>) -> bool {
        self.items.len() == other.items.len()
            && self.items.iter().zip(&other.items).all(|(a, b)| a == b)
    }

    pub fn all_elements_equal(&self) -> bool {
        self.items.windows(2).all(|pair| pair[0] == pair[1])
    }

    /// The shared kind of every element, `None` when mixed or empty.
    pub fn type_of_elements(&self) -> Option<TypeTag> {
        let first = self.items.first()?.kind();
        self.items
            .iter()
            .all(|element| element.kind() == first)
            .then_some(first)
    }

    /// Plain numeric coercion of every element.
    pub fn to_number_list(&self) -> NumberList {
        NumberList::from_vec(
            self.items
                .iter()
                .map(|element| coerce::to_number(&element.to_value()))
                .collect(),
        )
        .named(self.name.clone())
    }

    pub fn to_string_list(&self) -> StringList {
        StringList::from_vec(
            self.items
                .iter()
                .map(|element| coerce::to_string(&element.to_value()))
                .collect(),
        )
        .named(self.name.clone())
    }
}

impl<T> Deref for TypedList<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> DerefMut for TypedList<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl<T: Element> Container for TypedList<T> {
    type Element = T;

    fn type_tag(&self) -> TypeTag {
        T::LIST_TAG
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn values(&self) -> &[T] {
        &self.items
    }
}

impl<T: Element> ContainerMut for TypedList<T> {
    fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn values_mut(&mut self) -> &mut [T] {
        &mut self.items
    }
}

impl<T> From<Vec<T>> for TypedList<T> {
    fn from(items: Vec<T>) -> Self {
        TypedList {
            name: String::new(),
            items,
        }
    }
}

impl<T> FromIterator<T> for TypedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        TypedList::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> Extend<T> for TypedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for TypedList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a TypedList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Element> From<TypedList<T>> for Value {
    fn from(list: TypedList<T>) -> Self {
        Value::from(list.into_container())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod construction_tests {
        use super::*;

        #[test]
        fn test_from_values_rejects_foreign_kinds() {
            let err = NumberList::from_values(&[Value::from(1.0), Value::from("x")], false)
                .unwrap_err();
            assert!(matches!(
                err,
                ListError::ElementKind {
                    index: 1,
                    list: TypeTag::NumberList,
                    found: TypeTag::String
                }
            ));
        }

        #[test]
        fn test_from_values_forces_primitives() {
            let numbers =
                NumberList::from_values(&[Value::from("2.5"), Value::Boolean(true)], true)
                    .unwrap();
            assert_eq!(numbers.items(), &[2.5, 1.0]);
        }

        #[test]
        fn test_collect_and_extend() {
            let mut strings: StringList = ["a", "b"].iter().map(|s| s.to_string()).collect();
            strings.extend(vec!["c".to_string()]);
            assert_eq!(strings.len(), 3);
            assert_eq!(strings[2], "c");
        }
    }

    mod inspection_tests {
        use super::*;

        #[test]
        fn test_type_of_elements() {
            let mixed = List::from_vec(vec![Value::from(1.0), Value::from("a")]);
            assert_eq!(mixed.type_of_elements(), None);

            let numbers = List::from_vec(vec![Value::from(1.0), Value::from(2.0)]);
            assert_eq!(numbers.type_of_elements(), Some(TypeTag::Number));

            assert_eq!(List::new().type_of_elements(), None);
        }

        #[test]
        fn test_same_elements_requires_equal_length() {
            let a = NumberList::from_vec(vec![1.0, 2.0]);
            let b = NumberList::from_vec(vec![1.0, 2.0, 3.0]);
            assert!(!a.same_elements(&b));
            assert!(a.same_elements(&a.clone().named("other")));
        }

        #[test]
        fn test_all_elements_equal() {
            assert!(NumberList::from_vec(vec![4.0, 4.0]).all_elements_equal());
            assert!(!NumberList::from_vec(vec![4.0, 5.0]).all_elements_equal());
            assert!(NumberList::new().all_elements_equal());
        }

        #[test]
        fn test_value_at_past_end_is_null() {
            let strings = StringList::from_vec(vec!["a".to_string()]);
            assert_eq!(strings.value_at(0), Value::from("a"));
            assert_eq!(strings.value_at(4), Value::Null);
        }

        #[test]
        fn test_conversions_keep_name() {
            let list = List::from_vec(vec![Value::from("4"), Value::from(true)]).named("raw");
            let numbers = list.to_number_list();
            assert_eq!(numbers.name, "raw");
            assert_eq!(numbers.items(), &[4.0, 1.0]);
            assert_eq!(list.to_string_list().items(), &["4", "true"]);
        }
    }
}
