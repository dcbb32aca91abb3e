//! # Dynamic Containers
//!
//! [`TypedContainer`] is one enum over every container kind. Operations on
//! it dispatch on the variant: transforms return the receiver's kind, except
//! for the base `List`, whose results are refined again since its tag
//! carries no guarantee worth keeping.
//!
//! ```rust
//! use listkit::{List, TypeTag, TypedContainer, Value};
//!
//! let raw = List::from_vec(vec![Value::from("a"), Value::from(1.0), Value::from(2.0)]);
//! let container = TypedContainer::List(raw);
//!
//! // dropping the string leaves numbers only, and the result says so
//! let numbers = container.get_sub_list(1, 2);
//! assert_eq!(numbers.type_tag(), TypeTag::NumberList);
//! ```

use std::cmp::Ordering;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    core::TypeTag,
    errors::{ListError, Result},
    graph::{Identified, IndexedList, NodeList, RelationList},
    list::{
        Comparison, DateList, Element, IntervalList, List, NumberList, NumberTable, Polygon,
        PolygonList, StringList, Table, TypedList,
    },
    value::{Value, coerce},
};

/// Any container, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypedContainer {
    List(List),
    NumberList(NumberList),
    StringList(StringList),
    DateList(DateList),
    IntervalList(IntervalList),
    Polygon(Polygon),
    Table(Table),
    NumberTable(NumberTable),
    PolygonList(PolygonList),
    NodeList(NodeList),
    RelationList(RelationList),
}

/// Evaluates `$body` with `$list` bound to the inner list, whatever its
/// kind.
macro_rules! with_list {
    ($container:expr, $list:ident => $body:expr) => {
        match $container {
            TypedContainer::List($list) => $body,
            TypedContainer::NumberList($list) => $body,
            TypedContainer::StringList($list) => $body,
            TypedContainer::DateList($list) => $body,
            TypedContainer::IntervalList($list) => $body,
            TypedContainer::Polygon($list) => $body,
            TypedContainer::Table($list) => $body,
            TypedContainer::NumberTable($list) => $body,
            TypedContainer::PolygonList($list) => $body,
            TypedContainer::NodeList($list) => $body,
            TypedContainer::RelationList($list) => $body,
        }
    };
}

/// Like [`with_list`], with separate bodies for sequence lists and
/// id-indexed lists.
macro_rules! with_kind {
    ($container:expr, $list:ident => $body:expr, indexed $indexed:ident => $indexed_body:expr) => {
        match $container {
            TypedContainer::List($list) => $body,
            TypedContainer::NumberList($list) => $body,
            TypedContainer::StringList($list) => $body,
            TypedContainer::DateList($list) => $body,
            TypedContainer::IntervalList($list) => $body,
            TypedContainer::Polygon($list) => $body,
            TypedContainer::Table($list) => $body,
            TypedContainer::NumberTable($list) => $body,
            TypedContainer::PolygonList($list) => $body,
            TypedContainer::NodeList($indexed) => $indexed_body,
            TypedContainer::RelationList($indexed) => $indexed_body,
        }
    };
}

/// Applies a same-kind transform and rewraps the result in the receiver's
/// variant. Results of the base `List` are refined.
macro_rules! transform {
    ($container:expr, $list:ident => $body:expr) => {
        match $container {
            TypedContainer::List($list) => TypedContainer::List($body).improved(),
            TypedContainer::NumberList($list) => TypedContainer::NumberList($body),
            TypedContainer::StringList($list) => TypedContainer::StringList($body),
            TypedContainer::DateList($list) => TypedContainer::DateList($body),
            TypedContainer::IntervalList($list) => TypedContainer::IntervalList($body),
            TypedContainer::Polygon($list) => TypedContainer::Polygon($body),
            TypedContainer::Table($list) => TypedContainer::Table($body),
            TypedContainer::NumberTable($list) => TypedContainer::NumberTable($body),
            TypedContainer::PolygonList($list) => TypedContainer::PolygonList($body),
            TypedContainer::NodeList($list) => TypedContainer::NodeList($body),
            TypedContainer::RelationList($list) => TypedContainer::RelationList($body),
        }
    };
}

fn push_coerced<T: Element>(list: &mut TypedList<T>, value: &Value) -> Result<()> {
    let element = T::from_value(value, true).ok_or(ListError::ElementKind {
        index: list.len(),
        list: T::LIST_TAG,
        found: value.type_tag(),
    })?;
    list.push(element);
    Ok(())
}

fn splice_coerced<T: Element>(
    list: &mut TypedList<T>,
    start: usize,
    delete_count: usize,
    insert: &[Value],
) -> Result<TypedContainer> {
    let insert = TypedList::<T>::from_values(insert, true)?;
    Ok(list.splice(start, delete_count, insert.into_vec()).into_container())
}

fn splice_indexed<T: Identified>(
    list: &mut IndexedList<T>,
    start: usize,
    delete_count: usize,
    insert: &[Value],
) -> Result<TypedContainer> {
    let insert = IndexedList::<T>::from_values(insert)?;
    Ok(list
        .splice(start, delete_count, insert.items().to_vec())?
        .into_container())
}

impl TypedContainer {
    pub fn type_tag(&self) -> TypeTag {
        with_list!(self, list => list.type_tag())
    }

    pub fn name(&self) -> &str {
        with_list!(self, list => list.name.as_str())
    }

    pub fn set_name(&mut self, name: &str) {
        with_list!(self, list => list.name = name.to_string())
    }

    pub fn named(mut self, name: &str) -> Self {
        self.set_name(name);
        self
    }

    pub fn len(&self) -> usize {
        with_list!(self, list => list.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at `index` as a value, `Null` past the end.
    pub fn value_at(&self, index: usize) -> Value {
        with_list!(self, list => list.value_at(index))
    }

    pub fn to_values(&self) -> Vec<Value> {
        with_list!(self, list => list.to_values())
    }

    /// Builds a container of kind `tag` holding `values`.
    ///
    /// With `force`, primitive values are coerced into the element kind
    /// (strings to numbers and so on); without it they must already match.
    ///
    /// # Errors
    ///
    /// - [`ListError::NotInstantiable`] if `tag` is not a container tag
    /// - [`ListError::ElementKind`] if a value cannot be stored
    /// - [`ListError::DuplicateId`] for repeated ids in node and relation lists
    pub fn from_values(tag: TypeTag, values: &[Value], force: bool) -> Result<Self> {
        let container = match tag {
            TypeTag::List => List::from_values(values, force)?.into_container(),
            TypeTag::NumberList => NumberList::from_values(values, force)?.into_container(),
            TypeTag::StringList => StringList::from_values(values, force)?.into_container(),
            TypeTag::DateList => DateList::from_values(values, force)?.into_container(),
            TypeTag::IntervalList => IntervalList::from_values(values, force)?.into_container(),
            TypeTag::Polygon => Polygon::from_values(values, force)?.into_container(),
            TypeTag::Table => Table::from_values(values, force)?.into_container(),
            TypeTag::NumberTable => NumberTable::from_values(values, force)?.into_container(),
            TypeTag::PolygonList => PolygonList::from_values(values, force)?.into_container(),
            TypeTag::NodeList => NodeList::from_values(values)?.into_container(),
            TypeTag::RelationList => RelationList::from_values(values)?.into_container(),
            other => return Err(ListError::NotInstantiable(other)),
        };
        Ok(container)
    }

    /// The most specific container for the current elements. Only the base
    /// `List` and `Table` kinds can refine; every other kind is returned as
    /// is.
    pub fn get_improved(&self) -> TypedContainer {
        match self {
            TypedContainer::List(list) => list.get_improved(),
            TypedContainer::Table(table) => table.get_improved(),
            other => other.clone(),
        }
    }

    /// Consuming form of [`TypedContainer::get_improved`].
    pub fn improved(self) -> TypedContainer {
        match self {
            TypedContainer::List(list) => list.get_improved(),
            TypedContainer::Table(table) => table.get_improved(),
            other => other,
        }
    }

    pub fn get_sub_list(&self, start: usize, end: usize) -> TypedContainer {
        transform!(self, list => list.get_sub_list(start, end))
    }

    pub fn get_sub_list_by_indexes(&self, indexes: &[usize]) -> TypedContainer {
        transform!(self, list => list.get_sub_list_by_indexes(indexes))
    }

    pub fn get_sorted(&self, ascending: bool) -> TypedContainer {
        transform!(self, list => list.get_sorted(ascending))
    }

    pub fn get_sorted_on_indexes(&self, indexes: &[Option<usize>]) -> TypedContainer {
        transform!(self, list => list.get_sorted_on_indexes(indexes))
    }

    pub fn get_reversed(&self) -> TypedContainer {
        transform!(self, list => list.get_reversed())
    }

    pub fn get_without_repetitions(&self) -> TypedContainer {
        transform!(self, list => list.get_without_repetitions())
    }

    pub fn get_filtered_by_boolean_list(&self, mask: &[bool]) -> TypedContainer {
        transform!(self, list => list.get_filtered_by_boolean_list(mask))
    }

    /// Keeps the elements for which `predicate` holds on their value form.
    pub fn get_filtered_by_function<F>(&self, predicate: F) -> TypedContainer
    where
        F: Fn(&Value) -> bool,
    {
        let mask: Vec<bool> = self.to_values().iter().map(predicate).collect();
        self.get_filtered_by_boolean_list(&mask)
    }

    pub fn get_filtered_by_property_value(
        &self,
        property: &str,
        value: &Value,
        comparison: Comparison,
    ) -> TypedContainer {
        self.get_filtered_by_function(|element| {
            comparison.matches(&element.property(property), value)
        })
    }

    /// Stable sorting permutation.
    pub fn sort_indexed(&self, ascending: bool) -> Vec<usize> {
        with_list!(self, list => list.sort_indexed(ascending))
    }

    /// Elements of both containers, under this container's name.
    ///
    /// Two containers of the same kind concatenate directly (node and
    /// relation lists take the union by id). Otherwise the elements are
    /// gathered into a base `List` and refined.
    pub fn concat(&self, other: &TypedContainer) -> TypedContainer {
        match (self, other) {
            (TypedContainer::List(a), TypedContainer::List(b)) => {
                TypedContainer::List(a.concat(b)).improved()
            }
            (TypedContainer::NumberList(a), TypedContainer::NumberList(b)) => a.concat(b).into_container(),
            (TypedContainer::StringList(a), TypedContainer::StringList(b)) => a.concat(b).into_container(),
            (TypedContainer::DateList(a), TypedContainer::DateList(b)) => a.concat(b).into_container(),
            (TypedContainer::IntervalList(a), TypedContainer::IntervalList(b)) => {
                a.concat(b).into_container()
            }
            (TypedContainer::Polygon(a), TypedContainer::Polygon(b)) => a.concat(b).into_container(),
            (TypedContainer::Table(a), TypedContainer::Table(b)) => a.concat(b).into_container(),
            (TypedContainer::NumberTable(a), TypedContainer::NumberTable(b)) => {
                a.concat(b).into_container()
            }
            (TypedContainer::PolygonList(a), TypedContainer::PolygonList(b)) => {
                a.concat(b).into_container()
            }
            (TypedContainer::NodeList(a), TypedContainer::NodeList(b)) => a.concat(b).into_container(),
            (TypedContainer::RelationList(a), TypedContainer::RelationList(b)) => {
                a.concat(b).into_container()
            }
            _ => {
                let mut values = self.to_values();
                values.extend(other.to_values());
                List::from_vec(values).named(self.name()).get_improved()
            }
        }
    }

    /// Maps every element and refines the result.
    pub fn apply_function<F>(&self, function: F) -> TypedContainer
    where
        F: Fn(&Value) -> Value,
    {
        List::from_vec(self.to_values().iter().map(function).collect())
            .named(self.name())
            .get_improved()
    }

    /// Appends a value, coercing it into the element kind.
    ///
    /// # Errors
    ///
    /// - [`ListError::ElementKind`] if the value cannot be stored
    /// - [`ListError::InvariantViolation`] on node and relation lists, which
    ///   only grow through `add_node` and `add_relation`
    pub fn push_value(&mut self, value: Value) -> Result<()> {
        with_kind!(self,
            list => push_coerced(list, &value),
            indexed list => Err(ListError::InvariantViolation(format!(
                "cannot push onto a {}; add elements by id instead",
                list.type_tag()
            )))
        )
    }

    /// Removes `delete_count` elements from `start`, inserts `insert` and
    /// returns the removed segment as a container of the same kind.
    ///
    /// # Errors
    ///
    /// Fails without changing the receiver if an inserted value cannot be
    /// stored, or repeats an id in a node or relation list.
    pub fn splice(
        &mut self,
        start: usize,
        delete_count: usize,
        insert: &[Value],
    ) -> Result<TypedContainer> {
        with_kind!(self,
            list => splice_coerced(list, start, delete_count, insert),
            indexed list => splice_indexed(list, start, delete_count, insert)
        )
    }

    pub fn to_number_list(&self) -> NumberList {
        self.to_values()
            .iter()
            .map(coerce::to_number)
            .collect::<NumberList>()
            .named(self.name())
    }

    pub fn to_string_list(&self) -> StringList {
        self.to_values()
            .iter()
            .map(coerce::to_string)
            .collect::<StringList>()
            .named(self.name())
    }

    pub fn get_min(&self) -> Option<Value> {
        with_kind!(self,
            list => list.get_min().map(|element| element.to_value()),
            indexed list => list.to_values().into_iter().min_by(Value::compare)
        )
    }

    pub fn get_max(&self) -> Option<Value> {
        with_kind!(self,
            list => list.get_max().map(|element| element.to_value()),
            indexed list => list.to_values().into_iter().max_by(Value::compare)
        )
    }

    /// The shared kind of every element, `None` when mixed or empty.
    pub fn type_of_elements(&self) -> Option<TypeTag> {
        let values = self.to_values();
        let first = values.first()?.type_tag();
        values
            .iter()
            .all(|value| value.type_tag() == first)
            .then_some(first)
    }

    /// Same kind and pairwise equal elements. Names are ignored.
    pub fn same_elements(&self, other: &TypedContainer) -> bool {
        self.type_tag() == other.type_tag() && self.to_values() == other.to_values()
    }

    pub fn get_report(&self, indent: usize) -> String {
        with_list!(self, list => list.get_report(indent))
    }

    /// Loose ordering of containers: by length.
    pub fn compare(&self, other: &TypedContainer) -> Ordering {
        self.len().cmp(&other.len())
    }

    pub fn as_number_list(&self) -> Option<&NumberList> {
        match self {
            TypedContainer::NumberList(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_string_list(&self) -> Option<&StringList> {
        match self {
            TypedContainer::StringList(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            TypedContainer::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_number_table(&self) -> Option<&NumberTable> {
        match self {
            TypedContainer::NumberTable(table) => Some(table),
            _ => None,
        }
    }

    /// Any table kind viewed as a plain `Table` of columns.
    pub fn to_table(&self) -> Option<Table> {
        match self {
            TypedContainer::Table(table) => Some(table.clone()),
            TypedContainer::NumberTable(table) => Some(table.to_table()),
            TypedContainer::PolygonList(polygons) => Some(Table::from(polygons)),
            _ => {
                warn!("{} is not a table", self.type_tag());
                None
            }
        }
    }
}

macro_rules! impl_from_list {
    ($($list:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$list> for TypedContainer {
                fn from(list: $list) -> Self {
                    TypedContainer::$variant(list)
                }
            }
        )*
    };
}

impl_from_list! {
    List => List,
    NumberList => NumberList,
    StringList => StringList,
    DateList => DateList,
    IntervalList => IntervalList,
    Polygon => Polygon,
    Table => Table,
    NumberTable => NumberTable,
    PolygonList => PolygonList,
    NodeList => NodeList,
    RelationList => RelationList,
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::{graph::Node, value::Point};

    fn mixed() -> TypedContainer {
        List::from_vec(vec![Value::from("a"), Value::from(1.0), Value::from(2.0)])
            .named("mixed")
            .into_container()
    }

    mod dispatch_tests {
        use super::*;

        #[test]
        fn test_from_values_for_every_container_tag() {
            for tag in TypeTag::ALL.into_iter().filter(TypeTag::is_container) {
                let container = TypedContainer::from_values(tag, &[], false).unwrap();
                assert_eq!(container.type_tag(), tag);
                assert!(container.is_empty());
            }
            assert!(TypedContainer::from_values(TypeTag::Number, &[], true).is_err());
        }

        #[test]
        fn test_name_round_trip() {
            let mut container = mixed();
            assert_eq!(container.name(), "mixed");
            container.set_name("renamed");
            assert_eq!(container.name(), "renamed");
        }

        #[test]
        fn test_value_at() {
            assert_eq!(mixed().value_at(1), Value::from(1.0));
            assert_eq!(mixed().value_at(9), Value::Null);
        }
    }

    mod transform_tests {
        use super::*;

        #[test]
        fn test_base_list_transforms_refine() {
            let numbers = mixed().get_filtered_by_function(|value| value.as_number().is_some());
            assert_eq!(numbers.type_tag(), TypeTag::NumberList);
            assert_eq!(numbers.name(), "mixed");

            let still_mixed = mixed().get_sorted(true);
            assert_eq!(still_mixed.type_tag(), TypeTag::List);
        }

        #[test]
        fn test_specialised_transforms_keep_kind() {
            let strings = StringList::from_vec(vec!["b".to_string(), "a".to_string()])
                .into_container();
            let sorted = strings.get_sorted(true);
            assert_eq!(sorted.type_tag(), TypeTag::StringList);
            assert_eq!(sorted.to_values(), vec![Value::from("a"), Value::from("b")]);

            let empty = strings.get_sub_list(5, 6);
            assert_eq!(empty.type_tag(), TypeTag::StringList);
        }

        #[test]
        fn test_concat_same_and_mixed_kinds() {
            let a = NumberList::from_vec(vec![1.0]).named("a").into_container();
            let b = NumberList::from_vec(vec![2.0]).into_container();
            let joined = a.concat(&b);
            assert_eq!(joined.type_tag(), TypeTag::NumberList);
            assert_eq!(joined.name(), "a");

            let strings = StringList::from_vec(vec!["x".to_string()]).into_container();
            let mixed = a.concat(&strings);
            assert_eq!(mixed.type_tag(), TypeTag::List);
            assert_eq!(mixed.len(), 2);

            let numeric_strings = List::from_vec(vec![Value::from(3.0)]).into_container();
            assert_eq!(a.concat(&numeric_strings).type_tag(), TypeTag::NumberList);
        }

        #[test]
        fn test_apply_function() {
            let points = Polygon::from_vec(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)])
                .into_container();
            let xs = points.apply_function(|point| point.property("x"));
            assert_eq!(xs.type_tag(), TypeTag::NumberList);
            assert_eq!(xs.to_values(), vec![Value::from(1.0), Value::from(3.0)]);
        }

        #[test]
        fn test_filtered_by_property_value() {
            let mut nodes = NodeList::new();
            nodes.add_node(Node::new("a", "A").with_weight(3.0)).unwrap();
            nodes.add_node(Node::new("b", "B").with_weight(1.0)).unwrap();
            let heavy = nodes.into_container().get_filtered_by_property_value(
                "weight",
                &Value::from(2.0),
                Comparison::Greater,
            );
            assert_eq!(heavy.type_tag(), TypeTag::NodeList);
            assert_eq!(heavy.len(), 1);
        }
    }

    mod mutation_tests {
        use super::*;

        #[test]
        fn test_push_value_coerces() {
            let mut numbers = NumberList::new().into_container();
            numbers.push_value(Value::from("4")).unwrap();
            assert_eq!(numbers.to_values(), vec![Value::from(4.0)]);
            assert!(matches!(
                numbers.push_value(Value::from(Point::new(0.0, 0.0))),
                Err(ListError::ElementKind { .. })
            ));
        }

        #[test]
        fn test_push_value_on_node_list_is_refused() {
            let mut nodes = NodeList::new().into_container();
            let err = nodes
                .push_value(Value::Node(Rc::new(Node::new("a", "A"))))
                .unwrap_err();
            assert!(matches!(err, ListError::InvariantViolation(_)));
            assert!(nodes.is_empty());
        }

        #[test]
        fn test_splice_returns_same_kind() {
            let mut strings = StringList::from_vec(vec!["a".to_string(), "b".to_string()])
                .into_container();
            let removed = strings.splice(0, 1, &[Value::from(7.0)]).unwrap();
            assert_eq!(removed.type_tag(), TypeTag::StringList);
            assert_eq!(strings.to_values(), vec![Value::from("7"), Value::from("b")]);
        }

        #[test]
        fn test_splice_node_list() {
            let mut nodes = NodeList::new();
            nodes.add_node(Node::new("a", "A")).unwrap();
            let mut container = nodes.into_container();
            let duplicate = Value::Node(Rc::new(Node::new("a", "again")));
            assert!(container.splice(1, 0, &[duplicate.clone()]).is_err());
            let removed = container.splice(0, 1, &[duplicate]).unwrap();
            assert_eq!(removed.type_tag(), TypeTag::NodeList);
            assert_eq!(container.value_at(0).property("name"), Value::from("again"));
        }
    }

    #[test]
    fn test_min_max_and_conversions() {
        let numbers = NumberList::from_vec(vec![3.0, f64::NAN, 1.0]).named("n").into_container();
        assert_eq!(numbers.get_min(), Some(Value::from(1.0)));
        assert_eq!(numbers.get_max(), Some(Value::from(3.0)));
        assert_eq!(numbers.to_string_list().name, "n");
        assert_eq!(mixed().to_number_list().len(), 3);
        assert_eq!(mixed().type_of_elements(), None);
    }

    #[test]
    fn test_same_elements_checks_kind() {
        let list = List::from_vec(vec![Value::from(1.0)]).into_container();
        let numbers = NumberList::from_vec(vec![1.0]).into_container();
        assert!(!list.same_elements(&numbers));
        assert!(numbers.same_elements(&numbers.clone().named("other")));
    }
}
