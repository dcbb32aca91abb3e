//! # Refinement
//!
//! A base `List` inspects the kind of every element and, when they agree,
//! becomes the matching specialised container (see [`TypeTag::list_tag`]).
//! Lists of containers become tables, and tables refine each of their
//! columns before deciding whether they can be a `NumberTable` or a
//! `PolygonList`. Refinement never touches the receiver.

use log::{debug, warn};

use crate::{
    containers::TypedContainer,
    core::TypeTag,
    list::{List, NumberTable, PolygonList, Table},
};

impl List {
    /// The most specific container for the current elements, under the same
    /// name.
    ///
    /// Empty and heterogeneous lists come back as a base `List` with their
    /// elements in order. Elements that are all containers, of whatever
    /// kinds, produce a table.
    ///
    /// ```rust
    /// use listkit::{List, TypeTag, Value};
    ///
    /// let numbers = List::from_vec(vec![Value::from(1.0), Value::from(2.0)]);
    /// assert_eq!(numbers.get_improved().type_tag(), TypeTag::NumberList);
    ///
    /// let mixed = List::from_vec(vec![Value::from(1.0), Value::from("a")]);
    /// assert_eq!(mixed.get_improved().type_tag(), TypeTag::List);
    /// ```
    pub fn get_improved(&self) -> TypedContainer {
        if self.is_empty() {
            return self.clone().into_container();
        }

        let columns: Option<Vec<TypedContainer>> = self
            .iter()
            .map(|value| value.as_container().cloned())
            .collect();
        if let Some(columns) = columns {
            return refine_columns(&self.name, columns);
        }

        let Some(tag) = self.type_of_elements().and_then(|kind| kind.list_tag()) else {
            return self.clone().into_container();
        };
        match TypedContainer::from_values(tag, self.items(), false) {
            Ok(refined) => {
                debug!("refined list '{}' of {} elements to {}", self.name, self.len(), tag);
                refined.named(&self.name)
            }
            Err(err) => {
                // a node list with repeated ids, for instance
                warn!("list '{}' stays unrefined: {}", self.name, err);
                self.clone().into_container()
            }
        }
    }
}

impl Table {
    /// Refines every column, then the table itself.
    pub fn get_improved(&self) -> TypedContainer {
        refine_columns(&self.name, self.items().to_vec())
    }
}

/// Builds the most specific table for `columns`, refining each column first.
///
/// All numeric columns give a `NumberTable`, all polygons a `PolygonList`,
/// anything else a plain `Table`.
pub fn refine_columns(name: &str, columns: Vec<TypedContainer>) -> TypedContainer {
    let columns: Vec<TypedContainer> = columns.into_iter().map(TypedContainer::improved).collect();
    if columns.is_empty() {
        return Table::new().named(name).into_container();
    }

    let shared = columns
        .iter()
        .all(|column| column.type_tag() == columns[0].type_tag())
        .then(|| columns[0].type_tag());

    match shared {
        Some(TypeTag::NumberList) => {
            debug!("refined table '{}' to NumberTable", name);
            columns
                .into_iter()
                .filter_map(|column| match column {
                    TypedContainer::NumberList(list) => Some(list),
                    _ => None,
                })
                .collect::<NumberTable>()
                .named(name)
                .into_container()
        }
        Some(TypeTag::Polygon) => {
            debug!("refined table '{}' to PolygonList", name);
            columns
                .into_iter()
                .filter_map(|column| match column {
                    TypedContainer::Polygon(polygon) => Some(polygon),
                    _ => None,
                })
                .collect::<PolygonList>()
                .named(name)
                .into_container()
        }
        _ => Table::from_vec(columns).named(name).into_container(),
    }
}
