//! # listkit
//!
//! Typed list and table containers that refine themselves from their
//! content. A heterogeneous [`List`] of values inspects its elements and
//! becomes the most specific container they justify ([`NumberList`],
//! [`StringList`], [`Table`], [`NumberTable`], [`NodeList`], ...), and
//! every transform on a refined container keeps its kind.
//!
//! ```rust
//! use listkit::{List, TypeTag, Value};
//!
//! let raw = List::from_vec(vec![Value::from(3.0), Value::from(1.0), Value::from(2.0)]);
//! let refined = raw.get_improved();
//! assert_eq!(refined.type_tag(), TypeTag::NumberList);
//!
//! let numbers = refined.as_number_list().unwrap();
//! assert_eq!(numbers.get_median(), Some(2.0));
//! ```

pub mod containers;
pub mod core;
#[cfg(feature = "encoding")]
pub mod encoding;
pub mod errors;
pub mod graph;
pub mod list;
pub mod table;
pub mod types;
pub mod validation_utils;
pub mod value;

#[cfg(test)]
mod test_utils;

pub use crate::containers::{Container, ContainerMut, TypedContainer};
pub use crate::core::{TypeRegistry, TypeTag, instantiate, instantiate_with_same_type, type_of};
pub use crate::errors::{ListError, Result};
pub use crate::graph::{IndexedList, Node, NodeList, Relation, RelationList};
pub use crate::list::{
    DateList, Element, IntervalList, List, NumberList, NumberTable, Polygon, PolygonList,
    StringList, Table, TypedList,
};
pub use crate::value::{DateConvention, DateFormat, Interval, Point, Value};
