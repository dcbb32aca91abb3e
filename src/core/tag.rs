//! # Type Tags
//!
//! Every value and container reports a [`TypeTag`]: a semantic category that
//! is independent of the Rust type holding the data. Primitive tags render in
//! lower case (`number`, `string`, `boolean`, `date`, `null`); domain objects
//! and containers render with their type name (`Point`, `NumberList`, `Table`).
//!
//! ```rust
//! use listkit::TypeTag;
//! use std::str::FromStr;
//!
//! assert_eq!(TypeTag::Number.to_string(), "number");
//! assert_eq!(TypeTag::from_str("NumberTable").unwrap(), TypeTag::NumberTable);
//! assert_eq!(TypeTag::Number.list_tag(), Some(TypeTag::NumberList));
//! assert!(TypeTag::from_str("Spreadsheet").is_err());
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ListError;

/// Semantic category of a value or container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeTag {
    Null,
    Boolean,
    Number,
    String,
    Date,
    Point,
    Interval,
    Node,
    Relation,
    /// Property bag, or anything without a more specific tag.
    Object,
    List,
    NumberList,
    StringList,
    DateList,
    IntervalList,
    Polygon,
    Table,
    NumberTable,
    PolygonList,
    NodeList,
    RelationList,
}

impl TypeTag {
    /// Every tag, primitives first.
    pub const ALL: [TypeTag; 21] = [
        TypeTag::Null,
        TypeTag::Boolean,
        TypeTag::Number,
        TypeTag::String,
        TypeTag::Date,
        TypeTag::Point,
        TypeTag::Interval,
        TypeTag::Node,
        TypeTag::Relation,
        TypeTag::Object,
        TypeTag::List,
        TypeTag::NumberList,
        TypeTag::StringList,
        TypeTag::DateList,
        TypeTag::IntervalList,
        TypeTag::Polygon,
        TypeTag::Table,
        TypeTag::NumberTable,
        TypeTag::PolygonList,
        TypeTag::NodeList,
        TypeTag::RelationList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Date => "date",
            TypeTag::Point => "Point",
            TypeTag::Interval => "Interval",
            TypeTag::Node => "Node",
            TypeTag::Relation => "Relation",
            TypeTag::Object => "Object",
            TypeTag::List => "List",
            TypeTag::NumberList => "NumberList",
            TypeTag::StringList => "StringList",
            TypeTag::DateList => "DateList",
            TypeTag::IntervalList => "IntervalList",
            TypeTag::Polygon => "Polygon",
            TypeTag::Table => "Table",
            TypeTag::NumberTable => "NumberTable",
            TypeTag::PolygonList => "PolygonList",
            TypeTag::NodeList => "NodeList",
            TypeTag::RelationList => "RelationList",
        }
    }

    /// True for tags whose values are containers (every element-holding kind).
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            TypeTag::List
                | TypeTag::NumberList
                | TypeTag::StringList
                | TypeTag::DateList
                | TypeTag::IntervalList
                | TypeTag::Polygon
                | TypeTag::Table
                | TypeTag::NumberTable
                | TypeTag::PolygonList
                | TypeTag::NodeList
                | TypeTag::RelationList
        )
    }

    /// True for tags whose elements are themselves containers.
    pub fn is_table(&self) -> bool {
        matches!(
            self,
            TypeTag::Table | TypeTag::NumberTable | TypeTag::PolygonList
        )
    }

    /// The refined container tag for a homogeneous sequence of `self`.
    ///
    /// This is the fixed refinement table: `number` → `NumberList`,
    /// `NumberList` → `NumberTable`, `Polygon` → `PolygonList`, any other
    /// container → `Table`. Booleans, nulls and plain objects have no
    /// specialised list and return `None`.
    pub fn list_tag(&self) -> Option<TypeTag> {
        match self {
            TypeTag::Number => Some(TypeTag::NumberList),
            TypeTag::String => Some(TypeTag::StringList),
            TypeTag::Date => Some(TypeTag::DateList),
            TypeTag::Point => Some(TypeTag::Polygon),
            TypeTag::Interval => Some(TypeTag::IntervalList),
            TypeTag::Node => Some(TypeTag::NodeList),
            TypeTag::Relation => Some(TypeTag::RelationList),
            TypeTag::NumberList => Some(TypeTag::NumberTable),
            TypeTag::Polygon => Some(TypeTag::PolygonList),
            tag if tag.is_container() => Some(TypeTag::Table),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = ListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s {
            "Null" => TypeTag::Null,
            "Boolean" => TypeTag::Boolean,
            "Number" => TypeTag::Number,
            "String" => TypeTag::String,
            "Date" => TypeTag::Date,
            other => TypeTag::ALL
                .into_iter()
                .find(|tag| tag.as_str() == other)
                .ok_or_else(|| ListError::UnknownType(other.to_string()))?,
        };
        Ok(tag)
    }
}
