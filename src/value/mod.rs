//! # Element Values
//!
//! [`Value`] is the element kind taxonomy: every element a container can
//! hold, including other containers. [`Value::type_tag`] is the `typeOf`
//! classifier: total, and `Null`-aware so that absent cells are reported
//! rather than skipped.
//!
//! ```rust
//! use listkit::{TypeTag, Value};
//!
//! assert_eq!(Value::from(1.5).type_tag(), TypeTag::Number);
//! assert_eq!(Value::from("a").type_tag(), TypeTag::String);
//! assert_eq!(Value::Null.type_tag(), TypeTag::Null);
//! ```

pub mod coerce;
pub mod date;
pub mod geometry;

use std::{cmp::Ordering, collections::BTreeMap, rc::Rc};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    containers::TypedContainer,
    core::TypeTag,
    graph::{Identified, Node, Relation},
};

pub use date::{DateConvention, DateFormat};
pub use geometry::{Interval, Point};

/// Any element a container can hold.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Date(NaiveDateTime),
    Point(Point),
    Interval(Interval),
    Node(Rc<Node>),
    Relation(Rc<Relation>),
    /// Property bag.
    Object(BTreeMap<String, Value>),
    /// A nested container (a table column, a list of lists).
    Container(Box<TypedContainer>),
}

impl Value {
    /// The semantic tag of this value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Null => TypeTag::Null,
            Value::Boolean(_) => TypeTag::Boolean,
            Value::Number(_) => TypeTag::Number,
            Value::String(_) => TypeTag::String,
            Value::Date(_) => TypeTag::Date,
            Value::Point(_) => TypeTag::Point,
            Value::Interval(_) => TypeTag::Interval,
            Value::Node(_) => TypeTag::Node,
            Value::Relation(_) => TypeTag::Relation,
            Value::Object(_) => TypeTag::Object,
            Value::Container(container) => container.type_tag(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&NaiveDateTime> {
        match self {
            Value::Date(date) => Some(date),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&TypedContainer> {
        match self {
            Value::Container(container) => Some(container),
            _ => None,
        }
    }

    /// Reads a named property.
    ///
    /// Objects look the key up; nodes and relations expose `id`, `name`,
    /// `weight` and their custom properties; points and intervals expose `x`
    /// and `y`; containers expose `name`, `length` and `type`. Anything
    /// missing reads as `Null`.
    pub fn property(&self, name: &str) -> Value {
        match (self, name) {
            (Value::Object(properties), _) => properties.get(name).cloned().unwrap_or_default(),
            (Value::Node(node), _) => node.property(name),
            (Value::Relation(relation), _) => relation.property(name),
            (Value::Point(point), "x") => Value::Number(point.x),
            (Value::Point(point), "y") => Value::Number(point.y),
            (Value::Interval(interval), "x") => Value::Number(interval.x),
            (Value::Interval(interval), "y") => Value::Number(interval.y),
            (Value::Container(container), "name") => Value::String(container.name().to_string()),
            (Value::Container(container), "length") => Value::Number(container.len() as f64),
            (Value::Container(container), "type") => {
                Value::String(container.type_tag().to_string())
            }
            _ => Value::Null,
        }
    }

    /// Display name, for values that carry one.
    pub fn name(&self) -> Option<String> {
        match self {
            Value::Node(node) => Some(node.name.clone()),
            Value::Relation(relation) => Some(relation.name.clone()),
            Value::Container(container) => Some(container.name().to_string()),
            Value::Object(properties) => properties
                .get("name")
                .map(coerce::to_string),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Number(_) => 2,
            Value::String(_) => 3,
            Value::Date(_) => 4,
            Value::Point(_) => 5,
            Value::Interval(_) => 6,
            Value::Node(_) => 7,
            Value::Relation(_) => 8,
            Value::Object(_) => 9,
            Value::Container(_) => 10,
        }
    }

    /// Loose total ordering used by generic sorting.
    ///
    /// Values of the same kind compare naturally (numbers numerically with
    /// `NaN` last, strings lexically, dates chronologically, points by `x`
    /// then `y`, nodes by id, containers by length). Values of different
    /// kinds order by kind: null, boolean, number, string, date, and so on.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Point(a), Value::Point(b)) => a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)),
            (Value::Interval(a), Value::Interval(b)) => {
                a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
            }
            (Value::Node(a), Value::Node(b)) => a.id.cmp(&b.id),
            (Value::Relation(a), Value::Relation(b)) => a.id.cmp(&b.id),
            (Value::Container(a), Value::Container(b)) => a.len().cmp(&b.len()),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(date: NaiveDateTime) -> Self {
        Value::Date(date)
    }
}

impl From<Point> for Value {
    fn from(point: Point) -> Self {
        Value::Point(point)
    }
}

impl From<Interval> for Value {
    fn from(interval: Interval) -> Self {
        Value::Interval(interval)
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(Rc::new(node))
    }
}

impl From<Rc<Node>> for Value {
    fn from(node: Rc<Node>) -> Self {
        Value::Node(node)
    }
}

impl From<Relation> for Value {
    fn from(relation: Relation) -> Self {
        Value::Relation(Rc::new(relation))
    }
}

impl From<Rc<Relation>> for Value {
    fn from(relation: Rc<Relation>) -> Self {
        Value::Relation(relation)
    }
}

impl From<TypedContainer> for Value {
    fn from(container: TypedContainer) -> Self {
        Value::Container(Box::new(container))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
