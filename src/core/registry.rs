//! # Type Registry
//!
//! A single [`TypeRegistry`] maps every [`TypeTag`] to a short display code
//! and to a constructor. It is built once (see [`TypeRegistry::standard`])
//! and never mutated afterwards.
//!
//! ```rust
//! use listkit::{TypeRegistry, TypeTag, Value};
//!
//! let registry = TypeRegistry::standard();
//! assert_eq!(registry.type_of(&Value::from(3.0)), TypeTag::Number);
//! assert_eq!(registry.short_name(TypeTag::NumberList), "#L");
//!
//! let list = registry
//!     .instantiate_container(TypeTag::NumberList, &[Value::from("4"), Value::from(2.0)])
//!     .unwrap();
//! assert_eq!(list.type_tag(), TypeTag::NumberList);
//! assert_eq!(list.to_values(), vec![Value::from(4.0), Value::from(2.0)]);
//! ```

use std::{collections::HashMap, rc::Rc, str::FromStr, sync::OnceLock};

use log::warn;

use crate::{
    containers::TypedContainer,
    core::TypeTag,
    errors::{ListError, Result},
    graph::{Node, Relation},
    list::List,
    value::{Interval, Point, Value, coerce},
};

/// Builds a value of the given kind from seed arguments.
pub type Constructor = fn(TypeTag, &[Value]) -> Result<Value>;

/// Process-wide mapping from type tags to short codes and constructors.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    short_names: HashMap<TypeTag, &'static str>,
    constructors: HashMap<TypeTag, Constructor>,
}

static STANDARD: OnceLock<TypeRegistry> = OnceLock::new();

impl TypeRegistry {
    /// Builds the standard registry covering every tag.
    pub fn new() -> Self {
        let short_names = HashMap::from([
            (TypeTag::Null, "Ø"),
            (TypeTag::Boolean, "b"),
            (TypeTag::Number, "#"),
            (TypeTag::String, "s"),
            (TypeTag::Date, "d"),
            (TypeTag::Point, "."),
            (TypeTag::Interval, "##"),
            (TypeTag::Node, "n"),
            (TypeTag::Relation, "r"),
            (TypeTag::Object, "{}"),
            (TypeTag::List, "L"),
            (TypeTag::NumberList, "#L"),
            (TypeTag::StringList, "sL"),
            (TypeTag::DateList, "dL"),
            (TypeTag::IntervalList, "##L"),
            (TypeTag::Polygon, ".L"),
            (TypeTag::Table, "T"),
            (TypeTag::NumberTable, "#T"),
            (TypeTag::PolygonList, ".T"),
            (TypeTag::NodeList, "nL"),
            (TypeTag::RelationList, "rL"),
        ]);

        let mut constructors: HashMap<TypeTag, Constructor> = HashMap::from([
            (TypeTag::Null, construct_null as Constructor),
            (TypeTag::Boolean, construct_boolean),
            (TypeTag::Number, construct_number),
            (TypeTag::String, construct_string),
            (TypeTag::Date, construct_date),
            (TypeTag::Point, construct_point),
            (TypeTag::Interval, construct_interval),
            (TypeTag::Node, construct_node),
            (TypeTag::Relation, construct_relation),
            (TypeTag::Object, construct_object),
        ]);
        for tag in TypeTag::ALL.into_iter().filter(TypeTag::is_container) {
            constructors.insert(tag, construct_container);
        }

        TypeRegistry {
            short_names,
            constructors,
        }
    }

    /// The shared registry, built on first use.
    pub fn standard() -> &'static TypeRegistry {
        STANDARD.get_or_init(TypeRegistry::new)
    }

    /// Classifies any value. Total: never fails.
    pub fn type_of(&self, value: &Value) -> TypeTag {
        value.type_tag()
    }

    /// Short display code for a tag (`#L` for `NumberList`).
    pub fn short_name(&self, tag: TypeTag) -> &'static str {
        self.short_names.get(&tag).copied().unwrap_or("?")
    }

    /// Reverse lookup of [`TypeRegistry::short_name`].
    pub fn tag_for_short_name(&self, short_name: &str) -> Option<TypeTag> {
        self.short_names
            .iter()
            .find(|(_, name)| **name == short_name)
            .map(|(tag, _)| *tag)
    }

    /// Constructs a fresh value of the given kind, seeded by `args`.
    ///
    /// For container tags the arguments become the elements (coerced to the
    /// container's element kind). For primitives the first argument, when
    /// present, is coerced into the new value.
    pub fn instantiate(&self, tag: TypeTag, args: &[Value]) -> Result<Value> {
        let constructor = self
            .constructors
            .get(&tag)
            .ok_or(ListError::NotInstantiable(tag))?;
        constructor(tag, args)
    }

    /// Like [`TypeRegistry::instantiate`], starting from a type name.
    pub fn instantiate_by_name(&self, name: &str, args: &[Value]) -> Result<Value> {
        let tag = TypeTag::from_str(name)?;
        self.instantiate(tag, args)
    }

    /// Constructs a container of the given kind.
    pub fn instantiate_container(&self, tag: TypeTag, args: &[Value]) -> Result<TypedContainer> {
        if !tag.is_container() {
            return Err(ListError::NotInstantiable(tag));
        }
        TypedContainer::from_values(tag, args, true)
    }

    /// Constructs a container of the same kind as `container`.
    ///
    /// Never fails: when the arguments cannot live in that kind, the result
    /// falls back to a base `List` holding them unchanged.
    pub fn instantiate_with_same_type(
        &self,
        container: &TypedContainer,
        args: &[Value],
    ) -> TypedContainer {
        let tag = container.type_tag();
        self.instantiate_container(tag, args)
            .unwrap_or_else(|err| {
                warn!("Cannot instantiate {} ({}), falling back to List", tag, err);
                TypedContainer::List(List::from_vec(args.to_vec()))
            })
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Classifies a value using the standard registry.
pub fn type_of(value: &Value) -> TypeTag {
    TypeRegistry::standard().type_of(value)
}

/// Constructs a value with the standard registry.
pub fn instantiate(tag: TypeTag, args: &[Value]) -> Result<Value> {
    TypeRegistry::standard().instantiate(tag, args)
}

/// Constructs a container of the same kind with the standard registry.
pub fn instantiate_with_same_type(container: &TypedContainer, args: &[Value]) -> TypedContainer {
    TypeRegistry::standard().instantiate_with_same_type(container, args)
}

fn number_arg(args: &[Value], index: usize) -> f64 {
    args.get(index).map(coerce::to_number).unwrap_or(0.0)
}

fn construct_null(_: TypeTag, _: &[Value]) -> Result<Value> {
    Ok(Value::Null)
}

fn construct_boolean(_: TypeTag, args: &[Value]) -> Result<Value> {
    Ok(Value::Boolean(args.first().is_some_and(coerce::is_truthy)))
}

fn construct_number(_: TypeTag, args: &[Value]) -> Result<Value> {
    Ok(Value::Number(number_arg(args, 0)))
}

fn construct_string(_: TypeTag, args: &[Value]) -> Result<Value> {
    Ok(Value::String(
        args.first().map(coerce::to_string).unwrap_or_default(),
    ))
}

fn construct_date(_: TypeTag, args: &[Value]) -> Result<Value> {
    match args.first() {
        None => Ok(Value::Date(chrono::Utc::now().naive_utc())),
        Some(seed) => coerce::to_date(seed, &Default::default())
            .map(Value::Date)
            .ok_or_else(|| ListError::InvalidDate(coerce::to_string(seed))),
    }
}

fn construct_point(_: TypeTag, args: &[Value]) -> Result<Value> {
    Ok(Value::Point(Point::new(number_arg(args, 0), number_arg(args, 1))))
}

fn construct_interval(_: TypeTag, args: &[Value]) -> Result<Value> {
    Ok(Value::Interval(Interval::new(
        number_arg(args, 0),
        number_arg(args, 1),
    )))
}

fn construct_node(_: TypeTag, args: &[Value]) -> Result<Value> {
    let id = args
        .first()
        .map(coerce::to_string)
        .ok_or(ListError::NotInstantiable(TypeTag::Node))?;
    let name = args.get(1).map(coerce::to_string).unwrap_or_else(|| id.clone());
    Ok(Value::Node(Rc::new(Node::new(id, name))))
}

fn construct_relation(_: TypeTag, args: &[Value]) -> Result<Value> {
    match args {
        [id, name, Value::Node(node0), Value::Node(node1), ..] => Ok(Value::Relation(Rc::new(
            Relation::new(
                coerce::to_string(id),
                coerce::to_string(name),
                Rc::clone(node0),
                Rc::clone(node1),
            ),
        ))),
        _ => Err(ListError::NotInstantiable(TypeTag::Relation)),
    }
}

fn construct_object(_: TypeTag, _: &[Value]) -> Result<Value> {
    Ok(Value::Object(Default::default()))
}

fn construct_container(tag: TypeTag, args: &[Value]) -> Result<Value> {
    TypedContainer::from_values(tag, args, true).map(Value::from)
}
