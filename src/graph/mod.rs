//! # Graph Elements
//!
//! [`Node`] and [`Relation`] are the identified elements held by
//! [`NodeList`] and [`RelationList`]. Both lists are the same id-indexed
//! component, [`IndexedList`], parameterised by the element type; a
//! relation list is not a node list, it only shares the machinery.
//!
//! Each node also knows the relations touching it. Adding a relation to a
//! relation list links its two endpoints, and removing it from a relation
//! list unlinks them; the links are ids, resolved against a [`NodeList`]
//! with [`NodeList::get_nodes_by_ids`].
//!
//! ```rust
//! use std::rc::Rc;
//! use listkit::{Node, NodeList, Relation, RelationList};
//!
//! let a = Rc::new(Node::new("a", "Alice"));
//! let b = Rc::new(Node::new("b", "Bob"));
//!
//! let mut nodes = NodeList::new();
//! nodes.add_node(Rc::clone(&a)).unwrap();
//! nodes.add_node(Rc::clone(&b)).unwrap();
//! assert!(nodes.add_node(Node::new("a", "Impostor")).is_err());
//!
//! let mut relations = RelationList::new();
//! relations.add_relation(Relation::between(Rc::clone(&a), Rc::clone(&b))).unwrap();
//! assert!(relations.nodes_are_connected(&b, &a, false));
//! assert!(!relations.nodes_are_connected(&b, &a, true));
//! assert_eq!(a.to_node_ids().items(), &["b"]);
//! assert_eq!(b.from_node_ids().items(), &["a"]);
//! ```

pub mod indexed;
pub mod node_list;
pub mod relation_list;

use std::{cell::RefCell, collections::BTreeMap, fmt::Debug, rc::Rc};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{containers::TypedContainer, core::TypeTag, list::StringList, value::Value};

pub use indexed::IndexedList;
pub use node_list::NodeList;
pub use relation_list::RelationList;

/// Elements stored in an [`IndexedList`]: anything with a unique id.
pub trait Identified: Debug + PartialEq {
    /// Tag of a list holding elements of this kind.
    const LIST_TAG: TypeTag;

    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn weight(&self) -> f64;

    fn properties(&self) -> &BTreeMap<String, Value>;

    /// `id`, `name`, `weight`, then the custom properties.
    fn property(&self, name: &str) -> Value {
        match name {
            "id" => Value::from(self.id()),
            "name" => Value::from(self.name()),
            "weight" => Value::Number(self.weight()),
            _ => self.properties().get(name).cloned().unwrap_or_default(),
        }
    }

    fn to_value(item: &Rc<Self>) -> Value;

    fn from_value(value: &Value) -> Option<Rc<Self>>;

    fn wrap_list(list: IndexedList<Self>) -> TypedContainer
    where
        Self: Sized;

    /// Runs when a list mutator takes the element in.
    fn attach(_item: &Rc<Self>) {}

    /// Runs when a list mutator lets the element go.
    fn detach(_item: &Rc<Self>) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Source,
    Target,
}

#[derive(Debug, Clone)]
struct Incidence {
    relation: String,
    other: String,
    end: End,
}

/// Relations touching a node, in the order they were linked.
#[derive(Debug, Clone, Default)]
struct Adjacency {
    incidences: Vec<Incidence>,
}

/// A graph vertex.
///
/// Equality compares id, name, weight and properties; the adjacency is
/// derived from relation lists and is neither compared nor serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub weight: f64,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
    #[serde(skip)]
    adjacency: RefCell<Adjacency>,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.weight == other.weight
            && self.properties == other.properties
    }
}

impl Node {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            name: name.into(),
            weight: 1.0,
            properties: BTreeMap::new(),
            adjacency: RefCell::default(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    fn link(&self, relation: &str, other: &str, end: End) {
        let mut adjacency = self.adjacency.borrow_mut();
        let linked = adjacency
            .incidences
            .iter()
            .any(|incidence| incidence.relation == relation && incidence.end == end);
        if !linked {
            adjacency.incidences.push(Incidence {
                relation: relation.to_string(),
                other: other.to_string(),
                end,
            });
        }
    }

    fn unlink(&self, relation: &str) {
        self.adjacency
            .borrow_mut()
            .incidences
            .retain(|incidence| incidence.relation != relation);
    }

    fn adjacent_ids(&self, end: Option<End>) -> StringList {
        self.adjacency
            .borrow()
            .incidences
            .iter()
            .filter(|incidence| end.is_none_or(|end| incidence.end == end))
            .map(|incidence| incidence.other.clone())
            .unique()
            .collect()
    }

    /// Ids of every node sharing a relation with this one, each once.
    pub fn node_ids(&self) -> StringList {
        self.adjacent_ids(None)
    }

    /// Ids of the nodes this one points to (it is their relation's `node0`).
    pub fn to_node_ids(&self) -> StringList {
        self.adjacent_ids(Some(End::Source))
    }

    /// Ids of the nodes pointing to this one.
    pub fn from_node_ids(&self) -> StringList {
        self.adjacent_ids(Some(End::Target))
    }

    /// Ids of the relations touching this node.
    pub fn relation_ids(&self) -> StringList {
        self.adjacency
            .borrow()
            .incidences
            .iter()
            .map(|incidence| incidence.relation.clone())
            .unique()
            .collect()
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl Identified for Node {
    const LIST_TAG: TypeTag = TypeTag::NodeList;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    fn to_value(item: &Rc<Self>) -> Value {
        Value::Node(Rc::clone(item))
    }

    fn from_value(value: &Value) -> Option<Rc<Self>> {
        match value {
            Value::Node(node) => Some(Rc::clone(node)),
            _ => None,
        }
    }

    fn wrap_list(list: IndexedList<Self>) -> TypedContainer {
        TypedContainer::NodeList(list)
    }
}

/// An edge between two nodes. `node0` is the source when direction
/// matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub node0: Rc<Node>,
    pub node1: Rc<Node>,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl Relation {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        node0: Rc<Node>,
        node1: Rc<Node>,
    ) -> Self {
        Relation {
            id: id.into(),
            name: name.into(),
            weight: 1.0,
            node0,
            node1,
            properties: BTreeMap::new(),
        }
    }

    /// A relation whose id and name are `"{node0.id}_{node1.id}"`.
    pub fn between(node0: Rc<Node>, node1: Rc<Node>) -> Self {
        let id = format!("{}_{}", node0.id, node1.id);
        Relation::new(id.clone(), id, node0, node1)
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// True when the relation joins the two nodes, in either order unless
    /// `directed`.
    pub fn connects(&self, a: &Node, b: &Node, directed: bool) -> bool {
        let forward = self.node0.id == a.id && self.node1.id == b.id;
        forward || (!directed && self.node0.id == b.id && self.node1.id == a.id)
    }

    pub fn involves(&self, node: &Node) -> bool {
        self.node0.id == node.id || self.node1.id == node.id
    }

    /// The endpoint across from `node`, if `node` is an endpoint.
    pub fn other_node(&self, node: &Node) -> Option<&Rc<Node>> {
        if self.node0.id == node.id {
            Some(&self.node1)
        } else if self.node1.id == node.id {
            Some(&self.node0)
        } else {
            None
        }
    }
}

impl Identified for Relation {
    const LIST_TAG: TypeTag = TypeTag::RelationList;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn weight(&self) -> f64 {
        self.weight
    }

    fn properties(&self) -> &BTreeMap<String, Value> {
        &self.properties
    }

    fn property(&self, name: &str) -> Value {
        match name {
            "id" => Value::from(self.id.as_str()),
            "name" => Value::from(self.name.as_str()),
            "weight" => Value::Number(self.weight),
            "node0" => Value::Node(Rc::clone(&self.node0)),
            "node1" => Value::Node(Rc::clone(&self.node1)),
            _ => self.properties.get(name).cloned().unwrap_or_default(),
        }
    }

    fn to_value(item: &Rc<Self>) -> Value {
        Value::Relation(Rc::clone(item))
    }

    fn from_value(value: &Value) -> Option<Rc<Self>> {
        match value {
            Value::Relation(relation) => Some(Rc::clone(relation)),
            _ => None,
        }
    }

    fn wrap_list(list: IndexedList<Self>) -> TypedContainer {
        TypedContainer::RelationList(list)
    }

    fn attach(relation: &Rc<Self>) {
        relation.node0.link(&relation.id, &relation.node1.id, End::Source);
        relation.node1.link(&relation.id, &relation.node0.id, End::Target);
    }

    fn detach(relation: &Rc<Self>) {
        relation.node0.unlink(&relation.id);
        relation.node1.unlink(&relation.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_properties() {
        let node = Node::new("n", "Name").with_property("group", "left");
        assert_eq!(node.property("group"), Value::from("left"));
        assert_eq!(node.property("weight"), Value::Number(1.0));
        assert_eq!(node.property("nothing"), Value::Null);
    }

    #[test]
    fn test_relation_endpoints() {
        let a = Rc::new(Node::new("a", "A"));
        let b = Rc::new(Node::new("b", "B"));
        let c = Node::new("c", "C");
        let relation = Relation::between(Rc::clone(&a), Rc::clone(&b));
        assert_eq!(relation.id, "a_b");
        assert!(relation.connects(&a, &b, true));
        assert!(relation.connects(&b, &a, false));
        assert!(!relation.connects(&b, &a, true));
        assert_eq!(relation.other_node(&b).map(|node| node.id.as_str()), Some("a"));
        assert!(relation.other_node(&c).is_none());
        assert_eq!(relation.property("node1"), Value::Node(b));
    }

    #[test]
    fn test_self_loop_is_both_directions() {
        let a = Rc::new(Node::new("a", "A"));
        let relation = Rc::new(Relation::between(Rc::clone(&a), Rc::clone(&a)));
        Relation::attach(&relation);
        Relation::attach(&relation);
        assert_eq!(a.to_node_ids().items(), &["a"]);
        assert_eq!(a.from_node_ids().items(), &["a"]);
        assert_eq!(a.relation_ids().items(), &["a_a"]);

        Relation::detach(&relation);
        assert!(a.node_ids().is_empty());
    }

    #[test]
    fn test_adjacency_is_not_part_of_equality() {
        let a = Rc::new(Node::new("a", "A"));
        let b = Rc::new(Node::new("b", "B"));
        Relation::attach(&Rc::new(Relation::between(Rc::clone(&a), b)));
        assert_eq!(*a, Node::new("a", "A"));
    }
}
