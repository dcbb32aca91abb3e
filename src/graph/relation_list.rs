use std::rc::Rc;

use super::{IndexedList, Node, NodeList, Relation};
use crate::errors::Result;

/// Relations with unique ids.
pub type RelationList = IndexedList<Relation>;

impl IndexedList<Relation> {
    /// # Errors
    ///
    /// [`crate::ListError::DuplicateId`] if the id is taken.
    pub fn add_relation(&mut self, relation: impl Into<Rc<Relation>>) -> Result<()> {
        self.add(relation)
    }

    pub fn remove_relation(&mut self, id: &str) -> Option<Rc<Relation>> {
        self.remove(id)
    }

    pub fn remove_relation_at_index(&mut self, index: usize) -> Result<Rc<Relation>> {
        self.remove_at(index)
    }

    pub fn get_relation_by_id(&self, id: &str) -> Option<&Rc<Relation>> {
        self.get_by_id(id)
    }

    /// The first relation joining `a` and `b`. Undirected unless `directed`,
    /// in which case `a` must be `node0`.
    pub fn get_first_relation_between_nodes(
        &self,
        a: &Node,
        b: &Node,
        directed: bool,
    ) -> Option<&Rc<Relation>> {
        self.iter().find(|relation| relation.connects(a, b, directed))
    }

    pub fn get_all_relations_between_nodes(&self, a: &Node, b: &Node, directed: bool) -> Self {
        self.get_filtered_by_function(|relation| relation.connects(a, b, directed))
    }

    /// Every relation with `node` as an endpoint.
    pub fn get_relations_with_node(&self, node: &Node) -> Self {
        self.get_filtered_by_function(|relation| relation.involves(node))
    }

    /// The nodes across every relation touching `node`, each once, in
    /// relation order.
    pub fn get_related_nodes_to_node(&self, node: &Node) -> NodeList {
        let mut related = NodeList::new();
        for other in self.iter().filter_map(|relation| relation.other_node(node)) {
            // repeats are refused by the index
            related.add_node(Rc::clone(other)).ok();
        }
        related
    }

    pub fn nodes_are_connected(&self, a: &Node, b: &Node, directed: bool) -> bool {
        self.get_first_relation_between_nodes(a, b, directed).is_some()
    }
}
