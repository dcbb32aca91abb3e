use std::rc::Rc;

use super::{IndexedList, Node};
use crate::errors::Result;

/// Nodes with unique ids.
pub type NodeList = IndexedList<Node>;

impl IndexedList<Node> {
    /// # Errors
    ///
    /// [`crate::ListError::DuplicateId`] if the id is taken.
    pub fn add_node(&mut self, node: impl Into<Rc<Node>>) -> Result<()> {
        self.add(node)
    }

    pub fn remove_node(&mut self, id: &str) -> Option<Rc<Node>> {
        self.remove(id)
    }

    pub fn remove_node_at_index(&mut self, index: usize) -> Result<Rc<Node>> {
        self.remove_at(index)
    }

    pub fn get_node_by_id(&self, id: &str) -> Option<&Rc<Node>> {
        self.get_by_id(id)
    }

    /// Linear scan.
    pub fn get_node_by_name(&self, name: &str) -> Option<&Rc<Node>> {
        self.get_by_name(name)
    }

    /// The nodes holding `ids`, in that order. Unknown and repeated ids are
    /// skipped.
    pub fn get_nodes_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> NodeList {
        let mut nodes = NodeList::new();
        for node in ids.iter().filter_map(|id| self.get_node_by_id(id.as_ref())) {
            nodes.add_node(Rc::clone(node)).ok();
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id_and_name() {
        let mut nodes = NodeList::new();
        nodes.add_node(Node::new("1", "one")).unwrap();
        nodes.add_node(Node::new("2", "two")).unwrap();
        assert_eq!(nodes.get_node_by_id("2").unwrap().name, "two");
        assert_eq!(nodes.get_node_by_name("one").unwrap().id, "1");
        assert!(nodes.get_node_by_name("three").is_none());
    }

    #[test]
    fn test_removal_updates_lookup() {
        let mut nodes = NodeList::new();
        nodes.add_node(Node::new("1", "one")).unwrap();
        nodes.add_node(Node::new("2", "two")).unwrap();
        assert_eq!(nodes.remove_node_at_index(0).unwrap().id, "1");
        assert!(nodes.get_node_by_id("1").is_none());
        assert!(nodes.remove_node("2").is_some());
        assert!(nodes.is_empty());
    }
}
