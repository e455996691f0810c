use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::error::StructuralError;

/// One node of the crawl graph. `domain` is derived from `source` once
/// at ingestion and never changes afterwards; `size` and `hidden` are
/// recomputed by the sizing and filter passes.
#[derive(Clone, Debug)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub node_type: String,
    pub source: String,
    pub domain: String,
    pub color: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub hidden: bool,
    /// Original entry fields, retained for detail display.
    pub entry: Map<String, Value>,
}

/// Directed graph, single source of truth for the session. Nodes keep
/// insertion order (circular layout depends on it being stable); at
/// most one edge exists per ordered pair.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    nodes: Vec<GraphNode>,
    index_by_id: HashMap<String, usize>,
    edges: Vec<(usize, usize)>,
    edge_set: HashSet<(usize, usize)>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [GraphNode] {
        &mut self.nodes
    }

    /// Edges as (parent index, child index) pairs into `nodes()`.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn add_node(&mut self, node: GraphNode) -> Result<(), StructuralError> {
        if self.index_by_id.contains_key(&node.id) {
            return Err(StructuralError::DuplicateNode(node.id));
        }

        self.index_by_id.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    pub fn add_edge(&mut self, parent_id: &str, child_id: &str) -> Result<(), StructuralError> {
        if parent_id == child_id {
            return Err(StructuralError::SelfLoop(parent_id.to_string()));
        }

        let parent = self
            .index_of(parent_id)
            .ok_or_else(|| StructuralError::MissingEndpoint(parent_id.to_string()))?;
        let child = self
            .index_of(child_id)
            .ok_or_else(|| StructuralError::MissingEndpoint(child_id.to_string()))?;

        if !self.edge_set.insert((parent, child)) {
            return Err(StructuralError::DuplicateEdge {
                parent: parent_id.to_string(),
                child: child_id.to_string(),
            });
        }

        self.edges.push((parent, child));
        Ok(())
    }

    /// Degree per node, incident edges counted in both directions.
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0usize; self.nodes.len()];
        for &(parent, child) in &self.edges {
            degrees[parent] += 1;
            degrees[child] += 1;
        }
        degrees
    }
}

#[cfg(test)]
pub(crate) fn test_node(id: &str, node_type: &str, domain: &str) -> GraphNode {
    GraphNode {
        id: id.to_string(),
        label: id.to_string(),
        node_type: node_type.to_string(),
        source: format!("https://{domain}/{id}"),
        domain: domain.to_string(),
        color: crate::color::type_color(node_type).to_string(),
        x: 0.0,
        y: 0.0,
        size: 0.0,
        hidden: false,
        entry: Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_store() -> GraphStore {
        let mut store = GraphStore::new();
        for id in ["a", "b", "c"] {
            store
                .add_node(test_node(id, "page", "example.com"))
                .expect("fresh id");
        }
        store
    }

    #[test]
    fn rejects_duplicate_node_ids() {
        let mut store = abc_store();
        assert_eq!(
            store.add_node(test_node("a", "pdf", "example.org")),
            Err(StructuralError::DuplicateNode("a".to_string()))
        );
        assert_eq!(store.node_count(), 3);
    }

    #[test]
    fn rejects_self_loops_and_duplicate_edges() {
        let mut store = abc_store();
        assert!(store.add_edge("a", "b").is_ok());
        assert_eq!(
            store.add_edge("a", "b"),
            Err(StructuralError::DuplicateEdge {
                parent: "a".to_string(),
                child: "b".to_string(),
            })
        );
        assert_eq!(
            store.add_edge("c", "c"),
            Err(StructuralError::SelfLoop("c".to_string()))
        );
        assert_eq!(
            store.add_edge("a", "ghost"),
            Err(StructuralError::MissingEndpoint("ghost".to_string()))
        );
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn degrees_count_both_directions() {
        let mut store = abc_store();
        store.add_edge("a", "b").expect("new edge");
        store.add_edge("a", "c").expect("new edge");
        assert_eq!(store.degrees(), vec![2, 1, 1]);
    }
}
