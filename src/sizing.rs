use crate::graph::GraphStore;

pub const MIN_SIZE: f32 = 3.0;
pub const MAX_SIZE: f32 = 30.0;

/// Degree-normalized visual size. Runs after every structural mutation,
/// never as a side effect of a filter change. When every node has the
/// same degree (including the single-node case) the normalization span
/// is zero and every node gets MIN_SIZE instead of a NaN.
pub fn recompute_sizes(store: &mut GraphStore) {
    if store.node_count() == 0 {
        return;
    }

    let degrees = store.degrees();
    let mut min_degree = usize::MAX;
    let mut max_degree = 0usize;
    for &degree in &degrees {
        min_degree = min_degree.min(degree);
        max_degree = max_degree.max(degree);
    }

    let span = max_degree - min_degree;
    for (node, &degree) in store.nodes_mut().iter_mut().zip(&degrees) {
        node.size = if span == 0 {
            MIN_SIZE
        } else {
            (degree - min_degree) as f32 / span as f32 * (MAX_SIZE - MIN_SIZE) + MIN_SIZE
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphStore, test_node};

    fn sizes(store: &GraphStore) -> Vec<f32> {
        store.nodes().iter().map(|node| node.size).collect()
    }

    #[test]
    fn extremes_map_to_min_and_max() {
        let mut store = GraphStore::new();
        for id in ["a", "b", "c"] {
            store
                .add_node(test_node(id, "page", "example.com"))
                .expect("fresh id");
        }
        store.add_edge("a", "b").expect("new edge");
        store.add_edge("a", "c").expect("new edge");

        recompute_sizes(&mut store);
        assert_eq!(sizes(&store), vec![MAX_SIZE, MIN_SIZE, MIN_SIZE]);
    }

    #[test]
    fn uniform_degrees_fall_back_to_min_size() {
        let mut store = GraphStore::new();
        for id in ["a", "b"] {
            store
                .add_node(test_node(id, "page", "example.com"))
                .expect("fresh id");
        }
        store.add_edge("a", "b").expect("new edge");

        recompute_sizes(&mut store);
        assert_eq!(sizes(&store), vec![MIN_SIZE, MIN_SIZE]);
    }

    #[test]
    fn single_node_gets_min_size() {
        let mut store = GraphStore::new();
        store
            .add_node(test_node("only", "page", "example.com"))
            .expect("fresh id");

        recompute_sizes(&mut store);
        assert_eq!(sizes(&store), vec![MIN_SIZE]);
    }
}
