use log::warn;

use crate::color::type_color;
use crate::document::CrawlerEntry;
use crate::graph::{GraphNode, GraphStore};
use crate::hostname::extract_hostname;
use crate::jitter::stable_pair;
use crate::sizing::MIN_SIZE;

pub struct IngestOutcome {
    pub store: GraphStore,
    /// Human-readable structural errors, one per failed row. Ingestion
    /// never aborts the batch; the worst outcome is a partial graph
    /// plus this list.
    pub errors: Vec<String>,
}

/// Two passes over the entries: first all nodes, then all edges, so a
/// child appearing before its parent in the document still links up.
pub fn ingest(entries: &[CrawlerEntry]) -> IngestOutcome {
    let mut store = GraphStore::new();
    let mut errors = Vec::new();

    for entry in entries {
        let Some(id) = entry.node_id() else {
            warn!("skipping crawl entry without an id (title {:?})", entry.title);
            continue;
        };

        let node_type = entry.type_or_default().to_string();
        let (x, y) = stable_pair(id);
        let node = GraphNode {
            id: id.to_string(),
            label: entry.title.clone(),
            domain: extract_hostname(&entry.source),
            source: entry.source.clone(),
            color: type_color(&node_type).to_string(),
            node_type,
            x,
            y,
            size: MIN_SIZE,
            hidden: false,
            entry: entry.fields(),
        };

        if let Err(error) = store.add_node(node) {
            errors.push(error.to_string());
        }
    }

    for entry in entries {
        let Some(child_id) = entry.node_id() else {
            continue;
        };
        // No parent, or a null/absent parent id, is normal: no edge.
        let Some(parent_id) = entry.parent_id() else {
            continue;
        };

        if let Err(error) = store.add_edge(parent_id, child_id) {
            errors.push(error.to_string());
        }
    }

    IngestOutcome { store, errors }
}
