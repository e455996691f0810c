use std::collections::HashSet;

use serde::Serialize;

use crate::color::{string_color, type_color};
use crate::document::CrawlerEntry;
use crate::graph::GraphStore;

/// One toggle-able classification key with its display label and color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FacetDescriptor {
    pub key: String,
    pub label: String,
    pub color: String,
}

/// Immutable-after-load summary of a document: the two facet lists plus
/// the raw entries retained for detail lookup.
#[derive(Clone, Debug)]
pub struct Dataset {
    pub types: Vec<FacetDescriptor>,
    pub domains: Vec<FacetDescriptor>,
    pub entries: Vec<CrawlerEntry>,
}

/// Single walk over the store deriving both facet lists, ordered by
/// first appearance. Type colors come from the fixed palette, domain
/// colors from the string hash so a domain keeps its color across
/// loads.
pub fn classify_store(store: &GraphStore) -> (Vec<FacetDescriptor>, Vec<FacetDescriptor>) {
    let mut types = Vec::new();
    let mut domains = Vec::new();
    let mut seen_types = HashSet::new();
    let mut seen_domains = HashSet::new();

    for node in store.nodes() {
        if seen_types.insert(node.node_type.clone()) {
            types.push(FacetDescriptor {
                key: node.node_type.clone(),
                label: node.node_type.clone(),
                color: type_color(&node.node_type).to_string(),
            });
        }
        if seen_domains.insert(node.domain.clone()) {
            domains.push(FacetDescriptor {
                key: node.domain.clone(),
                label: node.domain.clone(),
                color: string_color(&node.domain),
            });
        }
    }

    (types, domains)
}
