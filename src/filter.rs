use std::collections::HashMap;

use crate::facet::FacetDescriptor;
use crate::graph::GraphStore;

/// Two facet-selection maps, one per facet kind. Seeded with every
/// facet explicitly enabled when a dataset is computed; every later
/// mutation is normalized back into a full boolean map, so "key absent"
/// never leaks to consumers as a third state.
#[derive(Clone, Debug, Default)]
pub struct FilterState {
    types: HashMap<String, bool>,
    domains: HashMap<String, bool>,
}

impl FilterState {
    pub fn all_enabled(types: &[FacetDescriptor], domains: &[FacetDescriptor]) -> Self {
        Self {
            types: types.iter().map(|f| (f.key.clone(), true)).collect(),
            domains: domains.iter().map(|f| (f.key.clone(), true)).collect(),
        }
    }

    pub fn toggle_type(&mut self, key: &str) {
        toggle(&mut self.types, key);
    }

    pub fn toggle_domain(&mut self, key: &str) {
        toggle(&mut self.domains, key);
    }

    pub fn set_types(&mut self, selection: &HashMap<String, bool>) {
        normalize_into(&mut self.types, selection);
    }

    pub fn set_domains(&mut self, selection: &HashMap<String, bool>) {
        normalize_into(&mut self.domains, selection);
    }

    pub fn type_enabled(&self, key: &str) -> bool {
        self.types.get(key).copied().unwrap_or(false)
    }

    pub fn domain_enabled(&self, key: &str) -> bool {
        self.domains.get(key).copied().unwrap_or(false)
    }

    pub fn types(&self) -> &HashMap<String, bool> {
        &self.types
    }

    pub fn domains(&self) -> &HashMap<String, bool> {
        &self.domains
    }
}

fn toggle(selection: &mut HashMap<String, bool>, key: &str) {
    let enabled = selection.get(key).copied().unwrap_or(false);
    selection.insert(key.to_string(), !enabled);
}

// Known keys take the provided value (absent means disabled); keys the
// caller introduces are carried over as given.
fn normalize_into(target: &mut HashMap<String, bool>, selection: &HashMap<String, bool>) {
    for (key, enabled) in target.iter_mut() {
        *enabled = selection.get(key).copied().unwrap_or(false);
    }
    for (key, enabled) in selection {
        target.entry(key.clone()).or_insert(*enabled);
    }
}

/// Full O(nodes) visibility pass, deliberately non-incremental: crawl
/// graphs are small enough that recomputing everything per toggle is
/// cheap and leaves no room for stale hidden flags.
pub fn apply_filters(filters: &FilterState, store: &mut GraphStore) {
    for node in store.nodes_mut() {
        node.hidden =
            !filters.type_enabled(&node.node_type) || !filters.domain_enabled(&node.domain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facet::classify_store;
    use crate::graph::{GraphStore, test_node};

    fn mixed_store() -> GraphStore {
        let mut store = GraphStore::new();
        store
            .add_node(test_node("a", "page", "example.com"))
            .expect("fresh id");
        store
            .add_node(test_node("b", "pdf", "example.com"))
            .expect("fresh id");
        store
            .add_node(test_node("c", "page", "other.example"))
            .expect("fresh id");
        store
    }

    fn hidden_flags(store: &GraphStore) -> Vec<bool> {
        store.nodes().iter().map(|node| node.hidden).collect()
    }

    #[test]
    fn seeded_filters_hide_nothing() {
        let mut store = mixed_store();
        let (types, domains) = classify_store(&store);
        let filters = FilterState::all_enabled(&types, &domains);

        apply_filters(&filters, &mut store);
        assert_eq!(hidden_flags(&store), vec![false, false, false]);
    }

    #[test]
    fn disabling_a_type_hides_exactly_that_type() {
        let mut store = mixed_store();
        let (types, domains) = classify_store(&store);
        let mut filters = FilterState::all_enabled(&types, &domains);

        filters.toggle_type("pdf");
        apply_filters(&filters, &mut store);
        assert_eq!(hidden_flags(&store), vec![false, true, false]);

        // Domain state is independent of the type toggle.
        filters.toggle_domain("other.example");
        apply_filters(&filters, &mut store);
        assert_eq!(hidden_flags(&store), vec![false, true, true]);
    }

    #[test]
    fn hidden_matches_the_selection_invariant() {
        let mut store = mixed_store();
        let (types, domains) = classify_store(&store);
        let mut filters = FilterState::all_enabled(&types, &domains);

        filters.toggle_type("page");
        filters.toggle_domain("example.com");
        apply_filters(&filters, &mut store);

        for node in store.nodes() {
            let expected = !filters.type_enabled(&node.node_type)
                || !filters.domain_enabled(&node.domain);
            assert_eq!(node.hidden, expected, "node {}", node.id);
        }
    }

    #[test]
    fn toggle_twice_restores_the_flag() {
        let (types, domains) = classify_store(&mixed_store());
        let mut filters = FilterState::all_enabled(&types, &domains);

        assert!(filters.type_enabled("pdf"));
        filters.toggle_type("pdf");
        assert!(!filters.type_enabled("pdf"));
        filters.toggle_type("pdf");
        assert!(filters.type_enabled("pdf"));
    }

    #[test]
    fn set_selection_treats_absent_keys_as_disabled() {
        let (types, domains) = classify_store(&mixed_store());
        let mut filters = FilterState::all_enabled(&types, &domains);

        let only_pdf: HashMap<String, bool> = [("pdf".to_string(), true)].into();
        filters.set_types(&only_pdf);

        assert!(filters.type_enabled("pdf"));
        assert!(!filters.type_enabled("page"));
    }
}
