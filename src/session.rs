use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde_json::Value;

use crate::document::parse_document;
use crate::error::LoadError;
use crate::facet::{Dataset, classify_store};
use crate::filter::{FilterState, apply_filters};
use crate::graph::{GraphNode, GraphStore};
use crate::ingest::ingest;
use crate::layout::LayoutController;
use crate::sizing::recompute_sizes;

/// Result of a successful document load: the computed dataset plus the
/// per-entry structural errors collected during ingestion.
pub struct LoadReport {
    pub dataset: Dataset,
    pub errors: Vec<String>,
}

enum PendingTask {
    RecountVisible,
}

/// Top-level controller for one in-memory graph session. Owns the
/// store, dataset, filter state, and layout controller; all mutation is
/// serialized through it. Each kind of change invokes its recomputation
/// explicitly: a document load reruns sizing and filter seeding, a
/// filter change reruns visibility, a layout request goes straight to
/// the controller. Derived counters are refreshed one tick later, after
/// the mutation has fully settled.
#[derive(Default)]
pub struct GraphSession {
    store: Option<GraphStore>,
    dataset: Option<Dataset>,
    filters: FilterState,
    layout: LayoutController,
    pending: VecDeque<PendingTask>,
    visible_node_count: usize,
}

impl GraphSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse, ingest, classify, size, and seed filters for a new
    /// document. The boundary parse runs first: if it fails, the
    /// previously loaded graph stays fully usable. On success the old
    /// graph is discarded wholesale, never incrementally cleared.
    pub fn load_document(&mut self, raw: &str) -> Result<LoadReport, LoadError> {
        let entries = parse_document(raw)?;

        // A rebuild must not race background layout work.
        self.layout.halt();

        let outcome = ingest(&entries);
        let mut store = outcome.store;
        recompute_sizes(&mut store);

        let (types, domains) = classify_store(&store);
        self.filters = FilterState::all_enabled(&types, &domains);
        apply_filters(&self.filters, &mut store);

        let dataset = Dataset {
            types,
            domains,
            entries,
        };
        self.dataset = Some(dataset.clone());
        self.store = Some(store);
        self.schedule(PendingTask::RecountVisible);

        Ok(LoadReport {
            dataset,
            errors: outcome.errors,
        })
    }

    /// Discard the whole session and return to the pre-load state.
    pub fn reset(&mut self) {
        self.layout.halt();
        self.store = None;
        self.dataset = None;
        self.filters = FilterState::default();
        self.pending.clear();
        self.visible_node_count = 0;
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Read-only snapshot for the renderer: positions, sizes, colors,
    /// and hidden flags live on the nodes, edges index into them.
    pub fn store(&self) -> Option<&GraphStore> {
        self.store.as_ref()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn visible_node_count(&self) -> usize {
        self.visible_node_count
    }

    pub fn toggle_type(&mut self, key: &str) {
        self.filters.toggle_type(key);
        self.on_filter_change();
    }

    pub fn toggle_domain(&mut self, key: &str) {
        self.filters.toggle_domain(key);
        self.on_filter_change();
    }

    pub fn set_type_facets(&mut self, selection: &HashMap<String, bool>) {
        self.filters.set_types(selection);
        self.on_filter_change();
    }

    pub fn set_domain_facets(&mut self, selection: &HashMap<String, bool>) {
        self.filters.set_domains(selection);
        self.on_filter_change();
    }

    pub fn toggle_force_directed(&mut self) {
        if let Some(store) = &self.store {
            self.layout.toggle_force_directed(store);
        }
    }

    pub fn circular_layout(&mut self, now: Instant) {
        if let Some(store) = &self.store {
            self.layout.circular_layout(store, now);
        }
    }

    pub fn random_layout(&mut self, now: Instant) {
        if let Some(store) = &self.store {
            self.layout.random_layout(store, now);
        }
    }

    pub fn is_simulating(&self) -> bool {
        self.layout.is_simulating()
    }

    /// Scheduler tick: pump background layout work into the store, then
    /// run the recomputations deferred from the previous mutation.
    pub fn tick(&mut self, now: Instant) {
        if let Some(store) = &mut self.store {
            self.layout.tick(store, now);
        }

        while let Some(task) = self.pending.pop_front() {
            match task {
                PendingTask::RecountVisible => self.recount_visible(),
            }
        }
    }

    /// Node attributes for the detail panel, internal hidden flag
    /// excluded. Display attributes first, then the retained original
    /// entry fields.
    pub fn node_details(&self, id: &str) -> Option<Vec<(String, Value)>> {
        let store = self.store.as_ref()?;
        let node = store.node(id)?;

        let mut details = vec![
            ("id".to_string(), Value::from(node.id.as_str())),
            ("label".to_string(), Value::from(node.label.as_str())),
            ("type".to_string(), Value::from(node.node_type.as_str())),
            ("source".to_string(), Value::from(node.source.as_str())),
            ("domain".to_string(), Value::from(node.domain.as_str())),
            ("color".to_string(), Value::from(node.color.as_str())),
            ("x".to_string(), Value::from(node.x)),
            ("y".to_string(), Value::from(node.y)),
            ("size".to_string(), Value::from(node.size)),
        ];

        for (key, value) in &node.entry {
            if details.iter().all(|(existing, _)| existing != key) {
                details.push((key.clone(), value.clone()));
            }
        }

        Some(details)
    }

    /// Fuzzy search over node labels and ids, best matches first.
    pub fn search(&self, query: &str) -> Vec<&GraphNode> {
        let query = query.trim();
        let Some(store) = &self.store else {
            return Vec::new();
        };
        if query.is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(i64, &GraphNode)> = store
            .nodes()
            .iter()
            .filter_map(|node| {
                let score = fuzzy_match_score(&matcher, &node.label, query)
                    .or_else(|| fuzzy_match_score(&matcher, &node.id, query))?;
                Some((score, node))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, node)| node).collect()
    }

    fn on_filter_change(&mut self) {
        if let Some(store) = &mut self.store {
            apply_filters(&self.filters, store);
        }
        self.schedule(PendingTask::RecountVisible);
    }

    fn schedule(&mut self, task: PendingTask) {
        self.pending.push_back(task);
    }

    fn recount_visible(&mut self) {
        self.visible_node_count = self
            .store
            .as_ref()
            .map(|store| store.nodes().iter().filter(|node| !node.hidden).count())
            .unwrap_or(0);
    }
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}
