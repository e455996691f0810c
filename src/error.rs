use thiserror::Error;

/// Per-entry graph mutation failures. These are collected into the
/// ingestion error list, never raised past the ingestion boundary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StructuralError {
    #[error("duplicate node id {0:?}")]
    DuplicateNode(String),
    #[error("edge {parent:?} -> {child:?} already exists")]
    DuplicateEdge { parent: String, child: String },
    #[error("self-loop on node {0:?}")]
    SelfLoop(String),
    #[error("edge endpoint {0:?} is not a known node")]
    MissingEndpoint(String),
}

/// Boundary rejection of a document that cannot be read as an entry
/// list at all. A failed load leaves any previously loaded dataset
/// untouched.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("document is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("document root must be an array of crawl entries")]
    NotAnArray,
}
