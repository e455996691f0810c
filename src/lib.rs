//! Engine for exploring crawl-result documents as a directed graph:
//! tolerant ingestion, type/domain facet filtering, degree-based
//! sizing, and selectable layouts including a background force-directed
//! simulation. Rendering and UI live in external collaborators that
//! consume the read-only store snapshot.

pub mod color;
pub mod document;
pub mod error;
pub mod facet;
pub mod filter;
pub mod graph;
pub mod hostname;
mod jitter;
pub mod layout;
pub mod session;
pub mod sizing;

pub mod ingest;

pub use document::{CrawlerEntry, ParentRef, parse_document};
pub use error::{LoadError, StructuralError};
pub use facet::{Dataset, FacetDescriptor};
pub use filter::FilterState;
pub use graph::{GraphNode, GraphStore};
pub use hostname::extract_hostname;
pub use layout::LayoutController;
pub use session::{GraphSession, LoadReport};
pub use sizing::{MAX_SIZE, MIN_SIZE};
