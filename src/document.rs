use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::LoadError;

pub const DEFAULT_TYPE: &str = "page";

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ParentRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// One crawl-result row. Every field tolerates absence so a malformed
/// row degrades into per-entry handling instead of rejecting the whole
/// document; unknown fields are retained for detail display.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CrawlerEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CrawlerEntry {
    /// Entry id normalized for graph use; empty strings count as missing.
    pub fn node_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Parent id iff the parent reference is present and carries a
    /// non-null, non-empty id. Anything else yields no edge.
    pub fn parent_id(&self) -> Option<&str> {
        self.parent
            .as_ref()
            .and_then(|parent| parent.id.as_deref())
            .filter(|id| !id.is_empty())
    }

    pub fn type_or_default(&self) -> &str {
        self.entry_type.as_deref().unwrap_or(DEFAULT_TYPE)
    }

    /// The entry as a flat key/value map, for the detail panel.
    pub fn fields(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// Boundary parse of a raw document. Runs before ingestion; a failure
/// here rejects the document outright and leaves prior state usable.
pub fn parse_document(raw: &str) -> Result<Vec<CrawlerEntry>, LoadError> {
    let parsed: Value = serde_json::from_str(raw)?;
    let Value::Array(items) = parsed else {
        return Err(LoadError::NotAnArray);
    };

    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        entries.push(CrawlerEntry::deserialize(item)?);
    }
    Ok(entries)
}
