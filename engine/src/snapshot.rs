//! Serializable view snapshots for the presentation layer.
//!
//! A snapshot is a read-only picture of what the table should show right
//! now, plus enough state to draw the filter box and header arrows. Column
//! directions use a BTreeMap so the JSON field order is deterministic.

use crate::{
    column::{Column, SortDirection},
    error::Result,
    Error, Record, TableViewEngine,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version of the snapshot format for future compatibility.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// A point-in-time view of the engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    /// Snapshot format version
    pub format_version: u32,
    /// Filter text as typed
    pub filter_text: String,
    /// Filter text the displayed rows were derived from
    pub applied_filter: String,
    /// Whether a newer filter is waiting for its debounce window
    pub filter_pending: bool,
    /// Direction each column's next sort will use
    pub sort_directions: BTreeMap<Column, SortDirection>,
    /// Number of records loaded
    pub baseline_len: usize,
    /// Number of records left after deletions
    pub rendered_len: usize,
    /// Rows to draw, in order
    pub displayed: Vec<Record>,
}

impl ViewSnapshot {
    /// Capture the current state of an engine.
    pub fn capture(engine: &TableViewEngine) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            filter_text: engine.filter_text().to_string(),
            applied_filter: engine.applied_filter().to_string(),
            filter_pending: engine.is_filter_pending(),
            sort_directions: engine.sort_directions().clone(),
            baseline_len: engine.baseline().len(),
            rendered_len: engine.rendered().len(),
            displayed: engine.compute_displayed().to_vec(),
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidPayload(e.to_string()))
    }

    /// Serialize to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidPayload(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidPayload(e.to_string()))?;

        if snapshot.format_version > SNAPSHOT_FORMAT_VERSION {
            return Err(Error::InvalidPayload(format!(
                "unsupported snapshot format version: {} (max supported: {})",
                snapshot.format_version, SNAPSHOT_FORMAT_VERSION
            )));
        }

        Ok(snapshot)
    }
}
