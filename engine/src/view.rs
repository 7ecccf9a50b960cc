//! TableViewEngine - the in-memory view state container.
//!
//! The engine holds the baseline snapshot exactly as loaded and the rendered
//! view the user works on. Sorts and deletes derive a new rendered sequence
//! from the old one; the baseline is only replaced by the next load.
//!
//! Filtering is debounced: [`TableViewEngine::set_filter`] records the text
//! and arms a single-slot deadline, and [`TableViewEngine::poll`] commits the
//! latest text once the caller's clock passes that deadline. The displayed set
//! is always derived from the current rendered view, so a commit that lands
//! after a sort or delete sees the newest rows.

use crate::{
    collate::Collation,
    column::{Column, SortDirection},
    debounce::Debouncer,
    error::Result,
    snapshot::ViewSnapshot,
    EngineConfig, Record, RecordId, Timestamp,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// The main engine holding all view state.
#[derive(Debug)]
pub struct TableViewEngine {
    /// Configuration the engine was built with
    config: EngineConfig,
    /// Locale-aware comparator for column sorts
    collation: Collation,
    /// Records exactly as loaded
    baseline: Arc<[Record]>,
    /// Working set after deletes and sorts
    rendered: Arc<[Record]>,
    /// Filter text as last typed
    filter_text: String,
    /// Filter text committed by the last debounce expiry
    applied_filter: String,
    /// Direction each column's next sort will use
    sort_directions: BTreeMap<Column, SortDirection>,
    /// Pending filter commit
    debouncer: Debouncer,
}

impl TableViewEngine {
    /// Create an empty engine.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let collation = Collation::new(&config.locale)?;
        let debouncer = Debouncer::new(config.debounce_ms);

        Ok(Self {
            config,
            collation,
            baseline: Arc::from(Vec::new()),
            rendered: Arc::from(Vec::new()),
            filter_text: String::new(),
            applied_filter: String::new(),
            sort_directions: neutral_directions(),
            debouncer,
        })
    }

    /// Create an empty engine with the default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(EngineConfig::default())
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace all state with a freshly fetched record collection.
    ///
    /// A load starts a new session: the filter is cleared, any pending filter
    /// commit is dropped and every column goes back to ascending.
    pub fn load(&mut self, records: Vec<Record>) {
        debug!(rows = records.len(), "loading baseline");

        self.baseline = Arc::from(records);
        self.rendered = Arc::clone(&self.baseline);
        self.filter_text.clear();
        self.applied_filter.clear();
        self.debouncer.cancel();
        self.sort_directions = neutral_directions();
    }

    /// Record new filter text and (re)arm the debounce deadline.
    ///
    /// Returns the time at which [`Self::poll`] will commit the text.
    /// Empty text takes effect at once: the displayed set falls back to the
    /// rendered view without waiting for the deadline.
    pub fn set_filter(&mut self, text: impl Into<String>, now: Timestamp) -> Timestamp {
        self.filter_text = text.into();
        if self.filter_text.is_empty() && !self.applied_filter.is_empty() {
            self.applied_filter.clear();
            debug!("filter cleared");
        }
        self.debouncer.schedule(now)
    }

    /// Commit the pending filter if its deadline has passed.
    ///
    /// Returns true when the displayed set may have changed and should be
    /// re-read.
    pub fn poll(&mut self, now: Timestamp) -> bool {
        if !self.debouncer.fire_if_due(now) {
            return false;
        }

        self.applied_filter.clone_from(&self.filter_text);
        debug!(filter = %self.applied_filter, "filter committed");
        true
    }

    /// Sort the rendered view by country, toggling the country direction.
    pub fn sort_by_country(&mut self) -> &[Record] {
        self.sort_by_column(Column::Country)
    }

    /// Sort the rendered view by a column key such as `"last"`.
    pub fn sort_by_key(&mut self, key: &str) -> Result<&[Record]> {
        let column: Column = key.parse()?;
        Ok(self.sort_by_column(column))
    }

    /// Sort the rendered view by one column.
    ///
    /// Uses that column's current direction, then flips it. Other columns
    /// keep their directions. The sort is stable, so rows with equal keys
    /// keep their relative order in either direction.
    pub fn sort_by_column(&mut self, column: Column) -> &[Record] {
        let direction = self.sort_direction(column);
        let key = column.accessor();

        let mut sorted = self.rendered.to_vec();
        sorted.sort_by(|a, b| {
            let ordering = self.collation.compare(key(a), key(b));
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        self.rendered = Arc::from(sorted);
        self.sort_directions.insert(column, direction.toggled());

        debug!(%column, %direction, rows = self.rendered.len(), "sorted rendered view");
        &self.rendered
    }

    /// Remove every rendered record with this id.
    ///
    /// Returns how many were removed; an unknown id removes nothing.
    pub fn delete_record(&mut self, id: &RecordId) -> usize {
        let before = self.rendered.len();
        if !self.rendered.iter().any(|r| &r.id == id) {
            return 0;
        }

        self.rendered = self
            .rendered
            .iter()
            .filter(|r| &r.id != id)
            .cloned()
            .collect();

        let removed = before - self.rendered.len();
        debug!(%id, removed, "deleted from rendered view");
        removed
    }

    /// Undo every deletion and sort by resetting to the baseline.
    ///
    /// Filter text and column directions are kept.
    pub fn restore(&mut self) {
        self.rendered = Arc::clone(&self.baseline);
        debug!(rows = self.rendered.len(), "restored baseline");
    }

    /// Derive the displayed set from the rendered view and committed filter.
    ///
    /// An empty filter, typed or committed, hands back the rendered view
    /// itself; otherwise the matching rows are collected in rendered order.
    pub fn compute_displayed(&self) -> Arc<[Record]> {
        if self.filter_text.is_empty() || self.applied_filter.is_empty() {
            return Arc::clone(&self.rendered);
        }

        let needle = self.applied_filter.to_lowercase();
        self.rendered
            .iter()
            .filter(|r| r.country_contains(&needle))
            .cloned()
            .collect()
    }

    /// Records as loaded.
    pub fn baseline(&self) -> &[Record] {
        &self.baseline
    }

    /// Current working set.
    pub fn rendered(&self) -> &[Record] {
        &self.rendered
    }

    /// Filter text as last set, committed or not.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Filter text the displayed set is derived from.
    pub fn applied_filter(&self) -> &str {
        &self.applied_filter
    }

    /// Direction the next sort on `column` will use.
    pub fn sort_direction(&self, column: Column) -> SortDirection {
        self.sort_directions
            .get(&column)
            .copied()
            .unwrap_or_default()
    }

    pub fn sort_directions(&self) -> &BTreeMap<Column, SortDirection> {
        &self.sort_directions
    }

    /// When the pending filter commit becomes due, if one is pending.
    pub fn pending_deadline(&self) -> Option<Timestamp> {
        self.debouncer.deadline()
    }

    pub fn is_filter_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Export a serializable picture of the current state.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot::capture(self)
    }
}

fn neutral_directions() -> BTreeMap<Column, SortDirection> {
    Column::ALL
        .into_iter()
        .map(|column| (column, SortDirection::Asc))
        .collect()
}
