//! # Tableview Engine
//!
//! An in-memory table view engine for person records.
//!
//! This crate holds the only real logic behind a "people table" screen: a
//! baseline snapshot of fetched records, a rendered working view that can be
//! sorted and pruned, a debounced country filter, and restore-to-baseline.
//! Fetching, drawing and button wiring belong to the caller.
//!
//! ## Design Principles
//!
//! - **No IO**: Engine has no knowledge of files, network, timers or threads
//! - **Deterministic**: Time is an input, so the same calls give the same view
//! - **Testable**: Pure logic, no mocks needed
//! - **Portable**: Runs anywhere Rust runs, and behind a C ABI
//!
//! ## Core Concepts
//!
//! ### Baseline and rendered view
//!
//! [`TableViewEngine::load`] sets both. Sorting and deleting only ever touch
//! the rendered view; [`TableViewEngine::restore`] copies the baseline back.
//!
//! ### Columns
//!
//! [`Column`] names the three sortable columns. Each column keeps its own
//! [`SortDirection`], flipped after every sort on that column. Comparison is
//! locale-aware through [`Collation`].
//!
//! ### Debounced filter
//!
//! [`TableViewEngine::set_filter`] stores the text and arms a single pending
//! commit; [`TableViewEngine::poll`] commits it once the quiescence window has
//! passed. A newer filter replaces the pending commit.
//!
//! ## Quick Start
//!
//! ```rust
//! use tableview_engine::{Column, Record, RecordId, TableViewEngine};
//!
//! let mut engine = TableViewEngine::with_defaults().unwrap();
//! engine.load(vec![
//!     Record::new(1, "Ana", "Ruiz", "Spain"),
//!     Record::new(2, "Bo", "Lee", "peru"),
//!     Record::new(3, "Cy", "Diaz", "Peru"),
//! ]);
//!
//! // Filter commits 500ms after the last keystroke.
//! engine.set_filter("peru", 1_000);
//! assert!(!engine.poll(1_200));
//! assert!(engine.poll(1_500));
//! assert_eq!(engine.compute_displayed().len(), 2);
//!
//! engine.sort_by_column(Column::Last);
//! engine.delete_record(&RecordId::Number(2));
//! engine.restore();
//! assert_eq!(engine.rendered().len(), 3);
//! ```
//!
//! ## FFI
//!
//! The [`ffi`] module provides C-compatible functions for presentation layers
//! written in other languages. All data is exchanged as JSON strings.

pub mod collate;
pub mod column;
pub mod config;
pub mod debounce;
pub mod error;
pub mod ffi;
pub mod record;
pub mod snapshot;
pub mod view;

// Re-export main types at crate root
pub use collate::{Collation, DEFAULT_LOCALE};
pub use column::{Accessor, Column, SortDirection};
pub use config::EngineConfig;
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_MS};
pub use error::Error;
pub use record::{Envelope, Location, Name, Picture, Record, RecordId};
pub use snapshot::{ViewSnapshot, SNAPSHOT_FORMAT_VERSION};
pub use view::TableViewEngine;

/// Milliseconds on the caller's clock.
pub type Timestamp = u64;
