//! Tableview Host - async driver for the table view engine.
//!
//! The engine is I/O-free and takes time as an input. This crate gives it a
//! real clock: a single tokio task owns the engine, arms a timer at the
//! pending filter deadline, and publishes the displayed set to observers
//! after every state change.
//!
//! ```no_run
//! use tableview_host::{Config, TableHost};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! tableview_host::telemetry::init(tableview_host::telemetry::DEFAULT_FILTER);
//!
//! let config = Config::load()?;
//! let (table, _task) = TableHost::spawn(&config)?;
//! let mut view = table.subscribe();
//!
//! table.load_envelope_json(r#"{"results": []}"#).await?;
//! table.set_filter("peru").await?;
//! view.changed().await?;
//! println!("{} rows", view.borrow().len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod telemetry;

pub use config::{Config, ConfigError};
pub use error::HostError;
pub use host::{Displayed, TableHandle, TableHost};
