//! `awbrecon-core` — AWB manifest reconciliation engine.
//!
//! Pure engine crate: receives raw tables, returns partitioned join results.
//! No CLI or IO dependencies.

pub mod error;
pub mod join;
pub mod model;
pub mod parse;
pub mod summary;

pub use error::ReconError;
pub use join::reconcile;
pub use model::{Dataset, JoinedRow, Presence, RawTable, ReconReport, ReconSummary, Record};
pub use parse::{parse, KEY_COLUMN, WEIGHT_COLUMN};
