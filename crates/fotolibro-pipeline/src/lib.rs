//! Photobook curation pipeline.
//!
//! Turns a customer photo submission into a complete set of photobook
//! decisions: per-photo analysis, album profile, life-event motif,
//! chronological order, narrative texts, and page-level design.

pub mod aggregator;
pub mod config;
pub mod curator;
pub mod detectors;
pub mod error;
pub mod logging;
pub mod motif;
pub mod motif_table;
pub mod orchestrator;
pub mod story;

pub use config::{PipelineConfig, DEFAULT_CONFIDENCE_THRESHOLD};
pub use error::{PipelineError, PipelineResult};
pub use orchestrator::{Orchestrator, Submission};
