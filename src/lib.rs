//! Gene coverage table builder.
//!
//! Fetches the hit-call CSVs, the JUMP mapping database and the curated
//! annotation spreadsheet, pivots each to a gene x origin count matrix, and
//! full-outer-joins them into one zero-filled table sorted by gene.

pub mod app;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod infra;
pub mod logging;
pub mod lookup;
pub mod pipeline;
pub mod sources;

pub use config::Config;
pub use error::{CoverageError, Result};
pub use pipeline::{CoveragePipeline, CoverageReport, CoverageTable};
