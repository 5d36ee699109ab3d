// Loader output -> pivot -> outer join -> CSV

pub mod coverage_pipeline;
pub mod output;
pub mod reconcile;
pub mod reshape;

pub use coverage_pipeline::{CoveragePipeline, CoverageReport, SourceSummary};
pub use reconcile::{reconcile, CoverageTable};
pub use reshape::{pivot, WideTable};
