pub mod config;
pub mod summary;

pub use config::{AggregationPolicy, AnalysisConfig, ConfigOverrides};
pub use summary::{ImageReport, ImageStatus, RunSummary};
