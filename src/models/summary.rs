use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::config::AggregationPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    Succeeded,
    Failed,
}

/// Outcome of one image, as written to `summary.json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageReport {
    pub index: usize,
    pub path: PathBuf,
    pub status: ImageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colony_area_px: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colony_area_mm2: Option<f64>,
    pub elapsed_ms: u64,
}

impl ImageReport {
    pub fn is_success(&self) -> bool {
        self.status == ImageStatus::Succeeded
    }
}

/// Run-level report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub aggregation: AggregationPolicy,
    /// Whether the averaged profile was written
    pub averaged: bool,
    pub succeeded: usize,
    pub failed: usize,
    pub images: Vec<ImageReport>,
}

impl RunSummary {
    pub fn new(
        started_at: DateTime<Utc>,
        aggregation: AggregationPolicy,
        averaged: bool,
        images: Vec<ImageReport>,
    ) -> Self {
        let succeeded = images.iter().filter(|r| r.is_success()).count();
        Self {
            started_at,
            finished_at: Utc::now(),
            aggregation,
            averaged,
            succeeded,
            failed: images.len() - succeeded,
            images,
        }
    }
}
