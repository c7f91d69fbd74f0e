//! Concurrent batch analysis and run-level outputs.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use colony_kit::PigmentationSample;
use serde::Serialize;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

use super::artifacts::ArtifactLayout;
use super::pipeline::{ImageOutcome, ImagePipeline};
use super::series_io::write_profile;
use super::timing::elapsed_ms;
use crate::error::{ConfigError, PipelineError, RunError};
use crate::models::{AggregationPolicy, AnalysisConfig, ImageReport, ImageStatus, RunSummary};

/// One finished image, successful or not
#[derive(Debug)]
pub struct BatchEntry {
    pub report: ImageReport,
    pub samples: Option<Vec<PigmentationSample>>,
}

impl BatchEntry {
    fn new(
        index: usize,
        path: PathBuf,
        result: Result<ImageOutcome, PipelineError>,
        elapsed_ms: u64,
        micrometers_per_pixel: Option<f64>,
    ) -> Self {
        match result {
            Ok(outcome) => {
                tracing::info!(
                    index,
                    path = %path.display(),
                    colony_area = %outcome.colony_area,
                    elapsed_ms = outcome.elapsed_ms,
                    "Image analyzed"
                );
                Self {
                    report: ImageReport {
                        index,
                        path,
                        status: ImageStatus::Succeeded,
                        error: None,
                        colony_area_px: Some(outcome.colony_area.0),
                        colony_area_mm2: micrometers_per_pixel
                            .map(|scale| outcome.colony_area.to_square_millimeters(scale).0),
                        elapsed_ms: outcome.elapsed_ms,
                    },
                    samples: Some(outcome.samples),
                }
            }
            Err(e) => {
                tracing::error!(index, path = %path.display(), error = %e, "Image analysis failed");
                Self {
                    report: ImageReport {
                        index,
                        path,
                        status: ImageStatus::Failed,
                        error: Some(e.to_string()),
                        colony_area_px: None,
                        colony_area_mm2: None,
                        elapsed_ms,
                    },
                    samples: None,
                }
            }
        }
    }
}

/// Runs the image pipeline over many images with bounded concurrency
///
/// Each image is analyzed on the blocking thread pool; at most `workers`
/// run at once. Finished images are sent back over a channel and the
/// entries are returned in input order.
pub struct BatchRunner {
    pipeline: Arc<ImagePipeline>,
    workers: usize,
}

impl BatchRunner {
    pub fn new(pipeline: ImagePipeline) -> Self {
        let workers = if pipeline.config().parallelize {
            num_cpus::get().max(1)
        } else {
            1
        };
        Self {
            pipeline: Arc::new(pipeline),
            workers,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub async fn run(&self, images: &[PathBuf]) -> Vec<BatchEntry> {
        let semaphore = Arc::new(Semaphore::new(self.workers));
        let (tx, mut rx) = mpsc::channel::<BatchEntry>(images.len().max(1));
        let scale = self.pipeline.config().micrometers_per_pixel;
        let mut tasks = JoinSet::new();

        tracing::info!(images = images.len(), workers = self.workers, "Starting analysis");

        for (index, path) in images.iter().cloned().enumerate() {
            let semaphore = semaphore.clone();
            let pipeline = self.pipeline.clone();
            let tx = tx.clone();

            tasks.spawn(async move {
                // The semaphore is never closed
                let _permit = semaphore.acquire_owned().await.ok();
                let start = Instant::now();
                let worker_path = path.clone();

                let result =
                    tokio::task::spawn_blocking(move || pipeline.analyze(index, &worker_path))
                        .await
                        .unwrap_or_else(|e| Err(PipelineError::Worker(e.to_string())));

                let entry = BatchEntry::new(index, path, result, elapsed_ms(start), scale);
                if tx.send(entry).await.is_err() {
                    tracing::warn!(index, "Result channel closed");
                }
            });
        }
        drop(tx);

        let mut entries = Vec::with_capacity(images.len());
        while let Some(entry) = rx.recv().await {
            entries.push(entry);
        }
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Worker task aborted");
            }
        }

        entries.sort_by_key(|entry| entry.report.index);
        entries
    }
}

#[derive(Serialize)]
struct RunParameters<'a> {
    generated_at: DateTime<Utc>,
    images: &'a [PathBuf],
    #[serde(flatten)]
    config: &'a AnalysisConfig,
}

/// Analyze `images` into `output` and write the run-level files.
///
/// Configuration problems abort before any image is touched. Failing images
/// are isolated; the summary is always written once the batch ran. Returns
/// an error if aggregation failed or any image failed.
pub async fn run_analysis(
    config: AnalysisConfig,
    images: Vec<PathBuf>,
    output: &Path,
) -> Result<RunSummary, RunError> {
    if images.is_empty() {
        return Err(ConfigError::NoImages.into());
    }
    config.validate()?;
    let baseline = config.read_baseline()?;

    let started_at = Utc::now();
    let layout = ArtifactLayout::new(output);
    layout.prepare()?;
    write_parameters(&layout, &config, &images, started_at)?;

    let policy = config.aggregation;
    let runner = BatchRunner::new(ImagePipeline::new(config, baseline, layout.clone()));
    let entries = runner.run(&images).await;

    let failed = entries.iter().filter(|e| !e.report.is_success()).count();
    let series: Vec<_> = entries.iter().filter_map(|e| e.samples.clone()).collect();

    let aggregation = match policy {
        AggregationPolicy::RequireAll if failed > 0 => {
            tracing::warn!(failed, "Skipping aggregation, not every image succeeded");
            Ok(false)
        }
        _ => average_into(&layout, &series),
    };

    let summary = RunSummary::new(
        started_at,
        policy,
        matches!(aggregation, Ok(true)),
        entries.into_iter().map(|e| e.report).collect(),
    );
    write_summary(&layout, &summary)?;

    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        averaged = summary.averaged,
        output = %layout.root().display(),
        "Analysis finished"
    );

    aggregation?;
    if failed > 0 {
        return Err(RunError::ImagesFailed {
            failed,
            total: summary.images.len(),
        });
    }
    Ok(summary)
}

fn average_into(
    layout: &ArtifactLayout,
    series: &[Vec<PigmentationSample>],
) -> Result<bool, RunError> {
    let averaged = colony_kit::average(series).map_err(RunError::Aggregation)?;
    write_profile(&layout.average(), &averaged)?;
    Ok(true)
}

fn write_parameters(
    layout: &ArtifactLayout,
    config: &AnalysisConfig,
    images: &[PathBuf],
    generated_at: DateTime<Utc>,
) -> Result<(), RunError> {
    let parameters = RunParameters {
        generated_at,
        images,
        config,
    };
    let yaml = serde_yaml::to_string(&parameters).map_err(|e| RunError::Serialize {
        what: "parameters",
        message: e.to_string(),
    })?;
    let path = layout.parameters();
    std::fs::write(&path, yaml).map_err(|e| RunError::io(&path, e))
}

fn write_summary(layout: &ArtifactLayout, summary: &RunSummary) -> Result<(), RunError> {
    let json = serde_json::to_string_pretty(summary).map_err(|e| RunError::Serialize {
        what: "summary",
        message: e.to_string(),
    })?;
    let path = layout.summary();
    std::fs::write(&path, json).map_err(|e| RunError::io(&path, e))
}
