//! Per-image analysis: every stage from decode to the sampled profile.

use std::path::{Path, PathBuf};
use std::time::Instant;

use colony_kit::{
    mask_colony, quantify, remove_background, render_pigmentation, series, Baseline, ImageBuffer,
    PigmentationSample, QuantifyOptions, SquarePixels,
};

use super::artifacts::{stem_of, Artifact, ArtifactLayout};
use super::image_io;
use super::timing::{elapsed_ms, measure};
use crate::error::PipelineError;
use crate::models::AnalysisConfig;

/// Result of one successfully analyzed image
#[derive(Debug, Clone)]
pub struct ImageOutcome {
    pub index: usize,
    pub path: PathBuf,
    /// The sampled profile, `sample_count` long
    pub samples: Vec<PigmentationSample>,
    pub colony_area: SquarePixels,
    pub elapsed_ms: u64,
}

/// Runs the analysis stages for one image and writes its artifacts
///
/// Shared read-only between workers; each call owns its image and mask.
pub struct ImagePipeline {
    config: AnalysisConfig,
    baseline: Baseline,
    layout: ArtifactLayout,
}

impl ImagePipeline {
    /// `baseline` is the already resolved baseline for the sampled profile.
    pub fn new(config: AnalysisConfig, baseline: Baseline, layout: ArtifactLayout) -> Self {
        Self {
            config,
            baseline,
            layout,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, index: usize, path: &Path) -> Result<ImageOutcome, PipelineError> {
        let start = Instant::now();
        let stem = stem_of(path);
        let config = &self.config;

        let image = measure("load", index, || image_io::load(path, config.downscale_factor))?;
        self.save_image(Artifact::Original, &stem, &image)?;

        let (mask, report) = measure("mask", index, || {
            mask_colony(
                &image,
                config.background_key_color,
                config.background_threshold,
                &config.cleanup_options(),
            )
        })?;
        tracing::debug!(
            index,
            holes_filled = report.holes.flipped_components,
            speckles_removed = report.speckles.flipped_components,
            "Cleaned colony mask"
        );
        image_io::save(&mask, &self.layout.path(Artifact::Mask, &stem))?;

        let isolated = remove_background(&image, &mask)?;
        self.save_image(Artifact::BackgroundRemoved, &stem, &isolated)?;

        let flat = Baseline::Flat(config.baseline_pigmentation);
        let whole_colony = QuantifyOptions::new()
            .key_color(config.pigmentation_color)
            .baseline(flat.clone());
        let sampled = config.quantify_options(self.baseline.clone(), true);

        let drawn = measure("render", index, || -> colony_kit::Result<_> {
            Ok((
                render_pigmentation(&image, &mask, &whole_colony, false)?,
                render_pigmentation(&image, &mask, &sampled, true)?,
            ))
        })?;
        self.save_image(Artifact::DrawnPigmentation, &stem, &drawn.0)?;
        self.save_image(Artifact::DrawnPigmentationRoi, &stem, &drawn.1)?;

        let raw = config.quantify_options(flat, false);
        let raw_samples = measure("quantify raw", index, || quantify(&image, &mask, &raw))?;
        self.write(Artifact::RawHistogram, &stem, series::to_csv(&raw_samples))?;

        let samples = measure("quantify sampled", index, || {
            quantify(&image, &mask, &sampled)
        })?;
        self.write(Artifact::SampledHistogram, &stem, series::to_csv(&samples))?;
        self.write(Artifact::Series, &stem, series::one_dimension_csv(&samples))?;

        Ok(ImageOutcome {
            index,
            path: path.to_path_buf(),
            samples,
            colony_area: mask.colony_area(),
            elapsed_ms: elapsed_ms(start),
        })
    }

    fn save_image(
        &self,
        artifact: Artifact,
        stem: &str,
        image: &ImageBuffer,
    ) -> Result<(), PipelineError> {
        image_io::save(image, &self.layout.path(artifact, stem))
    }

    fn write(&self, artifact: Artifact, stem: &str, contents: String) -> Result<(), PipelineError> {
        let path = self.layout.path(artifact, stem);
        std::fs::write(&path, contents).map_err(|source| PipelineError::Io { path, source })
    }
}
