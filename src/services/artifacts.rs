//! Output directory layout of an analysis run.

use std::path::{Path, PathBuf};

use crate::error::RunError;

/// One per-image output file kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Original,
    Mask,
    BackgroundRemoved,
    DrawnPigmentation,
    DrawnPigmentationRoi,
    RawHistogram,
    SampledHistogram,
    Series,
}

impl Artifact {
    pub const ALL: [Artifact; 8] = [
        Artifact::Original,
        Artifact::Mask,
        Artifact::BackgroundRemoved,
        Artifact::DrawnPigmentation,
        Artifact::DrawnPigmentationRoi,
        Artifact::RawHistogram,
        Artifact::SampledHistogram,
        Artifact::Series,
    ];

    pub fn directory(self) -> &'static str {
        match self {
            Artifact::Original => "OriginalImages",
            Artifact::Mask => "MaskedColonies",
            Artifact::BackgroundRemoved => "BackgroundRemoved",
            Artifact::DrawnPigmentation => "DrawnPigmentation",
            Artifact::DrawnPigmentationRoi => "DrawnPigmentationROI",
            Artifact::RawHistogram => "RawPigmentationHistogram",
            Artifact::SampledHistogram => "SampledPigmentationHistogram",
            Artifact::Series => "PigmentationSeries",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Artifact::RawHistogram | Artifact::SampledHistogram | Artifact::Series => "csv",
            _ => "jpg",
        }
    }
}

/// Paths of every file a run writes below its output directory
#[derive(Debug, Clone)]
pub struct ArtifactLayout {
    root: PathBuf,
}

impl ArtifactLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output directory and one subdirectory per artifact kind.
    pub fn prepare(&self) -> Result<(), RunError> {
        for artifact in Artifact::ALL {
            let dir = self.root.join(artifact.directory());
            std::fs::create_dir_all(&dir).map_err(|e| RunError::io(&dir, e))?;
        }
        tracing::debug!(root = %self.root.display(), "Prepared output directories");
        Ok(())
    }

    /// Path of `artifact` for the image named `stem`.
    pub fn path(&self, artifact: Artifact, stem: &str) -> PathBuf {
        self.root
            .join(artifact.directory())
            .join(format!("{stem}.{}", artifact.extension()))
    }

    pub fn parameters(&self) -> PathBuf {
        self.root.join("parameters.yaml")
    }

    pub fn average(&self) -> PathBuf {
        self.root.join("average_pigmentation.csv")
    }

    pub fn summary(&self) -> PathBuf {
        self.root.join("summary.json")
    }
}

/// File stem used to name an image's artifacts.
pub fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

/// Sibling of `path` carrying the one-dimensional histogram: `foo.csv` becomes `foo_1d.csv`.
pub fn one_dimension_path(path: &Path) -> PathBuf {
    let stem = stem_of(path);
    match path.extension() {
        Some(ext) => path.with_file_name(format!("{stem}_1d.{}", ext.to_string_lossy())),
        None => path.with_file_name(format!("{stem}_1d")),
    }
}
