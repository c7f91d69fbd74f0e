use std::path::PathBuf;

use thiserror::Error;

/// Problems with the run configuration, detected before any image is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("No images specified")]
    NoImages,

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] colony_kit::ConfigurationError),

    #[error("Downscale factor must be within (0, 1], got {0}")]
    DownscaleFactor(f64),

    #[error("Micrometers per pixel must be positive, got {0}")]
    PixelScale(f64),

    #[error("Failed to read baseline series {}: {source}", path.display())]
    BaselineRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid baseline series {}: {source}", path.display())]
    BaselineFormat {
        path: PathBuf,
        #[source]
        source: colony_kit::Error,
    },

    #[error("Baseline series {} has {actual} samples but the sample count is {expected}", path.display())]
    BaselineLength {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },
}

/// Failure of one image's pipeline. Other images are not affected.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Image error: {0}")]
    Resource(#[from] image::ImageError),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Analysis error: {0}")]
    Analysis(#[from] colony_kit::Error),

    #[error("Worker failed: {0}")]
    Worker(String),
}

/// Run-level failure; the process exits non-zero.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read series {}: {source}", path.display())]
    Series {
        path: PathBuf,
        #[source]
        source: colony_kit::Error,
    },

    #[error("Aggregation failed: {0}")]
    Aggregation(#[source] colony_kit::Error),

    #[error("Failed to serialize {what}: {message}")]
    Serialize { what: &'static str, message: String },

    #[error("{failed} of {total} images failed")]
    ImagesFailed { failed: usize, total: usize },
}

impl RunError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RunError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_no_images() {
        assert_eq!(ConfigError::NoImages.to_string(), "No images specified");
    }

    #[test]
    fn test_config_error_downscale() {
        let error = ConfigError::DownscaleFactor(1.5);
        assert_eq!(
            error.to_string(),
            "Downscale factor must be within (0, 1], got 1.5"
        );
    }

    #[test]
    fn test_config_error_baseline_length() {
        let error = ConfigError::BaselineLength {
            path: PathBuf::from("baseline.csv"),
            expected: 200,
            actual: 10,
        };
        assert_eq!(
            error.to_string(),
            "Baseline series baseline.csv has 10 samples but the sample count is 200"
        );
    }

    #[test]
    fn test_config_error_from_configuration() {
        let error: ConfigError = colony_kit::ConfigurationError::ZeroSamples.into();
        assert!(matches!(error, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_pipeline_error_io() {
        let error = PipelineError::Io {
            path: PathBuf::from("out/MaskedColonies"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(error.to_string(), "IO error at out/MaskedColonies: denied");
    }

    #[test]
    fn test_pipeline_error_from_analysis() {
        let error: PipelineError = colony_kit::Error::GeometryMismatch {
            image: colony_kit::Size::new(2, 2),
            mask: colony_kit::Size::new(3, 3),
        }
        .into();
        assert_eq!(
            error.to_string(),
            "Analysis error: image is 2x2 but mask is 3x3"
        );
    }

    #[test]
    fn test_run_error_images_failed() {
        let error = RunError::ImagesFailed {
            failed: 1,
            total: 3,
        };
        assert_eq!(error.to_string(), "1 of 3 images failed");
    }

    #[test]
    fn test_run_error_config_is_transparent() {
        let error: RunError = ConfigError::NoImages.into();
        assert_eq!(error.to_string(), "No images specified");
    }
}
