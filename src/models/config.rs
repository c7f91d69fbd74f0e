//! Analysis configuration: YAML file, defaults, and command line overrides.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use colony_kit::{Baseline, CleanupOptions, ConfigurationError, QuantifyOptions, RgbColor};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What to do with the averaged profile when some images fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AggregationPolicy {
    /// Average whatever succeeded; fail only if nothing did.
    #[default]
    SuccessfulOnly,
    /// Skip averaging entirely as soon as one image failed.
    RequireAll,
}

/// Analysis configuration loaded from a YAML file
///
/// Every field has a default, so an empty file (or no file at all) is a
/// valid configuration. Colors are `#RRGGBB` strings and must be quoted in
/// YAML since `#` starts a comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Color of the plate behind the colony
    #[serde(default = "default_background_key_color", with = "hex_color")]
    pub background_key_color: RgbColor,

    /// Normalized distance above which a pixel counts as colony
    #[serde(default = "default_background_threshold")]
    pub background_threshold: f64,

    /// Pigment color that pigmentation is measured against
    #[serde(default = "default_pigmentation_color", with = "hex_color")]
    pub pigmentation_color: RgbColor,

    /// Flat similarity floor, ignored when `baseline_series` is set
    #[serde(default = "default_baseline_pigmentation")]
    pub baseline_pigmentation: f64,

    /// Previously written profile used as a per-bucket baseline
    #[serde(default)]
    pub baseline_series: Option<PathBuf>,

    /// Number of column buckets in the sampled profile
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    /// Height of the sampled band as a fraction of the colony height
    #[serde(default = "default_roi_height")]
    pub roi_height: f64,

    /// Scale applied to images when they are loaded
    #[serde(default = "default_downscale_factor")]
    pub downscale_factor: f64,

    #[serde(default = "default_hole_area_fraction")]
    pub hole_area_fraction: f64,

    #[serde(default = "default_speckle_area_fraction")]
    pub speckle_area_fraction: f64,

    /// Analyze images concurrently
    #[serde(default = "default_parallelize")]
    pub parallelize: bool,

    #[serde(default)]
    pub aggregation: AggregationPolicy,

    /// Pixel edge length, enables colony areas in mm² in the summary
    #[serde(default)]
    pub micrometers_per_pixel: Option<f64>,
}

fn default_background_key_color() -> RgbColor {
    RgbColor::new(51, 57, 62)
}

fn default_background_threshold() -> f64 {
    0.15
}

fn default_pigmentation_color() -> RgbColor {
    RgbColor::new(128, 61, 51)
}

fn default_baseline_pigmentation() -> f64 {
    0.436
}

fn default_sample_count() -> usize {
    200
}

fn default_roi_height() -> f64 {
    0.2
}

fn default_downscale_factor() -> f64 {
    1.0
}

fn default_hole_area_fraction() -> f64 {
    0.2
}

fn default_speckle_area_fraction() -> f64 {
    0.02
}

fn default_parallelize() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            background_key_color: default_background_key_color(),
            background_threshold: default_background_threshold(),
            pigmentation_color: default_pigmentation_color(),
            baseline_pigmentation: default_baseline_pigmentation(),
            baseline_series: None,
            sample_count: default_sample_count(),
            roi_height: default_roi_height(),
            downscale_factor: default_downscale_factor(),
            hole_area_fraction: default_hole_area_fraction(),
            speckle_area_fraction: default_speckle_area_fraction(),
            parallelize: default_parallelize(),
            aggregation: AggregationPolicy::default(),
            micrometers_per_pixel: None,
        }
    }
}

fn unit_range(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigurationError::OutOfUnitRange { name, value }.into())
    }
}

impl AnalysisConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Check every value range; called before any image is processed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_range("background threshold", self.background_threshold)?;
        unit_range("baseline pigmentation", self.baseline_pigmentation)?;
        unit_range("roi height", self.roi_height)?;
        unit_range("hole area fraction", self.hole_area_fraction)?;
        unit_range("speckle area fraction", self.speckle_area_fraction)?;

        if self.sample_count == 0 {
            return Err(ConfigurationError::ZeroSamples.into());
        }
        if !(self.downscale_factor > 0.0 && self.downscale_factor <= 1.0) {
            return Err(ConfigError::DownscaleFactor(self.downscale_factor));
        }
        if let Some(scale) = self.micrometers_per_pixel {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(ConfigError::PixelScale(scale));
            }
        }
        Ok(())
    }

    pub fn cleanup_options(&self) -> CleanupOptions {
        CleanupOptions::new()
            .hole_area_fraction(self.hole_area_fraction)
            .speckle_area_fraction(self.speckle_area_fraction)
    }

    /// Quantification options for the given baseline.
    ///
    /// `sampled` selects between the configured sample count and one bucket
    /// per column.
    pub fn quantify_options(&self, baseline: Baseline, sampled: bool) -> QuantifyOptions {
        let options = QuantifyOptions::new()
            .key_color(self.pigmentation_color)
            .baseline(baseline)
            .area_of_interest_height(self.roi_height);
        if sampled {
            options.horizontal_samples(self.sample_count)
        } else {
            options
        }
    }

    /// Resolve the baseline: the averages of `baseline_series` when set,
    /// otherwise the flat `baseline_pigmentation`.
    pub fn read_baseline(&self) -> Result<Baseline, ConfigError> {
        let Some(path) = &self.baseline_series else {
            return Ok(Baseline::Flat(self.baseline_pigmentation));
        };

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::BaselineRead {
            path: path.clone(),
            source,
        })?;
        let samples =
            colony_kit::series::parse(&contents).map_err(|source| ConfigError::BaselineFormat {
                path: path.clone(),
                source,
            })?;

        if samples.len() != self.sample_count {
            return Err(ConfigError::BaselineLength {
                path: path.clone(),
                expected: self.sample_count,
                actual: samples.len(),
            });
        }

        tracing::info!(path = %path.display(), samples = samples.len(), "Loaded baseline series");
        Ok(Baseline::PerBucket(
            samples.iter().map(|s| s.average()).collect(),
        ))
    }
}

/// Command line values that take precedence over the config file
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Background chroma key color (e.g. "#33393E")
    #[arg(long)]
    pub background_key_color: Option<RgbColor>,

    /// Background distance threshold (0..=1)
    #[arg(long)]
    pub background_threshold: Option<f64>,

    /// Pigment key color (e.g. "#803D33")
    #[arg(long)]
    pub pigmentation_color: Option<RgbColor>,

    /// Flat baseline pigmentation (0..=1)
    #[arg(long)]
    pub baseline_pigmentation: Option<f64>,

    /// Profile CSV to use as a per-bucket baseline
    #[arg(long)]
    pub baseline_series: Option<PathBuf>,

    /// Number of column buckets in the sampled profile
    #[arg(long)]
    pub sample_count: Option<usize>,

    /// Height of the sampled band as a fraction of the colony height
    #[arg(long)]
    pub roi_height: Option<f64>,

    /// Scale images by this factor when loading (0 < f <= 1)
    #[arg(long)]
    pub downscale_factor: Option<f64>,

    /// Pixel edge length in micrometers
    #[arg(long)]
    pub micrometers_per_pixel: Option<f64>,

    /// Aggregation policy when some images fail
    #[arg(long, value_enum)]
    pub aggregation: Option<AggregationPolicy>,

    /// Analyze one image at a time
    #[arg(long)]
    pub sequential: bool,
}

impl ConfigOverrides {
    pub fn apply(self, config: &mut AnalysisConfig) {
        if let Some(v) = self.background_key_color {
            config.background_key_color = v;
        }
        if let Some(v) = self.background_threshold {
            config.background_threshold = v;
        }
        if let Some(v) = self.pigmentation_color {
            config.pigmentation_color = v;
        }
        if let Some(v) = self.baseline_pigmentation {
            config.baseline_pigmentation = v;
        }
        if let Some(v) = self.baseline_series {
            config.baseline_series = Some(v);
        }
        if let Some(v) = self.sample_count {
            config.sample_count = v;
        }
        if let Some(v) = self.roi_height {
            config.roi_height = v;
        }
        if let Some(v) = self.downscale_factor {
            config.downscale_factor = v;
        }
        if let Some(v) = self.micrometers_per_pixel {
            config.micrometers_per_pixel = Some(v);
        }
        if let Some(v) = self.aggregation {
            config.aggregation = v;
        }
        if self.sequential {
            config.parallelize = false;
        }
    }
}

mod hex_color {
    use colony_kit::RgbColor;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &RgbColor, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.hex_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RgbColor, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();

        assert_eq!(config.background_key_color, RgbColor::new(51, 57, 62));
        assert_eq!(config.background_threshold, 0.15);
        assert_eq!(config.pigmentation_color, RgbColor::new(128, 61, 51));
        assert_eq!(config.baseline_pigmentation, 0.436);
        assert_eq!(config.sample_count, 200);
        assert_eq!(config.roi_height, 0.2);
        assert_eq!(config.downscale_factor, 1.0);
        assert!(config.parallelize);
        assert_eq!(config.aggregation, AggregationPolicy::SuccessfulOnly);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config: AnalysisConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r##"
background_key_color: "#101010"
sample_count: 50
aggregation: require-all
micrometers_per_pixel: 12.5
"##;
        let config: AnalysisConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.background_key_color, RgbColor::gray(16));
        assert_eq!(config.sample_count, 50);
        assert_eq!(config.aggregation, AggregationPolicy::RequireAll);
        assert_eq!(config.micrometers_per_pixel, Some(12.5));
        assert_eq!(config.roi_height, 0.2);
    }

    #[test]
    fn test_invalid_color_is_parse_error() {
        let yaml = "pigmentation_color: \"#12\"";
        assert!(serde_yaml::from_str::<AnalysisConfig>(yaml).is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = AnalysisConfig {
            baseline_series: Some(PathBuf::from("baseline.csv")),
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("'#803D33'") || yaml.contains("\"#803D33\""));
        let parsed: AnalysisConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = AnalysisConfig {
            background_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(ConfigurationError::OutOfUnitRange {
                name: "background threshold",
                ..
            }))
        ));

        let config = AnalysisConfig {
            downscale_factor: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DownscaleFactor(_))
        ));

        let config = AnalysisConfig {
            sample_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let mut config = AnalysisConfig::default();
        let overrides = ConfigOverrides {
            background_threshold: Some(0.3),
            pigmentation_color: Some(RgbColor::new(1, 2, 3)),
            sequential: true,
            ..Default::default()
        };
        overrides.apply(&mut config);

        assert_eq!(config.background_threshold, 0.3);
        assert_eq!(config.pigmentation_color, RgbColor::new(1, 2, 3));
        assert!(!config.parallelize);
        assert_eq!(config.sample_count, 200);
    }

    #[test]
    fn test_flat_baseline_without_series() {
        let config = AnalysisConfig::default();
        assert_eq!(config.read_baseline().unwrap(), Baseline::Flat(0.436));
    }

    #[test]
    fn test_baseline_series_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "x, average, stddev, columns\n0,0.25,0,0\n1,0.75,0,1"
        )
        .unwrap();

        let config = AnalysisConfig {
            baseline_series: Some(file.path().to_path_buf()),
            sample_count: 2,
            ..Default::default()
        };
        assert_eq!(
            config.read_baseline().unwrap(),
            Baseline::PerBucket(vec![0.25, 0.75])
        );
    }

    #[test]
    fn test_baseline_series_length_mismatch() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "x, average, stddev, columns\n0,0.25,0,0").unwrap();

        let config = AnalysisConfig {
            baseline_series: Some(file.path().to_path_buf()),
            sample_count: 2,
            ..Default::default()
        };
        assert!(matches!(
            config.read_baseline(),
            Err(ConfigError::BaselineLength {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_baseline_file() {
        let config = AnalysisConfig {
            baseline_series: Some(PathBuf::from("/nonexistent/baseline.csv")),
            ..Default::default()
        };
        assert!(matches!(
            config.read_baseline(),
            Err(ConfigError::BaselineRead { .. })
        ));
    }

    #[test]
    fn test_quantify_options() {
        let config = AnalysisConfig::default();
        let sampled = config.quantify_options(Baseline::Flat(0.1), true);
        assert_eq!(sampled.horizontal_samples, Some(200));
        assert_eq!(sampled.area_of_interest_height, 0.2);

        let raw = config.quantify_options(Baseline::Flat(0.1), false);
        assert_eq!(raw.horizontal_samples, None);
    }
}
