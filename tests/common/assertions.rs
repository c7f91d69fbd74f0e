//! Assertion helpers for tests.

use std::path::Path;

use colony_pigmentation::services::Artifact;
use pretty_assertions::assert_eq;

/// Assert every per-image artifact exists for `stem`
pub fn assert_artifacts(output: &Path, stem: &str) {
    for artifact in Artifact::ALL {
        let path = output
            .join(artifact.directory())
            .join(format!("{stem}.{}", artifact.extension()));
        assert!(path.is_file(), "Expected artifact {}", path.display());
    }
}

/// Assert no per-image artifact beyond the original copy exists for `stem`
pub fn assert_no_profile(output: &Path, stem: &str) {
    for artifact in [Artifact::SampledHistogram, Artifact::Series] {
        let path = output
            .join(artifact.directory())
            .join(format!("{stem}.{}", artifact.extension()));
        assert!(!path.exists(), "Unexpected artifact {}", path.display());
    }
}

/// Assert the summary lists the expected status per image, in order
pub fn assert_statuses(summary: &serde_json::Value, expected: &[&str]) {
    let statuses: Vec<&str> = summary["images"]
        .as_array()
        .expect("images array")
        .iter()
        .map(|image| image["status"].as_str().unwrap_or("?"))
        .collect();
    assert_eq!(statuses, expected);
}
