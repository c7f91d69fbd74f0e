//! Scratch directory holding input images and the run output.

use std::path::{Path, PathBuf};

use colony_kit::ImageBuffer;
use colony_pigmentation::services::image_io;
use tempfile::TempDir;

pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    /// Save `image` as a PNG input and return its path.
    pub fn image(&self, name: &str, image: &ImageBuffer) -> PathBuf {
        let path = self.dir.path().join(format!("{name}.png"));
        image_io::save(image, &path).expect("Failed to write fixture image");
        path
    }

    /// A `.png` file that cannot be decoded.
    pub fn corrupt_image(&self, name: &str) -> PathBuf {
        let path = self.dir.path().join(format!("{name}.png"));
        std::fs::write(&path, b"\x89PNG but not really").expect("Failed to write corrupt image");
        path
    }

    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write fixture file");
        path
    }

    pub fn output_file(&self, relative: &str) -> PathBuf {
        self.output().join(relative)
    }

    pub fn read_output(&self, relative: &str) -> String {
        let path = self.output_file(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
    }

    pub fn summary(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_output("summary.json")).expect("summary.json is not JSON")
    }
}
