pub mod artifacts;
pub mod batch;
pub mod image_io;
pub mod pipeline;
pub mod series_io;
pub mod timing;

pub use artifacts::{Artifact, ArtifactLayout};
pub use batch::{run_analysis, BatchEntry, BatchRunner};
pub use pipeline::{ImageOutcome, ImagePipeline};
pub use series_io::{average_files, read_series, write_profile};
pub use timing::measure;
