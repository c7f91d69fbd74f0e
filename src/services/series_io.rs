//! Reading and writing sample series files.

use std::path::{Path, PathBuf};

use colony_kit::{series, PigmentationSample};

use super::artifacts::one_dimension_path;
use crate::error::RunError;

pub fn read_series(path: &Path) -> Result<Vec<PigmentationSample>, RunError> {
    let contents = std::fs::read_to_string(path).map_err(|e| RunError::io(path, e))?;
    series::parse(&contents).map_err(|source| RunError::Series {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `samples` to `path` and their one-dimensional histogram next to it.
///
/// Returns the path of the histogram file.
pub fn write_profile(path: &Path, samples: &[PigmentationSample]) -> Result<PathBuf, RunError> {
    std::fs::write(path, series::to_csv(samples)).map_err(|e| RunError::io(path, e))?;

    let histogram = one_dimension_path(path);
    std::fs::write(&histogram, series::one_dimension_csv(samples))
        .map_err(|e| RunError::io(&histogram, e))?;
    Ok(histogram)
}

/// Average previously written series files into `output`.
pub fn average_files(
    inputs: &[PathBuf],
    output: &Path,
) -> Result<Vec<PigmentationSample>, RunError> {
    let series = inputs
        .iter()
        .map(|path| read_series(path))
        .collect::<Result<Vec<_>, _>>()?;

    let averaged = colony_kit::average(&series).map_err(RunError::Aggregation)?;
    write_profile(output, &averaged)?;

    tracing::info!(
        inputs = inputs.len(),
        samples = averaged.len(),
        output = %output.display(),
        "Averaged series"
    );
    Ok(averaged)
}
