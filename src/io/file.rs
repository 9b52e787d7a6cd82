use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::model::Dataset;

/// Load a dataset from a JSON file.
pub fn load_dataset(path: &Path) -> LoadResult<Dataset> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset: Dataset = serde_json::from_str(&json)?;
    log::info!(
        "Loaded dataset '{}' from {} ({} milestones)",
        dataset.title,
        path.display(),
        dataset.milestones.len()
    );
    Ok(dataset)
}
