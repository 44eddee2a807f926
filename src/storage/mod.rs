//! Output persistence: the JSON record sink, run-level reset of previous
//! artifacts, and image materialization.

pub mod images;

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;
use crate::extractor::PlaceRecord;

/// Output files earlier versions of the tool wrote; removed on reset so a
/// fresh run never sits next to stale data.
const LEGACY_OUTPUT_FILES: &[&str] = &["all_places.json", "restaurants.json", "places.json"];
const LEGACY_IMAGE_DIRS: &[&str] = &["kudago_images", "places_images"];

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write the whole run's records as a pretty-printed JSON array.
pub fn save_records(records: &[PlaceRecord], path: &str) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(records)?;
    fs::write(path, json)?;
    info!(path, count = records.len(), "records saved");
    Ok(())
}

/// Delete output artifacts of previous runs. Individual failures are
/// logged and skipped; a missing file is not a failure.
pub fn reset_outputs(config: &Config) {
    let mut files: Vec<&str> = vec![config.output_file()];
    files.extend(LEGACY_OUTPUT_FILES);
    files.dedup();

    for file in files {
        let path = Path::new(file);
        if path.exists() {
            if let Err(e) = fs::remove_file(path) {
                warn!(file, error = %e, "could not remove previous output file");
            }
        }
    }

    let mut dirs: Vec<&str> = vec![config.images_dir()];
    dirs.extend(LEGACY_IMAGE_DIRS);
    dirs.dedup();

    for dir in dirs {
        let path = Path::new(dir);
        if path.exists() {
            if let Err(e) = fs::remove_dir_all(path) {
                warn!(dir, error = %e, "could not remove previous image directory");
            }
        }
    }
}
