//! Manual discovery and deserialization.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::{debug, error, info};

use crate::error::PipelineError;

pub const MANUAL_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// All manual files directly inside `dir`, sorted by file name.
pub fn list_manuals(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let read_dir_err = |source| PipelineError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut manuals = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        let is_manual = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| MANUAL_EXTENSIONS.contains(&ext));
        if is_manual && path.is_file() {
            manuals.push(path);
        } else {
            debug!(path = %path.display(), "Skipping non-manual entry");
        }
    }
    manuals.sort();

    info!(dir = %dir.display(), count = manuals.len(), "Found manuals");
    Ok(manuals)
}

/// Parse one manual into a generic YAML tree; mapping and sequence order is kept as authored.
pub fn load_manual(path: &Path) -> Result<Value, PipelineError> {
    let content = fs::read_to_string(path).map_err(|source| {
        error!(error = ?source, path = %path.display(), "Failed to read manual");
        PipelineError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    serde_yaml::from_str(&content).map_err(|source| {
        error!(error = ?source, path = %path.display(), "Failed to parse manual YAML");
        PipelineError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })
}
