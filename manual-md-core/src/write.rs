use std::fs;
use std::path::Path;

use tracing::debug;

use crate::contract::DocumentSink;

/// Writes documents straight to the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSink;

impl DocumentSink for FsSink {
    fn create_dir(&self, dir: &Path) -> std::io::Result<()> {
        debug!(dir = %dir.display(), "Ensuring output directory exists");
        fs::create_dir_all(dir)
    }

    fn write_document(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        debug!(path = %path.display(), bytes = contents.len(), "Writing document");
        fs::write(path, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrites_existing_documents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("multi").join("manual");
        FsSink.create_dir(&nested).unwrap();
        FsSink.create_dir(&nested).unwrap();

        let target = nested.join("_index.md");
        FsSink.write_document(&target, "old").unwrap();
        FsSink.write_document(&target, "new").unwrap();
        assert_eq!(fs::read_to_string(target).unwrap(), "new");
    }
}
