//! Save/share collaborator traits and the filesystem sink.

use crate::error::{ExportError, ExportResult};
use crate::BoxFuture;
use std::fs;
use std::path::PathBuf;

/// Collaborator persisting a structured export document.
pub trait DocumentSink: Send + Sync {
    fn save_document(&self, name: &str, json: &str) -> BoxFuture<'_, ExportResult<()>>;
}

/// Collaborator persisting a rendered image.
pub trait ImageSink: Send + Sync {
    fn save_image(&self, name: &str, png: &[u8]) -> BoxFuture<'_, ExportResult<()>>;
}

/// Collaborator handing a rendered image to the platform share mechanism.
pub trait ShareSink: Send + Sync {
    fn share_image(&self, name: &str, png: &[u8]) -> BoxFuture<'_, ExportResult<()>>;
}

/// Filesystem sink writing exports into a directory.
pub struct DirectorySink {
    base_path: PathBuf,
}

impl DirectorySink {
    /// Create a sink rooted at `base_path`, creating the directory if it
    /// doesn't exist.
    pub fn new(base_path: PathBuf) -> ExportResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                ExportError::Save(format!("failed to create export directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Get the base path.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// Resolve a file path for an export name, keeping it filename-safe.
    fn file_path(&self, name: &str) -> PathBuf {
        let safe_name: String = name
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(safe_name)
    }
}

impl DocumentSink for DirectorySink {
    fn save_document(&self, name: &str, json: &str) -> BoxFuture<'_, ExportResult<()>> {
        let path = self.file_path(name);
        let contents = json.as_bytes().to_vec();
        Box::pin(async move {
            fs::write(&path, contents).map_err(|e| {
                ExportError::Save(format!("failed to write {}: {}", path.display(), e))
            })
        })
    }
}

impl ImageSink for DirectorySink {
    fn save_image(&self, name: &str, png: &[u8]) -> BoxFuture<'_, ExportResult<()>> {
        let path = self.file_path(name);
        let contents = png.to_vec();
        Box::pin(async move {
            fs::write(&path, contents).map_err(|e| {
                ExportError::Save(format!("failed to write {}: {}", path.display(), e))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::block_on;
    use tempfile::tempdir;

    #[test]
    fn test_save_document() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().to_path_buf()).unwrap();

        block_on(sink.save_document("diagram.json", "{\"shapes\":[]}")).unwrap();
        let written = fs::read_to_string(dir.path().join("diagram.json")).unwrap();
        assert_eq!(written, "{\"shapes\":[]}");
    }

    #[test]
    fn test_save_image() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().to_path_buf()).unwrap();

        block_on(sink.save_image("diagram.png", &[1, 2, 3])).unwrap();
        assert_eq!(fs::read(dir.path().join("diagram.png")).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_sanitizes_names() {
        let dir = tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().to_path_buf()).unwrap();

        block_on(sink.save_document("weird/na:me.json", "{}")).unwrap();
        assert!(dir.path().join("weird_na_me.json").exists());
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("exports").join("nested");
        let sink = DirectorySink::new(nested.clone()).unwrap();
        assert!(nested.exists());
        assert_eq!(sink.base_path(), &nested);
    }
}
