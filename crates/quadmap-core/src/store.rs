//! On-disk image storage.
//!
//! Map overlays and tile imagery referenced by point payloads are kept as
//! flat files in a single directory, one blob per name. The tree never
//! touches this module; it is a sibling collaborator.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{QuadmapError, Result};

/// Stores raw image blobs in a directory, one file per image name.
#[derive(Debug, Clone)]
pub struct ImageStore {
    directory: PathBuf,
}

impl ImageStore {
    /// Open a store rooted at `directory`, creating the directory if it does
    /// not exist yet.
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Resolve an image name to its path, rejecting names that would escape
    /// the store directory.
    fn image_path(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(QuadmapError::InvalidImageName { name: name.to_string() });
        }
        Ok(self.directory.join(name))
    }

    /// Write image data, overwriting any previous blob under the same name.
    /// Returns the path of the saved file.
    pub fn save(&self, name: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.image_path(name)?;
        fs::write(&path, data)?;
        tracing::debug!(name, bytes = data.len(), "saved image");
        Ok(path)
    }

    /// Read an image's data. A missing image is an [`QuadmapError::ImageNotFound`]
    /// error, unlike [`ImageStore::delete`] where absence is a soft outcome.
    pub fn load(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.image_path(name)?;
        match fs::read(&path) {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(QuadmapError::ImageNotFound { name: name.to_string() })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete an image. Returns `false` when no such image existed.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let path = self.image_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(name, "deleted image");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("tiles").join("overlays");
        let store = ImageStore::open(&nested).unwrap();
        assert!(store.directory().is_dir());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let store = ImageStore::open(dir.path()).unwrap();

        let path = store.save("marker.png", b"not really a png").unwrap();
        assert!(path.exists());
        assert_eq!(store.load("marker.png").unwrap(), b"not really a png");

        // Overwrites silently.
        store.save("marker.png", b"newer bytes").unwrap();
        assert_eq!(store.load("marker.png").unwrap(), b"newer bytes");
    }

    #[test]
    fn test_load_missing_is_an_error() {
        let dir = tempdir().unwrap();
        let store = ImageStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.load("ghost.png"),
            Err(QuadmapError::ImageNotFound { .. })
        ));
    }

    #[test]
    fn test_delete_is_soft_on_missing() {
        let dir = tempdir().unwrap();
        let store = ImageStore::open(dir.path()).unwrap();

        store.save("tile.png", &[1, 2, 3]).unwrap();
        assert!(store.delete("tile.png").unwrap());
        assert!(!store.delete("tile.png").unwrap());
    }

    #[test]
    fn test_rejects_escaping_names() {
        let dir = tempdir().unwrap();
        let store = ImageStore::open(dir.path()).unwrap();
        for name in ["", ".", "..", "a/b.png", "a\\b.png"] {
            assert!(
                matches!(store.save(name, &[0]), Err(QuadmapError::InvalidImageName { .. })),
                "name {name:?} should be rejected"
            );
        }
    }
}
