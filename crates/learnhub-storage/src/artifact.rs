//! Local filesystem artifact store.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use learnhub_core::error::{AppError, ErrorKind};
use learnhub_core::result::AppResult;

/// Stores generated artifacts under a single root directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    /// Root directory for all stored artifacts.
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a new store rooted at the given path, creating it if needed.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create artifact root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Root directory the store writes into.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative file name to an absolute path within the root.
    fn resolve(&self, name: &str) -> PathBuf {
        let clean = name.trim_start_matches('/');
        self.root.join(clean)
    }

    /// Write an artifact, creating parent directories as needed.
    pub async fn write(&self, name: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(name);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write artifact: {name}"),
                e,
            )
        })?;

        debug!(name, bytes = data.len(), "Wrote artifact");
        Ok(())
    }

    /// Read an artifact back.
    pub async fn read_bytes(&self, name: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(name);
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Artifact not found: {name}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read artifact: {name}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    /// Check whether an artifact exists.
    pub async fn exists(&self, name: &str) -> AppResult<bool> {
        Ok(self.resolve(name).exists())
    }

    /// Delete an artifact; missing files are not an error.
    pub async fn delete(&self, name: &str) -> AppResult<()> {
        let full_path = self.resolve(name);
        if full_path.exists() {
            fs::remove_file(&full_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete artifact: {name}"),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        let data = Bytes::from("pdf bytes");
        store.write("cert_a_b_1.pdf", data.clone()).await.unwrap();

        assert!(store.exists("cert_a_b_1.pdf").await.unwrap());
        assert_eq!(store.read_bytes("cert_a_b_1.pdf").await.unwrap(), data);

        store.delete("cert_a_b_1.pdf").await.unwrap();
        assert!(!store.exists("cert_a_b_1.pdf").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_read_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        let err = store.read_bytes("missing.pdf").await.unwrap_err();
        assert_eq!(err.kind, learnhub_core::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        store.delete("never-existed.pdf").await.unwrap();
    }
}
