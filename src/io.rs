//! Storage backends for persisted survey documents

use crate::error::{GeometryError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Storage backend types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Local file system
    FileSystem,
    /// Azure Blob Storage
    Azure,
}

impl StorageBackend {
    /// Parse storage backend from URL scheme
    pub fn from_url(url: &str) -> Result<Self> {
        let Some((scheme, rest)) = url.split_once("://") else {
            return Ok(StorageBackend::FileSystem);
        };
        match scheme.to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::FileSystem),
            "az" | "azure" => Ok(StorageBackend::Azure),
            "https" | "http" => {
                let host = rest.split('/').next().unwrap_or_default();
                if host.ends_with(".blob.core.windows.net") {
                    Ok(StorageBackend::Azure)
                } else {
                    Err(GeometryError::InvalidUrl(format!(
                        "{} is not a blob storage host",
                        host
                    )))
                }
            }
            _ => Err(GeometryError::InvalidUrl(format!(
                "Unknown scheme: {}",
                scheme
            ))),
        }
    }
}

/// Document storage for one survey location
#[async_trait]
pub trait SurveyStorage: Send + Sync {
    /// Read a named document
    async fn read(&self, name: &str) -> Result<Bytes>;

    /// Write a named document, replacing any previous content
    async fn write(&self, name: &str, data: &[u8]) -> Result<()>;

    async fn exists(&self, name: &str) -> Result<bool>;

    fn backend(&self) -> StorageBackend;
}

/// Survey documents in a local directory
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create storage rooted at `base_path`
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn full_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }
}

#[async_trait]
impl SurveyStorage for LocalStorage {
    async fn read(&self, name: &str) -> Result<Bytes> {
        let full_path = self.full_path(name);
        match fs::read(&full_path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(GeometryError::NotFound(
                full_path.display().to_string(),
            )),
            Err(e) => Err(GeometryError::Io(e)),
        }
    }

    async fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&full_path).await?;
        file.write_all(data).await?;
        file.flush().await?;
        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        Ok(fs::try_exists(self.full_path(name)).await?)
    }

    fn backend(&self) -> StorageBackend {
        StorageBackend::FileSystem
    }
}

/// Parse a survey URL and create its storage
///
/// Only local storage is provided. Blob URLs are recognised so callers get
/// a configuration error rather than a path on disk named after the URL.
pub fn create_storage(url: &str) -> Result<Box<dyn SurveyStorage>> {
    match StorageBackend::from_url(url)? {
        StorageBackend::FileSystem => {
            let path = url.strip_prefix("file://").unwrap_or(url);
            Ok(Box::new(LocalStorage::new(path)))
        }
        StorageBackend::Azure => Err(GeometryError::Configuration(format!(
            "blob storage is not available in this build: {}",
            url
        ))),
    }
}
