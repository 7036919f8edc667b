//! Disk-backed blob storage for uploaded photos
//!
//! Files land under the configured root with a uuid-prefixed name and are
//! served publicly by a static-file layer mounted at `public_base`.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
};

/// A stored blob and its public address
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct StoredFile {
    pub name: String,
    pub public_url: String,
}

/// Strip directory components and suspicious characters from a client
/// filename, keeping the extension.
fn sanitize_filename(original: &str) -> String {
    let base = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[derive(Clone)]
pub struct StorageService {
    root: PathBuf,
    public_base: String,
}

impl StorageService {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.root),
            public_base: config.public_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn public_base(&self) -> &str {
        &self.public_base
    }

    /// Persist an uploaded blob and return its stored name and public URL
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> AppResult<StoredFile> {
        let name = format!("{}_{}", Uuid::new_v4(), sanitize_filename(original_name));
        let path = self.root.join(&name);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Storage(format!("Cannot create storage root: {}", e)))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Storage(format!("Cannot write {}: {}", name, e)))?;

        Ok(StoredFile {
            public_url: format!("{}/{}", self.public_base, name),
            name,
        })
    }

    /// Remove a stored blob by its stored name. A name that escapes the
    /// storage root is rejected before any filesystem access.
    pub async fn remove(&self, name: &str) -> AppResult<()> {
        if name.contains('/') || name.contains("..") {
            return Err(AppError::Validation("Invalid stored file name".to_string()));
        }

        let path = self.root.join(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("Stored file {} not found", name)))
            }
            Err(e) => Err(AppError::Storage(format!("Cannot remove {}: {}", name, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("/tmp/photo.jpg"), "photo.jpg");
    }

    #[test]
    fn test_sanitize_replaces_odd_characters() {
        assert_eq!(sanitize_filename("my photo (1).jpg"), "my_photo__1_.jpg");
        assert_eq!(sanitize_filename("ok-name_1.png"), "ok-name_1.png");
    }

    #[test]
    fn test_save_and_remove_roundtrip() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async {
            let dir = std::env::temp_dir().join(format!("clubhouse-storage-{}", Uuid::new_v4()));
            let service = StorageService::new(&StorageConfig {
                root: dir.to_string_lossy().to_string(),
                public_base: "/files/".to_string(),
            });

            let stored = service.save("photo.jpg", b"fake-bytes").await.unwrap();
            assert!(stored.public_url.starts_with("/files/"));
            assert!(stored.name.ends_with("photo.jpg"));

            service.remove(&stored.name).await.unwrap();
            assert!(service.remove(&stored.name).await.is_err());

            tokio::fs::remove_dir_all(&dir).await.ok();
        });
    }
}
