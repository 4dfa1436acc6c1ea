use crate::infrastructure::security::InputSanitizer;
use blog_errors::AppError;
use std::path::PathBuf;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Writes uploaded files below `root` and builds their public URLs.
#[derive(Clone)]
pub struct UploadStore {
    root: PathBuf,
    base_url: String,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Saves `bytes` as `<root>/<folder>/<file name>` and returns the URL it
    /// is served from.
    pub async fn save(&self, folder: &str, file_name: &str, bytes: &[u8]) -> Result<String, AppError> {
        if bytes.is_empty() {
            return Err(AppError::UserInput("Uploaded file is empty".to_string()));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::UserInput("Uploaded file exceeds 5MB".to_string()));
        }
        let file_name = InputSanitizer::sanitize_file_name(file_name)
            .ok_or_else(|| AppError::UserInput("Invalid file name".to_string()))?;

        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Internal(format!("cannot create {}: {e}", dir.display())))?;

        let path = dir.join(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("cannot write {}: {e}", path.display())))?;

        tracing::info!("Stored upload {} ({} bytes)", path.display(), bytes.len());
        Ok(self.url_for(folder, &file_name))
    }

    pub fn url_for(&self, folder: &str, file_name: &str) -> String {
        format!("{}/uploads/{}/{}", self.base_url, folder, file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_trims_trailing_slash() {
        let store = UploadStore::new("uploads", "http://localhost:4000/");
        assert_eq!(
            store.url_for("categories", "rust.png"),
            "http://localhost:4000/uploads/categories/rust.png"
        );
    }

    #[tokio::test]
    async fn test_save_writes_sanitized_name() {
        let root = std::env::temp_dir().join(format!("blog-upload-{}", uuid::Uuid::new_v4()));
        let store = UploadStore::new(&root, "http://cdn.test");

        let url = store.save("categories", "../evil.png", b"png").await.unwrap();

        assert_eq!(url, "http://cdn.test/uploads/categories/evil.png");
        let written = tokio::fs::read(root.join("categories").join("evil.png")).await.unwrap();
        assert_eq!(written, b"png");

        tokio::fs::remove_dir_all(&root).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_rejects_oversized_file() {
        let store = UploadStore::new(std::env::temp_dir(), "http://cdn.test");
        let bytes = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let err = store.save("categories", "big.png", &bytes).await.unwrap_err();
        assert!(matches!(err, AppError::UserInput(_)));
    }

    #[tokio::test]
    async fn test_save_rejects_empty_name() {
        let store = UploadStore::new(std::env::temp_dir(), "http://cdn.test");
        let err = store.save("categories", "..", b"x").await.unwrap_err();
        assert!(matches!(err, AppError::UserInput(_)));
    }
}
