use std::path::{Path, PathBuf};

use rand::{distributions::Alphanumeric, Rng};
use tracing::warn;

use crate::errors::ApiError;

/// Content types the upload endpoint accepts.
pub const ALLOWED_CONTENT_TYPES: [&str; 4] =
    ["image/jpg", "image/jpeg", "image/png", "image/webp"];

const STORED_NAME_PREFIX_LEN: usize = 8;

/// Local directory holding uploaded image bytes.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: PathBuf) -> MediaStore {
        MediaStore { root }
    }

    pub fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    pub fn is_allowed(content_type: &str) -> bool {
        ALLOWED_CONTENT_TYPES.contains(&content_type)
    }

    /// Writes the uploaded bytes under a prefixed name and returns that name.
    /// The random prefix keeps concurrent uploads of the same file name from
    /// overwriting each other.
    pub async fn save(&self, uploaded_name: &str, bytes: &[u8]) -> Result<String, ApiError> {
        let prefix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(STORED_NAME_PREFIX_LEN)
            .map(char::from)
            .collect();
        let stored_name = format!("{}_{}", prefix, sanitize_file_name(uploaded_name));
        tokio::fs::write(self.root.join(&stored_name), bytes).await?;
        Ok(stored_name)
    }

    /// Best-effort removal; a file that is already gone is logged, not
    /// surfaced to the caller.
    pub async fn remove(&self, file_name: &str) {
        let path = self.root.join(file_name);
        if let Err(error) = tokio::fs::remove_file(&path).await {
            warn!("Could not remove {}: {}", path.display(), error);
        }
    }
}

/// Strips any path components from a client-supplied file name.
fn sanitize_file_name(name: &str) -> &str {
    Path::new(name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_accepts_only_images() {
        assert!(MediaStore::is_allowed("image/png"));
        assert!(MediaStore::is_allowed("image/jpg"));
        assert!(MediaStore::is_allowed("image/jpeg"));
        assert!(MediaStore::is_allowed("image/webp"));
        assert!(!MediaStore::is_allowed("application/pdf"));
        assert!(!MediaStore::is_allowed("image/gif"));
        assert!(!MediaStore::is_allowed(""));
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_file_name("cat.png"), "cat.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("a/b/c.jpg"), "c.jpg");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[tokio::test]
    async fn save_prefixes_the_uploaded_name() {
        let dir = std::env::temp_dir().join("chirp-media-store-test");
        let store = MediaStore::new(dir.clone());
        store.ensure_dir().unwrap();

        let stored = store.save("cat.png", b"not really a png").await.unwrap();
        assert!(stored.ends_with("_cat.png"));
        assert_eq!(stored.len(), STORED_NAME_PREFIX_LEN + "_cat.png".len());

        let on_disk = tokio::fs::read(dir.join(&stored)).await.unwrap();
        assert_eq!(on_disk, b"not really a png");
        store.remove(&stored).await;
        assert!(!dir.join(&stored).exists());
    }
}
