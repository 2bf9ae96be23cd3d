//! Attachment storage on the local filesystem
//!
//! Files are stored flat under the configured uploads directory, keyed by a
//! random name with the original extension preserved. Metadata is not kept in
//! the database; the returned path is the handle.

use std::path::{Path, PathBuf};

/// Save an uploaded attachment, returning the stored path.
pub async fn save_attachment(
    dir: &Path,
    original_filename: &str,
    data: &[u8],
) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;

    let ext = Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let filename = format!("{}{}", uuid::Uuid::new_v4().simple(), ext);

    let path = dir.join(filename);
    tokio::fs::write(&path, data).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_file_and_keeps_extension() {
        let dir = std::env::temp_dir().join(format!("uploads-{}", uuid::Uuid::new_v4()));

        let path = save_attachment(&dir, "photo.jpg", b"fake-jpeg-bytes")
            .await
            .unwrap();

        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("jpg"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"fake-jpeg-bytes");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn handles_missing_extension() {
        let dir = std::env::temp_dir().join(format!("uploads-{}", uuid::Uuid::new_v4()));

        let path = save_attachment(&dir, "README", b"text").await.unwrap();
        assert_eq!(path.extension(), None);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
