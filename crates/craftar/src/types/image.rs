//! In-memory image payloads.

use std::path::Path;

use tracing::debug;

use crate::error::Error;

pub const JPEG: &str = "image/jpeg";
pub const PNG: &str = "image/png";
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Encoded image bytes plus their content type.
///
/// Used for every file-backed payload: reference image uploads and query
/// images. The bytes live in memory, so the source file is closed before a
/// request is built.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    bytes: Vec<u8>,
    content_type: String,
    file_name: String,
}

impl ImageDescriptor {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
            file_name: "image".to_string(),
        }
    }

    /// Read an image file into memory.
    ///
    /// The content type is inferred from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        debug!(path = %path.display(), len = bytes.len(), "Read image file");

        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("image")
            .to_string();

        Ok(Self {
            bytes,
            content_type: content_type_for(path).to_string(),
            file_name,
        })
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ImageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageDescriptor")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Content type for a file path, by extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
        JPEG
    } else if ext.eq_ignore_ascii_case("png") {
        PNG
    } else {
        OCTET_STREAM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type_for(Path::new("a.jpg")), JPEG);
        assert_eq!(content_type_for(Path::new("a.JPEG")), JPEG);
        assert_eq!(content_type_for(Path::new("dir/b.PNG")), PNG);
        assert_eq!(content_type_for(Path::new("c.gif")), OCTET_STREAM);
        assert_eq!(content_type_for(Path::new("noext")), OCTET_STREAM);
    }

    #[tokio::test]
    async fn reads_file_into_memory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("query.png");
        std::fs::write(&path, b"fake png").unwrap();

        let image = ImageDescriptor::from_path(&path).await.unwrap();
        assert_eq!(image.bytes(), b"fake png");
        assert_eq!(image.content_type(), PNG);
        assert_eq!(image.file_name(), "query.png");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ImageDescriptor::from_path(dir.path().join("missing.jpg")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
