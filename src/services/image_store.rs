//! Image Store
//!
//! Validates and persists uploaded employee images, handing back a
//! fully-qualified URL under which the file can be retrieved.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use uuid::Uuid;

use crate::utils::AppError;

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported file extensions
const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Supported MIME types
const SUPPORTED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// A file received in a multipart request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as sent by the client
    pub filename: String,
    /// Declared MIME type from the multipart part, if any
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Filesystem-backed image storage
///
/// The storage directory is created at construction time (idempotent);
/// stored files are served under `{public_url}/uploads/{filename}`.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    public_url: String,
}

impl ImageStore {
    pub fn new(dir: PathBuf, public_url: impl Into<String>) -> Result<Self, AppError> {
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::internal(format!("Failed to create uploads directory: {}", e)))?;

        Ok(Self {
            dir,
            public_url: public_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Storage directory for serving files back
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate and store an uploaded image, returning its public URL
    pub fn save(&self, file: &UploadedFile) -> Result<String, AppError> {
        let ext = validate_image(file)?;

        let filename = format!("image-{}.{}", Uuid::new_v4(), ext);
        let file_path = self.dir.join(&filename);

        fs::write(&file_path, &file.data)
            .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

        tracing::info!(
            original_name = %file.filename,
            stored_name = %filename,
            size = %file.data.len(),
            "Image uploaded"
        );

        Ok(format!("{}/uploads/{}", self.public_url, filename))
    }
}

/// Validate an uploaded image, returning its normalized extension
///
/// Each rejection carries the specific reason: size, extension, declared
/// MIME type, extension/MIME mismatch, or spoofed content.
fn validate_image(file: &UploadedFile) -> Result<String, AppError> {
    if file.data.is_empty() {
        return Err(AppError::invalid_file("Empty file provided"));
    }

    if file.data.len() > MAX_FILE_SIZE {
        return Err(AppError::invalid_file(format!(
            "File too large ({} bytes). Maximum size is {} bytes (5 MB)",
            file.data.len(),
            MAX_FILE_SIZE
        )));
    }

    let ext = Path::new(&file.filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| {
            AppError::invalid_file(format!("File '{}' has no extension", file.filename))
        })?;

    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::invalid_file(format!(
            "Unsupported file extension '{}'. Supported: {}",
            ext,
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }

    let mime = file
        .content_type
        .as_deref()
        .ok_or_else(|| AppError::invalid_file("Missing content type on file field"))?;

    if !SUPPORTED_MIME_TYPES.contains(&mime) {
        return Err(AppError::invalid_file(format!(
            "Unsupported content type '{}'. Supported: {}",
            mime,
            SUPPORTED_MIME_TYPES.join(", ")
        )));
    }

    let expected_format = match ext.as_str() {
        "jpg" | "jpeg" => ImageFormat::Jpeg,
        _ => ImageFormat::Png,
    };

    if expected_format.to_mime_type() != mime {
        return Err(AppError::invalid_file(format!(
            "File extension '{}' does not match content type '{}'",
            ext, mime
        )));
    }

    // Sniff the actual bytes so a renamed file cannot pass as an image
    match image::guess_format(&file.data) {
        Ok(actual) if actual == expected_format => Ok(ext),
        Ok(actual) => Err(AppError::invalid_file(format!(
            "File content is {} but the declared type is '{}'",
            actual.to_mime_type(),
            mime
        ))),
        Err(_) => Err(AppError::invalid_file(
            "File content is not a recognized image format",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    fn png_file() -> UploadedFile {
        UploadedFile {
            filename: "avatar.png".to_string(),
            content_type: Some("image/png".to_string()),
            data: PNG_MAGIC.to_vec(),
        }
    }

    fn store() -> (tempfile::TempDir, ImageStore) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(tmp.path().join("uploads"), "http://localhost:5000/")
            .expect("image store");
        (tmp, store)
    }

    #[test]
    fn test_save_returns_public_url_and_writes_file() {
        let (_tmp, store) = store();
        let url = store.save(&png_file()).expect("save png");

        assert!(url.starts_with("http://localhost:5000/uploads/image-"));
        assert!(url.ends_with(".png"));

        let filename = url.rsplit('/').next().expect("filename");
        assert!(store.dir().join(filename).exists());
    }

    #[test]
    fn test_directory_creation_is_idempotent() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = tmp.path().join("uploads");
        ImageStore::new(dir.clone(), "http://localhost:5000").expect("first");
        ImageStore::new(dir, "http://localhost:5000").expect("second");
    }

    #[test]
    fn test_rejects_oversized_file() {
        let (_tmp, store) = store();
        let mut data = JPEG_MAGIC.to_vec();
        data.resize(6 * 1024 * 1024, 0);

        let err = store
            .save(&UploadedFile {
                filename: "big.jpg".to_string(),
                content_type: Some("image/jpeg".to_string()),
                data,
            })
            .unwrap_err();

        match err {
            AppError::InvalidFile(reason) => assert!(reason.contains("too large")),
            other => panic!("expected InvalidFile, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unsupported_extension() {
        let (_tmp, store) = store();
        let err = store
            .save(&UploadedFile {
                filename: "anim.gif".to_string(),
                content_type: Some("image/png".to_string()),
                data: b"GIF89a\x00\x00".to_vec(),
            })
            .unwrap_err();

        match err {
            AppError::InvalidFile(reason) => assert!(reason.contains("extension 'gif'")),
            other => panic!("expected InvalidFile, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_extension_mime_mismatch() {
        let (_tmp, store) = store();
        let err = store
            .save(&UploadedFile {
                filename: "avatar.png".to_string(),
                content_type: Some("image/jpeg".to_string()),
                data: PNG_MAGIC.to_vec(),
            })
            .unwrap_err();

        match err {
            AppError::InvalidFile(reason) => assert!(reason.contains("does not match")),
            other => panic!("expected InvalidFile, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_spoofed_content() {
        let (_tmp, store) = store();
        let err = store
            .save(&UploadedFile {
                filename: "avatar.png".to_string(),
                content_type: Some("image/png".to_string()),
                data: b"GIF89a\x00\x00".to_vec(),
            })
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidFile(_)));
    }

    #[test]
    fn test_rejects_unsupported_mime_type() {
        let (_tmp, store) = store();
        let err = store
            .save(&UploadedFile {
                filename: "avatar.png".to_string(),
                content_type: Some("image/webp".to_string()),
                data: PNG_MAGIC.to_vec(),
            })
            .unwrap_err();

        match err {
            AppError::InvalidFile(reason) => assert!(reason.contains("content type 'image/webp'")),
            other => panic!("expected InvalidFile, got {:?}", other),
        }
    }
}
