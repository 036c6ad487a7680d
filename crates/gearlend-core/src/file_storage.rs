//! Item image storage.
//!
//! Uploaded images are handed to a [`FileStorage`] backend which keeps the bytes
//! and gives back an opaque key ("handle"). The handle is what gets stored on
//! the item row; the public URL is derived from it on demand.
//!
//! # Example
//!
//! ```ignore
//! use gearlend_core::file_storage::{LocalFileStorage, store_image};
//! use std::path::PathBuf;
//!
//! let storage = LocalFileStorage::new(
//!     PathBuf::from("./static/images"),
//!     "/static/images".to_string(),
//! );
//!
//! let handle = store_image(&storage, "projector.PNG", &bytes).await?;
//! let url = storage.get_url(&handle)?;
//! ```

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use tokio::fs;
use uuid::Uuid;

/// Extensions accepted for item images (compared case-insensitively).
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

type StorageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StorageError>> + Send + 'a>>;

/// Abstract trait for file storage backends.
pub trait FileStorage: Send + Sync {
    /// Save file content under `key` and return the key.
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String>;

    /// Delete a file by key. Missing files are not an error.
    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()>;

    /// Public URL for a stored key.
    fn get_url(&self, key: &str) -> Result<String, StorageError>;
}

#[derive(Debug)]
pub enum StorageError {
    /// File exceeds maximum allowed size.
    InvalidFileSize { max_bytes: usize },

    /// Filename extension is not one of [`ALLOWED_IMAGE_EXTENSIONS`].
    UnsupportedExtension { extension: String },

    IoError(std::io::Error),

    NotFound,

    /// Invalid storage key format.
    InvalidKey(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFileSize { max_bytes } => {
                write!(f, "File exceeds maximum size of {} bytes", max_bytes)
            }
            Self::UnsupportedExtension { extension } => {
                write!(
                    f,
                    "Extension '{}' not allowed. Allowed extensions: {}",
                    extension,
                    ALLOWED_IMAGE_EXTENSIONS.join(", ")
                )
            }
            Self::IoError(e) => write!(f, "I/O error: {}", e),
            Self::NotFound => write!(f, "File not found"),
            Self::InvalidKey(msg) => write!(f, "Invalid storage key: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

/// Returns the lowercased extension of `filename` if it is an allowed image type.
pub fn allowed_image_extension(filename: &str) -> Result<String, StorageError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(StorageError::UnsupportedExtension { extension })
    }
}

/// Reduces an uploaded filename to a safe, flat name.
///
/// Path components are dropped, whitespace becomes `_`, anything outside
/// `[A-Za-z0-9._-]` is removed, runs of dots collapse to one and leading dots
/// are stripped.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();

    let mut cleaned = String::with_capacity(base.len());
    for c in base.chars() {
        let c = if c.is_whitespace() { '_' } else { c };
        if !(c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_') {
            continue;
        }
        if c == '.' && cleaned.ends_with('.') {
            continue;
        }
        cleaned.push(c);
    }

    cleaned.trim_start_matches('.').to_string()
}

/// Builds the storage handle for an uploaded image: `<uuid>_<sanitized name>`.
pub fn image_handle(original_filename: &str) -> Result<String, StorageError> {
    let extension = allowed_image_extension(original_filename)?;
    let sanitized = sanitize_filename(original_filename);

    let name = if sanitized.is_empty() || !sanitized.contains('.') {
        format!("image.{}", extension)
    } else {
        sanitized
    };

    Ok(format!("{}_{}", Uuid::new_v4().simple(), name))
}

/// Validates and stores an uploaded item image, returning its handle.
pub async fn store_image(
    storage: &dyn FileStorage,
    original_filename: &str,
    content: &[u8],
) -> Result<String, StorageError> {
    let handle = image_handle(original_filename)?;
    storage.save(&handle, content).await
}

/// Local filesystem-based file storage implementation.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    base_dir: PathBuf,

    /// Public URL prefix (e.g. "/static/images")
    base_url: String,

    max_file_size: usize,
}

impl LocalFileStorage {
    pub fn new(base_dir: PathBuf, base_url: String) -> Self {
        Self::with_max_size(base_dir, base_url, 5 * 1024 * 1024)
    }

    pub fn with_max_size(base_dir: PathBuf, base_url: String, max_file_size: usize) -> Self {
        Self {
            base_dir,
            base_url,
            max_file_size,
        }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Validate storage key format to prevent path traversal.
    fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Key must not be empty, contain '..', or start with '/'".to_string(),
            ));
        }

        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            return Err(StorageError::InvalidKey(
                "Key contains invalid characters".to_string(),
            ));
        }

        Ok(())
    }
}

impl FileStorage for LocalFileStorage {
    fn save<'a>(&'a self, key: &'a str, content: &'a [u8]) -> StorageFuture<'a, String> {
        Box::pin(async move {
            Self::validate_key(key)?;

            if content.len() > self.max_file_size {
                return Err(StorageError::InvalidFileSize {
                    max_bytes: self.max_file_size,
                });
            }

            fs::create_dir_all(&self.base_dir).await?;
            fs::write(self.base_dir.join(key), content).await?;

            tracing::debug!(key, bytes = content.len(), "stored file");
            Ok(key.to_string())
        })
    }

    fn delete<'a>(&'a self, key: &'a str) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            Self::validate_key(key)?;

            match fs::remove_file(self.base_dir.join(key)).await {
                Ok(_) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn get_url(&self, key: &str) -> Result<String, StorageError> {
        Self::validate_key(key)?;
        Ok(format!("{}/{}", self.base_url.trim_end_matches('/'), key))
    }
}
