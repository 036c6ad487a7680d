use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// Directory uploaded item images are written to.
    pub upload_dir: PathBuf,
    /// URL prefix the upload directory is served under.
    pub public_base_url: String,
    pub max_file_size: usize,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("static/images")),
            public_base_url: env::var("UPLOAD_BASE_URL")
                .unwrap_or_else(|_| "/static/images".to_string()),
            max_file_size: env::var("UPLOAD_MAX_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5 * 1024 * 1024),
        }
    }
}
