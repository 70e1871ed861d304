//! Complaint desk configuration.

use std::path::PathBuf;

/// Largest accepted attachment (5 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct DeskConfig {
    /// Directory attachments are written to. Served under `/uploads`.
    pub upload_dir: PathBuf,
    /// Attachment size limit in bytes.
    pub max_upload_bytes: usize,
    /// Base URL of the web client, used for links in emails.
    pub public_base_url: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            public_base_url: "http://localhost:3000".into(),
        }
    }
}

impl DeskConfig {
    /// Link to `path` on the web client.
    pub fn client_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), path)
    }
}
