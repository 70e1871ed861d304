//! Complaint attachments: type and size checks, then storage on disk.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::Utc;
use maintabit_core::error::{MaintabitError, MaintabitResult};
use rand::Rng;
use tracing::{debug, error};

/// Accepted extensions and the MIME types each may arrive with.
const ALLOWED: &[(&str, &[&str])] = &[
    ("pdf", &["application/pdf"]),
    ("doc", &["application/msword"]),
    (
        "docx",
        &["application/vnd.openxmlformats-officedocument.wordprocessingml.document"],
    ),
    ("jpg", &["image/jpeg", "image/jpg"]),
    ("jpeg", &["image/jpeg", "image/jpg"]),
    ("png", &["image/png"]),
];

pub const UNSUPPORTED_FORMAT: &str =
    "Unsupported file format. Allowed: PDF, DOC, DOCX, JPG, JPEG, PNG";

/// Public path prefix stored files are served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl Attachment {
    /// Lower-cased extension of the original file name.
    fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Check size, extension and MIME type. Returns the normalized
    /// extension.
    pub fn validate(&self, max_bytes: usize) -> MaintabitResult<String> {
        if self.data.len() > max_bytes {
            return Err(MaintabitError::validation(format!(
                "File too large. Maximum size is {} MB",
                max_bytes / (1024 * 1024)
            )));
        }

        let ext = self
            .extension()
            .ok_or_else(|| MaintabitError::validation(UNSUPPORTED_FORMAT))?;
        let mime = self
            .content_type
            .as_deref()
            .map(|m| m.split(';').next().unwrap_or(m).trim().to_ascii_lowercase())
            .unwrap_or_default();

        let accepted = ALLOWED
            .iter()
            .any(|(allowed_ext, mimes)| *allowed_ext == ext && mimes.contains(&mime.as_str()));
        if accepted {
            Ok(ext)
        } else {
            Err(MaintabitError::validation(UNSUPPORTED_FORMAT))
        }
    }
}

/// Collision-resistant stored name: `<unix-millis>-<random>.<ext>`.
fn stored_name(ext: &str) -> String {
    let suffix: [u8; 6] = rand::rng().random();
    format!(
        "{}-{}.{ext}",
        Utc::now().timestamp_millis(),
        hex::encode(suffix)
    )
}

/// Writes validated attachments into one directory.
#[derive(Debug, Clone)]
pub struct AttachmentStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl AttachmentStore {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate and persist an attachment. Returns the public path
    /// (`/uploads/<name>`) recorded on the complaint.
    pub async fn store(&self, attachment: &Attachment) -> MaintabitResult<String> {
        let ext = attachment.validate(self.max_bytes)?;
        let name = stored_name(&ext);

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            error!(dir = %self.dir.display(), error = %e, "Failed to create upload directory");
            MaintabitError::Internal(format!("upload directory: {e}"))
        })?;
        tokio::fs::write(self.dir.join(&name), &attachment.data)
            .await
            .map_err(|e| {
                error!(file = %name, error = %e, "Failed to write attachment");
                MaintabitError::Internal(format!("write attachment: {e}"))
            })?;

        debug!(file = %name, bytes = attachment.data.len(), "Attachment stored");
        Ok(format!("{PUBLIC_PREFIX}/{name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, mime: &str, len: usize) -> Attachment {
        Attachment {
            file_name: name.into(),
            content_type: Some(mime.into()),
            data: Bytes::from(vec![0u8; len]),
        }
    }

    const LIMIT: usize = 5 * 1024 * 1024;

    #[test]
    fn accepts_allowed_types() {
        assert_eq!(file("fan.JPG", "image/jpeg", 10).validate(LIMIT).unwrap(), "jpg");
        assert_eq!(file("report.pdf", "application/pdf", 10).validate(LIMIT).unwrap(), "pdf");
        file("x.png", "image/png; charset=binary", 10)
            .validate(LIMIT)
            .unwrap();
    }

    #[test]
    fn rejects_mismatched_extension_or_mime() {
        assert!(file("evil.exe", "application/pdf", 10).validate(LIMIT).is_err());
        assert!(file("photo.png", "text/html", 10).validate(LIMIT).is_err());
        assert!(file("noext", "image/png", 10).validate(LIMIT).is_err());
    }

    #[test]
    fn enforces_size_limit() {
        assert!(file("a.png", "image/png", LIMIT).validate(LIMIT).is_ok());
        let err = file("a.png", "image/png", LIMIT + 1)
            .validate(LIMIT)
            .unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn stored_names_are_distinct() {
        let a = stored_name("png");
        let b = stored_name("png");
        assert_ne!(a, b);
        assert!(a.ends_with(".png"));
    }

    #[tokio::test]
    async fn store_writes_file_under_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = AttachmentStore::new(dir.path().join("uploads"), LIMIT);

        let path = store
            .store(&file("fan.png", "image/png", 32))
            .await
            .unwrap();
        assert!(path.starts_with("/uploads/"));

        let name = path.trim_start_matches("/uploads/");
        let written = std::fs::read(store.dir().join(name)).unwrap();
        assert_eq!(written.len(), 32);
    }
}
