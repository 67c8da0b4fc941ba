//! Upload collaborator.
//!
//! The picker itself is the third-party widget running in the browser; the
//! engine only sees what it yields once the upload finishes.

use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Options handed to the upload picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerConfig {
    pub public_key: String,
    pub tabs: String,
    pub locale: String,
}

impl PickerConfig {
    /// Local files or links, Portuguese interface.
    pub fn new(public_key: &str) -> Self {
        Self {
            public_key: public_key.to_string(),
            tabs: "file url".to_string(),
            locale: "pt".to_string(),
        }
    }
}

/// A finished upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub content_url: String,
    pub unique_id: String,
}

#[derive(Debug)]
pub enum UploadError {
    Failed(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Failed(msg) => write!(f, "Upload failed: {msg}"),
        }
    }
}

#[async_trait]
pub trait Uploader: Send + Sync {
    /// Resolves once the user finishes or dismisses the picker.
    /// `None` means the picker was closed without a file.
    async fn open_picker(&self, config: &PickerConfig) -> Result<Option<UploadedFile>, UploadError>;
}

/// Yields the file the browser widget attached to a submitted form, once.
#[derive(Default)]
pub struct SubmittedUpload {
    file: Mutex<Option<UploadedFile>>,
}

impl SubmittedUpload {
    pub fn new(file: Option<UploadedFile>) -> Self {
        Self { file: Mutex::new(file) }
    }

    /// Build from the widget's hidden form fields; blank fields mean no file.
    pub fn from_fields(name: &str, content_url: &str, unique_id: &str) -> Self {
        let (name, content_url, unique_id) = (name.trim(), content_url.trim(), unique_id.trim());
        if content_url.is_empty() || unique_id.is_empty() {
            return Self::new(None);
        }
        Self::new(Some(UploadedFile {
            name: name.to_string(),
            content_url: content_url.to_string(),
            unique_id: unique_id.to_string(),
        }))
    }
}

#[async_trait]
impl Uploader for SubmittedUpload {
    async fn open_picker(&self, _config: &PickerConfig) -> Result<Option<UploadedFile>, UploadError> {
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        Ok(file.take())
    }
}
