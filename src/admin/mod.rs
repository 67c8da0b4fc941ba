//! Headless admin panel engine.
//!
//! The router, panel controllers and views write only to a [`Surface`] and a
//! [`ChartSink`], and read only through a [`DocumentStore`]; the HTTP layer
//! supplies recording implementations and renders what they captured.
//!
//! [`Surface`]: surface::Surface
//! [`ChartSink`]: chart::ChartSink
//! [`DocumentStore`]: crate::store::DocumentStore

pub mod aggregate;
pub mod chart;
pub mod collection;
pub mod panels;
pub mod recorder;
pub mod route;
pub mod rows;
pub mod router;
pub mod surface;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::StoreError;
use crate::upload::UploadError;

pub use route::Route;
pub use router::{Activation, Generation, PanelController, RouteError, Router, Ticket};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Blocking notification shown to the admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    /// CSS modifier used by the templates.
    pub fn css_class(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Info => "info",
        }
    }
}

/// Outcome of a rejected admin operation.
#[derive(Debug)]
pub enum AdminError {
    /// Local form check failed; nothing was sent to the store.
    Validation(Vec<String>),
    Remote(StoreError),
    Upload(UploadError),
    /// The admin declined the confirmation prompt.
    Cancelled,
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminError::Validation(errors) => write!(f, "Validation failed: {}", errors.join("; ")),
            AdminError::Remote(e) => write!(f, "Remote operation failed: {e}"),
            AdminError::Upload(e) => write!(f, "{e}"),
            AdminError::Cancelled => write!(f, "Cancelled by user"),
        }
    }
}

impl From<StoreError> for AdminError {
    fn from(e: StoreError) -> Self {
        AdminError::Remote(e)
    }
}
