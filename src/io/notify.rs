//! User-facing messages about the outcome of an update

use crate::error::TubeMatterError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The outcome of one update, as reported to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    MissingCredential,
    NoLinkFound,
    /// A link was found but names no single video
    IdentifierMissing,
    UpdateFailed { reason: String },
    Updated,
    /// The front matter already held the fetched values
    Unchanged,
}

impl Notice {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Updated | Self::Unchanged)
    }
}

impl From<&TubeMatterError> for Notice {
    fn from(err: &TubeMatterError) -> Self {
        match err {
            TubeMatterError::MissingCredential => Self::MissingCredential,
            TubeMatterError::NoLinkFound => Self::NoLinkFound,
            TubeMatterError::IdentifierMissing => Self::IdentifierMissing,
            other => Self::UpdateFailed {
                reason: other.to_string(),
            },
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCredential => {
                write!(f, "Please enter your YouTube Data API Key in settings.")
            }
            Self::NoLinkFound | Self::IdentifierMissing => {
                write!(f, "No YouTube link found in the file.")
            }
            Self::UpdateFailed { .. } => write!(
                f,
                "Error updating properties. Please check your YouTube Data API Key or try again later."
            ),
            Self::Updated => write!(f, "Channel and video details updated."),
            Self::Unchanged => write!(f, "Channel and video details already up to date."),
        }
    }
}

/// Fire-and-forget sink for notices
pub trait Notifier {
    fn notify(&self, path: &Path, notice: &Notice);
}

/// Prints notices to stderr and logs failure details
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    preview: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier for runs that print the result instead of saving it
    pub fn preview() -> Self {
        Self { preview: true }
    }

    /// The line printed for `notice`
    pub fn message(&self, path: &Path, notice: &Notice) -> String {
        match notice {
            Notice::Updated if self.preview => format!(
                "{}: Channel and video details fetched (preview only, file not written).",
                path.display()
            ),
            _ => format!("{}: {}", path.display(), notice),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, path: &Path, notice: &Notice) {
        if let Notice::UpdateFailed { reason } = notice {
            log::error!("{}: {}", path.display(), reason);
        }
        eprintln!("{}", self.message(path, notice));
    }
}

/// Keeps every notice it receives
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(PathBuf, Notice)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(PathBuf, Notice)> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, path: &Path, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((path.to_path_buf(), notice.clone()));
    }
}
