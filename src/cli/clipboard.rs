//! Clipboard access with timed copy feedback.

use std::time::{Duration, Instant};

use thiserror::Error;

/// How long the "Copied" confirmation holds before reverting.
pub const FEEDBACK_HOLD: Duration = Duration::from_secs(2);

/// Errors that can occur during clipboard access.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Copy text to the system clipboard and return the feedback state.
pub fn copy_text(text: &str) -> Result<CopyFeedback, ClipboardError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

    Ok(CopyFeedback::new())
}

/// Confirmation state for a copy action.
///
/// Reports "Copied" for a fixed hold after the copy, then reverts to the
/// default "Copy" label.
#[derive(Debug, Clone, Copy)]
pub struct CopyFeedback {
    copied_at: Instant,
}

impl CopyFeedback {
    /// Record a copy happening now.
    pub fn new() -> Self {
        Self::at(Instant::now())
    }

    /// Record a copy at a specific moment.
    pub fn at(copied_at: Instant) -> Self {
        Self { copied_at }
    }

    /// The label to show at the given moment.
    pub fn label_at(&self, now: Instant) -> &'static str {
        if now.duration_since(self.copied_at) < FEEDBACK_HOLD {
            "Copied"
        } else {
            "Copy"
        }
    }

    /// The label to show right now.
    pub fn label(&self) -> &'static str {
        self.label_at(Instant::now())
    }
}

impl Default for CopyFeedback {
    fn default() -> Self {
        Self::new()
    }
}
