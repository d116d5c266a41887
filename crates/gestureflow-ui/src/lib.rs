#![warn(missing_docs)]
//! # gestureflow-ui
//!
//! ## Purpose
//! Defines the presentational projections the excluded rendering layer
//! consumes: transient notices and the interpretation feed view.
//!
//! ## Responsibilities
//! - Represent transient user-visible notices (the toast stand-in).
//! - Queue notices per controller until the rendering layer drains them.
//! - Project result lists into a feed view with its live-activity indicator.
//!
//! ## Data flow
//! Controllers push [`Notice`] values into their [`NoticeQueue`] as side
//! effects of user actions; the shell drains the queue each frame. Result
//! lists are projected through [`FeedView::project`] and serialized for the
//! rendering boundary.
//!
//! ## Error model
//! Only the JSON codec can fail ([`UiError::Codec`]); projections themselves
//! are total functions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Visual severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    /// Neutral progress information.
    Info,
    /// Confirmation of a completed action.
    Success,
    /// Recoverable failure the user should see.
    Error,
}

/// One transient, user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity used for visual treatment.
    pub level: NoticeLevel,
    /// Human-readable message text.
    pub message: String,
}

impl Notice {
    /// Creates an info notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Creates a success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Pending notices owned by one controller instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeQueue {
    pending: Vec<Notice>,
}

impl NoticeQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notice for the next drain.
    pub fn push(&mut self, notice: Notice) {
        self.pending.push(notice);
    }

    /// Removes and returns all pending notices in arrival order.
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }

    /// Returns the number of pending notices.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Render-ready view of one interpretation result feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedView {
    /// Result lines in emission order.
    pub entries: Vec<String>,
    /// Whether the pulsing live indicator is shown next to the heading.
    pub live_indicator: bool,
}

impl FeedView {
    /// Projects a result list for display.
    ///
    /// The live indicator appears only when the feed is non-empty and the
    /// owning surface is currently active or playing.
    pub fn project(results: &[String], surface_active: bool) -> Self {
        Self {
            entries: results.to_vec(),
            live_indicator: surface_active && !results.is_empty(),
        }
    }

    /// Serializes the view to compact JSON bytes.
    ///
    /// # Errors
    /// Returns [`UiError::Codec`] when JSON serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, UiError> {
        serde_json::to_vec(self).map_err(UiError::Codec)
    }

    /// Deserializes a view from JSON bytes.
    ///
    /// # Errors
    /// Returns [`UiError::Codec`] when JSON decoding fails.
    pub fn from_json_bytes(raw: &[u8]) -> Result<Self, UiError> {
        serde_json::from_slice(raw).map_err(UiError::Codec)
    }
}

/// UI projection errors.
#[derive(Debug, Error)]
pub enum UiError {
    /// JSON encoding/decoding error.
    #[error("ui codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    //! Unit tests for notice queueing and feed projection.

    use super::*;

    #[test]
    fn drain_empties_the_queue_in_order() {
        let mut queue = NoticeQueue::new();
        queue.push(Notice::info("Analyzing sign language gestures..."));
        queue.push(Notice::success("Sign language interpretation complete!"));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NoticeLevel::Info);
        assert!(queue.is_empty());
    }

    #[test]
    fn live_indicator_requires_entries_and_activity() {
        let results = vec!["Hello".to_string()];
        assert!(FeedView::project(&results, true).live_indicator);
        assert!(!FeedView::project(&results, false).live_indicator);
        assert!(!FeedView::project(&[], true).live_indicator);
    }

    #[test]
    fn feed_view_round_trips_through_json() {
        let view = FeedView::project(&["Hello".to_string()], true);
        let bytes = view.to_json_bytes().expect("encode should work");
        let decoded = FeedView::from_json_bytes(&bytes).expect("decode should work");
        assert_eq!(decoded, view);
    }
}
