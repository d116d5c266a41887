#![warn(missing_docs)]
//! # gestureflow-analysis
//!
//! ## Purpose
//! Produces the time-phased, scripted interpretation output that stands in
//! for a real recognition engine.
//!
//! ## Responsibilities
//! - Define the canonical per-surface interpretation scripts.
//! - Emit script lines in order on a virtual timeline, one per delay step.
//! - Guarantee append-only results and silence after cancellation.
//!
//! ## Data flow
//! A controller starts an [`AnalysisSession`] when its surface triggers
//! analysis, then polls it with the current virtual time; newly due lines are
//! appended to the session's result list, which the rendering layer displays.
//!
//! ## Ownership and lifetimes
//! Each session exclusively owns its result list. At most one session drives
//! a display list at a time; restarting means clearing the list and replacing
//! the whole session, never interleaving two scripts.
//!
//! ## Error model
//! Scripts are validated at construction ([`AnalysisError`]). A running
//! session cannot fail; this is a fixed deterministic playback, not a
//! fallible computation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Single interpretation line revealed for an analyzed image.
pub const IMAGE_SCRIPT_LINES: [&str; 1] = ["Hello, how are you?"];

/// Delay before the image interpretation line appears.
pub const IMAGE_STEP_DELAY_MS: u64 = 2_000;

/// Interpretation lines revealed while an uploaded video plays.
pub const VIDEO_SCRIPT_LINES: [&str; 5] = [
    "Hello",
    "My name is John",
    "Nice to meet you",
    "How are you today?",
    "I am learning sign language",
];

/// Spacing between video interpretation lines.
pub const VIDEO_STEP_DELAY_MS: u64 = 2_000;

/// Interpretation lines revealed during live capture.
pub const LIVE_SCRIPT_LINES: [&str; 5] = [
    "Hello",
    "Welcome",
    "How are you?",
    "Thank you",
    "Good to see you",
];

/// Spacing between live interpretation lines.
pub const LIVE_STEP_DELAY_MS: u64 = 3_000;

/// Ordered interpretation lines plus the delay between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisScript {
    lines: Vec<String>,
    step_delay_ms: u64,
}

impl AnalysisScript {
    /// Creates a validated script.
    ///
    /// # Errors
    /// Returns [`AnalysisError::EmptyScript`] for zero lines and
    /// [`AnalysisError::InvalidStepDelay`] for a zero delay.
    pub fn new(lines: Vec<String>, step_delay_ms: u64) -> Result<Self, AnalysisError> {
        if lines.is_empty() {
            return Err(AnalysisError::EmptyScript);
        }
        if step_delay_ms == 0 {
            return Err(AnalysisError::InvalidStepDelay);
        }

        Ok(Self {
            lines,
            step_delay_ms,
        })
    }

    /// Canonical image-surface script: one line after two seconds.
    pub fn image() -> Self {
        Self::from_static(&IMAGE_SCRIPT_LINES, IMAGE_STEP_DELAY_MS)
    }

    /// Canonical video-surface script: five lines at two-second spacing.
    pub fn video() -> Self {
        Self::from_static(&VIDEO_SCRIPT_LINES, VIDEO_STEP_DELAY_MS)
    }

    /// Canonical live-capture script: five lines at three-second spacing.
    pub fn live() -> Self {
        Self::from_static(&LIVE_SCRIPT_LINES, LIVE_STEP_DELAY_MS)
    }

    fn from_static(lines: &[&str], step_delay_ms: u64) -> Self {
        // Built-in scripts are non-empty with positive delays.
        Self {
            lines: lines.iter().map(|line| line.to_string()).collect(),
            step_delay_ms,
        }
    }

    /// Returns the number of lines in the script.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` for an empty script; unreachable through `new`.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the delay between consecutive lines.
    pub fn step_delay_ms(&self) -> u64 {
        self.step_delay_ms
    }
}

/// Lifecycle phase of one analysis session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Lines are still pending emission.
    Running,
    /// Every script line has been emitted.
    Exhausted,
}

/// One scripted playback of interpretation lines.
///
/// Line `i` (zero-based) becomes visible once `(i + 1) * step_delay` virtual
/// milliseconds have elapsed since the session started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisSession {
    script: AnalysisScript,
    started_at_ms: u64,
    results: Vec<String>,
    cancelled: bool,
}

impl AnalysisSession {
    /// Starts a session at `now_ms` with an empty result list.
    pub fn start(script: AnalysisScript, now_ms: u64) -> Self {
        Self {
            script,
            started_at_ms: now_ms,
            results: Vec::new(),
            cancelled: false,
        }
    }

    /// Appends every line due by `now_ms`, in script order.
    ///
    /// # Returns
    /// The number of newly appended lines. A cancelled session appends
    /// nothing.
    pub fn poll(&mut self, now_ms: u64) -> usize {
        if self.cancelled {
            return 0;
        }

        let elapsed = now_ms.saturating_sub(self.started_at_ms);
        let due = usize::try_from(elapsed / self.script.step_delay_ms)
            .unwrap_or(usize::MAX)
            .min(self.script.len());

        let mut appended = 0;
        while self.results.len() < due {
            self.results
                .push(self.script.lines[self.results.len()].clone());
            appended += 1;
        }
        appended
    }

    /// Returns the append-only result list emitted so far.
    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// Returns the current session phase.
    pub fn phase(&self) -> SessionPhase {
        if self.results.len() == self.script.len() {
            SessionPhase::Exhausted
        } else {
            SessionPhase::Running
        }
    }

    /// Returns `true` once every line has been emitted.
    pub fn is_exhausted(&self) -> bool {
        self.phase() == SessionPhase::Exhausted
    }

    /// Cancels pending emissions; already emitted lines stay visible.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}

/// Errors produced by script validation.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Scripts must contain at least one line.
    #[error("analysis script must contain at least one line")]
    EmptyScript,
    /// Step delays must be strictly positive.
    #[error("analysis step delay must be greater than zero")]
    InvalidStepDelay,
}
