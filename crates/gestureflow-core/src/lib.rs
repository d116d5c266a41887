#![warn(missing_docs)]
//! # gestureflow-core
//!
//! ## Purpose
//! Defines the shared domain model used across the `gestureflow` workspace.
//!
//! ## Responsibilities
//! - Represent host-provided file inputs and the media assets minted from them.
//! - Manage object-URL lifetimes through an explicit registry so stale display
//!   references cannot leak.
//! - Model simulated transfer progress with a monotonic 0-100 contract.
//! - Provide cancellable virtual-time timer primitives used by every
//!   controller in the workspace.
//!
//! ## Data flow
//! Host file pickers emit [`FileInput`] values. Intake controllers mint a
//! [`MediaAsset`] (object URL + content digest) per accepted file, drive a
//! [`TransferState`] through its phases, and schedule follow-up work with
//! [`IntervalTimer`]/[`OneShotTimer`].
//!
//! ## Ownership and lifetimes
//! Assets and file inputs own their backing buffers (`Vec<u8>`). Object URLs
//! stay valid until explicitly revoked against the registry that minted them.
//!
//! ## Error model
//! Validation failures (blank media type, non-live URL revocation, transfer
//! misuse, zero timer periods) return [`CoreError`] variants with
//! caller-actionable categorization.
//!
//! ## Example
//! ```rust
//! use gestureflow_core::{ObjectUrlRegistry, TransferState};
//!
//! let mut registry = ObjectUrlRegistry::new(7);
//! let url = registry.mint();
//! assert!(registry.is_live(&url));
//!
//! let mut transfer = TransferState::new();
//! transfer.begin();
//! assert!(!transfer.advance(10).unwrap());
//! ```

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use url::Url;

/// Scheme used for locally minted media object URLs.
pub const OBJECT_URL_SCHEME: &str = "blob";

/// Origin component embedded in minted object URLs.
pub const OBJECT_URL_ORIGIN: &str = "gestureflow-portal";

/// Media kind accepted by an upload surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    /// Still image input.
    Image,
    /// Video file input.
    Video,
}

impl MediaKind {
    /// Returns the declared MIME-type prefix this kind accepts.
    pub fn mime_prefix(&self) -> &'static str {
        match self {
            MediaKind::Image => "image/",
            MediaKind::Video => "video/",
        }
    }
}

/// One file handed over by the host picker or a drop event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInput {
    /// File name as reported by the host.
    pub name: String,
    /// Declared MIME type, for example `image/png`.
    pub media_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl FileInput {
    /// Constructs a validated file input.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingMediaType`] when the declared MIME type is
    /// blank; every downstream acceptance decision keys off that string.
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self, CoreError> {
        let media_type = media_type.into();
        if media_type.trim().is_empty() {
            return Err(CoreError::MissingMediaType);
        }

        Ok(Self {
            name: name.into(),
            media_type,
            bytes,
        })
    }

    /// Returns `true` when the declared MIME type matches `kind`.
    pub fn matches_kind(&self, kind: MediaKind) -> bool {
        self.media_type.starts_with(kind.mime_prefix())
    }
}

/// Locally-resolvable reference to the bytes of a selected media file.
///
/// The wrapped string is a `blob:` URL minted by [`ObjectUrlRegistry`]; the
/// rendering layer binds it to an `<img>`/`<video>` element equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Parses and validates an object-URL string.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidObjectUrl`] when the value is not a valid
    /// URL or does not use the `blob` scheme.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let parsed =
            Url::parse(raw).map_err(|error| CoreError::InvalidObjectUrl(error.to_string()))?;
        if parsed.scheme() != OBJECT_URL_SCHEME {
            return Err(CoreError::InvalidObjectUrl(format!(
                "object url scheme must be '{OBJECT_URL_SCHEME}', got '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self(raw.to_string()))
    }

    /// Returns the URL string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Mints and revokes object URLs, tracking which are still live.
///
/// # Notes
/// A URL that is replaced or cleared without being revoked here is a resource
/// leak; [`ObjectUrlRegistry::live_count`] makes that observable in tests.
#[derive(Debug)]
pub struct ObjectUrlRegistry {
    rng: StdRng,
    live: BTreeSet<String>,
}

impl ObjectUrlRegistry {
    /// Creates a registry with a caller-provided token seed.
    ///
    /// Seeding keeps minted URLs deterministic under test while the app shell
    /// passes wall-clock entropy.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            live: BTreeSet::new(),
        }
    }

    /// Mints a fresh live object URL.
    pub fn mint(&mut self) -> ObjectUrl {
        let token: [u8; 16] = self.rng.random();
        let url = format!(
            "{OBJECT_URL_SCHEME}:{OBJECT_URL_ORIGIN}/{}",
            hex::encode(token)
        );
        self.live.insert(url.clone());
        ObjectUrl(url)
    }

    /// Revokes a previously minted URL.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownObjectUrl`] when the URL is not live, which
    /// catches both double revocation and foreign URLs.
    pub fn revoke(&mut self, url: &ObjectUrl) -> Result<(), CoreError> {
        if !self.live.remove(url.as_str()) {
            return Err(CoreError::UnknownObjectUrl(url.as_str().to_string()));
        }
        Ok(())
    }

    /// Returns `true` when `url` has been minted and not yet revoked.
    pub fn is_live(&self, url: &ObjectUrl) -> bool {
        self.live.contains(url.as_str())
    }

    /// Returns the number of currently live URLs.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

/// A user-selected image or video held for display and simulated analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAsset {
    /// Media kind tag.
    pub kind: MediaKind,
    /// File name as reported by the host.
    pub file_name: String,
    /// Size of the selected file in bytes.
    pub byte_len: usize,
    /// Lowercase hex SHA-256 digest of the file content.
    pub content_digest: String,
    /// Live object URL bound to the file content.
    pub object_url: ObjectUrl,
}

impl MediaAsset {
    /// Mints an asset for an accepted file.
    ///
    /// The caller is responsible for revoking `object_url` against `registry`
    /// when the asset is replaced or cleared.
    pub fn from_file(kind: MediaKind, file: &FileInput, registry: &mut ObjectUrlRegistry) -> Self {
        Self {
            kind,
            file_name: file.name.clone(),
            byte_len: file.bytes.len(),
            content_digest: content_digest_hex(&file.bytes),
            object_url: registry.mint(),
        }
    }
}

/// Computes the lowercase hex SHA-256 digest of `bytes`.
pub fn content_digest_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Simulated upload phase for one media asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferPhase {
    /// No transfer in progress.
    Idle,
    /// Transfer progress is advancing.
    Transferring,
    /// Transfer reached 100 exactly once.
    Complete,
}

/// Simulated upload-progress state for a media asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferState {
    /// Current phase.
    pub phase: TransferPhase,
    /// Progress percentage, 0-100, monotonically non-decreasing.
    pub progress: u8,
}

impl TransferState {
    /// Creates idle transfer state at zero progress.
    pub fn new() -> Self {
        Self {
            phase: TransferPhase::Idle,
            progress: 0,
        }
    }

    /// Starts a fresh transfer from zero.
    pub fn begin(&mut self) {
        self.phase = TransferPhase::Transferring;
        self.progress = 0;
    }

    /// Advances progress by `step`, clamping at 100.
    ///
    /// # Returns
    /// `Ok(true)` exactly once, on the tick that reaches 100 and flips the
    /// phase to [`TransferPhase::Complete`].
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidProgressStep`] for a zero step.
    /// Returns [`CoreError::TransferNotActive`] when called while idle.
    /// Returns [`CoreError::TransferAlreadyComplete`] after completion; the
    /// owning controller must have cancelled its interval by then.
    pub fn advance(&mut self, step: u8) -> Result<bool, CoreError> {
        if step == 0 {
            return Err(CoreError::InvalidProgressStep);
        }

        match self.phase {
            TransferPhase::Idle => Err(CoreError::TransferNotActive),
            TransferPhase::Complete => Err(CoreError::TransferAlreadyComplete),
            TransferPhase::Transferring => {
                self.progress = self.progress.saturating_add(step).min(100);
                if self.progress == 100 {
                    self.phase = TransferPhase::Complete;
                    return Ok(true);
                }
                Ok(false)
            }
        }
    }

    /// Resets to idle at zero progress.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for TransferState {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellable repeating timer over a caller-supplied virtual clock.
///
/// Controllers poll timers with the current virtual time instead of
/// subscribing to a host timer primitive, which keeps every time-driven
/// behavior deterministic under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    interval_ms: u64,
    next_due_ms: u64,
    cancelled: bool,
}

impl IntervalTimer {
    /// Creates a timer whose first tick is due `interval_ms` after `now_ms`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidTimerPeriod`] when `interval_ms == 0`.
    pub fn new(now_ms: u64, interval_ms: u64) -> Result<Self, CoreError> {
        if interval_ms == 0 {
            return Err(CoreError::InvalidTimerPeriod);
        }

        Ok(Self {
            interval_ms,
            next_due_ms: now_ms.saturating_add(interval_ms),
            cancelled: false,
        })
    }

    /// Returns the number of ticks that became due by `now_ms` and advances
    /// the schedule past them. A cancelled timer never ticks.
    pub fn poll(&mut self, now_ms: u64) -> u32 {
        if self.cancelled {
            return 0;
        }

        let mut ticks = 0;
        while now_ms >= self.next_due_ms {
            self.next_due_ms = self.next_due_ms.saturating_add(self.interval_ms);
            ticks += 1;
        }
        ticks
    }

    /// Cancels the timer; subsequent polls return zero ticks.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Returns `true` once the timer has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Cancellable single-shot timer over a caller-supplied virtual clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneShotTimer {
    due_at_ms: u64,
    fired: bool,
    cancelled: bool,
}

impl OneShotTimer {
    /// Creates a timer due `delay_ms` after `now_ms`.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidTimerPeriod`] when `delay_ms == 0`.
    pub fn new(now_ms: u64, delay_ms: u64) -> Result<Self, CoreError> {
        if delay_ms == 0 {
            return Err(CoreError::InvalidTimerPeriod);
        }

        Ok(Self {
            due_at_ms: now_ms.saturating_add(delay_ms),
            fired: false,
            cancelled: false,
        })
    }

    /// Returns `true` exactly once, on the first poll at or past the due time.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.cancelled || self.fired || now_ms < self.due_at_ms {
            return false;
        }

        self.fired = true;
        true
    }

    /// Cancels the timer; it will never fire.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Returns `true` while the timer is neither fired nor cancelled.
    pub fn is_pending(&self) -> bool {
        !self.fired && !self.cancelled
    }
}

/// Error type for core domain validation failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// File input carried a blank MIME type.
    #[error("file input is missing a declared media type")]
    MissingMediaType,
    /// Object URL string failed validation.
    #[error("invalid object url: {0}")]
    InvalidObjectUrl(String),
    /// Revocation target is not a live URL of this registry.
    #[error("object url is not live: {0}")]
    UnknownObjectUrl(String),
    /// Progress step must be strictly positive.
    #[error("progress step must be greater than zero")]
    InvalidProgressStep,
    /// Progress cannot advance while the transfer is idle.
    #[error("transfer is not active")]
    TransferNotActive,
    /// Progress cannot advance past a completed transfer.
    #[error("transfer already completed")]
    TransferAlreadyComplete,
    /// Timer periods must be strictly positive.
    #[error("timer period must be greater than zero")]
    InvalidTimerPeriod,
}
