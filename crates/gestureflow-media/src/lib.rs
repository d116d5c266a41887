#![warn(missing_docs)]
//! # gestureflow-media
//!
//! ## Purpose
//! Manages the lifecycle of a user-selected image or video on the upload
//! surfaces: selection, drop validation, simulated transfer, and analysis
//! hand-off.
//!
//! ## Responsibilities
//! - Accept picker selections and drop events, validating dropped MIME types.
//! - Mint and revoke object URLs so replaced assets never leak.
//! - Drive transfer progress 0-100 on a fixed cadence, terminating exactly
//!   once per asset.
//! - Trigger the analysis script per surface policy (automatically at
//!   transfer completion, or on first playback).
//! - Reset everything on `clear`, cancelling pending timers.
//!
//! ## Data flow
//! Host file events enter through [`MediaIntakeController::select_file`] /
//! [`MediaIntakeController::drop_file`]; the shell polls the controller with
//! virtual time, then reads its snapshot and drains notices for rendering.
//!
//! ## Ownership and lifetimes
//! Each controller instance exclusively owns its asset, transfer state,
//! timers, and analysis session. Replacement is sequential; there is no
//! concurrent mutation.
//!
//! ## Error model
//! Rejected drops and misuse surface as [`IntakeError`]; every error leaves
//! the controller in its previous stable state.

use gestureflow_analysis::{AnalysisScript, AnalysisSession};
use gestureflow_core::{
    CoreError, FileInput, IntervalTimer, MediaAsset, MediaKind, ObjectUrlRegistry, TransferState,
};
use gestureflow_ui::{FeedView, Notice, NoticeQueue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error notice shown for a non-image drop on the image surface.
pub const INVALID_IMAGE_DROP_MSG: &str = "Please upload a valid image file";

/// Error notice shown for a non-video drop on the video surface.
pub const INVALID_VIDEO_DROP_MSG: &str = "Please upload a valid video file";

/// Info notice shown when image analysis starts.
pub const IMAGE_ANALYZING_MSG: &str = "Analyzing sign language gestures...";

/// Success notice shown when the image interpretation arrives.
pub const IMAGE_INTERPRETED_MSG: &str = "Sign language interpretation complete!";

/// Success notice shown when the simulated video transfer completes.
pub const VIDEO_UPLOADED_MSG: &str = "Video uploaded successfully";

/// Info notice shown when video analysis starts.
pub const VIDEO_ANALYZING_MSG: &str = "Analyzing sign language in video...";

/// When a surface hands a completed asset to the analysis simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisTrigger {
    /// Analysis starts as soon as the transfer reaches 100.
    OnTransferComplete,
    /// Analysis starts on the first playback action per asset.
    OnFirstPlay,
}

/// Per-surface intake configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeProfile {
    kind: MediaKind,
    progress_step: u8,
    progress_interval_ms: u64,
    trigger: AnalysisTrigger,
    script: AnalysisScript,
}

impl IntakeProfile {
    /// Image surface: +10 every 200 ms, analysis on completion.
    pub fn image() -> Self {
        Self {
            kind: MediaKind::Image,
            progress_step: 10,
            progress_interval_ms: 200,
            trigger: AnalysisTrigger::OnTransferComplete,
            script: AnalysisScript::image(),
        }
    }

    /// Video surface: +5 every 150 ms, analysis on first play.
    pub fn video() -> Self {
        Self {
            kind: MediaKind::Video,
            progress_step: 5,
            progress_interval_ms: 150,
            trigger: AnalysisTrigger::OnFirstPlay,
            script: AnalysisScript::video(),
        }
    }

    /// Returns the media kind this profile accepts.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// Returns the per-tick progress increment.
    pub fn progress_step(&self) -> u8 {
        self.progress_step
    }

    /// Returns the progress tick cadence.
    pub fn progress_interval_ms(&self) -> u64 {
        self.progress_interval_ms
    }

    /// Returns the analysis trigger policy.
    pub fn trigger(&self) -> AnalysisTrigger {
        self.trigger
    }
}

/// Boundary-visible state of one intake surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeSnapshot {
    /// Media kind the surface accepts.
    pub kind: MediaKind,
    /// Currently held asset, if any.
    pub asset: Option<MediaAsset>,
    /// Simulated transfer state.
    pub transfer: TransferState,
    /// Interpretation results emitted so far.
    pub results: Vec<String>,
    /// Whether video playback is running.
    pub playing: bool,
}

/// Controller for one upload surface (image or video).
#[derive(Debug)]
pub struct MediaIntakeController {
    profile: IntakeProfile,
    urls: ObjectUrlRegistry,
    asset: Option<MediaAsset>,
    transfer: TransferState,
    transfer_timer: Option<IntervalTimer>,
    session: Option<AnalysisSession>,
    playing: bool,
    notices: NoticeQueue,
}

impl MediaIntakeController {
    /// Creates a controller with its own object-URL registry.
    pub fn new(profile: IntakeProfile, url_seed: u64) -> Self {
        Self {
            profile,
            urls: ObjectUrlRegistry::new(url_seed),
            asset: None,
            transfer: TransferState::new(),
            transfer_timer: None,
            session: None,
            playing: false,
            notices: NoticeQueue::new(),
        }
    }

    /// Accepts a file chosen through the host picker.
    ///
    /// The picker dialog already filters by accepted type, so no MIME check
    /// is repeated here.
    ///
    /// # Errors
    /// Returns [`IntakeError::Core`] when the asset cannot be set up.
    pub fn select_file(&mut self, file: &FileInput, now_ms: u64) -> Result<(), IntakeError> {
        self.accept(file, now_ms)
    }

    /// Accepts a file from a drop event after validating its declared type.
    ///
    /// # Errors
    /// Returns [`IntakeError::UnsupportedMediaType`] (also surfaced as an
    /// error notice) for a mismatched MIME prefix; the held asset is
    /// unchanged in that case.
    pub fn drop_file(&mut self, file: &FileInput, now_ms: u64) -> Result<(), IntakeError> {
        if !file.matches_kind(self.profile.kind) {
            self.notices.push(Notice::error(match self.profile.kind {
                MediaKind::Image => INVALID_IMAGE_DROP_MSG,
                MediaKind::Video => INVALID_VIDEO_DROP_MSG,
            }));
            return Err(IntakeError::UnsupportedMediaType {
                expected_prefix: self.profile.kind.mime_prefix(),
                actual: file.media_type.clone(),
            });
        }

        self.accept(file, now_ms)
    }

    /// Advances transfer progress and analysis emission to `now_ms`.
    ///
    /// # Errors
    /// Returns [`IntakeError::Core`] only on internal contract violations;
    /// a correctly sequenced controller never fails here.
    pub fn poll(&mut self, now_ms: u64) -> Result<(), IntakeError> {
        let due_ticks = match self.transfer_timer.as_mut() {
            Some(timer) => timer.poll(now_ms),
            None => 0,
        };

        let mut completed = false;
        for _ in 0..due_ticks {
            if self.transfer.advance(self.profile.progress_step)? {
                completed = true;
                break;
            }
        }

        if completed {
            if let Some(timer) = self.transfer_timer.as_mut() {
                timer.cancel();
            }
            self.transfer_timer = None;
            self.on_transfer_complete(now_ms);
        }

        let appended = match self.session.as_mut() {
            Some(session) => session.poll(now_ms),
            None => 0,
        };
        if appended > 0
            && self.profile.kind == MediaKind::Image
            && self.session.as_ref().is_some_and(|s| s.is_exhausted())
        {
            self.notices.push(Notice::success(IMAGE_INTERPRETED_MSG));
        }

        Ok(())
    }

    /// Toggles video playback; the first play per asset starts analysis.
    ///
    /// Pause/play cycles never restart a running or completed session.
    ///
    /// # Errors
    /// Returns [`IntakeError::NoAsset`] when nothing is selected.
    pub fn toggle_playback(&mut self, now_ms: u64) -> Result<bool, IntakeError> {
        if self.asset.is_none() {
            return Err(IntakeError::NoAsset);
        }

        if self.playing {
            self.playing = false;
        } else {
            self.playing = true;
            if self.profile.trigger == AnalysisTrigger::OnFirstPlay && self.session.is_none() {
                self.start_analysis(now_ms);
            }
        }

        Ok(self.playing)
    }

    /// Records that playback reached the end of the media.
    pub fn on_playback_ended(&mut self) {
        self.playing = false;
    }

    /// Clears the asset and resets every derived state.
    ///
    /// Safe at any phase, including mid-transfer, and idempotent.
    ///
    /// # Errors
    /// Returns [`IntakeError::Core`] only if URL bookkeeping is corrupted.
    pub fn clear(&mut self) -> Result<(), IntakeError> {
        self.release_asset()
    }

    /// Returns the held asset, if any.
    pub fn asset(&self) -> Option<&MediaAsset> {
        self.asset.as_ref()
    }

    /// Returns the current transfer state.
    pub fn transfer(&self) -> TransferState {
        self.transfer
    }

    /// Returns interpretation results emitted so far.
    pub fn results(&self) -> &[String] {
        self.session.as_ref().map_or(&[], |s| s.results())
    }

    /// Returns `true` while video playback is running.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Projects the result feed for rendering.
    pub fn feed_view(&self) -> FeedView {
        FeedView::project(self.results(), self.playing)
    }

    /// Returns the number of live object URLs owned by this surface.
    pub fn live_url_count(&self) -> usize {
        self.urls.live_count()
    }

    /// Removes and returns pending notices.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Returns a boundary-visible state snapshot.
    pub fn snapshot(&self) -> IntakeSnapshot {
        IntakeSnapshot {
            kind: self.profile.kind,
            asset: self.asset.clone(),
            transfer: self.transfer,
            results: self.results().to_vec(),
            playing: self.playing,
        }
    }

    fn accept(&mut self, file: &FileInput, now_ms: u64) -> Result<(), IntakeError> {
        self.release_asset()?;

        self.asset = Some(MediaAsset::from_file(
            self.profile.kind,
            file,
            &mut self.urls,
        ));
        self.transfer.begin();
        self.transfer_timer = Some(IntervalTimer::new(now_ms, self.profile.progress_interval_ms)?);
        Ok(())
    }

    fn on_transfer_complete(&mut self, now_ms: u64) {
        match self.profile.trigger {
            AnalysisTrigger::OnTransferComplete => self.start_analysis(now_ms),
            AnalysisTrigger::OnFirstPlay => {
                self.notices.push(Notice::success(VIDEO_UPLOADED_MSG));
            }
        }
    }

    fn start_analysis(&mut self, now_ms: u64) {
        self.notices.push(Notice::info(match self.profile.kind {
            MediaKind::Image => IMAGE_ANALYZING_MSG,
            MediaKind::Video => VIDEO_ANALYZING_MSG,
        }));
        self.session = Some(AnalysisSession::start(self.profile.script.clone(), now_ms));
    }

    fn release_asset(&mut self) -> Result<(), IntakeError> {
        if let Some(timer) = self.transfer_timer.as_mut() {
            timer.cancel();
        }
        self.transfer_timer = None;

        if let Some(session) = self.session.as_mut() {
            session.cancel();
        }
        self.session = None;

        if let Some(asset) = self.asset.take() {
            self.urls.revoke(&asset.object_url)?;
        }
        self.transfer.reset();
        self.playing = false;
        Ok(())
    }
}

/// Errors surfaced at the intake controller boundary.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Dropped file's declared type does not match the surface.
    #[error("unsupported media type: expected prefix '{expected_prefix}', got '{actual}'")]
    UnsupportedMediaType {
        /// MIME prefix the surface accepts.
        expected_prefix: &'static str,
        /// Declared MIME type of the rejected file.
        actual: String,
    },
    /// Playback controls require a selected asset.
    #[error("no media asset is selected")]
    NoAsset,
    /// Core model error.
    #[error("core model error: {0}")]
    Core(#[from] CoreError),
}

#[cfg(test)]
mod tests {
    //! Unit tests for intake edge behavior; full flows live in the app
    //! integration suite.

    use gestureflow_core::TransferPhase;

    use super::*;

    fn png_fixture() -> FileInput {
        FileInput::new("hands.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47])
            .expect("fixture should be valid")
    }

    #[test]
    fn rejected_drop_leaves_state_unchanged() {
        let mut controller = MediaIntakeController::new(IntakeProfile::image(), 1);
        let file = FileInput::new("notes.txt", "text/plain", vec![1, 2, 3])
            .expect("fixture should be valid");

        let result = controller.drop_file(&file, 0);
        assert!(matches!(
            result,
            Err(IntakeError::UnsupportedMediaType { .. })
        ));
        assert!(controller.asset().is_none());
        assert_eq!(controller.transfer().phase, TransferPhase::Idle);
        assert_eq!(controller.drain_notices().len(), 1);
    }

    #[test]
    fn clear_is_idempotent_and_revokes_the_url() {
        let mut controller = MediaIntakeController::new(IntakeProfile::image(), 1);
        controller
            .select_file(&png_fixture(), 0)
            .expect("selection should work");
        assert_eq!(controller.live_url_count(), 1);

        controller.clear().expect("clear should work");
        controller.clear().expect("second clear should be a no-op");
        assert_eq!(controller.live_url_count(), 0);
        assert!(controller.results().is_empty());
    }

    #[test]
    fn replacing_an_asset_revokes_the_previous_url() {
        let mut controller = MediaIntakeController::new(IntakeProfile::image(), 1);
        controller
            .select_file(&png_fixture(), 0)
            .expect("selection should work");
        controller
            .select_file(&png_fixture(), 10)
            .expect("replacement should work");

        assert_eq!(controller.live_url_count(), 1);
    }

    #[test]
    fn playback_toggle_requires_an_asset() {
        let mut controller = MediaIntakeController::new(IntakeProfile::video(), 1);
        assert!(matches!(
            controller.toggle_playback(0),
            Err(IntakeError::NoAsset)
        ));
    }
}
