#![warn(missing_docs)]
//! # gestureflow-app
//!
//! ## Purpose
//! Wires platform detection, shell chrome, and the three media surfaces into
//! one portal runtime for the rendering layer to drive.
//!
//! ## Responsibilities
//! - Keep the chrome's scroll subscription in step with the selected shell.
//! - Route host events (resize, scroll, navigation, virtual-time ticks) to
//!   the owning component.
//! - Aggregate per-surface notices and project the portal-wide snapshot.
//! - Surface the build version sourced from the root `VERSION` file.
//!
//! ## Data flow
//! Host events -> [`PortalApp`] -> per-surface controllers -> snapshots and
//! drained notices consumed by the excluded rendering layer.
//!
//! ## Ownership and lifetimes
//! The app owns every controller; surfaces never share mutable state, so the
//! only cross-surface coordination is snapshot assembly.
//!
//! ## Error model
//! Subsystem failures are wrapped in [`AppError`] and categorized for
//! runtime observability.

use std::sync::Arc;

use gestureflow_capture::{CameraBackend, CaptureError, CaptureSnapshot, LiveCaptureController};
use gestureflow_layout::{DesktopChrome, PageShell, active_tab, shell_for_mode};
use gestureflow_media::{IntakeError, IntakeProfile, IntakeSnapshot, MediaIntakeController};
use gestureflow_platform::{HostEnvironment, PlatformDetector, PlatformMode};
use gestureflow_ui::Notice;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("GESTUREFLOW_VERSION");

/// Route path of the home page.
pub const HOME_ROUTE: &str = "/";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Consolidated portal state snapshot for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalSnapshot {
    /// App version string sourced from root `VERSION`.
    pub version: String,
    /// Derived platform mode.
    pub mode: PlatformMode,
    /// Shell selected for the mode.
    pub shell: PageShell,
    /// Current route path.
    pub path: String,
    /// Label of the exactly matching mobile tab, if any.
    pub active_tab: Option<String>,
    /// Image surface state.
    pub image: IntakeSnapshot,
    /// Video surface state.
    pub video: IntakeSnapshot,
    /// Webcam surface state.
    pub webcam: CaptureSnapshot,
}

impl PortalSnapshot {
    /// Serializes the snapshot to compact JSON bytes.
    ///
    /// # Errors
    /// Returns [`AppError::Codec`] when JSON serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, AppError> {
        serde_json::to_vec(self).map_err(AppError::Codec)
    }

    /// Deserializes a snapshot from JSON bytes.
    ///
    /// # Errors
    /// Returns [`AppError::Codec`] when JSON decoding fails.
    pub fn from_json_bytes(raw: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(raw).map_err(AppError::Codec)
    }
}

/// The portal runtime: one detector, one chrome, three surfaces.
pub struct PortalApp {
    detector: PlatformDetector,
    chrome: DesktopChrome,
    path: String,
    image: MediaIntakeController,
    video: MediaIntakeController,
    webcam: LiveCaptureController,
}

impl PortalApp {
    /// Creates the portal on the home route.
    ///
    /// `url_seed` feeds the per-surface object-URL registries; the shell
    /// passes entropy, tests pass a fixed value.
    pub fn new(
        env: Arc<dyn HostEnvironment>,
        camera: Arc<dyn CameraBackend>,
        viewport_width_px: u32,
        url_seed: u64,
    ) -> Self {
        let detector = PlatformDetector::new(env, viewport_width_px);
        let mut app = Self {
            detector,
            chrome: DesktopChrome::new(),
            path: HOME_ROUTE.to_string(),
            image: MediaIntakeController::new(IntakeProfile::image(), url_seed),
            video: MediaIntakeController::new(IntakeProfile::video(), url_seed.wrapping_add(1)),
            webcam: LiveCaptureController::new(camera),
        };
        app.sync_chrome();
        app
    }

    /// Returns the last derived platform mode.
    pub fn mode(&self) -> PlatformMode {
        self.detector.mode()
    }

    /// Returns the shell selected for the current mode.
    pub fn shell(&self) -> PageShell {
        shell_for_mode(self.detector.mode())
    }

    /// Applies a host viewport resize.
    ///
    /// # Returns
    /// `true` when the platform mode changed and the shell swapped.
    pub fn on_viewport_resize(&mut self, viewport_width_px: u32) -> bool {
        let changed = self.detector.on_viewport_resize(viewport_width_px);
        self.sync_chrome();
        changed
    }

    /// Forwards a host scroll offset to the desktop chrome.
    pub fn on_scroll(&mut self, offset_px: u32) {
        self.chrome.on_scroll(offset_px);
    }

    /// Navigates to `path`, closing an expanded desktop menu.
    pub fn navigate(&mut self, path: &str) {
        self.path = path.to_string();
        self.chrome.on_navigate();
    }

    /// Returns the current route path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the desktop chrome state.
    pub fn chrome(&self) -> &DesktopChrome {
        &self.chrome
    }

    /// Returns a mutable handle to the desktop chrome state.
    pub fn chrome_mut(&mut self) -> &mut DesktopChrome {
        &mut self.chrome
    }

    /// Returns the image surface controller.
    pub fn image(&self) -> &MediaIntakeController {
        &self.image
    }

    /// Returns a mutable handle to the image surface controller.
    pub fn image_mut(&mut self) -> &mut MediaIntakeController {
        &mut self.image
    }

    /// Returns the video surface controller.
    pub fn video(&self) -> &MediaIntakeController {
        &self.video
    }

    /// Returns a mutable handle to the video surface controller.
    pub fn video_mut(&mut self) -> &mut MediaIntakeController {
        &mut self.video
    }

    /// Returns the webcam surface controller.
    pub fn webcam(&self) -> &LiveCaptureController {
        &self.webcam
    }

    /// Returns a mutable handle to the webcam surface controller.
    pub fn webcam_mut(&mut self) -> &mut LiveCaptureController {
        &mut self.webcam
    }

    /// Advances every surface to `now_ms`.
    ///
    /// # Errors
    /// Returns [`AppError::Intake`] on an intake contract violation.
    pub fn tick(&mut self, now_ms: u64) -> Result<(), AppError> {
        self.image.poll(now_ms)?;
        self.video.poll(now_ms)?;
        self.webcam.poll(now_ms);
        Ok(())
    }

    /// Removes and returns pending notices across all surfaces.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        let mut notices = self.image.drain_notices();
        notices.extend(self.video.drain_notices());
        notices.extend(self.webcam.drain_notices());
        notices
    }

    /// Assembles the portal-wide snapshot.
    pub fn snapshot(&self) -> PortalSnapshot {
        PortalSnapshot {
            version: APP_VERSION.to_string(),
            mode: self.detector.mode(),
            shell: self.shell(),
            path: self.path.clone(),
            active_tab: active_tab(&self.path).map(|tab| tab.label.to_string()),
            image: self.image.snapshot(),
            video: self.video.snapshot(),
            webcam: self.webcam.snapshot(),
        }
    }

    /// Releases every held resource; called on shell teardown.
    ///
    /// # Errors
    /// Returns [`AppError::Intake`] only if URL bookkeeping is corrupted.
    pub fn teardown(&mut self) -> Result<(), AppError> {
        self.image.clear()?;
        self.video.clear()?;
        self.webcam.stop();
        self.chrome.detach_scroll();
        Ok(())
    }

    // Desktop chrome listens to scroll only while its shell is rendered.
    fn sync_chrome(&mut self) {
        match self.shell() {
            PageShell::Desktop => self.chrome.attach_scroll(),
            PageShell::Mobile => self.chrome.detach_scroll(),
        }
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Core model error.
    #[error("core model error: {0}")]
    Core(#[from] gestureflow_core::CoreError),
    /// Media intake subsystem error.
    #[error("intake error: {0}")]
    Intake(#[from] IntakeError),
    /// Live capture subsystem error.
    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),
    /// Snapshot codec error.
    #[error("snapshot codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}
