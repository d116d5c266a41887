#![warn(missing_docs)]
//! # gestureflow-capture
//!
//! ## Purpose
//! Manages live camera acquisition for the webcam surface: device
//! enumeration, stream lifecycle, and analysis hand-off.
//!
//! ## Responsibilities
//! - Define a backend-agnostic camera trait.
//! - Expose a deterministic synthetic backend for CI and unit tests.
//! - Enforce exclusive stream ownership with release on every exit path.
//! - Run the live interpretation script while the stream is active.
//!
//! ## Data flow
//! The shell calls [`LiveCaptureController::start`]; the backend resolves a
//! [`CameraStream`] which the controller owns until `stop`, a device switch,
//! or teardown releases it. The live script emits into the controller's
//! result list while active.
//!
//! ## Ownership and lifetimes
//! At most one stream is held at a time; acquiring a new one always follows
//! releasing the old one, and every release stops all tracks exactly once.
//!
//! ## Error model
//! Acquisition and enumeration failures surface as [`CaptureError`] values
//! and as error notices; the controller returns to `Inactive` rather than
//! holding a dead stream.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use gestureflow_analysis::{AnalysisScript, AnalysisSession};
use gestureflow_ui::{FeedView, Notice, NoticeQueue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Success notice shown after the camera starts.
pub const CAMERA_STARTED_MSG: &str = "Camera started successfully";

/// Error notice shown when the camera cannot be acquired.
pub const CAMERA_UNAVAILABLE_MSG: &str = "Could not access camera";

/// Error notice shown when device enumeration fails.
pub const DEVICES_UNAVAILABLE_MSG: &str = "Could not access camera devices";

/// Success notice shown after a device switch.
pub const CAMERA_CHANGED_MSG: &str = "Camera changed successfully";

/// Error notice shown when a device switch fails.
pub const CAMERA_SWITCH_FAILED_MSG: &str = "Could not switch camera";

/// Identifier plus human label for one enumerated camera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraDevice {
    /// Stable device identifier.
    pub id: String,
    /// Human-readable device label.
    pub label: String,
}

/// One track of an acquired stream; stopping is idempotent.
#[derive(Debug, Clone)]
pub struct StreamTrack {
    live: Arc<AtomicBool>,
}

impl StreamTrack {
    fn new(live: Arc<AtomicBool>) -> Self {
        Self { live }
    }

    /// Stops the track; repeated stops are no-ops.
    pub fn stop(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    /// Returns `true` while the track is still delivering.
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

/// Acquired camera stream, exclusively owned by the controller while active.
#[derive(Debug)]
pub struct CameraStream {
    device_id: String,
    tracks: Vec<StreamTrack>,
}

impl CameraStream {
    /// Returns the id of the device backing this stream.
    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Stops every track of the stream.
    pub fn stop_all_tracks(&mut self) {
        for track in &self.tracks {
            track.stop();
        }
    }

    /// Returns `true` while any track is still live.
    pub fn is_live(&self) -> bool {
        self.tracks.iter().any(StreamTrack::is_live)
    }
}

/// Trait implemented by concrete camera providers.
pub trait CameraBackend: Send + Sync {
    /// Enumerates available video input devices.
    ///
    /// # Errors
    /// Returns [`CaptureError::Enumeration`] when listing fails.
    fn enumerate_devices(&self) -> Result<Vec<CameraDevice>, CaptureError>;

    /// Acquires a stream for `device_id`, or the system default for `None`.
    ///
    /// # Errors
    /// Returns [`CaptureError::PermissionDenied`], [`CaptureError::NoDevice`],
    /// [`CaptureError::UnknownDevice`], or [`CaptureError::DeviceBusy`]
    /// depending on the failure.
    fn open_stream(&self, device_id: Option<&str>) -> Result<CameraStream, CaptureError>;
}

/// Deterministic synthetic backend for test and CI usage.
///
/// # Notes
/// Failures can be injected per call, and live streams are counted so tests
/// can assert the single-stream invariant.
#[derive(Debug)]
pub struct SyntheticCameraBackend {
    devices: Vec<CameraDevice>,
    open_tracks: Mutex<Vec<Weak<AtomicBool>>>,
    next_open_failure: Mutex<Option<CaptureError>>,
    enumeration_failure: Mutex<Option<String>>,
}

impl SyntheticCameraBackend {
    /// Creates a backend with one default camera.
    pub fn new() -> Self {
        Self::with_devices(vec![CameraDevice {
            id: "camera-1".to_string(),
            label: "Synthetic Camera".to_string(),
        }])
    }

    /// Creates a backend with a caller-provided device list.
    pub fn with_devices(devices: Vec<CameraDevice>) -> Self {
        Self {
            devices,
            open_tracks: Mutex::new(Vec::new()),
            next_open_failure: Mutex::new(None),
            enumeration_failure: Mutex::new(None),
        }
    }

    /// Makes the next `open_stream` call fail with `error`.
    pub fn inject_open_failure(&self, error: CaptureError) {
        if let Ok(mut slot) = self.next_open_failure.lock() {
            *slot = Some(error);
        }
    }

    /// Makes every subsequent enumeration fail with `reason`.
    pub fn inject_enumeration_failure(&self, reason: impl Into<String>) {
        if let Ok(mut slot) = self.enumeration_failure.lock() {
            *slot = Some(reason.into());
        }
    }

    /// Returns how many acquired streams still have live tracks.
    pub fn live_stream_count(&self) -> usize {
        let Ok(mut tracks) = self.open_tracks.lock() else {
            return 0;
        };
        tracks.retain(|track| track.upgrade().is_some());
        tracks
            .iter()
            .filter_map(Weak::upgrade)
            .filter(|live| live.load(Ordering::SeqCst))
            .count()
    }
}

impl Default for SyntheticCameraBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraBackend for SyntheticCameraBackend {
    fn enumerate_devices(&self) -> Result<Vec<CameraDevice>, CaptureError> {
        if let Ok(slot) = self.enumeration_failure.lock()
            && let Some(reason) = slot.clone()
        {
            return Err(CaptureError::Enumeration(reason));
        }

        Ok(self.devices.clone())
    }

    fn open_stream(&self, device_id: Option<&str>) -> Result<CameraStream, CaptureError> {
        if let Ok(mut slot) = self.next_open_failure.lock()
            && let Some(error) = slot.take()
        {
            return Err(error);
        }

        let device = match device_id {
            Some(id) => self
                .devices
                .iter()
                .find(|device| device.id == id)
                .ok_or_else(|| CaptureError::UnknownDevice(id.to_string()))?,
            None => self.devices.first().ok_or(CaptureError::NoDevice)?,
        };

        let live = Arc::new(AtomicBool::new(true));
        if let Ok(mut tracks) = self.open_tracks.lock() {
            tracks.push(Arc::downgrade(&live));
        }

        Ok(CameraStream {
            device_id: device.id.clone(),
            tracks: vec![StreamTrack::new(live)],
        })
    }
}

/// Boundary-visible state of the webcam surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSnapshot {
    /// Whether a stream is currently held.
    pub active: bool,
    /// Currently selected device id, if any.
    pub selected_device_id: Option<String>,
    /// Whether the preview is mirrored.
    pub mirror: bool,
    /// Enumerated devices, in backend order.
    pub devices: Vec<CameraDevice>,
    /// Interpretation results emitted so far.
    pub results: Vec<String>,
}

/// Controller for the live webcam surface.
pub struct LiveCaptureController {
    backend: Arc<dyn CameraBackend>,
    devices: Vec<CameraDevice>,
    devices_loaded: bool,
    selected_device_id: Option<String>,
    mirror: bool,
    stream: Option<CameraStream>,
    session: Option<AnalysisSession>,
    notices: NoticeQueue,
}

impl LiveCaptureController {
    /// Creates an inactive controller; the preview mirrors by default.
    pub fn new(backend: Arc<dyn CameraBackend>) -> Self {
        Self {
            backend,
            devices: Vec::new(),
            devices_loaded: false,
            selected_device_id: None,
            mirror: true,
            stream: None,
            session: None,
            notices: NoticeQueue::new(),
        }
    }

    /// Re-enumerates devices; the first device becomes the default selection.
    ///
    /// # Errors
    /// Returns [`CaptureError::Enumeration`] (also surfaced as an error
    /// notice) when the backend cannot list devices.
    pub fn refresh_devices(&mut self) -> Result<&[CameraDevice], CaptureError> {
        match self.backend.enumerate_devices() {
            Ok(devices) => {
                self.devices = devices;
                self.devices_loaded = true;
                if self.selected_device_id.is_none()
                    && let Some(first) = self.devices.first()
                {
                    self.selected_device_id = Some(first.id.clone());
                }
                Ok(&self.devices)
            }
            Err(error) => {
                self.notices.push(Notice::error(DEVICES_UNAVAILABLE_MSG));
                Err(error)
            }
        }
    }

    /// Returns `true` while a stream is held.
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Acquires the camera and starts the live script.
    ///
    /// Calling `start` while already active is a no-op; a second stream is
    /// never acquired.
    ///
    /// # Errors
    /// Returns the backend's [`CaptureError`] (also surfaced as an error
    /// notice) and stays inactive on acquisition failure.
    pub fn start(&mut self, now_ms: u64) -> Result<(), CaptureError> {
        if self.stream.is_some() {
            return Ok(());
        }

        if !self.devices_loaded {
            // Enumeration failure leaves the selection empty; acquisition
            // falls back to the system default below.
            let _ = self.refresh_devices();
        }

        match self.backend.open_stream(self.selected_device_id.as_deref()) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.notices.push(Notice::success(CAMERA_STARTED_MSG));
                self.session = Some(AnalysisSession::start(AnalysisScript::live(), now_ms));
                Ok(())
            }
            Err(error) => {
                self.notices.push(Notice::error(CAMERA_UNAVAILABLE_MSG));
                Err(error)
            }
        }
    }

    /// Stops every track, clears results, and returns to inactive.
    ///
    /// Calling `stop` while inactive is a no-op.
    pub fn stop(&mut self) {
        self.release_stream();
        self.clear_session();
    }

    /// Selects `device_id`, restarting the stream when active.
    ///
    /// While inactive this only records the preference for the next `start`.
    ///
    /// # Errors
    /// Returns the backend's [`CaptureError`] on reacquisition failure; the
    /// controller is forced inactive in that case, never left with a dead
    /// stream.
    pub fn switch_device(&mut self, device_id: &str) -> Result<(), CaptureError> {
        self.selected_device_id = Some(device_id.to_string());
        if self.stream.is_none() {
            return Ok(());
        }

        // Old stream is always released before the new acquisition.
        self.release_stream();
        match self.backend.open_stream(Some(device_id)) {
            Ok(stream) => {
                self.stream = Some(stream);
                self.notices.push(Notice::success(CAMERA_CHANGED_MSG));
                Ok(())
            }
            Err(error) => {
                self.clear_session();
                self.notices.push(Notice::error(CAMERA_SWITCH_FAILED_MSG));
                Err(error)
            }
        }
    }

    /// Clears results and replays the live script from its first line.
    ///
    /// # Errors
    /// Returns [`CaptureError::NotActive`] while no stream is held.
    pub fn restart_analysis(&mut self, now_ms: u64) -> Result<(), CaptureError> {
        if self.stream.is_none() {
            return Err(CaptureError::NotActive);
        }

        self.session = Some(AnalysisSession::start(AnalysisScript::live(), now_ms));
        Ok(())
    }

    /// Advances live script emission to `now_ms`.
    pub fn poll(&mut self, now_ms: u64) {
        if let Some(session) = self.session.as_mut() {
            session.poll(now_ms);
        }
    }

    /// Sets the preview mirror flag.
    pub fn set_mirror(&mut self, mirror: bool) {
        self.mirror = mirror;
    }

    /// Returns the preview mirror flag.
    pub fn mirror(&self) -> bool {
        self.mirror
    }

    /// Returns the enumerated devices seen so far.
    pub fn devices(&self) -> &[CameraDevice] {
        &self.devices
    }

    /// Returns the currently selected device id, if any.
    pub fn selected_device_id(&self) -> Option<&str> {
        self.selected_device_id.as_deref()
    }

    /// Returns interpretation results emitted so far.
    pub fn results(&self) -> &[String] {
        self.session.as_ref().map_or(&[], |s| s.results())
    }

    /// Projects the result feed for rendering.
    pub fn feed_view(&self) -> FeedView {
        FeedView::project(self.results(), self.is_active())
    }

    /// Removes and returns pending notices.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Returns a boundary-visible state snapshot.
    pub fn snapshot(&self) -> CaptureSnapshot {
        CaptureSnapshot {
            active: self.is_active(),
            selected_device_id: self.selected_device_id.clone(),
            mirror: self.mirror,
            devices: self.devices.clone(),
            results: self.results().to_vec(),
        }
    }

    // Single release path reachable from stop, device switch, and teardown.
    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop_all_tracks();
        }
    }

    fn clear_session(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.cancel();
        }
        self.session = None;
    }
}

impl Drop for LiveCaptureController {
    fn drop(&mut self) {
        self.release_stream();
    }
}

/// Live capture error type.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// User or platform denied camera permission.
    #[error("camera permission was denied")]
    PermissionDenied,
    /// No camera device is available.
    #[error("no camera device is available")]
    NoDevice,
    /// Requested device id is unknown to the backend.
    #[error("unknown camera device: {0}")]
    UnknownDevice(String),
    /// Device exists but is held by another consumer.
    #[error("camera device is busy: {0}")]
    DeviceBusy(String),
    /// Device listing failed.
    #[error("device enumeration failed: {0}")]
    Enumeration(String),
    /// Operation requires an active stream.
    #[error("live capture is not active")]
    NotActive,
}
