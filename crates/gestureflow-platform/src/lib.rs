#![warn(missing_docs)]
//! # gestureflow-platform
//!
//! ## Purpose
//! Decides whether the portal presents its mobile or desktop shell.
//!
//! ## Responsibilities
//! - Read the native-wrapper flag through an injected host capability.
//! - Re-derive the platform mode on viewport resize notifications.
//! - Expose the latest derived mode to layout consumers.
//!
//! ## Data flow
//! Host resize events feed [`PlatformDetector::on_viewport_resize`]; the
//! detector combines the width with [`HostEnvironment::native_shell`] and
//! caches the derived [`PlatformMode`] until the next trigger.
//!
//! ## Error model
//! Detection has no failure path. An unreadable native flag (`None`) behaves
//! as `false`, so the detector degrades to pure width-based selection.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Widest viewport, in logical pixels, still treated as mobile.
pub const MOBILE_VIEWPORT_MAX_PX: u32 = 768;

/// Which of the two UI shells the portal should present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformMode {
    /// Tab-bar shell for native wrappers and narrow viewports.
    Mobile,
    /// Header/footer shell for wide browser viewports.
    Desktop,
}

/// Read-only host capability consulted during platform detection.
///
/// The production shell backs this with the wrapper runtime's global flag;
/// tests use [`StaticHostEnvironment`].
pub trait HostEnvironment: Send + Sync {
    /// Returns the native-wrapper flag, or `None` when it is unreadable.
    ///
    /// Only an explicit `Some(true)` counts as running inside the wrapper.
    fn native_shell(&self) -> Option<bool>;
}

/// Fixed host environment for tests and headless runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticHostEnvironment {
    native: Option<bool>,
}

impl StaticHostEnvironment {
    /// Environment reporting a readable native flag.
    pub fn native(flag: bool) -> Self {
        Self { native: Some(flag) }
    }

    /// Environment whose native flag is unreadable.
    pub fn unreadable() -> Self {
        Self { native: None }
    }
}

impl HostEnvironment for StaticHostEnvironment {
    fn native_shell(&self) -> Option<bool> {
        self.native
    }
}

/// Pure decision rule shared by the detector and its tests.
pub fn derive_mode(native_flag: Option<bool>, viewport_width_px: u32) -> PlatformMode {
    if native_flag == Some(true) || viewport_width_px <= MOBILE_VIEWPORT_MAX_PX {
        PlatformMode::Mobile
    } else {
        PlatformMode::Desktop
    }
}

/// Derives and caches the current [`PlatformMode`].
pub struct PlatformDetector {
    env: Arc<dyn HostEnvironment>,
    viewport_width_px: u32,
    mode: PlatformMode,
}

impl PlatformDetector {
    /// Creates a detector and performs the initial derivation.
    pub fn new(env: Arc<dyn HostEnvironment>, viewport_width_px: u32) -> Self {
        let mode = derive_mode(env.native_shell(), viewport_width_px);
        Self {
            env,
            viewport_width_px,
            mode,
        }
    }

    /// Re-derives the mode for a new viewport width.
    ///
    /// # Returns
    /// `true` when the derived mode changed. Re-deriving with an unchanged
    /// width is idempotent.
    pub fn on_viewport_resize(&mut self, viewport_width_px: u32) -> bool {
        self.viewport_width_px = viewport_width_px;
        let next = derive_mode(self.env.native_shell(), viewport_width_px);
        let changed = next != self.mode;
        self.mode = next;
        changed
    }

    /// Returns the last derived mode.
    pub fn mode(&self) -> PlatformMode {
        self.mode
    }

    /// Returns the last seen viewport width.
    pub fn viewport_width_px(&self) -> u32 {
        self.viewport_width_px
    }

    /// Returns `true` when the host reports a readable, set native flag.
    pub fn is_native(&self) -> bool {
        self.env.native_shell() == Some(true)
    }
}
