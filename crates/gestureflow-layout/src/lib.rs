#![warn(missing_docs)]
//! # gestureflow-layout
//!
//! ## Purpose
//! Selects the page shell for the current platform mode and models the
//! chrome state each shell owns.
//!
//! ## Responsibilities
//! - Map [`PlatformMode`] onto exactly one of the two page shells.
//! - Track desktop header scroll/menu state with an explicit scroll
//!   subscription lifecycle.
//! - Provide the navigation, tab-bar, and footer link tables, and the pure
//!   active-tab rule for the mobile shell.
//!
//! ## Data flow
//! The app shell asks [`shell_for_mode`] which chrome to render, forwards
//! host scroll offsets into [`DesktopChrome`], and resolves the highlighted
//! tab with [`active_tab`] from the current route path.
//!
//! ## Error model
//! Chrome state favors explicit no-ops over recoverable errors; detaching an
//! unattached scroll subscription is legal and does nothing.

use gestureflow_platform::PlatformMode;
use serde::{Deserialize, Serialize};

/// Scroll offset, in pixels, past which the desktop header condenses.
pub const HEADER_SCROLL_THRESHOLD_PX: u32 = 10;

/// Title shown in the fixed mobile top bar.
pub const MOBILE_TITLE: &str = "GestureFlow";

/// Structurally distinct page shells; both wrap page content unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageShell {
    /// Top navigation bar, content area, footer link groups.
    Desktop,
    /// Fixed title bar, content area, fixed five-slot bottom tab bar.
    Mobile,
}

/// Returns the shell for `mode`.
pub fn shell_for_mode(mode: PlatformMode) -> PageShell {
    match mode {
        PlatformMode::Mobile => PageShell::Mobile,
        PlatformMode::Desktop => PageShell::Desktop,
    }
}

/// One navigation destination: a route path plus its visible label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavDestination {
    /// Route path matched against the current location.
    pub route: &'static str,
    /// Visible link label.
    pub label: &'static str,
}

/// Desktop header navigation entries, in display order.
pub const DESKTOP_NAV: [NavDestination; 5] = [
    NavDestination {
        route: "/",
        label: "Home",
    },
    NavDestination {
        route: "/image-upload",
        label: "Image",
    },
    NavDestination {
        route: "/video-upload",
        label: "Video",
    },
    NavDestination {
        route: "/webcam",
        label: "Live Capture",
    },
    NavDestination {
        route: "/about",
        label: "About",
    },
];

/// Mobile bottom tab-bar destinations, in display order.
pub const MOBILE_TABS: [NavDestination; 5] = [
    NavDestination {
        route: "/",
        label: "Home",
    },
    NavDestination {
        route: "/image-upload",
        label: "Images",
    },
    NavDestination {
        route: "/video-upload",
        label: "Videos",
    },
    NavDestination {
        route: "/webcam",
        label: "Camera",
    },
    NavDestination {
        route: "/about",
        label: "About",
    },
];

/// One footer link group rendered by the desktop shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterGroup {
    /// Group heading.
    pub heading: &'static str,
    /// Links in display order.
    pub links: &'static [NavDestination],
}

/// Footer navigation links mirror the header routes with long labels.
pub const FOOTER_NAVIGATION: [NavDestination; 5] = [
    NavDestination {
        route: "/",
        label: "Home",
    },
    NavDestination {
        route: "/image-upload",
        label: "Image Upload",
    },
    NavDestination {
        route: "/video-upload",
        label: "Video Upload",
    },
    NavDestination {
        route: "/webcam",
        label: "Live Capture",
    },
    NavDestination {
        route: "/about",
        label: "About",
    },
];

/// Footer resource links; placeholder routes until the pages exist.
pub const FOOTER_RESOURCES: [NavDestination; 3] = [
    NavDestination {
        route: "#",
        label: "Contact Us",
    },
    NavDestination {
        route: "#",
        label: "Privacy Policy",
    },
    NavDestination {
        route: "#",
        label: "Terms of Service",
    },
];

/// Desktop footer link groups, in display order.
pub const FOOTER_GROUPS: [FooterGroup; 2] = [
    FooterGroup {
        heading: "Navigation",
        links: &FOOTER_NAVIGATION,
    },
    FooterGroup {
        heading: "Resources",
        links: &FOOTER_RESOURCES,
    },
];

/// Returns the tab that matches `path` exactly, if any.
///
/// Matching is exact: `/image-upload` activates the Images tab while
/// `/image-upload/recent` activates nothing.
pub fn active_tab(path: &str) -> Option<&'static NavDestination> {
    MOBILE_TABS.iter().find(|tab| tab.route == path)
}

/// Desktop header chrome state.
///
/// The scroll subscription is explicit so the shell can prove it unsubscribes
/// on teardown; offsets arriving while detached are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopChrome {
    scrolled: bool,
    menu_open: bool,
    scroll_attached: bool,
}

impl DesktopChrome {
    /// Creates chrome state with no scroll subscription.
    pub fn new() -> Self {
        Self {
            scrolled: false,
            menu_open: false,
            scroll_attached: false,
        }
    }

    /// Subscribes to host scroll notifications.
    pub fn attach_scroll(&mut self) {
        self.scroll_attached = true;
    }

    /// Unsubscribes from host scroll notifications. Idempotent; must be
    /// called on shell teardown.
    pub fn detach_scroll(&mut self) {
        self.scroll_attached = false;
    }

    /// Returns `true` while subscribed to scroll notifications.
    pub fn is_scroll_attached(&self) -> bool {
        self.scroll_attached
    }

    /// Applies a host scroll offset.
    pub fn on_scroll(&mut self, offset_px: u32) {
        if !self.scroll_attached {
            return;
        }
        self.scrolled = offset_px > HEADER_SCROLL_THRESHOLD_PX;
    }

    /// Returns `true` once the page has scrolled past the header threshold.
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Toggles the narrow-width navigation menu.
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Records a navigation; an open menu closes on every navigation.
    pub fn on_navigate(&mut self) {
        self.menu_open = false;
    }

    /// Returns `true` while the narrow-width menu is expanded.
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }
}

impl Default for DesktopChrome {
    fn default() -> Self {
        Self::new()
    }
}
