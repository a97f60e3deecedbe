//! Viewer controls: button layout, pop-out target and double-tap detection

use crate::affordance::{Affordances, ButtonFace};
use crate::device::DeviceProfile;
use serde::Serialize;

/// Longest gap between two touches that still counts as a double tap
pub const DOUBLE_TAP_WINDOW_MS: u64 = 500;

/// Features of the pop-out window on desktop
pub const POPOUT_WINDOW_FEATURES: &str = "width=1000,height=800,scrollbars=yes,resizable=yes";

/// A control button of the viewer overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ControlButton {
    /// Expanded (emulated) view
    Expanded,
    /// Native fullscreen
    TrueFullscreen,
    /// Combined fullscreen toggle kept for older pages
    Legacy,
    /// Open the demo outside the page
    Popout,
}

impl ControlButton {
    /// CSS class of the button element
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            ControlButton::Expanded => "btn-expanded",
            ControlButton::TrueFullscreen => "btn-true-fullscreen",
            ControlButton::Legacy => "btn-fullscreen",
            ControlButton::Popout => "btn-popout",
        }
    }
}

/// Ordered buttons for a device, with their initial faces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlLayout {
    buttons: Vec<(ControlButton, ButtonFace)>,
}

impl ControlLayout {
    /// Layout for a device class
    ///
    /// Mobile gets `[expanded][pop-out]`, desktop gets
    /// `[expanded][fullscreen][pop-out]`.
    #[must_use]
    pub fn for_device(device: DeviceProfile) -> Self {
        let faces = Affordances::default();
        let mut buttons = vec![(ControlButton::Expanded, faces.expanded_view)];
        if !device.is_mobile() {
            buttons.push((ControlButton::TrueFullscreen, faces.true_fullscreen));
        }
        buttons.push((ControlButton::Popout, popout_face(device)));
        Self { buttons }
    }

    /// Buttons in display order
    #[inline]
    #[must_use]
    pub fn buttons(&self) -> impl Iterator<Item = ControlButton> + '_ {
        self.buttons.iter().map(|(button, _)| *button)
    }

    /// Initial face of a button, if the layout has it
    #[must_use]
    pub fn face(&self, button: ControlButton) -> Option<ButtonFace> {
        self.buttons
            .iter()
            .find(|(candidate, _)| *candidate == button)
            .map(|(_, face)| *face)
    }

    /// Check if the layout has a button
    #[inline]
    #[must_use]
    pub fn contains(&self, button: ControlButton) -> bool {
        self.face(button).is_some()
    }
}

fn popout_face(device: DeviceProfile) -> ButtonFace {
    ButtonFace {
        icon: "↗",
        title: if device.is_mobile() {
            "Open in New Tab"
        } else {
            "Open in New Window"
        },
    }
}

/// Where the pop-out button opens the demo
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PopoutTarget {
    /// Plain new tab (`_blank`)
    NewTab {
        /// Demo URL
        url: String,
    },
    /// Named, sized window
    Window {
        /// Demo URL
        url: String,
        /// Window name, `demo-<scene>`
        name: String,
        /// `window.open` feature string
        features: &'static str,
    },
}

impl PopoutTarget {
    /// Pop-out target for a device class
    #[must_use]
    pub fn for_device(device: DeviceProfile, url: impl Into<String>, scene_name: &str) -> Self {
        let url = url.into();
        if device.is_mobile() {
            Self::NewTab { url }
        } else {
            Self::Window {
                url,
                name: format!("demo-{scene_name}"),
                features: POPOUT_WINDOW_FEATURES,
            }
        }
    }

    /// Demo URL opened by the target
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::NewTab { url } | Self::Window { url, .. } => url,
        }
    }
}

/// Detects double taps from touch-end timestamps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DoubleTapDetector {
    last_tap_ms: Option<u64>,
}

impl DoubleTapDetector {
    /// Create detector with no previous tap
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a touch end at `now_ms`, returning whether it completes a double tap
    pub fn touch_end(&mut self, now_ms: u64) -> bool {
        let gap = self.last_tap_ms.and_then(|last| now_ms.checked_sub(last));
        self.last_tap_ms = Some(now_ms);
        matches!(gap, Some(gap) if gap > 0 && gap < DOUBLE_TAP_WINDOW_MS)
    }
}
