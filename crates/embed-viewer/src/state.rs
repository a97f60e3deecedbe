//! Viewer state machine
//!
//! One [`ViewerState`] per injected viewer. Local requests only ever *start*
//! native fullscreen; the platform's change notification decides whether it
//! actually holds.
//!
//! ```text
//! Normal ──(request granted, platform changed)──▶ NativeFullscreen
//! Normal ──(expanded view | chain exhausted)────▶ MobileExpanded
//! NativeFullscreen ──(platform changed, not held)──▶ Normal
//! MobileExpanded ──(expanded view | escape)──────▶ Normal
//! ```

use crate::affordance::Affordances;
use crate::device::DeviceProfile;
use crate::fullscreen::{NativeFullscreen, RequestOutcome, Surface};
use serde::{Deserialize, Serialize};

/// Class added to the document body while the expanded view locks scrolling
pub const SCROLL_LOCK_CLASS: &str = "mobile-fullscreen-active";

/// Class added to the viewer container while it is expanded
pub const EXPANDED_CONTAINER_CLASS: &str = "mobile-fullscreen";

/// Presentation mode of a viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewerMode {
    /// Inline in the page
    #[default]
    Normal,
    /// Browser-native fullscreen
    NativeFullscreen,
    /// Locally emulated fullscreen
    MobileExpanded,
}

/// Whether a class is added or removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassAction {
    /// `classList.add`
    Add,
    /// `classList.remove`
    Remove,
}

/// Class change to apply to an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClassToggle {
    /// Class name
    pub class: &'static str,
    /// Add or remove
    pub action: ClassAction,
}

/// Rendering decision produced by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UiUpdate {
    /// Mode before the event
    pub previous: ViewerMode,
    /// Mode after the event
    pub mode: ViewerMode,
    /// Button faces for the new mode
    pub affordances: Affordances,
    /// Scroll-lock class change on the document body
    pub body_class: Option<ClassToggle>,
    /// Marker class change on the viewer container
    pub container_class: Option<ClassToggle>,
}

impl UiUpdate {
    /// Check if the mode changed
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        self.previous != self.mode
    }
}

/// Per-viewer fullscreen state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    mode: ViewerMode,
    device: DeviceProfile,
    pending: Option<Surface>,
}

impl ViewerState {
    /// Create viewer state in [`ViewerMode::Normal`]
    #[inline]
    #[must_use]
    pub fn new(device: DeviceProfile) -> Self {
        Self {
            mode: ViewerMode::Normal,
            device,
            pending: None,
        }
    }

    /// Current mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> ViewerMode {
        self.mode
    }

    /// Device profile fixed at creation
    #[inline]
    #[must_use]
    pub fn device(&self) -> DeviceProfile {
        self.device
    }

    /// Surface of the native request still awaiting a platform answer
    #[inline]
    #[must_use]
    pub fn pending_request(&self) -> Option<Surface> {
        self.pending
    }

    /// Button faces for the current mode
    #[inline]
    #[must_use]
    pub fn current_affordances(&self) -> Affordances {
        Affordances::for_mode(self.mode)
    }

    /// Toggle native fullscreen, falling back to the expanded view
    ///
    /// From `Normal` tries the frame, then the container, then local
    /// emulation. From any other mode exits whichever is active.
    pub fn request_true_fullscreen<P>(&mut self, platform: &mut P) -> UiUpdate
    where
        P: NativeFullscreen + ?Sized,
    {
        let previous = self.mode;
        match self.mode {
            ViewerMode::Normal if !platform.is_active() => {
                self.run_fallback_chain(Some(Surface::Frame), platform);
            }
            ViewerMode::Normal | ViewerMode::NativeFullscreen => {
                platform.exit();
                self.pending = None;
                self.mode = ViewerMode::Normal;
            }
            ViewerMode::MobileExpanded => self.mode = ViewerMode::Normal,
        }
        self.update_from(previous)
    }

    /// Toggle the locally emulated expanded view; never touches native fullscreen
    pub fn request_expanded_view(&mut self) -> UiUpdate {
        let previous = self.mode;
        self.mode = match self.mode {
            ViewerMode::MobileExpanded => ViewerMode::Normal,
            ViewerMode::Normal | ViewerMode::NativeFullscreen => ViewerMode::MobileExpanded,
        };
        self.update_from(previous)
    }

    /// Expanded view on mobile, native fullscreen elsewhere
    pub fn request_legacy_toggle<P>(&mut self, platform: &mut P) -> UiUpdate
    where
        P: NativeFullscreen + ?Sized,
    {
        if self.device.is_mobile() {
            self.request_expanded_view()
        } else {
            self.request_true_fullscreen(platform)
        }
    }

    /// Double tap on the frame; same as the legacy toggle
    pub fn double_tap<P>(&mut self, platform: &mut P) -> UiUpdate
    where
        P: NativeFullscreen + ?Sized,
    {
        self.request_legacy_toggle(platform)
    }

    /// Escape key; only leaves the expanded view
    pub fn escape_pressed(&mut self) -> UiUpdate {
        let previous = self.mode;
        if self.mode == ViewerMode::MobileExpanded {
            self.mode = ViewerMode::Normal;
        }
        self.update_from(previous)
    }

    /// Platform reported a fullscreen change (any vendor)
    ///
    /// The platform state read now wins over whatever was assumed locally.
    pub fn platform_fullscreen_changed<P>(&mut self, platform: &P) -> UiUpdate
    where
        P: NativeFullscreen + ?Sized,
    {
        let previous = self.mode;
        if platform.is_active() {
            self.pending = None;
            self.mode = ViewerMode::NativeFullscreen;
        } else if self.mode == ViewerMode::NativeFullscreen {
            self.mode = ViewerMode::Normal;
        }
        self.update_from(previous)
    }

    /// Platform rejected the native request on `surface`
    ///
    /// Continues the fallback chain if `surface` is the outstanding request;
    /// stale rejections change nothing.
    pub fn fullscreen_request_rejected<P>(&mut self, surface: Surface, platform: &mut P) -> UiUpdate
    where
        P: NativeFullscreen + ?Sized,
    {
        let previous = self.mode;
        if self.pending == Some(surface) {
            self.pending = None;
            self.run_fallback_chain(surface.next(), platform);
        } else {
            tracing::debug!(?surface, "Ignoring stale fullscreen rejection");
        }
        self.update_from(previous)
    }

    fn run_fallback_chain<P>(&mut self, start: Option<Surface>, platform: &mut P)
    where
        P: NativeFullscreen + ?Sized,
    {
        let mut next = start;
        while let Some(surface) = next {
            match platform.request(surface) {
                RequestOutcome::Pending => {
                    tracing::debug!(?surface, "Native fullscreen request pending");
                    self.pending = Some(surface);
                    return;
                }
                outcome @ (RequestOutcome::Rejected | RequestOutcome::Unsupported) => {
                    tracing::debug!(?surface, ?outcome, "Native fullscreen unavailable");
                    next = surface.next();
                }
            }
        }
        tracing::warn!("Fullscreen not supported, using expanded view");
        self.pending = None;
        self.mode = ViewerMode::MobileExpanded;
    }

    fn update_from(&self, previous: ViewerMode) -> UiUpdate {
        let entered = previous != ViewerMode::MobileExpanded && self.mode == ViewerMode::MobileExpanded;
        let left = previous == ViewerMode::MobileExpanded && self.mode != ViewerMode::MobileExpanded;
        let action = if entered {
            Some(ClassAction::Add)
        } else if left {
            Some(ClassAction::Remove)
        } else {
            None
        };
        if previous != self.mode {
            tracing::debug!(?previous, mode = ?self.mode, "Viewer mode changed");
        }
        UiUpdate {
            previous,
            mode: self.mode,
            affordances: self.current_affordances(),
            body_class: action.map(|action| ClassToggle {
                class: SCROLL_LOCK_CLASS,
                action,
            }),
            container_class: action.map(|action| ClassToggle {
                class: EXPANDED_CONTAINER_CLASS,
                action,
            }),
        }
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(DeviceProfile::default())
    }
}
