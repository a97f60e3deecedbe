//! Native fullscreen capability probe
//!
//! Browsers expose fullscreen through several vendor-prefixed entry points.
//! [`FullscreenProbe`] tries them in [`Vendor::ORDER`] behind the single
//! [`NativeFullscreen`] interface, so the state machine never sees the
//! fan-out.

use serde::{Deserialize, Serialize};

/// Vendor flavor of the fullscreen API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vendor {
    /// `requestFullscreen` / `fullscreenElement`
    Standard,
    /// `webkitRequestFullscreen` / `webkitFullscreenElement`
    Webkit,
    /// `mozRequestFullScreen` / `mozFullScreenElement`
    Moz,
}

impl Vendor {
    /// Order in which entry points are tried
    pub const ORDER: [Vendor; 3] = [Vendor::Standard, Vendor::Webkit, Vendor::Moz];

    /// Document event fired when this vendor's fullscreen state changes
    #[must_use]
    pub fn change_event(self) -> &'static str {
        match self {
            Vendor::Standard => "fullscreenchange",
            Vendor::Webkit => "webkitfullscreenchange",
            Vendor::Moz => "mozfullscreenchange",
        }
    }
}

/// Element a fullscreen request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Surface {
    /// The embedded demo frame
    Frame,
    /// The viewer container around the frame
    Container,
}

impl Surface {
    /// Native attempts in fallback order, before local emulation
    pub const FALLBACK_CHAIN: [Surface; 2] = [Surface::Frame, Surface::Container];

    /// Next surface to try after this one fails
    #[must_use]
    pub fn next(self) -> Option<Surface> {
        match self {
            Surface::Frame => Some(Surface::Container),
            Surface::Container => None,
        }
    }
}

/// Immediate result of a fullscreen request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestOutcome {
    /// Request issued; the platform confirms or rejects it later
    Pending,
    /// Request refused synchronously
    Rejected,
    /// No entry point available for this surface
    Unsupported,
}

/// Raw vendor entry points of one page
///
/// Each method returns `None` (or `false`) when the vendor entry point does
/// not exist, so the probe can move on to the next vendor.
pub trait VendorEntryPoints {
    /// Whether `vendor`'s fullscreen element is set, if the property exists
    fn fullscreen_element(&self, vendor: Vendor) -> Option<bool>;

    /// Call `vendor`'s request method on `surface`, if it exists
    fn request(&mut self, vendor: Vendor, surface: Surface) -> Option<RequestOutcome>;

    /// Call `vendor`'s exit method, returning whether it exists
    fn exit(&mut self, vendor: Vendor) -> bool;
}

/// Native fullscreen as seen by the viewer state machine
pub trait NativeFullscreen {
    /// Whether any element currently holds native fullscreen
    fn is_active(&self) -> bool;

    /// Request native fullscreen on `surface`
    fn request(&mut self, surface: Surface) -> RequestOutcome;

    /// Exit native fullscreen, returning whether an exit entry point existed
    fn exit(&mut self) -> bool;
}

/// Tries vendor entry points in a fixed order
#[derive(Debug, Clone, Default)]
pub struct FullscreenProbe<E> {
    entry_points: E,
}

impl<E> FullscreenProbe<E> {
    /// Wrap raw entry points
    #[inline]
    #[must_use]
    pub fn new(entry_points: E) -> Self {
        Self { entry_points }
    }

    /// Underlying entry points
    #[inline]
    #[must_use]
    pub fn entry_points(&self) -> &E {
        &self.entry_points
    }

    /// Mutable access to the underlying entry points
    #[inline]
    pub fn entry_points_mut(&mut self) -> &mut E {
        &mut self.entry_points
    }

    /// Unwrap the entry points
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> E {
        self.entry_points
    }
}

impl<E: VendorEntryPoints> NativeFullscreen for FullscreenProbe<E> {
    fn is_active(&self) -> bool {
        Vendor::ORDER
            .iter()
            .any(|&vendor| self.entry_points.fullscreen_element(vendor) == Some(true))
    }

    fn request(&mut self, surface: Surface) -> RequestOutcome {
        // First vendor with an entry point decides; a rejection does not fall
        // through to the next vendor.
        for vendor in Vendor::ORDER {
            if let Some(outcome) = self.entry_points.request(vendor, surface) {
                tracing::trace!(?vendor, ?surface, ?outcome, "Native fullscreen requested");
                return outcome;
            }
        }
        RequestOutcome::Unsupported
    }

    fn exit(&mut self) -> bool {
        Vendor::ORDER
            .into_iter()
            .any(|vendor| self.entry_points.exit(vendor))
    }
}
