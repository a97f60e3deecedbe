//! Demo Embed Viewer
//!
//! Per-viewer presentation state for embedded demos: native fullscreen,
//! locally emulated expanded view, and the controls that drive them.
//!
//! # Components
//!
//! - [`ViewerState`]: mode transitions and the [`UiUpdate`] each produces
//! - [`FullscreenProbe`]: vendor-prefixed fullscreen entry points behind [`NativeFullscreen`]
//! - [`DeviceProfile`]: mobile detection from [`PlatformSignals`]
//! - [`ControlLayout`] / [`PopoutTarget`] / [`DoubleTapDetector`]: viewer controls
//! - [`harness`]: headless platform for driving a viewer without a browser
//!
//! # Example
//!
//! ```rust
//! use embed_viewer::harness::HeadlessPlatform;
//! use embed_viewer::{DeviceProfile, FullscreenProbe, ViewerMode, ViewerState};
//!
//! let mut probe = FullscreenProbe::new(HeadlessPlatform::without_fullscreen());
//! let mut viewer = ViewerState::new(DeviceProfile::desktop());
//!
//! let update = viewer.request_true_fullscreen(&mut probe);
//! assert_eq!(update.mode, ViewerMode::MobileExpanded);
//! assert_eq!(update.affordances.expanded_view.icon, "⇲");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod affordance;
pub mod controls;
pub mod device;
pub mod fullscreen;
pub mod harness;
pub mod state;

// Re-exports for convenience
pub use affordance::{Affordances, ButtonFace};
pub use controls::{ControlButton, ControlLayout, DoubleTapDetector, PopoutTarget};
pub use device::{DeviceProfile, PlatformSignals};
pub use fullscreen::{
    FullscreenProbe, NativeFullscreen, RequestOutcome, Surface, Vendor, VendorEntryPoints,
};
pub use state::{ClassAction, ClassToggle, UiUpdate, ViewerMode, ViewerState};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a viewer
    pub use crate::{
        DeviceProfile, FullscreenProbe, NativeFullscreen, UiUpdate, ViewerMode, ViewerState,
    };
}
