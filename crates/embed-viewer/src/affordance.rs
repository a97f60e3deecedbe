//! Control button faces derived from the viewer mode

use crate::state::ViewerMode;
use serde::Serialize;

/// Icon and tooltip of one control button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ButtonFace {
    /// Button text
    pub icon: &'static str,
    /// Button `title` attribute
    pub title: &'static str,
}

impl ButtonFace {
    const fn new(icon: &'static str, title: &'static str) -> Self {
        Self { icon, title }
    }
}

const FULLSCREEN_ICON: &str = "⛶";

const TRUE_FULLSCREEN_ENTER: ButtonFace = ButtonFace::new(FULLSCREEN_ICON, "Enter Fullscreen (Native)");
const TRUE_FULLSCREEN_EXIT: ButtonFace = ButtonFace::new(FULLSCREEN_ICON, "Exit Fullscreen");
const EXPANDED_ENTER: ButtonFace = ButtonFace::new("⇱", "Expanded View");
const EXPANDED_EXIT: ButtonFace = ButtonFace::new("⇲", "Exit Expanded View");
const LEGACY_ENTER: ButtonFace = ButtonFace::new(FULLSCREEN_ICON, "Enter Fullscreen");
const LEGACY_EXIT: ButtonFace = ButtonFace::new(FULLSCREEN_ICON, "Exit Fullscreen");

/// Faces of the three mode-dependent buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Affordances {
    /// Native fullscreen button
    pub true_fullscreen: ButtonFace,
    /// Expanded view button
    pub expanded_view: ButtonFace,
    /// Legacy combined fullscreen button
    pub legacy: ButtonFace,
}

impl Affordances {
    /// Button faces for a mode
    #[must_use]
    pub fn for_mode(mode: ViewerMode) -> Self {
        let native = mode == ViewerMode::NativeFullscreen;
        let expanded = mode == ViewerMode::MobileExpanded;
        Self {
            true_fullscreen: if native { TRUE_FULLSCREEN_EXIT } else { TRUE_FULLSCREEN_ENTER },
            expanded_view: if expanded { EXPANDED_EXIT } else { EXPANDED_ENTER },
            legacy: if native || expanded { LEGACY_EXIT } else { LEGACY_ENTER },
        }
    }
}

impl Default for Affordances {
    fn default() -> Self {
        Self::for_mode(ViewerMode::Normal)
    }
}
