//! Mobile device detection
//!
//! Detection runs once per page view; the resulting [`DeviceProfile`] is
//! copied into every viewer so behavior cannot flip mid-interaction.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Widest viewport still treated as mobile, in CSS pixels
pub const MOBILE_VIEWPORT_MAX_WIDTH: u32 = 768;

static MOBILE_USER_AGENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("mobile user agent pattern is valid")
});

/// Raw platform signals read from the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformSignals {
    /// `navigator.userAgent`
    pub user_agent: String,
    /// Whether touch events are available
    pub touch_capable: bool,
    /// `window.innerWidth`
    pub viewport_width: u32,
}

impl PlatformSignals {
    /// Check if any signal points at a mobile device
    #[must_use]
    pub fn indicate_mobile(&self) -> bool {
        MOBILE_USER_AGENT.is_match(&self.user_agent)
            || self.touch_capable
            || self.viewport_width <= MOBILE_VIEWPORT_MAX_WIDTH
    }
}

impl Default for PlatformSignals {
    fn default() -> Self {
        Self {
            user_agent: String::new(),
            touch_capable: false,
            viewport_width: 1920,
        }
    }
}

/// Device class fixed for the lifetime of a page view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DeviceProfile {
    mobile: bool,
}

impl DeviceProfile {
    /// Detect device class from platform signals
    #[must_use]
    pub fn detect(signals: &PlatformSignals) -> Self {
        let mobile = signals.indicate_mobile();
        tracing::debug!(mobile, "Detected device profile");
        Self { mobile }
    }

    /// Desktop profile
    #[inline]
    #[must_use]
    pub fn desktop() -> Self {
        Self { mobile: false }
    }

    /// Mobile profile
    #[inline]
    #[must_use]
    pub fn mobile() -> Self {
        Self { mobile: true }
    }

    /// Check if the device is mobile
    #[inline]
    #[must_use]
    pub fn is_mobile(self) -> bool {
        self.mobile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_signals_are_desktop() {
        assert!(!DeviceProfile::detect(&PlatformSignals::default()).is_mobile());
    }

    #[test]
    fn user_agent_detection_is_case_insensitive() {
        let signals = PlatformSignals {
            user_agent: "Mozilla/5.0 (iphone; CPU iPhone OS 17_0 like Mac OS X)".to_string(),
            ..PlatformSignals::default()
        };
        assert!(signals.indicate_mobile());

        let signals = PlatformSignals {
            user_agent: "Opera Mini/8.0".to_string(),
            ..PlatformSignals::default()
        };
        assert!(signals.indicate_mobile());
    }

    #[test]
    fn touch_alone_means_mobile() {
        let signals = PlatformSignals {
            touch_capable: true,
            ..PlatformSignals::default()
        };
        assert!(DeviceProfile::detect(&signals).is_mobile());
    }

    #[test]
    fn viewport_threshold_is_inclusive() {
        let at = PlatformSignals {
            viewport_width: MOBILE_VIEWPORT_MAX_WIDTH,
            ..PlatformSignals::default()
        };
        let above = PlatformSignals {
            viewport_width: MOBILE_VIEWPORT_MAX_WIDTH + 1,
            ..PlatformSignals::default()
        };
        assert!(at.indicate_mobile());
        assert!(!above.indicate_mobile());
    }
}
