//! Page scanning and viewer planning

use crate::dedupe::ProcessedMarkers;
use crate::locator::{MarkerLocator, MarkerSite, Page, CONTAINER_CLASS};
use embed_resolver::{NavigationFragment, ResolvedDemo, Resolver, ResolverConfig, SiteRoot};
use embed_viewer::{ControlLayout, DeviceProfile, PlatformSignals, PopoutTarget};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Extra container class for embeds showing a whole project
pub const PROJECT_EMBED_CLASS: &str = "demo-project-embed";

/// Class of the inline notice shown for a failed marker
pub const NOTICE_CLASS: &str = "embed-error";

/// Scanner configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Resolver settings
    pub resolver: ResolverConfig,
    /// Signals used to pick the device profile
    pub device: PlatformSignals,
}

impl ScannerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With resolver configuration
    #[inline]
    #[must_use]
    pub fn with_resolver(mut self, resolver: ResolverConfig) -> Self {
        self.resolver = resolver;
        self
    }

    /// With platform signals
    #[inline]
    #[must_use]
    pub fn with_device(mut self, device: PlatformSignals) -> Self {
        self.device = device;
        self
    }
}

/// Everything needed to inject one viewer after a marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedPlan {
    /// Resolved demo
    pub demo: ResolvedDemo,
    /// Absolute frame source
    pub src: String,
    /// Viewer header text
    pub title: String,
    /// Classes of the viewer container
    pub container_classes: Vec<&'static str>,
    /// Overlay buttons
    pub controls: ControlLayout,
    /// Pop-out button target
    pub popout: PopoutTarget,
    /// Whether double tap on the frame toggles the expanded view
    pub double_tap: bool,
}

impl EmbedPlan {
    /// Plan a viewer for a resolved demo
    #[must_use]
    pub fn new(demo: ResolvedDemo, site_root: &SiteRoot, device: DeviceProfile) -> Self {
        let src = demo.absolute_url(site_root);
        let mut container_classes = vec![CONTAINER_CLASS];
        if demo.is_project_level_embed {
            container_classes.push(PROJECT_EMBED_CLASS);
        }
        Self {
            title: format!("🎮 Interactive Demo: {}", demo.scene_name),
            popout: PopoutTarget::for_device(device, src.clone(), &demo.scene_name),
            controls: ControlLayout::for_device(device),
            double_tap: device.is_mobile(),
            container_classes,
            src,
            demo,
        }
    }
}

/// What to render after a marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmbedOutcome {
    /// Inject a viewer
    Viewer(EmbedPlan),
    /// Show an inline notice instead
    Notice {
        /// Notice text
        message: String,
    },
}

impl EmbedOutcome {
    /// Viewer plan, if the marker resolved
    #[must_use]
    pub fn plan(&self) -> Option<&EmbedPlan> {
        match self {
            Self::Viewer(plan) => Some(plan),
            Self::Notice { .. } => None,
        }
    }

    /// Check if the marker failed to resolve
    #[inline]
    #[must_use]
    pub fn is_notice(&self) -> bool {
        matches!(self, Self::Notice { .. })
    }
}

/// A newly processed marker and its outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScannedMarker {
    /// Where the marker was found
    pub marker: MarkerSite,
    /// What to render after it
    pub outcome: EmbedOutcome,
}

/// Scans pages for markers, once per marker per route
#[derive(Debug)]
pub struct Scanner {
    locator: MarkerLocator,
    resolver: Resolver,
    device: DeviceProfile,
    processed: ProcessedMarkers,
}

impl Scanner {
    /// Create scanner from configuration
    #[must_use]
    pub fn new(config: ScannerConfig) -> Self {
        let device = DeviceProfile::detect(&config.device);
        Self::with_resolver(Resolver::new(config.resolver), device)
    }

    /// Create scanner around an existing resolver
    #[must_use]
    pub fn with_resolver(resolver: Resolver, device: DeviceProfile) -> Self {
        Self {
            locator: MarkerLocator::new(),
            resolver,
            device,
            processed: ProcessedMarkers::new(),
        }
    }

    /// Device profile used for viewer plans
    #[inline]
    #[must_use]
    pub fn device(&self) -> DeviceProfile {
        self.device
    }

    /// Markers processed since the last route change
    #[inline]
    #[must_use]
    pub fn processed(&self) -> &ProcessedMarkers {
        &self.processed
    }

    /// Start a new route; every marker becomes eligible again
    pub fn begin_route(&mut self) {
        info!(forgotten = self.processed.len(), "Route changed, clearing processed markers");
        self.processed.clear();
    }

    /// Process every new marker of a page
    ///
    /// Markers already seen on this route, or already followed by a viewer,
    /// produce no outcome. A failing marker yields a notice and does not stop
    /// the scan.
    pub fn scan(
        &mut self,
        page: Page<'_>,
        fragment: &NavigationFragment,
        site_root: &SiteRoot,
    ) -> Vec<ScannedMarker> {
        let mut scanned = Vec::new();
        for site in self.locator.locate(page) {
            if !self.processed.insert(&site.text, site.offset) {
                debug!(marker = %site.text, offset = site.offset, "Marker already processed");
                continue;
            }
            if site.already_injected {
                debug!(marker = %site.text, "Viewer already present");
                continue;
            }
            info!(marker = %site.text, "Processing embed marker");

            let outcome = match self.resolver.resolve(&site.text, fragment) {
                Ok(demo) => {
                    debug!(url = %demo.url, scene = %demo.scene_name, "Marker resolved");
                    EmbedOutcome::Viewer(EmbedPlan::new(demo, site_root, self.device))
                }
                Err(e) => {
                    warn!(marker = %site.text, error = %e, "Embed marker failed");
                    EmbedOutcome::Notice { message: e.notice() }
                }
            };
            scanned.push(ScannedMarker { marker: site, outcome });
        }
        scanned
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}
