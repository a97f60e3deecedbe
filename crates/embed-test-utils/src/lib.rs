//! Testing utilities for the demo embed workspace
//!
//! Shared fixtures for fragments, pages and headless platforms.

#![allow(missing_docs)]

use embed_resolver::{NavigationFragment, ResolverConfig, SiteRoot};
use embed_viewer::harness::{HeadlessPlatform, RequestPolicy};
use embed_viewer::{DeviceProfile, FullscreenProbe, PlatformSignals, Vendor, ViewerState};

pub const SITE_HREF: &str = "https://docs.example/demos/index.html#/godot-demo-projects/2d/platformer/README";

/// Fragment inside the scene collection: `gdEmbed/scenes/<category>/<scene>`
pub const SCENE_FRAGMENT: &str = "#/godot-demo-extended/gdEmbed/scenes/2d/platformer/README";

/// Fragment of an ordinary project page
pub const PROJECT_FRAGMENT: &str = "#/godot-demo-projects/2d/physics_platformer/README";

/// HTML page with one marker of each syntax
pub const SAMPLE_HTML: &str = r#"<h1>Platformer</h1>
<p>Intro</p>
<!-- embed-{$PATH} -->
<p>Explicit</p>
<!-- embed-{2d/dodge_the_creeps} -->
<!-- embed-pong -->
<!-- embed-gdEmbed: {$PATH}/main -->
<!-- just a comment -->
"#;

/// Markdown page with markers in HTML blocks and inline HTML
pub const SAMPLE_MARKDOWN: &str = "# Platformer\n\nSome text.\n\n<!-- embed-{$PATH} -->\n\nInline <!-- embed-pong --> marker.\n\n```html\n<!-- embed-{not/a/marker} -->\n```\n";

pub fn site_root() -> SiteRoot {
    SiteRoot::from_href(SITE_HREF)
}

pub fn scene_fragment() -> NavigationFragment {
    NavigationFragment::from_hash(SCENE_FRAGMENT)
}

pub fn project_fragment() -> NavigationFragment {
    NavigationFragment::from_hash(PROJECT_FRAGMENT)
}

pub fn config_without_scene_arg() -> ResolverConfig {
    ResolverConfig::new().with_scene_query_arg(false)
}

pub fn phone_signals() -> PlatformSignals {
    PlatformSignals {
        user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)".to_string(),
        touch_capable: true,
        viewport_width: 390,
    }
}

pub fn desktop_signals() -> PlatformSignals {
    PlatformSignals::default()
}

/// Platform with every vendor present, granting every request
pub fn full_platform() -> HeadlessPlatform {
    HeadlessPlatform::new(Vendor::ORDER)
}

/// Platform that only answers webkit requests and denies the frame
pub fn webkit_frame_denied() -> HeadlessPlatform {
    HeadlessPlatform::new([Vendor::Webkit]).with_frame_policy(RequestPolicy::Deny)
}

/// Platform refusing every request synchronously
pub fn refusing_platform() -> HeadlessPlatform {
    HeadlessPlatform::new([Vendor::Standard])
        .with_frame_policy(RequestPolicy::Refuse)
        .with_container_policy(RequestPolicy::Refuse)
}

pub fn desktop_viewer(platform: HeadlessPlatform) -> (ViewerState, FullscreenProbe<HeadlessPlatform>) {
    (ViewerState::new(DeviceProfile::desktop()), FullscreenProbe::new(platform))
}

pub fn mobile_viewer(platform: HeadlessPlatform) -> (ViewerState, FullscreenProbe<HeadlessPlatform>) {
    (ViewerState::new(DeviceProfile::mobile()), FullscreenProbe::new(platform))
}
