//! Marker resolution
//!
//! Turns a parsed [`MarkerSpec`] plus the current [`NavigationFragment`] into
//! the export URL of a demo and the name it is displayed under.

use crate::config::ResolverConfig;
use crate::encoding::encode_component;
use crate::error::{ResolveError, ResolveResult};
use crate::fragment::NavigationFragment;
use crate::marker::{MarkerGrammar, MarkerSpec, CURRENT_PATH_PLACEHOLDER};
use crate::normalize::{normalize_path, EXPORT_DIR};
use crate::site::SiteRoot;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static STANDARD_GRAMMAR: Lazy<MarkerGrammar> = Lazy::new(MarkerGrammar::standard);

/// Minimum `/`-separated segments in a legacy scene path
pub const MIN_SCENE_SEGMENTS: usize = 4;

/// Demo location and display data for one marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDemo {
    /// Path relative to the site root, ending in the export directory
    /// (plus an optional `?scene=` argument)
    pub url: String,
    /// Human-readable name shown in the viewer header
    pub scene_name: String,
    /// Scene path or project path the demo was resolved from
    pub scene_identifier: String,
    /// Whether the embed shows a whole project rather than one scene
    pub is_project_level_embed: bool,
}

impl ResolvedDemo {
    /// Absolute URL under the given site root
    #[inline]
    #[must_use]
    pub fn absolute_url(&self, root: &SiteRoot) -> String {
        root.join(&self.url)
    }

    /// Check if the URL carries a scene query argument
    #[inline]
    #[must_use]
    pub fn has_scene_arg(&self) -> bool {
        self.url.contains("?scene=")
    }
}

/// Resolver bound to a grammar and configuration
#[derive(Debug, Default)]
pub struct Resolver {
    grammar: MarkerGrammar,
    config: ResolverConfig,
}

impl Resolver {
    /// Create resolver with the standard grammar
    #[inline]
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            grammar: MarkerGrammar::standard(),
            config,
        }
    }

    /// With a custom grammar
    #[inline]
    #[must_use]
    pub fn with_grammar(mut self, grammar: MarkerGrammar) -> Self {
        self.grammar = grammar;
        self
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Grammar used to parse markers
    #[inline]
    #[must_use]
    pub fn grammar(&self) -> &MarkerGrammar {
        &self.grammar
    }

    /// Parse and resolve raw marker text
    ///
    /// # Errors
    /// See [`resolve_spec`].
    pub fn resolve(&self, marker_text: &str, fragment: &NavigationFragment) -> ResolveResult<ResolvedDemo> {
        let spec = self.grammar.parse(marker_text)?;
        resolve_spec(&spec, fragment, &self.config)
    }
}

/// Parse and resolve raw marker text with the standard grammar
///
/// # Errors
/// - [`ResolveError::Parse`] when the marker matches no known syntax
/// - [`ResolveError::PathExtraction`] when a scene path is needed but cannot
///   be derived from `current_fragment`
/// - [`ResolveError::SegmentCount`] when a legacy scene path is too short
pub fn resolve(marker_text: &str, current_fragment: &str, config: &ResolverConfig) -> ResolveResult<ResolvedDemo> {
    let spec = STANDARD_GRAMMAR.parse(marker_text)?;
    resolve_spec(&spec, &NavigationFragment::new(current_fragment), config)
}

/// Resolve an already parsed marker
///
/// # Errors
/// - [`ResolveError::PathExtraction`] when a scene path is needed but cannot
///   be derived from `fragment`
/// - [`ResolveError::SegmentCount`] when a legacy scene path is too short
pub fn resolve_spec(
    spec: &MarkerSpec,
    fragment: &NavigationFragment,
    config: &ResolverConfig,
) -> ResolveResult<ResolvedDemo> {
    let resolved = match spec {
        MarkerSpec::CurrentPath => resolve_current_path(fragment, config)?,
        MarkerSpec::ExplicitProjectPath(path) => ResolvedDemo {
            url: export_url(&normalize_path(path), None, config),
            scene_name: last_segment(path).to_string(),
            scene_identifier: path.clone(),
            is_project_level_embed: true,
        },
        MarkerSpec::LegacySimple(project) => ResolvedDemo {
            url: format!("{project}/{EXPORT_DIR}/"),
            scene_name: format!("{project} Project"),
            scene_identifier: project.clone(),
            is_project_level_embed: true,
        },
        MarkerSpec::LegacyScene {
            project,
            scene_path_template,
        } => resolve_legacy_scene(project, scene_path_template, fragment, config)?,
    };
    tracing::debug!(url = %resolved.url, scene = %resolved.scene_name, "Resolved demo");
    Ok(resolved)
}

fn resolve_current_path(fragment: &NavigationFragment, config: &ResolverConfig) -> ResolveResult<ResolvedDemo> {
    let scene = fragment
        .scene_path()
        .ok_or_else(|| ResolveError::path_extraction(fragment.as_str()))?;

    let base = if fragment.targets_scene_collection() {
        tracing::debug!("Using extended export root");
        normalize_path(&config.extended_export_root)
    } else {
        tracing::debug!("Using per-project export");
        normalize_path(fragment.as_str())
    };

    Ok(ResolvedDemo {
        url: export_url(&base, Some(&scene.path), config),
        scene_name: scene.name().to_string(),
        scene_identifier: scene.path,
        is_project_level_embed: true,
    })
}

fn resolve_legacy_scene(
    project: &str,
    template: &str,
    fragment: &NavigationFragment,
    config: &ResolverConfig,
) -> ResolveResult<ResolvedDemo> {
    let template = template.trim();
    let expanded = match template.strip_prefix(CURRENT_PATH_PLACEHOLDER).filter(|rest| rest.starts_with('/')) {
        Some(rest) => {
            let scene = fragment
                .scene_path()
                .ok_or_else(|| ResolveError::placeholder_expansion(fragment.as_str()))?;
            format!("scenes/{}{rest}", scene.path)
        }
        None => template.to_string(),
    };

    let segments: Vec<&str> = expanded.split('/').collect();
    let found = segments.len();
    if found < MIN_SCENE_SEGMENTS {
        return Err(ResolveError::segment_count(expanded, found));
    }
    let scene_path = format!("{}/{}", segments[1], segments[2]);
    let scene_name = segments[3].to_string();

    Ok(ResolvedDemo {
        url: export_url(&normalize_path(project), Some(&scene_path), config),
        scene_name,
        scene_identifier: expanded,
        is_project_level_embed: false,
    })
}

/// Export URL for a normalized base, with the scene argument when allowed
fn export_url(base: &str, scene: Option<&str>, config: &ResolverConfig) -> String {
    let mut url = if base.is_empty() {
        format!("{EXPORT_DIR}/")
    } else {
        format!("{base}/{EXPORT_DIR}/")
    };
    if let Some(scene) = scene.filter(|_| config.allow_scene_query_arg) {
        url.push_str("?scene=");
        url.push_str(&encode_component(scene));
    }
    url
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ResolverConfig {
        ResolverConfig::default()
    }

    #[test]
    fn current_path_on_scene_page_uses_extended_root() {
        let demo = resolve("embed-{$PATH}", "/gdEmbed/scenes/2d/platformer/README", &cfg()).unwrap();
        assert_eq!(demo.url, "godot-demo-extended/gdEmbed/exports/web/?scene=2d%2Fplatformer");
        assert_eq!(demo.scene_name, "platformer");
        assert_eq!(demo.scene_identifier, "2d/platformer");
        assert!(demo.is_project_level_embed);
    }

    #[test]
    fn current_path_on_project_page_uses_fragment() {
        let demo = resolve("embed-{$PATH}", "/godot-demo-projects/2d/bullet_shower/README", &cfg()).unwrap();
        assert_eq!(
            demo.url,
            "godot-demo-projects/2d/bullet_shower/exports/web/?scene=2d%2Fbullet_shower"
        );
        assert_eq!(demo.scene_name, "bullet_shower");
    }

    #[test]
    fn current_path_without_scene_arg() {
        let config = cfg().with_scene_query_arg(false);
        let demo = resolve("embed-{$PATH}", "repo/3d/voxel", &config).unwrap();
        assert_eq!(demo.url, "repo/3d/voxel/exports/web/");
    }

    #[test]
    fn current_path_needs_a_scene() {
        let err = resolve("embed-{$PATH}", "/README", &cfg()).unwrap_err();
        assert_eq!(err, ResolveError::path_extraction("/README"));
    }

    #[test]
    fn explicit_path_never_has_scene_arg() {
        let demo = resolve("embed-{/demo/foo/README}", "scenes/2d/x", &cfg()).unwrap();
        assert_eq!(demo.url, "demo/foo/exports/web/");
        assert_eq!(demo.scene_name, "README");
        assert_eq!(demo.scene_identifier, "/demo/foo/README");
        assert!(!demo.has_scene_arg());
    }

    #[test]
    fn explicit_path_already_pointing_at_export() {
        let demo = resolve("embed-{demo/foo/exports/web/}", "", &cfg()).unwrap();
        assert_eq!(demo.url, "demo/foo/exports/web/");
    }

    #[test]
    fn legacy_simple_is_not_normalized() {
        let demo = resolve("embed-demo", "anything", &cfg()).unwrap();
        assert_eq!(demo.url, "demo/exports/web/");
        assert_eq!(demo.scene_name, "demo Project");
        assert!(demo.is_project_level_embed);
    }

    #[test]
    fn legacy_scene() {
        let demo = resolve("embed-proj: scenes/2d/platformer/level1", "", &cfg()).unwrap();
        assert_eq!(demo.url, "proj/exports/web/?scene=2d%2Fplatformer");
        assert_eq!(demo.scene_name, "level1");
        assert_eq!(demo.scene_identifier, "scenes/2d/platformer/level1");
        assert!(!demo.is_project_level_embed);
    }

    #[test]
    fn legacy_scene_expands_placeholder() {
        let demo = resolve("embed-proj: {$PATH}/main", "gdEmbed/scenes/3d/lights/README", &cfg()).unwrap();
        assert_eq!(demo.scene_identifier, "scenes/3d/lights/main");
        assert_eq!(demo.url, "proj/exports/web/?scene=3d%2Flights");
        assert_eq!(demo.scene_name, "main");
    }

    #[test]
    fn legacy_scene_placeholder_needs_location() {
        let err = resolve("embed-proj: {$PATH}/main", "", &cfg()).unwrap_err();
        assert!(matches!(err, ResolveError::PathExtraction { placeholder: true, .. }));
    }

    #[test]
    fn legacy_scene_too_short() {
        let err = resolve("embed-proj: 2d/platformer", "", &cfg()).unwrap_err();
        assert_eq!(err, ResolveError::segment_count("2d/platformer", 2));
    }

    #[test]
    fn absolute_url_joins_site_root() {
        let demo = resolve("embed-demo", "", &cfg()).unwrap();
        let root = SiteRoot::from_href("https://docs.example/index.html#/");
        assert_eq!(demo.absolute_url(&root), "https://docs.example/demo/exports/web/");
    }

    #[test]
    fn resolver_uses_its_grammar() {
        let resolver = Resolver::new(cfg()).with_grammar(MarkerGrammar::empty());
        let err = resolver.resolve("embed-demo", &NavigationFragment::default()).unwrap_err();
        assert!(matches!(err, ResolveError::Parse { .. }));
    }
}
