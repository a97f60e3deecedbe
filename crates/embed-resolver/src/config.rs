//! Resolver configuration

use serde::{Deserialize, Serialize};

/// Export root used when the fragment points into the extended scene collection
pub const DEFAULT_EXTENDED_EXPORT_ROOT: &str = "godot-demo-extended/gdEmbed";

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Append `?scene=` to generated URLs when a scene is known
    pub allow_scene_query_arg: bool,
    /// Project path of the shared export used by `{$PATH}` markers on scene pages
    pub extended_export_root: String,
}

impl ResolverConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With scene query argument enabled or disabled
    #[inline]
    #[must_use]
    pub fn with_scene_query_arg(mut self, allow: bool) -> Self {
        self.allow_scene_query_arg = allow;
        self
    }

    /// With extended export root
    #[inline]
    #[must_use]
    pub fn with_extended_export_root(mut self, root: impl Into<String>) -> Self {
        self.extended_export_root = root.into();
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            allow_scene_query_arg: true,
            extended_export_root: DEFAULT_EXTENDED_EXPORT_ROOT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_allow_scene_arg() {
        let config = ResolverConfig::new();
        assert!(config.allow_scene_query_arg);
        assert_eq!(config.extended_export_root, DEFAULT_EXTENDED_EXPORT_ROOT);
    }

    #[test]
    fn builder_overrides() {
        let config = ResolverConfig::new()
            .with_scene_query_arg(false)
            .with_extended_export_root("demos/shared");
        assert!(!config.allow_scene_query_arg);
        assert_eq!(config.extended_export_root, "demos/shared");
    }
}
