//! Navigation fragments and scene-path extraction
//!
//! A fragment is the "where am I" part of the page location. Scene paths
//! (`<category>/<name>`) are pulled out of it with three strategies tried in
//! order:
//!
//! 1. **Structured**: `(gdEmbed/)scenes/<category>/<scene>`
//! 2. **General**: `<repo>/<category>/<project>`; the first segment is
//!    dropped without checking it is really a repository name
//! 3. **Fallback**: last two meaningful segments

use crate::encoding::decode_lenient;
use crate::normalize::truncate_suffix;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

static STRUCTURED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:gdEmbed/)?scenes/([^/]+)/([^/]+)(?:/(?:README|index)?)?$")
        .expect("structured scene pattern is valid")
});

static GENERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([^/]+)/([^/]+)/([^/?#]+)(?:/?(?:README|index)?)?$")
        .expect("general scene pattern is valid")
});

const IGNORED_SEGMENTS: [&str; 2] = ["README", "index"];

/// Strategy that produced a scene path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtractionStrategy {
    /// `scenes/<category>/<scene>` layout
    Structured,
    /// `<repo>/<category>/<project>` layout
    General,
    /// Last two non-doc-page segments
    Fallback,
}

/// Scene path extracted from a fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenePath {
    /// `<category>/<name>`
    pub path: String,
    /// Strategy that matched
    pub strategy: ExtractionStrategy,
}

impl ScenePath {
    /// Last segment of the scene path, used as the display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

impl Display for ScenePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Current navigation location within the document tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NavigationFragment(String);

impl NavigationFragment {
    /// Create fragment from a raw string
    #[inline]
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Create fragment from a `location.hash` value, dropping the leading `#`
    #[inline]
    #[must_use]
    pub fn from_hash(hash: &str) -> Self {
        Self(hash.strip_prefix('#').unwrap_or(hash).to_string())
    }

    /// Raw fragment text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the fragment points into the extended scene collection
    #[inline]
    #[must_use]
    pub fn targets_scene_collection(&self) -> bool {
        self.0.contains("gdEmbed") || self.0.contains("/scenes/")
    }

    /// Fragment prepared for scene extraction
    ///
    /// Query and fragment suffixes are cut, the rest decoded leniently, a
    /// `.md` extension dropped, and one leading and one trailing `/` removed.
    #[must_use]
    pub fn prepared(&self) -> String {
        let decoded = decode_lenient(truncate_suffix(&self.0));
        let mut path: &str = &decoded;
        path = path.strip_suffix(".md").unwrap_or(path);
        path = path.strip_prefix('/').unwrap_or(path);
        path = path.strip_suffix('/').unwrap_or(path);
        path.to_string()
    }

    /// Extract the current scene path, if any strategy applies
    #[must_use]
    pub fn scene_path(&self) -> Option<ScenePath> {
        let prepared = self.prepared();
        if prepared.is_empty() {
            tracing::debug!("No fragment to extract a scene path from");
            return None;
        }

        let found = structured(&prepared)
            .or_else(|| general(&prepared))
            .or_else(|| fallback(&prepared));

        match &found {
            Some(scene) => {
                tracing::debug!(strategy = ?scene.strategy, scene = %scene.path, "Extracted scene path");
            }
            None => tracing::debug!(fragment = %prepared, "Could not extract scene path"),
        }
        found
    }
}

impl Display for NavigationFragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NavigationFragment {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for NavigationFragment {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

fn structured(prepared: &str) -> Option<ScenePath> {
    let caps = STRUCTURED.captures(prepared)?;
    Some(ScenePath {
        path: format!("{}/{}", &caps[1], &caps[2]),
        strategy: ExtractionStrategy::Structured,
    })
}

fn general(prepared: &str) -> Option<ScenePath> {
    let caps = GENERAL.captures(prepared)?;
    Some(ScenePath {
        path: format!("{}/{}", &caps[2], &caps[3]),
        strategy: ExtractionStrategy::General,
    })
}

fn fallback(prepared: &str) -> Option<ScenePath> {
    let segments: Vec<&str> = prepared
        .split('/')
        .filter(|seg| !seg.is_empty() && !IGNORED_SEGMENTS.contains(seg))
        .collect();
    if segments.len() < 2 {
        return None;
    }
    Some(ScenePath {
        path: segments[segments.len() - 2..].join("/"),
        strategy: ExtractionStrategy::Fallback,
    })
}
