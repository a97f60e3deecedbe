//! Embed marker grammar
//!
//! Marker text is matched against an ordered list of rules. The first rule
//! that accepts the whole text decides the [`MarkerSpec`]; when none does the
//! marker is a parse error. Order matters: `embed-{$PATH}` would otherwise be
//! read as an explicit project path.

use crate::error::{ResolveError, ResolveResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Prefix shared by every marker
pub const MARKER_PREFIX: &str = "embed-";

/// Placeholder standing for the current scene path
pub const CURRENT_PATH_PLACEHOLDER: &str = "{$PATH}";

static EXPLICIT_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^embed-\{([^}]+)\}$").expect("explicit path pattern is valid")
});

static LEGACY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^embed-([A-Za-z0-9_-]+)(?:\s*:\s*(.+))?$").expect("legacy pattern is valid")
});

/// Parsed intent of an embed marker
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerSpec {
    /// `embed-{$PATH}`: derive everything from the navigation fragment
    CurrentPath,
    /// `embed-{<path>}`: names a project directory
    ExplicitProjectPath(String),
    /// `embed-<name>`: names a project, no scene
    LegacySimple(String),
    /// `embed-<name>: <scene path>`: names a project and a scene path template
    LegacyScene {
        /// Project name
        project: String,
        /// Scene path, possibly starting with `{$PATH}/`
        scene_path_template: String,
    },
}

impl MarkerSpec {
    /// Check if resolving this marker reads the navigation fragment
    #[must_use]
    pub fn needs_location(&self) -> bool {
        match self {
            Self::CurrentPath => true,
            Self::LegacyScene {
                scene_path_template,
                ..
            } => scene_path_template
                .trim()
                .starts_with(&format!("{CURRENT_PATH_PLACEHOLDER}/")),
            Self::ExplicitProjectPath(_) | Self::LegacySimple(_) => false,
        }
    }
}

/// A single marker syntax
pub trait MarkerRule: Send + Sync {
    /// Rule name, for diagnostics
    fn name(&self) -> &'static str;

    /// Parse trimmed marker text, or `None` if this syntax does not apply
    fn parse(&self, text: &str) -> Option<MarkerSpec>;
}

/// `embed-{$PATH}`
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentPathRule;

impl MarkerRule for CurrentPathRule {
    fn name(&self) -> &'static str {
        "current-path"
    }

    fn parse(&self, text: &str) -> Option<MarkerSpec> {
        let placeholder = text.strip_prefix(MARKER_PREFIX)?;
        (placeholder == CURRENT_PATH_PLACEHOLDER).then_some(MarkerSpec::CurrentPath)
    }
}

/// `embed-{<project/path>}`
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitPathRule;

impl MarkerRule for ExplicitPathRule {
    fn name(&self) -> &'static str {
        "explicit-path"
    }

    fn parse(&self, text: &str) -> Option<MarkerSpec> {
        let caps = EXPLICIT_PATH.captures(text)?;
        Some(MarkerSpec::ExplicitProjectPath(caps[1].to_string()))
    }
}

/// `embed-<name>` and `embed-<name>: <scene path>`
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyRule;

impl MarkerRule for LegacyRule {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn parse(&self, text: &str) -> Option<MarkerSpec> {
        let caps = LEGACY.captures(text)?;
        let project = caps[1].to_string();
        Some(match caps.get(2) {
            Some(rest) => MarkerSpec::LegacyScene {
                project,
                scene_path_template: rest.as_str().trim().to_string(),
            },
            None => MarkerSpec::LegacySimple(project),
        })
    }
}

/// Ordered marker rules
pub struct MarkerGrammar {
    rules: Vec<Box<dyn MarkerRule>>,
}

impl Default for MarkerGrammar {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for MarkerGrammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkerGrammar")
            .field("rules", &self.rule_names())
            .finish()
    }
}

impl MarkerGrammar {
    /// Create grammar with no rules
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Grammar with the built-in syntaxes in priority order
    #[must_use]
    pub fn standard() -> Self {
        let mut grammar = Self::empty();
        grammar.push(CurrentPathRule);
        grammar.push(ExplicitPathRule);
        grammar.push(LegacyRule);
        grammar
    }

    /// Append a rule with the lowest priority so far
    pub fn push<R: MarkerRule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    /// Rule names in evaluation order
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Parse raw marker text
    ///
    /// # Errors
    /// Returns [`ResolveError::Parse`] if no rule accepts the trimmed text.
    pub fn parse(&self, raw: &str) -> ResolveResult<MarkerSpec> {
        let text = raw.trim();
        self.rules
            .iter()
            .find_map(|rule| {
                let spec = rule.parse(text)?;
                tracing::trace!(rule = rule.name(), "Marker rule matched");
                Some(spec)
            })
            .ok_or_else(|| ResolveError::parse(text))
    }
}
