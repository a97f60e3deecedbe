//! Site root derived from the page location

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Base URL every demo path is relative to, always ending in exactly one `/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SiteRoot(String);

impl SiteRoot {
    /// Derive the site root from a full page `href`
    ///
    /// # Examples
    /// - `https://docs.example/index.html#/2d/pong` → `https://docs.example/`
    /// - `https://docs.example/manual` → `https://docs.example/manual/`
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        let page = href.find('#').map_or(href, |end| &href[..end]);
        let page = page.strip_suffix("index.html").filter(|dir| dir.ends_with('/')).unwrap_or(page);
        let mut root = page.trim_end_matches('/').to_string();
        root.push('/');
        Self(root)
    }

    /// Site root as a string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join a path relative to the site root
    #[must_use]
    pub fn join(&self, relative: &str) -> String {
        format!("{}{}", self.0, relative.strip_prefix('/').unwrap_or(relative))
    }
}

impl Default for SiteRoot {
    fn default() -> Self {
        Self("/".to_string())
    }
}

impl Display for SiteRoot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
