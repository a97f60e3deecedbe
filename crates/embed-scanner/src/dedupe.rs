//! Per-route record of processed markers

use std::collections::HashSet;

/// Markers already handled since the last route change
///
/// A marker is identified by its text plus a uniqueness token, so two
/// identical markers on one page are still both processed.
#[derive(Debug, Clone, Default)]
pub struct ProcessedMarkers {
    seen: HashSet<(String, usize)>,
}

impl ProcessedMarkers {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a marker, returning `false` if it was already recorded
    pub fn insert(&mut self, text: &str, token: usize) -> bool {
        self.seen.insert((text.to_string(), token))
    }

    /// Check if a marker was recorded
    #[must_use]
    pub fn contains(&self, text: &str, token: usize) -> bool {
        self.seen.contains(&(text.to_string(), token))
    }

    /// Forget every marker
    pub fn clear(&mut self) {
        self.seen.clear();
    }

    /// Number of recorded markers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Check if nothing is recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_different_token() {
        let mut seen = ProcessedMarkers::new();
        assert!(seen.insert("embed-pong", 0));
        assert!(seen.insert("embed-pong", 40));
        assert!(!seen.insert("embed-pong", 0));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn clear_forgets() {
        let mut seen = ProcessedMarkers::new();
        seen.insert("embed-pong", 0);
        seen.clear();
        assert!(seen.is_empty());
        assert!(!seen.contains("embed-pong", 0));
    }
}
