//! Error types for marker resolution
//!
//! Every variant is recoverable at the marker level: the caller renders an
//! inline notice in place of the viewer and keeps scanning.

/// Errors produced while resolving a single embed marker
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Marker text matches none of the known syntaxes
    #[error("invalid embed format: {marker}")]
    Parse {
        /// Trimmed marker text
        marker: String,
    },

    /// No extraction strategy produced a scene path from the fragment
    #[error("could not determine scene path from fragment '{fragment}'")]
    PathExtraction {
        /// Raw navigation fragment
        fragment: String,
        /// Whether the failure happened while expanding a `{$PATH}` placeholder
        placeholder: bool,
    },

    /// Legacy scene path has fewer than four `/`-separated segments
    #[error("invalid embed path format: '{path}' has {found} segments, expected at least 4")]
    SegmentCount {
        /// Scene path after placeholder expansion
        path: String,
        /// Number of segments found
        found: usize,
    },
}

impl ResolveError {
    /// Create parse error for marker text
    #[inline]
    pub fn parse(marker: impl Into<String>) -> Self {
        Self::Parse {
            marker: marker.into(),
        }
    }

    /// Create extraction error for a `{$PATH}` marker
    #[inline]
    pub fn path_extraction(fragment: impl Into<String>) -> Self {
        Self::PathExtraction {
            fragment: fragment.into(),
            placeholder: false,
        }
    }

    /// Create extraction error for a `{$PATH}/` prefix inside a legacy scene path
    #[inline]
    pub fn placeholder_expansion(fragment: impl Into<String>) -> Self {
        Self::PathExtraction {
            fragment: fragment.into(),
            placeholder: true,
        }
    }

    /// Create segment count error
    #[inline]
    pub fn segment_count(path: impl Into<String>, found: usize) -> Self {
        Self::SegmentCount {
            path: path.into(),
            found,
        }
    }

    /// Text of the inline notice shown in place of the viewer
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::Parse { marker } => format!("Invalid embed format: {marker}"),
            Self::PathExtraction {
                placeholder: false, ..
            } => "Could not determine scene path from current location".to_string(),
            Self::PathExtraction {
                placeholder: true, ..
            } => "Could not determine current path for {$PATH} expansion".to_string(),
            Self::SegmentCount { path, .. } => format!("Invalid embed path format: {path}"),
        }
    }

    /// Check if the error came from the navigation fragment rather than the marker itself
    #[inline]
    #[must_use]
    pub fn depends_on_location(&self) -> bool {
        matches!(self, Self::PathExtraction { .. })
    }
}

/// Result type alias for resolution
pub type ResolveResult<T> = Result<T, ResolveError>;
