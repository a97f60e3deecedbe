//! Demo Embed Scanner
//!
//! Finds embed markers in rendered pages, resolves each one once per route,
//! and plans the viewer (or inline notice) to inject after it.
//!
//! # Example
//!
//! ```rust
//! use embed_resolver::{NavigationFragment, SiteRoot};
//! use embed_scanner::{Page, Scanner};
//!
//! let mut scanner = Scanner::default();
//! let root = SiteRoot::from_href("https://docs.example/index.html");
//! let fragment = NavigationFragment::from_hash("#/demo-projects/2d/dodge_the_creeps/README");
//!
//! let found = scanner.scan(Page::html("<!-- embed-{$PATH} -->"), &fragment, &root);
//! let plan = found[0].outcome.plan().expect("marker resolves");
//! assert_eq!(
//!     plan.src,
//!     "https://docs.example/demo-projects/2d/dodge_the_creeps/exports/web/?scene=2d%2Fdodge_the_creeps"
//! );
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod dedupe;
pub mod locator;
pub mod scanner;

// Re-exports for convenience
pub use dedupe::ProcessedMarkers;
pub use locator::{MarkerLocator, MarkerSite, Page, PageFormat};
pub use scanner::{EmbedOutcome, EmbedPlan, ScannedMarker, Scanner, ScannerConfig};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
