//! Demo Embed Resolver
//!
//! Maps embed markers found in rendered documentation to the export URL of a
//! packaged interactive demo.
//!
//! # Core Operations
//!
//! - **Parse**: marker text → [`MarkerSpec`] via an ordered [`MarkerGrammar`]
//! - **Extract**: [`NavigationFragment`] → [`ScenePath`] (structured, general, fallback)
//! - **Resolve**: marker + fragment + [`ResolverConfig`] → [`ResolvedDemo`]
//!
//! # Supported markers
//!
//! ```text
//! embed-{$PATH}
//! embed-{<project/path>}
//! embed-<name>
//! embed-<name>: {$PATH}/<sceneName>
//! embed-<name>: <ignored>/<category>/<sceneFolder>/<sceneName>
//! ```
//!
//! # Example
//!
//! ```rust
//! use embed_resolver::{resolve, ResolverConfig, SiteRoot};
//!
//! let demo = resolve("embed-proj: scenes/2d/platformer/level1", "", &ResolverConfig::default())?;
//! assert_eq!(demo.url, "proj/exports/web/?scene=2d%2Fplatformer");
//!
//! let root = SiteRoot::from_href("https://docs.example/index.html#/2d");
//! assert_eq!(
//!     demo.absolute_url(&root),
//!     "https://docs.example/proj/exports/web/?scene=2d%2Fplatformer"
//! );
//! # Ok::<(), embed_resolver::ResolveError>(())
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod encoding;
pub mod error;
pub mod fragment;
pub mod marker;
pub mod normalize;
pub mod resolve;
pub mod site;

// Re-exports for convenience
pub use config::ResolverConfig;
pub use error::{ResolveError, ResolveResult};
pub use fragment::{ExtractionStrategy, NavigationFragment, ScenePath};
pub use marker::{MarkerGrammar, MarkerRule, MarkerSpec};
pub use normalize::normalize_path;
pub use resolve::{resolve, resolve_spec, ResolvedDemo, Resolver};
pub use site::SiteRoot;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for resolving markers
    pub use crate::{
        resolve, MarkerSpec, NavigationFragment, ResolveError, ResolvedDemo, Resolver,
        ResolverConfig, SiteRoot,
    };
}
