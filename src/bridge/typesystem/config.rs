//! Hierarchy resolution configuration
//!
//! How deep real ancestry graphs get is a property of the bridged runtimes, not of the
//! resolver, so the bound is supplied by the surrounding bridge.

/// Configuration for [`crate::bridge::typesystem::HierarchyResolver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Maximum depth of the depth-first walk, counted in parent edges from the root.
    /// Exceeding it fails with [`crate::Error::RecursionLimit`].
    pub max_depth: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl ResolverConfig {
    /// Creates a configuration without a practical depth bound
    ///
    /// **Warning**: the walk is recursive; a pathological acyclic chain can exhaust the stack.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }

    /// Creates a configuration with a tight depth bound, for graphs from untrusted discovery
    #[must_use]
    pub fn strict() -> Self {
        Self { max_depth: 64 }
    }

    /// Returns a copy with `max_depth` replaced
    #[must_use]
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth }
    }
}
