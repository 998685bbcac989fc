//! Proxy type descriptors built from resolved hierarchies.
//!
//! A proxy type is what the bridge presents on one side for a class living on the other.
//! It records the resolved ancestry so that assignability checks and member table
//! construction never have to walk the (possibly cyclic) graph again.
//!
//! [`ProxyCache`] memoizes proxies per root identity. Concurrent requests for the same
//! root may both resolve, but only one proxy instance is ever published.

use std::sync::Arc;

use dashmap::DashMap;

use crate::{
    bridge::{
        diagnostics::DiagFlags,
        token::Token,
        typesystem::{HierarchyResolver, ResolvedHierarchy, TypeProvider},
    },
    Error, Result,
};

/// Reference to a `ProxyType`
pub type ProxyTypeRc = Arc<ProxyType>;

/// Descriptor of a proxy/wrapper type for one bridged class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyType {
    /// Identity of the proxied class
    pub token: Token,
    /// Display name of the proxied class
    pub name: String,
    /// Declared parents of the proxied class, in declaration order
    pub bases: Vec<Token>,
    /// All ancestors in resolution order (base-most first), excluding the class itself.
    /// Building member tables in this order lets derived members override inherited ones.
    pub ancestors: Vec<Token>,
}

impl ProxyType {
    /// Builds a proxy from a resolved hierarchy
    ///
    /// # Errors
    /// Returns [`crate::Error::Error`] if `hierarchy` is empty.
    pub fn build(hierarchy: &ResolvedHierarchy) -> Result<Self> {
        let root = hierarchy
            .root()
            .ok_or_else(|| Error::Error("Cannot build a proxy from an empty hierarchy".to_string()))?;

        let bases = root
            .parents()
            .filter(|parent| hierarchy.contains(parent))
            .fold(Vec::new(), |mut bases, parent| {
                if !bases.contains(&parent) {
                    bases.push(parent);
                }
                bases
            });

        let ancestors = hierarchy
            .iter()
            .filter(|descriptor| descriptor.token != root.token)
            .map(|descriptor| descriptor.token)
            .collect();

        Ok(ProxyType {
            token: root.token,
            name: root.name.clone(),
            bases,
            ancestors,
        })
    }

    /// Member lookup order: the class itself, then its ancestors from most to least derived
    #[must_use]
    pub fn mro(&self) -> Vec<Token> {
        std::iter::once(self.token)
            .chain(self.ancestors.iter().rev().copied())
            .collect()
    }

    /// Check if values of this proxy can stand in for `token`
    #[must_use]
    pub fn is_assignable_to(&self, token: &Token) -> bool {
        self.token == *token || self.ancestors.contains(token)
    }
}

/// Concurrent memo of proxy types keyed by root identity
#[derive(Default)]
pub struct ProxyCache {
    proxies: DashMap<Token, ProxyTypeRc>,
}

impl ProxyCache {
    /// Create a new, empty cache
    #[must_use]
    pub fn new() -> Self {
        ProxyCache {
            proxies: DashMap::new(),
        }
    }

    /// Get a cached proxy
    pub fn get(&self, token: &Token) -> Option<ProxyTypeRc> {
        self.proxies.get(token).map(|entry| entry.value().clone())
    }

    /// Returns the proxy for `token`, resolving and building it on first use.
    ///
    /// Failures are returned to the caller and not cached.
    ///
    /// # Errors
    /// Any error of [`HierarchyResolver::resolve`].
    pub fn get_or_build<P: TypeProvider + ?Sized>(
        &self,
        provider: &P,
        resolver: &HierarchyResolver,
        token: Token,
    ) -> Result<ProxyTypeRc> {
        if let Some(proxy) = self.get(&token) {
            return Ok(proxy);
        }

        let hierarchy = resolver.resolve(provider, token)?;
        let proxy = Arc::new(ProxyType::build(&hierarchy)?);

        diag!(
            DiagFlags::TYPE,
            "ProxyCache: built '{}' ({}) with {} ancestor(s)",
            proxy.name,
            proxy.token,
            proxy.ancestors.len()
        );

        Ok(self.proxies.entry(token).or_insert(proxy).value().clone())
    }

    /// Drops the cached proxy for `token`, returning it
    pub fn invalidate(&self, token: &Token) -> Option<ProxyTypeRc> {
        self.proxies.remove(token).map(|(_, proxy)| proxy)
    }

    /// Drops every cached proxy
    pub fn clear(&self) {
        self.proxies.clear();
    }

    /// Count of cached proxies
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }
}
