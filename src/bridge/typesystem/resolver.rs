//! Cycle-safe resolution of type ancestry graphs.
//!
//! Building a proxy type for a bridged class needs every ancestor and interface reachable
//! from it. Graphs produced by reflection are not guaranteed to be acyclic: dynamic proxies
//! and test fixtures can declare a type as its own (indirect) ancestor. Such graphs are
//! legitimate input, so a cycle simply ends the branch that found it.
//!
//! # Algorithm
//!
//! Depth-first walk over declared parents, in declaration order, with a per-call visited
//! table keyed by identity:
//! - unvisited: mark in-progress, walk the parents, mark done, append to the output
//! - in-progress: a cycle; the earlier visit will complete the node, return
//! - done: already in the output, return
//!
//! For an acyclic graph the output is a topological order (ancestors first). With cycles,
//! every node still appears exactly once, in first-completion order, which is reproducible
//! for identical declaration order.
//!
//! # Thread Safety
//!
//! The visited table lives on the stack of one [`HierarchyResolver::resolve`] call. The
//! resolver itself holds only its configuration and can be shared freely; see
//! [`HierarchyResolver::resolve_many`].
//!
//! # Examples
//!
//! ```rust
//! use bridgescope::bridge::{
//!     token::TypeOrigin,
//!     typesystem::{HierarchyResolver, TypeRegistry},
//! };
//!
//! let registry = TypeRegistry::new();
//! let parent = registry.create(TypeOrigin::Host, "Parent")?;
//! let child = registry.create(TypeOrigin::Host, "Child2")?;
//! child.add_parent(parent.token);
//! // Artificial cycle: Parent now also declares Child2.
//! parent.add_parent(child.token);
//!
//! let hierarchy = HierarchyResolver::default().resolve(&registry, child.token)?;
//! assert_eq!(hierarchy.names(), vec!["Parent", "Child2"]);
//! # Ok::<(), bridgescope::Error>(())
//! ```

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::{
    bridge::{
        diagnostics::DiagFlags,
        token::Token,
        typesystem::{ResolvedHierarchy, ResolverConfig, TypeDescriptorRc, TypeProvider},
    },
    Error, Result,
};

/// Resolution state of one identity within a single walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    InProgress,
    Done,
}

/// Per-call walk state
struct Walk<'p, P: ?Sized> {
    provider: &'p P,
    max_depth: usize,
    visited: FxHashMap<Token, VisitState>,
    output: Vec<TypeDescriptorRc>,
}

impl<P: TypeProvider + ?Sized> Walk<'_, P> {
    /// Walks an unvisited node
    fn visit(&mut self, node: &TypeDescriptorRc, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::RecursionLimit(self.max_depth));
        }

        self.visited.insert(node.token, VisitState::InProgress);

        for parent_token in node.parents() {
            match self.visited.get(&parent_token) {
                Some(VisitState::Done) => continue,
                Some(VisitState::InProgress) => {
                    diag!(
                        DiagFlags::TYPE,
                        "HierarchyResolver: cycle {} -> {}",
                        node.token,
                        parent_token
                    );
                    continue;
                }
                None => {}
            }

            let parent =
                self.provider
                    .lookup(parent_token)
                    .ok_or(Error::UnresolvableReference {
                        token: parent_token,
                        referenced_by: Some(node.token),
                    })?;
            self.visit(&parent, depth + 1)?;
        }

        self.visited.insert(node.token, VisitState::Done);
        debug_assert!(!self.output.iter().any(|done| done.token == node.token));
        self.output.push(node.clone());

        Ok(())
    }
}

/// Computes [`ResolvedHierarchy`] values for root types
#[derive(Debug, Clone, Copy, Default)]
pub struct HierarchyResolver {
    config: ResolverConfig,
}

impl HierarchyResolver {
    /// Creates a resolver with `config`
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        HierarchyResolver { config }
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves the hierarchy of the type behind `root`.
    ///
    /// # Errors
    /// - [`Error::UnresolvableReference`] if `root` or any reachable parent identity has
    ///   no descriptor in `provider`
    /// - [`Error::RecursionLimit`] if the walk goes deeper than the configured bound
    ///
    /// Cycles are not an error.
    pub fn resolve<P: TypeProvider + ?Sized>(
        &self,
        provider: &P,
        root: Token,
    ) -> Result<ResolvedHierarchy> {
        let descriptor = provider
            .lookup(root)
            .ok_or(Error::UnresolvableReference {
                token: root,
                referenced_by: None,
            })?;

        self.resolve_descriptor(provider, &descriptor)
    }

    /// Resolves the hierarchy of `root`, dereferencing its ancestors through `provider`.
    ///
    /// # Errors
    /// See [`HierarchyResolver::resolve`].
    pub fn resolve_descriptor<P: TypeProvider + ?Sized>(
        &self,
        provider: &P,
        root: &TypeDescriptorRc,
    ) -> Result<ResolvedHierarchy> {
        let mut walk = Walk {
            provider,
            max_depth: self.config.max_depth,
            visited: FxHashMap::default(),
            output: Vec::new(),
        };

        if let Err(error) = walk.visit(root, 0) {
            diag!(
                DiagFlags::ERR,
                "HierarchyResolver: resolving '{}' ({}) failed: {}",
                root.name,
                root.token,
                error
            );
            return Err(error);
        }

        diag!(
            DiagFlags::TYPE,
            "HierarchyResolver: '{}' ({}) resolved to {} type(s)",
            root.name,
            root.token,
            walk.output.len()
        );

        Ok(ResolvedHierarchy::new(walk.output))
    }

    /// Resolves several roots in parallel, each with its own visited table.
    ///
    /// Results are returned in the order of `roots`; a failing root does not affect the
    /// others.
    pub fn resolve_many<P: TypeProvider + ?Sized>(
        &self,
        provider: &P,
        roots: &[Token],
    ) -> Vec<Result<ResolvedHierarchy>> {
        roots
            .par_iter()
            .map(|root| self.resolve(provider, *root))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bridge::{token::TypeOrigin, typesystem::TypeRegistry},
        test::factories::hierarchy::{create_chain, create_cyclic_reference_fixture, create_diamond_fixture},
    };

    /// Checks that every declared parent present in the hierarchy precedes its child.
    fn assert_topological(hierarchy: &ResolvedHierarchy) {
        for (index, descriptor) in hierarchy.iter().enumerate() {
            for parent in descriptor.parents() {
                let parent_index = hierarchy
                    .position(&parent)
                    .expect("every parent is part of the hierarchy");
                assert!(
                    parent_index < index,
                    "{} must precede {}",
                    parent,
                    descriptor.name
                );
            }
        }
    }

    #[test]
    fn test_single_parent() -> Result<()> {
        let fixture = create_cyclic_reference_fixture(false);
        let hierarchy = HierarchyResolver::default().resolve(&fixture.registry, fixture.child2.token)?;

        assert_eq!(hierarchy.names(), vec!["Parent", "Child2"]);
        assert_eq!(hierarchy.root().map(|root| root.token), Some(fixture.child2.token));
        Ok(())
    }

    #[test]
    fn test_artificial_cycle_terminates() -> Result<()> {
        let fixture = create_cyclic_reference_fixture(true);
        let resolver = HierarchyResolver::default();

        let hierarchy = resolver.resolve(&fixture.registry, fixture.child2.token)?;
        assert_eq!(hierarchy.len(), 2);
        assert_eq!(hierarchy.names(), vec!["Parent", "Child2"]);

        // Starting on the other side of the cycle yields the mirror image.
        let hierarchy = resolver.resolve(&fixture.registry, fixture.parent.token)?;
        assert_eq!(hierarchy.names(), vec!["Child2", "Parent"]);
        Ok(())
    }

    #[test]
    fn test_sibling_pulls_in_whole_cycle() -> Result<()> {
        let fixture = create_cyclic_reference_fixture(true);
        let hierarchy =
            HierarchyResolver::default().resolve(&fixture.registry, fixture.child1.token)?;

        assert_eq!(hierarchy.names(), vec!["Child2", "Parent", "Child1"]);
        Ok(())
    }

    #[test]
    fn test_self_parent() -> Result<()> {
        let registry = TypeRegistry::new();
        let ouroboros = registry.create(TypeOrigin::Guest, "Ouroboros")?;
        ouroboros.add_parent(ouroboros.token);

        let hierarchy = HierarchyResolver::default().resolve(&registry, ouroboros.token)?;
        assert_eq!(hierarchy.tokens(), vec![ouroboros.token]);
        Ok(())
    }

    #[test]
    fn test_diamond_deduplicated_and_topological() -> Result<()> {
        let fixture = create_diamond_fixture();
        let hierarchy = HierarchyResolver::default().resolve(&fixture.registry, fixture.leaf)?;

        assert_eq!(
            hierarchy.names(),
            vec!["Object", "Iterable", "Collection", "Sized", "ArrayList"]
        );
        assert_topological(&hierarchy);
        Ok(())
    }

    #[test]
    fn test_resolution_is_reproducible() -> Result<()> {
        let fixture = create_diamond_fixture();
        let resolver = HierarchyResolver::default();

        let first = resolver.resolve(&fixture.registry, fixture.leaf)?;
        let second = resolver.resolve(&fixture.registry, fixture.leaf)?;
        assert_eq!(first.tokens(), second.tokens());
        Ok(())
    }

    #[test]
    fn test_dangling_parent_is_unresolvable() {
        let fixture = create_cyclic_reference_fixture(false);
        fixture.registry.remove(&fixture.parent.token);

        let result = HierarchyResolver::default().resolve(&fixture.registry, fixture.child2.token);
        match result {
            Err(Error::UnresolvableReference {
                token,
                referenced_by,
            }) => {
                assert_eq!(token, fixture.parent.token);
                assert_eq!(referenced_by, Some(fixture.child2.token));
            }
            other => panic!("expected UnresolvableReference, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_root_is_unresolvable() {
        let registry = TypeRegistry::new();
        let result = HierarchyResolver::default().resolve(&registry, Token::host(404));
        assert!(matches!(
            result,
            Err(Error::UnresolvableReference { referenced_by: None, .. })
        ));
    }

    #[test]
    fn test_dangling_reference_behind_cycle_still_reported() {
        let fixture = create_cyclic_reference_fixture(true);
        fixture.parent.add_parent(Token::guest(0xDEAD));

        let result = HierarchyResolver::default().resolve(&fixture.registry, fixture.child2.token);
        assert!(matches!(
            result,
            Err(Error::UnresolvableReference { token, .. }) if token == Token::guest(0xDEAD)
        ));
    }

    #[test]
    fn test_recursion_limit() -> Result<()> {
        let registry = TypeRegistry::new();
        let leaf = create_chain(&registry, 10);

        let tight = HierarchyResolver::new(ResolverConfig::default().with_max_depth(5));
        assert!(matches!(
            tight.resolve(&registry, leaf),
            Err(Error::RecursionLimit(5))
        ));

        let exact = HierarchyResolver::new(ResolverConfig::default().with_max_depth(9));
        assert_eq!(exact.resolve(&registry, leaf)?.len(), 10);
        Ok(())
    }

    #[test]
    fn test_resolve_many_isolated() {
        let fixture = create_cyclic_reference_fixture(true);
        let roots = [
            fixture.child1.token,
            Token::host(0xBAD),
            fixture.child2.token,
            fixture.parent.token,
        ];

        let results = HierarchyResolver::default().resolve_many(&fixture.registry, &roots);
        assert_eq!(results.len(), 4);
        assert_eq!(
            results[0].as_ref().map(ResolvedHierarchy::len).ok(),
            Some(3)
        );
        assert!(results[1].is_err());
        assert_eq!(
            results[2].as_ref().map(ResolvedHierarchy::names).ok(),
            Some(vec!["Parent", "Child2"])
        );
        assert_eq!(
            results[3].as_ref().map(ResolvedHierarchy::names).ok(),
            Some(vec!["Child2", "Parent"])
        );
    }
}
