//! Type ancestry graphs for bridged classes.
//!
//! Both runtimes describe their classes to the bridge as [`TypeDescriptor`] nodes: an
//! identity, a display name and the identities of the declared parents. This module
//! stores those nodes, resolves the full ancestry of a root type without tripping over
//! cycles, and turns the result into proxy type descriptors.
//!
//! # Key Components
//!
//! - [`TypeDescriptor`]: one node, parents held by identity only
//! - [`TypeProvider`]: how resolution dereferences identities
//! - [`TypeRegistry`]: concurrent in-memory [`TypeProvider`]
//! - [`HierarchyResolver`]: depth-first, cycle-tolerant ancestry walk
//! - [`ResolvedHierarchy`]: the deduplicated walk result
//! - [`ProxyType`] / [`ProxyCache`]: proxy descriptors built from resolved hierarchies
//!
//! # Examples
//!
//! ```rust
//! use bridgescope::bridge::{
//!     token::TypeOrigin,
//!     typesystem::{HierarchyResolver, ProxyCache, TypeRegistry},
//! };
//!
//! let registry = TypeRegistry::new();
//! let object = registry.create(TypeOrigin::Guest, "object")?;
//! let mapping = registry.create(TypeOrigin::Guest, "Mapping")?;
//! let dict = registry.create(TypeOrigin::Guest, "dict")?;
//! mapping.add_parent(object.token);
//! dict.add_parent(mapping.token);
//! dict.add_parent(object.token);
//!
//! let proxies = ProxyCache::new();
//! let proxy = proxies.get_or_build(&registry, &HierarchyResolver::default(), dict.token)?;
//! assert_eq!(proxy.ancestors, vec![object.token, mapping.token]);
//! # Ok::<(), bridgescope::Error>(())
//! ```

mod config;
mod descriptor;
mod hierarchy;
mod proxy;
mod registry;
mod resolver;

pub use config::ResolverConfig;
pub use descriptor::{TypeDescriptor, TypeDescriptorRc};
pub use hierarchy::ResolvedHierarchy;
pub use proxy::{ProxyCache, ProxyType, ProxyTypeRc};
pub use registry::{TypeProvider, TypeRegistry};
pub use resolver::HierarchyResolver;
