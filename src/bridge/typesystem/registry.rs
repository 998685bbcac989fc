//! In-memory type registry for bridged types.
//!
//! [`TypeRegistry`] stores every [`TypeDescriptor`] the discovery side has produced, keyed
//! by [`Token`], and is the stock [`TypeProvider`] handed to hierarchy resolution.
//!
//! # Thread Safety
//!
//! - Lock-free primary storage (`SkipMap`)
//! - Concurrent name index (`DashMap`)
//! - Atomic row allocation per origin
//! - Registration is a single `get_or_insert` on the primary storage, so an identity is
//!   owned by exactly one descriptor even under concurrent `create`/`insert`
//!
//! # Examples
//!
//! ```rust
//! use bridgescope::bridge::{token::TypeOrigin, typesystem::TypeRegistry};
//!
//! let registry = TypeRegistry::new();
//! let object = registry.create(TypeOrigin::Host, "java.lang.Object")?;
//! let string = registry.create(TypeOrigin::Host, "java.lang.String")?;
//! string.add_parent(object.token);
//!
//! assert_eq!(registry.len(), 2);
//! assert_eq!(registry.get_by_name("java.lang.String")[0].token, string.token);
//! # Ok::<(), bridgescope::Error>(())
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::{
    bridge::{
        diagnostics::DiagFlags,
        token::{Token, TypeOrigin},
        typesystem::{TypeDescriptor, TypeDescriptorRc},
    },
    Error::{TokenExhausted, TypeInsert},
    Result,
};

/// Source of [`TypeDescriptor`] nodes for hierarchy resolution.
///
/// Implemented by whatever performs reflection/discovery on either runtime. Resolution
/// only dereferences identities through this trait; it never discovers types itself.
pub trait TypeProvider: Sync {
    /// Returns the descriptor behind `token`, or `None` if the identity is dangling
    fn lookup(&self, token: Token) -> Option<TypeDescriptorRc>;
}

/// Highest row a [`Token`] can carry
const MAX_ROW: u32 = 0x00FF_FFFF;

/// Central registry of bridged type descriptors
pub struct TypeRegistry {
    /// Primary storage, in token order
    types: SkipMap<Token, TypeDescriptorRc>,
    /// Display name to tokens
    types_by_name: DashMap<String, Vec<Token>>,
    /// Next free host row
    next_host_row: AtomicU32,
    /// Next free guest row
    next_guest_row: AtomicU32,
}

impl TypeRegistry {
    /// Create a new, empty registry
    #[must_use]
    pub fn new() -> Self {
        TypeRegistry {
            types: SkipMap::new(),
            types_by_name: DashMap::new(),
            next_host_row: AtomicU32::new(1),
            next_guest_row: AtomicU32::new(1),
        }
    }

    fn row_counter(&self, origin: TypeOrigin) -> &AtomicU32 {
        match origin {
            TypeOrigin::Host => &self.next_host_row,
            TypeOrigin::Guest => &self.next_guest_row,
        }
    }

    /// Get the next available token for `origin` and increment the counter.
    ///
    /// The counter saturates one past [`MAX_ROW`], so an exhausted origin stays exhausted.
    fn next_token(&self, origin: TypeOrigin) -> Result<Token> {
        let row = self
            .row_counter(origin)
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |row| {
                (row <= MAX_ROW).then_some(row + 1)
            })
            .map_err(|_| TokenExhausted(origin))?;

        Ok(Token::with_origin(origin, row))
    }

    /// Register a descriptor in all lookup tables.
    ///
    /// Returns false, leaving every table untouched, if the token is already owned by
    /// another descriptor.
    fn register_internal(&self, descriptor: &TypeDescriptorRc) -> bool {
        let entry = self.types.get_or_insert(descriptor.token, descriptor.clone());
        if !Arc::ptr_eq(entry.value(), descriptor) {
            return false;
        }

        self.types_by_name
            .entry(descriptor.name.clone())
            .or_default()
            .push(descriptor.token);

        diag!(
            DiagFlags::TYPE,
            "TypeRegistry::register: token={}, name='{}'",
            descriptor.token,
            descriptor.name
        );
        true
    }

    /// Create a new descriptor with the next available token for `origin`.
    ///
    /// Rows already taken through [`TypeRegistry::insert`] are skipped.
    ///
    /// # Errors
    /// Returns [`crate::Error::TokenExhausted`] if every row of `origin` is in use.
    pub fn create(&self, origin: TypeOrigin, name: impl Into<String>) -> Result<TypeDescriptorRc> {
        let name = name.into();
        loop {
            let descriptor = Arc::new(TypeDescriptor::new(self.next_token(origin)?, name.clone()));
            if self.register_internal(&descriptor) {
                return Ok(descriptor);
            }

            diag!(
                DiagFlags::TYPE,
                "TypeRegistry::create: {} already taken, skipping",
                descriptor.token
            );
        }
    }

    /// Insert a descriptor produced elsewhere.
    ///
    /// Later [`TypeRegistry::create`] calls allocate rows past the inserted one.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeInsert`] if the token is already registered.
    pub fn insert(&self, descriptor: TypeDescriptorRc) -> Result<()> {
        if !self.register_internal(&descriptor) {
            return Err(TypeInsert(descriptor.token));
        }

        if let Some(origin) = descriptor.token.origin() {
            self.row_counter(origin)
                .fetch_max(descriptor.token.row() + 1, Ordering::Relaxed);
        }
        Ok(())
    }

    /// Removes a descriptor, returning it. References to it from other descriptors'
    /// parent lists become dangling.
    pub fn remove(&self, token: &Token) -> Option<TypeDescriptorRc> {
        let removed = self.types.remove(token).map(|entry| entry.value().clone())?;
        if let Some(mut tokens) = self.types_by_name.get_mut(&removed.name) {
            tokens.retain(|candidate| candidate != token);
        }
        Some(removed)
    }

    /// Get a descriptor by token
    pub fn get(&self, token: &Token) -> Option<TypeDescriptorRc> {
        self.types.get(token).map(|entry| entry.value().clone())
    }

    /// Get all descriptors with display name `name`
    pub fn get_by_name(&self, name: &str) -> Vec<TypeDescriptorRc> {
        if let Some(tokens) = self.types_by_name.get(name) {
            tokens
                .iter()
                .filter_map(|token| self.types.get(token).map(|entry| entry.value().clone()))
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Count of descriptors in the registry
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns an iterator over all descriptors in token order
    pub fn iter(&self) -> crossbeam_skiplist::map::Iter<'_, Token, TypeDescriptorRc> {
        self.types.iter()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeProvider for TypeRegistry {
    fn lookup(&self, token: Token) -> Option<TypeDescriptorRc> {
        self.get(&token)
    }
}
