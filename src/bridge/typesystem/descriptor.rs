use std::{fmt, sync::Arc};

use crate::bridge::token::{Token, TypeOrigin};

/// Reference to a `TypeDescriptor`
pub type TypeDescriptorRc = Arc<TypeDescriptor>;

/// One node of a type ancestry graph.
///
/// Parents are held as identities only and are dereferenced through a
/// [`crate::bridge::typesystem::TypeProvider`], so a descriptor never owns its ancestors
/// and a cyclic graph leaks nothing.
pub struct TypeDescriptor {
    /// Identity, unique per underlying class
    pub token: Token,
    /// Display name
    pub name: String,
    /// Declared parents (base class first, then interfaces), in declaration order
    parents: boxcar::Vec<Token>,
}

impl TypeDescriptor {
    /// Create a new descriptor without parents
    pub fn new(token: Token, name: impl Into<String>) -> Self {
        TypeDescriptor {
            token,
            name: name.into(),
            parents: boxcar::Vec::new(),
        }
    }

    /// Create a new descriptor with `parents` in declaration order
    pub fn with_parents(
        token: Token,
        name: impl Into<String>,
        parents: impl IntoIterator<Item = Token>,
    ) -> Self {
        let descriptor = Self::new(token, name);
        for parent in parents {
            descriptor.add_parent(parent);
        }
        descriptor
    }

    /// Appends a parent after the already declared ones, returning its position.
    ///
    /// Discovery may publish a node before all of its parents are known; appending is
    /// allowed concurrently with readers.
    pub fn add_parent(&self, parent: Token) -> usize {
        self.parents.push(parent)
    }

    /// Declared parents in declaration order
    pub fn parents(&self) -> impl Iterator<Item = Token> + '_ {
        self.parents.iter().map(|(_, parent)| *parent)
    }

    /// Number of declared parents
    #[must_use]
    pub fn parent_count(&self) -> usize {
        self.parents.count()
    }

    /// Runtime this type belongs to
    #[must_use]
    pub fn origin(&self) -> Option<TypeOrigin> {
        self.token.origin()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("token", &self.token)
            .field("name", &self.name)
            .field("parents", &self.parents().collect::<Vec<_>>())
            .finish()
    }
}
