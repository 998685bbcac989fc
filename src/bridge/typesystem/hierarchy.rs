use crate::bridge::{
    token::Token,
    typesystem::{TypeDescriptor, TypeDescriptorRc},
};

/// Deduplicated ancestor sequence computed for one root type.
///
/// Ancestors come before the types that declare them; the root is last. Every identity
/// appears exactly once, at the position where the depth-first walk first completed it.
#[derive(Debug, Clone)]
pub struct ResolvedHierarchy {
    types: Vec<TypeDescriptorRc>,
}

impl ResolvedHierarchy {
    pub(crate) fn new(types: Vec<TypeDescriptorRc>) -> Self {
        ResolvedHierarchy { types }
    }

    /// The type resolution started from
    #[must_use]
    pub fn root(&self) -> Option<&TypeDescriptorRc> {
        self.types.last()
    }

    /// Number of types, including the root
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the hierarchy holds no types
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Types in resolution order
    pub fn iter(&self) -> std::slice::Iter<'_, TypeDescriptorRc> {
        self.types.iter()
    }

    /// Tokens in resolution order
    #[must_use]
    pub fn tokens(&self) -> Vec<Token> {
        self.types.iter().map(|descriptor| descriptor.token).collect()
    }

    /// Display names in resolution order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.types
            .iter()
            .map(|descriptor| descriptor.name.as_str())
            .collect()
    }

    /// Check if `token` is part of the hierarchy
    #[must_use]
    pub fn contains(&self, token: &Token) -> bool {
        self.position(token).is_some()
    }

    /// Position of `token` in resolution order
    #[must_use]
    pub fn position(&self, token: &Token) -> Option<usize> {
        self.types
            .iter()
            .position(|descriptor| descriptor.token == *token)
    }

    /// Get a type by its position in resolution order
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TypeDescriptor> {
        self.types.get(index).map(AsRef::as_ref)
    }
}

impl IntoIterator for ResolvedHierarchy {
    type Item = TypeDescriptorRc;
    type IntoIter = std::vec::IntoIter<TypeDescriptorRc>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResolvedHierarchy {
    type Item = &'a TypeDescriptorRc;
    type IntoIter = std::slice::Iter<'a, TypeDescriptorRc>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}
