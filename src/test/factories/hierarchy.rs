//! Factory methods for hierarchy resolution testing.
//!
//! The cyclic reference fixture mirrors the classic test-only class family where a parent
//! and two children are made to reference each other through reflection, giving an
//! ancestry graph no ordinary compiler would accept.

use crate::bridge::{
    token::{Token, TypeOrigin},
    typesystem::{TypeDescriptorRc, TypeRegistry},
};

/// Creates a descriptor in a registry that is known to have free rows
fn create(registry: &TypeRegistry, origin: TypeOrigin, name: impl Into<String>) -> TypeDescriptorRc {
    registry
        .create(origin, name)
        .expect("fixture registries never run out of rows")
}

/// `Parent`, `Child1 : Parent`, `Child2 : Parent`, optionally with `Parent : Child2`
pub struct CyclicReferenceFixture {
    pub registry: TypeRegistry,
    pub parent: TypeDescriptorRc,
    pub child1: TypeDescriptorRc,
    pub child2: TypeDescriptorRc,
}

/// Creates the cyclic reference family.
///
/// With `cyclic` set, `Parent` additionally declares `Child2` as its parent, closing the
/// cycle `Child2 -> Parent -> Child2`.
pub fn create_cyclic_reference_fixture(cyclic: bool) -> CyclicReferenceFixture {
    let registry = TypeRegistry::new();
    let parent = create(&registry, TypeOrigin::Host, "Parent");
    let child1 = create(&registry, TypeOrigin::Host, "Child1");
    let child2 = create(&registry, TypeOrigin::Host, "Child2");

    child1.add_parent(parent.token);
    child2.add_parent(parent.token);
    if cyclic {
        parent.add_parent(child2.token);
    }

    CyclicReferenceFixture {
        registry,
        parent,
        child1,
        child2,
    }
}

/// `ArrayList : Collection, Sized`; `Collection : Iterable`; `Iterable : Object`;
/// `Sized : Object`
pub struct DiamondFixture {
    pub registry: TypeRegistry,
    pub object: Token,
    pub iterable: Token,
    pub collection: Token,
    pub sized: Token,
    pub leaf: Token,
}

/// Creates a diamond where `Object` is reachable through two paths
pub fn create_diamond_fixture() -> DiamondFixture {
    let registry = TypeRegistry::new();
    let object = create(&registry, TypeOrigin::Host, "Object");
    let iterable = create(&registry, TypeOrigin::Host, "Iterable");
    let collection = create(&registry, TypeOrigin::Host, "Collection");
    let sized = create(&registry, TypeOrigin::Guest, "Sized");
    let leaf = create(&registry, TypeOrigin::Host, "ArrayList");

    iterable.add_parent(object.token);
    collection.add_parent(iterable.token);
    sized.add_parent(object.token);
    leaf.add_parent(collection.token);
    leaf.add_parent(sized.token);

    DiamondFixture {
        object: object.token,
        iterable: iterable.token,
        collection: collection.token,
        sized: sized.token,
        leaf: leaf.token,
        registry,
    }
}

/// Creates a linear chain of `length` guest types `T0 <- T1 <- ... <- T{length-1}` in
/// `registry` and returns the most-derived one.
///
/// # Panics
/// Panics if `length` is zero.
pub fn create_chain(registry: &TypeRegistry, length: usize) -> Token {
    assert!(length > 0, "a chain needs at least one type");

    let mut previous: Option<Token> = None;
    for index in 0..length {
        let descriptor = create(registry, TypeOrigin::Guest, format!("T{index}"));
        if let Some(parent) = previous {
            descriptor.add_parent(parent);
        }
        previous = Some(descriptor.token);
    }

    previous.expect("length is non-zero")
}
