//! # bridgescope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the bridgescope library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all bridgescope operations
pub use crate::Error;

/// The result type used throughout bridgescope
pub use crate::Result;

/// Type identities and the runtime they belong to
pub use crate::bridge::token::{Token, TypeOrigin};

// ================================================================================================
// Signal Classification
// ================================================================================================

/// Captured guest errors and their handles
pub use crate::bridge::signal::{ErrorScope, ErrorTable, GuestError, GuestErrorHandle, GuestTypeId};

/// Signal registry and classification
pub use crate::bridge::signal::{BridgedSignal, SignalClassifier, SignalKind, SignalRegistry};

// ================================================================================================
// Type System
// ================================================================================================

/// Descriptors, storage and resolution
pub use crate::bridge::typesystem::{
    HierarchyResolver, ProxyCache, ProxyType, ProxyTypeRc, ResolvedHierarchy, ResolverConfig,
    TypeDescriptor, TypeDescriptorRc, TypeProvider, TypeRegistry,
};

// ================================================================================================
// Diagnostics
// ================================================================================================

/// Diagnostic categories
pub use crate::bridge::diagnostics::DiagFlags;
