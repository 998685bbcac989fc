//! Process-wide table of guest types that represent protocol signals.
//!
//! The surrounding bridge decides which guest types count as signals and installs the
//! table exactly once, before the first bridged call. After installation the table is
//! never mutated, so lookups need no synchronization.
//!
//! # Examples
//!
//! ```rust
//! use bridgescope::bridge::signal::{SignalKind, SignalRegistry};
//!
//! let registry = SignalRegistry::builder()
//!     .register("StopIteration", SignalKind::IterationExhausted)
//!     .build();
//!
//! assert_eq!(
//!     registry.kind_of(&"StopIteration".into()),
//!     Some(SignalKind::IterationExhausted)
//! );
//! assert!(!registry.contains(&"ValueError".into()));
//! ```

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use strum::{Display, EnumIter, IntoStaticStr};

use crate::{
    bridge::{diagnostics::DiagFlags, signal::GuestTypeId},
    Error, Result,
};

/// The closed set of guest protocol signals the bridge re-raises host-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum SignalKind {
    /// A sequence has no further elements
    IterationExhausted,
    /// An asynchronous sequence has no further elements
    AsyncIterationExhausted,
}

static GLOBAL_REGISTRY: OnceLock<SignalRegistry> = OnceLock::new();

/// Read-only mapping from guest type identity to [`SignalKind`].
#[derive(Debug, Clone, Default)]
pub struct SignalRegistry {
    kinds: FxHashMap<GuestTypeId, SignalKind>,
}

impl SignalRegistry {
    /// Starts building a registry
    #[must_use]
    pub fn builder() -> SignalRegistryBuilder {
        SignalRegistryBuilder::default()
    }

    /// Registry for a Python guest runtime (`StopIteration`, `StopAsyncIteration`)
    #[must_use]
    pub fn python() -> Self {
        Self::builder()
            .register("StopIteration", SignalKind::IterationExhausted)
            .register("StopAsyncIteration", SignalKind::AsyncIterationExhausted)
            .build()
    }

    /// Installs `registry` as the process-wide instance.
    ///
    /// # Errors
    /// Returns [`Error::RegistryInitialized`] if a registry was already installed; the
    /// installed registry is left untouched.
    pub fn install(registry: SignalRegistry) -> Result<&'static SignalRegistry> {
        diag!(
            DiagFlags::EXEC,
            "SignalRegistry::install: {} signal type(s)",
            registry.len()
        );

        GLOBAL_REGISTRY
            .set(registry)
            .map_err(|_| Error::RegistryInitialized)?;
        GLOBAL_REGISTRY.get().ok_or(Error::RegistryUninitialized)
    }

    /// Returns the process-wide instance, if installed
    #[must_use]
    pub fn global() -> Option<&'static SignalRegistry> {
        GLOBAL_REGISTRY.get()
    }

    /// Returns the signal kind registered for `type_id`
    #[must_use]
    pub fn kind_of(&self, type_id: &GuestTypeId) -> Option<SignalKind> {
        self.kinds.get(type_id).copied()
    }

    /// Check if `type_id` is a registered signal type
    #[must_use]
    pub fn contains(&self, type_id: &GuestTypeId) -> bool {
        self.kinds.contains_key(type_id)
    }

    /// Count of registered signal types
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Iterates over all registered signal types
    pub fn iter(&self) -> impl Iterator<Item = (&GuestTypeId, SignalKind)> {
        self.kinds.iter().map(|(id, kind)| (id, *kind))
    }
}

/// Builder for [`SignalRegistry`]
#[derive(Debug, Default)]
pub struct SignalRegistryBuilder {
    kinds: FxHashMap<GuestTypeId, SignalKind>,
}

impl SignalRegistryBuilder {
    /// Registers `type_id` as raising `kind`; a later registration of the same id wins
    #[must_use]
    pub fn register(mut self, type_id: impl Into<GuestTypeId>, kind: SignalKind) -> Self {
        self.kinds.insert(type_id.into(), kind);
        self
    }

    /// Finishes the registry
    #[must_use]
    pub fn build(self) -> SignalRegistry {
        SignalRegistry { kinds: self.kinds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_python_preset() {
        let registry = SignalRegistry::python();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.kind_of(&"StopIteration".into()),
            Some(SignalKind::IterationExhausted)
        );
        assert_eq!(
            registry.kind_of(&"StopAsyncIteration".into()),
            Some(SignalKind::AsyncIterationExhausted)
        );
        assert_eq!(registry.kind_of(&"ValueError".into()), None);
    }

    #[test]
    fn test_every_kind_registered_by_python_preset() {
        let registry = SignalRegistry::python();
        for kind in SignalKind::iter() {
            assert!(registry.iter().any(|(_, registered)| registered == kind));
        }
    }

    #[test]
    fn test_builder_last_registration_wins() {
        let registry = SignalRegistry::builder()
            .register("Done", SignalKind::IterationExhausted)
            .register("Done", SignalKind::AsyncIterationExhausted)
            .build();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.kind_of(&"Done".into()),
            Some(SignalKind::AsyncIterationExhausted)
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = SignalRegistry::default();
        assert!(registry.is_empty());
        assert!(!registry.contains(&"StopIteration".into()));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SignalKind::IterationExhausted.to_string(), "IterationExhausted");
        let name: &'static str = SignalKind::AsyncIterationExhausted.into();
        assert_eq!(name, "AsyncIterationExhausted");
    }

    // The only unit test touching the process-wide instance.
    #[test]
    fn test_install_once() -> Result<()> {
        let installed = SignalRegistry::install(SignalRegistry::python())?;
        assert_eq!(installed.len(), 2);
        assert!(SignalRegistry::global().is_some());

        let second = SignalRegistry::install(SignalRegistry::default());
        assert!(matches!(second, Err(Error::RegistryInitialized)));
        assert_eq!(SignalRegistry::global().map(SignalRegistry::len), Some(2));
        Ok(())
    }
}
