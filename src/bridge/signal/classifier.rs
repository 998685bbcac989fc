//! Classification of captured guest errors into host-side signals.

use std::fmt;

use crate::{
    bridge::{
        diagnostics::DiagFlags,
        signal::{ErrorTable, GuestError, GuestErrorHandle, GuestTypeId, SignalKind, SignalRegistry},
    },
    Error, Result,
};

/// A guest protocol signal re-raised host-side.
///
/// Host code tells signals apart by [`BridgedSignal::kind`]; the message is carried for
/// display only and is whatever the guest supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgedSignal {
    kind: SignalKind,
    type_id: GuestTypeId,
    message: String,
}

impl BridgedSignal {
    pub(crate) fn new(kind: SignalKind, type_id: GuestTypeId, message: String) -> Self {
        BridgedSignal {
            kind,
            type_id,
            message,
        }
    }

    /// The signal discriminant
    #[must_use]
    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    /// Guest type identity of the error that raised the signal
    #[must_use]
    pub fn type_id(&self) -> &GuestTypeId {
        &self.type_id
    }

    /// The original guest message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this signals the end of a (synchronous or asynchronous) iteration
    #[must_use]
    pub fn is_iteration_exhausted(&self) -> bool {
        matches!(
            self.kind,
            SignalKind::IterationExhausted | SignalKind::AsyncIterationExhausted
        )
    }
}

impl fmt::Display for BridgedSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for BridgedSignal {}

/// Recognizes registered guest signals in captured errors.
///
/// Stateless apart from the borrowed registry; cheap to copy and safe to use from any
/// number of threads at once. Never takes ownership of a handle.
#[derive(Debug, Clone, Copy)]
pub struct SignalClassifier<'r> {
    registry: &'r SignalRegistry,
}

impl<'r> SignalClassifier<'r> {
    /// Creates a classifier over `registry`
    #[must_use]
    pub fn new(registry: &'r SignalRegistry) -> Self {
        SignalClassifier { registry }
    }

    /// The registry this classifier matches against
    #[must_use]
    pub fn registry(&self) -> &'r SignalRegistry {
        self.registry
    }

    /// Classifies the error behind `handle`.
    ///
    /// Returns `Ok(None)` for errors that are not registered signals. Calling this any
    /// number of times on the same live handle yields the same outcome.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHandle`] if `handle` does not name a live error in `table`.
    pub fn classify(
        &self,
        table: &ErrorTable,
        handle: &GuestErrorHandle,
    ) -> Result<Option<BridgedSignal>> {
        let outcome = table.with(handle, |error| self.classify_error(error));
        if let Err(error) = &outcome {
            diag!(DiagFlags::ERR, "SignalClassifier::classify: {}", error);
        }
        outcome
    }

    /// Classifies already dereferenced error data.
    ///
    /// The error type and then its declared ancestors are looked up in order; the first
    /// registered identity decides the kind.
    #[must_use]
    pub fn classify_error(&self, error: &GuestError) -> Option<BridgedSignal> {
        let kind = error
            .lineage()
            .find_map(|type_id| self.registry.kind_of(type_id))?;

        diag!(
            DiagFlags::EXEC,
            "SignalClassifier::classify_error: type='{}' -> {}",
            error.type_id,
            kind
        );

        Some(BridgedSignal::new(
            kind,
            error.type_id.clone(),
            error.message.clone(),
        ))
    }

    /// Converts the error behind `handle` into the crate [`Error`].
    ///
    /// Registered signals become [`Error::Signal`], every other guest error becomes
    /// [`Error::GuestFailure`], and a dead handle yields [`Error::InvalidHandle`]. The
    /// handle stays owned by the caller.
    pub fn into_host_error(&self, table: &ErrorTable, handle: &GuestErrorHandle) -> Error {
        let converted = table.with(handle, |error| match self.classify_error(error) {
            Some(signal) => Error::Signal(signal),
            None => Error::GuestFailure {
                type_name: error.type_id.to_string(),
                message: error.message.clone(),
                traceback: error.traceback.clone(),
            },
        });

        match converted {
            Ok(error) | Err(error) => error,
        }
    }
}

impl SignalClassifier<'static> {
    /// Creates a classifier over the installed process-wide registry.
    ///
    /// # Errors
    /// Returns [`Error::RegistryUninitialized`] if [`SignalRegistry::install`] has not run.
    pub fn global() -> Result<Self> {
        SignalRegistry::global()
            .map(SignalClassifier::new)
            .ok_or(Error::RegistryUninitialized)
    }
}
