use thiserror::Error;

use crate::bridge::{
    signal::BridgedSignal,
    token::{Token, TypeOrigin},
};

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Contract Violations
/// - [`Error::InvalidHandle`] - A guest error handle was already released or never existed
///
/// ## Type System Errors
/// - [`Error::UnresolvableReference`] - A type identity has no backing descriptor
/// - [`Error::RecursionLimit`] - Hierarchy deeper than the configured bound
/// - [`Error::TypeInsert`] - Identity already taken in the registry
/// - [`Error::TokenExhausted`] - No free row left for a runtime
///
/// ## Registry Errors
/// - [`Error::RegistryInitialized`] - The signal registry was installed twice
/// - [`Error::RegistryUninitialized`] - The signal registry was used before installation
///
/// ## Bridged Conditions
/// - [`Error::Signal`] - A guest protocol signal, re-raised host-side
/// - [`Error::GuestFailure`] - Any other guest error
///
/// Cycles in an ancestry graph are not an error and have no variant here.
///
/// # Examples
///
/// ```rust
/// use bridgescope::{Error, bridge::signal::SignalKind};
///
/// fn react(error: Error) -> &'static str {
///     match error {
///         Error::Signal(signal) if signal.kind() == SignalKind::IterationExhausted => "done",
///         Error::GuestFailure { .. } => "failed",
///         _ => "bug",
///     }
/// }
/// # let _ = react;
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A guest error handle was already released, belongs to another table, or was
    /// fabricated from a raw value that never named a live error.
    ///
    /// This is a programming-contract violation and is never treated as "no match".
    /// The associated value is the raw handle.
    #[error("Invalid guest error handle - 0x{0:016x}")]
    InvalidHandle(u64),

    /// A type identity could not be dereferenced to a descriptor.
    ///
    /// Raised by hierarchy resolution for dangling parent references, or for a root that
    /// does not exist (`referenced_by` is `None` then). No partial hierarchy is produced.
    #[error("Unresolvable type reference {token}{}", describe_referrer(.referenced_by))]
    UnresolvableReference {
        /// The identity that could not be dereferenced
        token: Token,
        /// The type whose parent list contained `token`
        referenced_by: Option<Token>,
    },

    /// Recursion limit reached.
    ///
    /// The associated value shows the depth limit that was reached.
    #[error("Reach the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// Failed to insert a new descriptor into the `TypeRegistry`.
    ///
    /// The associated [`Token`] is already taken.
    #[error("Failed to insert new type into TypeRegistry - {0}")]
    TypeInsert(Token),

    /// Every row of the associated origin is allocated; no further token can be created.
    #[error("No free {0} type rows left in TypeRegistry")]
    TokenExhausted(TypeOrigin),

    /// The process-wide signal registry has already been installed.
    #[error("The signal registry has already been installed")]
    RegistryInitialized,

    /// The process-wide signal registry has not been installed yet.
    #[error("The signal registry has not been installed")]
    RegistryUninitialized,

    /// A guest protocol signal (e.g. iteration exhausted) re-raised host-side.
    ///
    /// Match on [`BridgedSignal::kind`] rather than on the message.
    #[error("{0}")]
    Signal(BridgedSignal),

    /// A guest error that is not a registered signal.
    #[error("Guest error: {type_name}: {message}{}", describe_traceback(.traceback))]
    GuestFailure {
        /// Guest type identity of the error
        type_name: String,
        /// Guest-provided message
        message: String,
        /// Guest traceback text, if captured
        traceback: Option<String>,
    },

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}

impl Error {
    /// Returns the bridged signal if this error is one
    #[must_use]
    pub fn as_signal(&self) -> Option<&BridgedSignal> {
        match self {
            Error::Signal(signal) => Some(signal),
            _ => None,
        }
    }
}

fn describe_referrer(referenced_by: &Option<Token>) -> String {
    match referenced_by {
        Some(token) => format!(" (parent of {token})"),
        None => String::new(),
    }
}

fn describe_traceback(traceback: &Option<String>) -> String {
    match traceback {
        Some(traceback) => format!("\nTraceback: {traceback}"),
        None => String::new(),
    }
}
