//! Guest exception classification.
//!
//! A bridged call that fails on the guest side leaves behind a guest error. Most of those
//! are genuine failures, but some are protocol signals: the guest's "iteration exhausted"
//! condition is how its iterators say they are done. Host code needs to react to those
//! programmatically, so this module turns them into a distinguished [`BridgedSignal`]
//! instead of a generic failure carrying a message string.
//!
//! # Key Components
//!
//! - [`ErrorTable`] / [`GuestErrorHandle`]: captured guest errors behind single-owner handles
//! - [`SignalRegistry`]: process-wide, read-only table of signal type identities
//! - [`SignalClassifier`]: identity-based classification of captured errors
//! - [`BridgedSignal`]: the host-side condition produced for a signal
//!
//! # Examples
//!
//! ```rust
//! use bridgescope::bridge::signal::{
//!     ErrorTable, GuestError, SignalClassifier, SignalKind, SignalRegistry,
//! };
//!
//! let registry = SignalRegistry::python();
//! let classifier = SignalClassifier::new(&registry);
//! let table = ErrorTable::new();
//!
//! // The capture side owns the handle; the scope releases it whatever happens below.
//! let scope = table.scope(table.capture(GuestError::new("StopIteration", "done")));
//!
//! match classifier.classify(&table, scope.handle())? {
//!     Some(signal) => assert_eq!(signal.kind(), SignalKind::IterationExhausted),
//!     None => unreachable!(),
//! }
//! # Ok::<(), bridgescope::Error>(())
//! ```

mod classifier;
mod handle;
mod registry;

pub use classifier::{BridgedSignal, SignalClassifier};
pub use handle::{ErrorScope, ErrorTable, GuestError, GuestErrorHandle, GuestTypeId};
pub use registry::{SignalKind, SignalRegistry, SignalRegistryBuilder};
