// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # bridgescope
//!
//! The core of a bidirectional object bridge between a *host* runtime (the one this crate
//! runs in) and a *guest* runtime with its own object model, exception model and garbage
//! collector. `bridgescope` covers the two problems of such a bridge that need more than
//! pass-through forwarding:
//!
//! - **Signal classification** - guest errors that are really protocol signals, such as
//!   the guest's "iteration exhausted" condition, are recognized by type identity and
//!   re-raised host-side as a distinguished [`bridge::signal::BridgedSignal`].
//! - **Hierarchy resolution** - class ancestry graphs from either runtime, which can
//!   legitimately contain cycles, are walked exactly once per node to build proxy type
//!   descriptors.
//!
//! ## Quick Start
//!
//! ```rust
//! use bridgescope::prelude::*;
//!
//! // Signals: identity-based, never message-based.
//! let signals = SignalRegistry::python();
//! let classifier = SignalClassifier::new(&signals);
//! let errors = ErrorTable::new();
//!
//! let scope = errors.scope(errors.capture(GuestError::new("StopIteration", "done")));
//! let signal = classifier.classify(&errors, scope.handle())?;
//! assert_eq!(signal.map(|s| s.kind()), Some(SignalKind::IterationExhausted));
//!
//! // Hierarchies: cycles are tolerated.
//! let types = TypeRegistry::new();
//! let parent = types.create(TypeOrigin::Host, "Parent")?;
//! let child = types.create(TypeOrigin::Host, "Child2")?;
//! child.add_parent(parent.token);
//! parent.add_parent(child.token);
//!
//! let hierarchy = HierarchyResolver::default().resolve(&types, child.token)?;
//! assert_eq!(hierarchy.len(), 2);
//! # Ok::<(), bridgescope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`bridge`] - Signal classification, type hierarchy resolution, diagnostics
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Logging
//!
//! Diagnostic records are emitted through the [`log`] facade, gated per category by
//! [`bridge::diagnostics::DiagFlags`]. Installing a logger is left to the host.

#[macro_use]
pub(crate) mod macros;

pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use bridgescope::prelude::*;
///
/// let registry = TypeRegistry::new();
/// let object = registry.create(TypeOrigin::Guest, "object")?;
/// assert_eq!(HierarchyResolver::default().resolve(&registry, object.token)?.len(), 1);
/// # Ok::<(), bridgescope::Error>(())
/// ```
pub mod prelude;

/// The bridge core.
///
/// # Key Components
///
/// ## Signal Classification
/// - [`bridge::signal::SignalClassifier`] - Recognizes registered guest signals
/// - [`bridge::signal::SignalRegistry`] - Process-wide table of signal type identities
/// - [`bridge::signal::ErrorTable`] - Captured guest errors behind single-owner handles
///
/// ## Type System
/// - [`bridge::typesystem::HierarchyResolver`] - Cycle-safe ancestry resolution
/// - [`bridge::typesystem::TypeRegistry`] - Descriptor storage and lookup
/// - [`bridge::typesystem::ProxyCache`] - Memoized proxy type descriptors
///
/// ## Identities and Diagnostics
/// - [`bridge::token`] - Type identities shared by both runtimes
/// - [`bridge::diagnostics`] - Category switches for diagnostic output
pub mod bridge;

/// `bridgescope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `bridgescope` Error type
///
/// The main error type for all operations in this crate. Besides genuine faults it carries
/// the bridged guest conditions, so host code can `match` on a guest signal.
///
/// # Examples
///
/// ```rust
/// use bridgescope::{Error, bridge::token::Token};
///
/// let error = Error::UnresolvableReference { token: Token::guest(7), referenced_by: None };
/// match error {
///     Error::UnresolvableReference { token, .. } => println!("dangling: {}", token),
///     Error::Signal(signal) => println!("signal: {}", signal.kind()),
///     e => println!("Error: {}", e),
/// }
/// ```
pub use error::Error;
