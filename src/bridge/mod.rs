//! The bridge core: guest signal classification and type hierarchy resolution.
//!
//! - [`signal`] - Recognizes guest protocol signals in captured guest errors
//! - [`typesystem`] - Cycle-safe ancestry resolution and proxy type descriptors
//! - [`token`] - Type identities shared by both runtimes
//! - [`diagnostics`] - Runtime switches for diagnostic log output

pub mod diagnostics;
pub mod signal;
pub mod token;
pub mod typesystem;
