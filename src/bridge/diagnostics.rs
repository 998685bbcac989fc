//! Diagnostic output switches for the bridge core.
//!
//! The bridge emits debug records through the [`log`] facade. Which categories actually
//! produce records is controlled at runtime by a process-wide [`DiagFlags`] mask, so a
//! host can turn on e.g. type resolution tracing while a problem is being investigated
//! without reconfiguring its logger.
//!
//! Logger installation is the host's business; nothing in this crate initializes one.
//!
//! # Examples
//!
//! ```rust
//! use bridgescope::bridge::diagnostics::{self, DiagFlags};
//!
//! diagnostics::set_flags(DiagFlags::TYPE | DiagFlags::ERR);
//! assert!(diagnostics::enabled(DiagFlags::TYPE));
//! assert!(!diagnostics::enabled(DiagFlags::MEM));
//! diagnostics::set_flags(DiagFlags::empty());
//! ```

use std::sync::atomic::{AtomicU32, Ordering};

use bitflags::bitflags;

bitflags! {
    /// Categories of diagnostic output.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DiagFlags: u32 {
        /// Type registration and hierarchy resolution
        const TYPE = 0x01;
        /// Bridged call execution and signal classification
        const EXEC = 0x04;
        /// Capture and release of guest error handles
        const MEM = 0x08;
        /// Faults surfaced to callers
        const ERR = 0x20;
        /// Everything
        const ALL = 0xFF;
    }
}

static DIAG_FLAGS: AtomicU32 = AtomicU32::new(0);

/// Returns the currently active diagnostic flags
#[must_use]
pub fn flags() -> DiagFlags {
    DiagFlags::from_bits_retain(DIAG_FLAGS.load(Ordering::Relaxed))
}

/// Replaces the active diagnostic flags, returning the previous ones
pub fn set_flags(flags: DiagFlags) -> DiagFlags {
    DiagFlags::from_bits_retain(DIAG_FLAGS.swap(flags.bits(), Ordering::Relaxed))
}

/// Returns true if any category in `flag` is active
#[must_use]
pub fn enabled(flag: DiagFlags) -> bool {
    flags().intersects(flag)
}
