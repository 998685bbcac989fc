//! Captured guest errors and the handles that refer to them.
//!
//! When a bridged call returns abnormally, the capture side stores the guest error in an
//! [`ErrorTable`] and hands out a [`GuestErrorHandle`]. The handle is a single-owner
//! resource: whoever captured it releases it, exactly once, regardless of what
//! classification decided. [`ErrorScope`] ties that release to a lexical scope.
//!
//! Handles cross the FFI boundary as raw `u64` values ([`GuestErrorHandle::into_raw`],
//! [`GuestErrorHandle::from_raw`]). A raw value that no longer names a live error is
//! detected on use and reported as [`crate::Error::InvalidHandle`].

use std::{
    fmt,
    sync::{
        atomic::{AtomicU32, Ordering},
        Arc,
    },
};

use dashmap::{mapref::entry::Entry, DashMap};

use crate::{bridge::diagnostics::DiagFlags, Error, Result};

/// Identity of a guest-side type, e.g. `StopIteration`.
///
/// Equality is identity equality of the guest type; the human-readable message of an
/// error never participates.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuestTypeId(Arc<str>);

impl GuestTypeId {
    /// Creates a new guest type identity
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        GuestTypeId(id.into())
    }

    /// Returns the identity as string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GuestTypeId {
    fn from(id: &str) -> Self {
        GuestTypeId::new(id)
    }
}

impl From<String> for GuestTypeId {
    fn from(id: String) -> Self {
        GuestTypeId::new(id)
    }
}

impl fmt::Debug for GuestTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GuestTypeId({})", self.0)
    }
}

impl fmt::Display for GuestTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A guest error as captured at the moment a bridged call returned abnormally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestError {
    /// Type identity of the raised error
    pub type_id: GuestTypeId,
    /// Guest-side ancestors of `type_id`, most-derived first
    pub bases: Vec<GuestTypeId>,
    /// Guest-provided message
    pub message: String,
    /// Guest traceback text, if the capture side recorded one
    pub traceback: Option<String>,
}

impl GuestError {
    /// Creates a new guest error without ancestry or traceback
    pub fn new(type_id: impl Into<GuestTypeId>, message: impl Into<String>) -> Self {
        GuestError {
            type_id: type_id.into(),
            bases: Vec::new(),
            message: message.into(),
            traceback: None,
        }
    }

    /// Attaches the guest-side ancestors of the error type, most-derived first
    #[must_use]
    pub fn with_bases<I, T>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<GuestTypeId>,
    {
        self.bases = bases.into_iter().map(Into::into).collect();
        self
    }

    /// Attaches a traceback
    #[must_use]
    pub fn with_traceback(mut self, traceback: impl Into<String>) -> Self {
        self.traceback = Some(traceback.into());
        self
    }

    /// The error type followed by its ancestors
    pub fn lineage(&self) -> impl Iterator<Item = &GuestTypeId> {
        std::iter::once(&self.type_id).chain(self.bases.iter())
    }
}

/// Opaque, single-owner reference to a captured [`GuestError`].
///
/// Not `Clone`: releasing consumes the handle. The raw form packs the id of the minting
/// table into the high 32 bits and the slot into the low 32 bits.
#[must_use = "guest error handles must be released"]
#[derive(PartialEq, Eq, Hash)]
pub struct GuestErrorHandle {
    table: u32,
    slot: u32,
}

impl GuestErrorHandle {
    /// Second handle to the same slot, for the owner that is about to give up the first
    fn reissue(&self) -> Self {
        GuestErrorHandle {
            table: self.table,
            slot: self.slot,
        }
    }

    /// Returns the raw value without giving up ownership
    #[must_use]
    pub fn raw(&self) -> u64 {
        (u64::from(self.table) << 32) | u64::from(self.slot)
    }

    /// Converts the handle into its raw form for crossing the boundary
    #[must_use]
    pub fn into_raw(self) -> u64 {
        self.raw()
    }

    /// Rebuilds a handle from its raw form.
    ///
    /// The value is not checked here; using a stale value fails with
    /// [`Error::InvalidHandle`].
    pub fn from_raw(raw: u64) -> Self {
        GuestErrorHandle {
            table: (raw >> 32) as u32,
            slot: raw as u32,
        }
    }
}

impl fmt::Debug for GuestErrorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GuestErrorHandle(0x{:016x})", self.raw())
    }
}

static NEXT_TABLE_ID: AtomicU32 = AtomicU32::new(1);

/// Storage for captured guest errors.
///
/// Each table has its own id, so a handle minted by one table is rejected by another.
/// Slot 0 is never handed out, and a slot is reused only after its error was released.
/// All operations take `&self` and may be called from any thread.
pub struct ErrorTable {
    id: u32,
    next_slot: AtomicU32,
    slots: DashMap<u32, GuestError>,
}

impl ErrorTable {
    /// Creates a new, empty table
    #[must_use]
    pub fn new() -> Self {
        ErrorTable {
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            next_slot: AtomicU32::new(1),
            slots: DashMap::new(),
        }
    }

    /// Stores `error` and returns the handle that owns it.
    ///
    /// Once the slot counter wraps, slots still holding an unreleased error are skipped.
    pub fn capture(&self, error: GuestError) -> GuestErrorHandle {
        loop {
            let slot = self.next_slot.fetch_add(1, Ordering::Relaxed);
            if slot == 0 {
                continue;
            }

            let Entry::Vacant(vacant) = self.slots.entry(slot) else {
                diag!(DiagFlags::MEM, "ErrorTable::capture: slot {} still live, skipping", slot);
                continue;
            };

            let handle = GuestErrorHandle {
                table: self.id,
                slot,
            };

            diag!(
                DiagFlags::MEM,
                "ErrorTable::capture: handle={:?}, type='{}'",
                handle,
                error.type_id
            );

            vacant.insert(error);
            return handle;
        }
    }

    /// Borrows the error behind `handle`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHandle`] if the handle was released or belongs to another table.
    pub fn with<R>(&self, handle: &GuestErrorHandle, f: impl FnOnce(&GuestError) -> R) -> Result<R> {
        if handle.table != self.id {
            return Err(Error::InvalidHandle(handle.raw()));
        }

        match self.slots.get(&handle.slot) {
            Some(entry) => Ok(f(entry.value())),
            None => Err(Error::InvalidHandle(handle.raw())),
        }
    }

    /// Releases `handle`, returning the captured error.
    ///
    /// # Errors
    /// Returns [`Error::InvalidHandle`] if the handle was already released or belongs to
    /// another table.
    pub fn release(&self, handle: GuestErrorHandle) -> Result<GuestError> {
        let raw = handle.raw();
        if handle.table != self.id {
            return Err(Error::InvalidHandle(raw));
        }

        diag!(DiagFlags::MEM, "ErrorTable::release: handle=0x{:016x}", raw);

        self.slots
            .remove(&handle.slot)
            .map(|(_, error)| error)
            .ok_or(Error::InvalidHandle(raw))
    }

    /// Wraps `handle` in a guard that releases it when dropped
    pub fn scope(&self, handle: GuestErrorHandle) -> ErrorScope<'_> {
        ErrorScope {
            table: self,
            handle,
            armed: true,
        }
    }

    /// Number of captured errors not yet released
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if no captured error is outstanding
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for ErrorTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the wrapped handle when dropped.
///
/// ```rust
/// use bridgescope::bridge::signal::{ErrorTable, GuestError};
///
/// let table = ErrorTable::new();
/// {
///     let scope = table.scope(table.capture(GuestError::new("ValueError", "bad")));
///     assert_eq!(table.with(scope.handle(), |e| e.message.clone())?, "bad");
/// }
/// assert!(table.is_empty());
/// # Ok::<(), bridgescope::Error>(())
/// ```
pub struct ErrorScope<'a> {
    table: &'a ErrorTable,
    handle: GuestErrorHandle,
    armed: bool,
}

impl ErrorScope<'_> {
    /// The guarded handle
    #[must_use]
    pub fn handle(&self) -> &GuestErrorHandle {
        &self.handle
    }

    /// Disarms the guard and returns the handle to the caller
    pub fn into_inner(mut self) -> GuestErrorHandle {
        self.armed = false;
        self.handle.reissue()
    }
}

impl Drop for ErrorScope<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        if let Err(error) = self.table.release(self.handle.reissue()) {
            diag!(DiagFlags::ERR, "ErrorScope::drop: {}", error);
        }
    }
}
