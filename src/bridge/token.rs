//! Type identities shared by both sides of the bridge.
//!
//! Every class known to the bridge, host or guest, is named by a [`Token`]. Tokens are
//! plain values: copying one never touches the runtime that owns the class.

use std::fmt;
use std::hash::{Hash, Hasher};

use strum::{Display, EnumIter};

/// Runtime a type identity originates from.
///
/// Encoded in the high byte of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum TypeOrigin {
    /// Types living in the runtime this crate executes in
    Host,
    /// Types living in the bridged (foreign) runtime
    Guest,
}

impl TypeOrigin {
    /// Returns the high-byte tag used for tokens of this origin
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            TypeOrigin::Host => 0x01,
            TypeOrigin::Guest => 0x02,
        }
    }

    /// Maps a high-byte tag back to its origin
    #[must_use]
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x01 => Some(TypeOrigin::Host),
            0x02 => Some(TypeOrigin::Guest),
            _ => None,
        }
    }
}

/// An opaque type identity crossing the bridge.
///
/// Tokens are unique per underlying class and stable for the process lifetime:
/// - The high byte (bits 24-31) indicates the [`TypeOrigin`]
/// - The low 24 bits (bits 0-23) indicate the row allocated by the registry
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Token(pub u32);

impl Token {
    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Creates a token for a host-side type at `row`
    #[must_use]
    pub fn host(row: u32) -> Self {
        Self::with_origin(TypeOrigin::Host, row)
    }

    /// Creates a token for a guest-side type at `row`
    #[must_use]
    pub fn guest(row: u32) -> Self {
        Self::with_origin(TypeOrigin::Guest, row)
    }

    /// Creates a token for `origin` at `row`; the row is truncated to 24 bits
    #[must_use]
    pub fn with_origin(origin: TypeOrigin, row: u32) -> Self {
        Token((u32::from(origin.tag()) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the origin tag from the token (high byte)
    #[must_use]
    pub fn tag(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Returns the runtime this identity belongs to, if the tag is known
    #[must_use]
    pub fn origin(&self) -> Option<TypeOrigin> {
        TypeOrigin::from_tag(self.tag())
    }

    /// Extracts the row from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.origin() {
            Some(origin) => write!(f, "Token(0x{:08x}, {}, row: {})", self.0, origin, self.row()),
            None => write!(f, "Token(0x{:08x}, tag: 0x{:02x}, row: {})", self.0, self.tag(), self.row()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
