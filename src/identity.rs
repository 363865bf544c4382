//! Identity keys.
//!
//! An [`Identity`] reduces "who this avatar is for" to a stable 64-bit key.
//! The key is the first eight bytes of the SHA-256 digest of the identity's
//! byte representation, read big-endian.

use sha2::{Digest, Sha256};

// ============================================================================
// Key Derivation
// ============================================================================

/// Derives the 64-bit key for a byte sequence.
///
/// Hashes `bytes` with SHA-256 and folds the first eight digest bytes
/// big-endian into a `u64`.
pub fn derive_key(bytes: &[u8]) -> u64 {
    let digest = Sha256::digest(bytes);
    digest[..8]
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}

// ============================================================================
// IdentityInt
// ============================================================================

mod sealed {
    pub trait Sealed {}
}

/// Primitive integers usable as identities.
///
/// The identity bytes are the integer's in-memory representation: its
/// native width in the platform's native byte order. Different integer
/// types holding the same value therefore hash differently.
pub trait IdentityInt: sealed::Sealed + Copy {
    /// The native byte representation.
    type Bytes: AsRef<[u8]>;

    /// Returns `self.to_ne_bytes()`.
    fn native_bytes(self) -> Self::Bytes;
}

macro_rules! impl_identity_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl IdentityInt for $t {
                type Bytes = [u8; std::mem::size_of::<$t>()];

                fn native_bytes(self) -> Self::Bytes {
                    self.to_ne_bytes()
                }
            }

            impl From<$t> for Identity {
                fn from(id: $t) -> Self {
                    Identity::from_int(id)
                }
            }
        )*
    };
}

impl_identity_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

// ============================================================================
// Identity
// ============================================================================

/// The identity an avatar is generated for.
///
/// Identities are plain values: two identities built from the same bytes
/// compare equal and yield the same colors.
///
/// # Example
///
/// ```
/// use initials_avatar::Identity;
///
/// let by_email = Identity::from_string("ada@example.com");
/// let by_row_id = Identity::from_int(1815_u64);
///
/// assert_eq!(by_email, Identity::from("ada@example.com"));
/// assert_ne!(by_email.key(), by_row_id.key());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    key: u64,
}

impl Identity {
    /// Creates an identity from an integer.
    ///
    /// The integer is hashed in its native width and byte order, so the
    /// resulting key is only portable between platforms of the same
    /// endianness.
    pub fn from_int<T: IdentityInt>(id: T) -> Self {
        Self::from_bytes(id.native_bytes().as_ref())
    }

    /// Creates an identity from the UTF-8 bytes of a string.
    pub fn from_string(id: impl AsRef<str>) -> Self {
        Self::from_bytes(id.as_ref().as_bytes())
    }

    /// Creates an identity from UTF-16 code units.
    ///
    /// Units that do not form valid UTF-16 hash as the empty string.
    pub fn from_utf16(units: &[u16]) -> Self {
        match String::from_utf16(units) {
            Ok(id) => Self::from_string(id),
            Err(_) => {
                tracing::debug!("identity is not valid UTF-16, hashing empty input");
                Self::from_bytes(&[])
            }
        }
    }

    /// Creates an identity from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            key: derive_key(bytes),
        }
    }

    /// Wraps a key computed elsewhere.
    pub fn from_key(key: u64) -> Self {
        Self { key }
    }

    /// Returns the 64-bit key.
    pub fn key(&self) -> u64 {
        self.key
    }
}

/// The default identity is the 64-bit integer zero (eight `0x00` bytes).
impl Default for Identity {
    fn default() -> Self {
        Self::from_int(0u64)
    }
}

impl From<&str> for Identity {
    fn from(id: &str) -> Self {
        Self::from_string(id)
    }
}

impl From<String> for Identity {
    fn from(id: String) -> Self {
        Self::from_string(id)
    }
}

impl From<&String> for Identity {
    fn from(id: &String) -> Self {
        Self::from_string(id)
    }
}

// ============================================================================
// Tests
// ============================================================================
