//! Error types for flashcheck-core
//!
//! The taxonomy is deliberately flat: the bring-up test never recovers or
//! retries, so callers only ever ask "did it fail" and forward the error to
//! the fatal-halt path. Each variant carries a stable numeric code that the
//! application prints next to the human-readable message.

use core::fmt;

/// Core error type - no_std compatible, Copy for efficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Serial memory setup failed
    SetupFailed,
    /// Device geometry failed validation
    InvalidGeometry,
    /// Address or length is beyond the device size
    AddressOutOfBounds,
    /// Operation requires an erase-sector-aligned address or length
    InvalidAlignment,
    /// Provided buffer is too small for the operation
    BufferTooSmall,
    /// Erase operation failed
    EraseFailed,
    /// Read operation failed
    ReadFailed,
    /// Write/program operation failed
    WriteFailed,
    /// Erase verification found a byte that is not the erased value
    NotErased {
        /// Address of the first non-erased byte
        addr: u32,
        /// The byte value found (should be 0xFF after erase)
        found: u8,
    },
    /// Read-back verification found a byte that differs from what was written
    Mismatch {
        /// Address of the first differing byte
        addr: u32,
        /// The byte that was written
        expected: u8,
        /// The byte that was read back
        found: u8,
    },
    /// Secondary core enable failed
    CoreBootFailed,
}

impl Error {
    /// Stable numeric code for this error, printed in the failure banner.
    ///
    /// Always nonzero; zero is the success status in the device contract.
    pub fn code(&self) -> u32 {
        match self {
            Self::SetupFailed => 0x0000_0001,
            Self::InvalidGeometry => 0x0000_0002,
            Self::AddressOutOfBounds => 0x0000_0003,
            Self::InvalidAlignment => 0x0000_0004,
            Self::BufferTooSmall => 0x0000_0005,
            Self::EraseFailed => 0x0000_0010,
            Self::ReadFailed => 0x0000_0011,
            Self::WriteFailed => 0x0000_0012,
            Self::NotErased { .. } => 0x0000_0020,
            Self::Mismatch { .. } => 0x0000_0021,
            Self::CoreBootFailed => 0x0000_0030,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetupFailed => write!(f, "serial memory setup failed"),
            Self::InvalidGeometry => write!(f, "device geometry rejected"),
            Self::AddressOutOfBounds => write!(f, "address out of bounds"),
            Self::InvalidAlignment => write!(f, "address or length not erase-aligned"),
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::EraseFailed => write!(f, "erasing memory failed"),
            Self::ReadFailed => write!(f, "reading memory failed"),
            Self::WriteFailed => write!(f, "writing to memory failed"),
            Self::NotErased { addr, found } => {
                write!(
                    f,
                    "flash contains data other than 0xFF after erase: found 0x{:02X} at 0x{:08X}",
                    found, addr
                )
            }
            Self::Mismatch {
                addr,
                expected,
                found,
            } => {
                write!(
                    f,
                    "read data does not match with written data at 0x{:08X}: wrote 0x{:02X}, read 0x{:02X}",
                    addr, expected, found
                )
            }
            Self::CoreBootFailed => write!(f, "secondary core enable failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type alias using the core Error type
pub type Result<T> = core::result::Result<T, Error>;
