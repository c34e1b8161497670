//! Serial memory capability
//!
//! This module provides the `SerialMemory` trait that abstracts the external
//! serial (SPI/QSPI) flash device behind the same four operations and two
//! geometry queries the vendor middleware exposes. The verification sequence
//! in [`crate::check`] is written against this trait, so it runs unchanged
//! against real middleware on a target or an in-memory simulation on a host.

use crate::error::Result;

/// Blocking access to an external serial flash device
///
/// All operations use 32-bit device offsets. Every call blocks until the
/// underlying transfer completes or fails; there is no cancellation and no
/// partial-success reporting. Any error return is fatal to the bring-up
/// test - callers are contractually required to check and stop.
pub trait SerialMemory {
    /// Get the total device size in bytes
    fn total_size(&self) -> u32;

    /// Get the erase sector size at the given address
    ///
    /// Devices with hybrid sector layouts may return different granularities
    /// for different regions; uniform devices return a constant.
    fn erase_size_at(&self, addr: u32) -> u32;

    /// Erase a region of the device
    ///
    /// `addr` and `len` must be aligned to the erase granularity at `addr`.
    /// After a successful erase every byte in the region reads back as the
    /// erased value (0xFF).
    ///
    /// # Errors
    /// * `AddressOutOfBounds` - the region extends beyond the device
    /// * `InvalidAlignment` - `addr` or `len` is not sector-aligned
    /// * `EraseFailed` - the underlying erase operation failed
    fn erase(&mut self, addr: u32, len: u32) -> Result<()>;

    /// Read device contents into the provided buffer
    ///
    /// # Errors
    /// * `AddressOutOfBounds` - the read extends beyond the device
    /// * `ReadFailed` - the underlying read operation failed
    fn read(&mut self, addr: u32, buf: &mut [u8]) -> Result<()>;

    /// Write data to the device
    ///
    /// The target region must have been erased first; flash programming can
    /// only clear bits.
    ///
    /// # Errors
    /// * `AddressOutOfBounds` - the write extends beyond the device
    /// * `WriteFailed` - the underlying program operation failed
    fn write(&mut self, addr: u32, data: &[u8]) -> Result<()>;

    /// Check if a range is valid for this device
    fn is_valid_range(&self, addr: u32, len: usize) -> bool {
        // Use u64 arithmetic to avoid truncation on large ranges
        let end = addr as u64 + len as u64;
        end <= self.total_size() as u64
    }
}
