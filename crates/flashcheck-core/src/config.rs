//! Device geometry and the static configuration table
//!
//! Mirrors the configuration the board support package hands to the serial
//! memory middleware: which chip select the device sits behind, the bus
//! clock, the device geometry, and a capability word.

use crate::error::{Error, Result};
use bitflags::bitflags;

/// Chip select line identifying the device on a shared bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipSelect {
    /// Chip select 0
    Cs0,
    /// Chip select 1
    Cs1,
}

bitflags! {
    /// Capability word from the device configuration table
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MemoryFeatures: u32 {
        /// Dual I/O transfers supported
        const DUAL_IO = 1 << 0;
        /// Quad I/O transfers supported
        const QUAD_IO = 1 << 1;
        /// Device requires 4-byte addressing
        const FOUR_BYTE_ADDR = 1 << 2;
    }
}

/// Static device configuration
///
/// Created once at startup and treated as read-only thereafter. The default
/// matches the reference board: a 16 MiB quad-I/O device with 4 KiB sectors
/// behind chip select 1 on a 100 MHz bus.
#[derive(Debug, Clone, Copy)]
pub struct DeviceConfig {
    /// Chip select the device is wired to
    pub chip_select: ChipSelect,
    /// Interface clock frequency in Hz
    pub bus_frequency_hz: u32,
    /// Total device size in bytes
    pub mem_size: u32,
    /// Erase sector size in bytes
    pub erase_size: u32,
    /// Device capability word
    pub features: MemoryFeatures,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            chip_select: ChipSelect::Cs1,
            bus_frequency_hz: 100_000_000,
            mem_size: 16 * 1024 * 1024,
            erase_size: 4 * 1024,
            features: MemoryFeatures::QUAD_IO | MemoryFeatures::FOUR_BYTE_ADDR,
        }
    }
}

impl DeviceConfig {
    /// Validate the geometry before any address arithmetic is done with it.
    ///
    /// The sector size must be a nonzero power of two that divides the device
    /// size, and `erase_size * 2` must not exceed `mem_size / 2` so that the
    /// target address computed by [`target_address`](Self::target_address)
    /// lands strictly inside the device on a sector boundary.
    pub fn validate(&self) -> Result<()> {
        if self.mem_size == 0 || self.erase_size == 0 {
            return Err(Error::InvalidGeometry);
        }
        if !self.erase_size.is_power_of_two() {
            return Err(Error::InvalidGeometry);
        }
        if self.mem_size % self.erase_size != 0 {
            return Err(Error::InvalidGeometry);
        }
        // Use u64 arithmetic so pathological sector sizes cannot overflow
        if (self.erase_size as u64) * 2 > (self.mem_size as u64) / 2 {
            return Err(Error::InvalidGeometry);
        }
        Ok(())
    }

    /// Target address for the flash test: the last usable erase-aligned
    /// region in the first half of the device, `mem_size / 2 - erase_size * 2`.
    ///
    /// Validates the geometry first, so the returned address is always
    /// sector-aligned and strictly within device bounds.
    pub fn target_address(&self) -> Result<u32> {
        self.validate()?;
        Ok(self.mem_size / 2 - self.erase_size * 2)
    }
}
