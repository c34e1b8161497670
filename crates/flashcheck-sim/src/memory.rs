//! Simulated serial flash device

use flashcheck_core::check::ERASED_VALUE;
use flashcheck_core::config::DeviceConfig;
use flashcheck_core::memory::SerialMemory;
use flashcheck_core::{Error, Result};

/// Error returned when device setup is rejected
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The configuration table describes an unusable device
    #[error("device geometry rejected: {0}")]
    Geometry(Error),
}

impl From<SetupError> for Error {
    fn from(_: SetupError) -> Self {
        Error::SetupFailed
    }
}

/// Operations a fault can be injected into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultOp {
    /// Fail the next erase
    Erase,
    /// Fail the next read
    Read,
    /// Fail the next write
    Write,
}

/// In-memory serial flash device
///
/// Backing storage starts fully erased (all 0xFF), like a factory-fresh
/// chip. The erase granularity is uniform across the device.
#[derive(Debug)]
pub struct SimMemory {
    config: DeviceConfig,
    data: Vec<u8>,
    fault: Option<(FaultOp, Error)>,
}

impl SimMemory {
    /// Set up a device from its configuration table
    ///
    /// Validates the geometry the way the middleware setup call does; a
    /// rejected configuration never yields a handle.
    pub fn setup(config: DeviceConfig) -> std::result::Result<Self, SetupError> {
        config.validate().map_err(SetupError::Geometry)?;
        log::info!(
            "serial memory up: {} bytes, {} byte sectors, {:?}, {} Hz",
            config.mem_size,
            config.erase_size,
            config.chip_select,
            config.bus_frequency_hz
        );
        Ok(Self {
            data: vec![ERASED_VALUE; config.mem_size as usize],
            config,
            fault: None,
        })
    }

    /// Arrange for the next operation of kind `op` to fail with `error`
    ///
    /// One-shot: the fault is consumed when it fires.
    pub fn inject_fault(&mut self, op: FaultOp, error: Error) {
        self.fault = Some((op, error));
    }

    fn take_fault(&mut self, op: FaultOp) -> Result<()> {
        if let Some((fault_op, error)) = self.fault {
            if fault_op == op {
                self.fault = None;
                log::debug!("injected fault fires on {:?}: {}", op, error);
                return Err(error);
            }
        }
        Ok(())
    }

    /// Get a reference to the device contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the configuration table the device was set up with
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }
}

impl SerialMemory for SimMemory {
    fn total_size(&self) -> u32 {
        self.config.mem_size
    }

    fn erase_size_at(&self, _addr: u32) -> u32 {
        self.config.erase_size
    }

    fn erase(&mut self, addr: u32, len: u32) -> Result<()> {
        self.take_fault(FaultOp::Erase)?;
        if !self.is_valid_range(addr, len as usize) {
            return Err(Error::AddressOutOfBounds);
        }
        let sector = self.config.erase_size;
        if addr % sector != 0 || len % sector != 0 {
            return Err(Error::InvalidAlignment);
        }
        for byte in &mut self.data[addr as usize..(addr + len) as usize] {
            *byte = ERASED_VALUE;
        }
        Ok(())
    }

    fn read(&mut self, addr: u32, buf: &mut [u8]) -> Result<()> {
        self.take_fault(FaultOp::Read)?;
        if !self.is_valid_range(addr, buf.len()) {
            return Err(Error::AddressOutOfBounds);
        }
        let addr = addr as usize;
        buf.copy_from_slice(&self.data[addr..addr + buf.len()]);
        Ok(())
    }

    fn write(&mut self, addr: u32, data: &[u8]) -> Result<()> {
        self.take_fault(FaultOp::Write)?;
        if !self.is_valid_range(addr, data.len()) {
            return Err(Error::AddressOutOfBounds);
        }
        let addr = addr as usize;
        // Programming can only change bits 1 -> 0
        for (i, &byte) in data.iter().enumerate() {
            self.data[addr + i] &= byte;
        }
        Ok(())
    }
}
