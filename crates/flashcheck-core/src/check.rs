//! The erase/write/read/verify sequence
//!
//! This is the business logic of the bring-up test: erase the target sector,
//! confirm it reads back as all-0xFF, write a known 64-byte pattern, read it
//! back, and confirm byte-for-byte equality. The first failure of any kind
//! aborts the sequence; the caller is contractually required to act on the
//! returned error (the application routes it to the fatal-halt path).

use crate::error::{Error, Result};
use crate::memory::SerialMemory;

/// Size of the test transfer in bytes
pub const PACKET_SIZE: usize = 64;

/// The value every byte of flash reads as after an erase
pub const ERASED_VALUE: u8 = 0xFF;

/// Fill the transmit buffer with the deterministic test pattern
///
/// Byte at offset `i` is `i` truncated to 8 bits.
pub fn fill_pattern(buf: &mut [u8]) {
    for (index, byte) in buf.iter_mut().enumerate() {
        *byte = index as u8;
    }
}

/// Callback for observing the numbered steps of the check
///
/// The console front end uses this to reproduce the original test script's
/// output, including the hex dumps of the transmit and receive buffers. All
/// hooks have empty defaults.
pub trait CheckObserver {
    /// Step 1: about to erase `len` bytes at `addr`
    fn erasing(&mut self, _addr: u32, _len: u32) {}

    /// Step 2: read back after erase; `received` is about to be verified
    fn verifying_erased(&mut self, _received: &[u8]) {}

    /// Step 3: about to write `data` at `addr`
    fn writing(&mut self, _addr: u32, _data: &[u8]) {}

    /// Step 4: read back after write; `received` is about to be compared
    fn reading_back(&mut self, _received: &[u8]) {}
}

/// A no-op observer
pub struct NoObserver;

impl CheckObserver for NoObserver {}

/// Outcome of a successful check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckReport {
    /// Address the test ran at
    pub target_addr: u32,
    /// Erase granularity at that address
    pub sector_size: u32,
    /// The pattern that was written
    pub written: [u8; PACKET_SIZE],
    /// The bytes read back after the write
    pub read_back: [u8; PACKET_SIZE],
}

/// Run the full erase/write/read/verify sequence at `addr`
///
/// `addr` must be erase-sector-aligned and the sector must lie within the
/// device. The sequence is idempotent: re-running it from any device state
/// produces the same successful outcome, because it starts with an erase.
///
/// # Errors
///
/// Any device operation failure is returned as-is. Verification failures are
/// reported as [`Error::NotErased`] (a byte other than 0xFF after erase) or
/// [`Error::Mismatch`] (read-back differs from what was written), each
/// carrying the first offending address.
pub fn run<M, O>(mem: &mut M, addr: u32, observer: &mut O) -> Result<CheckReport>
where
    M: SerialMemory + ?Sized,
    O: CheckObserver,
{
    let sector_size = mem.erase_size_at(addr);

    if !mem.is_valid_range(addr, sector_size as usize) {
        return Err(Error::AddressOutOfBounds);
    }
    if sector_size == 0 || addr % sector_size != 0 {
        return Err(Error::InvalidAlignment);
    }

    // 1. Erase before write
    observer.erasing(addr, sector_size);
    log::debug!("erasing {} bytes at 0x{:08X}", sector_size, addr);
    mem.erase(addr, sector_size)?;

    // 2. Read after erase and confirm every byte is 0xFF
    let mut rx_buf = [0u8; PACKET_SIZE];
    mem.read(addr, &mut rx_buf)?;
    observer.verifying_erased(&rx_buf);
    if let Some((index, &found)) = rx_buf
        .iter()
        .enumerate()
        .find(|(_, &byte)| byte != ERASED_VALUE)
    {
        return Err(Error::NotErased {
            addr: addr + index as u32,
            found,
        });
    }

    // 3. Write the known pattern
    let mut tx_buf = [0u8; PACKET_SIZE];
    fill_pattern(&mut tx_buf);
    observer.writing(addr, &tx_buf);
    log::debug!("writing {} bytes at 0x{:08X}", tx_buf.len(), addr);
    mem.write(addr, &tx_buf)?;

    // 4. Read back and compare
    mem.read(addr, &mut rx_buf)?;
    observer.reading_back(&rx_buf);
    if let Some((index, (&expected, &found))) = tx_buf
        .iter()
        .zip(rx_buf.iter())
        .enumerate()
        .find(|(_, (e, f))| e != f)
    {
        return Err(Error::Mismatch {
            addr: addr + index as u32,
            expected,
            found,
        });
    }

    Ok(CheckReport {
        target_addr: addr,
        sector_size,
        written: tx_buf,
        read_back: rx_buf,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec;
    use std::vec::Vec;

    /// A mock serial memory for exercising the check sequence
    ///
    /// Simulates NOR flash behavior (erase sets 0xFF, writes clear bits) and
    /// can be told to misbehave in specific ways to drive the failure paths.
    struct MockMemory {
        data: Vec<u8>,
        erase_size: u32,
        /// Pretend erases succeed without doing anything
        skip_erase: bool,
        /// Corrupt one byte of every write
        corrupt_writes: bool,
        /// Fail the next operation of each kind outright
        fail_erase: bool,
        fail_read: bool,
        fail_write: bool,
    }

    impl MockMemory {
        fn new(size: usize, erase_size: u32) -> Self {
            Self {
                data: vec![ERASED_VALUE; size],
                erase_size,
                skip_erase: false,
                corrupt_writes: false,
                fail_erase: false,
                fail_read: false,
                fail_write: false,
            }
        }
    }

    impl SerialMemory for MockMemory {
        fn total_size(&self) -> u32 {
            self.data.len() as u32
        }

        fn erase_size_at(&self, _addr: u32) -> u32 {
            self.erase_size
        }

        fn erase(&mut self, addr: u32, len: u32) -> Result<()> {
            if self.fail_erase {
                return Err(Error::EraseFailed);
            }
            if !self.is_valid_range(addr, len as usize) {
                return Err(Error::AddressOutOfBounds);
            }
            if self.skip_erase {
                return Ok(());
            }
            for byte in &mut self.data[addr as usize..(addr + len) as usize] {
                *byte = ERASED_VALUE;
            }
            Ok(())
        }

        fn read(&mut self, addr: u32, buf: &mut [u8]) -> Result<()> {
            if self.fail_read {
                return Err(Error::ReadFailed);
            }
            if !self.is_valid_range(addr, buf.len()) {
                return Err(Error::AddressOutOfBounds);
            }
            let addr = addr as usize;
            buf.copy_from_slice(&self.data[addr..addr + buf.len()]);
            Ok(())
        }

        fn write(&mut self, addr: u32, data: &[u8]) -> Result<()> {
            if self.fail_write {
                return Err(Error::WriteFailed);
            }
            if !self.is_valid_range(addr, data.len()) {
                return Err(Error::AddressOutOfBounds);
            }
            let addr = addr as usize;
            for (i, &byte) in data.iter().enumerate() {
                // NOR programming can only clear bits
                self.data[addr + i] &= byte;
            }
            if self.corrupt_writes {
                self.data[addr] = !self.data[addr];
            }
            Ok(())
        }
    }

    /// Observer that records which steps ran, in order
    #[derive(Default)]
    struct StepRecorder(Vec<&'static str>);

    impl CheckObserver for StepRecorder {
        fn erasing(&mut self, _addr: u32, _len: u32) {
            self.0.push("erase");
        }
        fn verifying_erased(&mut self, _received: &[u8]) {
            self.0.push("verify-erased");
        }
        fn writing(&mut self, _addr: u32, _data: &[u8]) {
            self.0.push("write");
        }
        fn reading_back(&mut self, _received: &[u8]) {
            self.0.push("read-back");
        }
    }

    #[test]
    fn pattern_is_ascending_bytes() {
        let mut buf = [0u8; PACKET_SIZE];
        fill_pattern(&mut buf);
        for (i, &byte) in buf.iter().enumerate() {
            assert_eq!(byte, (i % 256) as u8);
        }
    }

    #[test]
    fn end_to_end_scenario() {
        // 16 MiB device with 4 KiB sectors, target = 8 MiB - 8 KiB
        let config = crate::config::DeviceConfig::default();
        let addr = config.target_address().unwrap();
        assert_eq!(addr, 8 * 1024 * 1024 - 8 * 1024);

        let mut mem = MockMemory::new(config.mem_size as usize, config.erase_size);
        let mut steps = StepRecorder::default();
        let report = run(&mut mem, addr, &mut steps).unwrap();

        assert_eq!(report.target_addr, addr);
        assert_eq!(report.sector_size, 4096);
        assert_eq!(report.written, report.read_back);
        assert_eq!(&report.written[..4], &[0, 1, 2, 3]);
        assert_eq!(report.written[63], 63);
        assert_eq!(steps.0, ["erase", "verify-erased", "write", "read-back"]);
    }

    #[test]
    fn round_trip_reproduces_written_bytes() {
        let mut mem = MockMemory::new(64 * 1024, 4096);
        let report = run(&mut mem, 0x1000, &mut NoObserver).unwrap();

        let mut rx = [0u8; PACKET_SIZE];
        mem.read(0x1000, &mut rx).unwrap();
        assert_eq!(rx, report.written);
    }

    #[test]
    fn sequence_is_idempotent() {
        let mut mem = MockMemory::new(64 * 1024, 4096);
        let first = run(&mut mem, 0x2000, &mut NoObserver).unwrap();
        let second = run(&mut mem, 0x2000, &mut NoObserver).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn erase_runs_before_first_read_verification() {
        // Pre-fill the sector with garbage; the leading erase must clear it
        let mut mem = MockMemory::new(64 * 1024, 4096);
        for byte in &mut mem.data[0x3000..0x4000] {
            *byte = 0xA5;
        }
        assert!(run(&mut mem, 0x3000, &mut NoObserver).is_ok());
    }

    #[test]
    fn detects_incomplete_erase() {
        let mut mem = MockMemory::new(64 * 1024, 4096);
        for byte in &mut mem.data[0x1000..0x1040] {
            *byte = 0x5A;
        }
        mem.skip_erase = true;

        match run(&mut mem, 0x1000, &mut NoObserver) {
            Err(Error::NotErased { addr, found }) => {
                assert_eq!(addr, 0x1000);
                assert_eq!(found, 0x5A);
            }
            other => panic!("expected NotErased, got {:?}", other),
        }
    }

    #[test]
    fn detects_read_back_mismatch() {
        let mut mem = MockMemory::new(64 * 1024, 4096);
        mem.corrupt_writes = true;

        match run(&mut mem, 0, &mut NoObserver) {
            Err(Error::Mismatch {
                addr,
                expected,
                found,
            }) => {
                assert_eq!(addr, 0);
                assert_eq!(expected, 0x00);
                assert_eq!(found, 0xFF);
            }
            other => panic!("expected Mismatch, got {:?}", other),
        }
    }

    #[test]
    fn device_failures_propagate_and_stop_the_sequence() {
        let mut mem = MockMemory::new(64 * 1024, 4096);
        mem.fail_erase = true;
        let mut steps = StepRecorder::default();
        assert_eq!(run(&mut mem, 0, &mut steps), Err(Error::EraseFailed));
        // Nothing past step 1 ran
        assert_eq!(steps.0, ["erase"]);

        let mut mem = MockMemory::new(64 * 1024, 4096);
        mem.fail_read = true;
        assert_eq!(run(&mut mem, 0, &mut NoObserver), Err(Error::ReadFailed));

        let mut mem = MockMemory::new(64 * 1024, 4096);
        mem.fail_write = true;
        assert_eq!(run(&mut mem, 0, &mut NoObserver), Err(Error::WriteFailed));
    }

    #[test]
    fn rejects_unaligned_address() {
        let mut mem = MockMemory::new(64 * 1024, 4096);
        assert_eq!(
            run(&mut mem, 0x1001, &mut NoObserver),
            Err(Error::InvalidAlignment)
        );
    }

    #[test]
    fn rejects_out_of_bounds_sector() {
        let mut mem = MockMemory::new(64 * 1024, 4096);
        assert_eq!(
            run(&mut mem, 64 * 1024, &mut NoObserver),
            Err(Error::AddressOutOfBounds)
        );
    }
}
