//! Console reporting for the test sequence
//!
//! Reproduces the numbered step output and hex dumps of the original debug
//! console script.

use flashcheck_core::check::CheckObserver;
use flashcheck_core::hex::HexDump;

/// Print the content of a buffer, 16 hex bytes per line
fn print_array(message: &str, buf: &[u8]) {
    println!();
    println!("{} ({} bytes):", message, buf.len());
    println!("-------------------------");
    print!("{}", HexDump(buf));
}

/// Observer that narrates the check steps on stdout
pub struct ConsoleObserver;

impl CheckObserver for ConsoleObserver {
    fn erasing(&mut self, addr: u32, len: u32) {
        println!();
        println!("1. Erasing {} bytes from offset address 0x{:x}", len, addr);
    }

    fn verifying_erased(&mut self, received: &[u8]) {
        println!();
        println!("2. Reading after Erase & verifying that each byte is 0xFF");
        print_array("Received Data", received);
    }

    fn writing(&mut self, addr: u32, data: &[u8]) {
        println!();
        println!("3. Writing data to offset address 0x{:x}", addr);
        print_array("Written Data", data);
    }

    fn reading_back(&mut self, received: &[u8]) {
        println!();
        println!("4. Reading back for verification");
        print_array("Received Data", received);
    }
}
