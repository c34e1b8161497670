//! flashcheck - serial flash read/write bring-up test
//!
//! Replays the dual-core board bring-up script against a simulated device:
//! set up the serial memory, erase the last usable sector in the first half
//! of the device, verify it reads back fully erased, write a known 64-byte
//! pattern, verify the read-back, then release the secondary core and blink
//! the user LED. Any failure prints a diagnostic banner with the numeric
//! error code, lights the fault LED, and stops making progress.

mod cli;
mod report;

use clap::Parser;
use cli::{Cli, FaultPoint};
use flashcheck_core::board::Board;
use flashcheck_core::check;
use flashcheck_core::config::DeviceConfig;
use flashcheck_core::memory::SerialMemory;
use flashcheck_core::Error;
use flashcheck_sim::{FaultOp, SimBoard, SimMemory};
use report::ConsoleObserver;

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    // ANSI ESC sequence for clear screen, as on the retargeted debug console
    print!("\x1b[2J\x1b[;H");
    println!("************** Serial Flash Read and Write Test **************");

    let mut board = SimBoard::new().real_delays(true);

    if let Err(e) = bring_up(&cli, &mut board) {
        println!();
        println!("=====================================================");
        println!();
        println!("FAIL: {}", e);
        println!("Error Code: 0x{:08X}", e.code());
        println!();
        println!("=====================================================");

        // On failure, turn the fault LED on and make no further progress.
        // The target parks the CPU in an infinite loop; the host process
        // exits nonzero instead.
        board.set_fault_led(true);
        std::process::exit(1);
    }
}

fn bring_up(cli: &Cli, board: &mut SimBoard) -> Result<(), Error> {
    let config = DeviceConfig {
        mem_size: cli.size,
        erase_size: cli.sector_size,
        ..DeviceConfig::default()
    };

    // Set up the serial memory
    if matches!(cli.fail, Some(FaultPoint::Setup)) {
        return Err(Error::SetupFailed);
    }
    let mut mem = SimMemory::setup(config).map_err(Error::from)?;

    match cli.fail {
        Some(FaultPoint::Erase) => mem.inject_fault(FaultOp::Erase, Error::EraseFailed),
        Some(FaultPoint::Read) => mem.inject_fault(FaultOp::Read, Error::ReadFailed),
        Some(FaultPoint::Write) => mem.inject_fault(FaultOp::Write, Error::WriteFailed),
        Some(FaultPoint::Setup) | None => {}
    }

    // Use the last sector in the first half of the device for the test
    let target_addr = config.target_address()?;

    println!();
    println!("Total Flash Size: {} bytes", mem.total_size());

    let outcome = check::run(&mut mem, target_addr, &mut ConsoleObserver)?;
    log::debug!(
        "verified {} bytes at 0x{:08X} ({} byte sector)",
        outcome.written.len(),
        outcome.target_addr,
        outcome.sector_size
    );

    println!();
    println!("=========================================================");
    println!();
    println!("SUCCESS: Read data matches with written data!");
    println!();
    println!("=========================================================");

    // Release the secondary core; the two cores do not coordinate afterwards
    board.enable_secondary_core(cli.boot_addr, cli.boot_wait_us)?;

    // Liveness blink. The hardware original loops forever; --blink bounds
    // the cycle count on the host (0 keeps the original behavior).
    let mut cycles = 0u32;
    loop {
        board.toggle_user_led();
        board.delay_ms(cli.blink_delay_ms);
        cycles += 1;
        if cli.blink != 0 && cycles >= cli.blink {
            break;
        }
    }

    Ok(())
}
