//! CLI argument parsing

use clap::{Parser, ValueEnum};

/// Parse a string as a hex or decimal u32
fn parse_hex_u32(s: &str) -> Result<u32, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Where to inject a simulated device failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FaultPoint {
    /// Fail the serial memory setup call
    Setup,
    /// Fail the sector erase
    Erase,
    /// Fail the first read
    Read,
    /// Fail the pattern write
    Write,
}

#[derive(Parser)]
#[command(name = "flashcheck")]
#[command(author, version, about = "Serial flash read/write bring-up test", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Total flash size in bytes (hex or decimal)
    #[arg(long, value_parser = parse_hex_u32, default_value = "0x1000000")]
    pub size: u32,

    /// Erase sector size in bytes (hex or decimal)
    #[arg(long, value_parser = parse_hex_u32, default_value = "0x1000")]
    pub sector_size: u32,

    /// Boot address for the secondary core
    #[arg(long, value_parser = parse_hex_u32, default_value = "0x60000400")]
    pub boot_addr: u32,

    /// Microseconds to wait for the secondary core to boot (0 = wait forever)
    #[arg(long, default_value_t = 10)]
    pub boot_wait_us: u32,

    /// Number of LED blink cycles after the test passes (0 = blink forever,
    /// as the hardware original does)
    #[arg(long, default_value_t = 3)]
    pub blink: u32,

    /// Delay between LED toggles in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub blink_delay_ms: u32,

    /// Inject a device failure to demonstrate the fatal-error path
    #[arg(long, value_enum)]
    pub fail: Option<FaultPoint>,
}
