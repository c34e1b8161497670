//! Hex-dump formatting for console diagnostics
//!
//! Space-separated two-digit hex bytes, 16 per line, matching the bring-up
//! console's human-readable dump format. Pure `core::fmt`, so usable from
//! `no_std` retargeted output as well as `println!`.

use core::fmt;

/// Number of bytes printed per dump line
pub const BYTES_PER_LINE: usize = 16;

/// Displayable hex dump of a byte buffer
///
/// ```
/// use flashcheck_core::hex::HexDump;
///
/// let line = format!("{}", HexDump(&[0x00, 0x0F, 0xFF]));
/// assert_eq!(line, "0x00 0x0F 0xFF ");
/// ```
pub struct HexDump<'a>(pub &'a [u8]);

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, byte) in self.0.iter().enumerate() {
            write!(f, "0x{:02X} ", byte)?;
            if (index + 1) % BYTES_PER_LINE == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
