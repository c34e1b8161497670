//! flashcheck-sim - In-memory device and board emulation
//!
//! This crate provides a simulated serial flash device and a recording board
//! so the bring-up test can run end to end on a host without hardware. The
//! flash simulation follows real NOR semantics: erase sets every byte in the
//! sector to 0xFF, programming can only clear bits. Faults can be injected
//! to exercise the fatal-error path.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod board;
mod memory;

pub use board::SimBoard;
pub use memory::{FaultOp, SetupError, SimMemory};
