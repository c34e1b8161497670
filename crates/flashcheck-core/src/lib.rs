//! flashcheck-core - Core library for the serial flash bring-up test
//!
//! This crate provides the device and board capabilities consumed by the
//! bring-up application, plus the erase/write/read/verify sequence that is
//! the test's actual business logic. It is `no_std` compatible so the same
//! sequence can run against real serial-memory middleware on a target or
//! against a simulated device on a host.
//!
//! # Features
//!
//! - `std` - Enable standard library support (`std::error::Error` impls)
//!
//! # Example
//!
//! ```ignore
//! use flashcheck_core::{check, config::DeviceConfig, memory::SerialMemory};
//!
//! fn self_test<M: SerialMemory>(mem: &mut M, config: &DeviceConfig) {
//!     let addr = config.target_address().unwrap();
//!     match check::run(mem, addr, &mut check::NoObserver) {
//!         Ok(report) => println!("OK, {} bytes verified", report.written.len()),
//!         Err(e) => println!("FAIL: {} (code 0x{:08X})", e, e.code()),
//!     }
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod board;
pub mod check;
pub mod config;
pub mod error;
pub mod hex;
pub mod memory;

pub use error::{Error, Result};
