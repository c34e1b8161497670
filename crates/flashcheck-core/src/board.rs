//! Board capability
//!
//! The bring-up test touches four board facilities beyond the serial memory:
//! a user LED for the liveness blink, a fault LED for the fatal-error path,
//! a millisecond delay, and the one-shot release of the secondary processor
//! core. This trait keeps the test sequence independent of the board support
//! package so it can run against a recording simulation.

use crate::error::Result;

/// Board peripherals consumed by the bring-up test
pub trait Board {
    /// Toggle the user LED (liveness indicator)
    fn toggle_user_led(&mut self);

    /// Drive the fault LED
    ///
    /// Latched high on fatal error and never cleared; the program halts
    /// right after.
    fn set_fault_led(&mut self, on: bool);

    /// Block for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Release the secondary core from reset at `boot_addr`
    ///
    /// Fire-and-forget: the two cores do not coordinate afterwards.
    /// `wait_us` bounds how long to wait for the core to come up, with `0`
    /// meaning wait indefinitely.
    ///
    /// # Errors
    /// * `CoreBootFailed` - the core did not come up, or was already enabled
    fn enable_secondary_core(&mut self, boot_addr: u32, wait_us: u32) -> Result<()>;
}
