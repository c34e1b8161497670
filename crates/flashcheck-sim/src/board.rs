//! Simulated board peripherals
//!
//! Records everything the bring-up test does to the board so tests can
//! assert on it: user-LED toggles, the fault LED latch, accumulated delay,
//! and the one-shot secondary-core enable.

use flashcheck_core::board::Board;
use flashcheck_core::{Error, Result};
use std::thread;
use std::time::Duration;

/// Recording board simulation
///
/// Delays are counted but not slept by default; enable real sleeping with
/// [`real_delays`](Self::real_delays) when driving the interactive CLI.
#[derive(Debug, Default)]
pub struct SimBoard {
    user_led: bool,
    user_led_toggles: u32,
    fault_led: bool,
    total_delay_ms: u64,
    secondary_core: Option<(u32, u32)>,
    real_delays: bool,
}

impl SimBoard {
    /// Create a board with everything off
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `delay_ms` actually sleep instead of only counting
    pub fn real_delays(mut self, enabled: bool) -> Self {
        self.real_delays = enabled;
        self
    }

    /// Current user LED state
    pub fn user_led(&self) -> bool {
        self.user_led
    }

    /// How many times the user LED has been toggled
    pub fn user_led_toggles(&self) -> u32 {
        self.user_led_toggles
    }

    /// Whether the fault LED is lit
    pub fn fault_led(&self) -> bool {
        self.fault_led
    }

    /// Total delay requested so far, in milliseconds
    pub fn total_delay_ms(&self) -> u64 {
        self.total_delay_ms
    }

    /// The secondary-core enable call, if it happened: `(boot_addr, wait_us)`
    pub fn secondary_core(&self) -> Option<(u32, u32)> {
        self.secondary_core
    }
}

impl Board for SimBoard {
    fn toggle_user_led(&mut self) {
        self.user_led = !self.user_led;
        self.user_led_toggles += 1;
        log::debug!("user LED {}", if self.user_led { "on" } else { "off" });
    }

    fn set_fault_led(&mut self, on: bool) {
        self.fault_led = on;
        if on {
            log::error!("fault LED on");
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_delay_ms += ms as u64;
        if self.real_delays {
            thread::sleep(Duration::from_millis(ms as u64));
        }
    }

    fn enable_secondary_core(&mut self, boot_addr: u32, wait_us: u32) -> Result<()> {
        // The hardware call releases the core from reset exactly once
        if self.secondary_core.is_some() {
            return Err(Error::CoreBootFailed);
        }
        self.secondary_core = Some((boot_addr, wait_us));
        log::info!(
            "secondary core released at 0x{:08X} (wait {})",
            boot_addr,
            if wait_us == 0 {
                "forever".to_string()
            } else {
                format!("{} us", wait_us)
            }
        );
        Ok(())
    }
}
