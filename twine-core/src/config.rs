//! Engine configuration
//!
//! The configuration is owned by the [`TwiMaster`](crate::TwiMaster) and
//! read by every transaction. `time_out` changes it at runtime.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default CPU clock (16 MHz)
pub const DEFAULT_CPU_HZ: u32 = 16_000_000;

/// TWI master configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TwiConfig {
    /// CPU clock feeding the bit rate generator, in Hz
    pub cpu_hz: u32,
    /// Per-phase timeout in ms (0 = wait forever)
    pub timeout_ms: u16,
}

impl Default for TwiConfig {
    fn default() -> Self {
        Self {
            cpu_hz: DEFAULT_CPU_HZ,
            timeout_ms: 0,
        }
    }
}

impl TwiConfig {
    /// Configuration for a given CPU clock, timeout disabled
    pub const fn with_cpu_hz(cpu_hz: u32) -> Self {
        Self {
            cpu_hz,
            timeout_ms: 0,
        }
    }

    /// Whether waits are bounded
    pub const fn timeout_enabled(&self) -> bool {
        self.timeout_ms != 0
    }
}
