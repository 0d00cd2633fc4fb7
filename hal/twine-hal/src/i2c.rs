//! I2C bus abstractions
//!
//! Provides the register-oriented transaction trait that device drivers
//! are written against, and the bus speed presets.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Register-oriented I2C bus master
///
/// Almost every I2C sensor exposes a register file: a write sets the
/// register pointer (and optionally stores data), a combined
/// write-then-read fetches from it.
pub trait RegisterBus {
    /// Error type for bus operations
    type Error;

    /// Write `data` starting at `register` of the device at `address`
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `register` - Register pointer sent before the payload
    /// * `data` - Bytes to write, in order
    fn write_register(&mut self, address: u8, register: u8, data: &[u8])
        -> Result<(), Self::Error>;

    /// Read into `buf` starting at `register` of the device at `address`
    ///
    /// Uses a repeated start between the pointer write and the read.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `register` - Register pointer sent before the read
    /// * `buf` - Buffer to read into
    fn read_register(&mut self, address: u8, register: u8, buf: &mut [u8])
        -> Result<(), Self::Error>;
}

/// Bus clock preset
///
/// The bus controller derives SCL from the CPU clock, so only the two
/// standard presets are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Speed {
    /// Standard mode (100 kHz)
    #[default]
    Standard,
    /// Fast mode (400 kHz)
    Fast,
}

impl Speed {
    /// Nominal SCL frequency in Hz
    pub const fn frequency(self) -> u32 {
        match self {
            Speed::Standard => 100_000,
            Speed::Fast => 400_000,
        }
    }

    /// Select a preset from a "fast" flag
    pub const fn from_fast(fast: bool) -> Self {
        if fast {
            Speed::Fast
        } else {
            Speed::Standard
        }
    }
}
