//! ATmega-specific HAL for the Twine TWI master driver
//!
//! This crate provides the memory-mapped implementation of
//! `twine_hal::TwiRegisters` for the ATmega TWI peripheral. It supports:
//!
//! - ATmega328P / ATmega168 / ATmega8 (SDA/SCL on PC4/PC5)
//! - ATmega128 / ATmega1280 / ATmega2560 (SCL/SDA on PD0/PD1)
//!
//! # Usage
//!
//! ```ignore
//! // SAFETY: the TWI peripheral is not used anywhere else
//! let twi = unsafe { AvrTwi::new(ATMEGA328P) };
//! let mut master = TwiMaster::new(twi, clock, TwiConfig::default());
//! master.begin();
//! ```

#![no_std]

pub mod twi;

// Re-export shared traits from twine-hal
pub use twi::{AvrTwi, RegisterMap, ATMEGA128, ATMEGA328P};
pub use twine_hal::TwiRegisters;
