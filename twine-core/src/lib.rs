//! Blocking TWI (I2C) master engine
//!
//! This crate drives a TWI bus controller through its hardware state
//! machine to perform register writes and register reads on slave devices:
//!
//! - START / address / data / STOP phase primitives checked against a
//!   fixed status table
//! - Timeout-guarded busy waits (a timeout of 0 waits forever)
//! - Bus lock-up recovery on every timeout and unexpected status
//! - `embedded-hal` 1.0 `I2c` implementation on top of the same phases
//!
//! Everything is synchronous and single-owner: one [`TwiMaster`] owns the
//! peripheral and its configuration.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod config;
pub mod error;
pub mod master;
pub mod status;
mod wait;

#[cfg(test)]
mod sim;

pub use config::TwiConfig;
pub use error::{status_code, Error, Phase};
pub use master::TwiMaster;
pub use status::{classify, Direction, StatusClass};
pub use twine_hal::{Millis, RegisterBus, Speed, TwiRegisters};
