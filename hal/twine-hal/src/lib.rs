//! Twine Hardware Abstraction Layer
//!
//! This crate defines the hardware-facing traits the Twine TWI master
//! engine is built on. Chip crates (ATmega, etc.) implement them; the
//! engine in `twine-core` only ever talks to these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Sensor / actuator drivers              │
//! └─────────────────────────────────────────┘
//!                     │ RegisterBus
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twine-core (TwiMaster engine)          │
//! └─────────────────────────────────────────┘
//!                     │ TwiRegisters + Millis
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twine-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ twine-hal-avr │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`twi::TwiRegisters`] - Bus controller register access
//! - [`time::Millis`] - Monotonic millisecond clock
//! - [`i2c::RegisterBus`] - Register-oriented I2C transactions

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod time;
pub mod twi;

// Re-export key traits at crate root for convenience
pub use i2c::{RegisterBus, Speed};
pub use time::Millis;
pub use twi::TwiRegisters;
