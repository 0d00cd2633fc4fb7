//! TWI master engine
//!
//! [`TwiMaster`] owns the bus controller, the time source and the
//! configuration. Transactions are strictly ordered sequences of phase
//! primitives; the first phase that fails ends the transaction and its
//! status is handed to the caller with phase context for timeouts.
//!
//! # Usage
//!
//! ```ignore
//! let mut twi = TwiMaster::new(registers, clock, TwiConfig::default());
//! twi.begin();
//! twi.time_out(10);
//!
//! twi.write(0x68, 0x6B, &[0x00])?;     // wake an MPU-6050
//! let mut raw = [0u8; 6];
//! twi.read(0x68, 0x3B, &mut raw)?;     // accelerometer X/Y/Z
//! ```

mod hal;
mod phase;

use heapless::Vec;
use twine_hal::twi::{bit_rate, bits};
use twine_hal::{Millis, RegisterBus, Speed, TwiRegisters};

use crate::config::TwiConfig;
use crate::error::{Error, Phase, PhaseError};
use crate::status::{classify, Direction, StatusClass, MR_DATA_ACK, MR_DATA_NACK};

/// Lowest non-reserved 7-bit address
pub const FIRST_ADDRESS: u8 = 0x08;
/// Highest non-reserved 7-bit address
pub const LAST_ADDRESS: u8 = 0x77;
/// Number of addresses a scan can report
pub const SCAN_CAPACITY: usize = (LAST_ADDRESS - FIRST_ADDRESS) as usize + 1;

/// Blocking TWI bus master
pub struct TwiMaster<T, C> {
    twi: T,
    clock: C,
    config: TwiConfig,
    speed: Speed,
}

impl<T: TwiRegisters, C: Millis> TwiMaster<T, C> {
    /// Create a master around a bus controller and a clock
    ///
    /// The peripheral is not touched until [`begin`](Self::begin).
    pub fn new(twi: T, clock: C, config: TwiConfig) -> Self {
        Self {
            twi,
            clock,
            config,
            speed: Speed::Standard,
        }
    }

    /// Enable pull-ups, select 100 kHz and enable the controller with ACKs
    pub fn begin(&mut self) {
        self.twi.enable_pullups();
        let status = self.twi.status();
        self.twi.set_status(status & !bits::TWPS_MASK);
        self.set_speed(Speed::Standard);
        self.twi.set_control(bits::TWEN | bits::TWEA);
        debug!("twi: enabled, cpu {} Hz", self.config.cpu_hz);
    }

    /// Disable the controller
    ///
    /// Transactions are refused with the controller's idle status until
    /// [`begin`](Self::begin) or [`lock_up`](Self::lock_up) enables it again.
    pub fn end(&mut self) {
        self.twi.set_control(0);
        debug!("twi: disabled");
    }

    /// Set the per-phase timeout in ms; 0 waits forever
    ///
    /// A stuck bus with the timeout disabled blocks the caller for good.
    pub fn time_out(&mut self, ms: u16) {
        self.config.timeout_ms = ms;
    }

    /// Current per-phase timeout in ms
    pub fn timeout(&self) -> u16 {
        self.config.timeout_ms
    }

    /// Select the bus clock preset
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
        self.twi
            .set_bit_rate(bit_rate(self.config.cpu_hz, speed.frequency()));
    }

    /// Current bus clock preset
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Current configuration
    pub fn config(&self) -> &TwiConfig {
        &self.config
    }

    /// Give back the bus controller and clock
    pub fn release(self) -> (T, C) {
        (self.twi, self.clock)
    }

    /// Write `data` to `register` of the slave at `address`
    ///
    /// START, SLA+W, register, payload in order, STOP.
    pub fn write(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), Error> {
        self.start().map_err(|e| e.during(Phase::Start))?;
        self.send_address(address, Direction::Write)
            .map_err(|e| e.during(Phase::AddressingToTransmit))?;
        self.send_byte(register)
            .map_err(|e| e.during(Phase::Transmitting))?;
        for &byte in data {
            self.send_byte(byte)
                .map_err(|e| e.during(Phase::Transmitting))?;
        }
        self.stop().map_err(|e| e.during(Phase::StopBit))
    }

    /// Read `buffer.len()` bytes from `register` of the slave at `address`
    ///
    /// START, SLA+W, register, repeated START, SLA+R, bytes, STOP. Every
    /// byte but the last is ACKed; the last is NACKed. An empty buffer
    /// still moves one byte over the bus, which is then dropped.
    pub fn read(&mut self, address: u8, register: u8, buffer: &mut [u8]) -> Result<(), Error> {
        self.start().map_err(|e| e.during(Phase::Start))?;
        self.send_address(address, Direction::Write)
            .map_err(|e| e.during(Phase::AddressingToTransmit))?;
        self.send_byte(register)
            .map_err(|e| e.during(Phase::Transmitting))?;
        self.start().map_err(|e| e.during(Phase::RepeatedStart))?;
        self.send_address(address, Direction::Read)
            .map_err(|e| e.during(Phase::AddressingToReceive))?;
        self.receive_into(buffer, true)?;
        self.stop().map_err(|e| e.during(Phase::StopBit))
    }

    /// Check whether a slave acknowledges `address`
    pub fn probe(&mut self, address: u8) -> Result<bool, Error> {
        self.start().map_err(|e| e.during(Phase::Start))?;
        match self.send_address(address, Direction::Write) {
            Ok(()) => {
                self.stop().map_err(|e| e.during(Phase::StopBit))?;
                Ok(true)
            }
            // send_address already released the bus
            Err(PhaseError::Status(code))
                if matches!(classify(code), StatusClass::AddressNack(_)) =>
            {
                Ok(false)
            }
            Err(e) => Err(e.during(Phase::AddressingToTransmit)),
        }
    }

    /// Probe every non-reserved address and collect the ones that answer
    pub fn scan(&mut self) -> Result<Vec<u8, SCAN_CAPACITY>, Error> {
        let mut found = Vec::new();
        for address in FIRST_ADDRESS..=LAST_ADDRESS {
            if self.probe(address)? && found.push(address).is_err() {
                break;
            }
        }
        Ok(found)
    }

    /// Reset the controller to release a hung bus
    ///
    /// Clearing the control register floats SDA and SCL; the controller is
    /// then re-enabled with ACKs. The interrupted transfer is not retried.
    pub fn lock_up(&mut self) {
        warn!("twi: lock-up recovery");
        self.twi.set_control(0);
        self.twi.set_control(bits::TWEN | bits::TWEA);
    }

    /// Receive into `buffer`, NACKing the final byte if `nack_last`
    ///
    /// Each byte must come back with exactly the acknowledge that was
    /// requested for it.
    fn receive_into(&mut self, buffer: &mut [u8], nack_last: bool) -> Result<(), Error> {
        let mut scratch = [0u8; 1];
        let buffer = if buffer.is_empty() {
            &mut scratch[..]
        } else {
            buffer
        };

        let last = buffer.len() - 1;
        for (i, slot) in buffer.iter_mut().enumerate() {
            let ack = !(nack_last && i == last);
            let code = self
                .receive_byte(ack)
                .map_err(|e| e.during(Phase::Receiving))?;
            let expected = if ack { MR_DATA_ACK } else { MR_DATA_NACK };
            if code != expected {
                return Err(Error::Status(code));
            }
            *slot = self.twi.data();
        }
        Ok(())
    }
}

impl<T: TwiRegisters, C: Millis> RegisterBus for TwiMaster<T, C> {
    type Error = Error;

    fn write_register(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), Error> {
        self.write(address, register, data)
    }

    fn read_register(&mut self, address: u8, register: u8, buf: &mut [u8]) -> Result<(), Error> {
        self.read(address, register, buf)
    }
}
