//! Transfer errors
//!
//! A failed transfer reports either which phase timed out or the exact
//! hardware status code that ended it. Codes are never rewritten, so a
//! higher layer can always log what the controller actually said.

use core::fmt;

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

use crate::status::{classify, StatusClass};

/// Generic timeout sentinel, also reported for a timed-out START
pub const TIMEOUT: u8 = 1;
/// Timed out waiting for ACK/NACK while addressing the slave for writing
pub const TIMEOUT_ADDRESSING_TO_TRANSMIT: u8 = 2;
/// Timed out waiting for ACK/NACK while sending data
pub const TIMEOUT_TRANSMITTING: u8 = 3;
/// Timed out waiting for a repeated START
pub const TIMEOUT_REPEATED_START: u8 = 4;
/// Timed out waiting for ACK/NACK while addressing the slave for reading
pub const TIMEOUT_ADDRESSING_TO_RECEIVE: u8 = 5;
/// Timed out waiting for a data byte from the slave
pub const TIMEOUT_RECEIVING: u8 = 6;
/// Timed out waiting for the STOP condition to go out
pub const TIMEOUT_STOP_BIT: u8 = 7;

/// Transaction phase, used to qualify timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Initial START
    Start,
    /// SLA+W
    AddressingToTransmit,
    /// Register pointer or payload byte
    Transmitting,
    /// Repeated START before the read
    RepeatedStart,
    /// SLA+R
    AddressingToReceive,
    /// Payload byte from the slave
    Receiving,
    /// Final STOP
    StopBit,
}

impl Phase {
    /// Status code reported when this phase times out
    pub const fn timeout_code(self) -> u8 {
        match self {
            Phase::Start => TIMEOUT,
            Phase::AddressingToTransmit => TIMEOUT_ADDRESSING_TO_TRANSMIT,
            Phase::Transmitting => TIMEOUT_TRANSMITTING,
            Phase::RepeatedStart => TIMEOUT_REPEATED_START,
            Phase::AddressingToReceive => TIMEOUT_ADDRESSING_TO_RECEIVE,
            Phase::Receiving => TIMEOUT_RECEIVING,
            Phase::StopBit => TIMEOUT_STOP_BIT,
        }
    }
}

/// Error from a `write`/`read` transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The completion flag never came within the configured timeout
    Timeout(Phase),
    /// The controller reported this status code
    Status(u8),
}

impl Error {
    /// Single-byte status as seen by C-style callers (never 0)
    pub const fn code(&self) -> u8 {
        match self {
            Error::Timeout(phase) => phase.timeout_code(),
            Error::Status(code) => *code,
        }
    }

    /// Whether this error is a timeout in any phase
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout(_))
    }
}

/// Fold a transaction result into its status byte: 0 on success
pub fn status_code(result: &Result<(), Error>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => e.code(),
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Timeout(phase) => write!(f, "timeout during {:?}", phase),
            Error::Status(code) => write!(f, "bus status {:#04x}", code),
        }
    }
}

impl embedded_hal::i2c::Error for Error {
    fn kind(&self) -> ErrorKind {
        match self {
            Error::Timeout(_) => ErrorKind::Other,
            Error::Status(0x00) => ErrorKind::Bus,
            Error::Status(code) => match classify(*code) {
                StatusClass::AddressNack(_) => {
                    ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
                }
                StatusClass::DataNack(_) => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data),
                StatusClass::ArbitrationLost => ErrorKind::ArbitrationLoss,
                _ => ErrorKind::Other,
            },
        }
    }
}

/// Outcome of a single phase primitive before it is given phase context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PhaseError {
    /// Generic timeout sentinel
    Timeout,
    /// Hardware status, passed through untouched
    Status(u8),
}

impl PhaseError {
    /// Attach the phase the error happened in
    pub(crate) fn during(self, phase: Phase) -> Error {
        match self {
            PhaseError::Timeout => Error::Timeout(phase),
            PhaseError::Status(code) => Error::Status(code),
        }
    }
}
