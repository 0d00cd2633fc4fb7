//! TWI status codes and their classification
//!
//! After every bus event the controller reports a status code in the upper
//! five bits of TWSR. The engine never invents codes; it only sorts the
//! hardware vocabulary into the categories the phase primitives branch on.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// START condition transmitted
pub const START: u8 = 0x08;
/// Repeated START condition transmitted
pub const REPEATED_START: u8 = 0x10;
/// SLA+W transmitted, ACK received
pub const MT_SLA_ACK: u8 = 0x18;
/// SLA+W transmitted, NACK received
pub const MT_SLA_NACK: u8 = 0x20;
/// Data byte transmitted, ACK received
pub const MT_DATA_ACK: u8 = 0x28;
/// Data byte transmitted, NACK received
pub const MT_DATA_NACK: u8 = 0x30;
/// Arbitration lost in SLA+R/W or data
pub const LOST_ARBITRATION: u8 = 0x38;
/// SLA+R transmitted, ACK received
pub const MR_SLA_ACK: u8 = 0x40;
/// SLA+R transmitted, NACK received
pub const MR_SLA_NACK: u8 = 0x48;
/// Data byte received, ACK returned
pub const MR_DATA_ACK: u8 = 0x50;
/// Data byte received, NACK returned
pub const MR_DATA_NACK: u8 = 0x58;
/// No relevant state information (TWINT not set)
pub const NO_INFO: u8 = 0xF8;

/// Transfer direction seen from the master
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Master transmitter
    Write,
    /// Master receiver
    Read,
}

impl Direction {
    /// Address byte for a 7-bit address in this direction (SLA+W / SLA+R)
    pub const fn address_byte(self, address: u8) -> u8 {
        match self {
            Direction::Write => address << 1,
            Direction::Read => (address << 1) | twine_hal::twi::bits::READ_BIT,
        }
    }
}

/// Category of a hardware status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusClass {
    /// START sent
    Start,
    /// Repeated START sent
    RepeatedStart,
    /// Another master won the bus
    ArbitrationLost,
    /// Slave acknowledged its address
    AddressAck(Direction),
    /// Slave did not acknowledge its address
    AddressNack(Direction),
    /// Data byte moved and acknowledged
    DataAck(Direction),
    /// Data byte moved and not acknowledged
    DataNack(Direction),
    /// Anything outside the master-mode vocabulary
    Other,
}

/// Master-mode status vocabulary
pub static STATUS_TABLE: [(u8, StatusClass); 11] = [
    (START, StatusClass::Start),
    (REPEATED_START, StatusClass::RepeatedStart),
    (MT_SLA_ACK, StatusClass::AddressAck(Direction::Write)),
    (MT_SLA_NACK, StatusClass::AddressNack(Direction::Write)),
    (MT_DATA_ACK, StatusClass::DataAck(Direction::Write)),
    (MT_DATA_NACK, StatusClass::DataNack(Direction::Write)),
    (LOST_ARBITRATION, StatusClass::ArbitrationLost),
    (MR_SLA_ACK, StatusClass::AddressAck(Direction::Read)),
    (MR_SLA_NACK, StatusClass::AddressNack(Direction::Read)),
    (MR_DATA_ACK, StatusClass::DataAck(Direction::Read)),
    (MR_DATA_NACK, StatusClass::DataNack(Direction::Read)),
];

/// Classify a masked status code
pub fn classify(code: u8) -> StatusClass {
    STATUS_TABLE
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, class)| *class)
        .unwrap_or(StatusClass::Other)
}
