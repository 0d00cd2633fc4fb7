//! TWI bus controller abstraction
//!
//! The bus controller is a byte-wide shift register with a hardware state
//! machine behind it. Software requests one bus event at a time by writing
//! the control register with `TWINT` set, waits for the hardware to set
//! `TWINT` again, and then reads the status field to learn what happened.
//!
//! The bit layout in [`bits`] is the ATmega TWI layout. Implementations on
//! other chips must present their peripheral through the same contract.

/// Control and status register bits
pub mod bits {
    /// TWCR: interrupt flag, set by hardware when an event completes.
    /// Writing 1 clears it and starts the next event.
    pub const TWINT: u8 = 0x80;
    /// TWCR: enable acknowledge
    pub const TWEA: u8 = 0x40;
    /// TWCR: START condition request
    pub const TWSTA: u8 = 0x20;
    /// TWCR: STOP condition request, cleared by hardware once sent
    pub const TWSTO: u8 = 0x10;
    /// TWCR: write collision flag
    pub const TWWC: u8 = 0x08;
    /// TWCR: peripheral enable
    pub const TWEN: u8 = 0x04;
    /// TWCR: interrupt enable
    pub const TWIE: u8 = 0x01;

    /// TWSR: status field
    pub const TWS_MASK: u8 = 0xF8;
    /// TWSR: prescaler bit 1
    pub const TWPS1: u8 = 0x02;
    /// TWSR: prescaler bit 0
    pub const TWPS0: u8 = 0x01;
    /// TWSR: prescaler field
    pub const TWPS_MASK: u8 = TWPS1 | TWPS0;

    /// Address byte direction bit (SLA+R)
    pub const READ_BIT: u8 = 0x01;
}

/// Register-level access to a TWI bus controller
///
/// Every method maps to a single register access. The engine assumes it is
/// the only agent touching these registers.
pub trait TwiRegisters {
    /// Read the control register (TWCR)
    fn control(&mut self) -> u8;

    /// Write the control register (TWCR)
    fn set_control(&mut self, value: u8);

    /// Read the status register (TWSR), status and prescaler bits
    fn status(&mut self) -> u8;

    /// Write the status register (TWSR); only the prescaler bits are writable
    fn set_status(&mut self, value: u8);

    /// Read the data register (TWDR)
    fn data(&mut self) -> u8;

    /// Write the data register (TWDR)
    fn set_data(&mut self, value: u8);

    /// Write the bit rate register (TWBR)
    fn set_bit_rate(&mut self, value: u8);

    /// Enable the internal pull-ups on the SDA and SCL lines
    fn enable_pullups(&mut self);

    /// Read the masked status field
    fn status_code(&mut self) -> u8 {
        self.status() & bits::TWS_MASK
    }
}

/// Compute the bit rate register value for a bus frequency (prescaler 1)
///
/// SCL = F_CPU / (16 + 2 * TWBR)
pub const fn bit_rate(cpu_hz: u32, scl_hz: u32) -> u8 {
    let divider = cpu_hz / scl_hz;
    if divider <= 16 {
        return 0;
    }
    let value = (divider - 16) / 2;
    if value > u8::MAX as u32 {
        u8::MAX
    } else {
        value as u8
    }
}
