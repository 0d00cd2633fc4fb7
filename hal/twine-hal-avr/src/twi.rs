//! Memory-mapped TWI registers

use twine_hal::TwiRegisters;

/// Data-space addresses of the TWI registers and the bus pull-up pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterMap {
    /// TWI bit rate register
    pub twbr: usize,
    /// TWI status register
    pub twsr: usize,
    /// TWI data register
    pub twdr: usize,
    /// TWI control register
    pub twcr: usize,
    /// PORT register of the bus pins
    pub port: usize,
    /// PORT bit of SDA
    pub sda_bit: u8,
    /// PORT bit of SCL
    pub scl_bit: u8,
}

/// ATmega328P/168/8: SDA on PC4, SCL on PC5
pub const ATMEGA328P: RegisterMap = RegisterMap {
    twbr: 0xB8,
    twsr: 0xB9,
    twdr: 0xBB,
    twcr: 0xBC,
    port: 0x28, // PORTC
    sda_bit: 4,
    scl_bit: 5,
};

/// ATmega128/1280/2560: SCL on PD0, SDA on PD1
pub const ATMEGA128: RegisterMap = RegisterMap {
    twbr: 0xB8,
    twsr: 0xB9,
    twdr: 0xBB,
    twcr: 0xBC,
    port: 0x2B, // PORTD
    sda_bit: 1,
    scl_bit: 0,
};

/// TWI peripheral accessed through volatile loads and stores
pub struct AvrTwi {
    /// Data-space address of offset 0
    base: usize,
    map: RegisterMap,
}

impl AvrTwi {
    /// Access the on-chip TWI peripheral
    ///
    /// # Safety
    ///
    /// Must run on the chip `map` describes, and the caller must be the
    /// only owner of the TWI registers and the pull-up PORT bits.
    pub unsafe fn new(map: RegisterMap) -> Self {
        Self { base: 0, map }
    }

    /// Access a register file relocated to `base`
    ///
    /// # Safety
    ///
    /// `base` must be valid for volatile reads and writes at every offset
    /// in `map` for the lifetime of the returned value.
    pub unsafe fn with_base(base: *mut u8, map: RegisterMap) -> Self {
        Self {
            base: base as usize,
            map,
        }
    }

    /// The register map in use
    pub fn map(&self) -> &RegisterMap {
        &self.map
    }

    /// Pointer to a register, built from its integer address
    fn register(&self, address: usize) -> *mut u8 {
        self.base.wrapping_add(address) as *mut u8
    }

    fn read(&self, address: usize) -> u8 {
        // SAFETY: guaranteed by the constructor contracts
        unsafe { core::ptr::read_volatile(self.register(address)) }
    }

    fn write(&mut self, address: usize, value: u8) {
        // SAFETY: guaranteed by the constructor contracts
        unsafe { core::ptr::write_volatile(self.register(address), value) }
    }
}

impl TwiRegisters for AvrTwi {
    fn control(&mut self) -> u8 {
        self.read(self.map.twcr)
    }

    fn set_control(&mut self, value: u8) {
        self.write(self.map.twcr, value);
    }

    fn status(&mut self) -> u8 {
        self.read(self.map.twsr)
    }

    fn set_status(&mut self, value: u8) {
        self.write(self.map.twsr, value);
    }

    fn data(&mut self) -> u8 {
        self.read(self.map.twdr)
    }

    fn set_data(&mut self, value: u8) {
        self.write(self.map.twdr, value);
    }

    fn set_bit_rate(&mut self, value: u8) {
        self.write(self.map.twbr, value);
    }

    fn enable_pullups(&mut self) {
        let port = self.read(self.map.port);
        let mask = (1 << self.map.sda_bit) | (1 << self.map.scl_bit);
        self.write(self.map.port, port | mask);
    }
}
