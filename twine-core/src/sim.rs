//! Simulated TWI controller for host tests
//!
//! Models the master-mode status machine of the ATmega TWI peripheral with
//! one register-pointer slave on the bus, plus fault injection.

#![allow(dead_code)]

use core::cell::Cell;

use twine_hal::twi::bits::{READ_BIT, TWEA, TWEN, TWINT, TWPS_MASK, TWSTA, TWSTO};
use twine_hal::{Millis, TwiRegisters};

use crate::status::{
    LOST_ARBITRATION, MR_DATA_ACK, MR_DATA_NACK, MR_SLA_ACK, MR_SLA_NACK, MT_DATA_ACK,
    MT_DATA_NACK, MT_SLA_ACK, MT_SLA_NACK, NO_INFO, REPEATED_START, START,
};

/// Something that happened on the simulated bus or controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Start,
    RepeatedStart,
    Address(u8),
    Write(u8),
    Read { ack: bool },
    Stop,
    LockUp,
}

/// Slave with a 256-byte register file and an auto-incrementing pointer
pub struct EchoSlave {
    pub address: u8,
    pub registers: [u8; 256],
    pointer: u8,
    pointer_pending: bool,
}

impl EchoSlave {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            registers: [0; 256],
            pointer: 0,
            pointer_pending: false,
        }
    }

    fn addressed_for_write(&mut self) {
        self.pointer_pending = true;
    }

    fn receive(&mut self, byte: u8) {
        if self.pointer_pending {
            self.pointer = byte;
            self.pointer_pending = false;
        } else {
            self.registers[self.pointer as usize] = byte;
            self.pointer = self.pointer.wrapping_add(1);
        }
    }

    fn transmit(&mut self) -> u8 {
        let byte = self.registers[self.pointer as usize];
        self.pointer = self.pointer.wrapping_add(1);
        byte
    }
}

/// Result of a command, applied once the controller latency has passed
#[derive(Debug, Clone, Copy)]
enum Completion {
    /// Set TWINT with this status (and data register for reads)
    Event { status: u8, data: Option<u8> },
    /// Clear TWSTO
    StopSent,
}

pub struct SimTwi {
    control: u8,
    status: u8,
    data: u8,
    pub bit_rate: u8,
    pub pullups: bool,
    pub slave: Option<EchoSlave>,
    pub events: Vec<Event>,
    pub lockups: usize,
    /// Control register writes with TWINT set, in order
    pub commands: usize,
    /// Polls of the control register before a command completes
    pub latency: u32,
    /// Commands from this index on never complete
    pub hang_after: Option<usize>,
    /// Replace the status of the command with this index
    pub force_status: Option<(usize, u8)>,
    /// Slave NACKs the data byte with this index (0 = register pointer)
    pub nack_data_at: Option<usize>,
    /// Report ACK for bytes the master NACKed
    pub ack_instead_of_nack: bool,
    bus_owned: bool,
    data_bytes: usize,
    pending: Option<(Completion, u32)>,
    cleared: bool,
}

impl SimTwi {
    pub fn new() -> Self {
        Self {
            control: 0,
            status: NO_INFO,
            data: 0xFF,
            bit_rate: 0,
            pullups: false,
            slave: None,
            events: Vec::new(),
            lockups: 0,
            commands: 0,
            latency: 0,
            hang_after: None,
            force_status: None,
            nack_data_at: None,
            ack_instead_of_nack: false,
            bus_owned: false,
            data_bytes: 0,
            pending: None,
            cleared: false,
        }
    }

    pub fn with_slave(address: u8) -> Self {
        let mut sim = Self::new();
        sim.slave = Some(EchoSlave::new(address));
        sim
    }

    pub fn raw_control(&self) -> u8 {
        self.control
    }

    pub fn raw_status(&self) -> u8 {
        self.status
    }

    /// Bus events only, without recovery markers
    pub fn bus_events(&self) -> Vec<Event> {
        self.events
            .iter()
            .copied()
            .filter(|e| *e != Event::LockUp)
            .collect()
    }

    fn set_status_code(&mut self, code: u8) {
        self.status = (self.status & TWPS_MASK) | code;
    }

    fn execute(&mut self, value: u8) -> Completion {
        let code = self.status & !TWPS_MASK;

        if value & TWSTA != 0 {
            let status = if self.bus_owned {
                self.events.push(Event::RepeatedStart);
                REPEATED_START
            } else {
                self.events.push(Event::Start);
                START
            };
            self.bus_owned = true;
            return Completion::Event { status, data: None };
        }

        if value & TWSTO != 0 {
            self.events.push(Event::Stop);
            self.bus_owned = false;
            return Completion::StopSent;
        }

        match code {
            START | REPEATED_START => {
                let byte = self.data;
                self.events.push(Event::Address(byte));
                let read = byte & READ_BIT != 0;
                let acked = match self.slave.as_mut() {
                    Some(slave) if slave.address == byte >> 1 => {
                        if !read {
                            slave.addressed_for_write();
                        }
                        true
                    }
                    _ => false,
                };
                let status = match (read, acked) {
                    (false, true) => MT_SLA_ACK,
                    (false, false) => MT_SLA_NACK,
                    (true, true) => MR_SLA_ACK,
                    (true, false) => MR_SLA_NACK,
                };
                Completion::Event { status, data: None }
            }
            MT_SLA_ACK | MT_DATA_ACK => {
                let byte = self.data;
                self.events.push(Event::Write(byte));
                let index = self.data_bytes;
                self.data_bytes += 1;
                let status = if self.nack_data_at == Some(index) {
                    MT_DATA_NACK
                } else {
                    if let Some(slave) = self.slave.as_mut() {
                        slave.receive(byte);
                    }
                    MT_DATA_ACK
                };
                Completion::Event { status, data: None }
            }
            MR_SLA_ACK | MR_DATA_ACK => {
                let ack = value & TWEA != 0;
                self.events.push(Event::Read { ack });
                let byte = self.slave.as_mut().map(EchoSlave::transmit).unwrap_or(0xFF);
                let status = if ack || self.ack_instead_of_nack {
                    MR_DATA_ACK
                } else {
                    MR_DATA_NACK
                };
                Completion::Event {
                    status,
                    data: Some(byte),
                }
            }
            // Bus error: command issued in a state with nothing to continue
            _ => Completion::Event {
                status: 0x00,
                data: None,
            },
        }
    }

    fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Event { status, data } => {
                self.set_status_code(status);
                if let Some(byte) = data {
                    self.data = byte;
                }
                self.control |= TWINT;
            }
            Completion::StopSent => {
                self.set_status_code(NO_INFO);
                self.control &= !TWSTO;
            }
        }
    }
}

impl TwiRegisters for SimTwi {
    fn control(&mut self) -> u8 {
        self.cleared = false;
        if let Some((completion, remaining)) = self.pending {
            if remaining == 0 {
                self.pending = None;
                self.apply(completion);
            } else {
                self.pending = Some((completion, remaining - 1));
            }
        }
        self.control
    }

    fn set_control(&mut self, value: u8) {
        if value == 0 {
            self.control = 0;
            self.pending = None;
            self.bus_owned = false;
            self.set_status_code(NO_INFO);
            self.cleared = true;
            return;
        }
        if self.cleared && value == TWEN | TWEA {
            self.lockups += 1;
            self.events.push(Event::LockUp);
        }
        self.cleared = false;

        if value & TWINT == 0 {
            self.control = value;
            return;
        }

        let index = self.commands;
        self.commands += 1;
        self.control = value & !TWINT;

        if value & TWEN == 0 {
            return;
        }
        if self.hang_after.is_some_and(|n| index >= n) {
            return;
        }

        let mut completion = self.execute(value);
        if let Some((at, forced)) = self.force_status {
            if at == index {
                completion = Completion::Event {
                    status: forced,
                    data: None,
                };
                if forced == LOST_ARBITRATION {
                    self.bus_owned = false;
                }
            }
        }
        self.pending = Some((completion, self.latency));
    }

    fn status(&mut self) -> u8 {
        self.cleared = false;
        self.status
    }

    fn set_status(&mut self, value: u8) {
        self.cleared = false;
        self.status = (self.status & !TWPS_MASK) | (value & TWPS_MASK);
    }

    fn data(&mut self) -> u8 {
        self.cleared = false;
        self.data
    }

    fn set_data(&mut self, value: u8) {
        self.cleared = false;
        self.data = value;
    }

    fn set_bit_rate(&mut self, value: u8) {
        self.cleared = false;
        self.bit_rate = value;
    }

    fn enable_pullups(&mut self) {
        self.cleared = false;
        self.pullups = true;
    }
}

/// Clock that advances a fixed step on every read and counts reads
pub struct SimClock {
    now: Cell<u32>,
    step: u32,
    reads: Cell<u32>,
}

impl SimClock {
    pub fn new(start: u32, step: u32) -> Self {
        Self {
            now: Cell::new(start),
            step,
            reads: Cell::new(0),
        }
    }

    pub fn now(&self) -> u32 {
        self.now.get()
    }

    pub fn reads(&self) -> u32 {
        self.reads.get()
    }
}

impl Millis for SimClock {
    fn millis(&self) -> u32 {
        self.reads.set(self.reads.get() + 1);
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step));
        now
    }
}
