//! Phase primitives
//!
//! Each primitive requests one bus event, waits for the controller to
//! finish it and checks the resulting status against the status table.
//! Waits are bounded by the configured timeout; a timeout resets the
//! controller and yields the generic sentinel.

use twine_hal::twi::bits::{TWEA, TWEN, TWINT, TWSTA, TWSTO};
use twine_hal::{Millis, TwiRegisters};

use super::TwiMaster;
use crate::error::PhaseError;
use crate::status::{classify, Direction, StatusClass};
use crate::wait::Deadline;

/// What marks a requested bus event as finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Completion {
    /// Hardware sets TWINT
    Interrupt,
    /// Hardware clears TWSTO; a STOP has no status to report
    StopSent,
}

impl<T: TwiRegisters, C: Millis> TwiMaster<T, C> {
    /// Write `control` and spin until the event completes or times out
    fn issue(&mut self, control: u8, completion: Completion) -> Result<(), PhaseError> {
        let deadline = Deadline::start(&self.clock, self.config.timeout_ms);
        self.twi.set_control(control);

        loop {
            let current = self.twi.control();
            let done = match completion {
                Completion::Interrupt => current & TWINT != 0,
                Completion::StopSent => current & TWSTO == 0,
            };
            if done {
                return Ok(());
            }
            if let Some(deadline) = &deadline {
                if deadline.expired(&self.clock) {
                    warn!("twi: timeout after {} ms", self.config.timeout_ms);
                    self.lock_up();
                    return Err(PhaseError::Timeout);
                }
            }
            core::hint::spin_loop();
        }
    }

    /// Send a START (or repeated START while the bus is held)
    pub(super) fn start(&mut self) -> Result<(), PhaseError> {
        if self.twi.control() & TWEN == 0 {
            let code = self.twi.status_code();
            debug!("twi: disabled, refusing START ({=u8:#x})", code);
            return Err(PhaseError::Status(code));
        }
        trace!("twi: START");
        self.issue(TWINT | TWSTA | TWEN, Completion::Interrupt)?;

        let code = self.twi.status_code();
        match classify(code) {
            StatusClass::Start | StatusClass::RepeatedStart => Ok(()),
            StatusClass::ArbitrationLost => {
                self.lock_up();
                Err(PhaseError::Status(code))
            }
            _ => Err(PhaseError::Status(code)),
        }
    }

    /// Send SLA+W or SLA+R
    ///
    /// A NACK releases the bus with a STOP; anything unexpected resets the
    /// controller.
    pub(super) fn send_address(
        &mut self,
        address: u8,
        direction: Direction,
    ) -> Result<(), PhaseError> {
        let byte = direction.address_byte(address);
        trace!("twi: SLA {=u8:#x}", byte);
        self.twi.set_data(byte);
        self.issue(TWINT | TWEN, Completion::Interrupt)?;

        let code = self.twi.status_code();
        match classify(code) {
            StatusClass::AddressAck(acked) if acked == direction => Ok(()),
            StatusClass::AddressNack(_) => {
                self.release_after_nack();
                Err(PhaseError::Status(code))
            }
            _ => {
                self.lock_up();
                Err(PhaseError::Status(code))
            }
        }
    }

    /// Send one data byte
    pub(super) fn send_byte(&mut self, byte: u8) -> Result<(), PhaseError> {
        self.twi.set_data(byte);
        self.issue(TWINT | TWEN, Completion::Interrupt)?;

        let code = self.twi.status_code();
        match classify(code) {
            StatusClass::DataAck(Direction::Write) => Ok(()),
            StatusClass::DataNack(Direction::Write) => {
                self.release_after_nack();
                Err(PhaseError::Status(code))
            }
            _ => {
                self.lock_up();
                Err(PhaseError::Status(code))
            }
        }
    }

    /// Clock in one byte, answering with ACK or NACK
    ///
    /// Returns the raw status; the caller checks it against the acknowledge
    /// it asked for. The byte itself is left in the data register.
    pub(super) fn receive_byte(&mut self, ack: bool) -> Result<u8, PhaseError> {
        let control = if ack {
            TWINT | TWEN | TWEA
        } else {
            TWINT | TWEN
        };
        self.issue(control, Completion::Interrupt)?;

        let code = self.twi.status_code();
        if classify(code) == StatusClass::ArbitrationLost {
            self.lock_up();
            return Err(PhaseError::Status(code));
        }
        Ok(code)
    }

    /// Send a STOP and wait until it is on the bus
    pub(super) fn stop(&mut self) -> Result<(), PhaseError> {
        trace!("twi: STOP");
        self.issue(TWINT | TWEN | TWSTO, Completion::StopSent)
    }

    /// STOP after a slave NACK; a STOP timeout has already reset the bus
    fn release_after_nack(&mut self) {
        if self.stop().is_err() {
            debug!("twi: STOP after NACK timed out");
        }
    }
}
