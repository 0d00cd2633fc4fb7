//! `embedded-hal` 1.0 blocking I2C on top of the phase primitives

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
use twine_hal::{Millis, TwiRegisters};

use super::TwiMaster;
use crate::error::{Error, Phase};
use crate::status::Direction;

impl<T: TwiRegisters, C: Millis> ErrorType for TwiMaster<T, C> {
    type Error = Error;
}

impl<T: TwiRegisters, C: Millis> I2c<SevenBitAddress> for TwiMaster<T, C> {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut current: Option<Direction> = None;

        for index in 0..operations.len() {
            let direction = match operations[index] {
                Operation::Write(_) => Direction::Write,
                Operation::Read(_) => Direction::Read,
            };

            // Adjacent operations of the same kind share one address phase
            if current != Some(direction) {
                let start_phase = match current {
                    None => Phase::Start,
                    Some(_) => Phase::RepeatedStart,
                };
                let address_phase = match direction {
                    Direction::Write => Phase::AddressingToTransmit,
                    Direction::Read => Phase::AddressingToReceive,
                };
                self.start().map_err(|e| e.during(start_phase))?;
                self.send_address(address, direction)
                    .map_err(|e| e.during(address_phase))?;
                current = Some(direction);
            }

            let read_follows = matches!(operations.get(index + 1), Some(Operation::Read(_)));
            match &mut operations[index] {
                Operation::Write(bytes) => {
                    for &byte in bytes.iter() {
                        self.send_byte(byte)
                            .map_err(|e| e.during(Phase::Transmitting))?;
                    }
                }
                Operation::Read(buffer) => self.receive_into(buffer, !read_follows)?,
            }
        }

        if current.is_some() {
            self.stop().map_err(|e| e.during(Phase::StopBit))?;
        }
        Ok(())
    }
}
