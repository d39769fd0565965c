//! PUSH and POP instruction handlers.

use crate::bus::Bus;
use crate::cpu::{Cpu, StepError};

impl Cpu {
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        let value = self.pop16(bus)?;
        self.tick(2);

        // POP AF drops the low nibble of F via the register file's mask.
        self.set_reg(self.r1(), value);
        Ok(())
    }

    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        let value = self.read_reg(self.r1());

        self.tick(1);
        self.push8(bus, (value >> 8) as u8)?;
        self.tick(1);
        self.push8(bus, value as u8)?;
        self.tick(1);
        Ok(())
    }
}
