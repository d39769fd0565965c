//! INC and DEC, register and memory forms.
//!
//! Only the 8-bit forms touch flags. The 16-bit forms are the opcodes
//! whose low two bits are set (0x03/0x13/... and 0x0B/0x1B/...), and the
//! check is made on the opcode to mirror that grouping; carry is never
//! affected either way.

use crate::bus::Bus;
use crate::cpu::{Cpu, StepError};
use crate::instructions::AddrMode;

impl Cpu {
    pub(super) fn exec_inc<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        let r1 = self.r1();
        if r1.is_16bit() {
            self.tick(1);
        }

        let result: u16;
        if self.current_instruction.mode == AddrMode::Mem {
            // INC (HL): read-modify-write through the bus.
            let addr = self.memory_destination;
            let value = self.bus_read(bus, addr)?.wrapping_add(1);
            self.bus_write(bus, addr, value)?;
            result = value as u16;
        } else {
            let value = self.read_reg(r1).wrapping_add(1);
            self.set_reg(r1, value);
            result = self.read_reg(r1);
        }

        if self.current_opcode & 0x03 == 0x03 {
            return Ok(());
        }

        self.set_flags(
            Some(result == 0),
            Some(false),
            Some(result & 0x0F == 0),
            None,
        );
        Ok(())
    }

    pub(super) fn exec_dec<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        let r1 = self.r1();
        if r1.is_16bit() {
            self.tick(1);
        }

        let result: u16;
        if self.current_instruction.mode == AddrMode::Mem {
            let addr = self.memory_destination;
            let value = self.bus_read(bus, addr)?.wrapping_sub(1);
            self.bus_write(bus, addr, value)?;
            result = value as u16;
        } else {
            let value = self.read_reg(r1).wrapping_sub(1);
            self.set_reg(r1, value);
            result = self.read_reg(r1);
        }

        if self.current_opcode & 0x03 == 0x03 {
            return Ok(());
        }

        self.set_flags(
            Some(result == 0),
            Some(true),
            Some(result & 0x0F == 0x0F),
            None,
        );
        Ok(())
    }
}
