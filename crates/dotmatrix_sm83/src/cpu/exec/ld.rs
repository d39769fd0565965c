//! Data movement: LD in all its addressing modes, plus the LDH
//! I/O-page shorthand forms.

use crate::bus::Bus;
use crate::cpu::{Cpu, StepError};
use crate::instructions::AddrMode;
use crate::regs::Reg;

impl Cpu {
    pub(super) fn exec_ld<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        if self.destination_is_memory {
            // e.g. LD (BC), A or LD (a16), SP.
            let wide_source = self.current_instruction.r2.is_some_and(Reg::is_16bit);
            if wide_source {
                self.tick(1);
                self.bus_write16(bus, self.memory_destination, self.fetched_data)?;
            } else {
                self.bus_write(bus, self.memory_destination, self.fetched_data as u8)?;
            }
            self.tick(1);
            return Ok(());
        }

        if self.current_instruction.mode == AddrMode::SpRel {
            // LD HL, SP+e8: flags come from the low-byte addition.
            let base = self.read_reg(self.r2());
            let offset = self.fetched_data;
            let h = (base & 0x0F) + (offset & 0x0F) >= 0x10;
            let c = (base & 0xFF) + (offset & 0xFF) >= 0x100;
            self.set_flags(Some(false), Some(false), Some(h), Some(c));

            let target = base.wrapping_add(offset as u8 as i8 as u16);
            self.set_reg(self.r1(), target);
            return Ok(());
        }

        self.set_reg(self.r1(), self.fetched_data);
        Ok(())
    }

    /// LDH always moves through A: either A <- (0xFF00+a8) or
    /// (0xFF00+a8) <- A. The resolver has already folded the page bits
    /// into the address.
    pub(super) fn exec_ldh<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        if self.current_instruction.r1 == Some(Reg::A) {
            let value = self.bus_read(bus, self.fetched_data)?;
            self.regs.a = value;
        } else {
            let a = self.regs.a;
            self.bus_write(bus, self.memory_destination, a)?;
        }
        self.tick(1);
        Ok(())
    }
}
