//! Addressing-mode resolver.
//!
//! Runs between decode and execute: consumes operand bytes from the
//! instruction stream, reads source registers or memory, and records
//! whether the instruction's destination is a memory address. Each
//! operand-byte bus access charges one cycle.

use crate::bus::Bus;
use crate::cpu::{Cpu, StepError};
use crate::instructions::AddrMode;
use crate::regs::Reg;

impl Cpu {
    pub(super) fn fetch_data<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        self.memory_destination = 0;
        self.destination_is_memory = false;

        match self.current_instruction.mode {
            AddrMode::Implied => {}

            AddrMode::Reg => {
                self.fetched_data = self.read_reg(self.r1());
            }

            AddrMode::RegReg => {
                self.fetched_data = self.read_reg(self.r2());
            }

            AddrMode::RegImm8 | AddrMode::Imm8 => {
                self.fetched_data = self.fetch_imm8(bus)? as u16;
            }

            AddrMode::RegImm16 | AddrMode::Imm16 => {
                self.fetched_data = self.fetch_imm16(bus)?;
            }

            AddrMode::MemReg => {
                self.fetched_data = self.read_reg(self.r2());
                self.memory_destination = self.io_page_address(self.r1());
                self.destination_is_memory = true;
            }

            AddrMode::RegMem => {
                let addr = self.io_page_address(self.r2());
                self.fetched_data = self.bus_read(bus, addr)? as u16;
                self.tick(1);
            }

            AddrMode::RegMemInc | AddrMode::RegMemDec => {
                let hl = self.regs.read16(Reg::HL);
                self.fetched_data = self.bus_read(bus, hl)? as u16;
                self.tick(1);
                // The pointer moves after the access it accompanies.
                let next = if self.current_instruction.mode == AddrMode::RegMemInc {
                    hl.wrapping_add(1)
                } else {
                    hl.wrapping_sub(1)
                };
                self.regs.write16(Reg::HL, next);
            }

            AddrMode::MemIncReg | AddrMode::MemDecReg => {
                self.fetched_data = self.read_reg(self.r2());
                let hl = self.regs.read16(Reg::HL);
                self.memory_destination = hl;
                self.destination_is_memory = true;
                let next = if self.current_instruction.mode == AddrMode::MemIncReg {
                    hl.wrapping_add(1)
                } else {
                    hl.wrapping_sub(1)
                };
                self.regs.write16(Reg::HL, next);
            }

            AddrMode::RegHigh => {
                // The operand byte is the low half of an I/O-page address.
                self.fetched_data = 0xFF00 | self.fetch_imm8(bus)? as u16;
            }

            AddrMode::HighReg => {
                self.memory_destination = 0xFF00 | self.fetch_imm8(bus)? as u16;
                self.destination_is_memory = true;
            }

            AddrMode::SpRel => {
                self.fetched_data = self.fetch_imm8(bus)? as u16;
            }

            AddrMode::MemImmReg => {
                self.memory_destination = self.fetch_imm16(bus)?;
                self.destination_is_memory = true;
                self.fetched_data = self.read_reg(self.r2());
            }

            AddrMode::RegMemImm => {
                let addr = self.fetch_imm16(bus)?;
                self.fetched_data = self.bus_read(bus, addr)? as u16;
                self.tick(1);
            }

            AddrMode::MemImm8 => {
                self.fetched_data = self.fetch_imm8(bus)? as u16;
                self.memory_destination = self.read_reg(self.r1());
                self.destination_is_memory = true;
            }

            AddrMode::Mem => {
                let addr = self.read_reg(self.r1());
                self.memory_destination = addr;
                self.destination_is_memory = true;
                self.fetched_data = self.bus_read(bus, addr)? as u16;
                self.tick(1);
            }
        }
        Ok(())
    }

    /// One immediate byte from the instruction stream.
    fn fetch_imm8<B: Bus>(&mut self, bus: &mut B) -> Result<u8, StepError> {
        let value = self.bus_read(bus, self.regs.pc)?;
        self.tick(1);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Ok(value)
    }

    /// A 16-bit immediate, low byte first.
    fn fetch_imm16<B: Bus>(&mut self, bus: &mut B) -> Result<u16, StepError> {
        let lo = self.fetch_imm8(bus)? as u16;
        let hi = self.fetch_imm8(bus)? as u16;
        Ok(lo | (hi << 8))
    }

    /// Effective address for `(register)` operands. The C register is
    /// shorthand for the I/O page: the address is `0xFF00 | C`.
    fn io_page_address(&self, reg: Reg) -> u16 {
        let addr = self.read_reg(reg);
        if reg == Reg::C {
            0xFF00 | addr
        } else {
            addr
        }
    }
}
