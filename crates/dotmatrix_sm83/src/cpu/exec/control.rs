//! Control transfer: jumps, calls, returns, restarts.

use crate::bus::Bus;
use crate::cpu::{Cpu, StepError};
use crate::instructions::Cond;
use crate::regs::Flag;

impl Cpu {
    fn condition_met(&self) -> bool {
        match self.current_instruction.cond {
            Cond::None => true,
            Cond::Z => self.flag(Flag::Z),
            Cond::Nz => !self.flag(Flag::Z),
            Cond::C => self.flag(Flag::C),
            Cond::Nc => !self.flag(Flag::C),
        }
    }

    /// Shared tail of JP/JR/CALL/RST: redirect PC if the condition holds.
    ///
    /// A taken branch costs one cycle; pushing the return address costs
    /// two more on top of the stack writes themselves.
    fn goto_addr<B: Bus>(&mut self, bus: &mut B, addr: u16, push_pc: bool) -> Result<(), StepError> {
        if !self.condition_met() {
            return Ok(());
        }

        if push_pc {
            self.tick(2);
            self.push16(bus, self.regs.pc)?;
        }
        self.regs.pc = addr;
        self.tick(1);
        Ok(())
    }

    pub(super) fn exec_jp<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        self.goto_addr(bus, self.fetched_data, false)
    }

    pub(super) fn exec_jr<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        // Displacement is signed, relative to the PC after the operand.
        let rel = self.fetched_data as u8 as i8;
        let addr = self.regs.pc.wrapping_add(rel as u16);
        self.goto_addr(bus, addr, false)
    }

    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        self.goto_addr(bus, self.fetched_data, true)
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        let target = self.current_instruction.param as u16;
        self.goto_addr(bus, target, true)
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        if self.current_instruction.cond != Cond::None {
            // Hardware spends a cycle evaluating the condition whether or
            // not the return is taken.
            self.tick(1);
        }

        if self.condition_met() {
            // Two 8-bit pops, each charged separately, for cycle accuracy.
            let lo = self.pop8(bus)? as u16;
            self.tick(1);
            let hi = self.pop8(bus)? as u16;
            self.tick(1);

            self.regs.pc = lo | (hi << 8);
            self.tick(1);
        }
        Ok(())
    }

    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        self.ime = true;
        self.exec_ret(bus)
    }
}
