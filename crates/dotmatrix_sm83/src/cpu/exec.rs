//! Instruction dispatch.
//!
//! One arm per instruction kind; the match is exhaustive, so adding a
//! kind without a handler fails to compile instead of faulting at run
//! time the way a sparse function-pointer table would.

mod alu;
mod cb;
mod control;
mod incdec;
mod ld;
mod stack;

use crate::bus::Bus;
use crate::cpu::{Cpu, StepError};
use crate::instructions::InstrKind;

impl Cpu {
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        match self.kind() {
            InstrKind::Nop => Ok(()),

            InstrKind::Ld => self.exec_ld(bus),
            InstrKind::Ldh => self.exec_ldh(bus),

            InstrKind::Jp => self.exec_jp(bus),
            InstrKind::Jr => self.exec_jr(bus),
            InstrKind::Call => self.exec_call(bus),
            InstrKind::Rst => self.exec_rst(bus),
            InstrKind::Ret => self.exec_ret(bus),
            InstrKind::Reti => self.exec_reti(bus),

            InstrKind::Di => {
                self.ime = false;
                Ok(())
            }
            InstrKind::Halt => {
                self.halted = true;
                Ok(())
            }

            InstrKind::Pop => self.exec_pop(bus),
            InstrKind::Push => self.exec_push(bus),

            InstrKind::Add => {
                self.exec_add();
                Ok(())
            }
            InstrKind::Adc => {
                self.exec_adc();
                Ok(())
            }
            InstrKind::Sub => {
                self.exec_sub();
                Ok(())
            }
            InstrKind::Sbc => {
                self.exec_sbc();
                Ok(())
            }
            InstrKind::Inc => self.exec_inc(bus),
            InstrKind::Dec => self.exec_dec(bus),

            InstrKind::And => {
                self.exec_and();
                Ok(())
            }
            InstrKind::Or => {
                self.exec_or();
                Ok(())
            }
            InstrKind::Xor => {
                self.exec_xor();
                Ok(())
            }
            InstrKind::Cp => {
                self.exec_cp();
                Ok(())
            }

            InstrKind::Rlca => {
                self.exec_rlca();
                Ok(())
            }
            InstrKind::Rrca => {
                self.exec_rrca();
                Ok(())
            }
            InstrKind::Rla => {
                self.exec_rla();
                Ok(())
            }
            InstrKind::Rra => {
                self.exec_rra();
                Ok(())
            }
            InstrKind::Daa => {
                self.exec_daa();
                Ok(())
            }
            InstrKind::Cpl => {
                self.exec_cpl();
                Ok(())
            }
            InstrKind::Scf => {
                self.set_flags(None, Some(false), Some(false), Some(true));
                Ok(())
            }
            InstrKind::Ccf => {
                let carry = self.flag(crate::regs::Flag::C);
                self.set_flags(None, Some(false), Some(false), Some(!carry));
                Ok(())
            }

            InstrKind::CbPrefix => self.exec_cb(bus),
        }
    }
}
