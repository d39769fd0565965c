//! Arithmetic and logic on the accumulator and register pairs.
//!
//! Flag conventions:
//! - additions clear N, half carry is carry out of bit 3 (bit 11 for the
//!   16-bit forms), carry is carry out of bit 7 (bit 15);
//! - subtractions set N, half carry and carry are borrows;
//! - ADD HL,rr leaves Z untouched, ADD SP,e8 forces Z clear and takes
//!   half carry/carry from the low byte only.

use crate::cpu::Cpu;
use crate::regs::{Flag, Reg};

impl Cpu {
    pub(super) fn exec_add(&mut self) {
        let r1 = self.r1();
        let reg_val = self.read_reg(r1);
        let operand = self.fetched_data;
        let is_16bit = r1.is_16bit();

        if is_16bit {
            // Internal delay for the 16-bit adder.
            self.tick(1);
        }

        let sum: u32 = if r1 == Reg::SP {
            (reg_val as i32 + (operand as u8 as i8) as i32) as u32
        } else {
            reg_val as u32 + operand as u32
        };

        let (z, h, c) = if r1 == Reg::SP {
            (
                Some(false),
                Some((reg_val & 0x0F) + (operand & 0x0F) >= 0x10),
                Some((reg_val & 0xFF) + (operand & 0xFF) >= 0x100),
            )
        } else if is_16bit {
            (
                None,
                Some((reg_val & 0x0FFF) + (operand & 0x0FFF) >= 0x1000),
                Some(reg_val as u32 + operand as u32 >= 0x1_0000),
            )
        } else {
            (
                Some(sum & 0xFF == 0),
                Some((reg_val & 0x0F) + (operand & 0x0F) >= 0x10),
                Some((reg_val & 0xFF) + (operand & 0xFF) >= 0x100),
            )
        };

        self.set_reg(r1, sum as u16);
        self.set_flags(z, Some(false), h, c);
    }

    pub(super) fn exec_adc(&mut self) {
        let operand = self.fetched_data & 0xFF;
        let a = self.regs.a as u16;
        let carry = self.flag(Flag::C) as u16;

        let sum = a + operand + carry;
        self.regs.a = sum as u8;
        self.set_flags(
            Some(self.regs.a == 0),
            Some(false),
            Some((a & 0x0F) + (operand & 0x0F) + carry > 0x0F),
            Some(sum > 0xFF),
        );
    }

    pub(super) fn exec_sub(&mut self) {
        let r1 = self.r1();
        let reg_val = self.read_reg(r1);
        let operand = self.fetched_data;

        let result = reg_val.wrapping_sub(operand);
        let z = result == 0;
        let h = (reg_val as i32 & 0x0F) - (operand as i32 & 0x0F) < 0;
        let c = (reg_val as i32) - (operand as i32) < 0;

        self.set_reg(r1, result);
        self.set_flags(Some(z), Some(true), Some(h), Some(c));
    }

    pub(super) fn exec_sbc(&mut self) {
        let r1 = self.r1();
        let reg_val = self.read_reg(r1);
        let operand = self.fetched_data;
        let carry = self.flag(Flag::C) as u16;

        let taken = operand.wrapping_add(carry) & 0xFF;
        let result = reg_val.wrapping_sub(taken);
        let z = result == 0;
        let h = (reg_val as i32 & 0x0F) - (operand as i32 & 0x0F) - (carry as i32) < 0;
        let c = (reg_val as i32) - (operand as i32) - (carry as i32) < 0;

        self.set_reg(r1, result);
        self.set_flags(Some(z), Some(true), Some(h), Some(c));
    }

    pub(super) fn exec_and(&mut self) {
        self.regs.a &= self.fetched_data as u8;
        let z = self.regs.a == 0;
        self.set_flags(Some(z), Some(false), Some(true), Some(false));
    }

    pub(super) fn exec_or(&mut self) {
        self.regs.a |= self.fetched_data as u8;
        let z = self.regs.a == 0;
        self.set_flags(Some(z), Some(false), Some(false), Some(false));
    }

    pub(super) fn exec_xor(&mut self) {
        self.regs.a ^= self.fetched_data as u8;
        let z = self.regs.a == 0;
        self.set_flags(Some(z), Some(false), Some(false), Some(false));
    }

    /// Same computation as SUB, result discarded.
    pub(super) fn exec_cp(&mut self) {
        let a = self.regs.a as i32;
        let operand = self.fetched_data as i32;
        let diff = a - operand;
        self.set_flags(
            Some(diff == 0),
            Some(true),
            Some((a & 0x0F) - (operand & 0x0F) < 0),
            Some(diff < 0),
        );
    }

    // Unprefixed accumulator rotates. Unlike their CB-prefixed cousins
    // these always clear Z.

    pub(super) fn exec_rlca(&mut self) {
        let a = self.regs.a;
        self.regs.a = a.rotate_left(1);
        self.set_flags(
            Some(false),
            Some(false),
            Some(false),
            Some(a & 0x80 != 0),
        );
    }

    pub(super) fn exec_rrca(&mut self) {
        let a = self.regs.a;
        self.regs.a = a.rotate_right(1);
        self.set_flags(Some(false), Some(false), Some(false), Some(a & 0x01 != 0));
    }

    pub(super) fn exec_rla(&mut self) {
        let a = self.regs.a;
        let carry_in = self.flag(Flag::C) as u8;
        self.regs.a = (a << 1) | carry_in;
        self.set_flags(
            Some(false),
            Some(false),
            Some(false),
            Some(a & 0x80 != 0),
        );
    }

    pub(super) fn exec_rra(&mut self) {
        let a = self.regs.a;
        let carry_in = (self.flag(Flag::C) as u8) << 7;
        self.regs.a = (a >> 1) | carry_in;
        self.set_flags(Some(false), Some(false), Some(false), Some(a & 0x01 != 0));
    }

    /// Decimal adjust after BCD addition/subtraction. N is preserved.
    pub(super) fn exec_daa(&mut self) {
        let mut adjust: u8 = if self.flag(Flag::C) { 0x60 } else { 0 };
        if self.flag(Flag::H) {
            adjust |= 0x06;
        }

        let mut a = self.regs.a;
        if !self.flag(Flag::N) {
            if a & 0x0F > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.regs.a = a;
        self.set_flags(Some(a == 0), None, Some(false), Some(adjust >= 0x60));
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.a = !self.regs.a;
        self.set_flags(None, Some(true), Some(true), None);
    }
}
