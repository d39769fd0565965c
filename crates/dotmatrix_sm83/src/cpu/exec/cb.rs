//! CB-prefixed instructions: rotates, shifts, swap, and single-bit
//! test/clear/set.
//!
//! The second opcode byte encodes everything structurally:
//! low 3 bits select the operand (B C D E H L (HL) A), the middle 3 bits
//! select a bit index or a rotate/shift variant, and the top 2 bits pick
//! the group (0 = rotate/shift, 1 = BIT, 2 = RES, 3 = SET).

use crate::bus::Bus;
use crate::cpu::{Cpu, StepError};
use crate::regs::{Flag, Reg};

/// Operand order of the CB register field.
const CB_REGS: [Reg; 8] = [
    Reg::B,
    Reg::C,
    Reg::D,
    Reg::E,
    Reg::H,
    Reg::L,
    Reg::HL,
    Reg::A,
];

impl Cpu {
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        let op = self.fetched_data as u8;
        let reg = CB_REGS[(op & 0x07) as usize];
        let bit = (op >> 3) & 0x07;
        let group = op >> 6;

        let value = self.read_reg8(bus, reg)?;
        self.tick(1);
        if reg == Reg::HL {
            // Memory operand: one read and one write through the bus.
            self.tick(2);
        }

        match group {
            1 => {
                // BIT b, r: carry is untouched.
                let z = value & (1 << bit) == 0;
                self.set_flags(Some(z), Some(false), Some(true), None);
                return Ok(());
            }
            2 => {
                // RES b, r
                self.write_reg8(bus, reg, value & !(1 << bit))?;
                return Ok(());
            }
            3 => {
                // SET b, r
                self.write_reg8(bus, reg, value | (1 << bit))?;
                return Ok(());
            }
            _ => {}
        }

        // Group 0: the rotate/shift family, selected by the bit field.
        let carry_in = self.flag(Flag::C);
        let (result, carry_out) = match bit {
            // RLC: bit 7 into carry and bit 0.
            0 => (value.rotate_left(1), value & 0x80 != 0),
            // RRC: bit 0 into carry and bit 7.
            1 => (value.rotate_right(1), value & 0x01 != 0),
            // RL: rotate left through carry.
            2 => ((value << 1) | carry_in as u8, value & 0x80 != 0),
            // RR: rotate right through carry.
            3 => ((value >> 1) | (carry_in as u8) << 7, value & 0x01 != 0),
            // SLA: shift left arithmetic.
            4 => (value << 1, value & 0x80 != 0),
            // SRA: shift right arithmetic, bit 7 sticks.
            5 => (((value as i8) >> 1) as u8, value & 0x01 != 0),
            // SWAP: exchange nibbles; carry always clears.
            6 => ((value >> 4) | (value << 4), false),
            // SRL: shift right logical.
            _ => (value >> 1, value & 0x01 != 0),
        };

        self.write_reg8(bus, reg, result)?;
        self.set_flags(
            Some(result == 0),
            Some(false),
            Some(false),
            Some(carry_out),
        );
        Ok(())
    }
}
