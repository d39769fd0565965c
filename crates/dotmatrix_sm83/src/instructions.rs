//! Static opcode-to-descriptor mapping.
//!
//! Each primary opcode maps to an [`Instruction`]: what to do, how to
//! locate the operands, an optional execution condition, and the fixed
//! RST target. The CB-prefixed space is not tabulated; its second byte
//! encodes register, bit index and operation group structurally and is
//! decoded inside the CB handler.

use crate::regs::Reg;

/// Operation selector. Execution dispatches on this with an exhaustive
/// `match`, so a missing handler is a compile error rather than a hole in
/// a function-pointer table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstrKind {
    Nop,
    Ld,
    Ldh,
    Jp,
    Jr,
    Call,
    Rst,
    Ret,
    Reti,
    Di,
    Halt,
    Pop,
    Push,
    Add,
    Adc,
    Sub,
    Sbc,
    Inc,
    Dec,
    And,
    Or,
    Xor,
    Cp,
    Rlca,
    Rrca,
    Rla,
    Rra,
    Daa,
    Cpl,
    Scf,
    Ccf,
    CbPrefix,
}

impl InstrKind {
    /// Mnemonic used by the execution trace.
    pub fn mnemonic(self) -> &'static str {
        match self {
            InstrKind::Nop => "NOP",
            InstrKind::Ld => "LD",
            InstrKind::Ldh => "LDH",
            InstrKind::Jp => "JP",
            InstrKind::Jr => "JR",
            InstrKind::Call => "CALL",
            InstrKind::Rst => "RST",
            InstrKind::Ret => "RET",
            InstrKind::Reti => "RETI",
            InstrKind::Di => "DI",
            InstrKind::Halt => "HALT",
            InstrKind::Pop => "POP",
            InstrKind::Push => "PUSH",
            InstrKind::Add => "ADD",
            InstrKind::Adc => "ADC",
            InstrKind::Sub => "SUB",
            InstrKind::Sbc => "SBC",
            InstrKind::Inc => "INC",
            InstrKind::Dec => "DEC",
            InstrKind::And => "AND",
            InstrKind::Or => "OR",
            InstrKind::Xor => "XOR",
            InstrKind::Cp => "CP",
            InstrKind::Rlca => "RLCA",
            InstrKind::Rrca => "RRCA",
            InstrKind::Rla => "RLA",
            InstrKind::Rra => "RRA",
            InstrKind::Daa => "DAA",
            InstrKind::Cpl => "CPL",
            InstrKind::Scf => "SCF",
            InstrKind::Ccf => "CCF",
            InstrKind::CbPrefix => "CB",
        }
    }
}

/// How the resolver locates the operand value and/or destination address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddrMode {
    /// No operand fetch.
    Implied,
    /// Operand is the first register.
    Reg,
    /// Operand is the second register.
    RegReg,
    /// 8-bit immediate into the first register.
    RegImm8,
    /// Bare 8-bit immediate (JR displacement, CB opcode byte).
    Imm8,
    /// 16-bit immediate into the first register.
    RegImm16,
    /// Bare 16-bit immediate (JP/CALL target).
    Imm16,
    /// Memory at the first register's value <- second register.
    MemReg,
    /// First register <- memory at the second register's value.
    RegMem,
    /// First register <- memory at HL, then HL increments.
    RegMemInc,
    /// First register <- memory at HL, then HL decrements.
    RegMemDec,
    /// Memory at HL <- second register, then HL increments.
    MemIncReg,
    /// Memory at HL <- second register, then HL decrements.
    MemDecReg,
    /// First register <- memory at 0xFF00 | imm8.
    RegHigh,
    /// Memory at 0xFF00 | imm8 <- second register.
    HighReg,
    /// HL <- SP + signed imm8.
    SpRel,
    /// Memory at imm16 <- second register.
    MemImmReg,
    /// First register <- memory at imm16.
    RegMemImm,
    /// Memory at the first register's value <- imm8.
    MemImm8,
    /// Memory at the first register's value, read-modify-write.
    Mem,
}

/// Execution condition for conditional jump/call/return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    None,
    Z,
    Nz,
    C,
    Nc,
}

/// One entry of the instruction table. Immutable after construction.
#[derive(Clone, Copy, Debug)]
pub struct Instruction {
    pub kind: InstrKind,
    pub mode: AddrMode,
    pub r1: Option<Reg>,
    pub r2: Option<Reg>,
    pub cond: Cond,
    /// Fixed target for RST; zero elsewhere.
    pub param: u8,
}

pub(crate) const NOP: Instruction = op(InstrKind::Nop, AddrMode::Implied);

const fn op(kind: InstrKind, mode: AddrMode) -> Instruction {
    Instruction {
        kind,
        mode,
        r1: None,
        r2: None,
        cond: Cond::None,
        param: 0,
    }
}

const fn op1(kind: InstrKind, mode: AddrMode, r1: Reg) -> Instruction {
    Instruction {
        r1: Some(r1),
        ..op(kind, mode)
    }
}

const fn op2(kind: InstrKind, mode: AddrMode, r1: Reg, r2: Reg) -> Instruction {
    Instruction {
        r1: Some(r1),
        r2: Some(r2),
        ..op(kind, mode)
    }
}

/// Entry with only a source register (LD (a16),SP / LDH (a8),A forms).
const fn src(kind: InstrKind, mode: AddrMode, r2: Reg) -> Instruction {
    Instruction {
        r2: Some(r2),
        ..op(kind, mode)
    }
}

const fn cc(kind: InstrKind, mode: AddrMode, cond: Cond) -> Instruction {
    Instruction {
        cond,
        ..op(kind, mode)
    }
}

const fn rst(param: u8) -> Instruction {
    Instruction {
        param,
        ..op(InstrKind::Rst, AddrMode::Implied)
    }
}

impl Instruction {
    /// Look up the descriptor for a primary opcode.
    ///
    /// `None` marks the encodings this core cannot execute: the eleven
    /// holes of the real opcode map, plus EI and STOP, which wait on the
    /// interrupt controller and power management respectively.
    pub fn lookup(opcode: u8) -> Option<Instruction> {
        use AddrMode as M;
        use InstrKind::*;
        use Reg::*;

        let ins = match opcode {
            // 0x0X
            0x00 => op(Nop, M::Implied),
            0x01 => op1(Ld, M::RegImm16, BC),
            0x02 => op2(Ld, M::MemReg, BC, A),
            0x03 => op1(Inc, M::Reg, BC),
            0x04 => op1(Inc, M::Reg, B),
            0x05 => op1(Dec, M::Reg, B),
            0x06 => op1(Ld, M::RegImm8, B),
            0x07 => op(Rlca, M::Implied),
            0x08 => src(Ld, M::MemImmReg, SP),
            0x09 => op2(Add, M::RegReg, HL, BC),
            0x0A => op2(Ld, M::RegMem, A, BC),
            0x0B => op1(Dec, M::Reg, BC),
            0x0C => op1(Inc, M::Reg, C),
            0x0D => op1(Dec, M::Reg, C),
            0x0E => op1(Ld, M::RegImm8, C),
            0x0F => op(Rrca, M::Implied),

            // 0x1X
            0x11 => op1(Ld, M::RegImm16, DE),
            0x12 => op2(Ld, M::MemReg, DE, A),
            0x13 => op1(Inc, M::Reg, DE),
            0x14 => op1(Inc, M::Reg, D),
            0x15 => op1(Dec, M::Reg, D),
            0x16 => op1(Ld, M::RegImm8, D),
            0x17 => op(Rla, M::Implied),
            0x18 => op(Jr, M::Imm8),
            0x19 => op2(Add, M::RegReg, HL, DE),
            0x1A => op2(Ld, M::RegMem, A, DE),
            0x1B => op1(Dec, M::Reg, DE),
            0x1C => op1(Inc, M::Reg, E),
            0x1D => op1(Dec, M::Reg, E),
            0x1E => op1(Ld, M::RegImm8, E),
            0x1F => op(Rra, M::Implied),

            // 0x2X
            0x20 => cc(Jr, M::Imm8, Cond::Nz),
            0x21 => op1(Ld, M::RegImm16, HL),
            0x22 => op2(Ld, M::MemIncReg, HL, A),
            0x23 => op1(Inc, M::Reg, HL),
            0x24 => op1(Inc, M::Reg, H),
            0x25 => op1(Dec, M::Reg, H),
            0x26 => op1(Ld, M::RegImm8, H),
            0x27 => op(Daa, M::Implied),
            0x28 => cc(Jr, M::Imm8, Cond::Z),
            0x29 => op2(Add, M::RegReg, HL, HL),
            0x2A => op2(Ld, M::RegMemInc, A, HL),
            0x2B => op1(Dec, M::Reg, HL),
            0x2C => op1(Inc, M::Reg, L),
            0x2D => op1(Dec, M::Reg, L),
            0x2E => op1(Ld, M::RegImm8, L),
            0x2F => op(Cpl, M::Implied),

            // 0x3X
            0x30 => cc(Jr, M::Imm8, Cond::Nc),
            0x31 => op1(Ld, M::RegImm16, SP),
            0x32 => op2(Ld, M::MemDecReg, HL, A),
            0x33 => op1(Inc, M::Reg, SP),
            0x34 => op1(Inc, M::Mem, HL),
            0x35 => op1(Dec, M::Mem, HL),
            0x36 => op1(Ld, M::MemImm8, HL),
            0x37 => op(Scf, M::Implied),
            0x38 => cc(Jr, M::Imm8, Cond::C),
            0x39 => op2(Add, M::RegReg, HL, SP),
            0x3A => op2(Ld, M::RegMemDec, A, HL),
            0x3B => op1(Dec, M::Reg, SP),
            0x3C => op1(Inc, M::Reg, A),
            0x3D => op1(Dec, M::Reg, A),
            0x3E => op1(Ld, M::RegImm8, A),
            0x3F => op(Ccf, M::Implied),

            // 0x4X–0x7X: LD r, r' block (0x76 is HALT)
            0x40 => op2(Ld, M::RegReg, B, B),
            0x41 => op2(Ld, M::RegReg, B, C),
            0x42 => op2(Ld, M::RegReg, B, D),
            0x43 => op2(Ld, M::RegReg, B, E),
            0x44 => op2(Ld, M::RegReg, B, H),
            0x45 => op2(Ld, M::RegReg, B, L),
            0x46 => op2(Ld, M::RegMem, B, HL),
            0x47 => op2(Ld, M::RegReg, B, A),
            0x48 => op2(Ld, M::RegReg, C, B),
            0x49 => op2(Ld, M::RegReg, C, C),
            0x4A => op2(Ld, M::RegReg, C, D),
            0x4B => op2(Ld, M::RegReg, C, E),
            0x4C => op2(Ld, M::RegReg, C, H),
            0x4D => op2(Ld, M::RegReg, C, L),
            0x4E => op2(Ld, M::RegMem, C, HL),
            0x4F => op2(Ld, M::RegReg, C, A),

            0x50 => op2(Ld, M::RegReg, D, B),
            0x51 => op2(Ld, M::RegReg, D, C),
            0x52 => op2(Ld, M::RegReg, D, D),
            0x53 => op2(Ld, M::RegReg, D, E),
            0x54 => op2(Ld, M::RegReg, D, H),
            0x55 => op2(Ld, M::RegReg, D, L),
            0x56 => op2(Ld, M::RegMem, D, HL),
            0x57 => op2(Ld, M::RegReg, D, A),
            0x58 => op2(Ld, M::RegReg, E, B),
            0x59 => op2(Ld, M::RegReg, E, C),
            0x5A => op2(Ld, M::RegReg, E, D),
            0x5B => op2(Ld, M::RegReg, E, E),
            0x5C => op2(Ld, M::RegReg, E, H),
            0x5D => op2(Ld, M::RegReg, E, L),
            0x5E => op2(Ld, M::RegMem, E, HL),
            0x5F => op2(Ld, M::RegReg, E, A),

            0x60 => op2(Ld, M::RegReg, H, B),
            0x61 => op2(Ld, M::RegReg, H, C),
            0x62 => op2(Ld, M::RegReg, H, D),
            0x63 => op2(Ld, M::RegReg, H, E),
            0x64 => op2(Ld, M::RegReg, H, H),
            0x65 => op2(Ld, M::RegReg, H, L),
            0x66 => op2(Ld, M::RegMem, H, HL),
            0x67 => op2(Ld, M::RegReg, H, A),
            0x68 => op2(Ld, M::RegReg, L, B),
            0x69 => op2(Ld, M::RegReg, L, C),
            0x6A => op2(Ld, M::RegReg, L, D),
            0x6B => op2(Ld, M::RegReg, L, E),
            0x6C => op2(Ld, M::RegReg, L, H),
            0x6D => op2(Ld, M::RegReg, L, L),
            0x6E => op2(Ld, M::RegMem, L, HL),
            0x6F => op2(Ld, M::RegReg, L, A),

            0x70 => op2(Ld, M::MemReg, HL, B),
            0x71 => op2(Ld, M::MemReg, HL, C),
            0x72 => op2(Ld, M::MemReg, HL, D),
            0x73 => op2(Ld, M::MemReg, HL, E),
            0x74 => op2(Ld, M::MemReg, HL, H),
            0x75 => op2(Ld, M::MemReg, HL, L),
            0x76 => op(Halt, M::Implied),
            0x77 => op2(Ld, M::MemReg, HL, A),
            0x78 => op2(Ld, M::RegReg, A, B),
            0x79 => op2(Ld, M::RegReg, A, C),
            0x7A => op2(Ld, M::RegReg, A, D),
            0x7B => op2(Ld, M::RegReg, A, E),
            0x7C => op2(Ld, M::RegReg, A, H),
            0x7D => op2(Ld, M::RegReg, A, L),
            0x7E => op2(Ld, M::RegMem, A, HL),
            0x7F => op2(Ld, M::RegReg, A, A),

            // 0x8X: ADD / ADC
            0x80 => op2(Add, M::RegReg, A, B),
            0x81 => op2(Add, M::RegReg, A, C),
            0x82 => op2(Add, M::RegReg, A, D),
            0x83 => op2(Add, M::RegReg, A, E),
            0x84 => op2(Add, M::RegReg, A, H),
            0x85 => op2(Add, M::RegReg, A, L),
            0x86 => op2(Add, M::RegMem, A, HL),
            0x87 => op2(Add, M::RegReg, A, A),
            0x88 => op2(Adc, M::RegReg, A, B),
            0x89 => op2(Adc, M::RegReg, A, C),
            0x8A => op2(Adc, M::RegReg, A, D),
            0x8B => op2(Adc, M::RegReg, A, E),
            0x8C => op2(Adc, M::RegReg, A, H),
            0x8D => op2(Adc, M::RegReg, A, L),
            0x8E => op2(Adc, M::RegMem, A, HL),
            0x8F => op2(Adc, M::RegReg, A, A),

            // 0x9X: SUB / SBC
            0x90 => op2(Sub, M::RegReg, A, B),
            0x91 => op2(Sub, M::RegReg, A, C),
            0x92 => op2(Sub, M::RegReg, A, D),
            0x93 => op2(Sub, M::RegReg, A, E),
            0x94 => op2(Sub, M::RegReg, A, H),
            0x95 => op2(Sub, M::RegReg, A, L),
            0x96 => op2(Sub, M::RegMem, A, HL),
            0x97 => op2(Sub, M::RegReg, A, A),
            0x98 => op2(Sbc, M::RegReg, A, B),
            0x99 => op2(Sbc, M::RegReg, A, C),
            0x9A => op2(Sbc, M::RegReg, A, D),
            0x9B => op2(Sbc, M::RegReg, A, E),
            0x9C => op2(Sbc, M::RegReg, A, H),
            0x9D => op2(Sbc, M::RegReg, A, L),
            0x9E => op2(Sbc, M::RegMem, A, HL),
            0x9F => op2(Sbc, M::RegReg, A, A),

            // 0xAX: AND / XOR
            0xA0 => op2(And, M::RegReg, A, B),
            0xA1 => op2(And, M::RegReg, A, C),
            0xA2 => op2(And, M::RegReg, A, D),
            0xA3 => op2(And, M::RegReg, A, E),
            0xA4 => op2(And, M::RegReg, A, H),
            0xA5 => op2(And, M::RegReg, A, L),
            0xA6 => op2(And, M::RegMem, A, HL),
            0xA7 => op2(And, M::RegReg, A, A),
            0xA8 => op2(Xor, M::RegReg, A, B),
            0xA9 => op2(Xor, M::RegReg, A, C),
            0xAA => op2(Xor, M::RegReg, A, D),
            0xAB => op2(Xor, M::RegReg, A, E),
            0xAC => op2(Xor, M::RegReg, A, H),
            0xAD => op2(Xor, M::RegReg, A, L),
            0xAE => op2(Xor, M::RegMem, A, HL),
            0xAF => op2(Xor, M::RegReg, A, A),

            // 0xBX: OR / CP
            0xB0 => op2(Or, M::RegReg, A, B),
            0xB1 => op2(Or, M::RegReg, A, C),
            0xB2 => op2(Or, M::RegReg, A, D),
            0xB3 => op2(Or, M::RegReg, A, E),
            0xB4 => op2(Or, M::RegReg, A, H),
            0xB5 => op2(Or, M::RegReg, A, L),
            0xB6 => op2(Or, M::RegMem, A, HL),
            0xB7 => op2(Or, M::RegReg, A, A),
            0xB8 => op2(Cp, M::RegReg, A, B),
            0xB9 => op2(Cp, M::RegReg, A, C),
            0xBA => op2(Cp, M::RegReg, A, D),
            0xBB => op2(Cp, M::RegReg, A, E),
            0xBC => op2(Cp, M::RegReg, A, H),
            0xBD => op2(Cp, M::RegReg, A, L),
            0xBE => op2(Cp, M::RegMem, A, HL),
            0xBF => op2(Cp, M::RegReg, A, A),

            // 0xCX
            0xC0 => cc(Ret, M::Implied, Cond::Nz),
            0xC1 => op1(Pop, M::Reg, BC),
            0xC2 => cc(Jp, M::Imm16, Cond::Nz),
            0xC3 => op(Jp, M::Imm16),
            0xC4 => cc(Call, M::Imm16, Cond::Nz),
            0xC5 => op1(Push, M::Reg, BC),
            0xC6 => op1(Add, M::RegImm8, A),
            0xC7 => rst(0x00),
            0xC8 => cc(Ret, M::Implied, Cond::Z),
            0xC9 => op(Ret, M::Implied),
            0xCA => cc(Jp, M::Imm16, Cond::Z),
            0xCB => op(CbPrefix, M::Imm8),
            0xCC => cc(Call, M::Imm16, Cond::Z),
            0xCD => op(Call, M::Imm16),
            0xCE => op1(Adc, M::RegImm8, A),
            0xCF => rst(0x08),

            // 0xDX
            0xD0 => cc(Ret, M::Implied, Cond::Nc),
            0xD1 => op1(Pop, M::Reg, DE),
            0xD2 => cc(Jp, M::Imm16, Cond::Nc),
            0xD4 => cc(Call, M::Imm16, Cond::Nc),
            0xD5 => op1(Push, M::Reg, DE),
            0xD6 => op1(Sub, M::RegImm8, A),
            0xD7 => rst(0x10),
            0xD8 => cc(Ret, M::Implied, Cond::C),
            0xD9 => op(Reti, M::Implied),
            0xDA => cc(Jp, M::Imm16, Cond::C),
            0xDC => cc(Call, M::Imm16, Cond::C),
            0xDE => op1(Sbc, M::RegImm8, A),
            0xDF => rst(0x18),

            // 0xEX
            0xE0 => src(Ldh, M::HighReg, A),
            0xE1 => op1(Pop, M::Reg, HL),
            0xE2 => op2(Ld, M::MemReg, C, A),
            0xE5 => op1(Push, M::Reg, HL),
            0xE6 => op1(And, M::RegImm8, A),
            0xE7 => rst(0x20),
            0xE8 => op1(Add, M::RegImm8, SP),
            0xE9 => op1(Jp, M::Reg, HL),
            0xEA => src(Ld, M::MemImmReg, A),
            0xEE => op1(Xor, M::RegImm8, A),
            0xEF => rst(0x28),

            // 0xFX
            0xF0 => op1(Ldh, M::RegHigh, A),
            0xF1 => op1(Pop, M::Reg, AF),
            0xF2 => op2(Ld, M::RegMem, A, C),
            0xF3 => op(Di, M::Implied),
            0xF5 => op1(Push, M::Reg, AF),
            0xF6 => op1(Or, M::RegImm8, A),
            0xF7 => rst(0x30),
            0xF8 => op2(Ld, M::SpRel, HL, SP),
            0xF9 => op2(Ld, M::RegReg, SP, HL),
            0xFA => op1(Ld, M::RegMemImm, A),
            0xFE => op1(Cp, M::RegImm8, A),
            0xFF => rst(0x38),

            // 0x10 STOP and 0xFB EI wait on peripherals this core does
            // not have; 0xD3/0xDB/0xDD/0xE3/0xE4/0xEB/0xEC/0xED/0xF4/
            // 0xFC/0xFD are holes in the hardware opcode map.
            _ => return None,
        };
        Some(ins)
    }
}
