//! The instruction-execution engine: fetch, decode, address-resolve,
//! execute, with cycle accounting on every charged bus access.

mod exec;
mod fetch;
mod stack;

#[cfg(test)]
mod tests;

use thiserror::Error;

use crate::bus::{Bus, BusError};
use crate::instructions::{Instruction, InstrKind, NOP};
use crate::regs::{Flag, Reg, Registers};

/// Address the PC is set to at power-on (the cartridge entry point).
pub const ENTRY_POINT: u16 = 0x0100;

/// Address of the CPU-owned interrupt-enable register.
const IE_ADDRESS: u16 = 0xFFFF;

/// A fatal condition detected while stepping.
///
/// The instruction stream's meaning is undefined past an unmapped opcode
/// or address, so there is no local recovery; the caller decides whether
/// to halt, log, or abort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StepError {
    /// The opcode has no descriptor in the instruction table.
    #[error("unknown opcode {opcode:#04X} at {pc:#06X}")]
    UnknownOpcode { opcode: u8, pc: u16 },
    /// The bus resolved the address to a region nothing backs yet.
    #[error(transparent)]
    Bus(#[from] BusError),
}

/// SM83 CPU state.
///
/// One instance per emulated machine; all state is owned here so that
/// tests can run several independent cores side by side.
pub struct Cpu {
    pub regs: Registers,
    /// Operand value produced by the addressing-mode resolver.
    fetched_data: u16,
    /// Destination address when the current instruction writes memory.
    memory_destination: u16,
    destination_is_memory: bool,
    current_opcode: u8,
    current_instruction: Instruction,
    pub halted: bool,
    /// Interrupt master enable. Only DI touches this for now; RETI sets
    /// it on the way out of a handler.
    pub ime: bool,
    ie_register: u8,
    cycles: u64,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Power-on state: PC at the cartridge entry point, A = 0x01,
    /// everything else zero.
    pub fn new() -> Self {
        let mut regs = Registers::default();
        regs.pc = ENTRY_POINT;
        regs.a = 0x01;
        Self {
            regs,
            fetched_data: 0,
            memory_destination: 0,
            destination_is_memory: false,
            current_opcode: 0,
            current_instruction: NOP,
            halted: false,
            ime: false,
            ie_register: 0,
            cycles: 0,
        }
    }

    /// Total cycles charged so far. Peripherals use this to stay in sync
    /// with the CPU; the core itself never interprets it.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Charge `n` cycles for bus accesses or internal delays.
    #[inline]
    pub(crate) fn tick(&mut self, n: u64) {
        self.cycles += n;
    }

    /// The byte backing address 0xFFFF.
    #[inline]
    pub fn interrupt_enable(&self) -> u8 {
        self.ie_register
    }

    #[inline]
    pub fn set_interrupt_enable(&mut self, value: u8) {
        self.ie_register = value;
    }

    /// Advance exactly one instruction, or one idle cycle when halted.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        if self.halted {
            self.tick(1);
            return Ok(());
        }

        let pc = self.regs.pc;
        self.fetch_instruction(bus)?;
        self.fetch_data(bus)?;

        if log::log_enabled!(log::Level::Trace) {
            self.trace(bus, pc);
        }

        self.execute(bus)
    }

    fn fetch_instruction<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        let pc = self.regs.pc;
        self.current_opcode = self.bus_read(bus, pc)?;
        self.regs.pc = pc.wrapping_add(1);
        self.current_instruction = Instruction::lookup(self.current_opcode).ok_or(
            StepError::UnknownOpcode {
                opcode: self.current_opcode,
                pc,
            },
        )?;
        Ok(())
    }

    fn trace<B: Bus>(&mut self, bus: &mut B, pc: u16) {
        let b1 = self.bus_read(bus, pc.wrapping_add(1)).unwrap_or(0);
        let b2 = self.bus_read(bus, pc.wrapping_add(2)).unwrap_or(0);
        log::trace!(
            "{:04X}: {:<7} ({:02X} {:02X} {:02X}) A: {:02X} B: {:02X} C: {:02X}",
            pc,
            self.current_instruction.kind.mnemonic(),
            self.current_opcode,
            b1,
            b2,
            self.regs.a,
            self.regs.b,
            self.regs.c,
        );
    }

    /// Bus read with the 0xFFFF interception: the interrupt-enable byte
    /// is CPU state, not a bus region.
    pub(crate) fn bus_read<B: Bus>(&mut self, bus: &mut B, addr: u16) -> Result<u8, BusError> {
        if addr == IE_ADDRESS {
            return Ok(self.ie_register);
        }
        bus.read8(addr)
    }

    pub(crate) fn bus_write<B: Bus>(
        &mut self,
        bus: &mut B,
        addr: u16,
        value: u8,
    ) -> Result<(), BusError> {
        if addr == IE_ADDRESS {
            self.ie_register = value;
            return Ok(());
        }
        bus.write8(addr, value)
    }

    pub(crate) fn bus_write16<B: Bus>(
        &mut self,
        bus: &mut B,
        addr: u16,
        value: u16,
    ) -> Result<(), BusError> {
        self.bus_write(bus, addr, value as u8)?;
        self.bus_write(bus, addr.wrapping_add(1), (value >> 8) as u8)
    }

    /// Read any register through its natural width, widened to 16 bits.
    pub(crate) fn read_reg(&self, reg: Reg) -> u16 {
        if reg.is_16bit() {
            self.regs.read16(reg)
        } else {
            self.regs.read8(reg) as u16
        }
    }

    /// Write any register, masking to its natural width.
    pub(crate) fn set_reg(&mut self, reg: Reg, value: u16) {
        if reg.is_16bit() {
            self.regs.write16(reg, value);
        } else {
            self.regs.write8(reg, value as u8);
        }
    }

    /// 8-bit register access in the CB encoding sense: index 6, spelled
    /// `Reg::HL` in descriptors, means memory at HL.
    pub(crate) fn read_reg8<B: Bus>(&mut self, bus: &mut B, reg: Reg) -> Result<u8, BusError> {
        if reg == Reg::HL {
            let addr = self.regs.read16(Reg::HL);
            self.bus_read(bus, addr)
        } else {
            Ok(self.regs.read8(reg))
        }
    }

    pub(crate) fn write_reg8<B: Bus>(
        &mut self,
        bus: &mut B,
        reg: Reg,
        value: u8,
    ) -> Result<(), BusError> {
        if reg == Reg::HL {
            let addr = self.regs.read16(Reg::HL);
            self.bus_write(bus, addr, value)
        } else {
            self.regs.write8(reg, value);
            Ok(())
        }
    }

    pub(crate) fn set_flags(
        &mut self,
        z: Option<bool>,
        n: Option<bool>,
        h: Option<bool>,
        c: Option<bool>,
    ) {
        self.regs.apply_flags(z, n, h, c);
    }

    #[inline]
    pub(crate) fn flag(&self, flag: Flag) -> bool {
        self.regs.flag(flag)
    }

    /// First operand register of the current instruction.
    ///
    /// Only called from handlers whose addressing modes guarantee the
    /// operand exists; a miss is a defect in the instruction table.
    pub(crate) fn r1(&self) -> Reg {
        match self.current_instruction.r1 {
            Some(reg) => reg,
            None => unreachable!(
                "instruction {:#04X} has no first operand",
                self.current_opcode
            ),
        }
    }

    pub(crate) fn r2(&self) -> Reg {
        match self.current_instruction.r2 {
            Some(reg) => reg,
            None => unreachable!(
                "instruction {:#04X} has no second operand",
                self.current_opcode
            ),
        }
    }

    pub(crate) fn kind(&self) -> InstrKind {
        self.current_instruction.kind
    }
}
