//! Stack unit: push/pop through the bus with SP adjustment.
//!
//! The stack grows downward; SP points at the last pushed byte. A 16-bit
//! push writes the high byte first so the low byte ends up at the lower
//! address, matching the bus's little-endian 16-bit ordering. Cycle
//! charges stay with the callers, which need per-access granularity for
//! instructions like conditional RET.

use crate::bus::{Bus, BusError};
use crate::cpu::Cpu;

impl Cpu {
    pub(crate) fn push8<B: Bus>(&mut self, bus: &mut B, value: u8) -> Result<(), BusError> {
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.bus_write(bus, self.regs.sp, value)
    }

    pub(crate) fn push16<B: Bus>(&mut self, bus: &mut B, value: u16) -> Result<(), BusError> {
        self.push8(bus, (value >> 8) as u8)?;
        self.push8(bus, value as u8)
    }

    pub(crate) fn pop8<B: Bus>(&mut self, bus: &mut B) -> Result<u8, BusError> {
        let value = self.bus_read(bus, self.regs.sp)?;
        self.regs.sp = self.regs.sp.wrapping_add(1);
        Ok(value)
    }

    pub(crate) fn pop16<B: Bus>(&mut self, bus: &mut B) -> Result<u16, BusError> {
        let lo = self.pop8(bus)? as u16;
        let hi = self.pop8(bus)? as u16;
        Ok(lo | (hi << 8))
    }
}
