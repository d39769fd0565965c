//! The memory bus: the single address-to-region dispatcher through which
//! the CPU touches memory.
//!
//! Memory map:
//!
//! - 0x0000–0x7FFF : cartridge ROM
//! - 0x8000–0x9FFF : video RAM (unmapped in this core)
//! - 0xA000–0xBFFF : cartridge RAM
//! - 0xC000–0xDFFF : work RAM
//! - 0xE000–0xFDFF : echo RAM (placeholder: reads 0, writes dropped)
//! - 0xFE00–0xFE9F : object attribute memory (unmapped in this core)
//! - 0xFEA0–0xFEFF : unusable gap (reads 0, writes dropped)
//! - 0xFF00–0xFF7F : I/O registers (unmapped in this core)
//! - 0xFF80–0xFFFE : high RAM
//! - 0xFFFF        : interrupt-enable register, owned by the CPU

use thiserror::Error;

use crate::cartridge::Cartridge;
use crate::ram::{HighRam, WorkRam};

/// An access to a region no peripheral backs yet.
///
/// Surfaced as a typed error rather than a panic so the step caller can
/// decide what to do; a full system replaces these arms with real device
/// forwarding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BusError {
    #[error("read from unmapped address {addr:#06X} ({region})")]
    UnmappedRead { addr: u16, region: &'static str },
    #[error("write to unmapped address {addr:#06X} ({region})")]
    UnmappedWrite { addr: u16, region: &'static str },
}

/// Abstraction over the address bus.
///
/// The CPU is generic over this trait so that tests can drive it with a
/// flat memory array while the real system uses [`SystemBus`].
pub trait Bus {
    fn read8(&mut self, addr: u16) -> Result<u8, BusError>;
    fn write8(&mut self, addr: u16, value: u8) -> Result<(), BusError>;

    /// Two 8-bit reads in ascending address order: low byte at `addr`,
    /// high byte at `addr + 1`.
    fn read16(&mut self, addr: u16) -> Result<u16, BusError> {
        let lo = self.read8(addr)? as u16;
        let hi = self.read8(addr.wrapping_add(1))? as u16;
        Ok(lo | (hi << 8))
    }

    /// Two 8-bit writes in ascending address order.
    fn write16(&mut self, addr: u16, value: u16) -> Result<(), BusError> {
        self.write8(addr, value as u8)?;
        self.write8(addr.wrapping_add(1), (value >> 8) as u8)
    }
}

/// The concrete bus: decodes every address to exactly one backing region.
///
/// Address 0xFFFF never reaches this decoder from the CPU; the CPU
/// intercepts it because the interrupt-enable byte is CPU state.
pub struct SystemBus<C> {
    cart: C,
    wram: WorkRam,
    hram: HighRam,
}

impl<C: Cartridge> SystemBus<C> {
    pub fn new(cart: C) -> Self {
        Self {
            cart,
            wram: WorkRam::default(),
            hram: HighRam::default(),
        }
    }
}

impl<C: Cartridge> Bus for SystemBus<C> {
    fn read8(&mut self, addr: u16) -> Result<u8, BusError> {
        match addr {
            0x0000..=0x7FFF => Ok(self.cart.read(addr)),
            0x8000..=0x9FFF => Err(BusError::UnmappedRead {
                addr,
                region: "video RAM",
            }),
            0xA000..=0xBFFF => Ok(self.cart.read(addr)),
            0xC000..=0xDFFF => Ok(self.wram.read(addr)),
            // Echo RAM mirrors work RAM on hardware; placeholder for now.
            0xE000..=0xFDFF => Ok(0),
            0xFE00..=0xFE9F => Err(BusError::UnmappedRead {
                addr,
                region: "object attribute memory",
            }),
            0xFEA0..=0xFEFF => Ok(0),
            0xFF00..=0xFF7F => Err(BusError::UnmappedRead {
                addr,
                region: "I/O registers",
            }),
            0xFF80..=0xFFFE => Ok(self.hram.read(addr)),
            0xFFFF => Err(BusError::UnmappedRead {
                addr,
                region: "interrupt-enable register (CPU-owned)",
            }),
        }
    }

    fn write8(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        match addr {
            0x0000..=0x7FFF => {
                self.cart.write(addr, value);
                Ok(())
            }
            0x8000..=0x9FFF => Err(BusError::UnmappedWrite {
                addr,
                region: "video RAM",
            }),
            0xA000..=0xBFFF => {
                self.cart.write(addr, value);
                Ok(())
            }
            0xC000..=0xDFFF => {
                self.wram.write(addr, value);
                Ok(())
            }
            0xE000..=0xFDFF => Ok(()),
            0xFE00..=0xFE9F => Err(BusError::UnmappedWrite {
                addr,
                region: "object attribute memory",
            }),
            0xFEA0..=0xFEFF => Ok(()),
            0xFF00..=0xFF7F => Err(BusError::UnmappedWrite {
                addr,
                region: "I/O registers",
            }),
            0xFF80..=0xFFFE => {
                self.hram.write(addr, value);
                Ok(())
            }
            0xFFFF => Err(BusError::UnmappedWrite {
                addr,
                region: "interrupt-enable register (CPU-owned)",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::FlatCartridge;

    fn bus_with_rom(rom: Vec<u8>) -> SystemBus<FlatCartridge> {
        SystemBus::new(FlatCartridge::new(rom))
    }

    #[test]
    fn decode_boundaries() {
        let mut rom = vec![0u8; 0x8000];
        rom[0x7FFF] = 0x5C;
        let mut bus = bus_with_rom(rom);

        // Last ROM byte routes to the cartridge...
        assert_eq!(bus.read8(0x7FFF), Ok(0x5C));
        // ...one past it lands in the (unmapped) video RAM region.
        assert_eq!(
            bus.read8(0x8000),
            Err(BusError::UnmappedRead {
                addr: 0x8000,
                region: "video RAM",
            })
        );
    }

    #[test]
    fn ram_regions_subtract_their_base() {
        let mut bus = bus_with_rom(Vec::new());
        bus.write8(0xDFFF, 0x7A).unwrap();
        bus.write8(0xFF80, 0x7B).unwrap();
        assert_eq!(bus.read8(0xDFFF), Ok(0x7A));
        assert_eq!(bus.read8(0xFF80), Ok(0x7B));
    }

    #[test]
    fn reserved_regions_read_zero_and_drop_writes() {
        let mut bus = bus_with_rom(Vec::new());
        bus.write8(0xE000, 0xFF).unwrap();
        bus.write8(0xFEA0, 0xFF).unwrap();
        assert_eq!(bus.read8(0xE000), Ok(0));
        assert_eq!(bus.read8(0xFDFF), Ok(0));
        assert_eq!(bus.read8(0xFEA0), Ok(0));
        assert_eq!(bus.read8(0xFEFF), Ok(0));
    }

    #[test]
    fn io_region_is_a_typed_error() {
        let mut bus = bus_with_rom(Vec::new());
        assert!(matches!(
            bus.read8(0xFF00),
            Err(BusError::UnmappedRead { addr: 0xFF00, .. })
        ));
        assert!(matches!(
            bus.write8(0xFF7F, 0),
            Err(BusError::UnmappedWrite { addr: 0xFF7F, .. })
        ));
    }

    #[test]
    fn wide_accesses_are_little_endian() {
        let mut bus = bus_with_rom(Vec::new());
        bus.write16(0xC000, 0xABCD).unwrap();
        assert_eq!(bus.read8(0xC000), Ok(0xCD));
        assert_eq!(bus.read8(0xC001), Ok(0xAB));
        assert_eq!(bus.read16(0xC000), Ok(0xABCD));
    }
}
