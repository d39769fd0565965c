/// Byte-addressable surface a cartridge exposes to the bus.
///
/// The bus forwards 0x0000–0x7FFF (ROM) and 0xA000–0xBFFF (external RAM)
/// here with unmodified addresses; mapper hardware, if any, lives behind
/// this trait.
pub trait Cartridge {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, value: u8);
}

/// An unbanked cartridge: a flat ROM image plus 8 KiB of external RAM.
///
/// This is enough for ROM-only carts and for test programs; bank-switched
/// mappers would be further implementations of [`Cartridge`].
pub struct FlatCartridge {
    rom: Vec<u8>,
    ram: [u8; 0x2000],
}

impl FlatCartridge {
    pub fn new(rom: Vec<u8>) -> Self {
        Self {
            rom,
            ram: [0; 0x2000],
        }
    }
}

impl Cartridge for FlatCartridge {
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => {
                // Reads past the end of a short image float high.
                self.rom.get(addr as usize).copied().unwrap_or(0xFF)
            }
            0xA000..=0xBFFF => self.ram[(addr - 0xA000) as usize],
            _ => unreachable!("cartridge read outside mapped ranges: {:#06X}", addr),
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            // ROM writes would address mapper registers; a flat cart has none.
            0x0000..=0x7FFF => {}
            0xA000..=0xBFFF => self.ram[(addr - 0xA000) as usize] = value,
            _ => unreachable!("cartridge write outside mapped ranges: {:#06X}", addr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rom_is_read_only() {
        let mut cart = FlatCartridge::new(vec![0xAA, 0xBB]);
        cart.write(0x0000, 0x00);
        assert_eq!(cart.read(0x0000), 0xAA);
        assert_eq!(cart.read(0x0001), 0xBB);
        assert_eq!(cart.read(0x0002), 0xFF);
    }

    #[test]
    fn external_ram_round_trips() {
        let mut cart = FlatCartridge::new(Vec::new());
        cart.write(0xA000, 0x42);
        cart.write(0xBFFF, 0x24);
        assert_eq!(cart.read(0xA000), 0x42);
        assert_eq!(cart.read(0xBFFF), 0x24);
    }
}
