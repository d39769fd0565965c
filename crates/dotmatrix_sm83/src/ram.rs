//! Physical RAM backing stores: work RAM and high RAM.
//!
//! Each store is indexed from zero internally; the bus hands addresses in
//! the mapped range and the offset of the range base is subtracted here.

/// 8 KiB of work RAM, mapped at 0xC000–0xDFFF.
pub struct WorkRam {
    bytes: [u8; 0x2000],
}

impl Default for WorkRam {
    fn default() -> Self {
        Self { bytes: [0; 0x2000] }
    }
}

impl WorkRam {
    const BASE: u16 = 0xC000;

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[(addr - Self::BASE) as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[(addr - Self::BASE) as usize] = value;
    }
}

/// 127 bytes of high RAM, mapped at 0xFF80–0xFFFE.
pub struct HighRam {
    bytes: [u8; 0x7F],
}

impl Default for HighRam {
    fn default() -> Self {
        Self { bytes: [0; 0x7F] }
    }
}

impl HighRam {
    const BASE: u16 = 0xFF80;

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[(addr - Self::BASE) as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[(addr - Self::BASE) as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_ram_offsets_from_base() {
        let mut wram = WorkRam::default();
        wram.write(0xC000, 0x11);
        wram.write(0xDFFF, 0x22);
        assert_eq!(wram.read(0xC000), 0x11);
        assert_eq!(wram.read(0xDFFF), 0x22);
    }

    #[test]
    fn high_ram_offsets_from_base() {
        let mut hram = HighRam::default();
        hram.write(0xFF80, 0x33);
        hram.write(0xFFFE, 0x44);
        assert_eq!(hram.read(0xFF80), 0x33);
        assert_eq!(hram.read(0xFFFE), 0x44);
    }
}
