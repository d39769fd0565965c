/// Register file for the SM83 core (Game Boy LR35902).
///
/// Eight 8-bit registers plus the 16-bit program counter and stack
/// pointer. The four register pairs AF/BC/DE/HL are views over two
/// adjacent 8-bit registers with the high byte first in the
/// program-visible value; composition is done explicitly with
/// `u16::from_be_bytes`/`to_be_bytes` rather than by reinterpreting
/// memory.
#[derive(Clone, Copy, Debug, Default)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

/// Register identifiers used by instruction descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg {
    A,
    F,
    B,
    C,
    D,
    E,
    H,
    L,
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
}

impl Reg {
    /// Whether the identifier names a 16-bit register (pair or PC/SP).
    #[inline]
    pub fn is_16bit(self) -> bool {
        matches!(
            self,
            Reg::AF | Reg::BC | Reg::DE | Reg::HL | Reg::SP | Reg::PC
        )
    }
}

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
#[derive(Clone, Copy, Debug)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

impl Registers {
    /// Read one of the eight 8-bit registers.
    ///
    /// Passing a 16-bit identifier is a programming error in the
    /// instruction table, not a runtime condition.
    pub fn read8(&self, reg: Reg) -> u8 {
        match reg {
            Reg::A => self.a,
            Reg::F => self.f,
            Reg::B => self.b,
            Reg::C => self.c,
            Reg::D => self.d,
            Reg::E => self.e,
            Reg::H => self.h,
            Reg::L => self.l,
            _ => unreachable!("read8 on 16-bit register {:?}", reg),
        }
    }

    pub fn write8(&mut self, reg: Reg, value: u8) {
        match reg {
            Reg::A => self.a = value,
            Reg::F => self.f = value,
            Reg::B => self.b = value,
            Reg::C => self.c = value,
            Reg::D => self.d = value,
            Reg::E => self.e = value,
            Reg::H => self.h = value,
            Reg::L => self.l = value,
            _ => unreachable!("write8 on 16-bit register {:?}", reg),
        }
    }

    /// Read a register pair (or PC/SP) as its program-visible 16-bit value.
    pub fn read16(&self, reg: Reg) -> u16 {
        match reg {
            Reg::AF => u16::from_be_bytes([self.a, self.f & 0xF0]),
            Reg::BC => u16::from_be_bytes([self.b, self.c]),
            Reg::DE => u16::from_be_bytes([self.d, self.e]),
            Reg::HL => u16::from_be_bytes([self.h, self.l]),
            Reg::SP => self.sp,
            Reg::PC => self.pc,
            _ => unreachable!("read16 on 8-bit register {:?}", reg),
        }
    }

    pub fn write16(&mut self, reg: Reg, value: u16) {
        match reg {
            Reg::AF => {
                let [a, f] = value.to_be_bytes();
                self.a = a;
                // Lower 4 bits of F are always zero.
                self.f = f & 0xF0;
            }
            Reg::BC => {
                let [b, c] = value.to_be_bytes();
                self.b = b;
                self.c = c;
            }
            Reg::DE => {
                let [d, e] = value.to_be_bytes();
                self.d = d;
                self.e = e;
            }
            Reg::HL => {
                let [h, l] = value.to_be_bytes();
                self.h = h;
                self.l = l;
            }
            Reg::SP => self.sp = value,
            Reg::PC => self.pc = value,
            _ => unreachable!("write16 on 8-bit register {:?}", reg),
        }
    }

    #[inline]
    pub fn flag(&self, flag: Flag) -> bool {
        (self.f & (1 << flag as u8)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        if value {
            self.f |= 1 << flag as u8;
        } else {
            self.f &= !(1 << flag as u8);
        }
    }

    /// Bulk flag update. `None` leaves the corresponding bit untouched,
    /// which matches the per-flag "unchanged" rule of the flag tables.
    pub fn apply_flags(
        &mut self,
        z: Option<bool>,
        n: Option<bool>,
        h: Option<bool>,
        c: Option<bool>,
    ) {
        if let Some(z) = z {
            self.set_flag(Flag::Z, z);
        }
        if let Some(n) = n {
            self.set_flag(Flag::N, n);
        }
        if let Some(h) = h {
            self.set_flag(Flag::H, h);
        }
        if let Some(c) = c {
            self.set_flag(Flag::C, c);
        }
    }
}
