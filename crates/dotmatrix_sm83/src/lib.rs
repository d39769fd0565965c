//! SM83 (Game Boy LR35902) instruction-execution core.
//!
//! The crate is split along the hardware seams: a register file with
//! packed flags, a memory bus with an address decoder, a cartridge
//! abstraction, and the CPU itself with its fetch/decode/execute loop
//! and cycle accounting. The bus is a trait so that tests and hosts can
//! supply their own memory maps.

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod instructions;
pub mod ram;
pub mod regs;

pub use bus::{Bus, BusError, SystemBus};
pub use cartridge::{Cartridge, FlatCartridge};
pub use cpu::{Cpu, StepError, ENTRY_POINT};
