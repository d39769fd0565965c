//! Host side of the emulator: wires a ROM image to the SM83 core and
//! drives the step loop.

use anyhow::{Context, Result};
use dotmatrix_sm83::{Cpu, FlatCartridge, SystemBus};

/// What the run loop observed before it stopped.
pub struct RunSummary {
    pub steps: u64,
    pub cycles: u64,
    pub pc: u16,
}

/// Execute `rom_data` from the cartridge entry point.
///
/// Stops at the first HALT (there are no interrupts to wake the core),
/// after `max_steps` instructions, or on a fault, whichever comes first.
pub fn run(rom_data: &[u8], max_steps: u64) -> Result<RunSummary> {
    let mut bus = SystemBus::new(FlatCartridge::new(rom_data.to_vec()));
    let mut cpu = Cpu::new();

    let mut steps = 0;
    while steps < max_steps && !cpu.halted {
        cpu.step(&mut bus)
            .with_context(|| format!("execution stopped after {} instructions", steps))?;
        steps += 1;
    }

    if cpu.halted {
        log::info!("core halted after {} instructions", steps);
    } else {
        log::info!("instruction limit ({}) reached", max_steps);
    }

    Ok(RunSummary {
        steps,
        cycles: cpu.cycles(),
        pc: cpu.regs.pc,
    })
}
