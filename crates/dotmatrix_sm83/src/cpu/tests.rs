use super::*;
use crate::bus::SystemBus;
use crate::cartridge::FlatCartridge;

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> Result<u8, BusError> {
        Ok(self.memory[addr as usize])
    }

    fn write8(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        self.memory[addr as usize] = value;
        Ok(())
    }
}

/// A fresh CPU with `program` placed at the entry point.
fn cpu_with_program(program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    let base = ENTRY_POINT as usize;
    bus.memory[base..base + program.len()].copy_from_slice(program);
    (Cpu::new(), bus)
}

#[test]
fn power_on_state() {
    let cpu = Cpu::new();
    assert_eq!(cpu.regs.pc, ENTRY_POINT);
    assert_eq!(cpu.regs.a, 0x01);
    assert_eq!(cpu.regs.sp, 0x0000);
    assert!(!cpu.halted);
    assert!(!cpu.ime);
    assert_eq!(cpu.cycles(), 0);
}

#[test]
fn add_sets_half_carry() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x80]); // ADD A, B
    cpu.regs.a = 0x0F;
    cpu.regs.b = 0x01;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x10);
    assert!(!cpu.regs.flag(Flag::Z));
    assert!(!cpu.regs.flag(Flag::N));
    assert!(cpu.regs.flag(Flag::H));
    assert!(!cpu.regs.flag(Flag::C));
}

#[test]
fn add_sets_carry_and_zero() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x80]); // ADD A, B
    cpu.regs.a = 0x80;
    cpu.regs.b = 0x80;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.flag(Flag::Z));
    assert!(!cpu.regs.flag(Flag::H));
    assert!(cpu.regs.flag(Flag::C));
}

#[test]
fn sbc_borrows_through_carry() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x98]); // SBC A, B
    cpu.regs.a = 0x10;
    cpu.regs.b = 0x0F;
    cpu.regs.set_flag(Flag::C, true);

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::N));
    assert!(cpu.regs.flag(Flag::H));
    assert!(!cpu.regs.flag(Flag::C));
}

#[test]
fn xor_a_clears_accumulator() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xAF]); // XOR A
    cpu.regs.a = 0x5A;
    cpu.regs.set_flag(Flag::C, true);

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0);
    assert!(cpu.regs.flag(Flag::Z));
    assert!(!cpu.regs.flag(Flag::N));
    assert!(!cpu.regs.flag(Flag::H));
    assert!(!cpu.regs.flag(Flag::C));
}

#[test]
fn cp_discards_result() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xFE, 0x90]); // CP 0x90
    cpu.regs.a = 0x3C;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x3C);
    assert!(!cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::N));
    assert!(!cpu.regs.flag(Flag::H));
    assert!(cpu.regs.flag(Flag::C));
}

#[test]
fn daa_adjusts_bcd_sum() {
    // 0x45 + 0x55 = 0x9A binary; DAA folds it back to BCD 0x00 carry 1.
    let (mut cpu, mut bus) = cpu_with_program(&[0x27]); // DAA
    cpu.regs.a = 0x9A;
    cpu.regs.set_flag(Flag::N, false);
    cpu.regs.set_flag(Flag::H, false);
    cpu.regs.set_flag(Flag::C, false);

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::C));
    assert!(!cpu.regs.flag(Flag::H));
}

#[test]
fn inc_hl_memory_read_modify_write() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x34]); // INC (HL)
    cpu.regs.write16(Reg::HL, 0xC000);
    bus.memory[0xC000] = 0xFF;
    cpu.regs.set_flag(Flag::C, true);

    cpu.step(&mut bus).unwrap();

    assert_eq!(bus.memory[0xC000], 0x00);
    assert!(cpu.regs.flag(Flag::Z));
    assert!(!cpu.regs.flag(Flag::N));
    assert!(cpu.regs.flag(Flag::H));
    // INC never touches carry.
    assert!(cpu.regs.flag(Flag::C));
}

#[test]
fn inc16_leaves_flags_alone() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x03]); // INC BC
    cpu.regs.write16(Reg::BC, 0x00FF);
    cpu.regs.f = 0xF0;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.read16(Reg::BC), 0x0100);
    assert_eq!(cpu.regs.f, 0xF0);
    assert_eq!(cpu.cycles(), 1);
}

#[test]
fn dec_sets_half_borrow() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x05]); // DEC B
    cpu.regs.b = 0x10;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.b, 0x0F);
    assert!(!cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::N));
    assert!(cpu.regs.flag(Flag::H));
}

#[test]
fn add_sp_e8_flags_from_low_byte() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xE8, 0x08]); // ADD SP, 8
    cpu.regs.sp = 0xFFF8;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.sp, 0x0000);
    assert!(!cpu.regs.flag(Flag::Z));
    assert!(!cpu.regs.flag(Flag::N));
    assert!(cpu.regs.flag(Flag::H));
    assert!(cpu.regs.flag(Flag::C));
}

#[test]
fn ld_hl_sp_plus_e8() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xF8, 0x08]); // LD HL, SP+8
    cpu.regs.sp = 0xFFF8;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.read16(Reg::HL), 0x0000);
    // SP itself is untouched.
    assert_eq!(cpu.regs.sp, 0xFFF8);
    assert!(!cpu.regs.flag(Flag::Z));
    assert!(cpu.regs.flag(Flag::H));
    assert!(cpu.regs.flag(Flag::C));
}

#[test]
fn ld_hli_a_stores_and_advances() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x22]); // LD (HL+), A
    cpu.regs.a = 0x42;
    cpu.regs.write16(Reg::HL, 0xC000);

    cpu.step(&mut bus).unwrap();

    assert_eq!(bus.memory[0xC000], 0x42);
    assert_eq!(cpu.regs.read16(Reg::HL), 0xC001);
}

#[test]
fn ld_a16_sp_stores_both_bytes() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x08, 0x00, 0xC0]); // LD (0xC000), SP
    cpu.regs.sp = 0xFFFE;

    cpu.step(&mut bus).unwrap();

    assert_eq!(bus.memory[0xC000], 0xFE);
    assert_eq!(bus.memory[0xC001], 0xFF);
}

#[test]
fn ld_to_ie_address_lands_in_cpu() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xEA, 0xFF, 0xFF]); // LD (0xFFFF), A
    cpu.regs.a = 0x1F;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.interrupt_enable(), 0x1F);
    // The write never reached the bus.
    assert_eq!(bus.memory[0xFFFF], 0x00);
}

#[test]
fn jr_backward_displacement() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x18, 0xFE]); // JR -2
    cpu.step(&mut bus).unwrap();

    // -2 from the PC after the operand lands back on the JR itself.
    assert_eq!(cpu.regs.pc, ENTRY_POINT);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn call_nz_not_taken_still_consumes_operand() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xC4, 0x00, 0x20]); // CALL NZ, 0x2000
    cpu.regs.sp = 0xFFFE;
    cpu.regs.set_flag(Flag::Z, true);

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    // Only the two operand-byte fetches were charged.
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn call_pushes_return_address() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xCD, 0x00, 0x20]); // CALL 0x2000
    cpu.regs.sp = 0xFFFE;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.pc, 0x2000);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    // Return address 0x0103, low byte at the lower address.
    assert_eq!(bus.memory[0xFFFC], 0x03);
    assert_eq!(bus.memory[0xFFFD], 0x01);
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn ret_cc_charges_condition_cycle() {
    // Not taken: RET NZ with Z set.
    let (mut cpu, mut bus) = cpu_with_program(&[0xC0]); // RET NZ
    cpu.regs.sp = 0xFFFC;
    cpu.regs.set_flag(Flag::Z, true);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x0101);
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(cpu.cycles(), 1);

    // Taken: same opcode with Z clear.
    let (mut cpu, mut bus) = cpu_with_program(&[0xC0]);
    cpu.regs.sp = 0xFFFC;
    bus.memory[0xFFFC] = 0x34;
    bus.memory[0xFFFD] = 0x12;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x1234);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn ret_unconditional_skips_condition_cycle() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xC9]); // RET
    cpu.regs.sp = 0xFFFC;
    bus.memory[0xFFFC] = 0x34;
    bus.memory[0xFFFD] = 0x12;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, 0x1234);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn reti_restores_ime() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xD9]); // RETI
    cpu.regs.sp = 0xFFFC;
    assert!(!cpu.ime);

    cpu.step(&mut bus).unwrap();
    assert!(cpu.ime);
}

#[test]
fn rst_jumps_to_fixed_vector() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xEF]); // RST 0x28
    cpu.regs.sp = 0xFFFE;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.pc, 0x0028);
    assert_eq!(bus.memory[0xFFFC], 0x01);
}

#[test]
fn stack_unit_round_trips_and_restores_sp() {
    let mut cpu = Cpu::new();
    let mut bus = TestBus::default();
    cpu.regs.sp = 0xFFFE;

    for value in [0x0000u16, 0x0001, 0x1234, 0x8000, 0xFFFF] {
        cpu.push16(&mut bus, value).unwrap();
        // High byte ends up at the higher address.
        assert_eq!(bus.memory[0xFFFD], (value >> 8) as u8);
        assert_eq!(bus.memory[0xFFFC], value as u8);
        assert_eq!(cpu.pop16(&mut bus), Ok(value));
        assert_eq!(cpu.regs.sp, 0xFFFE);
    }
}

#[test]
fn push_pop_round_trip() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xC5, 0xD1]); // PUSH BC; POP DE
    cpu.regs.sp = 0xFFFE;
    cpu.regs.write16(Reg::BC, 0xABCD);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.sp, 0xFFFC);
    assert_eq!(bus.memory[0xFFFC], 0xCD);
    assert_eq!(bus.memory[0xFFFD], 0xAB);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.read16(Reg::DE), 0xABCD);
    assert_eq!(cpu.regs.sp, 0xFFFE);
}

#[test]
fn pop_af_masks_low_nibble() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xF1]); // POP AF
    cpu.regs.sp = 0xFFFC;
    bus.memory[0xFFFC] = 0xFF;
    bus.memory[0xFFFD] = 0x12;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.read16(Reg::AF), 0x12F0);
}

#[test]
fn halt_idles_one_cycle_per_step() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x76]); // HALT
    cpu.step(&mut bus).unwrap();
    assert!(cpu.halted);

    let pc = cpu.regs.pc;
    let before = cpu.cycles();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.pc, pc);
    assert_eq!(cpu.cycles(), before + 1);
}

#[test]
fn di_clears_ime() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xF3]); // DI
    cpu.ime = true;

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.ime);
}

#[test]
fn scf_and_ccf() {
    let (mut cpu, mut bus) = cpu_with_program(&[0x37, 0x3F]); // SCF; CCF
    cpu.regs.set_flag(Flag::Z, true);
    cpu.regs.set_flag(Flag::N, true);
    cpu.regs.set_flag(Flag::H, true);

    cpu.step(&mut bus).unwrap();
    assert!(cpu.regs.flag(Flag::C));
    assert!(!cpu.regs.flag(Flag::N));
    assert!(!cpu.regs.flag(Flag::H));
    // Z rides along untouched.
    assert!(cpu.regs.flag(Flag::Z));

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.regs.flag(Flag::C));
}

#[test]
fn cb_swap_exchanges_nibbles() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x37]); // SWAP A
    cpu.regs.a = 0xF1;
    cpu.regs.set_flag(Flag::C, true);

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x1F);
    assert!(!cpu.regs.flag(Flag::Z));
    assert!(!cpu.regs.flag(Flag::C));
}

#[test]
fn cb_bit_tests_without_touching_carry() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x7C]); // BIT 7, H
    cpu.regs.h = 0x80;
    cpu.regs.set_flag(Flag::C, true);

    cpu.step(&mut bus).unwrap();

    assert!(!cpu.regs.flag(Flag::Z));
    assert!(!cpu.regs.flag(Flag::N));
    assert!(cpu.regs.flag(Flag::H));
    assert!(cpu.regs.flag(Flag::C));
}

#[test]
fn cb_res_and_set_flip_single_bits() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x87, 0xCB, 0xD8]); // RES 0, A; SET 3, B
    cpu.regs.a = 0xFF;
    cpu.regs.b = 0x00;

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.a, 0xFE);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.regs.b, 0x08);
}

#[test]
fn cb_rl_rotates_through_carry() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x11]); // RL C
    cpu.regs.c = 0x80;
    cpu.regs.set_flag(Flag::C, true);

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.c, 0x01);
    assert!(cpu.regs.flag(Flag::C));
    assert!(!cpu.regs.flag(Flag::Z));
}

#[test]
fn cb_sra_preserves_sign_bit() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x2F]); // SRA A
    cpu.regs.a = 0x81;

    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0xC0);
    assert!(cpu.regs.flag(Flag::C));
}

#[test]
fn cb_memory_operand_goes_through_the_bus() {
    let (mut cpu, mut bus) = cpu_with_program(&[0xCB, 0x06]); // RLC (HL)
    cpu.regs.write16(Reg::HL, 0xC000);
    bus.memory[0xC000] = 0x81;

    cpu.step(&mut bus).unwrap();

    assert_eq!(bus.memory[0xC000], 0x03);
    assert!(cpu.regs.flag(Flag::C));
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn unknown_opcodes_are_decode_errors() {
    for opcode in [0xFB, 0xD3, 0x10] {
        let (mut cpu, mut bus) = cpu_with_program(&[opcode]);
        assert_eq!(
            cpu.step(&mut bus),
            Err(StepError::UnknownOpcode {
                opcode,
                pc: ENTRY_POINT,
            })
        );
    }
}

#[test]
fn bus_errors_surface_from_step() {
    let rom = {
        let mut rom = vec![0u8; 0x0101];
        rom[0x0100] = 0x77; // LD (HL), A
        rom
    };
    let mut bus = SystemBus::new(FlatCartridge::new(rom));
    let mut cpu = Cpu::new();
    cpu.regs.write16(Reg::HL, 0x8000);

    assert_eq!(
        cpu.step(&mut bus),
        Err(StepError::Bus(BusError::UnmappedWrite {
            addr: 0x8000,
            region: "video RAM",
        }))
    );
}

#[test]
fn ldh_round_trips_through_high_ram() {
    let rom = {
        let mut rom = vec![0u8; 0x0104];
        // LDH (0x80), A; LDH A, (0x80)
        rom[0x0100..0x0104].copy_from_slice(&[0xE0, 0x80, 0xF0, 0x80]);
        rom
    };
    let mut bus = SystemBus::new(FlatCartridge::new(rom));
    let mut cpu = Cpu::new();
    cpu.regs.a = 0x5A;

    cpu.step(&mut bus).unwrap();
    cpu.regs.a = 0x00;
    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.regs.a, 0x5A);
    assert_eq!(cpu.regs.pc, 0x0104);
}

#[test]
fn straight_line_program() {
    // LD A, 5; ADD A, 3; NOP
    let (mut cpu, mut bus) = cpu_with_program(&[0x3E, 0x05, 0xC6, 0x03, 0x00]);

    for _ in 0..3 {
        cpu.step(&mut bus).unwrap();
    }

    assert_eq!(cpu.regs.a, 0x08);
    assert_eq!(cpu.regs.pc, 0x0105);
}
