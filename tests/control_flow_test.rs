//! Tests for JMP, JSR, RTS, RTI, BRK and NOP.

use nes6502::{AddressSpace, BreakMode, CpuConfig, FlatMirrored, SegmentedMap, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMirrored> {
    let mut cpu = CPU::new(FlatMirrored::new());
    cpu.load_program(0x0600, program);
    cpu
}

// ========== JMP ==========

#[test]
fn test_jmp_absolute() {
    let mut cpu = setup_cpu(&[0x4C, 0x34, 0x07]);
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0734);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_jmp_indirect() {
    let mut cpu = setup_cpu(&[0x6C, 0x20, 0x00]);
    cpu.memory_mut().write16(0x0020, 0x0650);
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0650);
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_jmp_indirect_reads_across_page() {
    // The pointer high byte comes from $0300, not $0200
    let mut cpu = setup_cpu(&[0x6C, 0xFF, 0x02]);
    cpu.memory_mut().write8(0x02FF, 0x00);
    cpu.memory_mut().write8(0x0300, 0x07);
    cpu.memory_mut().write8(0x0200, 0x05);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0700);
}

// ========== JSR / RTS ==========

#[test]
fn test_jsr_pushes_last_byte_address() {
    let mut cpu = setup_cpu(&[0x20, 0x00, 0x07]);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0700);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.memory().read8(0x01FF), 0x06);
    assert_eq!(cpu.memory().read8(0x01FE), 0x02);
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_jsr_rts_round_trip() {
    // JSR $0610; LDX #$01; BRK; ... $0610: LDA #$07; RTS
    let mut program = vec![0xEA; 0x20];
    program[..6].copy_from_slice(&[0x20, 0x10, 0x06, 0xA2, 0x01, 0x00]);
    program[0x10..0x13].copy_from_slice(&[0xA9, 0x07, 0x60]);
    let mut cpu = setup_cpu(&program);

    cpu.step().unwrap(); // JSR
    cpu.step().unwrap(); // LDA
    cpu.step().unwrap(); // RTS
    assert_eq!(cpu.pc(), 0x0603);
    assert_eq!(cpu.sp(), 0xFF);

    cpu.step().unwrap(); // LDX
    cpu.step().unwrap(); // BRK
    assert_eq!(cpu.a(), 0x07);
    assert_eq!(cpu.x(), 0x01);
    assert!(cpu.is_halted());
}

// ========== RTI ==========

#[test]
fn test_rti_pulls_status_then_pc() {
    let mut cpu = setup_cpu(&[0x40]);
    cpu.set_sp(0xFC);
    cpu.memory_mut().write8(0x01FD, 0b1100_0011); // N V Z C
    cpu.memory_mut().write8(0x01FE, 0x34);
    cpu.memory_mut().write8(0x01FF, 0x06);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0634);
    assert_eq!(cpu.sp(), 0xFF);
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_i());
}

// ========== BRK ==========

#[test]
fn test_brk_halts_by_default() {
    let mut cpu = setup_cpu(&[0x00, 0xE8]);

    cpu.step().unwrap();

    assert!(cpu.is_halted());
    assert_eq!(cpu.pc(), 0x0601);
    assert_eq!(cpu.sp(), 0xFF);

    // No fetches while halted
    cpu.step().unwrap();
    cpu.run_for_cycles(50).unwrap();
    assert_eq!(cpu.x(), 0);
    assert_eq!(cpu.instructions_executed(), 1);
}

#[test]
fn test_resume_after_brk() {
    let mut cpu = setup_cpu(&[0x00, 0xE8]);
    cpu.step().unwrap();

    cpu.resume();
    cpu.step().unwrap();

    assert!(!cpu.is_halted());
    assert_eq!(cpu.x(), 1);
}

#[test]
fn test_brk_interrupt_mode() {
    let mut mem = SegmentedMap::new();
    mem.write16(0xFFFE, 0x9000);
    mem.load(0x8000, &[0x00]);
    let config = CpuConfig::default().with_break_mode(BreakMode::Interrupt);
    let mut cpu = CPU::with_config(mem, config);
    cpu.set_pc(0x8000);
    cpu.set_sp(0xFF);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert!(!cpu.is_halted());
    assert_eq!(cpu.pc(), 0x9000);
    assert!(cpu.flag_i());
    assert_eq!(cpu.sp(), 0xFC);
    // Return address is BRK + 2
    assert_eq!(cpu.memory().read8(0x01FF), 0x80);
    assert_eq!(cpu.memory().read8(0x01FE), 0x02);
    // Break and reserved bits set in the pushed copy only
    assert_eq!(cpu.memory().read8(0x01FD), 0b0011_0001);
    assert_eq!(cpu.cycles(), 7);
}

#[test]
fn test_brk_then_rti_returns_past_padding() {
    let mut mem = SegmentedMap::new();
    mem.write16(0xFFFE, 0x9000);
    mem.load(0x8000, &[0x00, 0xFF, 0xE8]); // BRK; padding; INX
    mem.load(0x9000, &[0x40]); // RTI
    let config = CpuConfig::default().with_break_mode(BreakMode::Interrupt);
    let mut cpu = CPU::with_config(mem, config);
    cpu.set_pc(0x8000);
    cpu.set_sp(0xFF);

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8002);
    assert!(!cpu.flag_i());

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 1);
}

// ========== NOP ==========

#[test]
fn test_nop() {
    let mut cpu = setup_cpu(&[0xEA]);
    let before = cpu.state().clone();

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0601);
    assert_eq!(cpu.a(), before.a);
    assert_eq!(cpu.status(), before.status_byte(false));
    assert_eq!(cpu.cycles(), 2);
}
