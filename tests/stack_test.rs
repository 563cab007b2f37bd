//! Tests for PHA, PLA, PHP and PLP and the stack page rules.

use nes6502::{AddressSpace, FlatMirrored, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMirrored> {
    let mut cpu = CPU::new(FlatMirrored::new());
    cpu.load_program(0x0600, program);
    cpu
}

#[test]
fn test_pha_pla_round_trip() {
    // PHA; LDA #$00; PLA
    let mut cpu = setup_cpu(&[0x48, 0xA9, 0x00, 0x68]);
    cpu.set_a(0x9C);

    cpu.step().unwrap();
    assert_eq!(cpu.sp(), 0xFE);
    assert_eq!(cpu.memory().read8(0x01FF), 0x9C);

    cpu.step().unwrap();
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x9C);
    assert_eq!(cpu.sp(), 0xFF);
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 3 + 2 + 4);
}

#[test]
fn test_pla_zero_sets_z() {
    let mut cpu = setup_cpu(&[0x68]);
    cpu.set_sp(0xFE);
    cpu.memory_mut().write8(0x01FF, 0x00);
    cpu.set_a(0x33);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_php_sets_break_and_reserved_bits() {
    let mut cpu = setup_cpu(&[0x08]);
    cpu.set_flag_c(true);
    cpu.set_flag_n(true);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read8(0x01FF), 0b1011_0001);
    assert_eq!(cpu.sp(), 0xFE);
}

#[test]
fn test_plp_ignores_reserved_bits() {
    let mut cpu = setup_cpu(&[0x28]);
    cpu.set_sp(0xFE);
    cpu.memory_mut().write8(0x01FF, 0xFF);

    cpu.step().unwrap();

    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_d());
    assert!(cpu.flag_i());
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    // Reading back: bit 5 set, bit 4 absent outside a push
    assert_eq!(cpu.status(), 0b1110_1111);
}

#[test]
fn test_php_plp_restores_flags() {
    // PHP; CLC; CLV; PLP
    let mut cpu = setup_cpu(&[0x08, 0x18, 0xB8, 0x28]);
    cpu.set_flag_c(true);
    cpu.set_flag_v(true);
    cpu.set_flag_z(true);
    let before = cpu.status();

    for _ in 0..4 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.status(), before);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_push_at_bottom_wraps_to_top_of_page() {
    let mut cpu = setup_cpu(&[0x48, 0x48]);
    cpu.set_sp(0x00);
    cpu.set_a(0x11);
    cpu.memory_mut().write8(0x0200, 0xEE);

    cpu.step().unwrap();
    assert_eq!(cpu.memory().read8(0x0100), 0x11);
    assert_eq!(cpu.sp(), 0xFF);

    cpu.step().unwrap();
    assert_eq!(cpu.memory().read8(0x01FF), 0x11);
    // Never spills into page 2
    assert_eq!(cpu.memory().read8(0x0200), 0xEE);
}

#[test]
fn test_pull_at_top_wraps_to_bottom_of_page() {
    let mut cpu = setup_cpu(&[0x68]);
    cpu.set_sp(0xFF);
    cpu.memory_mut().write8(0x0100, 0x42);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.sp(), 0x00);
}

#[test]
fn test_tsx_txs() {
    // TSX; LDX #$00; TXS
    let mut cpu = setup_cpu(&[0xBA, 0xA2, 0x00, 0x9A]);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0xFF);
    assert!(cpu.flag_n());

    cpu.step().unwrap();
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.sp(), 0x00);
    // TXS does not touch flags
    assert!(cpu.flag_z());
}
