//! End-to-end program scenarios on the flat tutorial layout.

use nes6502::display::{render_frame, PALETTE, SCREEN_START};
use nes6502::{trace_line, AddressSpace, FlatMirrored, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMirrored> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut cpu = CPU::new(FlatMirrored::new());
    cpu.load_program(0x0600, program);
    cpu
}

/// Steps until BRK halts the engine, with a safety limit.
fn run_to_brk(cpu: &mut CPU<FlatMirrored>) {
    for _ in 0..10_000 {
        if cpu.is_halted() {
            return;
        }
        cpu.step().unwrap();
    }
    panic!("program did not halt: {}", trace_line(cpu));
}

#[test]
fn test_load_immediate() {
    let mut cpu = setup_cpu(&[0xA9, 0x05]);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 5);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x0602);
}

#[test]
fn test_load_zero_then_branch() {
    let mut cpu = setup_cpu(&[0xA9, 0x00, 0xF0, 0x02]);

    cpu.step().unwrap();
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x0606);
}

#[test]
fn test_inx_wraps_to_zero() {
    let mut cpu = setup_cpu(&[0xE8]);
    cpu.set_a(0xFF);
    cpu.set_x(0xFF);

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.a(), 0xFF);
}

#[test]
fn test_inx_from_one() {
    let mut cpu = setup_cpu(&[0xE8]);
    cpu.set_a(0xFF);
    cpu.set_x(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x02);
    assert!(!cpu.flag_z());
    assert_eq!(cpu.a(), 0xFF);
}

#[test]
fn test_draw_three_pixels() {
    // The classic first program: white, green and orange pixels
    // LDA #$01; STA $0200; LDA #$05; STA $0201; LDA #$08; STA $0202; BRK
    let mut cpu = setup_cpu(&[
        0xA9, 0x01, 0x8D, 0x00, 0x02, 0xA9, 0x05, 0x8D, 0x01, 0x02, 0xA9, 0x08, 0x8D, 0x02,
        0x02, 0x00,
    ]);
    cpu.take_dirty();

    run_to_brk(&mut cpu);

    assert!(cpu.take_dirty());
    let frame = render_frame(cpu.memory());
    assert_eq!(&frame[..4], &[PALETTE[1], PALETTE[5], PALETTE[8], PALETTE[0]]);
    assert_eq!(cpu.pc(), 0x0610);
}

#[test]
fn test_fill_row_with_indexed_store() {
    // LDX #$00; loop: TXA; STA $0200,X; INX; CPX #$20; BNE loop; BRK
    let mut cpu = setup_cpu(&[
        0xA2, 0x00, 0x8A, 0x9D, 0x00, 0x02, 0xE8, 0xE0, 0x20, 0xD0, 0xF7, 0x00,
    ]);

    run_to_brk(&mut cpu);

    for column in 0..32u16 {
        assert_eq!(cpu.memory().read8(SCREEN_START + column), column as u8);
    }
    assert_eq!(cpu.memory().read8(SCREEN_START + 32), 0);
    assert_eq!(cpu.x(), 0x20);
}

#[test]
fn test_subroutine_sum() {
    // Adds 1..=10 with a subroutine per addition.
    //   0600: LDX #$0A
    //   0602: JSR $0610
    //   0605: DEX
    //   0606: BNE $0602
    //   0608: STA $10
    //   060A: BRK
    //   0610: STX $11; CLC; ADC $11; RTS
    let mut program = vec![0xEA; 0x18];
    program[..11].copy_from_slice(&[
        0xA2, 0x0A, 0x20, 0x10, 0x06, 0xCA, 0xD0, 0xFA, 0x85, 0x10, 0x00,
    ]);
    program[0x10..0x16].copy_from_slice(&[0x86, 0x11, 0x18, 0x65, 0x11, 0x60]);
    let mut cpu = setup_cpu(&program);

    run_to_brk(&mut cpu);

    assert_eq!(cpu.memory().read8(0x0010), 55);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_run_for_cycles_matches_instruction_costs() {
    // LDA #$01 (2); STA $00 (3); INC $00 (5); BRK (7)
    let mut cpu = setup_cpu(&[0xA9, 0x01, 0x85, 0x00, 0xE6, 0x00, 0x00]);

    // Each instruction takes its base cost in ticks plus its fetch tick
    let consumed = cpu.run_for_cycles(1_000).unwrap();

    assert!(cpu.is_halted());
    assert_eq!(consumed, (2 + 1) + (3 + 1) + (5 + 1) + 1);
    assert_eq!(cpu.cycles(), 2 + 3 + 5 + 7);
    assert_eq!(cpu.memory().read8(0x0000), 0x02);
}

#[test]
fn test_run_for_cycles_error_keeps_clock_count() {
    // LDA #$01 (2); then an invalid opcode
    let mut cpu = setup_cpu(&[0xA9, 0x01, 0x02]);

    let result = cpu.run_for_cycles(1_000);

    assert!(result.is_err());
    assert!(cpu.is_halted());
    assert_eq!(cpu.clocks(), (2 + 1) + 1);
    assert_eq!(cpu.pc(), 0x0602);
}

#[test]
fn test_clocks_stop_while_halted() {
    let mut cpu = setup_cpu(&[0x00]);

    assert_eq!(cpu.run_for_cycles(10).unwrap(), 1);
    assert_eq!(cpu.run_for_cycles(10).unwrap(), 0);
    assert_eq!(cpu.clocks(), 1);
}

#[test]
fn test_trace_line_tracks_execution() {
    let mut cpu = setup_cpu(&[0xA2, 0x10, 0xE8]);
    cpu.step().unwrap();

    assert_eq!(
        trace_line(&cpu),
        "0602  E8        INX           A:00 X:10 Y:00 SP:FF PC:0602 P:--------"
    );
}
