//! Tests for the 256-entry decode table and the engine's handling of each byte.

use nes6502::{
    AddressingMode, CpuConfig, ExecutionError, FlatMirrored, InvalidOpcodePolicy, Operation, CPU,
    OPCODE_TABLE,
};

#[test]
fn test_table_covers_every_byte() {
    assert_eq!(OPCODE_TABLE.len(), 256);
}

#[test]
fn test_valid_entries_have_width() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if metadata.is_valid() {
            assert!(
                (1..=3).contains(&metadata.size_bytes),
                "opcode 0x{:02X} has width {}",
                opcode,
                metadata.size_bytes
            );
            assert!(metadata.base_cycles >= 2, "opcode 0x{:02X}", opcode);
        }
    }
}

#[test]
fn test_each_operation_is_reachable() {
    let mut seen: Vec<Operation> = OPCODE_TABLE
        .iter()
        .filter(|m| m.is_valid())
        .map(|m| m.operation)
        .collect();
    seen.sort_by_key(|op| op.mnemonic());
    seen.dedup();
    assert_eq!(seen.len(), 56);
}

#[test]
fn test_known_entries() {
    let lda = &OPCODE_TABLE[0xA9];
    assert_eq!(lda.operation, Operation::Lda);
    assert_eq!(lda.addressing_mode, AddressingMode::Immediate);
    assert_eq!(lda.size_bytes, 2);
    assert_eq!(lda.base_cycles, 2);
    assert_eq!(lda.mnemonic(), "LDA");

    let jmp = &OPCODE_TABLE[0x6C];
    assert_eq!(jmp.operation, Operation::Jmp);
    assert_eq!(jmp.addressing_mode, AddressingMode::Indirect);
    assert_eq!(jmp.size_bytes, 3);

    let stx = &OPCODE_TABLE[0x96];
    assert_eq!(stx.addressing_mode, AddressingMode::ZeroPageY);
}

/// Every valid opcode advances PC by exactly its width unless it transfers control.
#[test]
fn test_pc_advances_by_width() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if !metadata.is_valid() {
            continue;
        }
        let transfers_control = matches!(
            metadata.operation,
            Operation::Jmp | Operation::Jsr | Operation::Rts | Operation::Rti | Operation::Brk
        ) || metadata.addressing_mode == AddressingMode::Relative;
        if transfers_control {
            continue;
        }

        let mut cpu = CPU::new(FlatMirrored::new());
        cpu.load_program(0x0600, &[opcode as u8, 0x10, 0x00]);
        cpu.step().unwrap();

        assert_eq!(
            cpu.pc(),
            0x0600 + metadata.size_bytes as u16,
            "opcode 0x{:02X}",
            opcode
        );
        assert_eq!(cpu.cycles(), metadata.base_cycles as u64, "opcode 0x{:02X}", opcode);
    }
}

#[test]
fn test_every_invalid_opcode_halts() {
    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if metadata.is_valid() {
            continue;
        }
        let mut cpu = CPU::new(FlatMirrored::new());
        cpu.load_program(0x0600, &[opcode as u8]);

        let result = cpu.step();

        assert_eq!(
            result,
            Err(ExecutionError::InvalidOpcode {
                opcode: opcode as u8,
                address: 0x0600
            })
        );
        assert!(cpu.is_halted());
        assert_eq!(cpu.instructions_executed(), 0);
    }
}

#[test]
fn test_every_invalid_opcode_skips_one_byte() {
    let config = CpuConfig::default().with_invalid_opcode(InvalidOpcodePolicy::Skip);

    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if metadata.is_valid() {
            continue;
        }
        let mut cpu = CPU::with_config(FlatMirrored::new(), config);
        cpu.load_program(0x0600, &[opcode as u8, 0xA9, 0x01]);
        let before = cpu.state().clone();

        cpu.step().unwrap();

        assert_eq!(cpu.pc(), 0x0601, "opcode 0x{:02X}", opcode);
        assert_eq!(cpu.a(), before.a);
        assert_eq!(cpu.status(), before.status_byte(false));
        assert_eq!(cpu.cycles(), 2);
    }
}

#[test]
fn test_error_message() {
    let err = ExecutionError::InvalidOpcode {
        opcode: 0x02,
        address: 0x0600,
    };
    assert_eq!(err.to_string(), "invalid opcode 0x02 at 0x0600");
}
