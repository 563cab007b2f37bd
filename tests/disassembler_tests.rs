//! Integration tests for the disassembler.

use nes6502::{
    decode_instruction, disassemble, format_instruction, listing, DisassemblyOptions, Operation,
};

fn text_of(bytes: &[u8], start_address: u16) -> Vec<String> {
    let options = DisassemblyOptions {
        start_address,
        ..Default::default()
    };
    disassemble(bytes, options)
        .iter()
        .map(format_instruction)
        .collect()
}

#[test]
fn test_disassemble_program() {
    let code = [
        0xA2, 0x00, // LDX #$00
        0x8A, // TXA
        0x9D, 0x00, 0x02, // STA $0200,X
        0xE8, // INX
        0xE0, 0x20, // CPX #$20
        0xD0, 0xF7, // BNE $0602
        0x00, // BRK
    ];

    assert_eq!(
        text_of(&code, 0x0600),
        [
            "LDX #$00",
            "TXA",
            "STA $0200,X",
            "INX",
            "CPX #$20",
            "BNE $0602",
            "BRK"
        ]
    );
}

#[test]
fn test_invalid_bytes_are_data() {
    let instructions = disassemble(&[0x02, 0xEA], DisassemblyOptions::default());

    assert_eq!(instructions.len(), 2);
    assert_eq!(instructions[0].operation, Operation::Invalid);
    assert_eq!(format_instruction(&instructions[0]), ".byte $02");
    assert_eq!(instructions[1].address, 0x0001);
    assert_eq!(format_instruction(&instructions[1]), "NOP");
}

#[test]
fn test_every_valid_opcode_decodes() {
    for opcode in 0..=255u8 {
        if let Some(instr) = decode_instruction(&[opcode, 0x34, 0x12], 0x0600) {
            assert!(instr.operation.is_valid());
            assert_eq!(instr.operand_bytes.len() + 1, instr.size_bytes as usize);
            assert!(!format_instruction(&instr).is_empty());
        }
    }
}

#[test]
fn test_accumulator_forms() {
    assert_eq!(
        text_of(&[0x0A, 0x4A, 0x2A, 0x6A], 0),
        ["ASL A", "LSR A", "ROL A", "ROR A"]
    );
}

#[test]
fn test_branch_target_wraps_address_space() {
    assert_eq!(text_of(&[0x10, 0x10], 0xFFF0), ["BPL $0002"]);
}

#[test]
fn test_listing() {
    let options = DisassemblyOptions {
        start_address: 0x0600,
        hex_dump: true,
    };
    assert_eq!(
        listing(&[0xA9, 0x01, 0x02], options),
        "0600  A9 01     LDA #$01\n0602  02        .byte $02\n"
    );
}
