//! Fuzz target for the disassembler.
//!
//! This target feeds arbitrary byte sequences to the disassembler
//! to find edge cases and crashes in instruction decoding.

#![no_main]

use arbitrary::Arbitrary;
use nes6502::{disassemble, format_instruction, listing, DisassemblyOptions};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    start_address: u16,
    hex_dump: bool,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let options = DisassemblyOptions {
        start_address: input.start_address,
        hex_dump: input.hex_dump,
    };

    let instructions = disassemble(&input.bytes, options);

    let mut total_size: usize = 0;
    let mut expected_address = input.start_address;

    for instr in &instructions {
        assert_eq!(instr.address, expected_address);
        assert!((1..=3).contains(&instr.size_bytes));

        // Data bytes carry no operands; real instructions carry size - 1
        if instr.operation.is_valid() {
            assert_eq!(instr.operand_bytes.len() + 1, instr.size_bytes as usize);
        } else {
            assert_eq!(instr.size_bytes, 1);
        }

        assert!(!format_instruction(instr).is_empty());

        total_size += instr.size_bytes as usize;
        expected_address = expected_address.wrapping_add(instr.size_bytes as u16);
    }

    assert_eq!(total_size, input.bytes.len());
    assert_eq!(
        listing(&input.bytes, options).lines().count(),
        instructions.len()
    );
});
