//! Instruction decoder for the 6502 disassembler

use crate::disassembler::Instruction;
use crate::opcodes::OPCODE_TABLE;

/// Decode a single instruction from a byte slice
///
/// # Arguments
///
/// * `bytes` - The byte slice starting at the instruction to decode
/// * `address` - The memory address of this instruction
///
/// # Returns
///
/// `None` for an empty slice, an opcode the table marks invalid, or an
/// instruction whose operand bytes run past the end of the slice.
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<Instruction> {
    let (&opcode, operands) = bytes.split_first()?;
    let metadata = &OPCODE_TABLE[opcode as usize];

    if !metadata.is_valid() {
        return None;
    }

    let operand_len = metadata.addressing_mode.operand_bytes() as usize;
    let operand_bytes = operands.get(..operand_len)?.to_vec();

    Some(Instruction {
        address,
        opcode,
        operation: metadata.operation,
        addressing_mode: metadata.addressing_mode,
        operand_bytes,
        size_bytes: metadata.size_bytes,
        base_cycles: metadata.base_cycles,
    })
}
