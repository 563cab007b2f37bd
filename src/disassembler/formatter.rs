//! Formatting functions for disassembled instructions

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;
use crate::opcodes::Operation;

/// Format a single instruction as assembly text
///
/// # Arguments
///
/// * `instr` - The instruction to format
///
/// # Returns
///
/// A string containing the formatted assembly instruction
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic().to_string()
    } else {
        format!("{} {}", instr.mnemonic(), operand)
    }
}

/// Space-separated hex of the opcode and its operand bytes.
pub fn format_bytes(instr: &Instruction) -> String {
    std::iter::once(instr.opcode)
        .chain(instr.operand_bytes.iter().copied())
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_shift(operation: Operation) -> bool {
    matches!(
        operation,
        Operation::Asl | Operation::Lsr | Operation::Rol | Operation::Ror
    )
}

/// Format the operand based on addressing mode
fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    // .byte directive for undecodable bytes
    if !instr.operation.is_valid() {
        return format!("${:02X}", instr.opcode);
    }

    let byte = instr.operand_bytes.first().copied().unwrap_or_default();
    let word = match instr.operand_bytes.as_slice() {
        [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]),
        _ => 0,
    };

    match instr.addressing_mode {
        // Accumulator shifts share the implied encoding.
        Implied if is_shift(instr.operation) => "A".to_string(),
        Implied => String::new(),
        Immediate => format!("#${:02X}", byte),
        ZeroPage => format!("${:02X}", byte),
        ZeroPageX => format!("${:02X},X", byte),
        ZeroPageY => format!("${:02X},Y", byte),
        Relative => {
            let target = instr
                .address
                .wrapping_add(instr.size_bytes as u16)
                .wrapping_add_signed(byte as i8 as i16);
            format!("${:04X}", target)
        }
        Absolute => format!("${:04X}", word),
        AbsoluteX => format!("${:04X},X", word),
        AbsoluteY => format!("${:04X},Y", word),
        Indirect => format!("(${:04X})", word),
        IndirectX => format!("(${:02X},X)", byte),
        IndirectY => format!("(${:02X}),Y", byte),
    }
}
