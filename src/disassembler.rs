//! 6502 Disassembler Module
//!
//! Converts binary machine code into human-readable assembly mnemonics, and
//! renders one-line execution traces for a running engine.

pub mod decoder;
pub mod formatter;

use crate::addressing::AddressingMode;
use crate::opcodes::Operation;
use crate::{AddressSpace, CPU};

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte value (0x00-0xFF)
    pub opcode: u8,

    /// Decoded operation. [`Operation::Invalid`] marks a `.byte` directive.
    pub operation: Operation,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes (0-2 bytes depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (1-3 bytes: opcode + operands)
    pub size_bytes: u8,

    /// Base cycle cost
    pub base_cycles: u8,
}

impl Instruction {
    /// Mnemonic text, or `.byte` for an undecodable byte.
    pub fn mnemonic(&self) -> &'static str {
        if self.operation.is_valid() {
            self.operation.mnemonic()
        } else {
            ".byte"
        }
    }

    fn data_byte(address: u16, byte: u8) -> Self {
        Self {
            address,
            opcode: byte,
            operation: Operation::Invalid,
            addressing_mode: AddressingMode::Implied,
            operand_bytes: Vec::new(),
            size_bytes: 1,
            base_cycles: 0,
        }
    }
}

/// Options controlling disassembly output
#[derive(Debug, Clone, Copy, Default)]
pub struct DisassemblyOptions {
    /// Address of the first byte (affects address display and branch targets)
    pub start_address: u16,

    /// Whether [`listing`] includes the raw instruction bytes
    pub hex_dump: bool,
}

/// Disassemble a byte slice into a vector of instructions
///
/// Bytes the decode table marks invalid, and a truncated instruction at the
/// end of the slice, come out as one-byte `.byte` entries.
///
/// # Examples
///
/// ```
/// use nes6502::{disassemble, format_instruction, DisassemblyOptions};
///
/// let options = DisassemblyOptions { start_address: 0x0600, ..Default::default() };
/// let code = disassemble(&[0xA9, 0x00, 0xF0, 0x02, 0x02], options);
///
/// let text: Vec<String> = code.iter().map(format_instruction).collect();
/// assert_eq!(text, ["LDA #$00", "BEQ $0606", ".byte $02"]);
/// ```
pub fn disassemble(bytes: &[u8], options: DisassemblyOptions) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut pc = 0;
    let mut address = options.start_address;

    while pc < bytes.len() {
        let instr = decoder::decode_instruction(&bytes[pc..], address)
            .unwrap_or_else(|| Instruction::data_byte(address, bytes[pc]));

        pc += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
        instructions.push(instr);
    }

    instructions
}

/// Renders a byte slice as a multi-line listing, one instruction per line.
pub fn listing(bytes: &[u8], options: DisassemblyOptions) -> String {
    disassemble(bytes, options)
        .iter()
        .map(|instr| {
            if options.hex_dump {
                format!(
                    "{:04X}  {:<9} {}\n",
                    instr.address,
                    formatter::format_bytes(instr),
                    formatter::format_instruction(instr)
                )
            } else {
                format!("{:04X}  {}\n", instr.address, formatter::format_instruction(instr))
            }
        })
        .collect()
}

/// One trace line for the instruction at PC, followed by the register dump.
///
/// Reads memory without side effects; the engine is not advanced.
///
/// ```
/// use nes6502::{trace_line, CPU, FlatMirrored};
///
/// let mut cpu = CPU::new(FlatMirrored::new());
/// cpu.load_program(0x0600, &[0xA9, 0x05]);
///
/// assert_eq!(
///     trace_line(&cpu),
///     "0600  A9 05     LDA #$05      A:00 X:00 Y:00 SP:FF PC:0600 P:--------"
/// );
/// ```
pub fn trace_line<M: AddressSpace>(cpu: &CPU<M>) -> String {
    let pc = cpu.pc();
    let memory = cpu.memory();
    let window = [
        memory.read8(pc),
        memory.read8(pc.wrapping_add(1)),
        memory.read8(pc.wrapping_add(2)),
    ];

    let instr = decoder::decode_instruction(&window, pc)
        .unwrap_or_else(|| Instruction::data_byte(pc, window[0]));

    format!(
        "{:04X}  {:<9} {:<13} {}",
        pc,
        formatter::format_bytes(&instr),
        formatter::format_instruction(&instr),
        cpu.state()
    )
}
