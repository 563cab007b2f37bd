//! # Addressing Modes
//!
//! This module defines the 12 addressing modes the decoder distinguishes.
//! Each mode determines how the CPU interprets operand bytes and calculates
//! effective addresses.
//!
//! Accumulator forms (`ASL A`, `ROR A`, ...) decode as [`AddressingMode::Implied`]:
//! they compute no address and the instruction acts on the register.

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address plus X taken as a signed byte, wrapping in 16 bits.
    ///
    /// With X = 0xFF, `$1000,X` resolves to 0x0FFF.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address plus Y taken as a signed byte, wrapping in 16 bits.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Single-byte address in page zero.
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X, wrapping within page zero.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y, wrapping within page zero.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,

    /// Indirect jump through a 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// The operand is the byte right after the opcode.
    ///
    /// Example: LDA #$10
    Immediate,

    /// Signed 8-bit offset from the address of the next instruction.
    ///
    /// Example: BEQ label
    Relative,

    /// No operand; the instruction acts on a register or has no operand at all.
    ///
    /// Examples: CLC, RTS, LSR A
    Implied,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }

    /// Short lowercase name used in traces (`abs`, `zpx`, `izy`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            AddressingMode::Absolute => "abs",
            AddressingMode::AbsoluteX => "abx",
            AddressingMode::AbsoluteY => "aby",
            AddressingMode::ZeroPage => "zp",
            AddressingMode::ZeroPageX => "zpx",
            AddressingMode::ZeroPageY => "zpy",
            AddressingMode::IndirectX => "izx",
            AddressingMode::IndirectY => "izy",
            AddressingMode::Indirect => "ind",
            AddressingMode::Immediate => "imm",
            AddressingMode::Relative => "rel",
            AddressingMode::Implied => "imp",
        }
    }
}

impl std::fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
