//! # 6502 CPU Emulator Core
//!
//! An instruction-level MOS 6502 emulator: it fetches opcode bytes from an
//! addressable memory space, decodes them through a 256-entry table, computes
//! effective addresses, mutates registers and flags, and counts cycles.
//!
//! ## Quick Start
//!
//! ```rust
//! use nes6502::{CPU, FlatMirrored};
//!
//! let mut cpu = CPU::new(FlatMirrored::new());
//!
//! // LDA #$00; BEQ +2
//! cpu.load_program(0x0600, &[0xA9, 0x00, 0xF0, 0x02]);
//!
//! cpu.step().unwrap();
//! assert!(cpu.flag_z());
//!
//! cpu.step().unwrap();
//! assert_eq!(cpu.pc(), 0x0606);
//! ```
//!
//! ## Architecture
//!
//! - **Memory layout is injected**: the engine is generic over [`AddressSpace`], with
//!   [`FlatMirrored`] (2 KiB mirrored) and [`SegmentedMap`] (NES CPU map) provided
//! - **Table-driven decode**: [`OPCODE_TABLE`] classifies all 256 opcode bytes
//! - **Closed operation set**: dispatch is an exhaustive match over [`Operation`]
//! - **Deterministic and single-threaded**: no I/O, no internal suspension points
//!
//! ## Modules
//!
//! - `cpu` - Execution engine, configuration, interrupts
//! - `state` - Registers, flags and cycle accounting
//! - `memory` - AddressSpace trait and layouts
//! - `opcodes` - Decode table
//! - `addressing` - Addressing mode enumeration
//! - `disassembler` - Text rendering for tracing tools
//! - `display` - Screen window, palette and input cells of the tutorial machine

pub mod addressing;
pub mod cpu;
pub mod disassembler;
pub mod display;
pub mod memory;
pub mod opcodes;
pub mod state;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use cpu::{BreakMode, CpuConfig, DecodedInstruction, InvalidOpcodePolicy, CPU};
pub use disassembler::{
    decoder::decode_instruction, disassemble, formatter::format_instruction, listing, trace_line,
    DisassemblyOptions, Instruction,
};
pub use memory::{AddressSpace, FlatMirrored, Region, SegmentedMap};
pub use opcodes::{OpcodeMetadata, Operation, OPCODE_TABLE};
pub use state::ProcessorState;

pub use display::render_frame;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The decode table marks this opcode byte invalid and the engine is
    /// configured to treat that as fatal.
    #[error("invalid opcode 0x{opcode:02X} at 0x{address:04X}")]
    InvalidOpcode { opcode: u8, address: u16 },
}

/// Errors from building or filling an address space.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryError {
    /// A raw image did not match the layout's backing store size.
    #[error("memory image is {len} bytes, expected {expected}")]
    ImageSize { len: usize, expected: usize },

    /// A PRG image does not fit the 0x8000-0xFFFF window.
    #[error("cartridge image is {len} bytes, window holds {capacity}")]
    CartridgeTooLarge { len: usize, capacity: usize },
}
