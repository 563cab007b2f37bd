//! # Load and Store Instructions
//!
//! This module implements register load and store operations:
//! - LDA / LDX / LDY: Load a register from memory (updates Z and N)
//! - STA / STX / STY: Store a register to memory (no flags)
//!
//! Stores go through the engine's write path so a write into the display
//! window raises the dirty signal.

use super::{effective_address, read_operand};
use crate::cpu::DecodedInstruction;
use crate::{AddressSpace, CPU};

/// Executes the LDA (Load Accumulator) instruction.
///
/// # Examples
///
/// ```
/// use nes6502::{CPU, FlatMirrored};
///
/// let mut cpu = CPU::new(FlatMirrored::new());
/// cpu.load_program(0x0600, &[0xA9, 0x80]); // LDA #$80
///
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.a(), 0x80);
/// assert!(cpu.flag_n());
/// assert!(!cpu.flag_z());
/// ```
pub(crate) fn execute_lda<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    let value = read_operand(cpu, instr);
    cpu.state.a = value;
    cpu.state.set_zn(value);
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    let value = read_operand(cpu, instr);
    cpu.state.x = value;
    cpu.state.set_zn(value);
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    let value = read_operand(cpu, instr);
    cpu.state.y = value;
    cpu.state.set_zn(value);
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    cpu.write(effective_address(instr), cpu.state.a);
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    cpu.write(effective_address(instr), cpu.state.x);
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    cpu.write(effective_address(instr), cpu.state.y);
}
