//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic, logical and compare operations:
//! - ADC / SBC: Add and subtract with carry (binary only; the D flag is ignored)
//! - AND / ORA / EOR: Bitwise logic into the accumulator
//! - BIT: Bit test
//! - CMP / CPX / CPY: Register compares

use super::read_operand;
use crate::cpu::DecodedInstruction;
use crate::{AddressSpace, CPU};

/// Adds `value` and the carry flag to the accumulator, updating N, V, Z and C.
///
/// Shared by ADC and SBC; SBC passes the one's complement of its operand.
fn add_with_carry<M: AddressSpace>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.state.a;
    let carry_in = cpu.state.flag_c as u16;

    let sum = a as u16 + value as u16 + carry_in;
    let result = sum as u8;

    // Carry flag: the true sum does not fit in 8 bits
    cpu.state.flag_c = sum > 0xFF;

    // Overflow: both inputs share a sign that the result does not
    cpu.state.flag_v = (a ^ result) & (value ^ result) & 0x80 != 0;

    cpu.state.a = result;
    cpu.state.set_zn(result);
}

/// Executes the ADC (Add with Carry) instruction.
pub(crate) fn execute_adc<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    let value = read_operand(cpu, instr);
    add_with_carry(cpu, value);
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// `A - M - (1 - C)` equals `A + !M + C` in 8 bits, so Carry ends up set when no
/// borrow occurred.
pub(crate) fn execute_sbc<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    let value = read_operand(cpu, instr);
    add_with_carry(cpu, !value);
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    let result = cpu.state.a & read_operand(cpu, instr);
    cpu.state.a = result;
    cpu.state.set_zn(result);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    let result = cpu.state.a | read_operand(cpu, instr);
    cpu.state.a = result;
    cpu.state.set_zn(result);
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    let result = cpu.state.a ^ read_operand(cpu, instr);
    cpu.state.a = result;
    cpu.state.set_zn(result);
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set from `A & M`; N and V are copied from bits 7 and 6 of the operand.
/// The accumulator is not modified.
pub(crate) fn execute_bit<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    let value = read_operand(cpu, instr);
    cpu.state.flag_z = cpu.state.a & value == 0;
    cpu.state.flag_n = value & 0x80 != 0;
    cpu.state.flag_v = value & 0x40 != 0;
}

/// Unsigned compare of a register against memory.
fn compare<M: AddressSpace>(cpu: &mut CPU<M>, register: u8, value: u8) {
    cpu.state.flag_c = register >= value;
    cpu.state.flag_z = register == value;
    cpu.state.flag_n = register.wrapping_sub(value) & 0x80 != 0;
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    let (register, value) = (cpu.state.a, read_operand(cpu, instr));
    compare(cpu, register, value);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    let (register, value) = (cpu.state.x, read_operand(cpu, instr));
    compare(cpu, register, value);
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    let (register, value) = (cpu.state.y, read_operand(cpu, instr));
    compare(cpu, register, value);
}
