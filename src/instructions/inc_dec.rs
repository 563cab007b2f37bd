//! # Increment and Decrement Instructions
//!
//! This module implements increment and decrement operations:
//! - INC / DEC: Read-modify-write on memory
//! - INX / INY / DEX / DEY: Index registers
//!
//! All results wrap modulo 256 and update Z and N.

use super::effective_address;
use crate::cpu::DecodedInstruction;
use crate::{AddressSpace, CPU};

fn modify_memory<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction, delta: i8) {
    let addr = effective_address(instr);
    let result = cpu.read(addr).wrapping_add_signed(delta);
    cpu.write(addr, result);
    cpu.state.set_zn(result);
}

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    modify_memory(cpu, instr, 1);
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    modify_memory(cpu, instr, -1);
}

/// Executes the INX (Increment X Register) instruction.
///
/// # Examples
///
/// ```
/// use nes6502::{CPU, FlatMirrored};
///
/// let mut cpu = CPU::new(FlatMirrored::new());
/// cpu.load_program(0x0600, &[0xE8]); // INX
/// cpu.set_a(0xFF);
/// cpu.set_x(0xFF);
///
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.x(), 0x00);
/// assert!(cpu.flag_z());
/// assert!(!cpu.flag_n());
/// assert_eq!(cpu.a(), 0xFF);
/// ```
pub(crate) fn execute_inx<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.state.x = cpu.state.x.wrapping_add(1);
    cpu.state.set_zn(cpu.state.x);
}

pub(crate) fn execute_iny<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.state.y = cpu.state.y.wrapping_add(1);
    cpu.state.set_zn(cpu.state.y);
}

pub(crate) fn execute_dex<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.state.x = cpu.state.x.wrapping_sub(1);
    cpu.state.set_zn(cpu.state.x);
}

pub(crate) fn execute_dey<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.state.y = cpu.state.y.wrapping_sub(1);
    cpu.state.set_zn(cpu.state.y);
}
