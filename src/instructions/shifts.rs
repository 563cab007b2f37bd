//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through Carry
//! - ROR: Rotate Right through Carry
//!
//! Each has an accumulator form (decoded with no effective address) and a
//! read-modify-write memory form. All four update C, Z and N.

use crate::cpu::DecodedInstruction;
use crate::{AddressSpace, CPU};

/// Applies `op` to the accumulator or to the addressed byte.
///
/// `op` receives the old value and the incoming carry and returns the new
/// value and the outgoing carry.
fn shift_with<M, F>(cpu: &mut CPU<M>, instr: &DecodedInstruction, op: F)
where
    M: AddressSpace,
    F: Fn(u8, bool) -> (u8, bool),
{
    let carry_in = cpu.state.flag_c;

    let result = match instr.address {
        None => {
            let (result, carry) = op(cpu.state.a, carry_in);
            cpu.state.a = result;
            cpu.state.flag_c = carry;
            result
        }
        Some(addr) => {
            let (result, carry) = op(cpu.read(addr), carry_in);
            cpu.write(addr, result);
            cpu.state.flag_c = carry;
            result
        }
    };

    cpu.state.set_zn(result);
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// Bit 0 is set to 0 and bit 7 is placed in the carry flag.
pub(crate) fn execute_asl<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    shift_with(cpu, instr, |value, _| (value << 1, value & 0x80 != 0));
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Bit 7 is set to 0 and bit 0 is placed in the carry flag, so N always ends clear.
pub(crate) fn execute_lsr<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    shift_with(cpu, instr, |value, _| (value >> 1, value & 0x01 != 0));
}

/// Executes the ROL (Rotate Left) instruction.
///
/// The old carry enters bit 0; the old bit 7 becomes the carry.
pub(crate) fn execute_rol<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    shift_with(cpu, instr, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    });
}

/// Executes the ROR (Rotate Right) instruction.
///
/// The old carry enters bit 7; the old bit 0 becomes the carry.
///
/// # Examples
///
/// ```
/// use nes6502::{CPU, FlatMirrored};
///
/// let mut cpu = CPU::new(FlatMirrored::new());
/// cpu.load_program(0x0600, &[0x38, 0xA9, 0x01, 0x6A]); // SEC; LDA #$01; ROR A
///
/// cpu.step().unwrap();
/// cpu.step().unwrap();
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.a(), 0x80);
/// assert!(cpu.flag_c());
/// assert!(cpu.flag_n());
/// ```
pub(crate) fn execute_ror<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    shift_with(cpu, instr, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    });
}
