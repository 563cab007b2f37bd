//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump to address (absolute or indirect)
//! - JSR / RTS: Subroutine call and return
//! - RTI: Return from interrupt
//! - BRK: Software break
//!
//! By the time a handler runs, PC already points past the instruction. JSR
//! therefore pushes `PC - 1` (the address of its own last byte) and RTS adds
//! one back after pulling.

use super::effective_address;
use crate::cpu::{BreakMode, DecodedInstruction, IRQ_VECTOR};
use crate::{AddressSpace, CPU};

/// Executes the JMP (Jump) instruction.
///
/// For the indirect form the target was already read through the pointer at
/// decode time.
pub(crate) fn execute_jmp<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    cpu.state.pc = effective_address(instr);
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// # Examples
///
/// ```
/// use nes6502::{AddressSpace, CPU, FlatMirrored};
///
/// let mut cpu = CPU::new(FlatMirrored::new());
/// cpu.load_program(0x0600, &[0x20, 0x00, 0x07]); // JSR $0700
///
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.pc(), 0x0700);
/// assert_eq!(cpu.sp(), 0xFD);
/// // Return address is the last byte of the JSR: 0x0602
/// assert_eq!(cpu.memory().read8(0x01FF), 0x06);
/// assert_eq!(cpu.memory().read8(0x01FE), 0x02);
/// ```
pub(crate) fn execute_jsr<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    let return_address = cpu.state.pc.wrapping_sub(1);
    cpu.push16(return_address);
    cpu.state.pc = effective_address(instr);
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.state.pc = cpu.pull16().wrapping_add(1);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status byte, then PC. Unlike RTS the pulled PC is used as is.
pub(crate) fn execute_rti<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.pull_status();
    cpu.state.pc = cpu.pull16();
}

/// Executes the BRK (Force Break) instruction.
///
/// Under [`BreakMode::Halt`] the halt indicator is raised and nothing else
/// changes; PC is left just past the BRK so [`CPU::resume`] continues with the
/// following byte.
///
/// Under [`BreakMode::Interrupt`] the return address pushed is the BRK address
/// plus 2, the status byte is pushed with the break bit set, I is set and PC
/// is loaded from 0xFFFE/0xFFFF.
pub(crate) fn execute_brk<M: AddressSpace>(cpu: &mut CPU<M>) {
    match cpu.config.break_mode {
        BreakMode::Halt => {
            log::debug!("BRK at 0x{:04X}, halting", cpu.state.pc.wrapping_sub(1));
            cpu.state.halted = true;
        }
        BreakMode::Interrupt => {
            // Skip the padding byte after the opcode.
            cpu.state.pc = cpu.state.pc.wrapping_add(1);
            cpu.enter_interrupt(IRQ_VECTOR, true);
        }
    }
}
