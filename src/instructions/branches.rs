//! # Branch Instructions
//!
//! This module implements the eight conditional branches:
//! - BCC / BCS: Carry clear / set
//! - BNE / BEQ: Zero clear / set
//! - BPL / BMI: Negative clear / set
//! - BVC / BVS: Overflow clear / set
//!
//! All branches use relative addressing. The target was already resolved at
//! decode time from the address of the following instruction plus the signed
//! offset, so a taken branch only has to load it into PC.

use super::effective_address;
use crate::cpu::DecodedInstruction;
use crate::opcodes::Operation;
use crate::state::ProcessorState;
use crate::{AddressSpace, CPU};

/// Evaluates the flag test for a branch operation.
///
/// Every other operation is listed by name and never branches, so a new
/// operation fails to compile here until it is classified.
fn condition(operation: Operation, state: &ProcessorState) -> bool {
    use Operation::*;

    match operation {
        Bcc => !state.flag_c,
        Bcs => state.flag_c,
        Bne => !state.flag_z,
        Beq => state.flag_z,
        Bpl => !state.flag_n,
        Bmi => state.flag_n,
        Bvc => !state.flag_v,
        Bvs => state.flag_v,
        Adc | And | Asl | Bit | Brk | Clc | Cld | Cli | Clv | Cmp | Cpx | Cpy | Dec | Dex
        | Dey | Eor | Inc | Inx | Iny | Jmp | Jsr | Lda | Ldx | Ldy | Lsr | Nop | Ora | Pha
        | Php | Pla | Plp | Rol | Ror | Rti | Rts | Sbc | Sec | Sed | Sei | Sta | Stx | Sty
        | Tax | Tay | Tsx | Txa | Txs | Tya | Invalid => false,
    }
}

/// Executes any of the conditional branch instructions.
///
/// When the branch is not taken PC is left pointing at the following
/// instruction. Cycle cost is the table's base cost either way; taken-branch
/// and page-crossing penalties are not modeled.
///
/// No flags are affected.
///
/// # Examples
///
/// ```
/// use nes6502::{CPU, FlatMirrored};
///
/// let mut cpu = CPU::new(FlatMirrored::new());
/// cpu.load_program(0x0600, &[0x90, 0xFC]); // BCC -4
///
/// cpu.step().unwrap();
/// assert_eq!(cpu.pc(), 0x05FE);
/// ```
pub(crate) fn execute_branch<M: AddressSpace>(cpu: &mut CPU<M>, instr: &DecodedInstruction) {
    if condition(instr.operation, &cpu.state) {
        cpu.state.pc = effective_address(instr);
    }
}
