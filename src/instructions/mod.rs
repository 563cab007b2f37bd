//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 56 operations, organized by
//! category. Each handler takes the engine and the already-decoded instruction;
//! the program counter has been advanced past the instruction and the cycle
//! counter loaded before a handler runs.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic, logic and compare (ADC, SBC, AND, ORA, EOR, BIT, CMP, CPX, CPY)
//! - **branches**: Conditional branches (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shifts and rotates (ASL, LSR, ROL, ROR)
//! - **load_store**: Loads and stores (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increments and decrements (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - flag set/clear (CLC, SEC, CLI, SEI, CLD, SED, CLV) is inline in [`execute`]
//! - **transfer**: Register transfers (TAX, TAY, TXA, TYA, TSX, TXS)

pub mod alu;
pub mod branches;
pub mod control;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::cpu::DecodedInstruction;
use crate::opcodes::Operation;
use crate::{AddressSpace, ExecutionError, CPU};

/// Runs the handler for `instr.operation`.
///
/// [`Operation::Invalid`] has no handler and is reported back as an error so it
/// can never be mistaken for another operation.
pub(crate) fn execute<M: AddressSpace>(
    cpu: &mut CPU<M>,
    instr: &DecodedInstruction,
) -> Result<(), ExecutionError> {
    use Operation::*;

    match instr.operation {
        Adc => alu::execute_adc(cpu, instr),
        Sbc => alu::execute_sbc(cpu, instr),
        And => alu::execute_and(cpu, instr),
        Ora => alu::execute_ora(cpu, instr),
        Eor => alu::execute_eor(cpu, instr),
        Bit => alu::execute_bit(cpu, instr),
        Cmp => alu::execute_cmp(cpu, instr),
        Cpx => alu::execute_cpx(cpu, instr),
        Cpy => alu::execute_cpy(cpu, instr),

        Bcc | Bcs | Beq | Bne | Bmi | Bpl | Bvs | Bvc => branches::execute_branch(cpu, instr),

        Asl => shifts::execute_asl(cpu, instr),
        Lsr => shifts::execute_lsr(cpu, instr),
        Rol => shifts::execute_rol(cpu, instr),
        Ror => shifts::execute_ror(cpu, instr),

        Lda => load_store::execute_lda(cpu, instr),
        Ldx => load_store::execute_ldx(cpu, instr),
        Ldy => load_store::execute_ldy(cpu, instr),
        Sta => load_store::execute_sta(cpu, instr),
        Stx => load_store::execute_stx(cpu, instr),
        Sty => load_store::execute_sty(cpu, instr),

        Inc => inc_dec::execute_inc(cpu, instr),
        Dec => inc_dec::execute_dec(cpu, instr),
        Inx => inc_dec::execute_inx(cpu),
        Iny => inc_dec::execute_iny(cpu),
        Dex => inc_dec::execute_dex(cpu),
        Dey => inc_dec::execute_dey(cpu),

        Jmp => control::execute_jmp(cpu, instr),
        Jsr => control::execute_jsr(cpu, instr),
        Rts => control::execute_rts(cpu),
        Rti => control::execute_rti(cpu),
        Brk => control::execute_brk(cpu),
        Nop => {}

        Pha => stack::execute_pha(cpu),
        Php => stack::execute_php(cpu),
        Pla => stack::execute_pla(cpu),
        Plp => stack::execute_plp(cpu),

        Clc => cpu.state.flag_c = false,
        Sec => cpu.state.flag_c = true,
        Cli => cpu.state.flag_i = false,
        Sei => cpu.state.flag_i = true,
        Cld => cpu.state.flag_d = false,
        Sed => cpu.state.flag_d = true,
        Clv => cpu.state.flag_v = false,

        Tax => transfer::execute_tax(cpu),
        Tay => transfer::execute_tay(cpu),
        Txa => transfer::execute_txa(cpu),
        Tya => transfer::execute_tya(cpu),
        Tsx => transfer::execute_tsx(cpu),
        Txs => transfer::execute_txs(cpu),

        Invalid => {
            return Err(ExecutionError::InvalidOpcode {
                opcode: instr.opcode,
                address: instr.pc,
            })
        }
    }

    Ok(())
}

/// Effective address of an instruction whose mode always produces one.
///
/// Only handlers for operations the table never pairs with
/// [`AddressingMode::Implied`](crate::AddressingMode::Implied) call this;
/// `test_memory_operations_have_an_address` in `opcodes` checks that pairing.
#[inline]
pub(crate) fn effective_address(instr: &DecodedInstruction) -> u16 {
    debug_assert!(
        instr.address.is_some(),
        "{} {} has no effective address",
        instr.operation,
        instr.addressing_mode
    );
    instr.address.unwrap_or_default()
}

/// Reads the byte an instruction operates on.
#[inline]
pub(crate) fn read_operand<M: AddressSpace>(cpu: &CPU<M>, instr: &DecodedInstruction) -> u8 {
    cpu.read(effective_address(instr))
}
