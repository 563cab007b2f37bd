//! # Register Transfer Instructions
//!
//! This module implements register transfer operations:
//! - TAX: Transfer Accumulator to X
//! - TAY: Transfer Accumulator to Y
//! - TXA: Transfer X to Accumulator
//! - TYA: Transfer Y to Accumulator
//! - TSX: Transfer Stack Pointer to X
//! - TXS: Transfer X to Stack Pointer
//!
//! Every transfer except TXS updates Z and N from the copied value.

use crate::{AddressSpace, CPU};

pub(crate) fn execute_tax<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.state.x = cpu.state.a;
    cpu.state.set_zn(cpu.state.x);
}

pub(crate) fn execute_tay<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.state.y = cpu.state.a;
    cpu.state.set_zn(cpu.state.y);
}

pub(crate) fn execute_txa<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.state.a = cpu.state.x;
    cpu.state.set_zn(cpu.state.a);
}

pub(crate) fn execute_tya<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.state.a = cpu.state.y;
    cpu.state.set_zn(cpu.state.a);
}

pub(crate) fn execute_tsx<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.state.x = cpu.state.sp;
    cpu.state.set_zn(cpu.state.x);
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
///
/// Flags affected: None
pub(crate) fn execute_txs<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.state.sp = cpu.state.x;
}
