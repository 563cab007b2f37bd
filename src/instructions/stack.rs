//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA / PLA: Push and pull the accumulator
//! - PHP / PLP: Push and pull the status register
//!
//! It also hosts the push/pull primitives shared with JSR, RTS, RTI, BRK and
//! interrupt entry.
//!
//! The 6502 stack is located at memory addresses 0x0100-0x01FF and grows downward.
//! The stack pointer (SP) is an 8-bit register that serves as an offset into this
//! page. The full stack address is calculated as 0x0100 | SP, and SP wraps from
//! 0x00 to 0xFF (and back) without any error.

use crate::cpu::STACK_BASE;
use crate::{AddressSpace, CPU};

impl<M: AddressSpace> CPU<M> {
    #[inline]
    fn stack_address(&self) -> u16 {
        STACK_BASE | self.state.sp as u16
    }

    /// Writes `value` at 0x0100 | SP, then decrements SP.
    pub(crate) fn push8(&mut self, value: u8) {
        self.write(self.stack_address(), value);
        self.state.sp = self.state.sp.wrapping_sub(1);
    }

    /// Pushes a word high byte first, so it sits little-endian in memory.
    pub(crate) fn push16(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push8(hi);
        self.push8(lo);
    }

    /// Increments SP, then reads 0x0100 | SP.
    pub(crate) fn pull8(&mut self) -> u8 {
        self.state.sp = self.state.sp.wrapping_add(1);
        self.read(self.stack_address())
    }

    pub(crate) fn pull16(&mut self) -> u16 {
        let lo = self.pull8();
        let hi = self.pull8();
        u16::from_le_bytes([lo, hi])
    }

    /// Pushes the packed status byte. `brk` selects the break bit.
    pub(crate) fn push_status(&mut self, brk: bool) {
        let status = self.state.status_byte(brk);
        self.push8(status);
    }

    pub(crate) fn pull_status(&mut self) {
        let status = self.pull8();
        self.state.set_status_byte(status);
    }
}

/// Executes the PHA (Push Accumulator) instruction.
///
/// Flags affected: None
///
/// # Examples
///
/// ```
/// use nes6502::{AddressSpace, CPU, FlatMirrored};
///
/// let mut cpu = CPU::new(FlatMirrored::new());
/// cpu.load_program(0x0600, &[0x48]); // PHA
/// cpu.set_a(0x42);
///
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.memory().read8(0x01FF), 0x42);
/// assert_eq!(cpu.sp(), 0xFE);
/// assert_eq!(cpu.cycles(), 3);
/// ```
pub(crate) fn execute_pha<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.push8(cpu.state.a);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed byte has bits 5 and 4 set.
pub(crate) fn execute_php<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.push_status(true);
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// Flags affected: Z and N from the pulled value
pub(crate) fn execute_pla<M: AddressSpace>(cpu: &mut CPU<M>) {
    let value = cpu.pull8();
    cpu.state.a = value;
    cpu.state.set_zn(value);
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn execute_plp<M: AddressSpace>(cpu: &mut CPU<M>) {
    cpu.pull_status();
}
