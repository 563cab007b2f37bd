//! # CPU State and Execution
//!
//! This module contains the `CPU` engine: it owns a [`ProcessorState`] and an
//! injected [`AddressSpace`], and advances them one clock at a time.
//!
//! ## Execution Model
//!
//! - `tick()`: one clock. If an instruction is still in flight the remaining
//!   cycle counter is decremented and nothing else happens. Otherwise the next
//!   opcode is fetched, decoded, and executed, and the counter is loaded with the
//!   instruction's base cost.
//! - `step()`: one whole instruction. Drains the in-flight cycles, then fetches.
//! - `run_for_cycles()`: ticks until a clock budget is spent or the CPU halts.
//!
//! The program counter is advanced past the instruction *before* the operation
//! runs, so JSR pushes the address of its last byte and branches land relative
//! to the following instruction.

use crate::addressing::AddressingMode;
use crate::instructions;
use crate::opcodes::{Operation, OPCODE_TABLE};
use crate::state::ProcessorState;
use crate::{AddressSpace, ExecutionError};

/// NMI vector (0xFFFA/0xFFFB)
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector (0xFFFC/0xFFFD)
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ and BRK vector (0xFFFE/0xFFFF)
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Base address of the stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Stack pointer value after a program load.
pub const PROGRAM_STACK_POINTER: u8 = 0xFF;

/// Clocks charged for entering an interrupt handler.
pub const INTERRUPT_CYCLES: i32 = 7;

/// What the engine does with an opcode byte the decode table marks invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidOpcodePolicy {
    /// Halt and return [`ExecutionError::InvalidOpcode`].
    #[default]
    Halt,
    /// Treat the byte as a one-byte, two-cycle no-op.
    Skip,
}

/// Behavior of the BRK instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakMode {
    /// Raise the halt indicator. Programs written for the tutorial machine use
    /// BRK to end.
    #[default]
    Halt,
    /// Push PC + 1 and the status byte (with the break bit), set I, and jump
    /// through the IRQ vector.
    Interrupt,
}

/// Engine options fixed at construction.
///
/// # Examples
///
/// ```
/// use nes6502::{BreakMode, CpuConfig, InvalidOpcodePolicy};
///
/// let config = CpuConfig::default()
///     .with_invalid_opcode(InvalidOpcodePolicy::Skip)
///     .with_break_mode(BreakMode::Interrupt)
///     .with_display_window(None);
///
/// assert_eq!(config.invalid_opcode, InvalidOpcodePolicy::Skip);
/// assert_eq!(config.display_window, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuConfig {
    pub invalid_opcode: InvalidOpcodePolicy,
    pub break_mode: BreakMode,
    /// Inclusive address range whose writes raise the dirty signal.
    pub display_window: Option<(u16, u16)>,
}

impl CpuConfig {
    pub fn with_invalid_opcode(mut self, policy: InvalidOpcodePolicy) -> Self {
        self.invalid_opcode = policy;
        self
    }

    pub fn with_break_mode(mut self, mode: BreakMode) -> Self {
        self.break_mode = mode;
        self
    }

    pub fn with_display_window(mut self, window: Option<(u16, u16)>) -> Self {
        self.display_window = window;
        self
    }
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            invalid_opcode: InvalidOpcodePolicy::default(),
            break_mode: BreakMode::default(),
            display_window: Some((crate::display::SCREEN_START, crate::display::SCREEN_END)),
        }
    }
}

/// One decoded instruction. Produced fresh on every fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Address the opcode was fetched from.
    pub pc: u16,
    pub opcode: u8,
    pub operation: Operation,
    pub addressing_mode: AddressingMode,
    /// Effective address, or `None` for implied/accumulator forms.
    pub address: Option<u16>,
    pub size_bytes: u8,
    pub base_cycles: u8,
}

/// 6502 execution engine.
///
/// Generic over the memory layout via the [`AddressSpace`] trait.
///
/// # Examples
///
/// ```
/// use nes6502::{CPU, FlatMirrored};
///
/// let mut cpu = CPU::new(FlatMirrored::new());
/// cpu.load_program(0x0600, &[0xA9, 0x05]); // LDA #$05
///
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.a(), 0x05);
/// assert_eq!(cpu.pc(), 0x0602);
/// assert!(!cpu.flag_z());
/// ```
pub struct CPU<M: AddressSpace> {
    pub(crate) state: ProcessorState,
    pub(crate) memory: M,
    pub(crate) config: CpuConfig,

    /// Sum of the base cost of every instruction and interrupt entered.
    total_cycles: u64,

    /// Clocks ticked while not halted, including a fetch that failed.
    clocks: u64,

    instructions: u64,
}

impl<M: AddressSpace> CPU<M> {
    /// Creates an engine in the all-zero reset state with the default config.
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        Self {
            state: ProcessorState::new(),
            memory,
            config,
            total_cycles: 0,
            clocks: 0,
            instructions: 0,
        }
    }

    /// Copies a program image to `start`, points PC at it and resets SP to 0xFF.
    pub fn load_program(&mut self, start: u16, program: &[u8]) {
        self.memory.load(start, program);
        self.state.pc = start;
        self.state.sp = PROGRAM_STACK_POINTER;
        self.state.dirty = true;
        log::debug!("loaded {} bytes at 0x{:04X}", program.len(), start);
    }

    /// Hardware-style reset: PC from the reset vector, SP 0xFD, I set.
    ///
    /// Clears the halt indicator and any cycles in flight. A, X and Y are kept.
    pub fn reset(&mut self) {
        self.state.pc = self.memory.read16(RESET_VECTOR);
        self.state.sp = 0xFD;
        self.state.flag_i = true;
        self.state.cycles = 0;
        self.state.halted = false;
        log::debug!("reset, PC=0x{:04X}", self.state.pc);
    }

    /// Advances the engine by one clock.
    ///
    /// Does nothing while halted.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::InvalidOpcode`] when an invalid opcode is fetched
    /// under [`InvalidOpcodePolicy::Halt`]. The CPU is halted when this returns.
    pub fn tick(&mut self) -> Result<(), ExecutionError> {
        if self.state.halted {
            return Ok(());
        }
        self.clocks += 1;

        if self.state.cycles > 0 {
            self.state.cycles -= 1;
            return Ok(());
        }

        self.execute_next()
    }

    /// Runs the instruction in flight to completion, then fetches and executes the next.
    ///
    /// # Examples
    ///
    /// ```
    /// use nes6502::{CPU, FlatMirrored};
    ///
    /// let mut cpu = CPU::new(FlatMirrored::new());
    /// cpu.load_program(0x0600, &[0xA9, 0x00, 0xF0, 0x02]); // LDA #0; BEQ +2
    ///
    /// cpu.step().unwrap();
    /// assert!(cpu.flag_z());
    ///
    /// cpu.step().unwrap();
    /// assert_eq!(cpu.pc(), 0x0606);
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        while self.state.cycles > 0 && !self.state.halted {
            self.tick()?;
        }
        self.tick()
    }

    /// Ticks until `budget` clocks have elapsed or the CPU halts.
    ///
    /// Returns the number of clocks actually consumed.
    ///
    /// # Errors
    ///
    /// Stops at the first [`ExecutionError`]. The clocks run before it,
    /// including the failing fetch, are still counted in [`CPU::clocks`].
    ///
    /// ```
    /// use nes6502::{CPU, FlatMirrored};
    ///
    /// let mut cpu = CPU::new(FlatMirrored::new());
    /// cpu.load_program(0x0600, &[0xA9, 0x01, 0x02]); // LDA #$01; invalid
    ///
    /// let start = cpu.clocks();
    /// assert!(cpu.run_for_cycles(100).is_err());
    /// assert_eq!(cpu.clocks() - start, 4);
    /// ```
    pub fn run_for_cycles(&mut self, budget: u64) -> Result<u64, ExecutionError> {
        let start = self.clocks;
        while self.clocks - start < budget && !self.state.halted {
            self.tick()?;
        }
        Ok(self.clocks - start)
    }

    /// Decodes the instruction at PC without executing it.
    pub fn decode(&self) -> DecodedInstruction {
        self.decode_at(self.state.pc)
    }

    fn decode_at(&self, pc: u16) -> DecodedInstruction {
        let opcode = self.memory.read8(pc);
        let metadata = &OPCODE_TABLE[opcode as usize];

        let address = if metadata.is_valid() {
            self.resolve_address(metadata.addressing_mode, pc, metadata.size_bytes)
        } else {
            None
        };

        DecodedInstruction {
            pc,
            opcode,
            operation: metadata.operation,
            addressing_mode: metadata.addressing_mode,
            address,
            size_bytes: metadata.size_bytes,
            base_cycles: metadata.base_cycles,
        }
    }

    /// Computes the effective address for `mode` using the PC of the opcode.
    fn resolve_address(&self, mode: AddressingMode, pc: u16, size: u8) -> Option<u16> {
        let operand = pc.wrapping_add(1);
        let x = self.state.x;
        let y = self.state.y;

        let address = match mode {
            AddressingMode::Absolute => self.memory.read16(operand),
            AddressingMode::AbsoluteX => self
                .memory
                .read16(operand)
                .wrapping_add_signed(x as i8 as i16),
            AddressingMode::AbsoluteY => self
                .memory
                .read16(operand)
                .wrapping_add_signed(y as i8 as i16),
            AddressingMode::Immediate => operand,
            AddressingMode::Relative => {
                let offset = self.memory.read8(operand) as i8;
                pc.wrapping_add(size as u16)
                    .wrapping_add_signed(offset as i16)
            }
            AddressingMode::ZeroPage => self.memory.read8(operand) as u16,
            AddressingMode::ZeroPageX => self.memory.read8(operand).wrapping_add(x) as u16,
            AddressingMode::ZeroPageY => self.memory.read8(operand).wrapping_add(y) as u16,
            AddressingMode::Indirect => self.memory.read16(self.memory.read16(operand)),
            AddressingMode::IndirectX => {
                let pointer = self.memory.read8(operand).wrapping_add(x);
                self.read_zero_page_word(pointer)
            }
            AddressingMode::IndirectY => {
                let pointer = self.memory.read8(operand);
                self.read_zero_page_word(pointer).wrapping_add(y as u16)
            }
            AddressingMode::Implied => return None,
        };

        Some(address)
    }

    /// Reads a pointer stored in page zero; the high byte wraps to 0x00 after 0xFF.
    fn read_zero_page_word(&self, pointer: u8) -> u16 {
        let lo = self.memory.read8(pointer as u16);
        let hi = self.memory.read8(pointer.wrapping_add(1) as u16);
        u16::from_le_bytes([lo, hi])
    }

    fn execute_next(&mut self) -> Result<(), ExecutionError> {
        let instr = self.decode_at(self.state.pc);

        if !instr.operation.is_valid() {
            return self.invalid_opcode(&instr);
        }

        log::trace!(
            "{:04X}  {} {:<3} {}",
            instr.pc,
            instr.operation,
            instr.addressing_mode,
            instr
                .address
                .map(|a| format!("${:04X}", a))
                .unwrap_or_default()
        );

        self.state.pc = instr.pc.wrapping_add(instr.size_bytes as u16);
        self.state.cycles = instr.base_cycles as i32;
        self.total_cycles += instr.base_cycles as u64;
        self.instructions += 1;

        instructions::execute(self, &instr)
    }

    fn invalid_opcode(&mut self, instr: &DecodedInstruction) -> Result<(), ExecutionError> {
        match self.config.invalid_opcode {
            InvalidOpcodePolicy::Halt => {
                log::error!(
                    "invalid opcode 0x{:02X} at 0x{:04X}, halting",
                    instr.opcode,
                    instr.pc
                );
                self.state.halted = true;
                Err(ExecutionError::InvalidOpcode {
                    opcode: instr.opcode,
                    address: instr.pc,
                })
            }
            InvalidOpcodePolicy::Skip => {
                log::warn!(
                    "skipping invalid opcode 0x{:02X} at 0x{:04X}",
                    instr.opcode,
                    instr.pc
                );
                self.state.pc = instr.pc.wrapping_add(1);
                self.state.cycles = instr.base_cycles as i32;
                self.total_cycles += instr.base_cycles as u64;
                Ok(())
            }
        }
    }

    // ========== Interrupts ==========

    /// Delivers a non-maskable interrupt. Always taken.
    pub fn nmi(&mut self) {
        log::debug!("NMI at PC=0x{:04X}", self.state.pc);
        self.enter_interrupt(NMI_VECTOR, false);
    }

    /// Delivers a maskable interrupt.
    ///
    /// Returns `false` and leaves the CPU untouched when Interrupt Disable is set.
    pub fn irq(&mut self) -> bool {
        if self.state.flag_i {
            log::debug!("IRQ masked at PC=0x{:04X}", self.state.pc);
            return false;
        }
        log::debug!("IRQ at PC=0x{:04X}", self.state.pc);
        self.enter_interrupt(IRQ_VECTOR, false);
        true
    }

    /// Pushes PC and status, sets I, and loads PC from `vector`.
    pub(crate) fn enter_interrupt(&mut self, vector: u16, brk: bool) {
        self.push16(self.state.pc);
        self.push_status(brk);
        self.state.flag_i = true;
        self.state.pc = self.memory.read16(vector);
        if !brk {
            self.state.cycles = self.state.cycles.saturating_add(INTERRUPT_CYCLES);
            self.total_cycles += INTERRUPT_CYCLES as u64;
        }
    }

    // ========== Memory helpers ==========

    /// Writes through the address space and raises the dirty signal for the
    /// display window.
    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        self.memory.write8(addr, value);
        if let Some((start, end)) = self.config.display_window {
            if (start..=end).contains(&addr) {
                self.state.dirty = true;
            }
        }
    }

    pub(crate) fn read(&self, addr: u16) -> u8 {
        self.memory.read8(addr)
    }

    // ========== Run control ==========

    /// Returns true once BRK or a fatal decode error has stopped the engine.
    pub fn is_halted(&self) -> bool {
        self.state.halted
    }

    /// Clears the halt indicator so fetching resumes at the current PC.
    pub fn resume(&mut self) {
        self.state.halted = false;
    }

    /// Returns the dirty signal and clears it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.state.dirty)
    }

    pub fn is_dirty(&self) -> bool {
        self.state.dirty
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    // ========== State and memory access ==========

    pub fn state(&self) -> &ProcessorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ProcessorState {
        &mut self.state
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the engine and hands back the address space.
    pub fn into_memory(self) -> M {
        self.memory
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.state.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.state.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.state.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.state.sp
    }

    /// Returns the status register as it would be pushed by an interrupt (bit 5 set, bit 4 clear).
    pub fn status(&self) -> u8 {
        self.state.status_byte(false)
    }

    /// Returns the sum of base cycle costs of everything executed so far.
    pub fn cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Returns the clocks left on the instruction in flight.
    pub fn remaining_cycles(&self) -> i32 {
        self.state.cycles
    }

    /// Returns the clocks ticked while not halted.
    pub fn clocks(&self) -> u64 {
        self.clocks
    }

    /// Returns the number of instructions fetched and executed.
    pub fn instructions_executed(&self) -> u64 {
        self.instructions
    }

    // ========== Status Flag Getters ==========

    pub fn flag_n(&self) -> bool {
        self.state.flag_n
    }

    pub fn flag_v(&self) -> bool {
        self.state.flag_v
    }

    pub fn flag_d(&self) -> bool {
        self.state.flag_d
    }

    pub fn flag_i(&self) -> bool {
        self.state.flag_i
    }

    pub fn flag_z(&self) -> bool {
        self.state.flag_z
    }

    pub fn flag_c(&self) -> bool {
        self.state.flag_c
    }

    // ========== Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.state.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.state.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.state.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.state.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.state.sp = value;
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.state.flag_n = value;
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.state.flag_v = value;
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.state.flag_d = value;
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.state.flag_i = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.state.flag_z = value;
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.state.flag_c = value;
    }
}
