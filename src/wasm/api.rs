//! WASM API for the 6502 emulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection,
//! screen rendering, keyboard input and disassembly.

use crate::display::{self, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::disassembler::formatter::{format_bytes, format_instruction};
use crate::{disassemble, AddressSpace, DisassemblyOptions, FlatMirrored, CPU};
use wasm_bindgen::prelude::*;

/// Where the tutorial machine expects programs.
const PROGRAM_START: u16 = 0x0600;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<crate::ExecutionError> for JsError {
    fn from(err: crate::ExecutionError) -> Self {
        JsError::new(&err.to_string())
    }
}

/// One line of disassembly
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: String,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> String {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Main emulator interface for JavaScript
///
/// Wraps an engine over the flat 2 KiB mirrored layout. The host drives it
/// from its animation loop: seed entropy, run a slice of cycles, and redraw
/// when `take_dirty` reports a screen write.
#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: CPU<FlatMirrored>,
}

impl Default for Emulator6502 {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl Emulator6502 {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Emulator6502 {
            cpu: CPU::new(FlatMirrored::new()),
        }
    }

    /// Clears memory and registers, then loads `program` at 0x0600.
    pub fn load_program(&mut self, program: &[u8]) {
        self.cpu = CPU::new(FlatMirrored::new());
        self.cpu.load_program(PROGRAM_START, program);
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> Result<(), JsError> {
        Ok(self.cpu.step()?)
    }

    /// Execute multiple cycles and return actual cycles executed
    ///
    /// On error, `clocks` still reflects every clock run before the halt.
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        let consumed = self.cpu.run_for_cycles(cycles as u64)?;
        Ok(consumed as u32)
    }

    pub fn nmi(&mut self) {
        self.cpu.nmi();
    }

    /// Returns whether the interrupt was taken.
    pub fn irq(&mut self) -> bool {
        self.cpu.irq()
    }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.cpu.is_halted()
    }

    pub fn resume(&mut self) {
        self.cpu.resume();
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    #[wasm_bindgen(getter)]
    pub fn clocks(&self) -> f64 {
        self.cpu.clocks() as f64
    }

    // Screen and input

    #[wasm_bindgen(getter)]
    pub fn screen_width(&self) -> usize {
        SCREEN_WIDTH
    }

    #[wasm_bindgen(getter)]
    pub fn screen_height(&self) -> usize {
        SCREEN_HEIGHT
    }

    /// ARGB pixels of the screen block, row-major.
    pub fn frame(&self) -> Vec<u32> {
        display::render_frame(self.cpu.memory())
    }

    /// True once after each write into the screen block.
    pub fn take_dirty(&mut self) -> bool {
        self.cpu.take_dirty()
    }

    pub fn key_press(&mut self, key: u8) {
        display::press_key(self.cpu.memory_mut(), key);
    }

    /// Refreshes the random byte cell from `Math.random`.
    pub fn seed_entropy(&mut self) {
        let value = (js_sys::Math::random() * 256.0) as u8;
        display::seed_entropy(self.cpu.memory_mut(), value);
    }

    // Memory access methods

    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().read8(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write8(addr, value);
    }

    /// Read a 256-byte page from memory (for efficient display)
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as u16) << 8;
        (0..256).map(|i| self.cpu.memory().read8(start + i)).collect()
    }

    /// Disassemble memory starting at an address
    pub fn disassemble(&self, start_addr: u16, num_instructions: u32) -> Vec<JsValue> {
        // Three bytes per instruction is the most any instruction can need.
        let span = (num_instructions as usize).saturating_mul(3).min(0x1_0000);
        let window: Vec<u8> = (0..span)
            .map(|i| self.cpu.memory().read8(start_addr.wrapping_add(i as u16)))
            .collect();

        let opts = DisassemblyOptions {
            start_address: start_addr,
            hex_dump: false,
        };

        disassemble(&window, opts)
            .iter()
            .take(num_instructions as usize)
            .map(|instr| {
                JsValue::from(DisassemblyLine {
                    address: instr.address,
                    bytes: format_bytes(instr),
                    text: format_instruction(instr),
                })
            })
            .collect()
    }

    /// Current instruction and register dump, as logged by tracing tools.
    pub fn trace(&self) -> String {
        crate::trace_line(&self.cpu)
    }
}
