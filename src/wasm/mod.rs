//! WebAssembly bindings for the nes6502 emulator.
//!
//! This module provides JavaScript-callable interfaces to the 6502 CPU emulator,
//! enabling browser-based execution of programs written for the 32x32 screen
//! tutorial machine.

pub mod api;

pub use api::Emulator6502;
