//! # Screen and Input Cells
//!
//! Programs written for the tutorial machine draw into a 32x32 block of memory
//! and poll two zero-page cells for input. This module owns those addresses and
//! turns the screen block into pixels. Windowing and timing belong to the host.

use crate::AddressSpace;

/// First byte of the screen block.
pub const SCREEN_START: u16 = 0x0200;
/// Last byte of the screen block (inclusive).
pub const SCREEN_END: u16 = 0x05FF;

pub const SCREEN_WIDTH: usize = 32;
pub const SCREEN_HEIGHT: usize = 32;

/// Cell holding the ASCII code of the last key pressed.
pub const KEY_CELL: u16 = 0x00FF;
/// Cell refreshed with a random byte once per host frame.
pub const ENTROPY_CELL: u16 = 0x00FE;

/// ARGB colors selected by the low nibble of each screen byte.
pub const PALETTE: [u32; 16] = [
    0xff000000, 0xffffffff, 0xff880000, 0xffaaffee, //
    0xffcc44cc, 0xff00cc55, 0xff0000aa, 0xffeeee77, //
    0xffdd8855, 0xff664400, 0xffff7777, 0xff333333, //
    0xff777777, 0xffaaff66, 0xff0088ff, 0xffbbbbbb,
];

/// Renders the screen block as row-major ARGB pixels.
///
/// The result always holds `SCREEN_WIDTH * SCREEN_HEIGHT` entries. The high
/// nibble of each cell is ignored.
///
/// # Examples
///
/// ```
/// use nes6502::display::{render_frame, PALETTE, SCREEN_START};
/// use nes6502::{AddressSpace, FlatMirrored};
///
/// let mut mem = FlatMirrored::new();
/// mem.write8(SCREEN_START + 33, 0x01); // row 1, column 1
///
/// let frame = render_frame(&mem);
/// assert_eq!(frame.len(), 1024);
/// assert_eq!(frame[33], PALETTE[1]);
/// assert_eq!(frame[0], PALETTE[0]);
/// ```
pub fn render_frame<M: AddressSpace>(memory: &M) -> Vec<u32> {
    (SCREEN_START..=SCREEN_END)
        .map(|addr| PALETTE[(memory.read8(addr) & 0x0F) as usize])
        .collect()
}

/// Pixel coordinates of a screen address, or `None` outside the block.
pub fn screen_position(addr: u16) -> Option<(usize, usize)> {
    if !(SCREEN_START..=SCREEN_END).contains(&addr) {
        return None;
    }
    let offset = (addr - SCREEN_START) as usize;
    Some((offset % SCREEN_WIDTH, offset / SCREEN_WIDTH))
}

/// Stores a key code where programs expect to find the last key press.
pub fn press_key<M: AddressSpace>(memory: &mut M, key: u8) {
    memory.write8(KEY_CELL, key);
}

/// Stores a fresh random byte for programs to read.
pub fn seed_entropy<M: AddressSpace>(memory: &mut M, value: u8) {
    memory.write8(ENTROPY_CELL, value);
}
