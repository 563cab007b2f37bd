//! # Address Space Abstraction
//!
//! This module provides the `AddressSpace` trait that decouples the CPU from the
//! physical memory layout. Two layouts are provided:
//!
//! - [`FlatMirrored`]: 2 KiB of RAM mirrored across the whole 64 KiB space. This is
//!   the layout of the "easy 6502" tutorial machine.
//! - [`SegmentedMap`]: the NES CPU map, with mirrored RAM, PPU and APU register
//!   windows, and a cartridge window.
//!
//! ## Design Principles
//!
//! Address decoding is total. Every 16-bit address maps to exactly one byte cell,
//! so reads and writes never fail and the CPU has no bus-error path. A cell is
//! returned by reference: writing through the location returned by
//! [`AddressSpace::decode`] is observed by any later read of an address that
//! decodes to the same cell.

mod segmented;

pub use segmented::{Region, SegmentedMap};

use crate::MemoryError;

/// Capability that maps a 16-bit address to an in-place mutable byte cell.
///
/// Implementors provide the two decode functions; the 8- and 16-bit accessors are
/// derived from them. 16-bit accesses are little-endian and decode each byte
/// address on its own, so a word that straddles a mirror boundary touches two
/// unrelated cells.
///
/// # Examples
///
/// ```
/// use nes6502::{AddressSpace, FlatMirrored};
///
/// let mut mem = FlatMirrored::new();
/// *mem.decode(0x0010) = 0x42;
///
/// // 0x0810 is a mirror of 0x0010
/// assert_eq!(mem.read8(0x0810), 0x42);
/// ```
///
/// ## Implementing a Custom Layout
///
/// ```
/// use nes6502::AddressSpace;
///
/// struct TinyRam {
///     cells: [u8; 256],
/// }
///
/// impl AddressSpace for TinyRam {
///     fn decode(&mut self, addr: u16) -> &mut u8 {
///         &mut self.cells[(addr & 0xFF) as usize]
///     }
///
///     fn peek(&self, addr: u16) -> u8 {
///         self.cells[(addr & 0xFF) as usize]
///     }
/// }
///
/// let mut ram = TinyRam { cells: [0; 256] };
/// ram.write16(0x00FF, 0xBEEF);
/// assert_eq!(ram.read8(0x00FF), 0xEF);
/// assert_eq!(ram.read8(0x0000), 0xBE); // 0x0100 wraps onto 0x0000
/// ```
pub trait AddressSpace {
    /// Returns the byte cell backing `addr`.
    ///
    /// Must be total over the full 16-bit range and must never panic.
    fn decode(&mut self, addr: u16) -> &mut u8;

    /// Reads the byte cell backing `addr` without requiring exclusive access.
    ///
    /// Must decode exactly like [`AddressSpace::decode`].
    fn peek(&self, addr: u16) -> u8;

    fn read8(&self, addr: u16) -> u8 {
        self.peek(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        *self.decode(addr) = value;
    }

    /// Reads a little-endian word: low byte at `addr`, high byte at `addr + 1`.
    fn read16(&self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Writes a little-endian word, low byte first.
    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }

    /// Copies `bytes` verbatim starting at `start`, one decoded cell at a time.
    ///
    /// Addresses wrap at 0xFFFF and mirroring applies to every byte.
    fn load(&mut self, start: u16, bytes: &[u8]) {
        let mut addr = start;
        for &byte in bytes {
            self.write8(addr, byte);
            addr = addr.wrapping_add(1);
        }
    }
}

/// Size of the flat layout's backing store.
pub const FLAT_RAM_SIZE: usize = 2048;

/// 2 KiB of RAM mirrored across the whole address space.
///
/// Every address maps to `address mod 2048`.
///
/// # Examples
///
/// ```
/// use nes6502::{AddressSpace, FlatMirrored};
///
/// let mut mem = FlatMirrored::new();
/// mem.write8(0x0600, 0xA9);
/// assert_eq!(mem.read8(0x0600), 0xA9);
/// assert_eq!(mem.read8(0x0E00), 0xA9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatMirrored {
    data: Box<[u8; FLAT_RAM_SIZE]>,
}

impl FlatMirrored {
    /// Creates a zero-filled flat layout.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; FLAT_RAM_SIZE]),
        }
    }

    /// Rebuilds a flat layout from a raw 2048-byte image.
    pub fn from_image(image: &[u8]) -> Result<Self, MemoryError> {
        let data: Box<[u8; FLAT_RAM_SIZE]> = image
            .to_vec()
            .into_boxed_slice()
            .try_into()
            .map_err(|_| MemoryError::ImageSize {
                len: image.len(),
                expected: FLAT_RAM_SIZE,
            })?;
        Ok(Self { data })
    }

    /// Raw backing store, suitable for persisting.
    pub fn image(&self) -> &[u8] {
        &self.data[..]
    }

    #[inline]
    fn offset(addr: u16) -> usize {
        addr as usize % FLAT_RAM_SIZE
    }
}

impl Default for FlatMirrored {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressSpace for FlatMirrored {
    fn decode(&mut self, addr: u16) -> &mut u8 {
        &mut self.data[Self::offset(addr)]
    }

    fn peek(&self, addr: u16) -> u8 {
        self.data[Self::offset(addr)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_read_write() {
        let mut mem = FlatMirrored::new();

        assert_eq!(mem.read8(0x0000), 0x00);
        assert_eq!(mem.read8(0xFFFF), 0x00);

        mem.write8(0x0234, 0x42);
        assert_eq!(mem.read8(0x0234), 0x42);
        assert_eq!(mem.read8(0x0233), 0x00);
        assert_eq!(mem.read8(0x0235), 0x00);
    }

    #[test]
    fn test_flat_mirrors_every_2k() {
        let mut mem = FlatMirrored::new();
        mem.write8(0xF805, 0x99);

        for mirror in (0..32u16).map(|i| i * 0x0800 + 5) {
            assert_eq!(mem.read8(mirror), 0x99, "mirror 0x{:04X}", mirror);
        }
    }

    #[test]
    fn test_decode_returns_live_cell() {
        let mut mem = FlatMirrored::new();
        *mem.decode(0x0100) = 0x11;
        *mem.decode(0x0900) += 1;
        assert_eq!(mem.read8(0x0100), 0x12);
    }

    #[test]
    fn test_word_straddles_mirror_boundary() {
        let mut mem = FlatMirrored::new();
        mem.write8(0x07FF, 0x34);
        mem.write8(0x0000, 0x12);

        assert_eq!(mem.read16(0x07FF), 0x1234);

        mem.write16(0xFFFF, 0xABCD);
        assert_eq!(mem.read8(0x07FF), 0xCD);
        assert_eq!(mem.read8(0x0000), 0xAB);
    }

    #[test]
    fn test_image_round_trip() {
        let mut mem = FlatMirrored::new();
        mem.load(0x0600, &[0xA9, 0x05]);

        let restored = FlatMirrored::from_image(mem.image()).unwrap();
        assert_eq!(restored, mem);

        assert_eq!(
            FlatMirrored::from_image(&[0; 10]),
            Err(MemoryError::ImageSize {
                len: 10,
                expected: FLAT_RAM_SIZE
            })
        );
    }
}
