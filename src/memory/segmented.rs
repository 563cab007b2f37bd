//! NES CPU address map.
//!
//! ```text
//! 0x0000-0x1FFF  2 KiB internal RAM, mirrored every 0x0800
//! 0x2000-0x3FFF  8 PPU registers, mirrored every 8 bytes
//! 0x4000-0x4017  APU and I/O registers
//! 0x4018-0x401F  APU test registers (normally disabled)
//! 0x4020-0xFFFF  cartridge space
//! ```
//!
//! Only RAM has meaningful behavior here. The register and cartridge windows are
//! plain byte cells so that decoding stays total; PPU, APU and mapper chips are
//! expected to be layered on by the host between steps.

use super::AddressSpace;
use crate::MemoryError;

const RAM_END: u16 = 0x1FFF;
const PPU_END: u16 = 0x3FFF;
const APU_END: u16 = 0x4017;
const APU_TEST_END: u16 = 0x401F;

const RAM_SIZE: usize = 0x0800;
const PPU_SIZE: usize = 8;
const APU_SIZE: usize = 0x18;
const APU_TEST_SIZE: usize = 8;
const CART_SIZE: usize = 0x1_0000 - 0x4020;

const RAM_BASE: usize = 0;
const PPU_BASE: usize = RAM_BASE + RAM_SIZE;
const APU_BASE: usize = PPU_BASE + PPU_SIZE;
const APU_TEST_BASE: usize = APU_BASE + APU_SIZE;
const CART_BASE: usize = APU_TEST_BASE + APU_TEST_SIZE;
const TOTAL_SIZE: usize = CART_BASE + CART_SIZE;

const PRG_START: u16 = 0x8000;
const PRG_WINDOW: usize = 0x8000;
const PRG_BANK: usize = 0x4000;

/// Which physical window an address decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Ram,
    PpuRegisters,
    ApuIo,
    ApuTest,
    Cartridge,
}

/// The NES CPU memory map.
///
/// # Examples
///
/// ```
/// use nes6502::{AddressSpace, Region, SegmentedMap};
///
/// let mut mem = SegmentedMap::new();
/// mem.write8(0x0002, 0x77);
/// assert_eq!(mem.read8(0x1802), 0x77); // RAM mirror
///
/// mem.write8(0x2001, 0x1E);
/// assert_eq!(mem.read8(0x3FF9), 0x1E); // PPU register mirror
/// assert_eq!(SegmentedMap::region(0x8000), Region::Cartridge);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedMap {
    data: Box<[u8]>,
}

impl SegmentedMap {
    /// Creates a zero-filled map.
    pub fn new() -> Self {
        Self {
            data: vec![0; TOTAL_SIZE].into_boxed_slice(),
        }
    }

    /// Rebuilds a map from an image previously returned by [`SegmentedMap::image`].
    pub fn from_image(image: &[u8]) -> Result<Self, MemoryError> {
        if image.len() != TOTAL_SIZE {
            return Err(MemoryError::ImageSize {
                len: image.len(),
                expected: TOTAL_SIZE,
            });
        }
        Ok(Self {
            data: image.into(),
        })
    }

    /// Raw backing store of every window, RAM first.
    pub fn image(&self) -> &[u8] {
        &self.data
    }

    /// The 2 KiB internal RAM.
    pub fn ram(&self) -> &[u8] {
        &self.data[RAM_BASE..RAM_BASE + RAM_SIZE]
    }

    /// Classifies an address into its window.
    pub fn region(addr: u16) -> Region {
        match addr {
            0..=RAM_END => Region::Ram,
            0x2000..=PPU_END => Region::PpuRegisters,
            0x4000..=APU_END => Region::ApuIo,
            0x4018..=APU_TEST_END => Region::ApuTest,
            _ => Region::Cartridge,
        }
    }

    /// Copies a PRG-ROM image into 0x8000-0xFFFF.
    ///
    /// A single 16 KiB bank is mirrored into both halves, as on NROM-128 boards.
    /// Anything up to 32 KiB is placed at 0x8000.
    pub fn load_cartridge(&mut self, prg: &[u8]) -> Result<(), MemoryError> {
        if prg.len() > PRG_WINDOW {
            return Err(MemoryError::CartridgeTooLarge {
                len: prg.len(),
                capacity: PRG_WINDOW,
            });
        }

        self.load(PRG_START, prg);
        if prg.len() == PRG_BANK {
            self.load(PRG_START + PRG_BANK as u16, prg);
        }
        log::debug!("loaded {} byte PRG image at 0x{:04X}", prg.len(), PRG_START);
        Ok(())
    }

    #[inline]
    fn offset(addr: u16) -> usize {
        match addr {
            0..=RAM_END => RAM_BASE + (addr as usize & (RAM_SIZE - 1)),
            0x2000..=PPU_END => PPU_BASE + (addr as usize & (PPU_SIZE - 1)),
            0x4000..=APU_END => APU_BASE + (addr - 0x4000) as usize,
            0x4018..=APU_TEST_END => APU_TEST_BASE + (addr - 0x4018) as usize,
            _ => CART_BASE + (addr - 0x4020) as usize,
        }
    }
}

impl Default for SegmentedMap {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressSpace for SegmentedMap {
    fn decode(&mut self, addr: u16) -> &mut u8 {
        &mut self.data[Self::offset(addr)]
    }

    fn peek(&self, addr: u16) -> u8 {
        self.data[Self::offset(addr)]
    }
}
