//! # Processor State
//!
//! The register, flag and cycle-accounting record mutated by every step.

use std::fmt;

/// Status register bit for the Negative flag.
pub const FLAG_N: u8 = 0b1000_0000;
/// Status register bit for the Overflow flag.
pub const FLAG_V: u8 = 0b0100_0000;
/// Reserved bit 5. Always set in pushed status bytes.
pub const FLAG_UNUSED: u8 = 0b0010_0000;
/// Break bit 4. Only exists in pushed status bytes.
pub const FLAG_B: u8 = 0b0001_0000;
/// Status register bit for the Decimal flag.
pub const FLAG_D: u8 = 0b0000_1000;
/// Status register bit for the Interrupt Disable flag.
pub const FLAG_I: u8 = 0b0000_0100;
/// Status register bit for the Zero flag.
pub const FLAG_Z: u8 = 0b0000_0010;
/// Status register bit for the Carry flag.
pub const FLAG_C: u8 = 0b0000_0001;

/// 6502 register file, flags and run-control signals.
///
/// All fields are public so hosts can persist and restore a run, or poke
/// registers while the engine is between steps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessorState {
    /// Accumulator register
    pub a: u8,

    /// X index register
    pub x: u8,

    /// Y index register
    pub y: u8,

    /// Program counter (address of next instruction)
    pub pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub sp: u8,

    /// Negative flag (set if bit 7 of result is 1)
    pub flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub flag_v: bool,

    /// Decimal mode flag. Stored and stacked but arithmetic is always binary.
    pub flag_d: bool,

    /// Interrupt disable flag (blocks IRQ when set)
    pub flag_i: bool,

    /// Zero flag (set if result is zero)
    pub flag_z: bool,

    /// Carry flag (set on unsigned overflow, clear on borrow)
    pub flag_c: bool,

    /// Clocks left on the instruction in flight. While positive, no new fetch happens.
    pub cycles: i32,

    /// Set by a software break or a fatal decode error; cleared only from outside.
    pub halted: bool,

    /// Raised when the engine writes inside the display window.
    pub dirty: bool,
}

impl ProcessorState {
    /// Returns the all-zero reset state. The dirty signal starts raised so the
    /// first frame gets drawn.
    pub fn new() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    /// Packs the six flags into a status byte (`NV1BDIZC`).
    ///
    /// Bit 5 is always set. Bit 4 is set only when `brk` is true, which is the
    /// case for PHP and BRK pushes but not for hardware interrupts.
    pub fn status_byte(&self, brk: bool) -> u8 {
        let mut status = FLAG_UNUSED;

        if self.flag_n {
            status |= FLAG_N;
        }
        if self.flag_v {
            status |= FLAG_V;
        }
        if brk {
            status |= FLAG_B;
        }
        if self.flag_d {
            status |= FLAG_D;
        }
        if self.flag_i {
            status |= FLAG_I;
        }
        if self.flag_z {
            status |= FLAG_Z;
        }
        if self.flag_c {
            status |= FLAG_C;
        }

        status
    }

    /// Unpacks a status byte into the six flags. Bits 5 and 4 are ignored.
    pub fn set_status_byte(&mut self, status: u8) {
        self.flag_n = status & FLAG_N != 0;
        self.flag_v = status & FLAG_V != 0;
        self.flag_d = status & FLAG_D != 0;
        self.flag_i = status & FLAG_I != 0;
        self.flag_z = status & FLAG_Z != 0;
        self.flag_c = status & FLAG_C != 0;
    }

    /// Refreshes Zero and Negative from `value`.
    #[inline]
    pub fn set_zn(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }
}

impl fmt::Display for ProcessorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "A:{:02X} X:{:02X} Y:{:02X} SP:{:02X} PC:{:04X} P:{}{}--{}{}{}{}",
            self.a,
            self.x,
            self.y,
            self.sp,
            self.pc,
            flag(self.flag_n, 'N'),
            flag(self.flag_v, 'V'),
            flag(self.flag_d, 'D'),
            flag(self.flag_i, 'I'),
            flag(self.flag_z, 'Z'),
            flag(self.flag_c, 'C'),
        )
    }
}
