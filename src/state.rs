//! # Processor State
//!
//! The register file and the status flags of the processor.
//!
//! ## Registers
//!
//! - **A**: 8-bit accumulator
//! - **X, Y**: 8-bit index registers
//! - **PC**: 16-bit program counter
//! - **SP**: 16-bit stack pointer. The stack grows downward and every push or
//!   pull moves it by one word (2 bytes).
//!
//! ## Flags
//!
//! The seven flags are held packed in a small integer, one bit each, in the
//! order used when they are saved on the stack:
//!
//! | Bit | Flag | Meaning |
//! |-----|------|---------|
//! | 0 | C | Carry |
//! | 1 | Z | Zero |
//! | 2 | I | Interrupt disable |
//! | 3 | D | Decimal |
//! | 4 | B | Break |
//! | 5 | V | Overflow |
//! | 6 | N | Negative |
//!
//! Bits 7-15 of a packed word are always zero.

use std::fmt;

/// Status flags packed one bit per flag.
///
/// # Examples
///
/// ```
/// use vm6502::Flags;
///
/// let mut flags = Flags::empty();
/// flags.set_carry(true);
/// flags.set_negative(true);
///
/// assert_eq!(flags.pack(), 0b0100_0001);
/// assert_eq!(Flags::unpack(flags.pack()), flags);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Flags(u16);

impl Flags {
    /// Carry (bit 0)
    pub const CARRY: u16 = 1 << 0;
    /// Zero (bit 1)
    pub const ZERO: u16 = 1 << 1;
    /// Interrupt disable (bit 2)
    pub const INTERRUPT_DISABLE: u16 = 1 << 2;
    /// Decimal (bit 3)
    pub const DECIMAL: u16 = 1 << 3;
    /// Break (bit 4)
    pub const BREAK: u16 = 1 << 4;
    /// Overflow (bit 5)
    pub const OVERFLOW: u16 = 1 << 5;
    /// Negative (bit 6)
    pub const NEGATIVE: u16 = 1 << 6;

    /// Every defined flag bit.
    pub const ALL: u16 = 0x7F;

    /// All flags clear.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Serializes the flags for stack storage.
    pub const fn pack(self) -> u16 {
        self.0
    }

    /// Inverse of [`Flags::pack`]. Undefined bits are discarded.
    pub const fn unpack(word: u16) -> Self {
        Self(word & Self::ALL)
    }

    fn get(self, mask: u16) -> bool {
        self.0 & mask != 0
    }

    fn set(&mut self, mask: u16, value: bool) {
        if value {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    /// Returns true if the Carry flag is set.
    pub fn carry(self) -> bool {
        self.get(Self::CARRY)
    }

    /// Sets or clears the Carry flag.
    pub fn set_carry(&mut self, value: bool) {
        self.set(Self::CARRY, value)
    }

    /// Returns true if the Zero flag is set.
    pub fn zero(self) -> bool {
        self.get(Self::ZERO)
    }

    /// Sets or clears the Zero flag.
    pub fn set_zero(&mut self, value: bool) {
        self.set(Self::ZERO, value)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn interrupt_disable(self) -> bool {
        self.get(Self::INTERRUPT_DISABLE)
    }

    /// Sets or clears the Interrupt Disable flag.
    pub fn set_interrupt_disable(&mut self, value: bool) {
        self.set(Self::INTERRUPT_DISABLE, value)
    }

    /// Returns true if the Decimal flag is set.
    pub fn decimal(self) -> bool {
        self.get(Self::DECIMAL)
    }

    /// Sets or clears the Decimal flag.
    pub fn set_decimal(&mut self, value: bool) {
        self.set(Self::DECIMAL, value)
    }

    /// Returns true if the Break flag is set.
    pub fn brk(self) -> bool {
        self.get(Self::BREAK)
    }

    /// Sets or clears the Break flag.
    pub fn set_brk(&mut self, value: bool) {
        self.set(Self::BREAK, value)
    }

    /// Returns true if the Overflow flag is set.
    pub fn overflow(self) -> bool {
        self.get(Self::OVERFLOW)
    }

    /// Sets or clears the Overflow flag.
    pub fn set_overflow(&mut self, value: bool) {
        self.set(Self::OVERFLOW, value)
    }

    /// Returns true if the Negative flag is set.
    pub fn negative(self) -> bool {
        self.get(Self::NEGATIVE)
    }

    /// Sets or clears the Negative flag.
    pub fn set_negative(&mut self, value: bool) {
        self.set(Self::NEGATIVE, value)
    }

    /// Sets Z and N from a result byte.
    pub fn update_zn(&mut self, result: u8) {
        self.set_zero(result == 0);
        self.set_negative(result & 0x80 != 0);
    }
}

impl fmt::Debug for Flags {
    // Renders as e.g. `Flags(N-----C)`, highest bit first.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let letters = [
            (Self::NEGATIVE, 'N'),
            (Self::OVERFLOW, 'V'),
            (Self::BREAK, 'B'),
            (Self::DECIMAL, 'D'),
            (Self::INTERRUPT_DISABLE, 'I'),
            (Self::ZERO, 'Z'),
            (Self::CARRY, 'C'),
        ];
        let rendered: String = letters
            .iter()
            .map(|&(mask, c)| if self.get(mask) { c } else { '-' })
            .collect();
        write!(f, "Flags({})", rendered)
    }
}

/// Register file of the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorState {
    /// Program counter (address of the next byte to fetch)
    pub pc: u16,

    /// Stack pointer (address of the most recently pushed word)
    pub sp: u16,

    /// Accumulator
    pub a: u8,

    /// X index register
    pub x: u8,

    /// Y index register
    pub y: u8,

    /// Status flags
    pub flags: Flags,
}

impl ProcessorState {
    /// Creates a register file in the reset state.
    pub fn new(startup_address: u16, initial_stack_pointer: u16) -> Self {
        Self {
            pc: startup_address,
            sp: initial_stack_pointer,
            a: 0,
            x: 0,
            y: 0,
            flags: Flags::empty(),
        }
    }

    /// Restores the reset state in place.
    pub fn reset(&mut self, startup_address: u16, initial_stack_pointer: u16) {
        *self = Self::new(startup_address, initial_stack_pointer);
    }
}
