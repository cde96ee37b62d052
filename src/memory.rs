//! # Address Space
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from a
//! specific memory implementation, and `AddressSpace`, the flat 64KB memory the
//! emulator runs on.
//!
//! ## Design Principles
//!
//! - Every access is bounds-checked. An address at or beyond the capacity is a
//!   `MemoryError::OutOfRange`, never a silent wrap.
//! - Addresses are `u32` so that effective-address arithmetic (base + index,
//!   word access at the last byte) can be checked instead of truncated.
//! - Words are stored **big-endian**: the high byte lives at `addr`, the low
//!   byte at `addr + 1`. Operand fetch, the stack and the vector table all use
//!   this order.

use std::fmt;

/// Number of addressable bytes (0x0000-0xFFFF).
pub const MEMORY_SIZE: u32 = 0x1_0000;

/// Errors raised by bounds-checked memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryError {
    /// The address lies outside the memory's capacity.
    OutOfRange {
        /// The offending address
        address: u32,
    },
}

impl fmt::Display for MemoryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemoryError::OutOfRange { address } => {
                write!(f, "Address 0x{:X} is outside the address space", address)
            }
        }
    }
}

impl std::error::Error for MemoryError {}

/// Memory bus trait for the CPU to read/write bytes.
///
/// Implementations only need `read`, `write` and `capacity`; the word helpers
/// and `reset` are provided in terms of them so that every implementation
/// shares one byte order.
///
/// # Examples
///
/// ```
/// use vm6502::{AddressSpace, MemoryBus};
///
/// let mut mem = AddressSpace::new();
///
/// mem.write_word(0x1234, 0xBEEF).unwrap();
/// assert_eq!(mem.read(0x1234).unwrap(), 0xBE); // high byte first
/// assert_eq!(mem.read(0x1235).unwrap(), 0xEF);
/// assert_eq!(mem.read_word(0x1234).unwrap(), 0xBEEF);
///
/// assert!(mem.read(0x1_0000).is_err());
/// ```
pub trait MemoryBus {
    /// Reads the byte at `addr`.
    fn read(&self, addr: u32) -> Result<u8, MemoryError>;

    /// Overwrites the byte at `addr`.
    fn write(&mut self, addr: u32, value: u8) -> Result<(), MemoryError>;

    /// Number of addressable bytes.
    fn capacity(&self) -> u32;

    /// Reads a big-endian word (high byte at `addr`).
    fn read_word(&self, addr: u32) -> Result<u16, MemoryError> {
        let high = self.read(addr)? as u16;
        let low = self.read(addr.wrapping_add(1))? as u16;
        Ok((high << 8) | low)
    }

    /// Writes a big-endian word (high byte at `addr`).
    ///
    /// Both addresses are checked before anything is written.
    fn write_word(&mut self, addr: u32, value: u16) -> Result<(), MemoryError> {
        let next = addr.wrapping_add(1);
        if next >= self.capacity() || addr >= self.capacity() {
            return Err(MemoryError::OutOfRange {
                address: addr.max(next),
            });
        }
        self.write(addr, (value >> 8) as u8)?;
        self.write(next, (value & 0xFF) as u8)
    }

    /// Sets every byte to zero.
    fn reset(&mut self) {
        for addr in 0..self.capacity() {
            self.write(addr, 0).ok();
        }
    }
}

/// Flat 64KB memory, zero-initialised.
///
/// This is the address space the emulator was designed around: one contiguous
/// array holding zero page, stack, program, interrupt handlers, the vector
/// table, the startup code and the output port.
///
/// # Examples
///
/// ```
/// use vm6502::{AddressSpace, MemoryBus};
///
/// let mut mem = AddressSpace::new();
/// mem.write(0xFFFF, b'!').unwrap();
/// assert_eq!(mem.read(0xFFFF).unwrap(), b'!');
///
/// mem.reset();
/// assert_eq!(mem.read(0xFFFF).unwrap(), 0x00);
/// ```
#[derive(Clone)]
pub struct AddressSpace {
    data: Box<[u8]>,
}

impl AddressSpace {
    /// Creates a new address space with all bytes set to zero.
    pub fn new() -> Self {
        Self {
            data: vec![0; MEMORY_SIZE as usize].into_boxed_slice(),
        }
    }

    /// Copies `bytes` into memory starting at `addr`.
    ///
    /// Fails without writing anything if the image would run past the end of
    /// memory.
    pub fn load(&mut self, addr: u32, bytes: &[u8]) -> Result<(), MemoryError> {
        let start = addr as usize;
        let end = start + bytes.len();
        if end > self.data.len() {
            return Err(MemoryError::OutOfRange {
                address: end.saturating_sub(1) as u32,
            });
        }
        self.data[start..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Returns the whole memory as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AddressSpace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AddressSpace")
            .field("capacity", &self.data.len())
            .finish()
    }
}

impl MemoryBus for AddressSpace {
    fn read(&self, addr: u32) -> Result<u8, MemoryError> {
        self.data
            .get(addr as usize)
            .copied()
            .ok_or(MemoryError::OutOfRange { address: addr })
    }

    fn write(&mut self, addr: u32, value: u8) -> Result<(), MemoryError> {
        let cell = self
            .data
            .get_mut(addr as usize)
            .ok_or(MemoryError::OutOfRange { address: addr })?;
        *cell = value;
        Ok(())
    }

    fn capacity(&self) -> u32 {
        MEMORY_SIZE
    }

    fn reset(&mut self) {
        self.data.fill(0);
    }
}
