//! # Disassembler
//!
//! Turns machine code back into assembly text using the opcode table.
//!
//! Operands are shown in the engine's big-endian order, so `8D FF FF` reads as
//! `STA $FFFF` and `4C 01 00` as `JMP $0100`. Branch offsets are shown signed,
//! relative to the next instruction (`BNE -12`); [`Instruction::branch_target`]
//! gives the absolute address.
//!
//! ```
//! use vm6502::disassemble;
//!
//! let listing: Vec<String> = disassemble(&[0xA2, 0x48, 0x8E, 0xFF, 0xFF, 0x02], 0x0100)
//!     .iter()
//!     .map(|instr| instr.to_string())
//!     .collect();
//!
//! assert_eq!(listing, ["LDX #$48", "STX $FFFF", ".byte $02"]);
//! ```

use std::fmt;

use crate::addressing::AddressingMode;
use crate::opcodes::decode;

/// Mnemonic used for bytes that do not decode.
pub const DATA_BYTE: &str = ".byte";

/// A single disassembled instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Memory address where this instruction starts
    pub address: u16,

    /// The opcode byte
    pub opcode: u8,

    /// Instruction mnemonic, or [`DATA_BYTE`] for an undecodable byte
    pub mnemonic: &'static str,

    /// Addressing mode used by this instruction
    pub addressing_mode: AddressingMode,

    /// Operand bytes in memory order (0-2 bytes)
    pub operand_bytes: Vec<u8>,

    /// Total size in bytes (opcode + operands)
    pub size_bytes: u8,
}

impl Instruction {
    fn data_byte(address: u16, byte: u8) -> Self {
        Self {
            address,
            opcode: byte,
            mnemonic: DATA_BYTE,
            addressing_mode: AddressingMode::Implicit,
            operand_bytes: Vec::new(),
            size_bytes: 1,
        }
    }

    /// Returns true if this entry is a raw data byte rather than an instruction.
    pub fn is_data(&self) -> bool {
        self.mnemonic == DATA_BYTE
    }

    /// Operand as a big-endian word, for two-byte operands.
    pub fn operand_word(&self) -> Option<u16> {
        match self.operand_bytes.as_slice() {
            [high, low] => Some(u16::from_be_bytes([*high, *low])),
            _ => None,
        }
    }

    /// Destination of a branch, or `None` if this is not a branch or the
    /// destination falls outside the address space.
    pub fn branch_target(&self) -> Option<u16> {
        if self.addressing_mode != AddressingMode::Relative {
            return None;
        }
        let offset = *self.operand_bytes.first()? as i8;
        self.address
            .checked_add(self.size_bytes as u16)?
            .checked_add_signed(offset as i16)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AddressingMode::*;

        if self.is_data() {
            return write!(f, "{} ${:02X}", DATA_BYTE, self.opcode);
        }

        let byte = self.operand_bytes.first().copied().unwrap_or(0);
        let word = self.operand_word().unwrap_or(0);

        match self.addressing_mode {
            Implicit => write!(f, "{}", self.mnemonic),
            Immediate => write!(f, "{} #${:02X}", self.mnemonic, byte),
            ZeroPage => write!(f, "{} ${:02X}", self.mnemonic, byte),
            ZeroPageX => write!(f, "{} ${:02X},X", self.mnemonic, byte),
            ZeroPageY => write!(f, "{} ${:02X},Y", self.mnemonic, byte),
            Relative => write!(f, "{} {:+}", self.mnemonic, byte as i8),
            Absolute => write!(f, "{} ${:04X}", self.mnemonic, word),
            AbsoluteX => write!(f, "{} ${:04X},X", self.mnemonic, word),
            AbsoluteY => write!(f, "{} ${:04X},Y", self.mnemonic, word),
        }
    }
}

/// Size in bytes of the longest instruction.
const MAX_INSTRUCTION_SIZE: usize = 3;

/// Decodes the instruction at the start of `bytes`, located at `address`.
///
/// Returns `None` for an invalid opcode or when `bytes` is too short to hold
/// the whole instruction.
pub fn decode_instruction(bytes: &[u8], address: u16) -> Option<Instruction> {
    let opcode = *bytes.first()?;
    let metadata = decode(opcode)?;
    let size = metadata.size_bytes as usize;
    let operand_bytes = bytes.get(1..size)?.to_vec();

    Some(Instruction {
        address,
        opcode,
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
        operand_bytes,
        size_bytes: metadata.size_bytes,
    })
}

/// Disassembles `bytes` as if loaded at `start`.
///
/// Undecodable bytes, including a truncated final instruction, become one
/// [`DATA_BYTE`] entry per byte so that decoding resynchronises.
pub fn disassemble(bytes: &[u8], start: u16) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let address = start.wrapping_add(offset as u16);
        let instr = decode_instruction(&bytes[offset..], address)
            .unwrap_or_else(|| Instruction::data_byte(address, bytes[offset]));
        offset += instr.size_bytes as usize;
        instructions.push(instr);
    }

    instructions
}

/// Disassembles at most `count` instructions from the start of `bytes`.
///
/// Decodes no more than `count * 3` bytes, the most `count` instructions can
/// occupy, so the result matches the first `count` entries of [`disassemble`].
pub fn disassemble_count(bytes: &[u8], start: u16, count: usize) -> Vec<Instruction> {
    let end = bytes.len().min(count.saturating_mul(MAX_INSTRUCTION_SIZE));
    let mut instructions = disassemble(&bytes[..end], start);
    instructions.truncate(count);
    instructions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: &[u8]) -> String {
        decode_instruction(bytes, 0x0100).unwrap().to_string()
    }

    #[test]
    fn test_disassemble_empty() {
        assert!(disassemble(&[], 0).is_empty());
    }

    #[test]
    fn test_format_modes() {
        assert_eq!(text(&[0xA9, 0x48]), "LDA #$48");
        assert_eq!(text(&[0x8D, 0xFF, 0xFF]), "STA $FFFF");
        assert_eq!(text(&[0xB5, 0x10]), "LDA $10,X");
        assert_eq!(text(&[0xB6, 0x10]), "LDX $10,Y");
        assert_eq!(text(&[0xBD, 0x12, 0x34]), "LDA $1234,X");
        assert_eq!(text(&[0x99, 0x12, 0x34]), "STA $1234,Y");
        assert_eq!(text(&[0xEA]), "NOP");
        assert_eq!(text(&[0xF0, 0x03]), "BEQ +3");
        assert_eq!(text(&[0xD0, 0xF4]), "BNE -12");
    }

    #[test]
    fn test_branch_target() {
        let instr = decode_instruction(&[0xD0, 0xFE], 0x0200).unwrap();
        assert_eq!(instr.branch_target(), Some(0x0200));

        let jmp = decode_instruction(&[0x4C, 0x01, 0x00], 0x0200).unwrap();
        assert_eq!(jmp.branch_target(), None);
        assert_eq!(jmp.operand_word(), Some(0x0100));
    }

    #[test]
    fn test_truncated_instruction() {
        assert_eq!(decode_instruction(&[0x8D, 0xFF], 0), None);

        let listing = disassemble(&[0x8D, 0xFF], 0x0300);
        assert_eq!(listing.len(), 2);
        assert!(listing.iter().all(Instruction::is_data));
        assert_eq!(listing[1].address, 0x0301);
    }

    #[test]
    fn test_invalid_opcode_is_data() {
        let listing = disassemble(&[0xFF, 0xEA], 0x0000);
        assert_eq!(listing[0].to_string(), ".byte $FF");
        assert_eq!(listing[1].to_string(), "NOP");
    }
}
