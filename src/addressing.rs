//! # Addressing Modes
//!
//! This module defines the addressing modes supported by the processor and the
//! rules that turn an instruction's operand bytes into an effective operand.
//!
//! Resolution is split in two halves. The CPU fetches the raw operand
//! (`AddressingMode::operand_size` bytes, big-endian for words) and this module
//! computes the effective operand from it plus the index registers. Per-mode
//! cycle costs live here as data (`AddressingMode::index_cycles`) so that every
//! instruction family shares them.
//!
//! | Mode | Effective operand | Extra cycles |
//! |------|-------------------|--------------|
//! | Immediate | the fetched byte itself | 0 |
//! | ZeroPage | 0x00nn | 0 |
//! | ZeroPageX/Y | 0x00nn + X/Y, wrapped within the zero page | 1 |
//! | Absolute | the fetched word | 0 |
//! | AbsoluteX/Y | the fetched word + X/Y, not wrapped | 1 |
//!
//! Absolute indexed addresses are deliberately not truncated to 16 bits: an
//! address past 0xFFFF is reported by the memory as out of range.

/// Addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wraps within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wraps within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ +3 (offset is relative to the address after the branch)
    Relative,

    /// Full 16-bit address, high byte first.
    ///
    /// Example: JMP $0100 (encoded 4C 01 00)
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: STA $FFF0,X
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,
}

/// Effective operand produced by address resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// The operand is inline data; memory is not dereferenced.
    Inline(u8),

    /// The operand lives at this address.
    Address(u32),
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_size(self) -> u8 {
        match self {
            AddressingMode::Implicit => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative => 1,
            AddressingMode::Absolute | AddressingMode::AbsoluteX | AddressingMode::AbsoluteY => 2,
        }
    }

    /// Cycles spent on index addition, on top of the operand fetch.
    pub const fn index_cycles(self) -> u32 {
        match self {
            AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY => 1,
            _ => 0,
        }
    }

    /// Whether this mode names a memory location an instruction can write to.
    pub const fn is_memory(self) -> bool {
        matches!(
            self,
            AddressingMode::ZeroPage
                | AddressingMode::ZeroPageX
                | AddressingMode::ZeroPageY
                | AddressingMode::Absolute
                | AddressingMode::AbsoluteX
                | AddressingMode::AbsoluteY
        )
    }
}

/// Computes the effective operand for `mode`.
///
/// `raw` is the fetched operand: the single byte for one-byte modes, the
/// assembled big-endian word for two-byte modes. Returns `None` for modes that
/// carry no data operand (Implicit, Relative).
///
/// # Examples
///
/// ```
/// use vm6502::addressing::{effective_operand, AddressingMode, Operand};
///
/// // Zero page indexing wraps within the zero page
/// assert_eq!(
///     effective_operand(AddressingMode::ZeroPageX, 0xF0, 0x20, 0),
///     Some(Operand::Address(0x0010))
/// );
///
/// // Absolute indexing does not wrap
/// assert_eq!(
///     effective_operand(AddressingMode::AbsoluteY, 0xFFFF, 0, 0x01),
///     Some(Operand::Address(0x1_0000))
/// );
/// ```
pub fn effective_operand(mode: AddressingMode, raw: u16, x: u8, y: u8) -> Option<Operand> {
    let operand = match mode {
        AddressingMode::Immediate => Operand::Inline(raw as u8),
        AddressingMode::ZeroPage => Operand::Address((raw & 0xFF) as u32),
        AddressingMode::ZeroPageX => Operand::Address((raw as u8).wrapping_add(x) as u32),
        AddressingMode::ZeroPageY => Operand::Address((raw as u8).wrapping_add(y) as u32),
        AddressingMode::Absolute => Operand::Address(raw as u32),
        AddressingMode::AbsoluteX => Operand::Address(raw as u32 + x as u32),
        AddressingMode::AbsoluteY => Operand::Address(raw as u32 + y as u32),
        AddressingMode::Implicit | AddressingMode::Relative => return None,
    };
    Some(operand)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_sizes() {
        assert_eq!(AddressingMode::Implicit.operand_size(), 0);
        assert_eq!(AddressingMode::Immediate.operand_size(), 1);
        assert_eq!(AddressingMode::Relative.operand_size(), 1);
        assert_eq!(AddressingMode::ZeroPageY.operand_size(), 1);
        assert_eq!(AddressingMode::Absolute.operand_size(), 2);
        assert_eq!(AddressingMode::AbsoluteX.operand_size(), 2);
    }

    #[test]
    fn test_index_cycles() {
        assert_eq!(AddressingMode::Immediate.index_cycles(), 0);
        assert_eq!(AddressingMode::ZeroPage.index_cycles(), 0);
        assert_eq!(AddressingMode::Absolute.index_cycles(), 0);
        assert_eq!(AddressingMode::ZeroPageX.index_cycles(), 1);
        assert_eq!(AddressingMode::ZeroPageY.index_cycles(), 1);
        assert_eq!(AddressingMode::AbsoluteX.index_cycles(), 1);
        assert_eq!(AddressingMode::AbsoluteY.index_cycles(), 1);
    }

    #[test]
    fn test_immediate_is_inline() {
        assert_eq!(
            effective_operand(AddressingMode::Immediate, 0x48, 0xFF, 0xFF),
            Some(Operand::Inline(0x48))
        );
    }

    #[test]
    fn test_zero_page_indexed() {
        assert_eq!(
            effective_operand(AddressingMode::ZeroPageY, 0x02, 0x00, 0x03),
            Some(Operand::Address(0x0005))
        );
        assert_eq!(
            effective_operand(AddressingMode::ZeroPageX, 0xFF, 0x01, 0x00),
            Some(Operand::Address(0x0000))
        );
    }

    #[test]
    fn test_absolute_indexed() {
        assert_eq!(
            effective_operand(AddressingMode::AbsoluteX, 0xFFF0, 0x0F, 0x00),
            Some(Operand::Address(0xFFFF))
        );
        assert_eq!(
            effective_operand(AddressingMode::AbsoluteX, 0x12FF, 0x01, 0x00),
            Some(Operand::Address(0x1300))
        );
    }

    #[test]
    fn test_no_data_operand() {
        assert_eq!(effective_operand(AddressingMode::Implicit, 0, 0, 0), None);
        assert_eq!(effective_operand(AddressingMode::Relative, 3, 0, 0), None);
    }
}
