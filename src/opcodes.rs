//! # Opcode Metadata Table
//!
//! This module contains the 256-entry opcode table that serves as the single
//! source of truth for decoding. Each defined opcode maps to an operation, an
//! addressing mode and its cycle cost; every byte without an entry is an
//! invalid opcode and traps through the invalid-opcode interrupt.
//!
//! Encodings follow the NMOS 6502 numbering for the subset this processor
//! implements.
//!
//! ## Cycle Costs
//!
//! Each byte fetched, read or written costs one cycle and is charged where the
//! access happens. The table only records what is not a memory access:
//!
//! - index additions, charged by the addressing mode
//!   ([`AddressingMode::index_cycles`])
//! - `extra_cycles`, internal work of the operation itself (register updates,
//!   read-modify-write turnaround, return-address adjustment)

use crate::addressing::AddressingMode;

/// Operation performed by an opcode, independent of addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Load / store
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,

    // Arithmetic and logic
    Adc,
    And,
    Ora,
    Eor,

    // Comparison
    Cmp,
    Cpx,
    Cpy,

    // Increment / decrement
    Inc,
    Dec,
    Inx,
    Iny,
    Dex,
    Dey,

    // Register transfer
    Tax,
    Tay,
    Txa,
    Tya,

    // Control flow
    Jmp,
    Jsr,
    Rts,
    Brk,
    Rti,
    Nop,

    // Branches
    Bcc,
    Bcs,
    Beq,
    Bne,
    Bmi,
    Bpl,
    Bvc,
    Bvs,

    // Stack
    Pha,
    Php,
    Pla,
    Plp,

    // Flags
    Clc,
    Cld,
    Cli,
    Clv,
    Sec,
    Sed,
    Sei,
}

impl Operation {
    /// Three-letter assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Operation::Lda => "LDA",
            Operation::Ldx => "LDX",
            Operation::Ldy => "LDY",
            Operation::Sta => "STA",
            Operation::Stx => "STX",
            Operation::Sty => "STY",
            Operation::Adc => "ADC",
            Operation::And => "AND",
            Operation::Ora => "ORA",
            Operation::Eor => "EOR",
            Operation::Cmp => "CMP",
            Operation::Cpx => "CPX",
            Operation::Cpy => "CPY",
            Operation::Inc => "INC",
            Operation::Dec => "DEC",
            Operation::Inx => "INX",
            Operation::Iny => "INY",
            Operation::Dex => "DEX",
            Operation::Dey => "DEY",
            Operation::Tax => "TAX",
            Operation::Tay => "TAY",
            Operation::Txa => "TXA",
            Operation::Tya => "TYA",
            Operation::Jmp => "JMP",
            Operation::Jsr => "JSR",
            Operation::Rts => "RTS",
            Operation::Brk => "BRK",
            Operation::Rti => "RTI",
            Operation::Nop => "NOP",
            Operation::Bcc => "BCC",
            Operation::Bcs => "BCS",
            Operation::Beq => "BEQ",
            Operation::Bne => "BNE",
            Operation::Bmi => "BMI",
            Operation::Bpl => "BPL",
            Operation::Bvc => "BVC",
            Operation::Bvs => "BVS",
            Operation::Pha => "PHA",
            Operation::Php => "PHP",
            Operation::Pla => "PLA",
            Operation::Plp => "PLP",
            Operation::Clc => "CLC",
            Operation::Cld => "CLD",
            Operation::Cli => "CLI",
            Operation::Clv => "CLV",
            Operation::Sec => "SEC",
            Operation::Sed => "SED",
            Operation::Sei => "SEI",
        }
    }
}

/// Metadata for a single opcode.
///
/// # Examples
///
/// ```
/// use vm6502::{AddressingMode, Operation, OPCODE_TABLE};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = OPCODE_TABLE[0xA9].unwrap();
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.operation, Operation::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.size_bytes, 2);
///
/// // 0x02 is not defined
/// assert!(OPCODE_TABLE[0x02].is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic (e.g. "LDA", "STA").
    pub mnemonic: &'static str,

    /// Operation to perform.
    pub operation: Operation,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Total instruction size in bytes (opcode + operands), 1-3.
    pub size_bytes: u8,

    /// Internal cycles charged on top of memory accesses and index additions.
    pub extra_cycles: u8,
}

struct Definition {
    opcode: u8,
    operation: Operation,
    mode: AddressingMode,
    extra_cycles: u8,
}

const fn def(opcode: u8, operation: Operation, mode: AddressingMode, extra_cycles: u8) -> Definition {
    Definition {
        opcode,
        operation,
        mode,
        extra_cycles,
    }
}

use AddressingMode::{
    Absolute as Abs, AbsoluteX as AbsX, AbsoluteY as AbsY, Immediate as Imm, Implicit as Imp,
    Relative as Rel, ZeroPage as Zp, ZeroPageX as ZpX, ZeroPageY as ZpY,
};
use Operation::*;

const DEFINITIONS: &[Definition] = &[
    // ADC
    def(0x69, Adc, Imm, 0),
    def(0x65, Adc, Zp, 0),
    def(0x75, Adc, ZpX, 0),
    def(0x6D, Adc, Abs, 0),
    def(0x7D, Adc, AbsX, 0),
    def(0x79, Adc, AbsY, 0),
    // AND
    def(0x29, And, Imm, 0),
    def(0x25, And, Zp, 0),
    def(0x35, And, ZpX, 0),
    def(0x2D, And, Abs, 0),
    def(0x3D, And, AbsX, 0),
    def(0x39, And, AbsY, 0),
    // ORA
    def(0x09, Ora, Imm, 0),
    def(0x05, Ora, Zp, 0),
    def(0x15, Ora, ZpX, 0),
    def(0x0D, Ora, Abs, 0),
    def(0x1D, Ora, AbsX, 0),
    def(0x19, Ora, AbsY, 0),
    // EOR
    def(0x49, Eor, Imm, 0),
    def(0x45, Eor, Zp, 0),
    def(0x55, Eor, ZpX, 0),
    def(0x4D, Eor, Abs, 0),
    def(0x5D, Eor, AbsX, 0),
    def(0x59, Eor, AbsY, 0),
    // CMP
    def(0xC9, Cmp, Imm, 0),
    def(0xC5, Cmp, Zp, 0),
    def(0xD5, Cmp, ZpX, 0),
    def(0xCD, Cmp, Abs, 0),
    def(0xDD, Cmp, AbsX, 0),
    def(0xD9, Cmp, AbsY, 0),
    // CPX / CPY
    def(0xE0, Cpx, Imm, 0),
    def(0xE4, Cpx, Zp, 0),
    def(0xEC, Cpx, Abs, 0),
    def(0xC0, Cpy, Imm, 0),
    def(0xC4, Cpy, Zp, 0),
    def(0xCC, Cpy, Abs, 0),
    // LDA
    def(0xA9, Lda, Imm, 0),
    def(0xA5, Lda, Zp, 0),
    def(0xB5, Lda, ZpX, 0),
    def(0xAD, Lda, Abs, 0),
    def(0xBD, Lda, AbsX, 0),
    def(0xB9, Lda, AbsY, 0),
    // LDX
    def(0xA2, Ldx, Imm, 0),
    def(0xA6, Ldx, Zp, 0),
    def(0xB6, Ldx, ZpY, 0),
    def(0xAE, Ldx, Abs, 0),
    def(0xBE, Ldx, AbsY, 0),
    // LDY
    def(0xA0, Ldy, Imm, 0),
    def(0xA4, Ldy, Zp, 0),
    def(0xB4, Ldy, ZpX, 0),
    def(0xAC, Ldy, Abs, 0),
    def(0xBC, Ldy, AbsX, 0),
    // STA
    def(0x85, Sta, Zp, 0),
    def(0x95, Sta, ZpX, 0),
    def(0x8D, Sta, Abs, 0),
    def(0x9D, Sta, AbsX, 0),
    def(0x99, Sta, AbsY, 0),
    // STX
    def(0x86, Stx, Zp, 0),
    def(0x96, Stx, ZpY, 0),
    def(0x8E, Stx, Abs, 0),
    // STY
    def(0x84, Sty, Zp, 0),
    def(0x94, Sty, ZpX, 0),
    def(0x8C, Sty, Abs, 0),
    // INC / DEC (read-modify-write)
    def(0xE6, Inc, Zp, 1),
    def(0xF6, Inc, ZpX, 1),
    def(0xEE, Inc, Abs, 1),
    def(0xFE, Inc, AbsX, 1),
    def(0xC6, Dec, Zp, 1),
    def(0xD6, Dec, ZpX, 1),
    def(0xCE, Dec, Abs, 1),
    def(0xDE, Dec, AbsX, 1),
    // Register increment / decrement
    def(0xE8, Inx, Imp, 1),
    def(0xC8, Iny, Imp, 1),
    def(0xCA, Dex, Imp, 1),
    def(0x88, Dey, Imp, 1),
    // Transfers
    def(0xAA, Tax, Imp, 1),
    def(0xA8, Tay, Imp, 1),
    def(0x8A, Txa, Imp, 1),
    def(0x98, Tya, Imp, 1),
    // Control flow
    def(0x4C, Jmp, Abs, 0),
    def(0x20, Jsr, Abs, 1),
    def(0x60, Rts, Imp, 3),
    def(0x00, Brk, Imp, 0),
    def(0x40, Rti, Imp, 1),
    def(0xEA, Nop, Imp, 1),
    // Branches (taken branches cost one more)
    def(0x90, Bcc, Rel, 1),
    def(0xB0, Bcs, Rel, 1),
    def(0xF0, Beq, Rel, 1),
    def(0xD0, Bne, Rel, 1),
    def(0x30, Bmi, Rel, 1),
    def(0x10, Bpl, Rel, 1),
    def(0x50, Bvc, Rel, 1),
    def(0x70, Bvs, Rel, 1),
    // Stack
    def(0x48, Pha, Imp, 0),
    def(0x08, Php, Imp, 0),
    def(0x68, Pla, Imp, 0),
    def(0x28, Plp, Imp, 0),
    // Flags
    def(0x18, Clc, Imp, 1),
    def(0xD8, Cld, Imp, 1),
    def(0x58, Cli, Imp, 1),
    def(0xB8, Clv, Imp, 1),
    def(0x38, Sec, Imp, 1),
    def(0xF8, Sed, Imp, 1),
    def(0x78, Sei, Imp, 1),
];

const fn build_table() -> [Option<OpcodeMetadata>; 256] {
    let mut table: [Option<OpcodeMetadata>; 256] = [None; 256];
    let mut i = 0;
    while i < DEFINITIONS.len() {
        let d = &DEFINITIONS[i];
        table[d.opcode as usize] = Some(OpcodeMetadata {
            mnemonic: d.operation.mnemonic(),
            operation: d.operation,
            addressing_mode: d.mode,
            size_bytes: 1 + d.mode.operand_size(),
            extra_cycles: d.extra_cycles,
        });
        i += 1;
    }
    table
}

/// Opcode table indexed by opcode byte. `None` marks an invalid opcode.
pub const OPCODE_TABLE: [Option<OpcodeMetadata>; 256] = build_table();

/// Looks up the metadata for `opcode`.
pub fn decode(opcode: u8) -> Option<&'static OpcodeMetadata> {
    OPCODE_TABLE[opcode as usize].as_ref()
}
