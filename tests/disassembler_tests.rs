//! Integration tests for the disassembler

use vm6502::{decode_instruction, disassemble, disassemble_count, AddressingMode};

#[test]
fn test_single_instruction_disassembly() {
    let instructions = disassemble(&[0xA9, 0x42], 0x0000);

    assert_eq!(instructions.len(), 1);

    let instr = &instructions[0];
    assert_eq!(instr.address, 0x0000);
    assert_eq!(instr.opcode, 0xA9);
    assert_eq!(instr.mnemonic, "LDA");
    assert_eq!(instr.addressing_mode, AddressingMode::Immediate);
    assert_eq!(instr.operand_bytes, vec![0x42]);
    assert_eq!(instr.size_bytes, 2);
    assert_eq!(instr.to_string(), "LDA #$42");
}

#[test]
fn test_multi_instruction_disassembly() {
    // LDA #'H' ; STA $00 ; JMP $0100 ; BEQ +3 ; RTI
    let bytes = &[0xA9, 0x48, 0x85, 0x00, 0x4C, 0x01, 0x00, 0xF0, 0x03, 0x40];

    let listing: Vec<(u16, String)> = disassemble(bytes, 0x0100)
        .iter()
        .map(|i| (i.address, i.to_string()))
        .collect();

    assert_eq!(
        listing,
        vec![
            (0x0100, "LDA #$48".to_string()),
            (0x0102, "STA $00".to_string()),
            (0x0104, "JMP $0100".to_string()),
            (0x0107, "BEQ +3".to_string()),
            (0x0109, "RTI".to_string()),
        ]
    );
}

#[test]
fn test_startup_code() {
    let instr = decode_instruction(&[0x4C, 0x01, 0x00], 0xFFFC).unwrap();

    assert_eq!(instr.to_string(), "JMP $0100");
    assert_eq!(instr.operand_word(), Some(0x0100));
}

#[test]
fn test_branch_target_matches_engine() {
    // BNE -10 at 0x013E lands 10 bytes before 0x0140
    let instr = decode_instruction(&[0xD0, 0xF6], 0x013E).unwrap();

    assert_eq!(instr.to_string(), "BNE -10");
    assert_eq!(instr.branch_target(), Some(0x0136));
}

#[test]
fn test_invalid_bytes_resynchronise() {
    let listing = disassemble(&[0x02, 0xFF, 0xEA], 0x0200);

    assert_eq!(listing.len(), 3);
    assert!(listing[0].is_data());
    assert!(listing[1].is_data());
    assert_eq!(listing[2].to_string(), "NOP");
    assert_eq!(listing[2].address, 0x0202);
}

#[test]
fn test_disassemble_count_reads_only_what_it_needs() {
    // JMP $0100 followed by a 64KB tail of NOPs
    let mut memory = vec![0xEA; 0x1_0000];
    memory[..3].copy_from_slice(&[0x4C, 0x01, 0x00]);

    let listing = disassemble_count(&memory, 0x0000, 2);

    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].to_string(), "JMP $0100");
    assert_eq!(listing[1].address, 0x0003);
    assert_eq!(listing[1].mnemonic, "NOP");
}

#[test]
fn test_disassemble_count_matches_full_listing() {
    let program = [0xA9, 0x48, 0x8D, 0xFF, 0xFF, 0xFF, 0xD0, 0xF6, 0xEA];

    let full = disassemble(&program, 0x0200);
    let counted = disassemble_count(&program, 0x0200, 4);

    assert_eq!(counted, full[..4].to_vec());
    assert_eq!(disassemble_count(&program, 0x0200, 100), full);
}
