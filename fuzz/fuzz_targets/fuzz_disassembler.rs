//! Fuzz target for the disassembler.
//!
//! Feeds arbitrary byte sequences to the disassembler and checks that the
//! listing covers the input exactly, one entry after another.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vm6502::disassemble;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    start: u16,
}

fuzz_target!(|input: FuzzInput| {
    if input.bytes.len() > 65536 {
        return;
    }

    let instructions = disassemble(&input.bytes, input.start);

    let mut total_size: usize = 0;
    let mut expected_address = input.start;

    for instr in &instructions {
        assert_eq!(instr.address, expected_address);
        assert!((1..=3).contains(&instr.size_bytes));
        assert_eq!(instr.operand_bytes.len() + 1, instr.size_bytes as usize);

        // Rendering must never panic
        let _ = instr.to_string();

        total_size += instr.size_bytes as usize;
        expected_address = expected_address.wrapping_add(instr.size_bytes as u16);
    }

    assert_eq!(total_size, input.bytes.len());
});
