//! Fuzz target for the execution loop.
//!
//! Loads an arbitrary program, vector table and register file, then runs it
//! for a bounded cycle budget. Any outcome other than a panic is acceptable;
//! when execution succeeds the summary must agree with the budget.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vm6502::{vector_address, AddressSpace, EngineState, Flags, CPU, STARTUP_ADDRESS};

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u16,
    flags: u16,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    state: FuzzCpuState,
    /// Program placed at 0x0100
    program: Vec<u8>,
    /// Zero page and stack contents
    zero_page: [u8; 256],
    /// Handler addresses for the first eight vector slots
    vectors: [u16; 8],
    budget: u16,
}

fuzz_target!(|input: FuzzInput| {
    if input.program.len() > 0x4000 {
        return;
    }

    let mut cpu = CPU::new(AddressSpace::new());
    let setup = cpu
        .load_image(0x0000, &input.zero_page)
        .and_then(|_| cpu.load_image(0x0100, &input.program))
        .and_then(|_| cpu.load_image(STARTUP_ADDRESS as u32, &[0x4C, 0x01, 0x00]));
    assert!(setup.is_ok());

    for (slot, handler) in input.vectors.iter().enumerate() {
        let bytes = handler.to_be_bytes();
        assert!(cpu.load_image(vector_address(slot as u8), &bytes).is_ok());
    }

    cpu.set_a(input.state.a);
    cpu.set_x(input.state.x);
    cpu.set_y(input.state.y);
    cpu.set_sp(input.state.sp);
    cpu.set_flags(Flags::unpack(input.state.flags));

    let budget = input.budget as u32;
    if let Ok(summary) = cpu.execute(budget) {
        assert_eq!(cpu.state(), EngineState::Halted);
        assert_eq!(summary.cycles_used, budget as u64 + summary.overrun);
        assert_eq!(cpu.total_cycles(), summary.cycles_used);
        assert_eq!(cpu.flags().pack() & !Flags::ALL, 0);
    }
});
