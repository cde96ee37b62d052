//! Execution loop tests
//!
//! Verifies the cycle-budgeted loop: whole instructions only, overrun of the
//! final instruction, error propagation and cycle accounting.

use vm6502::{
    AddressSpace, EngineState, ExecutionError, MemoryError, StopReason, CPU, STARTUP_ADDRESS,
};

/// Helper function to create a CPU whose startup code jumps to `program` at
/// 0x0200
fn setup_cpu(program: &[u8]) -> CPU<AddressSpace> {
    let mut cpu = CPU::new(AddressSpace::new());
    cpu.load_image(STARTUP_ADDRESS as u32, &[0x4C, 0x02, 0x00]).unwrap();
    cpu.load_image(0x0200, program).unwrap();
    cpu
}

#[test]
fn test_execute_starts_at_startup_code() {
    let mut cpu = setup_cpu(&[0xEA]);

    cpu.execute(1).unwrap();

    assert_eq!(cpu.pc(), 0x0200);
}

#[test]
fn test_exact_budget() {
    // JMP (3) + LDA #imm (2) = 5
    let mut cpu = setup_cpu(&[0xA9, 0x01, 0xA9, 0x02]);

    let summary = cpu.execute(5).unwrap();

    assert_eq!(summary.stop_reason, StopReason::BudgetExhausted);
    assert_eq!(summary.instructions, 2);
    assert_eq!(summary.cycles_used, 5);
    assert_eq!(summary.overrun, 0);
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn test_final_instruction_completes_past_budget() {
    // JMP (3) leaves 1 unit; STA $0030 costs 4 and still completes
    let mut cpu = setup_cpu(&[0x8D, 0x00, 0x30, 0xEA]);
    cpu.set_a(0x5A);

    let summary = cpu.execute(4).unwrap();

    assert_eq!(summary.instructions, 2);
    assert_eq!(summary.overrun, 3);
    assert_eq!(summary.cycles_used, 7);
    assert_eq!(cpu.pc(), 0x0203);
    assert_eq!(cpu.memory().as_slice()[0x30], 0x5A);
}

#[test]
fn test_zero_budget() {
    let mut cpu = setup_cpu(&[0xEA]);

    let summary = cpu.execute(0).unwrap();

    assert_eq!(summary.instructions, 0);
    assert_eq!(cpu.pc(), STARTUP_ADDRESS);
}

#[test]
fn test_execute_can_be_resumed() {
    // INX ; JMP $0200
    let mut cpu = setup_cpu(&[0xE8, 0x4C, 0x02, 0x00]);

    cpu.execute(3).unwrap(); // startup JMP
    cpu.execute(5).unwrap(); // INX + JMP
    cpu.execute(5).unwrap(); // INX + JMP

    assert_eq!(cpu.x(), 2);
    assert_eq!(cpu.pc(), 0x0200);
    assert_eq!(cpu.total_cycles(), 13);
    assert_eq!(cpu.state(), EngineState::Halted);
}

#[test]
fn test_self_jump_halts_by_budget() {
    // JMP $0200 forever
    let mut cpu = setup_cpu(&[0x4C, 0x02, 0x00]);

    let summary = cpu.execute(300).unwrap();

    assert_eq!(summary.instructions, 100);
    assert_eq!(cpu.pc(), 0x0200);
}

#[test]
fn test_fatal_error_stops_execution() {
    // LDX #$01 ; LDA $FFFF,X
    let mut cpu = setup_cpu(&[0xA2, 0x01, 0xBD, 0xFF, 0xFF, 0xEA]);

    let err = cpu.execute(100).unwrap_err();

    assert_eq!(
        err,
        ExecutionError::Memory(MemoryError::OutOfRange { address: 0x1_0000 })
    );
    assert_eq!(cpu.x(), 0x01);
    assert_eq!(cpu.pc(), 0x0205);
}

#[test]
fn test_running_off_end_of_memory() {
    // Startup code at 0xFFFC is three NOPs followed by the output port byte
    let mut cpu = CPU::new(AddressSpace::new());
    cpu.load_image(STARTUP_ADDRESS as u32, &[0xEA, 0xEA, 0xEA, 0xEA]).unwrap();

    let err = cpu.execute(100).unwrap_err();

    assert_eq!(err, ExecutionError::ProgramCounterOverflow { pc: 0xFFFF });
}

#[test]
fn test_error_display() {
    let err = ExecutionError::StackOverflow { sp: 0x0001 };
    assert!(err.to_string().contains("0x0001"));

    let err: ExecutionError = MemoryError::OutOfRange { address: 0x10000 }.into();
    assert!(std::error::Error::source(&err).is_some());
}
