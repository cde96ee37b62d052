//! Tests for software interrupts (BRK), RTI and host interrupt requests.
//!
//! BRK takes its vector slot from the accumulator. Entry pushes the return
//! address and then the packed flags; RTI pulls them in reverse order.

use vm6502::interrupts::{USER_0, USER_1};
use vm6502::{vector_address, AddressSpace, MemoryBus, CPU, INITIAL_STACK_POINTER};

/// Helper function to create a CPU with `program` at 0x0200 and handlers for
/// slot 0 (LDA #$69 ; RTI) and slot 1 (INX ; RTI)
fn setup_cpu(program: &[u8]) -> CPU<AddressSpace> {
    let mut cpu = CPU::new(AddressSpace::new());
    cpu.load_image(0x0200, program).unwrap();
    cpu.load_image(0xF100, &[0xA9, 0x69, 0x40]).unwrap();
    cpu.load_image(0xF103, &[0xE8, 0x40]).unwrap();
    cpu.memory_mut().write_word(vector_address(USER_0), 0xF100).unwrap();
    cpu.memory_mut().write_word(vector_address(USER_1), 0xF103).unwrap();
    cpu.set_pc(0x0200);
    cpu
}

#[test]
fn test_brk_vectors_through_accumulator_slot() {
    // LDA #1 ; BRK
    let mut cpu = setup_cpu(&[0xA9, 0x01, 0x00]);

    cpu.step().unwrap();
    let cycles = cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0xF103);
    assert_eq!(cpu.sp(), INITIAL_STACK_POINTER - 4);
    assert_eq!(cpu.memory().read_word(0x00FD), Ok(0x0203));
    assert!(cpu.flag_b());
    assert!(!cpu.flag_i());
    // opcode, two pushed words, vector word
    assert_eq!(cycles, 7);
}

#[test]
fn test_brk_saves_flags_before_setting_break() {
    let mut cpu = setup_cpu(&[0x00]);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    let saved = cpu.memory().read_word(0x00FB).unwrap();
    assert_eq!(saved, 0x0001);
    assert!(cpu.flag_b());
}

#[test]
fn test_rti_resumes_after_brk() {
    // LDA #0 ; BRK ; INY
    let mut cpu = setup_cpu(&[0xA9, 0x00, 0x00, 0xC8]);

    cpu.step().unwrap(); // LDA
    let before = cpu.flags();
    cpu.step().unwrap(); // BRK
    cpu.step().unwrap(); // LDA #$69 in handler
    let cycles = cpu.step().unwrap(); // RTI

    assert_eq!(cpu.pc(), 0x0203);
    assert_eq!(cpu.flags(), before);
    assert!(!cpu.flag_b());
    assert_eq!(cpu.a(), 0x69);
    assert_eq!(cpu.sp(), INITIAL_STACK_POINTER);
    assert_eq!(cycles, 6);

    cpu.step().unwrap();
    assert_eq!(cpu.y(), 1);
}

#[test]
fn test_rti_restores_flags_changed_by_handler() {
    // LDA #1 ; BRK ; with handler INX setting Z/N from X
    let mut cpu = setup_cpu(&[0xA9, 0x01, 0x00]);
    cpu.set_x(0xFF);

    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap(); // INX -> 0, Z set
    assert!(cpu.flag_z());

    cpu.step().unwrap(); // RTI
    assert!(!cpu.flag_z());
    assert_eq!(cpu.x(), 0x00);
}

#[test]
fn test_request_interrupt() {
    let mut cpu = setup_cpu(&[0xEA]);

    assert!(cpu.request_interrupt(USER_1).unwrap());
    assert_eq!(cpu.pc(), 0xF103);
    assert!(cpu.flag_i());

    // Handler: INX ; RTI
    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.x(), 1);
    assert_eq!(cpu.pc(), 0x0200);
    assert!(!cpu.flag_i());
}

#[test]
fn test_request_interrupt_masked() {
    let mut cpu = setup_cpu(&[0xEA]);
    cpu.set_flag_i(true);

    assert!(!cpu.request_interrupt(USER_1).unwrap());
    assert_eq!(cpu.pc(), 0x0200);
    assert_eq!(cpu.sp(), INITIAL_STACK_POINTER);
}

#[test]
fn test_sei_masks_but_not_brk() {
    // SEI ; LDA #1 ; BRK
    let mut cpu = setup_cpu(&[0x78, 0xA9, 0x01, 0x00]);

    cpu.step().unwrap();
    assert!(!cpu.request_interrupt(USER_1).unwrap());

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0xF103);
}
