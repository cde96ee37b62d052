//! Tests for the load and store instructions.
//!
//! Tests cover:
//! - LDA/LDX/LDY flag updates from the loaded value
//! - Zero page indexing wrapping within the zero page
//! - Absolute indexing past the end of memory
//! - Stores in every implemented addressing mode

use vm6502::{AddressSpace, ExecutionError, MemoryBus, MemoryError, CPU};

/// Helper function to create a CPU with `program` loaded and PC at 0x0200
fn setup_cpu(program: &[u8]) -> CPU<AddressSpace> {
    let mut cpu = CPU::new(AddressSpace::new());
    cpu.load_image(0x0200, program).unwrap();
    cpu.set_pc(0x0200);
    cpu
}

// ========== Loads ==========

#[test]
fn test_lda_immediate() {
    let mut cpu = setup_cpu(&[0xA9, 0x42]);

    let cycles = cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x42);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cycles, 2);
}

#[test]
fn test_lda_zero_and_negative_flags() {
    let mut cpu = setup_cpu(&[0xA9, 0x00, 0xA9, 0x80]);

    cpu.step().unwrap();
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());

    cpu.step().unwrap();
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
}

#[test]
fn test_ldx_sets_flags_from_x() {
    // LDX #$00 with A holding a negative value
    let mut cpu = setup_cpu(&[0xA2, 0x00]);
    cpu.set_a(0xFF);

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_ldy_absolute_x() {
    // LDY $2000,X
    let mut cpu = setup_cpu(&[0xBC, 0x20, 0x00]);
    cpu.load_image(0x2003, &[0x99]).unwrap();
    cpu.set_x(3);

    let cycles = cpu.step().unwrap();

    assert_eq!(cpu.y(), 0x99);
    assert!(cpu.flag_n());
    assert_eq!(cycles, 5);
}

#[test]
fn test_lda_zero_page_x_wraps_in_zero_page() {
    // LDA $F0,X with X = 0x20 reads $10, not $0110
    let mut cpu = setup_cpu(&[0xB5, 0xF0]);
    cpu.load_image(0x0010, &[0x11]).unwrap();
    cpu.load_image(0x0110, &[0x22]).unwrap();
    cpu.set_x(0x20);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x11);
}

#[test]
fn test_ldx_zero_page_y() {
    // LDX $02,Y
    let mut cpu = setup_cpu(&[0xB6, 0x02]);
    cpu.load_image(0x0005, &[b'l']).unwrap();
    cpu.set_y(3);

    let cycles = cpu.step().unwrap();

    assert_eq!(cpu.x(), b'l');
    assert_eq!(cycles, 4);
}

#[test]
fn test_lda_absolute_x_past_end_of_memory() {
    // LDA $FFFF,X with X = 1 addresses 0x10000
    let mut cpu = setup_cpu(&[0xBD, 0xFF, 0xFF]);
    cpu.set_x(1);

    assert_eq!(
        cpu.step(),
        Err(ExecutionError::Memory(MemoryError::OutOfRange {
            address: 0x1_0000
        }))
    );
}

// ========== Stores ==========

#[test]
fn test_sta_zero_page() {
    let mut cpu = setup_cpu(&[0x85, 0x10]);
    cpu.set_a(0x42);

    let cycles = cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0010), Ok(0x42));
    assert_eq!(cycles, 3);
}

#[test]
fn test_sta_absolute_y() {
    // STA $3000,Y
    let mut cpu = setup_cpu(&[0x99, 0x30, 0x00]);
    cpu.set_a(0x07);
    cpu.set_y(0x10);

    let cycles = cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x3010), Ok(0x07));
    assert_eq!(cycles, 5);
}

#[test]
fn test_stx_zero_page_y() {
    // STX $80,Y with Y = 0x90 wraps to $10
    let mut cpu = setup_cpu(&[0x96, 0x80]);
    cpu.set_x(0x55);
    cpu.set_y(0x90);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0010), Ok(0x55));
}

#[test]
fn test_sty_absolute() {
    // STY $1234
    let mut cpu = setup_cpu(&[0x8C, 0x12, 0x34]);
    cpu.set_y(0xAB);

    let cycles = cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x1234), Ok(0xAB));
    assert_eq!(cycles, 4);
}

#[test]
fn test_store_does_not_change_flags() {
    let mut cpu = setup_cpu(&[0x85, 0x10]);
    cpu.set_a(0x00);
    cpu.set_flag_n(true);

    cpu.step().unwrap();

    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}
