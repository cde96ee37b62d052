//! Tests for the compare instructions CMP, CPX and CPY.
//!
//! A compare computes `register - operand` for flags only:
//! - C set when register >= operand (unsigned)
//! - Z set when they are equal
//! - N taken from bit 7 of the difference

use vm6502::{AddressSpace, CPU};

/// Helper function to create a CPU with `program` loaded and PC at 0x0200
fn setup_cpu(program: &[u8]) -> CPU<AddressSpace> {
    let mut cpu = CPU::new(AddressSpace::new());
    cpu.load_image(0x0200, program).unwrap();
    cpu.set_pc(0x0200);
    cpu
}

#[test]
fn test_cmp_equal() {
    // CMP #$42
    let mut cpu = setup_cpu(&[0xC9, 0x42]);
    cpu.set_a(0x42);

    cpu.step().unwrap();

    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.a(), 0x42);
}

#[test]
fn test_cmp_greater() {
    let mut cpu = setup_cpu(&[0xC9, 0x10]);
    cpu.set_a(0x20);

    cpu.step().unwrap();

    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_less() {
    // 0x10 - 0x20 = 0xF0
    let mut cpu = setup_cpu(&[0xC9, 0x20]);
    cpu.set_a(0x10);

    cpu.step().unwrap();

    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
}

#[test]
fn test_cmp_negative_from_difference_not_register() {
    // 0xFF - 0x01 = 0xFE: N set, C set
    let mut cpu = setup_cpu(&[0xC9, 0x01]);
    cpu.set_a(0xFF);

    cpu.step().unwrap();

    assert!(cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_cpx_zero_page() {
    // CPX $30
    let mut cpu = setup_cpu(&[0xE4, 0x30]);
    cpu.load_image(0x0030, &[0x05]).unwrap();
    cpu.set_x(0x05);

    let cycles = cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert_eq!(cycles, 3);
}

#[test]
fn test_cpy_absolute() {
    // CPY $1234
    let mut cpu = setup_cpu(&[0xCC, 0x12, 0x34]);
    cpu.load_image(0x1234, &[0x0D]).unwrap();
    cpu.set_y(0x0C);

    cpu.step().unwrap();

    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
    assert_eq!(cpu.y(), 0x0C);
}
