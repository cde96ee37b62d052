//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic, logical and comparison operations:
//! - ADC: Add with Carry
//! - AND, ORA, EOR: Bitwise logic on the accumulator
//! - CMP, CPX, CPY: Compare a register with memory
//!
//! Decimal mode is stored but has no effect on ADC.

use super::Register;
use crate::cycles::CycleBudget;
use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Bitwise operation performed by AND, ORA and EOR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Logic {
    And,
    Or,
    Xor,
}

impl Logic {
    fn apply(self, a: u8, value: u8) -> u8 {
        match self {
            Logic::And => a & value,
            Logic::Or => a | value,
            Logic::Xor => a ^ value,
        }
    }
}

/// Adds `value` and the carry to `a`.
///
/// Returns the 8-bit result, the carry out and the signed overflow. The sum
/// is widened to 16 bits before truncation, so a carry is detected even when
/// the result wraps back to the original accumulator value.
pub(crate) fn add_with_carry(a: u8, value: u8, carry_in: bool) -> (u8, bool, bool) {
    let sum = a as u16 + value as u16 + carry_in as u16;
    let result = sum as u8;
    let carry = sum > 0xFF;
    // Both operands share a sign that the result does not
    let overflow = (a ^ result) & (value ^ result) & 0x80 != 0;
    (result, carry, overflow)
}

/// Executes the ADC (Add with Carry) instruction.
///
/// # Flag Behavior
///
/// - Carry (C): Set if the unsigned sum exceeds 255
/// - Zero (Z): Set if the result is 0
/// - Overflow (V): Set on signed overflow
/// - Negative (N): Set if bit 7 of the result is set
pub(crate) fn execute_adc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(mode, budget)?;
    let (result, carry, overflow) = add_with_carry(cpu.state.a, value, cpu.flag_c());

    cpu.state.a = result;
    cpu.state.flags.set_carry(carry);
    cpu.state.flags.set_overflow(overflow);
    cpu.state.flags.update_zn(result);
    Ok(())
}

/// Executes AND, ORA or EOR. Updates Z and N.
pub(crate) fn execute_logic<M: MemoryBus>(
    cpu: &mut CPU<M>,
    logic: Logic,
    mode: AddressingMode,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(mode, budget)?;
    let result = logic.apply(cpu.state.a, value);

    cpu.state.a = result;
    cpu.state.flags.update_zn(result);
    Ok(())
}

/// Executes CMP, CPX or CPY.
///
/// Compares `register` with the operand by computing `register - operand`.
/// The register is not modified.
///
/// # Flag Behavior
///
/// - Carry (C): Set if register >= operand (unsigned)
/// - Zero (Z): Set if register == operand
/// - Negative (N): Bit 7 of `register - operand`
pub(crate) fn execute_compare<M: MemoryBus>(
    cpu: &mut CPU<M>,
    register: Register,
    mode: AddressingMode,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(mode, budget)?;
    let reg = cpu.register(register);
    let difference = reg.wrapping_sub(value);

    cpu.state.flags.set_carry(reg >= value);
    cpu.state.flags.update_zn(difference);
    Ok(())
}
