//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA, LDX, LDY: Load register
//! - STA, STX, STY: Store register
//!
//! Stores go through the CPU's `write_byte`, so a store to the output port is
//! also delivered to the output device.

use super::Register;
use crate::cycles::CycleBudget;
use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Executes LDA, LDX or LDY.
///
/// Loads the operand into `register`.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if the loaded value is 0
/// - Negative (N): Set if bit 7 of the loaded value is set
/// - Other flags: Not affected
pub(crate) fn execute_load<M: MemoryBus>(
    cpu: &mut CPU<M>,
    register: Register,
    mode: AddressingMode,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let value = cpu.read_operand(mode, budget)?;
    cpu.set_register(register, value);
    cpu.state.flags.update_zn(value);
    Ok(())
}

/// Executes STA, STX or STY.
///
/// Writes `register` to the effective address. No flags are affected.
pub(crate) fn execute_store<M: MemoryBus>(
    cpu: &mut CPU<M>,
    register: Register,
    mode: AddressingMode,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let addr = cpu.resolve_address(mode, budget)?;
    let value = cpu.register(register);
    cpu.write_byte(addr, value, budget)
}
