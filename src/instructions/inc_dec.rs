//! # Increment and Decrement Instructions
//!
//! This module implements increment and decrement operations:
//! - INC, DEC: Read-modify-write on a memory cell
//! - INX, INY, DEX, DEY: Adjust an index register
//!
//! All of them wrap modulo 256 and update Z and N from the result. Carry and
//! overflow are not affected.

use super::Register;
use crate::cycles::CycleBudget;
use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Executes INC (`delta` = 1) or DEC (`delta` = -1) on memory.
///
/// The cell is read, adjusted and written back; a cell at the output port is
/// therefore also sent to the output device.
pub(crate) fn execute_memory<M: MemoryBus>(
    cpu: &mut CPU<M>,
    delta: i8,
    mode: AddressingMode,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let addr = cpu.resolve_address(mode, budget)?;
    let result = cpu.read_byte(addr, budget)?.wrapping_add_signed(delta);
    cpu.write_byte(addr, result, budget)?;
    cpu.state.flags.update_zn(result);
    Ok(())
}

/// Executes INX, INY, DEX or DEY.
pub(crate) fn execute_register<M: MemoryBus>(
    cpu: &mut CPU<M>,
    register: Register,
    delta: i8,
) -> Result<(), ExecutionError> {
    let result = cpu.register(register).wrapping_add_signed(delta);
    cpu.set_register(register, result);
    cpu.state.flags.update_zn(result);
    Ok(())
}
