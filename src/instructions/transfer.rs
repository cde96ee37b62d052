//! # Register Transfer Instructions
//!
//! This module implements register transfer operations:
//! - TAX, TAY: Transfer the accumulator to X / Y
//! - TXA, TYA: Transfer X / Y to the accumulator
//!
//! The stack pointer is 16 bits wide and has no transfer instructions.

use super::Register;
use crate::{ExecutionError, MemoryBus, CPU};

/// Copies `from` into `to` and sets Z and N from the copied value.
pub(crate) fn execute_transfer<M: MemoryBus>(
    cpu: &mut CPU<M>,
    from: Register,
    to: Register,
) -> Result<(), ExecutionError> {
    let value = cpu.register(from);
    cpu.set_register(to, value);
    cpu.state.flags.update_zn(value);
    Ok(())
}
