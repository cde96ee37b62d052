//! # Branch Instructions
//!
//! This module implements conditional branch operations:
//! - BCC, BCS: Branch on carry clear / set
//! - BEQ, BNE: Branch on zero set / clear
//! - BMI, BPL: Branch on negative set / clear
//! - BVC, BVS: Branch on overflow clear / set
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! measured from the address of the next instruction. The dispatcher evaluates
//! the condition, so a single function serves all eight.
//!
//! Cycle timing:
//! - opcode and offset fetch, plus 1 internal cycle
//! - 1 more cycle if the branch is taken
//!
//! No flags are affected.

use crate::cycles::CycleBudget;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes a branch whose condition evaluated to `taken`.
///
/// The offset byte is always fetched, so an untaken branch falls through to
/// the next instruction.
///
/// # Errors
///
/// `BranchOutOfRange` if a taken branch would leave the address space. PC is
/// left pointing at the next instruction in that case.
pub(crate) fn execute_branch<M: MemoryBus>(
    cpu: &mut CPU<M>,
    taken: bool,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let offset = cpu.fetch_byte(budget)? as i8;
    if !taken {
        return Ok(());
    }

    let from = cpu.state.pc;
    let target = from
        .checked_add_signed(offset as i16)
        .ok_or(ExecutionError::BranchOutOfRange { from, offset })?;

    budget.debit(1);
    cpu.state.pc = target;
    Ok(())
}
