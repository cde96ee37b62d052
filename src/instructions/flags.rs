//! # Status Flag Manipulation Instructions
//!
//! This module implements instructions that directly modify processor status flags:
//! - CLC: Clear Carry Flag
//! - SEC: Set Carry Flag
//! - CLI: Clear Interrupt Disable
//! - SEI: Set Interrupt Disable
//! - CLV: Clear Overflow Flag
//! - CLD: Clear Decimal Mode
//! - SED: Set Decimal Mode
//!
//! These instructions use implied addressing and cost the opcode fetch plus
//! one internal cycle. Only the named flag changes.

use crate::{ExecutionError, MemoryBus, CPU};

pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.state.flags.set_carry(false);
    Ok(())
}

pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.state.flags.set_carry(true);
    Ok(())
}

/// Clears interrupt-disable, unmasking host interrupt requests.
pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.state.flags.set_interrupt_disable(false);
    Ok(())
}

/// Sets interrupt-disable. Software interrupts and invalid-opcode traps are
/// not masked by it.
pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.state.flags.set_interrupt_disable(true);
    Ok(())
}

pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.state.flags.set_overflow(false);
    Ok(())
}

/// Clears decimal mode. The flag is stored only; arithmetic is always binary.
pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.state.flags.set_decimal(false);
    Ok(())
}

pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.state.flags.set_decimal(true);
    Ok(())
}
