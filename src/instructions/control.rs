//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump to an absolute address
//! - JSR, RTS: Call and return from a subroutine
//! - BRK, RTI: Software interrupt and return from interrupt
//!
//! NOP has no body and is handled by the dispatcher.
//!
//! Return addresses on the stack always point at the next instruction to run,
//! so RTS and RTI load PC directly from the pulled word.

use crate::cycles::CycleBudget;
use crate::interrupts;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the JMP (Jump) instruction.
///
/// Loads PC with the big-endian operand. No flags are affected.
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let target = cpu.fetch_word(budget)?;
    cpu.state.pc = target;
    Ok(())
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the instruction after the JSR as one word, then
/// jumps. No flags are affected.
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let target = cpu.fetch_word(budget)?;
    let return_address = cpu.state.pc;
    cpu.push_word(return_address, budget)?;
    cpu.state.pc = target;
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(
    cpu: &mut CPU<M>,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    cpu.state.pc = cpu.pull_word(budget)?;
    Ok(())
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// The interrupt slot is taken from the accumulator. BRK:
/// 1. Pushes the address of the next instruction
/// 2. Pushes the packed flags
/// 3. Sets the B flag
/// 4. Loads PC from the slot's vector
///
/// The interrupt-disable flag is not changed.
pub(crate) fn execute_brk<M: MemoryBus>(
    cpu: &mut CPU<M>,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let slot = cpu.state.a;
    interrupts::raise_software(cpu, slot, budget)
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the flags, then the return address. All flags are restored.
pub(crate) fn execute_rti<M: MemoryBus>(
    cpu: &mut CPU<M>,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    interrupts::return_from_interrupt(cpu, budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AddressSpace, INITIAL_STACK_POINTER};

    fn setup_cpu(program: &[u8]) -> CPU<AddressSpace> {
        let mut cpu = CPU::new(AddressSpace::new());
        cpu.load_image(0x0200, program).unwrap();
        cpu.set_pc(0x0200);
        cpu
    }

    #[test]
    fn test_jsr_pushes_next_instruction() {
        let mut cpu = setup_cpu(&[0x12, 0x34]);
        let mut budget = CycleBudget::new(10);

        execute_jsr(&mut cpu, &mut budget).unwrap();

        assert_eq!(cpu.pc(), 0x1234);
        assert_eq!(cpu.sp(), INITIAL_STACK_POINTER - 2);
        assert_eq!(cpu.memory().read_word(0x00FD), Ok(0x0202));
    }

    #[test]
    fn test_rts_resumes_after_jsr() {
        let mut cpu = setup_cpu(&[0x12, 0x34]);
        let mut budget = CycleBudget::new(10);

        execute_jsr(&mut cpu, &mut budget).unwrap();
        execute_rts(&mut cpu, &mut budget).unwrap();

        assert_eq!(cpu.pc(), 0x0202);
        assert_eq!(cpu.sp(), INITIAL_STACK_POINTER);
    }

    #[test]
    fn test_rts_on_empty_stack_underflows_at_top() {
        let mut cpu = setup_cpu(&[]);
        cpu.set_sp(0xFFFF);
        let mut budget = CycleBudget::new(10);

        assert_eq!(
            execute_rts(&mut cpu, &mut budget),
            Err(ExecutionError::StackUnderflow { sp: 0xFFFF })
        );
    }
}
