//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA, PLA: Push / pull the accumulator
//! - PHP, PLP: Push / pull the status flags
//!
//! The stack holds 16-bit words and grows downward from the initial stack
//! pointer. Every push moves SP down by 2, so the accumulator occupies a whole
//! word with a zero high byte.

use crate::cycles::CycleBudget;
use crate::state::Flags;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the PHA (Push Accumulator) instruction. No flags are affected.
pub(crate) fn execute_pha<M: MemoryBus>(
    cpu: &mut CPU<M>,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    cpu.push_word(cpu.state.a as u16, budget)
}

/// Executes the PLA (Pull Accumulator) instruction.
///
/// Loads A from the low byte of the pulled word.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if the pulled value is 0
/// - Negative (N): Set if bit 7 of the pulled value is set
pub(crate) fn execute_pla<M: MemoryBus>(
    cpu: &mut CPU<M>,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let value = cpu.pull_word(budget)? as u8;
    cpu.state.a = value;
    cpu.state.flags.update_zn(value);
    Ok(())
}

/// Executes the PHP (Push Processor Status) instruction.
pub(crate) fn execute_php<M: MemoryBus>(
    cpu: &mut CPU<M>,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    cpu.push_word(cpu.state.flags.pack(), budget)
}

/// Executes the PLP (Pull Processor Status) instruction. Replaces every flag.
pub(crate) fn execute_plp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let packed = cpu.pull_word(budget)?;
    cpu.state.flags = Flags::unpack(packed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AddressSpace, INITIAL_STACK_POINTER};

    fn setup_cpu() -> CPU<AddressSpace> {
        CPU::new(AddressSpace::new())
    }

    #[test]
    fn test_pha_pushes_a_whole_word() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x42);
        let mut budget = CycleBudget::new(10);

        execute_pha(&mut cpu, &mut budget).unwrap();

        assert_eq!(cpu.sp(), INITIAL_STACK_POINTER - 2);
        assert_eq!(cpu.memory().read_word(0x00FD), Ok(0x0042));
    }

    #[test]
    fn test_pla_sets_negative() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x80);
        let mut budget = CycleBudget::new(10);

        execute_pha(&mut cpu, &mut budget).unwrap();
        cpu.set_a(0x00);
        cpu.set_flag_z(true);
        execute_pla(&mut cpu, &mut budget).unwrap();

        assert_eq!(cpu.a(), 0x80);
        assert!(cpu.flag_n());
        assert!(!cpu.flag_z());
    }

    #[test]
    fn test_php_plp_restores_flags() {
        let mut cpu = setup_cpu();
        cpu.set_flag_c(true);
        cpu.set_flag_v(true);
        let saved = cpu.flags();
        let mut budget = CycleBudget::new(20);

        execute_php(&mut cpu, &mut budget).unwrap();
        cpu.set_flags(Flags::empty());
        execute_plp(&mut cpu, &mut budget).unwrap();

        assert_eq!(cpu.flags(), saved);
        assert_eq!(cpu.sp(), INITIAL_STACK_POINTER);
    }
}
