//! # Interrupts
//!
//! Interrupt dispatch through a fixed vector table.
//!
//! ## Vector Table
//!
//! The table starts at [`VECTOR_TABLE_BASE`] and holds one big-endian handler
//! address per slot, so slot `n` lives at `VECTOR_TABLE_BASE + 2 * n`. With 256
//! slots the table ends at 0xFFFB, just below the startup code at 0xFFFC. The
//! loaded image fills it in; the engine only reads it.
//!
//! | Slot | Use |
//! |------|-----|
//! | 0 | user interrupt 0 |
//! | 1 | user interrupt 1 |
//! | 5 | invalid opcode |
//! | 255 | halt |
//!
//! ## Entry and Return
//!
//! Entering an interrupt pushes two words, the return address and then the
//! packed flags, and loads PC from the slot's vector. `RTI` pulls them back in
//! reverse order:
//!
//! ```text
//! SP+2: return address (high, low)
//! SP+0: packed flags   (high, low)   <- SP after entry
//! ```
//!
//! The return address is always the address of the next instruction to run,
//! so `RTI` resumes there directly.
//!
//! ## Sources
//!
//! - **BRK**: software interrupt. The slot is taken from the accumulator and
//!   the break flag is set once the old flags are saved.
//! - **Invalid opcode**: any byte without an opcode table entry. The engine
//!   enters slot [`INVALID_OPCODE`] with A holding the slot number and X holding
//!   the offending opcode. Returning resumes at the byte after it.
//! - **Host request**: `CPU::request_interrupt`, masked by the interrupt-disable
//!   flag.

use crate::cycles::CycleBudget;
use crate::memory::MemoryBus;
use crate::{ExecutionError, CPU};

/// Address of slot 0 of the vector table.
pub const VECTOR_TABLE_BASE: u16 = 0xFDFC;

/// User interrupt 0.
pub const USER_0: u8 = 0;

/// User interrupt 1.
pub const USER_1: u8 = 1;

/// Slot entered when an invalid opcode is executed.
pub const INVALID_OPCODE: u8 = 5;

/// Slot conventionally used for a handler that halts by looping forever.
pub const HALT: u8 = 255;

/// Address of the vector table entry for `slot`.
///
/// ```
/// use vm6502::interrupts::{vector_address, HALT, INVALID_OPCODE};
///
/// assert_eq!(vector_address(0), 0xFDFC);
/// assert_eq!(vector_address(INVALID_OPCODE), 0xFE06);
/// assert_eq!(vector_address(HALT), 0xFFFA);
/// ```
pub const fn vector_address(slot: u8) -> u32 {
    VECTOR_TABLE_BASE as u32 + 2 * slot as u32
}

/// Saves the return address and flags, then vectors through `slot`.
pub(crate) fn enter<M: MemoryBus>(
    cpu: &mut CPU<M>,
    slot: u8,
    return_address: u16,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    cpu.push_word(return_address, budget)?;
    cpu.push_word(cpu.state.flags.pack(), budget)?;

    let handler = cpu.read_word(vector_address(slot), budget)?;
    log::debug!(
        "interrupt {}: 0x{:04X} -> handler 0x{:04X}",
        slot,
        return_address,
        handler
    );
    cpu.state.pc = handler;
    Ok(())
}

/// Software interrupt: vectors through `slot` and sets the break flag.
///
/// The break flag is set after the flags are saved, so the handler sees it set
/// and `RTI` restores the value from before the interrupt.
pub(crate) fn raise_software<M: MemoryBus>(
    cpu: &mut CPU<M>,
    slot: u8,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let return_address = cpu.state.pc;
    enter(cpu, slot, return_address, budget)?;
    cpu.state.flags.set_brk(true);
    Ok(())
}

/// Delivers an invalid-opcode interrupt for `opcode`.
///
/// PC already points past the opcode byte, which is where `RTI` resumes.
///
/// A and X are overwritten with the slot number and the opcode without being
/// saved first, so the interrupted program's values are lost. Only PC and the
/// flags are on the stack.
pub(crate) fn trap_invalid_opcode<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let address = cpu.state.pc.wrapping_sub(1);
    log::warn!("Invalid opcode 0x{:02X} at 0x{:04X}", opcode, address);

    cpu.last_trap = Some(opcode);
    let return_address = cpu.state.pc;
    enter(cpu, INVALID_OPCODE, return_address, budget)?;

    cpu.state.a = INVALID_OPCODE;
    cpu.state.x = opcode;
    Ok(())
}

/// Restores the flags and return address saved by [`enter`].
pub(crate) fn return_from_interrupt<M: MemoryBus>(
    cpu: &mut CPU<M>,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    let packed = cpu.pull_word(budget)?;
    let return_address = cpu.pull_word(budget)?;

    cpu.state.flags = crate::Flags::unpack(packed);
    cpu.state.pc = return_address;
    log::debug!("return from interrupt to 0x{:04X}", return_address);
    Ok(())
}
