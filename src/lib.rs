//! # vm6502
//!
//! An instruction-level emulator for an 8-bit accumulator processor modelled on
//! the 6502: a fetch-decode-execute engine over a flat 64KB address space, with
//! a cycle-budgeted execution loop and vectored software interrupts.
//!
//! ## Quick Start
//!
//! ```rust
//! use vm6502::{AddressSpace, CaptureDevice, CPU};
//!
//! let mut cpu = CPU::new(AddressSpace::new());
//! let output = CaptureDevice::new();
//! cpu.set_output(output.clone());
//!
//! // Startup code at 0xFFFC: JMP $0100
//! cpu.load_image(0xFFFC, &[0x4C, 0x01, 0x00]).unwrap();
//!
//! // LDA #'H' ; STA $FFFF ; LDA #'i' ; STA $FFFF ; JMP $010A
//! cpu.load_image(
//!     0x0100,
//!     &[0xA9, b'H', 0x8D, 0xFF, 0xFF, 0xA9, b'i', 0x8D, 0xFF, 0xFF, 0x4C, 0x01, 0x0A],
//! )
//! .unwrap();
//!
//! cpu.execute(40).unwrap();
//! assert_eq!(output.as_string(), "Hi");
//! ```
//!
//! ## Architecture
//!
//! - **Ownership**: each `CPU` owns its memory and registers; there is no global
//!   state, so several processors can run side by side.
//! - **Cycle budget**: `execute` runs whole instructions until the budget is
//!   used up. An instruction that starts always finishes, even when it drives
//!   the budget below zero.
//! - **Interrupts**: `BRK` and invalid opcodes vector through a table of
//!   big-endian handler addresses; `RTI` restores flags and the return address.
//! - **Output**: stores to `OUTPUT_PORT` are also sent to an `OutputDevice`.
//!
//! ## Modules
//!
//! - `cpu` - execution engine and host API
//! - `cycles` - per-call cycle budget
//! - `state` - registers and packed flags
//! - `memory` - MemoryBus trait and the flat address space
//! - `addressing` - addressing modes and effective address resolution
//! - `opcodes` - opcode metadata table
//! - `interrupts` - vector table and interrupt entry/return
//! - `devices` - memory-mapped output devices
//! - `disassembler` - instruction decoding for tracing and tooling

pub mod addressing;
pub mod cpu;
pub mod cycles;
pub mod devices;
pub mod disassembler;
pub mod interrupts;
pub mod memory;
pub mod opcodes;
pub mod state;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::{AddressingMode, Operand};
pub use cpu::{EngineState, ExecutionSummary, StopReason, CPU, INITIAL_STACK_POINTER, STARTUP_ADDRESS};
pub use cycles::CycleBudget;
pub use devices::{CaptureDevice, OutputDevice, StdoutDevice, OUTPUT_PORT};
pub use disassembler::{decode_instruction, disassemble, disassemble_count, Instruction};
pub use interrupts::{vector_address, VECTOR_TABLE_BASE};
pub use memory::{AddressSpace, MemoryBus, MemoryError, MEMORY_SIZE};
pub use opcodes::{OpcodeMetadata, Operation, OPCODE_TABLE};
pub use state::{Flags, ProcessorState};

/// Errors that stop execution.
///
/// All of these are fatal precondition violations of the loaded program or the
/// host. Invalid opcodes are not errors: they are delivered to the program as an
/// interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionError {
    /// A memory access fell outside the address space.
    Memory(MemoryError),

    /// A push would move the stack pointer below address 0.
    StackOverflow {
        /// Stack pointer before the push
        sp: u16,
    },

    /// A pull would move the stack pointer past the end of memory.
    StackUnderflow {
        /// Stack pointer before the pull
        sp: u16,
    },

    /// An instruction fetch ran off the end of memory.
    ProgramCounterOverflow {
        /// Address of the last byte fetched
        pc: u16,
    },

    /// A branch target lies outside the address space.
    BranchOutOfRange {
        /// Address the offset is relative to
        from: u16,
        /// Signed branch offset
        offset: i8,
    },

    /// An operation was asked to use an addressing mode it cannot use.
    UnsupportedAddressingMode(AddressingMode),
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::Memory(err) => write!(f, "{}", err),
            ExecutionError::StackOverflow { sp } => {
                write!(f, "Stack overflow: cannot push below SP 0x{:04X}", sp)
            }
            ExecutionError::StackUnderflow { sp } => {
                write!(f, "Stack underflow: cannot pull above SP 0x{:04X}", sp)
            }
            ExecutionError::ProgramCounterOverflow { pc } => {
                write!(f, "Program counter ran past the end of memory at 0x{:04X}", pc)
            }
            ExecutionError::BranchOutOfRange { from, offset } => {
                write!(f, "Branch from 0x{:04X} by {} leaves the address space", from, offset)
            }
            ExecutionError::UnsupportedAddressingMode(mode) => {
                write!(f, "Addressing mode {:?} is not valid here", mode)
            }
        }
    }
}

impl std::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExecutionError::Memory(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MemoryError> for ExecutionError {
    fn from(err: MemoryError) -> Self {
        ExecutionError::Memory(err)
    }
}
