//! # Instruction Implementations
//!
//! This module contains the implementations of all instructions, organized by
//! category. Each family is a set of functions taking the CPU, the addressing
//! mode from the opcode table and the cycle budget; operand resolution is
//! shared through the CPU's resolver, so no function has per-mode bodies.
//!
//! By the time a function runs, the opcode byte has been fetched and the
//! table's `extra_cycles` debited. The function fetches its own operand bytes.
//!
//! ## Categories
//!
//! - **alu**: ADC, AND, ORA, EOR, CMP, CPX, CPY
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **control**: JMP, JSR, RTS, BRK, RTI, NOP
//! - **stack**: PHA, PHP, PLA, PLP
//! - **flags**: CLC, CLD, CLI, CLV, SEC, SED, SEI
//! - **transfer**: TAX, TAY, TXA, TYA

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod stack;
pub mod transfer;

use crate::cycles::CycleBudget;
use crate::opcodes::{OpcodeMetadata, Operation};
use crate::{ExecutionError, MemoryBus, CPU};

/// The three 8-bit data registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Register {
    A,
    X,
    Y,
}

impl<M: MemoryBus> CPU<M> {
    pub(crate) fn register(&self, register: Register) -> u8 {
        match register {
            Register::A => self.state.a,
            Register::X => self.state.x,
            Register::Y => self.state.y,
        }
    }

    pub(crate) fn set_register(&mut self, register: Register, value: u8) {
        match register {
            Register::A => self.state.a = value,
            Register::X => self.state.x = value,
            Register::Y => self.state.y = value,
        }
    }
}

/// Dispatches a decoded instruction to its family.
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut CPU<M>,
    metadata: &OpcodeMetadata,
    budget: &mut CycleBudget,
) -> Result<(), ExecutionError> {
    use Register::{A, X, Y};

    let mode = metadata.addressing_mode;
    let flags = cpu.state.flags;
    match metadata.operation {
        Operation::Lda => load_store::execute_load(cpu, A, mode, budget),
        Operation::Ldx => load_store::execute_load(cpu, X, mode, budget),
        Operation::Ldy => load_store::execute_load(cpu, Y, mode, budget),
        Operation::Sta => load_store::execute_store(cpu, A, mode, budget),
        Operation::Stx => load_store::execute_store(cpu, X, mode, budget),
        Operation::Sty => load_store::execute_store(cpu, Y, mode, budget),

        Operation::Adc => alu::execute_adc(cpu, mode, budget),
        Operation::And => alu::execute_logic(cpu, alu::Logic::And, mode, budget),
        Operation::Ora => alu::execute_logic(cpu, alu::Logic::Or, mode, budget),
        Operation::Eor => alu::execute_logic(cpu, alu::Logic::Xor, mode, budget),
        Operation::Cmp => alu::execute_compare(cpu, A, mode, budget),
        Operation::Cpx => alu::execute_compare(cpu, X, mode, budget),
        Operation::Cpy => alu::execute_compare(cpu, Y, mode, budget),

        Operation::Inc => inc_dec::execute_memory(cpu, 1, mode, budget),
        Operation::Dec => inc_dec::execute_memory(cpu, -1, mode, budget),
        Operation::Inx => inc_dec::execute_register(cpu, X, 1),
        Operation::Iny => inc_dec::execute_register(cpu, Y, 1),
        Operation::Dex => inc_dec::execute_register(cpu, X, -1),
        Operation::Dey => inc_dec::execute_register(cpu, Y, -1),

        Operation::Tax => transfer::execute_transfer(cpu, A, X),
        Operation::Tay => transfer::execute_transfer(cpu, A, Y),
        Operation::Txa => transfer::execute_transfer(cpu, X, A),
        Operation::Tya => transfer::execute_transfer(cpu, Y, A),

        Operation::Jmp => control::execute_jmp(cpu, budget),
        Operation::Jsr => control::execute_jsr(cpu, budget),
        Operation::Rts => control::execute_rts(cpu, budget),
        Operation::Brk => control::execute_brk(cpu, budget),
        Operation::Rti => control::execute_rti(cpu, budget),
        Operation::Nop => Ok(()),

        Operation::Bcc => branches::execute_branch(cpu, !flags.carry(), budget),
        Operation::Bcs => branches::execute_branch(cpu, flags.carry(), budget),
        Operation::Beq => branches::execute_branch(cpu, flags.zero(), budget),
        Operation::Bne => branches::execute_branch(cpu, !flags.zero(), budget),
        Operation::Bmi => branches::execute_branch(cpu, flags.negative(), budget),
        Operation::Bpl => branches::execute_branch(cpu, !flags.negative(), budget),
        Operation::Bvc => branches::execute_branch(cpu, !flags.overflow(), budget),
        Operation::Bvs => branches::execute_branch(cpu, flags.overflow(), budget),

        Operation::Pha => stack::execute_pha(cpu, budget),
        Operation::Php => stack::execute_php(cpu, budget),
        Operation::Pla => stack::execute_pla(cpu, budget),
        Operation::Plp => stack::execute_plp(cpu, budget),

        Operation::Clc => flags::execute_clc(cpu),
        Operation::Cld => flags::execute_cld(cpu),
        Operation::Cli => flags::execute_cli(cpu),
        Operation::Clv => flags::execute_clv(cpu),
        Operation::Sec => flags::execute_sec(cpu),
        Operation::Sed => flags::execute_sed(cpu),
        Operation::Sei => flags::execute_sei(cpu),
    }
}
