//! # CPU State and Execution
//!
//! This module contains the CPU struct, the fetch-decode-execute loop and the
//! host API used to load and run programs.
//!
//! ## Execution Model
//!
//! - `step()`: execute exactly one instruction
//! - `execute(budget)`: execute whole instructions until the cycle budget is
//!   exhausted
//!
//! An instruction that begins always completes, even if it drives the budget
//! below zero. A budget of zero executes nothing.
//!
//! ## Engine States
//!
//! ```text
//! Idle -> Fetching -> Decoding -> Executing -> Fetching ...
//!                         |
//!                         +-> Trapping (invalid opcode) -> Fetching ...
//!
//! budget exhausted -> Halted
//! ```
//!
//! There is no halt instruction. A program stops itself by jumping to itself
//! forever; the engine only stops when its budget runs out.
//!
//! ## Byte Order
//!
//! Words are big-endian everywhere: 16-bit operands are fetched high byte
//! first, the stack stores the high byte at the lower address, and vector
//! table entries are read the same way.

use crate::addressing::{effective_operand, AddressingMode, Operand};
use crate::cycles::CycleBudget;
use crate::devices::{OutputDevice, OUTPUT_PORT};
use crate::disassembler::decode_instruction;
use crate::memory::{MemoryBus, MemoryError};
use crate::state::{Flags, ProcessorState};
use crate::{instructions, interrupts, opcodes, ExecutionError};

/// Address execution starts from after reset.
///
/// This is not a vector: it holds code, normally a `JMP` to the program.
pub const STARTUP_ADDRESS: u16 = 0xFFFC;

/// Stack pointer after reset. The stack grows down through the zero page.
pub const INITIAL_STACK_POINTER: u16 = 0x00FF;

/// Phase of the fetch-decode-execute cycle the engine is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing executed since reset or since the last `execute` started.
    Idle,
    /// Reading the opcode byte.
    Fetching,
    /// Looking the opcode up in the opcode table.
    Decoding,
    /// Resolving operands and performing the operation.
    Executing,
    /// Delivering an invalid-opcode interrupt.
    Trapping,
    /// The cycle budget of the last `execute` ran out.
    Halted,
}

/// Why `execute` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The cycle budget reached zero or below. Normal termination.
    BudgetExhausted,
}

/// Result of a successful `execute` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Why execution stopped.
    pub stop_reason: StopReason,
    /// Instructions completed (invalid-opcode traps count as one).
    pub instructions: u64,
    /// Cycles debited during the call.
    pub cycles_used: u64,
    /// Cycles spent past the budget by the final instruction.
    pub overrun: u64,
}

/// CPU state and execution context.
///
/// The CPU owns its memory and register file. It is generic over the memory
/// implementation via the `MemoryBus` trait.
///
/// # Examples
///
/// ```
/// use vm6502::{AddressSpace, CPU, STARTUP_ADDRESS};
///
/// let mut cpu = CPU::new(AddressSpace::new());
///
/// // Startup code: JMP $0200
/// cpu.load_image(STARTUP_ADDRESS as u32, &[0x4C, 0x02, 0x00]).unwrap();
/// // LDA #$42
/// cpu.load_image(0x0200, &[0xA9, 0x42]).unwrap();
///
/// let summary = cpu.execute(5).unwrap();
/// assert_eq!(summary.instructions, 2);
/// assert_eq!(cpu.a(), 0x42);
/// assert_eq!(cpu.pc(), 0x0202);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Register file
    pub(crate) state: ProcessorState,

    /// Memory bus implementation
    pub(crate) memory: M,

    /// Receiver of bytes stored to the output port
    pub(crate) output: Option<Box<dyn OutputDevice>>,

    /// Current engine phase
    pub(crate) engine_state: EngineState,

    /// Opcode of the most recent invalid-opcode trap
    pub(crate) last_trap: Option<u8>,

    /// Cycles executed since creation
    pub(crate) total_cycles: u64,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a CPU in the reset state over `memory`.
    ///
    /// The memory is not cleared, so an image loaded beforehand is kept. Use
    /// [`CPU::reset`] to clear memory as well.
    pub fn new(memory: M) -> Self {
        Self {
            state: ProcessorState::new(STARTUP_ADDRESS, INITIAL_STACK_POINTER),
            memory,
            output: None,
            engine_state: EngineState::Idle,
            last_trap: None,
            total_cycles: 0,
        }
    }

    /// Clears memory and puts the processor back in its reset state.
    ///
    /// The output device stays attached.
    pub fn reset(&mut self) {
        self.memory.reset();
        self.state.reset(STARTUP_ADDRESS, INITIAL_STACK_POINTER);
        self.engine_state = EngineState::Idle;
        self.last_trap = None;
        self.total_cycles = 0;
    }

    /// Copies a memory image to `address`, bounds-checked.
    ///
    /// Nothing is written if the image does not fit.
    pub fn load_image(&mut self, address: u32, bytes: &[u8]) -> Result<(), MemoryError> {
        let end = address as u64 + bytes.len() as u64;
        if end > self.memory.capacity() as u64 {
            return Err(MemoryError::OutOfRange {
                address: end.saturating_sub(1).min(u32::MAX as u64) as u32,
            });
        }
        for (offset, &byte) in bytes.iter().enumerate() {
            self.memory.write(address + offset as u32, byte)?;
        }
        Ok(())
    }

    /// Attaches the device that receives bytes stored to the output port.
    pub fn set_output<D: OutputDevice + 'static>(&mut self, device: D) {
        self.output = Some(Box::new(device));
    }

    /// Detaches the output device. Port stores then only update memory.
    pub fn clear_output(&mut self) {
        self.output = None;
    }

    /// Runs whole instructions until `cycle_budget` is used up.
    ///
    /// The budget is checked before each instruction, never during one, so the
    /// final instruction may overrun it. A budget of zero executes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error on a fatal precondition violation (out-of-range
    /// memory access, stack overflow or underflow). The processor state is left
    /// as it was when the fault happened. Invalid opcodes are not errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use vm6502::{AddressSpace, CPU, StopReason};
    ///
    /// let mut cpu = CPU::new(AddressSpace::new());
    /// // JMP $FFFC: the startup code jumps to itself
    /// cpu.load_image(0xFFFC, &[0x4C, 0xFF, 0xFC]).unwrap();
    ///
    /// let summary = cpu.execute(10).unwrap();
    /// assert_eq!(summary.stop_reason, StopReason::BudgetExhausted);
    /// assert_eq!(summary.instructions, 4); // 3 cycles each
    /// assert_eq!(summary.overrun, 2);
    /// ```
    pub fn execute(&mut self, cycle_budget: u32) -> Result<ExecutionSummary, ExecutionError> {
        let mut budget = CycleBudget::new(cycle_budget);
        let mut instructions = 0u64;

        log::debug!("execute: budget {} from PC 0x{:04X}", cycle_budget, self.state.pc);
        self.engine_state = EngineState::Idle;

        while !budget.is_exhausted() {
            let before = budget.consumed();
            let result = self.step_with(&mut budget);
            self.total_cycles += budget.consumed() - before;
            result?;
            instructions += 1;
        }

        self.engine_state = EngineState::Halted;
        log::debug!(
            "execute: halted at PC 0x{:04X} after {} instructions, {} cycles",
            self.state.pc,
            instructions,
            budget.consumed()
        );

        Ok(ExecutionSummary {
            stop_reason: StopReason::BudgetExhausted,
            instructions,
            cycles_used: budget.consumed(),
            overrun: budget.overrun(),
        })
    }

    /// Executes exactly one instruction and returns the cycles it used.
    ///
    /// # Examples
    ///
    /// ```
    /// use vm6502::{AddressSpace, CPU};
    ///
    /// let mut cpu = CPU::new(AddressSpace::new());
    /// cpu.load_image(0xFFFC, &[0xEA]).unwrap(); // NOP
    ///
    /// assert_eq!(cpu.step().unwrap(), 2); // fetch + internal cycle
    /// assert_eq!(cpu.pc(), 0xFFFD);
    /// ```
    pub fn step(&mut self) -> Result<u32, ExecutionError> {
        let mut budget = CycleBudget::new(0);
        let result = self.step_with(&mut budget);
        self.total_cycles += budget.consumed();
        result?;
        Ok(budget.consumed() as u32)
    }

    /// Fetch, decode and execute one instruction against `budget`.
    pub(crate) fn step_with(&mut self, budget: &mut CycleBudget) -> Result<(), ExecutionError> {
        if log::log_enabled!(log::Level::Trace) {
            self.trace_instruction();
        }

        self.engine_state = EngineState::Fetching;
        let opcode = self.fetch_byte(budget)?;

        self.engine_state = EngineState::Decoding;
        match opcodes::decode(opcode) {
            Some(metadata) => {
                self.engine_state = EngineState::Executing;
                budget.debit(metadata.extra_cycles as u32);
                instructions::execute(self, metadata, budget)?;
            }
            None => {
                self.engine_state = EngineState::Trapping;
                interrupts::trap_invalid_opcode(self, opcode, budget)?;
            }
        }

        self.engine_state = EngineState::Fetching;
        Ok(())
    }

    fn trace_instruction(&self) {
        let pc = self.state.pc;
        let bytes: Vec<u8> = (0..3u32)
            .filter_map(|i| self.memory.read(pc as u32 + i).ok())
            .collect();
        let text = match decode_instruction(&bytes, pc) {
            Some(instruction) => instruction.to_string(),
            None => format!(".byte ${:02X}", bytes.first().copied().unwrap_or(0)),
        };
        log::trace!(
            "{:04X}  {:<14} A={:02X} X={:02X} Y={:02X} SP={:04X} {:?}",
            pc,
            text,
            self.state.a,
            self.state.x,
            self.state.y,
            self.state.sp,
            self.state.flags
        );
    }

    // ========== Memory Primitives ==========
    //
    // Each byte moved debits one cycle.

    /// Reads the byte at PC and advances PC.
    pub(crate) fn fetch_byte(&mut self, budget: &mut CycleBudget) -> Result<u8, ExecutionError> {
        let pc = self.state.pc;
        let value = self.memory.read(pc as u32)?;
        self.state.pc = pc
            .checked_add(1)
            .ok_or(ExecutionError::ProgramCounterOverflow { pc })?;
        budget.debit(1);
        Ok(value)
    }

    /// Fetches a big-endian word operand.
    pub(crate) fn fetch_word(&mut self, budget: &mut CycleBudget) -> Result<u16, ExecutionError> {
        let high = self.fetch_byte(budget)? as u16;
        let low = self.fetch_byte(budget)? as u16;
        Ok((high << 8) | low)
    }

    pub(crate) fn read_byte(
        &mut self,
        addr: u32,
        budget: &mut CycleBudget,
    ) -> Result<u8, ExecutionError> {
        let value = self.memory.read(addr)?;
        budget.debit(1);
        Ok(value)
    }

    pub(crate) fn read_word(
        &mut self,
        addr: u32,
        budget: &mut CycleBudget,
    ) -> Result<u16, ExecutionError> {
        let high = self.read_byte(addr, budget)? as u16;
        let low = self.read_byte(addr + 1, budget)? as u16;
        Ok((high << 8) | low)
    }

    /// Writes a byte, forwarding stores to the output port to the device.
    pub(crate) fn write_byte(
        &mut self,
        addr: u32,
        value: u8,
        budget: &mut CycleBudget,
    ) -> Result<(), ExecutionError> {
        self.memory.write(addr, value)?;
        budget.debit(1);
        if addr == OUTPUT_PORT as u32 {
            if let Some(device) = self.output.as_mut() {
                device.write(value);
            }
        }
        Ok(())
    }

    pub(crate) fn write_word(
        &mut self,
        addr: u32,
        value: u16,
        budget: &mut CycleBudget,
    ) -> Result<(), ExecutionError> {
        if addr + 1 >= self.memory.capacity() {
            return Err(MemoryError::OutOfRange { address: addr + 1 }.into());
        }
        self.write_byte(addr, (value >> 8) as u8, budget)?;
        self.write_byte(addr + 1, value as u8, budget)
    }

    // ========== Stack ==========
    //
    // The stack holds words. SP points at the most recent word and moves by 2.

    pub(crate) fn push_word(
        &mut self,
        value: u16,
        budget: &mut CycleBudget,
    ) -> Result<(), ExecutionError> {
        let sp = self.state.sp;
        let new_sp = sp
            .checked_sub(2)
            .ok_or(ExecutionError::StackOverflow { sp })?;
        self.write_word(new_sp as u32, value, budget)?;
        self.state.sp = new_sp;
        Ok(())
    }

    pub(crate) fn pull_word(&mut self, budget: &mut CycleBudget) -> Result<u16, ExecutionError> {
        let sp = self.state.sp;
        let new_sp = sp
            .checked_add(2)
            .ok_or(ExecutionError::StackUnderflow { sp })?;
        let value = self.read_word(sp as u32, budget)?;
        self.state.sp = new_sp;
        Ok(value)
    }

    // ========== Operand Resolution ==========

    /// Fetches the operand bytes for `mode` and resolves the effective operand.
    ///
    /// Debits one cycle per fetched byte plus the mode's index cost.
    pub(crate) fn resolve_operand(
        &mut self,
        mode: AddressingMode,
        budget: &mut CycleBudget,
    ) -> Result<Operand, ExecutionError> {
        let raw = match mode.operand_size() {
            0 => 0,
            1 => self.fetch_byte(budget)? as u16,
            _ => self.fetch_word(budget)?,
        };
        budget.debit(mode.index_cycles());
        effective_operand(mode, raw, self.state.x, self.state.y)
            .ok_or(ExecutionError::UnsupportedAddressingMode(mode))
    }

    /// Resolves `mode` and returns the data byte it designates.
    pub(crate) fn read_operand(
        &mut self,
        mode: AddressingMode,
        budget: &mut CycleBudget,
    ) -> Result<u8, ExecutionError> {
        match self.resolve_operand(mode, budget)? {
            Operand::Inline(value) => Ok(value),
            Operand::Address(addr) => self.read_byte(addr, budget),
        }
    }

    /// Resolves `mode` to a memory address. Inline operands are rejected.
    pub(crate) fn resolve_address(
        &mut self,
        mode: AddressingMode,
        budget: &mut CycleBudget,
    ) -> Result<u32, ExecutionError> {
        match self.resolve_operand(mode, budget)? {
            Operand::Address(addr) => Ok(addr),
            Operand::Inline(_) => Err(ExecutionError::UnsupportedAddressingMode(mode)),
        }
    }

    // ========== Interrupts ==========

    /// Requests an externally triggered interrupt through vector `slot`.
    ///
    /// Ignored (returns `Ok(false)`) while the interrupt-disable flag is set.
    /// Otherwise the return address and flags are pushed, interrupts are
    /// disabled and PC is loaded from the vector table. The handler's `RTI`
    /// restores the previous flags, including interrupt-disable.
    ///
    /// # Examples
    ///
    /// ```
    /// use vm6502::{vector_address, AddressSpace, CPU, MemoryBus};
    ///
    /// let mut memory = AddressSpace::new();
    /// memory.write_word(vector_address(1), 0xF100).unwrap();
    /// let mut cpu = CPU::new(memory);
    ///
    /// assert!(cpu.request_interrupt(1).unwrap());
    /// assert_eq!(cpu.pc(), 0xF100);
    /// assert!(cpu.flag_i());
    ///
    /// // Masked now
    /// assert!(!cpu.request_interrupt(1).unwrap());
    /// ```
    pub fn request_interrupt(&mut self, slot: u8) -> Result<bool, ExecutionError> {
        if self.state.flags.interrupt_disable() {
            log::debug!("interrupt {} masked", slot);
            return Ok(false);
        }
        let mut budget = CycleBudget::new(0);
        let return_address = self.state.pc;
        let result = interrupts::enter(self, slot, return_address, &mut budget);
        self.total_cycles += budget.consumed();
        result?;
        self.state.flags.set_interrupt_disable(true);
        Ok(true)
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.state.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.state.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.state.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.state.pc
    }

    /// Returns the stack pointer value.
    pub fn sp(&self) -> u16 {
        self.state.sp
    }

    /// Returns the status flags.
    pub fn flags(&self) -> Flags {
        self.state.flags
    }

    /// Returns the flags packed the way they are stored on the stack.
    pub fn status(&self) -> u16 {
        self.state.flags.pack()
    }

    /// Returns a copy of the whole register file.
    pub fn registers(&self) -> ProcessorState {
        self.state
    }

    /// Returns the engine phase.
    pub fn state(&self) -> EngineState {
        self.engine_state
    }

    /// Returns the opcode of the most recent invalid-opcode trap, if any.
    pub fn last_trap(&self) -> Option<u8> {
        self.last_trap
    }

    /// Returns the total number of cycles executed since creation or reset.
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    /// Returns a reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    ///
    /// Writes through this reference bypass the output port.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.state.flags.carry()
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.state.flags.zero()
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.state.flags.interrupt_disable()
    }

    /// Returns true if the Decimal flag is set.
    pub fn flag_d(&self) -> bool {
        self.state.flags.decimal()
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.state.flags.brk()
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.state.flags.overflow()
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.state.flags.negative()
    }

    // ========== Setters ==========
    //
    // For hosts preparing a processor and for tests.

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.state.a = value;
    }

    /// Sets the X register.
    pub fn set_x(&mut self, value: u8) {
        self.state.x = value;
    }

    /// Sets the Y register.
    pub fn set_y(&mut self, value: u8) {
        self.state.y = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.state.pc = value;
    }

    /// Sets the stack pointer.
    pub fn set_sp(&mut self, value: u16) {
        self.state.sp = value;
    }

    /// Replaces all status flags.
    pub fn set_flags(&mut self, flags: Flags) {
        self.state.flags = flags;
    }

    /// Sets or clears the Carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.state.flags.set_carry(value);
    }

    /// Sets or clears the Zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.state.flags.set_zero(value);
    }

    /// Sets or clears the Interrupt Disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.state.flags.set_interrupt_disable(value);
    }

    /// Sets or clears the Decimal flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.state.flags.set_decimal(value);
    }

    /// Sets or clears the Break flag.
    pub fn set_flag_b(&mut self, value: bool) {
        self.state.flags.set_brk(value);
    }

    /// Sets or clears the Overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.state.flags.set_overflow(value);
    }

    /// Sets or clears the Negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.state.flags.set_negative(value);
    }
}

impl<M: MemoryBus> std::fmt::Debug for CPU<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("state", &self.state)
            .field("engine_state", &self.engine_state)
            .field("last_trap", &self.last_trap)
            .field("total_cycles", &self.total_cycles)
            .finish()
    }
}
