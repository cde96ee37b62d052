//! WASM API for the vm6502 emulator.
//!
//! Provides JavaScript-callable interfaces for loading images, running the
//! engine against a cycle budget, and inspecting state and output.

use crate::{
    disassemble_count, AddressSpace, CaptureDevice, ExecutionSummary, MemoryBus, OutputDevice, CPU,
};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl<E: std::error::Error> From<E> for JsError {
    fn from(err: E) -> Self {
        JsError::new(&err.to_string())
    }
}

/// Outcome of one `execute` call
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct RunResult {
    instructions: f64,
    cycles_used: f64,
    overrun: f64,
}

#[wasm_bindgen]
impl RunResult {
    #[wasm_bindgen(getter)]
    pub fn instructions(&self) -> f64 {
        self.instructions
    }

    #[wasm_bindgen(getter)]
    pub fn cycles_used(&self) -> f64 {
        self.cycles_used
    }

    #[wasm_bindgen(getter)]
    pub fn overrun(&self) -> f64 {
        self.overrun
    }
}

impl From<ExecutionSummary> for RunResult {
    fn from(summary: ExecutionSummary) -> Self {
        // u64 counters cross into JavaScript as numbers
        RunResult {
            instructions: summary.instructions as f64,
            cycles_used: summary.cycles_used as f64,
            overrun: summary.overrun as f64,
        }
    }
}

/// One disassembled instruction
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Main emulator interface for JavaScript
///
/// Bytes stored to the output port are buffered and handed out by
/// `take_output`. If an `on_output` callback is given, each byte is also passed
/// to it as a one-character string.
#[wasm_bindgen]
pub struct Emulator {
    cpu: CPU<AddressSpace>,
    output: CaptureDevice,
    on_output: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl Emulator {
    #[wasm_bindgen(constructor)]
    pub fn new(on_output: Option<js_sys::Function>) -> Self {
        let mut emulator = Emulator {
            cpu: CPU::new(AddressSpace::new()),
            output: CaptureDevice::new(),
            on_output,
        };
        emulator.attach_output();
        emulator
    }

    fn attach_output(&mut self) {
        let mut buffer = self.output.clone();
        match self.on_output.clone() {
            Some(callback) => self.cpu.set_output(move |byte: u8| {
                buffer.write(byte);
                let text = char::from(byte).to_string();
                let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(&text));
            }),
            None => self.cpu.set_output(buffer),
        }
    }

    /// Clear memory and reset the processor. Pending output is discarded.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.output.take();
    }

    /// Copy an image into memory at `address`.
    pub fn load(&mut self, address: u32, image: &[u8]) -> Result<(), JsError> {
        self.cpu.load_image(address, image)?;
        Ok(())
    }

    /// Execute a single instruction and return the cycles it used
    pub fn step(&mut self) -> Result<u32, JsError> {
        Ok(self.cpu.step()?)
    }

    /// Run until `budget` cycles are used up
    pub fn execute(&mut self, budget: u32) -> Result<RunResult, JsError> {
        Ok(self.cpu.execute(budget)?.into())
    }

    /// Request an external interrupt. Returns false if it was masked.
    pub fn request_interrupt(&mut self, slot: u8) -> Result<bool, JsError> {
        Ok(self.cpu.request_interrupt(slot)?)
    }

    /// Drain the bytes written to the output port since the last call
    pub fn take_output(&mut self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(self.output.take().as_slice())
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u16 {
        self.cpu.sp()
    }

    /// Flags packed as they are stored on the stack
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u16 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn total_cycles(&self) -> f64 {
        self.cpu.total_cycles() as f64
    }

    #[wasm_bindgen(getter)]
    pub fn last_trap(&self) -> Option<u8> {
        self.cpu.last_trap()
    }

    /// Read a single byte from memory. Out-of-range addresses read as 0.
    pub fn read_memory(&self, addr: u32) -> u8 {
        self.cpu.memory().read(addr).unwrap_or(0)
    }

    /// Read a 256-byte page from memory (for efficient display)
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as usize) << 8;
        self.cpu.memory().as_slice()[start..start + 256].to_vec()
    }

    /// Disassemble `count` instructions starting at `address`
    pub fn disassemble(&self, address: u16, count: u32) -> Vec<JsValue> {
        let memory = &self.cpu.memory().as_slice()[address as usize..];

        disassemble_count(memory, address, count as usize)
            .into_iter()
            .map(|instr| {
                let mut bytes = vec![instr.opcode];
                bytes.extend_from_slice(&instr.operand_bytes);
                JsValue::from(DisassemblyLine {
                    address: instr.address,
                    bytes,
                    text: instr.to_string(),
                })
            })
            .collect()
    }
}
