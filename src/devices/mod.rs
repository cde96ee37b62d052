//! Memory-mapped output devices.
//!
//! The processor has a single I/O channel: every store to [`OUTPUT_PORT`]
//! writes the byte to memory as usual and also hands it to the attached
//! [`OutputDevice`]. The byte is delivered synchronously, before the next
//! instruction is fetched.
//!
//! # Example
//!
//! ```rust
//! use vm6502::{AddressSpace, CaptureDevice, CPU};
//!
//! let mut cpu = CPU::new(AddressSpace::new());
//! let capture = CaptureDevice::new();
//! cpu.set_output(capture.clone());
//!
//! // LDX #'!' ; STX $FFFF
//! cpu.load_image(0xFFFC, &[0x4C, 0x02, 0x00]).unwrap();
//! cpu.load_image(0x0200, &[0xA2, b'!', 0x8E, 0xFF, 0xFF]).unwrap();
//! cpu.execute(9).unwrap();
//!
//! assert_eq!(capture.bytes(), vec![b'!']);
//! ```

pub mod capture;
pub mod console;

pub use capture::CaptureDevice;
pub use console::StdoutDevice;

/// Address whose stores are forwarded to the output device.
pub const OUTPUT_PORT: u16 = 0xFFFF;

/// Sink for bytes stored to the output port.
///
/// Any `FnMut(u8)` closure is an output device:
///
/// ```rust
/// use vm6502::OutputDevice;
///
/// let mut seen = Vec::new();
/// {
///     let mut sink = |byte: u8| seen.push(byte);
///     sink.write(b'A');
/// }
/// assert_eq!(seen, vec![b'A']);
/// ```
pub trait OutputDevice {
    /// Receives one byte stored to the output port.
    fn write(&mut self, byte: u8);
}

impl<F: FnMut(u8)> OutputDevice for F {
    fn write(&mut self, byte: u8) {
        self(byte)
    }
}
