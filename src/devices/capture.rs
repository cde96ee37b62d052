//! Capturing output device.
//!
//! Collects output bytes in a shared buffer. Clones share the buffer, so the
//! host keeps one handle while the CPU owns another.

use super::OutputDevice;
use std::cell::RefCell;
use std::rc::Rc;

/// Output device that records every byte it receives.
///
/// # Example
///
/// ```rust
/// use vm6502::{CaptureDevice, OutputDevice};
///
/// let capture = CaptureDevice::new();
/// let mut handle = capture.clone();
///
/// handle.write(b'H');
/// handle.write(b'i');
///
/// assert_eq!(capture.as_string(), "Hi");
/// assert_eq!(capture.take(), vec![b'H', b'i']);
/// assert!(capture.bytes().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CaptureDevice {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl CaptureDevice {
    /// Creates a device with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything captured so far.
    pub fn bytes(&self) -> Vec<u8> {
        self.buffer.borrow().clone()
    }

    /// Drains the buffer.
    pub fn take(&self) -> Vec<u8> {
        std::mem::take(&mut *self.buffer.borrow_mut())
    }

    /// Captured bytes decoded as UTF-8, lossily.
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }

    /// Number of bytes captured.
    pub fn len(&self) -> usize {
        self.buffer.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.borrow().is_empty()
    }
}

impl OutputDevice for CaptureDevice {
    fn write(&mut self, byte: u8) {
        self.buffer.borrow_mut().push(byte);
    }
}
