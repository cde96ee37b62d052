//! Console output device.

use super::OutputDevice;
use std::io::{self, Write};

/// Writes every output byte to standard output.
///
/// Each byte is flushed immediately so that interleaving with the host's own
/// output stays in program order.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutDevice;

impl StdoutDevice {
    pub fn new() -> Self {
        Self
    }
}

impl OutputDevice for StdoutDevice {
    fn write(&mut self, byte: u8) {
        let mut stdout = io::stdout().lock();
        if let Err(err) = stdout.write_all(&[byte]).and_then(|_| stdout.flush()) {
            log::warn!("Console output failed: {}", err);
        }
    }
}
