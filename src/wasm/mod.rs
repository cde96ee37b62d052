//! WebAssembly bindings for the vm6502 emulator.
//!
//! This module provides JavaScript-callable interfaces to the emulator, so a
//! memory image can be loaded and run from a browser page.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Emulator;
