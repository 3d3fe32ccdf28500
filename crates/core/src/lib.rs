// HostWired - Arduino Host Emulation Shim
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Host-side runtime for Arduino-style firmware.
//!
//! Sketches written against the familiar `setup()`/`loop()` model run as an
//! ordinary desktop process: the controlling terminal stands in for the
//! hardware serial port (stdin in raw mode on the receive side, stdout on
//! the transmit side) and [`runtime::Runtime`] drives the
//! power-on-to-forever service loop. When stdin is not a terminal (CI,
//! piped input) every terminal operation degrades to a no-op, so the same
//! binary runs unattended.

pub mod clock;
pub mod gpio;
pub mod interrupt;
pub mod runtime;
pub mod serial;
pub mod terminal;

pub use gpio::{digital_read, digital_write, pin_mode, PinLevel, PinMode};
pub use runtime::{ByteSource, Runtime, Sketch, StdinByteSource};
pub use serial::{Serial, SharedSerial};
pub use terminal::TerminalError;
