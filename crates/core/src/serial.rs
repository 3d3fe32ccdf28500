// HostWired - Arduino Host Emulation Shim
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Emulated serial port. Receive side is a bounded buffer the scheduler
//! feeds one byte at a time; transmit side writes through to stdout (the
//! terminal driver renders `\n` as CR-NL while raw mode is active, because
//! OPOST|ONLCR stay enabled). An optional capture sink replaces or
//! supplements stdout for tests.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Receive-buffer capacity, matching the classic 64-byte hardware serial
/// buffer. Bytes arriving while full are dropped.
pub const RX_BUFFER_CAPACITY: usize = 64;

/// Handle shared between the scheduler and sketch closures.
pub type SharedSerial = Arc<Mutex<Serial>>;

#[derive(Debug, Default)]
pub struct Serial {
    rx: VecDeque<u8>,
    sink: Option<Arc<Mutex<Vec<u8>>>>,
    echo_stdout: bool,
}

impl Serial {
    pub fn new() -> Self {
        Self {
            rx: VecDeque::with_capacity(RX_BUFFER_CAPACITY),
            sink: None,
            echo_stdout: true,
        }
    }

    /// Wrap a fresh port in the shared handle the runtime expects.
    pub fn shared() -> SharedSerial {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Redirect transmitted bytes into `sink`; `echo_stdout` controls
    /// whether they still reach stdout as well.
    pub fn set_sink(&mut self, sink: Option<Arc<Mutex<Vec<u8>>>>, echo_stdout: bool) {
        self.sink = sink;
        self.echo_stdout = echo_stdout;
    }

    /// The scheduler's insertion operation: queue one received byte.
    pub fn insert_byte(&mut self, byte: u8) {
        if self.rx.len() >= RX_BUFFER_CAPACITY {
            tracing::trace!(byte, "rx buffer full, dropping byte");
            return;
        }
        self.rx.push_back(byte);
    }

    /// Number of received bytes waiting to be read.
    pub fn available(&self) -> usize {
        self.rx.len()
    }

    /// Pop the oldest received byte, if any.
    pub fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    /// Transmit one byte.
    pub fn write_byte(&mut self, byte: u8) {
        self.transmit(&[byte]);
    }

    /// Transmit a string as-is.
    pub fn print(&mut self, s: &str) {
        self.transmit(s.as_bytes());
    }

    /// Transmit a string followed by a newline.
    pub fn println(&mut self, s: &str) {
        self.transmit(s.as_bytes());
        self.transmit(b"\n");
    }

    fn transmit(&mut self, bytes: &[u8]) {
        if let Some(sink) = &self.sink {
            if let Ok(mut guard) = sink.lock() {
                guard.extend_from_slice(bytes);
            }
        }
        if self.echo_stdout {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(bytes);
            let _ = stdout.flush();
        }
    }
}
