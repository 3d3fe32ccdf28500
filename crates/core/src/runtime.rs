// HostWired - Arduino Host Emulation Shim
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Run loop scheduler: the host-side rendition of the embedded
//! power-on-to-forever execution model. Startup order is load-bearing:
//! interrupt handler first, then the exit hook, then raw mode, then the
//! one-time setup callback, then the unbounded service loop.

use std::sync::{Arc, Mutex};

use anyhow::Context;

use crate::serial::Serial;
use crate::{clock, interrupt, terminal};

/// Source of raw input bytes for the service loop. `poll_byte` returns one
/// byte when data is available right now and `None` otherwise; it must not
/// block while the descriptor honors the VMIN=0/VTIME=0 read contract.
pub trait ByteSource {
    fn poll_byte(&mut self) -> Option<u8>;
}

/// Polls stdin one byte at a time with a raw read. A zero-byte result (no
/// input available, or EOF on redirected input) and `EAGAIN`/`EINTR` all
/// map to `None`.
#[derive(Debug, Default)]
pub struct StdinByteSource;

impl ByteSource for StdinByteSource {
    fn poll_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match rustix::io::read(rustix::stdio::stdin(), &mut buf) {
            Ok(1) => Some(buf[0]),
            _ => None,
        }
    }
}

/// User lifecycle callbacks. Both are optional; an absent callback is a
/// legal no-op, mirroring firmware images that omit one of the entry
/// points.
#[derive(Default)]
pub struct Sketch {
    setup: Option<Box<dyn FnMut()>>,
    loop_body: Option<Box<dyn FnMut()>>,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-time initialization, invoked once before the service loop.
    pub fn with_setup(mut self, f: impl FnMut() + 'static) -> Self {
        self.setup = Some(Box::new(f));
        self
    }

    /// Repeating body, invoked once per service-loop iteration.
    pub fn with_loop(mut self, f: impl FnMut() + 'static) -> Self {
        self.loop_body = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for Sketch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sketch")
            .field("setup", &self.setup.is_some())
            .field("loop", &self.loop_body.is_some())
            .finish()
    }
}

/// The top-level driver. Owns the input source, the optional serial
/// collaborator, and the sketch callbacks.
#[derive(Debug)]
pub struct Runtime<I: ByteSource = StdinByteSource> {
    input: I,
    serial: Option<Arc<Mutex<Serial>>>,
    sketch: Sketch,
}

impl Runtime<StdinByteSource> {
    pub fn new(sketch: Sketch) -> Self {
        Self::with_input(StdinByteSource, sketch)
    }
}

impl<I: ByteSource> Runtime<I> {
    pub fn with_input(input: I, sketch: Sketch) -> Self {
        Self {
            input,
            serial: None,
            sketch,
        }
    }

    /// Attach the serial port the loop forwards received bytes to.
    /// Absence is legal; received bytes are then discarded.
    pub fn attach_serial(mut self, serial: Arc<Mutex<Serial>>) -> Self {
        self.serial = Some(serial);
        self
    }

    /// One service-loop iteration: poll a byte, forward a non-NUL byte to
    /// the serial port, invoke the repeating callback, yield.
    pub fn tick(&mut self) {
        if let Some(byte) = self.input.poll_byte() {
            if byte != 0 {
                tracing::trace!(byte, "forwarding received byte");
                if let Some(serial) = &self.serial {
                    if let Ok(mut guard) = serial.lock() {
                        guard.insert_byte(byte);
                    }
                }
            }
        }
        if let Some(body) = &mut self.sketch.loop_body {
            body();
        }
        clock::cooperative_yield();
    }

    /// Arm the exit paths, enter raw mode, run `setup`, then service the
    /// loop forever. Ends only via process exit: a normal `exit` call from
    /// sketch code, a signal, or a fatal terminal-configuration failure
    /// (status 1).
    pub fn run(mut self) -> ! {
        if let Err(err) = self.arm() {
            tracing::error!("{err:#}");
            // The exit hook restores the terminal if raw mode was reached.
            std::process::exit(1);
        }

        if let Some(setup) = &mut self.sketch.setup {
            setup();
        }

        tracing::debug!("entering service loop");
        loop {
            self.tick();
        }
    }

    fn arm(&mut self) -> anyhow::Result<()> {
        interrupt::install().context("failed to install interrupt handler")?;
        terminal::install_exit_hook();
        terminal::enable_raw_mode().context("failed to enter raw mode")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedSource(VecDeque<u8>);

    impl ScriptedSource {
        fn new(bytes: &[u8]) -> Self {
            Self(bytes.iter().copied().collect())
        }
    }

    impl ByteSource for ScriptedSource {
        fn poll_byte(&mut self) -> Option<u8> {
            self.0.pop_front()
        }
    }

    #[test]
    fn received_byte_is_inserted_exactly_once() {
        let serial = Serial::shared();
        let mut runtime = Runtime::with_input(ScriptedSource::new(b"A"), Sketch::new())
            .attach_serial(Arc::clone(&serial));
        runtime.tick();
        let mut guard = serial.lock().unwrap();
        assert_eq!(guard.available(), 1);
        assert_eq!(guard.read_byte(), Some(b'A'));
    }

    #[test]
    fn empty_source_inserts_nothing() {
        let serial = Serial::shared();
        let mut runtime = Runtime::with_input(ScriptedSource::new(b""), Sketch::new())
            .attach_serial(Arc::clone(&serial));
        runtime.tick();
        assert_eq!(serial.lock().unwrap().available(), 0);
    }

    #[test]
    fn nul_byte_is_dropped() {
        let serial = Serial::shared();
        let mut runtime = Runtime::with_input(ScriptedSource::new(&[0x00]), Sketch::new())
            .attach_serial(Arc::clone(&serial));
        runtime.tick();
        assert_eq!(serial.lock().unwrap().available(), 0);
    }

    #[test]
    fn loop_callback_runs_once_per_tick() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sketch = Sketch::new().with_loop(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let mut runtime = Runtime::with_input(ScriptedSource::new(b""), sketch);
        for _ in 0..25 {
            runtime.tick();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 25);
    }

    #[test]
    fn ticks_respect_the_yield_lower_bound() {
        let mut runtime = Runtime::with_input(ScriptedSource::new(b""), Sketch::new());
        let before = clock::now_millis();
        for _ in 0..10 {
            runtime.tick();
        }
        let elapsed = clock::now_millis() - before;
        assert!(elapsed >= 10 * clock::YIELD_MILLIS, "elapsed {elapsed}ms");
    }

    #[test]
    fn absent_callbacks_and_serial_are_safe() {
        let mut runtime = Runtime::with_input(ScriptedSource::new(b"AB"), Sketch::new());
        runtime.tick();
        runtime.tick();
    }
}
