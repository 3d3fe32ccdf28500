// HostWired - Arduino Host Emulation Shim
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Serial echo sketch: everything typed (or piped) into stdin comes back
//! out on the emulated serial port. Ctrl-C restores the terminal and
//! exits.

use std::sync::Arc;

use hostwired_core::{Runtime, Serial, Sketch};

fn main() {
    // Diagnostics go to stderr; stdout is the emulated serial port.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let serial = Serial::shared();

    let banner_port = Arc::clone(&serial);
    let echo_port = Arc::clone(&serial);
    let sketch = Sketch::new()
        .with_setup(move || {
            if let Ok(mut port) = banner_port.lock() {
                port.println("echo demo ready");
            }
        })
        .with_loop(move || {
            if let Ok(mut port) = echo_port.lock() {
                while let Some(byte) = port.read_byte() {
                    port.write_byte(byte);
                }
            }
        });

    Runtime::new(sketch).attach_serial(serial).run();
}
