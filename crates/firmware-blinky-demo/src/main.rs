// HostWired - Arduino Host Emulation Shim
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Blink sketch: toggles a virtual LED pin on a 500 ms period derived from
//! the monotonic clock. Deliberately has no `setup` and no serial
//! attachment; both are optional and the runtime must not require them.

use hostwired_core::{clock, digital_write, PinLevel, Runtime, Sketch};

const LED_PIN: u8 = 13;
const BLINK_PERIOD_MILLIS: u64 = 500;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let mut lit = false;
    let mut last_toggle = clock::now_millis();
    let sketch = Sketch::new().with_loop(move || {
        let now = clock::now_millis();
        if now - last_toggle >= BLINK_PERIOD_MILLIS {
            lit = !lit;
            last_toggle = now;
            digital_write(LED_PIN, PinLevel::from(lit));
            tracing::info!(lit, "led toggled");
        }
    });

    Runtime::new(sketch).run();
}
