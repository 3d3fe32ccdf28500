// HostWired - Arduino Host Emulation Shim
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Ctrl-C handling. The handler runs asynchronously at any instruction
//! boundary of the service loop, so its body is restricted to the
//! async-signal-safe restoration path plus process termination.

use signal_hook::consts::SIGINT;
use signal_hook::low_level;

/// Bind the interrupt handler to SIGINT.
pub fn install() -> std::io::Result<()> {
    // SAFETY: `on_interrupt` only performs async-signal-safe work (see
    // `terminal::restore_on_signal`) and exits via `low_level::exit`.
    unsafe { low_level::register(SIGINT, on_interrupt)? };
    Ok(())
}

fn on_interrupt() {
    crate::terminal::restore_on_signal();
    low_level::exit(1);
}
