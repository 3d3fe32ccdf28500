// HostWired - Arduino Host Emulation Shim
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Terminal mode controller lifecycle, exercised under the test harness.
//!
//! The assertions below only run when stdin is non-interactive (the normal
//! situation under `cargo test` with captured/piped stdio and under CI).
//! On a real tty they would flip the developer's terminal into raw mode
//! mid-test-run, so each test bails out early in that case; the
//! interactive round-trip behavior is covered by running the demo binaries
//! by hand.

use hostwired_core::terminal;

#[test]
fn noninteractive_enable_is_a_noop() {
    if terminal::is_interactive() {
        return;
    }
    terminal::enable_raw_mode().expect("enable must degrade to a no-op");
    assert!(!terminal::is_raw_mode_active());
    terminal::disable_raw_mode().expect("disable must degrade to a no-op");
}

#[test]
fn disable_without_enable_succeeds() {
    if terminal::is_interactive() {
        return;
    }
    terminal::disable_raw_mode().expect("disable with raw mode never enabled");
    assert!(!terminal::is_raw_mode_active());
}

#[test]
fn disable_is_idempotent() {
    if terminal::is_interactive() {
        return;
    }
    terminal::disable_raw_mode().expect("first disable");
    terminal::disable_raw_mode().expect("second disable");
    assert!(!terminal::is_raw_mode_active());
}

#[test]
fn enable_disable_cycles_leave_flag_clear() {
    if terminal::is_interactive() {
        return;
    }
    for _ in 0..3 {
        terminal::enable_raw_mode().expect("enable cycle");
        terminal::disable_raw_mode().expect("disable cycle");
        assert!(!terminal::is_raw_mode_active());
    }
}
