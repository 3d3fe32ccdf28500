// HostWired - Arduino Host Emulation Shim
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Monotonic clock source backing `millis()`/`micros()`-style sketch code
//! and the scheduler's cooperative yield.

use std::sync::LazyLock;
use std::thread;
use std::time::{Duration, Instant};

/// Duration of the scheduler's per-iteration yield, in milliseconds.
/// Keeps the service loop from monopolizing a CPU core.
pub const YIELD_MILLIS: u64 = 1;

// Epoch is captured on first use; the API only promises an arbitrary epoch
// with non-decreasing readings.
static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Milliseconds elapsed since the process-local epoch. Monotonic, immune to
/// wall-clock adjustments.
pub fn now_millis() -> u64 {
    EPOCH.elapsed().as_millis() as u64
}

/// Microseconds elapsed since the process-local epoch.
pub fn now_micros() -> u64 {
    EPOCH.elapsed().as_micros() as u64
}

/// Block the calling thread for approximately `ms` milliseconds. May
/// over-sleep, never under-sleeps.
pub fn sleep_millis(ms: u64) {
    thread::sleep(Duration::from_millis(ms));
}

/// The scheduler's fairness yield: a fixed short sleep.
pub fn cooperative_yield() {
    sleep_millis(YIELD_MILLIS);
}
