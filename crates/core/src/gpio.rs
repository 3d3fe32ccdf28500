// HostWired - Arduino Host Emulation Shim
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Digital I/O stubs. There is no hardware behind these; they exist so
//! sketches using the pin API compile and run unchanged on the host.

/// Configuration requested for a pin via [`pin_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinMode {
    #[default]
    Input,
    Output,
    InputPullup,
}

/// A digital signal level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinLevel {
    #[default]
    Low,
    High,
}

impl From<bool> for PinLevel {
    fn from(b: bool) -> Self {
        if b {
            PinLevel::High
        } else {
            PinLevel::Low
        }
    }
}

impl From<PinLevel> for bool {
    fn from(level: PinLevel) -> Self {
        match level {
            PinLevel::High => true,
            PinLevel::Low => false,
        }
    }
}

/// Configure a pin. No-op on the host.
pub fn pin_mode(_pin: u8, _mode: PinMode) {}

/// Drive a pin. No-op on the host.
pub fn digital_write(_pin: u8, _level: PinLevel) {}

/// Sample a pin. Always reads low on the host.
pub fn digital_read(_pin: u8) -> PinLevel {
    PinLevel::Low
}
