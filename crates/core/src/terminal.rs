// HostWired - Arduino Host Emulation Shim
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! Terminal line-discipline lifecycle.
//!
//! Raw mode makes each keystroke visible to the sketch immediately, the way
//! bytes arrive on a hardware serial port. The controlling terminal is a
//! single process-wide OS resource, so the saved cooked-mode settings and
//! the raw-mode flag are process-wide state: the flag is an atomic whose
//! check-and-clear makes [`disable_raw_mode`] and the interrupt path
//! idempotent, and the snapshot is written only while the flag is clear.
//!
//! Every operation is a no-op when stdin is not a terminal, so the runtime
//! works under redirected input (CI, piped test harnesses) without failing.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, Ordering};

use rustix::termios::{
    self, ControlModes, InputModes, LocalModes, OptionalActions, OutputModes, SpecialCodeIndex,
    Termios,
};

/// Failure while capturing, applying, or restoring terminal settings. All
/// three are fatal to the runtime: an inconsistent terminal state cannot be
/// recovered from within the program.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("failed to capture terminal settings: {0}")]
    Capture(#[source] rustix::io::Errno),
    #[error("failed to apply raw terminal settings: {0}")]
    Apply(#[source] rustix::io::Errno),
    #[error("failed to restore terminal settings: {0}")]
    Restore(#[source] rustix::io::Errno),
}

/// True only between a successful enable and the first disable attempt.
static RAW_MODE_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Snapshot of the cooked-mode settings, captured once per enable cycle.
static SAVED_SETTINGS: SavedSettings = SavedSettings(UnsafeCell::new(None));

struct SavedSettings(UnsafeCell<Option<Termios>>);

// SAFETY: the cell is written only while RAW_MODE_ACTIVE is false (enable
// path, before the Release store) and read only after observing true with
// Acquire (disable path, signal path). A mutex cannot be used here: the
// signal path must stay async-signal-safe.
unsafe impl Sync for SavedSettings {}

/// Whether stdin is an interactive terminal device rather than a file,
/// pipe, or redirected stream.
pub fn is_interactive() -> bool {
    termios::isatty(rustix::stdio::stdin())
}

/// Whether the terminal is currently in raw mode.
pub fn is_raw_mode_active() -> bool {
    RAW_MODE_ACTIVE.load(Ordering::Acquire)
}

/// Put the controlling terminal into raw mode.
///
/// No-op when stdin is not interactive, and when raw mode is already
/// active (re-capturing would clobber the cooked-mode snapshot).
///
/// The derived configuration disables parity checking, bit stripping, and
/// flow control on input, keeps output post-processing on so `\n` is still
/// rendered as CR-NL, forces 8-bit frames, and turns off canonical and
/// extended input processing while leaving ISIG alone so Ctrl-C still
/// signals. VMIN=0/VTIME=0 makes reads return immediately with whatever is
/// available, including nothing.
pub fn enable_raw_mode() -> Result<(), TerminalError> {
    if !is_interactive() {
        return Ok(());
    }
    if RAW_MODE_ACTIVE.load(Ordering::Acquire) {
        return Ok(());
    }

    let stdin = rustix::stdio::stdin();
    let saved = termios::tcgetattr(stdin).map_err(TerminalError::Capture)?;

    let mut raw = saved.clone();
    raw.input_modes &= !(InputModes::INPCK | InputModes::ISTRIP | InputModes::IXON);
    raw.output_modes |= OutputModes::OPOST | OutputModes::ONLCR;
    raw.control_modes |= ControlModes::CS8;
    raw.local_modes &= !(LocalModes::ICANON | LocalModes::IEXTEN);
    raw.special_codes[SpecialCodeIndex::VMIN] = 0;
    raw.special_codes[SpecialCodeIndex::VTIME] = 0;

    // Flag is still false here, so no other actor reads the cell.
    unsafe { *SAVED_SETTINGS.0.get() = Some(saved) };

    termios::tcsetattr(stdin, OptionalActions::Flush, &raw).map_err(TerminalError::Apply)?;
    RAW_MODE_ACTIVE.store(true, Ordering::Release);
    tracing::debug!("terminal switched to raw mode");
    Ok(())
}

/// Restore the terminal to its pre-enable settings.
///
/// Idempotent: calling it twice, or without a prior enable, performs no
/// restoration and succeeds. The flag is cleared before the restoration is
/// attempted, so a failing restore cannot re-enter this path from the
/// process-exit hook.
pub fn disable_raw_mode() -> Result<(), TerminalError> {
    if !is_interactive() {
        return Ok(());
    }
    if !RAW_MODE_ACTIVE.swap(false, Ordering::AcqRel) {
        return Ok(());
    }

    let saved = unsafe { &*SAVED_SETTINGS.0.get() };
    if let Some(saved) = saved {
        termios::tcsetattr(rustix::stdio::stdin(), OptionalActions::Flush, saved)
            .map_err(TerminalError::Restore)?;
    }
    tracing::debug!("terminal restored to cooked mode");
    Ok(())
}

/// Async-signal-safe restoration for the interrupt handler.
///
/// Only syscall-level operations: isatty, the atomic check-and-clear,
/// tcsetattr, and a raw write to stderr if the restore fails. A failure is
/// reported but never escalated; escalating from a signal context could
/// recurse into teardown.
pub(crate) fn restore_on_signal() {
    if !is_interactive() {
        return;
    }
    if !RAW_MODE_ACTIVE.swap(false, Ordering::AcqRel) {
        return;
    }

    let saved = unsafe { &*SAVED_SETTINGS.0.get() };
    if let Some(saved) = saved {
        let restored =
            termios::tcsetattr(rustix::stdio::stdin(), OptionalActions::Flush, saved);
        if restored.is_err() {
            let _ = rustix::io::write(
                rustix::stdio::stderr(),
                b"hostwired: failed to restore terminal settings on interrupt\n",
            );
        }
    }
}

/// Arrange for [`disable_raw_mode`] to run on every normal process-exit
/// path. Relies only on "runs once, at exit".
pub fn install_exit_hook() {
    let rc = unsafe { libc::atexit(restore_terminal_at_exit) };
    if rc != 0 {
        tracing::warn!("failed to register terminal restoration at exit");
    }
}

extern "C" fn restore_terminal_at_exit() {
    if let Err(err) = disable_raw_mode() {
        // The flag is already cleared, so _exit cannot loop back here.
        eprintln!("hostwired: {err}");
        unsafe { libc::_exit(1) };
    }
}
