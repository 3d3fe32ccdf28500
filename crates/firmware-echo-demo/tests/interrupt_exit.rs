// HostWired - Arduino Host Emulation Shim
// Copyright (C) 2026 Andrii Shylenko
//
// This software is released under the MIT License.
// See the LICENSE file in the project root for full license information.

//! End-to-end: run the echo sketch as a child process with piped stdio,
//! feed it a byte, then interrupt it. Stdin is a pipe, so this also covers
//! the interrupt path where raw mode was never entered (no restoration,
//! immediate termination with status 1).

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

#[test]
fn echoes_input_and_exits_with_status_one_on_interrupt() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_firmware-echo-demo"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn echo demo");

    child
        .stdin
        .as_mut()
        .expect("child stdin")
        .write_all(b"A")
        .expect("feed input byte");

    // Give the service loop time to pick up the byte and echo it.
    thread::sleep(Duration::from_millis(500));

    let rc = unsafe { libc::kill(child.id() as libc::pid_t, libc::SIGINT) };
    assert_eq!(rc, 0, "deliver SIGINT");

    let output = child.wait_with_output().expect("collect child output");
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("echo demo ready"),
        "missing banner in {stdout:?}"
    );
    assert!(stdout.contains('A'), "missing echo in {stdout:?}");
}

#[test]
fn interrupt_without_input_still_exits_with_status_one() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_firmware-echo-demo"))
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn echo demo");

    thread::sleep(Duration::from_millis(300));

    let rc = unsafe { libc::kill(child.id() as libc::pid_t, libc::SIGINT) };
    assert_eq!(rc, 0, "deliver SIGINT");

    let status = child.wait().expect("wait for child");
    assert_eq!(status.code(), Some(1));
}
