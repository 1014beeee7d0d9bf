use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::os::unix::ffi::OsStrExt;
use std::process::{Command, Stdio};

fn termemu () -> Command {
    Command::new(env!("CARGO_BIN_EXE_termemu"))
}

#[test]
fn batch_end_exits_zero () {
    let output = termemu().arg("end").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(!String::from_utf8_lossy(&output.stdout).contains(":> "));
}

#[test]
fn batch_copies_non_utf8_argument () {
    let dir = tempfile::tempdir().unwrap();
    let name = OsStr::from_bytes(b"caf\xe9.txt");
    fs::write(dir.path().join(name), "hello").unwrap();

    let output = termemu()
        .current_dir(dir.path())
        .arg("cp")
        .arg(name)
        .arg("b.txt")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read(dir.path().join("b.txt")).unwrap(), b"hello");
}

#[test]
fn batch_non_utf8_command_is_unrecognized () {
    let output = termemu().arg(OsStr::from_bytes(b"e\xffnd")).output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Sorry, that command is unrecognized"));
}

#[test]
fn batch_failure_exits_one () {
    let dir = tempfile::tempdir().unwrap();

    let output = termemu()
        .current_dir(dir.path())
        .args(["cp", "missing.txt", "b.txt"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("b.txt").exists());
}

#[test]
fn interactive_session_ends_on_eof () {
    let mut child = termemu()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    child.stdin.take().unwrap().write_all(b"foobar\n").unwrap();
    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Terminal Successfully Started!"));
    assert!(stdout.contains("Sorry, that command is unrecognized"));
}
