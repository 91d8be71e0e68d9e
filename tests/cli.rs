use std::{
    io::{Read, Write},
    process::{Command, Stdio},
    sync::mpsc,
    thread,
    time::Duration,
};

use tempfile::NamedTempFile;

fn source_file(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

fn bf_vm() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bf-vm"))
}

#[test]
fn runs_a_program_from_a_file() {
    let file = source_file("++++++++[>++++++++<-]>+.[-]++++++++++.");
    let output = bf_vm().arg(file.path()).output().unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, b"A\n");
}

#[test]
fn malformed_program_fails() {
    let file = source_file("+]");
    let output = bf_vm().arg(file.path()).output().unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = bf_vm()
        .arg(dir.path().join("missing.b"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn strict_underflow_flushes_output_then_fails() {
    let file = source_file("++++++++[>++++++++<-]>+.<<");
    let output = bf_vm()
        .arg("--strict-underflow")
        .arg(file.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert_eq!(output.stdout, b"A");

    let output = bf_vm().arg(file.path()).output().unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, b"A");
}

#[test]
fn step_limit_fails_infinite_programs() {
    let file = source_file("+[]");
    let output = bf_vm()
        .args(["--step-limit", "1000"])
        .arg(file.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn reads_input_when_asked() {
    let file = source_file(",.,.");
    let mut child = bf_vm()
        .arg("--read-input")
        .arg(file.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"hi").unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout, b"hi");
}

#[test]
fn prompt_is_visible_while_waiting_for_input() {
    // prints '1' with no newline, then blocks on `,`
    let file = source_file(&format!("{}.,.", "+".repeat(49)));
    let mut child = bf_vm()
        .arg("--read-input")
        .arg(file.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();

    let mut stdin = child.stdin.take().unwrap();
    let mut stdout = child.stdout.take().unwrap();
    let (sender, receiver) = mpsc::channel();
    let reader = thread::spawn(move || {
        let mut first = [0u8; 1];
        let read = stdout.read_exact(&mut first).map(|()| first[0]);
        sender.send(read.ok()).unwrap();
        let mut rest = Vec::new();
        stdout.read_to_end(&mut rest).unwrap();
        rest
    });

    let first = receiver.recv_timeout(Duration::from_secs(5));
    stdin.write_all(b"z").unwrap();
    drop(stdin);

    let rest = reader.join().unwrap();
    assert!(child.wait().unwrap().success());
    assert_eq!(first, Ok(Some(b'1')));
    assert_eq!(rest, b"z");
}
