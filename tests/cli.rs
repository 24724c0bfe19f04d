//! End-to-end runs of the binary against capture exports on disk.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::cargo_bin("pcap-throughput").unwrap()
}

/// One-second capture carrying `bytes` split over two packets.
fn write_capture(dir: &Path, name: &str, bytes: u64) {
    let half = bytes / 2;
    let body = format!(
        "0.000 10.1.1.1 10.1.2.2 49153 8080 {half} ACK\n1.000 10.1.1.1 10.1.2.2 49153 8080 {} ACK\n",
        bytes - half
    );
    fs::write(dir.join(name), body).unwrap();
}

#[test]
fn two_line_capture_reports_2000_bps() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cap.txt"), "0.000 a b c d 100 g\n1.000 a b c d 150 g\n").unwrap();

    cmd()
        .current_dir(dir.path())
        .arg("cap.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing file: cap.txt"))
        .stdout(predicate::str::contains("Total Bytes Received: 250 bytes"))
        .stdout(predicate::str::contains("Time Range: 1.00 seconds"))
        .stdout(predicate::str::contains("Throughput: 2000.00 bps (0.00 Mbps)"))
        .stdout(predicate::str::contains("Average Throughput: 2000.00 bps (0.00 Mbps)"));
}

#[test]
fn malformed_only_capture_is_excluded_with_diagnostic() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.txt"), "not-a-number a b c d x g\n").unwrap();

    cmd()
        .current_dir(dir.path())
        .arg("bad.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("No valid data in file: bad.txt"))
        .stdout(predicate::str::contains("No valid data to calculate average throughput."))
        .stderr(predicate::str::contains("Error parsing line: not-a-number a b c d x g"));
}

#[test]
fn default_file_list_averages_readable_files() {
    let dir = TempDir::new().unwrap();
    write_capture(dir.path(), "tcp-example-0-0_output.txt", 125_000);
    write_capture(dir.path(), "tcp-example-1-0_output.txt", 250_000);
    // tcp-example-2-0_output.txt is deliberately absent

    cmd()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Throughput: 1000000.00 bps (1.00 Mbps)"))
        .stdout(predicate::str::contains("Throughput: 2000000.00 bps (2.00 Mbps)"))
        .stdout(predicate::str::contains("Processing file: tcp-example-2-0_output.txt"))
        .stdout(predicate::str::contains("Average Throughput: 1500000.00 bps (1.50 Mbps)"))
        .stderr(predicate::str::contains("Error reading the file tcp-example-2-0_output.txt"));
}

#[test]
fn single_packet_capture_reports_infinite_throughput() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("one.txt"), "5.0 a b c d 1460 g\n").unwrap();

    cmd()
        .current_dir(dir.path())
        .arg("one.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time Range: 0.00 seconds"))
        .stdout(predicate::str::contains("Throughput: inf bps (inf Mbps)"));
}

#[test]
fn invalid_utf8_bytes_do_not_discard_the_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("mixed.txt"),
        b"0.000 a b c d 100 g\n0.500 a b c d 0 \xff\xfe\n1.000 a b c d 150 g\n",
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .arg("mixed.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Bytes Received: 250 bytes"))
        .stdout(predicate::str::contains("Average Throughput: 2000.00 bps"))
        .stderr(predicate::str::contains("Error reading the file").not());
}

#[test]
fn short_lines_are_skipped_silently() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cap.txt"),
        "frame.time_epoch ip.src ip.dst\n\n0.0 a b c d 10 g\n2.0 a b c d 10 g\n",
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .arg("cap.txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Throughput: 80.00 bps"))
        .stderr(predicate::str::contains("Error parsing line").not());
}

#[test]
fn json_format_emits_one_document() {
    let dir = TempDir::new().unwrap();
    write_capture(dir.path(), "a.txt", 125_000);

    let output = cmd()
        .current_dir(dir.path())
        .args(["a.txt", "missing.txt", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["files"][0]["status"], "measured");
    assert_eq!(v["files"][0]["throughput_bps"], 1_000_000.0);
    assert_eq!(v["files"][1]["status"], "read_error");
    assert_eq!(v["valid_files"], 1);
    assert_eq!(v["total_files"], 2);
    assert_eq!(v["average_bps"], 1_000_000.0);
}

#[test]
fn config_file_sets_files_and_layout() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("cols.txt"), "64 1.0 x\n64 3.0 y\n").unwrap();
    fs::write(
        dir.path().join("cfg.json"),
        r#"{"files": ["cols.txt"], "timestamp_field": 1, "length_field": 0, "min_fields": 3}"#,
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["--config", "cfg.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Bytes Received: 128 bytes"))
        .stdout(predicate::str::contains("Throughput: 512.00 bps"));
}

#[test]
fn unreadable_config_is_a_startup_error() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["--config", "nope.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Loading configuration"));
}
