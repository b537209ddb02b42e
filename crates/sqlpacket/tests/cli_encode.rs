#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn sqlpacket(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sqlpacket"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .output()
        .expect("sqlpacket should run")
}

fn json_stdout(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn encode_splits_into_fragments() {
    let output = sqlpacket(&[
        "--format",
        "json",
        "encode",
        "--seq",
        "7",
        "--max-fragment-len",
        "4",
        "u8:1",
        "u8:2",
        "u8:3",
        "u8:4",
        "u8:5",
    ]);
    let json = json_stdout(&output);

    assert_eq!(json["wire"], "ffffff07010203040100000805");
    assert_eq!(json["next_seq"], 9);
    assert_eq!(json["wire_len"], 13);

    let fragments = json["fragments"].as_array().expect("fragments array");
    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0]["seq"], 7);
    assert_eq!(fragments[0]["payload_len"], 4);
    assert_eq!(fragments[0]["continuation"], true);
    assert_eq!(fragments[1]["seq"], 8);
    assert_eq!(fragments[1]["payload"], "05");
    assert_eq!(fragments[1]["continuation"], false);
}

#[test]
fn encode_typed_values() {
    let output = sqlpacket(&[
        "--format",
        "json",
        "encode",
        "u16:0x0102",
        "lenenc:300",
        "str:db",
        "lenenc-hex:aabb",
    ]);
    let json = json_stdout(&output);

    assert_eq!(json["fragments"][0]["payload"], "0201fc2c0164620002aabb");
}

#[test]
fn raw_format_writes_wire_bytes() {
    let output = sqlpacket(&["--format", "raw", "encode", "--seq", "1", "hex:0e"]);
    assert!(output.status.success());
    assert_eq!(output.stdout, [1, 0, 0, 1, 0x0e]);
}

#[test]
fn invalid_value_exits_with_data_invalid() {
    let output = sqlpacket(&["--format", "json", "encode", "u8:999"]);
    assert_eq!(output.status.code(), Some(60));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("u8:999"), "stderr: {stderr}");
}

#[test]
fn capacity_ceiling_exits_with_allocation_failure() {
    let output = sqlpacket(&[
        "--format",
        "json",
        "encode",
        "--max-capacity",
        "6",
        "fill:3:0",
    ]);
    assert_eq!(output.status.code(), Some(70));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("allocation failed"), "stderr: {stderr}");
}

#[test]
fn huge_fill_respects_capacity_ceiling() {
    let output = sqlpacket(&[
        "--format",
        "json",
        "encode",
        "--max-capacity",
        "64",
        "fill:18446744073709551615:0",
    ]);
    assert_eq!(output.status.code(), Some(70));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
    assert!(stderr.contains("allocation failed"), "stderr: {stderr}");
}

#[test]
fn zero_fragment_len_is_usage_error() {
    let output = sqlpacket(&["encode", "--max-fragment-len", "0"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn version_prints_package_version() {
    let output = sqlpacket(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("sqlpacket {}", env!("CARGO_PKG_VERSION")));
}
