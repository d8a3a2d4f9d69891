//! CLI integration tests for fragdb-codec
//!
//! Tests the binary as a user would interact with it.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn fragdb_codec() -> Command {
    let mut cmd = Command::cargo_bin("fragdb-codec").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_help() {
    fragdb_codec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("structured sub-fields"));
}

#[test]
fn test_version() {
    fragdb_codec()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fragdb-codec"));
}

#[test]
fn test_config_list_kinds() {
    fragdb_codec()
        .args(["config", "list", "kinds"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accords"))
        .stdout(predicate::str::contains("notes_pyramid"))
        .stdout(predicate::str::contains("id_list"));
}

#[test]
fn test_config_list_json() {
    fragdb_codec()
        .args(["config", "list", "columns", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"longevity\": \"voting\""));
}

#[test]
fn test_config_show() {
    fragdb_codec()
        .args(["config", "show", "accords"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accords/v2 (current)"))
        .stdout(predicate::str::contains("accords/v1"));
}

// ============================================================================
// Decode
// ============================================================================

#[test]
fn test_decode_accords_literal() {
    fragdb_codec()
        .args(["decode", "accords", "a24:100;a34:64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"grammar\":\"accords/v2\""))
        .stdout(predicate::str::contains("\"name\":\"woody\""))
        .stdout(predicate::str::contains("\"malformed\":0"));
}

#[test]
fn test_decode_from_stdin() {
    fragdb_codec()
        .args(["decode", "voting"])
        .write_stdin("love:12\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"grammar\":\"voting/v1\""))
        .stdout(predicate::str::contains("\"percent\":12.0"));
}

#[test]
fn test_decode_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "cons(Too sweet,12,3)").unwrap();

    fragdb_codec()
        .args(["decode", "pros_cons"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pros\":[]"))
        .stdout(predicate::str::contains("Too sweet"));
}

#[test]
fn test_decode_with_schema_version() {
    fragdb_codec()
        .args(["decode", "accords", "--schema", "v1", "a24:100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"grammar\":null"))
        .stdout(predicate::str::contains("\"malformed\":1"));
}

#[test]
fn test_decode_malformed_warns() {
    fragdb_codec()
        .args(["decode", "rating", "4.5;lots"])
        .assert()
        .success()
        .stderr(predicate::str::contains("replaced with defaults"));
}

#[test]
fn test_decode_malformed_quiet() {
    fragdb_codec()
        .args(["--quiet", "decode", "rating", "4.5;lots"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_decode_strict_fails() {
    fragdb_codec()
        .args(["decode", "accords", "--strict", "a24:abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 malformed token(s)"));
}

#[test]
fn test_decode_unknown_kind_suggests() {
    fragdb_codec()
        .args(["decode", "ratng", "4;1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("did you mean 'rating'?"));
}

#[test]
fn test_decode_bad_schema_version() {
    fragdb_codec()
        .args(["decode", "rating", "--schema", "v9", "4;1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'v9'"));
}

#[test]
fn test_decode_pretty() {
    fragdb_codec()
        .args(["decode", "rating", "--pretty", "4.5;10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"kind\": \"rating\""));
}

// ============================================================================
// Encode
// ============================================================================

#[test]
fn test_encode_rating() {
    fragdb_codec()
        .args(["encode", "rating", r#"{"average":4.5,"votes":10}"#])
        .assert()
        .success()
        .stdout("4.5;10\n");
}

#[test]
fn test_decode_encode_pipeline() {
    let output = fragdb_codec()
        .args(["decode", "notes", "top(Bergamot,u,img)"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    fragdb_codec()
        .args(["encode", "notes_pyramid"])
        .write_stdin(json["value"].to_string())
        .assert()
        .success()
        .stdout("top(Bergamot,u,img,1,1)\n");
}

#[test]
fn test_encode_invalid_json() {
    fragdb_codec()
        .args(["encode", "id_list", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON value"));
}

// ============================================================================
// Detect
// ============================================================================

#[test]
fn test_detect_legacy_accords() {
    fragdb_codec()
        .args(["detect", "accords", "woody:100:#774414:#FFFFFF"])
        .assert()
        .success()
        .stdout(predicate::str::contains("accords/v1"))
        .stdout(predicate::str::contains("legacy"));
}

#[test]
fn test_detect_json() {
    fragdb_codec()
        .args(["detect", "reminds_of", "--json", "1001:3:1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"grammar\": \"reminds_of/v3\""));
}

#[test]
fn test_detect_nothing_fits() {
    fragdb_codec()
        .args(["detect", "brand", "a;b;c;d"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No brand grammar fits the input"));
}

// ============================================================================
// Rows
// ============================================================================

#[test]
fn test_row() {
    fragdb_codec()
        .args(["row"])
        .write_stdin("name|rating|season\nAventus|4.4;900|spring:40;summer:80\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"column\":\"name\""))
        .stdout(predicate::str::contains("\"decoded\":\"Aventus\""))
        .stdout(predicate::str::contains("\"votes\":900"))
        .stdout(predicate::str::contains("\"summer\""));
}

#[test]
fn test_row_missing_values_line() {
    fragdb_codec()
        .args(["row"])
        .write_stdin("name|rating\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing value line"));
}

// ============================================================================
// Reference tables and input limits
// ============================================================================

#[test]
fn test_references_file_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[accords.a24]\nname = \"dark woods\"").unwrap();

    fragdb_codec()
        .args(["decode", "accords", "a24:100", "--references"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("dark woods"));
}

#[test]
fn test_references_strict_setting() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[settings]\nstrict = true").unwrap();

    fragdb_codec()
        .args(["decode", "rating", "4.5;lots", "--references"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 malformed token(s)"));
}

#[test]
fn test_references_bad_column_kind() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[columns]\nmood = \"votng\"").unwrap();

    fragdb_codec()
        .args(["config", "list", "--references"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("did you mean 'voting'?"));
}

#[test]
fn test_max_size_limit() {
    fragdb_codec()
        .args(["--max-size", "4", "decode", "ids"])
        .write_stdin("1;2;3;4;5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds maximum"));
}

#[test]
fn test_max_size_force() {
    fragdb_codec()
        .args(["--max-size", "4", "--force", "decode", "ids"])
        .write_stdin("1;2;3;4;5")
        .assert()
        .success()
        .stdout(predicate::str::contains("[1,2,3,4,5]"));
}
