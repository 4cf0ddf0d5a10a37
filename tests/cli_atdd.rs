#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const VALID_CONFIG: &str = r#"
[model]
id = "claude-3-5-sonnet-latest"
api_key_env = "REPORANK_TEST_MODEL_KEY"

[output]
path = "rankings.csv"

[search]
years_included = 1
languages = ["Rust"]

[[repo_criteria]]
name = "stars"
description = "Stargazers"
data_field = "stargazers_count"
weight = 0.4

[[genai_criteria]]
name = "hasTests"
type = "boolean"
description = "README describes a test suite"
weight = 0.2

[[genai_criteria]]
name = "docsQuality"
type = "integer"
description = "Documentation quality"
weight = 0.3
minimum = 1
maximum = 5

[[genai_criteria]]
name = "summary"
type = "string"
description = "One sentence summary"
"#;

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("reporank.toml");
    fs::write(&path, content).expect("config should write");
    path
}

/// Command isolated from the caller's global config and credentials.
fn reporank(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("reporank").expect("binary should compile");
    cmd.env("HOME", home)
        .env_remove("RUST_LOG")
        .env_remove("REPORANK_TEST_MODEL_KEY");
    cmd
}

#[test]
fn check_accepts_valid_config() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = write_config(dir.path(), VALID_CONFIG);

    reporank(dir.path())
        .arg("check")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "config ok: 1 repo criteria, 3 model criteria (2 ranked), 5 required answer fields",
        ));
}

#[test]
fn check_rejects_inverted_bounds() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = write_config(
        dir.path(),
        r#"
[[genai_criteria]]
name = "docsQuality"
type = "integer"
minimum = 5
maximum = 1
"#,
    );

    reporank(dir.path())
        .arg("check")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid criteria"));
}

#[test]
fn check_reports_missing_config() {
    let dir = TempDir::new().expect("temp dir should be created");

    reporank(dir.path())
        .arg("check")
        .arg("--config")
        .arg(dir.path().join("absent.toml"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn schema_prints_required_fields_and_bounds() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = write_config(dir.path(), VALID_CONFIG);

    let output = reporank(dir.path())
        .arg("schema")
        .arg("--config")
        .arg(&config)
        .output()
        .expect("schema should run");
    assert!(output.status.success());

    let schema: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("schema output should be json");
    assert_eq!(schema["type"], "object");
    assert_eq!(
        schema["required"],
        serde_json::json!(["hasTests", "docsQuality", "summary", "isDeprecated", "serviceNames"])
    );
    assert_eq!(schema["properties"]["docsQuality"]["minimum"], 1);
    assert_eq!(schema["properties"]["docsQuality"]["maximum"], 5);
    assert_eq!(schema["properties"]["serviceNames"]["type"], "array");
}

#[test]
fn rank_fails_without_model_credential() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = write_config(dir.path(), VALID_CONFIG);

    reporank(dir.path())
        .arg("rank")
        .arg("acme")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "missing credential: REPORANK_TEST_MODEL_KEY",
        ));
}

#[test]
fn rank_rejects_zero_concurrency() {
    let dir = TempDir::new().expect("temp dir should be created");
    let config = write_config(dir.path(), VALID_CONFIG);

    reporank(dir.path())
        .arg("rank")
        .arg("acme")
        .arg("--config")
        .arg(&config)
        .arg("--concurrency")
        .arg("0")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("--concurrency must be greater than 0"));
}

#[test]
fn global_config_layer_is_merged() {
    let home = TempDir::new().expect("home dir should be created");
    fs::create_dir_all(home.path().join(".config/reporank")).expect("global dir should create");
    fs::write(
        home.path().join(".config/reporank/config.toml"),
        r#"
[[repo_criteria]]
name = "forks"
data_field = "forks_count"
weight = 0.1
"#,
    )
    .expect("global config should write");

    let dir = TempDir::new().expect("temp dir should be created");
    let config = write_config(
        dir.path(),
        r#"
[[genai_criteria]]
name = "hasTests"
type = "boolean"
"#,
    );

    reporank(home.path())
        .arg("check")
        .arg("--config")
        .arg(&config)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("1 repo criteria, 1 model criteria"));
}
