//! CLI integration tests.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn genu() -> Command {
    cargo_bin_cmd!("genu")
}

fn params(json: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

const BASE: &str = r#"{
    "env": "dev",
    "account": "123456789012",
    "region": "us-east-1",
    "modelIds": ["anthropic.claude-3", { "modelId": "us.anthropic.claude-3" }],
    "guardrailEnabled": true
}"#;

#[test]
fn help_lists_subcommands() {
    genu()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("synth"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("arn"))
        .stdout(predicate::str::contains("stream"));
}

#[test]
fn synth_prints_units_in_order() {
    let file = params(BASE);
    genu()
        .args(["synth", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ApplicationInferenceProfileStackdevus-east-1"))
        .stdout(predicate::str::contains("GuardrailStackdev"))
        .stdout(predicate::str::contains("guardrailVersion: DRAFT"));
}

#[test]
fn synth_json_carries_merged_models() {
    let file = params(BASE);
    let output = genu().args(["synth", "--json", "--config"]).arg(file.path()).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let models = report["config"]["modelIds"].as_array().unwrap();
    assert!(models[0]["derivedProfileArn"].is_string());
    assert!(models[1].get("derivedProfileArn").is_none());
    assert_eq!(report["units"].as_array().unwrap().len(), 3);
}

#[test]
fn context_overrides_win_over_the_file() {
    let file = params(BASE);
    genu()
        .args(["plan", "-c", "dashboard=true", "-c", "guardrailEnabled=false", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("guardrail").not());
}

#[test]
fn conflicting_parameters_fail() {
    let file = params(BASE);
    genu()
        .args(["synth", "-c", "agentEnabled=true", "-c", "crossAccountBedrockRoleArn=arn:aws:iam::1:role/x"])
        .arg("--config")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("crossAccountBedrockRoleArn"));
}

#[test]
fn missing_config_file_fails() {
    genu()
        .args(["synth", "--config", "/nonexistent/genu.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load parameters"));
}

#[test]
fn arn_prints_runtime_id() {
    genu()
        .args(["arn", "arn:aws:bedrock-agentcore:us-east-1:123456789012:runtime/abc/def"])
        .assert()
        .success()
        .stdout(predicate::str::contains("service:   bedrock-agentcore"))
        .stdout(predicate::str::contains("runtime:   abc/def"));
}

#[test]
fn malformed_arn_fails() {
    genu().args(["arn", "not-an-arn"]).assert().failure();
}

#[test]
fn stream_decodes_stdin() {
    genu()
        .arg("stream")
        .write_stdin(concat!(
            "data:{\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n",
            "data:{not valid json}\n",
            "data:{\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n",
        ))
        .assert()
        .success()
        .stdout("Hello\n");
}
