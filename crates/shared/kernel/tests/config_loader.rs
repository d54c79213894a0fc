use genu_kernel::config::{ConfigLoader, ContextOverride, Format, load_config, load_config_from_str};
use genu_kernel::params::{ModelEntry, StackInput, resolve};
use std::collections::HashMap;
use std::io::Write;

const BASE: &str = r#"{
    "env": "dev",
    "account": "123456789012",
    "region": "ap-northeast-1",
    "modelRegion": "us-east-1",
    "modelIds": ["anthropic.claude-3", { "modelId": "amazon.nova-pro-v1:0", "region": "us-west-2" }],
    "guardrailEnabled": true
}"#;

#[test]
fn inline_json_resolves() {
    let input: StackInput = ConfigLoader::new()
        .inline(BASE, Format::Json)
        .env_source(HashMap::new().into_iter().collect())
        .load()
        .expect("inline config");

    assert_eq!(input.env.as_deref(), Some("dev"));
    assert_eq!(input.model_ids.as_ref().map(Vec::len), Some(2));
    assert!(matches!(&input.model_ids.as_deref().unwrap()[0], ModelEntry::Id(id) if id == "anthropic.claude-3"));

    let config = resolve(input).unwrap();
    assert_eq!(config.model_ids[0].region, "us-east-1");
    assert_eq!(config.model_ids[1].region, "us-west-2");
    assert!(config.guardrail_enabled);
}

#[test]
fn environment_overrides_the_file() {
    let env: HashMap<String, String> = [
        ("GENU__REGION".to_owned(), "eu-west-1".to_owned()),
        ("GENU__DASHBOARD".to_owned(), "true".to_owned()),
    ]
    .into_iter()
    .collect();

    let input: StackInput = ConfigLoader::new()
        .inline(BASE, Format::Json)
        .env_source(env.into_iter().collect())
        .load()
        .unwrap();

    assert_eq!(input.region.as_deref(), Some("eu-west-1"));
    assert_eq!(input.dashboard, Some(true));
}

#[test]
fn environment_keeps_numeric_looking_strings() {
    let env = [
        ("GENU__ACCOUNT".to_owned(), "000123456789".to_owned()),
        ("GENU__ENV".to_owned(), "01".to_owned()),
    ]
    .into_iter()
    .collect();

    let input: StackInput = ConfigLoader::new()
        .inline(r#"{"region":"us-east-1"}"#, Format::Json)
        .env_source(env)
        .load()
        .unwrap();

    assert_eq!(input.account.as_deref(), Some("000123456789"));
    assert_eq!(input.env.as_deref(), Some("01"));
    assert_eq!(resolve(input).unwrap().account, "000123456789");
}

#[test]
fn context_overrides_win_over_everything() {
    let env = [("GENU__REGION".to_owned(), "eu-west-1".to_owned())].into_iter().collect();
    let overrides: Vec<ContextOverride> = ["region=us-west-2", "agentEnabled=true"]
        .into_iter()
        .map(|raw| raw.parse().unwrap())
        .collect();

    let input: StackInput = ConfigLoader::new()
        .inline(BASE, Format::Json)
        .env_source(env)
        .overrides(overrides)
        .load()
        .unwrap();

    assert_eq!(input.region.as_deref(), Some("us-west-2"));
    assert_eq!(input.agent_enabled, Some(true));
}

#[test]
fn file_format_follows_extension() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        "account = \"123456789012\"\nregion = \"us-east-1\"\nragKnowledgeBaseEnabled = true"
    )
    .unwrap();

    let input: StackInput = load_config(Some(file.path())).expect("toml config");
    assert_eq!(input.rag_knowledge_base_enabled, Some(true));
    assert_eq!(input.region.as_deref(), Some("us-east-1"));
}

#[test]
fn missing_required_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result: Result<StackInput, _> = load_config(Some(dir.path().join("absent.json")));
    assert!(result.is_err());
}

#[test]
fn malformed_source_reports_context() {
    let err = load_config_from_str::<StackInput>("{ not json", Format::Json).unwrap_err();
    assert_eq!(err.context_message(), Some("Failed to build config"));
}
