use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;
use tagspace_cli::{Cli, Command, load_manifest, parse_manifest, run};
use tempfile::NamedTempFile;

const MANIFEST: &str = r#"[
  { "identity": ["entity/endpoint", "tier/api", "domain/users"],
    "payload": { "id": "get-user", "context": ["http/request"], "deps": ["load-user"] } },
  { "identity": ["entity/function", "domain/users"],
    "payload": { "id": "load-user", "context": ["http/request"], "response": ["user/record"], "deps": ["db"] } },
  { "identity": ["entity/component", "tier/foundation"],
    "payload": { "id": "db" } }
]"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("tagspace").chain(args.iter().copied())).unwrap()
}

#[test]
fn parses_global_flags_and_subcommand() {
    let parsed = cli(&["--config", "t.toml", "-v", "m.json", "order", "--by-data", "a", "b"]);
    assert!(parsed.verbose);
    assert_eq!(parsed.config.as_deref().and_then(|p| p.to_str()), Some("t.toml"));
    assert_eq!(
        parsed.command,
        Command::Order {
            by_data: true,
            ids: vec!["a".into(), "b".into()],
        }
    );
}

#[test]
fn query_requires_tags() {
    assert!(Cli::try_parse_from(["tagspace", "m.json", "query"]).is_err());
}

#[test]
fn payload_defaults_when_omitted() {
    let entries = parse_manifest(r#"[{ "identity": ["a/x", "a/y"] }]"#).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].payload, Default::default());
}

#[test]
fn malformed_manifest_is_rejected() {
    let err = parse_manifest(r#"{ "identity": [] }"#).unwrap_err();
    assert!(err.to_string().contains("Manifest is not a JSON array"));
}

#[test]
fn invalid_entry_names_its_index() {
    let file = write_temp(r#"[{ "identity": ["a/x", "a/y"] }, { "identity": ["a/x"] }]"#);
    let err = load_manifest(file.path()).unwrap_err();
    assert!(err.to_string().contains("Invalid manifest entry 1"), "{err:#}");
}

#[test]
fn check_passes_on_a_consistent_manifest() {
    let manifest = write_temp(MANIFEST);
    let config = write_temp(r#"external_inputs = ["http/request"]"#);
    let args = cli(&[
        "--config",
        config.path().to_str().unwrap(),
        manifest.path().to_str().unwrap(),
        "check",
    ]);

    let outcome = run(&args).unwrap();
    assert!(outcome.success, "{:#}", outcome.output);
    assert_eq!(outcome.output["report"]["valid"], json!(true));
    assert_eq!(outcome.output["anomalies"], json!([]));
}

#[test]
fn check_fails_without_external_inputs() {
    let manifest = write_temp(MANIFEST);
    let outcome = run(&cli(&[manifest.path().to_str().unwrap(), "check"])).unwrap();
    assert!(!outcome.success);

    let violations = outcome.output["report"]["violations"].as_array().unwrap();
    assert_eq!(violations[0]["axiom"], json!("context-satisfiable"));
    assert_eq!(violations[0]["severity"], json!("error"));
    assert_eq!(violations[0]["subjects"], json!(["http/request"]));
}

#[test]
fn query_prints_matching_identities() {
    let manifest = write_temp(MANIFEST);
    let outcome = run(&cli(&[manifest.path().to_str().unwrap(), "query", "domain/users"])).unwrap();
    assert!(outcome.success);
    assert_eq!(
        outcome.output,
        json!([
            ["domain/users", "entity/endpoint", "tier/api"],
            ["domain/users", "entity/function"]
        ])
    );
}

#[test]
fn query_with_an_unqualified_tag_fails() {
    let manifest = write_temp(MANIFEST);
    let err = run(&cli(&[manifest.path().to_str().unwrap(), "query", "users"])).unwrap_err();
    assert!(err.to_string().contains("Invalid query tag"));
}

#[test]
fn stats_counts_tags() {
    let manifest = write_temp(MANIFEST);
    let outcome = run(&cli(&[manifest.path().to_str().unwrap(), "stats"])).unwrap();
    assert_eq!(outcome.output["identities"], json!(3));
    assert_eq!(
        outcome.output["frequency"][0],
        json!({ "aspect": "domain/users", "count": 2 })
    );
    assert_eq!(outcome.output["sizes"][0]["size"], json!(3));
}

#[test]
fn neighbors_suggest_missing_tags() {
    let manifest = write_temp(MANIFEST);
    let outcome = run(&cli(&[
        manifest.path().to_str().unwrap(),
        "neighbors",
        "entity/function",
        "domain/users",
    ]))
    .unwrap();
    assert_eq!(outcome.output["neighbors"].as_array().unwrap().len(), 1);
    assert_eq!(
        outcome.output["suggestions"],
        json!([
            { "aspect": "entity/endpoint", "correlation": 1.0 },
            { "aspect": "tier/api", "correlation": 1.0 }
        ])
    );
}

#[test]
fn order_puts_dependencies_first() {
    let manifest = write_temp(MANIFEST);
    let outcome = run(&cli(&[
        manifest.path().to_str().unwrap(),
        "order",
        "get-user",
        "load-user",
        "db",
    ]))
    .unwrap();
    assert_eq!(outcome.output, json!(["db", "load-user", "get-user"]));
}

#[test]
fn cyclic_order_is_an_error() {
    let manifest = write_temp(
        r#"[
          { "identity": ["entity/component", "a/x"], "payload": { "id": "A", "deps": ["B"] } },
          { "identity": ["entity/component", "a/y"], "payload": { "id": "B", "deps": ["A"] } }
        ]"#,
    );
    let err = run(&cli(&[manifest.path().to_str().unwrap(), "order", "A", "B"])).unwrap_err();
    assert_eq!(
        format!("{err:#}"),
        "Cannot order entities: dependency cycle: A -> B -> A"
    );
}

#[test]
fn missing_manifest_is_an_error() {
    let err = run(&cli(&["/nonexistent/manifest.json", "stats"])).unwrap_err();
    assert!(err.to_string().contains("Failed to read manifest file"));
}
