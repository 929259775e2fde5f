use std::fs;
use std::path::Path;

use config::{Config, ModelSchema};
use ir::{Interface, MetaModel, Notification, Property, Request, TypeAlias, TypeRef};
use pipeline::{emission_order, run, GenerationContext};
use tempfile::TempDir;

fn interface(name: &str, properties: Vec<Property>, deps: &[&str]) -> Interface {
    let mut interface = Interface::new(name);
    interface.properties = properties;
    interface.dependencies = deps.iter().map(|d| d.to_string()).collect();
    interface
}

fn sample_model() -> MetaModel {
    MetaModel {
        type_aliases: vec![
            TypeAlias::new("DocumentUri", TypeRef::base("std::string")),
            TypeAlias::new("LSPAny", TypeRef::base("json")),
        ],
        interfaces: vec![
            interface(
                "Range",
                vec![
                    Property::new("start", TypeRef::reference("Position")),
                    Property::new("end", TypeRef::reference("Position")),
                ],
                &["Position"],
            ),
            interface(
                "Position",
                vec![
                    Property::new("line", TypeRef::base("unsigned int")),
                    Property::new("character", TypeRef::base("unsigned int")),
                ],
                &[],
            ),
            interface("RequestMessage", vec![], &[]),
            interface(
                "HoverParams",
                vec![
                    Property::new("textDocument", TypeRef::reference("DocumentUri")),
                    Property::new("position", TypeRef::reference("Position")),
                ],
                &["DocumentUri", "Position", "LSPAny"],
            ),
        ],
        requests: vec![Request {
            method: "textDocument/hover".to_string(),
            params: Some("HoverParams".to_string()),
            result: Some("Range".to_string()),
            error: None,
            documentation: String::new(),
        }],
        notifications: vec![Notification {
            method: "$/cancelRequest".to_string(),
            params: None,
            documentation: String::new(),
        }],
        ..MetaModel::default()
    }
}

fn context_for(model: &MetaModel, dir: &TempDir) -> GenerationContext {
    let model_path = dir.path().join("model.json");
    model.to_file(&model_path).expect("Failed to write model");

    let mut config = Config::default();
    config.model.path = model_path;
    config.output.dir = dir.path().join("out");
    GenerationContext::from_config(&config)
}

fn read(path: &Path) -> String { fs::read_to_string(path).expect("Failed to read artifact") }

#[test]
fn test_run_writes_all_artifacts() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let ctx = context_for(&sample_model(), &dir);

    let report = run(&ctx).expect("run");
    assert!(report.is_success(), "failures: {:?}", report.failed);
    assert_eq!(report.written.len(), 4);
    assert_eq!(report.checksum.len(), 64);

    let declarations = read(&ctx.artifact_path("types.h"));
    assert!(declarations.starts_with("// File generated by lspgen"));
    assert!(declarations.contains(&format!("// Model checksum: {}", report.checksum)));
    let position = declarations.find("struct Position").expect("Position declared");
    let range = declarations.find("struct Range").expect("Range declared");
    assert!(position < range);

    // removed entities appear in no artifact
    for artifact in ["types.h", "types_json.h", "notifications.h", "requests.h"] {
        let text = read(&ctx.artifact_path(artifact));
        assert!(!text.contains("RequestMessage {"), "{} mentions RequestMessage", artifact);
        assert!(!text.contains("LSPAny"), "{} mentions LSPAny", artifact);
    }
}

#[test]
fn test_run_is_deterministic() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let ctx = context_for(&sample_model(), &dir);

    run(&ctx).expect("first run");
    let first: Vec<String> = ["types.h", "types_json.h", "notifications.h", "requests.h"]
        .iter()
        .map(|a| read(&ctx.artifact_path(a)))
        .collect();

    run(&ctx).expect("second run");
    for (artifact, before) in ["types.h", "types_json.h", "notifications.h", "requests.h"]
        .iter()
        .zip(first)
    {
        assert_eq!(read(&ctx.artifact_path(artifact)), before, "{} changed", artifact);
    }
}

#[test]
fn test_cycle_fails_only_declarations() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let mut model = sample_model();
    model.interfaces.push(interface("A", vec![], &["B"]));
    model.interfaces.push(interface("B", vec![], &["A"]));
    let ctx = context_for(&model, &dir);

    let report = run(&ctx).expect("run");
    assert!(!report.is_success());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].artifact, "types.h");
    assert!(report.failed[0].error.contains("cyclic dependency"));
    assert!(!ctx.artifact_path("types.h").exists());
    assert!(ctx.artifact_path("requests.h").exists());
    assert!(ctx.artifact_path("notifications.h").exists());
}

#[test]
fn test_unwritable_artifact_is_skipped() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let ctx = context_for(&sample_model(), &dir);
    fs::create_dir_all(ctx.artifact_path("types_json.h")).expect("Failed to create blocker");

    let report = run(&ctx).expect("run");
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].artifact, "types_json.h");
    assert_eq!(report.written.len(), 3);
    assert!(ctx.artifact_path("types.h").is_file());
}

#[test]
fn test_missing_model_is_an_error() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let mut config = Config::default();
    config.model.path = dir.path().join("absent.json");
    config.output.dir = dir.path().join("out");

    let result = run(&GenerationContext::from_config(&config));
    assert!(matches!(result, Err(pipeline::PipelineError::Model(_))));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_strict_run_stops_before_writing() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let mut model = sample_model();
    model.interfaces[0].extends.push("Unknown".to_string());
    let mut ctx = context_for(&model, &dir);

    // warn-only by default
    let report = run(&ctx).expect("run");
    assert!(report.is_success());
    assert_eq!(report.warnings, vec!["Interface `Range` extends unknown interface `Unknown`"]);

    fs::remove_dir_all(&ctx.output_dir).expect("Failed to clear output");
    ctx.strict = true;
    let result = run(&ctx);
    assert!(matches!(
        result,
        Err(pipeline::PipelineError::Phase(analysis::PhaseError::Validation { count: 1 }))
    ));
    assert!(!ctx.output_dir.exists());
}

#[test]
fn test_emission_order() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let ctx = context_for(&sample_model(), &dir);

    let order = emission_order(&ctx).expect("order");
    let index = |name: &str| order.iter().position(|n| n == name).expect(name);
    assert!(!order.iter().any(|n| n == "LSPAny" || n == "RequestMessage"));
    assert!(index("Position") < index("Range"));
    assert!(index("DocumentUri") < index("HoverParams"));
    assert!(index("Position") < index("HoverParams"));
}

#[test]
fn test_legacy_model() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let model_path = dir.path().join("legacy.json");
    fs::write(
        &model_path,
        r#"{
  "enumerations": [
    { "name": "InitializeError", "isString": false, "values": [{ "name": "unknownProtocolVersion", "value": "1" }] }
  ],
  "types": [],
  "interfaces": [
    { "name": "Position", "properties": [{ "name": "line", "dataType": "unsigned int" }] }
  ],
  "requests": [],
  "notifications": [{ "method": "window/logMessage", "params": "" }]
}"#,
    )
    .expect("Failed to write legacy model");

    let mut config = Config::default();
    config.model.path = model_path;
    config.model.schema = ModelSchema::Legacy;
    config.output.dir = dir.path().join("out");
    let ctx = GenerationContext::from_config(&config);

    let report = run(&ctx).expect("run");
    assert!(report.is_success());
    let declarations = read(&ctx.artifact_path("types.h"));
    assert!(declarations.contains("enum class InitializeErrorCodes"));
    assert!(declarations.contains("struct Position"));
}
