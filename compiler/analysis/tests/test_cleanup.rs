use ir::{
    Enumeration, EnumerationKind, EnumerationValue, Interface, MetaModel, TypeAlias, TypeRef,
};
use lspgen_analysis::{CleanupRules, CompilerContext, CompilerPhase, ModelCleanup};

fn enumeration(name: &str, kind: EnumerationKind, values: &[(&str, &str)]) -> Enumeration {
    Enumeration {
        name: name.to_string(),
        documentation: String::new(),
        kind,
        values: values
            .iter()
            .map(|(name, value)| EnumerationValue {
                name: name.to_string(),
                value: value.to_string(),
                documentation: String::new(),
            })
            .collect(),
        since: None,
        deprecated: None,
    }
}

fn interface(name: &str, deps: &[&str]) -> Interface {
    let mut interface = Interface::new(name);
    interface.dependencies = deps.iter().map(|d| d.to_string()).collect();
    interface
}

#[test]
fn test_enum_dedup_keeps_first_occurrence() {
    let mut model = MetaModel {
        enumerations: vec![
            enumeration("TraceValues", EnumerationKind::String, &[("off", "'off'")]),
            enumeration("TraceValues", EnumerationKind::String, &[("verbose", "'verbose'")]),
        ],
        ..MetaModel::default()
    };

    let report = ModelCleanup::default().clean(&mut model);
    assert_eq!(report.deduplicated_enums, 1);
    assert_eq!(model.enumerations.len(), 1);
    assert_eq!(model.enumerations[0].values[0].name, "Off");
    assert_eq!(model.enumerations[0].values[0].value, "off");
}

#[test]
fn test_rename_and_value_normalization() {
    let mut model = MetaModel {
        enumerations: vec![
            enumeration(
                "InitializeError",
                EnumerationKind::Integer,
                &[("unknownProtocolVersion", "1")],
            ),
            enumeration(
                "ErrorCodes",
                EnumerationKind::Integer,
                &[("serverNotInitialized", "jsonrpcReservedErrorRangeStart")],
            ),
            enumeration("MarkupKind", EnumerationKind::String, &[("plainText", "\"plaintext\"")]),
        ],
        ..MetaModel::default()
    };

    let report = ModelCleanup::default().clean(&mut model);
    assert_eq!(report.renamed_enums, 1);
    assert_eq!(model.enumerations[0].name, "InitializeErrorCodes");
    assert_eq!(model.enumerations[0].values[0].name, "UnknownProtocolVersion");
    assert_eq!(model.enumerations[0].values[0].value, "1");
    assert_eq!(model.enumerations[1].values[0].value, "JsonrpcReservedErrorRangeStart");
    assert_eq!(model.enumerations[2].values[0].name, "PlainText");
    assert_eq!(model.enumerations[2].values[0].value, "plaintext");
}

#[test]
fn test_denylist_and_duplicate_alias_removal() {
    let mut model = MetaModel {
        enumerations: vec![enumeration("MarkupKind", EnumerationKind::String, &[])],
        type_aliases: vec![
            TypeAlias::new("LSPAny", TypeRef::base("json")),
            TypeAlias::new("MarkupKind", TypeRef::base("std::string")),
            TypeAlias::new("Range", TypeRef::base("std::string")),
            TypeAlias::new("DocumentUri", TypeRef::base("std::string")),
        ],
        interfaces: vec![
            interface("Message", &[]),
            interface("RequestMessage", &["Message"]),
            interface("Range", &[]),
            interface("T", &[]),
        ],
        ..MetaModel::default()
    };

    let report = ModelCleanup::default().clean(&mut model);
    assert_eq!(report.removed_interfaces, 3);
    assert_eq!(report.removed_type_aliases, 3);

    let interfaces: Vec<&str> = model.interfaces.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(interfaces, vec!["Range"]);
    let aliases: Vec<&str> = model.type_aliases.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(aliases, vec!["DocumentUri"]);
}

#[test]
fn test_removed_interfaces_leave_extends_lists() {
    let mut cancel = interface("CancelParams", &["Message"]);
    cancel.extends = vec!["Message".to_string(), "WorkDoneProgressParams".to_string()];
    let mut options = Interface::new("options?");
    options.extends.push("NotificationMessage".to_string());
    cancel.children.push(options);

    let mut model = MetaModel {
        interfaces: vec![
            interface("Message", &[]),
            cancel,
            interface("WorkDoneProgressParams", &[]),
        ],
        ..MetaModel::default()
    };

    let report = ModelCleanup::default().clean(&mut model);
    assert_eq!(report.dropped_bases, 2);

    let cancel = model.interface("CancelParams").expect("CancelParams survives");
    assert_eq!(cancel.extends, vec!["WorkDoneProgressParams".to_string()]);
    assert!(cancel.children[0].extends.is_empty());
    assert!(cancel.dependencies.is_empty());
}

#[test]
fn test_dependency_pruning() {
    let mut hover = interface("Hover", &["MarkupContent", "MarkupKind", "Range", "LSPObject"]);
    hover.dependencies.insert("Hover".to_string());

    let mut model = MetaModel {
        enumerations: vec![enumeration("MarkupKind", EnumerationKind::String, &[])],
        type_aliases: vec![{
            let mut alias = TypeAlias::new("MarkupContent", TypeRef::base("std::string"));
            alias.dependencies.insert("MarkupKind".to_string());
            alias
        }],
        interfaces: vec![hover, interface("Range", &[]), interface("LSPObject", &[])],
        ..MetaModel::default()
    };

    let report = ModelCleanup::default().clean(&mut model);

    let hover = model.interface("Hover").expect("Hover survives");
    let deps: Vec<&str> = hover.dependencies.iter().map(String::as_str).collect();
    assert_eq!(deps, vec!["Hover", "MarkupContent", "Range"]);
    assert!(model.type_aliases[0].dependencies.is_empty());
    assert_eq!(report.pruned_dependencies, 3);
}

#[test]
fn test_custom_rules() {
    let mut rules = CleanupRules::default();
    rules.removed_interfaces.insert("Internal".to_string());
    rules.enum_renames.clear();

    let mut model = MetaModel {
        enumerations: vec![enumeration("InitializeError", EnumerationKind::Integer, &[])],
        interfaces: vec![interface("Internal", &[]), interface("Public", &["Internal"])],
        ..MetaModel::default()
    };

    ModelCleanup::new(rules).clean(&mut model);
    assert_eq!(model.enumerations[0].name, "InitializeError");
    assert_eq!(model.interfaces.len(), 1);
    assert!(model.interfaces[0].dependencies.is_empty());
}

#[test]
fn test_cleanup_phase_records_stats() {
    let model = MetaModel {
        interfaces: vec![interface("ResponseError", &[])],
        ..MetaModel::default()
    };
    let mut ctx = CompilerContext::new(model);

    let phase = ModelCleanup::default();
    phase.run(&mut ctx).expect("cleanup cannot fail");
    assert_eq!(phase.name(), "cleanup");
    assert!(ctx.model.interfaces.is_empty());
    assert_eq!(ctx.diagnostics.stats.get("removed_interfaces"), Some(&1));
}
