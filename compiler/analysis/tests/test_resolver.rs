use std::collections::{BTreeMap, BTreeSet};

use ir::{Interface, Node, TypeAlias, TypeRef, TypedNode};
use lspgen_analysis::{resolve_order, DependencyResolver, ResolveError};

fn interface(name: &str, deps: &[&str]) -> Interface {
    let mut interface = Interface::new(name);
    interface.dependencies = deps.iter().map(|d| d.to_string()).collect();
    interface
}

fn alias(name: &str, deps: &[&str]) -> TypeAlias {
    let mut alias = TypeAlias::new(name, TypeRef::base("std::string"));
    alias.dependencies = deps.iter().map(|d| d.to_string()).collect();
    alias
}

fn names<T: TypedNode>(nodes: &[T]) -> Vec<String> {
    nodes.iter().map(|n| n.name().to_string()).collect()
}

#[test]
fn test_every_dependency_is_emitted_first() {
    let nodes = vec![
        interface("Hover", &["MarkupContent", "Range"]),
        interface("Range", &["Position"]),
        interface("Location", &["DocumentUri", "Range"]),
        interface("Position", &[]),
        interface("MarkupContent", &[]),
        interface("DocumentUri", &[]),
    ];
    let original: BTreeMap<String, BTreeSet<String>> =
        nodes.iter().map(|n| (n.name.clone(), n.dependencies.clone())).collect();

    let ordered = resolve_order(nodes).expect("acyclic model");
    let order = names(&ordered);
    assert_eq!(order.len(), 6);

    for (position, name) in order.iter().enumerate() {
        for dep in &original[name] {
            let dep_position = order.iter().position(|n| n == dep).expect("dependency emitted");
            assert!(dep_position < position, "{} emitted before its dependency {}", name, dep);
        }
    }
}

#[test]
fn test_batches_preserve_relative_order() {
    let nodes = vec![
        interface("B", &[]),
        interface("C", &["A"]),
        interface("A", &[]),
        interface("D", &[]),
    ];

    let batches: Vec<Vec<String>> = DependencyResolver::new(nodes)
        .map(|batch| batch.map(|nodes| names(&nodes)))
        .collect::<Result<_, _>>()
        .expect("acyclic model");

    assert_eq!(batches, vec![vec!["B", "A", "D"], vec!["C"]]);
}

#[test]
fn test_self_reference_is_satisfied() {
    let nodes =
        vec![interface("SelectionRange", &["SelectionRange", "Range"]), interface("Range", &[])];
    let ordered = resolve_order(nodes).expect("self reference is not a cycle");
    assert_eq!(names(&ordered), vec!["Range", "SelectionRange"]);
}

#[test]
fn test_mutual_dependency_is_reported() {
    let nodes = vec![
        interface("Position", &[]),
        interface("B", &["A"]),
        interface("A", &["B", "Position"]),
    ];

    match resolve_order(nodes) {
        Err(ResolveError::CyclicDependency { nodes }) => {
            let blocked: Vec<&str> = nodes.iter().map(|n| n.name.as_str()).collect();
            assert_eq!(blocked, vec!["A", "B"]);
            assert_eq!(nodes[0].waiting_on, vec!["B".to_string()]);
            assert_eq!(nodes[1].waiting_on, vec!["A".to_string()]);
        }
        other => panic!("Expected CyclicDependency, got {:?}", other),
    }
}

#[test]
fn test_cycle_message_names_nodes() {
    let err = resolve_order(vec![interface("A", &["B"]), interface("B", &["A"])])
        .expect_err("cycle");
    let message = err.to_string();
    assert!(message.contains("A -> [B]"), "{}", message);
    assert!(message.contains("B -> [A]"), "{}", message);
}

#[test]
fn test_mixed_aliases_and_interfaces() {
    let nodes: Vec<Node> = vec![
        interface("TextDocumentItem", &["DocumentUri"]).into(),
        alias("DocumentUri", &["URI"]).into(),
        alias("URI", &[]).into(),
    ];

    let ordered = resolve_order(nodes).expect("acyclic model");
    assert_eq!(names(&ordered), vec!["URI", "DocumentUri", "TextDocumentItem"]);
    assert!(ordered[2].is_interface());
}

#[test]
fn test_empty_input() {
    let mut resolver = DependencyResolver::<Interface>::new(Vec::new());
    assert_eq!(resolver.remaining(), 0);
    assert!(resolver.next().is_none());
}
