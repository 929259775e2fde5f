//! Model Cleanup
//!
//! Prepares a freshly loaded metamodel for emission: deduplicates and renames
//! enumerations, normalizes enumeration values, removes structural-only
//! entities and prunes dependency names that can no longer block ordering.

use std::collections::{BTreeMap, BTreeSet};

use ir::{Enumeration, Interface, MetaModel};
use tracing::{debug, info};

use crate::{CompilerContext, CompilerPhase, PhaseResult};

/// Rename table and denylists applied by [`ModelCleanup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupRules {
    /// Enumeration renames, old name to new name
    pub enum_renames: BTreeMap<String, String>,
    /// Interfaces removed from the model
    pub removed_interfaces: BTreeSet<String>,
    /// Type aliases removed from the model
    pub removed_type_aliases: BTreeSet<String>,
}

impl Default for CleanupRules {
    fn default() -> Self {
        let enum_renames = [("InitializeError", "InitializeErrorCodes")]
            .into_iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();
        let removed_interfaces = [
            "Message",
            "RequestMessage",
            "ResponseMessage",
            "ResponseError",
            "NotificationMessage",
            "LSPObject",
            "T",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        let removed_type_aliases = ["LSPAny"].into_iter().map(String::from).collect();

        Self { enum_renames, removed_interfaces, removed_type_aliases }
    }
}

/// What a cleanup run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Duplicate enumerations dropped
    pub deduplicated_enums: usize,
    /// Enumerations renamed
    pub renamed_enums: usize,
    /// Interfaces removed by the denylist
    pub removed_interfaces: usize,
    /// Type aliases removed by the denylist or as duplicates
    pub removed_type_aliases: usize,
    /// Removed interfaces dropped from `extends` lists
    pub dropped_bases: usize,
    /// Dependency names removed from alias and interface dependency sets
    pub pruned_dependencies: usize,
}

/// The cleanup pass.
#[derive(Debug, Clone, Default)]
pub struct ModelCleanup {
    rules: CleanupRules,
}

impl ModelCleanup {
    /// Create a cleanup pass with the given rules
    pub fn new(rules: CleanupRules) -> Self { Self { rules } }

    /// Clean the model in place.
    pub fn clean(&self, model: &mut MetaModel) -> CleanupReport {
        let mut report = CleanupReport::default();

        // 1) first occurrence of each enumeration wins
        let mut seen = BTreeSet::new();
        let before = model.enumerations.len();
        model.enumerations.retain(|e| seen.insert(e.name.clone()));
        report.deduplicated_enums = before - model.enumerations.len();

        // 2) renames
        for enumeration in &mut model.enumerations {
            if let Some(renamed) = self.rules.enum_renames.get(&enumeration.name) {
                debug!("Renaming enumeration {} to {}", enumeration.name, renamed);
                enumeration.name = renamed.clone();
                report.renamed_enums += 1;
            }
        }

        // 3) value normalization
        for enumeration in &mut model.enumerations {
            normalize_values(enumeration);
        }

        // 4) denylists
        let before = model.interfaces.len();
        model.interfaces.retain(|i| !self.rules.removed_interfaces.contains(&i.name));
        report.removed_interfaces = before - model.interfaces.len();
        for interface in &mut model.interfaces {
            report.dropped_bases += drop_bases(interface, &self.rules.removed_interfaces);
        }

        let before = model.type_aliases.len();
        model.type_aliases.retain(|a| !self.rules.removed_type_aliases.contains(&a.name));

        // 5) an alias colliding with an enumeration or interface loses
        let richer: BTreeSet<String> = model
            .enumerations
            .iter()
            .map(|e| e.name.clone())
            .chain(model.interfaces.iter().map(|i| i.name.clone()))
            .collect();
        model.type_aliases.retain(|a| {
            let keep = !richer.contains(&a.name);
            if !keep {
                debug!("Removing type alias {} shadowed by a richer entity", a.name);
            }
            keep
        });
        report.removed_type_aliases = before - model.type_aliases.len();

        // 6) enumerations never block ordering
        let enum_names: BTreeSet<String> =
            model.enumerations.iter().map(|e| e.name.clone()).collect();
        report.pruned_dependencies += prune(model, |dep| enum_names.contains(dep));

        // 7) dangling names
        let known: BTreeSet<String> = model
            .type_aliases
            .iter()
            .map(|a| a.name.clone())
            .chain(model.interfaces.iter().map(|i| i.name.clone()))
            .collect();
        report.pruned_dependencies += prune(model, |dep| {
            let dangling = !known.contains(dep);
            if dangling {
                debug!("Pruning dangling dependency {}", dep);
            }
            dangling
        });

        info!(
            "Cleanup: {} duplicate enums, {} renamed, {} interfaces and {} aliases removed, \
             {} bases dropped, {} dependencies pruned",
            report.deduplicated_enums,
            report.renamed_enums,
            report.removed_interfaces,
            report.removed_type_aliases,
            report.dropped_bases,
            report.pruned_dependencies
        );
        report
    }
}

impl CompilerPhase for ModelCleanup {
    fn name(&self) -> &str { "cleanup" }

    fn description(&self) -> &str { "Deduplicate, rename and prune the loaded model" }

    fn run(&self, ctx: &mut CompilerContext) -> PhaseResult {
        let report = self.clean(&mut ctx.model);
        ctx.record_stat("deduplicated_enums", report.deduplicated_enums);
        ctx.record_stat("renamed_enums", report.renamed_enums);
        ctx.record_stat("removed_interfaces", report.removed_interfaces);
        ctx.record_stat("removed_type_aliases", report.removed_type_aliases);
        ctx.record_stat("dropped_bases", report.dropped_bases);
        ctx.record_stat("pruned_dependencies", report.pruned_dependencies);
        Ok(())
    }
}

fn normalize_values(enumeration: &mut Enumeration) {
    let is_string = enumeration.is_string();
    for value in &mut enumeration.values {
        value.name = upper_first(&value.name);
        value.value = if is_string {
            value.value.replace(['\'', '"'], "")
        } else {
            upper_first(&value.value)
        };
    }
}

/// Drop removed interfaces from `extends`, children included.
fn drop_bases(interface: &mut Interface, removed: &BTreeSet<String>) -> usize {
    let name = interface.name.clone();
    let before = interface.extends.len();
    interface.extends.retain(|base| {
        let keep = !removed.contains(base);
        if !keep {
            debug!("Dropping removed base {} from {}", base, name);
        }
        keep
    });
    let mut dropped = before - interface.extends.len();
    for child in &mut interface.children {
        dropped += drop_bases(child, removed);
    }
    dropped
}

/// Remove every dependency matching `matches`, returning how many were removed.
fn prune(model: &mut MetaModel, mut matches: impl FnMut(&str) -> bool) -> usize {
    let mut removed = 0;
    let sets = model
        .type_aliases
        .iter_mut()
        .map(|a| &mut a.dependencies)
        .chain(model.interfaces.iter_mut().map(|i| &mut i.dependencies));
    for deps in sets {
        let before = deps.len();
        deps.retain(|dep| !matches(dep.as_str()));
        removed += before - deps.len();
    }
    removed
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_first() {
        assert_eq!(upper_first("plainText"), "PlainText");
        assert_eq!(upper_first("1"), "1");
        assert_eq!(upper_first(""), "");
    }

    #[test]
    fn test_default_rules() {
        let rules = CleanupRules::default();
        assert_eq!(
            rules.enum_renames.get("InitializeError").map(String::as_str),
            Some("InitializeErrorCodes")
        );
        assert_eq!(rules.removed_interfaces.len(), 7);
        assert!(rules.removed_type_aliases.contains("LSPAny"));
    }
}
