//! Model Validation
//!
//! Reports anomalies that ordering and flattening tolerate but that usually
//! point at a broken model. Findings are warnings unless the validator runs
//! in strict mode, where they become errors and stop the pipeline.

use std::collections::BTreeSet;

use ir::{Interface, MetaModel, TypeKind, TypeRef};
use tracing::{error, warn};

use crate::{CompilerContext, CompilerPhase, InterfaceFlattener, PhaseError, PhaseResult};

/// Model validator
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelValidator {
    strict: bool,
}

impl ModelValidator {
    /// Create a warn-only validator
    pub fn new() -> Self { Self { strict: false } }

    /// Create a validator that fails on any finding
    pub fn strict() -> Self { Self { strict: true } }

    /// Validate a model and return the findings
    pub fn validate(&self, model: &MetaModel) -> Vec<String> {
        let mut warnings = Vec::new();

        // 1) Unique interface names
        let mut seen = BTreeSet::new();
        for interface in &model.interfaces {
            if !seen.insert(interface.name.as_str()) {
                warnings.push(format!("Duplicate interface name: {}", interface.name));
            }
        }

        // 2) Per-interface checks
        let flattener = InterfaceFlattener::new(&model.interfaces);
        for interface in &model.interfaces {
            for base in &interface.extends {
                if flattener.get(base).is_none() {
                    warnings.push(format!(
                        "Interface `{}` extends unknown interface `{}`",
                        interface.name, base
                    ));
                }
            }

            let mut fields = BTreeSet::new();
            for field in flattener.flatten(interface) {
                if !fields.insert(field.clone()) {
                    warnings.push(format!(
                        "Interface `{}` has duplicate flattened field `{}`",
                        interface.name, field
                    ));
                }
            }

            self.validate_properties(interface, &interface.name, &mut warnings);
        }

        // 3) Aliases
        for alias in &model.type_aliases {
            if is_empty_type(&alias.ty) {
                warnings.push(format!("Type alias `{}` has an empty type expression", alias.name));
            }
        }

        warnings
    }

    fn validate_properties(&self, interface: &Interface, path: &str, warnings: &mut Vec<String>) {
        for property in &interface.properties {
            if is_empty_type(&property.ty) {
                warnings.push(format!(
                    "Property `{}::{}` has an empty type expression",
                    path,
                    property.field_name()
                ));
            }
        }
        for child in &interface.children {
            let child_path = format!("{}::{}", path, child.scoped_name());
            self.validate_properties(child, &child_path, warnings);
        }
    }
}

fn is_empty_type(ty: &TypeRef) -> bool {
    match ty.kind {
        TypeKind::Or => ty.items.is_empty() && ty.value.trim().is_empty(),
        // an empty literal is a valid literal
        TypeKind::StringLiteral => false,
        _ => ty.value.trim().is_empty(),
    }
}

impl CompilerPhase for ModelValidator {
    fn name(&self) -> &str { "validation" }

    fn description(&self) -> &str { "Report model anomalies" }

    fn run(&self, ctx: &mut CompilerContext) -> PhaseResult {
        let findings = self.validate(&ctx.model);

        if self.strict {
            ctx.record_stat("model_validation_errors", findings.len());
            let count = findings.len();
            for finding in findings {
                error!("{}", finding);
                ctx.add_error(finding);
            }
            if count > 0 {
                return Err(PhaseError::Validation { count });
            }
            return Ok(());
        }

        ctx.record_stat("model_validation_warnings", findings.len());
        for finding in findings {
            warn!("{}", finding);
            ctx.add_warning(finding);
        }
        Ok(())
    }
}
