//! Legacy flat model
//!
//! Loaders for older protocol versions produce a flatter schema: every
//! type expression is a plain string, literals are recognized by their single
//! quotes, documentation arrives as ready-made comment blocks and enumerations
//! carry an `isString` flag. This module converts that schema into a
//! [`MetaModel`] so both feed the same generator.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    Enumeration, EnumerationKind, EnumerationValue, Interface, MetaModel, Notification, Property,
    Request, Result, TypeAlias, TypeRef,
};

/// The flat model written by legacy loaders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyModel {
    /// Enumerations
    #[serde(default)]
    pub enumerations: Vec<LegacyEnumeration>,
    /// Type aliases
    #[serde(default)]
    pub types: Vec<LegacyType>,
    /// Interfaces
    #[serde(default)]
    pub interfaces: Vec<LegacyInterface>,
    /// Requests
    #[serde(default)]
    pub requests: Vec<LegacyRequest>,
    /// Notifications
    #[serde(default)]
    pub notifications: Vec<LegacyNotification>,
}

/// Legacy enumeration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEnumeration {
    /// Name
    pub name: String,
    /// Comment block
    #[serde(default)]
    pub comment: String,
    /// Whether values are string literals
    #[serde(default)]
    pub is_string: bool,
    /// Values
    #[serde(default)]
    pub values: Vec<LegacyEnumerationValue>,
}

/// Legacy enumeration value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEnumerationValue {
    /// Name
    pub name: String,
    /// Value text, quoted for string enumerations
    pub value: String,
    /// Comment block
    #[serde(default)]
    pub comment: String,
}

/// Legacy type alias.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyType {
    /// Name
    pub name: String,
    /// Comment block
    #[serde(default)]
    pub comment: String,
    /// Rendered type expression
    pub data_type: String,
    /// Referenced entity names
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Legacy interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyInterface {
    /// Name
    pub name: String,
    /// Comment block
    #[serde(default)]
    pub comment: String,
    /// Extended interfaces
    #[serde(default)]
    pub extends: Vec<String>,
    /// Fields
    #[serde(default)]
    pub properties: Vec<LegacyProperty>,
    /// Nested structures
    #[serde(default)]
    pub children: Vec<LegacyInterface>,
    /// Referenced entity names
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Legacy property.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProperty {
    /// Raw name (`readonly kind`, `range?`)
    pub name: String,
    /// Rendered type expression, or a single-quoted literal
    pub data_type: String,
    /// Comment block
    #[serde(default)]
    pub comment: String,
}

/// Legacy request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRequest {
    /// Method name
    pub method: String,
    /// Params type, empty when absent
    #[serde(default)]
    pub params: String,
    /// Result type, empty when absent
    #[serde(default)]
    pub result: String,
    /// Error type, empty when absent
    #[serde(default)]
    pub error: String,
}

/// Legacy notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyNotification {
    /// Method name
    pub method: String,
    /// Params type, empty when absent
    #[serde(default)]
    pub params: String,
}

impl LegacyModel {
    /// Load a legacy model from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&content)?;
        Ok(model)
    }
}

impl From<LegacyModel> for MetaModel {
    fn from(legacy: LegacyModel) -> Self {
        MetaModel {
            enumerations: legacy.enumerations.into_iter().map(Enumeration::from).collect(),
            type_aliases: legacy.types.into_iter().map(TypeAlias::from).collect(),
            interfaces: legacy.interfaces.into_iter().map(Interface::from).collect(),
            requests: legacy.requests.into_iter().map(Request::from).collect(),
            notifications: legacy.notifications.into_iter().map(Notification::from).collect(),
        }
    }
}

impl From<LegacyEnumeration> for Enumeration {
    fn from(legacy: LegacyEnumeration) -> Self {
        Enumeration {
            name: legacy.name,
            documentation: strip_comment(&legacy.comment),
            kind: if legacy.is_string { EnumerationKind::String } else { EnumerationKind::Integer },
            values: legacy
                .values
                .into_iter()
                .map(|value| EnumerationValue {
                    name: value.name,
                    value: value.value,
                    documentation: strip_comment(&value.comment),
                })
                .collect(),
            since: None,
            deprecated: None,
        }
    }
}

impl From<LegacyType> for TypeAlias {
    fn from(legacy: LegacyType) -> Self {
        TypeAlias {
            name: legacy.name,
            documentation: strip_comment(&legacy.comment),
            ty: parse_type(&legacy.data_type),
            dependencies: legacy.dependencies.into_iter().collect(),
            since: None,
            deprecated: None,
        }
    }
}

impl From<LegacyInterface> for Interface {
    fn from(legacy: LegacyInterface) -> Self {
        Interface {
            name: legacy.name,
            documentation: strip_comment(&legacy.comment),
            extends: legacy.extends,
            properties: legacy
                .properties
                .into_iter()
                .map(|property| Property {
                    name: property.name,
                    documentation: strip_comment(&property.comment),
                    ty: parse_type(&property.data_type),
                })
                .collect(),
            children: legacy.children.into_iter().map(Interface::from).collect(),
            dependencies: legacy.dependencies.into_iter().collect::<BTreeSet<_>>(),
            since: None,
            deprecated: None,
        }
    }
}

impl From<LegacyRequest> for Request {
    fn from(legacy: LegacyRequest) -> Self {
        Request {
            method: legacy.method,
            params: non_empty(legacy.params),
            result: non_empty(legacy.result),
            error: non_empty(legacy.error),
            documentation: String::new(),
        }
    }
}

impl From<LegacyNotification> for Notification {
    fn from(legacy: LegacyNotification) -> Self {
        Notification {
            method: legacy.method,
            params: non_empty(legacy.params),
            documentation: String::new(),
        }
    }
}

/// Classify a legacy type string.
fn parse_type(data_type: &str) -> TypeRef {
    let data_type = data_type.trim();
    if let Some(literal) = data_type.strip_prefix('\'') {
        return TypeRef::string_literal(literal.trim_end_matches('\''));
    }
    if !data_type.is_empty() && data_type.chars().all(|c| c.is_alphanumeric() || c == '_') {
        TypeRef::reference(data_type)
    } else {
        TypeRef::base(data_type)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Turn a `/** ... */` or `//` comment block back into plain text.
fn strip_comment(comment: &str) -> String {
    let mut lines = Vec::new();
    for line in comment.lines() {
        let line = line.trim();
        let line = line.strip_prefix("/**").unwrap_or(line);
        let line = line.strip_suffix("*/").unwrap_or(line);
        let line = line.strip_prefix("//").unwrap_or(line);
        let line = line.strip_prefix('*').unwrap_or(line);
        lines.push(line.trim().to_string());
    }

    while matches!(lines.first(), Some(line) if line.is_empty()) {
        lines.remove(0);
    }
    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeKind;

    #[test]
    fn test_parse_type() {
        let literal = parse_type("'create'");
        assert_eq!(literal.kind, TypeKind::StringLiteral);
        assert_eq!(literal.value, "create");

        let reference = parse_type("Range");
        assert_eq!(reference.kind, TypeKind::Reference);

        let base = parse_type("std::vector<TextEdit>");
        assert_eq!(base.kind, TypeKind::Base);
        assert_eq!(base.value, "std::vector<TextEdit>");
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(
            strip_comment("/**\n * The range.\n *\n * @since 3.16.0\n */\n"),
            "The range.\n\n@since 3.16.0"
        );
        assert_eq!(strip_comment("// Defined by JSON RPC\n"), "Defined by JSON RPC");
        assert_eq!(strip_comment("/** @deprecated use other */"), "@deprecated use other");
        assert_eq!(strip_comment(""), "");
    }

    #[test]
    fn test_request_defaults() {
        let request = Request::from(LegacyRequest {
            method: "shutdown".to_string(),
            params: String::new(),
            result: String::new(),
            error: "ResponseError".to_string(),
        });
        assert_eq!(request.params, None);
        assert_eq!(request.result, None);
        assert_eq!(request.error.as_deref(), Some("ResponseError"));
    }
}
