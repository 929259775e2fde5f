//! Metamodel entities
//!
//! This module defines the entities the generator consumes. Type expressions
//! are kept in two forms at once: the rendered target text (`TypeRef::value`)
//! and, for unions and literal sets, the structured alternatives
//! (`TypeRef::items`) that the generator may reorder.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker appended to a property or child structure name when it is optional.
pub const OPTIONAL_MARKER: char = '?';

/// Prefix older protocol versions put in front of immutable property names.
pub const READONLY_PREFIX: &str = "readonly ";

/// Errors raised while loading or saving a model file.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Underlying I/O error while reading or writing the model file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The model file is not valid JSON for the expected schema.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convenient result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// The complete metamodel handed over by the loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaModel {
    /// Enumerations, in model order (may contain duplicates)
    #[serde(default)]
    pub enumerations: Vec<Enumeration>,
    /// Named type aliases
    #[serde(default)]
    pub type_aliases: Vec<TypeAlias>,
    /// Top-level structures
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    /// Request descriptors
    #[serde(default)]
    pub requests: Vec<Request>,
    /// Notification descriptors
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// Backing representation of an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnumerationKind {
    /// Values are string literals on the wire
    String,
    /// Values are signed integers
    Integer,
    /// Values are unsigned integers
    Uinteger,
}

/// An enumeration and its values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enumeration {
    /// Enumeration name
    pub name: String,
    /// Documentation text
    #[serde(default)]
    pub documentation: String,
    /// String- or integer-backed
    pub kind: EnumerationKind,
    /// Values in declaration order
    #[serde(default)]
    pub values: Vec<EnumerationValue>,
    /// Version tag at which the enumeration was introduced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Deprecation message, if deprecated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

/// A single enumeration value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumerationValue {
    /// Symbolic name of the enumerator
    pub name: String,
    /// Literal (string-backed) or numeric/symbolic (integer-backed) value as text
    pub value: String,
    /// Documentation text
    #[serde(default)]
    pub documentation: String,
}

/// Kind of a type expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    /// Built-in type of the target (`bool`, `std::string`, ...)
    Base,
    /// Reference to a named entity of the model
    Reference,
    /// Sequence of another type
    Array,
    /// Key/value mapping
    Map,
    /// Fixed-size tuple
    Tuple,
    /// One of several alternatives (`items`)
    Or,
    /// A quoted string literal
    StringLiteral,
}

/// A type expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    /// Expression kind
    pub kind: TypeKind,
    /// Rendered target text; for a reference the referenced entity name,
    /// for a literal the unquoted literal
    pub value: String,
    /// Alternatives of a union, or literal siblings of a literal
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TypeRef>,
    /// Version tag at which this alternative was introduced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Deprecation message, if deprecated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

impl TypeRef {
    fn new(kind: TypeKind, value: impl Into<String>) -> Self {
        Self { kind, value: value.into(), items: Vec::new(), since: None, deprecated: None }
    }

    /// A built-in target type.
    pub fn base(value: impl Into<String>) -> Self { Self::new(TypeKind::Base, value) }

    /// A reference to a named entity.
    pub fn reference(name: impl Into<String>) -> Self { Self::new(TypeKind::Reference, name) }

    /// A string literal; `value` is the unquoted literal.
    pub fn string_literal(value: impl Into<String>) -> Self {
        Self::new(TypeKind::StringLiteral, value)
    }

    /// A union over `items`. The rendered value is filled in by the generator.
    pub fn or(items: Vec<TypeRef>) -> Self {
        let value = items.iter().map(|item| item.value.as_str()).collect::<Vec<_>>().join(" | ");
        Self { kind: TypeKind::Or, value, items, since: None, deprecated: None }
    }

    /// Set the version tag.
    pub fn with_since(mut self, since: impl Into<String>) -> Self {
        self.since = Some(since.into());
        self
    }

    /// Mark as deprecated.
    pub fn with_deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecated = Some(message.into());
        self
    }
}

/// A field of an interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Field name, possibly carrying [`OPTIONAL_MARKER`] or [`READONLY_PREFIX`]
    pub name: String,
    /// Documentation text
    #[serde(default)]
    pub documentation: String,
    /// Type expression
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

impl Property {
    /// Create a property from a raw name and type expression.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self { name: name.into(), documentation: String::new(), ty }
    }

    /// Whether the raw name carries the optionality marker.
    pub fn is_optional(&self) -> bool { self.name.contains(OPTIONAL_MARKER) }

    /// The field name with every marker removed.
    pub fn field_name(&self) -> String { strip_markers(&self.name) }
}

/// A named alias of a type expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAlias {
    /// Alias name
    pub name: String,
    /// Documentation text
    #[serde(default)]
    pub documentation: String,
    /// Underlying type expression
    #[serde(rename = "type")]
    pub ty: TypeRef,
    /// Names of entities referenced by the expression
    #[serde(default)]
    pub dependencies: BTreeSet<String>,
    /// Version tag at which the alias was introduced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Deprecation message, if deprecated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

impl TypeAlias {
    /// Create an alias without dependencies.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            documentation: String::new(),
            ty,
            dependencies: BTreeSet::new(),
            since: None,
            deprecated: None,
        }
    }
}

/// A structure, possibly extending others and nesting anonymous children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    /// Structure name; nested children may carry [`OPTIONAL_MARKER`]
    pub name: String,
    /// Documentation text
    #[serde(default)]
    pub documentation: String,
    /// Extended interfaces, in declaration order
    #[serde(default)]
    pub extends: Vec<String>,
    /// Own fields, in declaration order
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Nested anonymous structures
    #[serde(default)]
    pub children: Vec<Interface>,
    /// Names of entities this structure needs declared first
    #[serde(default)]
    pub dependencies: BTreeSet<String>,
    /// Version tag at which the structure was introduced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Deprecation message, if deprecated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<String>,
}

impl Interface {
    /// Create an empty interface.
    pub fn new(name: impl Into<String>) -> Self { Self { name: name.into(), ..Self::default() } }

    /// The declared name with the optionality marker removed.
    pub fn scoped_name(&self) -> String { strip_markers(&self.name) }
}

/// A request descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Dotted method name (`textDocument/hover`)
    pub method: String,
    /// Params type, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    /// Result type, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// Error data type, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Documentation text
    #[serde(default)]
    pub documentation: String,
}

/// A notification descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Dotted method name (`window/logMessage`)
    pub method: String,
    /// Params type, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
    /// Documentation text
    #[serde(default)]
    pub documentation: String,
}

impl Enumeration {
    /// Whether values are encoded as strings on the wire.
    pub fn is_string(&self) -> bool { self.kind == EnumerationKind::String }
}

impl MetaModel {
    /// Load a model from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&content)?;
        Ok(model)
    }

    /// Save the model to a JSON file with pretty formatting
    pub fn to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        // Ensure file ends with a newline (POSIX standard)
        use std::io::Write;
        writeln!(file)?;
        Ok(())
    }

    /// Names of all enumerations, in model order.
    pub fn enumeration_names(&self) -> Vec<&str> {
        self.enumerations.iter().map(|e| e.name.as_str()).collect()
    }

    /// Find a top-level interface by name.
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Total number of entities, excluding method descriptors.
    pub fn entity_count(&self) -> usize {
        self.enumerations.len() + self.type_aliases.len() + self.interfaces.len()
    }
}

/// Remove the readonly prefix and every optionality marker from a raw name.
pub fn strip_markers(name: &str) -> String {
    name.trim_start_matches(READONLY_PREFIX).replace(OPTIONAL_MARKER, "")
}
