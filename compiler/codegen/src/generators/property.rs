//! Property materialization
//!
//! Decides how a single field is declared: owned pointer for a structure that
//! contains itself, compile-time string constant for a literal, optional for
//! a field carrying the optionality marker, plain value otherwise. Unions are
//! rendered as `std::variant` with their alternatives reordered so the
//! preferred alternative comes first.

use std::collections::BTreeMap;

use ir::{MetaModel, Property, TypeKind, TypeRef, Versioned};
use types::ProtocolVersion;

use crate::generators::doc_comment::format_doc_comment;

/// Ordering key of a union alternative.
///
/// Non-deprecated alternatives sort first, then ascending introduction
/// version with untagged alternatives before tagged ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnionKey {
    /// Whether the alternative is deprecated
    pub deprecated: bool,
    /// Version at which it was introduced
    pub since: Option<ProtocolVersion>,
}

impl UnionKey {
    fn of(entity: &impl Versioned) -> Self {
        Self { deprecated: entity.is_deprecated(), since: entity.since_version() }
    }
}

/// Version metadata of every named entity, built once per run.
#[derive(Debug, Clone, Default)]
pub struct MetadataIndex {
    entries: BTreeMap<String, UnionKey>,
}

impl MetadataIndex {
    /// Index enumerations, aliases and interfaces. The first entity of a
    /// given name wins.
    pub fn from_model(model: &MetaModel) -> Self {
        let mut entries = BTreeMap::new();
        for (name, key) in model
            .enumerations
            .iter()
            .map(|e| (&e.name, UnionKey::of(e)))
            .chain(model.type_aliases.iter().map(|a| (&a.name, UnionKey::of(a))))
            .chain(model.interfaces.iter().map(|i| (&i.name, UnionKey::of(i))))
        {
            entries.entry(name.clone()).or_insert(key);
        }
        Self { entries }
    }

    /// Key of a union alternative. A reference uses the referenced entity's
    /// metadata when the entity is known.
    pub fn key_of(&self, ty: &TypeRef) -> UnionKey {
        if ty.kind == TypeKind::Reference {
            if let Some(key) = self.entries.get(&ty.value) {
                return key.clone();
            }
        }
        UnionKey::of(ty)
    }

    /// Number of indexed entities.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// Rewrite a type expression in place into its final target rendering.
///
/// Only unions change: nested unions first, then the alternatives are
/// reordered and the value becomes `std::variant<...>`.
pub fn materialize_type(ty: &mut TypeRef, index: &MetadataIndex) {
    if ty.kind != TypeKind::Or || ty.items.is_empty() {
        return;
    }

    for item in &mut ty.items {
        materialize_type(item, index);
    }

    let mut keyed: Vec<(UnionKey, TypeRef)> =
        ty.items.drain(..).map(|item| (index.key_of(&item), item)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    ty.items = keyed.into_iter().map(|(_, item)| item).collect();

    let alternatives: Vec<&str> = ty.items.iter().map(|item| item.value.as_str()).collect();
    ty.value = format!("std::variant<{}>", alternatives.join(", "));
}

/// Materialize `property` of the structure named `enclosing` and render its
/// declaration, documentation included.
pub fn render_property(
    property: &mut Property,
    enclosing: &str,
    index: &MetadataIndex,
    indent: &str,
) -> String {
    materialize_type(&mut property.ty, index);

    let name = property.field_name();
    let ty = &property.ty;

    if ty.kind == TypeKind::StringLiteral && !ty.items.is_empty() {
        let tags: Vec<String> =
            ty.items.iter().map(|item| format!("\"{}\"", escape_literal(&item.value))).collect();
        if !property.documentation.is_empty() {
            property.documentation.push_str("\n\n");
        }
        property.documentation.push_str(&format!("Accepted values: {}", tags.join(", ")));
    }

    let doc = format_doc_comment(&property.documentation, indent);
    let ty = &property.ty;

    let declaration = if ty.kind == TypeKind::StringLiteral {
        format!("static inline const std::string {} = \"{}\";", name, escape_literal(&ty.value))
    } else if ty.value == enclosing {
        format!("std::unique_ptr<{}> {};", ty.value, name)
    } else if property.is_optional() {
        format!("std::optional<{}> {};", ty.value, name)
    } else {
        format!("{} {};", ty.value, name)
    };

    format!("{doc}{indent}{declaration}\n")
}

/// Escape a literal for a C++ string literal.
fn escape_literal(value: &str) -> String { value.replace('\\', "\\\\").replace('"', "\\\"") }
