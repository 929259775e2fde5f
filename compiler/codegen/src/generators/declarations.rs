//! Type declarations artifact
//!
//! Enumerations come first. Aliases and structures follow in dependency
//! order: each ready batch from the resolver is rendered before the next one
//! is released.

use analysis::DependencyResolver;
use ir::{Enumeration, Interface, MetaModel, Node, TypeAlias, TypeKind};
use tracing::debug;

use crate::generators::doc_comment::format_doc_comment;
use crate::generators::property::{materialize_type, render_property, MetadataIndex};
use crate::utils::{indent, render_artifact};
use crate::{CodeGenerator, EmitOptions, Result};

/// Headers the declarations rely on.
const DECLARATION_INCLUDES: &[&str] = &[
    "<nlohmann/json.hpp>",
    "<cstddef>",
    "<memory>",
    "<optional>",
    "<string>",
    "<tuple>",
    "<unordered_map>",
    "<variant>",
    "<vector>",
];

/// Generates the type declarations artifact.
#[derive(Debug, Clone)]
pub struct DeclarationsGenerator {
    options: EmitOptions,
}

impl DeclarationsGenerator {
    /// Create a declarations generator
    pub fn new(options: EmitOptions) -> Self { Self { options } }

    fn render_alias(&self, alias: &mut TypeAlias, index: &MetadataIndex) -> String {
        if self.options.builtin_aliases.contains(&alias.name) {
            debug!("Skipping builtin alias {}", alias.name);
            return String::new();
        }
        materialize_type(&mut alias.ty, index);
        let target = match alias.ty.kind {
            TypeKind::StringLiteral => "std::string",
            _ => alias.ty.value.as_str(),
        };
        format!(
            "\n{}using {} = {};\n",
            format_doc_comment(&alias.documentation, ""),
            alias.name,
            target
        )
    }

    fn render_interface(&self, interface: &mut Interface, index: &MetadataIndex) -> String {
        let extends = if interface.extends.is_empty() {
            String::new()
        } else {
            format!(" : public {}", interface.extends.join(", public "))
        };

        let mut content = String::new();
        for child in &mut interface.children {
            content.push_str(&render_child(child, 1, index));
        }
        let name = interface.name.clone();
        for property in &mut interface.properties {
            content.push_str(&render_property(property, &name, index, &indent(1)));
        }

        format!(
            "\n{}struct {}{} {{\n{}}};\n",
            format_doc_comment(&interface.documentation, ""),
            interface.name,
            extends,
            content
        )
    }
}

fn render_child(child: &mut Interface, depth: usize, index: &MetadataIndex) -> String {
    let name = child.scoped_name();
    let pad = indent(depth);

    let mut content = String::new();
    for nested in &mut child.children {
        content.push_str(&render_child(nested, depth + 1, index));
    }
    for property in &mut child.properties {
        content.push_str(&render_property(property, &name, index, &indent(depth + 1)));
    }

    format!(
        "{}{pad}struct {} {{\n{}{pad}}};\n",
        format_doc_comment(&child.documentation, &pad),
        name,
        content
    )
}

fn render_enumeration(enumeration: &Enumeration) -> String {
    let pad = indent(1);
    let mut content = String::new();
    for value in &enumeration.values {
        content.push_str(&format_doc_comment(&value.documentation, &pad));
        if enumeration.is_string() {
            content.push_str(&format!("{pad}{},\n", value.name));
        } else {
            content.push_str(&format!("{pad}{} = {},\n", value.name, value.value));
        }
    }
    format!(
        "\n{}enum class {} {{\n{}}};\n",
        format_doc_comment(&enumeration.documentation, ""),
        enumeration.name,
        content
    )
}

impl CodeGenerator for DeclarationsGenerator {
    fn artifact(&self) -> &str { &self.options.declarations_file }

    fn generate(&self, model: &MetaModel) -> Result<String> {
        let index = MetadataIndex::from_model(model);
        let mut body = String::new();

        for enumeration in &model.enumerations {
            body.push_str(&render_enumeration(enumeration));
        }

        let nodes: Vec<Node> = model
            .type_aliases
            .iter()
            .cloned()
            .map(Node::from)
            .chain(model.interfaces.iter().cloned().map(Node::from))
            .collect();

        let mut emitted = 0;
        for batch in DependencyResolver::new(nodes) {
            for node in batch? {
                emitted += 1;
                match node {
                    Node::Alias(mut alias) => body.push_str(&self.render_alias(&mut alias, &index)),
                    Node::Interface(mut interface) => {
                        body.push_str(&self.render_interface(&mut interface, &index))
                    }
                }
            }
        }
        debug!("Declared {} enumerations and {} ordered nodes", model.enumerations.len(), emitted);

        let includes: Vec<String> = DECLARATION_INCLUDES.iter().map(|s| s.to_string()).collect();
        Ok(render_artifact(&self.options, &includes, &body))
    }
}
