//! Serialization bindings artifact

use analysis::InterfaceFlattener;
use ir::{Enumeration, Interface, MetaModel};
use tracing::debug;

use crate::utils::render_artifact;
use crate::{CodeGenerator, EmitOptions, Result};

/// Generates the serialization bindings artifact.
#[derive(Debug, Clone)]
pub struct BindingsGenerator {
    options: EmitOptions,
}

impl BindingsGenerator {
    /// Create a bindings generator
    pub fn new(options: EmitOptions) -> Self { Self { options } }

    fn render_interface(
        &self,
        interface: &Interface,
        parent: &[String],
        flattener: &InterfaceFlattener<'_>,
    ) -> String {
        let mut path = parent.to_vec();
        path.push(interface.scoped_name());
        let scoped = path.join("::");

        if self.options.forward_declared.contains(&interface.scoped_name()) {
            debug!("Forward-declaring bindings of {}", scoped);
            return format!("\nJSONIFY_FWD({scoped})\n");
        }

        let mut out = String::new();
        if parent.is_empty() {
            out.push('\n');
        }
        for child in &interface.children {
            out.push_str(&self.render_interface(child, &path, flattener));
        }

        let fields = flattener.flatten(interface);
        if fields.is_empty() {
            out.push_str(&format!("JSONIFY_EMPTY({scoped})\n"));
        } else {
            out.push_str(&format!("JSONIFY({}, {})\n", scoped, fields.join(", ")));
        }
        out
    }
}

fn render_enumeration(enumeration: &Enumeration) -> String {
    let mut content = String::new();
    for value in &enumeration.values {
        content.push_str(&format!(
            "    {{{}::{}, \"{}\"}},\n",
            enumeration.name, value.name, value.value
        ));
    }
    format!("\nJSONIFY_ENUM( {}, {{\n{}}})\n", enumeration.name, content)
}

impl CodeGenerator for BindingsGenerator {
    fn artifact(&self) -> &str { &self.options.bindings_file }

    fn generate(&self, model: &MetaModel) -> Result<String> {
        let mut body = String::new();
        for enumeration in model.enumerations.iter().filter(|e| e.is_string()) {
            body.push_str(&render_enumeration(enumeration));
        }

        let flattener = InterfaceFlattener::new(&model.interfaces);
        for interface in &model.interfaces {
            body.push_str(&self.render_interface(interface, &[], &flattener));
        }

        let includes =
            vec!["\"json.h\"".to_string(), format!("\"{}\"", self.options.declarations_file)];
        Ok(render_artifact(&self.options, &includes, &body))
    }
}
