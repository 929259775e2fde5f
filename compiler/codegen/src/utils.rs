// codegen/src/utils.rs

use crate::EmitOptions;

/// First line of every generated artifact
pub const BANNER: &str = "// File generated by lspgen\n// DO NOT MAKE ANY CHANGES HERE\n";

/// Capitalize the first letter of a string
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Wrap an artifact body in the banner, include list and namespace.
///
/// `includes` are written verbatim, so system headers carry their angle
/// brackets and local headers their quotes.
pub fn render_artifact(options: &EmitOptions, includes: &[String], body: &str) -> String {
    let mut out = String::from(BANNER);
    if let Some(checksum) = &options.checksum {
        out.push_str(&format!("// Model checksum: {checksum}\n"));
    }
    out.push_str("\n#pragma once\n\n");
    for include in includes {
        out.push_str(&format!("#include {include}\n"));
    }
    out.push_str(&format!("\nnamespace {} {{\n{}\n}}\n", options.namespace, body));
    clean_generated_source(&out)
}

/// Trim trailing whitespace from each line and drop trailing blank lines.
/// Always ensures the returned string ends with a single newline when not empty.
pub fn clean_generated_source(src: &str) -> String {
    let mut lines: Vec<String> = src.lines().map(|l| l.trim_end().to_string()).collect();

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}

/// Indentation for a nesting depth.
pub fn indent(depth: usize) -> String { "    ".repeat(depth) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hover"), "Hover");
        assert_eq!(capitalize("logMessage"), "LogMessage");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_clean_generated_source() {
        assert_eq!(clean_generated_source("a  \nb\t\n\n\n"), "a\nb\n");
        assert_eq!(clean_generated_source("\n\n"), "");
    }

    #[test]
    fn test_render_artifact() {
        let options = EmitOptions { checksum: Some("abc".to_string()), ..EmitOptions::default() };
        let text = render_artifact(&options, &["<string>".to_string()], "struct A {};");
        assert!(text.starts_with(BANNER));
        assert!(text.contains("// Model checksum: abc\n"));
        assert!(
            text.contains("#pragma once\n\n#include <string>\n\nnamespace Lsp {\nstruct A {};\n}\n")
        );
    }
}
