//! Documentation blocks for generated declarations

use std::fmt::Write;

/// Escape text that would terminate a block comment early.
pub fn sanitize_doc_line(line: &str) -> String { line.trim_end().replace("*/", "* /") }

/// Render `text` as a `/** ... */` block at the given indentation.
///
/// Returns an empty string for blank documentation.
pub fn format_doc_comment(text: &str, indent: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    let (Some(start), Some(end)) = (start, end) else {
        return String::new();
    };

    let mut doc = String::new();
    let _ = writeln!(doc, "{indent}/**");
    for line in &lines[start..=end] {
        let sanitized = sanitize_doc_line(line);
        if sanitized.trim().is_empty() {
            let _ = writeln!(doc, "{indent} *");
        } else {
            let _ = writeln!(doc, "{indent} * {sanitized}");
        }
    }
    let _ = writeln!(doc, "{indent} */");
    doc
}
