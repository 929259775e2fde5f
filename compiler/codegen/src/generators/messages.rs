//! Request and notification wrapper artifacts

use std::collections::BTreeMap;

use ir::MetaModel;
use tracing::warn;

use crate::utils::{capitalize, render_artifact};
use crate::{CodeGenerator, EmitOptions, Result};

/// Leading method segments that do not contribute to the identifier.
pub const METHOD_PREFIXES: &[&str] = &["$", "window", "client", "textDocument"];

/// Type used for an absent params, result or error type.
pub const NULL_TYPE: &str = "std::nullptr_t";

/// Derive a wrapper identifier from a dotted method name.
///
/// `textDocument/hover` becomes `Hover`, `$/cancelRequest` becomes
/// `CancelRequest`, `workspace/didChangeConfiguration` becomes
/// `WorkspaceDidChangeConfiguration`.
pub fn method_to_name(method: &str) -> String {
    let mut segments: Vec<&str> = method.split('/').collect();
    if segments.len() > 1 && METHOD_PREFIXES.contains(&segments[0]) {
        segments.remove(0);
    }
    segments.iter().filter(|s| !s.is_empty()).map(|s| capitalize(s)).collect()
}

/// Which wrapper family to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageKind {
    /// `NotificationMessage` wrappers
    Notification,
    /// `RequestMessage` wrappers
    Request,
}

/// Generates one of the two message wrapper artifacts.
#[derive(Debug, Clone)]
pub struct MessagesGenerator {
    kind: MessageKind,
    options: EmitOptions,
}

impl MessagesGenerator {
    /// Generator for notification wrappers
    pub fn notifications(options: EmitOptions) -> Self {
        Self { kind: MessageKind::Notification, options }
    }

    /// Generator for request wrappers
    pub fn requests(options: EmitOptions) -> Self { Self { kind: MessageKind::Request, options } }
}

fn or_null(ty: &Option<String>) -> &str { ty.as_deref().unwrap_or(NULL_TYPE) }

/// Warn about methods that derive the same identifier.
fn check_collisions<'a>(methods: impl Iterator<Item = &'a str>) {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for method in methods {
        let name = method_to_name(method);
        if let Some(first) = seen.get(&name) {
            warn!("Methods {} and {} both map to {}", first, method, name);
        } else {
            seen.insert(name, method);
        }
    }
}

impl CodeGenerator for MessagesGenerator {
    fn artifact(&self) -> &str {
        match self.kind {
            MessageKind::Notification => &self.options.notifications_file,
            MessageKind::Request => &self.options.requests_file,
        }
    }

    fn generate(&self, model: &MetaModel) -> Result<String> {
        let mut body = String::new();
        let base_header = match self.kind {
            MessageKind::Notification => {
                check_collisions(model.notifications.iter().map(|n| n.method.as_str()));
                for notification in &model.notifications {
                    let name = method_to_name(&notification.method);
                    body.push_str(&format!(
                        "\ninline constexpr char {name}Name[] = \"{}\";\nstruct {name}Notification : public NotificationMessage<{name}Name, {}>\n{{}};\n",
                        notification.method,
                        or_null(&notification.params),
                    ));
                }
                "\"notificationmessage.h\""
            }
            MessageKind::Request => {
                check_collisions(model.requests.iter().map(|r| r.method.as_str()));
                for request in &model.requests {
                    let name = method_to_name(&request.method);
                    body.push_str(&format!(
                        "\ninline constexpr char {name}Name[] = \"{}\";\nstruct {name}Request : public RequestMessage<{name}Name, {}, {}, {}>\n{{}};\n",
                        request.method,
                        or_null(&request.params),
                        or_null(&request.result),
                        or_null(&request.error),
                    ));
                }
                "\"requestmessage.h\""
            }
        };

        let includes =
            vec![base_header.to_string(), format!("\"{}\"", self.options.declarations_file)];
        Ok(render_artifact(&self.options, &includes, &body))
    }
}
