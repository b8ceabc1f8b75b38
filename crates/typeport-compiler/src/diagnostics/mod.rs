//! Recoverable findings collected while building a schema.
//!
//! Fatal problems abort the run through [`crate::Error`]; everything here is
//! reported next to a successful result.

mod message;


use typeport_core::Identity;

pub use message::{DiagnosticKind, DiagnosticMessage, Severity};

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a diagnostic of the given kind about `identity`.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to add detail.
    pub fn report(&mut self, kind: DiagnosticKind, identity: &Identity) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind, identity.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_warnings(&self) -> bool {
        self.messages.iter().any(|d| d.is_warning())
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    /// Messages of one kind, in report order.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter().filter(move |m| m.kind == kind)
    }

    /// One line per message: `warning: <message>`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for msg in &self.messages {
            out.push_str(&msg.to_string());
            out.push('\n');
        }
        out
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let detail = msg.into();
        self.message.message = self.message.kind.message(&self.message.identity, Some(&detail));
        self
    }

    pub fn emit(self) {
        let msg = &self.message;
        match msg.severity() {
            Severity::Warning => tracing::warn!(kind = ?msg.kind, identity = %msg.identity, "{}", msg.message),
            Severity::Note => tracing::debug!(kind = ?msg.kind, identity = %msg.identity, "{}", msg.message),
        }
        self.diagnostics.messages.push(self.message);
    }
}
