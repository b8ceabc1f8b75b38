use typeport_core::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Output is complete but differs from what was declared
    IncompleteEnumLabels,
    IgnoredEmbedding,
    EmptyUnion,

    // Informational
    FlattenedEmbedding,
    UnusedGeneric,
    ExternalPassthrough,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::IncompleteEnumLabels | Self::IgnoredEmbedding | Self::EmptyUnion => {
                Severity::Warning
            }
            Self::FlattenedEmbedding | Self::UnusedGeneric | Self::ExternalPassthrough => {
                Severity::Note
            }
        }
    }

    /// Template used when no detail is provided. `{}` is the identity.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::IncompleteEnumLabels => "enum `{}` has members without a label",
            Self::IgnoredEmbedding => "embedded field in `{}` does not name a struct",
            Self::EmptyUnion => "union `{}` has no members",
            Self::FlattenedEmbedding => "embedded struct fields flattened into `{}`",
            Self::UnusedGeneric => "generic `{}` is never instantiated",
            Self::ExternalPassthrough => "`{}` is not declared, passed through as external",
        }
    }

    /// Render the final message.
    ///
    /// - `None` → `fallback_message()` with the identity filled in
    /// - `Some(detail)` → the same, followed by `: detail`
    pub fn message(&self, identity: &Identity, detail: Option<&str>) -> String {
        let base = self.fallback_message().replace("{}", &identity.to_string());
        match detail {
            None => base,
            Some(detail) => format!("{base}: {detail}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Warning,
    Note,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) identity: Identity,
    pub(crate) message: String,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind, identity: Identity) -> Self {
        let message = kind.message(&identity, None);
        Self {
            kind,
            identity,
            message,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity(), self.message)
    }
}
