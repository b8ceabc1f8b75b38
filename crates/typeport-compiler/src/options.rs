//! Pipeline configuration.

use serde::Deserialize;

/// What to do with a reference to an identity nobody declared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Fail with `UnresolvedReference`.
    #[default]
    Error,
    /// Treat it as an external reference without import paths.
    External,
}

/// Label used for enum members declared without one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelFallback {
    /// The empty string.
    #[default]
    Empty,
    /// The member's symbol.
    Symbol,
}

impl LabelFallback {
    pub fn label_for(self, symbol: &str) -> String {
        match self {
            LabelFallback::Empty => String::new(),
            LabelFallback::Symbol => symbol.to_string(),
        }
    }
}

/// Default cap on monomorphized structs per run.
pub const DEFAULT_INSTANTIATION_LIMIT: usize = 4096;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    pub unresolved: UnresolvedPolicy,
    pub label_fallback: LabelFallback,
    /// Expansion fails once more instantiations than this are requested.
    /// Only polymorphic recursion (`Tree<T>` using `Tree<[]T>`) gets near it.
    pub instantiation_limit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            unresolved: UnresolvedPolicy::default(),
            label_fallback: LabelFallback::default(),
            instantiation_limit: DEFAULT_INSTANTIATION_LIMIT,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unresolved(mut self, policy: UnresolvedPolicy) -> Self {
        self.unresolved = policy;
        self
    }

    pub fn label_fallback(mut self, fallback: LabelFallback) -> Self {
        self.label_fallback = fallback;
        self
    }

    pub fn instantiation_limit(mut self, limit: usize) -> Self {
        self.instantiation_limit = limit;
        self
    }
}
