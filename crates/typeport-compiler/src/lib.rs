//! typeport compiler: from a declaration stream to target-language declarations.
//!
//! Stages, each consuming only what the previous ones produced:
//! - `graph` - symbol resolution into an arena graph, generic expansion, and
//!   cycle-aware emission ordering
//! - `schema` - enum label tables, union shapes and flattened structs
//! - `typegen` - TypeScript and Dart emitters over the finished schema
//! - `diagnostics` - recoverable findings reported alongside results
//! - `pipeline` - the `Pipeline`/`Analysis` facade running all of the above

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod graph;
pub mod options;
pub mod pipeline;
pub mod schema;
pub mod typegen;

#[cfg(test)]
pub mod test_utils;


use typeport_core::Identity;

/// Result type for passes that produce both output and diagnostics.
///
/// Each pass returns its typed output alongside any diagnostics it collected.
/// Fatal errors use the outer `Result`; nothing is emitted after one.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use diagnostics::{DiagnosticKind, Diagnostics, Severity};
pub use options::{LabelFallback, Options, UnresolvedPolicy};
pub use pipeline::{Analysis, Pipeline};
pub use schema::Schema;
pub use typegen::{Block, Output, TargetConfig};

/// Fatal errors. Each names the identity the run failed on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("`{0}` is declared more than once with different shapes")]
    DuplicateIdentity(Identity),

    #[error("`{reference}` is not declared{}", referenced_from(.from))]
    UnresolvedReference {
        reference: Identity,
        from: Option<Identity>,
    },

    /// Structs embedding each other by value; no indirection can break it.
    #[error("embedding cycle cannot be broken: {}", render_cycle(.0))]
    UnbreakableCycle(Vec<Identity>),

    #[error("generic `{generic}` is instantiated with `{argument}`, which is not declared")]
    UnresolvedGenericArgument {
        generic: Identity,
        argument: Identity,
    },

    #[error("`{from}` instantiates `{reference}`, which is not generic")]
    NotGeneric { from: Identity, reference: Identity },

    #[error("`{owner}` uses type parameter `{param}` outside of a generic")]
    UnboundParameter { owner: Identity, param: String },

    /// Instantiations keep producing new instantiations.
    #[error("expanding `{0}` exceeded the instantiation limit")]
    ExpansionLimitExceeded(Identity),

    #[error("field `{field}` of `{owner}` has a map key that is not a scalar or enum")]
    InvalidMapKey { owner: Identity, field: String },

    #[error("enum `{identity}` is invalid: {reason}")]
    InvalidEnum { identity: Identity, reason: String },

    #[error("union `{union}` member `{member}` is invalid: {reason}")]
    InvalidUnionMember {
        union: Identity,
        member: String,
        reason: String,
    },

    #[error("`{implementor}` claims to implement `{union}`, which does not list it")]
    UndeclaredImplementor {
        union: Identity,
        implementor: Identity,
    },
}

impl Error {
    /// The identity the failure is reported against.
    pub fn identity(&self) -> &Identity {
        match self {
            Error::DuplicateIdentity(id) | Error::ExpansionLimitExceeded(id) => id,
            Error::UnresolvedReference { reference, .. } => reference,
            Error::UnbreakableCycle(path) => &path[0],
            Error::UnresolvedGenericArgument { generic, .. } => generic,
            Error::NotGeneric { from, .. } => from,
            Error::UnboundParameter { owner, .. } | Error::InvalidMapKey { owner, .. } => owner,
            Error::InvalidEnum { identity, .. } => identity,
            Error::InvalidUnionMember { union, .. } => union,
            Error::UndeclaredImplementor { implementor, .. } => implementor,
        }
    }
}

fn referenced_from(from: &Option<Identity>) -> String {
    match from {
        Some(from) => format!(" (referenced from `{from}`)"),
        None => String::new(),
    }
}

fn render_cycle(path: &[Identity]) -> String {
    let mut parts: Vec<String> = path.iter().map(|id| format!("`{id}`")).collect();
    if let Some(first) = parts.first().cloned() {
        parts.push(first);
    }
    parts.join(" -> ")
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
