//! Target emitters over a finished [`Schema`].
//!
//! Each emitter renders one block per emitted node, in emission order, plus
//! priority blocks (file header, imports) that go first. Emitters only read the
//! schema, so several targets can be rendered at once.

pub mod dart;
mod naming;
pub mod typescript;

#[cfg(test)]
mod mod_tests;

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, debug_span};
use typeport_core::{Identity, Target};

use crate::schema::{Schema, SchemaNode};

/// Which target to emit, with its configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "target", rename_all = "lowercase")]
pub enum TargetConfig {
    TypeScript(typescript::Config),
    Dart(dart::Config),
}

impl TargetConfig {
    pub fn typescript() -> Self {
        TargetConfig::TypeScript(typescript::Config::default())
    }

    pub fn dart() -> Self {
        TargetConfig::Dart(dart::Config::default())
    }

    pub fn target(&self) -> Target {
        match self {
            TargetConfig::TypeScript(_) => Target::TypeScript,
            TargetConfig::Dart(_) => Target::Dart,
        }
    }
}

/// One top-level piece of output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Declaration this block was rendered from; `None` for the file header.
    pub origin: Option<Identity>,
    /// Name the block declares in the target, or the import path.
    pub name: String,
    pub content: String,
    /// Rendered before all other blocks.
    pub priority: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    pub target: Target,
    pub blocks: Vec<Block>,
}

impl Output {
    /// Priority blocks first, then the rest, separated by blank lines.
    pub fn render(&self) -> String {
        let (priority, rest): (Vec<&Block>, Vec<&Block>) =
            self.blocks.iter().partition(|b| b.priority);

        let mut out = String::new();
        for block in priority.into_iter().chain(rest) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(block.content.trim_end());
            out.push('\n');
        }
        out
    }

    /// Blocks rendered from `identity`.
    pub fn blocks_for<'a>(&'a self, identity: &'a Identity) -> impl Iterator<Item = &'a Block> {
        self.blocks
            .iter()
            .filter(move |b| b.origin.as_ref() == Some(identity))
    }

    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.name == name)
    }
}

/// Render `schema` for one target.
pub fn emit(schema: &Schema, config: &TargetConfig) -> Output {
    let target = config.target();
    let _span = debug_span!("emit", %target).entered();

    let blocks = match config {
        TargetConfig::TypeScript(c) => typescript::Emitter::new(schema, c.clone()).emit(),
        TargetConfig::Dart(c) => dart::Emitter::new(schema, c.clone()).emit(),
    };

    debug!(blocks = blocks.len(), "target emitted");
    Output { target, blocks }
}

/// Render `schema` for every target in parallel. Outputs keep the order of
/// `configs`.
pub fn emit_all(schema: &Schema, configs: &[TargetConfig]) -> Vec<Output> {
    configs.par_iter().map(|config| emit(schema, config)).collect()
}

/// `//` lines with the node's documentation, then its origin identity.
pub(crate) fn leading_comment(node: &SchemaNode) -> String {
    let mut out = String::new();
    if let Some(doc) = &node.doc {
        for line in doc.lines() {
            out.push_str(format!("// {line}").trim_end());
            out.push('\n');
        }
    }
    out.push_str(&format!("// {}\n", node.identity));
    out
}
