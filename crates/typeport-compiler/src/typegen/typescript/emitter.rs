//! TypeScript emitter state and driver.

use std::collections::HashMap;

use crate::graph::NodeId;
use crate::schema::{Schema, Shape};
use crate::typegen::Block;
use crate::typegen::naming::Names;

use super::Config;

pub(super) const HEADER: &str = "// Code generated by typeport. DO NOT EDIT.";

/// Globals a generated declaration must not shadow.
const RESERVED: &[&str] = &[
    "Array", "Boolean", "Date", "Map", "Number", "Object", "Partial", "Promise", "Record", "Set",
    "String",
];

/// TypeScript emitter over a schema.
pub struct Emitter<'a> {
    pub(super) schema: &'a Schema,
    pub(super) config: Config,
    /// NodeId -> declared name
    pub(super) names: Names,
    /// Enum -> label table name, union -> kind enum name
    pub(super) companions: HashMap<NodeId, String>,
    /// Output blocks
    pub(super) blocks: Vec<Block>,
}

impl<'a> Emitter<'a> {
    pub fn new(schema: &'a Schema, config: Config) -> Self {
        let mut names = Names::assign(schema, RESERVED);
        let mut companions = HashMap::new();
        for (id, node) in schema.emitted() {
            let suffix = match &node.shape {
                Shape::Enum(_) => "Labels",
                Shape::Union(u) if !u.variants.is_empty() => "Kind",
                _ => continue,
            };
            let base = format!("{}{}", names.get(id), suffix);
            companions.insert(id, names.claim(&base));
        }

        Self {
            schema,
            config,
            names,
            companions,
            blocks: Vec::new(),
        }
    }

    /// Emit one block per declaration in emission order, imports and header first.
    pub fn emit(mut self) -> Vec<Block> {
        if self.config.header {
            self.blocks.push(Block {
                origin: None,
                name: String::new(),
                content: HEADER.to_string(),
                priority: true,
            });
        }

        let schema = self.schema;
        for &id in schema.order() {
            match &schema.node(id).shape {
                Shape::Alias(alias) => self.emit_alias(id, alias),
                Shape::Struct(s) => self.emit_interface(id, s),
                Shape::Enum(e) => self.emit_enum(id, e),
                Shape::Union(u) => self.emit_union(id, u),
                Shape::Opaque => self.emit_opaque(id),
                Shape::External(ext) => self.emit_import(id, ext),
                Shape::Generic { .. } => {}
            }
        }
        self.blocks
    }

    pub(super) fn export(&self) -> &'static str {
        if self.config.export { "export " } else { "" }
    }

    pub(super) fn push(&mut self, id: NodeId, name: impl Into<String>, content: String) {
        self.blocks.push(Block {
            origin: Some(self.schema.node(id).identity.clone()),
            name: name.into(),
            content,
            priority: false,
        });
    }
}
