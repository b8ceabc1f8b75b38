//! Dart emitter state and driver.

use std::collections::{HashMap, HashSet};

use typeport_core::Target;
use typeport_core::utils::{lower_first, module_tail};

use crate::graph::NodeId;
use crate::schema::{Schema, Shape};
use crate::typegen::Block;
use crate::typegen::naming::Names;

use super::Config;
use super::convert::{enum_member_names, identifier, member_name};

pub(super) const HEADER: &str = "// Code generated by typeport. DO NOT EDIT.";

/// Core library types a generated declaration must not shadow.
const RESERVED: &[&str] = &[
    "DateTime", "Duration", "Function", "List", "Map", "Never", "Null", "Object", "Record", "Set",
    "String", "Type",
];

/// Kind enum of a non-empty union.
#[derive(Clone, Debug)]
pub(super) struct UnionKind {
    pub(super) enum_name: String,
    /// Discriminant getter on the sealed class
    pub(super) getter: String,
    /// Enum value per variant, in variant order
    pub(super) members: Vec<String>,
}

/// Dart emitter over a schema.
pub struct Emitter<'a> {
    pub(super) schema: &'a Schema,
    pub(super) config: Config,
    /// NodeId -> declared name, or `prefix.Name` for aliased imports
    pub(super) names: Names,
    pub(super) kinds: HashMap<NodeId, UnionKind>,
    /// External -> import prefix, for externals that lost their name
    pub(super) prefixes: HashMap<NodeId, String>,
    /// NodeId -> `<codec>FromJson` / `<codec>ToJson` stem
    pub(super) codecs: HashMap<NodeId, String>,
    /// Output blocks
    pub(super) blocks: Vec<Block>,
}

impl<'a> Emitter<'a> {
    pub fn new(schema: &'a Schema, config: Config) -> Self {
        let mut names = Names::assign(schema, RESERVED);
        let mut kinds = HashMap::new();
        let mut prefixes = HashMap::new();
        let mut taken = HashSet::new();

        for (id, node) in schema.emitted() {
            match &node.shape {
                Shape::Union(u) if !u.variants.is_empty() => {
                    let name = names.get(id).to_string();
                    kinds.insert(
                        id,
                        UnionKind {
                            enum_name: names.claim(&format!("{name}Kind")),
                            getter: identifier(&format!("{}Kind", lower_first(&name))),
                            members: enum_member_names(u.tags()),
                        },
                    );
                }
                // Dart cannot rename a single imported symbol, so the whole
                // library is imported under a prefix.
                Shape::External(ext)
                    if ext.import_for(Target::Dart).is_some() && names.is_aliased(schema, id) =>
                {
                    let mut prefix =
                        identifier(&module_tail(node.identity.module()).to_ascii_lowercase());
                    while !taken.insert(prefix.clone()) {
                        prefix.push('_');
                    }
                    names.set(id, format!("{prefix}.{}", node.identity.name()));
                    prefixes.insert(id, prefix);
                }
                _ => {}
            }
        }

        let mut codecs = HashMap::new();
        if config.json {
            for (id, node) in schema.emitted() {
                let stem = match (&node.shape, prefixes.get(&id)) {
                    (Shape::External(_), Some(prefix)) => {
                        format!("{prefix}.{}", lower_first(node.identity.name()))
                    }
                    (Shape::External(_), None) => lower_first(names.get(id)),
                    _ => {
                        let mut stem = member_name(names.get(id));
                        while !taken.insert(stem.clone()) {
                            stem.push('_');
                        }
                        stem
                    }
                };
                codecs.insert(id, stem);
            }
        }

        Self {
            schema,
            config,
            names,
            kinds,
            prefixes,
            codecs,
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
            let shape = &schema.node(id).shape;
            match shape {
                Shape::Alias(alias) => self.emit_alias(id, alias),
                Shape::Struct(s) => self.emit_class(id, s),
                Shape::Enum(e) => self.emit_enum(id, e),
                Shape::Union(u) => self.emit_union(id, u),
                Shape::Opaque => self.emit_opaque(id),
                Shape::External(ext) => self.emit_import(id, ext),
                Shape::Generic { .. } => {}
            }
            if self.config.json {
                self.emit_codec(id, shape);
            }
        }
        self.blocks
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
