//! Finished, target-independent model handed to emitters.
//!
//! A [`Schema`] is immutable. Emitters for different targets read the same
//! instance concurrently.

mod dump;
mod elaborate;
mod enums;
mod structs;
mod unions;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod elaborate_tests;

use std::collections::BTreeSet;

use indexmap::IndexMap;
use typeport_core::{EnumBacking, EnumValue, Format, Identity, Primitive, Target};

use crate::graph::{Instantiation, NodeId, ResolvedField, Ty};
use crate::{Error, Result};

pub use elaborate::elaborate;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AliasShape {
    pub primitive: Primitive,
    pub format: Option<Format>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructShape {
    /// Declared fields with embedded structs flattened in place.
    pub fields: Vec<ResolvedField>,
    /// Unions listing this struct, in identity order.
    pub implements: Vec<NodeId>,
    pub instance_of: Option<Instantiation>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumEntry {
    pub symbol: String,
    pub value: EnumValue,
    pub label: String,
    /// False when `label` is the fallback.
    pub labeled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumShape {
    pub backing: EnumBacking,
    /// Declared order, literal values untouched.
    pub entries: Vec<EnumEntry>,
}

impl EnumShape {
    /// Label table: one entry per member, fallbacks included.
    pub fn labels(&self) -> IndexMap<&str, &str> {
        self.entries
            .iter()
            .map(|e| (e.symbol.as_str(), e.label.as_str()))
            .collect()
    }

    pub fn label(&self, symbol: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.label.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    pub tag: String,
    pub implementor: NodeId,
}

/// A union lowered to discriminant + payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnionShape {
    pub variants: Vec<Variant>,
}

impl UnionShape {
    /// The discriminant domain.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.tag.as_str())
    }

    pub fn implementor(&self, tag: &str) -> Option<NodeId> {
        self.variants
            .iter()
            .find(|v| v.tag == tag)
            .map(|v| v.implementor)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalShape {
    pub imports: IndexMap<Target, String>,
}

impl ExternalShape {
    pub fn import_for(&self, target: Target) -> Option<&str> {
        self.imports.get(&target).map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Alias(AliasShape),
    Struct(StructShape),
    Enum(EnumShape),
    Union(UnionShape),
    /// Never emitted; lists its monomorphized structs.
    Generic { instances: Vec<NodeId> },
    Opaque,
    External(ExternalShape),
}

impl Shape {
    pub fn describe(&self) -> &'static str {
        match self {
            Shape::Alias(_) => "alias",
            Shape::Struct(_) => "struct",
            Shape::Enum(_) => "enum",
            Shape::Union(_) => "union",
            Shape::Generic { .. } => "generic",
            Shape::Opaque => "opaque",
            Shape::External(_) => "external",
        }
    }

    /// Structs and unions are the shapes a field can refer to indirectly.
    pub fn is_composite(&self) -> bool {
        matches!(self, Shape::Struct(_) | Shape::Union(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaNode {
    pub identity: Identity,
    pub doc: Option<String>,
    pub shape: Shape,
}

#[derive(Clone, Debug, Default)]
pub struct Schema {
    nodes: Vec<SchemaNode>,
    index: IndexMap<Identity, NodeId>,
    order: Vec<NodeId>,
    positions: Vec<Option<usize>>,
    back_refs: BTreeSet<(NodeId, NodeId)>,
}

impl Schema {
    pub(crate) fn new(
        nodes: Vec<SchemaNode>,
        order: Vec<NodeId>,
        back_refs: BTreeSet<(NodeId, NodeId)>,
    ) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.identity.clone(), NodeId::from_index(i)))
            .collect();
        let mut positions = vec![None; nodes.len()];
        for (pos, id) in order.iter().enumerate() {
            positions[id.index()] = Some(pos);
        }
        Self {
            nodes,
            index,
            order,
            positions,
            back_refs,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &SchemaNode {
        &self.nodes[id.index()]
    }

    pub fn shape(&self, id: NodeId) -> &Shape {
        &self.nodes[id.index()].shape
    }

    pub fn lookup(&self, identity: &Identity) -> Option<NodeId> {
        self.index.get(identity).copied()
    }

    pub fn resolve(&self, identity: &Identity) -> Result<NodeId> {
        self.lookup(identity)
            .ok_or_else(|| Error::UnresolvedReference {
                reference: identity.clone(),
                from: None,
            })
    }

    /// Nodes in emission order. Generics are not part of it.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn emitted(&self) -> impl Iterator<Item = (NodeId, &SchemaNode)> {
        self.order.iter().map(|id| (*id, self.node(*id)))
    }

    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.positions[id.index()]
    }

    /// Edges found closing a cycle during ordering.
    pub fn back_references(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.back_refs.iter().copied()
    }

    /// Whether a field of `owner` typed directly as `target` must be rendered
    /// indirectly: `target` is not emitted strictly before `owner`.
    ///
    /// Matches the back-references of the ordering pass, and also covers
    /// fields that embedding moved into another struct.
    pub fn needs_indirection(&self, owner: NodeId, target: NodeId) -> bool {
        if !self.shape(target).is_composite() {
            return false;
        }
        match (self.position(owner), self.position(target)) {
            (Some(owner), Some(target)) => target >= owner,
            _ => false,
        }
    }

    /// Type of a field of `owner` as emitters render it. References needing
    /// indirection become optional, directly or as fixed-array elements;
    /// slices and maps already have an empty value.
    pub fn field_ty(&self, owner: NodeId, ty: &Ty) -> Ty {
        match ty {
            Ty::Node(target) if self.needs_indirection(owner, *target) => {
                Ty::Optional(Box::new(ty.clone()))
            }
            Ty::Array { elem, len } => Ty::Array {
                elem: Box::new(self.field_ty(owner, elem)),
                len: *len,
            },
            _ => ty.clone(),
        }
    }

    /// Monomorphized structs of a generic, in identity order.
    pub fn instances_of(&self, generic: &Identity) -> Vec<NodeId> {
        match self.lookup(generic).map(|id| self.shape(id)) {
            Some(Shape::Generic { instances }) => instances.clone(),
            _ => Vec::new(),
        }
    }
}
