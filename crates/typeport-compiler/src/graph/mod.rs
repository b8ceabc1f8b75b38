//! Type graph: one arena node per identity, edges for every reference.
//!
//! Nodes are addressed by [`NodeId`] handles into the arena, so recursive and
//! mutually recursive declarations need no shared ownership. Two references to
//! the same identity always resolve to the same handle.

mod build;
mod expand;
mod order;

#[cfg(test)]
mod build_tests;

use std::fmt;

use indexmap::IndexMap;
use typeport_core::{EnumDecl, Format, GenericDecl, Identity, Primitive, Target};

use crate::{Error, Result};

pub use build::GraphBuilder;
pub use expand::expand_generics;
pub use order::{EmissionOrder, analyze_order};

pub(crate) use build::{Lowering, Scope};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// Field type with every reference resolved to a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    Primitive(Primitive),
    Node(NodeId),
    Array { elem: Box<Ty>, len: usize },
    Slice(Box<Ty>),
    Map { key: Box<Ty>, value: Box<Ty> },
    Optional(Box<Ty>),
}

impl Ty {
    /// Calls `f` for every node referenced anywhere inside this type.
    pub fn for_each_node(&self, f: &mut impl FnMut(NodeId)) {
        match self {
            Ty::Primitive(_) => {}
            Ty::Node(id) => f(*id),
            Ty::Array { elem, .. } | Ty::Slice(elem) | Ty::Optional(elem) => elem.for_each_node(f),
            Ty::Map { key, value } => {
                key.for_each_node(f);
                value.for_each_node(f);
            }
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Ty::Node(id) => Some(*id),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedField {
    pub name: String,
    pub ty: Ty,
    pub embedded: bool,
    pub opaque_for: Vec<Target>,
}

impl ResolvedField {
    pub fn is_opaque_for(&self, target: Target) -> bool {
        self.opaque_for.contains(&target)
    }
}

/// Which generic and argument a monomorphized struct came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instantiation {
    pub generic: NodeId,
    pub arg: Ty,
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    Alias {
        primitive: Primitive,
        format: Option<Format>,
    },
    Struct {
        fields: Vec<ResolvedField>,
        /// Unions the declaration claims to implement.
        claims: Vec<NodeId>,
        instance_of: Option<Instantiation>,
    },
    Enum(EnumDecl),
    Union {
        members: Vec<(String, NodeId)>,
    },
    /// Kept unresolved: its body only means something once an argument is bound.
    Generic(GenericDecl),
    /// Requested instantiation, replaced by a struct during expansion.
    Pending {
        instantiation: Instantiation,
        requested_by: Identity,
    },
    Opaque,
    External {
        imports: IndexMap<Target, String>,
    },
}

impl NodeKind {
    pub fn describe(&self) -> &'static str {
        match self {
            NodeKind::Alias { .. } => "scalar alias",
            NodeKind::Struct { .. } => "struct",
            NodeKind::Enum(_) => "enum",
            NodeKind::Union { .. } => "union",
            NodeKind::Generic(_) => "generic",
            NodeKind::Pending { .. } => "pending instantiation",
            NodeKind::Opaque => "opaque",
            NodeKind::External { .. } => "external",
        }
    }

    /// Whether the node produces a declaration of its own. Generics only
    /// produce their instantiations.
    pub fn is_emittable(&self) -> bool {
        !matches!(self, NodeKind::Generic(_))
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub identity: Identity,
    pub doc: Option<String>,
    pub kind: NodeKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// A field refers to the target.
    Reference,
    /// An embedded field copies the target's fields into the source.
    Inline,
    /// A union lists the target as an implementor.
    Variant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub target: NodeId,
    pub kind: EdgeKind,
}

#[derive(Clone, Debug, Default)]
pub struct TypeGraph {
    nodes: Vec<Node>,
    index: IndexMap<Identity, NodeId>,
    /// Adjacency list of refers-to edges, parallel to `nodes`.
    edges: Vec<Vec<Edge>>,
}

impl TypeGraph {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn identity(&self, id: NodeId) -> &Identity {
        &self.nodes[id.index()].identity
    }

    pub fn lookup(&self, identity: &Identity) -> Option<NodeId> {
        self.index.get(identity).copied()
    }

    /// Node declared under `identity`. Repeated calls return the same handle.
    pub fn resolve(&self, identity: &Identity) -> Result<NodeId> {
        self.lookup(identity)
            .ok_or_else(|| Error::UnresolvedReference {
                reference: identity.clone(),
                from: None,
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::from_index(i), node))
    }

    pub fn edges(&self, id: NodeId) -> &[Edge] {
        &self.edges[id.index()]
    }

    /// Identity of the struct produced by instantiating `generic` with `arg`:
    /// `module.Generic[<argument key>]`. [`Identity::parse`] reads it back, as
    /// dots inside the brackets are part of the name.
    pub fn instance_identity(&self, generic: NodeId, arg: &Ty) -> Identity {
        let g = self.identity(generic);
        Identity::new(g.module(), format!("{}[{}]", g.name(), self.ty_key(arg)))
    }

    /// Canonical, unambiguous text of a type: qualified identities for nodes,
    /// source spellings for composites.
    pub fn ty_key(&self, ty: &Ty) -> String {
        match ty {
            Ty::Primitive(p) => p.keyword().to_string(),
            Ty::Node(id) => self.identity(*id).to_string(),
            Ty::Array { elem, len } => format!("[{len}]{}", self.ty_key(elem)),
            Ty::Slice(elem) => format!("[]{}", self.ty_key(elem)),
            Ty::Map { key, value } => format!("map[{}]{}", self.ty_key(key), self.ty_key(value)),
            Ty::Optional(inner) => format!("?{}", self.ty_key(inner)),
        }
    }

    pub(crate) fn push(&mut self, identity: Identity, doc: Option<String>, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.index.insert(identity.clone(), id);
        self.nodes.push(Node {
            identity,
            doc,
            kind,
        });
        self.edges.push(Vec::new());
        self.link(id);
        id
    }

    pub(crate) fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id.index()].kind = kind;
        self.link(id);
    }

    /// Recompute the outgoing edges of one node from its kind.
    fn link(&mut self, id: NodeId) {
        let mut edges: Vec<Edge> = Vec::new();
        let mut add = |edge: Edge| {
            if !edges.contains(&edge) {
                edges.push(edge);
            }
        };

        match &self.nodes[id.index()].kind {
            NodeKind::Struct { fields, .. } => {
                for field in fields {
                    match (&field.ty, field.embedded) {
                        (Ty::Node(target), true) => add(Edge {
                            target: *target,
                            kind: EdgeKind::Inline,
                        }),
                        (ty, _) => ty.for_each_node(&mut |target| {
                            add(Edge {
                                target,
                                kind: EdgeKind::Reference,
                            })
                        }),
                    }
                }
            }
            NodeKind::Union { members } => {
                for (_, target) in members {
                    add(Edge {
                        target: *target,
                        kind: EdgeKind::Variant,
                    });
                }
            }
            NodeKind::Pending { instantiation, .. } => {
                instantiation.arg.for_each_node(&mut |target| {
                    add(Edge {
                        target,
                        kind: EdgeKind::Reference,
                    })
                });
            }
            NodeKind::Alias { .. }
            | NodeKind::Enum(_)
            | NodeKind::Generic(_)
            | NodeKind::Opaque
            | NodeKind::External { .. } => {}
        }

        self.edges[id.index()] = edges;
    }
}
