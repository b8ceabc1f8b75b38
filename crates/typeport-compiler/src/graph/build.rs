//! Symbol resolution: declarations in, arena graph out.

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, debug_span};
use typeport_core::{DeclKind, Declaration, Field, Identity, TypeExpr};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::options::UnresolvedPolicy;
use crate::{Error, PassResult, Result};

use super::{Instantiation, NodeId, NodeKind, ResolvedField, Ty, TypeGraph};

/// Collects declarations, then resolves them into a [`TypeGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    policy: UnresolvedPolicy,
    decls: IndexMap<Identity, Declaration>,
}

impl GraphBuilder {
    pub fn new(policy: UnresolvedPolicy) -> Self {
        Self {
            policy,
            decls: IndexMap::new(),
        }
    }

    /// Add a declaration. Registering an identical declaration again is a
    /// no-op; a different shape under the same identity is an error.
    pub fn register(&mut self, decl: Declaration) -> Result<()> {
        match self.decls.entry(decl.id.clone()) {
            Entry::Occupied(existing) => {
                if existing.get().same_shape(&decl) {
                    Ok(())
                } else {
                    Err(Error::DuplicateIdentity(decl.id))
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(decl);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Resolve every reference and build the adjacency list.
    ///
    /// Nodes are allocated in registration order. Instantiation requests and
    /// external passthroughs are appended after the declared nodes.
    pub fn finish(self) -> PassResult<TypeGraph> {
        let _span = debug_span!("resolve").entered();
        let mut graph = TypeGraph::default();
        let mut diagnostics = Diagnostics::new();

        // Reserve every identity first so forward references resolve.
        for decl in self.decls.values() {
            graph.push(decl.id.clone(), decl.doc.clone(), NodeKind::Opaque);
        }

        let declared = self.decls.len();
        let mut lowering = Lowering {
            graph: &mut graph,
            policy: self.policy,
            diagnostics: &mut diagnostics,
        };
        for (index, decl) in self.decls.into_values().enumerate() {
            let kind = lowering.declaration(NodeId::from_index(index), decl)?;
            lowering.graph.set_kind(NodeId::from_index(index), kind);
        }

        debug!(
            declared,
            nodes = graph.len(),
            "type graph built"
        );
        Ok((graph, diagnostics))
    }
}

/// Where a type expression is lowered: the declaration owning it, and the
/// generic argument bound to the placeholder, if any.
pub(crate) struct Scope<'s> {
    owner: &'s Identity,
    binding: Option<(&'s str, &'s Ty)>,
}

impl<'s> Scope<'s> {
    pub(crate) fn top(owner: &'s Identity) -> Self {
        Self {
            owner,
            binding: None,
        }
    }

    pub(crate) fn bound(owner: &'s Identity, param: &'s str, arg: &'s Ty) -> Self {
        Self {
            owner,
            binding: Some((param, arg)),
        }
    }
}

/// Lowers declaration payloads into graph nodes, resolving references as it goes.
pub(crate) struct Lowering<'a> {
    pub(crate) graph: &'a mut TypeGraph,
    pub(crate) policy: UnresolvedPolicy,
    pub(crate) diagnostics: &'a mut Diagnostics,
}

impl Lowering<'_> {
    fn declaration(&mut self, id: NodeId, decl: Declaration) -> Result<NodeKind> {
        let owner = decl.id;
        let scope = Scope::top(&owner);

        let kind = match decl.kind {
            DeclKind::ScalarAlias { primitive, format } => NodeKind::Alias { primitive, format },
            DeclKind::Struct(s) => {
                let fields = self.fields(&s.fields, &scope)?;
                let claims = s
                    .implements
                    .iter()
                    .map(|union| self.reference(&owner, union))
                    .collect::<Result<_>>()?;
                NodeKind::Struct {
                    fields,
                    claims,
                    instance_of: None,
                }
            }
            DeclKind::Enum(e) => NodeKind::Enum(e),
            DeclKind::Union(u) => {
                let members = u
                    .members
                    .into_iter()
                    .map(|m| Ok((m.tag, self.reference(&owner, &m.implementor)?)))
                    .collect::<Result<_>>()?;
                NodeKind::Union { members }
            }
            DeclKind::Generic(g) => {
                for arg in &g.arguments {
                    let arg = self.argument(&owner, arg, &scope)?;
                    self.instantiate(id, arg, &owner);
                }
                NodeKind::Generic(g)
            }
            DeclKind::Opaque => NodeKind::Opaque,
            DeclKind::External(e) => NodeKind::External { imports: e.imports },
        };
        Ok(kind)
    }

    pub(crate) fn fields(&mut self, fields: &[Field], scope: &Scope<'_>) -> Result<Vec<ResolvedField>> {
        fields
            .iter()
            .map(|f| {
                Ok(ResolvedField {
                    name: f.name.clone(),
                    ty: self.lower(&f.ty, scope)?,
                    embedded: f.embedded,
                    opaque_for: f.opaque_for.clone(),
                })
            })
            .collect()
    }

    pub(crate) fn lower(&mut self, expr: &TypeExpr, scope: &Scope<'_>) -> Result<Ty> {
        let ty = match expr {
            TypeExpr::Primitive(p) => Ty::Primitive(*p),
            TypeExpr::Named(id) => Ty::Node(self.reference(scope.owner, id)?),
            TypeExpr::Array { elem, len } => Ty::Array {
                elem: Box::new(self.lower(elem, scope)?),
                len: *len,
            },
            TypeExpr::Slice(elem) => Ty::Slice(Box::new(self.lower(elem, scope)?)),
            TypeExpr::Map { key, value } => Ty::Map {
                key: Box::new(self.lower(key, scope)?),
                value: Box::new(self.lower(value, scope)?),
            },
            TypeExpr::Optional(inner) => Ty::Optional(Box::new(self.lower(inner, scope)?)),
            TypeExpr::Param(name) => match scope.binding {
                Some((param, arg)) if param == name => arg.clone(),
                _ => {
                    return Err(Error::UnboundParameter {
                        owner: scope.owner.clone(),
                        param: name.clone(),
                    });
                }
            },
            TypeExpr::Instance { generic, arg } => {
                let generic_id = self.reference(scope.owner, generic)?;
                let arg = self.argument(generic, arg, scope)?;
                Ty::Node(self.instantiate(generic_id, arg, scope.owner))
            }
        };
        Ok(ty)
    }

    /// Lowers a generic argument. Arguments never pass through as external:
    /// an undeclared name is reported against the generic.
    fn argument(&mut self, generic: &Identity, arg: &TypeExpr, scope: &Scope<'_>) -> Result<Ty> {
        let policy = std::mem::replace(&mut self.policy, UnresolvedPolicy::Error);
        let lowered = self.lower(arg, scope);
        self.policy = policy;
        lowered.map_err(|err| match err {
            Error::UnresolvedReference { reference, .. } => Error::UnresolvedGenericArgument {
                generic: generic.clone(),
                argument: reference,
            },
            other => other,
        })
    }

    fn reference(&mut self, from: &Identity, reference: &Identity) -> Result<NodeId> {
        if let Some(id) = self.graph.lookup(reference) {
            return Ok(id);
        }

        match self.policy {
            UnresolvedPolicy::Error => Err(Error::UnresolvedReference {
                reference: reference.clone(),
                from: Some(from.clone()),
            }),
            UnresolvedPolicy::External => {
                self.diagnostics
                    .report(DiagnosticKind::ExternalPassthrough, reference)
                    .message(format!("referenced from `{from}`"))
                    .emit();
                Ok(self.graph.push(
                    reference.clone(),
                    None,
                    NodeKind::External {
                        imports: IndexMap::new(),
                    },
                ))
            }
        }
    }

    /// Node for `generic` applied to `arg`. Requests with the same argument
    /// share one node.
    pub(crate) fn instantiate(&mut self, generic: NodeId, arg: Ty, requested_by: &Identity) -> NodeId {
        let identity = self.graph.instance_identity(generic, &arg);
        if let Some(id) = self.graph.lookup(&identity) {
            return id;
        }
        self.graph.push(
            identity,
            None,
            NodeKind::Pending {
                instantiation: Instantiation { generic, arg },
                requested_by: requested_by.clone(),
            },
        )
    }
}
