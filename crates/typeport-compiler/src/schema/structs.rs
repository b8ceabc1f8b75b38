//! Struct shapes: embedded fields flattened, map keys checked.

use std::collections::{HashMap, HashSet};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::graph::{NodeId, NodeKind, ResolvedField, Ty, TypeGraph};
use crate::{Error, Result};

/// Expands embedded structs into their parents. Results are memoized, so each
/// struct is flattened (and reported on) once.
///
/// Relies on the embedding graph being acyclic, which ordering checks first.
pub(super) struct Flattener<'g, 'd> {
    graph: &'g TypeGraph,
    done: HashMap<NodeId, Vec<ResolvedField>>,
    diagnostics: &'d mut Diagnostics,
}

impl<'g, 'd> Flattener<'g, 'd> {
    pub(super) fn new(graph: &'g TypeGraph, diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            graph,
            done: HashMap::new(),
            diagnostics,
        }
    }

    /// Fields of struct `id` with embedded structs spliced in at the
    /// embedding position. A field declared directly on the struct shadows an
    /// embedded field of the same name.
    pub(super) fn fields(&mut self, id: NodeId) -> Vec<ResolvedField> {
        if let Some(done) = self.done.get(&id) {
            return done.clone();
        }

        let graph = self.graph;
        let node = graph.node(id);
        let NodeKind::Struct { fields, .. } = &node.kind else {
            return Vec::new();
        };

        let own: HashSet<&str> = fields
            .iter()
            .filter(|f| self.embedded_struct(f).is_none())
            .map(|f| f.name.as_str())
            .collect();

        let mut out = Vec::with_capacity(fields.len());
        let mut names = HashSet::new();
        let mut flattened = Vec::new();

        for field in fields {
            if let Some(target) = self.embedded_struct(field) {
                flattened.push(field.name.as_str());
                for inner in self.fields(target) {
                    if !own.contains(inner.name.as_str()) && names.insert(inner.name.clone()) {
                        out.push(inner);
                    }
                }
                continue;
            }

            if field.embedded {
                self.diagnostics
                    .report(DiagnosticKind::IgnoredEmbedding, &node.identity)
                    .message(format!("`{}` is kept as a regular field", field.name))
                    .emit();
            }
            if names.insert(field.name.clone()) {
                out.push(ResolvedField {
                    embedded: false,
                    ..field.clone()
                });
            }
        }

        if !flattened.is_empty() {
            self.diagnostics
                .report(DiagnosticKind::FlattenedEmbedding, &node.identity)
                .message(flattened.join(", "))
                .emit();
        }

        self.done.insert(id, out.clone());
        out
    }

    fn embedded_struct(&self, field: &ResolvedField) -> Option<NodeId> {
        match (&field.ty, field.embedded) {
            (Ty::Node(target), true)
                if matches!(self.graph.node(*target).kind, NodeKind::Struct { .. }) =>
            {
                Some(*target)
            }
            _ => None,
        }
    }
}

/// Map keys must be primitives, scalar aliases, enums or externals, at any
/// depth. Externals are vouched for by the module that declares them.
pub(super) fn check_map_keys(graph: &TypeGraph, id: NodeId, fields: &[ResolvedField]) -> Result<()> {
    for field in fields {
        if has_invalid_key(graph, &field.ty) {
            return Err(Error::InvalidMapKey {
                owner: graph.identity(id).clone(),
                field: field.name.clone(),
            });
        }
    }
    Ok(())
}

fn has_invalid_key(graph: &TypeGraph, ty: &Ty) -> bool {
    match ty {
        Ty::Map { key, value } => !is_valid_key(graph, key) || has_invalid_key(graph, value),
        Ty::Array { elem, .. } | Ty::Slice(elem) | Ty::Optional(elem) => {
            has_invalid_key(graph, elem)
        }
        Ty::Primitive(_) | Ty::Node(_) => false,
    }
}

fn is_valid_key(graph: &TypeGraph, key: &Ty) -> bool {
    match key {
        Ty::Primitive(_) => true,
        Ty::Node(id) => matches!(
            graph.node(*id).kind,
            NodeKind::Alias { .. } | NodeKind::Enum(_) | NodeKind::External { .. }
        ),
        _ => false,
    }
}
