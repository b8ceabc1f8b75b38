//! Monomorphization of generic structs.
//!
//! Every pending instantiation becomes an ordinary struct whose fields are the
//! generic's fields with the placeholder substituted. Expanding one instance
//! may request others (a generic body using another generic); those are
//! appended to the arena and picked up by the same sweep.

use std::collections::HashSet;

use tracing::{debug, debug_span};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::options::Options;
use crate::{Error, PassResult};

use super::{Lowering, NodeId, NodeKind, Scope, TypeGraph};

pub fn expand_generics(mut graph: TypeGraph, options: &Options) -> PassResult<TypeGraph> {
    let _span = debug_span!("expand").entered();
    let mut diagnostics = Diagnostics::new();
    let mut expanded = 0usize;

    let mut next = 0;
    while next < graph.len() {
        let id = NodeId::from_index(next);
        next += 1;

        let NodeKind::Pending {
            instantiation,
            requested_by,
        } = &graph.node(id).kind
        else {
            continue;
        };
        let (instantiation, requested_by) = (instantiation.clone(), requested_by.clone());

        let NodeKind::Generic(decl) = &graph.node(instantiation.generic).kind else {
            return Err(Error::NotGeneric {
                from: requested_by,
                reference: graph.identity(instantiation.generic).clone(),
            });
        };
        let decl = decl.clone();

        expanded += 1;
        if expanded > options.instantiation_limit {
            return Err(Error::ExpansionLimitExceeded(
                graph.identity(instantiation.generic).clone(),
            ));
        }

        let owner = graph.identity(id).clone();
        let scope = Scope::bound(&owner, &decl.param, &instantiation.arg);
        let mut lowering = Lowering {
            graph: &mut graph,
            policy: options.unresolved,
            diagnostics: &mut diagnostics,
        };
        let fields = lowering.fields(&decl.fields, &scope)?;

        graph.set_kind(
            id,
            NodeKind::Struct {
                fields,
                claims: Vec::new(),
                instance_of: Some(instantiation),
            },
        );
    }

    let instantiated: HashSet<NodeId> = graph
        .iter()
        .filter_map(|(_, node)| match &node.kind {
            NodeKind::Struct {
                instance_of: Some(inst),
                ..
            } => Some(inst.generic),
            _ => None,
        })
        .collect();
    for (id, node) in graph.iter() {
        if matches!(node.kind, NodeKind::Generic(_)) && !instantiated.contains(&id) {
            diagnostics
                .report(DiagnosticKind::UnusedGeneric, &node.identity)
                .emit();
        }
    }

    debug!(expanded, nodes = graph.len(), "generics expanded");
    Ok((graph, diagnostics))
}
