//! Turns the ordered graph into a [`Schema`].

use std::collections::HashMap;

use tracing::{debug, debug_span};

use crate::diagnostics::Diagnostics;
use crate::graph::{EmissionOrder, NodeId, NodeKind, TypeGraph};
use crate::options::Options;
use crate::PassResult;

use super::enums::elaborate_enum;
use super::structs::{Flattener, check_map_keys};
use super::unions::{check_claims, elaborate_union};
use super::{AliasShape, ExternalShape, Schema, SchemaNode, Shape, StructShape};

pub fn elaborate(graph: TypeGraph, order: EmissionOrder, options: &Options) -> PassResult<Schema> {
    let _span = debug_span!("elaborate").entered();
    let mut diagnostics = Diagnostics::new();

    // Unions first: their member lists decide what each struct implements.
    let mut unions = HashMap::new();
    let mut memberships: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for (id, node) in graph.iter() {
        let NodeKind::Union { members } = &node.kind else {
            continue;
        };
        let shape = elaborate_union(&graph, &node.identity, members, &mut diagnostics)?;
        for variant in &shape.variants {
            memberships.entry(variant.implementor).or_default().push(id);
        }
        unions.insert(id, shape);
    }
    for list in memberships.values_mut() {
        list.sort_by(|a, b| graph.identity(*a).cmp(graph.identity(*b)));
    }
    check_claims(&graph, &memberships)?;

    let mut instances: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    let mut flattened = HashMap::new();
    {
        let mut flattener = Flattener::new(&graph, &mut diagnostics);
        for (id, node) in graph.iter() {
            let NodeKind::Struct {
                fields,
                instance_of,
                ..
            } = &node.kind
            else {
                continue;
            };
            check_map_keys(&graph, id, fields)?;
            if let Some(inst) = instance_of {
                instances.entry(inst.generic).or_default().push(id);
            }
            flattened.insert(id, flattener.fields(id));
        }
    }

    let mut nodes = Vec::with_capacity(graph.len());
    for (id, node) in graph.iter() {
        let shape = match &node.kind {
            NodeKind::Alias { primitive, format } => Shape::Alias(AliasShape {
                primitive: *primitive,
                format: *format,
            }),
            NodeKind::Struct { instance_of, .. } => Shape::Struct(StructShape {
                fields: flattened.remove(&id).unwrap_or_default(),
                implements: memberships.remove(&id).unwrap_or_default(),
                instance_of: instance_of.clone(),
            }),
            NodeKind::Enum(decl) => Shape::Enum(elaborate_enum(
                &node.identity,
                decl.clone(),
                options.label_fallback,
                &mut diagnostics,
            )?),
            NodeKind::Union { .. } => match unions.remove(&id) {
                Some(shape) => Shape::Union(shape),
                None => unreachable!("union `{}` was elaborated above", node.identity),
            },
            NodeKind::Generic(_) => {
                let mut list = instances.remove(&id).unwrap_or_default();
                list.sort_by(|a, b| graph.identity(*a).cmp(graph.identity(*b)));
                Shape::Generic { instances: list }
            }
            NodeKind::Pending { .. } => {
                unreachable!("`{}` was not expanded", node.identity)
            }
            NodeKind::Opaque => Shape::Opaque,
            NodeKind::External { imports } => Shape::External(ExternalShape {
                imports: imports.clone(),
            }),
        };
        nodes.push(SchemaNode {
            identity: node.identity.clone(),
            doc: node.doc.clone(),
            shape,
        });
    }

    let (order, back_refs) = order.into_parts();
    let schema = Schema::new(nodes, order, back_refs);
    debug!(
        nodes = schema.len(),
        emitted = schema.order().len(),
        warnings = diagnostics.warning_count(),
        "schema elaborated"
    );
    Ok((schema, diagnostics))
}
