//! Emission order and cycle analysis.
//!
//! Depth-first post-order with an on-stack marker: every node is emitted after
//! the nodes it refers to, except along back-references, which close a cycle.
//! Emitters render a back-referenced field in a nullable/indirect form, so
//! recursive and mutually recursive structs never fail here. The only cycle
//! that cannot be broken is a struct embedding itself by value.

use std::collections::BTreeSet;

use tracing::{debug, debug_span};
use typeport_core::Identity;

use crate::{Error, Result};

use super::{Edge, EdgeKind, NodeId, TypeGraph};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmissionOrder {
    order: Vec<NodeId>,
    back_refs: BTreeSet<(NodeId, NodeId)>,
}

impl EmissionOrder {
    /// Nodes in the order their declarations are emitted.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn is_back_reference(&self, from: NodeId, to: NodeId) -> bool {
        self.back_refs.contains(&(from, to))
    }

    pub fn back_references(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.back_refs.iter().copied()
    }

    pub(crate) fn into_parts(self) -> (Vec<NodeId>, BTreeSet<(NodeId, NodeId)>) {
        (self.order, self.back_refs)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnStack,
    Done,
}

/// Order every emittable node. Roots and neighbours are visited in identity
/// order, so the result only depends on the graph's content.
pub fn analyze_order(graph: &TypeGraph) -> Result<EmissionOrder> {
    let _span = debug_span!("order").entered();

    check_embedding_cycles(graph)?;

    let mut roots: Vec<NodeId> = graph
        .iter()
        .filter(|(_, node)| node.kind.is_emittable())
        .map(|(id, _)| id)
        .collect();
    roots.sort_by(|a, b| graph.identity(*a).cmp(graph.identity(*b)));

    let mut walk = Walk {
        graph,
        marks: vec![Mark::Unvisited; graph.len()],
        result: EmissionOrder::default(),
    };
    for root in roots {
        if walk.marks[root.index()] == Mark::Unvisited {
            walk.visit(root);
        }
    }

    debug!(
        nodes = walk.result.order.len(),
        back_refs = walk.result.back_refs.len(),
        "emission order computed"
    );
    Ok(walk.result)
}

struct Walk<'g> {
    graph: &'g TypeGraph,
    marks: Vec<Mark>,
    result: EmissionOrder,
}

impl Walk<'_> {
    fn visit(&mut self, id: NodeId) {
        self.marks[id.index()] = Mark::OnStack;

        for target in sorted_targets(self.graph, self.graph.edges(id).iter()) {
            match self.marks[target.index()] {
                Mark::Unvisited => self.visit(target),
                Mark::OnStack => {
                    self.result.back_refs.insert((id, target));
                }
                Mark::Done => {}
            }
        }

        self.marks[id.index()] = Mark::Done;
        self.result.order.push(id);
    }
}

/// Distinct edge targets in identity order.
fn sorted_targets<'e>(graph: &TypeGraph, edges: impl Iterator<Item = &'e Edge>) -> Vec<NodeId> {
    let mut targets: Vec<NodeId> = edges.map(|e| e.target).collect();
    targets.sort_by(|a, b| graph.identity(*a).cmp(graph.identity(*b)));
    targets.dedup();
    targets
}

/// Embedding copies fields by value, so a cycle made only of embeddings has
/// no finite shape.
fn check_embedding_cycles(graph: &TypeGraph) -> Result<()> {
    let mut marks = vec![Mark::Unvisited; graph.len()];
    let mut stack: Vec<NodeId> = Vec::new();

    let mut roots: Vec<NodeId> = graph.iter().map(|(id, _)| id).collect();
    roots.sort_by(|a, b| graph.identity(*a).cmp(graph.identity(*b)));

    for root in roots {
        if marks[root.index()] == Mark::Unvisited
            && let Some(cycle) = find_inline_cycle(graph, root, &mut marks, &mut stack)
        {
            return Err(Error::UnbreakableCycle(cycle));
        }
    }
    Ok(())
}

fn find_inline_cycle(
    graph: &TypeGraph,
    id: NodeId,
    marks: &mut [Mark],
    stack: &mut Vec<NodeId>,
) -> Option<Vec<Identity>> {
    marks[id.index()] = Mark::OnStack;
    stack.push(id);

    let inline = graph.edges(id).iter().filter(|e| e.kind == EdgeKind::Inline);
    for target in sorted_targets(graph, inline) {
        match marks[target.index()] {
            Mark::Unvisited => {
                if let Some(cycle) = find_inline_cycle(graph, target, marks, stack) {
                    return Some(cycle);
                }
            }
            Mark::OnStack => {
                let start = stack.iter().position(|n| *n == target).unwrap_or(0);
                return Some(
                    stack[start..]
                        .iter()
                        .map(|n| graph.identity(*n).clone())
                        .collect(),
                );
            }
            Mark::Done => {}
        }
    }

    stack.pop();
    marks[id.index()] = Mark::Done;
    None
}
