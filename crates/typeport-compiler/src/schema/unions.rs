//! Closed unions lowered to discriminant + payload.

use std::collections::{HashMap, HashSet};

use typeport_core::Identity;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::graph::{NodeId, NodeKind, TypeGraph};
use crate::{Error, Result};

use super::{UnionShape, Variant};

/// The discriminant domain is exactly the declared tags; each selects one
/// struct implementor.
pub(super) fn elaborate_union(
    graph: &TypeGraph,
    identity: &Identity,
    members: &[(String, NodeId)],
    diagnostics: &mut Diagnostics,
) -> Result<UnionShape> {
    if members.is_empty() {
        diagnostics
            .report(DiagnosticKind::EmptyUnion, identity)
            .emit();
    }

    let mut tags = HashSet::new();
    let mut implementors = HashSet::new();
    let mut variants = Vec::with_capacity(members.len());

    for (tag, implementor) in members {
        let member = graph.identity(*implementor);
        let invalid = |reason: String| Error::InvalidUnionMember {
            union: identity.clone(),
            member: member.to_string(),
            reason,
        };

        let kind = &graph.node(*implementor).kind;
        if !matches!(kind, NodeKind::Struct { .. }) {
            return Err(invalid(format!("it is {}, not a struct", article(kind.describe()))));
        }
        if tag.is_empty() {
            return Err(invalid("its tag is empty".to_string()));
        }
        if !tags.insert(tag.as_str()) {
            return Err(invalid(format!("tag `{tag}` is used more than once")));
        }
        if !implementors.insert(*implementor) {
            return Err(invalid("it is listed more than once".to_string()));
        }

        variants.push(Variant {
            tag: tag.clone(),
            implementor: *implementor,
        });
    }

    Ok(UnionShape { variants })
}

/// Every union a struct claims must list that struct. Membership is only
/// ever granted by the union itself.
pub(super) fn check_claims(
    graph: &TypeGraph,
    memberships: &HashMap<NodeId, Vec<NodeId>>,
) -> Result<()> {
    for (id, node) in graph.iter() {
        let NodeKind::Struct { claims, .. } = &node.kind else {
            continue;
        };
        for union in claims {
            let listed = memberships
                .get(&id)
                .is_some_and(|unions| unions.contains(union));
            if !listed {
                return Err(Error::UndeclaredImplementor {
                    union: graph.identity(*union).clone(),
                    implementor: node.identity.clone(),
                });
            }
        }
    }
    Ok(())
}

fn article(noun: &str) -> String {
    match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => format!("an {noun}"),
        _ => format!("a {noun}"),
    }
}
