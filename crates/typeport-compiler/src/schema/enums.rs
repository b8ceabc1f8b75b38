//! Enum label tables.

use std::collections::HashSet;

use typeport_core::{EnumBacking, EnumDecl, Identity};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::options::LabelFallback;
use crate::{Error, Result};

use super::{EnumEntry, EnumShape};

/// Validate members and complete the label table.
///
/// Values are kept exactly as declared; gaps, negatives and repeated values
/// are all legal. Members without a label get the fallback, and the enum is
/// reported once with the affected symbols.
pub(super) fn elaborate_enum(
    identity: &Identity,
    decl: EnumDecl,
    fallback: LabelFallback,
    diagnostics: &mut Diagnostics,
) -> Result<EnumShape> {
    let invalid = |reason: String| Error::InvalidEnum {
        identity: identity.clone(),
        reason,
    };

    if decl.members.is_empty() {
        return Err(invalid("it has no members".to_string()));
    }

    let mut seen = HashSet::new();
    let mut unlabeled = Vec::new();
    let mut entries = Vec::with_capacity(decl.members.len());

    for member in decl.members {
        if !seen.insert(member.symbol.clone()) {
            return Err(invalid(format!("member `{}` is declared twice", member.symbol)));
        }
        if member.value.backing() != decl.backing {
            return Err(invalid(format!(
                "member `{}` has value {} but the enum is {}-backed",
                member.symbol,
                member.value,
                backing_name(decl.backing)
            )));
        }

        let (label, labeled) = match member.label {
            Some(label) => (label, true),
            None => {
                unlabeled.push(member.symbol.clone());
                (fallback.label_for(&member.symbol), false)
            }
        };
        entries.push(EnumEntry {
            symbol: member.symbol,
            value: member.value,
            label,
            labeled,
        });
    }

    if !unlabeled.is_empty() {
        diagnostics
            .report(DiagnosticKind::IncompleteEnumLabels, identity)
            .message(unlabeled.join(", "))
            .emit();
    }

    Ok(EnumShape {
        backing: decl.backing,
        entries,
    })
}

fn backing_name(backing: EnumBacking) -> &'static str {
    match backing {
        EnumBacking::Int => "int",
        EnumBacking::String => "string",
    }
}
