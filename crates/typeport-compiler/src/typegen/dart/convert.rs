//! Type to Dart string conversion, identifiers and literals.

use std::collections::HashSet;

use typeport_core::utils::lower_first;
use typeport_core::{Primitive, Target};

use crate::graph::{NodeId, ResolvedField, Ty};

use super::Emitter;

/// Reserved and built-in identifiers, plus contextual keywords that read badly
/// as member names.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "assert", "async", "await", "base", "break", "case", "catch", "class",
    "const", "continue", "covariant", "default", "deferred", "do", "dynamic", "else", "enum",
    "export", "extends", "extension", "external", "factory", "false", "final", "finally", "for",
    "get", "hide", "if", "implements", "import", "in", "interface", "is", "late", "library",
    "mixin", "new", "null", "of", "on", "operator", "part", "required", "rethrow", "return",
    "sealed", "set", "show", "static", "super", "switch", "sync", "this", "throw", "true", "try",
    "type", "typedef", "var", "void", "when", "while", "with", "yield",
];

/// Members every enum already has, or that generated enums declare.
const ENUM_MEMBERS: &[&str] = &["index", "label", "tag", "value", "values"];

impl Emitter<'_> {
    /// Field type as seen from `owner`: opaque fields become `dynamic`, and a
    /// struct or union reached through a back-reference becomes nullable.
    pub(super) fn field_to_dart(&self, owner: NodeId, field: &ResolvedField) -> String {
        if field.is_opaque_for(Target::Dart) {
            return "dynamic".to_string();
        }
        self.type_to_dart(&self.schema.field_ty(owner, &field.ty))
    }

    pub(super) fn type_to_dart(&self, ty: &Ty) -> String {
        match ty {
            Ty::Primitive(p) => primitive_to_dart(*p).to_string(),
            Ty::Node(id) => self.names.get(*id).to_string(),
            Ty::Array { elem, len } => {
                let elem = self.type_to_dart(elem);
                match len {
                    0 => "()".to_string(),
                    1 => format!("({elem},)"),
                    _ => format!("({})", vec![elem; *len].join(", ")),
                }
            }
            Ty::Slice(elem) => format!("List<{}>", self.type_to_dart(elem)),
            Ty::Map { key, value } => format!(
                "Map<{}, {}>",
                self.type_to_dart(key),
                self.type_to_dart(value)
            ),
            Ty::Optional(inner) => nullable(self.type_to_dart(inner)),
        }
    }
}

pub(super) fn primitive_to_dart(p: Primitive) -> &'static str {
    match p {
        Primitive::Bool => "bool",
        Primitive::Int => "int",
        Primitive::Float => "double",
        Primitive::String => "String",
    }
}

pub(super) fn is_nullable(dart: &str) -> bool {
    dart.ends_with('?') || dart == "dynamic"
}

pub(super) fn nullable(dart: String) -> String {
    if is_nullable(&dart) {
        dart
    } else {
        format!("{dart}?")
    }
}

/// Valid, public Dart identifier: other characters become `_`, a leading digit
/// gets a `v` prefix and keywords a `_` suffix.
pub(super) fn identifier(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '$' { c } else { '_' })
        .collect();
    // A leading underscore would make the member library-private.
    let mut out = sanitized.trim_start_matches('_').to_string();
    match out.chars().next() {
        None => return "value_".to_string(),
        Some(c) if c.is_ascii_digit() => out.insert(0, 'v'),
        Some(_) => {}
    }
    if KEYWORDS.contains(&out.as_str()) {
        out.push('_');
    }
    out
}

/// Field or getter name: lower camel case.
pub(super) fn member_name(name: &str) -> String {
    identifier(&lower_first(name))
}

/// Enum value name, clear of the members enums already carry.
fn enum_member_name(name: &str) -> String {
    let mut out = member_name(name);
    if ENUM_MEMBERS.contains(&out.as_str()) {
        out.push('_');
    }
    out
}

/// Enum value names for `symbols`, in order and pairwise distinct.
pub(super) fn enum_member_names<'s>(symbols: impl IntoIterator<Item = &'s str>) -> Vec<String> {
    let mut taken = HashSet::new();
    symbols
        .into_iter()
        .map(|symbol| {
            let mut name = enum_member_name(symbol);
            while !taken.insert(name.clone()) {
                name.push('_');
            }
            name
        })
        .collect()
}

/// Single-quoted Dart string literal.
pub(super) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
