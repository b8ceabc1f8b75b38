//! Type to TypeScript string conversion.

use typeport_core::{Primitive, Target};

use crate::graph::{NodeId, ResolvedField, Ty};
use crate::schema::Shape;

use super::Emitter;

impl Emitter<'_> {
    /// Field type as seen from `owner`: opaque fields become `unknown`, and a
    /// struct or union reached through a back-reference becomes nullable.
    pub(super) fn field_to_ts(&self, owner: NodeId, field: &ResolvedField) -> String {
        if field.is_opaque_for(Target::TypeScript) {
            return "unknown".to_string();
        }
        self.type_to_ts(&self.schema.field_ty(owner, &field.ty))
    }

    pub(super) fn type_to_ts(&self, ty: &Ty) -> String {
        match ty {
            Ty::Primitive(p) => primitive_to_ts(*p).to_string(),
            Ty::Node(id) => self.names.get(*id).to_string(),
            Ty::Array { elem, len } => {
                let elem = self.type_to_ts(elem);
                format!("[{}]", vec![elem; *len].join(", "))
            }
            Ty::Slice(elem) => format!("{}[] | null", parenthesize(self.type_to_ts(elem))),
            Ty::Map { key, value } => format!("{} | null", self.map_to_ts(key, value)),
            Ty::Optional(inner) => nullable(self.type_to_ts(inner)),
        }
    }

    /// Index signatures only take `string` and `number`. Enum keys become a
    /// partial record; anything else falls back to `Map`.
    fn map_to_ts(&self, key: &Ty, value: &Ty) -> String {
        let value_ts = self.type_to_ts(value);
        match key {
            Ty::Primitive(Primitive::String) => format!("{{ [key: string]: {value_ts} }}"),
            Ty::Primitive(Primitive::Int | Primitive::Float) => {
                format!("{{ [key: number]: {value_ts} }}")
            }
            Ty::Node(id) => match self.schema.shape(*id) {
                Shape::Enum(_) => format!("Partial<Record<{}, {value_ts}>>", self.names.get(*id)),
                Shape::Alias(alias) if !self.config.brand_aliases => {
                    self.map_to_ts(&Ty::Primitive(alias.primitive), value)
                }
                _ => format!("Map<{}, {value_ts}>", self.type_to_ts(key)),
            },
            _ => format!("Map<{}, {value_ts}>", self.type_to_ts(key)),
        }
    }
}

pub(super) fn primitive_to_ts(p: Primitive) -> &'static str {
    match p {
        Primitive::Bool => "boolean",
        Primitive::Int | Primitive::Float => "number",
        Primitive::String => "string",
    }
}

fn nullable(ts: String) -> String {
    if ts.ends_with("| null") {
        ts
    } else {
        format!("{ts} | null")
    }
}

/// Wrap a union or intersection so a postfix `[]` applies to all of it.
fn parenthesize(ts: String) -> String {
    let mut depth = 0i32;
    for c in ts.chars() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth -= 1,
            '|' | '&' if depth == 0 => return format!("({ts})"),
            _ => {}
        }
    }
    ts
}

/// JavaScript string literal.
pub(super) fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

pub(super) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Property or enum member name, quoted when it is not an identifier.
pub(super) fn property(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

/// `Enum.Member`, or `Enum["member"]` for names that need quoting.
pub(super) fn member_access(owner: &str, member: &str) -> String {
    if is_identifier(member) {
        format!("{owner}.{member}")
    } else {
        format!("{owner}[{}]", quote(member))
    }
}
