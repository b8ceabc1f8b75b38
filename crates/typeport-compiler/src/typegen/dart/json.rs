//! JSON codec: a `<stem>FromJson` / `<stem>ToJson` pair per declaration.
//!
//! Decoding is lenient where the wire format is: a missing list or map is
//! empty, a missing string is `''`. Unions travel wrapped as
//! `{"Kind": tag, "Data": member}`. Externals are not emitted; their codec is
//! expected next to the imported type.

use typeport_core::{EnumBacking, Primitive, Target};

use crate::graph::{NodeId, Ty};
use crate::schema::{AliasShape, EnumShape, Shape, StructShape, UnionShape};

use super::Emitter;
use super::convert::{primitive_to_dart, quote};

impl Emitter<'_> {
    pub(super) fn emit_codec(&mut self, id: NodeId, shape: &Shape) {
        let code = match shape {
            Shape::Alias(alias) => self.alias_codec(id, alias),
            Shape::Struct(s) => self.struct_codec(id, s),
            Shape::Enum(e) => self.enum_codec(id, e),
            Shape::Union(u) => self.union_codec(id, u),
            Shape::Opaque => {
                let (name, stem) = (self.names.get(id), self.codec(id));
                format!(
                    "{name} {stem}FromJson(dynamic json) => json;\n\n\
                     dynamic {stem}ToJson({name} item) => item;"
                )
            }
            Shape::External(_) | Shape::Generic { .. } => return,
        };
        let name = format!("{}FromJson", self.codec(id));
        self.push(id, name, code);
    }

    fn codec(&self, id: NodeId) -> &str {
        self.codecs.get(&id).map_or("unknown", String::as_str)
    }

    fn alias_codec(&self, id: NodeId, alias: &AliasShape) -> String {
        let (name, stem) = (self.names.get(id), self.codec(id));
        let primitive = primitive_to_dart(alias.primitive);
        let value = decode_primitive(alias.primitive, "json");
        if self.config.nominal_aliases {
            format!(
                "{name} {stem}FromJson(dynamic json) => {name}({value});\n\n\
                 {primitive} {stem}ToJson({name} item) => item.value;"
            )
        } else {
            format!(
                "{name} {stem}FromJson(dynamic json) => {value};\n\n\
                 {primitive} {stem}ToJson({name} item) => item;"
            )
        }
    }

    fn struct_codec(&self, id: NodeId, shape: &StructShape) -> String {
        let (name, stem) = (self.names.get(id), self.codec(id));
        if shape.fields.is_empty() {
            return format!(
                "{name} {stem}FromJson(dynamic json) => const {name}();\n\n\
                 Map<String, dynamic> {stem}ToJson({name} item) => {{}};"
            );
        }

        let mut from = format!(
            "{name} {stem}FromJson(dynamic json) {{\n  \
             final fields = json as Map<String, dynamic>;\n  \
             return {name}(\n"
        );
        let mut to = format!("Map<String, dynamic> {stem}ToJson({name} item) {{\n  return {{\n");
        for (field, member) in shape.fields.iter().zip(self.field_members(id, shape)) {
            let key = quote(&field.name);
            let source = format!("fields[{key}]");
            let target = format!("item.{member}");
            // Opaque values pass through untouched.
            let (decoded, encoded) = if field.is_opaque_for(Target::Dart) {
                (source, target)
            } else {
                let ty = self.schema.field_ty(id, &field.ty);
                (self.decode(&ty, &source, 0), self.encode(&ty, &target, 0))
            };
            from.push_str(&format!("    {member}: {decoded},\n"));
            to.push_str(&format!("    {key}: {encoded},\n"));
        }
        from.push_str("  );\n}");
        to.push_str("  };\n}");
        format!("{from}\n\n{to}")
    }

    fn enum_codec(&self, id: NodeId, shape: &EnumShape) -> String {
        let (name, stem) = (self.names.get(id), self.codec(id));
        let backing = match shape.backing {
            EnumBacking::Int => "int",
            EnumBacking::String => "String",
        };
        let unknown = quote(&format!("unknown {name} value"));
        format!(
            "{name} {stem}FromJson(dynamic json) => {name}.values.firstWhere(\n      \
             (e) => e.value == json,\n      \
             orElse: () => throw FormatException({unknown}, json),\n    \
             );\n\n\
             {backing} {stem}ToJson({name} item) => item.value;"
        )
    }

    fn union_codec(&self, id: NodeId, shape: &UnionShape) -> String {
        let (name, stem) = (self.names.get(id), self.codec(id));
        if shape.variants.is_empty() {
            let message = quote(&format!("{name} has no members"));
            return format!(
                "{name} {stem}FromJson(dynamic json) => throw FormatException({message}, json);\n\n\
                 Map<String, dynamic> {stem}ToJson({name} item) => throw UnsupportedError({message});"
            );
        }

        let mut from = format!(
            "{name} {stem}FromJson(dynamic json) {{\n  \
             final fields = json as Map<String, dynamic>;\n  \
             final data = fields['Data'];\n  \
             switch (fields['Kind']) {{\n"
        );
        let mut to = format!(
            "Map<String, dynamic> {stem}ToJson({name} item) {{\n  return switch (item) {{\n"
        );
        for variant in &shape.variants {
            let tag = quote(&variant.tag);
            let member = self.names.get(variant.implementor);
            let codec = self.codec(variant.implementor);
            from.push_str(&format!(
                "    case {tag}:\n      return {codec}FromJson(data);\n"
            ));
            to.push_str(&format!(
                "    {member} value => <String, dynamic>{{'Kind': {tag}, 'Data': {codec}ToJson(value)}},\n"
            ));
        }
        let unknown = quote(&format!("unknown {name} kind"));
        from.push_str(&format!(
            "    default:\n      throw FormatException({unknown}, fields['Kind']);\n  }}\n}}"
        ));
        to.push_str("  };\n}");
        format!("{from}\n\n{to}")
    }

    /// Expression reading `ty` from the JSON value `json`. `depth` keeps
    /// closure parameters of nested containers apart.
    fn decode(&self, ty: &Ty, json: &str, depth: usize) -> String {
        match ty {
            Ty::Primitive(p) => decode_primitive(*p, json),
            Ty::Node(id) => format!("{}FromJson({json})", self.codec(*id)),
            Ty::Optional(inner) => {
                format!("{json} == null ? null : {}", self.decode(inner, json, depth))
            }
            Ty::Slice(elem) => {
                let e = format!("e{depth}");
                format!(
                    "({json} as List<dynamic>?)?.map(({e}) => {}).toList() ?? []",
                    self.decode(elem, &e, depth + 1)
                )
            }
            Ty::Map { key, value } => {
                let (k, v) = (format!("k{depth}"), format!("v{depth}"));
                format!(
                    "({json} as Map<String, dynamic>?)?.map(({k}, {v}) => MapEntry({}, {})) ?? {{}}",
                    self.decode_key(key, &k),
                    self.decode(value, &v, depth + 1)
                )
            }
            Ty::Array { elem, len } => {
                if *len == 0 {
                    return "()".to_string();
                }
                let vars: Vec<String> = (0..*len).map(|i| format!("a{depth}_{i}")).collect();
                let pattern: Vec<String> = vars.iter().map(|v| format!("final {v}")).collect();
                let items: Vec<String> = vars
                    .iter()
                    .map(|v| self.decode(elem, v, depth + 1))
                    .collect();
                let record = if *len == 1 {
                    format!("({},)", items[0])
                } else {
                    format!("({})", items.join(", "))
                };
                format!(
                    "switch ({json} as List<dynamic>) {{ [{}] => {record}, _ => throw FormatException('expected {len} elements', {json}) }}",
                    pattern.join(", ")
                )
            }
        }
    }

    /// JSON object keys are strings; parse them back into the key type.
    fn decode_key(&self, key: &Ty, k: &str) -> String {
        match key {
            Ty::Primitive(p) => parse_primitive(*p, k),
            Ty::Node(id) => {
                let arg = match self.schema.shape(*id) {
                    Shape::Alias(alias) => parse_primitive(alias.primitive, k),
                    Shape::Enum(e) if matches!(e.backing, EnumBacking::Int) => {
                        format!("int.parse({k})")
                    }
                    _ => k.to_string(),
                };
                format!("{}FromJson({arg})", self.codec(*id))
            }
            // Composite keys are rejected during elaboration.
            _ => k.to_string(),
        }
    }

    /// Expression writing the Dart value `value` of type `ty` as JSON.
    fn encode(&self, ty: &Ty, value: &str, depth: usize) -> String {
        match ty {
            Ty::Primitive(_) => value.to_string(),
            Ty::Node(id) => format!("{}ToJson({value})", self.codec(*id)),
            Ty::Optional(inner) => {
                // Locals are promoted by the null check; fields are not.
                let present = if is_local(value) {
                    value.to_string()
                } else {
                    format!("{value}!")
                };
                let encoded = self.encode(inner, &present, depth);
                if encoded == present {
                    value.to_string()
                } else {
                    format!("{value} == null ? null : {encoded}")
                }
            }
            Ty::Slice(elem) => {
                let e = format!("e{depth}");
                let item = self.encode(elem, &e, depth + 1);
                if item == e {
                    value.to_string()
                } else {
                    format!("{value}.map(({e}) => {item}).toList()")
                }
            }
            Ty::Map { key, value: elem } => {
                let (k, v) = (format!("k{depth}"), format!("v{depth}"));
                let key_json = match key.as_ref() {
                    Ty::Primitive(Primitive::String) => k.clone(),
                    other => format!("{}.toString()", self.encode(other, &k, depth + 1)),
                };
                let elem_json = self.encode(elem, &v, depth + 1);
                if key_json == k && elem_json == v {
                    value.to_string()
                } else {
                    format!("{value}.map(({k}, {v}) => MapEntry({key_json}, {elem_json}))")
                }
            }
            Ty::Array { elem, len } => {
                let items: Vec<String> = (1..=*len)
                    .map(|i| self.encode(elem, &format!("{value}.${i}"), depth))
                    .collect();
                format!("[{}]", items.join(", "))
            }
        }
    }
}

fn decode_primitive(p: Primitive, json: &str) -> String {
    match p {
        Primitive::Bool => format!("{json} as bool"),
        Primitive::Int => format!("{json} as int"),
        // Integral doubles arrive as `int`.
        Primitive::Float => format!("({json} as num).toDouble()"),
        Primitive::String => format!("({json} as String?) ?? ''"),
    }
}

fn parse_primitive(p: Primitive, k: &str) -> String {
    match p {
        Primitive::Bool => format!("{k} == 'true'"),
        Primitive::Int => format!("int.parse({k})"),
        Primitive::Float => format!("double.parse({k})"),
        Primitive::String => k.to_string(),
    }
}

fn is_local(expr: &str) -> bool {
    expr.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
