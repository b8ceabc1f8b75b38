//! Declaration rendering.

use std::collections::HashSet;

use typeport_core::{EnumBacking, EnumValue, Target};

use crate::graph::NodeId;
use crate::schema::{AliasShape, EnumShape, ExternalShape, Shape, StructShape, UnionShape};
use crate::typegen::{Block, leading_comment};

use super::Emitter;
use super::convert::{enum_member_names, is_nullable, member_name, primitive_to_dart, quote};
use super::emitter::UnionKind;

impl Emitter<'_> {
    /// Extension type over the primitive: a zero-cost wrapper the type checker
    /// keeps apart from the primitive and from other aliases.
    pub(super) fn emit_alias(&mut self, id: NodeId, alias: &AliasShape) {
        let name = self.names.get(id).to_string();
        let primitive = primitive_to_dart(alias.primitive);

        let mut out = leading_comment(self.schema.node(id));
        if let Some(format) = alias.format {
            out.push_str(&format!("// {}\n", format.describe()));
        }
        if self.config.nominal_aliases {
            out.push_str(&format!(
                "extension type const {name}({primitive} value) implements {primitive} {{}}"
            ));
        } else {
            out.push_str(&format!(
                "// distinct from {primitive}, not enforced by the type checker\n"
            ));
            out.push_str(&format!("typedef {name} = {primitive};"));
        }
        self.push(id, name, out);
    }

    /// `(kind enum, getter, enum value)` for each union `id` implements.
    fn overrides(&self, id: NodeId, shape: &StructShape) -> Vec<(String, String, String)> {
        let mut overrides = Vec::new();
        for &union in &shape.implements {
            let (Shape::Union(u), Some(kind)) = (self.schema.shape(union), self.kinds.get(&union))
            else {
                continue;
            };
            if let Some(index) = u.variants.iter().position(|v| v.implementor == id) {
                overrides.push((
                    kind.enum_name.clone(),
                    kind.getter.clone(),
                    kind.members[index].clone(),
                ));
            }
        }
        overrides
    }

    /// Member name per field, distinct from each other, from the union
    /// getters the class overrides, and from import prefixes a member would
    /// shadow inside the class.
    pub(super) fn field_members(&self, id: NodeId, shape: &StructShape) -> Vec<String> {
        let mut taken: HashSet<String> = self
            .overrides(id, shape)
            .into_iter()
            .map(|(_, getter, _)| getter)
            .chain(self.prefixes.values().cloned())
            .collect();
        shape
            .fields
            .iter()
            .map(|field| {
                let mut member = member_name(&field.name);
                while !taken.insert(member.clone()) {
                    member.push('_');
                }
                member
            })
            .collect()
    }

    pub(super) fn emit_class(&mut self, id: NodeId, shape: &StructShape) {
        let name = self.names.get(id).to_string();
        let mut out = leading_comment(self.schema.node(id));

        let overrides = self.overrides(id, shape);
        let fields: Vec<(String, String)> = self
            .field_members(id, shape)
            .into_iter()
            .zip(&shape.fields)
            .map(|(member, field)| (member, self.field_to_dart(id, field)))
            .collect();

        out.push_str(&format!("class {name}"));
        if !shape.implements.is_empty() {
            let unions: Vec<&str> = shape.implements.iter().map(|u| self.names.get(*u)).collect();
            out.push_str(&format!(" implements {}", unions.join(", ")));
        }
        out.push_str(" {\n");

        if fields.is_empty() {
            out.push_str(&format!("  const {name}();\n"));
        } else {
            let params: Vec<String> = fields
                .iter()
                .map(|(member, ty)| {
                    if is_nullable(ty) {
                        format!("this.{member}")
                    } else {
                        format!("required this.{member}")
                    }
                })
                .collect();
            out.push_str(&format!("  const {name}({{{}}});\n\n", params.join(", ")));
            for (member, ty) in &fields {
                out.push_str(&format!("  final {ty} {member};\n"));
            }
        }

        for (kind_enum, getter, tag) in &overrides {
            out.push_str(&format!(
                "\n  @override\n  {kind_enum} get {getter} => {kind_enum}.{tag};\n"
            ));
        }
        out.push('}');
        self.push(id, name, out);
    }

    /// Enhanced enum carrying the declared value and the label.
    pub(super) fn emit_enum(&mut self, id: NodeId, shape: &EnumShape) {
        let name = self.names.get(id).to_string();
        let mut out = leading_comment(self.schema.node(id));
        out.push_str(&format!("enum {name} {{\n"));

        let members = enum_member_names(shape.entries.iter().map(|e| e.symbol.as_str()));
        let entries: Vec<String> = shape
            .entries
            .iter()
            .zip(members)
            .map(|(entry, member)| {
                let value = match &entry.value {
                    EnumValue::Int(v) => v.to_string(),
                    EnumValue::Str(s) => quote(s),
                };
                format!("  {member}({value}, {})", quote(&entry.label))
            })
            .collect();
        out.push_str(&entries.join(",\n"));

        let backing = match shape.backing {
            EnumBacking::Int => "int",
            EnumBacking::String => "String",
        };
        out.push_str(&format!(
            ";\n\n  const {name}(this.value, this.label);\n\n  final {backing} value;\n  final String label;\n}}"
        ));
        self.push(id, name, out);
    }

    /// Kind enum over the tags, then a sealed class its members implement.
    pub(super) fn emit_union(&mut self, id: NodeId, shape: &UnionShape) {
        let name = self.names.get(id).to_string();

        let Some(UnionKind {
            enum_name: kind_enum,
            getter,
            members,
        }) = self.kinds.get(&id).cloned()
        else {
            let mut out = leading_comment(self.schema.node(id));
            out.push_str(&format!("sealed class {name} {{}}"));
            self.push(id, name, out);
            return;
        };

        let mut out = format!("enum {kind_enum} {{\n");
        let tags: Vec<String> = shape
            .variants
            .iter()
            .zip(members)
            .map(|(v, member)| format!("  {member}({})", quote(&v.tag)))
            .collect();
        out.push_str(&tags.join(",\n"));
        out.push_str(&format!(
            ";\n\n  const {kind_enum}(this.tag);\n\n  final String tag;\n}}"
        ));
        self.push(id, kind_enum.clone(), out);

        let mut out = leading_comment(self.schema.node(id));
        out.push_str(&format!(
            "sealed class {name} {{\n  {kind_enum} get {getter};\n}}"
        ));
        self.push(id, name, out);
    }

    pub(super) fn emit_opaque(&mut self, id: NodeId) {
        let name = self.names.get(id).to_string();
        let mut out = leading_comment(self.schema.node(id));
        out.push_str(&format!("typedef {name} = dynamic;"));
        self.push(id, name, out);
    }

    /// External declarations are never re-emitted; at most they are imported.
    pub(super) fn emit_import(&mut self, id: NodeId, shape: &ExternalShape) {
        let Some(path) = shape.import_for(Target::Dart) else {
            return;
        };
        let content = match self.prefixes.get(&id) {
            Some(prefix) => format!("import {} as {prefix};", quote(path)),
            None => format!("import {};", quote(path)),
        };
        if self.blocks.iter().any(|b| b.priority && b.content == content) {
            return;
        }
        self.blocks.push(Block {
            origin: Some(self.schema.node(id).identity.clone()),
            name: path.to_string(),
            content,
            priority: true,
        });
    }
}
