//! Declaration rendering.

use typeport_core::{EnumValue, Target};

use crate::graph::NodeId;
use crate::schema::{AliasShape, EnumShape, ExternalShape, StructShape, UnionShape};
use crate::typegen::{Block, leading_comment};

use super::Emitter;
use super::convert::{member_access, primitive_to_ts, property, quote};

impl Emitter<'_> {
    /// Branded alias: assignable to its primitive, but not from it or from
    /// another alias over the same primitive.
    pub(super) fn emit_alias(&mut self, id: NodeId, alias: &AliasShape) {
        let node = self.schema.node(id);
        let name = self.names.get(id).to_string();
        let primitive = primitive_to_ts(alias.primitive);

        let mut out = leading_comment(node);
        if let Some(format) = alias.format {
            out.push_str(&format!("// {}\n", format.describe()));
        }
        if self.config.brand_aliases {
            out.push_str(&format!(
                "{}type {} = {} & {{ readonly __brand: {} }};",
                self.export(),
                name,
                primitive,
                quote(&node.identity.to_string())
            ));
        } else {
            out.push_str(&format!(
                "// distinct from {primitive}, not enforced by the type checker\n"
            ));
            out.push_str(&format!("{}type {} = {};", self.export(), name, primitive));
        }
        self.push(id, name, out);
    }

    pub(super) fn emit_interface(&mut self, id: NodeId, shape: &StructShape) {
        let name = self.names.get(id).to_string();
        let mut out = leading_comment(self.schema.node(id));

        if shape.fields.is_empty() {
            out.push_str(&format!(
                "{}type {} = Record<string, never>;",
                self.export(),
                name
            ));
        } else {
            out.push_str(&format!("{}interface {} {{\n", self.export(), name));
            for field in &shape.fields {
                out.push_str(&format!(
                    "  {}: {};\n",
                    property(&field.name),
                    self.field_to_ts(id, field)
                ));
            }
            out.push('}');
        }
        self.push(id, name, out);
    }

    /// `enum` with the declared literals, then the label table.
    pub(super) fn emit_enum(&mut self, id: NodeId, shape: &EnumShape) {
        let name = self.names.get(id).to_string();
        let mut out = leading_comment(self.schema.node(id));
        out.push_str(&format!("{}enum {} {{\n", self.export(), name));
        for entry in &shape.entries {
            let value = match &entry.value {
                EnumValue::Int(v) => v.to_string(),
                EnumValue::Str(s) => quote(s),
            };
            out.push_str(&format!("  {} = {},\n", property(&entry.symbol), value));
        }
        out.push('}');
        self.push(id, name.clone(), out);

        let labels_name = self.companion(id);
        let mut out = format!(
            "{}const {}: {{ [key in {}]: string }} = {{\n",
            self.export(),
            labels_name,
            name
        );
        for entry in &shape.entries {
            out.push_str(&format!(
                "  [{}]: {},\n",
                member_access(&name, &entry.symbol),
                quote(&entry.label)
            ));
        }
        out.push_str("};");
        self.push(id, labels_name, out);
    }

    /// Kind enum over the tags, then the discriminated union of
    /// `{ Kind, Data }` pairs.
    pub(super) fn emit_union(&mut self, id: NodeId, shape: &UnionShape) {
        let name = self.names.get(id).to_string();

        if shape.variants.is_empty() {
            let mut out = leading_comment(self.schema.node(id));
            out.push_str(&format!("{}type {} = never;", self.export(), name));
            self.push(id, name, out);
            return;
        }

        let kind_name = self.companion(id);
        let mut out = format!("{}enum {} {{\n", self.export(), kind_name);
        for variant in &shape.variants {
            out.push_str(&format!(
                "  {} = {},\n",
                property(&variant.tag),
                quote(&variant.tag)
            ));
        }
        out.push('}');
        self.push(id, kind_name.clone(), out);

        let mut out = leading_comment(self.schema.node(id));
        out.push_str(&format!("{}type {} =", self.export(), name));
        for variant in &shape.variants {
            out.push_str(&format!(
                "\n  | {{ Kind: {}; Data: {} }}",
                member_access(&kind_name, &variant.tag),
                self.names.get(variant.implementor)
            ));
        }
        out.push(';');
        self.push(id, name, out);
    }

    pub(super) fn emit_opaque(&mut self, id: NodeId) {
        let name = self.names.get(id).to_string();
        let mut out = leading_comment(self.schema.node(id));
        out.push_str(&format!("{}type {} = unknown;", self.export(), name));
        self.push(id, name, out);
    }

    /// External declarations are never re-emitted; at most they are imported.
    pub(super) fn emit_import(&mut self, id: NodeId, shape: &ExternalShape) {
        let Some(path) = shape.import_for(Target::TypeScript) else {
            return;
        };
        let path = path.strip_suffix(".ts").unwrap_or(path);
        let name = self.names.get(id);
        let binding = if self.names.is_aliased(self.schema, id) {
            format!("{} as {name}", self.schema.node(id).identity.name())
        } else {
            name.to_string()
        };
        let content = format!("import {{ {binding} }} from {};", quote(path));
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

    fn companion(&self, id: NodeId) -> String {
        self.companions
            .get(&id)
            .cloned()
            .unwrap_or_else(|| self.names.get(id).to_string())
    }
}
