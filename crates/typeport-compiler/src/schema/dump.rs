//! Dump helpers for schema inspection and testing.

use std::fmt::Write;

use crate::graph::Ty;

use super::{Schema, Shape};

impl Schema {
    /// One line per emitted node in emission order, details indented below,
    /// then the back-references.
    ///
    /// ```text
    /// pkg.Node struct
    ///   Children: []pkg.Node
    /// back-references:
    ///   pkg.Node -> pkg.Node
    /// ```
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    fn format(&self, w: &mut String) -> std::fmt::Result {
        for (_, node) in self.emitted() {
            writeln!(w, "{} {}", node.identity, node.shape.describe())?;
            match &node.shape {
                Shape::Alias(alias) => match alias.format {
                    Some(format) => writeln!(w, "  = {} ({format:?})", alias.primitive.keyword())?,
                    None => writeln!(w, "  = {}", alias.primitive.keyword())?,
                },
                Shape::Struct(s) => {
                    for field in &s.fields {
                        writeln!(w, "  {}: {}", field.name, self.ty_text(&field.ty))?;
                    }
                    for union in &s.implements {
                        writeln!(w, "  implements {}", self.node(*union).identity)?;
                    }
                }
                Shape::Enum(e) => {
                    for entry in &e.entries {
                        writeln!(w, "  {} = {} {:?}", entry.symbol, entry.value, entry.label)?;
                    }
                }
                Shape::Union(u) => {
                    for v in &u.variants {
                        writeln!(w, "  {} => {}", v.tag, self.node(v.implementor).identity)?;
                    }
                }
                Shape::External(ext) => {
                    for (target, path) in &ext.imports {
                        writeln!(w, "  {target}: {path}")?;
                    }
                }
                Shape::Generic { .. } | Shape::Opaque => {}
            }
        }

        let mut back_refs = self.back_references().peekable();
        if back_refs.peek().is_some() {
            writeln!(w, "back-references:")?;
            for (from, to) in back_refs {
                writeln!(
                    w,
                    "  {} -> {}",
                    self.node(from).identity,
                    self.node(to).identity
                )?;
            }
        }
        Ok(())
    }

    fn ty_text(&self, ty: &Ty) -> String {
        match ty {
            Ty::Primitive(p) => p.keyword().to_string(),
            Ty::Node(id) => self.node(*id).identity.to_string(),
            Ty::Array { elem, len } => format!("[{len}]{}", self.ty_text(elem)),
            Ty::Slice(elem) => format!("[]{}", self.ty_text(elem)),
            Ty::Map { key, value } => format!("map[{}]{}", self.ty_text(key), self.ty_text(value)),
            Ty::Optional(inner) => format!("?{}", self.ty_text(inner)),
        }
    }
}
