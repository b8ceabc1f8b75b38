//! Target names for schema nodes.

use std::collections::{BTreeSet, HashMap};

use typeport_core::utils::{module_tail, to_pascal_case};

use crate::graph::{NodeId, Ty};
use crate::schema::{Schema, Shape, StructShape};

/// Unique name per emitted node, assigned in emission order so earlier
/// declarations keep their plain names.
pub(crate) struct Names {
    names: HashMap<NodeId, String>,
    used: BTreeSet<String>,
}

impl Names {
    /// `reserved` are identifiers the target itself defines.
    pub(crate) fn assign(schema: &Schema, reserved: &[&str]) -> Self {
        let mut names = Self {
            names: HashMap::new(),
            used: reserved.iter().map(|r| r.to_string()).collect(),
        };

        // Externals go first so they keep their imported name where they can;
        // the emitters alias the import of any that had to be renamed.
        for (id, node) in schema.emitted() {
            if let Shape::External(_) = node.shape {
                let name = names.unique_name(node.identity.name(), node.identity.module());
                names.names.insert(id, name);
            }
        }

        for (id, node) in schema.emitted() {
            if names.names.contains_key(&id) {
                continue;
            }
            let base = base_name(schema, id);
            let name = names.unique_name(&base, node.identity.module());
            names.names.insert(id, name);
        }
        names
    }

    pub(crate) fn get(&self, id: NodeId) -> &str {
        self.names.get(&id).map_or("unknown", String::as_str)
    }

    /// Whether an external could not keep its local name.
    pub(crate) fn is_aliased(&self, schema: &Schema, id: NodeId) -> bool {
        self.get(id) != schema.node(id).identity.name()
    }

    /// Replace how `id` is referenced, e.g. through an import prefix.
    pub(crate) fn set(&mut self, id: NodeId, reference: String) {
        self.names.insert(id, reference);
    }

    /// Claim a name for a companion declaration (label tables, kind enums).
    pub(crate) fn claim(&mut self, base: &str) -> String {
        self.unique_name(base, "")
    }

    fn unique_name(&mut self, base: &str, module: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }

        let prefixed = format!("{}{}", to_pascal_case(module_tail(module)), base);
        if self.used.insert(prefixed.clone()) {
            return prefixed;
        }

        let mut counter = 2;
        loop {
            let name = format!("{}{}", prefixed, counter);
            if self.used.insert(name.clone()) {
                return name;
            }
            counter += 1;
        }
    }
}

/// Local name, or for a monomorphized struct the generic's name followed by
/// the mangled argument (`Holder` + `IdCamp`).
pub(crate) fn base_name(schema: &Schema, id: NodeId) -> String {
    let node = schema.node(id);
    match &node.shape {
        Shape::Struct(StructShape {
            instance_of: Some(inst),
            ..
        }) => format!("{}{}", base_name(schema, inst.generic), mangle(schema, &inst.arg)),
        _ => node.identity.name().to_string(),
    }
}

fn mangle(schema: &Schema, ty: &Ty) -> String {
    match ty {
        Ty::Primitive(p) => to_pascal_case(p.keyword()),
        Ty::Node(id) => to_pascal_case(&base_name(schema, *id)),
        Ty::Array { elem, len } => format!("Array{len}{}", mangle(schema, elem)),
        Ty::Slice(elem) => format!("List{}", mangle(schema, elem)),
        Ty::Map { key, value } => format!("Map{}{}", mangle(schema, key), mangle(schema, value)),
        Ty::Optional(inner) => format!("Opt{}", mangle(schema, inner)),
    }
}
