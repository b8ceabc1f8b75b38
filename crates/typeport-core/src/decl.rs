//! Declaration model: what a front-end hands over for translation.
//!
//! Every declaration is immutable once built. Type expressions refer to other
//! declarations by [`Identity`] only; turning those references into graph
//! edges is the resolver's job.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Identity;

/// Output language of an emitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    TypeScript,
    Dart,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::TypeScript => write!(f, "typescript"),
            Target::Dart => write!(f, "dart"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Bool,
    Int,
    Float,
    String,
}

impl Primitive {
    /// Source-level spelling, used in composite identities.
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::String => "string",
        }
    }
}

/// Wire format carried by a scalar alias (dates travel as strings).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Date,
    Timestamp,
}

impl Format {
    pub fn describe(self) -> &'static str {
        match self {
            Format::Date => "ISO 8601 date (YYYY-MM-DD)",
            Format::Timestamp => "ISO 8601 date-time",
        }
    }
}

/// Type of a field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeExpr {
    Primitive(Primitive),
    /// Reference to another declaration.
    Named(Identity),
    /// Fixed-length sequence.
    Array { elem: Box<TypeExpr>, len: usize },
    /// Variable-length sequence, nullable by convention.
    Slice(Box<TypeExpr>),
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Optional(Box<TypeExpr>),
    /// Generic placeholder; only meaningful inside a generic body.
    Param(String),
    /// A generic applied to one concrete argument.
    Instance {
        generic: Identity,
        arg: Box<TypeExpr>,
    },
}

impl TypeExpr {
    pub fn named(id: Identity) -> Self {
        TypeExpr::Named(id)
    }

    pub fn array(elem: TypeExpr, len: usize) -> Self {
        TypeExpr::Array {
            elem: Box::new(elem),
            len,
        }
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice(Box::new(elem))
    }

    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        TypeExpr::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Optional(Box::new(inner))
    }

    pub fn param(name: impl Into<String>) -> Self {
        TypeExpr::Param(name.into())
    }

    pub fn instance(generic: Identity, arg: TypeExpr) -> Self {
        TypeExpr::Instance {
            generic,
            arg: Box::new(arg),
        }
    }
}

impl From<Primitive> for TypeExpr {
    fn from(p: Primitive) -> Self {
        TypeExpr::Primitive(p)
    }
}

impl From<Identity> for TypeExpr {
    fn from(id: Identity) -> Self {
        TypeExpr::Named(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// Contributes its fields to the parent when it names a struct.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub embedded: bool,
    /// Targets for which this field is rendered as the unknown type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub opaque_for: Vec<Target>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeExpr>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            embedded: false,
            opaque_for: Vec::new(),
        }
    }

    pub fn as_embedded(mut self) -> Self {
        self.embedded = true;
        self
    }

    pub fn opaque_in(mut self, target: Target) -> Self {
        if !self.opaque_for.contains(&target) {
            self.opaque_for.push(target);
        }
        self
    }

    pub fn is_opaque_for(&self, target: Target) -> bool {
        self.opaque_for.contains(&target)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumBacking {
    Int,
    String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Int(i64),
    Str(String),
}

impl EnumValue {
    pub fn backing(&self) -> EnumBacking {
        match self {
            EnumValue::Int(_) => EnumBacking::Int,
            EnumValue::Str(_) => EnumBacking::String,
        }
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumValue::Int(v) => write!(f, "{v}"),
            EnumValue::Str(s) => write!(f, "{s:?}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub symbol: String,
    pub value: EnumValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EnumMember {
    pub fn int(symbol: impl Into<String>, value: i64) -> Self {
        Self {
            symbol: symbol.into(),
            value: EnumValue::Int(value),
            label: None,
        }
    }

    pub fn string(symbol: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            value: EnumValue::Str(value.into()),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub backing: EnumBacking,
    pub members: Vec<EnumMember>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionMember {
    /// Discriminant value selecting this implementor.
    pub tag: String,
    pub implementor: Identity,
}

impl UnionMember {
    pub fn new(tag: impl Into<String>, implementor: Identity) -> Self {
        Self {
            tag: tag.into(),
            implementor,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionDecl {
    pub members: Vec<UnionMember>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDecl {
    pub fields: Vec<Field>,
    /// Unions this struct claims membership in. Each claim must be matched by
    /// the union's own member list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<Identity>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericDecl {
    pub param: String,
    pub fields: Vec<Field>,
    /// Concrete arguments observed in the declaration stream.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TypeExpr>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDecl {
    /// Import path per target. Targets without an entry reference the name bare.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub imports: IndexMap<Target, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclKind {
    ScalarAlias {
        primitive: Primitive,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<Format>,
    },
    Struct(StructDecl),
    Enum(EnumDecl),
    Union(UnionDecl),
    Generic(GenericDecl),
    Opaque,
    External(ExternalDecl),
}

impl DeclKind {
    pub fn describe(&self) -> &'static str {
        match self {
            DeclKind::ScalarAlias { .. } => "scalar alias",
            DeclKind::Struct(_) => "struct",
            DeclKind::Enum(_) => "enum",
            DeclKind::Union(_) => "union",
            DeclKind::Generic(_) => "generic",
            DeclKind::Opaque => "opaque",
            DeclKind::External(_) => "external",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub id: Identity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(flatten)]
    pub kind: DeclKind,
}

impl Declaration {
    pub fn new(id: Identity, kind: DeclKind) -> Self {
        Self { id, doc: None, kind }
    }

    pub fn scalar_alias(id: Identity, primitive: Primitive) -> Self {
        Self::new(
            id,
            DeclKind::ScalarAlias {
                primitive,
                format: None,
            },
        )
    }

    pub fn formatted_alias(id: Identity, primitive: Primitive, format: Format) -> Self {
        Self::new(
            id,
            DeclKind::ScalarAlias {
                primitive,
                format: Some(format),
            },
        )
    }

    pub fn structure(id: Identity, fields: Vec<Field>) -> Self {
        Self::new(
            id,
            DeclKind::Struct(StructDecl {
                fields,
                implements: Vec::new(),
            }),
        )
    }

    pub fn enumeration(id: Identity, backing: EnumBacking, members: Vec<EnumMember>) -> Self {
        Self::new(id, DeclKind::Enum(EnumDecl { backing, members }))
    }

    pub fn union(id: Identity, members: Vec<UnionMember>) -> Self {
        Self::new(id, DeclKind::Union(UnionDecl { members }))
    }

    pub fn generic(
        id: Identity,
        param: impl Into<String>,
        fields: Vec<Field>,
        arguments: Vec<TypeExpr>,
    ) -> Self {
        Self::new(
            id,
            DeclKind::Generic(GenericDecl {
                param: param.into(),
                fields,
                arguments,
            }),
        )
    }

    pub fn opaque(id: Identity) -> Self {
        Self::new(id, DeclKind::Opaque)
    }

    pub fn external(id: Identity, imports: impl IntoIterator<Item = (Target, String)>) -> Self {
        Self::new(
            id,
            DeclKind::External(ExternalDecl {
                imports: imports.into_iter().collect(),
            }),
        )
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Adds a union membership claim. No effect on non-struct declarations.
    pub fn implementing(mut self, union: Identity) -> Self {
        if let DeclKind::Struct(s) = &mut self.kind {
            s.implements.push(union);
        }
        self
    }

    /// Whether `other` declares the same thing. Documentation is ignored.
    pub fn same_shape(&self, other: &Declaration) -> bool {
        self.id == other.id && self.kind == other.kind
    }
}
