#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Declaration model for typeport.
//!
//! A front-end collects the types of a source program and hands them over as a
//! flat stream of [`Declaration`]s. Each declaration has a unique [`Identity`]
//! and refers to others only by identity; nothing here is resolved yet.
//!
//! Streams can be built in code with the shorthand constructors or loaded from
//! JSON with [`parse_declarations`].

mod decl;
mod identity;
pub mod utils;

#[cfg(test)]
mod decl_tests;

pub use decl::{
    DeclKind, Declaration, EnumBacking, EnumDecl, EnumMember, EnumValue, ExternalDecl, Field,
    Format, GenericDecl, Primitive, StructDecl, Target, TypeExpr, UnionDecl, UnionMember,
};
pub use identity::{Identity, ParseIdentityError};

/// Parse a JSON declaration stream.
pub fn parse_declarations(json: &str) -> Result<Vec<Declaration>, serde_json::Error> {
    serde_json::from_str(json)
}
