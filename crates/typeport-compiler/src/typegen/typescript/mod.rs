//! TypeScript declarations from a schema.
//!
//! Structs become interfaces, enums become `enum` plus a label table, unions
//! become a kind enum plus a discriminated union type, and scalar aliases
//! become branded types.

mod config;
mod convert;
mod emitter;
mod render;

#[cfg(test)]
mod typescript_tests;

pub use config::Config;
pub use emitter::Emitter;

use crate::schema::Schema;
use crate::typegen::Output;

/// Emit TypeScript with the default config.
pub fn emit(schema: &Schema) -> Output {
    emit_with_config(schema, Config::default())
}

pub fn emit_with_config(schema: &Schema, config: Config) -> Output {
    crate::typegen::emit(schema, &crate::typegen::TargetConfig::TypeScript(config))
}
