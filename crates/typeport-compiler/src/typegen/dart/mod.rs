//! Dart declarations from a schema.
//!
//! Structs become classes with final fields and a const constructor, enums
//! become enhanced enums carrying value and label, unions become a sealed
//! class implemented by their members, and scalar aliases become extension
//! types. With `json` set in the config every declaration also gets a JSON codec.

mod config;
mod convert;
mod emitter;
mod json;
mod render;


pub use config::Config;
pub use emitter::Emitter;

use crate::schema::Schema;
use crate::typegen::Output;

/// Emit Dart with the default config.
pub fn emit(schema: &Schema) -> Output {
    emit_with_config(schema, Config::default())
}

pub fn emit_with_config(schema: &Schema, config: Config) -> Output {
    crate::typegen::emit(schema, &crate::typegen::TargetConfig::Dart(config))
}
