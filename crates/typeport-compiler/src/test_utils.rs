//! Test utilities: identities in a fixed module and whole-pipeline shortcuts.

use typeport_core::{Declaration, Identity, TypeExpr};

use crate::pipeline::{Analysis, Pipeline};
use crate::typegen::TargetConfig;
use crate::{Error, Options};

/// Identity `pkg.<name>`.
pub fn id(name: &str) -> Identity {
    Identity::new("pkg", name)
}

/// Reference to `pkg.<name>`.
pub fn named(name: &str) -> TypeExpr {
    TypeExpr::Named(id(name))
}

pub fn analyze(decls: Vec<Declaration>) -> Analysis {
    analyze_with(decls, Options::default())
}

pub fn analyze_with(decls: Vec<Declaration>, options: Options) -> Analysis {
    match Pipeline::new(decls).with_options(options).exec() {
        Ok(analysis) => analysis,
        Err(err) => panic!("expected valid declarations, got: {err}"),
    }
}

pub fn analyze_err(decls: Vec<Declaration>) -> Error {
    match Pipeline::new(decls).exec() {
        Ok(analysis) => panic!(
            "expected an error, got a schema:\n{}",
            analysis.schema().dump()
        ),
        Err(err) => err,
    }
}

pub fn dump(decls: Vec<Declaration>) -> String {
    analyze(decls).schema().dump()
}

pub fn typescript(decls: Vec<Declaration>) -> String {
    analyze(decls).emit(&TargetConfig::typescript()).render()
}

pub fn dart(decls: Vec<Declaration>) -> String {
    analyze(decls).emit(&TargetConfig::dart()).render()
}
