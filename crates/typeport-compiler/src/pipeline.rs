//! Runs every stage, from declarations to an emittable [`Schema`].

use tracing::{debug, debug_span};
use typeport_core::Declaration;

use crate::diagnostics::Diagnostics;
use crate::graph::{GraphBuilder, analyze_order, expand_generics};
use crate::options::Options;
use crate::schema::{Schema, elaborate};
use crate::typegen::{self, Output, TargetConfig};
use crate::{Error, Result};

/// Declarations plus the options to translate them with.
///
/// Call [`exec`](Self::exec) to run the stages.
#[derive(Debug, Clone)]
pub struct Pipeline {
    declarations: Vec<Declaration>,
    options: Options,
}

impl Pipeline {
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self {
            declarations,
            options: Options::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Resolve, expand generics, order, and elaborate.
    ///
    /// Returns `Err` on the first fatal problem; warnings and notes are
    /// collected into the [`Analysis`].
    pub fn exec(self) -> Result<Analysis> {
        let _span = debug_span!("pipeline", declarations = self.declarations.len()).entered();
        let mut diagnostics = Diagnostics::new();

        let mut builder = GraphBuilder::new(self.options.unresolved);
        for decl in self.declarations {
            builder.register(decl)?;
        }
        let (graph, diags) = builder.finish()?;
        diagnostics.extend(diags);

        let (graph, diags) = expand_generics(graph, &self.options)?;
        diagnostics.extend(diags);

        let order = analyze_order(&graph)?;

        let (schema, diags) = elaborate(graph, order, &self.options)?;
        diagnostics.extend(diags);

        debug!(
            emitted = schema.order().len(),
            diagnostics = diagnostics.len(),
            "pipeline finished"
        );
        Ok(Analysis {
            schema,
            diagnostics,
        })
    }
}

/// A successful run: the schema every target is emitted from, and what was
/// reported along the way.
#[derive(Debug, Clone)]
pub struct Analysis {
    schema: Schema,
    diagnostics: Diagnostics,
}

impl Analysis {
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn emit(&self, config: &TargetConfig) -> Output {
        typegen::emit(&self.schema, config)
    }

    /// Emit several targets concurrently from the same schema.
    pub fn emit_all(&self, configs: &[TargetConfig]) -> Vec<Output> {
        typegen::emit_all(&self.schema, configs)
    }
}

impl TryFrom<Vec<Declaration>> for Analysis {
    type Error = Error;

    fn try_from(declarations: Vec<Declaration>) -> Result<Self> {
        Pipeline::new(declarations).exec()
    }
}
