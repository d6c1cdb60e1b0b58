//! Check phase - runs the front end.

use std::sync::Arc;

use eyre::Result;
use starcgen_types::TypeChecker;

use crate::{
    error::Error,
    pipeline::{ExtractionContext, Phase},
};

/// Phase that type checks the package and stores the resolution tables.
pub struct CheckPhase {
    checker: Arc<dyn TypeChecker + Send + Sync>,
}

impl CheckPhase {
    pub fn new(checker: Arc<dyn TypeChecker + Send + Sync>) -> Self {
        Self { checker }
    }
}

impl Phase for CheckPhase {
    fn name(&self) -> &'static str {
        "check"
    }

    fn description(&self) -> &'static str {
        "Type check the package and resolve identifiers"
    }

    fn run(&self, ctx: &mut ExtractionContext) -> Result<()> {
        let config = ctx.config.check_config();
        let checked = self
            .checker
            .check(&ctx.config.package, &ctx.files, &config)
            .map_err(|source| Error::TypeCheck {
                package: ctx.config.package.clone(),
                source,
            })?;

        ctx.trace(self.name()).info(format!(
            "checked {} ({} defs, {} uses)",
            checked.package,
            checked.info.defs.len(),
            checked.info.uses.len()
        ));
        ctx.checked = Some(checked);
        Ok(())
    }
}
