//! Classify phase - turns resolved identifiers into entities.

use eyre::{Result, eyre};

use crate::{
    classify::Classifier,
    error::Error,
    pipeline::{ExtractionContext, Phase, Trace},
};

/// Phase that classifies every definition, then every use.
///
/// Fails when an allow-listed identifier was never matched.
pub struct ClassifyPhase;

impl Phase for ClassifyPhase {
    fn name(&self) -> &'static str {
        "classify"
    }

    fn description(&self) -> &'static str {
        "Classify functions, types and lifecycle methods"
    }

    fn run(&self, ctx: &mut ExtractionContext) -> Result<()> {
        let checked = ctx
            .checked
            .as_ref()
            .ok_or_else(|| eyre!("package not checked - did CheckPhase run?"))?;

        let trace = Trace::new(self.name(), ctx.config.debug, &mut ctx.diagnostics);
        let mut classifier = Classifier::new(
            &ctx.config.package,
            &ctx.config.universal_module,
            &mut ctx.entities,
            ctx.required.as_mut(),
            trace,
        );

        classifier.trace().info("CHECKING DEFS");
        for (ident, obj) in checked.info.defs() {
            classifier.classify(ident, obj);
        }
        classifier.trace().info("CHECKING USES");
        for (ident, obj) in checked.info.uses() {
            classifier.classify(ident, obj);
        }
        drop(classifier);

        if let Some(required) = &ctx.required {
            let missing = required.missing();
            if !missing.is_empty() {
                return Err(Error::MissingIdentifiers { missing }.into());
            }
        }
        Ok(())
    }
}
