//! Assemble phase - builds the generation model.

use eyre::Result;

use crate::{
    assemble::{Target, assemble},
    pipeline::{ExtractionContext, Phase},
};

/// Phase that freezes the entities into an ordered [`starcgen_ir::Top`].
pub struct AssemblePhase;

impl Phase for AssemblePhase {
    fn name(&self) -> &'static str {
        "assemble"
    }

    fn description(&self) -> &'static str {
        "Build the ordered generation model"
    }

    fn run(&self, ctx: &mut ExtractionContext) -> Result<()> {
        let target = Target {
            package: &ctx.config.package,
            package_path: ctx.checked.as_ref().map(|c| c.package.path.as_str()),
            file_name: &ctx.output_name,
        };
        let model = assemble(&ctx.entities, target);
        ctx.model = Some(model);
        Ok(())
    }
}
