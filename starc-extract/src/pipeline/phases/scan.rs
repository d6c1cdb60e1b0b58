//! Scan phase - finds registration calls.

use eyre::{Result, eyre};
use indexmap::IndexSet;

use crate::{
    classify::RequiredIds,
    pipeline::{ExtractionContext, Phase, Trace},
    scan::RegisterCallScanner,
};

/// Phase that merges explicitly registered identifiers into the allow-list.
///
/// When the merged list is non-empty it becomes the context's required set.
pub struct ScanPhase;

impl Phase for ScanPhase {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn description(&self) -> &'static str {
        "Collect identifiers passed to registration calls"
    }

    fn run(&self, ctx: &mut ExtractionContext) -> Result<()> {
        let checked = ctx
            .checked
            .as_ref()
            .ok_or_else(|| eyre!("package not checked - did CheckPhase run?"))?;

        let mut trace = Trace::new(self.name(), ctx.config.debug, &mut ctx.diagnostics);
        trace.info("CHECKING for RegisterDoFn EXPRs");
        let registered = RegisterCallScanner::new(&checked.info, trace).scan(&ctx.files);

        let mut ids: IndexSet<String> = ctx.config.ids.iter().cloned().collect();
        ids.extend(registered);
        if ids.is_empty() {
            return Ok(());
        }

        let listed: Vec<&str> = ids.iter().map(String::as_str).collect();
        let message = format!("Filtering by {} identifiers: {}", ids.len(), listed.join(", "));
        ctx.trace(self.name()).info(message);
        ctx.required = Some(RequiredIds::new(ids));
        Ok(())
    }
}
