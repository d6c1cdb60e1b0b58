//! Pipeline plugin trait.

use eyre::Result;

use super::ExtractionContext;

/// A plugin that hooks into the extraction pipeline.
///
/// Plugins receive callbacks before and after each phase runs and may
/// inspect or modify the context.
///
/// # Example
///
/// ```ignore
/// struct WarningCounter(AtomicUsize);
///
/// impl Plugin for WarningCounter {
///     fn name(&self) -> &'static str { "warnings" }
///
///     fn on_after_phase(&self, _phase: &str, ctx: &mut ExtractionContext) -> Result<()> {
///         self.0.store(ctx.warning_count(), Ordering::SeqCst);
///         Ok(())
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    fn name(&self) -> &'static str;

    /// Called before a phase runs. Return an error to abort the pipeline.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut ExtractionContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completes. Return an error to abort the
    /// pipeline.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut ExtractionContext) -> Result<()> {
        Ok(())
    }
}
