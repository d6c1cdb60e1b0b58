//! Pipeline phase trait.

use eyre::Result;

use super::ExtractionContext;

/// Information about a pipeline phase.
#[derive(Debug, Clone)]
pub struct PhaseInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// A phase in the extraction pipeline.
///
/// Built-in phases, in order:
/// - `CheckPhase` - runs the front end over the package
/// - `ScanPhase` - collects identifiers named by registration calls
/// - `ClassifyPhase` - classifies every resolved identifier
/// - `AssemblePhase` - freezes the entities into the generation model
///
/// Custom phases run after the built-in ones.
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Run this phase on the extraction context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Skipped inputs are
    /// recorded as diagnostics instead.
    fn run(&self, ctx: &mut ExtractionContext) -> Result<()>;

    fn info(&self) -> PhaseInfo {
        PhaseInfo {
            name: self.name(),
            description: self.description(),
        }
    }
}
