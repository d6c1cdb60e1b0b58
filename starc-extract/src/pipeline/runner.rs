//! Pipeline orchestrator.

use std::sync::Arc;

use eyre::Result;
use starcgen_types::{File, TypeChecker};

use super::{
    ExtractionContext, Phase, Plugin,
    phases::{AssemblePhase, CheckPhase, ClassifyPhase, ScanPhase},
};
use crate::config::ExtractConfig;

/// The extraction pipeline orchestrator.
///
/// Runs the built-in phases (check, scan, classify, assemble) followed by
/// any user phases, calling plugin hooks before and after each phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new(checker)
///     .plugin(SnapshotPlugin::with_output_dir(".starcgen/debug"));
///
/// let ctx = pipeline.run(config, files, "main.shims.go")?;
/// ```
pub struct Pipeline {
    checker: Arc<dyn TypeChecker + Send + Sync>,
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new(checker: impl TypeChecker + Send + Sync + 'static) -> Self {
        Self::with_checker(Arc::new(checker))
    }

    pub fn with_checker(checker: Arc<dyn TypeChecker + Send + Sync>) -> Self {
        Self {
            checker,
            phases: Vec::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run the pipeline over the files of one package.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally. Front-end failures and
    /// unmatched identifiers surface as [`crate::Error`] and can be
    /// recovered with `downcast_ref`.
    pub fn run(
        &self,
        config: ExtractConfig,
        files: Vec<File>,
        output_name: &str,
    ) -> Result<ExtractionContext> {
        let mut ctx = ExtractionContext::new(config, files, output_name);

        let builtin_phases: Vec<Box<dyn Phase>> = vec![
            Box::new(CheckPhase::new(self.checker.clone())),
            Box::new(ScanPhase),
            Box::new(ClassifyPhase),
            Box::new(AssemblePhase),
        ];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut ExtractionContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}
