//! Extraction context passed through pipeline phases.

use starcgen_ir::Top;
use starcgen_types::{CheckedPackage, File};

use super::diagnostic::{Diagnostic, Severity, Trace, render_trace};
use crate::{classify::RequiredIds, config::ExtractConfig, entities::Entities};

/// State of one extraction, filled in phase by phase.
#[derive(Debug)]
pub struct ExtractionContext {
    pub config: ExtractConfig,
    /// Syntax trees of the package under analysis.
    pub files: Vec<File>,
    /// Name of the file the generation model describes.
    pub output_name: String,
    /// Checker output (populated by CheckPhase).
    pub checked: Option<CheckedPackage>,
    /// Allow-list with found marks (populated by ScanPhase when non-empty).
    pub required: Option<RequiredIds>,
    /// Accumulated entities (populated by ClassifyPhase).
    pub entities: Entities,
    /// The generation model (populated by AssemblePhase).
    pub model: Option<Top>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ExtractionContext {
    pub fn new(config: ExtractConfig, files: Vec<File>, output_name: impl Into<String>) -> Self {
        Self {
            config,
            files,
            output_name: output_name.into(),
            checked: None,
            required: None,
            entities: Entities::new(),
            model: None,
            diagnostics: Vec::new(),
        }
    }

    /// A diagnostic sink for `phase`, tracing when `debug` is set.
    pub fn trace(&mut self, phase: &'static str) -> Trace<'_> {
        Trace::new(phase, self.config.debug, &mut self.diagnostics)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn add_error(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(phase, message));
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// The trace text recorded so far.
    pub fn trace_text(&self) -> String {
        render_trace(&self.diagnostics)
    }
}
