//! One-call extraction.

use eyre::{Result, eyre};
use starcgen_ir::Top;
use starcgen_types::{File, TypeChecker};

use crate::{
    config::ExtractConfig,
    entities::Summary,
    pipeline::{Diagnostic, Pipeline, Plugin, render_trace},
};

/// Builds the generation model for one package.
///
/// # Example
///
/// ```ignore
/// let (files, checker) = ModelFile::open("model.json")?.into_parts();
/// let extraction = Extractor::new(checker, "wordcount")
///     .ids(["CountFn"])
///     .extract(files, "wordcount.shims.go")?;
///
/// println!("{}", extraction.summary);
/// ```
pub struct Extractor {
    config: ExtractConfig,
    pipeline: Pipeline,
}

impl Extractor {
    pub fn new(checker: impl TypeChecker + Send + Sync + 'static, package: impl Into<String>) -> Self {
        Self::with_config(checker, ExtractConfig::new(package))
    }

    pub fn with_config(checker: impl TypeChecker + Send + Sync + 'static, config: ExtractConfig) -> Self {
        Self {
            config,
            pipeline: Pipeline::new(checker),
        }
    }

    /// Restrict generation to these identifiers (in addition to any found in
    /// registration calls).
    pub fn ids(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn legacy_identifiers(mut self, legacy: bool) -> Self {
        self.config.legacy_identifiers = legacy;
        self
    }

    /// Record the classification trace.
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    pub fn universal_module(mut self, path: impl Into<String>) -> Self {
        self.config.universal_module = path.into();
        self
    }

    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.pipeline = self.pipeline.plugin(plugin);
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Run the pipeline and hand back the model with its side outputs.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::Error::TypeCheck`] when the front end rejects the
    /// package and [`crate::Error::MissingIdentifiers`] when an allow-listed
    /// identifier matches nothing.
    pub fn extract(&self, files: Vec<File>, output_name: &str) -> Result<Extraction> {
        let mut ctx = self.pipeline.run(self.config.clone(), files, output_name)?;
        let model = ctx
            .model
            .take()
            .ok_or_else(|| eyre!("no generation model - did AssemblePhase run?"))?;

        Ok(Extraction {
            model,
            summary: ctx.entities.summary(),
            required: ctx
                .required
                .as_ref()
                .map(|r| r.iter().map(str::to_string).collect())
                .unwrap_or_default(),
            diagnostics: ctx.diagnostics,
        })
    }
}

/// The result of a successful extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub model: Top,
    pub summary: Summary,
    /// The allow-list that was applied; empty when everything was kept.
    pub required: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    /// The classification trace, empty unless debug was on.
    pub fn trace(&self) -> String {
        render_trace(&self.diagnostics)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }
}
