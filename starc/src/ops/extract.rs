//! Extract operation - generation model from a checked package.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use starcgen_extract::{ExtractConfig, Extractor, SnapshotPlugin};
use starcgen_types::ModelFile;

use crate::reports::ExtractReport;

/// Options for the extract operation.
pub struct ExtractOptions<'a> {
    /// Generated file the model describes; defaults to `<package>.shims.go`.
    pub output: Option<&'a Path>,
    /// Directory for per-phase snapshots.
    pub visualize: Option<&'a Path>,
}

/// Execute the extract operation.
///
/// Runs the extraction pipeline over the model and writes the generation
/// model as JSON to `<output>.json`.
pub fn extract(model: ModelFile, config: ExtractConfig, opts: ExtractOptions) -> Result<ExtractReport> {
    let mut config = config;
    if config.package.is_empty() {
        config.package = model.package.name.clone();
    }

    let output = match opts.output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!("{}.shims.go", config.package)),
    };
    let file_name = output
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| output.display().to_string());

    let debug = config.debug;
    let (files, checker) = model.into_parts();
    let mut extractor = Extractor::with_config(checker, config);
    if let Some(dir) = opts.visualize {
        extractor = extractor.plugin(SnapshotPlugin::with_output_dir(dir));
    }
    let extraction = extractor.extract(files, &file_name)?;

    let model_path = PathBuf::from(format!("{}.json", output.display()));
    let json = serde_json::to_string_pretty(&extraction.model)?;
    std::fs::write(&model_path, json)
        .wrap_err_with(|| format!("failed to write '{}'", model_path.display()))?;

    let warnings = extraction
        .warnings()
        .map(|diag| match &diag.location {
            Some(loc) => format!("{}\n  --> {}", diag.message, loc),
            None => diag.message.clone(),
        })
        .collect();
    let trace = debug.then(|| extraction.trace());
    Ok(ExtractReport {
        package: extraction.model.package,
        model_path,
        summary: extraction.summary,
        required: extraction.required,
        warnings,
        trace,
        imports: extraction.model.imports,
        snapshot_dir: opts.visualize.map(Path::to_path_buf),
    })
}
