//! Extract command report data structures.

use std::path::PathBuf;

use starcgen_extract::Summary;

use super::output::{Output, Report};

/// Report data from an extraction.
#[derive(Debug)]
pub struct ExtractReport {
    /// Package the generated file belongs to.
    pub package: String,
    /// Where the generation model was written.
    pub model_path: PathBuf,
    /// Category counts.
    pub summary: Summary,
    /// Allow-list that was applied; empty when everything was kept.
    pub required: Vec<String>,
    /// Warning messages from the pipeline.
    pub warnings: Vec<String>,
    /// Classification trace, when debugging.
    pub trace: Option<String>,
    /// Imports the generated file needs.
    pub imports: Vec<String>,
    /// Path to pipeline snapshots, if visualization was enabled.
    pub snapshot_dir: Option<PathBuf>,
}

impl Report for ExtractReport {
    fn render(&self, out: &mut dyn Output) {
        if let Some(dir) = &self.snapshot_dir {
            out.key_value("Pipeline snapshots written to", &dir.display().to_string());
            out.newline();
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        if let Some(trace) = &self.trace {
            out.divider("Trace");
            out.preformatted(trace.trim_end());
            out.divider("End trace");
            out.newline();
        }

        if !self.required.is_empty() {
            out.section(&format!("Filtering by {} identifiers", self.required.len()));
            for id in &self.required {
                out.list_item(id);
            }
            out.newline();
        }

        out.preformatted(self.summary.to_string().trim_end());

        if !self.imports.is_empty() {
            out.newline();
            out.section("Imports");
            for import in &self.imports {
                out.list_item(import);
            }
        }

        out.newline();
        out.key_value(
            "Generated",
            &format!("{} (package {})", self.model_path.display(), self.package),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::BufferOutput;

    fn report() -> ExtractReport {
        ExtractReport {
            package: "main".into(),
            model_path: PathBuf::from("main.shims.go.json"),
            summary: Summary {
                functions: 1,
                types: 1,
                ..Summary::default()
            },
            required: Vec::new(),
            warnings: Vec::new(),
            trace: None,
            imports: Vec::new(),
            snapshot_dir: None,
        }
    }

    #[test]
    fn test_render_minimal() {
        let mut out = BufferOutput::default();
        report().render(&mut out);
        assert!(out.text.starts_with("Summary\n1\tFunctions\n1\tTypes\n"));
        assert!(out.text.ends_with("\nGenerated: main.shims.go.json (package main)\n"));
        assert!(!out.text.contains("Trace"));
        assert!(!out.text.contains("Imports"));
    }

    #[test]
    fn test_render_full() {
        let mut out = BufferOutput::default();
        ExtractReport {
            required: vec!["Foo".into(), "Bar".into()],
            warnings: vec!["unexpected registration argument makeFn(); skipping".into()],
            trace: Some("main.go:3:2: found beam.RegisterDoFn(Foo)\n".into()),
            imports: vec!["strings".into()],
            snapshot_dir: Some(PathBuf::from(".starcgen/debug")),
            ..report()
        }
        .render(&mut out);

        let text = out.text;
        assert!(text.starts_with("Pipeline snapshots written to: .starcgen/debug\n\n"));
        assert!(text.contains("warning: unexpected registration argument makeFn(); skipping\n"));
        assert!(text.contains("── Trace ──\nmain.go:3:2: found beam.RegisterDoFn(Foo)\n── End trace ──\n"));
        assert!(text.contains("Filtering by 2 identifiers:\n  - Foo\n  - Bar\n"));
        assert!(text.contains("Imports:\n  - strings\n"));
    }
}
