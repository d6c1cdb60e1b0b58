//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from a front-end run.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the model file.
    pub model_path: PathBuf,
    /// Package the model was checked as.
    pub package: String,
    /// Import path of the package, once checked.
    pub package_path: Option<String>,
    /// Number of source files in the model.
    pub files: usize,
    /// Resolved definitions.
    pub definitions: usize,
    /// Resolved uses.
    pub uses: usize,
    /// Front-end error messages.
    pub errors: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.model_path.display()));
        out.newline();
        match &self.package_path {
            Some(path) => out.key_value("Package", &format!("{} ({})", self.package, path)),
            None => out.key_value("Package", &self.package),
        }
        out.key_value("Files", &self.files.to_string());
        out.key_value("Definitions", &self.definitions.to_string());
        out.key_value("Uses", &self.uses.to_string());
    }
}
