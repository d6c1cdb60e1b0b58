//! Check operation - front-end validation.

use std::path::Path;

use starcgen_extract::ExtractConfig;
use starcgen_types::{CheckError, ModelFile, TypeChecker};

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs only the front end, with the settings extraction would use, and
/// reports what it resolved or why it refused.
pub fn check(model: ModelFile, config: &ExtractConfig, model_path: &Path) -> CheckReport {
    let package = if config.package.is_empty() {
        model.package.name.clone()
    } else {
        config.package.clone()
    };
    let (files, checker) = model.into_parts();

    let mut report = CheckReport {
        model_path: model_path.to_path_buf(),
        package,
        package_path: None,
        files: files.len(),
        definitions: 0,
        uses: 0,
        errors: Vec::new(),
    };

    match checker.check(&report.package, &files, &config.check_config()) {
        Ok(checked) => {
            report.package_path = Some(checked.package.path);
            report.definitions = checked.info.defs.len();
            report.uses = checked.info.uses.len();
        }
        Err(CheckError::Rejected { errors }) => report.errors = errors,
        Err(e) => report.errors.push(e.to_string()),
    }
    report
}
