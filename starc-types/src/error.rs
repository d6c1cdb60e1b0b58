use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for model loading and checking (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("produce a checked model with the front end first"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse checked model '{path}'")]
    #[diagnostic(code(starcgen::model_parse))]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Check(#[from] CheckError),
}

/// A front end rejected the package.
#[derive(Debug, Error, Diagnostic)]
pub enum CheckError {
    #[error("{}", .errors.join("\n"))]
    #[diagnostic(code(starcgen::type_check))]
    Rejected { errors: Vec<String> },

    #[error("model describes package '{found}', expected '{expected}'")]
    #[diagnostic(
        code(starcgen::package_mismatch),
        help("pass the package name the model was checked for")
    )]
    PackageMismatch { expected: String, found: String },

    #[error("no files to check")]
    #[diagnostic(code(starcgen::no_files))]
    NoFiles,
}
