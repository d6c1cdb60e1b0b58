use miette::Diagnostic;
use starcgen_types::CheckError;
use thiserror::Error;

/// Fatal extraction failures. No generation model is produced when one of
/// these is returned.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to type check package {package}")]
    #[diagnostic(code(starcgen::type_check))]
    TypeCheck {
        package: String,
        #[source]
        source: CheckError,
    },

    #[error(
        "couldn't find the following identifiers; please check for typos, or remove them: {}",
        .missing.join(", ")
    )]
    #[diagnostic(
        code(starcgen::missing_identifiers),
        help("every allow-listed identifier must name a declaration or a receiver type in the package")
    )]
    MissingIdentifiers { missing: Vec<String> },
}

impl Error {
    /// The identifiers that were never matched, if this is a missing
    /// identifier failure.
    pub fn missing(&self) -> Option<&[String]> {
        match self {
            Error::MissingIdentifiers { missing } => Some(missing),
            Error::TypeCheck { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_identifiers_message() {
        let err = Error::MissingIdentifiers {
            missing: vec!["Quux".into(), "Baz".into()],
        };
        assert_eq!(
            err.to_string(),
            "couldn't find the following identifiers; please check for typos, or remove them: Quux, Baz"
        );
        assert_eq!(err.missing(), Some(&["Quux".to_string(), "Baz".to_string()][..]));
    }

    #[test]
    fn test_type_check_keeps_source() {
        let err = Error::TypeCheck {
            package: "main".into(),
            source: CheckError::NoFiles,
        };
        assert_eq!(err.to_string(), "failed to type check package main");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("no files to check"));
        assert!(err.missing().is_none());
    }
}
