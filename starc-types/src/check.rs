//! The front-end seam.
//!
//! Type checking proper lives outside this workspace. A [`TypeChecker`]
//! turns a package's files into a [`CheckedPackage`]; [`ModelChecker`] is the
//! implementation used by the command line, replaying a model an external
//! front end serialized to JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CheckError, Error, File, PackageRef, Result, TypeInfo};

/// Knobs passed to the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckConfig {
    /// Skip function bodies; identifiers inside them are not resolved.
    pub ignore_func_bodies: bool,
    /// Record use-site resolutions in addition to definitions.
    pub record_uses: bool,
    pub disable_unused_import_check: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            ignore_func_bodies: false,
            record_uses: true,
            disable_unused_import_check: true,
        }
    }
}

/// A successfully checked package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckedPackage {
    pub package: PackageRef,
    pub info: TypeInfo,
}

pub trait TypeChecker {
    /// Check the files of `package` and resolve every identifier.
    fn check(
        &self,
        package: &str,
        files: &[File],
        config: &CheckConfig,
    ) -> std::result::Result<CheckedPackage, CheckError>;
}

/// A checked model as written by an external front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelFile {
    pub package: PackageRef,
    #[serde(default)]
    pub files: Vec<File>,
    #[serde(default)]
    pub info: TypeInfo,
    /// Errors the front end reported; a non-empty list fails the check.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ModelFile {
    /// Read a model from a JSON file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        serde_json::from_str(&content).map_err(|e| {
            Box::new(Error::Parse {
                path: path.to_path_buf(),
                source: e,
            })
        })
    }

    /// Split into the syntax and a checker that replays the resolutions.
    pub fn into_parts(self) -> (Vec<File>, ModelChecker) {
        let checker = ModelChecker {
            package: self.package,
            info: self.info,
            errors: self.errors,
        };
        (self.files, checker)
    }
}

/// Replays a pre-computed [`TypeInfo`], honouring the [`CheckConfig`] the
/// way a live checker would.
#[derive(Debug, Clone)]
pub struct ModelChecker {
    package: PackageRef,
    info: TypeInfo,
    errors: Vec<String>,
}

impl ModelChecker {
    pub fn new(package: PackageRef, info: TypeInfo) -> Self {
        Self {
            package,
            info,
            errors: Vec::new(),
        }
    }

    /// Make every check fail with the given front-end errors.
    pub fn with_errors(mut self, errors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.errors = errors.into_iter().map(Into::into).collect();
        self
    }
}

impl TypeChecker for ModelChecker {
    fn check(
        &self,
        package: &str,
        files: &[File],
        config: &CheckConfig,
    ) -> std::result::Result<CheckedPackage, CheckError> {
        if !self.errors.is_empty() {
            return Err(CheckError::Rejected {
                errors: self.errors.clone(),
            });
        }
        if files.is_empty() {
            return Err(CheckError::NoFiles);
        }
        if self.package.name != package {
            return Err(CheckError::PackageMismatch {
                expected: package.to_string(),
                found: self.package.name.clone(),
            });
        }

        let mut info = self.info.clone();
        if config.ignore_func_bodies {
            info.defs.retain(|occ| !occ.in_func_body);
            info.uses.retain(|occ| !occ.in_func_body);
        }
        if !config.record_uses {
            info.uses.clear();
        }

        Ok(CheckedPackage {
            package: self.package.clone(),
            info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ident, Object, Signature};

    fn local() -> PackageRef {
        PackageRef::new("main", "example.com/app")
    }

    fn file() -> File {
        File {
            name: "main.go".into(),
            package: "main".into(),
            ..Default::default()
        }
    }

    fn model() -> ModelChecker {
        let mut info = TypeInfo::new();
        let f = info.add_object(Object::func(Some(local()), "run", Signature::new([], [])));
        info.define(Ident::new("run"), Some(f));
        info.use_at(Ident::new("run"), f, false);
        info.use_at(Ident::new("run"), f, true);
        ModelChecker::new(local(), info)
    }

    #[test]
    fn test_model_checker_defaults() {
        let checked = model()
            .check("main", &[file()], &CheckConfig::default())
            .unwrap();
        assert_eq!(checked.info.defs.len(), 1);
        assert_eq!(checked.info.uses.len(), 2);
    }

    #[test]
    fn test_model_checker_ignores_bodies() {
        let config = CheckConfig {
            ignore_func_bodies: true,
            ..Default::default()
        };
        let checked = model().check("main", &[file()], &config).unwrap();
        assert_eq!(checked.info.uses.len(), 1);
    }

    #[test]
    fn test_model_checker_drops_uses() {
        let config = CheckConfig {
            record_uses: false,
            ..Default::default()
        };
        let checked = model().check("main", &[file()], &config).unwrap();
        assert!(checked.info.uses.is_empty());
        assert_eq!(checked.info.defs.len(), 1);
    }

    #[test]
    fn test_model_checker_rejects() {
        let err = model()
            .with_errors(["main.go:3:1: undefined: Foo"])
            .check("main", &[file()], &CheckConfig::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "main.go:3:1: undefined: Foo");
    }

    #[test]
    fn test_model_checker_package_mismatch() {
        let err = model()
            .check("other", &[file()], &CheckConfig::default())
            .unwrap_err();
        assert!(matches!(err, CheckError::PackageMismatch { .. }));
    }

    #[test]
    fn test_model_file_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let model = ModelFile {
            package: local(),
            files: vec![file()],
            info: TypeInfo::new(),
            errors: vec![],
        };
        std::fs::write(&path, serde_json::to_string(&model).unwrap()).unwrap();

        let loaded = ModelFile::open(&path).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_model_file_open_missing() {
        let err = ModelFile::open("/definitely/not/here.json").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
