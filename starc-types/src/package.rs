//! Package references.

use serde::{Deserialize, Serialize};

/// A reference to a package as resolved by the type checker.
///
/// `name` is the declared package name (`package foo`), `path` is the import
/// path it was loaded from. The two differ for anything outside the standard
/// library (`github.com/acme/foo` vs `foo`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageRef {
    pub name: String,
    pub path: String,
}

impl PackageRef {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// A package whose import path is its name (standard library style).
    pub fn std(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
        }
    }
}

impl std::fmt::Display for PackageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "package {} ({:?})", self.name, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_package() {
        let pkg = PackageRef::std("reflect");
        assert_eq!(pkg.name, "reflect");
        assert_eq!(pkg.path, "reflect");
    }

    #[test]
    fn test_package_display() {
        let pkg = PackageRef::new("beam", "github.com/apache/beam/sdks/v2/go/pkg/beam");
        assert_eq!(
            pkg.to_string(),
            "package beam (\"github.com/apache/beam/sdks/v2/go/pkg/beam\")"
        );
    }
}
