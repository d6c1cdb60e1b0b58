//! Entities accumulated while classifying a package.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use starcgen_ir::{Emitter, Input};
use starcgen_types::Signature;

/// Deduplicated set of module paths, kept in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImportSet {
    paths: IndexSet<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: &str) {
        if !self.paths.contains(path) {
            self.paths.insert(path.to_string());
        }
    }

    pub fn merge(&mut self, other: &ImportSet) {
        for path in &other.paths {
            self.add(path);
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Sorted paths, leaving out the empty path and every path in `exclude`.
    pub fn resolved(&self, exclude: &[&str]) -> Vec<String> {
        let mut paths: Vec<String> = self
            .iter()
            .filter(|path| !path.is_empty() && !exclude.contains(path))
            .map(str::to_string)
            .collect();
        paths.sort();
        paths
    }
}

/// Everything the classifier decided needs generated code.
///
/// Maps are keyed so that repeated sightings collapse: wrapped types by
/// rendered type, methods by name, shims by signature key and shapes by
/// their canonical name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Entities {
    /// Package-level functions, bare when local and module-qualified when
    /// foreign.
    pub functions: IndexSet<String>,
    pub types: IndexSet<String>,
    pub wraps: IndexMap<String, IndexMap<String, Signature>>,
    pub shims: IndexMap<String, Signature>,
    pub emitters: IndexMap<String, Emitter>,
    pub inputs: IndexMap<String, Input>,
    pub imports: ImportSet,
}

impl Entities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            functions: self.functions.len(),
            types: self.types.len(),
            wraps: self.wraps.len(),
            shims: self.shims.len(),
            emits: self.emitters.len(),
            inputs: self.inputs.len(),
        }
    }
}

/// Entity counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub functions: usize,
    pub types: usize,
    pub wraps: usize,
    pub shims: usize,
    pub emits: usize,
    pub inputs: usize,
}

impl Summary {
    /// Each count with its label, in display order.
    pub fn rows(&self) -> [(&'static str, usize); 6] {
        [
            ("Functions", self.functions),
            ("Types", self.types),
            ("Wraps", self.wraps),
            ("Shims", self.shims),
            ("Emits", self.emits),
            ("Inputs", self.inputs),
        ]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary")?;
        for (label, count) in self.rows() {
            writeln!(f, "{}\t{}", count, label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_set_dedup() {
        let mut imports = ImportSet::new();
        imports.add("fmt");
        imports.add("strings");
        imports.add("fmt");

        assert_eq!(imports.len(), 2);
        assert_eq!(imports.iter().collect::<Vec<_>>(), vec!["fmt", "strings"]);
    }

    #[test]
    fn test_import_set_merge() {
        let mut a = ImportSet::new();
        a.add("fmt");
        let mut b = ImportSet::new();
        b.add("strings");
        b.add("fmt");

        a.merge(&b);
        assert_eq!(a.len(), 2);
        assert!(a.contains("strings"));
    }

    #[test]
    fn test_import_set_resolved() {
        let mut imports = ImportSet::new();
        imports.add("strings");
        imports.add("");
        imports.add("example.com/app");
        imports.add("context");

        assert_eq!(imports.resolved(&["example.com/app"]), vec!["context", "strings"]);
    }

    #[test]
    fn test_summary_counts() {
        let mut entities = Entities::new();
        entities.functions.insert("Foo".into());
        entities.types.insert("Bar".into());
        entities.types.insert("Baz".into());

        let summary = entities.summary();
        assert_eq!(summary.functions, 1);
        assert_eq!(summary.types, 2);
        assert_eq!(summary.shims, 0);
        assert_eq!(
            summary.to_string(),
            "Summary\n1\tFunctions\n2\tTypes\n0\tWraps\n0\tShims\n0\tEmits\n0\tInputs\n"
        );
    }
}
