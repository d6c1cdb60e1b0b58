//! Identifier resolution tables.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Object, ObjectId, PackageRef};

/// A source position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.file.is_empty() {
            return f.write_str("-");
        }
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// An identifier occurrence in the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ident {
    pub name: String,
    #[serde(default)]
    pub pos: Position,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pos: Position::default(),
        }
    }

    pub fn at(name: impl Into<String>, pos: Position) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }
}

/// An identifier together with the object it resolved to.
///
/// Definitions without an object (the package clause, blank identifiers)
/// carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub ident: Ident,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectId>,
    /// Whether the identifier sits inside a function body.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub in_func_body: bool,
}

/// Result of type checking one package: the object arena plus every
/// definition-site and use-site identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    #[serde(default)]
    pub objects: Vec<Object>,
    #[serde(default)]
    pub defs: Vec<Occurrence>,
    #[serde(default)]
    pub uses: Vec<Occurrence>,
}

impl TypeInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the arena and return its id.
    pub fn add_object(&mut self, object: Object) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(object);
        id
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0 as usize)
    }

    /// Record a definition site.
    pub fn define(&mut self, ident: Ident, object: Option<ObjectId>) {
        self.defs.push(Occurrence {
            ident,
            object,
            in_func_body: false,
        });
    }

    /// Record a use site.
    pub fn use_at(&mut self, ident: Ident, object: ObjectId, in_func_body: bool) {
        self.uses.push(Occurrence {
            ident,
            object: Some(object),
            in_func_body,
        });
    }

    /// Definition sites with their resolved objects (if any).
    pub fn defs(&self) -> impl Iterator<Item = (&Ident, Option<&Object>)> {
        self.defs
            .iter()
            .map(|occ| (&occ.ident, occ.object.and_then(|id| self.object(id))))
    }

    /// Use sites with their resolved objects (if any).
    pub fn uses(&self) -> impl Iterator<Item = (&Ident, Option<&Object>)> {
        self.uses
            .iter()
            .map(|occ| (&occ.ident, occ.object.and_then(|id| self.object(id))))
    }

    /// Index the occurrences for repeated lookups.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self)
    }
}

/// Hashed lookups over a [`TypeInfo`].
///
/// Built once per pass; lookups are constant time instead of a scan over
/// every occurrence.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    info: &'a TypeInfo,
    occurrences: HashMap<Ident, Option<ObjectId>>,
    imports: HashMap<&'a str, &'a PackageRef>,
}

impl<'a> Resolver<'a> {
    pub fn new(info: &'a TypeInfo) -> Self {
        let mut occurrences = HashMap::with_capacity(info.uses.len() + info.defs.len());
        for occ in info.uses.iter().chain(info.defs.iter()) {
            occurrences
                .entry(occ.ident.clone())
                .or_insert(occ.object);
        }

        let mut imports = HashMap::new();
        for (ident, obj) in info.defs() {
            if let Some(pkg) = obj.and_then(Object::imported) {
                imports.entry(ident.name.as_str()).or_insert(pkg);
            }
        }

        Self {
            info,
            occurrences,
            imports,
        }
    }

    pub fn info(&self) -> &'a TypeInfo {
        self.info
    }

    /// The object a specific identifier occurrence resolved to. Use sites
    /// take precedence over definition sites.
    pub fn object_of(&self, ident: &Ident) -> Option<&'a Object> {
        let id = (*self.occurrences.get(ident)?)?;
        self.info.object(id)
    }

    /// The package an identifier names, if it resolves to an import binding.
    ///
    /// The exact occurrence is tried first. Failing that, any definition of
    /// an import binding with the same spelling is accepted, which covers
    /// renamed imports when use-site resolution was not recorded.
    pub fn package_named_by(&self, ident: &Ident) -> Option<&'a PackageRef> {
        if let Some(obj) = self.object_of(ident) {
            return obj.imported();
        }
        self.imports.get(ident.name.as_str()).copied()
    }
}
