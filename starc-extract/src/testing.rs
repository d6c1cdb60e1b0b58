//! Test utilities for building checked packages by hand.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use starcgen_types::{
    Decl, Expr, File, FuncDecl, Ident, ImportSpec, ModelChecker, ModelFile, Object, ObjectId,
    PackageRef, Param, Position, Signature, Stmt, Type, TypeInfo, TypeSpec,
};

use crate::conventions::{PACKAGE_INITIALIZER, REGISTER_METHOD, TYPE_OF};

/// An import binding inside the fixture package.
#[derive(Debug, Clone)]
pub struct Import {
    object: ObjectId,
    local: String,
    package: PackageRef,
}

impl Import {
    pub fn package(&self) -> &PackageRef {
        &self.package
    }
}

/// Builds a single-file package together with the resolution tables a
/// front end would produce for it.
///
/// Registration calls land in the body of the package's `init` function.
///
/// # Example
///
/// ```ignore
/// let mut pkg = PackageFixture::new("main", "example.com/app");
/// let beam = pkg.import(PackageRef::new("beam", BEAM_PATH));
/// let bar = pkg.type_decl("Bar");
/// let arg = pkg.composite("Bar");
/// pkg.register(&beam, Expr::addr(arg));
/// let (files, checker) = pkg.build();
/// ```
#[derive(Debug, Clone)]
pub struct PackageFixture {
    package: PackageRef,
    file_name: String,
    info: TypeInfo,
    imports: Vec<ImportSpec>,
    decls: Vec<Decl>,
    init: Vec<Stmt>,
    line: u32,
}

impl PackageFixture {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        let package = PackageRef::new(name, path);
        Self {
            file_name: format!("{}.go", package.name),
            package,
            info: TypeInfo::new(),
            imports: Vec::new(),
            decls: Vec::new(),
            init: Vec::new(),
            line: 0,
        }
    }

    pub fn package(&self) -> &PackageRef {
        &self.package
    }

    /// The named type `name` declared in this package.
    pub fn local_type(&self, name: &str) -> Type {
        Type::named(Some(self.package.clone()), name)
    }

    fn next_ident(&mut self, name: &str) -> Ident {
        self.line += 1;
        Ident::at(name, Position::new(self.file_name.clone(), self.line, 1))
    }

    fn define(&mut self, name: &str, object: Object) -> (Ident, ObjectId) {
        let ident = self.next_ident(name);
        let id = self.info.add_object(object);
        self.info.define(ident.clone(), Some(id));
        (ident, id)
    }

    /// Declare `func name(...)`.
    pub fn func(&mut self, name: &str, sig: Signature) -> ObjectId {
        let object = Object::func(Some(self.package.clone()), name, sig);
        let (ident, id) = self.define(name, object);
        self.decls.push(Decl::Func(FuncDecl {
            name: ident,
            recv: None,
            body: Vec::new(),
        }));
        id
    }

    /// Declare `type name struct{...}` and return the declared type.
    pub fn type_decl(&mut self, name: &str) -> Type {
        let (ident, _) = self.define(name, Object::type_name(Some(self.package.clone()), name));
        self.decls.push(Decl::Type(TypeSpec {
            name: ident,
            alias: false,
            ty: Expr::Other {
                text: "struct{}".into(),
                children: Vec::new(),
            },
        }));
        self.local_type(name)
    }

    /// Declare `type name = target` and return the alias type.
    pub fn alias_decl(&mut self, name: &str, target: Type) -> Type {
        let object = Object::alias(Some(self.package.clone()), name, target);
        let ty = object.ty.clone();
        let (ident, _) = self.define(name, object);
        self.decls.push(Decl::Type(TypeSpec {
            name: ident,
            alias: true,
            ty: Expr::Other {
                text: ty.to_string(),
                children: Vec::new(),
            },
        }));
        ty
    }

    /// Declare `func (recv) name(...)`.
    pub fn method(&mut self, recv: Type, name: &str, sig: Signature) -> ObjectId {
        let sig = sig.with_recv(Param::new("r", recv));
        let object = Object::func(Some(self.package.clone()), name, sig);
        let (ident, id) = self.define(name, object);
        self.decls.push(Decl::Func(FuncDecl {
            name: ident,
            recv: None,
            body: Vec::new(),
        }));
        id
    }

    /// Declare a package-level variable.
    pub fn var(&mut self, name: &str, ty: Type) -> ObjectId {
        let (_, id) = self.define(name, Object::var(Some(self.package.clone()), name, ty));
        id
    }

    /// Import `package` under its own name.
    pub fn import(&mut self, package: PackageRef) -> Import {
        let local = package.name.clone();
        let object = self.info.add_object(Object::pkg_name(
            self.package.clone(),
            local.clone(),
            package.clone(),
        ));
        self.imports.push(ImportSpec {
            name: None,
            path: package.path.clone(),
        });
        Import {
            object,
            local,
            package,
        }
    }

    /// Import `package` under a different local name.
    pub fn import_as(&mut self, local: &str, package: PackageRef) -> Import {
        let (ident, object) = self.define(
            local,
            Object::pkg_name(self.package.clone(), local, package.clone()),
        );
        self.imports.push(ImportSpec {
            name: Some(ident),
            path: package.path.clone(),
        });
        Import {
            object,
            local: local.to_string(),
            package,
        }
    }

    /// A use of `name` inside a function body, resolved to `object`.
    pub fn ident(&mut self, name: &str, object: ObjectId) -> Expr {
        let id = self.next_ident(name);
        self.info.use_at(id.clone(), object, true);
        Expr::Ident { id }
    }

    /// A use of a name the front end could not resolve.
    pub fn unresolved(&mut self, name: &str) -> Expr {
        Expr::Ident {
            id: self.next_ident(name),
        }
    }

    /// `module.name`, with `module` resolved to its import and `name` to
    /// `object` when given.
    pub fn qualified(&mut self, module: &Import, name: &str, object: Option<ObjectId>) -> Expr {
        let x = self.ident(&module.local.clone(), module.object);
        let sel = self.next_ident(name);
        if let Some(object) = object {
            self.info.use_at(sel.clone(), object, true);
        }
        Expr::Selector {
            x: Box::new(x),
            sel,
        }
    }

    /// A use of a function exported by `module`.
    pub fn foreign_func(&mut self, module: &Import, name: &str, sig: Signature) -> Expr {
        let object = self
            .info
            .add_object(Object::func(Some(module.package.clone()), name, sig));
        self.qualified(module, name, Some(object))
    }

    /// A use of a type exported by `module`.
    pub fn foreign_type(&mut self, module: &Import, name: &str) -> Expr {
        let object = self
            .info
            .add_object(Object::type_name(Some(module.package.clone()), name));
        self.qualified(module, name, Some(object))
    }

    /// `T{}` for the local type `name`, resolved when it was declared.
    pub fn composite(&mut self, name: &str) -> Expr {
        let object = self
            .info
            .defs
            .iter()
            .find(|occ| occ.ident.name == name)
            .and_then(|occ| occ.object);
        let ty = match object {
            Some(object) => self.ident(name, object),
            None => self.unresolved(name),
        };
        Expr::composite(ty)
    }

    /// `reflect.TypeOf(arg)`.
    pub fn type_of(&mut self, reflect: &Import, arg: Expr) -> Expr {
        let fun = self.qualified(reflect, TYPE_OF, None);
        Expr::call(fun, [arg])
    }

    /// Append `module.RegisterDoFn(arg)` to the package initializer.
    pub fn register(&mut self, module: &Import, arg: Expr) {
        let fun = self.qualified(module, REGISTER_METHOD, None);
        self.statement(Expr::call(fun, [arg]));
    }

    /// Append an arbitrary expression statement to the package initializer.
    pub fn statement(&mut self, x: Expr) {
        self.init.push(Stmt::Expr { x });
    }

    fn file(&mut self) -> File {
        let mut decls = std::mem::take(&mut self.decls);
        if !self.init.is_empty() {
            let (name, _) = self.define(
                PACKAGE_INITIALIZER,
                Object::func(
                    Some(self.package.clone()),
                    PACKAGE_INITIALIZER,
                    Signature::new([], []),
                ),
            );
            decls.push(Decl::Func(FuncDecl {
                name,
                recv: None,
                body: std::mem::take(&mut self.init),
            }));
        }
        File {
            name: self.file_name.clone(),
            package: self.package.name.clone(),
            imports: std::mem::take(&mut self.imports),
            decls,
        }
    }

    /// The syntax trees plus a checker replaying the recorded tables.
    pub fn build(mut self) -> (Vec<File>, ModelChecker) {
        let file = self.file();
        (vec![file], ModelChecker::new(self.package, self.info))
    }

    /// The fixture as a serialized model file.
    pub fn model(mut self) -> ModelFile {
        let file = self.file();
        ModelFile {
            package: self.package,
            files: vec![file],
            info: self.info,
            errors: Vec::new(),
        }
    }

    /// Write the model as JSON to `path`.
    pub fn write_model(self, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref().to_path_buf();
        let json = serde_json::to_string_pretty(&self.model())?;
        std::fs::write(&path, json)
            .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
        Ok(path)
    }

    /// Write the model into a fresh temporary directory.
    pub fn write_temp_model(self) -> Result<(tempfile::TempDir, PathBuf)> {
        let dir = tempfile::tempdir()?;
        let path = self.write_model(dir.path().join("model.json"))?;
        Ok((dir, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BEAM: &str = "github.com/apache/beam/sdks/v2/go/pkg/beam";

    #[test]
    fn test_fixture_records_defs_and_uses() {
        let mut pkg = PackageFixture::new("main", "example.com/app");
        let beam = pkg.import_as("b", PackageRef::new("beam", BEAM));
        pkg.type_decl("Bar");
        let arg = pkg.composite("Bar");
        pkg.register(&beam, Expr::addr(arg));
        let model = pkg.model();

        let def_names: Vec<_> = model.info.defs().map(|(id, _)| id.name.as_str()).collect();
        assert_eq!(def_names, vec!["b", "Bar", "init"]);
        assert_eq!(model.info.uses.len(), 2);
        assert_eq!(model.files[0].imports[0].path, BEAM);
        assert_eq!(model.files[0].decls.len(), 2);
    }

    #[test]
    fn test_write_temp_model() {
        let mut pkg = PackageFixture::new("main", "example.com/app");
        pkg.type_decl("Bar");
        let (_dir, path) = pkg.write_temp_model().unwrap();

        let model = ModelFile::open(&path).unwrap();
        assert_eq!(model.package.name, "main");
        assert_eq!(model.info.objects.len(), 1);
    }
}
