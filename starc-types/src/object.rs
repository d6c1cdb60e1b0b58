//! Typed symbols produced by the checker.

use serde::{Deserialize, Serialize};

use crate::{PackageRef, Signature, Type};

/// Index of an [`Object`] in a [`TypeInfo`](crate::TypeInfo) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

/// What kind of symbol an identifier resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectKind {
    /// Variables, parameters, results and struct fields.
    Var,
    /// Functions and methods. Methods carry a receiver in their signature.
    Func,
    /// A declared type name.
    TypeName {
        #[serde(default)]
        alias: bool,
    },
    /// An imported package name as bound in the importing file.
    PkgName { imported: PackageRef },
    Const,
    Builtin,
    Label,
    Nil,
}

/// A resolved symbol: its name, owning package and static type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    /// `None` for universe objects (`int`, `error`, `len`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageRef>,
    pub ty: Type,
    #[serde(flatten)]
    pub kind: ObjectKind,
}

impl Object {
    pub fn func(package: Option<PackageRef>, name: impl Into<String>, sig: Signature) -> Self {
        Self {
            name: name.into(),
            package,
            ty: Type::Signature(sig),
            kind: ObjectKind::Func,
        }
    }

    /// A type name object whose type is the declared named type itself.
    pub fn type_name(package: Option<PackageRef>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            ty: Type::named(package.clone(), name.clone()),
            name,
            package,
            kind: ObjectKind::TypeName { alias: false },
        }
    }

    /// An alias declaration `type name = target`.
    pub fn alias(package: Option<PackageRef>, name: impl Into<String>, target: Type) -> Self {
        let name = name.into();
        Self {
            ty: Type::alias(package.clone(), name.clone(), target),
            name,
            package,
            kind: ObjectKind::TypeName { alias: true },
        }
    }

    pub fn var(package: Option<PackageRef>, name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            package,
            ty,
            kind: ObjectKind::Var,
        }
    }

    /// An import binding `name` in `package` to `imported`.
    pub fn pkg_name(package: PackageRef, name: impl Into<String>, imported: PackageRef) -> Self {
        Self {
            name: name.into(),
            package: Some(package),
            ty: Type::basic(crate::BasicKind::UntypedNil),
            kind: ObjectKind::PkgName { imported },
        }
    }

    /// The signature if this object is a function or method.
    pub fn signature(&self) -> Option<&Signature> {
        match (&self.kind, &self.ty) {
            (ObjectKind::Func, Type::Signature(sig)) => Some(sig),
            _ => None,
        }
    }

    /// The imported package if this object is an import binding.
    pub fn imported(&self) -> Option<&PackageRef> {
        match &self.kind {
            ObjectKind::PkgName { imported } => Some(imported),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ObjectKind::Var => "var",
            ObjectKind::Func => "func",
            ObjectKind::TypeName { alias: false } => "type",
            ObjectKind::TypeName { alias: true } => "alias",
            ObjectKind::PkgName { .. } => "package name",
            ObjectKind::Const => "const",
            ObjectKind::Builtin => "builtin",
            ObjectKind::Label => "label",
            ObjectKind::Nil => "nil",
        }
    }
}

impl std::fmt::Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let qualified = match &self.package {
            Some(pkg) => format!("{}.{}", pkg.path, self.name),
            None => self.name.clone(),
        };
        match &self.kind {
            ObjectKind::PkgName { imported } => write!(f, "package {} ({:?})", self.name, imported.path),
            ObjectKind::TypeName { .. } => write!(f, "type {}", qualified),
            _ => write!(f, "{} {} {}", self.kind_name(), qualified, self.ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BasicKind;

    #[test]
    fn test_object_kind_json_is_flattened() {
        let json = r#"{"name":"Bar","package":{"name":"foo","path":"example.com/foo"},"ty":{"kind":"named","name":"Bar"},"kind":"type_name","alias":false}"#;
        let obj: Object = serde_json::from_str(json).unwrap();
        assert_eq!(obj.kind, ObjectKind::TypeName { alias: false });
        assert_eq!(obj.package.unwrap().name, "foo");
    }

    #[test]
    fn test_signature_only_for_funcs() {
        let f = Object::func(None, "f", Signature::new([], []));
        assert!(f.signature().is_some());

        let v = Object::var(None, "f", Type::func(Signature::new([], [])));
        assert!(v.signature().is_none());
    }

    #[test]
    fn test_object_display() {
        let pkg = PackageRef::std("strings");
        let f = Object::func(
            Some(pkg),
            "ToUpper",
            Signature::new(
                [Type::basic(BasicKind::String)],
                [Type::basic(BasicKind::String)],
            ),
        );
        assert_eq!(f.to_string(), "func strings.ToUpper func(string) string");
    }
}
