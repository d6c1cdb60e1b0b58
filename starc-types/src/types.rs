//! Resolved static types.
//!
//! [`Type`] is a closed set of type shapes. Everything the extractor needs to
//! know about a type (container unwrapping, signature recognition, naming) is
//! a total match over these variants.

use serde::{Deserialize, Serialize};

use crate::PackageRef;

/// A fully resolved static type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    /// A predeclared basic type (`int`, `string`, `bool`, ...).
    Basic { name: BasicKind },
    /// A defined type (`type Foo struct{...}`).
    Named(NamedType),
    /// A type alias (`type Foo = Bar`), kept distinct from its target.
    Alias(AliasType),
    Pointer { elem: Box<Type> },
    Slice { elem: Box<Type> },
    Array { len: u64, elem: Box<Type> },
    Map { key: Box<Type>, value: Box<Type> },
    Chan { dir: ChanDir, elem: Box<Type> },
    Signature(Signature),
    Interface(InterfaceType),
    Struct(StructType),
}

/// Predeclared basic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    Byte,
    Rune,
    UnsafePointer,
    UntypedNil,
}

impl BasicKind {
    /// The spelling of this type in source.
    pub fn as_str(&self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
            BasicKind::Byte => "byte",
            BasicKind::Rune => "rune",
            BasicKind::UnsafePointer => "unsafe.Pointer",
            BasicKind::UntypedNil => "untyped nil",
        }
    }
}

/// A defined type together with the package that declares it.
///
/// Universe types such as `error` have no package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_args: Vec<Type>,
}

/// An alias declaration and the type it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AliasType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageRef>,
    pub target: Box<Type>,
}

/// Channel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

/// A parameter, result, or receiver of a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ty: Type,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub fn unnamed(ty: Type) -> Self {
        Self { name: None, ty }
    }
}

/// A function or method signature.
///
/// For variadic signatures the final parameter has slice type, exactly as
/// the checker reports it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recv: Option<Box<Param>>,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub results: Vec<Param>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub variadic: bool,
}

impl Signature {
    /// A signature from unnamed parameter and result types.
    pub fn new(params: impl IntoIterator<Item = Type>, results: impl IntoIterator<Item = Type>) -> Self {
        Self {
            recv: None,
            params: params.into_iter().map(Param::unnamed).collect(),
            results: results.into_iter().map(Param::unnamed).collect(),
            variadic: false,
        }
    }

    /// Attach a receiver, turning this into a method signature.
    pub fn with_recv(mut self, recv: Param) -> Self {
        self.recv = Some(Box::new(recv));
        self
    }

    pub fn is_method(&self) -> bool {
        self.recv.is_some()
    }
}

/// An interface's explicit method set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct InterfaceType {
    #[serde(default)]
    pub methods: Vec<Method>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub sig: Signature,
}

/// An anonymous struct type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StructType {
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// `None` for embedded fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub ty: Type,
}

impl Type {
    pub fn basic(kind: BasicKind) -> Self {
        Type::Basic { name: kind }
    }

    pub fn named(package: Option<PackageRef>, name: impl Into<String>) -> Self {
        Type::Named(NamedType {
            name: name.into(),
            package,
            type_args: Vec::new(),
        })
    }

    pub fn alias(package: Option<PackageRef>, name: impl Into<String>, target: Type) -> Self {
        Type::Alias(AliasType {
            name: name.into(),
            package,
            target: Box::new(target),
        })
    }

    pub fn pointer(elem: Type) -> Self {
        Type::Pointer {
            elem: Box::new(elem),
        }
    }

    pub fn slice(elem: Type) -> Self {
        Type::Slice {
            elem: Box::new(elem),
        }
    }

    pub fn array(len: u64, elem: Type) -> Self {
        Type::Array {
            len,
            elem: Box::new(elem),
        }
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn func(sig: Signature) -> Self {
        Type::Signature(sig)
    }

    /// Follow alias chains to the first non-alias type.
    pub fn unalias(&self) -> &Type {
        let mut t = self;
        while let Type::Alias(alias) = t {
            t = &alias.target;
        }
        t
    }

    /// The pointee if this is a pointer, looking through aliases.
    pub fn pointee(&self) -> Option<&Type> {
        match self.unalias() {
            Type::Pointer { elem } => Some(elem),
            _ => None,
        }
    }

    /// Strip every level of pointer indirection, looking through aliases.
    ///
    /// The returned type is the last non-pointer type reached, which may
    /// itself be an alias.
    pub fn deref_all(&self) -> &Type {
        let mut t = self;
        while let Some(elem) = t.pointee() {
            t = elem;
        }
        t
    }

    pub fn is_bool(&self) -> bool {
        matches!(
            self.unalias(),
            Type::Basic {
                name: BasicKind::Bool
            }
        )
    }

    /// The signature if this is a function type.
    pub fn as_signature(&self) -> Option<&Signature> {
        match self.unalias() {
            Type::Signature(sig) => Some(sig),
            _ => None,
        }
    }
}
