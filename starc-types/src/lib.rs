//! Checked program model consumed by the starcgen extractor.
//!
//! The types here describe a single package after type checking: every
//! identifier resolved to an [`Object`] with a static [`Type`], plus the
//! reduced syntax tree the registration scanner walks.
//!
//! # Architecture
//!
//! ```text
//! front end (external) → CheckedPackage + Vec<File> → starcgen-extract → Top
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod ast;
mod check;
mod display;
mod error;
mod info;
mod object;
mod package;
mod types;
pub mod visit;

pub use ast::{
    Decl, Expr, File, FuncDecl, ImportSpec, LitKind, Stmt, TypeSpec, UnaryOp, ValueSpec,
};
pub use check::{CheckConfig, CheckedPackage, ModelChecker, ModelFile, TypeChecker};
pub use display::{Qualifier, qualify_by_path, signature_string, type_key, type_string};
pub use error::{CheckError, Error, Result};
pub use info::{Ident, Occurrence, Position, Resolver, TypeInfo};
pub use object::{Object, ObjectId, ObjectKind};
pub use package::PackageRef;
pub use types::{
    AliasType, BasicKind, ChanDir, Field, InterfaceType, Method, NamedType, Param, Signature,
    StructType, Type,
};
