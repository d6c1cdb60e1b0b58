//! Signature shapes and canonical type naming.
//!
//! A function-valued parameter is an *emitter* when it returns nothing and
//! takes one to three arguments, and an *iterator* when it returns exactly
//! one `bool` and every argument is a pointer. The optional leading argument
//! of a three-argument shape is the event timestamp.

use starcgen_ir::{Emitter, Func, Input};
use starcgen_types::{PackageRef, Param, Signature, Type, type_key, type_string};

use crate::naming::{func_name, name, tail};

/// Renders types relative to the package under analysis.
#[derive(Debug, Clone, Copy)]
pub struct TypeNamer<'a> {
    package: &'a str,
}

/// Arity split of a recognized shape.
struct Parts<'t> {
    time: bool,
    key: Option<&'t Type>,
    val: &'t Type,
}

impl<'a> TypeNamer<'a> {
    pub fn new(package: &'a str) -> Self {
        Self { package }
    }

    pub fn package(&self) -> &'a str {
        self.package
    }

    /// The qualifier for `pkg`: the final segment of its name, or nothing
    /// for the package under analysis.
    pub fn qualifier(&self, pkg: &PackageRef) -> String {
        let qualifier = tail(&pkg.name);
        if qualifier == self.package {
            return String::new();
        }
        qualifier.to_string()
    }

    pub fn type_string(&self, t: &Type) -> String {
        type_string(t, &|pkg: &PackageRef| self.qualifier(pkg))
    }

    /// Key identifying a signature by its parameter and result types alone:
    /// `func(p1,p2) (r1,r2)`. Names are dropped at every depth, including
    /// inside callback parameters.
    pub fn sig_key(&self, sig: &Signature) -> String {
        let key = |params: &[Param]| -> Vec<String> {
            params
                .iter()
                .map(|p| type_key(&p.ty, &|pkg: &PackageRef| self.qualifier(pkg)))
                .collect()
        };
        format!(
            "func({}) ({})",
            key(&sig.params).join(","),
            key(&sig.results).join(",")
        )
    }

    fn type_strings(&self, params: &[Param]) -> Vec<String> {
        params.iter().map(|p| self.type_string(&p.ty)).collect()
    }

    pub fn make_emitter(&self, sig: &Signature) -> Option<Emitter> {
        if !sig.results.is_empty() {
            return None;
        }
        let types: Vec<&Type> = sig.params.iter().map(|p| &p.ty).collect();
        let parts = split(&types)?;
        let (key, val, shape) = self.render(&parts);
        let prefix = if parts.time { "EmitET" } else { "Emit" };
        Some(Emitter {
            name: format!("{}{}", prefix, shape),
            ty: self.sig_key(sig),
            time: parts.time,
            key,
            val,
        })
    }

    pub fn make_input(&self, sig: &Signature) -> Option<Input> {
        match sig.results.as_slice() {
            [result] if result.ty.is_bool() => {}
            _ => return None,
        }
        let elems = sig
            .params
            .iter()
            .map(|p| p.ty.pointee())
            .collect::<Option<Vec<_>>>()?;
        let parts = split(&elems)?;
        let (key, val, shape) = self.render(&parts);
        let prefix = if parts.time { "IterET" } else { "Iter" };
        Some(Input {
            name: format!("{}{}", prefix, shape),
            ty: self.sig_key(sig),
            time: parts.time,
            key,
            val,
        })
    }

    /// Key and value type strings, plus the shape name built from their
    /// canonical names.
    fn render(&self, parts: &Parts<'_>) -> (Option<String>, String, String) {
        let mut shape = parts.key.map(|k| self.name_type(k)).unwrap_or_default();
        shape.push_str(&self.name_type(parts.val));
        let key = parts.key.map(|k| self.type_string(k));
        (key, self.type_string(parts.val), shape)
    }

    /// Canonical identifier fragment for a type.
    pub fn name_type(&self, t: &Type) -> String {
        match t {
            Type::Signature(sig) => {
                if let Some(emitter) = self.make_emitter(sig) {
                    return emitter.name;
                }
                if let Some(input) = self.make_input(sig) {
                    return input.name;
                }
                name(&self.sig_key(sig))
            }
            Type::Slice { elem } => format!("SliceOf{}", self.name_type(elem)),
            Type::Map { key, value } => {
                format!("MapOf{}_{}", self.name_type(key), self.name_type(value))
            }
            Type::Array { len, elem } => format!("ArrayOf{}{}", len, self.name_type(elem)),
            _ => name(&self.type_string(t)),
        }
    }

    /// The shim descriptor for a signature.
    pub fn make_func(&self, sig: &Signature) -> Func {
        let ins: Vec<String> = sig.params.iter().map(|p| self.name_type(&p.ty)).collect();
        let outs: Vec<String> = sig.results.iter().map(|p| self.name_type(&p.ty)).collect();
        Func {
            name: func_name(&ins, &outs),
            ty: self.sig_key(sig),
            ins: self.type_strings(&sig.params),
            outs: self.type_strings(&sig.results),
        }
    }
}

fn split<'t>(types: &[&'t Type]) -> Option<Parts<'t>> {
    match *types {
        [val] => Some(Parts {
            time: false,
            key: None,
            val,
        }),
        [key, val] => Some(Parts {
            time: false,
            key: Some(key),
            val,
        }),
        [_, key, val] => Some(Parts {
            time: true,
            key: Some(key),
            val,
        }),
        _ => None,
    }
}

/// Strip slice, pointer and array layers (looking through aliases) down to
/// the element type. Maps are left intact.
pub fn strip_containers(t: &Type) -> &Type {
    let mut t = t;
    loop {
        match t.unalias() {
            Type::Slice { elem } | Type::Pointer { elem } | Type::Array { elem, .. } => t = elem,
            _ => return t,
        }
    }
}
