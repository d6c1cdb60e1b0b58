//! Source-style rendering of types.

use std::fmt::Write;

use crate::{ChanDir, PackageRef, Param, Signature, Type};

/// Maps a package to the prefix used when qualifying its types.
///
/// Returning an empty string leaves names from that package unqualified.
pub type Qualifier<'a> = &'a dyn Fn(&PackageRef) -> String;

/// Qualify every package by its import path.
pub fn qualify_by_path(pkg: &PackageRef) -> String {
    pkg.path.clone()
}

/// Render `t` as it would be spelled in source, qualifying package-level
/// names through `q`.
pub fn type_string(t: &Type, q: Qualifier<'_>) -> String {
    let mut buf = String::new();
    Render { q, names: true }.ty(&mut buf, t);
    buf
}

/// Render `t` with every parameter and result name dropped, at any depth.
/// Two types that differ only in parameter names share a key.
pub fn type_key(t: &Type, q: Qualifier<'_>) -> String {
    let mut buf = String::new();
    Render { q, names: false }.ty(&mut buf, t);
    buf
}

/// Render a signature, including parameter names, as `func(x int) string`.
pub fn signature_string(sig: &Signature, q: Qualifier<'_>) -> String {
    let mut buf = String::from("func");
    Render { q, names: true }.signature(&mut buf, sig);
    buf
}

struct Render<'q> {
    q: Qualifier<'q>,
    names: bool,
}

impl Render<'_> {
    fn qualified(&self, buf: &mut String, package: Option<&PackageRef>, name: &str) {
        if let Some(pkg) = package {
            let prefix = (self.q)(pkg);
            if !prefix.is_empty() {
                buf.push_str(&prefix);
                buf.push('.');
            }
        }
        buf.push_str(name);
    }

    fn ty(&self, buf: &mut String, t: &Type) {
        match t {
            Type::Basic { name } => buf.push_str(name.as_str()),
            Type::Named(named) => {
                self.qualified(buf, named.package.as_ref(), &named.name);
                if !named.type_args.is_empty() {
                    buf.push('[');
                    for (i, arg) in named.type_args.iter().enumerate() {
                        if i > 0 {
                            buf.push_str(", ");
                        }
                        self.ty(buf, arg);
                    }
                    buf.push(']');
                }
            }
            Type::Alias(alias) => self.qualified(buf, alias.package.as_ref(), &alias.name),
            Type::Pointer { elem } => {
                buf.push('*');
                self.ty(buf, elem);
            }
            Type::Slice { elem } => {
                buf.push_str("[]");
                self.ty(buf, elem);
            }
            Type::Array { len, elem } => {
                let _ = write!(buf, "[{}]", len);
                self.ty(buf, elem);
            }
            Type::Map { key, value } => {
                buf.push_str("map[");
                self.ty(buf, key);
                buf.push(']');
                self.ty(buf, value);
            }
            Type::Chan { dir, elem } => {
                buf.push_str(match dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.ty(buf, elem);
            }
            Type::Signature(sig) => {
                buf.push_str("func");
                self.signature(buf, sig);
            }
            Type::Interface(iface) => {
                buf.push_str("interface{");
                for (i, method) in iface.methods.iter().enumerate() {
                    if i > 0 {
                        buf.push_str("; ");
                    }
                    buf.push_str(&method.name);
                    self.signature(buf, &method.sig);
                }
                buf.push('}');
            }
            Type::Struct(st) => {
                buf.push_str("struct{");
                for (i, field) in st.fields.iter().enumerate() {
                    if i > 0 {
                        buf.push_str("; ");
                    }
                    if let Some(name) = &field.name {
                        buf.push_str(name);
                        buf.push(' ');
                    }
                    self.ty(buf, &field.ty);
                }
                buf.push('}');
            }
        }
    }

    fn signature(&self, buf: &mut String, sig: &Signature) {
        self.params(buf, &sig.params, sig.variadic);
        match sig.results.as_slice() {
            [] => {}
            [single] if single.name.is_none() || !self.names => {
                buf.push(' ');
                self.ty(buf, &single.ty);
            }
            results => {
                buf.push(' ');
                self.params(buf, results, false);
            }
        }
    }

    fn params(&self, buf: &mut String, params: &[Param], variadic: bool) {
        buf.push('(');
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            if self.names
                && let Some(name) = &param.name
            {
                buf.push_str(name);
                buf.push(' ');
            }
            let last = i + 1 == params.len();
            match (&param.ty, variadic && last) {
                (Type::Slice { elem }, true) => {
                    buf.push_str("...");
                    self.ty(buf, elem);
                }
                (ty, _) => self.ty(buf, ty),
            }
        }
        buf.push(')');
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&type_string(self, &qualify_by_path))
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&signature_string(self, &qualify_by_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasicKind, Field, InterfaceType, Method, StructType};

    fn by_name(pkg: &PackageRef) -> String {
        pkg.name.clone()
    }

    fn int() -> Type {
        Type::basic(BasicKind::Int)
    }

    fn string() -> Type {
        Type::basic(BasicKind::String)
    }

    #[test]
    fn test_container_rendering() {
        let foo = PackageRef::new("foo", "example.com/foo");
        let t = Type::map(
            string(),
            Type::slice(Type::pointer(Type::named(Some(foo), "Bar"))),
        );
        assert_eq!(type_string(&t, &by_name), "map[string][]*foo.Bar");
        assert_eq!(
            type_string(&Type::array(5, int()), &by_name),
            "[5]int"
        );
    }

    #[test]
    fn test_empty_qualifier_drops_prefix() {
        let local = PackageRef::new("main", "example.com/cmd/main");
        let t = Type::named(Some(local), "Bar");
        assert_eq!(type_string(&t, &|_| String::new()), "Bar");
        assert_eq!(t.to_string(), "example.com/cmd/main.Bar");
    }

    #[test]
    fn test_signature_rendering() {
        let sig = Signature {
            recv: None,
            params: vec![Param::new("x", int()), Param::new("rest", Type::slice(string()))],
            results: vec![Param::unnamed(string())],
            variadic: true,
        };
        assert_eq!(sig.to_string(), "func(x int, rest ...string) string");

        let multi = Signature::new([int()], [string(), Type::named(None, "error")]);
        assert_eq!(multi.to_string(), "func(int) (string, error)");

        let bare = Signature::new([], []);
        assert_eq!(bare.to_string(), "func()");
    }

    #[test]
    fn test_interface_and_struct_rendering() {
        assert_eq!(
            Type::Interface(InterfaceType::default()).to_string(),
            "interface{}"
        );
        let iface = Type::Interface(InterfaceType {
            methods: vec![Method {
                name: "Len".into(),
                sig: Signature::new([], [int()]),
            }],
        });
        assert_eq!(iface.to_string(), "interface{Len() int}");

        let st = Type::Struct(StructType {
            fields: vec![
                Field {
                    name: Some("A".into()),
                    ty: int(),
                },
                Field {
                    name: None,
                    ty: string(),
                },
            ],
        });
        assert_eq!(st.to_string(), "struct{A int; string}");
    }

    #[test]
    fn test_generic_args() {
        let t = Type::Named(crate::NamedType {
            name: "Pair".into(),
            package: None,
            type_args: vec![int(), string()],
        });
        assert_eq!(t.to_string(), "Pair[int, string]");
    }

    #[test]
    fn test_type_key_drops_nested_names() {
        let inner = |name: &str| Signature {
            recv: None,
            params: vec![Param::new(name, int())],
            results: vec![Param::new("ok", Type::basic(BasicKind::Bool))],
            variadic: false,
        };
        let outer = |name: &str| {
            Type::func(Signature {
                recv: None,
                params: vec![Param::new("emit", Type::func(inner(name)))],
                results: Vec::new(),
                variadic: false,
            })
        };

        assert_eq!(type_key(&outer("v"), &by_name), "func(func(int) bool)");
        assert_eq!(type_key(&outer("v"), &by_name), type_key(&outer("x"), &by_name));
        assert_eq!(
            type_string(&outer("v"), &by_name),
            "func(emit func(v int) (ok bool))"
        );
    }

    #[test]
    fn test_chan_rendering() {
        let t = Type::Chan {
            dir: ChanDir::Recv,
            elem: Box::new(int()),
        };
        assert_eq!(t.to_string(), "<-chan int");
    }
}
