//! Reduced syntax tree.
//!
//! Only the node shapes needed to locate and unpick call expressions are
//! modelled. Anything else a front end encounters can be lowered to
//! [`Expr::Other`] / [`Stmt::Other`] without losing the calls nested inside.

use serde::{Deserialize, Serialize};

use crate::Ident;

/// One source file of the package under analysis.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct File {
    pub name: String,
    pub package: String,
    #[serde(default)]
    pub imports: Vec<ImportSpec>,
    #[serde(default)]
    pub decls: Vec<Decl>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    /// Explicit local name, if the import is renamed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Ident>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decl", rename_all = "snake_case")]
pub enum Decl {
    Func(FuncDecl),
    Var(ValueSpec),
    Const(ValueSpec),
    Type(TypeSpec),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: Ident,
    /// Receiver type expression for methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recv: Option<Expr>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<Expr>,
    #[serde(default)]
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub name: Ident,
    #[serde(default)]
    pub alias: bool,
    pub ty: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
pub enum Stmt {
    Expr { x: Expr },
    Assign { lhs: Vec<Expr>, rhs: Vec<Expr> },
    Return { results: Vec<Expr> },
    Block { body: Vec<Stmt> },
    If {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        init: Option<Box<Stmt>>,
        cond: Expr,
        then: Vec<Stmt>,
        #[serde(default)]
        els: Vec<Stmt>,
    },
    For {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cond: Option<Expr>,
        body: Vec<Stmt>,
    },
    Go { call: Expr },
    Defer { call: Expr },
    Decl { decl: Decl },
    /// A statement shape that is not modelled; nested expressions are kept.
    Other {
        #[serde(default)]
        exprs: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    /// `&x`
    Addr,
    /// `-x`
    Neg,
    /// `!x`
    Not,
    /// `<-x`
    Recv,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Addr => "&",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::Recv => "<-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LitKind {
    Int,
    Float,
    String,
    Char,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expr {
    Ident { id: Ident },
    /// `x.sel`
    Selector { x: Box<Expr>, sel: Ident },
    /// `fun(args...)`
    Call { fun: Box<Expr>, args: Vec<Expr> },
    /// `(x)`
    Paren { x: Box<Expr> },
    /// `*x`, both the dereference and the pointer type.
    Star { x: Box<Expr> },
    Unary { op: UnaryOp, x: Box<Expr> },
    /// `T{elts...}`; the type is elided inside outer literals.
    CompositeLit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ty: Option<Box<Expr>>,
        #[serde(default)]
        elts: Vec<Expr>,
    },
    BasicLit { kind: LitKind, value: String },
    FuncLit { body: Vec<Stmt> },
    Index { x: Box<Expr>, index: Box<Expr> },
    KeyValue { key: Box<Expr>, value: Box<Expr> },
    Binary { op: String, x: Box<Expr>, y: Box<Expr> },
    /// An expression shape that is not modelled; nested expressions are kept.
    Other {
        text: String,
        #[serde(default)]
        children: Vec<Expr>,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Ident {
            id: Ident::new(name),
        }
    }

    pub fn selector(x: Expr, sel: impl Into<String>) -> Self {
        Expr::Selector {
            x: Box::new(x),
            sel: Ident::new(sel),
        }
    }

    pub fn call(fun: Expr, args: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Call {
            fun: Box::new(fun),
            args: args.into_iter().collect(),
        }
    }

    pub fn paren(x: Expr) -> Self {
        Expr::Paren { x: Box::new(x) }
    }

    pub fn star(x: Expr) -> Self {
        Expr::Star { x: Box::new(x) }
    }

    pub fn addr(x: Expr) -> Self {
        Expr::Unary {
            op: UnaryOp::Addr,
            x: Box::new(x),
        }
    }

    pub fn composite(ty: Expr) -> Self {
        Expr::CompositeLit {
            ty: Some(Box::new(ty)),
            elts: Vec::new(),
        }
    }

    /// `(*T)(nil)`
    pub fn nil_pointer_conversion(ty: Expr) -> Self {
        Expr::call(Expr::paren(Expr::star(ty)), [Expr::ident("nil")])
    }

    /// The identifier if this is a bare identifier.
    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Expr::Ident { id } => Some(id),
            _ => None,
        }
    }

    /// `(receiver, selector)` if this is `receiver.selector` with a bare
    /// identifier on the left.
    pub fn as_qualified(&self) -> Option<(&Ident, &Ident)> {
        match self {
            Expr::Selector { x, sel } => x.as_ident().map(|x| (x, sel)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Ident { id } => f.write_str(&id.name),
            Expr::Selector { x, sel } => write!(f, "{}.{}", x, sel.name),
            Expr::Call { fun, args } => {
                write!(f, "{}(", fun)?;
                write_list(f, args)?;
                f.write_str(")")
            }
            Expr::Paren { x } => write!(f, "({})", x),
            Expr::Star { x } => write!(f, "*{}", x),
            Expr::Unary { op, x } => write!(f, "{}{}", op.as_str(), x),
            Expr::CompositeLit { ty, elts } => {
                if let Some(ty) = ty {
                    write!(f, "{}", ty)?;
                }
                f.write_str("{")?;
                write_list(f, elts)?;
                f.write_str("}")
            }
            Expr::BasicLit { value, .. } => f.write_str(value),
            Expr::FuncLit { .. } => f.write_str("func literal"),
            Expr::Index { x, index } => write!(f, "{}[{}]", x, index),
            Expr::KeyValue { key, value } => write!(f, "{}: {}", key, value),
            Expr::Binary { op, x, y } => write!(f, "{} {} {}", x, op, y),
            Expr::Other { text, .. } => f.write_str(text),
        }
    }
}

fn write_list(f: &mut std::fmt::Formatter<'_>, exprs: &[Expr]) -> std::fmt::Result {
    for (i, e) in exprs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", e)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_display() {
        let reg = Expr::call(
            Expr::selector(Expr::ident("beam"), "RegisterDoFn"),
            [Expr::call(
                Expr::selector(Expr::ident("reflect"), "TypeOf"),
                [Expr::addr(Expr::composite(Expr::ident("Bar")))],
            )],
        );
        assert_eq!(reg.to_string(), "beam.RegisterDoFn(reflect.TypeOf(&Bar{}))");
    }

    #[test]
    fn test_nil_pointer_conversion_display() {
        let e = Expr::nil_pointer_conversion(Expr::selector(Expr::ident("foo"), "Bar"));
        assert_eq!(e.to_string(), "(*foo.Bar)(nil)");
    }

    #[test]
    fn test_as_qualified() {
        let e = Expr::selector(Expr::ident("foo"), "MyFn");
        let (x, sel) = e.as_qualified().unwrap();
        assert_eq!(x.name, "foo");
        assert_eq!(sel.name, "MyFn");

        let nested = Expr::selector(Expr::selector(Expr::ident("a"), "b"), "c");
        assert!(nested.as_qualified().is_none());
    }

    #[test]
    fn test_expr_json_shape() {
        let json = r#"{"expr":"unary","op":"addr","x":{"expr":"composite_lit","ty":{"expr":"ident","id":{"name":"Bar"}}}}"#;
        let e: Expr = serde_json::from_str(json).unwrap();
        assert_eq!(e, Expr::addr(Expr::composite(Expr::ident("Bar"))));
    }
}
