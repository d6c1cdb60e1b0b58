//! Depth-first traversal of the syntax tree.
//!
//! Implementors override the `visit_*` methods they care about and call the
//! matching `walk_*` function to keep descending.

use crate::{Decl, Expr, File, Stmt};

pub trait Visitor {
    fn visit_file(&mut self, file: &File) {
        walk_file(self, file);
    }

    fn visit_decl(&mut self, decl: &Decl) {
        walk_decl(self, decl);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_file<V: Visitor + ?Sized>(v: &mut V, file: &File) {
    for decl in &file.decls {
        v.visit_decl(decl);
    }
}

pub fn walk_decl<V: Visitor + ?Sized>(v: &mut V, decl: &Decl) {
    match decl {
        Decl::Func(func) => {
            if let Some(recv) = &func.recv {
                v.visit_expr(recv);
            }
            for stmt in &func.body {
                v.visit_stmt(stmt);
            }
        }
        Decl::Var(spec) | Decl::Const(spec) => {
            if let Some(ty) = &spec.ty {
                v.visit_expr(ty);
            }
            for value in &spec.values {
                v.visit_expr(value);
            }
        }
        Decl::Type(spec) => v.visit_expr(&spec.ty),
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(v: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Expr { x } => v.visit_expr(x),
        Stmt::Assign { lhs, rhs } => {
            for e in lhs.iter().chain(rhs) {
                v.visit_expr(e);
            }
        }
        Stmt::Return { results } => {
            for e in results {
                v.visit_expr(e);
            }
        }
        Stmt::Block { body } => {
            for s in body {
                v.visit_stmt(s);
            }
        }
        Stmt::If {
            init,
            cond,
            then,
            els,
        } => {
            if let Some(init) = init {
                v.visit_stmt(init);
            }
            v.visit_expr(cond);
            for s in then.iter().chain(els) {
                v.visit_stmt(s);
            }
        }
        Stmt::For { cond, body } => {
            if let Some(cond) = cond {
                v.visit_expr(cond);
            }
            for s in body {
                v.visit_stmt(s);
            }
        }
        Stmt::Go { call } | Stmt::Defer { call } => v.visit_expr(call),
        Stmt::Decl { decl } => v.visit_decl(decl),
        Stmt::Other { exprs } => {
            for e in exprs {
                v.visit_expr(e);
            }
        }
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(v: &mut V, expr: &Expr) {
    match expr {
        Expr::Ident { .. } | Expr::BasicLit { .. } => {}
        Expr::Selector { x, .. } | Expr::Paren { x } | Expr::Star { x } | Expr::Unary { x, .. } => {
            v.visit_expr(x)
        }
        Expr::Call { fun, args } => {
            v.visit_expr(fun);
            for arg in args {
                v.visit_expr(arg);
            }
        }
        Expr::CompositeLit { ty, elts } => {
            if let Some(ty) = ty {
                v.visit_expr(ty);
            }
            for e in elts {
                v.visit_expr(e);
            }
        }
        Expr::FuncLit { body } => {
            for s in body {
                v.visit_stmt(s);
            }
        }
        Expr::Index { x, index } => {
            v.visit_expr(x);
            v.visit_expr(index);
        }
        Expr::KeyValue { key, value } => {
            v.visit_expr(key);
            v.visit_expr(value);
        }
        Expr::Binary { x, y, .. } => {
            v.visit_expr(x);
            v.visit_expr(y);
        }
        Expr::Other { children, .. } => {
            for e in children {
                v.visit_expr(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FuncDecl, Ident};

    #[derive(Default)]
    struct CallCounter {
        calls: Vec<String>,
    }

    impl Visitor for CallCounter {
        fn visit_expr(&mut self, expr: &Expr) {
            if let Expr::Call { .. } = expr {
                self.calls.push(expr.to_string());
            }
            walk_expr(self, expr);
        }
    }

    #[test]
    fn test_walk_finds_nested_calls() {
        let inner = Expr::call(Expr::ident("g"), []);
        let file = File {
            name: "main.go".into(),
            package: "main".into(),
            imports: vec![],
            decls: vec![Decl::Func(FuncDecl {
                name: Ident::new("init"),
                recv: None,
                body: vec![Stmt::If {
                    init: None,
                    cond: Expr::ident("ok"),
                    then: vec![Stmt::Expr {
                        x: Expr::call(Expr::ident("f"), [inner]),
                    }],
                    els: vec![Stmt::Defer {
                        call: Expr::call(
                            Expr::FuncLit {
                                body: vec![Stmt::Expr {
                                    x: Expr::call(Expr::ident("h"), []),
                                }],
                            },
                            [],
                        ),
                    }],
                }],
            })],
        };

        let mut counter = CallCounter::default();
        counter.visit_file(&file);
        assert_eq!(counter.calls, vec!["f(g())", "g()", "func literal()", "h()"]);
    }
}
