//! Registration-call scanning.
//!
//! Finds every `beam.RegisterDoFn(...)` (or `genx.RegisterDoFn(...)`) call in
//! the syntax tree and reduces its argument to the identifier it registers.
//! Module names are resolved through the checker's import bindings, so a
//! renamed import (`b "…/beam"`) is recognized and a local variable that
//! happens to be called `beam` is not.

use indexmap::IndexSet;
use starcgen_types::{
    Expr, File, Ident, Resolver, TypeInfo, UnaryOp,
    visit::{self, Visitor},
};

use crate::{
    conventions::{REFLECT_MODULE, REGISTER_METHOD, TYPE_OF, is_register_module},
    pipeline::Trace,
};

/// One way of peeling a wrapper off a registration argument.
pub struct ArgumentRewrite {
    pub name: &'static str,
    apply: for<'e> fn(&Resolver<'_>, &'e Expr) -> Option<&'e Expr>,
}

impl ArgumentRewrite {
    pub fn apply<'e>(&self, resolver: &Resolver<'_>, expr: &'e Expr) -> Option<&'e Expr> {
        (self.apply)(resolver, expr)
    }
}

/// Rewrites tried in order, each at most once.
pub const ARGUMENT_REWRITES: &[ArgumentRewrite] = &[
    ArgumentRewrite {
        name: "reflect.TypeOf(x)",
        apply: strip_type_of,
    },
    ArgumentRewrite {
        name: "(*T)(nil)",
        apply: strip_nil_pointer,
    },
    ArgumentRewrite {
        name: "&x",
        apply: strip_address_of,
    },
    ArgumentRewrite {
        name: "T{}",
        apply: strip_composite,
    },
];

/// Collects the identifiers named by registration calls.
pub struct RegisterCallScanner<'a> {
    resolver: Resolver<'a>,
    trace: Trace<'a>,
    found: IndexSet<String>,
}

impl<'a> RegisterCallScanner<'a> {
    pub fn new(info: &'a TypeInfo, trace: Trace<'a>) -> Self {
        Self {
            resolver: info.resolver(),
            trace,
            found: IndexSet::new(),
        }
    }

    pub fn scan(mut self, files: &[File]) -> IndexSet<String> {
        for file in files {
            self.visit_file(file);
        }
        self.found
    }

    fn register_call<'e>(&self, fun: &'e Expr) -> Option<&'e Ident> {
        let (module, method) = fun.as_qualified()?;
        if method.name != REGISTER_METHOD {
            return None;
        }
        let named = module_name(&self.resolver, module)?;
        is_register_module(named).then_some(module)
    }

    fn record(&mut self, module: &Ident, call: &Expr, args: &[Expr]) {
        self.trace.info_at(&module.pos, format!("found {}", call));
        // Only the first argument names the unit; options may follow.
        let Some(arg) = args.first() else {
            return;
        };

        let mut expr = arg;
        for rewrite in ARGUMENT_REWRITES {
            if let Some(inner) = rewrite.apply(&self.resolver, expr) {
                self.trace
                    .info_at(&module.pos, format!("\tstripped {} from {}", rewrite.name, expr));
                expr = inner;
            }
        }

        match identifier_of(&self.resolver, expr) {
            Some(id) => {
                self.trace.info_at(&module.pos, format!("\tregisters {}", id));
                self.found.insert(id);
            }
            None => self.trace.warning_at(
                &module.pos,
                format!("unexpected registration argument {}; skipping", expr),
            ),
        }
    }
}

impl Visitor for RegisterCallScanner<'_> {
    fn visit_expr(&mut self, expr: &Expr) {
        if let Expr::Call { fun, args } = expr
            && let Some(module) = self.register_call(fun)
        {
            self.record(module, expr, args);
        }
        visit::walk_expr(self, expr);
    }
}

/// The module an identifier names: its import binding when the checker
/// resolved one, its own spelling when nothing resolved it, and nothing
/// when it resolved to some other kind of object.
fn module_name<'i>(resolver: &Resolver<'i>, ident: &'i Ident) -> Option<&'i str> {
    if let Some(pkg) = resolver.package_named_by(ident) {
        return Some(&pkg.name);
    }
    match resolver.object_of(ident) {
        Some(_) => None,
        None => Some(&ident.name),
    }
}

/// The identifier a fully unwrapped argument names: `module.Name` for a
/// selector on a module, `Name` for a bare identifier.
pub fn identifier_of(resolver: &Resolver<'_>, expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident { id } => Some(id.name.clone()),
        Expr::Selector { .. } => {
            let (x, sel) = expr.as_qualified()?;
            let module = resolver
                .package_named_by(x)
                .map(|pkg| pkg.name.as_str())
                .unwrap_or(&x.name);
            Some(format!("{}.{}", module, sel.name))
        }
        _ => None,
    }
}

fn strip_type_of<'e>(resolver: &Resolver<'_>, expr: &'e Expr) -> Option<&'e Expr> {
    let Expr::Call { fun, args } = expr else {
        return None;
    };
    let (module, func) = fun.as_qualified()?;
    if func.name != TYPE_OF || module_name(resolver, module)? != REFLECT_MODULE {
        return None;
    }
    match args.as_slice() {
        [arg] => Some(arg),
        _ => None,
    }
}

fn strip_nil_pointer<'e>(_: &Resolver<'_>, expr: &'e Expr) -> Option<&'e Expr> {
    let Expr::Call { fun, args } = expr else {
        return None;
    };
    let [arg] = args.as_slice() else {
        return None;
    };
    if arg.as_ident().is_none_or(|id| id.name != "nil") {
        return None;
    }
    match &**fun {
        Expr::Paren { x } => match &**x {
            Expr::Star { x } => Some(&**x),
            _ => None,
        },
        _ => None,
    }
}

fn strip_address_of<'e>(_: &Resolver<'_>, expr: &'e Expr) -> Option<&'e Expr> {
    match expr {
        Expr::Unary {
            op: UnaryOp::Addr,
            x,
        } => Some(&**x),
        _ => None,
    }
}

fn strip_composite<'e>(_: &Resolver<'_>, expr: &'e Expr) -> Option<&'e Expr> {
    match expr {
        Expr::CompositeLit { ty: Some(ty), .. } => Some(&**ty),
        _ => None,
    }
}
