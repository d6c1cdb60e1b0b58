//! Declaration classification.
//!
//! Every resolved identifier (definitions first, then uses) is looked at
//! once. Functions become top-level functions, lifecycle methods become
//! wraps on their receiver type, type names become registered types, and
//! every signature seen along the way is mined for shims, emitters,
//! iterators, nested types and imports.

use std::collections::HashSet;

use indexmap::IndexSet;
use starcgen_types::{Ident, Object, ObjectKind, PackageRef, Param, Signature, Type};

use crate::{
    conventions::{PACKAGE_INITIALIZER, is_lifecycle_method},
    entities::Entities,
    pipeline::Trace,
    shape::{TypeNamer, strip_containers},
};

/// The identifiers generation is restricted to, and which of them have been
/// matched so far.
///
/// Only identifiers from the required set are ever marked found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredIds {
    required: IndexSet<String>,
    found: HashSet<String>,
}

impl RequiredIds {
    pub fn new(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            required: ids.into_iter().map(Into::into).collect(),
            found: HashSet::new(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.required.contains(id)
    }

    /// Mark `id` as matched. Returns false when it is not required.
    pub fn mark_found(&mut self, id: &str) -> bool {
        if !self.required.contains(id) {
            return false;
        }
        if !self.found.contains(id) {
            self.found.insert(id.to_string());
        }
        true
    }

    pub fn is_found(&self, id: &str) -> bool {
        self.found.contains(id)
    }

    /// Required identifiers never matched, in the order they were given.
    pub fn missing(&self) -> Vec<String> {
        self.required
            .iter()
            .filter(|id| !self.found.contains(*id))
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.required.len()
    }

    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}

/// Classifies resolved identifiers into [`Entities`].
pub struct Classifier<'a> {
    namer: TypeNamer<'a>,
    universal_module: &'a str,
    entities: &'a mut Entities,
    required: Option<&'a mut RequiredIds>,
    trace: Trace<'a>,
}

impl<'a> Classifier<'a> {
    pub fn new(
        package: &'a str,
        universal_module: &'a str,
        entities: &'a mut Entities,
        required: Option<&'a mut RequiredIds>,
        trace: Trace<'a>,
    ) -> Self {
        Self {
            namer: TypeNamer::new(package),
            universal_module,
            entities,
            required,
            trace,
        }
    }

    pub fn trace(&mut self) -> &mut Trace<'a> {
        &mut self.trace
    }

    /// Classify one identifier occurrence and the object it resolved to.
    pub fn classify(&mut self, ident: &Ident, obj: Option<&Object>) {
        let Some(obj) = obj else {
            self.trace
                .info_at(&ident.pos, format!("{} has no object, probably a package", ident.name));
            return;
        };
        let Some(pkg) = &obj.package else {
            self.trace
                .info_at(&ident.pos, format!("{} has no package, probably universe", ident.name));
            return;
        };

        let local = pkg.name == self.namer.package();
        let qualified = if local {
            obj.name.clone()
        } else {
            format!("{}.{}", pkg.name, obj.name)
        };
        if !self.is_required(&qualified, obj) {
            self.trace
                .info_at(&ident.pos, format!("{} is not required, skipping", qualified));
            return;
        }

        match &obj.kind {
            ObjectKind::Var => {
                self.trace
                    .info_at(&ident.pos, format!("{} is a variable, skipping", qualified));
            }
            ObjectKind::Func => {
                let Some(sig) = obj.signature() else {
                    return;
                };
                self.classify_func(ident, &qualified, pkg, local, sig);
            }
            ObjectKind::TypeName { .. } => {
                self.trace
                    .info_at(&ident.pos, format!("{} defines type {}", qualified, obj.ty));
                self.extract_type(&obj.ty);
            }
            _ => {
                self.trace.info_at(
                    &ident.pos,
                    format!("{} defines {} {}", qualified, obj.kind_name(), obj.ty),
                );
            }
        }
    }

    fn classify_func(
        &mut self,
        ident: &Ident,
        qualified: &str,
        pkg: &PackageRef,
        local: bool,
        sig: &Signature,
    ) {
        if let Some(recv) = &sig.recv {
            if !is_lifecycle_method(&ident.name) {
                self.trace
                    .info_at(&ident.pos, format!("{} is not a lifecycle method, skipping", qualified));
                return;
            }
            let receiver = self.namer.type_string(recv.ty.deref_all());
            self.trace.info_at(
                &ident.pos,
                format!("{} is a lifecycle method of {}", qualified, receiver),
            );
            self.entities
                .wraps
                .entry(receiver)
                .or_default()
                .insert(ident.name.clone(), sig.clone());
        } else if ident.name != PACKAGE_INITIALIZER {
            self.trace
                .info_at(&ident.pos, format!("{} is a function", qualified));
            self.entities.functions.insert(qualified.to_string());
        }

        if !local {
            self.entities.imports.add(&pkg.path);
        }
        self.entities
            .shims
            .entry(self.namer.sig_key(sig))
            .or_insert_with(|| sig.clone());
        self.extract_from_signature(sig);
    }

    /// Apply the allow-list, if any.
    ///
    /// A lifecycle method is also kept when its dereferenced receiver type
    /// is required, which pulls in every lifecycle method of a required
    /// structural unit.
    fn is_required(&mut self, qualified: &str, obj: &Object) -> bool {
        let Some(required) = self.required.as_deref_mut() else {
            return true;
        };
        if required.mark_found(qualified) {
            self.trace.info(format!("{} is required", qualified));
            return true;
        }

        let Type::Signature(sig) = &obj.ty else {
            return false;
        };
        let Some(recv) = &sig.recv else {
            return false;
        };
        if !is_lifecycle_method(qualified) {
            return false;
        }
        let receiver = self.namer.type_string(recv.ty.deref_all());
        if required.mark_found(&receiver) {
            self.trace.info(format!(
                "{} is required through its receiver {}",
                qualified, receiver
            ));
            return true;
        }
        false
    }

    fn extract_from_signature(&mut self, sig: &Signature) {
        self.extract_from_tuple(&sig.params);
        self.extract_from_tuple(&sig.results);
    }

    fn extract_from_tuple(&mut self, params: &[Param]) {
        for param in params {
            let base = strip_containers(&param.ty);
            match base {
                Type::Alias(alias) => {
                    if let Some(pkg) = &alias.package {
                        self.entities.imports.add(&pkg.path);
                    }
                    self.extract_type(base);
                }
                Type::Named(named) => {
                    match &named.package {
                        Some(pkg) => self.entities.imports.add(&pkg.path),
                        None => self.trace.info(format!("{} has no package", base)),
                    }
                    self.extract_type(base);
                }
                _ => {}
            }

            if let Some(callback) = param.ty.as_signature() {
                if let Some(emitter) = self.namer.make_emitter(callback) {
                    self.entities
                        .emitters
                        .entry(emitter.name.clone())
                        .or_insert(emitter);
                }
                if let Some(input) = self.namer.make_input(callback) {
                    self.entities
                        .inputs
                        .entry(input.name.clone())
                        .or_insert(input);
                }
                self.extract_from_signature(callback);
            }
        }
    }

    /// Register a named type (or alias) unless it belongs to the universal
    /// module. Aliases are unwrapped by one level only.
    fn extract_type(&mut self, ty: &Type) {
        let (target, package) = match ty {
            Type::Alias(alias) => match alias.target.as_ref() {
                Type::Named(named) => (alias.target.as_ref(), named.package.as_ref()),
                Type::Alias(inner) => (alias.target.as_ref(), inner.package.as_ref()),
                _ => (ty, alias.package.as_ref()),
            },
            Type::Named(named) => (ty, named.package.as_ref()),
            _ => {
                self.trace.info(format!("{} is not a named type, skipping", ty));
                return;
            }
        };
        let Some(pkg) = package else {
            self.trace.info(format!("{} has no package", target));
            return;
        };

        self.entities.imports.add(&pkg.path);
        if pkg.path == self.universal_module {
            self.trace
                .info(format!("{} is from the universal module, skipping", target));
            return;
        }
        self.entities.types.insert(self.namer.type_string(target));
    }
}

#[cfg(test)]
mod tests {
    use starcgen_types::{BasicKind, Position};

    use super::*;
    use crate::conventions::DEFAULT_UNIVERSAL_MODULE;

    fn local() -> PackageRef {
        PackageRef::new("main", "example.com/app")
    }

    fn foo() -> PackageRef {
        PackageRef::new("foo", "example.com/foo")
    }

    fn int() -> Type {
        Type::basic(BasicKind::Int)
    }

    fn string() -> Type {
        Type::basic(BasicKind::String)
    }

    fn ident(name: &str) -> Ident {
        Ident::at(name, Position::new("main.go", 1, 1))
    }

    fn classify(
        required: Option<&mut RequiredIds>,
        objects: &[(&str, Object)],
    ) -> Entities {
        let mut entities = Entities::new();
        let mut diagnostics = Vec::new();
        let mut classifier = Classifier::new(
            "main",
            DEFAULT_UNIVERSAL_MODULE,
            &mut entities,
            required,
            Trace::new("classify", true, &mut diagnostics),
        );
        for (name, obj) in objects {
            classifier.classify(&ident(name), Some(obj));
        }
        drop(classifier);
        entities
    }

    fn bar() -> Type {
        Type::named(Some(local()), "Bar")
    }

    fn process_element() -> Object {
        Object::func(
            Some(local()),
            "ProcessElement",
            Signature::new([int()], [string()]).with_recv(Param::new("b", Type::pointer(bar()))),
        )
    }

    #[test]
    fn test_required_ids() {
        let mut required = RequiredIds::new(["Bar", "Quux"]);
        assert!(required.mark_found("Bar"));
        assert!(!required.mark_found("Nope"));
        assert!(required.is_found("Bar"));
        assert!(!required.is_found("Nope"));
        assert_eq!(required.missing(), vec!["Quux"]);
    }

    #[test]
    fn test_function_and_shim() {
        let entities = classify(
            None,
            &[("Foo", Object::func(Some(local()), "Foo", Signature::new([string()], [int()])))],
        );
        assert_eq!(entities.functions.iter().collect::<Vec<_>>(), vec!["Foo"]);
        assert!(entities.shims.contains_key("func(string) (int)"));
        assert!(entities.imports.is_empty());
    }

    #[test]
    fn test_init_is_not_a_function() {
        let entities = classify(
            None,
            &[("init", Object::func(Some(local()), "init", Signature::new([], [])))],
        );
        assert!(entities.functions.is_empty());
        assert!(entities.shims.contains_key("func() ()"));
    }

    #[test]
    fn test_lifecycle_method_wraps_receiver() {
        let entities = classify(None, &[("ProcessElement", process_element())]);
        let methods = entities.wraps.get("Bar").unwrap();
        assert!(methods.contains_key("ProcessElement"));
        assert!(entities.functions.is_empty());
        assert!(entities.shims.contains_key("func(int) (string)"));
    }

    #[test]
    fn test_other_methods_skipped() {
        let method = Object::func(
            Some(local()),
            "String",
            Signature::new([], [string()]).with_recv(Param::unnamed(bar())),
        );
        let entities = classify(None, &[("String", method)]);
        assert!(entities.wraps.is_empty());
        assert!(entities.shims.is_empty());
    }

    #[test]
    fn test_receiver_pointer_depth() {
        let method = Object::func(
            Some(local()),
            "Setup",
            Signature::new([], []).with_recv(Param::unnamed(Type::pointer(Type::pointer(bar())))),
        );
        let entities = classify(None, &[("Setup", method)]);
        assert!(entities.wraps.contains_key("Bar"));
    }

    #[test]
    fn test_foreign_function_is_qualified_and_imported() {
        let entities = classify(
            None,
            &[(
                "ToUpper",
                Object::func(Some(PackageRef::std("strings")), "ToUpper", Signature::new([string()], [string()])),
            )],
        );
        assert!(entities.functions.contains("strings.ToUpper"));
        assert!(entities.imports.contains("strings"));
    }

    #[test]
    fn test_type_names_and_universal_module() {
        let event_time = PackageRef::new("typex", DEFAULT_UNIVERSAL_MODULE);
        let entities = classify(
            None,
            &[
                ("Bar", Object::type_name(Some(local()), "Bar")),
                ("EventTime", Object::type_name(Some(event_time), "EventTime")),
            ],
        );
        assert_eq!(entities.types.iter().collect::<Vec<_>>(), vec!["Bar"]);
        assert!(entities.imports.contains(DEFAULT_UNIVERSAL_MODULE));
    }

    #[test]
    fn test_alias_unwrapped_one_level() {
        let target = Type::named(Some(foo()), "Widget");
        let entities = classify(
            None,
            &[
                ("W", Object::alias(Some(local()), "W", target)),
                ("Ints", Object::alias(Some(local()), "Ints", Type::slice(int()))),
            ],
        );
        assert!(entities.types.contains("foo.Widget"));
        assert!(entities.types.contains("Ints"));
        assert!(!entities.types.contains("W"));
        assert!(entities.imports.contains("example.com/foo"));
    }

    #[test]
    fn test_signature_mining() {
        let widget = Type::named(Some(foo()), "Widget");
        let emit = Type::func(Signature::new([string(), int()], []));
        let iter = Type::func(Signature::new([Type::pointer(widget.clone())], [Type::basic(BasicKind::Bool)]));
        let sig = Signature::new([Type::slice(Type::pointer(bar())), iter, emit], []);
        let entities = classify(None, &[("Run", Object::func(Some(local()), "Run", sig))]);

        assert!(entities.types.contains("Bar"));
        assert!(entities.types.contains("foo.Widget"));
        assert!(entities.emitters.contains_key("EmitStringInt"));
        assert!(entities.inputs.contains_key("IterFoo۰Widget"));
        assert!(entities.imports.contains("example.com/foo"));
        assert_eq!(entities.shims.len(), 1);
    }

    #[test]
    fn test_nested_callbacks_are_mined() {
        let widget = Type::named(Some(foo()), "Widget");
        let inner = Type::func(Signature::new([widget], []));
        let outer = Type::func(Signature::new([int(), inner], []));
        let sig = Signature::new([outer], []);
        let entities = classify(None, &[("Walk", Object::func(Some(local()), "Walk", sig))]);

        let emitters: Vec<_> = entities.emitters.keys().map(String::as_str).collect();
        assert_eq!(emitters, vec!["EmitIntEmitFoo۰Widget", "EmitFoo۰Widget"]);
        assert!(entities.types.contains("foo.Widget"));
        assert!(entities.imports.contains("example.com/foo"));
        assert_eq!(entities.shims.len(), 1);
        assert!(entities.shims.contains_key("func(func(int, func(foo.Widget))) ()"));
    }

    #[test]
    fn test_allow_list_filters() {
        let mut required = RequiredIds::new(["Bar"]);
        let entities = classify(
            Some(&mut required),
            &[
                ("Foo", Object::func(Some(local()), "Foo", Signature::new([], []))),
                ("Bar", Object::type_name(Some(local()), "Bar")),
                ("ProcessElement", process_element()),
            ],
        );
        assert!(entities.functions.is_empty());
        assert!(entities.types.contains("Bar"));
        assert!(entities.wraps.contains_key("Bar"));
        assert!(required.missing().is_empty());
    }

    #[test]
    fn test_allow_list_keeps_method_of_required_receiver() {
        let mut required = RequiredIds::new(["Bar"]);
        let entities = classify(Some(&mut required), &[("ProcessElement", process_element())]);
        assert!(entities.wraps.contains_key("Bar"));
        assert!(required.is_found("Bar"));
    }

    #[test]
    fn test_missing_package_is_skipped() {
        let mut entities = Entities::new();
        let mut diagnostics = Vec::new();
        let mut classifier = Classifier::new(
            "main",
            DEFAULT_UNIVERSAL_MODULE,
            &mut entities,
            None,
            Trace::new("classify", true, &mut diagnostics),
        );
        classifier.classify(&ident("main"), None);
        classifier.classify(&ident("int"), Some(&Object::type_name(None, "int")));
        drop(classifier);

        assert!(entities.types.is_empty());
        assert_eq!(diagnostics.len(), 2);
    }
}
