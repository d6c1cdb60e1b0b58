//! Generation model assembly.

use starcgen_ir::{Func, Top, Wrap};

use crate::{conventions::TOOL_NAME, entities::Entities, naming::name, shape::TypeNamer};

/// Where the generated file goes.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    /// Package the generated file belongs to.
    pub package: &'a str,
    /// Import path of that package, if known; never imported by the output.
    pub package_path: Option<&'a str>,
    pub file_name: &'a str,
}

/// Freeze the accumulated entities into an ordered generation model.
///
/// Every list is sorted: functions, types and imports lexicographically,
/// wraps and shims by type, methods and callback shapes by name.
pub fn assemble(entities: &Entities, target: Target<'_>) -> Top {
    let namer = TypeNamer::new(target.package);

    let mut functions: Vec<String> = entities.functions.iter().cloned().collect();
    functions.sort();
    let mut types: Vec<String> = entities.types.iter().cloned().collect();
    types.sort();

    let mut wraps: Vec<Wrap> = entities
        .wraps
        .iter()
        .map(|(ty, methods)| {
            let mut methods: Vec<Func> = methods
                .iter()
                .map(|(method, sig)| Func {
                    name: method.clone(),
                    ..namer.make_func(sig)
                })
                .collect();
            methods.sort_by(|a, b| a.name.cmp(&b.name));
            Wrap {
                name: name(ty),
                ty: ty.clone(),
                methods,
            }
        })
        .collect();
    wraps.sort_by(|a, b| a.ty.cmp(&b.ty));

    let mut shims: Vec<Func> = entities
        .shims
        .iter()
        .map(|(key, sig)| Func {
            ty: key.clone(),
            ..namer.make_func(sig)
        })
        .collect();
    shims.sort_by(|a, b| a.ty.cmp(&b.ty));

    let mut emitters: Vec<_> = entities.emitters.values().cloned().collect();
    emitters.sort_by(|a, b| a.name.cmp(&b.name));
    let mut inputs: Vec<_> = entities.inputs.values().cloned().collect();
    inputs.sort_by(|a, b| a.name.cmp(&b.name));

    let mut exclude = vec![target.package];
    exclude.extend(target.package_path);
    let imports = entities.imports.resolved(&exclude);

    Top {
        file_name: target.file_name.to_string(),
        tool_name: TOOL_NAME.to_string(),
        package: target.package.to_string(),
        imports,
        functions,
        types,
        wraps,
        shims,
        emitters,
        inputs,
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use starcgen_types::{BasicKind, Signature, Type};

    use super::*;

    fn int() -> Type {
        Type::basic(BasicKind::Int)
    }

    fn string() -> Type {
        Type::basic(BasicKind::String)
    }

    fn target() -> Target<'static> {
        Target {
            package: "main",
            package_path: Some("example.com/app"),
            file_name: "main.shims.go",
        }
    }

    #[test]
    fn test_assemble_empty() {
        let top = assemble(&Entities::new(), target());
        assert!(top.is_empty());
        assert_eq!(top.tool_name, "starcgen");
        assert_eq!(top.file_name, "main.shims.go");
        assert_eq!(top.package, "main");
    }

    #[test]
    fn test_assemble_sorts() {
        let mut entities = Entities::new();
        entities.functions.insert("Zed".into());
        entities.functions.insert("Alpha".into());
        entities.types.insert("b".into());
        entities.types.insert("a".into());
        entities
            .shims
            .insert("func(string) ()".into(), Signature::new([string()], []));
        entities
            .shims
            .insert("func(int) ()".into(), Signature::new([int()], []));

        let top = assemble(&entities, target());
        assert_eq!(top.functions, vec!["Alpha", "Zed"]);
        assert_eq!(top.types, vec!["a", "b"]);
        let keys: Vec<_> = top.shims.iter().map(|s| s.ty.as_str()).collect();
        assert_eq!(keys, vec!["func(int) ()", "func(string) ()"]);
        assert_eq!(top.shims[0].name, "Func1x0Int");
    }

    #[test]
    fn test_assemble_wraps() {
        let mut entities = Entities::new();
        let mut methods = IndexMap::new();
        methods.insert("Teardown".to_string(), Signature::new([], []));
        methods.insert("ProcessElement".to_string(), Signature::new([int()], [string()]));
        entities.wraps.insert("Bar".into(), methods);
        entities.wraps.insert("Alpha".into(), IndexMap::new());

        let top = assemble(&entities, target());
        assert_eq!(top.wraps[0].ty, "Alpha");
        let bar = top.wrap("Bar").unwrap();
        assert_eq!(bar.name, "Bar");
        let names: Vec<_> = bar.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["ProcessElement", "Teardown"]);
        let process = bar.method("ProcessElement").unwrap();
        assert_eq!(process.ty, "func(int) (string)");
        assert_eq!(process.ins, vec!["int"]);
        assert_eq!(process.outs, vec!["string"]);
    }

    #[test]
    fn test_assemble_imports_exclude_own_package() {
        let mut entities = Entities::new();
        entities.imports.add("strings");
        entities.imports.add("example.com/app");
        entities.imports.add("");
        entities.imports.add("context");

        let top = assemble(&entities, target());
        assert_eq!(top.imports, vec!["context", "strings"]);
    }
}
