//! Bundle assembly.
//!
//! Output layout for modules `util.js` and `main.js`:
//!
//! ```text
//! // util.js
//! const __import0 = (() => {function f() {}
//! return {f:f}})();
//!
//! // main.js
//! const __import1 = (() => {const {f:f} = __import0; f();})();
//!
//! const __imports = {"util.js": __import0,"main.js": __import1};
//! const __import = (name) => __imports[name];
//!
//! ```
//!
//! Static imports reference the generated variable directly. The registry
//! and `__import` stay available for dynamic `__import("…")` calls made by
//! the page.

use isle_graph::{LoadedModule, ModuleMap, ModuleName};

use crate::transform::{placeholder_lookup, quote, transform_module};

/// One page's bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    /// `<uuid>.js`
    pub file_name: String,
    pub source: String,
    /// Embedded modules in execution order.
    pub modules: Vec<ModuleName>,
}

/// Name of the variable holding the exports of the `index`-th module.
pub fn import_variable(index: usize) -> String {
    format!("__import{index}")
}

/// Fresh bundle file name.
pub fn bundle_file_name() -> String {
    format!("{}.js", uuid::Uuid::new_v4())
}

/// Assemble `ordered` (dependencies first) into a bundle named `file_name`.
pub fn assemble(ordered: &ModuleMap<&LoadedModule>, file_name: String) -> Bundle {
    let lookup = |name: &ModuleName| match ordered.index_of(name) {
        Some(index) => import_variable(index),
        None => placeholder_lookup(name),
    };

    let mut source = String::new();
    for (index, (name, module)) in ordered.iter().enumerate() {
        let body = transform_module(&module.source, &module.syntax, lookup);
        // A trailing line comment would swallow the closing `})();`
        let terminator = if ends_in_line_comment(&body) { "\n" } else { "" };
        source.push_str(&format!(
            "// {name}\nconst {} = (() => {{{body}{terminator}}})();\n\n",
            import_variable(index)
        ));
    }

    let registry = ordered
        .keys()
        .enumerate()
        .map(|(index, name)| format!("{}: {}", quote(name.as_str()), import_variable(index)))
        .collect::<Vec<_>>()
        .join(",");
    source.push_str(&format!("const __imports = {{{registry}}};\n"));
    source.push_str("const __import = (name) => __imports[name];\n\n");

    Bundle {
        file_name,
        source,
        modules: ordered.keys().cloned().collect(),
    }
}

fn ends_in_line_comment(body: &str) -> bool {
    body.rsplit('\n')
        .next()
        .is_some_and(|last_line| last_line.contains("//"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use isle_graph::parse_module;
    use std::path::PathBuf;

    fn module(name: &str, source: &str) -> LoadedModule {
        LoadedModule {
            name: ModuleName::from_reference(name).unwrap(),
            path: PathBuf::from(name),
            source: source.to_string(),
            syntax: parse_module(source).unwrap(),
        }
    }

    fn ordered<'a>(modules: &'a [LoadedModule]) -> ModuleMap<&'a LoadedModule> {
        let mut map = ModuleMap::new();
        for module in modules {
            map.insert_if_absent(module.name.clone(), module);
        }
        map
    }

    #[test]
    fn test_layout() {
        let modules = [
            module("util.js", "function f() {}\nexport { f }"),
            module("main.js", "import { f } from \"util.js\"; f();"),
        ];
        let bundle = assemble(&ordered(&modules), "b.js".into());

        assert_eq!(
            bundle.source,
            "// util.js\nconst __import0 = (() => {function f() {}\nreturn {f:f}})();\n\n\
             // main.js\nconst __import1 = (() => {const {f:f} = __import0; f();})();\n\n\
             const __imports = {\"util.js\": __import0,\"main.js\": __import1};\n\
             const __import = (name) => __imports[name];\n\n"
        );
        assert_eq!(bundle.file_name, "b.js");
        let names: Vec<_> = bundle.modules.iter().map(ModuleName::as_str).collect();
        assert_eq!(names, ["util.js", "main.js"]);
    }

    #[test]
    fn test_static_imports_never_use_the_lookup_function() {
        let modules = [
            module("a.js", "const a = 1;\nexport { a };"),
            module("b.js", "import { a } from './a.js';\nconst b = a;\nexport { b };"),
            module("c.js", "import './a.js';\nimport { b } from './b.js';\nb;"),
        ];
        let bundle = assemble(&ordered(&modules), bundle_file_name());

        assert!(!bundle.source.contains("__import(\""));
        assert!(bundle.source.contains("const {a:a} = __import0;"));
        assert!(bundle.source.contains("(() => {__import0;\nconst {b:b} = __import1;"));
    }

    #[test]
    fn test_trailing_line_comment_is_closed() {
        let modules = [module("a.js", "run();\n//# sourceMappingURL=a.js.map")];
        let bundle = assemble(&ordered(&modules), "b.js".into());
        assert!(
            bundle
                .source
                .contains("//# sourceMappingURL=a.js.map\n})();")
        );
    }

    #[test]
    fn test_bundle_file_name_is_uuid() {
        let name = bundle_file_name();
        let id = name.strip_suffix(".js").unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
        assert_ne!(name, bundle_file_name());
    }
}
