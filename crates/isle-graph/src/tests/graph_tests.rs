use std::path::{Path, PathBuf};

use crate::{Error, ModuleGraph, ModuleName, SyntaxIssue, TestRuntime};

const DIR: &str = "/dist/_astro";

fn names(refs: &[&str]) -> Vec<ModuleName> {
    refs.iter()
        .map(|r| ModuleName::from_reference(r).unwrap())
        .collect()
}

fn runtime(modules: &[(&str, &str)]) -> TestRuntime {
    modules.iter().fold(TestRuntime::new(), |rt, (name, source)| {
        rt.with_file(Path::new(DIR).join(name), *source)
    })
}

async fn order_of(runtime: &TestRuntime, roots: &[&str]) -> crate::Result<Vec<String>> {
    let roots = names(roots);
    let graph = ModuleGraph::load(runtime, Path::new(DIR), &roots).await?;
    let ordered = graph.order(&roots)?;
    Ok(ordered.keys().map(|n| n.to_string()).collect())
}

#[tokio::test]
async fn dependencies_come_first_and_are_deduplicated() {
    let rt = runtime(&[
        ("a.js", "const a = 1;\nexport { a };"),
        ("b.js", "import { a } from \"./a.js\";\nexport { a as b };"),
    ]);

    let order = order_of(&rt, &["/_astro/a.js", "/_astro/b.js"]).await.unwrap();
    assert_eq!(order, ["a.js", "b.js"]);

    let order = order_of(&rt, &["/_astro/b.js", "/_astro/a.js"]).await.unwrap();
    assert_eq!(order, ["a.js", "b.js"]);
}

#[tokio::test]
async fn shared_dependency_appears_once() {
    let rt = runtime(&[
        ("shared.js", "const s = 0;\nexport { s };"),
        ("x.js", "import { s } from './shared.js';\nexport { s as x };"),
        ("y.js", "import { s } from './shared.js';\nimport './x.js';\nexport { s as y };"),
    ]);

    let order = order_of(&rt, &["./_astro/y.js", "./_astro/x.js", "./_astro/y.js?v=2"])
        .await
        .unwrap();
    assert_eq!(order, ["shared.js", "x.js", "y.js"]);
}

#[tokio::test]
async fn each_module_is_loaded_once() {
    let rt = runtime(&[
        ("leaf.js", "export { }"),
        ("a.js", "import {} from './leaf.js'"),
        ("b.js", "import {} from './leaf.js'\nimport {} from './a.js'"),
    ]);
    let roots = names(&["a.js", "b.js", "a.js"]);

    let graph = ModuleGraph::load(&rt, Path::new(DIR), &roots).await.unwrap();
    assert_eq!(graph.len(), 3);
    let leaf = graph.get(&names(&["leaf.js"])[0]).unwrap();
    assert_eq!(leaf.path, PathBuf::from(DIR).join("leaf.js"));
}

#[tokio::test]
async fn missing_module_is_fatal() {
    let rt = runtime(&[("b.js", "import { a } from './a.js'")]);

    let err = order_of(&rt, &["b.js"]).await.unwrap_err();
    match err {
        Error::ModuleNotFound { name, path } => {
            assert_eq!(name.as_str(), "a.js");
            assert_eq!(path, PathBuf::from(DIR).join("a.js"));
        }
        other => panic!("expected ModuleNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn cycle_is_reported_with_its_path() {
    let rt = runtime(&[
        ("entry.js", "import { a } from './a.js'"),
        ("a.js", "import { b } from './b.js'\nconst a = 1;\nexport { a }"),
        ("b.js", "import { a } from './a.js'\nconst b = 2;\nexport { b }"),
    ]);

    let err = order_of(&rt, &["entry.js"]).await.unwrap_err();
    match &err {
        Error::CyclicDependency { cycle } => {
            let cycle: Vec<_> = cycle.iter().map(ModuleName::as_str).collect();
            assert_eq!(cycle, ["a.js", "b.js", "a.js"]);
        }
        other => panic!("expected CyclicDependency, got {other:?}"),
    }
    assert_eq!(err.to_string(), "Cyclic dependency: a.js -> b.js -> a.js");
}

#[tokio::test]
async fn self_import_is_a_cycle() {
    let rt = runtime(&[("a.js", "import { a } from './a.js'")]);

    let err = order_of(&rt, &["a.js"]).await.unwrap_err();
    assert!(matches!(err, Error::CyclicDependency { cycle } if cycle.len() == 2));
}

#[tokio::test]
async fn unsupported_syntax_names_the_module() {
    let rt = runtime(&[
        ("main.js", "import { v } from './lib.js'"),
        ("lib.js", "const v = 1;\nexport default v;"),
    ]);

    let err = order_of(&rt, &["main.js"]).await.unwrap_err();
    match &err {
        Error::UnsupportedSyntax { module, error } => {
            assert_eq!(module.as_str(), "lib.js");
            assert_eq!(error.issue, SyntaxIssue::DefaultExport);
            assert_eq!(error.line, 2);
        }
        other => panic!("expected UnsupportedSyntax, got {other:?}"),
    }
    assert!(err.to_string().starts_with("Unsupported syntax in lib.js"));
}

#[tokio::test]
async fn invalid_utf8_is_fatal() {
    let rt = TestRuntime::new().with_file(Path::new(DIR).join("a.js"), vec![0xffu8, 0xfe, 0x00]);

    let err = order_of(&rt, &["a.js"]).await.unwrap_err();
    assert!(matches!(err, Error::InvalidUtf8(path) if path.ends_with("a.js")));
}
