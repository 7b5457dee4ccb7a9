//! Module source rewriting.
//!
//! A module body is turned into the body of an isolated function scope:
//!
//! ```text
//! import { x, y as z } from "./dir/m.js"   ->  const {x:x,y:z} = <lookup m.js>
//! import "./polyfill.js"                   ->  <lookup polyfill.js>
//! export { a, b as c }                     ->  return {a:a,c:b}
//! ```
//!
//! Everything outside the statement spans is kept byte for byte, including a
//! trailing `;`. When the statement has no `;` and more code follows, one is
//! added so the next line cannot continue the expression.

use isle_graph::{ExportDecl, ImportDecl, ModuleName, ModuleSyntax};
use std::ops::Range;

/// Registry lookup used when the target variable is not known yet.
pub fn placeholder_lookup(name: &ModuleName) -> String {
    format!("__import({})", quote(name.as_str()))
}

/// Rewrite every import and the export list of `source`.
///
/// `lookup` yields the expression that evaluates to an imported module's
/// exports, either [`placeholder_lookup`] or a bundle variable.
pub fn transform_module(
    source: &str,
    syntax: &ModuleSyntax,
    lookup: impl Fn(&ModuleName) -> String,
) -> String {
    let mut edits: Vec<(Range<usize>, String)> = syntax
        .imports
        .iter()
        .map(|import| {
            let replacement = rewrite_import(import, &lookup);
            (import.span.clone(), terminate(source, &import.span, replacement))
        })
        .collect();
    if let Some(export) = &syntax.export {
        let replacement = rewrite_export(export);
        edits.push((export.span.clone(), terminate(source, &export.span, replacement)));
    }
    if edits.is_empty() {
        return source.to_string();
    }

    // Spans never overlap, so splicing back to front keeps offsets valid.
    edits.sort_by_key(|(span, _)| std::cmp::Reverse(span.start));
    let mut output = source.to_string();
    for (span, replacement) in edits {
        output.replace_range(span, &replacement);
    }
    output
}

fn rewrite_import(import: &ImportDecl, lookup: &impl Fn(&ModuleName) -> String) -> String {
    let target = lookup(&import.name);
    if import.is_side_effect() {
        return target;
    }
    let pattern = import
        .bindings
        .iter()
        .map(|binding| format!("{}:{}", binding.imported, binding.local))
        .collect::<Vec<_>>()
        .join(",");
    format!("const {{{pattern}}} = {target}")
}

fn rewrite_export(export: &ExportDecl) -> String {
    let object = export
        .bindings
        .iter()
        .map(|binding| format!("{}:{}", binding.exported, binding.local))
        .collect::<Vec<_>>()
        .join(",");
    format!("return {{{object}}}")
}

fn terminate(source: &str, span: &Range<usize>, mut replacement: String) -> String {
    let next = source[span.end..].bytes().find(|b| !b.is_ascii_whitespace());
    if next.is_some_and(|b| b != b';') {
        replacement.push(';');
    }
    replacement
}

/// JSON string literal, which is also a valid JavaScript string literal.
pub(crate) fn quote(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}
