//! Import/export syntax of island modules.
//!
//! Island modules are machine-generated and use a small slice of the module
//! grammar: named imports, bare side-effect imports, `import(...)` calls and
//! at most one local export list. [`parse_module`] finds those statements
//! with byte spans so they can be rewritten in place, and rejects everything
//! else in the module grammar with a [`SyntaxError`].

mod lexer;
mod parser;

pub use parser::parse_module;

use serde::Serialize;
use std::fmt;
use std::ops::Range;

use crate::ModuleName;

/// `imported as local` inside an import list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportBinding {
    pub imported: String,
    pub local: String,
}

/// `local as exported` inside an export list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportBinding {
    pub local: String,
    pub exported: String,
}

/// A static import statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportDecl {
    /// From `import` through the closing quote of the specifier.
    pub span: Range<usize>,
    /// Specifier as written, without quotes.
    pub specifier: String,
    /// Module the specifier resolves to.
    pub name: ModuleName,
    /// Empty for side-effect imports.
    pub bindings: Vec<ImportBinding>,
}

impl ImportDecl {
    pub fn is_side_effect(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// The module's export list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportDecl {
    /// From `export` through the closing `}`.
    pub span: Range<usize>,
    pub bindings: Vec<ExportBinding>,
}

/// Parsed import/export statements of one module, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleSyntax {
    pub imports: Vec<ImportDecl>,
    pub export: Option<ExportDecl>,
    /// Offsets of `import(...)` calls. They stay as written and load their
    /// chunk lazily at runtime.
    pub dynamic_imports: Vec<usize>,
}

impl ModuleSyntax {
    /// Names of imported modules in source order, duplicates included.
    pub fn dependencies(&self) -> impl Iterator<Item = &ModuleName> {
        self.imports.iter().map(|import| &import.name)
    }
}

/// Why a statement could not be accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxIssue {
    #[error("default imports are not supported")]
    DefaultImport,
    #[error("namespace imports are not supported")]
    NamespaceImport,
    #[error("default exports are not supported")]
    DefaultExport,
    #[error("declaration exports are not supported, use an export list")]
    DeclarationExport,
    #[error("`export *` is not supported")]
    ExportAll,
    #[error("re-exports are not supported")]
    ReExport,
    #[error("string-named bindings are not supported")]
    StringBinding,
    #[error("only one export list is supported per module")]
    MultipleExports,
    #[error("import specifier is empty")]
    EmptySpecifier,
    #[error("malformed statement, expected {0}")]
    Malformed(&'static str),
}

/// A rejected import/export statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Byte offset of the statement keyword.
    pub offset: usize,
    /// 1-based line of `offset`.
    pub line: usize,
    /// First line of the statement, shortened.
    pub statement: String,
    pub issue: SyntaxIssue,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}: `{}`", self.issue, self.line, self.statement)
    }
}

impl std::error::Error for SyntaxError {}
