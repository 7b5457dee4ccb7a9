//! Statement parser for the supported import/export subset.

use super::lexer::{Lexer, Token, TokenKind};
use super::{
    ExportBinding, ExportDecl, ImportBinding, ImportDecl, ModuleSyntax, SyntaxError, SyntaxIssue,
};
use crate::ModuleName;

const EXCERPT_LIMIT: usize = 80;

/// Find every import and export statement in `source`.
///
/// Supported forms:
///
/// ```text
/// import { a, b as c } from "./m.js"
/// import "./side-effect.js"
/// import("./lazy.js")
/// export { a, b as c }
/// ```
///
/// `import(...)` calls are recorded but not rewritten.
///
/// `import.meta`, member accesses such as `obj.import` and object keys such as
/// `{ import: 1 }` are ordinary expressions and are left alone.
pub fn parse_module(source: &str) -> Result<ModuleSyntax, SyntaxError> {
    Parser {
        source,
        tokens: Lexer::tokenize(source),
        pos: 0,
    }
    .parse()
}

enum Import {
    Static(ImportDecl),
    Dynamic,
    Meta,
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse(mut self) -> Result<ModuleSyntax, SyntaxError> {
        let mut syntax = ModuleSyntax::default();

        while let Some(token) = self.bump() {
            if token.kind != TokenKind::Ident || !self.in_keyword_position(self.pos - 1) {
                continue;
            }
            match token.text(self.source) {
                "import" => match self.parse_import(token)? {
                    Import::Static(import) => syntax.imports.push(import),
                    Import::Dynamic => syntax.dynamic_imports.push(token.start),
                    Import::Meta => {}
                },
                "export" => {
                    let export = self.parse_export(token)?;
                    if syntax.export.is_some() {
                        return Err(self.error(token, SyntaxIssue::MultipleExports));
                    }
                    syntax.export = Some(export);
                }
                _ => {}
            }
        }

        Ok(syntax)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(token)
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn text(&self, token: Token) -> &'a str {
        token.text(self.source)
    }

    /// Member names (`a.import`, `a?.export`) and object keys (`import: 1`)
    /// are not statements.
    fn in_keyword_position(&self, index: usize) -> bool {
        let after_dot = index
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .is_some_and(|prev| prev.is_punct(self.source, ".") || prev.is_punct(self.source, "?."));
        let before_colon = self
            .tokens
            .get(index + 1)
            .is_some_and(|next| next.is_punct(self.source, ":"));
        !after_dot && !before_colon
    }

    fn parse_import(&mut self, keyword: Token) -> Result<Import, SyntaxError> {
        let Some(next) = self.peek() else {
            return Err(self.error(keyword, SyntaxIssue::Malformed("an import clause")));
        };

        match (next.kind, self.text(next)) {
            (TokenKind::Punct, ".") => Ok(Import::Meta),
            (TokenKind::Punct, "(") => Ok(Import::Dynamic),
            (TokenKind::Punct, "*") => Err(self.error(keyword, SyntaxIssue::NamespaceImport)),
            (TokenKind::Ident, _) => Err(self.error(keyword, SyntaxIssue::DefaultImport)),
            (TokenKind::String, _) => {
                self.pos += 1;
                self.finish_import(keyword, next, Vec::new())
                    .map(Import::Static)
            }
            (TokenKind::Punct, "{") => {
                self.pos += 1;
                let bindings = self.parse_import_list(keyword)?;
                match self.bump() {
                    Some(from) if from.is_ident(self.source, "from") => {}
                    _ => return Err(self.error(keyword, SyntaxIssue::Malformed("`from`"))),
                }
                match self.bump() {
                    Some(specifier) if specifier.kind == TokenKind::String => {
                        self.finish_import(keyword, specifier, bindings)
                            .map(Import::Static)
                    }
                    _ => Err(self.error(keyword, SyntaxIssue::Malformed("a module specifier"))),
                }
            }
            _ => Err(self.error(keyword, SyntaxIssue::Malformed("an import clause"))),
        }
    }

    fn finish_import(
        &self,
        keyword: Token,
        specifier: Token,
        bindings: Vec<ImportBinding>,
    ) -> Result<ImportDecl, SyntaxError> {
        let quoted = self.text(specifier);
        let closed = quoted.len() >= 2 && quoted.ends_with(&quoted[..1]);
        if !closed {
            return Err(self.error(keyword, SyntaxIssue::Malformed("a closing quote")));
        }
        let specifier_text = &quoted[1..quoted.len() - 1];
        let name = ModuleName::from_reference(specifier_text)
            .ok_or_else(|| self.error(keyword, SyntaxIssue::EmptySpecifier))?;

        Ok(ImportDecl {
            span: keyword.start..specifier.end,
            specifier: specifier_text.to_string(),
            name,
            bindings,
        })
    }

    /// `{ a, b as c }` after `import`, opening brace already consumed.
    fn parse_import_list(&mut self, keyword: Token) -> Result<Vec<ImportBinding>, SyntaxError> {
        let mut bindings = Vec::new();
        self.parse_list(keyword, |first, second| {
            bindings.push(ImportBinding {
                imported: first.to_string(),
                local: second.to_string(),
            })
        })?;
        Ok(bindings)
    }

    fn parse_export(&mut self, keyword: Token) -> Result<ExportDecl, SyntaxError> {
        let Some(next) = self.peek() else {
            return Err(self.error(keyword, SyntaxIssue::Malformed("an export list")));
        };

        match (next.kind, self.text(next)) {
            (TokenKind::Punct, "*") => Err(self.error(keyword, SyntaxIssue::ExportAll)),
            (TokenKind::Ident, "default") => Err(self.error(keyword, SyntaxIssue::DefaultExport)),
            (TokenKind::Ident, _) => Err(self.error(keyword, SyntaxIssue::DeclarationExport)),
            (TokenKind::Punct, "{") => {
                self.pos += 1;
                let mut bindings = Vec::new();
                let close = self.parse_list(keyword, |first, second| {
                    bindings.push(ExportBinding {
                        local: first.to_string(),
                        exported: second.to_string(),
                    })
                })?;
                if self
                    .peek()
                    .is_some_and(|token| token.is_ident(self.source, "from"))
                {
                    return Err(self.error(keyword, SyntaxIssue::ReExport));
                }
                Ok(ExportDecl {
                    span: keyword.start..close.end,
                    bindings,
                })
            }
            _ => Err(self.error(keyword, SyntaxIssue::Malformed("an export list"))),
        }
    }

    /// Parse `name [as alias], …}` and return the closing brace.
    ///
    /// `on_binding` receives `(name, alias)`; without `as` both are the same.
    fn parse_list(
        &mut self,
        keyword: Token,
        mut on_binding: impl FnMut(&str, &str),
    ) -> Result<Token, SyntaxError> {
        loop {
            let Some(token) = self.bump() else {
                return Err(self.error(keyword, SyntaxIssue::Malformed("`}`")));
            };
            if token.is_punct(self.source, "}") {
                return Ok(token);
            }
            let first = self.binding_name(keyword, token)?;

            let second = if self
                .peek()
                .is_some_and(|token| token.is_ident(self.source, "as"))
            {
                self.pos += 1;
                match self.bump() {
                    Some(alias) => self.binding_name(keyword, alias)?,
                    None => return Err(self.error(keyword, SyntaxIssue::Malformed("an alias"))),
                }
            } else {
                first
            };
            on_binding(first, second);

            match self.bump() {
                Some(sep) if sep.is_punct(self.source, ",") => continue,
                Some(close) if close.is_punct(self.source, "}") => return Ok(close),
                _ => return Err(self.error(keyword, SyntaxIssue::Malformed("`,` or `}`"))),
            }
        }
    }

    fn binding_name(&self, keyword: Token, token: Token) -> Result<&'a str, SyntaxError> {
        match token.kind {
            TokenKind::Ident => Ok(self.text(token)),
            TokenKind::String => Err(self.error(keyword, SyntaxIssue::StringBinding)),
            _ => Err(self.error(keyword, SyntaxIssue::Malformed("a binding name"))),
        }
    }

    fn error(&self, keyword: Token, issue: SyntaxIssue) -> SyntaxError {
        let offset = keyword.start;
        let line = memchr::memchr_iter(b'\n', &self.source.as_bytes()[..offset]).count() + 1;

        let rest = &self.source[offset..];
        let first_line = rest.lines().next().unwrap_or(rest).trim_end();
        let statement = match first_line.char_indices().nth(EXCERPT_LIMIT) {
            Some((cut, _)) => format!("{}...", &first_line[..cut]),
            None => first_line.to_string(),
        };

        SyntaxError {
            offset,
            line,
            statement,
            issue,
        }
    }
}
