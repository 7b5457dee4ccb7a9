//! Minimal JavaScript tokenizer.
//!
//! Only as much of the lexical grammar as the statement parser needs:
//! identifiers, punctuation and opaque literal tokens. Comments are dropped.
//! String, template and regular-expression literals are consumed whole so
//! that look-alike text such as `"import { x } from 'y'"` never reaches the
//! parser as tokens.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    String,
    Template,
    Regex,
    Number,
    Punct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    pub fn is_punct(&self, source: &str, punct: &str) -> bool {
        self.kind == TokenKind::Punct && self.text(source) == punct
    }

    pub fn is_ident(&self, source: &str, ident: &str) -> bool {
        self.kind == TokenKind::Ident && self.text(source) == ident
    }
}

/// Keywords after which a `/` starts a regular expression.
const REGEX_PRECEDING_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
];

/// Keywords whose parenthesized head is followed by a statement, so a `/`
/// after the closing `)` starts a regular expression.
const STATEMENT_HEAD_KEYWORDS: &[&str] = &["if", "while", "for", "with"];

pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    prev: Option<Token>,
    /// One entry per open `(`: whether it opens a statement head.
    parens: Vec<bool>,
    /// Whether `prev` is a `)` closing a statement head.
    prev_closes_head: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            prev: None,
            parens: Vec::new(),
            prev_closes_head: false,
        }
    }

    /// Tokenize the whole source.
    pub fn tokenize(source: &'a str) -> Vec<Token> {
        let mut lexer = Self::new(source);
        let mut tokens = Vec::new();
        while let Some(token) = lexer.next_token() {
            tokens.push(token);
        }
        tokens
    }

    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_trivia();
        let start = self.pos;
        let &c = self.bytes.get(start)?;

        let kind = match c {
            b'"' | b'\'' => {
                self.skip_string(c);
                TokenKind::String
            }
            b'`' => {
                self.skip_template();
                TokenKind::Template
            }
            b'0'..=b'9' => {
                self.skip_number();
                TokenKind::Number
            }
            b'.' if self.peek(1).is_some_and(|b| b.is_ascii_digit()) => {
                self.skip_number();
                TokenKind::Number
            }
            b'/' if self.regex_allowed() && self.skip_regex() => TokenKind::Regex,
            c if is_ident_start(c) => {
                self.pos += 1;
                while self.bytes.get(self.pos).is_some_and(|&b| is_ident_part(b)) {
                    self.pos += 1;
                }
                TokenKind::Ident
            }
            _ => {
                self.pos = start + self.punct_len(c);
                TokenKind::Punct
            }
        };

        let token = Token {
            kind,
            start,
            end: self.pos,
        };
        self.prev_closes_head = false;
        if kind == TokenKind::Punct {
            match c {
                b'(' => {
                    let head = self.prev.is_some_and(|prev| {
                        prev.kind == TokenKind::Ident
                            && STATEMENT_HEAD_KEYWORDS.contains(&prev.text(self.source))
                    });
                    self.parens.push(head);
                }
                b')' => self.prev_closes_head = self.parens.pop().unwrap_or(false),
                _ => {}
            }
        }
        self.prev = Some(token);
        Some(token)
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn starts_with(&self, pattern: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(pattern)
    }

    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek(0) {
            if c.is_ascii_whitespace() {
                self.pos += 1;
            } else if self.starts_with(b"//") || self.starts_with(b"<!--") {
                self.skip_line();
            } else if self.starts_with(b"/*") {
                self.pos += 2;
                match memchr::memmem::find(&self.bytes[self.pos..], b"*/") {
                    Some(idx) => self.pos += idx + 2,
                    None => self.pos = self.bytes.len(),
                }
            } else if c >= 0x80 && self.is_unicode_whitespace() {
                // NBSP, BOM and friends
                self.pos += self.char_len();
            } else {
                break;
            }
        }
    }

    fn skip_line(&mut self) {
        match memchr::memchr(b'\n', &self.bytes[self.pos..]) {
            Some(idx) => self.pos += idx + 1,
            None => self.pos = self.bytes.len(),
        }
    }

    fn char_len(&self) -> usize {
        self.source[self.pos..]
            .chars()
            .next()
            .map_or(1, char::len_utf8)
    }

    fn is_unicode_whitespace(&self) -> bool {
        self.source[self.pos..]
            .chars()
            .next()
            .is_some_and(|c| c.is_whitespace() || c == '\u{feff}')
    }

    /// Skip a `'…'` or `"…"` literal. An unescaped newline ends it.
    fn skip_string(&mut self, quote: u8) {
        self.pos += 1;
        while let Some(c) = self.peek(0) {
            match c {
                b'\\' => self.pos += 2,
                b'\n' => return,
                c if c == quote => {
                    self.pos += 1;
                    return;
                }
                _ => self.pos += 1,
            }
        }
        self.pos = self.pos.min(self.bytes.len());
    }

    /// Skip a template literal including any `${…}` substitutions.
    fn skip_template(&mut self) {
        self.pos += 1;
        while let Some(c) = self.peek(0) {
            match c {
                b'\\' => self.pos += 2,
                b'`' => {
                    self.pos += 1;
                    return;
                }
                b'$' if self.peek(1) == Some(b'{') => {
                    self.pos += 2;
                    self.skip_substitution();
                }
                _ => self.pos += 1,
            }
        }
        self.pos = self.pos.min(self.bytes.len());
    }

    /// Skip the expression of a `${…}` substitution up to its closing brace.
    fn skip_substitution(&mut self) {
        let outer_prev = self.prev.take();
        let outer_closes_head = self.prev_closes_head;
        let mut depth = 0usize;
        while let Some(token) = self.next_token() {
            if token.kind != TokenKind::Punct {
                continue;
            }
            match &self.source[token.start..token.end] {
                "{" => depth += 1,
                "}" if depth == 0 => break,
                "}" => depth -= 1,
                _ => {}
            }
        }
        self.prev = outer_prev;
        self.prev_closes_head = outer_closes_head;
    }

    fn skip_number(&mut self) {
        let hex = self.starts_with(b"0x") || self.starts_with(b"0X");
        while let Some(c) = self.peek(0) {
            if c.is_ascii_alphanumeric() || c == b'_' || c == b'.' {
                self.pos += 1;
            } else if !hex
                && (c == b'+' || c == b'-')
                && matches!(self.bytes.get(self.pos - 1), Some(b'e' | b'E'))
            {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn regex_allowed(&self) -> bool {
        let Some(prev) = self.prev else {
            return true;
        };
        let text = prev.text(self.source);
        match prev.kind {
            TokenKind::Punct if text == ")" => self.prev_closes_head,
            TokenKind::Punct => !matches!(text, "]" | "}" | "++" | "--"),
            TokenKind::Ident => REGEX_PRECEDING_KEYWORDS.contains(&text),
            _ => false,
        }
    }

    /// Try to skip a regular expression literal starting at `/`.
    ///
    /// Returns `false` (and leaves the position untouched) when the line ends
    /// before the closing slash, in which case `/` is plain punctuation.
    fn skip_regex(&mut self) -> bool {
        let start = self.pos;
        let mut pos = start + 1;
        let mut in_class = false;
        loop {
            match self.bytes.get(pos) {
                None | Some(b'\n') | Some(b'\r') => return false,
                Some(b'\\') => pos += 2,
                Some(b'[') => {
                    in_class = true;
                    pos += 1;
                }
                Some(b']') => {
                    in_class = false;
                    pos += 1;
                }
                Some(b'/') if !in_class => {
                    pos += 1;
                    break;
                }
                Some(_) => pos += 1,
            }
        }
        while self.bytes.get(pos).is_some_and(|&b| is_ident_part(b)) {
            pos += 1;
        }
        self.pos = pos;
        true
    }

    fn punct_len(&self, c: u8) -> usize {
        if self.starts_with(b"...") {
            3
        } else if self.starts_with(b"++") || self.starts_with(b"--") || self.starts_with(b"?.") {
            2
        } else if c >= 0x80 {
            self.char_len()
        } else {
            1
        }
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'$' || c >= 0x80
}

fn is_ident_part(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'$' || c >= 0x80
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_text(source: &str) -> Vec<(TokenKind, &str)> {
        Lexer::tokenize(source)
            .into_iter()
            .map(|t| (t.kind, t.text(source)))
            .collect()
    }

    #[test]
    fn test_identifiers_and_punctuation() {
        let tokens = kinds_and_text("import { a as b } from \"./m.js\";");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Ident, "import"),
                (TokenKind::Punct, "{"),
                (TokenKind::Ident, "a"),
                (TokenKind::Ident, "as"),
                (TokenKind::Ident, "b"),
                (TokenKind::Punct, "}"),
                (TokenKind::Ident, "from"),
                (TokenKind::String, "\"./m.js\""),
                (TokenKind::Punct, ";"),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let tokens = kinds_and_text("// import x\n/* export { y } */ a");
        assert_eq!(tokens, vec![(TokenKind::Ident, "a")]);
    }

    #[test]
    fn test_strings_are_opaque() {
        let tokens = kinds_and_text(r#"const s = 'export { \'a\' }';"#);
        assert_eq!(tokens[3], (TokenKind::String, r#"'export { \'a\' }'"#));
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_template_with_nested_substitution() {
        let source = "const t = `a ${ {b: `c ${d}`}.b } import(x)`; e";
        let tokens = kinds_and_text(source);
        assert_eq!(tokens[3].0, TokenKind::Template);
        assert!(tokens[3].1.ends_with("import(x)`"));
        assert_eq!(tokens[4], (TokenKind::Punct, ";"));
        assert_eq!(tokens[5], (TokenKind::Ident, "e"));
    }

    #[test]
    fn test_regex_versus_division() {
        let tokens = kinds_and_text("x = a / b / c; y = /import\\(\"[/]\"/g.test(s)");
        let regexes: Vec<_> = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::Regex)
            .map(|(_, t)| *t)
            .collect();
        assert_eq!(regexes, vec![r#"/import\("[/]"/g"#]);
    }

    #[test]
    fn test_regex_after_statement_head() {
        let tokens = kinds_and_text("if (ok) /`/.test(s);\nconst a = 1;");
        assert_eq!(tokens[4], (TokenKind::Regex, "/`/"));
        assert!(tokens.contains(&(TokenKind::Ident, "const")));

        let tokens = kinds_and_text("while (f(x)) /a/.exec(s); y = (a) / 2 / 1;");
        let regexes: Vec<_> = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::Regex)
            .map(|(_, t)| *t)
            .collect();
        assert_eq!(regexes, vec!["/a/"]);
    }

    #[test]
    fn test_regex_after_return_keyword() {
        let tokens = kinds_and_text("return /}/.source");
        assert_eq!(tokens[1], (TokenKind::Regex, "/}/"));
    }

    #[test]
    fn test_spread_and_optional_chaining() {
        let tokens = kinds_and_text("f(...a, b?.import)");
        assert!(tokens.contains(&(TokenKind::Punct, "...")));
        assert!(tokens.contains(&(TokenKind::Punct, "?.")));
        assert!(tokens.contains(&(TokenKind::Ident, "import")));
    }

    #[test]
    fn test_non_ascii_identifiers() {
        let tokens = kinds_and_text("const café = 'é'");
        assert_eq!(tokens[1], (TokenKind::Ident, "café"));
        assert_eq!(tokens[3], (TokenKind::String, "'é'"));
    }
}
