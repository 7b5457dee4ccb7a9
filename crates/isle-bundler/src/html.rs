//! Page scanning and patching.
//!
//! Pages are treated as text. A module reference is any double-quoted value
//! ending in `.js`, wherever it appears: `<script src>`, island attributes
//! such as `component-url`, or inline script strings.

use isle_graph::{ModuleMap, ModuleName};
use memchr::memchr_iter;
use regex::Regex;
use std::ops::Range;

use crate::{Error, Result};

/// Byte ranges of every double-quoted `.js` value, quotes excluded.
///
/// Every `"` may open a value, so text between two attribute values is a
/// candidate too, exactly like a `"([^"]*?\.js)"` search.
pub fn reference_spans(html: &str) -> Vec<Range<usize>> {
    let quotes: Vec<usize> = memchr_iter(b'"', html.as_bytes()).collect();
    let mut spans = Vec::new();
    let mut i = 0;
    while i + 1 < quotes.len() {
        let value = quotes[i] + 1..quotes[i + 1];
        if html[value.clone()].ends_with(".js") {
            spans.push(value);
            i += 2;
        } else {
            i += 1;
        }
    }
    spans
}

/// Distinct module references in order of first appearance.
pub fn scan_references(html: &str) -> Vec<String> {
    let mut references: Vec<String> = Vec::new();
    for span in reference_spans(html) {
        let value = &html[span];
        if !references.iter().any(|seen| seen == value) {
            references.push(value.to_string());
        }
    }
    references
}

/// Bundle path as seen from the page.
///
/// Reuses the leading `./`, `../` or `/` segments of `first_reference` so
/// the bundle resolves the same way the original modules did.
pub fn script_path(first_reference: &str, assets_dir: &str, bundle_file: &str) -> String {
    let mut rest = first_reference;
    loop {
        if let Some(next) = rest.strip_prefix("../") {
            rest = next;
        } else if let Some(next) = rest.strip_prefix("./") {
            rest = next;
        } else if let Some(next) = rest.strip_prefix('/') {
            rest = next;
        } else {
            break;
        }
    }
    let prefix = &first_reference[..first_reference.len() - rest.len()];
    format!("{prefix}{assets_dir}/{bundle_file}")
}

/// Rewrites pages for one module directory name.
#[derive(Debug, Clone)]
pub struct PagePatcher {
    asset_prefix: Regex,
}

impl PagePatcher {
    pub fn new(assets_dir: &str) -> Result<Self> {
        let pattern = format!(r"^(?:\.*/)+{}/(.+)$", regex::escape(assets_dir));
        let asset_prefix = Regex::new(&pattern).map_err(|e| {
            Error::InvalidConfig(format!("assetsDir '{assets_dir}' is not usable: {e}"))
        })?;
        Ok(Self { asset_prefix })
    }

    /// Patch `html` to load `script_path` instead of the `bundled` modules.
    ///
    /// 1. `import(` calls become `__import(` calls.
    /// 2. Quoted references to bundled modules lose their directory prefix,
    ///    so they match registry keys.
    /// 3. The bundle's `<script src>` goes in front of the first inline
    ///    script, else before `</body>`, else at the end.
    pub fn patch(&self, html: &str, script_path: &str, bundled: &ModuleMap<()>) -> String {
        let html = rewrite_dynamic_imports(html);
        let mut html = self.strip_prefixes(&html, bundled);

        let tag = format!("<script src={}></script>", attribute_value(script_path));
        let at = find_inline_script(&html)
            .or_else(|| find_ascii_case_insensitive(&html, "</body>", 0))
            .unwrap_or(html.len());
        html.insert_str(at, &tag);
        html
    }

    fn strip_prefixes(&self, html: &str, bundled: &ModuleMap<()>) -> String {
        let mut output = String::with_capacity(html.len());
        let mut last = 0;
        for span in reference_spans(html) {
            let value = &html[span.clone()];
            let is_bundled = ModuleName::from_reference(value)
                .is_some_and(|name| bundled.contains(&name));
            if !is_bundled {
                continue;
            }
            if let Some(bare) = self.asset_prefix.captures(value).and_then(|c| c.get(1)) {
                output.push_str(&html[last..span.start]);
                output.push_str(bare.as_str());
                last = span.end;
            }
        }
        output.push_str(&html[last..]);
        output
    }
}

/// `import(` at a call position becomes `__import(`.
///
/// Member calls (`obj.import(`) and longer identifiers (`reimport(`,
/// `__import(`) are left alone, which also makes the rewrite idempotent.
pub fn rewrite_dynamic_imports(html: &str) -> String {
    const NEEDLE: &str = "import(";

    let bytes = html.as_bytes();
    let mut output = String::with_capacity(html.len());
    let mut last = 0;
    for at in memchr::memmem::find_iter(bytes, NEEDLE) {
        let preceded_by_name = at
            .checked_sub(1)
            .map(|i| bytes[i])
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b == b'.');
        if preceded_by_name {
            continue;
        }
        output.push_str(&html[last..at]);
        output.push_str("__");
        last = at;
    }
    output.push_str(&html[last..]);
    output
}

/// Offset of the first `<script` tag that has no `src` attribute.
fn find_inline_script(html: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(start) = find_ascii_case_insensitive(html, "<script", from) {
        let after = start + "<script".len();
        let end = html[after..].find('>').map_or(html.len(), |i| after + i);
        let opens_tag = html[after..]
            .bytes()
            .next()
            .is_some_and(|b| b == b'>' || b.is_ascii_whitespace());
        if opens_tag && !has_src_attribute(&html[after..end]) {
            return Some(start);
        }
        from = after;
    }
    None
}

fn has_src_attribute(attributes: &str) -> bool {
    let lower = attributes.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    memchr::memmem::find_iter(bytes, "src").any(|at| {
        let boundary_before = at == 0 || bytes[at - 1].is_ascii_whitespace();
        let rest = lower[at + 3..].trim_start();
        boundary_before && (rest.starts_with('=') || rest.is_empty() || rest.starts_with('/'))
    })
}

fn find_ascii_case_insensitive(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let needle = needle.as_bytes();
    haystack.as_bytes()[from..]
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|i| from + i)
}

fn attribute_value(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "&quot;"))
}
