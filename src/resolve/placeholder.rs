//! Pure `{Key}` placeholder resolution against recipient data.
//!
//! Tokens are `{` + one or more word characters (`[A-Za-z0-9_]`) + `}`.
//! A token whose key has no (non-empty) value is left verbatim in the
//! output so a missing CSV column or manual field stays visibly obvious in
//! the editor instead of silently disappearing.

use crate::{
    input::context::{InputContext, Row},
    layer::model::Layer,
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Outcome of resolving one content string.
pub struct Resolution {
    /// Content with every resolvable token substituted.
    pub text: String,
    /// True if at least one token stayed unresolved. Callers typically render
    /// such text in a muted placeholder treatment rather than as an error.
    pub unresolved: bool,
}

impl Resolution {
    fn untouched(text: &str) -> Self {
        Self {
            text: text.to_string(),
            unresolved: false,
        }
    }
}

/// Look up `key` in a row: exact match first, then ASCII case-insensitive
/// fallback. Uniform for manual records and batch rows.
pub fn lookup<'r>(row: &'r Row, key: &str) -> Option<&'r str> {
    if let Some(v) = row.get(key) {
        return Some(v.as_str());
    }
    row.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.as_str())
}

/// Resolve `content` against a single recipient row.
///
/// Pure and deterministic for a given `(content, row)` pair.
pub fn resolve_against_row(content: &str, row: &Row) -> Resolution {
    if !content.contains('{') {
        return Resolution::untouched(content);
    }

    let mut out = String::with_capacity(content.len());
    let mut unresolved = false;
    let mut rest = content;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];

        match parse_token(tail) {
            Some((key, token_len)) => {
                match lookup(row, key).filter(|v| !v.is_empty()) {
                    Some(value) => out.push_str(value),
                    None => {
                        unresolved = true;
                        out.push_str(&tail[..token_len]);
                    }
                }
                rest = &tail[token_len..];
            }
            None => {
                // Stray '{' without a matching token: literal.
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);

    Resolution {
        text: out,
        unresolved,
    }
}

/// Resolve a layer's display content against the context's preview row.
///
/// Only text layers pass through token substitution; image/logo/background
/// content is a URL and is returned untouched.
pub fn resolve_layer(layer: &Layer, ctx: &InputContext) -> Resolution {
    if !layer.is_text() {
        return Resolution::untouched(&layer.content);
    }
    match ctx.preview_row() {
        Some(row) => resolve_against_row(&layer.content, row),
        None => Resolution {
            unresolved: layer.content.contains('{'),
            text: layer.content.clone(),
        },
    }
}

/// Parse one `{Key}` token at the start of `s` (which begins with `{`).
/// Returns the key and the token's byte length, or `None` if `s` does not
/// start a well-formed token.
fn parse_token(s: &str) -> Option<(&str, usize)> {
    let inner = &s[1..];
    let key_len = inner
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
        .count();
    if key_len == 0 {
        return None;
    }
    let key = &inner[..key_len];
    if inner[key_len..].starts_with('}') {
        Some((key, key_len + 2))
    } else {
        None
    }
}
