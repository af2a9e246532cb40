//! Splitting helpers shared by the attribute and index parsers.

/// Splits `raw` on `separator`, ignoring separators nested inside `{...}`.
///
/// Option arguments are opaque text, so `default_value{a,b}` stays one item.
pub(crate) fn split_top_level(raw: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in raw.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&raw[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&raw[start..]);
    parts
}

/// A `key` or `key{argument}` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Clause<'a> {
    pub key: &'a str,
    /// `None` when there were no braces at all; `Some("")` for `key{}`.
    pub argument: Option<&'a str>,
}

/// Splits a clause into its key and optional braced argument.
///
/// Returns `None` when an opening brace is not closed at the end of the clause.
pub(crate) fn split_clause(raw: &str) -> Option<Clause<'_>> {
    match raw.find('{') {
        None => Some(Clause {
            key: raw,
            argument: None,
        }),
        Some(open) => {
            let argument = raw[open + 1..].strip_suffix('}')?;
            Some(Clause {
                key: &raw[..open],
                argument: Some(argument),
            })
        }
    }
}

/// Returns true for a non-empty run of `[A-Za-z0-9_]`.
pub(crate) fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
