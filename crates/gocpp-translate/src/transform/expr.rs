//! Expression-level rewrites applied to every emitted expression.

use crate::extract::{
    count_braces, find_top_level, is_identifier, matching_close, rewrite_identifiers,
    split_top_level, string_literal_ends,
};
use crate::types::{map_type, split_map_type};

/// Rewrites a Go expression into its C++ spelling.
///
/// `len(x)` becomes `std::size(x)` and `nil` becomes `nullptr`. A string
/// literal on the left of `+` gets the `s` suffix, and raw string literals
/// become C++ raw strings. Everything else is kept verbatim.
pub fn rewrite(expr: &str) -> String {
    let rewritten = rewrite_identifiers(expr, |id| {
        if id.qualified {
            return None;
        }
        match id.name {
            "len" if id.after.starts_with('(') => Some("std::size".to_string()),
            "nil" => Some("nullptr".to_string()),
            _ => None,
        }
    });
    raw_strings(&concatenated_literals(&rewritten))
}

/// Suffixes a string literal that is the left operand of `+` with `s`, so
/// that `"a" + "b"` adds two `std::string`s.
fn concatenated_literals(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    let mut last = 0;
    for end in string_literal_ends(s) {
        let rest = s[end..].trim_start();
        if rest.starts_with('+') && !rest.starts_with("++") && !rest.starts_with("+=") {
            out.push_str(&s[last..end]);
            out.push('s');
            last = end;
        }
    }
    out.push_str(&s[last..]);
    out
}

/// True when `value` opens a composite literal that closes on a later line.
pub(crate) fn opens_literal(value: &str) -> bool {
    let (opened, closed) = count_braces(value);
    opened > closed
}

/// Rewrites a value expression, translating composite literals, `&T{..}`
/// and `make(..)` before the plain rewrites.
pub fn value(expr: &str) -> String {
    let expr = expr.trim();
    composite(expr).unwrap_or_else(|| rewrite(expr))
}

/// Translates a whole-expression composite literal or `make` call.
pub fn composite(expr: &str) -> Option<String> {
    let e = expr.trim();
    if let Some(inner) = e.strip_prefix('&')
        && let Some((ty, body)) = split_literal(inner)
        && is_identifier(ty)
    {
        return Some(format!("new {ty}{{{}}}", elements(ty, body)));
    }
    if let Some(made) = make(e) {
        return Some(made);
    }
    let (ty, body) = split_literal(e)?;
    if ty.starts_with('[') || ty.starts_with("map[") {
        return Some(format!("{}{{{}}}", map_type(ty), elements(ty, body)));
    }
    is_identifier(ty).then(|| format!("{ty}{{{}}}", elements(ty, body)))
}

/// `make(map[K]V)`, `make([]T, n)` and `make([]T, n, cap)`.
fn make(e: &str) -> Option<String> {
    let args = e.strip_prefix("make(")?;
    if matching_close(e, 4)? != e.len() - 1 {
        return None;
    }
    let args = split_top_level(&args[..args.len() - 1], ',');
    let ty = *args.first()?;
    if split_map_type(ty).is_some() {
        return Some(format!("{}{{}}", map_type(ty)));
    }
    if ty.starts_with("[]") {
        return Some(match args.get(1) {
            Some(len) => format!("{}({})", map_type(ty), rewrite(len)),
            None => format!("{}{{}}", map_type(ty)),
        });
    }
    None
}

/// Splits `Type{elements}` into the type spelling and the element text.
/// The braces must enclose the rest of the expression.
pub(crate) fn split_literal(e: &str) -> Option<(&str, &str)> {
    let mut brackets = 0usize;
    let mut open = None;
    for (i, c) in e.char_indices() {
        match c {
            '[' => brackets += 1,
            ']' => brackets = brackets.saturating_sub(1),
            '{' if brackets == 0 => {
                open = Some(i);
                break;
            }
            '(' | '"' | '`' | '\'' if brackets == 0 => return None,
            _ => {}
        }
    }
    let open = open?;
    if matching_close(e, open)? != e.len() - 1 {
        return None;
    }
    let ty = e[..open].trim();
    if ty.is_empty() || (ty.contains(char::is_whitespace) && !ty.starts_with("map[")) {
        return None;
    }
    Some((ty, &e[open + 1..e.len() - 1]))
}

/// Translates the elements of a composite literal of Go type `ty`.
///
/// Map entries `k: v` become `{k, v}`; keyed struct fields `Name: v`
/// become designated initializers `.Name = v`.
pub(crate) fn elements(ty: &str, body: &str) -> String {
    let is_map = split_map_type(ty).is_some();
    split_top_level(body, ',')
        .into_iter()
        .filter(|el| !el.is_empty())
        .map(|el| match find_top_level(el, ":") {
            Some(colon) if is_map => {
                format!("{{{}, {}}}", value(&el[..colon]), value(&el[colon + 1..]))
            }
            Some(colon) if is_identifier(el[..colon].trim()) => {
                format!(".{} = {}", el[..colon].trim(), value(&el[colon + 1..]))
            }
            _ => value(el),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Converts `` `text` `` into `R"(text)"`.
fn raw_strings(s: &str) -> String {
    if !s.contains('`') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 8);
    let mut in_interpreted = None;
    let mut escaped = false;
    let mut in_raw = false;
    for c in s.chars() {
        if in_raw {
            if c == '`' {
                out.push_str(")\"");
                in_raw = false;
            } else {
                out.push(c);
            }
            continue;
        }
        if let Some(quote) = in_interpreted {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                in_interpreted = None;
            }
            continue;
        }
        match c {
            '`' => {
                out.push_str("R\"(");
                in_raw = true;
            }
            '"' | '\'' => {
                in_interpreted = Some(c);
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
