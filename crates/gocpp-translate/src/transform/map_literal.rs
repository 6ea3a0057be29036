//! Map literals, on one line or spread over a block.

use crate::context::TranslationContext;
use crate::error::{TransformResult, unrecognized};
use crate::extract::{find_top_level, split_top_level};
use crate::transform::{Advice, ConstructResult, expr};
use crate::types::{map_type, split_map_type};

/// Byte offset of the `{` that ends the type spelling of a composite literal.
fn body_start(value: &str) -> Option<usize> {
    let mut brackets = 0usize;
    for (i, c) in value.char_indices() {
        match c {
            '[' => brackets += 1,
            ']' => brackets = brackets.saturating_sub(1),
            '{' if brackets == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn entry(text: &str) -> TransformResult<String> {
    let colon =
        find_top_level(text, ":").ok_or_else(|| unrecognized(format!("map entry `{text}`")))?;
    Ok(format!(
        "{{{}, {}}}",
        expr::value(&text[..colon]),
        expr::value(&text[colon + 1..])
    ))
}

/// `name := map[K]V{...}`. A literal whose closing brace is on a later line
/// opens a map literal block.
pub fn declare(
    name: &str,
    value: &str,
    ctx: &mut TranslationContext,
) -> TransformResult<ConstructResult> {
    let Some(open) = body_start(value) else {
        return Err(unrecognized(format!("map value `{value}`")));
    };
    let ty = value[..open].trim();
    if split_map_type(ty).is_none() {
        return Err(unrecognized(format!("map type `{ty}`")));
    }
    let cpp = map_type(ty);
    ctx.symbols_mut().register_map(name);

    let body = &value[open + 1..];
    match body.strip_suffix('}') {
        Some(inner) => {
            let entries = split_top_level(inner, ',')
                .into_iter()
                .filter(|e| !e.is_empty())
                .map(entry)
                .collect::<TransformResult<Vec<_>>>()?;
            Ok(ConstructResult::statement(format!(
                "{cpp} {name}{{{}}}",
                entries.join(", ")
            )))
        }
        None if body.trim().is_empty() => Ok(ConstructResult::open(format!("{cpp} {name}{{"))
            .with(Advice::MapDeclared(name.to_string()))
            .with(Advice::MapLiteralOpened)),
        None => Err(unrecognized(format!(
            "map literal entries must start on their own line in `{value}`"
        ))),
    }
}

fn entry_list(line: &str) -> TransformResult<Vec<String>> {
    split_top_level(line, ',')
        .into_iter()
        .filter(|e| !e.is_empty())
        .map(entry)
        .collect()
}

/// One line inside a map literal block: `key: value,` (or several entries).
pub fn entries(line: &str) -> TransformResult<ConstructResult> {
    let entries = entry_list(line)?
        .into_iter()
        .map(|pair| format!("{pair},"))
        .collect::<Vec<_>>();
    Ok(ConstructResult::open(entries.join(" ")))
}

/// The line that closes a map literal block: a lone `}` or trailing
/// entries followed by `}`.
pub fn close(line: &str) -> TransformResult<ConstructResult> {
    let Some(last) = line.trim_end().strip_suffix('}') else {
        return Err(unrecognized(format!(
            "map literal must end with `}}` in `{line}`"
        )));
    };
    let entries = entry_list(last)?;
    if entries.is_empty() {
        return Ok(ConstructResult::open("};"));
    }
    Ok(ConstructResult::open(format!("{}}};", entries.join(", "))))
}
