//! `switch` statements lowered to `if`/`else if` chains.
//!
//! A tagged switch stores its subject in a hidden temporary `_s__N`; each
//! `case` compares against it. `fallthrough` jumps to a label `_l__M`
//! emitted at the top of the next case body.

use crate::context::TranslationContext;
use crate::error::{TransformResult, unsupported};
use crate::extract::{find_top_level, split_top_level};
use crate::transform::control::init_statement;
use crate::transform::{ConstructResult, expr};

/// `switch x {` or `switch {`.
pub fn open(line: &str, ctx: &mut TranslationContext) -> TransformResult<ConstructResult> {
    let head = line
        .strip_prefix("switch")
        .and_then(|rest| rest.strip_suffix('{'))
        .map(str::trim)
        .ok_or_else(|| unsupported("`switch` body must open on the same line"))?;
    let (init, tag) = match find_top_level(head, ";") {
        Some(semi) => (Some(head[..semi].trim()), head[semi + 1..].trim()),
        None => (None, head),
    };
    if tag.contains(".(") {
        return Err(unsupported("type switches are not supported"));
    }
    let depth = ctx.depth_before_line();
    let subject = ctx.switch.open(!tag.is_empty(), depth);
    let mut lines = Vec::new();
    if let Some(init) = init {
        lines.push(format!("{};", init_statement(init, ctx)?));
    }
    match subject {
        Some(temp) => {
            lines.push(format!("auto {temp} = {}", expr::rewrite(tag)));
            Ok(ConstructResult::statement(lines.join("\n")))
        }
        None if lines.is_empty() => Ok(ConstructResult::consumed()),
        None => Ok(ConstructResult::open(lines.join("\n"))),
    }
}

/// Appends the pending fallthrough label to a case opener.
fn with_label(opener: String, ctx: &mut TranslationContext) -> ConstructResult {
    match ctx.switch.take_label() {
        Some(label) => ConstructResult::open(format!("{opener}\n{label}:")),
        None => ConstructResult::open(opener),
    }
}

/// `case a, b:`.
pub fn case(line: &str, ctx: &mut TranslationContext) -> TransformResult<ConstructResult> {
    let values = line
        .strip_prefix("case")
        .and_then(|rest| rest.strip_suffix(':'))
        .map(str::trim)
        .ok_or_else(|| unsupported("case clause must end with `:` on the same line"))?;
    let frame = ctx
        .switch
        .current_mut()
        .ok_or_else(|| unsupported("`case` outside of a switch"))?;
    if frame.seen_default {
        return Err(unsupported("`case` after `default` is not supported"));
    }
    let values = split_top_level(values, ',');
    let tests: Vec<String> = match &frame.subject {
        Some(subject) => values
            .iter()
            .map(|v| format!("{subject} == {}", expr::rewrite(v)))
            .collect(),
        None if values.len() == 1 => vec![expr::rewrite(values[0])],
        None => values
            .iter()
            .map(|v| format!("({})", expr::rewrite(v)))
            .collect(),
    };
    let keyword = if frame.first_case { "if" } else { "} else if" };
    frame.first_case = false;
    let opener = format!("{keyword} ({}) {{", tests.join(" || "));
    Ok(with_label(opener, ctx))
}

/// `default:`.
pub fn default(ctx: &mut TranslationContext) -> TransformResult<ConstructResult> {
    let frame = ctx
        .switch
        .current_mut()
        .ok_or_else(|| unsupported("`default` outside of a switch"))?;
    if frame.first_case {
        return Err(unsupported("`default` must follow at least one case"));
    }
    frame.seen_default = true;
    Ok(with_label("} else {".to_string(), ctx))
}

/// `fallthrough`.
pub fn fallthrough(ctx: &mut TranslationContext) -> TransformResult<ConstructResult> {
    if !ctx.switch.is_open() {
        return Err(unsupported("`fallthrough` outside of a switch"));
    }
    let label = ctx.switch.fallthrough();
    Ok(ConstructResult::statement(format!("goto {label}")))
}
