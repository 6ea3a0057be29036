//! Conditionals and loops.

use crate::context::TranslationContext;
use crate::error::{ConstructError, TransformResult, TranslateErrorKind, unsupported};
use crate::extract::{AssignOp, find_top_level, is_integer_literal, split_assignment, split_top_level};
use crate::transform::{ConstructResult, assign, expr};

fn loop_form(message: impl Into<String>) -> ConstructError {
    ConstructError::new(TranslateErrorKind::UnimplementedLoopForm, message)
}

/// Header text between `keyword` and the trailing `{`.
fn header<'a>(line: &'a str, keyword: &str) -> TransformResult<&'a str> {
    line.strip_prefix(keyword)
        .and_then(|rest| rest.strip_suffix('{'))
        .map(str::trim)
        .ok_or_else(|| unsupported(format!("`{keyword}` body must open on the same line")))
}

/// Rewrites a simple statement used as an `if`/`for`/`switch` initializer.
pub(crate) fn init_statement(
    init: &str,
    ctx: &mut TranslationContext,
) -> TransformResult<String> {
    match split_assignment(init) {
        Some((lhs, AssignOp::Declare, rhs)) => {
            let names = split_top_level(lhs, ',');
            let values = split_top_level(rhs, ',');
            if let ([value, ok], [single]) = (names.as_slice(), values.as_slice())
                && let Some((map, key)) = assign::map_index(single, ctx)
            {
                return Ok(assign::comma_ok_binding(value, ok, map, key, ctx));
            }
            Ok(match (names.as_slice(), values.as_slice()) {
                ([name], [value]) => format!("auto {name} = {}", expr::value(value)),
                (_, [value]) => format!(
                    "auto [{}] = {}",
                    assign::bindings(&names, ctx),
                    expr::value(value)
                ),
                _ if names.len() == values.len() => {
                    let bindings: Vec<String> = names
                        .iter()
                        .zip(&values)
                        .map(|(n, v)| format!("{n} = {}", expr::value(v)))
                        .collect();
                    format!("auto {}", bindings.join(", "))
                }
                _ => return Err(unsupported("initializer binds a different number of values")),
            })
        }
        _ => Ok(expr::rewrite(init)),
    }
}

/// Condition with an optional `init;` prefix, as emitted inside parentheses.
fn condition(text: &str, ctx: &mut TranslationContext) -> TransformResult<String> {
    match find_top_level(text, ";") {
        Some(semi) => Ok(format!(
            "{}; {}",
            init_statement(text[..semi].trim(), ctx)?,
            expr::rewrite(text[semi + 1..].trim())
        )),
        None => Ok(expr::rewrite(text)),
    }
}

/// `if cond {` to `if (cond) {`.
pub fn if_statement(line: &str, ctx: &mut TranslationContext) -> TransformResult<ConstructResult> {
    let cond = header(line, "if")?;
    Ok(ConstructResult::open(format!("if ({}) {{", condition(cond, ctx)?)))
}

/// `} else if cond {` to `} else if (cond) {`.
pub fn else_if(line: &str, ctx: &mut TranslationContext) -> TransformResult<ConstructResult> {
    let cond = header(line, "} else if")?;
    Ok(ConstructResult::open(format!(
        "}} else if ({}) {{",
        condition(cond, ctx)?
    )))
}

fn index_loop(var: &str, iterable: &str) -> String {
    format!("for (std::size_t {var} = 0; {var} < std::size({iterable}); {var}++) {{")
}

fn counting_loop(var: &str, bound: &str) -> String {
    format!("for (int {var} = 0; {var} < {bound}; {var}++) {{")
}

fn each(binding: &str, iterable: &str) -> String {
    format!("for (const auto& {binding} : {iterable}) {{")
}

fn discarded(name: &str, fallback: &str) -> String {
    if name == "_" {
        fallback.to_string()
    } else {
        name.to_string()
    }
}

/// `for ... range ... {` loops. `vars` holds the bound names, possibly empty.
fn range_loop(vars: &[&str], iterable: &str, ctx: &TranslationContext) -> TransformResult<String> {
    let is_map = ctx.symbols().is_map(iterable);
    let is_count = is_integer_literal(iterable);
    let iterable = expr::rewrite(iterable);
    let out = match *vars {
        [] | ["_"] if is_map => each("[_k, _v]", &iterable),
        [] | ["_"] if is_count => counting_loop("_i", &iterable),
        [] | ["_"] => format!("for ([[maybe_unused]] const auto& _e : {iterable}) {{"),
        [key] if is_map => each(&format!("[{key}, _v]"), &iterable),
        [var] if is_count => counting_loop(var, &iterable),
        [index] => index_loop(index, &iterable),
        [key, value] if is_map => each(
            &format!("[{}, {}]", discarded(key, "_k"), discarded(value, "_v")),
            &iterable,
        ),
        ["_", "_"] => format!("for ([[maybe_unused]] const auto& _e : {iterable}) {{"),
        ["_", value] => each(value, &iterable),
        [index, "_"] => index_loop(index, &iterable),
        [index, value] => format!(
            "{}\nauto {value} = {iterable}[{index}]",
            index_loop(index, &iterable)
        ),
        _ => return Err(loop_form("range binds more than two variables")),
    };
    Ok(out)
}

/// All `for` loop forms.
pub fn for_loop(line: &str, ctx: &mut TranslationContext) -> TransformResult<ConstructResult> {
    let head = header(line, "for")?;
    if head.is_empty() {
        return Ok(ConstructResult::open("for (;;) {"));
    }
    if let Some(iterable) = head.strip_prefix("range ") {
        return Ok(ConstructResult::open(range_loop(&[], iterable.trim(), ctx)?));
    }
    if let Some((lhs, op, rhs)) = split_assignment(head)
        && let Some(iterable) = rhs.strip_prefix("range ")
    {
        if op == AssignOp::Assign {
            return Err(loop_form("range loop assigning existing variables"));
        }
        let vars = split_top_level(lhs, ',');
        let out = range_loop(&vars, iterable.trim(), ctx)?;
        // The element binding of an index loop needs its own terminator.
        return Ok(if out.contains('\n') {
            ConstructResult::statement(out)
        } else {
            ConstructResult::open(out)
        });
    }
    let clauses = split_top_level(head, ';');
    let out = match clauses.as_slice() {
        [init, cond, post] => {
            let init = if init.is_empty() {
                String::new()
            } else {
                init_statement(init, ctx)?
            };
            format!(
                "for ({init}; {}; {}) {{",
                expr::rewrite(cond),
                expr::rewrite(post)
            )
        }
        [cond] => format!("for (; {};) {{", expr::rewrite(cond)),
        _ => return Err(loop_form(format!("loop header `{head}`"))),
    };
    Ok(ConstructResult::open(out))
}
