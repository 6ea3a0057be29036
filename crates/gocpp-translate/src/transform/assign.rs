//! Assignments, short variable declarations and plain statements.

use crate::context::TranslationContext;
use crate::error::{TransformResult, unsupported};
use crate::extract::{AssignOp, is_identifier, matching_close, split_assignment, split_top_level};
use crate::transform::{ConstructResult, decl, expr};

/// Any simple statement not claimed by a more specific transformer.
pub fn statement(line: &str, ctx: &mut TranslationContext) -> TransformResult<ConstructResult> {
    match split_assignment(line) {
        Some((lhs, AssignOp::Declare, rhs)) => short_declaration(lhs, rhs, ctx),
        Some((lhs, AssignOp::Assign, rhs)) => assignment(lhs, rhs),
        None => Ok(ConstructResult::auto(expr::rewrite(line))),
    }
}

/// `m[k]` where `m` is a registered map: returns `(m, k)`.
pub(crate) fn map_index<'a>(
    value: &'a str,
    ctx: &TranslationContext,
) -> Option<(&'a str, &'a str)> {
    let open = value.find('[')?;
    let map = value[..open].trim();
    if !is_identifier(map) || !ctx.symbols().is_map(map) || !value.ends_with(']') {
        return None;
    }
    Some((map, &value[open + 1..value.len() - 1]))
}

/// Binding names for structured bindings, with `_` replaced by fresh names.
pub(crate) fn bindings(names: &[&str], ctx: &mut TranslationContext) -> String {
    names
        .iter()
        .map(|&n| {
            if n == "_" {
                ctx.discard_name()
            } else {
                n.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn short_declaration(
    lhs: &str,
    rhs: &str,
    ctx: &mut TranslationContext,
) -> TransformResult<ConstructResult> {
    let names = split_top_level(lhs, ',');
    if let [name] = names.as_slice() {
        return decl::declare(name, None, Some(rhs), ctx);
    }
    if rhs.contains(".(") {
        return Err(unsupported("type assertions are not supported"));
    }
    if rhs.starts_with("<-") {
        return Err(unsupported("channel receives are not supported"));
    }
    decl::single_line(rhs)?;
    let values = split_top_level(rhs, ',');
    if let ([value, ok], [single]) = (names.as_slice(), values.as_slice())
        && let Some((map, key)) = map_index(single, ctx)
    {
        return Ok(comma_ok(value, ok, map, key, ctx));
    }
    match (names.as_slice(), values.as_slice()) {
        (_, [single]) => Ok(ConstructResult::statement(format!(
            "auto [{}] = {}",
            bindings(&names, ctx),
            expr::value(single)
        ))),
        _ if names.len() == values.len() => {
            let values: Vec<String> = values.iter().map(|v| expr::value(v)).collect();
            Ok(ConstructResult::statement(format!(
                "auto [{}] = std::tuple{{{}}}",
                bindings(&names, ctx),
                values.join(", ")
            )))
        }
        _ => Err(unsupported(format!(
            "{} names bound to {} values",
            names.len(),
            values.len()
        ))),
    }
}

/// `v, ok := m[k]` on a known map.
fn comma_ok(
    value: &str,
    ok: &str,
    map: &str,
    key: &str,
    ctx: &mut TranslationContext,
) -> ConstructResult {
    let key = expr::rewrite(key);
    let ok = if ok == "_" {
        ctx.discard_name()
    } else {
        ok.to_string()
    };
    let found = format!("auto {ok} = {map}.count({key}) != 0");
    if value == "_" {
        return ConstructResult::statement(found);
    }
    ConstructResult::statement(format!(
        "{found};\nauto {value} = {ok} ? {map}.at({key}) : decltype({map})::mapped_type{{}}"
    ))
}

/// `v, ok := m[k]` as a single declaration, for `if`, `switch` and `for`
/// initializers.
pub(crate) fn comma_ok_binding(
    value: &str,
    ok: &str,
    map: &str,
    key: &str,
    ctx: &mut TranslationContext,
) -> String {
    let key = expr::rewrite(key);
    let found = format!("{map}.count({key}) != 0");
    format!(
        "auto [{}] = std::pair{{{found} ? {map}.at({key}) : decltype({map})::mapped_type{{}}, {found}}}",
        bindings(&[value, ok], ctx)
    )
}

/// `xs = append(xs, ...)` as in-place insertion.
fn append(target: &str, rhs: &str) -> Option<TransformResult<ConstructResult>> {
    let args = rhs.strip_prefix("append(")?;
    if matching_close(rhs, 6)? != rhs.len() - 1 {
        return None;
    }
    let args = split_top_level(&args[..args.len() - 1], ',');
    let (first, rest) = args.split_first()?;
    if *first != target {
        return Some(Err(unsupported("append must grow the slice it is assigned to")));
    }
    let lines: Vec<String> = match rest {
        [spread] if spread.ends_with("...") => {
            let source = expr::rewrite(spread.trim_end_matches("..."));
            vec![format!(
                "{target}.insert(std::end({target}), std::begin({source}), std::end({source}))"
            )]
        }
        _ => rest
            .iter()
            .map(|v| format!("{target}.push_back({})", expr::value(v)))
            .collect(),
    };
    if lines.is_empty() {
        return Some(Ok(ConstructResult::consumed()));
    }
    Some(Ok(ConstructResult::statement(lines.join(";\n"))))
}

fn assignment(lhs: &str, rhs: &str) -> TransformResult<ConstructResult> {
    decl::single_line(rhs)?;
    let targets = split_top_level(lhs, ',');
    if let [target] = targets.as_slice() {
        if *target == "_" {
            return Ok(ConstructResult::statement(format!(
                "static_cast<void>({})",
                expr::value(rhs)
            )));
        }
        if let Some(result) = append(target, rhs) {
            return result;
        }
        return Ok(ConstructResult::statement(format!(
            "{} = {}",
            expr::rewrite(target),
            expr::value(rhs)
        )));
    }
    let tied: Vec<String> = targets
        .iter()
        .map(|t| {
            if *t == "_" {
                "std::ignore".to_string()
            } else {
                expr::rewrite(t)
            }
        })
        .collect();
    let values = split_top_level(rhs, ',');
    let source = match values.as_slice() {
        [single] => expr::value(single),
        _ if values.len() == targets.len() => {
            let values: Vec<String> = values.iter().map(|v| expr::value(v)).collect();
            format!("std::tuple{{{}}}", values.join(", "))
        }
        _ => {
            return Err(unsupported(format!(
                "{} targets assigned {} values",
                targets.len(),
                values.len()
            )));
        }
    };
    Ok(ConstructResult::statement(format!(
        "std::tie({}) = {source}",
        tied.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &str, ctx: &mut TranslationContext) -> String {
        statement(line, ctx).unwrap().text()
    }

    #[test]
    fn test_destructuring() {
        let mut ctx = TranslationContext::new();
        assert_eq!(run("q, r := divmod(7, 2)", &mut ctx), "auto [q, r] = divmod(7, 2)");
        assert_eq!(
            run("a, b := 1, \"x\"", &mut ctx),
            "auto [a, b] = std::tuple{1, \"x\"}"
        );
        assert_eq!(run("_, r := divmod(7, 2)", &mut ctx), "auto [_d__0, r] = divmod(7, 2)");
    }

    #[test]
    fn test_swap_and_discard() {
        let mut ctx = TranslationContext::new();
        assert_eq!(run("a, b = b, a", &mut ctx), "std::tie(a, b) = std::tuple{b, a}");
        assert_eq!(run("_, err = f()", &mut ctx), "std::tie(std::ignore, err) = f()");
        assert_eq!(run("_ = x", &mut ctx), "static_cast<void>(x)");
    }

    #[test]
    fn test_comma_ok_lookup() {
        let mut ctx = TranslationContext::new();
        ctx.symbols_mut().register_map("ages");
        assert_eq!(
            run("age, ok := ages[name]", &mut ctx),
            "auto ok = ages.count(name) != 0;\n\
             auto age = ok ? ages.at(name) : decltype(ages)::mapped_type{}"
        );
        assert_eq!(run("_, found := ages[\"x\"]", &mut ctx), "auto found = ages.count(\"x\") != 0");
    }

    #[test]
    fn test_comma_ok_binding() {
        let mut ctx = TranslationContext::new();
        assert_eq!(
            comma_ok_binding("v", "_", "m", "k", &mut ctx),
            "auto [v, _d__0] = std::pair{m.count(k) != 0 ? m.at(k) : \
             decltype(m)::mapped_type{}, m.count(k) != 0}"
        );
    }

    #[test]
    fn test_assigned_literal_spanning_lines() {
        let mut ctx = TranslationContext::new();
        assert!(statement("xs = []int{", &mut ctx).is_err());
        assert!(statement("a, b := P{", &mut ctx).is_err());
        assert!(statement("xs := []int{", &mut ctx).is_err());
    }

    #[test]
    fn test_append() {
        let mut ctx = TranslationContext::new();
        assert_eq!(
            run("xs = append(xs, 1, f(2, 3))", &mut ctx),
            "xs.push_back(1);\nxs.push_back(f(2, 3))"
        );
        assert_eq!(
            run("xs = append(xs, ys...)", &mut ctx),
            "xs.insert(std::end(xs), std::begin(ys), std::end(ys))"
        );
        assert!(statement("xs = append(ys, 1)", &mut ctx).is_err());
    }

    #[test]
    fn test_plain_statements() {
        let mut ctx = TranslationContext::new();
        assert_eq!(run("count += len(xs)", &mut ctx), "count += std::size(xs)");
        assert_eq!(run("i++", &mut ctx), "i++");
        assert_eq!(run("p.next = nil", &mut ctx), "p.next = nullptr");
        assert_eq!(run("m[k] = []int{1}", &mut ctx), "m[k] = std::vector<int>{1}");
    }
}
