//! `var`, `const` and `type` declarations, struct bodies and the
//! synthesized `String()` method.

use crate::context::{BlockKind, ConstTemplate, TranslationContext};
use crate::error::{TransformResult, unrecognized, unsupported};
use crate::extract::{
    AssignOp, contains_word, is_identifier, is_string_literal, replace_word, split_assignment,
    split_top_level,
};
use crate::transform::{Advice, ConstructResult, expr, map_literal};
use crate::types::{is_map_type, map_type};

/// Splits `a, b T` into the names and the (possibly empty) type.
fn names_and_type(lhs: &str) -> TransformResult<(Vec<&str>, &str)> {
    let mut names = Vec::new();
    let mut rest = lhs.trim_start();
    loop {
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        let name = &rest[..end];
        let tail = &rest[end..];
        if !is_identifier(name)
            || !(tail.is_empty() || tail.starts_with(|c: char| c.is_whitespace() || c == ','))
        {
            return Err(unrecognized(format!("expected a name in `{lhs}`")));
        }
        names.push(name);
        let after = tail.trim_start();
        match after.strip_prefix(',') {
            Some(more) => rest = more.trim_start(),
            None => return Ok((names, after.trim())),
        }
    }
}

/// Rejects an initializer whose composite literal closes on a later line.
pub(crate) fn single_line(value: &str) -> TransformResult<()> {
    if expr::opens_literal(value) {
        return Err(unsupported(
            "composite literals spanning several lines are not supported",
        ));
    }
    Ok(())
}

/// Declares one variable, with an optional Go type and initializer.
pub fn declare(
    name: &str,
    ty: Option<&str>,
    value: Option<&str>,
    ctx: &mut TranslationContext,
) -> TransformResult<ConstructResult> {
    if let Some(ty) = ty
        && is_map_type(ty)
    {
        ctx.symbols_mut().register_map(name);
    }
    let text = match (ty, value) {
        (Some(ty), None) => format!("{} {name}{{}}", map_type(ty)),
        (Some(ty), Some(value)) => {
            single_line(value)?;
            format!("{} {name} = {}", map_type(ty), expr::value(value))
        }
        (None, Some(value)) => return initialized(name, value.trim(), ctx),
        (None, None) => return Err(unrecognized(format!("`{name}` has neither type nor value"))),
    };
    Ok(ConstructResult::statement(text))
}

/// `name := value`, picking the C++ spelling from the shape of `value`.
fn initialized(
    name: &str,
    value: &str,
    ctx: &mut TranslationContext,
) -> TransformResult<ConstructResult> {
    if value.starts_with("func") {
        return Err(unsupported("function literals are not supported"));
    }
    if value.starts_with("map[") {
        return map_literal::declare(name, value, ctx);
    }
    single_line(value)?;
    if is_string_literal(value) {
        return Ok(ConstructResult::statement(format!(
            "std::string {name} = {}",
            expr::rewrite(value)
        )));
    }
    if value.starts_with('[')
        && let Some((ty, body)) = expr::split_literal(value)
    {
        return Ok(ConstructResult::statement(format!(
            "{} {name}{{{}}}",
            map_type(ty),
            expr::elements(ty, body)
        )));
    }
    if value.starts_with("make(")
        && let Some(made) = expr::composite(value)
    {
        if made.starts_with("std::unordered_map") {
            ctx.symbols_mut().register_map(name);
            return Ok(ConstructResult::statement(format!(
                "{} {name}{{}}",
                made.trim_end_matches("{}")
            )));
        }
        if let Some(open) = made.find('(') {
            return Ok(ConstructResult::statement(format!(
                "{} {name}{}",
                &made[..open],
                &made[open..]
            )));
        }
    }
    Ok(ConstructResult::statement(format!(
        "auto {name} = {}",
        expr::value(value)
    )))
}

/// Joins per-name declarations; every line but the last carries its own `;`.
fn joined(results: Vec<ConstructResult>) -> ConstructResult {
    let mut lines: Vec<String> = results.into_iter().flat_map(|r| r.lines).collect();
    let last = lines.len().saturating_sub(1);
    for line in &mut lines[..last] {
        if !line.ends_with(';') {
            line.push(';');
        }
    }
    ConstructResult::statement(lines.join("\n"))
}

/// A `var` spec: the text after `var `, or one line of a `var (` block.
pub fn var_spec(spec: &str, ctx: &mut TranslationContext) -> TransformResult<ConstructResult> {
    let (lhs, rhs) = match split_assignment(spec) {
        Some((lhs, AssignOp::Assign, rhs)) => (lhs, Some(rhs)),
        Some((_, AssignOp::Declare, _)) => {
            return Err(unrecognized("`:=` inside a var declaration"));
        }
        None => (spec, None),
    };
    let (names, ty) = names_and_type(lhs)?;
    let ty = (!ty.is_empty()).then_some(ty);
    if let [name] = names.as_slice() {
        return declare(name, ty, rhs, ctx);
    }
    let Some(rhs) = rhs else {
        if ty.is_none() {
            return Err(unrecognized("var declaration without type or value"));
        }
        let decls = names
            .iter()
            .map(|n| declare(n, ty, None, ctx))
            .collect::<TransformResult<Vec<_>>>()?;
        return Ok(joined(decls));
    };
    let values = split_top_level(rhs, ',');
    if values.len() == names.len() {
        let decls = names
            .iter()
            .zip(&values)
            .map(|(n, v)| declare(n, ty, Some(v), ctx))
            .collect::<TransformResult<Vec<_>>>()?;
        return Ok(joined(decls));
    }
    if values.len() == 1 && ty.is_none() {
        return Ok(ConstructResult::statement(format!(
            "auto [{}] = {}",
            names.join(", "),
            expr::value(rhs)
        )));
    }
    Err(unrecognized(format!(
        "{} names but {} values",
        names.len(),
        values.len()
    )))
}

fn constant(name: &str, ty: Option<&str>, value: &str) -> ConstructResult {
    let text = match ty {
        Some(ty) => format!("const {} {name} = {value}", map_type(ty)),
        None if is_string_literal(value) => format!("const std::string {name} = {value}"),
        None => format!("const auto {name} = {value}"),
    };
    ConstructResult::statement(text)
}

/// Advances the block's `iota` to the entry being declared.
fn next_iota(ctx: &mut TranslationContext) -> i64 {
    let iota = &mut ctx.iota;
    if iota.started {
        iota.counter += 1;
    } else {
        iota.started = true;
        iota.counter = 0;
    }
    iota.counter
}

/// A `const` spec: the text after `const `, or one line of a `const (` block.
///
/// Inside a block `iota` is the index of the entry, reset to zero by an
/// entry assigned exactly `iota`. The last explicit right-hand side is
/// remembered; each bare entry repeats it with `iota` substituted.
pub fn const_spec(spec: &str, ctx: &mut TranslationContext) -> TransformResult<ConstructResult> {
    let in_block = ctx.block() == BlockKind::ConstBlock;
    if let Some((lhs, op, rhs)) = split_assignment(spec) {
        if op == AssignOp::Declare || lhs.contains(',') {
            return Err(unrecognized(format!("constant declaration `{spec}`")));
        }
        let words: Vec<&str> = lhs.split_whitespace().collect();
        let (name, ty) = match words.as_slice() {
            [name] => (*name, None),
            [name, ty] => (*name, Some(*ty)),
            _ => return Err(unrecognized(format!("constant left side `{lhs}`"))),
        };
        let mut iota = 0;
        if in_block {
            iota = next_iota(ctx);
            if rhs == "iota" {
                ctx.iota.counter = 0;
                iota = 0;
            }
            ctx.iota.template = Some(ConstTemplate {
                ty: ty.map(str::to_string),
                expr: rhs.to_string(),
            });
        }
        let mut value = expr::rewrite(rhs);
        if contains_word(&value, "iota") {
            value = replace_word(&value, "iota", &iota.to_string());
        }
        if name == "_" {
            return Ok(ConstructResult::consumed());
        }
        return Ok(constant(name, ty, &value));
    }

    let words: Vec<&str> = spec.split_whitespace().collect();
    if !in_block {
        return Err(unrecognized(format!("constant `{spec}` has no value")));
    }
    let (name, typed) = match words.as_slice() {
        [name] => (*name, None),
        [name, ty] => (*name, Some(*ty)),
        _ => return Err(unrecognized(format!("constant entry `{spec}`"))),
    };
    let counter = next_iota(ctx).to_string();
    let (ty, value) = match typed {
        Some(ty) => (Some(ty.to_string()), counter),
        None => {
            let template = ctx
                .iota
                .template
                .as_ref()
                .ok_or_else(|| unrecognized(format!("constant `{name}` has no value to repeat")))?;
            let value = replace_word(&expr::rewrite(&template.expr), "iota", &counter);
            (template.ty.clone(), value)
        }
    };
    if name == "_" {
        return Ok(ConstructResult::consumed());
    }
    Ok(constant(name, ty.as_deref(), &value))
}

/// A `type` spec: the text after `type `, or one line of a `type (` block.
pub fn type_spec(spec: &str, in_block: bool) -> TransformResult<ConstructResult> {
    let (name, rest) = spec
        .split_once(char::is_whitespace)
        .map(|(n, r)| (n, r.trim()))
        .ok_or_else(|| unrecognized(format!("type declaration `{spec}`")))?;
    if !is_identifier(name) {
        return Err(unsupported(format!("type parameters on `{name}`")));
    }
    let rest = rest.strip_prefix('=').map(str::trim).unwrap_or(rest);
    let compact: String = rest.split_whitespace().collect();
    match compact.as_str() {
        "struct{" => {
            if in_block {
                return Err(unsupported("struct bodies inside a type block"));
            }
            Ok(ConstructResult::open(format!("class {name} {{\npublic:"))
                .with(Advice::StructOpened(name.to_string()))
                .with(Advice::OpenBlock(BlockKind::StructBody)))
        }
        "struct{}" => Ok(ConstructResult::open(format!(
            "class {name} {{\npublic:\n{}",
            string_method(&[]).join("\n")
        ))
        .with(Advice::StructDeclared(name.to_string()))),
        _ if compact.starts_with("interface") => {
            Err(unsupported("interfaces are not supported"))
        }
        _ if rest.contains(['{', '}', '(']) => {
            Err(unrecognized(format!("type declaration `{spec}`")))
        }
        _ => Ok(ConstructResult::statement(format!(
            "using {name} = {}",
            map_type(rest)
        ))),
    }
}

/// Removes a trailing struct tag (`` `json:"x"` `` or `"x"`).
fn strip_tag(field: &str) -> &str {
    let field = field.trim_end();
    for quote in ['`', '"'] {
        if field.ends_with(quote)
            && let Some(start) = field[..field.len() - 1].rfind(quote)
        {
            return field[..start].trim_end();
        }
    }
    field
}

/// One line of a struct body: `Name Type` or `A, B Type`.
pub fn field(line: &str, ctx: &mut TranslationContext) -> TransformResult<ConstructResult> {
    let line = strip_tag(line);
    if line.contains('{') {
        return Err(unsupported("nested struct types are not supported"));
    }
    if !line.contains(char::is_whitespace) {
        return Err(unsupported(format!("embedded field `{line}`")));
    }
    let (names, ty) = names_and_type(line)?;
    if ty.is_empty() {
        return Err(unsupported(format!("embedded field `{line}`")));
    }
    let ty = map_type(ty);
    let decls = names
        .iter()
        .map(|n| {
            ctx.symbols_mut().push_field(n);
            ConstructResult::statement(format!("{ty} {n}{{}}"))
        })
        .collect();
    Ok(joined(decls))
}

/// Body of the synthesized `String()` method, rendering `{f1 f2}`.
fn string_method(fields: &[String]) -> Vec<String> {
    let mut lines = vec![
        "std::string String() const {".to_string(),
        "std::stringstream _ss;".to_string(),
        "_ss << \"{\";".to_string(),
    ];
    for (i, f) in fields.iter().enumerate() {
        if i > 0 {
            lines.push("_ss << \" \";".to_string());
        }
        lines.push(format!("_format_output(_ss, {f});"));
    }
    lines.push("_ss << \"}\";".to_string());
    lines.push("return _ss.str();".to_string());
    lines.push("}".to_string());
    lines.push("};".to_string());
    lines
}

/// The closing `}` of a struct body.
pub fn struct_close(ctx: &TranslationContext) -> ConstructResult {
    ConstructResult::open(string_method(ctx.symbols().fields()).join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateErrorKind;

    fn text(r: TransformResult<ConstructResult>) -> String {
        r.unwrap().text()
    }

    fn const_block() -> TranslationContext {
        let mut ctx = TranslationContext::new();
        ctx.open_block(BlockKind::ConstBlock);
        ctx
    }

    #[test]
    fn test_var_forms() {
        let mut ctx = TranslationContext::new();
        assert_eq!(text(var_spec("x int", &mut ctx)), "int x{}");
        assert_eq!(text(var_spec("x int64 = 5", &mut ctx)), "std::int64_t x = 5");
        assert_eq!(text(var_spec("x = f()", &mut ctx)), "auto x = f()");
        assert_eq!(
            text(var_spec(r#"s = "hi""#, &mut ctx)),
            r#"std::string s = "hi""#
        );
        assert_eq!(text(var_spec("a, b int", &mut ctx)), "int a{};\nint b{}");
        assert_eq!(
            text(var_spec("q, r = divmod(7, 2)", &mut ctx)),
            "auto [q, r] = divmod(7, 2)"
        );
    }

    #[test]
    fn test_map_typed_var_is_registered() {
        let mut ctx = TranslationContext::new();
        assert_eq!(
            text(var_spec("seen map[string]bool", &mut ctx)),
            "std::unordered_map<std::string, bool> seen{}"
        );
        assert!(ctx.symbols().is_map("seen"));
    }

    #[test]
    fn test_initialized_shapes() {
        let mut ctx = TranslationContext::new();
        assert_eq!(
            text(declare("xs", None, Some("[]int{1, 2}"), &mut ctx)),
            "std::vector<int> xs{1, 2}"
        );
        assert_eq!(
            text(declare("buf", None, Some("make([]byte, 4)"), &mut ctx)),
            "std::vector<std::uint8_t> buf(4)"
        );
        assert_eq!(
            text(declare("m", None, Some("make(map[string]int)"), &mut ctx)),
            "std::unordered_map<std::string, int> m{}"
        );
        assert!(ctx.symbols().is_map("m"));
        assert_eq!(
            text(declare("n", None, Some("&Node{Value: 1}"), &mut ctx)),
            "auto n = new Node{.Value = 1}"
        );
        let err = declare("f", None, Some("func() {"), &mut ctx).unwrap_err();
        assert_eq!(err.kind, TranslateErrorKind::UnsupportedConstruct);
        assert_eq!(
            text(declare("p", None, Some("Point{X: 1, Y: 2}"), &mut ctx)),
            "auto p = Point{.X = 1, .Y = 2}"
        );
    }

    #[test]
    fn test_literal_spanning_lines_is_rejected() {
        let mut ctx = TranslationContext::new();
        for (ty, value) in [(None, "[]int{"), (None, "P{"), (Some("P"), "P{X: 1,")] {
            let err = declare("x", ty, Some(value), &mut ctx).unwrap_err();
            assert_eq!(err.kind, TranslateErrorKind::UnsupportedConstruct);
        }
        assert!(var_spec("xs = []string{", &mut ctx).is_err());
        assert!(declare("m", None, Some("map[string]int{"), &mut ctx).is_ok());
    }

    #[test]
    fn test_single_constants() {
        let mut ctx = TranslationContext::new();
        assert_eq!(text(const_spec("Pi = 3.14", &mut ctx)), "const auto Pi = 3.14");
        assert_eq!(
            text(const_spec("Max int64 = 1 << 20", &mut ctx)),
            "const std::int64_t Max = 1 << 20"
        );
        assert_eq!(
            text(const_spec(r#"Name = "go""#, &mut ctx)),
            r#"const std::string Name = "go""#
        );
        let err = const_spec("a b c = 1", &mut ctx).unwrap_err();
        assert_eq!(err.kind, TranslateErrorKind::UnrecognizedDeclaration);
    }

    #[test]
    fn test_iota_counts_up() {
        let mut ctx = const_block();
        assert_eq!(text(const_spec("A = iota", &mut ctx)), "const auto A = 0");
        assert_eq!(text(const_spec("B", &mut ctx)), "const auto B = 1");
        assert_eq!(text(const_spec("C", &mut ctx)), "const auto C = 2");
    }

    #[test]
    fn test_iota_template_repeats_expression_and_type() {
        let mut ctx = const_block();
        assert!(const_spec("_ = iota", &mut ctx).unwrap().lines.is_empty());
        assert_eq!(
            text(const_spec("KB Size = 1 << (10 * iota)", &mut ctx)),
            "const Size KB = 1 << (10 * 1)"
        );
        assert_eq!(text(const_spec("MB", &mut ctx)), "const Size MB = 1 << (10 * 2)");
        assert_eq!(text(const_spec("GB uint", &mut ctx)), "const unsigned int GB = 3");
    }

    #[test]
    fn test_iota_resets_on_plain_iota_entry() {
        let mut ctx = const_block();
        assert_eq!(text(const_spec("Base = 100", &mut ctx)), "const auto Base = 100");
        assert_eq!(text(const_spec("First = iota", &mut ctx)), "const auto First = 0");
        assert_eq!(text(const_spec("Second", &mut ctx)), "const auto Second = 1");
        ctx.close_block();
        ctx.open_block(BlockKind::ConstBlock);
        assert_eq!(text(const_spec("X = iota", &mut ctx)), "const auto X = 0");
    }

    #[test]
    fn test_bare_constant_without_template() {
        let mut ctx = const_block();
        let err = const_spec("A", &mut ctx).unwrap_err();
        assert_eq!(err.kind, TranslateErrorKind::UnrecognizedDeclaration);
    }

    #[test]
    fn test_type_forms() {
        assert_eq!(text(type_spec("Celsius float64", false)), "using Celsius = double");
        assert_eq!(text(type_spec("IDs = []int", false)), "using IDs = std::vector<int>");
        let opened = type_spec("Point struct {", false).unwrap();
        assert_eq!(opened.lines, vec!["class Point {", "public:"]);
        assert!(opened.advice.contains(&Advice::OpenBlock(BlockKind::StructBody)));
        assert_eq!(
            type_spec("P struct {", true).unwrap_err().kind,
            TranslateErrorKind::UnsupportedConstruct
        );
        assert_eq!(
            type_spec("Shape interface {", false).unwrap_err().kind,
            TranslateErrorKind::UnsupportedConstruct
        );
        let empty = type_spec("Unit struct{}", false).unwrap();
        assert_eq!(empty.lines.last().map(String::as_str), Some("};"));
    }

    #[test]
    fn test_struct_fields_and_string_method() {
        let mut ctx = TranslationContext::new();
        ctx.symbols_mut().begin_struct("Person");
        assert_eq!(
            text(field(r#"Name string `json:"name"`"#, &mut ctx)),
            "std::string Name{}"
        );
        assert_eq!(text(field("X, Y int", &mut ctx)), "int X{};\nint Y{}");
        let close = struct_close(&ctx).text();
        assert_eq!(
            close,
            [
                "std::string String() const {",
                "std::stringstream _ss;",
                "_ss << \"{\";",
                "_format_output(_ss, Name);",
                "_ss << \" \";",
                "_format_output(_ss, X);",
                "_ss << \" \";",
                "_format_output(_ss, Y);",
                "_ss << \"}\";",
                "return _ss.str();",
                "}",
                "};",
            ]
            .join("\n")
        );
        assert!(field("io.Reader", &mut ctx).is_err());
    }
}
