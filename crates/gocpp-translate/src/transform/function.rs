//! Function signatures and `return` statements.

use crate::context::TranslationContext;
use crate::error::{TransformResult, unrecognized, unsupported};
use crate::extract::{Anchor, between, between_first, matching_close, split_top_level};
use crate::transform::{ConstructResult, expr};
use crate::types::map_type;

/// One parameter or result: an optional name and a Go type.
struct Field<'a> {
    name: Option<&'a str>,
    ty: &'a str,
}

/// Parses a parameter or result list.
///
/// When any entry is named, entries without a type take the type of the
/// next entry to their right (`a, b int`). Otherwise every entry is a type.
fn parse_fields(list: &str) -> TransformResult<Vec<Field<'_>>> {
    let pieces = split_top_level(list, ',');
    let named = pieces
        .iter()
        .any(|p| p.contains(char::is_whitespace) && !p.starts_with("func"));
    if !named {
        return Ok(pieces.into_iter().map(|ty| Field { name: None, ty }).collect());
    }
    let mut fields = Vec::with_capacity(pieces.len());
    let mut carried: Option<&str> = None;
    for piece in pieces.into_iter().rev() {
        let field = match piece.split_once(char::is_whitespace) {
            Some((name, ty)) => {
                let ty = ty.trim();
                carried = Some(ty);
                Field {
                    name: Some(name),
                    ty,
                }
            }
            None => {
                let ty = carried
                    .ok_or_else(|| unrecognized(format!("parameter `{piece}` has no type")))?;
                Field {
                    name: Some(piece),
                    ty,
                }
            }
        };
        fields.push(field);
    }
    fields.reverse();
    Ok(fields)
}

fn return_type(results: &str) -> TransformResult<String> {
    let results = results.trim();
    if results.is_empty() {
        return Ok("void".to_string());
    }
    let list = match results.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        Some(inner) => parse_fields(inner)?,
        None => vec![Field {
            name: None,
            ty: results,
        }],
    };
    let types: Vec<String> = list.iter().map(|f| map_type(f.ty)).collect();
    Ok(match types.as_slice() {
        [] => "void".to_string(),
        [single] => single.clone(),
        _ => format!("std::tuple<{}>", types.join(", ")),
    })
}

/// `func name(params) results {` to `auto name(T a) -> R {`.
pub fn signature(line: &str, ctx: &mut TranslationContext) -> TransformResult<ConstructResult> {
    let rest = line.strip_prefix("func").unwrap_or(line).trim_start();
    if rest.starts_with('(') {
        return Err(unsupported("methods with receivers are not supported"));
    }
    if !line.ends_with('{') {
        return Err(unsupported("function body must open on the signature line"));
    }
    let name = between_first(line, "func ", "(")
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| unrecognized("function without a name"))?;
    if name.contains('[') {
        return Err(unsupported("generic functions are not supported"));
    }
    let open = line
        .find('(')
        .ok_or_else(|| unrecognized("function without a parameter list"))?;
    let close = matching_close(line, open)
        .ok_or_else(|| unsupported("parameter list must close on the signature line"))?;

    let params = parse_fields(&line[open + 1..close])?
        .into_iter()
        .map(|f| match f.name {
            Some(n) => format!("{} {}", map_type(f.ty), n),
            None => map_type(f.ty),
        })
        .collect::<Vec<_>>()
        .join(", ");

    let results = between(&line[close..], ")", Anchor::First, "{", Anchor::Last).unwrap_or("");
    let ret = if name == "main" {
        "int".to_string()
    } else {
        return_type(results)?
    };

    tracing::debug!(name, ret = %ret, "function");
    ctx.enter_function(name, &ret);
    Ok(ConstructResult::open(format!("auto {name}({params}) -> {ret} {{")))
}

/// `return`, `return x` and `return a, b`.
pub fn return_statement(line: &str, ctx: &TranslationContext) -> TransformResult<ConstructResult> {
    let values = line.strip_prefix("return").unwrap_or("").trim();
    let function = ctx.function();
    if values.is_empty() {
        let text = match function {
            Some(f) if f.is_entry_point() => "return 0",
            Some(f) if f.return_type != "void" => {
                return Err(unsupported("bare return with named results is not supported"));
            }
            _ => "return",
        };
        return Ok(ConstructResult::statement(text));
    }
    if expr::opens_literal(values) {
        return Err(unsupported(
            "composite literals spanning several lines are not supported",
        ));
    }
    let exprs: Vec<String> = split_top_level(values, ',')
        .into_iter()
        .map(expr::value)
        .collect();
    if exprs.len() == 1 {
        return Ok(ConstructResult::statement(format!("return {}", exprs[0])));
    }
    let tuple = match function {
        Some(f) if f.returns_tuple() => f.return_type.as_str(),
        _ => "std::tuple",
    };
    Ok(ConstructResult::statement(format!(
        "return {tuple}{{{}}}",
        exprs.join(", ")
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateErrorKind;

    fn sig(line: &str) -> String {
        let mut ctx = TranslationContext::new();
        signature(line, &mut ctx).unwrap().text()
    }

    #[test]
    fn test_shared_parameter_types() {
        assert_eq!(
            sig("func add(a, b int, s string) int {"),
            "auto add(int a, int b, std::string s) -> int {"
        );
    }

    #[test]
    fn test_return_shapes() {
        assert_eq!(sig("func f() {"), "auto f() -> void {");
        assert_eq!(
            sig("func divmod(a, b int) (int, int) {"),
            "auto divmod(int a, int b) -> std::tuple<int, int> {"
        );
        assert_eq!(
            sig("func named() (q, r int, err string) {"),
            "auto named() -> std::tuple<int, int, std::string> {"
        );
        assert_eq!(sig("func main() {"), "auto main() -> int {");
    }

    #[test]
    fn test_parameter_types_are_mapped() {
        assert_eq!(
            sig("func f(p *Node, xs []int64, rest ...string) {"),
            "auto f(Node* p, std::vector<std::int64_t> xs, std::vector<std::string> rest) -> void {"
        );
    }

    #[test]
    fn test_rejected_signatures() {
        let mut ctx = TranslationContext::new();
        let err = signature("func (p Point) Len() int {", &mut ctx).unwrap_err();
        assert_eq!(err.kind, TranslateErrorKind::UnsupportedConstruct);
        let err = signature("func f(a int) int", &mut ctx).unwrap_err();
        assert_eq!(err.kind, TranslateErrorKind::UnsupportedConstruct);
    }

    #[test]
    fn test_tuple_return_is_wrapped() {
        let mut ctx = TranslationContext::new();
        signature("func pair() (int, int) {", &mut ctx).unwrap();
        let out = return_statement("return a, b+1", &ctx).unwrap();
        assert_eq!(out.text(), "return std::tuple<int, int>{a, b+1}");
    }

    #[test]
    fn test_bare_return_in_main() {
        let mut ctx = TranslationContext::new();
        signature("func main() {", &mut ctx).unwrap();
        assert_eq!(return_statement("return", &ctx).unwrap().text(), "return 0");
        ctx.enter_function("helper", "void");
        assert_eq!(return_statement("return", &ctx).unwrap().text(), "return");
    }

    #[test]
    fn test_bare_return_with_named_results() {
        let mut ctx = TranslationContext::new();
        signature("func split(n int) (q, r int) {", &mut ctx).unwrap();
        let err = return_statement("return", &ctx).unwrap_err();
        assert_eq!(err.kind, TranslateErrorKind::UnsupportedConstruct);
        assert_eq!(
            return_statement("return q, r", &ctx).unwrap().text(),
            "return std::tuple<int, int>{q, r}"
        );
        ctx.enter_function("count", "int");
        assert!(return_statement("return", &ctx).is_err());
    }

    #[test]
    fn test_return_of_open_literal() {
        let mut ctx = TranslationContext::new();
        ctx.enter_function("origin", "Point");
        let err = return_statement("return Point{", &ctx).unwrap_err();
        assert_eq!(err.kind, TranslateErrorKind::UnsupportedConstruct);
    }
}
