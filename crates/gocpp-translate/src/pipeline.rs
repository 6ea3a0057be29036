//! The line pipeline: classify each line, dispatch it to a transformer,
//! record the transformer's advice, and accumulate the output.

use crate::context::{BlockKind, TranslationContext};
use crate::error::{ConstructError, TransformResult, TranslateError, TranslateErrorKind, unsupported};
use crate::extract::{count_braces, indentation, opens_raw_literal, rewrite_identifiers, split_comment};
use crate::postprocess;
use crate::transform::{
    Advice, ConstructResult, Terminator, assign, control, decl, function, map_literal, print,
    switch,
};

/// Returns the rest of `code` when it starts with keyword `kw`.
fn keyword<'a>(code: &'a str, kw: &str) -> Option<&'a str> {
    let rest = code.strip_prefix(kw)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}

/// Names a package member that survived translation and cannot compile.
fn untranslated_call(line: &str) -> Option<String> {
    let mut found = None;
    rewrite_identifiers(line, |id| {
        if found.is_none()
            && !id.qualified
            && let Some(after) = id.after.strip_prefix('.')
        {
            let member = after
                .split(|c: char| !(c.is_alphanumeric() || c == '_'))
                .next()
                .unwrap_or_default();
            let supported = match id.name {
                "fmt" => false,
                "strings" => postprocess::helpers::is_supported(member),
                _ => true,
            };
            if !supported {
                found = Some(format!("{}.{member}", id.name));
            }
        }
        None
    });
    found
}

/// Translates one unit, line by line.
#[derive(Debug, Default)]
pub struct Translator {
    ctx: TranslationContext,
    out: Vec<String>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the pipeline over `source` and post-processes the result.
    pub fn translate(mut self, source: &str) -> Result<String, TranslateError> {
        for (i, raw) in source.lines().enumerate() {
            if opens_raw_literal(split_comment(raw).0) {
                return Err(ConstructError::new(
                    TranslateErrorKind::UnsupportedLiteralForm,
                    "raw string literals must close on the line they open",
                )
                .at(i + 1, raw));
            }
        }

        let mut last = (0, "");
        for (i, raw) in source.lines().enumerate() {
            self.line(raw).map_err(|e| e.at(i + 1, raw))?;
            last = (i + 1, raw);
        }
        if self.ctx.block() != BlockKind::None || self.ctx.depth() != 0 {
            return Err(ConstructError::new(
                TranslateErrorKind::UnbalancedBraces,
                "input ends inside an open block",
            )
            .at(last.0, last.1));
        }
        tracing::debug!(lines = self.out.len(), "translated");
        Ok(postprocess::finish(
            &self.out.join("\n"),
            self.ctx.symbols().has_structs(),
        ))
    }

    fn line(&mut self, raw: &str) -> TransformResult<()> {
        let (code, comment) = split_comment(raw);
        let code = code.trim();
        let code = code.strip_suffix(';').map(str::trim_end).unwrap_or(code);
        if code.is_empty() {
            self.out.push(raw.trim_end().to_string());
            return Ok(());
        }

        let (opened, closed) = count_braces(code);
        self.ctx.track_braces(opened, closed)?;
        let result = self.dispatch(code)?;
        if let Some(call) = result.lines.iter().find_map(|l| untranslated_call(l)) {
            return Err(unsupported(format!("`{call}` is not supported")));
        }
        self.apply(&result.advice);

        self.ctx.switch.close_finished(self.ctx.depth());
        if self.ctx.depth() == 0 && self.ctx.depth_before_line() > 0 {
            self.ctx.leave_function();
        }
        self.emit(result, indentation(raw), comment);
        Ok(())
    }

    fn dispatch(&mut self, code: &str) -> TransformResult<ConstructResult> {
        let ctx = &mut self.ctx;
        match ctx.block() {
            BlockKind::None => self.statement(code),
            BlockKind::ImportBlock => {
                if code == ")" {
                    ctx.close_block();
                }
                Ok(ConstructResult::consumed())
            }
            BlockKind::VarBlock | BlockKind::ConstBlock | BlockKind::TypeBlock if code == ")" => {
                ctx.close_block();
                Ok(ConstructResult::consumed())
            }
            BlockKind::VarBlock => decl::var_spec(code, ctx),
            BlockKind::ConstBlock => decl::const_spec(code, ctx),
            BlockKind::TypeBlock => decl::type_spec(code, true),
            BlockKind::StructBody if code == "}" => {
                let closed = decl::struct_close(ctx);
                ctx.close_block();
                Ok(closed)
            }
            BlockKind::StructBody => decl::field(code, ctx),
            BlockKind::MapLiteralBlock
                if ctx.map_literal_depth.is_some_and(|open| ctx.depth() < open) =>
            {
                let closed = map_literal::close(code)?;
                ctx.close_block();
                Ok(closed)
            }
            BlockKind::MapLiteralBlock => map_literal::entries(code),
        }
    }

    fn statement(&mut self, code: &str) -> TransformResult<ConstructResult> {
        let ctx = &mut self.ctx;
        let open = |kind| Ok(ConstructResult::consumed().with(Advice::OpenBlock(kind)));
        match code {
            "import (" => return open(BlockKind::ImportBlock),
            "var (" => return open(BlockKind::VarBlock),
            "const (" => return open(BlockKind::ConstBlock),
            "type (" => return open(BlockKind::TypeBlock),
            "}" => return Ok(self.closing_brace()),
            "} else {" => return Ok(ConstructResult::open(code)),
            "fallthrough" => return switch::fallthrough(ctx),
            "default:" => return switch::default(ctx),
            "break" if ctx.switch.in_case_body(ctx.depth_before_line()) => {
                return Ok(ConstructResult::consumed());
            }
            _ => {}
        }
        if keyword(code, "package").is_some() || keyword(code, "import").is_some() {
            return Ok(ConstructResult::consumed());
        }
        if let Some(spec) = keyword(code, "var") {
            return decl::var_spec(spec, ctx);
        }
        if let Some(spec) = keyword(code, "const") {
            return decl::const_spec(spec, ctx);
        }
        if let Some(spec) = keyword(code, "type") {
            return decl::type_spec(spec, false);
        }
        if keyword(code, "func").is_some() || code.starts_with("func(") {
            if ctx.function().is_some() {
                return Err(unsupported("nested functions are not supported"));
            }
            return function::signature(code, ctx);
        }
        if keyword(code, "return").is_some() {
            return function::return_statement(code, ctx);
        }
        if keyword(code, "if").is_some() {
            return control::if_statement(code, ctx);
        }
        if code.starts_with("} else if ") {
            return control::else_if(code, ctx);
        }
        if keyword(code, "for").is_some() {
            return control::for_loop(code, ctx);
        }
        if keyword(code, "switch").is_some() {
            return switch::open(code, ctx);
        }
        if keyword(code, "case").is_some() {
            return switch::case(code, ctx);
        }
        for kw in ["go", "defer", "select", "chan"] {
            if keyword(code, kw).is_some() {
                return Err(unsupported(format!("`{kw}` is not supported")));
            }
        }
        if code.ends_with('(') {
            return Err(unsupported("statements spanning several lines are not supported"));
        }
        if print::is_print_call(code) {
            return print::print_call(code);
        }
        assign::statement(code, ctx)
    }

    fn closing_brace(&self) -> ConstructResult {
        if self.ctx.switch.closes_empty(self.ctx.depth()) {
            return ConstructResult::consumed();
        }
        match self.ctx.function() {
            Some(f) if f.is_entry_point() && self.ctx.depth() == 0 => {
                ConstructResult::open("return 0;\n}")
            }
            _ => ConstructResult::auto("}"),
        }
    }

    fn apply(&mut self, advice: &[Advice]) {
        for advice in advice {
            match advice {
                Advice::OpenBlock(kind) => self.ctx.open_block(*kind),
                Advice::StructOpened(name) => self.ctx.symbols_mut().begin_struct(name),
                Advice::StructDeclared(name) => self.ctx.symbols_mut().register_struct(name),
                Advice::MapDeclared(name) => self.ctx.symbols_mut().register_map(name),
                Advice::MapLiteralOpened => {
                    self.ctx.open_block(BlockKind::MapLiteralBlock);
                    self.ctx.map_literal_depth = Some(self.ctx.depth());
                }
            }
        }
    }

    fn emit(&mut self, result: ConstructResult, indent: &str, comment: Option<&str>) {
        let ConstructResult {
            mut lines,
            terminator,
            ..
        } = result;
        if let Some(last) = lines.last_mut() {
            let needs = match terminator {
                Terminator::Auto => !last.ends_with(['{', ',', '}', ':', ';']),
                Terminator::Always => !last.ends_with(';'),
                Terminator::Never => false,
            };
            if needs {
                last.push(';');
            }
        }
        if let Some(comment) = comment.map(str::trim_end) {
            match lines.last_mut() {
                Some(last) => {
                    last.push(' ');
                    last.push_str(comment);
                }
                None => lines.push(comment.to_string()),
            }
        }
        self.out
            .extend(lines.into_iter().map(|line| format!("{indent}{line}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(source: &str) -> Vec<String> {
        let mut t = Translator::new();
        for line in source.lines() {
            t.line(line).unwrap();
        }
        t.out
    }

    #[test]
    fn test_keyword_boundaries() {
        assert_eq!(keyword("for {", "for"), Some("{"));
        assert_eq!(keyword("format := 1", "for"), None);
        assert_eq!(keyword("return", "return"), Some(""));
    }

    #[test]
    fn test_terminators_and_comments() {
        let out = body("x := 1 // one\n\tcount++;\n// alone\n\n");
        assert_eq!(out, vec!["auto x = 1; // one", "\tcount++;", "// alone", ""]);
    }

    #[test]
    fn test_blocks_emit_nothing() {
        let out = body("package main\nimport (\n\t\"fmt\"\n)\nvar (\n\tx int\n)");
        assert_eq!(out, vec!["\tint x{};"]);
    }

    #[test]
    fn test_main_returns_zero() {
        let out = body("func main() {\n\tx := 1\n}");
        assert_eq!(out, vec!["auto main() -> int {", "\tauto x = 1;", "return 0;", "}"]);
    }

    #[test]
    fn test_empty_switch_drops_its_brace() {
        let out = body("func f(x int) {\nswitch x {\n}\n}");
        assert_eq!(out, vec!["auto f(int x) -> void {", "auto _s__0 = x;", "}"]);
    }

    #[test]
    fn test_break_ends_case_body() {
        let out = body("func f(x int) {\nswitch x {\ncase 1:\nbreak\n}\n}");
        assert_eq!(
            out,
            vec!["auto f(int x) -> void {", "auto _s__0 = x;", "if (_s__0 == 1) {", "}", "}"]
        );
    }

    #[test]
    fn test_unbalanced_brace() {
        let err = Translator::new().translate("x := 1\n}").unwrap_err();
        assert_eq!(err.kind, TranslateErrorKind::UnbalancedBraces);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unclosed_block_at_end() {
        let err = Translator::new()
            .translate("func main() {\nx := 1")
            .unwrap_err();
        assert_eq!(err.kind, TranslateErrorKind::UnbalancedBraces);
        let err = Translator::new().translate("const (\nA = 1").unwrap_err();
        assert_eq!(err.kind, TranslateErrorKind::UnbalancedBraces);
    }

    #[test]
    fn test_leftover_package_calls() {
        let err = Translator::new()
            .translate("s := fmt.Sprintf(\"%d\", 1)")
            .unwrap_err();
        assert_eq!(err.kind, TranslateErrorKind::UnsupportedConstruct);
        assert!(err.message.contains("fmt.Sprintf"));
        let err = Translator::new()
            .translate("parts := strings.Split(s, \",\")")
            .unwrap_err();
        assert!(err.message.contains("strings.Split"));
    }
}
