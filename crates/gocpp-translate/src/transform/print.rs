//! Print-family calls: `fmt.Print`, `fmt.Println`, `fmt.Printf`,
//! `fmt.Fprint*` to the standard streams, and the `print`/`println` builtins.

use crate::error::{ConstructError, TransformResult, TranslateErrorKind, unsupported};
use crate::extract::{is_numeric_literal, is_string_literal, matching_close, split_top_level};
use crate::transform::{ConstructResult, expr};

/// Returns the callee and argument text when `line` is exactly one call.
fn call(line: &str) -> Option<(&str, &str)> {
    let open = line.find('(')?;
    if matching_close(line, open)? != line.len() - 1 {
        return None;
    }
    Some((&line[..open], &line[open + 1..line.len() - 1]))
}

/// True when `line` is a print-family statement handled by [`print_call`].
pub fn is_print_call(line: &str) -> bool {
    call(line).is_some_and(|(name, _)| {
        matches!(
            name,
            "fmt.Print"
                | "fmt.Println"
                | "fmt.Printf"
                | "fmt.Fprint"
                | "fmt.Fprintln"
                | "fmt.Fprintf"
                | "print"
                | "println"
        )
    })
}

fn is_literal(arg: &str) -> bool {
    is_string_literal(arg) || is_numeric_literal(arg)
}

/// How one family member writes its operands.
struct Style {
    stream: &'static str,
    newline: bool,
    /// Space between every pair of operands (`Println`).
    always_spaced: bool,
    /// Space between operands when neither is a string (`Print`).
    spaced_between_values: bool,
}

/// Translates a print-family call.
pub fn print_call(line: &str) -> TransformResult<ConstructResult> {
    let Some((name, args)) = call(line) else {
        return Err(unsupported("not a print call"));
    };
    let mut args = split_top_level(args, ',');
    let stream = match name {
        "fmt.Fprint" | "fmt.Fprintln" | "fmt.Fprintf" => {
            let Some(writer) = (!args.is_empty()).then(|| args.remove(0)) else {
                return Err(unsupported(format!("`{name}` without a writer")));
            };
            match writer {
                "os.Stdout" => "std::cout",
                "os.Stderr" => "std::cerr",
                _ => return Err(unsupported(format!("`{name}` to writer `{writer}`"))),
            }
        }
        _ if name.chars().all(|c| c.is_ascii_lowercase()) => "std::cerr",
        _ => "std::cout",
    };
    if name.ends_with('f') {
        return printf(stream, &args);
    }
    let builtin = !name.contains('.');
    let newline = name.ends_with("ln");
    let style = Style {
        stream,
        newline,
        always_spaced: newline,
        spaced_between_values: !newline && !builtin,
    };
    Ok(ConstructResult::statement(insertions(&style, &args)))
}

/// Rejects the verbs that format by reflection.
fn check_verbs(format: &str) -> TransformResult<()> {
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        let mut flags = String::new();
        while let Some(&f) = chars.peek() {
            if "+-# 0".contains(f) || f.is_ascii_digit() || f == '.' || f == '*' {
                flags.push(f);
                chars.next();
            } else {
                break;
            }
        }
        if let Some(verb @ ('v' | 'T')) = chars.next() {
            return Err(ConstructError::new(
                TranslateErrorKind::UnsupportedFormatVerb,
                format!("`%{flags}{verb}` has no printf equivalent"),
            ));
        }
    }
    Ok(())
}

fn printf(stream: &str, args: &[&str]) -> TransformResult<ConstructResult> {
    let Some(format) = args.first() else {
        return Err(unsupported("printf without a format string"));
    };
    check_verbs(format)?;
    let args: Vec<String> = args.iter().map(|a| expr::rewrite(a)).collect();
    let text = match stream {
        "std::cerr" => format!("fprintf(stderr, {})", args.join(", ")),
        _ => format!("printf({})", args.join(", ")),
    };
    Ok(ConstructResult::statement(text))
}

/// Builds the insertion statements for `Print`/`Println`-style calls.
///
/// Literal operands are written with `<<`; every other operand goes
/// through `_format_output` so that booleans, bytes and structs print the
/// way Go prints them.
fn insertions(style: &Style, args: &[&str]) -> String {
    let mut statements: Vec<String> = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    let flush = |pending: &mut Vec<String>, statements: &mut Vec<String>| {
        if !pending.is_empty() {
            statements.push(format!("{} << {}", style.stream, pending.join(" << ")));
            pending.clear();
        }
    };
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            let between_values = !is_string_literal(args[i - 1]) && !is_string_literal(arg);
            if style.always_spaced || (style.spaced_between_values && between_values) {
                pending.push("\" \"".to_string());
            }
        }
        if is_literal(arg) {
            pending.push(expr::rewrite(arg));
        } else {
            flush(&mut pending, &mut statements);
            statements.push(format!(
                "_format_output({}, {})",
                style.stream,
                expr::value(arg)
            ));
        }
    }
    if style.newline {
        pending.push("std::endl".to_string());
    }
    flush(&mut pending, &mut statements);
    statements.join(";\n")
}
