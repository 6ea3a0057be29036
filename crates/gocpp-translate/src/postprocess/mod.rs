//! Passes over the finished unit: helper definitions and `#include` lines.

pub mod helpers;
pub mod includes;

use crate::extract::string_literal_ends;

const STRING_LITERALS: &str = "using namespace std::string_literals;";

/// True when a string literal in `body` carries the `s` suffix.
fn uses_string_suffix(body: &str) -> bool {
    string_literal_ends(body).into_iter().any(|end| {
        let mut rest = body[end..].chars();
        rest.next() == Some('s') && !rest.next().is_some_and(|c| c.is_alphanumeric() || c == '_')
    })
}

/// Turns the pipeline's body into a complete translation unit. `structs`
/// tells whether any record type was declared.
pub fn finish(body: &str, structs: bool) -> String {
    let (body, definitions) = helpers::inject(body, structs);
    let mut unit = String::new();
    if uses_string_suffix(&body) {
        unit.push_str(STRING_LITERALS);
        unit.push_str("\n\n");
    }
    if !definitions.is_empty() {
        unit.push_str(&definitions);
        unit.push('\n');
    }
    unit.push_str(&body);
    if !unit.is_empty() && !unit.ends_with('\n') {
        unit.push('\n');
    }
    includes::prepend(&unit)
}
