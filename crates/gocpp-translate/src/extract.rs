//! Text extraction helpers shared by the transformers.
//!
//! The translator never builds a syntax tree; it slices each line between
//! markers. Most helpers here skip over string, rune and raw string
//! literals so that a marker inside a literal is never mistaken for code.

/// Which occurrence of a marker bounds one side of an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Leftmost occurrence.
    First,
    /// Rightmost occurrence.
    Last,
}

fn locate(s: &str, marker: &str, anchor: Anchor) -> Option<usize> {
    match anchor {
        Anchor::First => s.find(marker),
        Anchor::Last => s.rfind(marker),
    }
}

/// Returns the text between `open` and `close`.
///
/// `close` is searched only after the chosen `open` occurrence, so
/// `between("f(a)(b)", "(", Anchor::First, ")", Anchor::Last)` yields `a)(b`.
pub fn between<'a>(
    s: &'a str,
    open: &str,
    open_at: Anchor,
    close: &str,
    close_at: Anchor,
) -> Option<&'a str> {
    let start = locate(s, open, open_at)? + open.len();
    let rest = &s[start..];
    let end = locate(rest, close, close_at)?;
    Some(&rest[..end])
}

/// [`between`] anchored on the leftmost occurrence of both markers.
pub fn between_first<'a>(s: &'a str, open: &str, close: &str) -> Option<&'a str> {
    between(s, open, Anchor::First, close, Anchor::First)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Double,
    Single,
    Raw,
}

/// Incremental literal tracker. Feed it characters in order.
#[derive(Debug, Clone, Copy)]
struct LiteralState {
    quote: Quote,
    escaped: bool,
}

impl LiteralState {
    fn new() -> Self {
        Self {
            quote: Quote::None,
            escaped: false,
        }
    }

    /// Advance over `c`. Returns true when `c` is code (outside any literal
    /// and not a quote delimiter).
    fn step(&mut self, c: char) -> bool {
        match self.quote {
            Quote::None => match c {
                '"' => self.quote = Quote::Double,
                '\'' => self.quote = Quote::Single,
                '`' => self.quote = Quote::Raw,
                _ => return true,
            },
            Quote::Double | Quote::Single => {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if (c == '"' && self.quote == Quote::Double)
                    || (c == '\'' && self.quote == Quote::Single)
                {
                    self.quote = Quote::None;
                }
            }
            Quote::Raw => {
                if c == '`' {
                    self.quote = Quote::None;
                }
            }
        }
        false
    }
}

/// Byte offsets and characters of `s` that lie outside literals.
fn code_chars(s: &str) -> Vec<(usize, char)> {
    let mut state = LiteralState::new();
    s.char_indices().filter(|&(_, c)| state.step(c)).collect()
}

/// Byte offsets just past each string literal (interpreted or raw) in `s`.
/// Rune literals are not reported.
pub fn string_literal_ends(s: &str) -> Vec<usize> {
    let mut state = LiteralState::new();
    let mut ends = Vec::new();
    for (i, c) in s.char_indices() {
        let before = state.quote;
        state.step(c);
        if matches!(before, Quote::Double | Quote::Raw) && state.quote == Quote::None {
            ends.push(i + c.len_utf8());
        }
    }
    ends
}

/// True when `s` ends inside an unterminated raw string literal.
pub fn opens_raw_literal(s: &str) -> bool {
    let mut state = LiteralState::new();
    for c in s.chars() {
        state.step(c);
    }
    state.quote == Quote::Raw
}

/// Splits off a trailing `//` comment that is not inside a literal.
pub fn split_comment(s: &str) -> (&str, Option<&str>) {
    let chars = code_chars(s);
    for pair in chars.windows(2) {
        let ((i, a), (j, b)) = (pair[0], pair[1]);
        if a == '/' && b == '/' && j == i + 1 {
            return (&s[..i], Some(&s[i..]));
        }
    }
    (s, None)
}

/// Counts opening and closing curly braces outside literals.
pub fn count_braces(s: &str) -> (usize, usize) {
    code_chars(s)
        .into_iter()
        .fold((0, 0), |(open, close), (_, c)| match c {
            '{' => (open + 1, close),
            '}' => (open, close + 1),
            _ => (open, close),
        })
}

/// Byte offset of the first occurrence of `pat` that is outside literals
/// and not nested inside brackets.
pub fn find_top_level(s: &str, pat: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in code_chars(s) {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
        if depth == 0 && s[i..].starts_with(pat) {
            return Some(i);
        }
    }
    None
}

/// Splits `s` at top-level occurrences of `sep`, trimming each piece.
///
/// Separators nested in brackets or literals are ignored. Empty input
/// yields no pieces.
pub fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    if s.trim().is_empty() {
        return Vec::new();
    }
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in code_chars(s) {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ if c == sep && depth == 0 => {
                pieces.push(s[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(s[start..].trim());
    pieces
}

/// Byte offset of the bracket closing the one at `open`.
pub fn matching_close(s: &str, open: usize) -> Option<usize> {
    let opener = s[open..].chars().next()?;
    let closer = match opener {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        _ => return None,
    };
    let mut depth = 0usize;
    for (i, c) in code_chars(s) {
        if i < open {
            continue;
        }
        if c == opener {
            depth += 1;
        } else if c == closer {
            depth = depth.checked_sub(1)?;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Assignment operator found by [`split_assignment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `:=`
    Declare,
    /// `=`
    Assign,
}

/// Splits a simple statement at its top-level `:=` or `=`.
///
/// Comparison operators are skipped. Compound assignments (`+=`, `<<=`, ...)
/// yield `None`: they need no rewriting.
pub fn split_assignment(s: &str) -> Option<(&str, AssignOp, &str)> {
    if let Some(i) = find_top_level(s, ":=") {
        return Some((s[..i].trim(), AssignOp::Declare, s[i + 2..].trim()));
    }
    let chars = code_chars(s);
    let mut depth = 0usize;
    for (k, &(i, c)) in chars.iter().enumerate() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '=' if depth == 0 => {
                let prev = k.checked_sub(1).map(|p| chars[p].1);
                let next = chars.get(k + 1).map(|&(_, n)| n);
                if next == Some('=') || matches!(prev, Some('=' | '!' | '<' | '>')) {
                    continue;
                }
                if matches!(prev, Some('+' | '-' | '*' | '/' | '%' | '&' | '|' | '^')) {
                    return None;
                }
                return Some((s[..i].trim(), AssignOp::Assign, s[i + 1..].trim()));
            }
            _ => {}
        }
    }
    None
}

/// An identifier found by [`rewrite_identifiers`].
#[derive(Debug, Clone, Copy)]
pub struct Ident<'a> {
    pub name: &'a str,
    /// Text following the identifier.
    pub after: &'a str,
    /// Preceded by `.` (a field, method or package member).
    pub qualified: bool,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Rebuilds `s`, replacing identifiers for which `f` returns a value.
/// Literals and numbers are copied verbatim.
pub fn rewrite_identifiers(s: &str, mut f: impl FnMut(Ident<'_>) -> Option<String>) -> String {
    let mut out = String::with_capacity(s.len());
    let mut state = LiteralState::new();
    let mut prev: Option<char> = None;
    let mut iter = s.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        if state.step(c) && (is_ident_start(c) || c.is_ascii_digit()) {
            let mut end = i + c.len_utf8();
            while let Some(&(j, d)) = iter.peek() {
                if !is_ident_char(d) {
                    break;
                }
                end = j + d.len_utf8();
                iter.next();
            }
            let word = &s[i..end];
            let replaced = if c.is_ascii_digit() {
                None
            } else {
                f(Ident {
                    name: word,
                    after: &s[end..],
                    qualified: prev == Some('.'),
                })
            };
            out.push_str(replaced.as_deref().unwrap_or(word));
            prev = word.chars().last();
            continue;
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// True if `word` occurs as an unqualified identifier outside literals.
pub fn contains_word(s: &str, word: &str) -> bool {
    let mut found = false;
    rewrite_identifiers(s, |id| {
        found |= id.name == word && !id.qualified;
        None
    });
    found
}

/// Replaces unqualified identifier occurrences of `word` with `with`.
pub fn replace_word(s: &str, word: &str, with: &str) -> String {
    rewrite_identifiers(s, |id| (id.name == word && !id.qualified).then(|| with.to_string()))
}

/// True for a Go identifier (ASCII or Unicode letters, digits, underscore).
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if is_ident_start(first) => chars.all(is_ident_char),
        _ => false,
    }
}

/// True when `s` is exactly one interpreted (`"..."`) or raw (`` `...` ``) string literal.
pub fn is_string_literal(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return false;
    };
    if first != '"' && first != '`' {
        return false;
    }
    let mut state = LiteralState::new();
    for (i, c) in s.char_indices() {
        state.step(c);
        if i > 0 && state.quote == Quote::None {
            return i + c.len_utf8() == s.len();
        }
    }
    false
}

/// True for integer and floating point literals, optionally negated.
pub fn is_numeric_literal(s: &str) -> bool {
    let t = s.strip_prefix('-').unwrap_or(s).replace('_', "");
    if !t.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    t.parse::<f64>().is_ok()
}

/// True for a non-negative decimal integer literal.
pub fn is_integer_literal(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == '_')
}

/// Leading whitespace of `line`.
pub fn indentation(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}
