//! Header aggregation.

use std::collections::BTreeSet;

/// Symbol prefixes and the header that declares them.
const HEADERS: &[(&str, &str)] = &[
    ("std::tuple", "tuple"),
    ("std::tie", "tuple"),
    ("std::ignore", "tuple"),
    ("std::cout", "iostream"),
    ("std::cerr", "iostream"),
    ("std::endl", "iostream"),
    ("std::string", "string"),
    ("std::size(", "iterator"),
    ("std::begin(", "iterator"),
    ("std::end(", "iterator"),
    ("std::unordered_map", "unordered_map"),
    ("std::vector", "vector"),
    ("std::array", "array"),
    ("std::size_t", "cstddef"),
    ("std::int", "cstdint"),
    ("std::uint", "cstdint"),
    ("std::stringstream", "sstream"),
    ("std::ostream", "ostream"),
    ("std::is_", "type_traits"),
    ("std::void_t", "type_traits"),
    ("std::false_type", "type_traits"),
    ("std::true_type", "type_traits"),
    ("std::remove_pointer_t", "type_traits"),
    ("std::declval", "utility"),
    ("std::pair", "utility"),
    ("printf(", "cstdio"),
    ("stderr", "cstdio"),
];

/// Headers needed by `text`, sorted and deduplicated.
pub fn required(text: &str) -> BTreeSet<&'static str> {
    HEADERS
        .iter()
        .filter(|(symbol, _)| text.contains(symbol))
        .map(|&(_, header)| header)
        .collect()
}

/// Prepends one `#include` per required header, then a blank line.
pub fn prepend(text: &str) -> String {
    let headers = required(text);
    if headers.is_empty() {
        return text.to_string();
    }
    let mut out = String::new();
    for header in headers {
        out.push_str(&format!("#include <{header}>\n"));
    }
    out.push('\n');
    out.push_str(text);
    out
}
