//! Go type spellings to C++ type spellings.

use crate::extract::matching_close;

/// C++ spelling of a Go predeclared type, if `name` is one.
pub fn primitive(name: &str) -> Option<&'static str> {
    let mapped = match name {
        "string" => "std::string",
        "bool" => "bool",
        "int" => "int",
        "uint" => "unsigned int",
        "int8" => "std::int8_t",
        "int16" => "std::int16_t",
        "int32" | "rune" => "std::int32_t",
        "int64" => "std::int64_t",
        "uint8" | "byte" => "std::uint8_t",
        "uint16" => "std::uint16_t",
        "uint32" => "std::uint32_t",
        "uint64" => "std::uint64_t",
        "uintptr" => "std::uintptr_t",
        "float32" => "float",
        "float64" => "double",
        _ => return None,
    };
    Some(mapped)
}

/// Maps a Go type to C++.
///
/// Pointer markers move from prefix to suffix (`*int` becomes `int*`).
/// Slices, fixed arrays and maps map to `std::vector`, `std::array` and
/// `std::unordered_map`, recursively. Names that are not predeclared
/// (user types) pass through unchanged.
pub fn map_type(go: &str) -> String {
    let t = go.trim();
    if let Some(inner) = t.strip_prefix('*') {
        return format!("{}*", map_type(inner));
    }
    if let Some(inner) = t.strip_prefix("...").or_else(|| t.strip_prefix("[]")) {
        return format!("std::vector<{}>", map_type(inner));
    }
    if t.starts_with('[')
        && let Some(close) = matching_close(t, 0)
    {
        let len = t[1..close].trim();
        if !len.is_empty() && len.chars().all(|c| c.is_ascii_digit()) {
            return format!("std::array<{}, {}>", map_type(&t[close + 1..]), len);
        }
    }
    if let Some((key, value)) = split_map_type(t) {
        return format!(
            "std::unordered_map<{}, {}>",
            map_type(key),
            map_type(value)
        );
    }
    primitive(t).map(str::to_string).unwrap_or_else(|| t.to_string())
}

/// Splits `map[K]V` into its key and value spellings.
pub fn split_map_type(t: &str) -> Option<(&str, &str)> {
    if !t.starts_with("map[") {
        return None;
    }
    let close = matching_close(t, 3)?;
    let value = t[close + 1..].trim();
    if value.is_empty() {
        return None;
    }
    Some((t[4..close].trim(), value))
}

/// True when the Go type spelling is a map.
pub fn is_map_type(go: &str) -> bool {
    split_map_type(go.trim()).is_some()
}
