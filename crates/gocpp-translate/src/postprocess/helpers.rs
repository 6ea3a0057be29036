//! Inline C++ definitions for the library calls the translator keeps.

/// A `strings` package function with an inline C++ counterpart.
struct Helper {
    /// Member of the `strings` package.
    member: &'static str,
    definition: &'static str,
}

const STRING_HELPERS: &[Helper] = &[
    Helper {
        member: "Contains",
        definition: r#"inline bool stringsContains(std::string const& s, std::string const& substr)
{
    return s.find(substr) != std::string::npos;
}
"#,
    },
    Helper {
        member: "HasPrefix",
        definition: r#"inline bool stringsHasPrefix(std::string const& s, std::string const& prefix)
{
    return s.size() >= prefix.size() && s.compare(0, prefix.size(), prefix) == 0;
}
"#,
    },
    Helper {
        member: "HasSuffix",
        definition: r#"inline bool stringsHasSuffix(std::string const& s, std::string const& suffix)
{
    return s.size() >= suffix.size()
        && s.compare(s.size() - suffix.size(), suffix.size(), suffix) == 0;
}
"#,
    },
    Helper {
        member: "TrimSpace",
        definition: r#"inline std::string stringsTrimSpace(std::string const& s)
{
    auto const space = " \t\n\v\f\r";
    auto const first = s.find_first_not_of(space);
    if (first == std::string::npos) {
        return "";
    }
    auto const last = s.find_last_not_of(space);
    return s.substr(first, last - first + 1);
}
"#,
    },
    Helper {
        member: "Index",
        definition: r#"inline int stringsIndex(std::string const& s, std::string const& substr)
{
    auto const pos = s.find(substr);
    return pos == std::string::npos ? -1 : static_cast<int>(pos);
}
"#,
    },
];

/// Streams values the way Go's `%v` does for the basic kinds.
const FORMAT_OUTPUT: &str = r#"template <typename T>
struct _is_sequence : std::false_type {};

template <typename T, typename A>
struct _is_sequence<std::vector<T, A>> : std::true_type {};

template <typename T, std::size_t N>
struct _is_sequence<std::array<T, N>> : std::true_type {};

template <typename T>
void _format_output(std::ostream& out, T const& x)
{
    if constexpr (std::is_same_v<T, bool>) {
        out << (x ? "true" : "false");
    } else if constexpr (std::is_integral_v<T> && sizeof(T) == 1) {
        out << static_cast<int>(x);
    } else if constexpr (_is_sequence<T>::value) {
        out << "[";
        for (std::size_t i = 0; i < std::size(x); i++) {
            if (i > 0) {
                out << " ";
            }
            _format_output(out, x[i]);
        }
        out << "]";
    } else {
        out << x;
    }
}
"#;

/// Like [`FORMAT_OUTPUT`], and also prints values (and pointers to values)
/// that have a `String()` method.
const FORMAT_OUTPUT_STRUCTS: &str = r#"template <typename T, typename = void>
struct _has_String : std::false_type {};

template <typename T>
struct _has_String<T, std::void_t<decltype(std::declval<T const&>().String())>> : std::true_type {};

template <typename T>
struct _is_sequence : std::false_type {};

template <typename T, typename A>
struct _is_sequence<std::vector<T, A>> : std::true_type {};

template <typename T, std::size_t N>
struct _is_sequence<std::array<T, N>> : std::true_type {};

template <typename T>
void _format_output(std::ostream& out, T const& x)
{
    if constexpr (std::is_same_v<T, bool>) {
        out << (x ? "true" : "false");
    } else if constexpr (std::is_integral_v<T> && sizeof(T) == 1) {
        out << static_cast<int>(x);
    } else if constexpr (_has_String<T>::value) {
        out << x.String();
    } else if constexpr (std::is_pointer_v<T> && _has_String<std::remove_pointer_t<T>>::value) {
        if (x == nullptr) {
            out << "<nil>";
        } else {
            out << "&" << x->String();
        }
    } else if constexpr (_is_sequence<T>::value) {
        out << "[";
        for (std::size_t i = 0; i < std::size(x); i++) {
            if (i > 0) {
                out << " ";
            }
            _format_output(out, x[i]);
        }
        out << "]";
    } else {
        out << x;
    }
}
"#;

/// True when `strings.<member>` has an inline definition.
pub fn is_supported(member: &str) -> bool {
    STRING_HELPERS.iter().any(|h| h.member == member)
}

/// Renames `strings.X(` calls and collects the definitions `body` needs.
/// `structs` selects the formatter that prefers a `String()` method.
///
/// Returns the rewritten body and the definitions to place before it.
pub fn inject(body: &str, structs: bool) -> (String, String) {
    let mut body = body.to_string();
    let mut definitions = Vec::new();
    if body.contains("_format_output(") {
        if structs {
            definitions.push(FORMAT_OUTPUT_STRUCTS);
        } else {
            definitions.push(FORMAT_OUTPUT);
        }
    }
    for helper in STRING_HELPERS {
        let call = format!("strings.{}(", helper.member);
        if body.contains(&call) {
            body = body.replace(&call, &format!("strings{}(", helper.member));
            definitions.push(helper.definition);
        }
    }
    (body, definitions.join("\n"))
}
