//! Built-in tool lookup.
//!
//! Adapters are unit structs, so each one lives in a `static` and the
//! registry hands out `&'static` trait objects in preference order.

use crate::{Compiler, Formatter, Tool};

/// Every built-in formatter.
#[allow(clippy::vec_init_then_push, unused_mut)]
pub fn formatters() -> Vec<&'static dyn Formatter> {
    let mut tools: Vec<&'static dyn Formatter> = Vec::new();
    #[cfg(feature = "tool-clang-format")]
    {
        use crate::adapters::ClangFormat;
        static CLANG_FORMAT: ClangFormat = ClangFormat;
        tools.push(&CLANG_FORMAT);
    }
    tools
}

/// Every built-in compiler, most preferred first.
#[allow(clippy::vec_init_then_push, unused_mut)]
pub fn compilers() -> Vec<&'static dyn Compiler> {
    let mut tools: Vec<&'static dyn Compiler> = Vec::new();
    #[cfg(feature = "tool-gxx")]
    {
        use crate::adapters::Gxx;
        static GXX: Gxx = Gxx;
        tools.push(&GXX);
    }
    #[cfg(feature = "tool-clangxx")]
    {
        use crate::adapters::Clangxx;
        static CLANGXX: Clangxx = Clangxx;
        tools.push(&CLANGXX);
    }
    tools
}

/// Get a formatter by executable name.
pub fn formatter_by_name(name: &str) -> Option<&'static dyn Formatter> {
    formatters().into_iter().find(|t| t.info().name == name)
}

/// Get a compiler by executable name.
pub fn compiler_by_name(name: &str) -> Option<&'static dyn Compiler> {
    compilers().into_iter().find(|t| t.info().name == name)
}

/// The first compiler found on PATH.
pub fn first_available_compiler() -> Option<&'static dyn Compiler> {
    let found = compilers().into_iter().find(|t| t.is_available());
    if let Some(tool) = found {
        tracing::debug!(tool = tool.info().name, "selected compiler");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolCategory;

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(compiler_by_name("g++").map(|t| t.info().name), Some("g++"));
        assert_eq!(
            compiler_by_name("clang++").map(|t| t.info().name),
            Some("clang++")
        );
        assert!(compiler_by_name("cl.exe").is_none());
        assert_eq!(
            formatter_by_name("clang-format").map(|t| t.info().name),
            Some("clang-format")
        );
    }

    #[test]
    fn test_categories_match_capability() {
        assert!(
            formatters()
                .iter()
                .all(|t| t.info().category == ToolCategory::Formatter)
        );
        assert!(
            compilers()
                .iter()
                .all(|t| t.info().category == ToolCategory::Compiler)
        );
    }

    #[test]
    fn test_gxx_is_preferred() {
        assert_eq!(compilers().first().map(|t| t.info().name), Some("g++"));
    }

    #[test]
    fn test_first_available_is_installed() {
        if let Some(tool) = first_available_compiler() {
            assert!(tool.is_available());
        }
    }
}
