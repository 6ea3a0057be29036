//! Tool adapters.
//!
//! Each adapter wraps one executable and provides:
//! - Availability detection
//! - The command line for its capability
//! - Output handling

#[cfg(feature = "tool-clang-format")]
mod clang_format;
#[cfg(any(feature = "tool-gxx", feature = "tool-clangxx"))]
mod gcc;

// Re-exports
#[cfg(feature = "tool-clang-format")]
pub use clang_format::{ClangFormat, DEFAULT_STYLE};
#[cfg(feature = "tool-clangxx")]
pub use gcc::Clangxx;
#[cfg(feature = "tool-gxx")]
pub use gcc::Gxx;
