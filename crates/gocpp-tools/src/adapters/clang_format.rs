//! clang-format adapter.
//!
//! https://clang.llvm.org/docs/ClangFormat.html

use crate::process::run_with_stdin;
use crate::{Formatter, Tool, ToolCategory, ToolError, ToolInfo};
use std::process::Command;

/// Style used when none is configured.
pub const DEFAULT_STYLE: &str = "{BasedOnStyle: Webkit, ColumnLimit: 99}";

/// clang-format, reading from stdin.
pub struct ClangFormat;

const CLANG_FORMAT_INFO: ToolInfo = ToolInfo {
    name: "clang-format",
    category: ToolCategory::Formatter,
    check_cmd: &["clang-format", "--version"],
    website: "https://clang.llvm.org/docs/ClangFormat.html",
};

impl ClangFormat {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClangFormat {
    fn default() -> Self {
        Self
    }
}

impl Tool for ClangFormat {
    fn info(&self) -> &ToolInfo {
        &CLANG_FORMAT_INFO
    }
}

impl Formatter for ClangFormat {
    fn format(&self, source: &str, style: &str) -> Result<String, ToolError> {
        let name = self.info().name;
        let mut cmd = Command::new(name);
        cmd.arg(format!("-style={style}"));
        tracing::info!(tool = name, style, "formatting");
        let out = run_with_stdin(name, &mut cmd, source.as_bytes())?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}
