//! External tools driven by gocpp: a C++ formatter and C++ compilers.
//!
//! Every adapter implements [`Tool`] for detection and then one of the
//! capability traits, [`Formatter`] or [`Compiler`]. Source text is
//! always handed to the tool on stdin and results are read from stdout.
//!
//! # Example
//!
//! ```no_run
//! use gocpp_tools::{CompileOptions, Compiler, first_available_compiler};
//!
//! let compiler = first_available_compiler().expect("no C++ compiler on PATH");
//! let binary = compiler
//!     .compile("int main() { return 0; }\n", &CompileOptions::default())
//!     .unwrap();
//! assert!(!binary.is_empty());
//! ```

pub mod adapters;
mod process;
mod registry;

use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

pub use registry::{
    compiler_by_name, compilers, first_available_compiler, formatter_by_name, formatters,
};

/// What a tool is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolCategory {
    Formatter,
    Compiler,
}

impl ToolCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Formatter => "formatter",
            ToolCategory::Compiler => "compiler",
        }
    }
}

/// Static description of an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Executable name, looked up on PATH.
    pub name: &'static str,
    pub category: ToolCategory,
    /// Command that prints the tool's version.
    pub check_cmd: &'static [&'static str],
    pub website: &'static str,
}

/// Errors from running an external tool.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool not available: {0}")]
    NotAvailable(String),

    #[error("failed to run {tool}: {source}")]
    Io {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed ({status})")]
    Failed {
        tool: String,
        status: ExitStatus,
        /// Everything the tool wrote to stderr, unmodified.
        stderr: String,
    },
}

/// An external tool that can be detected on this machine.
pub trait Tool: Send + Sync {
    fn info(&self) -> &ToolInfo;

    /// Whether the executable can be found on PATH.
    fn is_available(&self) -> bool {
        which::which(self.info().name).is_ok()
    }

    /// First line of the tool's version output.
    fn version(&self) -> Option<String> {
        let (program, args) = self.info().check_cmd.split_first()?;
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .and_then(|s| s.lines().next().map(|l| l.trim().to_string()))
    }
}

/// Rewrites C++ source into a canonical layout.
pub trait Formatter: Tool {
    /// Formats `source` with the tool's `style` argument.
    fn format(&self, source: &str, style: &str) -> Result<String, ToolError>;
}

/// Options passed to every [`Compiler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Language standard, e.g. `c++17`.
    pub std: String,
    /// Optimisation level without the `-O` prefix.
    pub opt_level: String,
    /// Appended after the built-in flags.
    pub extra_args: Vec<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            std: "c++17".to_string(),
            opt_level: "2".to_string(),
            extra_args: Vec::new(),
        }
    }
}

/// Turns one C++ translation unit into an executable.
pub trait Compiler: Tool {
    /// Compiles `source` and returns the bytes of the linked binary.
    ///
    /// On failure the compiler's diagnostics are in [`ToolError::Failed`].
    fn compile(&self, source: &str, options: &CompileOptions) -> Result<Vec<u8>, ToolError>;
}
