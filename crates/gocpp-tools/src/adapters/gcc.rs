//! GCC-compatible C++ compiler drivers: g++ and clang++.
//!
//! Both take the same flags. The unit is read from stdin and the linked
//! binary is written to stdout, so nothing touches the filesystem.

use crate::process::run_with_stdin;
use crate::{CompileOptions, Compiler, Tool, ToolCategory, ToolError, ToolInfo};
use std::process::Command;

/// Full argument list for compiling stdin into a binary on stdout.
fn compile_args(options: &CompileOptions) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-x".into(),
        "c++".into(),
        format!("-std={}", options.std),
        format!("-O{}", options.opt_level),
        "-pipe".into(),
        "-fPIC".into(),
        "-Wfatal-errors".into(),
        "-s".into(),
        "-o".into(),
        "/dev/stdout".into(),
    ];
    args.extend(options.extra_args.iter().cloned());
    args.push("-".into());
    args
}

fn compile_with(
    info: &ToolInfo,
    source: &str,
    options: &CompileOptions,
) -> Result<Vec<u8>, ToolError> {
    let mut cmd = Command::new(info.name);
    cmd.args(compile_args(options));
    tracing::info!(tool = info.name, std = %options.std, opt = %options.opt_level, "compiling");
    run_with_stdin(info.name, &mut cmd, source.as_bytes())
}

/// GNU C++ compiler.
#[cfg(feature = "tool-gxx")]
pub struct Gxx;

#[cfg(feature = "tool-gxx")]
const GXX_INFO: ToolInfo = ToolInfo {
    name: "g++",
    category: ToolCategory::Compiler,
    check_cmd: &["g++", "--version"],
    website: "https://gcc.gnu.org/",
};

#[cfg(feature = "tool-gxx")]
impl Tool for Gxx {
    fn info(&self) -> &ToolInfo {
        &GXX_INFO
    }
}

#[cfg(feature = "tool-gxx")]
impl Compiler for Gxx {
    fn compile(&self, source: &str, options: &CompileOptions) -> Result<Vec<u8>, ToolError> {
        compile_with(self.info(), source, options)
    }
}

/// LLVM C++ compiler.
#[cfg(feature = "tool-clangxx")]
pub struct Clangxx;

#[cfg(feature = "tool-clangxx")]
const CLANGXX_INFO: ToolInfo = ToolInfo {
    name: "clang++",
    category: ToolCategory::Compiler,
    check_cmd: &["clang++", "--version"],
    website: "https://clang.llvm.org/",
};

#[cfg(feature = "tool-clangxx")]
impl Tool for Clangxx {
    fn info(&self) -> &ToolInfo {
        &CLANGXX_INFO
    }
}

#[cfg(feature = "tool-clangxx")]
impl Compiler for Clangxx {
    fn compile(&self, source: &str, options: &CompileOptions) -> Result<Vec<u8>, ToolError> {
        compile_with(self.info(), source, options)
    }
}
