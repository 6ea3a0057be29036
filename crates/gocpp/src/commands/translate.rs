//! Translate command - Go source in, C++ text or a native binary out.

use crate::config::GocppConfig;
use anyhow::{Context, bail};
use gocpp_tools::{
    Compiler, Tool, ToolError, compiler_by_name, first_available_compiler, formatter_by_name,
};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Inputs for one run, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct TranslateArgs {
    /// Source file; stdin when `None` or `-`.
    pub input: Option<PathBuf>,
    /// Explicit `apply`/`skip` choice; falls back to the config.
    pub format: Option<bool>,
    /// Where to write the binary. Without it the C++ text is printed.
    pub output: Option<PathBuf>,
}

/// Run the translation. Returns the process exit code.
pub fn cmd_translate(args: &TranslateArgs, config: &GocppConfig) -> anyhow::Result<i32> {
    let source = read_input(args.input.as_deref())?;
    let mut cpp = gocpp_translate::translate(&source)?;

    if args.format.unwrap_or_else(|| config.format.enabled()) {
        cpp = format_best_effort(cpp, config);
    }

    let Some(output) = &args.output else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(cpp.as_bytes())?;
        stdout.flush()?;
        return Ok(0);
    };

    let compiler = select_compiler(config)?;
    match compiler.compile(&cpp, &config.compile.options()) {
        Ok(binary) => {
            write_executable(output, &binary)?;
            tracing::info!(path = %output.display(), bytes = binary.len(), "wrote binary");
            Ok(0)
        }
        Err(ToolError::Failed { tool, stderr, .. }) => {
            eprintln!("{cpp}");
            eprintln!("Errors from {tool}:");
            eprint!("{stderr}");
            Ok(1)
        }
        Err(e) => Err(e.into()),
    }
}

fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        None => read_stdin(),
        Some(path) if path == Path::new("-") => read_stdin(),
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display())),
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("cannot read standard input")?;
    Ok(source)
}

/// Formats `cpp`, or returns it unchanged when the formatter cannot run.
fn format_best_effort(cpp: String, config: &GocppConfig) -> String {
    let name = config.format.tool();
    let Some(formatter) = formatter_by_name(name) else {
        tracing::warn!(tool = name, "unknown formatter, output left unformatted");
        return cpp;
    };
    if !formatter.is_available() {
        tracing::warn!(tool = name, "formatter not found, output left unformatted");
        return cpp;
    }
    match formatter.format(&cpp, config.format.style()) {
        Ok(formatted) if !formatted.trim().is_empty() => formatted,
        Ok(_) => {
            tracing::warn!(tool = name, "formatter returned nothing, output left unformatted");
            cpp
        }
        Err(e) => {
            tracing::warn!(tool = name, error = %e, "formatting failed, output left unformatted");
            cpp
        }
    }
}

fn select_compiler(config: &GocppConfig) -> anyhow::Result<&'static dyn Compiler> {
    match config.compile.compiler.as_deref() {
        Some(name) => match compiler_by_name(name) {
            Some(compiler) => Ok(compiler),
            None => bail!("unknown compiler `{name}` (expected g++ or clang++)"),
        },
        None => first_available_compiler()
            .context("no C++ compiler found on PATH (tried g++ and clang++)"),
    }
}

fn write_executable(path: &Path, binary: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, binary).with_context(|| format!("cannot write {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .with_context(|| format!("cannot make {} executable", path.display()))?;
    }
    Ok(())
}
