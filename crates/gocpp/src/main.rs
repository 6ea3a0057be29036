use clap::{Parser, ValueEnum};
use gocpp::GocppConfig;
use gocpp::commands::translate::{TranslateArgs, cmd_translate};
use std::path::PathBuf;

/// Whether to run the C++ formatter on the generated unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatMode {
    Apply,
    Skip,
}

#[derive(Parser, Debug)]
#[command(name = "gocpp")]
#[command(about = "Translate a Go subset into C++17 and compile it")]
#[command(version)]
struct Cli {
    /// Go source file (reads stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Run clang-format on the generated C++
    #[arg(value_enum)]
    format: Option<FormatMode>,

    /// Write a compiled binary here instead of printing the C++ source
    output: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: libc::signal only changes the signal disposition for SIGPIPE
    // back to the POSIX default; no memory is touched.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("GOCPP_LOG").unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!(
            "gocpp={level},gocpp_translate={level},gocpp_tools={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    reset_sigpipe();

    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = GocppConfig::load(&root);
    let args = TranslateArgs {
        input: cli.input,
        format: cli.format.map(|mode| mode == FormatMode::Apply),
        output: cli.output,
    };

    match cmd_translate(&args, &config) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
