//! Running a tool with its input on stdin.

use crate::ToolError;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// Runs `command`, feeds it `input` and returns its stdout.
///
/// Stdin is written from a scoped thread while the child's output is
/// drained, so neither side can block on a full pipe. A tool that exits
/// before reading all of its input is not an error in itself; its exit
/// status decides.
pub(crate) fn run_with_stdin(
    tool: &str,
    command: &mut Command,
    input: &[u8],
) -> Result<Vec<u8>, ToolError> {
    let io_error = |source| ToolError::Io {
        tool: tool.to_string(),
        source,
    };
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ToolError::NotAvailable(tool.to_string()),
            _ => io_error(e),
        })?;
    let stdin = child.stdin.take();

    let (written, output) = std::thread::scope(|scope| {
        let writer = scope.spawn(move || match stdin {
            Some(mut stdin) => match stdin.write_all(input) {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
                result => result,
            },
            None => Ok(()),
        });
        let output = child.wait_with_output();
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
        (written, output)
    });

    let output = output.map_err(io_error)?;
    if !output.status.success() {
        return Err(ToolError::Failed {
            tool: tool.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }
    written.map_err(io_error)?;
    tracing::debug!(tool, bytes = output.stdout.len(), "tool finished");
    Ok(output.stdout)
}
