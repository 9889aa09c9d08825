use crate::shared::error::AuditError;
use crate::shared::security::read_bounded_file;
use crate::shared::Result;
use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

/// Lines of stderr kept in a tool failure report
const STDERR_TAIL_LINES: usize = 20;

/// Runs an external tool with stdout redirected into `output`
///
/// A tool that cannot be started or exits unsuccessfully is a
/// [`AuditError::ToolFailed`]; its exit status is never ignored.
pub(crate) fn run_to_file<I, S>(tool: &str, program: &Path, args: I, output: &Path) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let stdout = File::create(output).map_err(|e| AuditError::FileWriteError {
        path: output.to_path_buf(),
        details: e.to_string(),
    })?;

    tracing::debug!(tool, program = %program.display(), output = %output.display(), "running external tool");
    let result = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| AuditError::ToolFailed {
            tool: tool.to_string(),
            status: "not started".to_string(),
            stderr: format!("{} ({})", e, program.display()),
        })?;

    if !result.status.success() {
        return Err(AuditError::ToolFailed {
            tool: tool.to_string(),
            status: result.status.to_string(),
            stderr: stderr_tail(&result.stderr),
        }
        .into());
    }
    Ok(())
}

/// Reads a tool's output file back as JSON
pub(crate) fn read_json_output<T: serde::de::DeserializeOwned>(tool: &str, path: &Path) -> Result<T> {
    let malformed = |details: String| -> anyhow::Error {
        AuditError::MalformedToolOutput {
            tool: tool.to_string(),
            path: path.to_path_buf(),
            details,
        }
        .into()
    };

    let content =
        read_bounded_file(path, &format!("{} output", tool)).map_err(|e| malformed(e.to_string()))?;
    if content.trim().is_empty() {
        return Err(malformed("output is empty".to_string()));
    }
    serde_json::from_str(&content).map_err(|e| malformed(e.to_string()))
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return "(no diagnostics on stderr)".to_string();
    }
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
