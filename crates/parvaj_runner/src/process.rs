//! Blocking process execution with captured output.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::RunnerError;

/// Finds `name` on `PATH`.
pub fn find_executable(name: &str) -> Result<PathBuf, RunnerError> {
    which::which(name).map_err(|_| RunnerError::ExecutableNotFound {
        name: name.to_string(),
    })
}

/// Runs `program` with `args` to completion and returns its stdout.
///
/// There is no timeout. A non-zero exit fails with
/// [`RunnerError::ProcessFailed`] carrying stderr, or stdout when stderr is
/// empty.
pub fn run<I, S>(program: &Path, args: I) -> Result<String, RunnerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args);
    debug!("running {command:?}");

    let name = program_name(program);
    let output = command.output().map_err(|e| RunnerError::Spawn {
        program: name.clone(),
        source: e,
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if output.status.success() {
        return Ok(stdout);
    }

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let output_text = if stderr.trim().is_empty() { stdout } else { stderr };
    Err(RunnerError::ProcessFailed {
        program: name,
        code: output.status.code(),
        output: output_text.trim_end().to_string(),
    })
}

fn program_name(program: &Path) -> String {
    program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .into_owned()
}
