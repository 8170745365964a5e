//! External command invocation with captured output
//!
//! Every handler that shells out goes through [`run`], so subprocess output
//! never interleaves with the engine's own progress lines. Output is kept and
//! the stderr tail is folded into the error on non-zero exit.

use std::process::Command;

use crate::error::{BotstrapError, Result};

/// How many trailing stderr lines to carry into a `CommandFailed` error
const STDERR_TAIL_LINES: usize = 5;

/// Run an external command to completion, capturing stdout and stderr.
///
/// Returns the captured stdout on success. A non-zero exit becomes a
/// `CommandFailed` carrying the exit status and the tail of stderr; a spawn
/// failure (typically: binary not on PATH) becomes `CommandUnavailable`.
pub fn run(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program).args(args).output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BotstrapError::CommandUnavailable {
                command: program.to_string(),
            }
        } else {
            BotstrapError::CommandFailed {
                command: program.to_string(),
                reason: e.to_string(),
            }
        }
    })?;

    if !output.status.success() {
        return Err(BotstrapError::CommandFailed {
            command: format!("{} {}", program, args.join(" ")),
            reason: describe_failure(output.status, &output.stderr),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Check whether a command can be spawned at all
pub fn is_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .output()
        .map(|_| true)
        .unwrap_or(false)
}

fn describe_failure(status: std::process::ExitStatus, stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    let tail: Vec<&str> = stderr
        .lines()
        .rev()
        .take(STDERR_TAIL_LINES)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    if tail.is_empty() {
        format!("{status}")
    } else {
        format!("{status}: {}", tail.join(" | "))
    }
}
