//! A narrow capability for invoking the external contract toolchain, so the
//! pipeline stages can be exercised in tests without real tool installs.

use std::{
    path::PathBuf,
    process::{Command, Stdio},
};

use tracing::info;

use crate::errors::ScriptError;

/// Outcome of one external tool invocation
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    /// Captured standard output, present only when capture was requested
    pub stdout: Option<String>,
}

impl CommandOutput {
    /// Whether the invocation exited cleanly
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Executes external commands on behalf of the pipeline stages
pub trait ProcessRunner {
    /// Execute `program` with `args`, blocking until it exits. Standard error
    /// is always passed through; standard output is captured when
    /// `capture_stdout` is set and passed through otherwise. Returns an error
    /// only when the process could not be launched.
    fn execute(
        &self,
        program: &str,
        args: &[&str],
        capture_stdout: bool,
    ) -> Result<CommandOutput, ScriptError>;
}

/// A [`ProcessRunner`] backed by [`std::process::Command`], running every
/// command from the project root
pub struct ShellRunner {
    /// Working directory for every invocation
    project_dir: PathBuf,
}

impl ShellRunner {
    /// Create a runner executing commands from `project_dir`
    pub fn new(project_dir: PathBuf) -> Self {
        Self { project_dir }
    }
}

impl ProcessRunner for ShellRunner {
    fn execute(
        &self,
        program: &str,
        args: &[&str],
        capture_stdout: bool,
    ) -> Result<CommandOutput, ScriptError> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(&self.project_dir)
            .stderr(Stdio::inherit());

        if capture_stdout {
            let output = cmd
                .output()
                .map_err(|e| ScriptError::CommandSpawn(format!("{}: {}", program, e)))?;
            Ok(CommandOutput {
                code: output.status.code(),
                stdout: Some(String::from_utf8_lossy(&output.stdout).into_owned()),
            })
        } else {
            cmd.stdout(Stdio::inherit());
            let status = cmd
                .status()
                .map_err(|e| ScriptError::CommandSpawn(format!("{}: {}", program, e)))?;
            Ok(CommandOutput {
                code: status.code(),
                stdout: None,
            })
        }
    }
}

/// Render a command line for logs and error messages
fn render(program: &str, args: &[&str]) -> String {
    let mut line = String::from(program);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Executes a command, returning an error if the command fails
pub fn run_checked(
    runner: &dyn ProcessRunner,
    program: &str,
    args: &[&str],
) -> Result<(), ScriptError> {
    info!("Running command: {}", render(program, args));
    let output = runner.execute(program, args, false)?;
    if output.success() {
        Ok(())
    } else {
        Err(ScriptError::CommandFailed {
            command: render(program, args),
            code: output.code,
        })
    }
}

/// Executes a command and captures its standard output, returning an error if
/// the command fails
pub fn run_captured(
    runner: &dyn ProcessRunner,
    program: &str,
    args: &[&str],
) -> Result<String, ScriptError> {
    info!("Running command: {}", render(program, args));
    let output = runner.execute(program, args, true)?;
    if output.success() {
        Ok(output.stdout.unwrap_or_default())
    } else {
        Err(ScriptError::CommandFailed {
            command: render(program, args),
            code: output.code,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_checked_maps_nonzero_exit_to_command_failed() {
        let runner = fake::FakeRunner::new().fail_on("contract build");
        let err = run_checked(&runner, "stellar", &["contract", "build"]).unwrap_err();
        match err {
            ScriptError::CommandFailed { command, code } => {
                assert_eq!(command, "stellar contract build");
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn run_captured_returns_scripted_stdout() {
        let runner = fake::FakeRunner::new().output_for("contract deploy", "CABC123\n");
        let out = run_captured(&runner, "stellar", &["contract", "deploy"]).unwrap();
        assert_eq!(out, "CABC123\n");
    }
}
