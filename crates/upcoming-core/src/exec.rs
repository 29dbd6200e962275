//! Command execution seam.
//!
//! Every git invocation goes through [`CommandExecutor`]. The real
//! implementation shells out with [`std::process::Command`] so we inherit the
//! user's credentials and git configuration; tests swap in
//! [`ScriptedExecutor`], which replays canned output without a git binary.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::process::{Command, Stdio};

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors raised before a command produces an exit status.
#[derive(Error, Debug)]
pub enum ExecError {
    /// The process could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The wait for the process was interrupted.
    #[error("interrupted while waiting for {program}")]
    Interrupted {
        /// Program that was running.
        program: String,
    },
}

/// Result alias for command execution.
pub type ExecResult<T> = Result<T, ExecError>;

/// Exit status and captured output of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal.
    pub exit_code: Option<i32>,
    /// Captured stdout, one entry per line, in emission order.
    pub lines: Vec<String>,
    /// Captured stderr, trimmed.
    pub stderr: String,
}

impl CommandOutput {
    /// Successful output with the given stdout lines.
    pub fn success<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exit_code: Some(0),
            lines: lines.into_iter().map(Into::into).collect(),
            stderr: String::new(),
        }
    }

    /// Failed output with the given exit code and stderr.
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(exit_code),
            lines: Vec::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the command exited with status zero.
    pub const fn is_success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

/// Runs a command line and blocks until it exits.
pub trait CommandExecutor {
    /// Run `program` with `args` in `working_dir`, capturing stdout.
    ///
    /// A non-zero exit is *not* an error at this level; callers inspect
    /// [`CommandOutput::exit_code`].
    fn run(&self, program: &str, args: &[String], working_dir: &Utf8Path)
    -> ExecResult<CommandOutput>;
}

/// Executes commands as real child processes.
///
/// [`Command::output`] retries `EINTR` on its own, so a Ctrl-C normally
/// shows up as a child killed by the signal: an output with
/// `exit_code: None`, which git callers report as
/// [`CommandFailure::ExitStatus`](crate::error::CommandFailure::ExitStatus)
/// with no code. [`ExecError::Interrupted`] only covers an `Interrupted`
/// error that still escapes the spawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    #[instrument(skip(self))]
    fn run(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Utf8Path,
    ) -> ExecResult<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| {
                if source.kind() == io::ErrorKind::Interrupted {
                    ExecError::Interrupted {
                        program: program.to_string(),
                    }
                } else {
                    ExecError::Spawn {
                        program: program.to_string(),
                        source,
                    }
                }
            })?;

        let lines: Vec<String> = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_string)
            .collect();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let exit_code = output.status.code();

        debug!(?exit_code, line_count = lines.len(), "command finished");
        Ok(CommandOutput {
            exit_code,
            lines,
            stderr,
        })
    }
}

/// A recorded call to [`ScriptedExecutor::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name.
    pub program: String,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Working directory.
    pub working_dir: Utf8PathBuf,
}

#[derive(Debug, Clone)]
enum Scripted {
    Output(CommandOutput),
    SpawnFailure,
    Interrupted,
}

/// In-memory executor that replays scripted results.
///
/// Results are keyed by the first argument (the git subcommand, e.g.
/// `"fetch"`, `"for-each-ref"`, `"log"`). Unscripted subcommands fail to
/// spawn with [`io::ErrorKind::NotFound`].
///
/// ```
/// use camino::Utf8Path;
/// use upcoming_core::exec::{CommandExecutor, CommandOutput, ScriptedExecutor};
///
/// let executor = ScriptedExecutor::new()
///     .with_output("log", CommandOutput::success(["fix: typo"]));
/// let output = executor
///     .run("git", &["log".to_string()], Utf8Path::new("."))
///     .unwrap();
/// assert_eq!(output.lines, vec!["fix: typo"]);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    scripts: HashMap<String, Scripted>,
    invocations: RefCell<Vec<Invocation>>,
}

impl ScriptedExecutor {
    /// Create an executor with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `subcommand` with `output`.
    pub fn with_output(mut self, subcommand: &str, output: CommandOutput) -> Self {
        self.scripts
            .insert(subcommand.to_string(), Scripted::Output(output));
        self
    }

    /// Make `subcommand` fail to start.
    pub fn with_spawn_failure(mut self, subcommand: &str) -> Self {
        self.scripts
            .insert(subcommand.to_string(), Scripted::SpawnFailure);
        self
    }

    /// Make the wait on `subcommand` be interrupted.
    pub fn with_interruption(mut self, subcommand: &str) -> Self {
        self.scripts
            .insert(subcommand.to_string(), Scripted::Interrupted);
        self
    }

    /// Every call made so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// The subcommands called so far, in order.
    pub fn subcommands(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .filter_map(|call| call.args.first().cloned())
            .collect()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn run(
        &self,
        program: &str,
        args: &[String],
        working_dir: &Utf8Path,
    ) -> ExecResult<CommandOutput> {
        self.invocations.borrow_mut().push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
            working_dir: working_dir.to_path_buf(),
        });

        let subcommand = args.first().map(String::as_str).unwrap_or_default();
        match self.scripts.get(subcommand) {
            Some(Scripted::Output(output)) => Ok(output.clone()),
            Some(Scripted::Interrupted) => Err(ExecError::Interrupted {
                program: program.to_string(),
            }),
            Some(Scripted::SpawnFailure) | None => Err(ExecError::Spawn {
                program: program.to_string(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no scripted output for `{program} {subcommand}`"),
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn system_executor_captures_lines_and_exit_code() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        if cfg!(unix) {
            let output = SystemExecutor
                .run("sh", &args(&["-c", "printf 'a\\nb\\n'; exit 3"]), &dir)
                .unwrap();
            assert_eq!(output.lines, vec!["a", "b"]);
            assert_eq!(output.exit_code, Some(3));
            assert!(!output.is_success());
        }
    }

    #[test]
    fn system_executor_reports_signal_death_without_exit_code() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        if cfg!(unix) {
            let output = SystemExecutor
                .run("sh", &args(&["-c", "kill -KILL $$"]), &dir)
                .unwrap();
            assert_eq!(output.exit_code, None);
            assert!(!output.is_success());
        }
    }

    #[test]
    fn system_executor_reports_missing_program() {
        let result = SystemExecutor.run(
            "upcoming-definitely-not-a-real-binary",
            &[],
            Utf8Path::new("."),
        );
        assert!(matches!(result, Err(ExecError::Spawn { .. })));
    }

    #[test]
    fn scripted_executor_replays_by_subcommand() {
        let executor = ScriptedExecutor::new()
            .with_output("for-each-ref", CommandOutput::success(["v1.0.0"]))
            .with_output("fetch", CommandOutput::failure(1, "no remote"));

        let listed = executor
            .run("git", &args(&["for-each-ref"]), Utf8Path::new("/repo"))
            .unwrap();
        assert_eq!(listed.lines, vec!["v1.0.0"]);

        let fetched = executor
            .run("git", &args(&["fetch", "origin"]), Utf8Path::new("/repo"))
            .unwrap();
        assert_eq!(fetched.exit_code, Some(1));
        assert_eq!(fetched.stderr, "no remote");

        assert_eq!(executor.subcommands(), vec!["for-each-ref", "fetch"]);
        assert_eq!(executor.invocations()[1].working_dir, "/repo");
    }

    #[test]
    fn scripted_executor_unscripted_subcommand_fails_to_spawn() {
        let executor = ScriptedExecutor::new();
        let result = executor.run("git", &args(&["log"]), Utf8Path::new("."));
        assert!(matches!(result, Err(ExecError::Spawn { .. })));
    }

    #[test]
    fn scripted_executor_interruption() {
        let executor = ScriptedExecutor::new().with_interruption("fetch");
        let result = executor.run("git", &args(&["fetch"]), Utf8Path::new("."));
        assert!(matches!(result, Err(ExecError::Interrupted { .. })));
    }
}
