use crate::error::SystemError;
use std::path::Path;
use std::process::Command;

/// Captured result of a shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Trimmed stdout lines.
    pub stdout: Vec<String>,
    pub stderr: String,
    /// Exit code, `None` when killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Exit code zero and nothing on stderr.
    pub fn success(&self) -> bool {
        self.code == Some(0) && self.stderr.trim().is_empty()
    }
}

/// Runs local shell commands through `sh -c`.
///
/// Commands and responses are traced at info level, or at debug level for
/// a silent runner.
#[derive(Debug, Default, Copy, Clone)]
pub struct Runner {
    silent: bool,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// A runner tracing at debug level only.
    pub fn silent() -> Self {
        Self { silent: true }
    }

    fn trace(&self, message: &str) {
        if self.silent {
            tracing::debug!("{message}");
        } else {
            tracing::info!("{message}");
        }
    }

    /// Runs `cmd` and captures its output whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if the shell cannot be started.
    pub fn run(&self, cmd: &str) -> Result<CommandOutput, SystemError> {
        let mut command = Command::new("sh");
        command.arg("-c").arg(cmd);
        self.capture(cmd, &mut command)
    }

    /// Runs `cmd` and returns its stdout lines, failing on any error sign.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be started, the command exits
    /// non-zero, or it writes to stderr.
    pub fn run_checked(&self, cmd: &str) -> Result<Vec<String>, SystemError> {
        let output = self.run(cmd)?;
        checked(cmd, output)
    }

    /// Like [`Runner::run_checked`], but executes `program` directly with
    /// `args`, no shell involved.
    ///
    /// # Errors
    ///
    /// Same as [`Runner::run_checked`].
    pub fn exec_checked(&self, program: &Path, args: &[&str]) -> Result<Vec<String>, SystemError> {
        let label = std::iter::once(program.display().to_string())
            .chain(args.iter().map(|arg| (*arg).to_string()))
            .collect::<Vec<_>>()
            .join(" ");

        let mut command = Command::new(program);
        command.args(args);
        let output = self.capture(&label, &mut command)?;
        checked(&label, output)
    }

    fn capture(&self, label: &str, command: &mut Command) -> Result<CommandOutput, SystemError> {
        self.trace(&format!("Running command: {label:?}"));

        let output = command.output().map_err(|source| SystemError::Spawn {
            command: label.to_string(),
            source,
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| line.trim().to_string())
            .collect::<Vec<_>>();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        self.trace(&format!("Got response: {:?}", stdout.join(" ").trim()));

        Ok(CommandOutput {
            stdout,
            stderr,
            code: output.status.code(),
        })
    }
}

fn checked(label: &str, output: CommandOutput) -> Result<Vec<String>, SystemError> {
    if !output.success() {
        tracing::error!(
            "Return code: {:?}, STDERR: {:?} running {label:?}",
            output.code,
            output.stderr.trim()
        );
        return Err(SystemError::Command {
            command: label.to_string(),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        });
    }

    Ok(output.stdout)
}
