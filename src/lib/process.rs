use std::io;
use std::process::{Command, Output};

/// The captured result of running an external program.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            exit_code: output.status.code(),
        }
    }

    pub fn from_error(error: io::Error) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: error.to_string(),
            exit_code: None,
        }
    }

    /// Stdout followed by stderr, for tools that report on either stream.
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => format!("{}\n{}", self.stdout, self.stderr),
        }
    }

    /// Non-empty stdout lines.
    pub fn lines(&self) -> Vec<String> {
        self.stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect()
    }
}

/// Run `program` with `args` and wait for it to exit. The arguments are handed to the
/// program directly, without a shell.
pub fn run(program: &str, args: &[&str]) -> CommandOutput {
    log::debug!("Running `{} {}`", program, args.join(" "));

    let output = match Command::new(program).args(args).output() {
        Ok(output) => CommandOutput::from_output(output),
        Err(e) => CommandOutput::from_error(e),
    };

    log::trace!(
        "`{}` exited with {:?}, stdout: {:?}, stderr: {:?}",
        program,
        output.exit_code,
        output.stdout,
        output.stderr
    );

    output
}
