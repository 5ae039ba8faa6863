use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use thiserror::Error;

/// Errors that end the program after the exit countdown.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("No accounts file!!! Could not find or create {0}")]
    StoreMissing(String),
    #[error("Your accounts file doesn't have a user with the label '{0}'!")]
    LabelNotFound(String),
    #[error("Your accounts file doesn't have any accounts yet! Add one with `add LABEL USERNAME EMAIL`.")]
    NoAccounts,
    #[error("No account was chosen.")]
    SelectionCancelled,
}

impl FatalError {
    /// The process exit code reported for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            FatalError::StoreMissing(_) => -1,
            FatalError::LabelNotFound(_) | FatalError::NoAccounts => -2,
            FatalError::SelectionCancelled => 1,
        }
    }
}

/// Print a countdown, one line per tick, from `seconds` down to 1.
pub fn countdown<W: Write>(out: &mut W, seconds: u64, tick: Duration) -> io::Result<()> {
    writeln!(out, "------------------")?;
    writeln!(out, "exiting in")?;

    for second in (1..=seconds).rev() {
        writeln!(out, "{}...", second)?;
        out.flush()?;
        thread::sleep(tick);
    }

    writeln!(out, "exiting!")?;
    writeln!(out, "------------------")?;
    Ok(())
}

/// Run the countdown on stdout and terminate the process with `code`.
pub fn exit_program(seconds: u64, code: i32) -> ! {
    log::trace!("Exiting with code {} after {}s", code, seconds);
    let stdout = io::stdout();
    let _ = countdown(&mut stdout.lock(), seconds, Duration::from_secs(1));
    std::process::exit(code)
}
