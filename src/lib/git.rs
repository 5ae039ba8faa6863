use crate::lib::process;

pub const USER_NAME: &str = "user.name";
pub const USER_EMAIL: &str = "user.email";

/// Access to git's global configuration.
pub trait GitConfig {
    /// Read a global configuration value, `None` if unset or if git failed.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a global configuration value. Returns whether git succeeded.
    fn set(&self, key: &str, value: &str) -> bool;
}

/// [`GitConfig`] backed by the `git` executable.
pub struct Git {
    program: String,
}

impl Git {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use another executable in place of `git`.
    pub fn with_program<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Git {
    fn default() -> Self {
        Self::new()
    }
}

impl GitConfig for Git {
    fn get(&self, key: &str) -> Option<String> {
        let output = process::run(&self.program, &["config", "--global", key]);

        if output.success && !output.stdout.is_empty() {
            Some(output.stdout)
        } else {
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> bool {
        let output = process::run(&self.program, &["config", "--global", key, value]);

        if !output.success {
            log::error!("Failed to set {}: {}", key, output.stderr);
        }

        output.success
    }
}
