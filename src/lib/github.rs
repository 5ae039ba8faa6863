use once_cell::sync::Lazy;
use regex::Regex;

use crate::lib::process;

/// What `gh auth switch` prints when the active account changed.
pub const SWITCH_CONFIRMATION: &str = "Switched active account";

static AUTH_ACCOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Logged in to github\.com account\s*(.+?)\s*\(").expect("valid regex")
});

/// The hosting service operations needed to switch accounts and list repositories.
pub trait GithubClient {
    /// Usernames of every account the client is already logged in with.
    fn list_authenticated_accounts(&self) -> Option<Vec<String>>;

    /// Make `username` the active account. Returns whether the client confirmed it.
    fn switch_account(&self, username: &str) -> bool;

    /// Login of the active account.
    fn login(&self) -> Option<String>;

    /// Clone URLs of every repository the active account can access, or only of those
    /// owned by `owner`.
    fn list_repositories(&self, owner: Option<&str>) -> Option<Vec<String>>;
}

/// [`GithubClient`] backed by the `gh` executable.
pub struct GhCli {
    program: String,
}

impl GhCli {
    pub fn new() -> Self {
        Self::with_program("gh")
    }

    /// Use another executable in place of `gh`.
    pub fn with_program<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GhCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GithubClient for GhCli {
    fn list_authenticated_accounts(&self) -> Option<Vec<String>> {
        let output = process::run(&self.program, &["auth", "status"]);

        if !output.success {
            log::error!("`gh auth status` failed: {}", output.stderr);
            return None;
        }

        // Depending on the gh version the status goes to stdout or stderr.
        Some(parse_auth_status(&output.combined()))
    }

    fn switch_account(&self, username: &str) -> bool {
        let output = process::run(&self.program, &["auth", "switch", "--user", username]);

        if !output.success {
            log::error!("`gh auth switch` failed: {}", output.stderr);
            return false;
        }

        output.combined().contains(SWITCH_CONFIRMATION)
    }

    fn login(&self) -> Option<String> {
        let output = process::run(&self.program, &["api", "user", "--jq", ".login"]);

        if output.success && !output.stdout.is_empty() {
            Some(output.stdout)
        } else {
            log::error!("Could not get the github login: {}", output.stderr);
            None
        }
    }

    fn list_repositories(&self, owner: Option<&str>) -> Option<Vec<String>> {
        let query = repositories_query(owner);
        let output = process::run(
            &self.program,
            &["api", "user/repos", "--paginate", "--jq", &query],
        );

        if output.success {
            Some(output.lines())
        } else {
            log::error!("Could not list the repositories: {}", output.stderr);
            None
        }
    }
}

/// Extract the account names from the output of `gh auth status`.
pub fn parse_auth_status(status: &str) -> Vec<String> {
    AUTH_ACCOUNT
        .captures_iter(status)
        .map(|c| c[1].to_string())
        .collect()
}

fn repositories_query(owner: Option<&str>) -> String {
    match owner {
        Some(owner) => format!(
            ".[] | select(.owner.login == \"{}\") | .clone_url",
            owner
        ),
        None => ".[] | .clone_url".into(),
    }
}
