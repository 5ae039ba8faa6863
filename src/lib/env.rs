use std::path::PathBuf;

use anyhow::Result;
use dirs::data_dir;

use crate::lib::account_store::AccountStore;
use crate::lib::exit::FatalError;
use crate::lib::git::Git;
use crate::lib::github::GhCli;
use crate::lib::prompt::TerminalPrompt;
use crate::lib::session::Session;

pub static APP_NAME: &str = "git-account-switch";
pub static ACCOUNTS_FILE: &str = "accounts.json";

pub type CliSession = Session<Git, GhCli, TerminalPrompt>;

pub struct Env {
    session: CliSession,
}

impl Env {
    /// Create a new env using the accounts file at `store_path`, or the default one in
    /// the user's data directory.
    pub fn new(store_path: Option<PathBuf>) -> Result<Self> {
        let path = match store_path {
            Some(path) => path,
            None => default_store_path()?,
        };

        log::trace!("Using the accounts file {:?}", path);
        let store = AccountStore::new(path);
        if let Err(e) = store.ensure_exists() {
            log::error!("{:#}", e);
            return Err(FatalError::StoreMissing(store.path().display().to_string()).into());
        }

        Ok(Self {
            session: Session::new(store, Git::new(), GhCli::new(), TerminalPrompt),
        })
    }

    /// Return the session that applies presets with the real git and gh.
    pub fn session(&self) -> &CliSession {
        &self.session
    }

    /// Return the accounts store.
    pub fn store(&self) -> &AccountStore {
        self.session.store()
    }
}

/// `<data dir>/git-account-switch/accounts.json`
pub fn default_store_path() -> Result<PathBuf> {
    let data = data_dir().ok_or_else(|| {
        FatalError::StoreMissing("the data directory of the current user".into())
    })?;

    Ok(data.join(APP_NAME).join(ACCOUNTS_FILE))
}
