//! Apply account presets to git and gh.

use std::collections::BTreeSet;

use anyhow::Result;

use crate::lib::account_store::{AccountPreset, AccountStore};
use crate::lib::exit::FatalError;
use crate::lib::git::{self, GitConfig};
use crate::lib::github::GithubClient;
use crate::lib::prompt::Prompt;

/// The git identity that is currently configured globally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    /// Returns `true` if `preset` carries exactly this username and email.
    pub fn matches(&self, preset: &AccountPreset) -> bool {
        self.username.as_deref() == Some(preset.username.as_str())
            && self.email.as_deref() == Some(preset.email.as_str())
    }
}

/// Which repositories to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoFilter {
    /// Repositories owned by the active account.
    Owned,
    /// Repositories the active account can access but doesn't own.
    Shared,
    /// Owned repositories followed by shared ones, or every repository sorted when the
    /// active login is unknown.
    All,
}

/// The result of applying a preset to git.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub preset: AccountPreset,
    /// Both the username and the email were written.
    pub applied: bool,
}

/// One line of the status listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub preset: AccountPreset,
    /// The preset is the current git identity.
    pub active: bool,
}

pub struct Session<G, H, P> {
    store: AccountStore,
    git: G,
    github: H,
    prompt: P,
}

impl<G, H, P> Session<G, H, P>
where
    G: GitConfig,
    H: GithubClient,
    P: Prompt,
{
    pub fn new(store: AccountStore, git: G, github: H, prompt: P) -> Self {
        Self {
            store,
            git,
            github,
            prompt,
        }
    }

    pub fn store(&self) -> &AccountStore {
        &self.store
    }

    /// Return the explicit label, or ask the user to pick one of the stored labels.
    pub fn resolve_selection(&self, explicit_label: Option<String>) -> Result<String> {
        if let Some(label) = explicit_label {
            return Ok(label);
        }

        let mut labels = self.store.list_labels();
        if labels.is_empty() {
            return Err(FatalError::NoAccounts.into());
        }

        match self.prompt.select("Choose an account!", &labels)? {
            Some(index) if index < labels.len() => Ok(labels.swap_remove(index)),
            _ => Err(FatalError::SelectionCancelled.into()),
        }
    }

    /// Write the username and email of the preset stored under `label` to git's global
    /// configuration. Fails with [`FatalError::LabelNotFound`] when there is no such preset.
    pub fn apply_preset(&self, label: &str) -> Result<SwitchOutcome> {
        let preset = self
            .store
            .find_by_label(label)
            .ok_or_else(|| FatalError::LabelNotFound(label.to_string()))?;

        log::trace!("Applying preset {:?}", preset);
        let username_set = self.git.set(git::USER_NAME, &preset.username);
        let email_set = self.git.set(git::USER_EMAIL, &preset.email);

        Ok(SwitchOutcome {
            preset,
            applied: username_set && email_set,
        })
    }

    /// Make `username` the active gh account if gh is already logged in with it.
    pub fn apply_github_switch(&self, username: &str) -> bool {
        let accounts = match self.github.list_authenticated_accounts() {
            Some(accounts) => accounts,
            None => return false,
        };

        let target = username.to_lowercase();
        match accounts.iter().find(|a| a.to_lowercase() == target) {
            Some(account) => {
                log::debug!("Switching gh to account '{}'", account);
                self.github.switch_account(account)
            }
            None => {
                log::warn!(
                    "gh is not logged in with '{}', logged in accounts: {:?}",
                    username,
                    accounts
                );
                false
            }
        }
    }

    /// The current global git identity.
    pub fn current_identity(&self) -> Identity {
        Identity {
            username: self.git.get(git::USER_NAME),
            email: self.git.get(git::USER_EMAIL),
        }
    }

    /// List clone URLs, `None` if gh failed.
    pub fn list_repositories(&self, filter: RepoFilter) -> Option<Vec<String>> {
        match filter {
            RepoFilter::Owned => self.owned_repositories().map(|r| r.into_iter().collect()),
            RepoFilter::Shared => {
                let owned = self.owned_repositories()?;
                Some(self.shared_repositories(&owned)?)
            }
            RepoFilter::All => {
                let owned = match self.owned_repositories() {
                    Some(owned) => owned,
                    None => {
                        log::warn!("Could not tell owned repositories apart, listing all.");
                        return self.all_repositories().map(|r| r.into_iter().collect());
                    }
                };
                let shared = self.shared_repositories(&owned)?;

                let mut repos: Vec<String> = owned.into_iter().collect();
                repos.extend(shared);
                Some(repos)
            }
        }
    }

    fn owned_repositories(&self) -> Option<BTreeSet<String>> {
        let login = self.github.login()?;
        let owned = self.github.list_repositories(Some(&login))?;
        Some(owned.into_iter().collect())
    }

    fn all_repositories(&self) -> Option<BTreeSet<String>> {
        Some(self.github.list_repositories(None)?.into_iter().collect())
    }

    fn shared_repositories(&self, owned: &BTreeSet<String>) -> Option<Vec<String>> {
        let all = self.all_repositories()?;
        Some(all.difference(owned).cloned().collect())
    }

    /// Every labelled preset, or only the one stored under `filter_label`, flagged with
    /// whether it is the current git identity.
    pub fn status(&self, filter_label: Option<&str>) -> Vec<StatusEntry> {
        let current = self.current_identity();

        self.store
            .load_all()
            .into_iter()
            .filter(|p| p.label.is_some())
            .filter(|p| filter_label.map_or(true, |label| p.has_label(label)))
            .map(|preset| StatusEntry {
                active: current.matches(&preset),
                preset,
            })
            .collect()
    }
}
