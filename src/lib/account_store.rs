use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use mkdirp::mkdirp;
use serde::{Deserialize, Deserializer, Serialize};

use crate::lib::utils::same_label;

/// One stored identity preset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountPreset {
    /// The key used to pick this preset, compared case and whitespace insensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

/// Read a `null` string field like a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl AccountPreset {
    pub fn new(label: &str, username: &str, email: &str) -> Self {
        Self {
            label: Some(label.into()),
            username: username.into(),
            email: email.into(),
        }
    }

    /// Returns `true` if this preset is stored under the given label.
    pub fn has_label(&self, label: &str) -> bool {
        same_label(self.label.as_deref(), Some(label))
    }
}

/// The JSON file that keeps the account presets of a user.
///
/// Every operation reads the file again, nothing is cached between calls.
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the accounts file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the accounts file holding an empty list if it doesn't already exist.
    /// Returns `true` if the file was created.
    pub fn ensure_exists(&self) -> anyhow::Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        log::trace!("Creating the accounts file at {:?}", self.path);
        if let Some(parent) = self.path.parent() {
            mkdirp(parent)
                .with_context(|| format!("Could not create the directory {:?}", parent))?;
        }

        fs::write(&self.path, "[]")
            .with_context(|| format!("Could not create the accounts file {:?}", self.path))?;

        Ok(true)
    }

    /// Read every preset in file order. A missing, blank or unreadable file yields an
    /// empty list.
    pub fn load_all(&self) -> Vec<AccountPreset> {
        log::trace!("Loading the account presets from {:?}", self.path);

        if !self.path.exists() {
            if let Err(e) = self.ensure_exists() {
                log::error!("{:#}", e);
            }
            return Vec::new();
        }

        match self.read() {
            Ok(accounts) => accounts,
            Err(e) => {
                log::error!("Invalid accounts file was found.");
                println!("An exception occurred: {:#}", e);
                Vec::new()
            }
        }
    }

    fn read(&self) -> anyhow::Result<Vec<AccountPreset>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Could not read {:?}", self.path))?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Could not parse {:?}", self.path))
    }

    /// Return the first preset stored under `label`.
    pub fn find_by_label(&self, label: &str) -> Option<AccountPreset> {
        self.load_all().into_iter().find(|a| a.has_label(label))
    }

    /// Return the labels of all the presets that have one.
    pub fn list_labels(&self) -> Vec<String> {
        self.load_all()
            .into_iter()
            .filter_map(|a| a.label)
            .collect()
    }

    /// Add a preset, or overwrite the username and email of the preset already stored
    /// under `label`. Returns whether the file was written.
    pub fn upsert(&self, label: &str, username: &str, email: &str) -> bool {
        log::trace!("Saving '{}' <{}> under label '{}'", username, email, label);
        self.upsert_into(self.load_all(), label, username, email)
    }

    fn upsert_into(
        &self,
        mut accounts: Vec<AccountPreset>,
        label: &str,
        username: &str,
        email: &str,
    ) -> bool {
        match accounts.iter_mut().find(|a| a.has_label(label)) {
            Some(account) => {
                log::debug!("Label '{}' already exists, updating it.", label);
                account.username = username.into();
                account.email = email.into();
            }
            None => accounts.push(AccountPreset::new(label, username, email)),
        }

        self.persist(&accounts)
    }

    /// Remove the first preset stored under `label`. Returns `false` if there was none,
    /// in which case the file is left untouched, or if the file could not be written.
    pub fn remove(&self, label: &str) -> bool {
        log::trace!("Removing preset '{}'", label);
        self.remove_from(self.load_all(), label)
    }

    fn remove_from(&self, mut accounts: Vec<AccountPreset>, label: &str) -> bool {
        match accounts.iter().position(|a| a.has_label(label)) {
            Some(index) => {
                accounts.remove(index);
                self.persist(&accounts)
            }
            None => false,
        }
    }

    /// Overwrite the file with the given presets.
    pub fn save_all(&self, accounts: &[AccountPreset]) -> anyhow::Result<()> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        accounts
            .serialize(&mut serializer)
            .context("Could not serialize the account presets.")?;

        fs::write(&self.path, buffer)
            .with_context(|| format!("Failed to write the accounts file {:?}", self.path))
    }

    fn persist(&self, accounts: &[AccountPreset]) -> bool {
        match self.save_all(accounts) {
            Ok(()) => true,
            Err(e) => {
                log::error!("{:#}", e);
                println!("An exception occurred: {:#}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, AccountStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = AccountStore::new(dir.path().join("data").join("accounts.json"));
        (dir, store)
    }

    fn write(store: &AccountStore, value: serde_json::Value) {
        store.ensure_exists().unwrap();
        fs::write(store.path(), value.to_string()).unwrap();
    }

    #[test]
    fn ensure_creates_parent_directories() {
        let (_dir, store) = store();
        assert!(store.ensure_exists().unwrap());
        assert!(store.path().is_file());
        assert!(!store.ensure_exists().unwrap());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "[]");
    }

    #[test]
    fn load_missing_file_creates_it() {
        let (_dir, store) = store();
        assert!(store.load_all().is_empty());
        assert!(store.path().is_file());
    }

    #[test]
    fn load_blank_file_is_empty() {
        let (_dir, store) = store();
        store.ensure_exists().unwrap();
        fs::write(store.path(), "  \n").unwrap();
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn load_invalid_file_is_empty() {
        let (_dir, store) = store();
        store.ensure_exists().unwrap();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load_all().is_empty());
        assert!(store.find_by_label("work").is_none());
    }

    #[test]
    fn find_ignores_case_and_whitespace() {
        let (_dir, store) = store();
        write(
            &store,
            serde_json::json!([{"label": " Work ", "username": "alice", "email": "alice@co.com"}]),
        );

        let found = store.find_by_label("work").unwrap();
        assert_eq!(found.username, "alice");
        assert!(store.find_by_label("WORK  ").is_some());
        assert!(store.find_by_label("home").is_none());
    }

    #[test]
    fn find_first_match_wins() {
        let (_dir, store) = store();
        write(
            &store,
            serde_json::json!([
                {"label": "work", "username": "first", "email": "a@x.com"},
                {"label": "WORK", "username": "second", "email": "b@x.com"}
            ]),
        );
        assert_eq!(store.find_by_label("Work").unwrap().username, "first");
    }

    #[test]
    fn missing_labels_never_match() {
        let (_dir, store) = store();
        write(
            &store,
            serde_json::json!([
                {"username": "nolabel", "email": "n@x.com"},
                {"label": null, "username": "null", "email": "n@x.com"},
                {"label": "home", "username": "bob", "email": "bob@x.com"}
            ]),
        );

        assert_eq!(store.list_labels(), vec!["home".to_string()]);
        assert!(store.find_by_label("").is_none());
        assert!(!store.remove("null"));
        assert_eq!(store.load_all().len(), 3);
    }

    #[test]
    fn add_then_find_with_other_case() {
        let (_dir, store) = store();
        write(&store, serde_json::json!([]));

        assert!(store.upsert("home", "bob", "bob@x.com"));
        assert_eq!(
            store.find_by_label("HOME"),
            Some(AccountPreset::new("home", "bob", "bob@x.com"))
        );
    }

    #[test]
    fn upsert_is_idempotent() {
        let (_dir, store) = store();
        for _ in 0..3 {
            assert!(store.upsert("work", "alice", "alice@co.com"));
        }
        assert!(store.upsert(" WORK", "alice2", "alice2@co.com"));

        let accounts = store.load_all();
        assert_eq!(accounts.len(), 1);
        assert_eq!(
            accounts[0],
            AccountPreset::new("work", "alice2", "alice2@co.com")
        );
    }

    #[test]
    fn upsert_appends_in_order() {
        let (_dir, store) = store();
        store.upsert("work", "alice", "alice@co.com");
        store.upsert("home", "bob", "bob@x.com");
        assert_eq!(store.list_labels(), vec!["work", "home"]);
    }

    #[test]
    fn remove_existing_label() {
        let (_dir, store) = store();
        store.upsert("home", "bob", "bob@x.com");

        assert!(store.remove("home"));
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn remove_unknown_label_leaves_file_untouched() {
        let (_dir, store) = store();
        store.upsert("home", "bob", "bob@x.com");
        let before = fs::read_to_string(store.path()).unwrap();

        assert!(!store.remove("work"));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn save_and_load_keep_order() {
        let (_dir, store) = store();
        store.ensure_exists().unwrap();
        let accounts = vec![
            AccountPreset::new("b", "bob", "bob@x.com"),
            AccountPreset::new("a", "alice", "alice@co.com"),
            AccountPreset::new("c", "carol", "carol@y.org"),
        ];

        store.save_all(&accounts).unwrap();
        assert_eq!(store.load_all(), accounts);
    }

    #[test]
    fn saved_file_uses_four_space_indent() {
        let (_dir, store) = store();
        store.upsert("home", "bob", "bob@x.com");

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("[\n    {\n        \"label\": \"home\""));
    }

    #[test]
    fn upsert_reports_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in place of the file makes every write fail.
        let path = dir.path().join("accounts.json");
        fs::create_dir(&path).unwrap();
        let store = AccountStore::new(path);

        assert!(!store.upsert("home", "bob", "bob@x.com"));
    }

    #[test]
    fn remove_reports_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accounts.json");
        fs::create_dir(&path).unwrap();
        let store = AccountStore::new(path);
        let accounts = vec![
            AccountPreset::new("home", "bob", "bob@x.com"),
            AccountPreset::new("work", "alice", "alice@co.com"),
        ];

        assert!(!store.remove_from(accounts.clone(), "HOME"));
        assert!(!store.remove_from(accounts, "school"));
        assert!(!store.upsert_into(Vec::new(), "home", "bob", "bob@x.com"));
    }

    #[test]
    fn null_fields_do_not_hide_other_presets() {
        let (_dir, store) = store();
        write(
            &store,
            serde_json::json!([
                {"label": "work", "username": "alice", "email": "alice@co.com"},
                {"label": "old", "username": null, "email": null}
            ]),
        );

        let old = store.find_by_label("old").unwrap();
        assert_eq!(old.username, "");
        assert_eq!(old.email, "");

        assert!(store.upsert("home", "bob", "bob@x.com"));
        assert_eq!(store.list_labels(), vec!["work", "old", "home"]);
        assert_eq!(store.find_by_label("work").unwrap().username, "alice");
    }

    #[test]
    fn rewrite_keeps_records_without_label_unlabelled() {
        let (_dir, store) = store();
        write(
            &store,
            serde_json::json!([{"username": "x", "email": "x@x"}]),
        );

        assert!(store.upsert("home", "bob", "bob@x.com"));

        let saved: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(saved[0], serde_json::json!({"username": "x", "email": "x@x"}));
        assert_eq!(saved[1]["label"], "home");
    }
}
