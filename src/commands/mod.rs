use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::lib::command::Command;
use crate::lib::env::Env;
use switch::SwitchOpts;

mod add;
mod config;
mod ps;
mod remove;
mod repos;
mod switch;

/// Switch the global git identity, and the active gh account, between saved presets.
#[derive(Parser)]
#[clap(version)]
pub struct App {
    /// A level of verbosity, can be used multiple times.
    #[clap(short, long, global = true, parse(from_occurrences))]
    pub verbose: u64,
    /// Use this accounts file instead of the one in the user's data directory.
    #[clap(long, global = true, env = "GIT_ACCOUNT_SWITCH_STORE")]
    pub store: Option<PathBuf>,
    /// Seconds to count down before exiting on a fatal error.
    #[clap(
        long,
        global = true,
        env = "GIT_ACCOUNT_SWITCH_COUNTDOWN",
        default_value = "5"
    )]
    pub countdown: u64,
    /// Switching options used when no subcommand is given.
    #[clap(flatten)]
    pub switch: switch::SwitchOpts,
    #[clap(subcommand)]
    pub sub: Option<AppSubCommands>,
}

#[derive(Subcommand)]
pub enum AppSubCommands {
    /// Apply an account preset to the global git config.
    Switch(switch::SwitchOpts),
    /// Add an account preset, or update the one with the same label.
    Add(add::AddOpts),
    /// Remove an account preset.
    Remove(remove::RemoveOpts),
    /// Print the location of the accounts file.
    Config(config::ConfigOpts),
    /// Print the account presets, highlighting the active one.
    Ps(ps::PsOpts),
    /// List the repositories of the active gh account.
    Repos(repos::ReposOpts),
}

impl App {
    /// `--label` and `--github` before a subcommand only make sense for `switch`.
    fn check_switch_args(&self) -> Result<()> {
        let switch_args = self.switch.label.is_some() || self.switch.github;

        match &self.sub {
            Some(AppSubCommands::Switch(_)) | None => Ok(()),
            Some(_) if switch_args => {
                bail!("--label and --github can only be used when switching accounts.")
            }
            Some(_) => Ok(()),
        }
    }
}

impl Command for App {
    fn exec(self, env: &mut Env) -> Result<()> {
        self.check_switch_args()?;

        match self.sub {
            Some(AppSubCommands::Switch(opts)) => SwitchOpts {
                label: opts.label.or(self.switch.label),
                github: opts.github || self.switch.github,
            }
            .exec(env),
            Some(sub) => sub.exec(env),
            None => self.switch.exec(env),
        }
    }
}

impl Command for AppSubCommands {
    fn exec(self, env: &mut Env) -> Result<()> {
        match self {
            AppSubCommands::Switch(opts) => opts.exec(env),
            AppSubCommands::Add(opts) => opts.exec(env),
            AppSubCommands::Remove(opts) => opts.exec(env),
            AppSubCommands::Config(opts) => opts.exec(env),
            AppSubCommands::Ps(opts) => opts.exec(env),
            AppSubCommands::Repos(opts) => opts.exec(env),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        App::command().debug_assert();
    }

    #[test]
    fn no_subcommand_switches() {
        let app = App::try_parse_from(["git-account-switch", "-l", "work", "-g"]).unwrap();
        assert!(app.sub.is_none());
        assert_eq!(app.switch.label.as_deref(), Some("work"));
        assert!(app.switch.github);
    }

    #[test]
    fn parse_add() {
        let app =
            App::try_parse_from(["git-account-switch", "add", "home", "bob", "bob@x.com"])
                .unwrap();
        match app.sub {
            Some(AppSubCommands::Add(opts)) => {
                assert_eq!(opts.label, "home");
                assert_eq!(opts.username, "bob");
                assert_eq!(opts.email, "bob@x.com");
            }
            _ => panic!("expected the add command"),
        }
    }

    #[test]
    fn parse_repos_flags() {
        let app = App::try_parse_from(["git-account-switch", "repos", "-o", "-s"]).unwrap();
        match app.sub {
            Some(AppSubCommands::Repos(opts)) => {
                assert!(opts.owned && opts.shared && !opts.all);
            }
            _ => panic!("expected the repos command"),
        }
    }

    #[test]
    fn switch_args_only_before_switch() {
        let app =
            App::try_parse_from(["git-account-switch", "-l", "work", "add", "a", "b", "c"])
                .unwrap();
        assert!(app.check_switch_args().is_err());

        let app = App::try_parse_from(["git-account-switch", "-g", "ps"]).unwrap();
        assert!(app.check_switch_args().is_err());

        let app = App::try_parse_from(["git-account-switch", "-l", "work", "switch", "-g"])
            .unwrap();
        assert!(app.check_switch_args().is_ok());

        let app = App::try_parse_from(["git-account-switch", "-v", "ps"]).unwrap();
        assert!(app.check_switch_args().is_ok());
    }

    #[test]
    fn parse_global_options() {
        let app = App::try_parse_from([
            "git-account-switch",
            "-vv",
            "ps",
            "--countdown",
            "0",
            "--store",
            "/tmp/accounts.json",
        ])
        .unwrap();
        assert_eq!(app.countdown, 0);
        assert_eq!(app.store, Some(PathBuf::from("/tmp/accounts.json")));
        assert_eq!(app.verbose, 2);
    }
}
