use anyhow::Result;
use clap::Args;

use crate::lib::command::Command;
use crate::lib::env::Env;
use crate::lib::session::RepoFilter;

#[derive(Args)]
pub struct ReposOpts {
    /// List every repository, this is the default.
    #[clap(short, long)]
    pub all: bool,
    /// List the repositories owned by the active account.
    #[clap(short, long)]
    pub owned: bool,
    /// List the repositories shared with the active account.
    #[clap(short, long)]
    pub shared: bool,
}

impl ReposOpts {
    fn filter(&self) -> RepoFilter {
        match (self.all, self.owned, self.shared) {
            (false, true, false) => RepoFilter::Owned,
            (false, false, true) => RepoFilter::Shared,
            _ => RepoFilter::All,
        }
    }
}

impl Command for ReposOpts {
    fn exec(self, env: &mut Env) -> Result<()> {
        let filter = self.filter();
        log::debug!("Listing {:?} repositories", filter);

        match env.session().list_repositories(filter) {
            Some(repos) if !repos.is_empty() => {
                for repo in repos {
                    println!("{}", repo);
                }
            }
            _ => println!("No repos to display!"),
        }

        Ok(())
    }
}
