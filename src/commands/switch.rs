use anyhow::Result;
use clap::Args;

use crate::lib::command::Command;
use crate::lib::env::Env;

#[derive(Args)]
pub struct SwitchOpts {
    /// Label of the account preset, asked interactively when omitted.
    #[clap(short, long)]
    pub label: Option<String>,
    /// Also switch the active gh account to the preset's username.
    #[clap(short, long)]
    pub github: bool,
}

impl Command for SwitchOpts {
    fn exec(self, env: &mut Env) -> Result<()> {
        let session = env.session();
        let label = session.resolve_selection(self.label)?;
        let outcome = session.apply_preset(&label)?;

        if outcome.applied {
            println!(
                "Changed git global config account to {}!!",
                outcome.preset.username
            );
        } else {
            println!("Failed to change git config 3:");
        }

        if self.github {
            if session.apply_github_switch(&outcome.preset.username) {
                println!("changed github config!! :3");
            } else {
                println!("Failed to change active github account");
            }
        }

        Ok(())
    }
}
