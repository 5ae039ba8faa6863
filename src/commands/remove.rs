use anyhow::Result;
use clap::Args;

use crate::lib::command::Command;
use crate::lib::env::Env;

#[derive(Args)]
pub struct RemoveOpts {
    /// Label of the account preset to be removed.
    pub label: String,
}

impl Command for RemoveOpts {
    fn exec(self, env: &mut Env) -> Result<()> {
        if env.store().remove(&self.label) {
            println!("Removed user from config: {}", self.label);
        } else {
            println!("Couldn't remove label... 3:");
        }
        Ok(())
    }
}
