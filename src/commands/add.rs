use anyhow::Result;
use clap::Args;

use crate::lib::command::Command;
use crate::lib::env::Env;

#[derive(Args)]
pub struct AddOpts {
    /// Label of the account preset.
    pub label: String,
    /// The git user.name of the account.
    pub username: String,
    /// The git user.email of the account.
    pub email: String,
}

impl Command for AddOpts {
    fn exec(self, env: &mut Env) -> Result<()> {
        if env.store().upsert(&self.label, &self.username, &self.email) {
            println!(
                "Added user: {} under label: {}!! :3 ",
                self.username, self.label
            );
        } else {
            println!("Couldn't add user... 3:");
        }
        Ok(())
    }
}
