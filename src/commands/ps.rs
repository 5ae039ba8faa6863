use anyhow::Result;
use clap::Args;
use console::style;

use crate::lib::command::Command;
use crate::lib::env::Env;

#[derive(Args)]
pub struct PsOpts {
    /// Only show the account preset with this label.
    #[clap(short, long)]
    pub label: Option<String>,
}

impl Command for PsOpts {
    fn exec(self, env: &mut Env) -> Result<()> {
        let entries = env.session().status(self.label.as_deref());

        if entries.is_empty() {
            println!("Sorry! 3: Couldn't find anything..");
            return Ok(());
        }

        for entry in entries {
            let label = entry.preset.label.unwrap_or_default();
            if entry.active {
                println!("{}", style(label).green());
            } else {
                println!("{}", label);
            }
            println!("\t{}", entry.preset.username);
            println!("\t{}", entry.preset.email);
        }

        Ok(())
    }
}
