use anyhow::Result;
use clap::Args;

use crate::lib::command::Command;
use crate::lib::env::Env;

#[derive(Args)]
pub struct ConfigOpts {}

impl Command for ConfigOpts {
    fn exec(self, env: &mut Env) -> Result<()> {
        println!("Data is located under: {}", env.store().path().display());
        Ok(())
    }
}
