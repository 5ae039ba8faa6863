use anyhow::Result;

use crate::lib::env::Env;

pub trait Command {
    /// Execute the command.
    fn exec(self, env: &mut Env) -> Result<()>;
}
