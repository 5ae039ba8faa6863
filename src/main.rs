use anyhow::Result;
use clap::Parser;
use human_panic::setup_panic;
use log::LevelFilter;
use pretty_env_logger::formatted_builder;

use crate::lib::command::Command;
use crate::lib::env::Env;
use crate::lib::exit::{exit_program, FatalError};

mod commands;
mod lib;

fn main() -> Result<()> {
    setup_panic!();

    let opts: commands::App = commands::App::parse();

    let level = if opts.verbose >= 2 {
        LevelFilter::Trace
    } else if opts.verbose == 1 {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    formatted_builder().filter(None, level).init();

    let countdown = opts.countdown;
    let result = Env::new(opts.store.clone()).and_then(|mut env| opts.exec(&mut env));

    match result {
        Err(e) => match e.downcast_ref::<FatalError>() {
            Some(fatal) => {
                println!("\n");
                println!("{}", fatal);
                exit_program(countdown, fatal.exit_code())
            }
            None => Err(e),
        },
        ok => ok,
    }
}
