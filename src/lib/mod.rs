pub mod account_store;
pub mod command;
pub mod env;
pub mod exit;
pub mod git;
pub mod github;
pub mod process;
pub mod prompt;
pub mod session;
pub mod utils;
