pub mod commands;
pub mod io;
pub mod output;
mod shell;

pub use shell::{run_cli, CliMode, SCRIPT_ENV};
