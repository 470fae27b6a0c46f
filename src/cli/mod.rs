pub mod commands;
pub mod output;
mod shell;
pub mod shell_context;

pub use shell::{run_cli, SCRIPT_ENV};
