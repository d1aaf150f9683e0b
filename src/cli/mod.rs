pub mod commands;
pub mod core;
pub mod help;
pub mod output;
mod shell;

pub use shell::run_cli;
