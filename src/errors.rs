use ptt_config::ConfigError;
use ptt_core::CoreError;
use thiserror::Error;

/// Failures while bootstrapping or running the application outside of a
/// single shell command.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}
