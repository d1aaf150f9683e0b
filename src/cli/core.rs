//! Shell context, dispatch and error reporting.

use std::io;

use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use ptt_config::ConfigError;
use ptt_core::CoreError;
use strsim::levenshtein;
use thiserror::Error;

use crate::{app::App, errors::AppError};

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<AppError> for CommandError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Core(err) => CommandError::Core(err),
            AppError::Config(err) => CommandError::Config(err),
            AppError::Io(err) => CommandError::Io(err),
            AppError::Dialoguer(err) => CommandError::Dialoguer(err),
            other => CommandError::Message(other.to_string()),
        }
    }
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub app: App,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode, app: App) -> Self {
        output::set_color_enabled(app.config.ui_color_enabled);
        let context = Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            app,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        };
        context.report_load();
        context
    }

    fn report_load(&self) {
        let report = self.app.store.load_report();
        if let ptt_core::LoadSource::Recovered { error } = &report.source {
            output::warning(format!(
                "Stored data could not be read ({}). Starting from demo data.",
                error
            ));
        }
        if !report.warnings.is_empty() {
            output::warning(format!(
                "{} data issue(s) found. Run `doctor` for details.",
                report.warnings.len()
            ));
        }
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub fn prompt(&self) -> String {
        let mode = self.app.store.mode().to_string().to_lowercase();
        format!("ptt [{}]> ", mode)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|def| def.handler) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &input.to_lowercase()), name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }

    /// Asks a yes/no question. Script mode always answers yes.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    /// Reads a value interactively; in script mode the value is required up front.
    pub(crate) fn prompt_text(&self, prompt: &str) -> Result<String, CommandError> {
        if self.mode == CliMode::Script {
            return Err(CommandError::InvalidArguments(format!(
                "{} is required in script mode",
                prompt
            )));
        }
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact_text()?)
    }
}
