use std::collections::HashMap;

use chrono::NaiveDate;

pub mod backup;
pub mod billing;
pub mod ledger;
pub mod profile;
pub mod reports;
pub mod system;

use crate::cli::core::{CommandError, CommandResult, ShellContext};

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(ledger::definitions());
    commands.extend(reports::definitions());
    commands.extend(profile::definitions());
    commands.extend(billing::definitions());
    commands.extend(backup::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

pub(crate) fn required<'a>(
    args: &[&'a str],
    index: usize,
    name: &str,
    usage: &str,
) -> Result<&'a str, CommandError> {
    args.get(index).copied().ok_or_else(|| {
        CommandError::InvalidArguments(format!("Missing <{}>. Usage: {}", name, usage))
    })
}

pub(crate) fn parse_number(raw: &str, name: &str) -> Result<f64, CommandError> {
    raw.replace(',', "").parse::<f64>().map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a valid {}", raw, name))
    })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("`{}` is not a date (expected YYYY-MM-DD)", raw))
    })
}

/// Splits `--flag value` pairs out of an argument list. Flags without a
/// following value map to an empty string.
pub(crate) fn split_flags<'a>(args: &[&'a str]) -> (Vec<&'a str>, HashMap<&'a str, &'a str>) {
    let mut positional = Vec::new();
    let mut flags = HashMap::new();
    let mut iter = args.iter().copied().peekable();
    while let Some(arg) = iter.next() {
        match arg.strip_prefix("--") {
            Some(flag) => {
                let value = match iter.peek() {
                    Some(next) if !next.starts_with("--") => iter.next().unwrap_or_default(),
                    _ => "",
                };
                flags.insert(flag, value);
            }
            None => positional.push(arg),
        }
    }
    (positional, flags)
}
