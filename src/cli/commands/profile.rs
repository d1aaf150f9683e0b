use ptt_domain::{PreferencesPatch, UserPatch};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;

use super::{required, split_flags, CommandDefinition};

const DEFAULT_USER_NAME: &str = "Demo User";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("login", "Sign in", "login <email> [name]", cmd_login),
        CommandDefinition::new("logout", "Sign out", "logout", cmd_logout),
        CommandDefinition::new(
            "profile",
            "Show or edit the user profile",
            "profile [edit --name <name> --email <email>]",
            cmd_profile,
        ),
        CommandDefinition::new(
            "prefs",
            "Show or change preferences",
            "prefs [currency <code> | notifications <on|off|toggle> | dark-mode <on|off|toggle>]",
            cmd_prefs,
        ),
    ]
}

fn cmd_login(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let email = required(args, 0, "email", "login <email> [name]")?;
    let name = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        DEFAULT_USER_NAME.to_string()
    };
    context.app.store.login(UserPatch {
        name: Some(name.clone()),
        email: Some(email.to_string()),
        avatar: None,
    })?;
    output::success(format!("Welcome, {}.", name));
    Ok(())
}

fn cmd_logout(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.app.store.logout()?;
    output::success("Signed out.");
    Ok(())
}

fn cmd_profile(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, flags) = split_flags(args);
    match positional.first().copied() {
        None => {
            let user = &context.app.store.state().user;
            output::section("Profile");
            output::info(format!("  Name    : {}", user.name));
            output::info(format!("  Email   : {}", user.email));
            if let Some(avatar) = &user.avatar {
                output::info(format!("  Avatar  : {}", avatar));
            }
            output::info(format!(
                "  Status  : {}",
                if user.is_logged_in { "signed in" } else { "signed out" }
            ));
            Ok(())
        }
        Some("edit") => {
            let patch = UserPatch {
                name: flags.get("name").map(|value| value.to_string()),
                email: flags.get("email").map(|value| value.to_string()),
                avatar: flags.get("avatar").map(|value| value.to_string()),
            };
            if patch == UserPatch::default() {
                return Err(CommandError::InvalidArguments(
                    "Nothing to change. Pass --name, --email or --avatar.".into(),
                ));
            }
            context.app.store.login(patch)?;
            output::success("Profile updated.");
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "Unknown profile action `{}`",
            other
        ))),
    }
}

fn cmd_prefs(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(setting) = args.first() else {
        let prefs = &context.app.store.state().preferences;
        output::section("Preferences");
        output::info(format!("  Currency      : {}", prefs.currency));
        output::info(format!("  Notifications : {}", on_off(prefs.notifications)));
        output::info(format!("  Dark mode     : {}", on_off(prefs.dark_mode)));
        return Ok(());
    };

    let usage = "prefs <setting> <value>";
    let value = required(args, 1, "value", usage)?;
    let current = context.app.store.state().preferences.clone();
    let patch = match setting.to_lowercase().as_str() {
        "currency" => PreferencesPatch {
            currency: Some(value.to_uppercase()),
            ..PreferencesPatch::default()
        },
        "notifications" => PreferencesPatch {
            notifications: Some(parse_switch(value, current.notifications)?),
            ..PreferencesPatch::default()
        },
        "dark-mode" | "darkmode" => PreferencesPatch {
            dark_mode: Some(parse_switch(value, current.dark_mode)?),
            ..PreferencesPatch::default()
        },
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "Unknown preference `{}`",
                other
            )))
        }
    };
    context.app.store.update_preferences(patch)?;
    output::success("Preferences saved.");
    Ok(())
}

fn parse_switch(value: &str, current: bool) -> Result<bool, CommandError> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        "toggle" => Ok(!current),
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` is not on, off or toggle",
            value
        ))),
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}
