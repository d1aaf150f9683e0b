use ptt_core::{budget_drift, ledger_warnings};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::{help, output};
use crate::currency::{format_inr, format_signed_inr};
use crate::utils::build_info;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("help", "Show available commands", "help [command]", cmd_help),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
        CommandDefinition::new("version", "Show build metadata", "version", cmd_version),
        CommandDefinition::new(
            "sync",
            "Fetch the latest bank activity for the active mode",
            "sync",
            cmd_sync,
        ),
        CommandDefinition::new(
            "reset",
            "Replace all data with the demo data set",
            "reset",
            cmd_reset,
        ),
        CommandDefinition::new(
            "doctor",
            "Report dangling references and budget drift",
            "doctor",
            cmd_doctor,
        ),
    ]
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(definition) => help::print_command(definition),
            None => context.suggest_command(name),
        }
        return Ok(());
    }
    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}

fn cmd_version(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Payment Trackers {}", meta.version));
    output::info(format!("  CLI version  : {}", build_info::CLI_VERSION));
    output::info(format!("  Build hash   : {} ({})", meta.git_hash, meta.git_status));
    output::info(format!("  Built at     : {}", meta.timestamp));
    output::info(format!("  Target       : {}", meta.target));
    output::info(format!("  Profile      : {}", meta.profile));
    output::info(format!("  Rustc        : {}", meta.rustc));
    output::info(format!("  Data home    : {}", context.app.home.display()));
    Ok(())
}

fn cmd_sync(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info("Syncing bank data...");
    match context.app.sync_bank_data()? {
        Some(txn) => {
            let account = context
                .app
                .store
                .state()
                .account(&txn.account_id)
                .map(|account| account.bank_name.clone())
                .unwrap_or_else(|| txn.account_id.clone());
            output::success(format!(
                "{} {} credited to {}",
                txn.merchant,
                format_signed_inr(txn.amount, true),
                account
            ));
        }
        None => output::warning("Nothing synced: no account available for this mode."),
    }
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Reset all data to the demo data set?")? {
        output::info("Reset cancelled.");
        return Ok(());
    }
    context.app.store.reset_data()?;
    output::success("Data reset to the demo data set.");
    Ok(())
}

fn cmd_doctor(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let state = context.app.store.state();
    let warnings = ledger_warnings(state);
    let drift = budget_drift(state);

    output::section("Ledger check");
    if warnings.is_empty() {
        output::success("No dangling references.");
    }
    for warning in &warnings {
        output::warning(warning);
    }

    if drift.is_empty() {
        output::success("Budget spend matches the transaction log.");
    } else {
        output::info("Budget drift (recorded vs. transaction log):");
        for entry in &drift {
            output::info(format!(
                "  {:<6} {:<6} {:>14} {:>14}",
                entry.budget_id,
                entry.category_id,
                format_inr(entry.recorded),
                format_inr(entry.from_log)
            ));
        }
        output::hint("Drift is expected after seeding or deleting accounts; nothing was changed.");
    }
    Ok(())
}
