use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;

use super::{required, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "backup",
            "Snapshot the stored ledger",
            "backup [note]",
            cmd_backup,
        ),
        CommandDefinition::new("backups", "List ledger snapshots", "backups", cmd_backups),
        CommandDefinition::new(
            "restore",
            "Replace the ledger with a snapshot",
            "restore <backup_id>",
            cmd_restore,
        ),
    ]
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = (!args.is_empty()).then(|| args.join(" "));
    let key = context.app.config.storage_key.clone();
    let info = context.app.storage.backup(&key, note.as_deref())?;
    output::success(format!("Backup created: {}", info.id));
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let entries = context
        .app
        .storage
        .list_backups(&context.app.config.storage_key)?;
    output::section("Backups");
    if entries.is_empty() {
        output::warning("No backups found.");
        return Ok(());
    }
    for entry in &entries {
        let created = entry
            .created_at
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".into());
        output::info(format!(
            "  {:<48} {:<20} {:>8}",
            entry.id,
            created,
            format_size(entry.size_bytes)
        ));
    }
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required(args, 0, "backup_id", "restore <backup_id>")?;
    if !context.confirm(&format!("Replace current data with `{}`?", id))? {
        output::info("Restore cancelled.");
        return Ok(());
    }
    let key = context.app.config.storage_key.clone();
    context.app.storage.restore(&key, id)?;
    context.app.reload()?;
    output::success(format!("Restored {}.", id));
    Ok(())
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}
