use ptt_core::SummaryService;
use ptt_domain::{
    AccountType, Displayable, Mode, NamedEntity, NewAccount, NewTransaction, TransactionType,
};

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::currency::{format_date, format_inr, format_percent, format_signed_inr};

use super::{parse_date, parse_number, required, split_flags, CommandDefinition};

const DEFAULT_LIST_LIMIT: usize = 20;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "mode",
            "Show or switch the active mode",
            "mode [personal|business]",
            cmd_mode,
        ),
        CommandDefinition::new("accounts", "List accounts of the active mode", "accounts", cmd_accounts),
        CommandDefinition::new(
            "account-add",
            "Link a new account in the active mode",
            "account-add <bank> <savings|checking|credit|current> <last4> <balance>",
            cmd_account_add,
        ),
        CommandDefinition::new(
            "account-delete",
            "Remove an account and its transactions",
            "account-delete <account_id>",
            cmd_account_delete,
        ),
        CommandDefinition::new(
            "transactions",
            "List or search transactions of the active mode",
            "transactions [query] [--account <id>] [--limit <n>]",
            cmd_transactions,
        ),
        CommandDefinition::new(
            "tx-add",
            "Record an income or expense",
            "tx-add <income|expense> <amount> <category_id> <account_id> <merchant> [--date YYYY-MM-DD]",
            cmd_tx_add,
        ),
        CommandDefinition::new("budgets", "Show budgets of the active mode", "budgets", cmd_budgets),
        CommandDefinition::new(
            "budget-set",
            "Change a budget limit",
            "budget-set <budget_id> <limit>",
            cmd_budget_set,
        ),
    ]
}

fn cmd_mode(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        output::info(format!("Active mode: {}", context.app.store.mode()));
        return Ok(());
    };
    let mode = Mode::from_str(raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!("Unknown mode `{}`. Use personal or business.", raw))
    })?;
    context.app.store.set_mode(mode)?;
    output::success(format!("Switched to {} mode.", mode));
    Ok(())
}

fn cmd_accounts(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let state = context.app.store.state();
    let accounts = SummaryService::mode_accounts(state);
    output::section(format!("{} accounts", state.mode));
    if accounts.is_empty() {
        output::warning("No accounts linked. Use `account-add` to link one.");
        return Ok(());
    }
    output::info(format!(
        "  {:<14} {:<22} {:<18} {:>16}",
        "ID", "BANK", "TYPE", "BALANCE"
    ));
    for account in &accounts {
        output::info(format!(
            "  {:<14} {:<22} {:<18} {:>16}",
            account.id,
            format!("{} ••{}", account.bank_name, account.last_four),
            account.account_type,
            format_inr(account.balance)
        ));
    }
    let total: f64 = accounts.iter().map(|account| account.balance).sum();
    output::info(format!("  Total: {}", format_inr(total)));
    Ok(())
}

fn cmd_account_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "account-add <bank> <type> <last4> <balance>";
    let bank = required(args, 0, "bank", usage)?;
    let raw_type = required(args, 1, "type", usage)?;
    let last_four = required(args, 2, "last4", usage)?;
    let balance = parse_number(required(args, 3, "balance", usage)?, "balance")?;

    let account_type = AccountType::from_str(raw_type).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "Unknown account type `{}`. Use savings, checking, credit or current.",
            raw_type
        ))
    })?;
    if last_four.is_empty() || last_four.len() > 4 || !last_four.chars().all(|c| c.is_ascii_digit()) {
        return Err(CommandError::InvalidArguments(
            "<last4> must be up to four digits".into(),
        ));
    }

    let mode = context.app.store.mode();
    let draft = NewAccount::masked(bank, account_type, last_four, balance, mode);
    let id = context.app.store.add_account(draft)?;
    output::success(format!("Linked {} ({}) as {}.", bank, account_type, id));
    Ok(())
}

fn cmd_account_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = required(args, 0, "account_id", "account-delete <account_id>")?;
    let removal = context.app.store.delete_account(id)?;
    match removal.account {
        Some(account) => output::success(format!(
            "Removed {} and {} transaction(s).",
            account.display_label(),
            removal.transactions_removed
        )),
        None => output::warning(format!("No account `{}`; nothing removed.", id)),
    }
    Ok(())
}

fn cmd_transactions(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, flags) = split_flags(args);
    let limit = match flags.get("limit") {
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{}` is not a valid limit", raw))
        })?,
        None => DEFAULT_LIST_LIMIT,
    };
    let query = (!positional.is_empty()).then(|| positional.join(" "));

    let state = context.app.store.state();
    // Store order: most recently recorded first, whatever its date.
    let transactions = match flags.get("account") {
        Some(account_id) => SummaryService::account_transactions(state, account_id),
        None => SummaryService::mode_transactions(state, query.as_deref()),
    };

    output::section("Transactions");
    if transactions.is_empty() {
        output::warning("No transactions found.");
        return Ok(());
    }
    let total = transactions.len();
    for txn in transactions.iter().take(limit) {
        let category = state
            .category(&txn.category_id)
            .map(NamedEntity::name)
            .unwrap_or("Other");
        output::info(format!(
            "  {:<12} {:<26} {:<16} {:>16}",
            format_date(txn.date),
            txn.merchant,
            category,
            format_signed_inr(txn.amount, txn.kind == TransactionType::Income)
        ));
    }
    if total > limit {
        output::hint(format!("Showing {} of {}. Use --limit to see more.", limit, total));
    }
    Ok(())
}

fn cmd_tx_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "tx-add <income|expense> <amount> <category_id> <account_id> <merchant>";
    let (positional, flags) = split_flags(args);
    let raw_kind = required(&positional, 0, "income|expense", usage)?;
    let amount = parse_number(required(&positional, 1, "amount", usage)?, "amount")?;
    let category_id = required(&positional, 2, "category_id", usage)?;
    let account_id = required(&positional, 3, "account_id", usage)?;
    required(&positional, 4, "merchant", usage)?;
    let merchant = positional[4..].join(" ");

    let kind = TransactionType::from_str(raw_kind).ok_or_else(|| {
        CommandError::InvalidArguments(format!("Unknown type `{}`. Use income or expense.", raw_kind))
    })?;
    let date = match flags.get("date") {
        Some(raw) => parse_date(raw)?,
        None => context.app.store.clock().today(),
    };

    let draft = NewTransaction::new(date, amount, merchant, category_id, account_id, kind);
    let txn = context.app.store.add_transaction(draft)?;
    output::success(format!(
        "Recorded {} {} ({}).",
        txn.merchant,
        format_signed_inr(txn.amount, txn.kind == TransactionType::Income),
        txn.id
    ));
    Ok(())
}

fn cmd_budgets(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let state = context.app.store.state();
    let lines = SummaryService::budget_lines(state);
    output::section(format!("{} budgets", state.mode));
    if lines.is_empty() {
        output::warning("No budgets for this mode.");
        return Ok(());
    }
    for line in &lines {
        output::info(format!(
            "  {:<6} {:<18} {:>14} / {:<14} {:>7}  {}",
            line.budget_id,
            line.category_name,
            format_inr(line.spent),
            format_inr(line.limit),
            line.utilization
                .map(format_percent)
                .unwrap_or_else(|| "-".into()),
            line.status
        ));
    }
    Ok(())
}

fn cmd_budget_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "budget-set <budget_id> <limit>";
    let id = required(args, 0, "budget_id", usage)?;
    let limit = parse_number(required(args, 1, "limit", usage)?, "limit")?;
    context.app.store.update_budget(id, limit)?;
    output::success(format!("Budget {} limit set to {}.", id, format_inr(limit)));
    Ok(())
}
