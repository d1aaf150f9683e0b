use ptt_core::SummaryService;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::output;
use crate::currency::{format_inr, format_percent};

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "dashboard",
            "Balances and this month's cash flow",
            "dashboard",
            cmd_dashboard,
        ),
        CommandDefinition::new("insights", "Spending alerts for this month", "insights", cmd_insights),
        CommandDefinition::new(
            "portfolio",
            "Expense breakdown by category",
            "portfolio",
            cmd_portfolio,
        ),
    ]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let today = context.app.store.clock().today();
    let state = context.app.store.state();
    let summary = SummaryService::dashboard(state, today);

    output::section(format!("{} dashboard", summary.mode));
    if state.user.is_logged_in {
        output::info(format!("  Hello, {}", state.user.name));
    }
    output::info(format!("  Accounts        : {}", summary.account_count));
    output::info(format!("  Total balance   : {}", format_inr(summary.total_balance)));
    output::info(format!("  Income (month)  : {}", format_inr(summary.monthly_income)));
    output::info(format!("  Expense (month) : {}", format_inr(summary.monthly_expense)));
    output::info(format!("  Net (month)     : {}", format_inr(summary.monthly_net())));
    Ok(())
}

fn cmd_insights(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let today = context.app.store.clock().today();
    let insights = SummaryService::insights(context.app.store.state(), today);
    output::section("Insights");
    for insight in &insights {
        output::info(format!(
            "  {} {} [{}]: {}",
            insight.icon, insight.category_name, insight.trend, insight.message
        ));
    }
    Ok(())
}

fn cmd_portfolio(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let slices = SummaryService::category_breakdown(context.app.store.state());
    output::section("Spending by category");
    if slices.is_empty() {
        output::warning("No expenses recorded for this mode.");
        return Ok(());
    }
    for slice in &slices {
        output::info(format!(
            "  {:<20} {:>16} {:>7}",
            slice.name,
            format_inr(slice.value),
            format_percent(slice.percent)
        ));
    }
    let total: f64 = slices.iter().map(|slice| slice.value).sum();
    output::info(format!("  {:<20} {:>16}", "Total", format_inr(total)));
    Ok(())
}
