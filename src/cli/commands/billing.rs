use ptt_core::subscription::plans;
use ptt_core::{BillingCycle, CoreError};

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::currency::RUPEE_SYMBOL;

use super::{required, split_flags, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "plans",
            "List subscription plans",
            "plans [monthly|yearly]",
            cmd_plans,
        ),
        CommandDefinition::new(
            "subscribe",
            "Buy a plan with UPI",
            "subscribe <basic|pro|ultimate> [upi_id] [--yearly]",
            cmd_subscribe,
        ),
    ]
}

fn period_label(cycle: BillingCycle) -> &'static str {
    match cycle {
        BillingCycle::Monthly => "mo",
        BillingCycle::Yearly => "yr",
    }
}

fn cmd_plans(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let cycle = match args.first() {
        Some(raw) => BillingCycle::from_str(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{}` is not monthly or yearly", raw))
        })?,
        None => BillingCycle::default(),
    };
    output::section(format!("Plans ({})", cycle));
    for plan in plans(cycle) {
        output::info(format!(
            "  {:<10} {}{}/{}",
            plan.name,
            RUPEE_SYMBOL,
            plan.price,
            period_label(cycle)
        ));
        output::info(format!("             {}", plan.features.join(", ")));
    }
    Ok(())
}

fn cmd_subscribe(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let usage = "subscribe <plan> [upi_id] [--yearly]";
    let (positional, flags) = split_flags(args);
    let plan_name = required(&positional, 0, "plan", usage)?;
    let cycle = if flags.contains_key("yearly") {
        BillingCycle::Yearly
    } else {
        BillingCycle::Monthly
    };

    let flow = &mut context.app.subscription;
    flow.reset();
    flow.set_cycle(cycle)?;
    let plan = flow.select_plan(plan_name)?;
    output::info(format!(
        "Selected {} at {}{}/{}.",
        plan.name,
        RUPEE_SYMBOL,
        plan.price,
        period_label(cycle)
    ));

    if let Err(err) = submit_upi(context, positional.get(1).copied()) {
        context.app.subscription.reset();
        return Err(err);
    }

    output::info("Processing payment...");
    let result = context.app.process_payment();
    context.app.subscription.reset();
    let plan = result?;
    output::success(format!(
        "Payment successful. Welcome to {} ({}).",
        plan.name, cycle
    ));
    Ok(())
}

/// Submits the given UPI id, or asks for one until a valid id is entered
/// when running interactively.
fn submit_upi(context: &mut ShellContext, upi_id: Option<&str>) -> CommandResult {
    if let Some(upi_id) = upi_id {
        context.app.subscription.submit_upi(upi_id)?;
        return Ok(());
    }
    if context.mode == CliMode::Script {
        return Err(CommandError::InvalidArguments(
            "A UPI id is required in script mode".into(),
        ));
    }
    loop {
        let entered = context.prompt_text("UPI ID (e.g. name@bank)")?;
        match context.app.subscription.submit_upi(&entered) {
            Ok(()) => return Ok(()),
            Err(CoreError::Validation(message)) => output::warning(message),
            Err(err) => return Err(err.into()),
        }
    }
}
