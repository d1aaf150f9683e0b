use std::collections::HashSet;

use ptt_domain::LedgerState;

/// Tolerance used when comparing accumulated spend against the log.
const DRIFT_EPSILON: f64 = 0.005;

/// Difference between a budget's accumulated `spent` and the expense total
/// currently present in the transaction log for its category.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetDrift {
    pub budget_id: String,
    pub category_id: String,
    pub recorded: f64,
    pub from_log: f64,
}

impl BudgetDrift {
    pub fn delta(&self) -> f64 {
        self.recorded - self.from_log
    }
}

/// Budgets whose accumulated spend no longer matches the log. Spend is
/// accumulation-only, so drift is expected after seeding or account deletion;
/// this is a report, never a correction.
pub fn budget_drift(state: &LedgerState) -> Vec<BudgetDrift> {
    state
        .budgets
        .iter()
        .filter_map(|budget| {
            let from_log: f64 = state
                .transactions
                .iter()
                .filter(|txn| txn.is_expense() && txn.category_id == budget.category_id)
                .map(|txn| txn.amount)
                .sum();
            ((budget.spent - from_log).abs() > DRIFT_EPSILON).then(|| BudgetDrift {
                budget_id: budget.id.clone(),
                category_id: budget.category_id.clone(),
                recorded: budget.spent,
                from_log,
            })
        })
        .collect()
}

/// Detects dangling references within a ledger snapshot.
pub fn ledger_warnings(state: &LedgerState) -> Vec<String> {
    let account_ids: HashSet<&str> = state.accounts.iter().map(|a| a.id.as_str()).collect();
    let category_ids: HashSet<&str> = state.categories.iter().map(|c| c.id.as_str()).collect();
    let mut warnings = Vec::new();

    for txn in &state.transactions {
        if !account_ids.contains(txn.account_id.as_str()) {
            warnings.push(format!(
                "transaction {} references unknown account {}",
                txn.id, txn.account_id
            ));
        }
        if !category_ids.contains(txn.category_id.as_str()) {
            warnings.push(format!(
                "transaction {} references missing category {}",
                txn.id, txn.category_id
            ));
        }
    }
    for budget in &state.budgets {
        if !category_ids.contains(budget.category_id.as_str()) {
            warnings.push(format!(
                "budget {} tracks missing category {}",
                budget.id, budget.category_id
            ));
        }
    }
    let mut seen = HashSet::new();
    for account in &state.accounts {
        if !seen.insert(account.id.as_str()) {
            warnings.push(format!("duplicate account id {}", account.id));
        }
    }
    warnings
}
