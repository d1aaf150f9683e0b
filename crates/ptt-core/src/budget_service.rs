use ptt_domain::LedgerState;
use tracing::warn;

use crate::{
    validation::{ensure_limit, ReferencePolicy},
    CoreError,
};

pub struct BudgetService;

impl BudgetService {
    /// Replaces the limit of a budget; `spent` is left untouched.
    pub fn set_limit(
        state: &mut LedgerState,
        budget_id: &str,
        limit: f64,
        policy: ReferencePolicy,
    ) -> Result<(), CoreError> {
        ensure_limit(limit)?;
        match state.budgets.iter_mut().find(|budget| budget.id == budget_id) {
            Some(budget) => budget.limit = limit,
            None if policy.is_strict() => {
                return Err(CoreError::BudgetNotFound(budget_id.to_string()))
            }
            None => warn!(budget = %budget_id, "limit update for unknown budget ignored"),
        }
        Ok(())
    }

    /// Adds an expense amount to every budget tracking `category_id`.
    /// Returns the number of budgets touched.
    pub fn accumulate(state: &mut LedgerState, category_id: &str, amount: f64) -> usize {
        let mut touched = 0;
        for budget in state
            .budgets
            .iter_mut()
            .filter(|budget| budget.category_id == category_id)
        {
            budget.spent += amount;
            touched += 1;
        }
        touched
    }
}
