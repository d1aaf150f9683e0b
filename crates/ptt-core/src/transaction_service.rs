use ptt_domain::{fresh_id, LedgerState, NewTransaction, Transaction};
use tracing::{debug, warn};

use crate::{
    budget_service::BudgetService,
    validation::{ensure_amount, ReferencePolicy},
    CoreError,
};

pub struct TransactionService;

impl TransactionService {
    /// Records a completed transaction at the front of the log and applies its
    /// effects: the account balance moves by the signed amount and, for
    /// expenses, every budget on the category accumulates the amount.
    ///
    /// Under [`ReferencePolicy::Lenient`] an unknown account leaves every
    /// balance untouched and an unknown category simply matches no budget.
    pub fn record(
        state: &mut LedgerState,
        draft: NewTransaction,
        policy: ReferencePolicy,
    ) -> Result<Transaction, CoreError> {
        ensure_amount(draft.amount)?;
        if policy.is_strict() && state.account(&draft.account_id).is_none() {
            return Err(CoreError::AccountNotFound(draft.account_id));
        }

        let txn = Transaction::from_draft(fresh_id("tx"), draft);

        match state.account_mut(&txn.account_id) {
            Some(account) => account.apply(txn.balance_delta()),
            None => warn!(
                transaction = %txn.id,
                account = %txn.account_id,
                "transaction recorded against unknown account"
            ),
        }

        if txn.is_expense() {
            let touched = BudgetService::accumulate(state, &txn.category_id, txn.amount);
            debug!(transaction = %txn.id, budgets = touched, "expense applied to budgets");
        }

        state.transactions.insert(0, txn.clone());
        Ok(txn)
    }
}
