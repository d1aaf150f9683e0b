use ptt_domain::{fresh_id, Account, LedgerState, NewAccount};
use tracing::{debug, warn};

use crate::{
    validation::{ensure_balance, ReferencePolicy},
    CoreError,
};

/// Outcome of removing an account together with its transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRemoval {
    pub account: Option<Account>,
    pub transactions_removed: usize,
}

pub struct AccountService;

impl AccountService {
    /// Appends a new account with a fresh id. No uniqueness check is made on
    /// the account number.
    pub fn add(state: &mut LedgerState, draft: NewAccount) -> Result<String, CoreError> {
        ensure_balance(draft.balance)?;
        let id = fresh_id("acc");
        state.accounts.push(Account::from_draft(id.clone(), draft));
        debug!(account = %id, "account added");
        Ok(id)
    }

    /// Removes the account and cascades to every transaction referencing it.
    /// Budgets keep their accumulated spend.
    pub fn remove(
        state: &mut LedgerState,
        id: &str,
        policy: ReferencePolicy,
    ) -> Result<AccountRemoval, CoreError> {
        let position = state.accounts.iter().position(|account| account.id == id);
        let account = match position {
            Some(index) => Some(state.accounts.remove(index)),
            None if policy.is_strict() => return Err(CoreError::AccountNotFound(id.to_string())),
            None => {
                warn!(account = %id, "delete requested for unknown account");
                None
            }
        };

        let before = state.transactions.len();
        state.transactions.retain(|txn| txn.account_id != id);
        let transactions_removed = before - state.transactions.len();
        debug!(account = %id, transactions_removed, "account removed");

        Ok(AccountRemoval {
            account,
            transactions_removed,
        })
    }
}
