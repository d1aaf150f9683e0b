//! The top-level state document: the unit of persistence.

use serde::{Deserialize, Serialize};

use crate::{
    account::Account, budget::Budget, category::Category, common::*, profile::*,
    transaction::Transaction,
};

/// Accounts, transactions, categories and budgets plus the active mode and
/// the user/preference records. Every mutation writes this whole value back
/// to storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerState {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub mode: Mode,
    pub user: User,
    pub preferences: Preferences,
}

impl LedgerState {
    pub fn account(&self, id: &str) -> Option<&Account> {
        find_by_id(&self.accounts, id)
    }

    pub fn account_mut(&mut self, id: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        find_by_id(&self.categories, id)
    }

    pub fn budget(&self, id: &str) -> Option<&Budget> {
        find_by_id(&self.budgets, id)
    }

    /// First account (in insertion order) belonging to `mode`.
    pub fn first_account_in(&self, mode: Mode) -> Option<&Account> {
        self.accounts.iter().find(|account| account.mode == mode)
    }

    /// Mode a transaction belongs to, resolved through its account.
    pub fn transaction_mode(&self, txn: &Transaction) -> Option<Mode> {
        self.account(&txn.account_id).map(|account| account.mode)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

fn find_by_id<'a, T: Identifiable>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}
