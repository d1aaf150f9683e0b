//! Domain models for ledger transactions.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::common::*;

/// A single ledger entry. Immutable once recorded; `amount` is a positive
/// magnitude and `kind` decides its sign against the account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub merchant: String,
    pub category_id: String,
    pub account_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub status: TransactionStatus,
}

impl Transaction {
    pub fn from_draft(id: impl Into<String>, draft: NewTransaction) -> Self {
        Self {
            id: id.into(),
            date: draft.date,
            amount: draft.amount,
            merchant: draft.merchant,
            category_id: draft.category_id,
            account_id: draft.account_id,
            kind: draft.kind,
            status: TransactionStatus::Completed,
        }
    }

    /// Signed effect on the owning account's balance.
    pub fn balance_delta(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} {} {} [{}]", self.date, self.merchant, self.amount, self.status)
    }
}

/// Caller-supplied fields for a new transaction; id and status are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub merchant: String,
    pub category_id: String,
    pub account_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl NewTransaction {
    pub fn new(
        date: NaiveDate,
        amount: f64,
        merchant: impl Into<String>,
        category_id: impl Into<String>,
        account_id: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            date,
            amount,
            merchant: merchant.into(),
            category_id: category_id.into(),
            account_id: account_id.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Some(TransactionType::Income),
            "expense" | "out" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Enumerates the settlement state of a transaction.
pub enum TransactionStatus {
    Completed,
    Pending,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Pending => "Pending",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(kind: TransactionType) -> NewTransaction {
        NewTransaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            200.0,
            "Test",
            "p1",
            "a1",
            kind,
        )
    }

    #[test]
    fn drafts_become_completed_transactions() {
        let txn = Transaction::from_draft("tx-1", draft(TransactionType::Expense));
        assert_eq!(txn.status, TransactionStatus::Completed);
        assert_eq!(txn.balance_delta(), -200.0);
    }

    #[test]
    fn transaction_document_uses_original_keys() {
        let txn = Transaction::from_draft("tx-1", draft(TransactionType::Income));
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["date"], "2024-01-01");
        assert_eq!(value["type"], "Income");
        assert_eq!(value["categoryId"], "p1");
        assert_eq!(value["accountId"], "a1");
    }
}
