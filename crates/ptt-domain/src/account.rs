//! Bank accounts and their running balances.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::*;

/// A linked bank account. `balance` is a signed running total; credit cards
/// hold a negative balance for the amount owed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub bank_name: String,
    pub account_type: AccountType,
    pub account_number: String,
    pub last_four: String,
    pub balance: f64,
    pub mode: Mode,
}

impl Account {
    pub fn from_draft(id: impl Into<String>, draft: NewAccount) -> Self {
        Self {
            id: id.into(),
            bank_name: draft.bank_name,
            account_type: draft.account_type,
            account_number: draft.account_number,
            last_four: draft.last_four,
            balance: draft.balance,
            mode: draft.mode,
        }
    }

    /// Applies a signed change to the running balance.
    pub fn apply(&mut self, delta: f64) {
        self.balance += delta;
    }
}

impl Identifiable for Account {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.bank_name
    }
}

impl Partitioned for Account {
    fn mode(&self) -> Mode {
        self.mode
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        format!("{} ({} ••{})", self.bank_name, self.account_type, self.last_four)
    }
}

/// Caller-supplied fields for a new account; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub bank_name: String,
    pub account_type: AccountType,
    pub account_number: String,
    pub last_four: String,
    pub balance: f64,
    pub mode: Mode,
}

impl NewAccount {
    /// Builds a draft with the masked account number derived from `last_four`.
    pub fn masked(
        bank_name: impl Into<String>,
        account_type: AccountType,
        last_four: impl Into<String>,
        balance: f64,
        mode: Mode,
    ) -> Self {
        let last_four = last_four.into();
        Self {
            bank_name: bank_name.into(),
            account_type,
            account_number: format!("XXXXXX{}", last_four),
            last_four,
            balance,
            mode,
        }
    }
}

/// Supported account types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountType {
    Savings,
    Checking,
    #[serde(rename = "Credit Card")]
    CreditCard,
    #[serde(rename = "Business Current")]
    BusinessCurrent,
}

impl AccountType {
    pub fn from_str(value: &str) -> Option<Self> {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "savings" => Some(AccountType::Savings),
            "checking" => Some(AccountType::Checking),
            "creditcard" | "credit" => Some(AccountType::CreditCard),
            "businesscurrent" | "current" => Some(AccountType::BusinessCurrent),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AccountType::Savings => "Savings",
            AccountType::Checking => "Checking",
            AccountType::CreditCard => "Credit Card",
            AccountType::BusinessCurrent => "Business Current",
        };
        f.write_str(label)
    }
}
