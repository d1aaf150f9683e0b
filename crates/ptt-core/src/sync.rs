//! Simulated bank sync: after a fixed delay, a small interest income lands on
//! the first account of the mode that was active when the sync started.

use std::{ops::Range, time::Duration};

use chrono::NaiveDate;
use ptt_domain::{LedgerState, Mode, NewTransaction, TransactionType};

use crate::entropy::AmountSource;

pub const DEFAULT_SYNC_DELAY: Duration = Duration::from_millis(1500);
pub const DEFAULT_SYNC_MERCHANT: &str = "Bank Interest Accrual";

#[derive(Debug, Clone, PartialEq)]
pub struct SyncSettings {
    pub delay: Duration,
    /// Uniform integer amount range, end exclusive.
    pub amounts: Range<u32>,
    pub merchant: String,
    pub personal_category: String,
    pub business_category: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            delay: DEFAULT_SYNC_DELAY,
            amounts: 50..550,
            merchant: DEFAULT_SYNC_MERCHANT.into(),
            personal_category: "p1".into(),
            business_category: "b1".into(),
        }
    }
}

impl SyncSettings {
    pub fn category_for(&self, mode: Mode) -> &str {
        match mode {
            Mode::Personal => &self.personal_category,
            Mode::Business => &self.business_category,
        }
    }
}

/// Target captured when a sync starts. Mode and account are not re-read
/// after the delay.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncPlan {
    pub mode: Mode,
    pub account_id: String,
    pub category_id: String,
    pub amount: u32,
}

impl SyncPlan {
    /// Returns `None` when the current mode has no account to credit.
    pub fn capture(
        state: &LedgerState,
        settings: &SyncSettings,
        amounts: &dyn AmountSource,
    ) -> Option<Self> {
        let account = state.first_account_in(state.mode)?;
        Some(Self {
            mode: state.mode,
            account_id: account.id.clone(),
            category_id: settings.category_for(state.mode).to_string(),
            amount: amounts.draw(settings.amounts.clone()),
        })
    }

    pub fn into_draft(self, merchant: &str, date: NaiveDate) -> NewTransaction {
        NewTransaction::new(
            date,
            self.amount as f64,
            merchant,
            self.category_id,
            self.account_id,
            TransactionType::Income,
        )
    }
}
