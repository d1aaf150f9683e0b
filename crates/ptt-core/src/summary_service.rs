//! Read-only aggregates over a ledger snapshot, filtered by the active mode.
//!
//! Transactions carry no mode of their own; they belong to the mode of the
//! account they reference, and transactions whose account no longer resolves
//! are excluded from every view.

use std::{collections::HashMap, fmt};

use chrono::{Datelike, NaiveDate};
use ptt_domain::{
    Account, Budget, BudgetStatus, Category, LedgerState, Mode, Partitioned, Transaction,
    TransactionType,
};

/// Current-month expense total above which a category is flagged.
pub const INSIGHT_THRESHOLD: f64 = 5000.0;
pub const MAX_INSIGHTS: usize = 3;
const OTHER_LABEL: &str = "Other";
const OTHER_COLOR: &str = "#94a3b8";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub mode: Mode,
    pub account_count: usize,
    pub total_balance: f64,
    pub monthly_income: f64,
    pub monthly_expense: f64,
}

impl DashboardSummary {
    pub fn monthly_net(&self) -> f64 {
        self.monthly_income - self.monthly_expense
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub id: String,
    pub category_name: String,
    pub icon: String,
    pub message: String,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub category_id: String,
    pub name: String,
    pub color: String,
    pub value: f64,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLine {
    pub budget_id: String,
    pub category_id: String,
    pub category_name: String,
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
    pub utilization: Option<f64>,
    pub status: BudgetStatus,
}

pub struct SummaryService;

impl SummaryService {
    pub fn mode_accounts(state: &LedgerState) -> Vec<Account> {
        in_active_mode(&state.accounts, state.mode)
    }

    pub fn mode_categories(state: &LedgerState) -> Vec<Category> {
        in_active_mode(&state.categories, state.mode)
    }

    pub fn mode_budgets(state: &LedgerState) -> Vec<Budget> {
        in_active_mode(&state.budgets, state.mode)
    }

    /// Transactions of the active mode, newest first, optionally narrowed by a
    /// case-insensitive search over merchant, category name and amount text.
    pub fn mode_transactions(state: &LedgerState, query: Option<&str>) -> Vec<Transaction> {
        let needle = query
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());
        state
            .transactions
            .iter()
            .filter(|txn| in_mode(state, txn))
            .filter(|txn| match &needle {
                None => true,
                Some(needle) => matches_query(state, txn, needle),
            })
            .cloned()
            .collect()
    }

    pub fn account_transactions(state: &LedgerState, account_id: &str) -> Vec<Transaction> {
        state
            .transactions
            .iter()
            .filter(|txn| txn.account_id == account_id)
            .cloned()
            .collect()
    }

    pub fn dashboard(state: &LedgerState, today: NaiveDate) -> DashboardSummary {
        let accounts = Self::mode_accounts(state);
        let total_balance = accounts.iter().map(|account| account.balance).sum();
        let monthly = |kind: TransactionType| -> f64 {
            state
                .transactions
                .iter()
                .filter(|txn| txn.kind == kind && in_mode(state, txn))
                .filter(|txn| same_month(txn.date, today))
                .map(|txn| txn.amount)
                .sum()
        };
        DashboardSummary {
            mode: state.mode,
            account_count: accounts.len(),
            total_balance,
            monthly_income: monthly(TransactionType::Income),
            monthly_expense: monthly(TransactionType::Expense),
        }
    }

    /// Flags categories of the active mode whose current-month spending
    /// exceeds [`INSIGHT_THRESHOLD`]. Always returns at least one entry and at
    /// most [`MAX_INSIGHTS`].
    pub fn insights(state: &LedgerState, today: NaiveDate) -> Vec<Insight> {
        let mut insights: Vec<Insight> = state
            .categories
            .iter()
            .filter(|category| category.mode == state.mode)
            .filter_map(|category| {
                let total: f64 = state
                    .transactions
                    .iter()
                    .filter(|txn| txn.is_expense() && txn.category_id == category.id)
                    .filter(|txn| in_mode(state, txn) && same_month(txn.date, today))
                    .map(|txn| txn.amount)
                    .sum();
                (total > INSIGHT_THRESHOLD).then(|| Insight {
                    id: category.id.clone(),
                    category_name: category.name.clone(),
                    icon: category.icon.clone(),
                    trend: Trend::Up,
                    message: format!(
                        "Your spending in {} is higher than typical for mid-month.",
                        category.name
                    ),
                })
            })
            .collect();

        if insights.is_empty() {
            insights.push(Insight {
                id: "gen".into(),
                category_name: "Healthy".into(),
                icon: "✅".into(),
                trend: Trend::Neutral,
                message: "Great job! Your spending velocity is 15% slower than last month."
                    .into(),
            });
        }
        insights.truncate(MAX_INSIGHTS);
        insights
    }

    /// Expense totals per category for the active mode, largest first.
    pub fn category_breakdown(state: &LedgerState) -> Vec<CategorySlice> {
        let mut totals: HashMap<&str, f64> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();
        for txn in state
            .transactions
            .iter()
            .filter(|txn| txn.is_expense() && in_mode(state, txn))
        {
            let entry = totals.entry(txn.category_id.as_str()).or_insert_with(|| {
                order.push(txn.category_id.as_str());
                0.0
            });
            *entry += txn.amount;
        }

        let grand_total: f64 = totals.values().sum();
        let mut slices: Vec<CategorySlice> = order
            .into_iter()
            .map(|category_id| {
                let value = totals.get(category_id).copied().unwrap_or_default();
                let category = state.category(category_id);
                CategorySlice {
                    category_id: category_id.to_string(),
                    name: category
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|| OTHER_LABEL.into()),
                    color: category
                        .map(|c| c.color.clone())
                        .unwrap_or_else(|| OTHER_COLOR.into()),
                    value,
                    percent: if grand_total > 0.0 {
                        value / grand_total * 100.0
                    } else {
                        0.0
                    },
                }
            })
            .collect();
        slices.sort_by(|a, b| b.value.total_cmp(&a.value));
        slices
    }

    pub fn budget_lines(state: &LedgerState) -> Vec<BudgetLine> {
        state
            .budgets
            .iter()
            .filter(|budget| budget.mode == state.mode)
            .map(|budget| BudgetLine {
                budget_id: budget.id.clone(),
                category_id: budget.category_id.clone(),
                category_name: state
                    .category(&budget.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| OTHER_LABEL.into()),
                limit: budget.limit,
                spent: budget.spent,
                remaining: budget.remaining(),
                utilization: budget.utilization(),
                status: budget.status(),
            })
            .collect()
    }
}

fn in_active_mode<T: Partitioned + Clone>(items: &[T], mode: Mode) -> Vec<T> {
    items.iter().filter(|item| item.mode() == mode).cloned().collect()
}

fn in_mode(state: &LedgerState, txn: &Transaction) -> bool {
    state.transaction_mode(txn) == Some(state.mode)
}

fn same_month(date: NaiveDate, today: NaiveDate) -> bool {
    date.year() == today.year() && date.month() == today.month()
}

fn matches_query(state: &LedgerState, txn: &Transaction, needle: &str) -> bool {
    if txn.merchant.to_lowercase().contains(needle) {
        return true;
    }
    if state
        .category(&txn.category_id)
        .is_some_and(|category| category.name.to_lowercase().contains(needle))
    {
        return true;
    }
    txn.amount.to_string().contains(needle)
}
