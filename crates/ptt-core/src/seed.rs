//! Default dataset used when nothing is persisted yet and on reset.

use chrono::{Duration, NaiveDate};
use ptt_domain::{
    Account, AccountType, Budget, Category, LedgerState, Mode, Preferences, Transaction,
    TransactionStatus, TransactionType, User,
};

use crate::entropy::SeedSequence;

const SEED_TRANSACTION_COUNT: usize = 200;
const SEED_LOOKBACK_DAYS: i64 = 90;
const SEED_STREAM: u64 = 0x5054_5452_4143_4b53;

const PERSONAL_MERCHANTS: [&str; 10] = [
    "Big Bazaar",
    "Amazon",
    "Netflix",
    "Uber",
    "Zomato",
    "Swiggy",
    "Reliance Digital",
    "PVR Cinemas",
    "Airtel",
    "Jio",
];

const BUSINESS_MERCHANTS: [&str; 10] = [
    "Google Cloud",
    "AWS",
    "LinkedIn Ads",
    "Coworking Space",
    "Staples",
    "Upwork",
    "GoDaddy",
    "Mailchimp",
    "Adobe",
    "Zoom",
];

pub const DEFAULT_USER_NAME: &str = "Vivek Sharma";
pub const DEFAULT_USER_EMAIL: &str = "vivek@example.com";
pub const DEFAULT_CURRENCY: &str = "INR (₹)";

pub fn seed_categories() -> Vec<Category> {
    vec![
        Category::new("p1", "Groceries", "🛒", Mode::Personal, "#10b981"),
        Category::new("p2", "Rent", "🏠", Mode::Personal, "#3b82f6"),
        Category::new("p3", "Dining Out", "🍕", Mode::Personal, "#f59e0b"),
        Category::new("p4", "Entertainment", "🎬", Mode::Personal, "#8b5cf6"),
        Category::new("p5", "Transport", "🚗", Mode::Personal, "#ef4444"),
        Category::new("b1", "Payroll", "👥", Mode::Business, "#3b82f6"),
        Category::new("b2", "Marketing", "📢", Mode::Business, "#ec4899"),
        Category::new("b3", "Software/SaaS", "💻", Mode::Business, "#6366f1"),
        Category::new("b4", "Office Rent", "🏢", Mode::Business, "#14b8a6"),
        Category::new("b5", "Inventory", "📦", Mode::Business, "#f97316"),
    ]
}

pub fn seed_accounts() -> Vec<Account> {
    let account = |id: &str, bank: &str, kind, last_four: &str, balance, mode| Account {
        id: id.into(),
        bank_name: bank.into(),
        account_type: kind,
        account_number: format!("XXXXXX{}", last_four),
        last_four: last_four.into(),
        balance,
        mode,
    };
    vec![
        account("a1", "SBI Bank", AccountType::Savings, "4421", 45200.50, Mode::Personal),
        account("a2", "HDFC Bank", AccountType::Checking, "9822", 125400.00, Mode::Personal),
        account("a3", "ICICI Credit", AccountType::CreditCard, "1002", -15000.00, Mode::Personal),
        account(
            "a4",
            "Axis Business",
            AccountType::BusinessCurrent,
            "5543",
            850000.00,
            Mode::Business,
        ),
    ]
}

pub fn seed_budgets() -> Vec<Budget> {
    vec![
        Budget::new("bg1", "p1", 15000.0, 8200.0, Mode::Personal),
        Budget::new("bg2", "p3", 5000.0, 6200.0, Mode::Personal),
        Budget::new("bg3", "b2", 50000.0, 34000.0, Mode::Business),
    ]
}

/// Expense history spread over the 90 days before `today`, plus one salary
/// income dated `today`, newest first. Deterministic for a given `today`.
pub fn seed_transactions(today: NaiveDate) -> Vec<Transaction> {
    let categories = seed_categories();
    let accounts = seed_accounts();
    let mut rng = SeedSequence::new(SEED_STREAM);
    let mut txs = Vec::with_capacity(SEED_TRANSACTION_COUNT + 1);

    for i in 0..SEED_TRANSACTION_COUNT {
        let mode = if rng.coin() {
            Mode::Personal
        } else {
            Mode::Business
        };
        let mode_categories: Vec<&Category> =
            categories.iter().filter(|c| c.mode == mode).collect();
        let mode_accounts: Vec<&Account> = accounts.iter().filter(|a| a.mode == mode).collect();
        if mode_accounts.is_empty() || mode_categories.is_empty() {
            continue;
        }

        let category = mode_categories[rng.index(mode_categories.len())];
        let account = mode_accounts[rng.index(mode_accounts.len())];
        let amount = (rng.index(5000) + 100) as f64;
        let days_back = rng.index(SEED_LOOKBACK_DAYS as usize) as i64;
        let merchants = match mode {
            Mode::Personal => &PERSONAL_MERCHANTS,
            Mode::Business => &BUSINESS_MERCHANTS,
        };
        let merchant = merchants[rng.index(merchants.len())];

        txs.push(Transaction {
            id: format!("tx-{}", i),
            date: today - Duration::days(days_back),
            amount,
            merchant: merchant.into(),
            category_id: category.id.clone(),
            account_id: account.id.clone(),
            kind: TransactionType::Expense,
            status: TransactionStatus::Completed,
        });
    }

    txs.push(Transaction {
        id: "tx-income-1".into(),
        date: today,
        amount: 150000.0,
        merchant: "Corporate Salary".into(),
        category_id: "p1".into(),
        account_id: "a1".into(),
        kind: TransactionType::Income,
        status: TransactionStatus::Completed,
    });

    txs.sort_by(|a, b| b.date.cmp(&a.date));
    txs
}

pub fn default_user(is_logged_in: bool) -> User {
    User {
        name: DEFAULT_USER_NAME.into(),
        email: DEFAULT_USER_EMAIL.into(),
        avatar: None,
        is_logged_in,
    }
}

pub fn default_preferences() -> Preferences {
    Preferences {
        currency: DEFAULT_CURRENCY.into(),
        notifications: true,
        dark_mode: false,
    }
}

/// Full seed document relative to `today`, with the user logged out.
pub fn seed_state(today: NaiveDate) -> LedgerState {
    LedgerState {
        accounts: seed_accounts(),
        transactions: seed_transactions(today),
        categories: seed_categories(),
        budgets: seed_budgets(),
        mode: Mode::Personal,
        user: default_user(false),
        preferences: default_preferences(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn seed_is_deterministic_for_a_date() {
        assert_eq!(seed_state(today()), seed_state(today()));
    }

    #[test]
    fn seed_transactions_are_newest_first_and_within_window() {
        let txs = seed_transactions(today());
        assert_eq!(txs.len(), SEED_TRANSACTION_COUNT + 1);
        assert!(txs.windows(2).all(|pair| pair[0].date >= pair[1].date));
        let oldest = today() - Duration::days(SEED_LOOKBACK_DAYS);
        assert!(txs.iter().all(|t| t.date > oldest && t.date <= today()));
        assert!(txs.iter().all(|t| t.amount >= 100.0 && t.amount < 5100.0
            || t.id == "tx-income-1"));
    }

    #[test]
    fn seed_transactions_stay_within_their_account_mode() {
        let state = seed_state(today());
        for txn in &state.transactions {
            let account = state.account(&txn.account_id).expect("seed account");
            let category = state.category(&txn.category_id).expect("seed category");
            assert_eq!(account.mode, category.mode, "transaction {}", txn.id);
        }
    }
}
