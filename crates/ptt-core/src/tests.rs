use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use chrono::NaiveDate;
use ptt_domain::{
    AccountType, LedgerState, Mode, NewAccount, NewTransaction, PreferencesPatch,
    TransactionType, UserPatch,
};

use crate::{
    seed::seed_state,
    store::CORRUPT_SUFFIX,
    summary_service::{SummaryService, Trend, INSIGHT_THRESHOLD},
    CoreError, FixedClock, LedgerStore, LoadSource, MemoryStorage, ReferencePolicy,
    ScriptedAmounts, StateStorage, StoreOptions, STORAGE_KEY,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn open_on(storage: Arc<MemoryStorage>, options: StoreOptions) -> LedgerStore {
    LedgerStore::open_with(
        Box::new(storage),
        options,
        Arc::new(FixedClock::on(today())),
        Arc::new(ScriptedAmounts::new(vec![120])),
    )
    .expect("open store")
}

fn fresh_store() -> (Arc<MemoryStorage>, LedgerStore) {
    let storage = Arc::new(MemoryStorage::new());
    let store = open_on(storage.clone(), StoreOptions::default());
    (storage, store)
}

fn expense(amount: f64, category: &str, account: &str) -> NewTransaction {
    NewTransaction::new(
        today(),
        amount,
        "Big Bazaar",
        category,
        account,
        TransactionType::Expense,
    )
}

fn persisted(storage: &MemoryStorage) -> LedgerState {
    let raw = storage
        .get(STORAGE_KEY)
        .expect("read slot")
        .expect("document present");
    serde_json::from_str(&raw).expect("valid document")
}

fn balance(store: &LedgerStore, id: &str) -> f64 {
    store.state().account(id).expect("account").balance
}

#[test]
fn first_open_seeds_and_persists() {
    let (storage, store) = fresh_store();
    assert_eq!(store.load_report().source, LoadSource::Seeded);
    assert!(store.load_report().warnings.is_empty());
    assert_eq!(store.state(), &seed_state(today()));
    assert_eq!(storage.write_count(), 1);
    assert_eq!(&persisted(&storage), store.state());
}

#[test]
fn expense_moves_balance_and_budget() {
    let (storage, mut store) = fresh_store();
    let txn = store
        .add_transaction(expense(200.0, "p1", "a1"))
        .expect("record expense");

    assert!((balance(&store, "a1") - 45000.50).abs() < 1e-9);
    let bg1 = store.state().budget("bg1").expect("bg1");
    assert!((bg1.spent - 8400.0).abs() < 1e-9);
    assert_eq!(store.state().transactions[0].id, txn.id);
    assert_eq!(&persisted(&storage), store.state());
}

#[test]
fn income_credits_without_touching_budgets() {
    let (_, mut store) = fresh_store();
    let before = store.snapshot();
    store
        .add_transaction(NewTransaction::new(
            today(),
            1000.0,
            "Refund",
            "p1",
            "a2",
            TransactionType::Income,
        ))
        .expect("record income");
    assert!((balance(&store, "a2") - 126400.0).abs() < 1e-9);
    assert_eq!(store.state().budgets, before.budgets);
}

#[test]
fn fractional_amounts_survive_reopen() {
    let (storage, mut store) = fresh_store();
    for amount in [11971.51, 1234.51, 99.99, 0.07, 18.3, 5412.77, 3333.33] {
        store
            .add_transaction(expense(amount, "p3", "a2"))
            .expect("record expense");
        assert_eq!(&persisted(&storage), store.state(), "after {}", amount);
    }
    let expected = store.snapshot();
    drop(store);

    let reopened = open_on(storage, StoreOptions::default());
    assert_eq!(reopened.load_report().source, LoadSource::Persisted);
    assert_eq!(reopened.state(), &expected);
}

#[test]
fn unknown_account_is_tolerated_when_lenient() {
    let (_, mut store) = fresh_store();
    let before = store.snapshot();
    store
        .add_transaction(expense(50.0, "p1", "missing"))
        .expect("lenient record");
    assert_eq!(store.state().accounts, before.accounts);
    assert_eq!(store.state().transaction_count(), before.transaction_count() + 1);
}

#[test]
fn strict_policy_rejects_unknown_references() {
    let storage = Arc::new(MemoryStorage::new());
    let mut store = open_on(
        storage,
        StoreOptions {
            references: ReferencePolicy::Strict,
            ..StoreOptions::default()
        },
    );
    let before = store.snapshot();

    assert!(matches!(
        store.add_transaction(expense(50.0, "p1", "missing")),
        Err(CoreError::AccountNotFound(_))
    ));
    assert!(matches!(
        store.update_budget("nope", 10.0),
        Err(CoreError::BudgetNotFound(_))
    ));
    assert!(matches!(
        store.delete_account("nope"),
        Err(CoreError::AccountNotFound(_))
    ));
    assert_eq!(store.state(), &before);
}

#[test]
fn invalid_amounts_leave_state_untouched() {
    let (storage, mut store) = fresh_store();
    let writes = storage.write_count();
    for amount in [0.0, -10.0, f64::NAN] {
        assert!(matches!(
            store.add_transaction(expense(amount, "p1", "a1")),
            Err(CoreError::Validation(_))
        ));
    }
    assert!(store.update_budget("bg1", -1.0).is_err());
    assert_eq!(storage.write_count(), writes);
    assert_eq!(store.state(), &seed_state(today()));
}

#[test]
fn deleting_account_cascades_to_its_transactions() {
    let (_, mut store) = fresh_store();
    let bg_before: Vec<f64> = store.state().budgets.iter().map(|b| b.spent).collect();
    let owned = SummaryService::account_transactions(store.state(), "a4").len();
    assert!(owned > 0);

    let removal = store.delete_account("a4").expect("delete");
    assert_eq!(removal.transactions_removed, owned);
    assert!(store.state().account("a4").is_none());
    assert!(store.state().transactions.iter().all(|t| t.account_id != "a4"));

    let bg_after: Vec<f64> = store.state().budgets.iter().map(|b| b.spent).collect();
    assert_eq!(bg_before, bg_after);
}

#[test]
fn added_account_gets_masked_number_and_fresh_id() {
    let (_, mut store) = fresh_store();
    let id = store
        .add_account(NewAccount::masked(
            "Kotak",
            AccountType::Savings,
            "7788",
            2500.0,
            Mode::Business,
        ))
        .expect("add account");
    let account = store.state().account(&id).expect("new account");
    assert_eq!(account.account_number, "XXXXXX7788");
    assert_eq!(account.mode, Mode::Business);
    assert_eq!(store.state().accounts.last().map(|a| a.id.as_str()), Some(id.as_str()));
}

#[test]
fn budget_limit_update_keeps_spent() {
    let (_, mut store) = fresh_store();
    store.update_budget("bg2", 7000.0).expect("update");
    let bg2 = store.state().budget("bg2").expect("bg2");
    assert_eq!(bg2.limit, 7000.0);
    assert_eq!(bg2.spent, 6200.0);
}

#[test]
fn reopen_restores_persisted_state() {
    let storage = Arc::new(MemoryStorage::new());
    let mut store = open_on(storage.clone(), StoreOptions::default());
    store.set_mode(Mode::Business).expect("mode");
    store
        .update_preferences(PreferencesPatch {
            dark_mode: Some(true),
            ..PreferencesPatch::default()
        })
        .expect("prefs");
    store.add_transaction(expense(75.0, "b2", "a4")).expect("txn");
    let expected = store.snapshot();
    drop(store);

    let reopened = open_on(storage, StoreOptions::default());
    assert_eq!(reopened.load_report().source, LoadSource::Persisted);
    assert_eq!(reopened.state(), &expected);
    assert_eq!(reopened.mode(), Mode::Business);
}

#[test]
fn malformed_document_falls_back_to_seed() {
    let storage = Arc::new(MemoryStorage::with_entry(STORAGE_KEY, "{\"accounts\": [oops"));
    let store = open_on(storage.clone(), StoreOptions::default());
    assert!(matches!(
        store.load_report().source,
        LoadSource::Recovered { .. }
    ));
    assert_eq!(store.state(), &seed_state(today()));
    let aside = storage
        .get(&format!("{}{}", STORAGE_KEY, CORRUPT_SUFFIX))
        .expect("read")
        .expect("corrupt copy kept");
    assert_eq!(aside, "{\"accounts\": [oops");
}

#[test]
fn reset_restores_seed_but_keeps_login() {
    let (_, mut store) = fresh_store();
    store
        .login(UserPatch {
            name: Some("Asha".into()),
            email: Some("asha@example.com".into()),
            avatar: None,
        })
        .expect("login");
    store.add_transaction(expense(10.0, "p1", "a1")).expect("txn");
    store.set_mode(Mode::Business).expect("mode");

    store.reset_data().expect("reset");

    let mut expected = seed_state(today());
    expected.user.is_logged_in = true;
    assert_eq!(store.state(), &expected);
}

#[test]
fn logout_only_clears_the_flag() {
    let (_, mut store) = fresh_store();
    store
        .login(UserPatch {
            name: Some("Asha".into()),
            ..UserPatch::default()
        })
        .expect("login");
    store.logout().expect("logout");
    assert!(!store.state().user.is_logged_in);
    assert_eq!(store.state().user.name, "Asha");
}

#[test]
fn failed_write_keeps_previous_state() {
    struct FlakyStorage {
        inner: MemoryStorage,
        fail: AtomicBool,
    }

    impl StateStorage for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(CoreError::Storage("disk full".into()));
            }
            self.inner.set(key, value)
        }
    }

    let storage = Arc::new(FlakyStorage {
        inner: MemoryStorage::new(),
        fail: AtomicBool::new(false),
    });
    let mut store = LedgerStore::open_with(
        Box::new(storage.clone()),
        StoreOptions::default(),
        Arc::new(FixedClock::on(today())),
        Arc::new(ScriptedAmounts::new(vec![100])),
    )
    .expect("open");
    storage.fail.store(true, Ordering::SeqCst);

    let before = store.snapshot();
    assert!(matches!(
        store.add_transaction(expense(200.0, "p1", "a1")),
        Err(CoreError::Storage(_))
    ));
    assert_eq!(store.state(), &before);
}

#[test]
fn views_are_partitioned_by_mode() {
    let (_, mut store) = fresh_store();
    let personal = SummaryService::mode_transactions(store.state(), None);
    assert!(personal
        .iter()
        .all(|t| store.state().transaction_mode(t) == Some(Mode::Personal)));

    store.set_mode(Mode::Business).expect("mode");
    let accounts = SummaryService::mode_accounts(store.state());
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].id, "a4");
    let business = SummaryService::mode_transactions(store.state(), None);
    assert!(business.iter().all(|t| t.account_id == "a4"));
    assert!(SummaryService::budget_lines(store.state())
        .iter()
        .all(|line| line.budget_id == "bg3"));
}

#[test]
fn dashboard_counts_current_month_only() {
    let (_, store) = fresh_store();
    let summary = SummaryService::dashboard(store.state(), today());
    assert_eq!(summary.account_count, 3);
    assert!((summary.total_balance - (45200.50 + 125400.0 - 15000.0)).abs() < 1e-6);
    assert!(summary.monthly_income >= 150000.0);
    assert!(summary.monthly_net() < summary.monthly_income);
}

#[test]
fn insights_flag_heavy_categories() {
    let (_, mut store) = fresh_store();
    store
        .add_transaction(expense(INSIGHT_THRESHOLD + 1.0, "p4", "a2"))
        .expect("txn");
    let insights = SummaryService::insights(store.state(), today());
    assert!(!insights.is_empty() && insights.len() <= 3);
    assert!(insights.iter().all(|i| i.trend == Trend::Up));
}

#[test]
fn insights_fall_back_to_healthy_message() {
    let (_, mut store) = fresh_store();
    store.add_account(NewAccount::masked("Empty", AccountType::Savings, "0000", 0.0, Mode::Business)).expect("acc");
    store.delete_account("a4").expect("delete");
    store.set_mode(Mode::Business).expect("mode");
    let insights = SummaryService::insights(store.state(), today());
    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].id, "gen");
    assert_eq!(insights[0].trend, Trend::Neutral);
}

#[test]
fn search_matches_merchant_category_and_amount() {
    let (_, mut store) = fresh_store();
    store
        .add_transaction(NewTransaction::new(
            today(),
            4321.0,
            "Corner Bakery",
            "p3",
            "a1",
            TransactionType::Expense,
        ))
        .expect("txn");
    let by_merchant = SummaryService::mode_transactions(store.state(), Some("bakery"));
    assert_eq!(by_merchant.len(), 1);
    let by_amount = SummaryService::mode_transactions(store.state(), Some("4321"));
    assert!(by_amount.iter().any(|t| t.merchant == "Corner Bakery"));
    let by_category = SummaryService::mode_transactions(store.state(), Some("DINING"));
    assert!(by_category.iter().all(|t| t.category_id == "p3"));
}

#[tokio::test(start_paused = true)]
async fn sync_credits_first_account_of_mode() {
    let (storage, mut store) = fresh_store();
    let started = tokio::time::Instant::now();
    let txn = store
        .sync_bank_data()
        .await
        .expect("sync")
        .expect("transaction recorded");

    assert!(started.elapsed() >= store.options().sync.delay);
    assert_eq!(txn.account_id, "a1");
    assert_eq!(txn.category_id, "p1");
    assert_eq!(txn.merchant, "Bank Interest Accrual");
    assert_eq!(txn.kind, TransactionType::Income);
    assert_eq!(txn.amount, 120.0);
    assert!((balance(&store, "a1") - 45320.50).abs() < 1e-9);
    assert_eq!(&persisted(&storage), store.state());
}

#[tokio::test(start_paused = true)]
async fn sync_in_business_mode_uses_business_category() {
    let (_, mut store) = fresh_store();
    store.set_mode(Mode::Business).expect("mode");
    let txn = store.sync_bank_data().await.expect("sync").expect("txn");
    assert_eq!(txn.account_id, "a4");
    assert_eq!(txn.category_id, "b1");
}

#[tokio::test(start_paused = true)]
async fn sync_without_accounts_is_a_no_op() {
    let (_, mut store) = fresh_store();
    store.delete_account("a4").expect("delete");
    store.set_mode(Mode::Business).expect("mode");
    let before = store.snapshot();
    assert!(store.sync_bank_data().await.expect("sync").is_none());
    assert_eq!(store.state(), &before);
}

#[test]
fn sync_plan_keeps_mode_captured_at_start() {
    let (_, mut store) = fresh_store();
    let plan = store.plan_sync().expect("plan");
    store.set_mode(Mode::Business).expect("mode");
    let txn = store.complete_sync(plan).expect("complete").expect("txn");
    assert_eq!(txn.account_id, "a1");
    assert_eq!(txn.category_id, "p1");
}

#[test]
fn sync_plan_is_dropped_when_account_disappears() {
    let (_, mut store) = fresh_store();
    let plan = store.plan_sync().expect("plan");
    store.delete_account("a1").expect("delete");
    let before = store.snapshot();
    assert!(store.complete_sync(plan).expect("complete").is_none());
    assert_eq!(store.state(), &before);
    assert!(store.state().transactions.iter().all(|t| t.account_id != "a1"));
}

#[test]
fn persisted_document_uses_camel_case_and_type_keys() {
    let (storage, _) = fresh_store();
    let raw = storage.get(STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["mode"], "PERSONAL");
    assert_eq!(value["accounts"][2]["accountType"], "Credit Card");
    assert_eq!(value["accounts"][0]["accountNumber"], "XXXXXX4421");
    assert_eq!(value["categories"][5]["type"], "BUSINESS");
    assert!(value["transactions"][0]["type"].is_string());
    assert_eq!(value["user"]["isLoggedIn"], false);
    assert_eq!(value["preferences"]["darkMode"], false);
}
