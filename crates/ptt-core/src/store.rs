//! The ledger store: owns the state, applies mutations through the services,
//! and persists the whole document after every successful change.

use std::sync::Arc;

use ptt_domain::{
    LedgerState, Mode, NewAccount, NewTransaction, PreferencesPatch, Transaction, UserPatch,
};
use tracing::{debug, info, warn};

use crate::{
    account_service::{AccountRemoval, AccountService},
    budget_service::BudgetService,
    diagnostics::ledger_warnings,
    entropy::{AmountSource, OsAmountSource},
    profile_service::ProfileService,
    seed::seed_state,
    storage::{StateStorage, STORAGE_KEY},
    sync::{SyncPlan, SyncSettings},
    time::{Clock, SystemClock},
    transaction_service::TransactionService,
    validation::ReferencePolicy,
    CoreError,
};

/// Suffix of the slot a corrupt document is moved to before falling back to seed data.
pub const CORRUPT_SUFFIX: &str = ".corrupt";

#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub key: String,
    pub references: ReferencePolicy,
    pub sync: SyncSettings,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key: STORAGE_KEY.into(),
            references: ReferencePolicy::default(),
            sync: SyncSettings::default(),
        }
    }
}

/// Where the initial state came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    Seeded,
    /// The stored document failed to parse; seed data was used instead.
    Recovered { error: String },
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub source: LoadSource,
    pub warnings: Vec<String>,
}

pub struct LedgerStore {
    state: LedgerState,
    seed: LedgerState,
    storage: Box<dyn StateStorage>,
    clock: Arc<dyn Clock>,
    amounts: Arc<dyn AmountSource>,
    options: StoreOptions,
    load_report: LoadReport,
}

impl LedgerStore {
    pub fn open(storage: Box<dyn StateStorage>, options: StoreOptions) -> Result<Self, CoreError> {
        Self::open_with(
            storage,
            options,
            Arc::new(SystemClock),
            Arc::new(OsAmountSource),
        )
    }

    /// Loads the persisted document, or seeds a fresh one when the slot is
    /// empty. A document that fails to parse is copied aside under
    /// `<key>.corrupt` and replaced by seed data.
    pub fn open_with(
        storage: Box<dyn StateStorage>,
        options: StoreOptions,
        clock: Arc<dyn Clock>,
        amounts: Arc<dyn AmountSource>,
    ) -> Result<Self, CoreError> {
        let seed = seed_state(clock.today());
        let (state, source) = match storage.get(&options.key)? {
            Some(raw) => match serde_json::from_str::<LedgerState>(&raw) {
                Ok(state) => (state, LoadSource::Persisted),
                Err(err) => {
                    warn!(key = %options.key, error = %err, "stored ledger is malformed, using seed data");
                    storage.set(&format!("{}{}", options.key, CORRUPT_SUFFIX), &raw)?;
                    (seed.clone(), LoadSource::Recovered { error: err.to_string() })
                }
            },
            None => (seed.clone(), LoadSource::Seeded),
        };

        let warnings = ledger_warnings(&state);
        for warning in &warnings {
            warn!("{}", warning);
        }
        info!(
            key = %options.key,
            source = ?source,
            accounts = state.accounts.len(),
            transactions = state.transactions.len(),
            "ledger opened"
        );

        let mut store = Self {
            state: state.clone(),
            seed,
            storage,
            clock,
            amounts,
            options,
            load_report: LoadReport { source, warnings },
        };
        if store.load_report.source == LoadSource::Seeded {
            store.commit(state)?;
        }
        Ok(store)
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> LedgerState {
        self.state.clone()
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn add_transaction(&mut self, draft: NewTransaction) -> Result<Transaction, CoreError> {
        let policy = self.options.references;
        self.apply(|state| TransactionService::record(state, draft, policy))
    }

    /// Returns the id assigned to the new account.
    pub fn add_account(&mut self, draft: NewAccount) -> Result<String, CoreError> {
        self.apply(|state| AccountService::add(state, draft))
    }

    pub fn delete_account(&mut self, id: &str) -> Result<AccountRemoval, CoreError> {
        let policy = self.options.references;
        self.apply(|state| AccountService::remove(state, id, policy))
    }

    pub fn update_budget(&mut self, budget_id: &str, limit: f64) -> Result<(), CoreError> {
        let policy = self.options.references;
        self.apply(|state| BudgetService::set_limit(state, budget_id, limit, policy))
    }

    pub fn set_mode(&mut self, mode: Mode) -> Result<(), CoreError> {
        self.apply(|state| {
            ProfileService::set_mode(state, mode);
            Ok(())
        })
    }

    pub fn update_preferences(&mut self, patch: PreferencesPatch) -> Result<(), CoreError> {
        self.apply(|state| {
            ProfileService::update_preferences(state, patch);
            Ok(())
        })
    }

    pub fn login(&mut self, patch: UserPatch) -> Result<(), CoreError> {
        self.apply(|state| {
            ProfileService::login(state, patch);
            Ok(())
        })
    }

    pub fn logout(&mut self) -> Result<(), CoreError> {
        self.apply(|state| {
            ProfileService::logout(state);
            Ok(())
        })
    }

    /// Restores the seed captured at startup, keeping only the login flag.
    pub fn reset_data(&mut self) -> Result<(), CoreError> {
        let mut next = self.seed.clone();
        next.user.is_logged_in = self.state.user.is_logged_in;
        self.commit(next)?;
        info!("ledger reset to seed data");
        Ok(())
    }

    /// Captures the sync target from the current state. `None` when the
    /// active mode has no account.
    pub fn plan_sync(&self) -> Option<SyncPlan> {
        SyncPlan::capture(&self.state, &self.options.sync, self.amounts.as_ref())
    }

    /// Records the income described by `plan`, dated today. If the target
    /// account was deleted in the meantime the plan is dropped.
    pub fn complete_sync(&mut self, plan: SyncPlan) -> Result<Option<Transaction>, CoreError> {
        if self.state.account(&plan.account_id).is_none() {
            warn!(account = %plan.account_id, "sync target account no longer exists, dropping");
            return Ok(None);
        }
        let today = self.clock.today();
        let draft = plan.into_draft(&self.options.sync.merchant, today);
        let txn = self.apply(|state| TransactionService::record(state, draft, ReferencePolicy::Lenient))?;
        info!(transaction = %txn.id, amount = txn.amount, account = %txn.account_id, "bank sync recorded");
        Ok(Some(txn))
    }

    /// Waits for the configured delay, then credits a random interest amount
    /// to the first account of the mode active when the call started.
    pub async fn sync_bank_data(&mut self) -> Result<Option<Transaction>, CoreError> {
        let plan = self.plan_sync();
        debug!(planned = plan.is_some(), "bank sync started");
        tokio::time::sleep(self.options.sync.delay).await;
        match plan {
            Some(plan) => self.complete_sync(plan),
            None => Ok(None),
        }
    }

    /// Runs `op` against a copy of the state and installs the copy only if
    /// both the operation and the write succeed.
    fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut LedgerState) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let mut next = self.state.clone();
        let output = op(&mut next)?;
        self.commit(next)?;
        Ok(output)
    }

    fn commit(&mut self, next: LedgerState) -> Result<(), CoreError> {
        let document = serde_json::to_string(&next)?;
        self.storage.set(&self.options.key, &document)?;
        debug!(key = %self.options.key, bytes = document.len(), "ledger persisted");
        self.state = next;
        Ok(())
    }
}
