//! Wires configuration, file storage and the ledger store together.

use std::{path::PathBuf, time::Duration};

use ptt_config::{Config, ConfigManager, SyncConfig};
use ptt_core::{
    LedgerStore, Plan, ReferencePolicy, StoreOptions, SubscriptionFlow, SyncSettings,
};
use ptt_domain::Transaction;
use ptt_storage_json::JsonFileStorage;
use tokio::runtime::{Builder, Runtime};
use tracing::info;

use crate::errors::AppError;

/// Everything a presentation layer needs: the loaded config, the store and
/// the storage handle used for backups.
pub struct App {
    pub home: PathBuf,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub storage: JsonFileStorage,
    pub store: LedgerStore,
    pub subscription: SubscriptionFlow,
    runtime: Runtime,
}

impl App {
    /// Loads (or defaults) the config under `home`, opens file storage and
    /// the ledger store.
    pub fn bootstrap(home: PathBuf) -> Result<Self, AppError> {
        let config_manager = ConfigManager::with_base_dir(home.clone())?;
        let config = config_manager.load()?;
        let storage = JsonFileStorage::with_retention(
            config.resolve_data_dir(&home),
            config.resolve_backup_dir(&home),
            config.backup_retention,
        )?;
        let store = LedgerStore::open(Box::new(storage.clone()), store_options(&config))?;
        let subscription = SubscriptionFlow::new(Duration::from_millis(config.payment_delay_ms));
        let runtime = Builder::new_current_thread().enable_time().build()?;
        info!(home = %home.display(), "application ready");
        Ok(Self {
            home,
            config_manager,
            config,
            storage,
            store,
            subscription,
            runtime,
        })
    }

    /// Runs a bank sync to completion, including its delay.
    pub fn sync_bank_data(&mut self) -> Result<Option<Transaction>, AppError> {
        Ok(self.runtime.block_on(self.store.sync_bank_data())?)
    }

    /// Waits out the payment processor and returns the activated plan.
    pub fn process_payment(&mut self) -> Result<Plan, AppError> {
        Ok(self.runtime.block_on(self.subscription.process())?)
    }

    /// Reopens the store from storage, e.g. after a backup was restored.
    pub fn reload(&mut self) -> Result<(), AppError> {
        self.store = LedgerStore::open(Box::new(self.storage.clone()), store_options(&self.config))?;
        Ok(())
    }
}

pub fn store_options(config: &Config) -> StoreOptions {
    StoreOptions {
        key: config.storage_key.clone(),
        references: if config.strict_references {
            ReferencePolicy::Strict
        } else {
            ReferencePolicy::Lenient
        },
        sync: sync_settings(&config.sync),
    }
}

pub fn sync_settings(sync: &SyncConfig) -> SyncSettings {
    SyncSettings {
        delay: Duration::from_millis(sync.delay_ms),
        amounts: sync.min_amount..sync.max_amount,
        merchant: sync.merchant.clone(),
        personal_category: sync.personal_category.clone(),
        business_category: sync.business_category.clone(),
    }
}
