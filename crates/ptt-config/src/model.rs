use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Runtime settings for the store, storage location, logging and shell.
/// Every field has a serde default so partial files stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage_key: String,
    /// Directory holding the persisted ledger slot. Defaults to `<home>/data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Directory for ledger backups. Defaults to `<home>/backups`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,
    pub strict_references: bool,
    pub backup_retention: usize,
    pub log_filter: String,
    pub ui_color_enabled: bool,
    pub sync: SyncConfig,
    pub payment_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: "payment_trackers_v3".into(),
            data_dir: None,
            backup_dir: None,
            strict_references: false,
            backup_retention: 5,
            log_filter: "pt_trackers=info,ptt_core=info,ptt_storage_json=info".into(),
            ui_color_enabled: true,
            sync: SyncConfig::default(),
            payment_delay_ms: 2000,
        }
    }
}

impl Config {
    pub fn resolve_data_dir(&self, home: &Path) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| home.join("data"))
    }

    pub fn resolve_backup_dir(&self, home: &Path) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(|| home.join("backups"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".into()));
        }
        if self.backup_retention == 0 {
            return Err(ConfigError::Invalid(
                "backup_retention must be at least 1".into(),
            ));
        }
        self.sync.validate()
    }
}

/// Bank sync simulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub delay_ms: u64,
    pub min_amount: u32,
    /// Exclusive upper bound.
    pub max_amount: u32,
    pub merchant: String,
    pub personal_category: String,
    pub business_category: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1500,
            min_amount: 50,
            max_amount: 550,
            merchant: "Bank Interest Accrual".into(),
            personal_category: "p1".into(),
            business_category: "b1".into(),
        }
    }
}

impl SyncConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_amount == 0 || self.min_amount >= self.max_amount {
            return Err(ConfigError::Invalid(format!(
                "sync amount range {}..{} is empty or includes zero",
                self.min_amount, self.max_amount
            )));
        }
        Ok(())
    }
}
