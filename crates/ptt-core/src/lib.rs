//! ptt-core
//!
//! Ledger services, seed data and the persisting store for Payment Trackers.
//! Depends on ptt-domain. No CLI, no terminal I/O; storage is reached only
//! through the [`StateStorage`] trait.

pub mod account_service;
pub mod budget_service;
pub mod diagnostics;
pub mod entropy;
pub mod error;
pub mod profile_service;
pub mod seed;
pub mod storage;
pub mod store;
pub mod subscription;
pub mod summary_service;
pub mod sync;
pub mod time;
pub mod transaction_service;
pub mod validation;

pub use account_service::*;
pub use budget_service::*;
pub use diagnostics::{budget_drift, ledger_warnings, BudgetDrift};
pub use entropy::{AmountSource, OsAmountSource, ScriptedAmounts};
pub use error::CoreError;
pub use profile_service::*;
pub use storage::{MemoryStorage, StateStorage, STORAGE_KEY};
pub use store::{LedgerStore, LoadReport, LoadSource, StoreOptions};
pub use subscription::{BillingCycle, PaymentStep, Plan, SubscriptionFlow};
pub use summary_service::*;
pub use sync::{SyncPlan, SyncSettings};
pub use time::{Clock, FixedClock, SystemClock};
pub use transaction_service::*;
pub use validation::ReferencePolicy;

#[cfg(test)]
mod tests;
