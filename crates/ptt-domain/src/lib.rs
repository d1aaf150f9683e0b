//! ptt-domain
//!
//! Pure domain models (LedgerState, Account, Category, Transaction, Budget, profile records).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod account;
pub mod budget;
pub mod category;
pub mod common;
pub mod ledger;
pub mod profile;
pub mod transaction;

pub use account::*;
pub use budget::*;
pub use category::*;
pub use common::*;
pub use ledger::*;
pub use profile::*;
pub use transaction::*;
