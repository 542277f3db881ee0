//! Turn device SMS into categorized income and expense entries.
//!
//! ```rust,ignore
//! use sms_ledger_rs::{Ledger, PipelineBuilder, StaticSource};
//!
//! let transactions = PipelineBuilder::new()
//!     .source(StaticSource::from_json(&rows)?)
//!     .run()
//!     .await?;
//!
//! let mut ledger = Ledger::default();
//! ledger.merge_classified(transactions);
//! let spent = ledger.percentage_spent(&budget);
//! ```

mod builder;
mod config;
mod liveness;
mod sync;
mod types;

pub mod classifiers;
pub mod errors;
pub mod ledger;
pub mod sources;

pub use builder::PipelineBuilder;
pub use classifiers::prelude::*;
pub use config::{DEFAULT_TIMEOUT_MS, PipelineSettings};
pub use ledger::prelude::*;
pub use liveness::Liveness;
pub use sources::prelude::*;
pub use sync::{SyncReport, sync_sources};
pub use types::{
    AggregateTotals, CallLogEntry, CallType, ClassifiedTransaction, EntryType, LedgerEntry,
    MESSAGE_ENTRY_PREFIX, RawMessage, TransactionKind,
};
