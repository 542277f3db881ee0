use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{AggregateTotals, ClassifiedTransaction, LedgerEntry};

pub mod aggregator;
mod dto;
pub mod export;
pub mod form;

pub mod prelude {
    pub use super::aggregator::{percentage_spent, totals};
    pub use super::export::{export_csv, import_csv};
    pub use super::form::EntryForm;
    pub use super::{Ledger, MergePolicy};
}

/// How classified transactions are folded into an existing ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergePolicy {
    /// Skip entries whose id is already present
    pub dedupe_by_id: bool,
    /// Re-sort the whole list newest date first after merging
    pub sort_by_date: bool,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            dedupe_by_id: true,
            sort_by_date: false,
        }
    }
}

/// In-memory list of ledger entries, newest block first.
///
/// Totals are never cached; every read recomputes them from the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    #[serde(default)]
    policy: MergePolicy,
}

impl Ledger {
    pub fn new(policy: MergePolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
        }
    }

    pub fn with_entries(mut self, entries: Vec<LedgerEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LedgerEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Adds a manual entry at the top of the list. With `dedupe_by_id` an
    /// entry whose id is already present is rejected and false is returned.
    pub fn add_entry(&mut self, entry: LedgerEntry) -> bool {
        if self.policy.dedupe_by_id && self.get(&entry.id).is_some() {
            debug!(id = %entry.id, "entry id already present");
            return false;
        }
        self.entries.insert(0, entry);
        true
    }

    /// Replaces the entry with the same id. Returns false when absent.
    pub fn update(&mut self, entry: LedgerEntry) -> bool {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<LedgerEntry> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Prepends entries synthesized from `transactions` ahead of the existing
    /// ones and returns how many were added.
    ///
    /// `other` messages and messages with unusable timestamps are skipped.
    pub fn merge_classified<I>(&mut self, transactions: I) -> usize
    where
        I: IntoIterator<Item = ClassifiedTransaction>,
    {
        let mut seen: HashSet<String> = if self.policy.dedupe_by_id {
            self.entries.iter().map(|e| e.id.clone()).collect()
        } else {
            HashSet::new()
        };

        let mut incoming = Vec::new();
        for txn in transactions.into_iter().filter(ClassifiedTransaction::is_transaction) {
            let message_id = txn.id.clone();
            let entry = match LedgerEntry::try_from(txn) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(message_id = %message_id, error = %e, "skipping message that cannot become a ledger entry");
                    continue;
                }
            };

            if self.policy.dedupe_by_id && !seen.insert(entry.id.clone()) {
                continue;
            }
            incoming.push(entry);
        }

        let added = incoming.len();
        incoming.append(&mut self.entries);
        self.entries = incoming;

        if self.policy.sort_by_date {
            self.entries.sort_by(|a, b| b.date.cmp(&a.date));
        }

        debug!(added, total = self.entries.len(), "merged classified transactions");
        added
    }

    pub fn totals(&self) -> AggregateTotals {
        aggregator::totals(&self.entries)
    }

    pub fn percentage_spent(&self, budget: &str) -> Decimal {
        aggregator::percentage_spent(self.totals().total_expense, budget)
    }
}
