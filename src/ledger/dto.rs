use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    errors::SignalError,
    types::{EntryType, LedgerEntry},
};

pub(super) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(super) const HEADER: [&str; 6] = ["id", "type", "category", "amount", "date", "description"];

/// One CSV row of an exported ledger.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct LedgerRow {
    pub(super) id: String,
    #[serde(rename = "type")]
    pub(super) entry_type: String,
    pub(super) category: String,
    pub(super) amount: String,
    pub(super) date: String,
    #[serde(default)]
    pub(super) description: Option<String>,
}

impl From<&LedgerEntry> for LedgerRow {
    fn from(entry: &LedgerEntry) -> Self {
        LedgerRow {
            id: entry.id.clone(),
            entry_type: entry.entry_type.as_str().to_string(),
            category: entry.category.clone(),
            amount: entry.amount.to_string(),
            date: entry.date.format(DATE_FORMAT).to_string(),
            description: entry.description.clone(),
        }
    }
}

impl TryFrom<LedgerRow> for LedgerEntry {
    type Error = SignalError;

    fn try_from(row: LedgerRow) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(row.date.trim(), DATE_FORMAT)
            .map_err(|_| SignalError::InvalidDate(row.date.clone()))?;

        let amount = row
            .amount
            .trim()
            .parse::<Decimal>()
            .map_err(|_| SignalError::InvalidAmount(row.amount.clone()))?;

        Ok(LedgerEntry {
            id: row.id,
            entry_type: row.entry_type.parse::<EntryType>()?,
            category: row.category,
            amount,
            date,
            description: row.description.filter(|d| !d.is_empty()),
        })
    }
}
