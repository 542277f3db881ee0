use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    errors::SignalError,
    types::{EntryType, LedgerEntry},
};

/// Free-text input for a manually added income or expense.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryForm {
    pub title: String,
    pub amount: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl EntryForm {
    pub fn new(title: &str, amount: &str) -> Self {
        Self {
            title: title.to_string(),
            amount: amount.to_string(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// Validates the form. The category falls back to the title.
    pub fn into_entry(
        self,
        entry_type: EntryType,
        id: &str,
        date: NaiveDate,
    ) -> Result<LedgerEntry, SignalError> {
        let raw_amount = self.amount.trim();
        let amount = Decimal::from_str(raw_amount)
            .map_err(|_| SignalError::InvalidAmount(self.amount.clone()))?;
        if amount.is_sign_negative() {
            return Err(SignalError::InvalidAmount(self.amount));
        }

        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .or_else(|| Some(self.title.trim().to_string()).filter(|t| !t.is_empty()))
            .ok_or(SignalError::MissingCategory)?;

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(LedgerEntry {
            id: id.to_string(),
            entry_type,
            category,
            amount,
            date,
            description,
        })
    }
}
