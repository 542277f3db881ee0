use crate::errors::{SignalError, SignalResult};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A message as read from the device store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    pub id: String,
    pub address: String,
    pub body: String,
    /// Epoch milliseconds, kept as the store reports it
    pub timestamp_millis: String,
}

impl RawMessage {
    pub fn new(id: &str, address: &str, body: &str, timestamp_millis: &str) -> Self {
        Self {
            id: id.to_string(),
            address: address.to_string(),
            body: body.to_string(),
            timestamp_millis: timestamp_millis.to_string(),
        }
    }

    pub fn timestamp(&self) -> SignalResult<DateTime<Utc>> {
        parse_millis(&self.timestamp_millis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Credit,
    Debit,
    Other,
}

/// A message after keyword classification and amount extraction.
///
/// `amount` is best effort: a credit or debit message may still carry no
/// amount when the body has no numeric token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedTransaction {
    pub id: String,
    pub source_address: String,
    pub body: String,
    pub timestamp_millis: String,
    pub kind: TransactionKind,
    pub amount: Option<Decimal>,
}

impl ClassifiedTransaction {
    pub fn is_transaction(&self) -> bool {
        self.kind != TransactionKind::Other
    }

    pub fn timestamp(&self) -> SignalResult<DateTime<Utc>> {
        parse_millis(&self.timestamp_millis)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Income => "income",
            EntryType::Expense => "expense",
        }
    }
}

impl std::str::FromStr for EntryType {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(EntryType::Income),
            "expense" => Ok(EntryType::Expense),
            _ => Err(SignalError::InvalidEntryType(s.to_string())),
        }
    }
}

/// One row of the ledger, either typed in by the user or synthesized from
/// a classified message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    pub entry_type: EntryType,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: Option<String>,
}

/// Prefix for ids of entries synthesized from messages, keeping them apart
/// from manually assigned ids.
pub const MESSAGE_ENTRY_PREFIX: &str = "sms-";

impl TryFrom<ClassifiedTransaction> for LedgerEntry {
    type Error = SignalError;

    fn try_from(txn: ClassifiedTransaction) -> Result<Self, Self::Error> {
        let entry_type = match txn.kind {
            TransactionKind::Credit => EntryType::Income,
            TransactionKind::Debit => EntryType::Expense,
            TransactionKind::Other => return Err(SignalError::NotATransaction),
        };

        Ok(LedgerEntry {
            id: format!("{MESSAGE_ENTRY_PREFIX}{}", txn.id),
            entry_type,
            date: txn.timestamp()?.date_naive(),
            category: txn.source_address,
            amount: txn.amount.unwrap_or(Decimal::ZERO),
            description: Some(txn.body),
        })
    }
}

/// Income and expense sums over a set of ledger entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTotals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
}

impl AggregateTotals {
    pub fn net(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Incoming,
    Outgoing,
    Missed,
    Other(i32),
}

impl From<i32> for CallType {
    fn from(code: i32) -> Self {
        match code {
            1 => CallType::Incoming,
            2 => CallType::Outgoing,
            3 => CallType::Missed,
            other => CallType::Other(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallLogEntry {
    pub id: Option<String>,
    pub number: Option<String>,
    pub name: Option<String>,
    pub call_type: CallType,
    pub timestamp_millis: String,
    pub duration_secs: u64,
}

pub(crate) fn parse_millis(value: &str) -> SignalResult<DateTime<Utc>> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .ok_or_else(|| SignalError::InvalidTimestamp(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn classified(kind: TransactionKind, amount: Option<&str>) -> ClassifiedTransaction {
        ClassifiedTransaction {
            id: "42".to_string(),
            source_address: "VM-HDFCBK".to_string(),
            body: "Rs 500 debited".to_string(),
            // 2025-10-18T10:00:00Z
            timestamp_millis: "1760781600000".to_string(),
            kind,
            amount: amount.map(|a| Decimal::from_str(a).unwrap()),
        }
    }

    #[rstest]
    #[case(TransactionKind::Credit, EntryType::Income)]
    #[case(TransactionKind::Debit, EntryType::Expense)]
    fn test_ledger_entry_from_classified(#[case] kind: TransactionKind, #[case] expected: EntryType) {
        let entry: LedgerEntry = classified(kind, Some("500")).try_into().unwrap();

        assert_eq!(entry.entry_type, expected);
        assert_eq!(entry.id, "sms-42");
        assert_eq!(entry.category, "VM-HDFCBK");
        assert_eq!(entry.amount, Decimal::from(500));
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 10, 18).unwrap());
        assert_eq!(entry.description.as_deref(), Some("Rs 500 debited"));
    }

    #[test]
    fn test_ledger_entry_missing_amount_defaults_to_zero() {
        let entry: LedgerEntry = classified(TransactionKind::Credit, None).try_into().unwrap();
        assert_eq!(entry.amount, Decimal::ZERO);
    }

    #[test]
    fn test_ledger_entry_rejects_other() {
        let result: Result<LedgerEntry, _> = classified(TransactionKind::Other, None).try_into();
        assert!(matches!(result, Err(SignalError::NotATransaction)));
    }

    #[test]
    fn test_ledger_entry_rejects_bad_timestamp() {
        let mut txn = classified(TransactionKind::Debit, Some("1"));
        txn.timestamp_millis = "yesterday".to_string();

        let result: Result<LedgerEntry, _> = txn.try_into();
        assert!(matches!(result, Err(SignalError::InvalidTimestamp(_))));
    }

    #[rstest]
    #[case("0", true)]
    #[case(" 1760781600000 ", true)]
    #[case("", false)]
    #[case("12ab", false)]
    #[case("99999999999999999999", false)]
    fn test_parse_millis(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(parse_millis(input).is_ok(), ok);
    }

    #[rstest]
    #[case("income", EntryType::Income)]
    #[case("Expense", EntryType::Expense)]
    #[case(" INCOME ", EntryType::Income)]
    fn test_entry_type_from_str(#[case] input: &str, #[case] expected: EntryType) {
        assert_eq!(EntryType::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_entry_type_from_str_invalid() {
        assert!(matches!(
            EntryType::from_str("transfer"),
            Err(SignalError::InvalidEntryType(_))
        ));
    }

    #[rstest]
    #[case(1, CallType::Incoming)]
    #[case(2, CallType::Outgoing)]
    #[case(3, CallType::Missed)]
    #[case(5, CallType::Other(5))]
    fn test_call_type_from_code(#[case] code: i32, #[case] expected: CallType) {
        assert_eq!(CallType::from(code), expected);
    }

    #[test]
    fn test_totals_net() {
        let totals = AggregateTotals {
            total_income: Decimal::from(5000),
            total_expense: Decimal::from(700),
        };
        assert_eq!(totals.net(), Decimal::from(4300));
    }

    #[test]
    fn test_ledger_entry_serialization() {
        let entry: LedgerEntry = classified(TransactionKind::Debit, Some("45.50")).try_into().unwrap();

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"expense\""));
        assert!(json.contains("VM-HDFCBK"));

        let deserialized: LedgerEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, entry);
    }
}
