use serde::Deserialize;

use crate::{
    errors::SignalError,
    types::{CallLogEntry, CallType, RawMessage, parse_millis},
};

/// SMS row as the device content provider reports it.
#[derive(Debug, Deserialize)]
pub struct DeviceSmsRow {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    pub date: String,
}

/// Call-log row as the device content provider reports it. Numeric
/// columns arrive as strings.
#[derive(Debug, Deserialize)]
pub struct DeviceCallRow {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub call_type: String,
    pub date: String,
    #[serde(default)]
    pub duration: Option<String>,
}

impl TryFrom<DeviceSmsRow> for RawMessage {
    type Error = SignalError;

    fn try_from(row: DeviceSmsRow) -> Result<Self, Self::Error> {
        let id = row
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| SignalError::MalformedRow("sms row without _id".to_string()))?;

        parse_millis(&row.date)
            .map_err(|_| SignalError::MalformedRow(format!("sms {} has date '{}'", id, row.date)))?;

        Ok(RawMessage {
            id,
            address: row.address.unwrap_or_default(),
            body: row.body.unwrap_or_default(),
            timestamp_millis: row.date.trim().to_string(),
        })
    }
}

impl TryFrom<DeviceCallRow> for CallLogEntry {
    type Error = SignalError;

    fn try_from(row: DeviceCallRow) -> Result<Self, Self::Error> {
        let code = row
            .call_type
            .trim()
            .parse::<i32>()
            .map_err(|_| SignalError::MalformedRow(format!("call type '{}'", row.call_type)))?;

        parse_millis(&row.date)
            .map_err(|_| SignalError::MalformedRow(format!("call date '{}'", row.date)))?;

        let duration_secs = match row.duration.as_deref().map(str::trim) {
            None | Some("") => 0,
            Some(value) => value
                .parse()
                .map_err(|_| SignalError::MalformedRow(format!("call duration '{}'", value)))?,
        };

        Ok(CallLogEntry {
            id: row.id,
            number: row.number,
            name: row.name,
            call_type: CallType::from(code),
            timestamp_millis: row.date.trim().to_string(),
            duration_secs,
        })
    }
}

/// Parses a JSON array of SMS rows.
pub fn sms_rows_from_json(content: &str) -> Result<Vec<RawMessage>, SignalError> {
    let rows: Vec<DeviceSmsRow> = serde_json::from_str(content)?;
    rows.into_iter().map(RawMessage::try_from).collect()
}

/// Parses a JSON array of call-log rows.
pub fn call_rows_from_json(content: &str) -> Result<Vec<CallLogEntry>, SignalError> {
    let rows: Vec<DeviceCallRow> = serde_json::from_str(content)?;
    rows.into_iter().map(CallLogEntry::try_from).collect()
}
