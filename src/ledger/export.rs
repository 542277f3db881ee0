use csv::{ReaderBuilder, WriterBuilder};
use tracing::debug;

use super::dto::{HEADER, LedgerRow};
use crate::{
    errors::{SignalError, SignalResult},
    types::LedgerEntry,
};

/// Writes entries as CSV with an `id,type,category,amount,date,description`
/// header. The header is written even when there are no entries.
pub fn export_csv<'a, I>(entries: I) -> SignalResult<String>
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
    writer.write_record(HEADER)?;

    let mut count = 0usize;
    for entry in entries {
        writer.serialize(LedgerRow::from(entry))?;
        count += 1;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| SignalError::Csv(e.into_error().into()))?;
    debug!(count, "exported ledger entries");

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Reads entries written by [`export_csv`].
pub fn import_csv(content: &str) -> SignalResult<Vec<LedgerEntry>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let mut entries = Vec::new();

    for result in reader.deserialize::<LedgerRow>() {
        let row = result?;
        entries.push(row.try_into()?);
    }

    debug!(count = entries.len(), "imported ledger entries");
    Ok(entries)
}
