use async_trait::async_trait;

use crate::{
    errors::SignalResult,
    types::{CallLogEntry, RawMessage},
};

/// Read access to the device message store.
///
/// Every call re-queries the store. Implementations return messages most
/// recent first and must not mutate device state.
#[async_trait]
pub trait MessageSource: Send + Sync {
    async fn fetch_messages(&self) -> SignalResult<Vec<RawMessage>>;
}

/// Read access to the device call log, most recent first.
#[async_trait]
pub trait CallLogSource: Send + Sync {
    async fn fetch_call_logs(&self, limit: Option<usize>) -> SignalResult<Vec<CallLogEntry>>;
}
