use std::time::Duration;

use tracing::{debug, info};

use crate::{
    classifiers::classifier::Classifier,
    errors::SignalResult,
    liveness::Liveness,
    sources::{
        fetch_within,
        traits::{CallLogSource, MessageSource},
    },
    types::{CallLogEntry, ClassifiedTransaction},
};

/// Outcome of a combined SMS and call-log refresh. Each side succeeds or
/// fails on its own.
#[derive(Debug)]
pub struct SyncReport {
    pub transactions: SignalResult<Vec<ClassifiedTransaction>>,
    pub call_logs: SignalResult<Vec<CallLogEntry>>,
}

impl SyncReport {
    /// User-facing messages for whichever fetches failed.
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Err(e) = &self.transactions {
            errors.push(format!("SMS: {}", e));
        }
        if let Err(e) = &self.call_logs {
            errors.push(format!("Call log: {}", e));
        }
        errors
    }

    pub fn is_complete(&self) -> bool {
        self.transactions.is_ok() && self.call_logs.is_ok()
    }
}

/// Fetches messages and call logs concurrently, each bounded by `timeout`.
pub async fn sync_sources(
    sms: &dyn MessageSource,
    calls: &dyn CallLogSource,
    call_limit: Option<usize>,
    classifier: &Classifier,
    timeout: Duration,
    liveness: Option<&Liveness>,
) -> SyncReport {
    let (messages, call_logs) = tokio::join!(
        fetch_within(sms.fetch_messages(), timeout, liveness),
        fetch_within(calls.fetch_call_logs(call_limit), timeout, liveness),
    );

    let transactions = messages.map(|messages| classifier.classify_all(messages));

    let report = SyncReport {
        transactions,
        call_logs,
    };

    if report.is_complete() {
        debug!("sms and call-log sync complete");
    } else {
        info!(failures = report.errors().len(), "sync finished with partial data");
    }

    report
}
