use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{classifiers::keywords::KeywordRules, errors::SignalResult, ledger::MergePolicy};

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Pipeline configuration. Every field is optional in JSON.
///
/// ```json
/// {
///   "timeout_ms": 5000,
///   "merge_policy": {"dedupe_by_id": true, "sort_by_date": true},
///   "rules": {"version": 2, "rules": [{"kind": "debit", "keyword": "emi"}]}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub timeout_ms: u64,
    pub merge_policy: MergePolicy,
    pub rules: KeywordRules,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            merge_policy: MergePolicy::default(),
            rules: KeywordRules::default(),
        }
    }
}

impl PipelineSettings {
    pub fn from_json(content: &str) -> SignalResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
