use async_trait::async_trait;

use super::{
    dto::{call_rows_from_json, sms_rows_from_json},
    traits::{CallLogSource, MessageSource},
};
use crate::{
    errors::{SignalError, SignalResult},
    types::{CallLogEntry, RawMessage, parse_millis},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    #[default]
    Granted,
    Denied,
}

/// Source backed by rows already pulled out of the device store, e.g. by a
/// platform bridge that hands over the provider cursor as JSON.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    messages: Vec<RawMessage>,
    call_logs: Vec<CallLogEntry>,
    sms_permission: Permission,
    call_log_permission: Permission,
}

impl StaticSource {
    pub fn new(messages: Vec<RawMessage>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn from_json(content: &str) -> SignalResult<Self> {
        Ok(Self::new(sms_rows_from_json(content)?))
    }

    pub fn with_call_logs(mut self, call_logs: Vec<CallLogEntry>) -> Self {
        self.call_logs = call_logs;
        self
    }

    pub fn with_call_logs_json(self, content: &str) -> SignalResult<Self> {
        Ok(self.with_call_logs(call_rows_from_json(content)?))
    }

    /// Sets both the SMS and the call-log permission.
    pub fn with_permission(self, permission: Permission) -> Self {
        self.with_sms_permission(permission)
            .with_call_log_permission(permission)
    }

    pub fn with_sms_permission(mut self, permission: Permission) -> Self {
        self.sms_permission = permission;
        self
    }

    pub fn with_call_log_permission(mut self, permission: Permission) -> Self {
        self.call_log_permission = permission;
        self
    }
}

impl Permission {
    fn check(self) -> SignalResult<()> {
        match self {
            Permission::Granted => Ok(()),
            Permission::Denied => Err(SignalError::PermissionDenied),
        }
    }
}

fn newest_first<T>(mut items: Vec<T>, millis: impl Fn(&T) -> &str) -> Vec<T> {
    // Rows were validated on the way in; anything unparseable sorts last.
    items.sort_by_key(|item| std::cmp::Reverse(parse_millis(millis(item)).ok()));
    items
}

#[async_trait]
impl MessageSource for StaticSource {
    async fn fetch_messages(&self) -> SignalResult<Vec<RawMessage>> {
        self.sms_permission.check()?;
        Ok(newest_first(self.messages.clone(), |m| m.timestamp_millis.as_str()))
    }
}

#[async_trait]
impl CallLogSource for StaticSource {
    async fn fetch_call_logs(&self, limit: Option<usize>) -> SignalResult<Vec<CallLogEntry>> {
        self.call_log_permission.check()?;
        let mut logs = newest_first(self.call_logs.clone(), |c| c.timestamp_millis.as_str());
        if let Some(limit) = limit {
            logs.truncate(limit);
        }
        Ok(logs)
    }
}

/// Stand-in for hosts without a device message store.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedSource;

#[async_trait]
impl MessageSource for UnsupportedSource {
    async fn fetch_messages(&self) -> SignalResult<Vec<RawMessage>> {
        Err(SignalError::UnsupportedPlatform)
    }
}

#[async_trait]
impl CallLogSource for UnsupportedSource {
    async fn fetch_call_logs(&self, _limit: Option<usize>) -> SignalResult<Vec<CallLogEntry>> {
        Err(SignalError::UnsupportedPlatform)
    }
}
