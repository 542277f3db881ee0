use std::{sync::Arc, time::Duration};

use tracing::debug;

use crate::{
    classifiers::prelude::*,
    config::{DEFAULT_TIMEOUT_MS, PipelineSettings},
    errors::{SignalError, SignalResult},
    liveness::Liveness,
    sources::{fetch_within, traits::MessageSource},
    types::ClassifiedTransaction,
};

/// Fetch → classify → filter, configured fluently.
///
/// ```rust,ignore
/// let transactions = PipelineBuilder::new()
///     .source(StaticSource::from_json(&rows)?)
///     .timeout(Duration::from_secs(5))
///     .run()
///     .await?;
/// ```
pub struct PipelineBuilder {
    source: Option<Arc<dyn MessageSource>>,
    rules: KeywordRules,
    extractor: Option<Box<dyn AmountExtractor>>,
    timeout: Duration,
    liveness: Option<Liveness>,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            source: None,
            rules: KeywordRules::default(),
            extractor: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            liveness: None,
        }
    }
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &PipelineSettings) -> Self {
        Self::new()
            .rules(settings.rules.clone())
            .timeout(settings.timeout())
    }

    pub fn source<S>(self, source: S) -> Self
    where
        S: MessageSource + 'static,
    {
        self.shared_source(Arc::new(source))
    }

    pub fn shared_source(mut self, source: Arc<dyn MessageSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn rules(mut self, rules: KeywordRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn extractor<E>(mut self, extractor: E) -> Self
    where
        E: AmountExtractor + 'static,
    {
        self.extractor = Some(Box::new(extractor));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn liveness(mut self, liveness: Liveness) -> Self {
        self.liveness = Some(liveness);
        self
    }

    fn classifier(rules: KeywordRules, extractor: Option<Box<dyn AmountExtractor>>) -> Classifier {
        let classifier = Classifier::new(rules);
        match extractor {
            Some(extractor) => classifier.with_boxed_extractor(extractor),
            None => classifier,
        }
    }

    /// Runs the pipeline and returns only credit and debit transactions,
    /// most recent first.
    pub async fn run(self) -> SignalResult<Vec<ClassifiedTransaction>> {
        let source = self.source.ok_or(SignalError::MissingSource)?;

        let messages =
            fetch_within(source.fetch_messages(), self.timeout, self.liveness.as_ref()).await?;
        let fetched = messages.len();

        let classifier = Self::classifier(self.rules, self.extractor);
        let transactions = classifier.classify_all(messages);

        debug!(
            fetched,
            kept = transactions.len(),
            rules_version = classifier.rules().version(),
            "classified device messages"
        );

        Ok(transactions)
    }

    /// Like [`run`](Self::run), converting each transaction into `T`.
    pub async fn run_into<T>(self) -> SignalResult<Vec<T>>
    where
        T: TryFrom<ClassifiedTransaction, Error = SignalError>,
    {
        self.run().await?.into_iter().map(T::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        sources::prelude::*,
        types::{LedgerEntry, RawMessage, TransactionKind},
    };
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    // 2025-10-18T10:00:00Z and one hour earlier
    const LATE: &str = "1760781600000";
    const EARLY: &str = "1760778000000";

    fn source() -> StaticSource {
        StaticSource::new(vec![
            RawMessage::new("1", "AX-HDFCBK", "Your account credited INR 1,200.50", EARLY),
            RawMessage::new("2", "Friend", "Meeting at 5pm", EARLY),
            RawMessage::new("3", "VM-SBI", "You spent Rs 45 at store", LATE),
        ])
    }

    struct SlowSource;

    #[async_trait]
    impl MessageSource for SlowSource {
        async fn fetch_messages(&self) -> SignalResult<Vec<RawMessage>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_builder_defaults() {
        let builder = PipelineBuilder::new();
        assert!(builder.source.is_none());
        assert!(builder.extractor.is_none());
        assert!(builder.liveness.is_none());
        assert_eq!(builder.timeout, Duration::from_secs(10));
        assert_eq!(builder.rules, KeywordRules::default());
    }

    #[test]
    fn test_builder_from_settings() {
        let settings = PipelineSettings {
            timeout_ms: 1500,
            ..PipelineSettings::default()
        };
        let builder = PipelineBuilder::from_settings(&settings);
        assert_eq!(builder.timeout, Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_run_missing_source() {
        let result = PipelineBuilder::new().run().await;
        assert!(matches!(result, Err(SignalError::MissingSource)));
    }

    #[tokio::test]
    async fn test_run_classifies_and_filters() {
        let transactions = PipelineBuilder::new().source(source()).run().await.unwrap();

        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].id, "3");
        assert_eq!(transactions[0].kind, TransactionKind::Debit);
        assert_eq!(transactions[0].amount, Some(Decimal::from(45)));
        assert_eq!(transactions[1].kind, TransactionKind::Credit);
        assert_eq!(transactions[1].amount, Some(Decimal::from_str("1200.50").unwrap()));
    }

    #[tokio::test]
    async fn test_run_into_ledger_entries() {
        let entries: Vec<LedgerEntry> = PipelineBuilder::new()
            .source(source())
            .run_into()
            .await
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "sms-3");
        assert_eq!(entries[0].category, "VM-SBI");
    }

    #[tokio::test]
    async fn test_run_with_custom_rules_and_extractor() {
        let rules = KeywordRules::default().with_rule(TransactionKind::Debit, "meeting");
        let transactions = PipelineBuilder::new()
            .source(source())
            .rules(rules)
            .extractor(|_: &str| -> Option<Decimal> { None })
            .run()
            .await
            .unwrap();

        assert_eq!(transactions.len(), 3);
        assert!(transactions.iter().all(|t| t.amount.is_none()));
    }

    #[tokio::test]
    async fn test_run_permission_denied() {
        let result = PipelineBuilder::new()
            .source(source().with_permission(Permission::Denied))
            .run()
            .await;
        assert!(matches!(result, Err(SignalError::PermissionDenied)));
    }

    #[tokio::test]
    async fn test_run_unsupported_platform() {
        let result = PipelineBuilder::new().source(UnsupportedSource).run().await;
        assert!(matches!(result, Err(SignalError::UnsupportedPlatform)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_times_out() {
        let result = PipelineBuilder::new()
            .source(SlowSource)
            .timeout(Duration::from_secs(10))
            .run()
            .await;
        assert!(matches!(result, Err(SignalError::Timeout(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_discarded_when_consumer_ends() {
        let liveness = Liveness::new();
        let ender = liveness.clone();

        let run = PipelineBuilder::new().source(SlowSource).liveness(liveness).run();
        let end = async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            ender.end();
        };

        let (result, ()) = tokio::join!(run, end);
        assert!(matches!(result, Err(SignalError::Cancelled)));
    }
}
