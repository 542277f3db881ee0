use std::fmt;

use super::{amount::RegexAmountExtractor, keywords::KeywordRules, traits::AmountExtractor};
use crate::types::{ClassifiedTransaction, RawMessage, TransactionKind};

/// Keyword classifier with a pluggable amount extractor. Holds no state
/// beyond its configuration; `classify` is pure.
pub struct Classifier {
    rules: KeywordRules,
    extractor: Box<dyn AmountExtractor>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(KeywordRules::default())
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("rules_version", &self.rules.version())
            .field("rules", &self.rules.rules().len())
            .finish_non_exhaustive()
    }
}

impl Classifier {
    pub fn new(rules: KeywordRules) -> Self {
        Self {
            rules,
            extractor: Box::new(RegexAmountExtractor::default()),
        }
    }

    pub fn with_extractor<E>(mut self, extractor: E) -> Self
    where
        E: AmountExtractor + 'static,
    {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn with_boxed_extractor(mut self, extractor: Box<dyn AmountExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn rules(&self) -> &KeywordRules {
        &self.rules
    }

    /// Credit rules are checked before debit rules, so a body matching both
    /// is a credit no matter where each keyword sits in the text.
    pub fn kind_of(&self, body: &str) -> TransactionKind {
        let lowered = body.to_lowercase();

        if self.rules.matches(TransactionKind::Credit, &lowered) {
            TransactionKind::Credit
        } else if self.rules.matches(TransactionKind::Debit, &lowered) {
            TransactionKind::Debit
        } else {
            TransactionKind::Other
        }
    }

    pub fn classify(&self, message: RawMessage) -> ClassifiedTransaction {
        let kind = self.kind_of(&message.body);
        let amount = self.extractor.extract_amount(&message.body);

        ClassifiedTransaction {
            id: message.id,
            source_address: message.address,
            body: message.body,
            timestamp_millis: message.timestamp_millis,
            kind,
            amount,
        }
    }

    /// Classifies every message and drops the `other` ones.
    pub fn classify_all<I>(&self, messages: I) -> Vec<ClassifiedTransaction>
    where
        I: IntoIterator<Item = RawMessage>,
    {
        retain_transactions(messages.into_iter().map(|m| self.classify(m)))
    }
}

/// Keeps credit and debit transactions, in their original order.
pub fn retain_transactions<I>(classified: I) -> Vec<ClassifiedTransaction>
where
    I: IntoIterator<Item = ClassifiedTransaction>,
{
    classified
        .into_iter()
        .filter(ClassifiedTransaction::is_transaction)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn message(id: &str, body: &str) -> RawMessage {
        RawMessage::new(id, "AX-BANK", body, "1760781600000")
    }

    #[rstest]
    #[case("Your account credited INR 1,200.50", TransactionKind::Credit, Some("1200.50"))]
    #[case("You spent Rs 45 at store", TransactionKind::Debit, Some("45"))]
    #[case("Meeting at 5pm", TransactionKind::Other, Some("5"))]
    #[case("SALARY CREDITED", TransactionKind::Credit, None)]
    #[case("Refund Received for order", TransactionKind::Credit, None)]
    #[case("Card Transaction of Rs 999 at AMAZON", TransactionKind::Debit, Some("999"))]
    #[case("Payment Done via UPI", TransactionKind::Debit, None)]
    #[case("Your OTP is 4431", TransactionKind::Other, Some("4431"))]
    fn test_classify(
        #[case] body: &str,
        #[case] kind: TransactionKind,
        #[case] amount: Option<&str>,
    ) {
        let txn = Classifier::default().classify(message("1", body));

        assert_eq!(txn.kind, kind);
        assert_eq!(txn.amount, amount.map(|a| Decimal::from_str(a).unwrap()));
        assert_eq!(txn.body, body);
        assert_eq!(txn.source_address, "AX-BANK");
    }

    #[rstest]
    #[case("Rs 200 debited; refund credited later")]
    #[case("debited 100, then received 100")]
    #[case("Purchase refund")]
    fn test_credit_wins_over_debit(#[case] body: &str) {
        assert_eq!(Classifier::default().kind_of(body), TransactionKind::Credit);
    }

    #[rstest]
    #[case("credited")]
    #[case("CREDITED")]
    #[case("CrEdItEd")]
    fn test_casing_is_ignored(#[case] body: &str) {
        assert_eq!(Classifier::default().kind_of(body), TransactionKind::Credit);
    }

    #[test]
    fn test_custom_rules() {
        let rules = KeywordRules::default().with_rule(TransactionKind::Debit, "emi");
        let classifier = Classifier::new(rules);

        assert_eq!(classifier.kind_of("EMI of 4,500 due"), TransactionKind::Debit);
        assert_eq!(Classifier::default().kind_of("EMI of 4,500 due"), TransactionKind::Other);
    }

    #[test]
    fn test_custom_extractor() {
        let classifier = Classifier::default().with_extractor(|_: &str| Some(Decimal::ONE));
        let txn = classifier.classify(message("1", "spent nothing"));
        assert_eq!(txn.amount, Some(Decimal::ONE));
    }

    #[test]
    fn test_classify_all_filters_other() {
        let messages = vec![
            message("1", "Rs 100 credited"),
            message("2", "Meeting at 5pm"),
            message("3", "Rs 40 spent"),
            message("4", "Happy birthday"),
        ];

        let txns = Classifier::default().classify_all(messages);
        let ids: Vec<&str> = txns.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_retain_transactions_is_idempotent() {
        let classifier = Classifier::default();
        let classified: Vec<_> = ["Rs 1 credited", "hello", "Rs 2 debited"]
            .iter()
            .enumerate()
            .map(|(i, body)| classifier.classify(message(&i.to_string(), body)))
            .collect();

        let once = retain_transactions(classified);
        let twice = retain_transactions(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_debug_output() {
        let debug = format!("{:?}", Classifier::default());
        assert!(debug.contains("Classifier"));
        assert!(debug.contains("rules_version"));
    }
}
