use crate::{errors::SignalError, types::TransactionKind};
use serde::{Deserialize, Serialize};

/// A single `{kind, keyword}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub kind: TransactionKind,
    pub keyword: String,
}

impl KeywordRule {
    pub fn new(kind: TransactionKind, keyword: &str) -> Self {
        Self {
            kind,
            keyword: keyword.trim().to_lowercase(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct KeywordRulesRaw {
    #[serde(default = "default_version")]
    version: u32,
    rules: Vec<KeywordRule>,
}

fn default_version() -> u32 {
    1
}

/// Versioned, ordered keyword rule set.
///
/// Keywords are stored lower case. Only `credit` and `debit` rules are
/// accepted; a message that matches nothing is `other` by definition.
///
/// ```json
/// {"version": 2, "rules": [{"kind": "credit", "keyword": "cashback"}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "KeywordRulesRaw")]
pub struct KeywordRules {
    version: u32,
    rules: Vec<KeywordRule>,
}

const DEFAULT_CREDIT: &[&str] = &["credited", "received", "deposit", "salary", "refund", "upi credited"];
const DEFAULT_DEBIT: &[&str] = &[
    "debited",
    "spent",
    "withdrawn",
    "purchase",
    "payment done",
    "upi debited",
    "card transaction",
];

impl Default for KeywordRules {
    fn default() -> Self {
        let rules = DEFAULT_CREDIT
            .iter()
            .map(|kw| KeywordRule::new(TransactionKind::Credit, kw))
            .chain(DEFAULT_DEBIT.iter().map(|kw| KeywordRule::new(TransactionKind::Debit, kw)))
            .collect();

        Self { version: 1, rules }
    }
}

impl TryFrom<KeywordRulesRaw> for KeywordRules {
    type Error = SignalError;

    fn try_from(raw: KeywordRulesRaw) -> Result<Self, Self::Error> {
        let rules = raw
            .rules
            .into_iter()
            .map(|rule| {
                let rule = KeywordRule::new(rule.kind, &rule.keyword);
                if rule.keyword.is_empty() {
                    return Err(SignalError::InvalidKeywordRules("empty keyword".to_string()));
                }
                if rule.kind == TransactionKind::Other {
                    return Err(SignalError::InvalidKeywordRules(format!(
                        "rule '{}' cannot map to other",
                        rule.keyword
                    )));
                }
                Ok(rule)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(KeywordRules {
            version: raw.version,
            rules,
        })
    }
}

impl KeywordRules {
    pub fn from_json(content: &str) -> Result<Self, SignalError> {
        let raw: KeywordRulesRaw = serde_json::from_str(content)?;
        raw.try_into()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Appends a rule. Blank keywords and `other` rules are ignored.
    pub fn with_rule(mut self, kind: TransactionKind, keyword: &str) -> Self {
        let rule = KeywordRule::new(kind, keyword);
        if !rule.keyword.is_empty() && kind != TransactionKind::Other {
            self.rules.push(rule);
        }
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Whether any rule of `kind` occurs in the (already lower-cased) body.
    pub fn matches(&self, kind: TransactionKind, lowered_body: &str) -> bool {
        self.rules
            .iter()
            .filter(|rule| rule.kind == kind)
            .any(|rule| lowered_body.contains(rule.keyword.as_str()))
    }
}
