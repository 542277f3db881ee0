pub mod amount;
pub mod classifier;
pub mod keywords;
pub mod traits;

pub mod prelude {
    pub use super::amount::RegexAmountExtractor;
    pub use super::classifier::{Classifier, retain_transactions};
    pub use super::keywords::{KeywordRule, KeywordRules};
    pub use super::traits::AmountExtractor;
}
