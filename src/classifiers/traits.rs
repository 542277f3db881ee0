use rust_decimal::Decimal;

/// Strategy for pulling a monetary amount out of a message body.
pub trait AmountExtractor: Send + Sync {
    fn extract_amount(&self, body: &str) -> Option<Decimal>;
}

impl<F> AmountExtractor for F
where
    F: Fn(&str) -> Option<Decimal> + Send + Sync,
{
    fn extract_amount(&self, body: &str) -> Option<Decimal> {
        self(body)
    }
}
