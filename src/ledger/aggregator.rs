use std::str::FromStr;

use rust_decimal::Decimal;

use crate::types::{AggregateTotals, EntryType, LedgerEntry};

/// Sums income and expense over `entries`. Always a full recompute.
pub fn totals<'a, I>(entries: I) -> AggregateTotals
where
    I: IntoIterator<Item = &'a LedgerEntry>,
{
    entries
        .into_iter()
        .fold(AggregateTotals::default(), |mut acc, entry| {
            match entry.entry_type {
                EntryType::Income => acc.total_income += entry.amount,
                EntryType::Expense => acc.total_expense += entry.amount,
            }
            acc
        })
}

/// Share of `budget` already spent, in percent.
///
/// `budget` is free text from the user. Anything that is not a positive
/// decimal (blank, zero, negative, garbage) yields zero.
pub fn percentage_spent(total_expense: Decimal, budget: &str) -> Decimal {
    let budget = match Decimal::from_str(budget.trim()) {
        Ok(value) if value > Decimal::ZERO => value,
        _ => return Decimal::ZERO,
    };

    total_expense
        .checked_div(budget)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}
