//! Income/expense aggregation over a date range.
//!
//! Two passes feed the summary: signed totals grouped by type, and absolute
//! expense totals grouped by category. Stores with native grouping compute the
//! passes themselves; the in-process versions here define the expected results.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::classifier::expense_magnitude;
use super::filter::parse_date;
use super::models::{
    AnalyticsSummary, Category, CategoryTotals, DateRange, SummaryFigures, SummaryQuery,
    Transaction, TransactionType, TypeTotals,
};
use crate::errors::AppError;

/// First instant of the month containing `now`, through `now`.
pub fn default_range(now: DateTime<Utc>) -> DateRange {
    let start_date = NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(now);

    DateRange {
        start_date,
        end_date: now,
    }
}

/// Resolve the requested range, filling in whichever bound is missing.
///
/// An inverted range is returned as-is and simply matches nothing.
pub fn resolve_range(query: &SummaryQuery, now: DateTime<Utc>) -> Result<DateRange, AppError> {
    let defaults = default_range(now);

    let start_date = match query.start_date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => parse_date("startDate", raw)?,
        _ => defaults.start_date,
    };
    let end_date = match query.end_date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => parse_date("endDate", raw)?,
        _ => defaults.end_date,
    };

    Ok(DateRange {
        start_date,
        end_date,
    })
}

fn overflow() -> AppError {
    AppError::InternalError("Amount total out of range".to_string())
}

/// Add `amount` into a running total without panicking on overflow.
pub fn accumulate(total: Decimal, amount: Decimal) -> Result<Decimal, AppError> {
    total.checked_add(amount).ok_or_else(overflow)
}

/// Sum, count and average of signed amounts per type, ordered by type name.
pub fn group_by_type<'a, I>(records: I) -> Result<Vec<TypeTotals>, AppError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups: HashMap<TransactionType, (Decimal, i64)> = HashMap::new();
    for tx in records {
        let entry = groups
            .entry(tx.transaction_type)
            .or_insert((Decimal::ZERO, 0));
        entry.0 = accumulate(entry.0, tx.amount)?;
        entry.1 += 1;
    }

    let mut totals: Vec<TypeTotals> = groups
        .into_iter()
        .map(|(transaction_type, (total_amount, count))| TypeTotals {
            transaction_type,
            total_amount,
            count,
            avg_amount: average(total_amount, count),
        })
        .collect();
    totals.sort_by(|a, b| a.transaction_type.as_str().cmp(b.transaction_type.as_str()));
    Ok(totals)
}

/// Absolute expense totals per category, largest first.
pub fn group_expenses_by_category<'a, I>(records: I) -> Result<Vec<CategoryTotals>, AppError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut groups: HashMap<Category, (Decimal, i64)> = HashMap::new();
    for tx in records
        .into_iter()
        .filter(|tx| tx.transaction_type == TransactionType::Expense)
    {
        let entry = groups.entry(tx.category).or_insert((Decimal::ZERO, 0));
        entry.0 = accumulate(entry.0, expense_magnitude(tx.amount))?;
        entry.1 += 1;
    }

    let mut breakdown: Vec<CategoryTotals> = groups
        .into_iter()
        .map(|(category, (total_amount, count))| CategoryTotals {
            category,
            total_amount,
            count,
        })
        .collect();
    sort_breakdown(&mut breakdown);
    Ok(breakdown)
}

/// Descending by total; equal totals ordered by category label.
pub fn sort_breakdown(breakdown: &mut [CategoryTotals]) {
    breakdown.sort_by(|a, b| {
        b.total_amount
            .cmp(&a.total_amount)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
}

pub fn average(total: Decimal, count: i64) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    }
}

/// Derive the headline figures from the two grouping passes.
pub fn summarize(
    range: DateRange,
    by_type: Vec<TypeTotals>,
    category_breakdown: Vec<CategoryTotals>,
) -> Result<AnalyticsSummary, AppError> {
    let signed_total = |wanted: TransactionType| {
        by_type
            .iter()
            .find(|g| g.transaction_type == wanted)
            .map(|g| g.total_amount)
            .unwrap_or(Decimal::ZERO)
    };

    let total_income = signed_total(TransactionType::Income);
    let total_expenses = signed_total(TransactionType::Expense).abs();
    let transaction_count = by_type.iter().map(|g| g.count).sum();

    let net_income = total_income
        .checked_sub(total_expenses)
        .ok_or_else(overflow)?;

    Ok(AnalyticsSummary {
        summary: SummaryFigures {
            total_income,
            total_expenses,
            net_income,
            transaction_count,
            date_range: range,
        },
        category_breakdown,
        monthly_trends: by_type,
    })
}
