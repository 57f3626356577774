//! Type derivation and sign conventions shared by writes and analytics.

use rust_decimal::Decimal;

use super::models::{TaxCategory, TransactionType};

/// Resolve a transaction's type at creation.
///
/// An explicit type always wins (transfers can only be set this way);
/// otherwise positive amounts are income and everything else is expense.
pub fn derive_type(amount: Decimal, explicit: Option<TransactionType>) -> TransactionType {
    match explicit {
        Some(transaction_type) => transaction_type,
        None if amount > Decimal::ZERO => TransactionType::Income,
        None => TransactionType::Expense,
    }
}

/// Resolve the type after a partial update.
///
/// An explicit type wins. Otherwise the stored type is kept unless the amount
/// flipped sign, in which case it is re-derived. Transfers are never re-derived.
pub fn reclassify_on_update(
    current: TransactionType,
    old_amount: Decimal,
    new_amount: Decimal,
    explicit: Option<TransactionType>,
) -> TransactionType {
    if let Some(transaction_type) = explicit {
        return transaction_type;
    }
    if current == TransactionType::Transfer {
        return current;
    }
    if old_amount.is_sign_positive() == new_amount.is_sign_positive() {
        return current;
    }
    derive_type(new_amount, None)
}

/// Magnitude used for expense reporting (expenses are stored negative).
pub fn expense_magnitude(amount: Decimal) -> Decimal {
    amount.abs()
}

/// A tax category only means something on a deductible record.
pub fn normalize_tax_category(
    is_tax_deductible: bool,
    tax_category: Option<TaxCategory>,
) -> Option<TaxCategory> {
    if is_tax_deductible {
        tax_category
    } else {
        None
    }
}
