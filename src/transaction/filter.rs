//! Compiles raw list query parameters into an owner-scoped query descriptor.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::models::{Category, ListTransactionsQuery, Transaction, TransactionType};
use super::pagination::{PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::errors::AppError;

lazy_static! {
    static ref DATE_ONLY: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex");
    static ref NAIVE_DATE_TIME: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}(:\d{2}(\.\d+)?)?$").expect("valid regex");
}

/// Columns a listing may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Amount,
    Description,
    Category,
    Type,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALLOWED: [&'static str; 7] = [
        "date",
        "amount",
        "description",
        "category",
        "type",
        "createdAt",
        "updatedAt",
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "date" => Some(SortField::Date),
            "amount" => Some(SortField::Amount),
            "description" => Some(SortField::Description),
            "category" => Some(SortField::Category),
            "type" => Some(SortField::Type),
            "createdAt" => Some(SortField::CreatedAt),
            "updatedAt" => Some(SortField::UpdatedAt),
            _ => None,
        }
    }

    /// Column name in the relational schema
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Date => "transaction_date",
            SortField::Amount => "amount",
            SortField::Description => "description",
            SortField::Category => "category",
            SortField::Type => "transaction_type",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }

    /// ORDER BY expression; text columns use byte order so results match `compare`
    pub fn order_by(&self) -> &'static str {
        match self {
            SortField::Description => r#"description COLLATE "C""#,
            SortField::Category => r#"category COLLATE "C""#,
            SortField::Type => r#"transaction_type COLLATE "C""#,
            other => other.column(),
        }
    }

    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortField::Date => a.date.cmp(&b.date),
            SortField::Amount => a.amount.cmp(&b.amount),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Category => a.category.as_str().cmp(b.category.as_str()),
            SortField::Type => a
                .transaction_type
                .as_str()
                .cmp(b.transaction_type.as_str()),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Asc),
            "desc" | "descending" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    /// Total order: the sort key first, then id so equal keys page deterministically.
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let ordering = self.field.compare(a, b).then_with(|| a.id.cmp(&b.id));
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Validated, owner-scoped listing query.
///
/// There is no way to build one without an owner id.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    owner_id: Uuid,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub category: Option<Category>,
    pub transaction_type: Option<TransactionType>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub search: Option<String>,
    pub sort: Sort,
    pub page: PageRequest,
}

impl QueryDescriptor {
    /// Unfiltered query over everything the owner has
    pub fn for_owner(owner_id: Uuid) -> Self {
        Self {
            owner_id,
            start_date: None,
            end_date: None,
            category: None,
            transaction_type: None,
            min_amount: None,
            max_amount: None,
            search: None,
            sort: Sort::default(),
            page: PageRequest::default(),
        }
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    /// Evaluate the filter part of the query against a record.
    pub fn matches(&self, tx: &Transaction) -> bool {
        if tx.user_id != self.owner_id {
            return false;
        }
        if self.start_date.is_some_and(|start| tx.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| tx.date > end) {
            return false;
        }
        if self.category.is_some_and(|c| tx.category != c) {
            return false;
        }
        if self.transaction_type.is_some_and(|t| tx.transaction_type != t) {
            return false;
        }
        if self.min_amount.is_some_and(|min| tx.amount < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| tx.amount > max) {
            return false;
        }
        if let Some(needle) = &self.search {
            if !tx
                .description
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// Build a query descriptor from raw parameters.
///
/// The owner comes from the authenticated caller only; nothing in `params`
/// can influence it.
pub fn compile(owner_id: Uuid, params: &ListTransactionsQuery) -> Result<QueryDescriptor, AppError> {
    let mut query = QueryDescriptor::for_owner(owner_id);

    query.start_date = optional(&params.start_date)
        .map(|raw| parse_date("startDate", raw))
        .transpose()?;
    query.end_date = optional(&params.end_date)
        .map(|raw| parse_date("endDate", raw))
        .transpose()?;

    query.category = optional(&params.category)
        .map(|raw| {
            Category::parse(raw)
                .ok_or_else(|| AppError::invalid_field("category", format!("unknown category '{raw}'")))
        })
        .transpose()?;

    query.transaction_type = optional(&params.transaction_type)
        .map(|raw| {
            TransactionType::parse(raw).ok_or_else(|| {
                AppError::invalid_field("type", "must be one of income, expense, transfer")
            })
        })
        .transpose()?;

    query.min_amount = optional(&params.min_amount)
        .map(|raw| parse_amount("minAmount", raw))
        .transpose()?;
    query.max_amount = optional(&params.max_amount)
        .map(|raw| parse_amount("maxAmount", raw))
        .transpose()?;

    query.search = optional(&params.search).map(str::to_string);

    if let Some(raw) = optional(&params.sort_by) {
        query.sort.field = SortField::parse(raw).ok_or_else(|| {
            AppError::invalid_field(
                "sortBy",
                format!("must be one of {}", SortField::ALLOWED.join(", ")),
            )
        })?;
    }
    if let Some(raw) = optional(&params.sort_order) {
        query.sort.direction = SortDirection::parse(raw)
            .ok_or_else(|| AppError::invalid_field("sortOrder", "must be asc or desc"))?;
    }

    let page = optional(&params.page)
        .map(|raw| parse_integer("page", raw))
        .transpose()?
        .unwrap_or(DEFAULT_PAGE);
    let limit = optional(&params.limit)
        .map(|raw| parse_integer("limit", raw))
        .transpose()?
        .unwrap_or(DEFAULT_LIMIT);
    if limit < 1 {
        return Err(AppError::invalid_field("limit", "must be at least 1"));
    }
    query.page = PageRequest::new(page, limit);

    Ok(query)
}

/// Treat empty/whitespace parameters as absent
fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Accepts RFC 3339, `YYYY-MM-DD` (midnight UTC) or a naive date-time read as UTC.
pub(crate) fn parse_date(field: &str, raw: &str) -> Result<DateTime<Utc>, AppError> {
    let invalid = || AppError::invalid_field(field, format!("invalid date '{raw}'"));

    if DATE_ONLY.is_match(raw) {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .ok_or_else(invalid);
    }
    if NAIVE_DATE_TIME.is_match(raw) {
        return ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|dt| dt.and_utc())
            .ok_or_else(invalid);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| invalid())
}

fn parse_amount(field: &str, raw: &str) -> Result<Decimal, AppError> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| AppError::invalid_field(field, format!("'{raw}' is not a number")))
}

fn parse_integer(field: &str, raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::invalid_field(field, format!("'{raw}' is not an integer")))
}
