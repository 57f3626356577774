use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Transaction type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money received
    Income,
    /// Money spent
    Expense,
    /// Movement between the owner's own accounts (never inferred)
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Transfer => "transfer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            "transfer" => Some(TransactionType::Transfer),
            _ => None,
        }
    }
}

/// Fixed set of spending/earning categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Groceries")]
    Groceries,
    #[serde(rename = "Rent")]
    Rent,
    #[serde(rename = "Salary")]
    Salary,
    #[serde(rename = "Business")]
    Business,
    #[serde(rename = "Investment")]
    Investment,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    #[serde(rename = "Gifts & Donations")]
    GiftsAndDonations,
    #[serde(rename = "Insurance")]
    Insurance,
    #[serde(rename = "Taxes")]
    Taxes,
    #[serde(rename = "Transfer")]
    Transfer,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 19] = [
        Category::FoodAndDining,
        Category::Transportation,
        Category::Shopping,
        Category::Entertainment,
        Category::BillsAndUtilities,
        Category::Healthcare,
        Category::Education,
        Category::Travel,
        Category::Groceries,
        Category::Rent,
        Category::Salary,
        Category::Business,
        Category::Investment,
        Category::PersonalCare,
        Category::GiftsAndDonations,
        Category::Insurance,
        Category::Taxes,
        Category::Transfer,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::BillsAndUtilities => "Bills & Utilities",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Groceries => "Groceries",
            Category::Rent => "Rent",
            Category::Salary => "Salary",
            Category::Business => "Business",
            Category::Investment => "Investment",
            Category::PersonalCare => "Personal Care",
            Category::GiftsAndDonations => "Gifts & Donations",
            Category::Insurance => "Insurance",
            Category::Taxes => "Taxes",
            Category::Transfer => "Transfer",
            Category::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    BankTransfer,
    Upi,
    Wallet,
    Cheque,
    #[default]
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Upi => "upi",
            PaymentMethod::Wallet => "wallet",
            PaymentMethod::Cheque => "cheque",
            PaymentMethod::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(PaymentMethod::Cash),
            "credit_card" => Some(PaymentMethod::CreditCard),
            "debit_card" => Some(PaymentMethod::DebitCard),
            "bank_transfer" => Some(PaymentMethod::BankTransfer),
            "upi" => Some(PaymentMethod::Upi),
            "wallet" => Some(PaymentMethod::Wallet),
            "cheque" => Some(PaymentMethod::Cheque),
            "other" => Some(PaymentMethod::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaxCategory {
    BusinessExpense,
    Medical,
    Charitable,
    Education,
    HomeOffice,
    Investment,
    Other,
}

impl TaxCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxCategory::BusinessExpense => "business_expense",
            TaxCategory::Medical => "medical",
            TaxCategory::Charitable => "charitable",
            TaxCategory::Education => "education",
            TaxCategory::HomeOffice => "home_office",
            TaxCategory::Investment => "investment",
            TaxCategory::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "business_expense" => Some(TaxCategory::BusinessExpense),
            "medical" => Some(TaxCategory::Medical),
            "charitable" => Some(TaxCategory::Charitable),
            "education" => Some(TaxCategory::Education),
            "home_office" => Some(TaxCategory::HomeOffice),
            "investment" => Some(TaxCategory::Investment),
            "other" => Some(TaxCategory::Other),
            _ => None,
        }
    }
}

/// Where a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionSource {
    #[default]
    Manual,
    Email,
    Sms,
    Voice,
    BankSync,
    Api,
}

impl TransactionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionSource::Manual => "manual",
            TransactionSource::Email => "email",
            TransactionSource::Sms => "sms",
            TransactionSource::Voice => "voice",
            TransactionSource::BankSync => "bank_sync",
            TransactionSource::Api => "api",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(TransactionSource::Manual),
            "email" => Some(TransactionSource::Email),
            "sms" => Some(TransactionSource::Sms),
            "voice" => Some(TransactionSource::Voice),
            "bank_sync" => Some(TransactionSource::BankSync),
            "api" => Some(TransactionSource::Api),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    #[default]
    Confirmed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TransactionStatus::Pending),
            "confirmed" => Some(TransactionStatus::Confirmed),
            "cancelled" => Some(TransactionStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Coordinates {
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    #[schema(example = 40.7128)]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    #[schema(example = -74.006)]
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Location {
    #[validate(length(max = 200, message = "Location name cannot exceed 200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "Address cannot exceed 500 characters"))]
    pub address: Option<String>,
    #[validate(nested)]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Merchant {
    #[validate(length(max = 200, message = "Merchant name cannot exceed 200 characters"))]
    pub name: Option<String>,
    #[validate(url(message = "Merchant website must be a valid URL"))]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Receipt,
    Invoice,
    Image,
    Document,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    #[validate(url(message = "Attachment url must be a valid URL"))]
    pub url: String,
    #[validate(length(max = 255, message = "Filename cannot exceed 255 characters"))]
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Recurrence {
    pub frequency: RecurrenceFrequency,
    #[validate(range(min = 1, max = 365, message = "Interval must be between 1 and 365"))]
    #[serde(default = "default_interval")]
    pub interval: u32,
    pub end_date: Option<DateTime<Utc>>,
}

fn default_interval() -> u32 {
    1
}

/// Optional descriptive attributes carried alongside the core fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub location: Option<Location>,
    pub merchant: Option<Merchant>,
    pub project: Option<String>,
    pub client: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub related_transactions: Vec<Uuid>,
    pub recurring: Option<Recurrence>,
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Decimal places kept by the `NUMERIC(19, 4)` amount column
pub const AMOUNT_SCALE: u32 = 4;

/// Exclusive bound on the magnitude of an amount (15 integer digits)
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

fn amount_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Reject zero amounts and anything the amount column cannot hold; sign carries the direction
fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_zero() {
        return Err(amount_error("amount_must_be_non_zero", "Amount cannot be zero"));
    }
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(amount_error(
            "amount_too_precise",
            "Amount cannot have more than 4 decimal places",
        ));
    }
    if amount.abs() >= AMOUNT_LIMIT {
        return Err(amount_error(
            "amount_too_large",
            "Amount must be smaller than 1000000000000000 in magnitude",
        ));
    }
    Ok(())
}

/// Keeps an explicit `null` apart from an absent field: absent is `None`, null is `Some(None)`
fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_not_in_future(date: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *date > Utc::now() {
        return Err(ValidationError::new("date_in_future"));
    }
    Ok(())
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > 20 {
        return Err(ValidationError::new("too_many_tags"));
    }
    if tags.iter().any(|t| t.trim().is_empty() || t.chars().count() > 50) {
        return Err(ValidationError::new("invalid_tag"));
    }
    Ok(())
}

/// Domain record for a single financial event
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub description: String,
    pub date: DateTime<Utc>,
    pub category: Category,
    pub transaction_type: TransactionType,
    pub is_tax_deductible: bool,
    pub tax_category: Option<TaxCategory>,
    pub payment_method: PaymentMethod,
    pub source: TransactionSource,
    pub status: TransactionStatus,
    pub details: TransactionDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully resolved record ready to be persisted; the store assigns id and timestamps
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub user_id: Uuid,
    pub amount: Decimal,
    pub description: String,
    pub date: DateTime<Utc>,
    pub category: Category,
    pub transaction_type: TransactionType,
    pub is_tax_deductible: bool,
    pub tax_category: Option<TaxCategory>,
    pub payment_method: PaymentMethod,
    pub source: TransactionSource,
    pub status: TransactionStatus,
    pub details: TransactionDetails,
}

/// Transaction information returned in responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// Unique transaction identifier
    pub id: Uuid,
    /// Owner of the record
    pub user_id: Uuid,
    /// Signed amount (positive for money in, negative for money out)
    #[schema(example = -42.50)]
    pub amount: Decimal,
    #[schema(example = "Weekly groceries")]
    pub description: String,
    pub date: DateTime<Utc>,
    pub category: Category,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub is_tax_deductible: bool,
    pub tax_category: Option<TaxCategory>,
    pub payment_method: PaymentMethod,
    pub source: TransactionSource,
    pub status: TransactionStatus,
    pub location: Option<Location>,
    pub merchant: Option<Merchant>,
    pub project: Option<String>,
    pub client: Option<String>,
    pub attachments: Vec<Attachment>,
    pub related_transactions: Vec<Uuid>,
    pub recurring: Option<Recurrence>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        let details = t.details;
        Self {
            id: t.id,
            user_id: t.user_id,
            amount: t.amount,
            description: t.description,
            date: t.date,
            category: t.category,
            transaction_type: t.transaction_type,
            is_tax_deductible: t.is_tax_deductible,
            tax_category: t.tax_category,
            payment_method: t.payment_method,
            source: t.source,
            status: t.status,
            location: details.location,
            merchant: details.merchant,
            project: details.project,
            client: details.client,
            attachments: details.attachments,
            related_transactions: details.related_transactions,
            recurring: details.recurring,
            notes: details.notes,
            tags: details.tags,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

/// Request body for creating a transaction
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionDto {
    /// Signed amount, must not be zero
    #[validate(custom(function = "validate_amount"))]
    #[schema(example = -42.50)]
    pub amount: Decimal,

    /// Description (1-500 chars)
    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    #[validate(custom(function = "validate_not_blank", message = "Description is required"))]
    #[schema(example = "Weekly groceries")]
    pub description: String,

    /// When the transaction happened; future dates are rejected
    #[validate(custom(function = "validate_not_in_future", message = "Date cannot be in the future"))]
    pub date: DateTime<Utc>,

    pub category: Category,

    /// Derived from the amount sign when omitted
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,

    #[serde(default)]
    pub is_tax_deductible: bool,

    pub tax_category: Option<TaxCategory>,

    pub payment_method: Option<PaymentMethod>,

    pub status: Option<TransactionStatus>,

    #[validate(nested)]
    pub location: Option<Location>,

    #[validate(nested)]
    pub merchant: Option<Merchant>,

    #[validate(length(max = 100, message = "Project cannot exceed 100 characters"))]
    pub project: Option<String>,

    #[validate(length(max = 100, message = "Client cannot exceed 100 characters"))]
    pub client: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub attachments: Vec<Attachment>,

    #[serde(default)]
    pub related_transactions: Vec<Uuid>,

    #[validate(nested)]
    pub recurring: Option<Recurrence>,

    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,

    #[serde(default)]
    #[validate(custom(
        function = "validate_tags",
        message = "At most 20 tags of 1-50 characters each"
    ))]
    pub tags: Vec<String>,
}

/// Request body for updating a transaction (PUT with partial semantics - all fields optional)
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionDto {
    #[validate(custom(function = "validate_amount"))]
    #[schema(example = -75.00)]
    pub amount: Option<Decimal>,

    #[validate(length(min = 1, max = 500, message = "Description must be 1-500 characters"))]
    #[validate(custom(function = "validate_not_blank", message = "Description is required"))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_not_in_future", message = "Date cannot be in the future"))]
    pub date: Option<DateTime<Utc>>,

    pub category: Option<Category>,

    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,

    pub is_tax_deductible: Option<bool>,

    /// Use null to clear the tax category
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub tax_category: Option<Option<TaxCategory>>,

    pub payment_method: Option<PaymentMethod>,

    pub status: Option<TransactionStatus>,

    #[validate(nested)]
    pub location: Option<Location>,

    #[validate(nested)]
    pub merchant: Option<Merchant>,

    #[validate(length(max = 100, message = "Project cannot exceed 100 characters"))]
    pub project: Option<String>,

    #[validate(length(max = 100, message = "Client cannot exceed 100 characters"))]
    pub client: Option<String>,

    #[validate(nested)]
    pub attachments: Option<Vec<Attachment>>,

    pub related_transactions: Option<Vec<Uuid>>,

    #[validate(nested)]
    pub recurring: Option<Recurrence>,

    #[validate(length(max = 1000, message = "Notes cannot exceed 1000 characters"))]
    pub notes: Option<String>,

    #[validate(custom(
        function = "validate_tags",
        message = "At most 20 tags of 1-50 characters each"
    ))]
    pub tags: Option<Vec<String>>,
}

/// Raw query parameters for listing transactions; parsed by the filter compiler
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsQuery {
    /// Page number (default 1)
    #[param(example = "1")]
    pub page: Option<String>,
    /// Page size (default 50, max 200)
    #[param(example = "50")]
    pub limit: Option<String>,
    /// Inclusive lower bound on date (RFC 3339 or YYYY-MM-DD)
    pub start_date: Option<String>,
    /// Inclusive upper bound on date (RFC 3339 or YYYY-MM-DD)
    pub end_date: Option<String>,
    #[param(example = "Food & Dining")]
    pub category: Option<String>,
    /// income, expense or transfer
    #[serde(rename = "type")]
    #[param(example = "expense")]
    pub transaction_type: Option<String>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
    /// Case-insensitive substring match on description
    pub search: Option<String>,
    /// date, amount, description, category, type, createdAt or updatedAt
    #[param(example = "date")]
    pub sort_by: Option<String>,
    /// asc or desc
    #[param(example = "desc")]
    pub sort_order: Option<String>,
}

/// Query parameters for the analytics summary
#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    /// Defaults to the first day of the current month
    pub start_date: Option<String>,
    /// Defaults to now
    pub end_date: Option<String>,
}

/// Page metadata for list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[schema(example = 1)]
    pub current_page: i64,
    #[schema(example = 5)]
    pub total_pages: i64,
    #[schema(example = 95)]
    pub total_transactions: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    #[schema(example = 20)]
    pub limit: i64,
}

/// Paginated response wrapper
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedTransactionResponse {
    pub transactions: Vec<TransactionResponse>,
    pub pagination: PaginationMeta,
}

/// Per-type aggregate row
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeTotals {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Sum of signed amounts
    pub total_amount: Decimal,
    pub count: i64,
    pub avg_amount: Decimal,
}

/// Expense totals for one category
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotals {
    pub category: Category,
    /// Sum of absolute amounts
    pub total_amount: Decimal,
    pub count: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl DateRange {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start_date && instant <= self.end_date
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryFigures {
    #[schema(example = 3200.00)]
    pub total_income: Decimal,
    #[schema(example = 1850.25)]
    pub total_expenses: Decimal,
    #[schema(example = 1349.75)]
    pub net_income: Decimal,
    #[schema(example = 42)]
    pub transaction_count: i64,
    pub date_range: DateRange,
}

/// Analytics summary response
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub summary: SummaryFigures,
    pub category_breakdown: Vec<CategoryTotals>,
    pub monthly_trends: Vec<TypeTotals>,
}

/// Delete operation response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    #[schema(example = "Transaction deleted successfully")]
    pub message: String,
    pub id: Uuid,
}

/// Path parameters for transaction ID; kept as text so malformed ids read as not found
#[derive(Debug, Deserialize, IntoParams)]
pub struct TransactionIdPath {
    /// Transaction UUID
    pub id: String,
}
