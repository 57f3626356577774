use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::analytics::sort_breakdown;
use super::filter::QueryDescriptor;
use super::models::{
    Category, CategoryTotals, DateRange, NewTransaction, PaymentMethod, TaxCategory, Transaction,
    TransactionDetails, TransactionSource, TransactionStatus, TransactionType, TypeTotals,
};
use super::store::TransactionStore;
use crate::errors::AppError;

const COLUMNS: &str = r#"
    id, user_id, amount, description, transaction_date, category, transaction_type,
    is_tax_deductible, tax_category, payment_method, source, status, details,
    created_at, updated_at
"#;

/// Database row for transactions
#[derive(Debug, FromRow)]
struct TransactionRow {
    id: Uuid,
    user_id: Uuid,
    amount: Decimal,
    description: String,
    transaction_date: DateTime<Utc>,
    category: String,
    transaction_type: String,
    is_tax_deductible: bool,
    tax_category: Option<String>,
    payment_method: String,
    source: String,
    status: String,
    details: Json<TransactionDetails>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn unknown(column: &str, value: &str) -> AppError {
    AppError::InternalError(format!("Unknown {column} '{value}' in transactions table"))
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = AppError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let tax_category = row
            .tax_category
            .as_deref()
            .map(|v| TaxCategory::parse(v).ok_or_else(|| unknown("tax_category", v)))
            .transpose()?;

        Ok(Transaction {
            id: row.id,
            user_id: row.user_id,
            amount: row.amount,
            description: row.description,
            date: row.transaction_date,
            category: Category::parse(&row.category)
                .ok_or_else(|| unknown("category", &row.category))?,
            transaction_type: TransactionType::parse(&row.transaction_type)
                .ok_or_else(|| unknown("transaction_type", &row.transaction_type))?,
            is_tax_deductible: row.is_tax_deductible,
            tax_category,
            payment_method: PaymentMethod::parse(&row.payment_method)
                .ok_or_else(|| unknown("payment_method", &row.payment_method))?,
            source: TransactionSource::parse(&row.source)
                .ok_or_else(|| unknown("source", &row.source))?,
            status: TransactionStatus::parse(&row.status)
                .ok_or_else(|| unknown("status", &row.status))?,
            details: row.details.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct TypeGroupRow {
    transaction_type: String,
    total_amount: Decimal,
    count: i64,
    avg_amount: Decimal,
}

#[derive(Debug, FromRow)]
struct CategoryGroupRow {
    category: String,
    total_amount: Decimal,
    count: i64,
}

/// PostgreSQL-backed transaction store
#[derive(Clone)]
pub struct PgTransactionStore {
    pool: PgPool,
}

impl PgTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append the owner scope and every optional filter, all as bound parameters.
    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &QueryDescriptor) {
        builder.push(" WHERE user_id = ").push_bind(query.owner_id());

        if let Some(start) = query.start_date {
            builder.push(" AND transaction_date >= ").push_bind(start);
        }
        if let Some(end) = query.end_date {
            builder.push(" AND transaction_date <= ").push_bind(end);
        }
        if let Some(category) = query.category {
            builder.push(" AND category = ").push_bind(category.as_str());
        }
        if let Some(transaction_type) = query.transaction_type {
            builder
                .push(" AND transaction_type = ")
                .push_bind(transaction_type.as_str());
        }
        if let Some(min) = query.min_amount {
            builder.push(" AND amount >= ").push_bind(min);
        }
        if let Some(max) = query.max_amount {
            builder.push(" AND amount <= ").push_bind(max);
        }
        if let Some(search) = &query.search {
            builder
                .push(" AND strpos(lower(description), lower(")
                .push_bind(search.clone())
                .push(")) > 0");
        }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn insert(&self, record: NewTransaction) -> Result<Transaction, AppError> {
        let sql = format!(
            r#"
            INSERT INTO transactions
                (user_id, amount, description, transaction_date, category, transaction_type,
                 is_tax_deductible, tax_category, payment_method, source, status, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(record.user_id)
            .bind(record.amount)
            .bind(&record.description)
            .bind(record.date)
            .bind(record.category.as_str())
            .bind(record.transaction_type.as_str())
            .bind(record.is_tax_deductible)
            .bind(record.tax_category.map(|t| t.as_str()))
            .bind(record.payment_method.as_str())
            .bind(record.source.as_str())
            .bind(record.status.as_str())
            .bind(Json(&record.details))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        row.try_into()
    }

    async fn find(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Transaction>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM transactions WHERE id = $1 AND user_id = $2");

        sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .map(Transaction::try_from)
            .transpose()
    }

    async fn scan(&self, query: &QueryDescriptor) -> Result<Vec<Transaction>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM transactions"));
        Self::push_filters(&mut builder, query);

        // Sort column comes from the allow-list enum, never from raw input
        let direction = query.sort.direction.sql();
        builder
            .push(format!(
                " ORDER BY {} {direction}, id {direction}",
                query.sort.field.order_by()
            ))
            .push(" LIMIT ")
            .push_bind(query.page.limit)
            .push(" OFFSET ")
            .push_bind(query.page.skip());

        let rows = builder
            .build_query_as::<TransactionRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    async fn count(&self, query: &QueryDescriptor) -> Result<i64, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM transactions");
        Self::push_filters(&mut builder, query);

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))
    }

    async fn update(&self, record: &Transaction) -> Result<Option<Transaction>, AppError> {
        let sql = format!(
            r#"
            UPDATE transactions SET
                amount = $3,
                description = $4,
                transaction_date = $5,
                category = $6,
                transaction_type = $7,
                is_tax_deductible = $8,
                tax_category = $9,
                payment_method = $10,
                status = $11,
                details = $12,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, TransactionRow>(&sql)
            .bind(record.id)
            .bind(record.user_id)
            .bind(record.amount)
            .bind(&record.description)
            .bind(record.date)
            .bind(record.category.as_str())
            .bind(record.transaction_type.as_str())
            .bind(record.is_tax_deductible)
            .bind(record.tax_category.map(|t| t.as_str()))
            .bind(record.payment_method.as_str())
            .bind(record.status.as_str())
            .bind(Json(&record.details))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?
            .map(Transaction::try_from)
            .transpose()
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn group_by_type(
        &self,
        owner_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<TypeTotals>, AppError> {
        let rows = sqlx::query_as::<_, TypeGroupRow>(
            r#"
            SELECT transaction_type,
                   SUM(amount) AS total_amount,
                   COUNT(*) AS count,
                   AVG(amount) AS avg_amount
            FROM transactions
            WHERE user_id = $1
              AND transaction_date >= $2
              AND transaction_date <= $3
            GROUP BY transaction_type
            ORDER BY transaction_type
            "#,
        )
        .bind(owner_id)
        .bind(range.start_date)
        .bind(range.end_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        rows.into_iter()
            .map(|row| -> Result<TypeTotals, AppError> {
                Ok(TypeTotals {
                    transaction_type: TransactionType::parse(&row.transaction_type)
                        .ok_or_else(|| unknown("transaction_type", &row.transaction_type))?,
                    total_amount: row.total_amount,
                    count: row.count,
                    avg_amount: row.avg_amount,
                })
            })
            .collect()
    }

    async fn group_expenses_by_category(
        &self,
        owner_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<CategoryTotals>, AppError> {
        let rows = sqlx::query_as::<_, CategoryGroupRow>(
            r#"
            SELECT category,
                   SUM(ABS(amount)) AS total_amount,
                   COUNT(*) AS count
            FROM transactions
            WHERE user_id = $1
              AND transaction_type = 'expense'
              AND transaction_date >= $2
              AND transaction_date <= $3
            GROUP BY category
            "#,
        )
        .bind(owner_id)
        .bind(range.start_date)
        .bind(range.end_date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        let mut breakdown = rows
            .into_iter()
            .map(|row| -> Result<CategoryTotals, AppError> {
                Ok(CategoryTotals {
                    category: Category::parse(&row.category)
                        .ok_or_else(|| unknown("category", &row.category))?,
                    total_amount: row.total_amount,
                    count: row.count,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        sort_breakdown(&mut breakdown);
        Ok(breakdown)
    }
}
