use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::analytics;
use super::filter::QueryDescriptor;
use super::models::{CategoryTotals, DateRange, NewTransaction, Transaction, TypeTotals};
use crate::errors::AppError;

/// Persistence boundary for transaction records.
///
/// Every operation is scoped to an owner: a record belonging to someone else
/// behaves exactly like a record that does not exist.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persist a new record, assigning its id and timestamps
    async fn insert(&self, record: NewTransaction) -> Result<Transaction, AppError>;

    async fn find(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Transaction>, AppError>;

    /// One page of matching records, ordered by the query's sort
    async fn scan(&self, query: &QueryDescriptor) -> Result<Vec<Transaction>, AppError>;

    /// Number of records matching the query's filters (ignores paging)
    async fn count(&self, query: &QueryDescriptor) -> Result<i64, AppError>;

    /// Replace the mutable fields of an owned record; `None` when not found
    async fn update(&self, record: &Transaction) -> Result<Option<Transaction>, AppError>;

    /// Returns whether an owned record was removed
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    async fn group_by_type(
        &self,
        owner_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<TypeTotals>, AppError>;

    async fn group_expenses_by_category(
        &self,
        owner_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<CategoryTotals>, AppError>;
}

/// Process-local store; aggregation runs over the filtered records in Rust.
#[derive(Default)]
pub struct MemoryTransactionStore {
    records: RwLock<HashMap<Uuid, Transaction>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn in_range<'a>(
        records: &'a HashMap<Uuid, Transaction>,
        owner_id: Uuid,
        range: &'a DateRange,
    ) -> impl Iterator<Item = &'a Transaction> + 'a {
        records
            .values()
            .filter(move |tx| tx.user_id == owner_id && range.contains(tx.date))
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn insert(&self, record: NewTransaction) -> Result<Transaction, AppError> {
        let now = Utc::now();
        let transaction = Transaction {
            id: Uuid::new_v4(),
            user_id: record.user_id,
            amount: record.amount,
            description: record.description,
            date: record.date,
            category: record.category,
            transaction_type: record.transaction_type,
            is_tax_deductible: record.is_tax_deductible,
            tax_category: record.tax_category,
            payment_method: record.payment_method,
            source: record.source,
            status: record.status,
            details: record.details,
            created_at: now,
            updated_at: now,
        };

        self.records
            .write()
            .await
            .insert(transaction.id, transaction.clone());
        Ok(transaction)
    }

    async fn find(&self, owner_id: Uuid, id: Uuid) -> Result<Option<Transaction>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .get(&id)
            .filter(|tx| tx.user_id == owner_id)
            .cloned())
    }

    async fn scan(&self, query: &QueryDescriptor) -> Result<Vec<Transaction>, AppError> {
        let records = self.records.read().await;
        let mut matching: Vec<&Transaction> =
            records.values().filter(|tx| query.matches(tx)).collect();
        matching.sort_by(|a, b| query.sort.compare(a, b));

        let skip = usize::try_from(query.page.skip()).unwrap_or(usize::MAX);
        let take = usize::try_from(query.page.limit).unwrap_or(0);
        Ok(matching.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn count(&self, query: &QueryDescriptor) -> Result<i64, AppError> {
        let records = self.records.read().await;
        let count = records.values().filter(|tx| query.matches(tx)).count();
        Ok(count as i64)
    }

    async fn update(&self, record: &Transaction) -> Result<Option<Transaction>, AppError> {
        let mut records = self.records.write().await;
        let Some(existing) = records
            .get_mut(&record.id)
            .filter(|tx| tx.user_id == record.user_id)
        else {
            return Ok(None);
        };

        *existing = Transaction {
            created_at: existing.created_at,
            updated_at: Utc::now(),
            ..record.clone()
        };
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut records = self.records.write().await;
        if records.get(&id).is_some_and(|tx| tx.user_id == owner_id) {
            records.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn group_by_type(
        &self,
        owner_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<TypeTotals>, AppError> {
        let records = self.records.read().await;
        analytics::group_by_type(Self::in_range(&records, owner_id, range))
    }

    async fn group_expenses_by_category(
        &self,
        owner_id: Uuid,
        range: &DateRange,
    ) -> Result<Vec<CategoryTotals>, AppError> {
        let records = self.records.read().await;
        analytics::group_expenses_by_category(Self::in_range(&records, owner_id, range))
    }
}
