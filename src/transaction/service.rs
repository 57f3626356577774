use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

use super::analytics;
use super::classifier::{derive_type, normalize_tax_category, reclassify_on_update};
use super::filter;
use super::models::{
    AnalyticsSummary, CreateTransactionDto, ListTransactionsQuery, NewTransaction,
    PaginatedTransactionResponse, SummaryQuery, Transaction, TransactionDetails,
    TransactionSource, UpdateTransactionDto,
};
use super::store::TransactionStore;
use crate::errors::AppError;

const NOT_FOUND: &str = "Transaction not found";

/// Service layer for transaction business logic.
/// Every operation takes the owner id from the authenticated caller.
pub struct TransactionService;

impl TransactionService {
    /// Validate, classify and persist a new record
    pub async fn create_transaction(
        store: &dyn TransactionStore,
        user_id: Uuid,
        dto: CreateTransactionDto,
    ) -> Result<Transaction, AppError> {
        dto.validate()?;

        let transaction_type = derive_type(dto.amount, dto.transaction_type);
        let tax_category = normalize_tax_category(dto.is_tax_deductible, dto.tax_category);

        let record = NewTransaction {
            user_id,
            amount: dto.amount,
            description: dto.description.trim().to_string(),
            date: dto.date,
            category: dto.category,
            transaction_type,
            is_tax_deductible: dto.is_tax_deductible,
            tax_category,
            payment_method: dto.payment_method.unwrap_or_default(),
            source: TransactionSource::Manual,
            status: dto.status.unwrap_or_default(),
            details: TransactionDetails {
                location: dto.location,
                merchant: dto.merchant,
                project: dto.project,
                client: dto.client,
                attachments: dto.attachments,
                related_transactions: dto.related_transactions,
                recurring: dto.recurring,
                notes: dto.notes,
                tags: dto.tags,
            },
        };

        let created = store.insert(record).await?;
        info!(
            transaction_id = %created.id,
            user_id = %user_id,
            transaction_type = created.transaction_type.as_str(),
            "Transaction created"
        );
        Ok(created)
    }

    /// Get a single transaction by ID (with ownership check)
    pub async fn get_transaction(
        store: &dyn TransactionStore,
        user_id: Uuid,
        id: &str,
    ) -> Result<Transaction, AppError> {
        let id = Self::parse_id(id)?;
        store
            .find(user_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))
    }

    /// Compile the query, then fetch one page plus the total match count
    pub async fn list_transactions(
        store: &dyn TransactionStore,
        user_id: Uuid,
        params: &ListTransactionsQuery,
    ) -> Result<PaginatedTransactionResponse, AppError> {
        let query = filter::compile(user_id, params)?;
        debug!(
            user_id = %user_id,
            page = query.page.page,
            limit = query.page.limit,
            sort_by = query.sort.field.column(),
            "Listing transactions"
        );

        let transactions = store.scan(&query).await?;
        let total = store.count(&query).await?;

        Ok(PaginatedTransactionResponse {
            transactions: transactions.into_iter().map(Into::into).collect(),
            pagination: query.page.meta(total),
        })
    }

    /// Partial update: only supplied fields change
    pub async fn update_transaction(
        store: &dyn TransactionStore,
        user_id: Uuid,
        id: &str,
        dto: UpdateTransactionDto,
    ) -> Result<Transaction, AppError> {
        dto.validate()?;

        let current = Self::get_transaction(store, user_id, id).await?;
        let merged = Self::apply_update(current, dto);

        match store.update(&merged).await? {
            Some(updated) => {
                info!(transaction_id = %updated.id, user_id = %user_id, "Transaction updated");
                Ok(updated)
            }
            None => {
                warn!(transaction_id = %merged.id, user_id = %user_id, "Transaction vanished during update");
                Err(AppError::NotFound(NOT_FOUND.to_string()))
            }
        }
    }

    /// Delete a transaction (with ownership check)
    pub async fn delete_transaction(
        store: &dyn TransactionStore,
        user_id: Uuid,
        id: &str,
    ) -> Result<Uuid, AppError> {
        let id = Self::parse_id(id)?;

        if !store.delete(user_id, id).await? {
            warn!(transaction_id = %id, user_id = %user_id, "Delete of missing or foreign transaction");
            return Err(AppError::NotFound(NOT_FOUND.to_string()));
        }

        info!(transaction_id = %id, user_id = %user_id, "Transaction deleted");
        Ok(id)
    }

    /// Income, expense and category totals for the requested range
    pub async fn get_summary(
        store: &dyn TransactionStore,
        user_id: Uuid,
        params: &SummaryQuery,
    ) -> Result<AnalyticsSummary, AppError> {
        let range = analytics::resolve_range(params, Utc::now())?;
        debug!(
            user_id = %user_id,
            start = %range.start_date,
            end = %range.end_date,
            "Computing analytics summary"
        );

        let by_type = store.group_by_type(user_id, &range).await?;
        let breakdown = store.group_expenses_by_category(user_id, &range).await?;

        analytics::summarize(range, by_type, breakdown)
    }

    /// Malformed ids cannot name an existing record
    fn parse_id(raw: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound(NOT_FOUND.to_string()))
    }

    fn apply_update(current: Transaction, dto: UpdateTransactionDto) -> Transaction {
        let amount = dto.amount.unwrap_or(current.amount);
        let transaction_type = reclassify_on_update(
            current.transaction_type,
            current.amount,
            amount,
            dto.transaction_type,
        );

        let is_tax_deductible = dto.is_tax_deductible.unwrap_or(current.is_tax_deductible);
        let tax_category = match dto.tax_category {
            Some(value) => value,
            None => current.tax_category,
        };

        let details = current.details;
        let details = TransactionDetails {
            location: dto.location.or(details.location),
            merchant: dto.merchant.or(details.merchant),
            project: dto.project.or(details.project),
            client: dto.client.or(details.client),
            attachments: dto.attachments.unwrap_or(details.attachments),
            related_transactions: dto
                .related_transactions
                .unwrap_or(details.related_transactions),
            recurring: dto.recurring.or(details.recurring),
            notes: dto.notes.or(details.notes),
            tags: dto.tags.unwrap_or(details.tags),
        };

        Transaction {
            amount,
            description: dto
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or(current.description),
            date: dto.date.unwrap_or(current.date),
            category: dto.category.unwrap_or(current.category),
            transaction_type,
            is_tax_deductible,
            tax_category: normalize_tax_category(is_tax_deductible, tax_category),
            payment_method: dto.payment_method.unwrap_or(current.payment_method),
            status: dto.status.unwrap_or(current.status),
            details,
            ..current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::models::{Category, TaxCategory, TransactionType};
    use crate::transaction::store::MemoryTransactionStore;
    use chrono::{DateTime, Duration};
    use rust_decimal::Decimal;

    fn create_dto(amount: i64, category: &str) -> CreateTransactionDto {
        serde_json::from_value(serde_json::json!({
            "amount": amount,
            "description": "  Lunch  ",
            "date": Utc::now() - Duration::hours(2),
            "category": category,
        }))
        .expect("valid payload")
    }

    fn list_query(pairs: &[(&str, &str)]) -> ListTransactionsQuery {
        let map: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(map)).expect("valid query")
    }

    #[tokio::test]
    async fn test_create_derives_type_and_source() {
        let store = MemoryTransactionStore::new();
        let user = Uuid::new_v4();

        let expense =
            TransactionService::create_transaction(&store, user, create_dto(-40, "Food & Dining"))
                .await
                .unwrap();
        assert_eq!(expense.transaction_type, TransactionType::Expense);
        assert_eq!(expense.source, TransactionSource::Manual);
        assert_eq!(expense.description, "Lunch");

        let income =
            TransactionService::create_transaction(&store, user, create_dto(2500, "Salary"))
                .await
                .unwrap();
        assert_eq!(income.transaction_type, TransactionType::Income);
    }

    #[tokio::test]
    async fn test_create_drops_tax_category_when_not_deductible() {
        let store = MemoryTransactionStore::new();
        let mut dto = create_dto(-90, "Healthcare");
        dto.tax_category = Some(TaxCategory::Medical);

        let created = TransactionService::create_transaction(&store, Uuid::new_v4(), dto)
            .await
            .unwrap();
        assert_eq!(created.tax_category, None);
    }

    #[tokio::test]
    async fn test_create_rejects_zero_amount() {
        let store = MemoryTransactionStore::new();
        let result =
            TransactionService::create_transaction(&store, Uuid::new_v4(), create_dto(0, "Other"))
                .await;
        match result {
            Err(AppError::ValidationError(msg)) => assert!(msg.starts_with("amount:")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_and_foreign_ids_are_not_found() {
        let store = MemoryTransactionStore::new();
        let owner = Uuid::new_v4();
        let created =
            TransactionService::create_transaction(&store, owner, create_dto(-5, "Shopping"))
                .await
                .unwrap();

        let malformed = TransactionService::get_transaction(&store, owner, "not-a-uuid").await;
        assert!(matches!(malformed, Err(AppError::NotFound(_))));

        let foreign =
            TransactionService::get_transaction(&store, Uuid::new_v4(), &created.id.to_string())
                .await;
        assert!(matches!(foreign, Err(AppError::NotFound(_))));

        let deleted = TransactionService::delete_transaction(
            &store,
            Uuid::new_v4(),
            &created.id.to_string(),
        )
        .await;
        assert!(matches!(deleted, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_sign_flip_reclassifies() {
        let store = MemoryTransactionStore::new();
        let owner = Uuid::new_v4();
        let created =
            TransactionService::create_transaction(&store, owner, create_dto(-30, "Shopping"))
                .await
                .unwrap();

        let dto = UpdateTransactionDto {
            amount: Some(Decimal::from(30)),
            ..Default::default()
        };
        let updated =
            TransactionService::update_transaction(&store, owner, &created.id.to_string(), dto)
                .await
                .unwrap();

        assert_eq!(updated.transaction_type, TransactionType::Income);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_keeps_unspecified_fields() {
        let store = MemoryTransactionStore::new();
        let owner = Uuid::new_v4();
        let mut dto = create_dto(-12, "Groceries");
        dto.tags = vec!["weekly".to_string()];
        let created = TransactionService::create_transaction(&store, owner, dto)
            .await
            .unwrap();

        let patch = UpdateTransactionDto {
            category: Some(Category::FoodAndDining),
            ..Default::default()
        };
        let updated =
            TransactionService::update_transaction(&store, owner, &created.id.to_string(), patch)
                .await
                .unwrap();

        assert_eq!(updated.category, Category::FoodAndDining);
        assert_eq!(updated.amount, created.amount);
        assert_eq!(updated.details.tags, vec!["weekly".to_string()]);
        assert_eq!(updated.transaction_type, TransactionType::Expense);
    }

    #[tokio::test]
    async fn test_update_null_clears_tax_category() {
        let store = MemoryTransactionStore::new();
        let owner = Uuid::new_v4();
        let mut dto = create_dto(-90, "Healthcare");
        dto.is_tax_deductible = true;
        dto.tax_category = Some(TaxCategory::Medical);
        let created = TransactionService::create_transaction(&store, owner, dto)
            .await
            .unwrap();
        assert_eq!(created.tax_category, Some(TaxCategory::Medical));

        let patch: UpdateTransactionDto =
            serde_json::from_value(serde_json::json!({ "taxCategory": null })).unwrap();
        let updated =
            TransactionService::update_transaction(&store, owner, &created.id.to_string(), patch)
                .await
                .unwrap();

        assert_eq!(updated.tax_category, None);
        assert!(updated.is_tax_deductible);
    }

    #[tokio::test]
    async fn test_list_filters_and_paginates() {
        let store = MemoryTransactionStore::new();
        let owner = Uuid::new_v4();
        for _ in 0..3 {
            TransactionService::create_transaction(&store, owner, create_dto(-10, "Travel"))
                .await
                .unwrap();
        }
        TransactionService::create_transaction(&store, owner, create_dto(-10, "Rent"))
            .await
            .unwrap();
        TransactionService::create_transaction(&store, Uuid::new_v4(), create_dto(-10, "Travel"))
            .await
            .unwrap();

        let query = list_query(&[("category", "Travel"), ("limit", "2")]);
        let page = TransactionService::list_transactions(&store, owner, &query)
            .await
            .unwrap();

        assert_eq!(page.transactions.len(), 2);
        assert_eq!(page.pagination.total_transactions, 3);
        assert_eq!(page.pagination.total_pages, 2);
        assert!(page.pagination.has_next_page);
        assert!(!page.pagination.has_prev_page);
    }

    #[tokio::test]
    async fn test_summary_over_explicit_range() {
        let store = MemoryTransactionStore::new();
        let owner = Uuid::new_v4();
        TransactionService::create_transaction(&store, owner, create_dto(100, "Salary"))
            .await
            .unwrap();
        TransactionService::create_transaction(&store, owner, create_dto(-40, "Food & Dining"))
            .await
            .unwrap();
        TransactionService::create_transaction(&store, owner, create_dto(-10, "Food & Dining"))
            .await
            .unwrap();

        let start: DateTime<Utc> = Utc::now() - Duration::days(1);
        let params = SummaryQuery {
            start_date: Some(start.to_rfc3339()),
            end_date: Some(Utc::now().to_rfc3339()),
        };
        let summary = TransactionService::get_summary(&store, owner, &params)
            .await
            .unwrap();

        assert_eq!(summary.summary.total_income, Decimal::from(100));
        assert_eq!(summary.summary.total_expenses, Decimal::from(50));
        assert_eq!(summary.summary.net_income, Decimal::from(50));
        assert_eq!(summary.summary.transaction_count, 3);
        assert_eq!(summary.category_breakdown[0].category, Category::FoodAndDining);
    }

    #[tokio::test]
    async fn test_summary_over_inverted_range_is_empty() {
        let store = MemoryTransactionStore::new();
        let owner = Uuid::new_v4();
        TransactionService::create_transaction(&store, owner, create_dto(-25, "Travel"))
            .await
            .unwrap();

        let params = SummaryQuery {
            start_date: Some(Utc::now().to_rfc3339()),
            end_date: Some((Utc::now() - Duration::days(3)).to_rfc3339()),
        };
        let summary = TransactionService::get_summary(&store, owner, &params)
            .await
            .unwrap();

        assert_eq!(summary.summary.transaction_count, 0);
        assert_eq!(summary.summary.total_expenses, Decimal::ZERO);
        assert!(summary.category_breakdown.is_empty());
        assert!(summary.monthly_trends.is_empty());
    }
}
