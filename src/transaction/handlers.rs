use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::errors::{AppError, ErrorResponse};
use crate::extractors::AuthenticatedUser;

use super::models::{
    AnalyticsSummary, CreateTransactionDto, DeleteResponse, ListTransactionsQuery,
    PaginatedTransactionResponse, SummaryQuery, TransactionIdPath, TransactionResponse,
    UpdateTransactionDto,
};
use super::service::TransactionService;
use super::store::TransactionStore;

/// GET /transactions - List transactions with filters, sorting and pagination
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "Transactions",
    params(ListTransactionsQuery),
    responses(
        (status = 200, description = "Paginated list of transactions", body = PaginatedTransactionResponse),
        (status = 400, description = "Invalid filter, sort or paging parameter", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/transactions")]
pub async fn list_transactions(
    store: web::Data<dyn TransactionStore>,
    auth: AuthenticatedUser,
    query: web::Query<ListTransactionsQuery>,
) -> Result<HttpResponse, AppError> {
    let response =
        TransactionService::list_transactions(store.get_ref(), auth.user_id, &query).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /transactions/analytics/summary - Income, expenses and category breakdown
#[utoipa::path(
    get,
    path = "/transactions/analytics/summary",
    tag = "Transactions",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Analytics summary", body = AnalyticsSummary),
        (status = 400, description = "Invalid date", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/transactions/analytics/summary")]
pub async fn get_summary(
    store: web::Data<dyn TransactionStore>,
    auth: AuthenticatedUser,
    query: web::Query<SummaryQuery>,
) -> Result<HttpResponse, AppError> {
    let summary = TransactionService::get_summary(store.get_ref(), auth.user_id, &query).await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// GET /transactions/{id} - Get a specific transaction by ID
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "Transactions",
    params(TransactionIdPath),
    responses(
        (status = 200, description = "Transaction details", body = TransactionResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[get("/transactions/{id}")]
pub async fn get_transaction(
    store: web::Data<dyn TransactionStore>,
    auth: AuthenticatedUser,
    path: web::Path<TransactionIdPath>,
) -> Result<HttpResponse, AppError> {
    let transaction =
        TransactionService::get_transaction(store.get_ref(), auth.user_id, &path.id).await?;

    Ok(HttpResponse::Ok().json(TransactionResponse::from(transaction)))
}

/// POST /transactions - Create a new transaction
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "Transactions",
    request_body = CreateTransactionDto,
    responses(
        (status = 201, description = "Transaction created", body = TransactionResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[post("/transactions")]
pub async fn create_transaction(
    store: web::Data<dyn TransactionStore>,
    auth: AuthenticatedUser,
    body: web::Json<CreateTransactionDto>,
) -> Result<HttpResponse, AppError> {
    let transaction =
        TransactionService::create_transaction(store.get_ref(), auth.user_id, body.into_inner())
            .await?;

    Ok(HttpResponse::Created().json(TransactionResponse::from(transaction)))
}

/// PUT /transactions/{id} - Update a transaction (partial: omitted fields are kept)
#[utoipa::path(
    put,
    path = "/transactions/{id}",
    tag = "Transactions",
    params(TransactionIdPath),
    request_body = UpdateTransactionDto,
    responses(
        (status = 200, description = "Transaction updated", body = TransactionResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[put("/transactions/{id}")]
pub async fn update_transaction(
    store: web::Data<dyn TransactionStore>,
    auth: AuthenticatedUser,
    path: web::Path<TransactionIdPath>,
    body: web::Json<UpdateTransactionDto>,
) -> Result<HttpResponse, AppError> {
    let transaction = TransactionService::update_transaction(
        store.get_ref(),
        auth.user_id,
        &path.id,
        body.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(TransactionResponse::from(transaction)))
}

/// DELETE /transactions/{id} - Delete a transaction
#[utoipa::path(
    delete,
    path = "/transactions/{id}",
    tag = "Transactions",
    params(TransactionIdPath),
    responses(
        (status = 200, description = "Transaction deleted", body = DeleteResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[delete("/transactions/{id}")]
pub async fn delete_transaction(
    store: web::Data<dyn TransactionStore>,
    auth: AuthenticatedUser,
    path: web::Path<TransactionIdPath>,
) -> Result<HttpResponse, AppError> {
    let id = TransactionService::delete_transaction(store.get_ref(), auth.user_id, &path.id).await?;

    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: "Transaction deleted successfully".to_string(),
        id,
    }))
}

/// Register transaction routes; the fixed summary path must precede `{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_transactions)
        .service(get_summary)
        .service(create_transaction)
        .service(get_transaction)
        .service(update_transaction)
        .service(delete_transaction);
}
