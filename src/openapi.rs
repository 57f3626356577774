use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::models::{
    AuthTokenResponse, CreateUserDto, LoginDto, RefreshTokenDto, SubscriptionTier,
    UserResponseDto,
};
use crate::errors::ErrorResponse;
use crate::transaction::models::{
    AnalyticsSummary, Attachment, AttachmentKind, Category, CategoryTotals, Coordinates,
    CreateTransactionDto, DateRange, DeleteResponse, Location, Merchant,
    PaginatedTransactionResponse, PaginationMeta, PaymentMethod, Recurrence, RecurrenceFrequency,
    SummaryFigures, TaxCategory, TransactionResponse, TransactionSource, TransactionStatus,
    TransactionType, TypeTotals, UpdateTransactionDto,
};

/// Security scheme modifier for Bearer token authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT access token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation configuration
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FinTrack API",
        version = "1.0.0",
        description = "Personal finance tracking: transactions, filtering and spending analytics",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server"),
    ),
    tags(
        (name = "Auth", description = "Authentication and user management"),
        (name = "Transactions", description = "Transaction records, listing and analytics")
    ),
    paths(
        // Auth endpoints
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::auth::handlers::refresh,
        crate::auth::handlers::logout,
        crate::auth::handlers::me,
        // Transaction endpoints
        crate::transaction::handlers::list_transactions,
        crate::transaction::handlers::get_summary,
        crate::transaction::handlers::get_transaction,
        crate::transaction::handlers::create_transaction,
        crate::transaction::handlers::update_transaction,
        crate::transaction::handlers::delete_transaction,
    ),
    components(
        schemas(
            // Error response
            ErrorResponse,
            // Auth schemas
            CreateUserDto,
            LoginDto,
            RefreshTokenDto,
            SubscriptionTier,
            UserResponseDto,
            AuthTokenResponse,
            // Transaction schemas
            TransactionType,
            Category,
            PaymentMethod,
            TaxCategory,
            TransactionSource,
            TransactionStatus,
            Coordinates,
            Location,
            Merchant,
            AttachmentKind,
            Attachment,
            RecurrenceFrequency,
            Recurrence,
            TransactionResponse,
            CreateTransactionDto,
            UpdateTransactionDto,
            PaginationMeta,
            PaginatedTransactionResponse,
            TypeTotals,
            CategoryTotals,
            DateRange,
            SummaryFigures,
            AnalyticsSummary,
            DeleteResponse,
        )
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;
