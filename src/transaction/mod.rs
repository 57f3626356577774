pub mod analytics;
pub mod classifier;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod pg_store;
mod service;
pub mod store;

// Route table and store implementations wired up by main.rs and the tests
pub use handlers::configure;
pub use pg_store::PgTransactionStore;
pub use service::TransactionService;
pub use store::{MemoryTransactionStore, TransactionStore};
