pub mod handlers;
pub mod jwt;
pub mod models;
mod password;
mod service;

// Re-export handlers for use in main.rs
pub use handlers::{login, logout, me, refresh, register};

// Re-export for use in extractors and tests
pub use jwt::{create_access_token, decode_token, extract_token};
pub use models::{SubscriptionTier, User};
