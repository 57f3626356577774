pub mod auth;
pub mod config;
pub mod errors;
pub mod extractors;
pub mod openapi;
pub mod transaction;
