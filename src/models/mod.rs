//! Request-scoped models: configuration and the signed-in user extractor.

pub mod auth;
pub mod config;
