//! DTO modules that bridge services with templates.

pub mod dashboard;
pub mod documents;
pub mod orders;
pub mod products;
pub mod wizard;
