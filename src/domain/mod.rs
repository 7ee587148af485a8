//! Domain aggregates exposed by the Cosmetia service layer.

pub mod auth;
pub mod dashboard;
pub mod document;
pub mod lookup;
pub mod order;
pub mod order_draft;
pub mod product;
pub mod submission;
pub mod types;
pub mod wizard;
