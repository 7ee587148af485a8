use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{Amount, ProductName, SanitizedText};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub minimum_order_quantity: Option<u32>,
    pub supplier_id: String,
    #[serde(default)]
    pub supplier_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// File forwarded to the backend alongside a multipart request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Product listing submitted by a supplier.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: SanitizedText,
    pub category: Option<String>,
    pub function: Option<String>,
    pub country: Option<String>,
    pub price: Option<Amount>,
    pub unit: Option<String>,
    pub minimum_order_quantity: Option<u32>,
    pub image: Option<Attachment>,
}
