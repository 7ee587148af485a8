use serde::{Deserialize, Serialize};

use crate::domain::document::Document;
use crate::domain::lookup::LookupEntry;
use crate::domain::product::Product;
use crate::pagination::Paginated;

/// Catalog filters read from the query string and echoed back to the page.
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProductsQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub function: Option<String>,
    pub country: Option<String>,
    #[serde(skip_serializing)]
    pub page: Option<usize>,
}

/// Data required to render the product catalog.
pub struct ProductsPageData {
    pub products: Paginated<Product>,
    /// Normalized filters; blank values are dropped.
    pub filters: ProductsQuery,
    pub categories: Vec<LookupEntry>,
    pub functions: Vec<LookupEntry>,
    pub countries: Vec<LookupEntry>,
}

/// Data required to render a single product.
pub struct ProductPageData {
    pub product: Product,
    /// Documents attached to the product.
    pub documents: Vec<Document>,
}
