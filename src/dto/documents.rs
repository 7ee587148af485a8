use serde::{Deserialize, Serialize};

use crate::domain::document::Document;
use crate::domain::product::Product;
use crate::pagination::Paginated;

#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DocumentsQuery {
    pub search: Option<String>,
    pub kind: Option<String>,
    pub product_id: Option<String>,
    #[serde(skip_serializing)]
    pub page: Option<usize>,
}

pub struct DocumentsPageData {
    pub documents: Paginated<Document>,
    pub filters: DocumentsQuery,
}

pub struct DocumentPageData {
    pub document: Document,
    /// Product the document belongs to, when it still exists.
    pub product: Option<Product>,
}
