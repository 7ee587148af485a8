use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::product::Attachment;
use crate::domain::types::{DocumentTitle, ProductId};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    TechnicalSheet,
    SafetySheet,
    Certificate,
    Other,
}

impl DocumentKind {
    pub fn id(self) -> &'static str {
        match self {
            DocumentKind::TechnicalSheet => "technical-sheet",
            DocumentKind::SafetySheet => "safety-sheet",
            DocumentKind::Certificate => "certificate",
            DocumentKind::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "technical-sheet" => Some(DocumentKind::TechnicalSheet),
            "safety-sheet" => Some(DocumentKind::SafetySheet),
            "certificate" => Some(DocumentKind::Certificate),
            "other" => Some(DocumentKind::Other),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub kind: DocumentKind,
    #[serde(default)]
    pub product_id: Option<String>,
    pub supplier_id: String,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

/// Document upload submitted by a supplier.
#[derive(Clone, Debug, PartialEq)]
pub struct NewDocument {
    pub title: DocumentTitle,
    pub kind: DocumentKind,
    pub product_id: Option<ProductId>,
    pub file: Attachment,
}
