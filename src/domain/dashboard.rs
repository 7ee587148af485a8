//! Supplier analytics: headline counters and recorded leads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub product_views: u64,
    pub document_views: u64,
    pub profile_views: u64,
    pub leads_count: u64,
    pub orders_count: u64,
    pub quotes_count: u64,
}

/// What a customer looked at when the lead was recorded.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LeadKind {
    Profile,
    Product,
    Document,
}

impl LeadKind {
    pub fn id(self) -> &'static str {
        match self {
            LeadKind::Profile => "profile",
            LeadKind::Product => "product",
            LeadKind::Document => "document",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "profile" => Some(LeadKind::Profile),
            "product" => Some(LeadKind::Product),
            "document" => Some(LeadKind::Document),
            _ => None,
        }
    }
}

/// Visit of a customer on a supplier's profile, product or document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub kind: LeadKind,
    pub customer_name: String,
    #[serde(default)]
    pub customer_company: Option<String>,
    #[serde(default)]
    pub target_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
