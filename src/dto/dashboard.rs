use serde::{Deserialize, Serialize};

use crate::domain::dashboard::{DashboardStats, Lead};
use crate::pagination::Paginated;

#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DashboardQuery {
    pub kind: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(skip_serializing)]
    pub page: Option<usize>,
}

pub struct DashboardPageData {
    pub stats: DashboardStats,
    pub leads: Paginated<Lead>,
    pub filters: DashboardQuery,
}
