use async_trait::async_trait;

use crate::domain::dashboard::{DashboardStats, Lead};
use crate::repository::api::ListResponse;
use crate::repository::errors::RepositoryResult;
use crate::repository::{DashboardReader, LeadListQuery, UserApi};

#[async_trait]
impl<'a> DashboardReader for UserApi<'a> {
    async fn dashboard_stats(&self) -> RepositoryResult<DashboardStats> {
        self.get_json("dashboard/stats", &[]).await
    }

    async fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)> {
        let list: ListResponse<Lead> = self.get_json("dashboard/leads", &query.to_params()).await?;
        Ok(list.into_parts())
    }
}
