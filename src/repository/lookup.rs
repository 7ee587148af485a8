use async_trait::async_trait;

use crate::domain::lookup::{LookupEntry, Provider};
use crate::repository::errors::RepositoryResult;
use crate::repository::{LookupReader, UserApi};

#[async_trait]
impl<'a> LookupReader for UserApi<'a> {
    async fn list_categories(&self) -> RepositoryResult<Vec<LookupEntry>> {
        self.get_json("categories", &[]).await
    }

    async fn list_functions(&self) -> RepositoryResult<Vec<LookupEntry>> {
        self.get_json("functions", &[]).await
    }

    async fn list_countries(&self) -> RepositoryResult<Vec<LookupEntry>> {
        self.get_json("countries", &[]).await
    }

    async fn list_providers(&self) -> RepositoryResult<Vec<Provider>> {
        self.get_json("providers", &[]).await
    }
}
