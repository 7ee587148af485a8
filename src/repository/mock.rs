//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::auth::LoginSession;
use crate::domain::dashboard::{DashboardStats, Lead};
use crate::domain::document::{Document, NewDocument};
use crate::domain::lookup::{LookupEntry, Provider};
use crate::domain::order::Order;
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{DocumentId, Email, OrderId, ProductId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AuthGateway, DashboardReader, DocumentListQuery, DocumentReader, DocumentWriter,
    LeadListQuery, LookupReader, OrderListQuery, OrderReader, ProductListQuery, ProductReader,
    ProductWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl AuthGateway for Repository {
        async fn login(&self, email: &Email, password: &str) -> RepositoryResult<LoginSession>;
    }

    #[async_trait]
    impl ProductReader for Repository {
        async fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)>;
        async fn get_product(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
    }

    #[async_trait]
    impl ProductWriter for Repository {
        async fn create_product(&self, product: NewProduct) -> RepositoryResult<Product>;
        async fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl DocumentReader for Repository {
        async fn list_documents(
            &self,
            query: DocumentListQuery,
        ) -> RepositoryResult<(usize, Vec<Document>)>;
        async fn get_document(&self, id: &DocumentId) -> RepositoryResult<Option<Document>>;
    }

    #[async_trait]
    impl DocumentWriter for Repository {
        async fn upload_document(&self, document: NewDocument) -> RepositoryResult<Document>;
    }

    #[async_trait]
    impl OrderReader for Repository {
        async fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>>;
        async fn get_order(&self, id: &OrderId) -> RepositoryResult<Option<Order>>;
    }

    #[async_trait]
    impl LookupReader for Repository {
        async fn list_categories(&self) -> RepositoryResult<Vec<LookupEntry>>;
        async fn list_functions(&self) -> RepositoryResult<Vec<LookupEntry>>;
        async fn list_countries(&self) -> RepositoryResult<Vec<LookupEntry>>;
        async fn list_providers(&self) -> RepositoryResult<Vec<Provider>>;
    }

    #[async_trait]
    impl DashboardReader for Repository {
        async fn dashboard_stats(&self) -> RepositoryResult<DashboardStats>;
        async fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
    }
}
