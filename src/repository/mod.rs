use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::auth::LoginSession;
use crate::domain::dashboard::{DashboardStats, Lead, LeadKind};
use crate::domain::document::{Document, DocumentKind, NewDocument};
use crate::domain::lookup::{LookupEntry, Provider};
use crate::domain::order::{Order, OrderKind, OrderStatus};
use crate::domain::product::{NewProduct, Product};
use crate::domain::types::{DocumentId, Email, OrderId, ProductId};
use crate::repository::errors::RepositoryResult;

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod document;
pub mod errors;
pub mod lookup;
pub mod order;
pub mod product;

#[cfg(feature = "test-mocks")]
pub mod mock;

pub use api::{ApiRepository, UserApi};

/// Query string pairs sent to the backend.
pub type QueryParams = Vec<(&'static str, String)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Appends `value` when it holds something other than whitespace.
fn push_filled(params: &mut QueryParams, key: &'static str, value: &Option<String>) {
    if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        params.push((key, value.to_string()));
    }
}

fn push_pagination(params: &mut QueryParams, pagination: &Option<Pagination>) {
    if let Some(pagination) = pagination {
        params.push(("page", pagination.page.to_string()));
        params.push(("perPage", pagination.per_page.to_string()));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub function: Option<String>,
    pub country: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_filled(&mut params, "search", &self.search);
        push_filled(&mut params, "category", &self.category);
        push_filled(&mut params, "function", &self.function);
        push_filled(&mut params, "country", &self.country);
        push_pagination(&mut params, &self.pagination);
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentListQuery {
    pub search: Option<String>,
    pub kind: Option<DocumentKind>,
    pub product_id: Option<ProductId>,
    pub pagination: Option<Pagination>,
}

impl DocumentListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn kind(mut self, kind: DocumentKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn product(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        push_filled(&mut params, "search", &self.search);
        if let Some(kind) = self.kind {
            params.push(("kind", kind.id().to_string()));
        }
        if let Some(product_id) = &self.product_id {
            params.push(("productId", product_id.to_string()));
        }
        push_pagination(&mut params, &self.pagination);
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderListQuery {
    pub kind: OrderKind,
    pub status: Option<OrderStatus>,
    pub search: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl OrderListQuery {
    pub fn new(kind: OrderKind) -> Self {
        Self {
            kind,
            status: None,
            search: None,
            from: None,
            to: None,
        }
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = vec![("type", self.kind.id().to_string())];
        if let Some(status) = self.status {
            params.push(("status", status.id().to_string()));
        }
        push_filled(&mut params, "search", &self.search);
        if let Some(from) = self.from {
            params.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            params.push(("to", to.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadListQuery {
    pub kind: Option<LeadKind>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub pagination: Option<Pagination>,
}

impl LeadListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: LeadKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        if let Some(kind) = self.kind {
            params.push(("type", kind.id().to_string()));
        }
        if let Some(from) = self.from {
            params.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            params.push(("to", to.format("%Y-%m-%d").to_string()));
        }
        push_pagination(&mut params, &self.pagination);
        params
    }
}

#[async_trait]
pub trait AuthGateway {
    async fn login(&self, email: &Email, password: &str) -> RepositoryResult<LoginSession>;
}

#[async_trait]
pub trait ProductReader {
    async fn list_products(&self, query: ProductListQuery)
    -> RepositoryResult<(usize, Vec<Product>)>;
    async fn get_product(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
}

#[async_trait]
pub trait ProductWriter {
    async fn create_product(&self, product: NewProduct) -> RepositoryResult<Product>;
    async fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait DocumentReader {
    async fn list_documents(
        &self,
        query: DocumentListQuery,
    ) -> RepositoryResult<(usize, Vec<Document>)>;
    async fn get_document(&self, id: &DocumentId) -> RepositoryResult<Option<Document>>;
}

#[async_trait]
pub trait DocumentWriter {
    async fn upload_document(&self, document: NewDocument) -> RepositoryResult<Document>;
}

#[async_trait]
pub trait OrderReader {
    async fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>>;
    async fn get_order(&self, id: &OrderId) -> RepositoryResult<Option<Order>>;
}

#[async_trait]
pub trait LookupReader {
    async fn list_categories(&self) -> RepositoryResult<Vec<LookupEntry>>;
    async fn list_functions(&self) -> RepositoryResult<Vec<LookupEntry>>;
    async fn list_countries(&self) -> RepositoryResult<Vec<LookupEntry>>;
    async fn list_providers(&self) -> RepositoryResult<Vec<Provider>>;
}

#[async_trait]
pub trait DashboardReader {
    async fn dashboard_stats(&self) -> RepositoryResult<DashboardStats>;
    async fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
}
