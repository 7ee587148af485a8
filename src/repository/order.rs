use async_trait::async_trait;

use crate::domain::order::Order;
use crate::domain::types::OrderId;
use crate::repository::api::ListResponse;
use crate::repository::errors::RepositoryResult;
use crate::repository::{OrderListQuery, OrderReader, UserApi};

#[async_trait]
impl<'a> OrderReader for UserApi<'a> {
    async fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<Vec<Order>> {
        let list: ListResponse<Order> = self.get_json("orders", &query.to_params()).await?;
        Ok(list.items)
    }

    async fn get_order(&self, id: &OrderId) -> RepositoryResult<Option<Order>> {
        self.get_optional(&format!("orders/{id}")).await
    }
}
