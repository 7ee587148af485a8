//! Order and quote tracking, including spreadsheet export.

use chrono::{Local, NaiveDate};

use crate::domain::order::{Order, OrderKind, OrderStatus};
use crate::domain::types::OrderId;
use crate::dto::orders::{OrdersPageData, OrdersQuery};
use crate::export::{ExportFile, orders_workbook};
use crate::repository::{OrderListQuery, OrderReader};
use crate::services::{ServiceError, ServiceResult, filled, filled_date};

/// Filters with blank values dropped.
fn normalize(query: OrdersQuery) -> OrdersQuery {
    OrdersQuery {
        status: filled(query.status),
        search: filled(query.search),
        from: filled(query.from),
        to: filled(query.to),
    }
}

fn list_query(kind: OrderKind, filters: &OrdersQuery) -> OrderListQuery {
    let mut list_query = OrderListQuery::new(kind).between(
        filled_date(filters.from.as_deref()),
        filled_date(filters.to.as_deref()),
    );
    if let Some(status) = filters.status.as_deref().and_then(OrderStatus::parse) {
        list_query = list_query.status(status);
    }
    if let Some(term) = &filters.search {
        list_query = list_query.search(term.clone());
    }
    list_query
}

async fn fetch_orders<R>(repo: &R, kind: OrderKind, filters: &OrdersQuery) -> ServiceResult<Vec<Order>>
where
    R: OrderReader + ?Sized,
{
    repo.list_orders(list_query(kind, filters))
        .await
        .map_err(|err| {
            log::error!("Failed to list {}s: {err}", kind.id());
            ServiceError::from(err)
        })
}

pub async fn load_orders_page<R>(
    repo: &R,
    kind: OrderKind,
    query: OrdersQuery,
) -> ServiceResult<OrdersPageData>
where
    R: OrderReader + ?Sized,
{
    let filters = normalize(query);
    let orders = fetch_orders(repo, kind, &filters).await?;

    Ok(OrdersPageData {
        kind,
        orders,
        filters,
    })
}

pub async fn load_order<R>(repo: &R, order_id: &str) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    let order_id = OrderId::new(order_id).map_err(|_| ServiceError::NotFound)?;

    repo.get_order(&order_id)
        .await
        .map_err(|err| {
            log::error!("Failed to get order {order_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Exports the list matching `query` as of `date`.
pub async fn export_orders_on<R>(
    repo: &R,
    kind: OrderKind,
    query: OrdersQuery,
    date: NaiveDate,
) -> ServiceResult<ExportFile>
where
    R: OrderReader + ?Sized,
{
    let filters = normalize(query);
    let orders = fetch_orders(repo, kind, &filters).await?;

    orders_workbook(kind, &orders, date).map_err(|err| {
        log::error!("Failed to build {} export: {err}", kind.id());
        ServiceError::from(err)
    })
}

/// Exports the list matching `query`, named after today's date.
pub async fn export_orders<R>(
    repo: &R,
    kind: OrderKind,
    query: OrdersQuery,
) -> ServiceResult<ExportFile>
where
    R: OrderReader + ?Sized,
{
    export_orders_on(repo, kind, query, Local::now().date_naive()).await
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn quote() -> Order {
        Order {
            id: "q1".to_string(),
            reference: "DEV-001".to_string(),
            kind: OrderKind::Quote,
            status: OrderStatus::Confirmed,
            customer_name: "Laboratoire A".to_string(),
            supplier_name: "Fournisseur B".to_string(),
            items: vec![],
            total_amount: None,
            created_at: Utc::now(),
        }
    }

    #[actix_web::test]
    async fn filters_reach_backend_typed() {
        let mut repo = MockRepository::new();
        repo.expect_list_orders()
            .withf(|query| {
                query.kind == OrderKind::Quote
                    && query.status == Some(OrderStatus::Confirmed)
                    && query.from == NaiveDate::from_ymd_opt(2024, 1, 1)
                    && query.to.is_none()
                    && query.search.is_none()
            })
            .times(1)
            .returning(|_| Ok(vec![quote()]));

        let data = load_orders_page(
            &repo,
            OrderKind::Quote,
            OrdersQuery {
                status: Some("confirmed".to_string()),
                search: Some(" ".to_string()),
                from: Some("2024-01-01".to_string()),
                to: Some("hier".to_string()),
            },
        )
        .await
        .unwrap();

        assert_eq!(data.orders.len(), 1);
        assert_eq!(data.filters.search, None);
        assert_eq!(data.filters.to.as_deref(), Some("hier"));
    }

    #[actix_web::test]
    async fn unknown_order_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_order().returning(|_| Ok(None));

        assert!(matches!(
            load_order(&repo, "o404").await,
            Err(ServiceError::NotFound)
        ));
    }

    #[actix_web::test]
    async fn export_is_named_after_kind_and_date() {
        let mut repo = MockRepository::new();
        repo.expect_list_orders().returning(|_| Ok(vec![quote()]));
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();

        let file = export_orders_on(&repo, OrderKind::Quote, OrdersQuery::default(), date)
            .await
            .unwrap();

        assert_eq!(file.file_name, "devis-2024-06-30.xlsx");
        assert!(file.bytes.starts_with(b"PK"));
    }

    #[actix_web::test]
    async fn backend_failure_aborts_export() {
        let mut repo = MockRepository::new();
        repo.expect_list_orders()
            .returning(|_| Err(RepositoryError::ConnectionError("refused".to_string())));

        let result = export_orders(&repo, OrderKind::Order, OrdersQuery::default()).await;

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }
}
