use std::collections::BTreeMap;

use actix_identity::Identity;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::{OrderKind, OrderStatus};
use crate::dto::orders::OrdersQuery;
use crate::export::ExportFile;
use crate::repository::ApiRepository;
use crate::routes::{
    base_context, query_string, render_template, service_error_page, service_error_redirect,
};
use crate::services::orders as orders_service;

fn list_path(kind: OrderKind) -> &'static str {
    match kind {
        OrderKind::Order => "/orders",
        OrderKind::Quote => "/quotes",
    }
}

/// Status id to French label, for templates.
fn status_labels() -> BTreeMap<&'static str, &'static str> {
    OrderStatus::ALL
        .iter()
        .map(|status| (status.id(), status.label()))
        .collect()
}

async fn render_list(
    kind: OrderKind,
    user: AuthenticatedUser,
    identity: Option<Identity>,
    query: OrdersQuery,
    repo: &ApiRepository,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
) -> HttpResponse {
    let current_page = match kind {
        OrderKind::Order => "orders",
        OrderKind::Quote => "quotes",
    };
    let mut context = base_context(flash_messages, Some(&user), current_page);

    match orders_service::load_orders_page(&repo.for_user(&user), kind, query).await {
        Ok(data) => {
            let statuses = OrderStatus::ALL
                .iter()
                .map(|status| (status.id(), status.label()))
                .collect::<Vec<_>>();
            context.insert("status_labels", &status_labels());
            let export_url = match query_string(&data.filters) {
                query if query.is_empty() => format!("{}/export", list_path(kind)),
                query => format!("{}/export?{query}", list_path(kind)),
            };
            context.insert("kind", &data.kind);
            context.insert("orders", &data.orders);
            context.insert("filters", &data.filters);
            context.insert("statuses", &statuses);
            context.insert("list_url", list_path(kind));
            context.insert("export_url", &export_url);
            render_template(tera, "orders/index.html", &context)
        }
        Err(err) => service_error_page(err, tera, context, identity, "list orders"),
    }
}

async fn export(
    kind: OrderKind,
    user: AuthenticatedUser,
    identity: Option<Identity>,
    query: OrdersQuery,
    repo: &ApiRepository,
) -> HttpResponse {
    match orders_service::export_orders(&repo.for_user(&user), kind, query).await {
        Ok(file) => attachment(file),
        Err(err) => service_error_redirect(err, identity, list_path(kind), "export orders"),
    }
}

/// Serves a generated file as a download.
fn attachment(file: ExportFile) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(file.content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file.file_name)],
        })
        .body(file.bytes)
}

#[get("/orders")]
pub async fn show_orders(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    query: web::Query<OrdersQuery>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_list(
        OrderKind::Order,
        user,
        identity,
        query.into_inner(),
        &repo,
        &flash_messages,
        &tera,
    )
    .await
}

#[get("/quotes")]
pub async fn show_quotes(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    query: web::Query<OrdersQuery>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_list(
        OrderKind::Quote,
        user,
        identity,
        query.into_inner(),
        &repo,
        &flash_messages,
        &tera,
    )
    .await
}

#[get("/orders/export")]
pub async fn export_orders(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    query: web::Query<OrdersQuery>,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    export(OrderKind::Order, user, identity, query.into_inner(), &repo).await
}

#[get("/quotes/export")]
pub async fn export_quotes(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    query: web::Query<OrdersQuery>,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    export(OrderKind::Quote, user, identity, query.into_inner(), &repo).await
}

#[get("/orders/{order_id}")]
pub async fn show_order(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    order_id: web::Path<String>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "orders");

    match orders_service::load_order(&repo.for_user(&user), &order_id).await {
        Ok(order) => {
            context.insert("items_summary", &order.items_summary());
            context.insert("status_labels", &status_labels());
            context.insert("order", &order);
            context.insert("list_url", list_path(order.kind));
            render_template(&tera, "orders/show.html", &context)
        }
        Err(err) => service_error_page(err, &tera, context, identity, "load order"),
    }
}
