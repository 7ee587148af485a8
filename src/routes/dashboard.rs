use actix_identity::Identity;
use actix_web::{Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::dashboard::DashboardQuery;
use crate::repository::ApiRepository;
use crate::routes::{base_context, query_string, render_template, service_error_page};
use crate::services::dashboard as dashboard_service;

#[get("/dashboard")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    query: web::Query<DashboardQuery>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "dashboard");

    match dashboard_service::load_dashboard(&repo.for_user(&user), &user, query.into_inner()).await
    {
        Ok(data) => {
            context.insert("stats", &data.stats);
            context.insert("leads", &data.leads);
            context.insert("filters", &data.filters);
            context.insert("filters_query", &query_string(&data.filters));
            render_template(&tera, "dashboard/index.html", &context)
        }
        Err(err) => service_error_page(err, &tera, context, identity, "load dashboard"),
    }
}
