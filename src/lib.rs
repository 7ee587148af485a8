pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod export;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: models::config::ServerConfig) -> std::io::Result<()> {
    use std::sync::Arc;

    use actix_cors::Cors;
    use actix_files::Files;
    use actix_identity::IdentityMiddleware;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::middleware::from_fn;
    use actix_web::{App, HttpServer, middleware, web};
    use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
    use tera::Tera;

    use crate::domain::submission::{OrderSubmitter, StubOrderSubmitter};
    use crate::repository::ApiRepository;
    use crate::routes::auth::{login, logout, show_login};
    use crate::routes::dashboard::show_dashboard;
    use crate::routes::documents::{show_document, show_documents, upload_document};
    use crate::routes::main::index;
    use crate::routes::orders::{export_orders, export_quotes, show_order, show_orders, show_quotes};
    use crate::routes::products::{add_product, delete_product, show_product, show_products};
    use crate::routes::wizard::{reset_wizard, save_step, show_wizard, submit_order};

    let repo = ApiRepository::new(server_config.api_base_url.clone());
    log::info!("Using backend at {}", repo.base_url());

    let submitter: Arc<dyn OrderSubmitter> = Arc::new(StubOrderSubmitter);
    let submitter = web::Data::from(submitter);

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_login)
            .service(login)
            .service(
                web::scope("")
                    .wrap(from_fn(crate::middleware::redirect_unauthorized))
                    .service(index)
                    .service(logout)
                    .service(show_products)
                    .service(add_product)
                    .service(show_product)
                    .service(delete_product)
                    .service(show_documents)
                    .service(upload_document)
                    .service(show_document)
                    .service(show_orders)
                    .service(show_quotes)
                    .service(export_orders)
                    .service(export_quotes)
                    .service(show_wizard)
                    .service(save_step)
                    .service(submit_order)
                    .service(reset_wizard)
                    // Registered last so `/orders/export` and `/orders/new`
                    // are not captured as order ids.
                    .service(show_order)
                    .service(show_dashboard),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(submitter.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
