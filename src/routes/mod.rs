//! HTTP handlers and the helpers they share.

use actix_identity::Identity;
use actix_web::HttpResponse;
use actix_web::http::{StatusCode, header};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;
use crate::middleware::LOGIN_PATH;
use crate::services::ServiceError;

pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod main;
pub mod orders;
pub mod products;
pub mod wizard;

/// Bootstrap alert class for a flash message level.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: alerts, the current user and the active
/// navigation entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    current_page: &str,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    if let Some(user) = user {
        context.insert("current_user", &user.public_view());
    }
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_with_status(tera, StatusCode::OK, template, context)
}

fn render_with_status(
    tera: &Tera,
    status: StatusCode,
    template: &str,
    context: &Context,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Query string reproducing `filters`, for pagination and export links.
/// Unset filters are omitted.
pub fn query_string<T: Serialize>(filters: &T) -> String {
    serde_html_form::to_string(filters).unwrap_or_else(|err| {
        log::warn!("Failed to encode filters: {err}");
        String::new()
    })
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Renders the error page with `status`.
pub fn error_page(tera: &Tera, mut context: Context, status: StatusCode, message: &str) -> HttpResponse {
    context.insert("status", &status.as_u16());
    context.insert("message", message);
    render_with_status(tera, status, "errors/error.html", &context)
}

pub fn not_found(tera: &Tera, context: Context) -> HttpResponse {
    error_page(tera, context, StatusCode::NOT_FOUND, "Page introuvable")
}

/// Response for service errors that are handled the same way on every page.
///
/// Missing permissions go back home, an expired backend token signs the
/// user out, missing entities render a `404` and anything else a `502`
/// page naming the failed operation.
pub fn service_error_page(
    err: ServiceError,
    tera: &Tera,
    context: Context,
    identity: Option<Identity>,
    operation: &str,
) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error("Accès non autorisé.").send();
            redirect("/")
        }
        ServiceError::SessionExpired => sign_out(identity),
        ServiceError::NotFound => not_found(tera, context),
        ServiceError::Form(message) => {
            error_page(tera, context, StatusCode::BAD_REQUEST, &message)
        }
        err => {
            log::error!("Failed to {operation}: {err}");
            error_page(
                tera,
                context,
                StatusCode::BAD_GATEWAY,
                "Le service est momentanément indisponible. Veuillez réessayer.",
            )
        }
    }
}

/// Response for a failed form action: a flash message and a redirect back.
pub fn service_error_redirect(
    err: ServiceError,
    identity: Option<Identity>,
    back_to: &str,
    operation: &str,
) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            FlashMessage::error("Accès non autorisé.").send();
            redirect("/")
        }
        ServiceError::SessionExpired => sign_out(identity),
        ServiceError::NotFound => {
            FlashMessage::error("Élément introuvable.").send();
            redirect(back_to)
        }
        ServiceError::Form(message) => {
            FlashMessage::error(message).send();
            redirect(back_to)
        }
        err => {
            log::error!("Failed to {operation}: {err}");
            FlashMessage::error(format!("Erreur lors de l'opération : {err}")).send();
            redirect(back_to)
        }
    }
}

fn sign_out(identity: Option<Identity>) -> HttpResponse {
    if let Some(identity) = identity {
        identity.logout();
    }
    FlashMessage::warning("Votre session a expiré, veuillez vous reconnecter.").send();
    redirect(LOGIN_PATH)
}
