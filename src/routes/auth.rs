use actix_identity::Identity;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::LoginForm;
use crate::models::auth::remember_user;
use crate::repository::ApiRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, auth as auth_service};

#[get("/auth/login")]
pub async fn show_login(
    user: Option<AuthenticatedUser>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if user.is_some() {
        return redirect("/");
    }

    let context = base_context(&flash_messages, None, "login");
    render_template(&tera, "auth/login.html", &context)
}

#[post("/auth/login")]
pub async fn login(
    req: HttpRequest,
    repo: web::Data<ApiRepository>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    match auth_service::login(&repo.anonymous(), form).await {
        Ok(user) => match remember_user(&req, &user) {
            Ok(_) => {
                FlashMessage::success(format!("Bienvenue, {}.", user.name)).send();
                redirect("/")
            }
            Err(err) => {
                log::error!("Failed to store identity: {err}");
                HttpResponse::InternalServerError().finish()
            }
        },
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/auth/login")
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            FlashMessage::error("Connexion impossible pour le moment. Veuillez réessayer.").send();
            redirect("/auth/login")
        }
    }
}

/// Forgets the identity. Logging out also purges the session, wizard draft
/// included.
#[post("/auth/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    redirect("/auth/login")
}
