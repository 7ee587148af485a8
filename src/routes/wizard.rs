use std::collections::HashMap;

use actix_identity::Identity;
use actix_session::Session;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::submission::OrderSubmitter;
use crate::domain::wizard::OrderWizard;
use crate::dto::wizard::WizardQuery;
use crate::forms::wizard::StepForm;
use crate::repository::ApiRepository;
use crate::routes::{
    base_context, redirect, render_template, service_error_page, service_error_redirect,
};
use crate::services::wizard::{self as wizard_service, WizardStore};
use crate::services::{ServiceError, ServiceResult};

const WIZARD_PATH: &str = "/orders/new";
const WIZARD_SESSION_KEY: &str = "order_wizard";

/// Budget for the serialized session state. Encryption and base64 grow it by
/// about a third on the way into the 4 KB cookie.
const MAX_SESSION_STATE_BYTES: usize = 2900;

const DRAFT_TOO_LARGE: &str = "Le brouillon est trop volumineux pour être enregistré. \
                               Raccourcissez les textes ou retirez des matières premières.";

/// Keeps the wizard in the signed session cookie.
pub struct SessionWizardStore(pub Session);

impl WizardStore for SessionWizardStore {
    fn load(&self) -> ServiceResult<Option<OrderWizard>> {
        self.0
            .get::<OrderWizard>(WIZARD_SESSION_KEY)
            .map_err(|err| ServiceError::Internal(err.to_string()))
    }

    fn save(&self, wizard: &OrderWizard) -> ServiceResult<()> {
        let serialized = serde_json::to_string(wizard).map_err(|err| {
            log::error!("Failed to serialize wizard draft: {err}");
            ServiceError::Internal(err.to_string())
        })?;

        let mut state: HashMap<String, String> = self.0.entries().clone();
        state.insert(WIZARD_SESSION_KEY.to_string(), serialized);
        let state_size = serde_json::to_string(&state)
            .map_err(|err| ServiceError::Internal(err.to_string()))?
            .len();
        if state_size > MAX_SESSION_STATE_BYTES {
            log::warn!("Refused wizard draft of {state_size} session bytes");
            return Err(ServiceError::Form(DRAFT_TOO_LARGE.to_string()));
        }

        self.0.insert(WIZARD_SESSION_KEY, wizard).map_err(|err| {
            log::error!("Failed to store wizard draft: {err}");
            ServiceError::Internal(err.to_string())
        })
    }

    fn clear(&self) {
        self.0.remove(WIZARD_SESSION_KEY);
    }
}

#[get("/orders/new")]
pub async fn show_wizard(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    session: Session,
    query: web::Query<WizardQuery>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let store = SessionWizardStore(session);
    let mut context = base_context(&flash_messages, Some(&user), "new_order");

    match wizard_service::load_wizard_page(
        &repo.for_user(&user),
        &store,
        &user,
        query.into_inner(),
    )
    .await
    {
        Ok(data) => {
            context.insert("wizard", &data);
            render_template(&tera, "wizard/index.html", &context)
        }
        Err(err) => service_error_page(err, &tera, context, identity, "load order wizard"),
    }
}

/// Repeated item fields need `serde_html_form`, so the body is parsed by
/// hand rather than through `web::Form`.
#[post("/orders/new/step")]
pub async fn save_step(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    session: Session,
    body: web::Bytes,
) -> impl Responder {
    let form = match StepForm::parse(&body) {
        Ok(form) => form,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(WIZARD_PATH);
        }
    };

    match wizard_service::apply_step(&SessionWizardStore(session), &user, form) {
        Ok(_) => redirect(WIZARD_PATH),
        Err(err) => service_error_redirect(err, identity, WIZARD_PATH, "save wizard step"),
    }
}

#[post("/orders/new/submit")]
pub async fn submit_order(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    session: Session,
    submitter: web::Data<dyn OrderSubmitter>,
) -> impl Responder {
    let store = SessionWizardStore(session);

    match wizard_service::submit_wizard(&store, submitter.get_ref(), &user).await {
        Ok(result) => {
            let message = match result.order {
                Some(order) => format!("Commande {} envoyée.", order.reference),
                None => "Commande envoyée.".to_string(),
            };
            FlashMessage::success(message).send();
            redirect("/orders")
        }
        Err(err) => service_error_redirect(err, identity, WIZARD_PATH, "submit order"),
    }
}

#[post("/orders/new/reset")]
pub async fn reset_wizard(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    session: Session,
) -> impl Responder {
    match wizard_service::reset_wizard(&SessionWizardStore(session), &user) {
        Ok(()) => {
            FlashMessage::info("Brouillon supprimé.").send();
            redirect(WIZARD_PATH)
        }
        Err(err) => service_error_redirect(err, identity, WIZARD_PATH, "reset order wizard"),
    }
}
