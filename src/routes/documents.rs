use actix_identity::Identity;
use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::{AuthenticatedUser, Role};
use crate::dto::documents::DocumentsQuery;
use crate::forms::documents::UploadDocumentForm;
use crate::repository::ApiRepository;
use crate::routes::{
    base_context, query_string, redirect, render_template, service_error_page,
    service_error_redirect,
};
use crate::services::documents as documents_service;

#[get("/documents")]
pub async fn show_documents(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    query: web::Query<DocumentsQuery>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "documents");

    match documents_service::load_documents_page(&repo.for_user(&user), query.into_inner()).await
    {
        Ok(data) => {
            context.insert("documents", &data.documents);
            context.insert("filters", &data.filters);
            context.insert("filters_query", &query_string(&data.filters));
            context.insert("can_manage", &user.has_role(Role::Supplier));
            render_template(&tera, "documents/index.html", &context)
        }
        Err(err) => service_error_page(err, &tera, context, identity, "list documents"),
    }
}

#[get("/documents/{document_id}")]
pub async fn show_document(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    document_id: web::Path<String>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "documents");

    match documents_service::load_document_page(&repo.for_user(&user), &document_id).await {
        Ok(data) => {
            context.insert("document", &data.document);
            context.insert("product", &data.product);
            render_template(&tera, "documents/show.html", &context)
        }
        Err(err) => service_error_page(err, &tera, context, identity, "load document"),
    }
}

#[post("/documents")]
pub async fn upload_document(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    repo: web::Data<ApiRepository>,
    MultipartForm(form): MultipartForm<UploadDocumentForm>,
) -> impl Responder {
    match documents_service::upload_document(&repo.for_user(&user), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Document téléversé.").send();
            redirect("/documents")
        }
        Err(err) => service_error_redirect(err, identity, "/documents", "upload document"),
    }
}
