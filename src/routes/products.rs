use actix_identity::Identity;
use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::{AuthenticatedUser, Role};
use crate::dto::products::ProductsQuery;
use crate::forms::products::AddProductForm;
use crate::repository::ApiRepository;
use crate::routes::{
    base_context, query_string, redirect, render_template, service_error_page,
    service_error_redirect,
};
use crate::services::products as products_service;

#[get("/products")]
pub async fn show_products(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    query: web::Query<ProductsQuery>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "products");

    match products_service::load_products_page(&repo.for_user(&user), query.into_inner()).await {
        Ok(data) => {
            context.insert("products", &data.products);
            context.insert("filters", &data.filters);
            context.insert("filters_query", &query_string(&data.filters));
            context.insert("categories", &data.categories);
            context.insert("functions", &data.functions);
            context.insert("countries", &data.countries);
            context.insert("can_manage", &user.has_role(Role::Supplier));
            render_template(&tera, "products/index.html", &context)
        }
        Err(err) => service_error_page(err, &tera, context, identity, "list products"),
    }
}

#[get("/products/{product_id}")]
pub async fn show_product(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    product_id: web::Path<String>,
    repo: web::Data<ApiRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, Some(&user), "products");

    match products_service::load_product_page(&repo.for_user(&user), &product_id).await {
        Ok(data) => {
            let can_manage =
                user.has_role(Role::Supplier) && data.product.supplier_id == user.id;
            context.insert("product", &data.product);
            context.insert("documents", &data.documents);
            context.insert("can_manage", &can_manage);
            render_template(&tera, "products/show.html", &context)
        }
        Err(err) => service_error_page(err, &tera, context, identity, "load product"),
    }
}

#[post("/products")]
pub async fn add_product(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    repo: web::Data<ApiRepository>,
    MultipartForm(form): MultipartForm<AddProductForm>,
) -> impl Responder {
    match products_service::add_product(&repo.for_user(&user), &user, form).await {
        Ok(()) => {
            FlashMessage::success("Produit ajouté.").send();
            redirect("/products")
        }
        Err(err) => service_error_redirect(err, identity, "/products", "add product"),
    }
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    user: AuthenticatedUser,
    identity: Option<Identity>,
    product_id: web::Path<String>,
    repo: web::Data<ApiRepository>,
) -> impl Responder {
    match products_service::delete_product(&repo.for_user(&user), &user, &product_id).await {
        Ok(()) => {
            FlashMessage::success("Produit supprimé.").send();
            redirect("/products")
        }
        Err(err) => service_error_redirect(
            err,
            identity,
            &format!("/products/{product_id}"),
            "delete product",
        ),
    }
}
