use actix_web::{Responder, get};

use crate::domain::auth::{AuthenticatedUser, Role};
use crate::routes::redirect;

/// Suppliers land on their dashboard, everyone else on their orders.
#[get("/")]
pub async fn index(user: AuthenticatedUser) -> impl Responder {
    redirect(home_path(&user))
}

pub fn home_path(user: &AuthenticatedUser) -> &'static str {
    if user.has_role(Role::Supplier) {
        "/dashboard"
    } else {
        "/orders"
    }
}
