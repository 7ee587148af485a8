//! Extraction of the signed-in user from the identity cookie.

use std::future::{Ready, ready};

use actix_identity::{Identity, IdentityExt};
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};

use crate::domain::auth::AuthenticatedUser;

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(user_from_request(req))
    }
}

fn user_from_request(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let identity = req
        .get_identity()
        .map_err(|_| ErrorUnauthorized("not signed in"))?;
    let stored = identity
        .id()
        .map_err(|_| ErrorUnauthorized("not signed in"))?;

    serde_json::from_str(&stored).map_err(|err| {
        log::warn!("Discarding malformed identity: {err}");
        identity.logout();
        ErrorUnauthorized("not signed in")
    })
}

/// Stores the user, bearer token included, in the identity cookie.
pub fn remember_user(req: &HttpRequest, user: &AuthenticatedUser) -> Result<Identity, Error> {
    let stored = serde_json::to_string(user).map_err(actix_web::error::ErrorInternalServerError)?;
    Identity::login(&req.extensions(), stored).map_err(actix_web::error::ErrorInternalServerError)
}
