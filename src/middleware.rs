//! Turns `401 Unauthorized` responses into a redirect to the login page.

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::middleware::Next;
use actix_web::{Error, HttpResponse};

pub const LOGIN_PATH: &str = "/auth/login";

/// Use with [`actix_web::middleware::from_fn`].
pub async fn redirect_unauthorized<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    let res = next.call(req).await?;

    if res.status() != StatusCode::UNAUTHORIZED {
        return Ok(res.map_into_left_body());
    }

    let (req, _) = res.into_parts();
    let redirect = HttpResponse::SeeOther()
        .insert_header((header::LOCATION, LOGIN_PATH))
        .finish();
    Ok(ServiceResponse::new(req, redirect).map_into_right_body())
}
