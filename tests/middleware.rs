use actix_web::middleware::from_fn;
use actix_web::{
    App, HttpResponse,
    http::{StatusCode, header},
    test, web,
};

use cosmetia::middleware::redirect_unauthorized;

#[actix_web::test]
async fn redirects_unauthorized_to_login() {
    let app = test::init_service(
        App::new()
            .wrap(from_fn(redirect_unauthorized))
            .default_service(web::to(|| async { HttpResponse::Unauthorized().finish() })),
    )
    .await;

    let req = test::TestRequest::default().to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/auth/login");
}

#[actix_web::test]
async fn missing_identity_redirects_to_login() {
    let app = test::init_service(
        App::new()
            .wrap(from_fn(redirect_unauthorized))
            .wrap(actix_identity::IdentityMiddleware::default())
            .wrap(actix_session::SessionMiddleware::new(
                actix_session::storage::CookieSessionStore::default(),
                actix_web::cookie::Key::from(&[7u8; 64]),
            ))
            .route(
                "/orders",
                web::get().to(|user: cosmetia::domain::auth::AuthenticatedUser| async move {
                    HttpResponse::Ok().body(user.name)
                }),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/orders").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn success_response_passes_through() {
    let app = test::init_service(
        App::new()
            .wrap(from_fn(redirect_unauthorized))
            .default_service(web::to(|| async { HttpResponse::Ok().finish() })),
    )
    .await;

    let req = test::TestRequest::default().to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}
