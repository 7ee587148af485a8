//! Login through the backend token endpoint.

use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::{LoginForm, LoginPayload};
use crate::repository::AuthGateway;
use crate::repository::errors::RepositoryError;
use crate::services::{ServiceError, ServiceResult};

/// Exchanges the posted credentials for a session user.
pub async fn login<R>(repo: &R, form: LoginForm) -> ServiceResult<AuthenticatedUser>
where
    R: AuthGateway + ?Sized,
{
    let payload = LoginPayload::try_from(form).map_err(|err| {
        log::warn!("Rejected login form: {err}");
        ServiceError::Form("Adresse e-mail ou mot de passe invalide".to_string())
    })?;

    match repo.login(&payload.email, &payload.password).await {
        Ok(session) => {
            log::info!("User {} signed in", session.user.email);
            Ok(AuthenticatedUser::from(session))
        }
        Err(RepositoryError::Unauthorized | RepositoryError::ValidationError(_)) => Err(
            ServiceError::Form("Identifiants incorrects".to_string()),
        ),
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            Err(ServiceError::from(err))
        }
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::auth::{LoginSession, Role, User};
    use crate::repository::mock::MockRepository;

    fn form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_web::test]
    async fn successful_login_keeps_token() {
        let mut repo = MockRepository::new();
        repo.expect_login()
            .withf(|email, password| email.as_str() == "buyer@example.com" && password.to_string() == "pw")
            .times(1)
            .returning(|_, _| {
                Ok(LoginSession {
                    access_token: "tok".to_string(),
                    user: User {
                        id: "u1".to_string(),
                        email: "buyer@example.com".to_string(),
                        name: "Buyer".to_string(),
                        role: Role::Customer,
                    },
                })
            });

        let user = login(&repo, form("Buyer@example.com", "pw")).await.unwrap();

        assert_eq!(user.access_token, "tok");
        assert_eq!(user.role, Role::Customer);
    }

    #[actix_web::test]
    async fn rejected_credentials_become_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_login()
            .returning(|_, _| Err(RepositoryError::Unauthorized));

        let result = login(&repo, form("buyer@example.com", "bad")).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn malformed_email_never_reaches_backend() {
        let mut repo = MockRepository::new();
        repo.expect_login().times(0);

        let result = login(&repo, form("not-an-email", "pw")).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
