use serde::Deserialize;
use validator::Validate;

use crate::domain::types::Email;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Credentials posted by the login page.
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Validated credentials ready to be exchanged for a token.
pub struct LoginPayload {
    pub email: Email,
    pub password: String,
}

impl TryFrom<LoginForm> for LoginPayload {
    type Error = FormError;

    fn try_from(form: LoginForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let email = Email::new(form.email).map_err(|_| FormError::InvalidEmail)?;
        Ok(Self {
            email,
            password: form.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_payload_normalizes_email() {
        let form = LoginForm {
            email: "Buyer@Example.com".to_string(),
            password: "secret".to_string(),
        };

        let payload = LoginPayload::try_from(form).unwrap();

        assert_eq!(payload.email.as_str(), "buyer@example.com");
    }

    #[test]
    fn login_requires_password() {
        let form = LoginForm {
            email: "buyer@example.com".to_string(),
            password: String::new(),
        };

        assert!(matches!(
            LoginPayload::try_from(form),
            Err(FormError::Validation(_))
        ));
    }
}
