use async_trait::async_trait;
use serde_json::json;

use crate::domain::auth::LoginSession;
use crate::domain::types::Email;
use crate::repository::errors::RepositoryResult;
use crate::repository::{AuthGateway, UserApi};

#[async_trait]
impl<'a> AuthGateway for UserApi<'a> {
    async fn login(&self, email: &Email, password: &str) -> RepositoryResult<LoginSession> {
        self.post_json(
            "auth/login",
            &json!({
                "email": email.as_str(),
                "password": password,
            }),
        )
        .await
    }
}
