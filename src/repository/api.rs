//! HTTP client for the Cosmetia backend REST API.

use reqwest::{RequestBuilder, Response, StatusCode, multipart};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::product::Attachment;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// List envelope returned by collection endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<usize>,
}

impl<T> ListResponse<T> {
    /// Total reported by the backend, or the page length when absent.
    pub fn into_parts(self) -> (usize, Vec<T>) {
        let total = self.total.unwrap_or(self.items.len());
        (total, self.items)
    }
}

/// Shared backend client. Cheap to clone; one per application.
#[derive(Clone)]
pub struct ApiRepository {
    http: reqwest::Client,
    base_url: String,
}

impl ApiRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Binds the client to the bearer token of the signed-in user.
    pub fn for_user<'a>(&'a self, user: &'a AuthenticatedUser) -> UserApi<'a> {
        UserApi {
            api: self,
            token: Some(user.access_token.as_str()),
        }
    }

    /// Client for endpoints that do not require a token.
    pub fn anonymous(&self) -> UserApi<'_> {
        UserApi {
            api: self,
            token: None,
        }
    }
}

/// Backend client bound to one caller's token for the duration of a request.
pub struct UserApi<'a> {
    api: &'a ApiRepository,
    token: Option<&'a str>,
}

impl UserApi<'_> {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api.base_url, path.trim_start_matches('/'))
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token.filter(|token| !token.is_empty()) {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn ensure_success(resp: Response) -> RepositoryResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(RepositoryError::from_status(status, body))
    }

    async fn parse<R: DeserializeOwned>(resp: Response) -> RepositoryResult<R> {
        let resp = Self::ensure_success(resp).await?;
        resp.json::<R>()
            .await
            .map_err(|e| RepositoryError::Decode(format!("response body: {e}")))
    }

    pub(crate) async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> RepositoryResult<R> {
        let req = self.authed(self.api.http.get(self.url(path)).query(params));
        let resp = req.send().await?;
        Self::parse(resp).await
    }

    /// Like [`Self::get_json`] but maps `404` onto `None`.
    pub(crate) async fn get_optional<R: DeserializeOwned>(
        &self,
        path: &str,
    ) -> RepositoryResult<Option<R>> {
        let req = self.authed(self.api.http.get(self.url(path)));
        let resp = req.send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::parse(resp).await.map(Some)
    }

    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> RepositoryResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let req = self.authed(self.api.http.post(self.url(path)).json(body));
        let resp = req.send().await?;
        Self::parse(resp).await
    }

    pub(crate) async fn post_multipart<R: DeserializeOwned>(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> RepositoryResult<R> {
        let req = self.authed(self.api.http.post(self.url(path)).multipart(form));
        let resp = req.send().await?;
        Self::parse(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> RepositoryResult<()> {
        let req = self.authed(self.api.http.delete(self.url(path)));
        let resp = req.send().await?;
        Self::ensure_success(resp).await.map(|_| ())
    }
}

/// Builds the multipart part for an uploaded file.
pub(crate) fn attachment_part(attachment: Attachment) -> RepositoryResult<multipart::Part> {
    multipart::Part::bytes(attachment.bytes)
        .file_name(attachment.file_name)
        .mime_str(&attachment.content_type)
        .map_err(|e| RepositoryError::ValidationError(format!("invalid content type: {e}")))
}

/// Adds a text part when the value is present and non-blank.
pub(crate) fn optional_text(
    form: multipart::Form,
    name: &'static str,
    value: Option<String>,
) -> multipart::Form {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(value) => form.text(name, value),
        None => form,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::Role;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            id: "u1".to_string(),
            email: "buyer@example.com".to_string(),
            name: "Buyer".to_string(),
            role: Role::Customer,
            access_token: "secret-token".to_string(),
        }
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = ApiRepository::new("http://backend.local/api/");
        assert_eq!(api.base_url(), "http://backend.local/api");
        assert_eq!(
            api.anonymous().url("/products/p1"),
            "http://backend.local/api/products/p1"
        );
    }

    #[test]
    fn user_binding_attaches_bearer_token() {
        let api = ApiRepository::new("http://backend.local");
        let user = user();
        let bound = api.for_user(&user);

        let request = bound
            .authed(reqwest::Client::new().get(bound.url("orders")))
            .build()
            .unwrap();

        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer secret-token"
        );
    }

    #[test]
    fn anonymous_requests_have_no_authorization() {
        let api = ApiRepository::new("http://backend.local");
        let anonymous = api.anonymous();

        let request = anonymous
            .authed(reqwest::Client::new().get(anonymous.url("auth/login")))
            .build()
            .unwrap();

        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn list_total_falls_back_to_page_length() {
        let list: ListResponse<u8> = serde_json::from_str(r#"{"items": [1, 2, 3]}"#).unwrap();
        assert_eq!(list.into_parts(), (3, vec![1, 2, 3]));
    }
}
