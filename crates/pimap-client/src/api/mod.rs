//! Typed client for the Map of Pi backend REST API.

mod map_center;
mod sellers;
mod users;

use std::time::Duration;

use reqwest::Client;

use pimap_core::{AppConfig, SessionUser};

use crate::error::ApiError;

/// Client for the external backend.
///
/// Maps 404, 401 and 429 to typed errors; transient failures (network
/// errors, 429) are retried with exponential backoff up to `max_retries`
/// additional attempts. A [`SessionUser`] may be attached for endpoints
/// that expect a bearer token; anonymous calls simply omit it.
pub struct ApiClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) max_retries: u32,
    pub(crate) backoff_base_secs: u64,
    session: Option<SessionUser>,
}

impl ApiClient {
    /// Creates an `ApiClient` with configured timeout, `User-Agent`, and
    /// retry policy. `max_retries = 0` disables retries.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            max_retries,
            backoff_base_secs,
            session: None,
        })
    }

    /// Builds a client from loaded application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.backend_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_secs,
        )
    }

    /// Attach an authenticated session; subsequent calls carry its bearer
    /// token.
    pub fn set_session(&mut self, session: SessionUser) {
        self.session = Some(session);
    }

    pub fn clear_session(&mut self) {
        self.session = None;
    }

    #[must_use]
    pub fn session(&self) -> Option<&SessionUser> {
        self.session.as_ref()
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Apply the session bearer token to a request, when one is attached.
    pub(crate) fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.session {
            Some(user) => request.bearer_auth(&user.access_token),
            None => request,
        }
    }

    /// Map a non-2xx response to the typed error taxonomy and otherwise
    /// hand the response back for body parsing.
    pub(crate) fn check_status(
        response: reqwest::Response,
        url: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(ApiError::RateLimited {
                url: url.to_owned(),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                url: url.to_owned(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthenticated {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response)
    }

    /// Read a response body and parse it as JSON with error context.
    pub(crate) async fn parse_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        context: &str,
    ) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Deserialize {
            context: context.to_owned(),
            source,
        })
    }
}
