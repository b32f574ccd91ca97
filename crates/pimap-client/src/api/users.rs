//! Thin wrappers over the external auth collaborator.
//!
//! Authentication protocol design is out of scope here: the Pi SDK hands
//! the frontend an access token and these calls exchange or validate it.

use serde::Deserialize;
use serde_json::json;

use pimap_core::SessionUser;

use super::ApiClient;
use crate::error::ApiError;
use crate::retry::retry_with_backoff;

#[derive(Debug, Deserialize)]
struct AuthenticateResponse {
    pi_uid: String,
    username: String,
    token: String,
}

impl ApiClient {
    /// Exchange a Pi SDK access token for a backend session.
    ///
    /// `POST /users/authenticate`. On success the session is attached to
    /// this client and also returned.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unauthenticated`] when the backend rejects the token;
    /// otherwise the standard taxonomy.
    pub async fn authenticate(&mut self, pi_access_token: &str) -> Result<SessionUser, ApiError> {
        let url = self.endpoint("/users/authenticate");
        let body = json!({ "accessToken": pi_access_token });

        // Shared reborrow: the retry closure runs repeatedly, and only the
        // final set_session below needs the mutable borrow.
        let this: &ApiClient = self;
        let parsed: AuthenticateResponse =
            retry_with_backoff(this.max_retries, this.backoff_base_secs, || {
                let url = url.clone();
                let body = body.clone();
                async move {
                    let response = this.client.post(&url).json(&body).send().await?;
                    let response = Self::check_status(response, &url)?;
                    Self::parse_json(response, "authenticate response").await
                }
            })
            .await?;

        let user = SessionUser {
            pi_uid: parsed.pi_uid,
            username: parsed.username,
            access_token: parsed.token,
        };
        self.set_session(user.clone());
        Ok(user)
    }

    /// Fetch the current user for the attached session.
    ///
    /// `GET /users/me`.
    ///
    /// # Errors
    ///
    /// [`ApiError::Unauthenticated`] when no session is attached or the
    /// token has expired.
    pub async fn current_user(&self) -> Result<SessionUser, ApiError> {
        let url = self.endpoint("/users/me");
        if self.session().is_none() {
            return Err(ApiError::Unauthenticated { url });
        }

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self.authorize(self.client.get(&url)).send().await?;
                let response = Self::check_status(response, &url)?;
                Self::parse_json(response, "current user response").await
            }
        })
        .await
    }
}
