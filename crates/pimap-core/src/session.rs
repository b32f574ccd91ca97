//! Authenticated session state.
//!
//! Passed explicitly to whatever needs it — there is no ambient global.
//! Callers that have no session simply pass `None` and get anonymous
//! requests.

use serde::{Deserialize, Serialize};

/// The current Pi user as returned by `POST /users/authenticate`.
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// Pi Network user id.
    pub pi_uid: String,
    pub username: String,
    /// Bearer token attached to subsequent backend calls.
    pub access_token: String,
}

impl std::fmt::Debug for SessionUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionUser")
            .field("pi_uid", &self.pi_uid)
            .field("username", &self.username)
            .field("access_token", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_access_token() {
        let user = SessionUser {
            pi_uid: "uid-1".to_owned(),
            username: "pioneer".to_owned(),
            access_token: "secret-token".to_owned(),
        };
        let rendered = format!("{user:?}");
        assert!(rendered.contains("[redacted]"));
        assert!(!rendered.contains("secret-token"));
    }
}
