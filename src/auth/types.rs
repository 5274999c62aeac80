//! Auth configuration types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credentials used to authenticate against the API
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Credentials {
    /// Username and password, exchanged for a token at `auth/login`.
    /// The client can log in again when the token expires.
    UserCredentials { username: String, password: String },

    /// A pre-issued API token. It cannot be refreshed by the client.
    Token { token: String },
}

impl Credentials {
    /// Username/password credentials
    pub fn user(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::UserCredentials {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Static token credentials
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token {
            token: token.into(),
        }
    }

    /// Whether a fresh token can be obtained by logging in again
    pub fn can_refresh(&self) -> bool {
        matches!(self, Self::UserCredentials { .. })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserCredentials { username, .. } => f
                .debug_struct("UserCredentials")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Self::Token { .. } => f.debug_struct("Token").field("token", &"***").finish(),
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false, // No expiration = never expires
        }
    }
}

/// Body of `POST auth/login`
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_token_lifetime_s: Option<u64>,
}

/// Response of `POST auth/login`
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub key: String,
}
