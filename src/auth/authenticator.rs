//! Authenticator implementation
//!
//! Hands out the bearer token for requests, logging in to obtain (or
//! refresh) it.

use super::types::{CachedToken, Credentials, LoginRequest, LoginResponse};
use crate::error::{Error, Result};
use crate::http::join_url;
use crate::resources::LOGIN_URL;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Authenticator supplies bearer tokens for HTTP requests
pub struct Authenticator {
    /// Credentials supplied by the caller
    credentials: Credentials,
    /// API base URL, used to reach the login endpoint
    base_url: String,
    /// Requested token lifetime for logins
    token_lifetime_s: Option<u64>,
    /// Cached token obtained by logging in (or the static token)
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for login requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with a default HTTP client
    pub fn new(credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self::with_client(credentials, base_url, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(
        credentials: Credentials,
        base_url: impl Into<String>,
        http_client: Client,
    ) -> Self {
        let cached = match &credentials {
            Credentials::Token { token } => Some(CachedToken::new(token.clone(), None)),
            Credentials::UserCredentials { .. } => None,
        };

        Self {
            credentials,
            base_url: base_url.into(),
            token_lifetime_s: None,
            cached_token: Arc::new(RwLock::new(cached)),
            http_client,
        }
    }

    /// Request tokens with the given lifetime when logging in
    #[must_use]
    pub fn with_token_lifetime(mut self, seconds: Option<u64>) -> Self {
        self.token_lifetime_s = seconds;
        self
    }

    /// Whether the credentials allow obtaining a fresh token
    pub fn can_refresh(&self) -> bool {
        self.credentials.can_refresh()
    }

    /// Return the current token, logging in when there is none, when it
    /// expired, or when `refresh` is set
    pub async fn get_token(&self, refresh: bool) -> Result<String> {
        if refresh && !self.can_refresh() {
            return Err(Error::auth(
                "cannot refresh a static API token, username and password are required",
            ));
        }

        if !refresh {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task might have logged in while we waited for the lock
        if !refresh {
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let new_token = self.login().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Drop `stale` from the cache and log in again, unless another task
    /// already replaced it. Returns the token to retry with.
    pub async fn refresh_if_stale(&self, stale: &str) -> Result<String> {
        if !self.can_refresh() {
            return Err(Error::auth("token rejected by the API"));
        }

        let mut cached = self.cached_token.write().await;
        if let Some(token) = cached.as_ref() {
            if token.token != stale && !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        debug!("Token rejected, logging in again");
        let new_token = self.login().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Log in explicitly and cache the resulting token
    pub async fn authenticate(&self) -> Result<()> {
        let new_token = self.login().await?;
        *self.cached_token.write().await = Some(new_token);
        Ok(())
    }

    /// Exchange username and password for a token
    async fn login(&self) -> Result<CachedToken> {
        let Credentials::UserCredentials { username, password } = &self.credentials else {
            return Err(Error::auth("login requires username and password"));
        };

        let url = join_url(&self.base_url, LOGIN_URL);
        let body = LoginRequest {
            username,
            password,
            max_token_lifetime_s: self.token_lifetime_s,
        };

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Auth {
                message: format!("Login request failed with status {status}: {body}"),
            });
        }

        let login: LoginResponse = response.json().await.map_err(Error::Http)?;
        info!("Logged in as {username}");

        #[allow(clippy::cast_possible_wrap)]
        Ok(match self.token_lifetime_s {
            Some(secs) => CachedToken::expires_in(login.key, secs as i64),
            None => CachedToken::new(login.key, None),
        })
    }

    /// Get the credentials this authenticator was built with
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
