//! Typed client for the Rossum API
//!
//! # Overview
//!
//! [`Client`] has one method per API operation. Methods returning a single
//! object resolve to the typed model; list methods return a lazy
//! [`BoxStream`] of typed models that fetches further pages on demand.
//!
//! ```no_run
//! use futures::TryStreamExt;
//! use rossum_api::{Client, ClientConfig, ListQuery};
//!
//! # async fn run() -> rossum_api::Result<()> {
//! let config = ClientConfig::builder()
//!     .token("secret-token")
//!     .build()?;
//! let client = Client::new(&config)?;
//!
//! let queues: Vec<_> = client
//!     .list_queues(ListQuery::new().filter("workspace", 7))
//!     .try_collect()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod annotations;
mod connectors;
mod documents;
mod emails;
mod engines;
mod hooks;
mod organizations;
mod queues;
mod rules;
mod schemas;
mod tasks;
mod uploads;
mod users;
mod workspaces;

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, RequestOptions};
use crate::models::from_json;
use crate::pagination::ListQuery;
use crate::resources::Resource;
use crate::types::{JsonObject, JsonValue, Method};
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Asynchronous Rossum API client
#[derive(Debug)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Create a client from a configuration
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Create a client authenticating with a static API token
    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::new(&ClientConfig::new(base_url, Credentials::token(token)))
    }

    /// Create a client logging in with username and password
    pub fn with_user_credentials(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::new(&ClientConfig::new(
            base_url,
            Credentials::user(username, password),
        ))
    }

    /// Create a client configured from `ROSSUM_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env()?)
    }

    /// The underlying HTTP transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    // ========================================================================
    // Generic requests
    // ========================================================================

    /// Stream records of a paginated endpoint without a dedicated method
    pub fn request_paginated(
        &self,
        url: &str,
        query: ListQuery,
        method: Method,
        body: Option<JsonValue>,
    ) -> BoxStream<'_, Result<JsonObject>> {
        self.http.fetch_all_by_url(url, query, method.into(), body)
    }

    /// Send a request to an endpoint without a dedicated method and return
    /// the parsed JSON
    pub async fn request_json(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<JsonValue> {
        self.http.request_json(method, url, options).await
    }

    /// Send a request to an endpoint without a dedicated method and return
    /// the raw response
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<Response> {
        self.http.request(method, url, options).await
    }

    /// Return the current token, logging in when needed or when `refresh`
    /// is set
    pub async fn get_token(&self, refresh: bool) -> Result<String> {
        self.http.get_token(refresh).await
    }

    /// Log in with the configured username and password
    pub async fn authenticate(&self) -> Result<()> {
        self.http.authenticate().await
    }

    // ========================================================================
    // Typed helpers
    // ========================================================================

    async fn retrieve<T: DeserializeOwned>(&self, resource: Resource, id: i64) -> Result<T> {
        let obj = self.http.fetch_one(resource, id).await?;
        from_json(resource, JsonValue::Object(obj))
    }

    fn list<T>(&self, resource: Resource, query: ListQuery) -> BoxStream<'_, Result<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        typed(resource, self.http.fetch_all(resource, query))
    }

    async fn create<T: DeserializeOwned>(&self, resource: Resource, data: JsonValue) -> Result<T> {
        let obj = self.http.create(resource, data).await?;
        from_json(resource, JsonValue::Object(obj))
    }

    async fn replace<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: i64,
        data: JsonValue,
    ) -> Result<T> {
        let obj = self.http.replace(resource, id, data).await?;
        from_json(resource, JsonValue::Object(obj))
    }

    async fn update<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: i64,
        data: JsonValue,
    ) -> Result<T> {
        let obj = self.http.update(resource, id, data).await?;
        from_json(resource, JsonValue::Object(obj))
    }
}

/// Deserialize every record of a stream as `T`
fn typed<'a, T>(
    resource: Resource,
    records: BoxStream<'a, Result<JsonObject>>,
) -> BoxStream<'a, Result<T>>
where
    T: DeserializeOwned + Send + 'static,
{
    records
        .map(move |record| record.and_then(|obj| from_json(resource, JsonValue::Object(obj))))
        .boxed()
}

/// A stream failing with `error` on first poll
fn failed<'a, T: Send + 'a>(error: crate::Error) -> BoxStream<'a, Result<T>> {
    stream::once(async move { Err(error) }).boxed()
}
