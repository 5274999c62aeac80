//! HTTP transport with authentication, retries and concurrency limits
//!
//! Every request goes through the same pipeline:
//! - wait for the optional rate limiter
//! - acquire an in-flight permit
//! - attach the bearer token (logging in lazily)
//! - send, then classify the response for retry or re-authentication

use super::multipart::MultipartForm;
use super::rate_limit::RateLimiter;
use super::retry::{extract_retry_after, RetryPolicy};
use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::pagination::{paginate, ListQuery, PageRequest};
use crate::resources::{export_url, queue_upload_url, resource_url, Resource};
use crate::types::{ExportFormat, JsonObject, JsonValue};
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Request body
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON body
    Json(JsonValue),
    /// Multipart form body
    Multipart(MultipartForm),
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// Request body
    pub body: RequestBody,
}

impl RequestOptions {
    /// Create empty request options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add several query parameters
    #[must_use]
    pub fn queries(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Set a JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Set a multipart body
    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }
}

/// Internal HTTP client shared by all resource operations
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
    page_size: u32,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
    in_flight: Arc<Semaphore>,
}

impl HttpClient {
    /// Create a client from a validated config
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(Error::Http)?;

        let authenticator = Authenticator::with_client(
            config.credentials.clone(),
            config.base_url.clone(),
            client.clone(),
        )
        .with_token_lifetime(config.token_lifetime_s);

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            retry: config.retry.clone(),
            page_size: config.page_size,
            authenticator,
            rate_limiter: config.rate_limit.as_ref().map(RateLimiter::new),
            in_flight: Arc::new(Semaphore::new(config.max_in_flight_requests.max(1))),
        })
    }

    /// API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Default page size for list requests
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// The authenticator used for every request
    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Return the current token, logging in if needed
    pub async fn get_token(&self, refresh: bool) -> Result<String> {
        self.authenticator.get_token(refresh).await
    }

    /// Log in explicitly
    pub async fn authenticate(&self) -> Result<()> {
        self.authenticator.authenticate().await
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    // ========================================================================
    // Generic requests
    // ========================================================================

    /// Send a request and return the successful response
    pub async fn request(
        &self,
        method: impl Into<Method>,
        url: &str,
        options: RequestOptions,
    ) -> Result<Response> {
        let method = method.into();
        let full_url = join_url(&self.base_url, url);

        let mut attempt = 0;
        let mut reauthenticated = false;

        loop {
            if let Some(ref limiter) = self.rate_limiter {
                limiter.wait().await;
            }

            let token = self.authenticator.get_token(false).await?;
            let req = self.build_request(&method, &full_url, &options, &token)?;

            let sent = {
                let _permit = self
                    .in_flight
                    .acquire()
                    .await
                    .map_err(|e| Error::Other(format!("request semaphore closed: {e}")))?;
                req.send().await
            };

            match sent {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        debug!("{} {} -> {}", method, full_url, status.as_u16());
                        return Ok(response);
                    }

                    if status == StatusCode::UNAUTHORIZED {
                        if self.authenticator.can_refresh() && !reauthenticated {
                            debug!("{} {} -> 401, re-authenticating", method, full_url);
                            self.authenticator.refresh_if_stale(&token).await?;
                            reauthenticated = true;
                            continue;
                        }
                        let body = response.text().await.unwrap_or_default();
                        return Err(Error::auth(format!(
                            "request to {full_url} was rejected with 401: {body}"
                        )));
                    }

                    let retry_after = extract_retry_after(&response);
                    let err = if status == StatusCode::TOO_MANY_REQUESTS {
                        Error::RateLimited {
                            retry_after_seconds: retry_after.unwrap_or(0),
                        }
                    } else {
                        let body = response.text().await.unwrap_or_default();
                        Error::http_status(status.as_u16(), body)
                    };

                    if err.is_retryable() && self.retry.should_retry(attempt) {
                        let delay = if status == StatusCode::TOO_MANY_REQUESTS {
                            self.retry.throttle_delay(attempt, retry_after)
                        } else {
                            self.retry.delay(attempt)
                        };
                        warn!(
                            "Request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            self.retry.n_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(err);
                }
                Err(e) => {
                    let timed_out = e.is_timeout();
                    let err = Error::Http(e);
                    if err.is_retryable() && self.retry.should_retry(attempt) {
                        let delay = self.retry.delay(attempt);
                        warn!(
                            "Request error ({}), attempt {}/{}, retrying in {:?}",
                            err,
                            attempt + 1,
                            self.retry.n_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    if timed_out {
                        #[allow(clippy::cast_possible_truncation)]
                        return Err(Error::Timeout {
                            timeout_ms: self.timeout.as_millis() as u64,
                        });
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Send a request and parse the JSON response.
    ///
    /// Empty bodies (e.g. `204 No Content`) yield `JsonValue::Null`.
    pub async fn request_json(
        &self,
        method: impl Into<Method>,
        url: &str,
        options: RequestOptions,
    ) -> Result<JsonValue> {
        let response = self.request(method, url, options).await?;
        let body = response.bytes().await.map_err(Error::Http)?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonValue::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// Send a request whose response must be a JSON object
    pub async fn request_object(
        &self,
        method: impl Into<Method>,
        url: &str,
        options: RequestOptions,
    ) -> Result<JsonObject> {
        into_object(self.request_json(method, url, options).await?)
    }

    /// Lazily fetch every record of a paginated endpoint
    pub fn request_paginated(&self, request: PageRequest) -> BoxStream<'_, Result<JsonObject>> {
        paginate(self, request)
    }

    // ========================================================================
    // Resource operations
    // ========================================================================

    /// Retrieve a single object
    pub async fn fetch_one(&self, resource: Resource, id: i64) -> Result<JsonObject> {
        self.request_object(Method::GET, &resource_url(resource, id), RequestOptions::new())
            .await
    }

    /// Retrieve a single object with extra query parameters
    pub async fn fetch_one_with(
        &self,
        resource: Resource,
        id: i64,
        query: Vec<(String, String)>,
    ) -> Result<JsonObject> {
        let options = RequestOptions::new().queries(query);
        self.request_object(Method::GET, &resource_url(resource, id), options)
            .await
    }

    /// Stream every object of a resource list
    pub fn fetch_all(&self, resource: Resource, query: ListQuery) -> BoxStream<'_, Result<JsonObject>> {
        self.fetch_all_by_url(resource.path(), query, Method::GET, None)
    }

    /// Stream every object of a paginated URL, optionally POSTing a body
    pub fn fetch_all_by_url(
        &self,
        url: &str,
        query: ListQuery,
        method: Method,
        body: Option<JsonValue>,
    ) -> BoxStream<'_, Result<JsonObject>> {
        let request = PageRequest {
            url: url.to_string(),
            method,
            query: query.to_query_pairs(Some(self.page_size)),
            body,
            sideloads: query.sideloads,
        };
        paginate(self, request)
    }

    /// Create an object (POST)
    pub async fn create(&self, resource: Resource, data: JsonValue) -> Result<JsonObject> {
        self.request_object(Method::POST, resource.path(), RequestOptions::new().json(data))
            .await
    }

    /// Replace an object (PUT)
    pub async fn replace(&self, resource: Resource, id: i64, data: JsonValue) -> Result<JsonObject> {
        self.request_object(
            Method::PUT,
            &resource_url(resource, id),
            RequestOptions::new().json(data),
        )
        .await
    }

    /// Partially update an object (PATCH)
    pub async fn update(&self, resource: Resource, id: i64, data: JsonValue) -> Result<JsonObject> {
        self.request_object(
            Method::PATCH,
            &resource_url(resource, id),
            RequestOptions::new().json(data),
        )
        .await
    }

    /// Delete an object
    pub async fn delete(&self, resource: Resource, id: i64) -> Result<()> {
        self.request(Method::DELETE, &resource_url(resource, id), RequestOptions::new())
            .await?;
        Ok(())
    }

    /// Upload a file to `queues/<id>/upload`
    pub async fn upload(&self, queue_id: i64, form: MultipartForm) -> Result<JsonObject> {
        self.request_object(
            Method::POST,
            &queue_upload_url(queue_id),
            RequestOptions::new().multipart(form),
        )
        .await
    }

    /// Stream exported annotations of a queue as JSON records
    pub fn export_json(&self, queue_id: i64, query: ListQuery) -> BoxStream<'_, Result<JsonObject>> {
        let mut query_pairs = vec![("format".to_string(), ExportFormat::Json.to_string())];
        query_pairs.extend(query.to_query_pairs(Some(self.page_size)));
        let request = PageRequest {
            url: export_url(queue_id),
            method: Method::GET,
            query: query_pairs,
            body: None,
            sideloads: query.sideloads,
        };
        paginate(self, request)
    }

    /// Stream an export of a queue in a non-JSON format as raw byte chunks
    pub async fn export_bytes(
        &self,
        queue_id: i64,
        format: ExportFormat,
        query: ListQuery,
    ) -> Result<BoxStream<'static, Result<Bytes>>> {
        let options = RequestOptions::new()
            .query("format", format.as_str())
            .queries(query.to_query_pairs(None));
        let response = self
            .request(Method::GET, &export_url(queue_id), options)
            .await?;
        Ok(response.bytes_stream().map_err(Error::Http).boxed())
    }

    fn build_request(
        &self,
        method: &Method,
        url: &str,
        options: &RequestOptions,
        token: &str,
    ) -> Result<RequestBuilder> {
        let mut req = self.client.request(method.clone(), url).bearer_auth(token);

        if !options.query.is_empty() {
            req = req.query(&options.query);
        }

        req = match &options.body {
            RequestBody::Empty => req,
            RequestBody::Json(body) => req.json(body),
            RequestBody::Multipart(form) => req.multipart(form.to_form()?),
        };

        Ok(req)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("retry", &self.retry)
            .field("authenticator", &self.authenticator)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Resolve `path` against `base`; absolute URLs are returned unchanged
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

/// Require a JSON object
pub(crate) fn into_object(value: JsonValue) -> Result<JsonObject> {
    match value {
        JsonValue::Object(map) => Ok(map),
        other => Err(Error::unexpected(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

pub(crate) fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
