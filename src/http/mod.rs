//! HTTP transport module
//!
//! # Features
//!
//! - **Authentication**: bearer token attached to every request, with one
//!   re-login on `401` when username and password are known
//! - **Automatic Retries**: exponential backoff with random jitter on
//!   transport errors and `408`/`429`/`5xx` responses
//! - **Concurrency**: a semaphore caps the number of requests in flight
//! - **Rate Limiting**: optional token bucket rate limiter using governor

mod client;
mod multipart;
mod rate_limit;
mod retry;

pub use client::{join_url, HttpClient, RequestBody, RequestOptions};
pub(crate) use client::{into_object, json_kind};
pub use multipart::{MultipartForm, PartValue};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use retry::RetryPolicy;
