// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Rossum API client
//!
//! Typed async client for the Rossum document-processing REST API.
//!
//! ## Features
//!
//! - **Typed models**: queues, annotations, documents, schemas, hooks, rules and more
//! - **Lazy pagination**: list endpoints are streams that fetch pages on demand
//! - **Sideloading**: related objects embedded into the records that reference them
//! - **Resilient transport**: retries with backoff, re-login on expired tokens,
//!   bounded concurrency and optional rate limiting
//! - **Workflows**: upload and wait for import, task polling, exports
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::TryStreamExt;
//! use rossum_api::{Client, ClientConfig, ListQuery, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder()
//!         .user_credentials("john-doe@east-west-trading.com", "secret")
//!         .build()?;
//!     let client = Client::new(&config)?;
//!
//!     let mut annotations = client.list_annotations(
//!         ListQuery::new()
//!             .filter("status", "to_review")
//!             .sideload("documents"),
//!     );
//!     while let Some(annotation) = annotations.try_next().await? {
//!         println!("{} {}", annotation.id, annotation.status);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            Client                               │
//! │  retrieve_*()   list_*() → Stream<T>   upload / poll / export   │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   Auth   │   HTTP    │   Paginate    │  Domain   │   Models    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Token    │ Retry     │ Next URL      │ Forms     │ Annotation  │
//! │ Login    │ Rate Limit│ Sideloads     │ Params    │ Queue       │
//! │ Re-login │ Semaphore │               │ Polling   │ Schema tree │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Resource kinds and endpoint URLs
pub mod resources;

/// Credentials and token handling
pub mod auth;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Paginated list requests and sideloads
pub mod pagination;

/// Client configuration
pub mod config;

/// Typed API objects
pub mod models;

/// Request validation, multipart forms and polling
pub mod domain;

/// Typed client
pub mod client;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::Credentials;
pub use client::Client;
pub use config::ClientConfig;
pub use domain::{PollOptions, UploadFile};
pub use pagination::ListQuery;
pub use resources::Resource;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
