//! Pagination types
//!
//! List endpoints answer with
//! `{"pagination": {"next": ..}, "results": [..], <sideload>: [..]}`.

use crate::types::{JsonObject, JsonValue, Sideload};
use reqwest::Method;
use serde::{Deserialize, Serialize};

// ============================================================================
// List Query
// ============================================================================

/// Query parameters of a list request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    /// Fields to order by, `-` prefix for descending
    pub ordering: Vec<String>,
    /// Related collections to embed in each record
    pub sideloads: Vec<Sideload>,
    /// Schema ids of the content datapoints to sideload
    pub content_schema_ids: Vec<String>,
    /// Page size, the client default when unset
    pub page_size: Option<u32>,
    /// Additional filters, in order
    pub filters: Vec<(String, JsonValue)>,
}

impl ListQuery {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ordering field
    #[must_use]
    pub fn ordering(mut self, field: impl Into<String>) -> Self {
        self.ordering.push(field.into());
        self
    }

    /// Add a sideload
    #[must_use]
    pub fn sideload(mut self, sideload: impl Into<Sideload>) -> Self {
        self.sideloads.push(sideload.into());
        self
    }

    /// Add a content schema id
    #[must_use]
    pub fn content_schema_id(mut self, schema_id: impl Into<String>) -> Self {
        self.content_schema_ids.push(schema_id.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Add a filter. Lists are sent comma-joined, `null` is not sent.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Convert to query string pairs.
    ///
    /// `default_page_size` is used when no page size was set; `None` omits
    /// the parameter entirely (non-paginated endpoints).
    pub fn to_query_pairs(&self, default_page_size: Option<u32>) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(page_size) = self.page_size.or(default_page_size) {
            pairs.push(("page_size".to_string(), page_size.to_string()));
        }
        if !self.ordering.is_empty() {
            pairs.push(("ordering".to_string(), self.ordering.join(",")));
        }
        if !self.sideloads.is_empty() {
            pairs.push(("sideload".to_string(), self.sideloads.join(",")));
        }
        if !self.content_schema_ids.is_empty() {
            pairs.push((
                "content.schema_id".to_string(),
                self.content_schema_ids.join(","),
            ));
        }
        for (key, value) in &self.filters {
            if let Some(value) = query_value(value) {
                pairs.push((key.clone(), value));
            }
        }

        pairs
    }
}

/// Render a filter value for the query string
pub(crate) fn query_value(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Array(items) => Some(
            items
                .iter()
                .filter_map(query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

// ============================================================================
// Page
// ============================================================================

/// Pagination block of a list response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    /// Absolute URL of the next page
    #[serde(default)]
    pub next: Option<String>,
    /// Absolute URL of the previous page
    #[serde(default)]
    pub previous: Option<String>,
    /// Total number of records
    #[serde(default)]
    pub total: Option<u64>,
    /// Total number of pages
    #[serde(default)]
    pub total_pages: Option<u64>,
}

/// One page of a list response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub results: Vec<JsonObject>,
    /// Everything else, i.e. sideloaded collections
    #[serde(flatten)]
    pub sideloaded: JsonObject,
}

/// Description of a paginated request
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// First page URL, relative to the base URL or absolute
    pub url: String,
    /// HTTP method, POST for searches
    pub method: Method,
    /// Query of the first request
    pub query: Vec<(String, String)>,
    /// JSON body sent with every page request
    pub body: Option<JsonValue>,
    /// Sideloads to merge into the records
    pub sideloads: Vec<Sideload>,
}

impl PageRequest {
    /// GET request for `url` with the given query
    pub fn get(url: impl Into<String>, query: Vec<(String, String)>) -> Self {
        Self {
            url: url.into(),
            method: Method::GET,
            query,
            body: None,
            sideloads: Vec::new(),
        }
    }

    /// POST request for `url`, sending `body` with every page
    pub fn post(url: impl Into<String>, query: Vec<(String, String)>, body: JsonValue) -> Self {
        Self {
            url: url.into(),
            method: Method::POST,
            query,
            body: Some(body),
            sideloads: Vec::new(),
        }
    }

    /// Merge these sideloads into the records
    #[must_use]
    pub fn with_sideloads(mut self, sideloads: Vec<Sideload>) -> Self {
        self.sideloads = sideloads;
        self
    }
}

/// Tracks progress across pages
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Number of pages fetched
    pub pages: u64,
    /// Number of records fetched
    pub records: u64,
    /// Total reported by the server
    pub total: Option<u64>,
}

impl PaginationState {
    /// Record a fetched page
    pub fn add_page(&mut self, records: usize, total: Option<u64>) {
        self.pages += 1;
        self.records += records as u64;
        if total.is_some() {
            self.total = total;
        }
    }
}
