//! Lazy record stream over `pagination.next` links

use super::sideload::merge_sideloads;
use super::types::{Page, PageRequest, PaginationState};
use crate::error::{Error, Result};
use crate::http::{json_kind, HttpClient, RequestOptions};
use crate::types::{JsonObject, JsonValue};
use futures::stream::{self, BoxStream, StreamExt};
use std::collections::VecDeque;
use tracing::debug;

struct Cursor<'a> {
    client: &'a HttpClient,
    request: PageRequest,
    next: Option<String>,
    buffer: VecDeque<JsonObject>,
    state: PaginationState,
}

impl Cursor<'_> {
    async fn fetch_page(&mut self, url: &str) -> Result<Page> {
        let mut options = RequestOptions::new();
        // The next URL already carries the query of the first request
        if self.state.pages == 0 {
            options = options.queries(self.request.query.iter().cloned());
        }
        if let Some(body) = &self.request.body {
            options = options.json(body.clone());
        }

        let value = self
            .client
            .request_json(self.request.method.clone(), url, options)
            .await?;
        match value {
            JsonValue::Object(_) => serde_json::from_value(value)
                .map_err(|e| Error::unexpected(format!("malformed page from {url}: {e}"))),
            other => Err(Error::unexpected(format!(
                "expected a page object from {url}, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Stream the records of every page, following `pagination.next` until it
/// is null. Pages are requested lazily as the stream is consumed.
pub fn paginate(client: &HttpClient, request: PageRequest) -> BoxStream<'_, Result<JsonObject>> {
    let cursor = Cursor {
        client,
        next: Some(request.url.clone()),
        request,
        buffer: VecDeque::new(),
        state: PaginationState::default(),
    };

    stream::try_unfold(cursor, |mut cursor| async move {
        loop {
            if let Some(record) = cursor.buffer.pop_front() {
                return Ok(Some((record, cursor)));
            }

            let Some(url) = cursor.next.take() else {
                debug!(
                    "Pagination of {} done: {} records in {} pages",
                    cursor.request.url, cursor.state.records, cursor.state.pages
                );
                return Ok(None);
            };

            let mut page = cursor.fetch_page(&url).await?;
            merge_sideloads(&mut page.results, &page.sideloaded, &cursor.request.sideloads);

            cursor
                .state
                .add_page(page.results.len(), page.pagination.total);
            cursor.next = page.pagination.next.filter(|next| !next.is_empty());
            cursor.buffer.extend(page.results);
        }
    })
    .boxed()
}
