//! Pagination module
//!
//! # Overview
//!
//! List endpoints return one page at a time together with the absolute URL
//! of the next page. [`paginate`] turns such an endpoint into a lazy stream
//! of records and merges sideloaded collections into each record.

mod sideload;
mod stream;
mod types;

pub use sideload::merge_sideloads;
pub use stream::paginate;
pub use types::{ListQuery, Page, PageRequest, Pagination, PaginationState};

#[cfg(test)]
mod tests;
