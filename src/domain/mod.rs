//! Domain rules shared by the client methods
//!
//! # Overview
//!
//! - `params`: validation of list and search parameters
//! - `forms`: multipart bodies for uploads, documents and email imports
//! - `polling`: readiness predicates and the polling loop

mod forms;
mod params;
mod polling;

pub use forms::{
    build_create_document_form, build_email_import_form, build_upload_form, UploadFile,
};
pub use params::{build_search_params, validate_list_annotations_params, validate_search_params};
pub use polling::{is_annotation_imported, is_task_succeeded, poll_until, PollOptions};
