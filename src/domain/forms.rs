//! Multipart request bodies

use crate::error::Result;
use crate::http::MultipartForm;
use crate::types::JsonValue;
use bytes::Bytes;
use std::path::{Path, PathBuf};

const OCTET_STREAM: &str = "application/octet-stream";
const APPLICATION_JSON: &str = "application/json";

/// A file to upload and the name it gets in Rossum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl UploadFile {
    pub fn new(path: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file_name: file_name.into(),
        }
    }

    /// Use the file's own name
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(path, file_name)
    }

    /// Read the file content
    pub async fn read(&self) -> Result<Bytes> {
        Ok(Bytes::from(tokio::fs::read(&self.path).await?))
    }
}

fn json_part(form: MultipartForm, name: &str, value: Option<&JsonValue>) -> MultipartForm {
    match value {
        Some(value) => form.file(name, "", value.to_string(), Some(APPLICATION_JSON)),
        None => form,
    }
}

/// Body of an upload: the file as `content`, plus optional `values`
/// (initial datapoint values keyed by `rir_field_names`) and `metadata`
pub fn build_upload_form(
    file_name: &str,
    data: impl Into<Bytes>,
    values: Option<&JsonValue>,
    metadata: Option<&JsonValue>,
) -> MultipartForm {
    let form = MultipartForm::new().file("content", file_name, data, Some(OCTET_STREAM));
    let form = json_part(form, "values", values);
    json_part(form, "metadata", metadata)
}

/// Body of a document creation request
pub fn build_create_document_form(
    file_name: &str,
    data: impl Into<Bytes>,
    metadata: Option<&JsonValue>,
    parent: Option<&str>,
) -> MultipartForm {
    let form = MultipartForm::new().file("content", file_name, data, Some(OCTET_STREAM));
    let form = json_part(form, "metadata", metadata);
    match parent {
        Some(parent) => form.text("parent", parent),
        None => form,
    }
}

/// Body of an email import request
pub fn build_email_import_form(
    raw_message: impl Into<Bytes>,
    recipient: &str,
    mime_type: Option<&str>,
) -> MultipartForm {
    let form = MultipartForm::new()
        .file("raw_message", "email.eml", raw_message, Some(OCTET_STREAM))
        .text("recipient", recipient);
    match mime_type {
        Some(mime_type) => form.text("mime_type", mime_type),
        None => form,
    }
}
