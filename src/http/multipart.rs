//! Replayable multipart forms
//!
//! `reqwest::multipart::Form` is consumed when sent, so forms are kept as a
//! list of parts and rebuilt for every attempt.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};

/// Value of one multipart field
#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    /// Plain text field
    Text(String),
    /// File field
    File {
        file_name: String,
        data: Bytes,
        mime_type: Option<String>,
    },
}

/// A multipart form that can be sent more than once
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<(String, PartValue)>,
}

impl MultipartForm {
    /// Create an empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push((name.into(), PartValue::Text(value.into())));
        self
    }

    /// Add a JSON-encoded text field
    #[must_use]
    pub fn json(self, name: impl Into<String>, value: &JsonValue) -> Self {
        self.text(name, value.to_string())
    }

    /// Add a file field
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
        mime_type: Option<&str>,
    ) -> Self {
        self.parts.push((
            name.into(),
            PartValue::File {
                file_name: file_name.into(),
                data: data.into(),
                mime_type: mime_type.map(str::to_string),
            },
        ));
        self
    }

    /// Field names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&PartValue> {
        self.parts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Build a fresh `reqwest` form
    pub fn to_form(&self) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in &self.parts {
            let part = match value {
                PartValue::Text(text) => Part::text(text.clone()),
                PartValue::File {
                    file_name,
                    data,
                    mime_type,
                } => {
                    let part = Part::bytes(data.to_vec()).file_name(file_name.clone());
                    match mime_type {
                        Some(mime) => part.mime_str(mime).map_err(|e| {
                            Error::invalid_params(format!("invalid mime type '{mime}': {e}"))
                        })?,
                        None => part,
                    }
                }
            };
            form = form.part(name.clone(), part);
        }
        Ok(form)
    }
}
