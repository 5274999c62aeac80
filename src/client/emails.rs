use super::Client;
use crate::domain::build_email_import_form;
use crate::error::{Error, Result};
use crate::http::RequestOptions;
use crate::models::{Email, EmailTemplate, Inbox};
use crate::pagination::ListQuery;
use crate::resources::{Resource, EMAIL_IMPORT_URL};
use crate::types::{JsonValue, Method};
use bytes::Bytes;
use futures::stream::BoxStream;

impl Client {
    /// Create an inbox
    pub async fn create_new_inbox(&self, data: JsonValue) -> Result<Inbox> {
        self.create(Resource::Inbox, data).await
    }

    /// Retrieve an email
    pub async fn retrieve_email(&self, email_id: i64) -> Result<Email> {
        self.retrieve(Resource::Email, email_id).await
    }

    /// Import a raw email into the inbox with address `recipient`.
    ///
    /// Returns the URL of the task processing the import.
    pub async fn import_email(
        &self,
        raw_message: impl Into<Bytes>,
        recipient: &str,
        mime_type: Option<&str>,
    ) -> Result<String> {
        let form = build_email_import_form(raw_message, recipient, mime_type);
        let response = self
            .http
            .request_json(
                Method::POST,
                EMAIL_IMPORT_URL,
                RequestOptions::new().multipart(form),
            )
            .await?;

        response
            .get("url")
            .and_then(JsonValue::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::unexpected("email import response has no task url"))
    }

    /// Stream email templates (filters: `id`, `name`, `queue`, `type`)
    pub fn list_email_templates(&self, query: ListQuery) -> BoxStream<'_, Result<EmailTemplate>> {
        self.list(Resource::EmailTemplate, query)
    }

    /// Retrieve an email template
    pub async fn retrieve_email_template(&self, template_id: i64) -> Result<EmailTemplate> {
        self.retrieve(Resource::EmailTemplate, template_id).await
    }

    /// Create an email template
    pub async fn create_new_email_template(&self, data: JsonValue) -> Result<EmailTemplate> {
        self.create(Resource::EmailTemplate, data).await
    }
}
