use super::Client;
use crate::domain::build_create_document_form;
use crate::error::{Error, Result};
use crate::http::RequestOptions;
use crate::models::{from_json, Document, DocumentRelation, Relation};
use crate::pagination::ListQuery;
use crate::resources::{content_url, Resource};
use crate::types::{JsonValue, Method};
use bytes::Bytes;
use futures::stream::BoxStream;

impl Client {
    // ========================================================================
    // Documents
    // ========================================================================

    /// Retrieve a document
    pub async fn retrieve_document(&self, document_id: i64) -> Result<Document> {
        self.retrieve(Resource::Document, document_id).await
    }

    /// Download the original file of a document
    pub async fn retrieve_document_content(&self, document_id: i64) -> Result<Bytes> {
        let response = self
            .http
            .request(
                Method::GET,
                &content_url(Resource::Document, document_id),
                RequestOptions::new(),
            )
            .await?;
        response.bytes().await.map_err(Error::Http)
    }

    /// Create a document from raw file data
    pub async fn create_new_document(
        &self,
        file_name: &str,
        file_data: impl Into<Bytes>,
        metadata: Option<&JsonValue>,
        parent: Option<&str>,
    ) -> Result<Document> {
        let form = build_create_document_form(file_name, file_data, metadata, parent);
        let document = self
            .http
            .request_json(
                Method::POST,
                Resource::Document.path(),
                RequestOptions::new().multipart(form),
            )
            .await?;
        from_json(Resource::Document, document)
    }

    // ========================================================================
    // Document relations
    // ========================================================================

    /// Stream document relations (filters: `id`, `type`, `annotation`,
    /// `key`, `documents`)
    pub fn list_document_relations(
        &self,
        query: ListQuery,
    ) -> BoxStream<'_, Result<DocumentRelation>> {
        self.list(Resource::DocumentRelation, query)
    }

    /// Retrieve a document relation
    pub async fn retrieve_document_relation(&self, relation_id: i64) -> Result<DocumentRelation> {
        self.retrieve(Resource::DocumentRelation, relation_id)
            .await
    }

    /// Create a document relation
    pub async fn create_new_document_relation(&self, data: JsonValue) -> Result<DocumentRelation> {
        self.create(Resource::DocumentRelation, data).await
    }

    /// Replace a document relation (PUT)
    pub async fn update_document_relation(
        &self,
        relation_id: i64,
        data: JsonValue,
    ) -> Result<DocumentRelation> {
        self.replace(Resource::DocumentRelation, relation_id, data)
            .await
    }

    /// Update some fields of a document relation (PATCH)
    pub async fn update_part_document_relation(
        &self,
        relation_id: i64,
        data: JsonValue,
    ) -> Result<DocumentRelation> {
        self.update(Resource::DocumentRelation, relation_id, data)
            .await
    }

    /// Delete a document relation
    pub async fn delete_document_relation(&self, relation_id: i64) -> Result<()> {
        self.http
            .delete(Resource::DocumentRelation, relation_id)
            .await
    }

    // ========================================================================
    // Relations
    // ========================================================================

    /// Stream relations between annotations (filters: `id`, `type`,
    /// `parent`, `key`, `annotation`)
    pub fn list_relations(&self, query: ListQuery) -> BoxStream<'_, Result<Relation>> {
        self.list(Resource::Relation, query)
    }

    /// Create a relation
    pub async fn create_new_relation(&self, data: JsonValue) -> Result<Relation> {
        self.create(Resource::Relation, data).await
    }
}
