use super::Client;
use crate::domain::{build_upload_form, UploadFile};
use crate::error::{Error, Result};
use crate::models::Queue;
use crate::pagination::ListQuery;
use crate::resources::{parse_resource_id_from_url, Resource};
use crate::types::JsonValue;
use futures::future::try_join_all;
use futures::stream::BoxStream;
use tracing::warn;

impl Client {
    /// Retrieve a queue
    pub async fn retrieve_queue(&self, queue_id: i64) -> Result<Queue> {
        self.retrieve(Resource::Queue, queue_id).await
    }

    /// Stream queues matching the query filters (e.g. `workspace`, `name`,
    /// `inbox`, `locale`)
    pub fn list_queues(&self, query: ListQuery) -> BoxStream<'_, Result<Queue>> {
        self.list(Resource::Queue, query)
    }

    /// Create a queue
    pub async fn create_new_queue(&self, data: JsonValue) -> Result<Queue> {
        self.create(Resource::Queue, data).await
    }

    /// Schedule a queue and all its related objects for deletion
    pub async fn delete_queue(&self, queue_id: i64) -> Result<()> {
        self.http.delete(Resource::Queue, queue_id).await
    }

    /// Upload files directly into a queue and return the ids of the created
    /// annotations, in the order of `files`.
    ///
    /// Deprecated in favour of [`Client::upload_document`].
    pub async fn import_document(
        &self,
        queue_id: i64,
        files: &[UploadFile],
        values: Option<&JsonValue>,
        metadata: Option<&JsonValue>,
    ) -> Result<Vec<i64>> {
        warn!("import_document is deprecated and will be removed, use upload_document instead");

        let uploads = files
            .iter()
            .map(|file| self.import_one(queue_id, file, values, metadata));
        try_join_all(uploads).await
    }

    async fn import_one(
        &self,
        queue_id: i64,
        file: &UploadFile,
        values: Option<&JsonValue>,
        metadata: Option<&JsonValue>,
    ) -> Result<i64> {
        let data = file.read().await?;
        let form = build_upload_form(&file.file_name, data, values, metadata);
        let response = self.http.upload(queue_id, form).await?;

        // One file per request, so exactly one result
        let annotation_url = response
            .get("results")
            .and_then(JsonValue::as_array)
            .and_then(|results| match results.as_slice() {
                [result] => result.get("annotation").and_then(JsonValue::as_str),
                _ => None,
            })
            .ok_or_else(|| {
                Error::unexpected(format!(
                    "upload of {} did not return exactly one annotation",
                    file.file_name
                ))
            })?;
        parse_resource_id_from_url(annotation_url)
    }

    /// Stream queues trained by an engine
    pub fn retrieve_engine_queues(&self, engine_id: i64) -> BoxStream<'_, Result<Queue>> {
        self.list(Resource::Queue, ListQuery::new().filter("engine", engine_id))
    }
}
