use super::{typed, Client};
use crate::domain::{build_upload_form, UploadFile};
use crate::error::{Error, Result};
use crate::http::RequestOptions;
use crate::models::{Annotation, Task, Upload};
use crate::pagination::ListQuery;
use crate::resources::{parse_resource_id_from_url, upload_url, Resource};
use crate::types::{ExportFormat, JsonValue, Method};
use bytes::Bytes;
use futures::future::try_join_all;
use futures::stream::BoxStream;

impl Client {
    /// Upload files to a queue.
    ///
    /// Every file creates an asynchronous task; the returned tasks are in
    /// the order of `files`. A succeeded task links to the created
    /// [`Upload`] through its `result_url`.
    pub async fn upload_document(
        &self,
        queue_id: i64,
        files: &[UploadFile],
        values: Option<&JsonValue>,
        metadata: Option<&JsonValue>,
    ) -> Result<Vec<Task>> {
        let uploads = files
            .iter()
            .map(|file| self.create_upload(queue_id, file, values, metadata));
        try_join_all(uploads).await
    }

    async fn create_upload(
        &self,
        queue_id: i64,
        file: &UploadFile,
        values: Option<&JsonValue>,
        metadata: Option<&JsonValue>,
    ) -> Result<Task> {
        let data = file.read().await?;
        let form = build_upload_form(&file.file_name, data, values, metadata);
        let response = self
            .http
            .request_json(
                Method::POST,
                &upload_url(queue_id),
                RequestOptions::new().multipart(form),
            )
            .await?;

        let task_url = response
            .get("url")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::unexpected("upload response has no task url"))?;
        self.retrieve_task(parse_resource_id_from_url(task_url)?)
            .await
    }

    /// Retrieve an upload
    pub async fn retrieve_upload(&self, upload_id: i64) -> Result<Upload> {
        self.retrieve(Resource::Upload, upload_id).await
    }

    /// Stream annotations of a queue through the JSON export.
    ///
    /// Filters include `id`, `status`, `modifier` and the `arrived_at_*`,
    /// `exported_at_*` and `export_failed_at_*` timestamps.
    pub fn export_annotations_to_json(
        &self,
        queue_id: i64,
        query: ListQuery,
    ) -> BoxStream<'_, Result<Annotation>> {
        typed(Resource::Annotation, self.http.export_json(queue_id, query))
    }

    /// Stream an export of a queue in `format` as raw byte chunks
    pub async fn export_annotations_to_file(
        &self,
        queue_id: i64,
        format: ExportFormat,
        query: ListQuery,
    ) -> Result<BoxStream<'static, Result<Bytes>>> {
        self.http.export_bytes(queue_id, format, query).await
    }
}
