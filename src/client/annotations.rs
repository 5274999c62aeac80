use super::{failed, typed, Client};
use crate::domain::{
    build_search_params, is_annotation_imported, poll_until, validate_list_annotations_params,
    validate_search_params, PollOptions, UploadFile,
};
use crate::error::{Error, Result};
use crate::http::RequestOptions;
use crate::models::{from_json, Annotation};
use crate::pagination::ListQuery;
use crate::resources::{
    cancel_url, confirm_url, content_operations_url, delete_url, search_url, start_url,
    to_singular, Resource,
};
use crate::types::{JsonObject, JsonValue, Method};
use futures::future::try_join_all;
use futures::stream::BoxStream;
use serde_json::json;

impl Client {
    /// Stream annotations.
    ///
    /// Sideloading `content` requires `content_schema_ids`; a query
    /// violating this yields a single [`Error::InvalidParams`].
    pub fn list_annotations(&self, query: ListQuery) -> BoxStream<'_, Result<Annotation>> {
        if let Err(e) = validate_list_annotations_params(&query.sideloads, &query.content_schema_ids)
        {
            return failed(e);
        }
        self.list(Resource::Annotation, query)
    }

    /// Search annotations with a structured `query` and/or a full-text
    /// `query_string`
    pub fn search_for_annotations(
        &self,
        query: Option<&JsonObject>,
        query_string: Option<&JsonObject>,
        list_query: ListQuery,
    ) -> BoxStream<'_, Result<Annotation>> {
        if let Err(e) = validate_search_params(query, query_string) {
            return failed(e);
        }
        let body = build_search_params(query, query_string);
        let records = self.http.fetch_all_by_url(
            &search_url(Resource::Annotation),
            list_query,
            reqwest::Method::POST,
            Some(body),
        );
        typed(Resource::Annotation, records)
    }

    /// Retrieve an annotation, embedding the given related objects
    /// (e.g. `documents`, `content`, `modifiers`)
    pub async fn retrieve_annotation(
        &self,
        annotation_id: i64,
        sideloads: &[&str],
    ) -> Result<Annotation> {
        let mut annotation = self.http.fetch_one(Resource::Annotation, annotation_id).await?;
        if !sideloads.is_empty() {
            self.sideload(&mut annotation, sideloads).await?;
        }
        from_json(Resource::Annotation, JsonValue::Object(annotation))
    }

    /// Fetch the annotation until `predicate` holds. Sideloads are loaded
    /// once, after the predicate is satisfied.
    pub async fn poll_annotation<P>(
        &self,
        annotation_id: i64,
        predicate: P,
        options: &PollOptions,
        sideloads: &[&str],
    ) -> Result<Annotation>
    where
        P: Fn(&Annotation) -> bool,
    {
        let (mut raw, annotation) = poll_until(
            options,
            Resource::Annotation,
            annotation_id,
            move || self.fetch_annotation(annotation_id),
            |(_, annotation)| predicate(annotation),
        )
        .await?;

        if sideloads.is_empty() {
            return Ok(annotation);
        }
        self.sideload(&mut raw, sideloads).await?;
        from_json(Resource::Annotation, JsonValue::Object(raw))
    }

    async fn fetch_annotation(&self, annotation_id: i64) -> Result<(JsonObject, Annotation)> {
        let raw = self.http.fetch_one(Resource::Annotation, annotation_id).await?;
        let annotation = from_json(Resource::Annotation, JsonValue::Object(raw.clone()))?;
        Ok((raw, annotation))
    }

    /// Wait until the annotation finished importing
    pub async fn poll_annotation_until_imported(
        &self,
        annotation_id: i64,
        options: &PollOptions,
    ) -> Result<Annotation> {
        self.poll_annotation(annotation_id, is_annotation_imported, options, &[])
            .await
    }

    /// Import one file and wait until its annotation is imported
    pub async fn upload_and_wait_until_imported(
        &self,
        queue_id: i64,
        file: &UploadFile,
        options: &PollOptions,
    ) -> Result<Annotation> {
        let ids = self
            .import_document(queue_id, std::slice::from_ref(file), None, None)
            .await?;
        let annotation_id = ids
            .first()
            .copied()
            .ok_or_else(|| Error::unexpected("import returned no annotation"))?;
        self.poll_annotation_until_imported(annotation_id, options)
            .await
    }

    /// Start reviewing an annotation
    pub async fn start_annotation(&self, annotation_id: i64) -> Result<()> {
        self.post_action(&start_url(Resource::Annotation, annotation_id))
            .await
    }

    /// Replace an annotation (PUT)
    pub async fn update_annotation(&self, annotation_id: i64, data: JsonValue) -> Result<Annotation> {
        self.replace(Resource::Annotation, annotation_id, data)
            .await
    }

    /// Update some fields of an annotation (PATCH)
    pub async fn update_part_annotation(
        &self,
        annotation_id: i64,
        data: JsonValue,
    ) -> Result<Annotation> {
        self.update(Resource::Annotation, annotation_id, data)
            .await
    }

    /// Apply `add`/`replace`/`remove` operations to the annotation content
    pub async fn bulk_update_annotation_data(
        &self,
        annotation_id: i64,
        operations: Vec<JsonValue>,
    ) -> Result<()> {
        self.http
            .request_json(
                Method::POST,
                &content_operations_url(Resource::Annotation, annotation_id),
                RequestOptions::new().json(json!({ "operations": operations })),
            )
            .await?;
        Ok(())
    }

    /// Confirm an annotation
    pub async fn confirm_annotation(&self, annotation_id: i64) -> Result<()> {
        self.post_action(&confirm_url(Resource::Annotation, annotation_id))
            .await
    }

    /// Create an annotation
    pub async fn create_new_annotation(&self, data: JsonValue) -> Result<Annotation> {
        self.create(Resource::Annotation, data).await
    }

    /// Move an annotation to the `deleted` status
    pub async fn delete_annotation(&self, annotation_id: i64) -> Result<()> {
        self.post_action(&delete_url(Resource::Annotation, annotation_id))
            .await
    }

    /// Stop reviewing an annotation
    pub async fn cancel_annotation(&self, annotation_id: i64) -> Result<()> {
        self.post_action(&cancel_url(Resource::Annotation, annotation_id))
            .await
    }

    async fn post_action(&self, url: &str) -> Result<()> {
        self.http
            .request(Method::POST, url, RequestOptions::new())
            .await?;
        Ok(())
    }

    /// Replace the URLs of related objects with the objects themselves.
    ///
    /// Single-object endpoints do not sideload, so each related URL is
    /// fetched separately. A missing reference is set to `null`.
    async fn sideload(&self, resource: &mut JsonObject, sideloads: &[&str]) -> Result<()> {
        let fetches = sideloads.iter().map(|sideload| {
            let url = resource
                .get(&to_singular(sideload))
                .and_then(JsonValue::as_str)
                .map(str::to_string);
            async move {
                match url {
                    Some(url) => {
                        self.http
                            .request_json(Method::GET, &url, RequestOptions::new())
                            .await
                    }
                    None => Ok(JsonValue::Null),
                }
            }
        });
        let loaded = try_join_all(fetches).await?;

        for (sideload, mut value) in sideloads.iter().zip(loaded) {
            // Content (the list of sections) comes wrapped in an object
            if *sideload == "content" {
                if let Some(content) = value.get_mut("content").map(JsonValue::take) {
                    value = content;
                }
            }
            resource.insert(to_singular(sideload), value);
        }
        Ok(())
    }
}
