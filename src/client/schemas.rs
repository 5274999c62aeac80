use super::Client;
use crate::error::Result;
use crate::models::Schema;
use crate::pagination::ListQuery;
use crate::resources::Resource;
use crate::types::JsonValue;
use futures::stream::BoxStream;

impl Client {
    /// Stream schemas (filters: `id`, `name`, `queue`)
    pub fn list_schemas(&self, query: ListQuery) -> BoxStream<'_, Result<Schema>> {
        self.list(Resource::Schema, query)
    }

    /// Retrieve a schema
    pub async fn retrieve_schema(&self, schema_id: i64) -> Result<Schema> {
        self.retrieve(Resource::Schema, schema_id).await
    }

    /// Create a schema
    pub async fn create_new_schema(&self, data: JsonValue) -> Result<Schema> {
        self.create(Resource::Schema, data).await
    }

    /// Delete a schema. Fails with 409 while queues or annotations use it.
    pub async fn delete_schema(&self, schema_id: i64) -> Result<()> {
        self.http.delete(Resource::Schema, schema_id).await
    }
}
