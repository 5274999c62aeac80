use super::Client;
use crate::error::Result;
use crate::models::{Engine, EngineField};
use crate::pagination::ListQuery;
use crate::resources::Resource;
use futures::stream::BoxStream;

impl Client {
    /// Retrieve an engine
    pub async fn retrieve_engine(&self, engine_id: i64) -> Result<Engine> {
        self.retrieve(Resource::Engine, engine_id).await
    }

    /// Stream engines (filters: `id`, `type`, `agenda_id`)
    pub fn list_engines(&self, query: ListQuery) -> BoxStream<'_, Result<Engine>> {
        self.list(Resource::Engine, query)
    }

    /// Stream the fields of an engine, or of every engine when `engine_id`
    /// is `None`
    pub fn retrieve_engine_fields(&self, engine_id: Option<i64>) -> BoxStream<'_, Result<EngineField>> {
        self.list(Resource::EngineField, ListQuery::new().filter("engine", engine_id))
    }
}
