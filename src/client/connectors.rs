use super::Client;
use crate::error::Result;
use crate::models::Connector;
use crate::pagination::ListQuery;
use crate::resources::Resource;
use crate::types::JsonValue;
use futures::stream::BoxStream;

impl Client {
    /// Stream connectors (filters: `id`, `name`, `service_url`)
    pub fn list_connectors(&self, query: ListQuery) -> BoxStream<'_, Result<Connector>> {
        self.list(Resource::Connector, query)
    }

    /// Retrieve a connector
    pub async fn retrieve_connector(&self, connector_id: i64) -> Result<Connector> {
        self.retrieve(Resource::Connector, connector_id).await
    }

    /// Create a connector
    pub async fn create_new_connector(&self, data: JsonValue) -> Result<Connector> {
        self.create(Resource::Connector, data).await
    }
}
