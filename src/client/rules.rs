use super::Client;
use crate::error::Result;
use crate::models::Rule;
use crate::pagination::ListQuery;
use crate::resources::Resource;
use crate::types::JsonValue;
use futures::stream::BoxStream;

impl Client {
    /// Stream rules (filters: `id`, `name`, `schema`, `organization`,
    /// `enabled`)
    pub fn list_rules(&self, query: ListQuery) -> BoxStream<'_, Result<Rule>> {
        self.list(Resource::Rule, query)
    }

    /// Retrieve a rule
    pub async fn retrieve_rule(&self, rule_id: i64) -> Result<Rule> {
        self.retrieve(Resource::Rule, rule_id).await
    }

    /// Create a rule
    pub async fn create_new_rule(&self, data: JsonValue) -> Result<Rule> {
        self.create(Resource::Rule, data).await
    }

    /// Update some fields of a rule (PATCH)
    pub async fn update_part_rule(&self, rule_id: i64, data: JsonValue) -> Result<Rule> {
        self.update(Resource::Rule, rule_id, data).await
    }

    /// Delete a rule
    pub async fn delete_rule(&self, rule_id: i64) -> Result<()> {
        self.http.delete(Resource::Rule, rule_id).await
    }
}
