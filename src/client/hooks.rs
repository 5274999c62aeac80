use super::Client;
use crate::error::Result;
use crate::models::{Hook, HookRunData, HookTemplate};
use crate::pagination::ListQuery;
use crate::resources::Resource;
use crate::types::JsonValue;
use futures::stream::BoxStream;

impl Client {
    /// Stream hooks (filters include `id`, `name`, `type`, `queue`,
    /// `active`, `config_url`, `extension_source`)
    pub fn list_hooks(&self, query: ListQuery) -> BoxStream<'_, Result<Hook>> {
        self.list(Resource::Hook, query)
    }

    /// Retrieve a hook
    pub async fn retrieve_hook(&self, hook_id: i64) -> Result<Hook> {
        self.retrieve(Resource::Hook, hook_id).await
    }

    /// Create a hook
    pub async fn create_new_hook(&self, data: JsonValue) -> Result<Hook> {
        self.create(Resource::Hook, data).await
    }

    /// Update some fields of a hook (PATCH)
    pub async fn update_part_hook(&self, hook_id: i64, data: JsonValue) -> Result<Hook> {
        self.update(Resource::Hook, hook_id, data).await
    }

    /// Delete a hook
    pub async fn delete_hook(&self, hook_id: i64) -> Result<()> {
        self.http.delete(Resource::Hook, hook_id).await
    }

    /// Stream hook run logs (kept for 7 days)
    pub fn list_hook_run_data(&self, query: ListQuery) -> BoxStream<'_, Result<HookRunData>> {
        self.list(Resource::HookRunData, query)
    }

    /// Stream hook templates (filter `extension_source`: `custom` or
    /// `rossum_store`)
    pub fn list_hook_templates(&self, query: ListQuery) -> BoxStream<'_, Result<HookTemplate>> {
        self.list(Resource::HookTemplate, query)
    }

    /// Retrieve a hook template
    pub async fn retrieve_hook_template(&self, template_id: i64) -> Result<HookTemplate> {
        self.retrieve(Resource::HookTemplate, template_id).await
    }
}
