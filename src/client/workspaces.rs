use super::Client;
use crate::error::Result;
use crate::models::Workspace;
use crate::pagination::ListQuery;
use crate::resources::Resource;
use crate::types::JsonValue;
use futures::stream::BoxStream;

impl Client {
    /// Stream workspaces (filters: `id`, `name`, `organization`)
    pub fn list_workspaces(&self, query: ListQuery) -> BoxStream<'_, Result<Workspace>> {
        self.list(Resource::Workspace, query)
    }

    /// Retrieve a workspace
    pub async fn retrieve_workspace(&self, workspace_id: i64) -> Result<Workspace> {
        self.retrieve(Resource::Workspace, workspace_id).await
    }

    /// Create a workspace
    pub async fn create_new_workspace(&self, data: JsonValue) -> Result<Workspace> {
        self.create(Resource::Workspace, data).await
    }

    /// Delete a workspace
    pub async fn delete_workspace(&self, workspace_id: i64) -> Result<()> {
        self.http.delete(Resource::Workspace, workspace_id).await
    }
}
