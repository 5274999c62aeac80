use super::Client;
use crate::error::{Error, Result};
use crate::http::RequestOptions;
use crate::models::{from_json, Organization, OrganizationGroup, OrganizationLimit};
use crate::pagination::ListQuery;
use crate::resources::{
    organization_limits_url, parse_resource_id_from_url, Resource, AUTH_USER_URL,
};
use crate::types::{JsonValue, Method};
use futures::stream::BoxStream;

impl Client {
    /// Stream organizations (filters: `id`, `name`)
    pub fn list_organizations(&self, query: ListQuery) -> BoxStream<'_, Result<Organization>> {
        self.list(Resource::Organization, query)
    }

    /// Retrieve an organization
    pub async fn retrieve_organization(&self, org_id: i64) -> Result<Organization> {
        self.retrieve(Resource::Organization, org_id).await
    }

    /// Retrieve the organization of the authenticated user
    pub async fn retrieve_own_organization(&self) -> Result<Organization> {
        let user = self
            .http
            .request_object(Method::GET, AUTH_USER_URL, RequestOptions::new())
            .await?;
        let organization_url = user
            .get("organization")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| Error::unexpected("authenticated user has no organization"))?;

        self.retrieve_organization(parse_resource_id_from_url(organization_url)?)
            .await
    }

    /// Retrieve the limits of an organization
    pub async fn retrieve_organization_limit(&self, org_id: i64) -> Result<OrganizationLimit> {
        let response = self
            .http
            .request_json(
                Method::GET,
                &organization_limits_url(org_id),
                RequestOptions::new(),
            )
            .await?;
        from_json(Resource::Organization, response)
    }

    /// Stream organization groups (filters: `id`, `name`)
    pub fn list_organization_groups(
        &self,
        query: ListQuery,
    ) -> BoxStream<'_, Result<OrganizationGroup>> {
        self.list(Resource::OrganizationGroup, query)
    }

    /// Retrieve an organization group
    pub async fn retrieve_organization_group(
        &self,
        org_group_id: i64,
    ) -> Result<OrganizationGroup> {
        self.retrieve(Resource::OrganizationGroup, org_group_id)
            .await
    }
}
