use super::Client;
use crate::error::Result;
use crate::http::{into_object, RequestOptions};
use crate::models::{Group, User};
use crate::pagination::ListQuery;
use crate::resources::{Resource, PASSWORD_CHANGE_URL, PASSWORD_RESET_URL};
use crate::types::{JsonObject, JsonValue, Method};
use futures::stream::BoxStream;
use serde_json::json;

impl Client {
    /// Stream users (filters include `organization`, `username`, `email`,
    /// `is_active`, `groups`, `queue`, `deleted`)
    pub fn list_users(&self, query: ListQuery) -> BoxStream<'_, Result<User>> {
        self.list(Resource::User, query)
    }

    /// Retrieve a user
    pub async fn retrieve_user(&self, user_id: i64) -> Result<User> {
        self.retrieve(Resource::User, user_id).await
    }

    /// Create a user
    pub async fn create_new_user(&self, data: JsonValue) -> Result<User> {
        self.create(Resource::User, data).await
    }

    /// Change the password of the authenticated user
    pub async fn change_user_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<JsonObject> {
        let body = json!({
            "old_password": old_password,
            "new_password1": new_password,
            "new_password2": new_password,
        });
        self.post_auth(PASSWORD_CHANGE_URL, body).await
    }

    /// Send a password reset link to `email`
    pub async fn reset_user_password(&self, email: &str) -> Result<JsonObject> {
        self.post_auth(PASSWORD_RESET_URL, json!({ "email": email }))
            .await
    }

    async fn post_auth(&self, url: &str, body: JsonValue) -> Result<JsonObject> {
        let response = self
            .http
            .request_json(Method::POST, url, RequestOptions::new().json(body))
            .await?;
        match response {
            JsonValue::Null => Ok(JsonObject::new()),
            other => into_object(other),
        }
    }

    /// Stream user roles
    pub fn list_user_roles(&self, query: ListQuery) -> BoxStream<'_, Result<Group>> {
        self.list(Resource::Group, query)
    }
}
