use super::Client;
use crate::domain::{is_task_succeeded, poll_until, PollOptions};
use crate::error::Result;
use crate::models::{from_json, Task};
use crate::resources::Resource;
use crate::types::JsonValue;

impl Client {
    /// Retrieve a task.
    ///
    /// Asks the API not to redirect finished tasks to their result.
    pub async fn retrieve_task(&self, task_id: i64) -> Result<Task> {
        let task = self
            .http
            .fetch_one_with(
                Resource::Task,
                task_id,
                vec![("no_redirect".to_string(), "True".to_string())],
            )
            .await?;
        from_json(Resource::Task, JsonValue::Object(task))
    }

    /// Fetch the task until `predicate` holds
    pub async fn poll_task<P>(&self, task_id: i64, predicate: P, options: &PollOptions) -> Result<Task>
    where
        P: Fn(&Task) -> bool,
    {
        poll_until(
            options,
            Resource::Task,
            task_id,
            move || self.retrieve_task(task_id),
            predicate,
        )
        .await
    }

    /// Wait until the task succeeded
    pub async fn poll_task_until_succeeded(
        &self,
        task_id: i64,
        options: &PollOptions,
    ) -> Result<Task> {
        self.poll_task(task_id, is_task_succeeded, options).await
    }
}
