use crate::error::{Error, Result};
use crate::models::{Annotation, Task};
use crate::resources::Resource;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Whether the annotation finished importing
pub fn is_annotation_imported(annotation: &Annotation) -> bool {
    annotation.is_imported()
}

/// Whether the task finished successfully
pub fn is_task_succeeded(task: &Task) -> bool {
    task.is_succeeded()
}

/// Polling settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Sleep between two checks
    pub interval: Duration,
    /// Give up after this long; poll forever when unset
    pub timeout: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            timeout: None,
        }
    }
}

impl PollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Fetch `resource` `id` until `predicate` holds, sleeping
/// `options.interval` between checks.
///
/// Fetch errors end the polling immediately.
pub async fn poll_until<T, F, Fut, P>(
    options: &PollOptions,
    resource: Resource,
    id: i64,
    mut fetch: F,
    predicate: P,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&T) -> bool,
{
    let started = Instant::now();
    let mut checks = 0u32;

    loop {
        let value = fetch().await?;
        checks += 1;
        if predicate(&value) {
            debug!("{} {} ready after {} checks", resource, id, checks);
            return Ok(value);
        }

        let mut sleep_for = options.interval;
        if let Some(timeout) = options.timeout {
            let elapsed = started.elapsed();
            if elapsed >= timeout {
                return Err(Error::PollTimeout {
                    resource: resource.to_string(),
                    id,
                    elapsed_ms: elapsed.as_millis() as u64,
                });
            }
            sleep_for = sleep_for.min(timeout - elapsed);
        }

        debug!("{} {} not ready, checking again in {:?}", resource, id, sleep_for);
        tokio::time::sleep(sleep_for).await;
    }
}
