use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::RemoteError;
use crate::task::{NewTask, Task, TaskId};

/// A remote source of truth for a task collection.
///
/// [`Client`](crate::client::Client) implements it over HTTP;
/// [`InMemoryRemote`](crate::memory::InMemoryRemote) implements it in memory,
/// which is handy for tests and offline development.
///
/// The local collection only ever mirrors what these operations return: it
/// never authoritatively creates or removes a task itself.
#[async_trait]
pub trait RemoteSource {
    /// Every task due up to (and including) `upper_bound`, in the order the
    /// source serves them. That order is the canonical display order
    async fn fetch_tasks(&self, upper_bound: NaiveDateTime) -> Result<Vec<Task>, RemoteError>;

    /// Create a task. The source assigns its id and returns the created task
    async fn add_task(&self, new_task: &NewTask) -> Result<Task, RemoteError>;

    /// Flip the completion status of a task
    async fn toggle_task(&self, id: &TaskId) -> Result<Task, RemoteError>;

    /// Remove a task
    async fn delete_task(&self, id: &TaskId) -> Result<(), RemoteError>;
}
