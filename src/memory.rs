//! An in-memory remote source
//!
//! Useful to develop and test against without a server: it behaves like the
//! real one (it assigns ids, serves date-bounded fetches, and is the only
//! authority on the collection), and its [`MockBehaviour`] can make chosen
//! operations fail to simulate a flaky network.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};

use crate::error::RemoteError;
use crate::mock_behaviour::MockBehaviour;
use crate::task::{NewTask, Task, TaskId};
use crate::traits::RemoteSource;

/// Per-operation call counters, so tests can assert on what reached the "network"
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CallCounts {
    pub fetch_tasks: u32,
    pub add_task: u32,
    pub toggle_task: u32,
    pub delete_task: u32,
}

/// A remote source that keeps its tasks in memory
#[derive(Debug, Default)]
pub struct InMemoryRemote {
    tasks: Mutex<Vec<Task>>,
    behaviour: Mutex<MockBehaviour>,
    calls: Mutex<CallCounts>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// An instance pre-populated with tasks. Ids are kept as given
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            ..Self::default()
        }
    }

    /// Replace the mocked failure behaviour
    pub fn set_behaviour(&self, behaviour: MockBehaviour) {
        *self.behaviour.lock().unwrap() = behaviour;
    }

    /// How many times each operation has been called on this remote
    pub fn call_counts(&self) -> CallCounts {
        *self.calls.lock().unwrap()
    }

    /// The full collection, regardless of any date bound
    pub fn all_tasks(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSource for InMemoryRemote {
    async fn fetch_tasks(&self, upper_bound: NaiveDateTime) -> Result<Vec<Task>, RemoteError> {
        self.calls.lock().unwrap().fetch_tasks += 1;
        self.behaviour.lock().unwrap().can_fetch_tasks()?;

        let tasks = self.tasks.lock().unwrap();
        Ok(tasks.iter()
            .filter(|task| task.estimated_date() <= upper_bound.date())
            .cloned()
            .collect())
    }

    async fn add_task(&self, new_task: &NewTask) -> Result<Task, RemoteError> {
        self.calls.lock().unwrap().add_task += 1;
        self.behaviour.lock().unwrap().can_add_task()?;

        let task = Task::new_with_parameters(
            TaskId::from(uuid::Uuid::new_v4().to_hyphenated().to_string()),
            new_task.description.clone(),
            new_task.estimated_date,
            None,
        );
        self.tasks.lock().unwrap().push(task.clone());
        log::debug!("In-memory remote: created task {}", task.id());
        Ok(task)
    }

    async fn toggle_task(&self, id: &TaskId) -> Result<Task, RemoteError> {
        self.calls.lock().unwrap().toggle_task += 1;
        self.behaviour.lock().unwrap().can_toggle_task()?;

        let mut tasks = self.tasks.lock().unwrap();
        match tasks.iter_mut().find(|task| task.id() == id) {
            None => Err(RemoteError::Api {
                status: 404,
                message: Some(format!("no task with id {}", id)),
            }),
            Some(task) => {
                let new_done_at = if task.is_done() { None } else { Some(Utc::now()) };
                task.set_done_at(new_done_at);
                Ok(task.clone())
            },
        }
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), RemoteError> {
        self.calls.lock().unwrap().delete_task += 1;
        self.behaviour.lock().unwrap().can_delete_task()?;

        let mut tasks = self.tasks.lock().unwrap();
        let len_before = tasks.len();
        tasks.retain(|task| task.id() != id);
        if tasks.len() == len_before {
            return Err(RemoteError::Api {
                status: 404,
                message: Some(format!("no task with id {}", id)),
            });
        }
        Ok(())
    }
}
