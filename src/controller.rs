//! Orchestration of remote reads and writes
//!
//! Every mutation is followed by a full re-fetch: the remote source is the
//! only arbiter of truth, so the local collection is replaced wholesale and
//! never merged or patched. A failed fetch keeps the previous snapshot on
//! screen. There is no retry logic anywhere; a reported failure is retried
//! by the user re-triggering the action.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::error::{Error, RemoteError};
use crate::preferences::PreferenceStore;
use crate::store::{Action, TaskListStore};
use crate::task::{NewTask, TaskId};
use crate::traits::RemoteSource;
use crate::window;

/// The outcome of a completion toggle.
///
/// A failed toggle is absorbed rather than surfaced to the user (the view is
/// merely stale until the next fetch), but the outcome keeps the failure
/// observable for callers and tests
#[derive(Debug)]
pub enum ToggleOutcome {
    /// Toggled remotely, and the collection has been re-fetched
    Synced,
    /// Toggled remotely, but the re-fetch failed. This error is the caller's to report
    RefreshFailed(Error),
    /// The remote toggle failed. Intentionally not surfaced to the user, and
    /// no re-fetch was triggered
    SilentlyFailed(RemoteError),
}

impl ToggleOutcome {
    pub fn is_synced(&self) -> bool {
        match self {
            ToggleOutcome::Synced => true,
            _ => false,
        }
    }
}

/// Orchestrates one task-list screen instance against a remote source.
///
/// `days_ahead` (the fetch horizon) is fixed for the lifetime of the screen
pub struct SyncController<R: RemoteSource> {
    remote: R,
    store: Arc<TaskListStore>,
    preferences: PreferenceStore,
    days_ahead: i64,
}

impl<R: RemoteSource> SyncController<R> {
    /// Create a controller. The persisted visibility preference becomes the
    /// initial state; the task collection starts empty until the first fetch
    pub fn new(remote: R, preferences: PreferenceStore, days_ahead: i64) -> Self {
        let store = Arc::new(TaskListStore::new(preferences.load()));
        Self { remote, store, preferences, days_ahead }
    }

    /// The store views subscribe to
    pub fn store(&self) -> Arc<TaskListStore> {
        Arc::clone(&self.store)
    }

    /// The remote source this controller talks to
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Replace the local collection with the remote state of this window.
    ///
    /// On failure the previous snapshot is kept, so the screen keeps showing
    /// the last good data instead of blanking
    pub async fn fetch(&self) -> Result<(), Error> {
        let bound = window::upper_bound(self.days_ahead, Local::now());
        let generation = self.store.begin_fetch();
        log::debug!("Fetching tasks up to {} ({:?})", bound, generation);

        let tasks = self.remote.fetch_tasks(bound).await?;
        self.store.dispatch(Action::ReplaceTasks { generation, tasks });
        Ok(())
    }

    /// Submit a new task, then re-fetch so the view reflects the remote truth.
    ///
    /// An empty (or whitespace-only) description is rejected before any
    /// network access. There is no optimistic local insert: the task shows up
    /// once the re-fetch resolves
    pub async fn add(&self, description: &str, estimated_date: NaiveDate) -> Result<(), Error> {
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        let submitted = self.remote.add_task(&NewTask {
            description: description.to_string(),
            estimated_date,
        }).await;

        // Re-fetch whether or not the creation went through, so the view
        // converges on whatever the remote now holds
        let fetched = self.fetch().await;

        if let Err(err) = submitted {
            return Err(err.into());
        }
        fetched
    }

    /// Flip the completion status of a task remotely, then re-fetch.
    ///
    /// A failed toggle is swallowed: no error for the user, no re-fetch, and
    /// the view stays stale until the next fetch
    pub async fn toggle_status(&self, id: &TaskId) -> ToggleOutcome {
        match self.remote.toggle_task(id).await {
            Err(err) => {
                log::debug!("Toggling {} failed, keeping quiet about it: {}", id, err);
                ToggleOutcome::SilentlyFailed(err)
            },
            Ok(_) => match self.fetch().await {
                Ok(()) => ToggleOutcome::Synced,
                Err(err) => ToggleOutcome::RefreshFailed(err),
            },
        }
    }

    /// Delete a task remotely, then re-fetch.
    ///
    /// On failure the error is reported and the stale task stays visible
    /// until a future fetch corrects it
    pub async fn delete(&self, id: &TaskId) -> Result<(), Error> {
        self.remote.delete_task(id).await?;
        self.fetch().await
    }

    /// Change the visibility preference.
    ///
    /// The view re-derives without touching the remote source, and the value
    /// is persisted best-effort
    pub fn set_show_done(&self, show_done: bool) {
        self.store.dispatch(Action::SetShowDone(show_done));
        self.preferences.save(show_done);
    }

    /// Flip the visibility preference. Returns the new value
    pub fn toggle_visibility(&self) -> bool {
        let show_done = !self.store.state().show_done_tasks;
        self.set_show_done(show_done);
        show_done
    }
}
