//! An explicit state store for the task-list screen
//!
//! Instead of implicit re-render-on-change tracking, the screen state lives
//! here and moves only through [`TaskListStore::dispatch`]. The visible list
//! is a pure derivation (see [`filter`](crate::filter)) recomputed on every
//! applied transition, and views observe changes through subscriptions.

use std::sync::{Arc, Mutex};

use crate::filter;
use crate::task::Task;

/// Identifies one fetch round-trip.
///
/// A replacement snapshot carries the generation of the fetch that produced
/// it, so a response from a superseded fetch cannot overwrite newer data
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchGeneration(u64);

/// A handle to an active subscription
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// What the task-list screen renders
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskListState {
    /// The last good snapshot of the remote collection, in fetch order
    pub tasks: Vec<Task>,
    /// The "show completed tasks" preference
    pub show_done_tasks: bool,
    /// The derived list to display
    pub visible: Vec<Task>,
}

/// A state transition
#[derive(Clone, Debug)]
pub enum Action {
    /// Replace the whole collection with the result of the fetch tagged
    /// `generation`. Discarded if a newer fetch has been issued since
    ReplaceTasks { generation: FetchGeneration, tasks: Vec<Task> },
    /// Change the visibility preference. This does not touch the remote source
    SetShowDone(bool),
}

struct Inner {
    state: TaskListState,
    last_issued: u64,
}

type Listener = Arc<dyn Fn(&TaskListState) + Send + Sync>;

struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

/// The store owning the state of one task-list screen instance
pub struct TaskListStore {
    inner: Mutex<Inner>,
    listeners: Mutex<Listeners>,
}

impl TaskListStore {
    pub fn new(show_done_tasks: bool) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: TaskListState {
                    tasks: Vec::new(),
                    show_done_tasks,
                    visible: Vec::new(),
                },
                last_issued: 0,
            }),
            listeners: Mutex::new(Listeners { next_id: 0, entries: Vec::new() }),
        }
    }

    /// A snapshot of the current state
    pub fn state(&self) -> TaskListState {
        self.inner.lock().unwrap().state.clone()
    }

    /// Register the fetch that is about to start.
    ///
    /// The returned generation must tag the [`Action::ReplaceTasks`] built
    /// from the fetch response
    pub fn begin_fetch(&self) -> FetchGeneration {
        let mut inner = self.inner.lock().unwrap();
        inner.last_issued += 1;
        FetchGeneration(inner.last_issued)
    }

    /// Apply a state transition and re-derive the visible list.
    ///
    /// A `ReplaceTasks` that does not come from the most recently issued
    /// fetch is discarded: when fetches overlap, the last *requested* one
    /// wins, not the last one to resolve
    pub fn dispatch(&self, action: Action) {
        let snapshot = {
            let mut inner = self.inner.lock().unwrap();

            match action {
                Action::ReplaceTasks { generation, tasks } => {
                    if generation != FetchGeneration(inner.last_issued) {
                        log::debug!("Discarding a task snapshot from {:?}: fetch #{} has been issued since", generation, inner.last_issued);
                        return;
                    }
                    inner.state.tasks = tasks;
                },
                Action::SetShowDone(show_done) => {
                    inner.state.show_done_tasks = show_done;
                },
            }

            inner.state.visible = filter::visible(&inner.state.tasks, inner.state.show_done_tasks);
            inner.state.clone()
        };

        // Listeners run outside both locks: one may re-enter the store
        // (dispatch again, subscribe, or unsubscribe) from its callback
        let listeners: Vec<Listener> = self.listeners.lock().unwrap()
            .entries.iter()
            .map(|(_id, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// `listener` will be called after every applied dispatch
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&TaskListState) + Send + Sync + 'static,
    {
        let mut listeners = self.listeners.lock().unwrap();
        listeners.next_id += 1;
        let id = SubscriptionId(listeners.next_id);
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Screens unsubscribe on tear-down, so a snapshot resolving afterwards
    /// cannot reach state that no longer exists
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().unwrap().entries.retain(|(sid, _)| *sid != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn task(id: &str, done: bool) -> Task {
        let done_at = if done { Some(chrono::Utc::now()) } else { None };
        Task::new_with_parameters(
            TaskId::from(id),
            format!("Task {}", id),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            done_at,
        )
    }

    #[test]
    fn replacing_tasks_rederives_the_visible_list() {
        let store = TaskListStore::new(false);

        let generation = store.begin_fetch();
        store.dispatch(Action::ReplaceTasks {
            generation,
            tasks: vec![task("1", false), task("2", true)],
        });

        let state = store.state();
        assert_eq!(state.tasks.len(), 2);
        assert_eq!(state.visible.len(), 1);
        assert_eq!(state.visible[0].id(), &TaskId::from("1"));
    }

    #[test]
    fn changing_the_preference_rederives_without_a_new_fetch() {
        let store = TaskListStore::new(true);
        let generation = store.begin_fetch();
        store.dispatch(Action::ReplaceTasks {
            generation,
            tasks: vec![task("1", false), task("2", true)],
        });
        assert_eq!(store.state().visible.len(), 2);

        store.dispatch(Action::SetShowDone(false));
        assert_eq!(store.state().visible.len(), 1);

        store.dispatch(Action::SetShowDone(true));
        assert_eq!(store.state().visible.len(), 2);
    }

    #[test]
    fn snapshots_from_superseded_fetches_are_discarded() {
        let store = TaskListStore::new(true);

        let first = store.begin_fetch();
        let second = store.begin_fetch();

        // The older fetch resolves last: it must not overwrite anything
        store.dispatch(Action::ReplaceTasks { generation: second, tasks: vec![task("new", false)] });
        store.dispatch(Action::ReplaceTasks { generation: first, tasks: vec![task("stale", false)] });

        let state = store.state();
        assert_eq!(state.tasks.len(), 1);
        assert_eq!(state.tasks[0].id(), &TaskId::from("new"));
    }

    #[test]
    fn listeners_see_applied_dispatches_only() {
        let store = TaskListStore::new(true);
        let notified = Arc::new(AtomicU32::new(0));

        let notified_in_listener = Arc::clone(&notified);
        let subscription = store.subscribe(move |_state| {
            notified_in_listener.fetch_add(1, Ordering::SeqCst);
        });

        let stale = store.begin_fetch();
        let fresh = store.begin_fetch();
        store.dispatch(Action::ReplaceTasks { generation: fresh, tasks: Vec::new() });
        store.dispatch(Action::ReplaceTasks { generation: stale, tasks: Vec::new() });
        store.dispatch(Action::SetShowDone(false));
        assert_eq!(notified.load(Ordering::SeqCst), 2);

        store.unsubscribe(subscription);
        store.dispatch(Action::SetShowDone(true));
        assert_eq!(notified.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn listeners_can_reenter_the_store() {
        use std::sync::atomic::AtomicBool;

        let store = Arc::new(TaskListStore::new(true));
        let reacted = Arc::new(AtomicBool::new(false));

        // A view reacting to the preference change by dispatching again,
        // and subscribing/unsubscribing while it is at it
        let store_in_listener = Arc::clone(&store);
        let reacted_in_listener = Arc::clone(&reacted);
        store.subscribe(move |state| {
            if state.show_done_tasks == false && reacted_in_listener.swap(true, Ordering::SeqCst) == false {
                let other = store_in_listener.subscribe(|_state| {});
                store_in_listener.unsubscribe(other);
                store_in_listener.dispatch(Action::SetShowDone(true));
            }
        });

        store.dispatch(Action::SetShowDone(false));

        assert_eq!(reacted.load(Ordering::SeqCst), true);
        assert_eq!(store.state().show_done_tasks, true);
    }
}
