//! Derivation of the visible task list
//!
//! This is a pure function of the collection and the "show completed tasks"
//! preference. It is recomputed by the store on every applied state
//! transition, never cached against a stale input.

use crate::task::Task;

/// The subset of `tasks` to display.
///
/// When `show_done` is set, this is the collection unchanged: the fetch order
/// is the canonical display order and no local sort is applied. Otherwise,
/// exactly the pending tasks remain, relative order preserved
pub fn visible(tasks: &[Task], show_done: bool) -> Vec<Task> {
    if show_done {
        return tasks.to_vec();
    }
    tasks.iter().filter(|task| task.is_done() == false).cloned().collect()
}
