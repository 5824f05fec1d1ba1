//! This crate provides the synchronization core of a task-list client.
//!
//! The remote task server is the only source of truth. The [`client`] module talks to it over HTTP, and can be used as a stand-alone module.
//!
//! Because a screen should keep rendering while requests are in flight (and keep its last good data when they fail), the screen state lives in an explicit [`store`](TaskListStore): \
//! a [`SyncController`] orchestrates the remote calls and replaces the collection wholesale after each successful fetch, \
//! and the visible list is re-derived from the collection and the persisted "show completed tasks" preference on every state transition.
//!
//! For tests (or offline development), the [`memory`] module provides an in-memory stand-in for the server.

pub mod traits;

mod task;
pub use task::{NewTask, Task, TaskId};
mod error;
pub use error::{Error, RemoteError};

pub mod client;
pub use client::Client;
pub mod memory;
pub use memory::InMemoryRemote;

pub mod store;
pub use store::{Action, TaskListState, TaskListStore};
pub mod controller;
pub use controller::{SyncController, ToggleOutcome};
pub mod filter;
pub mod window;

pub mod preferences;
pub use preferences::PreferenceStore;
pub mod session;
pub use session::{Session, SessionStore};

pub mod config;
pub mod mock_behaviour;
