//! Tasks, as served by the remote task API

use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque, stable task identifier. It is assigned by the remote source when
/// a task is created, and is unique within a collection.
///
/// The current backend hands out numeric ids, but nothing here relies on that:
/// ids are kept as opaque strings and only ever compared for equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde. The server serializes ids as JSON numbers, so both
/// numbers and strings are accepted
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<TaskId, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;
        impl<'de> serde::de::Visitor<'de> for IdVisitor {
            type Value = TaskId;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "a task identifier (a string or an integer)")
            }
            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<TaskId, E> {
                Ok(TaskId::from(v))
            }
            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<TaskId, E> {
                Ok(TaskId::from(v.to_string()))
            }
            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<TaskId, E> {
                Ok(TaskId::from(v.to_string()))
            }
        }
        deserializer.deserialize_any(IdVisitor)
    }
}

/// A unit of work with a due date and an optional completion timestamp.
///
/// A task is "done" if and only if `done_at` is set; no other field encodes
/// completion. Instances are created by the remote source: the local
/// collection only mirrors fetch results, it never makes up tasks itself
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    description: String,
    estimated_date: NaiveDate,
    #[serde(default)]
    done_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Build a Task mirroring one that exists on a remote source
    pub fn new_with_parameters(
        id: TaskId,
        description: String,
        estimated_date: NaiveDate,
        done_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self { id, description, estimated_date, done_at }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn estimated_date(&self) -> NaiveDate {
        self.estimated_date
    }
    pub fn done_at(&self) -> Option<&DateTime<Utc>> {
        self.done_at.as_ref()
    }
    pub fn is_done(&self) -> bool {
        self.done_at.is_some()
    }

    /// Only the authoritative source flips completion; this is for
    /// [`InMemoryRemote`](crate::memory::InMemoryRemote)
    pub(crate) fn set_done_at(&mut self, done_at: Option<DateTime<Utc>>) {
        self.done_at = done_at;
    }
}

/// The payload of a task-creation request. The remote source assigns the id
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub description: String,
    pub estimated_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn deserialize_a_fetch_response() {
        let json = r#"[
            {"id": 1, "description": "Buy milk", "estimatedDate": "2024-01-10", "doneAt": null},
            {"id": 2, "description": "Pay rent", "estimatedDate": "2024-01-10", "doneAt": "2024-01-09T10:00:00Z"}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id(), &TaskId::from("1"));
        assert_eq!(tasks[0].description(), "Buy milk");
        assert_eq!(tasks[0].is_done(), false);
        assert_eq!(tasks[1].is_done(), true);
        assert_eq!(
            tasks[1].done_at(),
            Some(&Utc.with_ymd_and_hms(2024, 1, 9, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn ids_can_be_numbers_or_strings() {
        let from_number: TaskId = serde_json::from_str("42").unwrap();
        let from_string: TaskId = serde_json::from_str(r#""42""#).unwrap();
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn a_missing_done_at_means_pending() {
        let json = r#"{"id": "a", "description": "Water the plants", "estimatedDate": "2024-03-02"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.is_done(), false);
    }

    #[test]
    fn new_task_uses_the_wire_field_names() {
        let new_task = NewTask {
            description: "Walk the dog".to_string(),
            estimated_date: NaiveDate::from_ymd_opt(2024, 1, 11).unwrap(),
        };
        let json = serde_json::to_value(&new_task).unwrap();
        assert_eq!(json["description"], "Walk the dog");
        assert_eq!(json["estimatedDate"], "2024-01-11");
    }
}
