//! Task records as the Taskcluster queue serves them.
//!
//! JSON shape of a task-group listing (`task-group/<id>/list`):
//! {
//!   "taskGroupId": "Fo1npr9eTFqsAj4DFlqBbA",
//!   "tasks": [
//!     {
//!       "status": { "taskId": "...", "taskGroupId": "...", "state": "completed",
//!                   "runs": [{ "runId": 0, "reasonResolved": "completed",
//!                              "started": "2023-09-19T20:13:46.193Z",
//!                              "resolved": "2023-09-19T20:13:46.266Z" }] },
//!       "task":   { "taskGroupId": "...", "dependencies": ["..."],
//!                   "tags": { "label": "build-linux-1/3" },
//!                   "metadata": { "name": "..." } }
//!     }
//!   ]
//! }
//!
//! Only the fields consolidation and synthesis read are modelled; everything
//! else in the payload is ignored by serde.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGroupListing {
    pub task_group_id: String,

    #[serde(default)]
    pub tasks: Vec<TaskAndStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskAndStatus {
    pub status: TaskStatus,
    pub task: TaskDefinition,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    pub task_id: String,

    #[serde(default)]
    pub task_group_id: Option<String>,

    #[serde(default)]
    pub state: Option<String>,

    /// Absent when the task never got scheduled.
    #[serde(default)]
    pub runs: Option<Vec<Run>>,
}

/// Task definition (`task/<id>`), also embedded in every listing entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    pub task_group_id: String,

    #[serde(default)]
    pub dependencies: Vec<String>,

    #[serde(default)]
    pub tags: TaskTags,

    #[serde(default)]
    pub metadata: TaskMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskTags {
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskMetadata {
    #[serde(default)]
    pub name: Option<String>,
}

/// One execution attempt. Produced upstream; never edited, only concatenated.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    #[serde(default)]
    pub run_id: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_resolved: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<DateTime<Utc>>,
}

impl Run {
    /// Only runs resolved as "completed" count toward timing.
    pub fn is_completed(&self) -> bool {
        self.reason_resolved.as_deref() == Some("completed")
    }
}
