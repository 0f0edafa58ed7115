use crate::source::{Run, TaskAndStatus};
use serde::Serialize;

/// One task in the working set.
///
/// Consolidation rewrites `label`, `dependencies` and `runs` of survivors;
/// every other field passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskNode {
    pub id: String,
    pub group_id: String,
    pub label: Option<String>,
    /// Task metadata name; shown when there is no label.
    pub name: Option<String>,
    pub dependencies: Vec<String>,
    /// Attempt order.
    pub runs: Vec<Run>,
}

impl TaskNode {
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(self.id.as_str())
    }

    /// See [`task_type_prefix`].
    pub fn task_type(&self, depth: usize) -> Option<&str> {
        self.label
            .as_deref()
            .and_then(|label| task_type_prefix(label, depth))
    }
}

impl From<TaskAndStatus> for TaskNode {
    fn from(entry: TaskAndStatus) -> Self {
        let TaskAndStatus { status, task } = entry;
        Self {
            id: status.task_id,
            group_id: status.task_group_id.unwrap_or(task.task_group_id),
            label: task.tags.label,
            name: task.metadata.name,
            dependencies: task.dependencies,
            runs: status.runs.unwrap_or_default(),
        }
    }
}

/// The first `depth` dash-separated segments of a label, e.g. depth 2 of
/// "evaluate-teacher-flores-1" is "evaluate-teacher".
///
/// None when the label has fewer than `depth` segments or `depth` is 0.
pub fn task_type_prefix(label: &str, depth: usize) -> Option<&str> {
    if depth == 0 {
        return None;
    }
    let mut seen = 0;
    for (idx, _) in label.match_indices('-') {
        seen += 1;
        if seen == depth {
            return Some(&label[..idx]);
        }
    }
    // `seen` dashes means `seen + 1` segments.
    (seen + 1 == depth).then_some(label)
}
