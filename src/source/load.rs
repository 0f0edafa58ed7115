use crate::Result;
use crate::graph::TaskNode;
use crate::source::task::{TaskDefinition, TaskGroupListing};

use anyhow::{Context, bail};
use regex::Regex;
use std::fs;
use std::sync::OnceLock;

fn task_group_id_re() -> &'static Regex {
    static TASK_GROUP_ID_RE: OnceLock<Regex> = OnceLock::new();
    TASK_GROUP_ID_RE
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid task group id regex"))
}

/// Task group ids are URL-safe slugs ("PuI6mYZPTUqAfyZMTgeUng").
pub fn is_valid_task_group_id(id: &str) -> bool {
    task_group_id_re().is_match(id)
}

/// Read every task-group listing and flatten their tasks into one working set,
/// in argument order.
///
/// All files are decoded before anything is returned, so consolidation never
/// sees a partial set.
pub fn load_task_groups(paths: &[String]) -> Result<Vec<TaskNode>> {
    let mut nodes = Vec::new();
    for path in paths {
        let listing = read_listing(path)?;
        tracing::debug!(
            path = %path,
            task_group_id = %listing.task_group_id,
            tasks = listing.tasks.len(),
            "loaded task group"
        );
        if listing.tasks.is_empty() {
            tracing::warn!(path = %path, "task group listing contains no tasks");
        }
        nodes.extend(listing.tasks.into_iter().map(TaskNode::from));
    }
    Ok(nodes)
}

fn read_listing(path: &str) -> Result<TaskGroupListing> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read task group file {}", path))?;
    let listing: TaskGroupListing = serde_json::from_str(&text)
        .with_context(|| format!("decode task group listing {}", path))?;

    if !is_valid_task_group_id(&listing.task_group_id) {
        bail!(
            "task group id in {} is not valid: {:?}",
            path,
            listing.task_group_id
        );
    }
    Ok(listing)
}

/// Read a single task definition, the record a trace is attributed to.
pub fn load_task_definition(path: &str) -> Result<TaskDefinition> {
    let text = fs::read_to_string(path).with_context(|| format!("read task file {}", path))?;
    let task: TaskDefinition =
        serde_json::from_str(&text).with_context(|| format!("decode task definition {}", path))?;
    if !is_valid_task_group_id(&task.task_group_id) {
        bail!(
            "task group id in {} is not valid: {:?}",
            path,
            task.task_group_id
        );
    }
    Ok(task)
}
