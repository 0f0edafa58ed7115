use crate::config::ConsolidateOptions;
use crate::graph::merge::{MergeStrategy, merge_pass};
use crate::graph::{TaskNode, remove_missing_dependencies};

/// Full consolidation: sanitize, optional chunk merge, sanitize, then one
/// task-type pass per requested type, sanitizing after each.
///
/// Each pass consumes the previous snapshot, so composing several task types
/// is a plain fold. A chunk-merged node can still be caught by a later
/// task-type pass through its rewritten label.
pub fn consolidate(mut nodes: Vec<TaskNode>, options: &ConsolidateOptions) -> Vec<TaskNode> {
    remove_missing_dependencies(&mut nodes);

    if options.merge_chunks {
        nodes = merge_pass(nodes, &MergeStrategy::Chunks);
    }
    remove_missing_dependencies(&mut nodes);

    options
        .merge_task_types
        .iter()
        .fold(nodes, |acc, task_type| {
            let mut merged = merge_pass(acc, &MergeStrategy::TaskType(task_type.clone()));
            remove_missing_dependencies(&mut merged);
            merged
        })
}
