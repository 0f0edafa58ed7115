use crate::graph::TaskNode;
use std::collections::HashSet;

/// Drop dependency edges that point at tasks outside the working set.
///
/// Relative order is kept and duplicates are left alone. Running it twice is
/// the same as running it once.
pub fn remove_missing_dependencies(nodes: &mut [TaskNode]) {
    let present: HashSet<String> = nodes.iter().map(|n| n.id.clone()).collect();

    let mut pruned = 0usize;
    for node in nodes.iter_mut() {
        let before = node.dependencies.len();
        node.dependencies.retain(|id| present.contains(id));
        pruned += before - node.dependencies.len();
    }

    if pruned > 0 {
        tracing::debug!(pruned, "removed dependencies on tasks outside the working set");
    }
}
