use crate::graph::TaskNode;
use std::collections::BTreeMap;

/// Task id -> ids of the tasks that directly depend on it, sorted.
///
/// One entry per edge, so a task listing the same dependency twice appears
/// twice. Tasks nobody depends on have no entry.
pub type DependentsIndex = BTreeMap<String, Vec<String>>;

pub fn build_dependents_index(nodes: &[TaskNode]) -> DependentsIndex {
    let mut index = DependentsIndex::new();
    for node in nodes {
        for dep in &node.dependencies {
            index.entry(dep.clone()).or_default().push(node.id.clone());
        }
    }
    for dependents in index.values_mut() {
        dependents.sort();
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(id: &str, deps: &[&str]) -> TaskNode {
        TaskNode {
            id: id.to_string(),
            group_id: "g".to_string(),
            label: None,
            name: None,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            runs: vec![],
        }
    }

    #[test]
    fn reverses_edges_and_sorts() {
        let nodes = vec![
            node("fetch", &[]),
            node("zeta", &["fetch"]),
            node("alpha", &["fetch", "zeta"]),
            node("mid", &["fetch"]),
        ];
        let index = build_dependents_index(&nodes);

        let mut expected = DependentsIndex::new();
        expected.insert(
            "fetch".to_string(),
            vec!["alpha".to_string(), "mid".to_string(), "zeta".to_string()],
        );
        expected.insert("zeta".to_string(), vec!["alpha".to_string()]);
        assert_eq!(index, expected);
    }

    #[test]
    fn leaves_have_no_entry() {
        let index = build_dependents_index(&[node("a", &[]), node("b", &["a"])]);
        assert!(!index.contains_key("b"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn one_entry_per_edge() {
        let index = build_dependents_index(&[node("a", &[]), node("b", &["a", "a"]), node("c", &["a"])]);
        assert_eq!(
            index["a"],
            vec!["b".to_string(), "b".to_string(), "c".to_string()]
        );
    }
}
