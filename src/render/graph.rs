//! Graph report: the consolidated node list plus the dependents index, in the
//! shape a layout front end reads.

use crate::graph::{DependentsIndex, TaskNode, TaskTiming, build_dependents_index, task_timing};
use crate::source::Run;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: String,
    pub label: String,
    pub task_group_id: String,
    pub dependencies: Vec<String>,

    /// Extent over completed runs; None if the task never completed.
    pub timing: Option<TaskTiming>,

    /// Label prefixes of depth 1..=3, usable as task-type merge keys.
    pub task_types: Vec<String>,

    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalsView {
    pub nodes: usize,
    pub edges: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphReport {
    pub nodes: Vec<NodeView>,
    pub dependents: DependentsIndex,
    pub totals: TotalsView,
}

pub fn build_graph_report(nodes: &[TaskNode]) -> GraphReport {
    let dependents = build_dependents_index(nodes);

    let views: Vec<NodeView> = nodes
        .iter()
        .map(|node| NodeView {
            id: node.id.clone(),
            label: node.display_label().to_string(),
            task_group_id: node.group_id.clone(),
            dependencies: node.dependencies.clone(),
            timing: task_timing(&node.runs),
            task_types: (1..=3)
                .filter_map(|depth| node.task_type(depth))
                .map(str::to_string)
                .collect(),
            runs: node.runs.clone(),
        })
        .collect();

    GraphReport {
        totals: TotalsView {
            nodes: views.len(),
            edges: views.iter().map(|v| v.dependencies.len()).sum(),
            completed: views.iter().filter(|v| v.timing.is_some()).count(),
        },
        nodes: views,
        dependents,
    }
}

pub fn render_graph_report(nodes: &[TaskNode]) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&build_graph_report(nodes))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(id: &str, label: &str, deps: &[&str]) -> TaskNode {
        TaskNode {
            id: id.to_string(),
            group_id: "g".to_string(),
            label: Some(label.to_string()),
            name: None,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            runs: vec![],
        }
    }

    #[test]
    fn report_carries_dependents_and_task_types() {
        let nodes = vec![
            node("a", "fetch-corpus", &[]),
            node("b", "train-teacher-model", &["a"]),
        ];
        let report = build_graph_report(&nodes);

        assert_eq!(report.totals.nodes, 2);
        assert_eq!(report.totals.edges, 1);
        assert_eq!(report.totals.completed, 0);
        assert_eq!(report.dependents["a"], vec!["b".to_string()]);
        assert_eq!(
            report.nodes[1].task_types,
            vec!["train", "train-teacher", "train-teacher-model"]
        );
        assert_eq!(report.nodes[0].task_types, vec!["fetch", "fetch-corpus"]);
    }

    #[test]
    fn json_uses_camel_case() {
        let json = render_graph_report(&[node("a", "lint", &[])]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["nodes"][0]["taskGroupId"], "g");
        assert_eq!(value["nodes"][0]["timing"], serde_json::Value::Null);
        assert!(value["dependents"].as_object().unwrap().is_empty());
    }
}
