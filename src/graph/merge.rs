//! Merge passes: collapse several task nodes into one survivor per merge key.
//!
//! A pass owns its input snapshot and returns a new one. Nodes live in an arena
//! (`Vec<TaskNode>` addressed by slot); survivors absorb runs and dependencies
//! through their slot, and a separate emission list decides the output order.
//! The redirect map is created and dropped inside the pass.
//!
//! Two strategies:
//! - `Chunks`: "build-linux-2/4" -> survivor labelled "build-linux"
//! - `TaskType(t)`: every label starting with "t-" -> one survivor, relabelled
//!   "t (merged)" once a second node joins it

use crate::graph::TaskNode;

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

/// Key under which nodes collapse. One variant per strategy, so chunk keys and
/// task-type keys can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MergeKey {
    Chunk(String),
    TaskType(String),
}

impl fmt::Display for MergeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeKey::Chunk(base) => write!(f, "chunk:{}", base),
            MergeKey::TaskType(task_type) => write!(f, "type:{}", task_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeStrategy {
    Chunks,
    TaskType(String),
}

/// What a strategy decides for a node that takes part in a merge.
struct Claim {
    key: MergeKey,
    /// Label given to the node if it becomes the survivor.
    survivor_label: Option<String>,
}

impl MergeStrategy {
    fn claim(&self, label: Option<&str>) -> Option<Claim> {
        let label = label?;
        match self {
            MergeStrategy::Chunks => {
                let base = strip_chunk_suffix(label)?;
                Some(Claim {
                    key: MergeKey::Chunk(base.to_string()),
                    survivor_label: Some(base.to_string()),
                })
            }
            MergeStrategy::TaskType(task_type) => {
                let rest = label.strip_prefix(task_type.as_str())?;
                rest.starts_with('-').then(|| Claim {
                    key: MergeKey::TaskType(task_type.clone()),
                    survivor_label: None,
                })
            }
        }
    }

    /// Label applied to a survivor each time it absorbs another node.
    fn merged_label(&self) -> Option<String> {
        match self {
            MergeStrategy::Chunks => None,
            MergeStrategy::TaskType(task_type) => Some(format!("{} (merged)", task_type)),
        }
    }
}

fn chunk_suffix_re() -> &'static Regex {
    static CHUNK_SUFFIX_RE: OnceLock<Regex> = OnceLock::new();
    CHUNK_SUFFIX_RE
        .get_or_init(|| Regex::new(r"^(.*)-[0-9]+/[0-9]+$").expect("valid chunk suffix regex"))
}

/// "test-linux-3/12" -> Some("test-linux"); labels without a chunk suffix -> None.
pub fn strip_chunk_suffix(label: &str) -> Option<&str> {
    chunk_suffix_re()
        .captures(label)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Merged-away task id -> survivor task id, for one pass.
#[derive(Debug, Default)]
struct RedirectMap {
    targets: HashMap<String, String>,
}

impl RedirectMap {
    fn insert(&mut self, from: &str, to: &str) {
        self.targets.insert(from.to_string(), to.to_string());
    }

    /// Survivors are never merged away in the same pass, so one hop suffices.
    fn resolve<'a>(&'a self, id: &'a str) -> &'a str {
        self.targets.get(id).map(String::as_str).unwrap_or(id)
    }

    fn len(&self) -> usize {
        self.targets.len()
    }
}

/// Run one merge pass over `nodes` and return the surviving nodes.
///
/// Output order is first-occurrence order of survivors and untouched nodes.
/// Absorbed runs are appended after the survivor's own; absorbed dependencies
/// are unioned in after the survivor's own. Once every node is placed, the
/// emitted nodes' dependencies are rewritten to point at survivors.
pub fn merge_pass(nodes: Vec<TaskNode>, strategy: &MergeStrategy) -> Vec<TaskNode> {
    let input_len = nodes.len();
    let mut arena = nodes;
    let mut emitted: Vec<usize> = Vec::with_capacity(arena.len());
    let mut survivors: HashMap<MergeKey, usize> = HashMap::new();
    let mut redirects = RedirectMap::default();

    for slot in 0..arena.len() {
        let Some(claim) = strategy.claim(arena[slot].label.as_deref()) else {
            emitted.push(slot);
            continue;
        };

        let Some(&survivor) = survivors.get(&claim.key) else {
            if let Some(label) = claim.survivor_label {
                arena[slot].label = Some(label);
            }
            survivors.insert(claim.key, slot);
            emitted.push(slot);
            continue;
        };

        let runs = std::mem::take(&mut arena[slot].runs);
        let dependencies = std::mem::take(&mut arena[slot].dependencies);
        let absorbed_id = arena[slot].id.clone();

        let target = &mut arena[survivor];
        redirects.insert(&absorbed_id, &target.id);
        if let Some(label) = strategy.merged_label() {
            target.label = Some(label);
        }
        target.runs.extend(runs);
        target.dependencies = union_dependencies(&target.dependencies, dependencies);

        tracing::debug!(
            key = %claim.key,
            survivor = %target.id,
            absorbed = %absorbed_id,
            "merged task into survivor"
        );
    }

    let mut slots: Vec<Option<TaskNode>> = arena.into_iter().map(Some).collect();
    let mut out: Vec<TaskNode> = emitted
        .into_iter()
        .filter_map(|slot| slots[slot].take())
        .collect();

    for node in &mut out {
        node.dependencies = redirect_dependencies(&node.dependencies, &redirects);
    }

    tracing::info!(
        strategy = ?strategy,
        input = input_len,
        output = out.len(),
        merged = redirects.len(),
        "merge pass finished"
    );
    out
}

/// Collapse `name-i/N` chunks into one node per base name.
pub fn merge_chunks(nodes: Vec<TaskNode>) -> Vec<TaskNode> {
    merge_pass(nodes, &MergeStrategy::Chunks)
}

/// Collapse every node whose label starts with `task_type + "-"` into one node.
pub fn merge_task_type(nodes: Vec<TaskNode>, task_type: &str) -> Vec<TaskNode> {
    merge_pass(nodes, &MergeStrategy::TaskType(task_type.to_string()))
}

fn union_dependencies(existing: &[String], extra: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(existing.len() + extra.len());
    for id in existing.iter().cloned().chain(extra) {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// Resolve each dependency through the redirect map. Ids without a redirect
/// pass through as-is; a redirected id is dropped only where it would repeat
/// an id already in the list.
fn redirect_dependencies(deps: &[String], redirects: &RedirectMap) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(deps.len());
    let mut redirected: HashSet<&str> = HashSet::new();
    for dep in deps {
        let resolved = redirects.resolve(dep);
        let is_redirect = resolved != dep.as_str();
        let repeats = out.iter().any(|d| d == resolved);
        if repeats && (is_redirect || redirected.contains(resolved)) {
            continue;
        }
        if is_redirect {
            redirected.insert(resolved);
        }
        out.push(resolved.to_string());
    }
    out
}
