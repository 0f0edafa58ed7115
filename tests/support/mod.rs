#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::{Value, json};
use tempfile::TempDir;

pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> String {
        self.write_bytes(rel_path, contents.as_bytes())
    }

    pub fn write_bytes(&self, rel_path: &str, contents: &[u8]) -> String {
        let path: PathBuf = self.dir.path().join(rel_path);
        fs::write(&path, contents).expect("write fixture");
        path.to_string_lossy().into_owned()
    }

    pub fn write_json(&self, rel_path: &str, value: &Value) -> String {
        self.write_file(rel_path, &value.to_string())
    }
}

pub fn cmd() -> Command {
    Command::cargo_bin("taskgraph-profile").expect("binary")
}

/// One task-group listing entry with a single completed run.
pub fn task_entry(id: &str, group: &str, label: &str, deps: &[&str], started: &str, resolved: &str) -> Value {
    json!({
        "status": {
            "taskId": id,
            "taskGroupId": group,
            "state": "completed",
            "runs": [{
                "runId": 0,
                "state": "completed",
                "reasonResolved": "completed",
                "started": started,
                "resolved": resolved
            }]
        },
        "task": {
            "taskGroupId": group,
            "dependencies": deps,
            "tags": { "label": label },
            "metadata": { "name": label }
        }
    })
}

pub fn listing(group: &str, tasks: Vec<Value>) -> Value {
    json!({ "taskGroupId": group, "tasks": tasks })
}
