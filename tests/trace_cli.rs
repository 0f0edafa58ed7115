mod support;

use serde_json::{Value, json};
use support::Fixture;

const LOG: &str = "\
[taskcluster 2024-05-20T14:40:10.000Z] Task ID: abc
[taskcluster 2024-05-20T14:40:10.000Z] Worker Type: b-linux

[vcs 2024-05-20T14:40:12.000Z] cloning repository
compiling things without a prefix
[marian 2024-05-20T14:40:15.250Z] [2024-05-20 14:40:15] Ep. 1 : Up. 12
[taskcluster:warn 2024-05-20T14:40:11.353Z] retrying
";

fn write_inputs(fx: &Fixture) -> (String, String) {
    let log = fx.write_file("live_backing.log", LOG);
    let task = fx.write_json(
        "task.json",
        &json!({
            "taskGroupId": "Fo1npr9eTFqsAj4DFlqBbA",
            "dependencies": [],
            "tags": { "label": "train-teacher-1/2" }
        }),
    );
    (log, task)
}

fn run_trace(extra: &[&str]) -> Value {
    let fx = Fixture::new();
    let (log, task) = write_inputs(&fx);
    let output = support::cmd()
        .env_remove("TASKCLUSTER_ROOT_URL")
        .env_remove("TASKGRAPH_PROFILE_TOOL_URL")
        .args(["trace", "--log", &log, "--task", &task])
        .args(extra)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&output).expect("profile json")
}

#[test]
fn profile_from_live_log() {
    let value = run_trace(&[]);

    assert_eq!(value["meta"]["startTime"], json!(1716216010000.0));
    let names: Vec<&str> = value["meta"]["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["none", "fetches", "vcs", "setup", "taskcluster"]);

    let thread = &value["threads"][0];
    assert_eq!(thread["stringArray"], json!(["taskcluster", "vcs", "marian"]));

    let markers = &thread["markers"];
    assert_eq!(markers["length"], 5);
    assert_eq!(
        markers["startTime"],
        json!([0.0, 0.0, 2000.0, 5250.0, 1353.0])
    );
    assert_eq!(markers["category"], json!([4, 4, 2, 0, 4]));
    assert_eq!(markers["name"], json!([0, 0, 1, 2, 0]));

    let marian = &markers["data"][3];
    assert_eq!(marian["message"], "Ep. 1 : Up. 12");
    assert_eq!(marian["hour"], "14:40:15");
    assert_eq!(marian["date"], "2024-05-20");
    assert_eq!(
        marian["taskGroupURL"],
        "https://firefox-ci-tc.services.mozilla.com/tasks/groups/Fo1npr9eTFqsAj4DFlqBbA"
    );
}

#[test]
fn server_flag_changes_urls() {
    let value = run_trace(&["--server", "https://tc.example.com/"]);
    assert_eq!(
        value["threads"][0]["markers"]["data"][0]["taskGroupURL"],
        "https://tc.example.com/tasks/groups/Fo1npr9eTFqsAj4DFlqBbA"
    );
}

#[test]
fn earliest_anchor_policy() {
    let fx = Fixture::new();
    let log = fx.write_file(
        "out_of_order.log",
        "[setup 2024-05-20T14:00:10Z] late\n[setup 2024-05-20T14:00:00Z] early\n",
    );
    let task = fx.write_json("task.json", &json!({ "taskGroupId": "g1" }));

    let output = support::cmd()
        .args(["trace", "--log", &log, "--task", &task, "--anchor", "earliest"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        value["threads"][0]["markers"]["startTime"],
        json!([10000.0, 0.0])
    );
}

#[test]
fn binary_output_in_log_is_tolerated() {
    let fx = Fixture::new();
    let log = fx.write_bytes(
        "live_backing.log",
        b"[taskcluster 2024-05-20T14:40:10Z] start\nbinary \xff\xfe here\n[vcs 2024-05-20T14:40:11Z] cloned\n",
    );
    let task = fx.write_json("task.json", &json!({ "taskGroupId": "g1" }));

    let output = support::cmd()
        .args(["trace", "--log", &log, "--task", &task])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: Value = serde_json::from_slice(&output).unwrap();
    let markers = &value["threads"][0]["markers"];
    assert_eq!(markers["length"], 2);
    assert_eq!(markers["startTime"], json!([0.0, 1000.0]));
    assert_eq!(markers["data"][1]["message"], "cloned");
}

#[test]
fn task_without_group_id_fails() {
    let fx = Fixture::new();
    let (log, _) = write_inputs(&fx);
    let task = fx.write_json("task.json", &json!({ "dependencies": [] }));

    support::cmd()
        .args(["trace", "--log", &log, "--task", &task])
        .assert()
        .failure()
        .stderr(predicates::str::contains("decode task definition"));
}
