use crate::source::Run;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Wall-clock extent of a task, from its completed runs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTiming {
    /// Earliest start over completed runs.
    pub start: DateTime<Utc>,
    /// Latest resolution over completed runs.
    pub end: DateTime<Utc>,
    /// Sum of the completed runs' durations; retries and merged chunks add up.
    pub duration_ms: i64,
}

/// None when no run both completed and carries start and resolve times.
pub fn task_timing(runs: &[Run]) -> Option<TaskTiming> {
    let mut timing: Option<TaskTiming> = None;
    for run in runs.iter().filter(|r| r.is_completed()) {
        let (Some(started), Some(resolved)) = (run.started, run.resolved) else {
            continue;
        };
        let elapsed = (resolved - started).num_milliseconds();
        timing = Some(match timing {
            None => TaskTiming {
                start: started,
                end: resolved,
                duration_ms: elapsed,
            },
            Some(t) => TaskTiming {
                start: t.start.min(started),
                end: t.end.max(resolved),
                duration_ms: t.duration_ms + elapsed,
            },
        });
    }
    timing
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn run(reason: &str, started: Option<&str>, resolved: Option<&str>) -> Run {
        Run {
            run_id: 0,
            state: None,
            reason_resolved: Some(reason.to_string()),
            scheduled: None,
            started: started.map(at),
            resolved: resolved.map(at),
        }
    }

    #[test]
    fn only_completed_runs_count() {
        let runs = vec![
            run(
                "failed",
                Some("2024-05-20T10:00:00Z"),
                Some("2024-05-20T10:30:00Z"),
            ),
            run(
                "completed",
                Some("2024-05-20T11:00:00Z"),
                Some("2024-05-20T11:10:00Z"),
            ),
            run(
                "completed",
                Some("2024-05-20T12:00:00Z"),
                Some("2024-05-20T12:05:00Z"),
            ),
        ];

        let timing = task_timing(&runs).unwrap();
        assert_eq!(timing.start, at("2024-05-20T11:00:00Z"));
        assert_eq!(timing.end, at("2024-05-20T12:05:00Z"));
        assert_eq!(timing.duration_ms, 15 * 60 * 1000);
    }

    #[test]
    fn runs_missing_timestamps_are_skipped() {
        let runs = vec![
            run("completed", Some("2024-05-20T11:00:00Z"), None),
            run("exception", None, None),
        ];
        assert_eq!(task_timing(&runs), None);
        assert_eq!(task_timing(&[]), None);
    }
}
