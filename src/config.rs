//! Runtime options for consolidation and trace synthesis.
//!
//! Values normally arrive from CLI flags / environment (see `main.rs`); the
//! library only sees the normalized structs below.

use clap::ValueEnum;

pub const DEFAULT_SERVER: &str = "https://firefox-ci-tc.services.mozilla.com";
pub const DEFAULT_PROFILE_TOOL_URL: &str =
    "https://gregtatum.github.io/taskcluster-tools/src/taskprofiler/";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidateOptions {
    pub merge_chunks: bool,
    /// Applied in order, one merge pass each. Never contains duplicates.
    pub merge_task_types: Vec<String>,
}

impl ConsolidateOptions {
    pub fn new(merge_chunks: bool, merge_task_types: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(merge_task_types.len());
        for task_type in merge_task_types {
            if !unique.contains(&task_type) {
                unique.push(task_type);
            }
        }
        Self {
            merge_chunks,
            merge_task_types: unique,
        }
    }
}

/// Which timestamped log row anchors the trace's relative times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum AnchorPolicy {
    /// The first timestamped row in log order, even if a later row is earlier.
    #[default]
    First,
    /// The earliest timestamp anywhere in the log.
    Earliest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceConfig {
    /// Taskcluster root URL, without trailing slash.
    pub server: String,
    /// Page that renders a whole task group as a profile.
    pub profile_tool_url: String,
    pub anchor: AnchorPolicy,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            profile_tool_url: DEFAULT_PROFILE_TOOL_URL.to_string(),
            anchor: AnchorPolicy::default(),
        }
    }
}

impl TraceConfig {
    pub fn new(server: &str, profile_tool_url: &str, anchor: AnchorPolicy) -> Self {
        Self {
            server: normalize_url(server, DEFAULT_SERVER).trim_end_matches('/').to_string(),
            profile_tool_url: normalize_url(profile_tool_url, DEFAULT_PROFILE_TOOL_URL),
            anchor,
        }
    }

    pub fn task_group_url(&self, task_group_id: &str) -> String {
        format!("{}/tasks/groups/{}", self.server, task_group_id)
    }

    pub fn task_group_profile_url(&self, task_group_id: &str) -> String {
        format!("{}?taskGroupId={}", self.profile_tool_url, task_group_id)
    }
}

/// Accept http(s) URLs; anything else falls back to `default`.
fn normalize_url(raw: &str, default: &str) -> String {
    let trimmed = raw.trim();
    let scheme_ok = trimmed
        .split_once("://")
        .map(|(scheme, rest)| matches!(scheme, "http" | "https") && !rest.is_empty())
        .unwrap_or(false);
    if scheme_ok {
        trimmed.to_string()
    } else {
        tracing::warn!(url = %raw, fallback = %default, "ignoring invalid URL");
        default.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn server_is_trimmed_and_validated() {
        let config = TraceConfig::new(
            " https://tc.example.com/ ",
            DEFAULT_PROFILE_TOOL_URL,
            AnchorPolicy::First,
        );
        assert_eq!(config.server, "https://tc.example.com");
        assert_eq!(
            config.task_group_url("abc"),
            "https://tc.example.com/tasks/groups/abc"
        );

        let config = TraceConfig::new("not a url", "ftp://x", AnchorPolicy::First);
        assert_eq!(config.server, DEFAULT_SERVER);
        assert_eq!(config.profile_tool_url, DEFAULT_PROFILE_TOOL_URL);
    }

    #[test]
    fn profile_url_carries_group_id() {
        let config = TraceConfig::default();
        assert_eq!(
            config.task_group_profile_url("Fo1npr9eTFqsAj4DFlqBbA"),
            "https://gregtatum.github.io/taskcluster-tools/src/taskprofiler/?taskGroupId=Fo1npr9eTFqsAj4DFlqBbA"
        );
    }

    #[test]
    fn task_types_keep_first_occurrence_order() {
        let options = ConsolidateOptions::new(
            true,
            vec!["b".to_string(), "a".to_string(), "b".to_string()],
        );
        assert!(options.merge_chunks);
        assert_eq!(options.merge_task_types, vec!["b", "a"]);
    }
}
