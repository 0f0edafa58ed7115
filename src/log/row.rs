use chrono::{DateTime, Utc};

/// A single line of a task log.
///
/// Lines that do not follow the `[component:level time] message` shape keep
/// their full text in `message`, with an empty `component` and no `time`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub component: String,
    pub level: Option<String>,
    pub time: Option<DateTime<Utc>>,
    pub message: String,
}

impl LogRow {
    pub fn untagged(line: &str) -> Self {
        Self {
            component: String::new(),
            level: None,
            time: None,
            message: line.to_string(),
        }
    }
}
