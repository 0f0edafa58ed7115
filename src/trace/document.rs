use crate::trace::category::Category;
use crate::trace::strings::StringTable;
use serde::Serialize;

/// Synthesized trace for one task log.
///
/// Event start times are relative to `start_time` and kept in log order; they
/// are not guaranteed to be non-negative or sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceDocument {
    /// Anchor, milliseconds since the Unix epoch. 0 when nothing was timestamped.
    pub start_time: f64,
    pub categories: Vec<Category>,
    pub string_table: StringTable,
    pub events: Vec<InstantEvent>,
}

/// Zero-duration marker.
#[derive(Debug, Clone, PartialEq)]
pub struct InstantEvent {
    /// Milliseconds after the anchor.
    pub start: f64,
    pub category: usize,
    /// Index into the string table.
    pub name: usize,
    pub data: LiveLogPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveLogPayload {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
    pub message: String,
    /// "HH:MM:SS", UTC.
    pub hour: String,
    /// "YYYY-MM-DD", UTC.
    pub date: String,
    #[serde(rename = "taskGroupURL")]
    pub task_group_url: String,
    pub task_group_profile: String,
}

pub const LIVE_LOG_MARKER: &str = "LiveLogRow";
